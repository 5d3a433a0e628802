//! Public API for Vitrine
//!
//! This module wires the individual controllers into one engine with a
//! small public surface. The embedder constructs a document, mounts it,
//! and then feeds events and time:
//!
//! ```text
//! Document + Environment → mount → dispatch(Event)* / advance(ms)* → state
//! ```
//!
//! Dispatch fans each event out to the controllers that care about it;
//! none of them share state beyond the document's class attributes.
//! Deferred work (simulated submission latency, success banner expiry,
//! debounced scroll probing) lives on a logical clock that only moves when
//! [`Vitrine::advance`] is called, which keeps every flow deterministic
//! and directly testable.
//!
//! # Example
//!
//! ```
//! use vitrine::api::{Environment, Vitrine};
//! use vitrine::dom::Document;
//! use vitrine::events::Event;
//! use vitrine::Rect;
//!
//! let mut doc = Document::new();
//! let body = doc.create_element("body");
//! let header = doc.append_child(body, "header");
//! doc.set_id(header, "header");
//! doc.set_rect(header, Rect::from_xywh(0.0, 0.0, 1280.0, 80.0));
//! let trigger = doc.append_child(header, "button");
//! doc.set_id(trigger, "hamburger");
//! let panel = doc.append_child(header, "nav");
//! doc.add_class(panel, "nav-menu");
//! let section = doc.append_child(body, "section");
//! doc.set_id(section, "home");
//! doc.set_rect(section, Rect::from_xywh(0.0, 0.0, 1280.0, 600.0));
//! let form = doc.append_child(body, "form");
//! doc.set_id(form, "contactForm");
//! for name in ["name", "email", "subject", "message"] {
//!   let field = doc.append_child(form, "input");
//!   doc.set_attribute(field, "name", name);
//! }
//! let submit = doc.append_child(form, "button");
//! doc.set_attribute(submit, "type", "submit");
//!
//! let mut page = Vitrine::mount(doc, Environment::default()).unwrap();
//! page.dispatch(Event::Scroll { y: 300.0 });
//! page.advance(10);
//! assert_eq!(page.nav_state().current, "home");
//! ```

use log::debug;
use log::error;
use log::info;
use serde::Deserialize;
use serde::Serialize;

use crate::dom::Document;
use crate::dom::NodeId;
use crate::error::DispatchError;
use crate::error::DomError;
use crate::error::Error;
use crate::error::Result;
use crate::events::Event;
use crate::events::Key;
use crate::form::Banner;
use crate::form::FormController;
use crate::form::SubmitOutcome;
use crate::form::SubmitPhase;
use crate::form::SUBMIT_LATENCY_MS;
use crate::form::SUCCESS_BANNER_MS;
use crate::geometry::Rect;
use crate::geometry::Size;
use crate::menu::MenuController;
use crate::menu::MenuState;
use crate::nav;
use crate::nav::NavController;
use crate::nav::NavState;
use crate::nav::ScrollBehavior;
use crate::nav::ScrollRequest;
use crate::observer::LazyImageController;
use crate::observer::RevealController;
use crate::schedule::Debouncer;
use crate::schedule::TimerQueue;
use crate::validate::FieldName;
use crate::validate::FormInput;

/// Quiet window for the debounced scroll probe
pub const SCROLL_DEBOUNCE_MS: u64 = 10;

/// Id of the sticky header element
pub const HEADER_ID: &str = "header";

/// Id of the mobile menu trigger
pub const MENU_TRIGGER_ID: &str = "hamburger";

/// Class of the mobile menu panel
pub const MENU_PANEL_CLASS: &str = "nav-menu";

/// Class of the navigation links
pub const NAV_LINK_CLASS: &str = "nav-link";

/// Id of the contact form
pub const FORM_ID: &str = "contactForm";

/// Class added to the body once the page is mounted
pub const LOADED_CLASS: &str = "loaded";

/// Classes whose clicks are recorded in the diagnostic log
pub const TRACKED_BUTTON_CLASSES: [&str; 3] = ["btn", "hero-cta", "project-link"];

/// Host environment the page runs in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Environment {
  /// Viewport size in CSS pixels
  pub viewport: Size,
  /// Whether the user prefers reduced motion
  pub prefers_reduced_motion: bool,
}

impl Environment {
  /// An environment with the given viewport and full motion
  pub fn screen(width: f32, height: f32) -> Self {
    Self {
      viewport: Size::new(width, height),
      prefers_reduced_motion: false,
    }
  }

  /// Same environment with the reduced-motion preference set
  pub fn with_reduced_motion(mut self) -> Self {
    self.prefers_reduced_motion = true;
    self
  }
}

impl Default for Environment {
  fn default() -> Self {
    Self::screen(1280.0, 800.0)
  }
}

/// Deferred work on the engine clock
#[derive(Debug, Clone, PartialEq)]
enum Task {
  /// The simulated submission latency elapsed
  FinishSubmission(FormInput),
  /// A success banner's lifetime elapsed
  ExpireBanner(u64),
  /// The debounced scroll probe went quiet
  NavProbe,
}

/// The mounted page: document, controllers, and clock
#[derive(Debug)]
pub struct Vitrine {
  doc: Document,
  env: Environment,
  scroll_y: f32,
  timers: TimerQueue<Task>,
  scroll_debounce: Debouncer,
  form: FormController,
  nav: NavController,
  menu: MenuController,
  reveal: RevealController,
  lazy: LazyImageController,
  scroll_requests: Vec<ScrollRequest>,
  body: NodeId,
  trigger: NodeId,
  sections: Vec<NodeId>,
}

impl Vitrine {
  /// Mounts the behavior layer onto a document
  ///
  /// Resolves every element the controllers need and fails with a
  /// [`DomError`] naming the first missing piece. Mounting also performs
  /// the initial tick: navigation state is computed for the unscrolled
  /// page, both observers run a first sweep, and the body is marked
  /// loaded.
  pub fn mount(doc: Document, env: Environment) -> Result<Self> {
    let mut doc = doc;

    let body = doc
      .elements_with_tag("body")
      .first()
      .copied()
      .ok_or(DomError::MissingBody)?;
    let header = doc.by_id(HEADER_ID).ok_or_else(|| DomError::MissingHeader {
      id: HEADER_ID.to_string(),
    })?;
    let trigger = doc
      .by_id(MENU_TRIGGER_ID)
      .ok_or_else(|| DomError::MissingMenuTrigger {
        id: MENU_TRIGGER_ID.to_string(),
      })?;
    let panel = doc
      .elements_with_class(MENU_PANEL_CLASS)
      .first()
      .copied()
      .ok_or_else(|| DomError::MissingMenuPanel {
        class: MENU_PANEL_CLASS.to_string(),
      })?;
    let form_node = doc.by_id(FORM_ID).ok_or_else(|| DomError::MissingForm {
      id: FORM_ID.to_string(),
    })?;

    let form_children = doc.descendants(form_node);
    let mut fields = Vec::new();
    for field in [
      FieldName::Name,
      FieldName::Email,
      FieldName::Subject,
      FieldName::Message,
    ] {
      let node = form_children
        .iter()
        .copied()
        .find(|child| {
          doc
            .node(*child)
            .and_then(|element| element.get_attribute_ref("name"))
            == Some(field.as_attr())
        })
        .ok_or_else(|| DomError::MissingFormField {
          name: field.as_attr().to_string(),
        })?;
      fields.push((field, node));
    }
    let submit = form_children
      .iter()
      .copied()
      .find(|child| {
        doc
          .node(*child)
          .and_then(|element| element.get_attribute_ref("type"))
          == Some("submit")
      })
      .ok_or(DomError::MissingSubmitControl)?;

    let links = doc.elements_with_class(NAV_LINK_CLASS);
    let sections: Vec<NodeId> = doc
      .elements_with_tag("section")
      .into_iter()
      .filter(|section| doc.node(*section).and_then(|element| element.id()).is_some())
      .collect();

    let reveal = RevealController::new(&doc);
    let lazy = LazyImageController::new(&doc);

    let mut page = Self {
      env,
      scroll_y: 0.0,
      timers: TimerQueue::new(),
      scroll_debounce: Debouncer::new(SCROLL_DEBOUNCE_MS),
      form: FormController::new(fields, submit),
      nav: NavController::new(header, links, sections.clone()),
      menu: MenuController::new(trigger, panel, body),
      reveal,
      lazy,
      scroll_requests: Vec::new(),
      body,
      trigger,
      sections,
      doc,
    };

    page.tick_navigation();
    page.doc.add_class(page.body, LOADED_CLASS);
    info!(
      "page behavior mounted: responsive navigation, smooth scrolling, form validation, \
       scroll animations, lazy images"
    );
    Ok(page)
  }

  /// Delivers one event to the controllers
  ///
  /// Handler faults are captured here: they are logged and suppressed, so
  /// no event is fatal to the page.
  pub fn dispatch(&mut self, event: Event) {
    if let Err(fault) = self.handle(event) {
      error!("suppressed handler fault: {fault}");
    }
  }

  /// Moves the logical clock forward, firing any deferred work that comes
  /// due
  pub fn advance(&mut self, ms: u64) {
    for task in self.timers.advance(ms) {
      self.run_task(task);
    }
  }

  fn handle(&mut self, event: Event) -> Result<()> {
    match event {
      Event::Load => {
        self.tick_navigation();
      }
      Event::Click { target } => self.handle_click(target)?,
      Event::Scroll { y } => {
        self.scroll_y = y.max(0.0);
        // Observers react immediately; the nav probe is debounced.
        self.sweep_observers();
        self.scroll_debounce.poke(&mut self.timers, Task::NavProbe);
      }
      Event::Resize { width, height } => {
        self.env.viewport = Size::new(width, height);
        self.menu.close_on_resize(&mut self.doc, width);
        self.tick_navigation();
      }
      Event::KeyDown { key } => {
        if key == Key::Escape {
          self.menu.close(&mut self.doc);
        } else if key.is_arrow() {
          self.nav.focus_step(&mut self.doc, key);
        }
      }
      Event::Submit => {
        if let SubmitOutcome::Accepted(input) = self.form.submit(&mut self.doc) {
          self
            .timers
            .schedule_in(SUBMIT_LATENCY_MS, Task::FinishSubmission(input));
        }
      }
      Event::Focus { target } => {
        if self.doc.node(target).is_none() {
          return Err(Error::Dispatch(DispatchError::UnknownNode(target)));
        }
        self.doc.set_focus(Some(target));
        if let Some(field) = self.form.field_of_node(target) {
          debug!("form field focused: {}", field.as_attr());
        }
      }
      Event::Blur { target } => {
        if self.doc.focused() == Some(target) {
          self.doc.set_focus(None);
        }
        if let Some(field) = self.form.field_of_node(target) {
          self.form.field_blurred(&mut self.doc, field);
        }
      }
      Event::Input { target, value } => {
        let field = self
          .form
          .field_of_node(target)
          .ok_or(DispatchError::NotAFormField(target))?;
        self.form.field_edited(&mut self.doc, field, &value);
      }
    }
    Ok(())
  }

  fn handle_click(&mut self, target: NodeId) -> Result<()> {
    if self.doc.contains(self.trigger, target) {
      self.menu.toggle(&mut self.doc);
      return Ok(());
    }

    let Some(element) = self.doc.node(target) else {
      return Err(Error::Dispatch(DispatchError::UnknownNode(target)));
    };
    let is_nav_link = element.has_class(NAV_LINK_CLASS);
    let href = element.get_attribute_ref("href").map(|value| value.to_string());
    let tracked = TRACKED_BUTTON_CLASSES
      .iter()
      .any(|class| element.has_class(class));
    let label = element
      .id()
      .map(|id| format!("#{id}"))
      .unwrap_or_else(|| element.tag().to_string());

    if is_nav_link {
      self.menu.close(&mut self.doc);
      self.doc.set_focus(Some(target));
    } else {
      self.menu.close_on_outside_click(&mut self.doc, target);
    }

    if tracked {
      debug!("button clicked: {label}");
    }

    if let Some(href) = href {
      if href.starts_with('#') {
        if let Some(top) = self.nav.resolve_anchor(&self.doc, &href) {
          self.request_scroll(top);
        }
      }
    }
    Ok(())
  }

  fn run_task(&mut self, task: Task) {
    match task {
      Task::FinishSubmission(input) => {
        let seq = self.form.complete(&mut self.doc, &input);
        self.timers.schedule_in(SUCCESS_BANNER_MS, Task::ExpireBanner(seq));
      }
      Task::ExpireBanner(seq) => self.form.expire_banner(seq),
      Task::NavProbe => self.tick_navigation(),
    }
  }

  fn tick_navigation(&mut self) {
    self.nav.update(&mut self.doc, self.scroll_y);
    self.sweep_observers();
  }

  fn sweep_observers(&mut self) {
    let viewport = Rect::from_xywh(
      0.0,
      self.scroll_y,
      self.env.viewport.width,
      self.env.viewport.height,
    );
    let revealed = self.reveal.sweep(&mut self.doc, viewport);
    if !revealed.is_empty() {
      debug!("revealed {} element(s)", revealed.len());
    }
    let loaded = self.lazy.sweep(&mut self.doc, viewport);
    if !loaded.is_empty() {
      debug!("lazily loaded {} image(s)", loaded.len());
    }
  }

  fn request_scroll(&mut self, top: f32) {
    let behavior = if self.env.prefers_reduced_motion {
      ScrollBehavior::Auto
    } else {
      ScrollBehavior::Smooth
    };
    self.scroll_requests.push(ScrollRequest { top, behavior });
    self.scroll_y = top.max(0.0);
    self.sweep_observers();
    self.scroll_debounce.poke(&mut self.timers, Task::NavProbe);
  }

  // ----- utility surface -----

  /// Whether the environment prefers reduced motion
  pub fn prefers_reduced_motion(&self) -> bool {
    self.env.prefers_reduced_motion
  }

  /// Recomputes the current section from scratch
  ///
  /// Independent of the nav controller's cached state; see
  /// [`nav::current_section`] for the (deliberately different) probe it
  /// uses.
  pub fn current_section(&self) -> String {
    nav::current_section(&self.doc, &self.sections, self.scroll_y)
  }

  /// Requests a smooth scroll back to the page origin
  pub fn scroll_to_top(&mut self) {
    self.request_scroll(0.0);
  }

  // ----- state accessors -----

  /// The mounted document
  pub fn document(&self) -> &Document {
    &self.doc
  }

  /// Current host environment
  pub fn environment(&self) -> Environment {
    self.env
  }

  /// Current scroll offset
  pub fn scroll_y(&self) -> f32 {
    self.scroll_y
  }

  /// Logical time in milliseconds since mount
  pub fn now_ms(&self) -> u64 {
    self.timers.now()
  }

  /// Navigation state snapshot
  pub fn nav_state(&self) -> &NavState {
    self.nav.state()
  }

  /// Menu state snapshot
  pub fn menu_state(&self) -> MenuState {
    self.menu.state()
  }

  /// Submission lifecycle phase
  pub fn submit_phase(&self) -> SubmitPhase {
    self.form.phase()
  }

  /// The banner currently shown above the form, if any
  pub fn banner(&self) -> Option<&Banner> {
    self.form.banner()
  }

  /// Dismisses the current banner (the banner's close control)
  pub fn dismiss_banner(&mut self) {
    self.form.dismiss_banner();
  }

  /// Inline error for a form field, if its last blur failed
  pub fn field_error(&self, field: FieldName) -> Option<&'static str> {
    self.form.field_error(field)
  }

  /// Every programmatic scroll requested so far, oldest first
  pub fn scroll_requests(&self) -> &[ScrollRequest] {
    &self.scroll_requests
  }
}
