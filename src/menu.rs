//! Mobile menu: open/closed state and its close triggers
//!
//! The menu is a single boolean projected as an `active` class on both the
//! trigger (hamburger) and the panel, plus a scroll lock on the body while
//! open. Four things close it: clicking a nav link, clicking outside both
//! trigger and panel, resizing past the desktop breakpoint, and Escape.
//! Closing an already-closed menu is a no-op.

use serde::Deserialize;
use serde::Serialize;

use crate::dom::Document;
use crate::dom::NodeId;

/// Viewport widths strictly above this close the mobile menu on resize
pub const MOBILE_BREAKPOINT_PX: f32 = 767.0;

/// Class projected onto the trigger and panel while open
pub const OPEN_CLASS: &str = "active";

/// Class projected onto the body while the menu locks page scroll
pub const SCROLL_LOCK_CLASS: &str = "no-scroll";

/// Snapshot of menu state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuState {
  pub open: bool,
}

/// Mobile menu controller
#[derive(Debug, Clone)]
pub struct MenuController {
  trigger: NodeId,
  panel: NodeId,
  body: NodeId,
  state: MenuState,
}

impl MenuController {
  /// Wires the controller to the resolved trigger, panel, and body nodes
  pub fn new(trigger: NodeId, panel: NodeId, body: NodeId) -> Self {
    Self {
      trigger,
      panel,
      body,
      state: MenuState::default(),
    }
  }

  /// Current menu state
  pub fn state(&self) -> MenuState {
    self.state
  }

  /// True while the menu is open
  pub fn is_open(&self) -> bool {
    self.state.open
  }

  /// Flips the menu and returns whether it is now open
  pub fn toggle(&mut self, doc: &mut Document) -> bool {
    self.state.open = !self.state.open;
    self.project(doc);
    self.state.open
  }

  /// Closes the menu; a no-op when already closed
  pub fn close(&mut self, doc: &mut Document) {
    if !self.state.open {
      return;
    }
    self.state.open = false;
    self.project(doc);
  }

  /// Closes the menu when a click landed outside both trigger and panel
  pub fn close_on_outside_click(&mut self, doc: &mut Document, target: NodeId) {
    if doc.contains(self.trigger, target) || doc.contains(self.panel, target) {
      return;
    }
    self.close(doc);
  }

  /// Closes the menu when the viewport grew past the desktop breakpoint
  pub fn close_on_resize(&mut self, doc: &mut Document, width: f32) {
    if width > MOBILE_BREAKPOINT_PX {
      self.close(doc);
    }
  }

  fn project(&self, doc: &mut Document) {
    if self.state.open {
      doc.add_class(self.trigger, OPEN_CLASS);
      doc.add_class(self.panel, OPEN_CLASS);
      doc.add_class(self.body, SCROLL_LOCK_CLASS);
    } else {
      doc.remove_class(self.trigger, OPEN_CLASS);
      doc.remove_class(self.panel, OPEN_CLASS);
      doc.remove_class(self.body, SCROLL_LOCK_CLASS);
    }
  }
}
