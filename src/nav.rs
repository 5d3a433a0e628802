//! Navigation state: active section, header decoration, anchor scrolling
//!
//! The "current" section is derived from scroll position on every
//! scroll/resize/load tick: a probe line sits one header height plus
//! [`PROBE_OFFSET_PX`] below the scroll offset, and the last section (in
//! document order) whose vertical range contains the probe wins. Near the
//! very top of the page the home section is forced regardless of
//! geometry. The probe offsets are inherited behavior; overlapping
//! sections resolve by the last match, and that tie-break is kept as-is.
//!
//! Anchor navigation resolves `#fragment` links to absolute scroll
//! targets, compensating for the sticky header's height.

use log::debug;
use serde::Deserialize;
use serde::Serialize;

use crate::dom::Document;
use crate::dom::NodeId;
use crate::events::Key;

/// Distance below the header line where the section probe sits
pub const PROBE_OFFSET_PX: f32 = 50.0;

/// Scroll offsets below this force the home section as current
pub const TOP_OVERRIDE_PX: f32 = 100.0;

/// Probe offset used by the standalone [`current_section`] utility
pub const UTILITY_PROBE_PX: f32 = 100.0;

/// Scroll offset past which the header is decorated as "scrolled"
pub const HEADER_SCROLLED_PX: f32 = 50.0;

/// Identifier of the section representing the top of the page
pub const HOME_SECTION: &str = "home";

/// Class projected onto the active nav link
pub const ACTIVE_CLASS: &str = "active";

/// Class projected onto the header once the page has scrolled
pub const SCROLLED_CLASS: &str = "scrolled";

/// Snapshot of navigation state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavState {
  /// Id of the section currently highlighted in the nav
  pub current: String,
  /// Whether the header carries its scrolled decoration
  pub header_scrolled: bool,
}

impl Default for NavState {
  fn default() -> Self {
    Self {
      current: HOME_SECTION.to_string(),
      header_scrolled: false,
    }
  }
}

/// How a programmatic scroll should move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollBehavior {
  /// Jump instantly (reduced motion)
  Auto,
  /// Animate
  Smooth,
}

/// A recorded programmatic scroll
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollRequest {
  /// Target document offset
  pub top: f32,
  pub behavior: ScrollBehavior,
}

/// Scroll-driven navigation controller
#[derive(Debug, Clone)]
pub struct NavController {
  header: NodeId,
  links: Vec<NodeId>,
  sections: Vec<NodeId>,
  state: NavState,
}

impl NavController {
  /// Wires the controller to the resolved header, nav links, and sections
  pub fn new(header: NodeId, links: Vec<NodeId>, sections: Vec<NodeId>) -> Self {
    Self {
      header,
      links,
      sections,
      state: NavState::default(),
    }
  }

  /// Current navigation state
  pub fn state(&self) -> &NavState {
    &self.state
  }

  /// Nav links in document order
  pub fn links(&self) -> &[NodeId] {
    &self.links
  }

  /// Recomputes the current section and projects classes
  ///
  /// Clears the active class from every link first, then marks the one
  /// whose `href` targets the current section; at most one link is active
  /// afterwards.
  pub fn update(&mut self, doc: &mut Document, scroll_y: f32) {
    let header_height = doc
      .node(self.header)
      .map(|header| header.rect().height)
      .unwrap_or(0.0);

    self.state.header_scrolled = scroll_y > HEADER_SCROLLED_PX;
    if self.state.header_scrolled {
      doc.add_class(self.header, SCROLLED_CLASS);
    } else {
      doc.remove_class(self.header, SCROLLED_CLASS);
    }

    let probe = scroll_y + header_height + PROBE_OFFSET_PX;
    let mut current = HOME_SECTION.to_string();
    for section in &self.sections {
      let Some(element) = doc.node(*section) else {
        continue;
      };
      if element.rect().contains_y(probe) {
        if let Some(id) = element.id() {
          // Later sections overwrite earlier matches.
          current = id.to_string();
        }
      }
    }
    if scroll_y < TOP_OVERRIDE_PX {
      current = HOME_SECTION.to_string();
    }

    if current != self.state.current {
      debug!("section viewed: {current}");
      self.state.current = current;
    }

    let target = format!("#{}", self.state.current);
    for link in &self.links {
      doc.remove_class(*link, ACTIVE_CLASS);
      let href = doc.node(*link).and_then(|element| element.get_attribute_ref("href"));
      if href == Some(target.as_str()) {
        doc.add_class(*link, ACTIVE_CLASS);
      }
    }
  }

  /// Resolves an anchor href to an absolute scroll target
  ///
  /// Bare `#` and `#home` target the page origin. Other fragments target
  /// the named section's top minus the header height, so the section lands
  /// just below the sticky header. Unknown fragments resolve to nothing.
  pub fn resolve_anchor(&self, doc: &Document, href: &str) -> Option<f32> {
    let fragment = href.strip_prefix('#')?;
    if fragment.is_empty() || fragment == HOME_SECTION {
      return Some(0.0);
    }
    let section = doc.by_id(fragment)?;
    let header_height = doc
      .node(self.header)
      .map(|header| header.rect().height)
      .unwrap_or(0.0);
    Some(doc.node(section)?.rect().top() - header_height)
  }

  /// Moves focus between nav links on arrow keys, wrapping at both ends
  ///
  /// Does nothing unless the focused element is one of the nav links.
  pub fn focus_step(&self, doc: &mut Document, key: Key) -> Option<NodeId> {
    if !key.is_arrow() || self.links.is_empty() {
      return None;
    }
    let focused = doc.focused()?;
    let index = self.links.iter().position(|link| *link == focused)?;

    let next = if key.is_backward_arrow() {
      if index == 0 {
        self.links.len() - 1
      } else {
        index - 1
      }
    } else if index == self.links.len() - 1 {
      0
    } else {
      index + 1
    };

    let target = self.links[next];
    doc.set_focus(Some(target));
    Some(target)
  }
}

/// Recomputes the current section from scratch, independent of controller
/// state
///
/// This is the standalone utility surface: a flat `scroll_y +
/// `[`UTILITY_PROBE_PX`] probe with first-match semantics, falling back to
/// [`HOME_SECTION`]. It deliberately differs from
/// [`NavController::update`] (header-relative probe, last match wins); both
/// behaviors are inherited and kept.
pub fn current_section(doc: &Document, sections: &[NodeId], scroll_y: f32) -> String {
  let probe = scroll_y + UTILITY_PROBE_PX;
  for section in sections {
    let Some(element) = doc.node(*section) else {
      continue;
    };
    if element.rect().contains_y(probe) {
      if let Some(id) = element.id() {
        return id.to_string();
      }
    }
  }
  HOME_SECTION.to_string()
}
