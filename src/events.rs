//! Input event vocabulary
//!
//! The browser's event soup is narrowed to the handful of inputs the
//! controllers react to. Events are plain data; the engine routes them in
//! [`crate::api::Vitrine::dispatch`].

use serde::Deserialize;
use serde::Serialize;

use crate::dom::NodeId;

/// Keys the behavior layer distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
  /// Escape closes the mobile menu
  Escape,
  ArrowLeft,
  ArrowRight,
  ArrowUp,
  ArrowDown,
  /// Anything else; routed nowhere
  Other,
}

impl Key {
  /// True for the four arrow keys
  pub fn is_arrow(self) -> bool {
    matches!(
      self,
      Key::ArrowLeft | Key::ArrowRight | Key::ArrowUp | Key::ArrowDown
    )
  }

  /// True for arrows that step focus backward through the nav links
  pub fn is_backward_arrow(self) -> bool {
    matches!(self, Key::ArrowLeft | Key::ArrowUp)
  }
}

/// An input event delivered to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
  /// Initial load tick; recomputes navigation state and observer sweeps
  Load,
  /// Pointer click on an element
  Click { target: NodeId },
  /// Viewport scrolled to a new vertical offset
  Scroll { y: f32 },
  /// Viewport resized
  Resize { width: f32, height: f32 },
  /// Key pressed; the target is the document's focused element
  KeyDown { key: Key },
  /// Contact form submitted
  Submit,
  /// A form field gained focus
  Focus { target: NodeId },
  /// A form field lost focus
  Blur { target: NodeId },
  /// A form field's value changed
  Input { target: NodeId, value: String },
}
