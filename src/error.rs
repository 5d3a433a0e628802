//! Error types for Vitrine
//!
//! Two failure families exist:
//! - Mount-time contract violations: the supplied document is missing a
//!   structural piece the controllers require (header, menu trigger/panel,
//!   the contact form or one of its named fields).
//! - Dispatch faults: an event handler hit an inconsistent state at
//!   runtime. These are captured at the top level, logged, and suppressed;
//!   they never surface to the embedder as a hard failure.
//!
//! Form validation failures are NOT errors. They are expected,
//! user-correctable values returned by the validator.
//!
//! All errors use the `thiserror` crate for minimal boilerplate and proper
//! error trait implementations.

use thiserror::Error;

/// Result type alias for Vitrine operations
///
/// # Examples
///
/// ```
/// use vitrine::Result;
///
/// fn mount_page() -> Result<()> {
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for Vitrine
#[derive(Error, Debug)]
pub enum Error {
  /// The document does not satisfy the structural contract
  #[error("Document contract error: {0}")]
  Dom(#[from] DomError),

  /// An event handler fault captured during dispatch
  #[error("Dispatch error: {0}")]
  Dispatch(#[from] DispatchError),
}

/// Structural requirements the mounted document failed to meet
///
/// The behavior layer needs a handful of well-known elements to wire its
/// controllers. Each variant names the missing piece.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
  /// No body element
  #[error("document has no <body> element")]
  MissingBody,

  /// No header element to measure and decorate
  #[error("document has no header element (id \"{id}\")")]
  MissingHeader { id: String },

  /// No menu trigger control
  #[error("document has no menu trigger (id \"{id}\")")]
  MissingMenuTrigger { id: String },

  /// No menu panel
  #[error("document has no menu panel (class \"{class}\")")]
  MissingMenuPanel { class: String },

  /// No contact form element
  #[error("document has no contact form (id \"{id}\")")]
  MissingForm { id: String },

  /// The contact form lacks one of its named fields
  #[error("contact form has no field named \"{name}\"")]
  MissingFormField { name: String },

  /// The contact form lacks a submit control
  #[error("contact form has no submit control")]
  MissingSubmitControl,
}

/// Runtime faults raised by event handlers
///
/// Dispatch catches these, logs them, and keeps going; no event is fatal
/// to the page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
  /// An event referenced a node id outside the document
  #[error("event targets unknown node {0}")]
  UnknownNode(usize),

  /// An event referenced a node that is not a form field
  #[error("event targets node {0} which is not a form field")]
  NotAFormField(usize),
}
