//! Contact form lifecycle
//!
//! Orchestrates validate → loading → simulated delay → banner → reset. A
//! submission attempt moves through `Idle → Validating → (Invalid → Idle |
//! Loading → Success → Idle)`; there is no transport underneath, so
//! loading always resolves to success once the simulated latency elapses.
//!
//! State is held explicitly (phase, banner, per-field errors) and pushed
//! onto the document as classes and disabled flags; nothing is derived by
//! re-reading the document. The engine owns the clock, so the controller
//! reports what to schedule (the pending submission, a success banner's
//! expiry) instead of scheduling itself.

use log::debug;
use log::info;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde::Serialize;

use crate::dom::Document;
use crate::dom::NodeId;
use crate::validate;
use crate::validate::FieldError;
use crate::validate::FieldName;
use crate::validate::FormInput;

/// Simulated network latency for a submission, in milliseconds
pub const SUBMIT_LATENCY_MS: u64 = 2000;

/// Lifetime of a success banner before it dismisses itself
pub const SUCCESS_BANNER_MS: u64 = 5000;

/// Class projected onto the submit control while a submission is pending
pub const LOADING_CLASS: &str = "loading";

/// Class projected onto a field with an inline validation error
pub const FIELD_INVALID_CLASS: &str = "invalid";

/// Where the controller is in the submission lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitPhase {
  /// No submission in flight
  Idle,
  /// Controls are locked while the simulated latency runs down
  Loading,
}

/// Banner flavor; errors persist, successes expire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BannerKind {
  Success,
  Error,
}

/// A dismissible banner above the form
///
/// At most one banner exists at a time; showing a new one replaces any
/// banner already present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
  pub kind: BannerKind,
  pub text: String,
}

/// Outcome of a submit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
  /// Validation failed; an error banner is up, nothing to schedule
  Rejected,
  /// Snapshot accepted; the engine should finish it after
  /// [`SUBMIT_LATENCY_MS`]
  Accepted(FormInput),
  /// A submission is already in flight; the attempt was dropped
  AlreadyLoading,
}

/// The contact form controller
#[derive(Debug, Clone)]
pub struct FormController {
  fields: Vec<(FieldName, NodeId)>,
  submit: NodeId,
  phase: SubmitPhase,
  banner: Option<Banner>,
  banner_seq: u64,
  field_errors: FxHashMap<FieldName, &'static str>,
}

impl FormController {
  /// Wires the controller to resolved field and submit-control nodes
  ///
  /// `fields` must be ordered name, email, subject, message; the engine's
  /// mount step guarantees that.
  pub fn new(fields: Vec<(FieldName, NodeId)>, submit: NodeId) -> Self {
    Self {
      fields,
      submit,
      phase: SubmitPhase::Idle,
      banner: None,
      banner_seq: 0,
      field_errors: FxHashMap::default(),
    }
  }

  /// Current lifecycle phase
  pub fn phase(&self) -> SubmitPhase {
    self.phase
  }

  /// The banner currently shown, if any
  pub fn banner(&self) -> Option<&Banner> {
    self.banner.as_ref()
  }

  /// Inline error for a field, if its last blur failed validation
  pub fn field_error(&self, field: FieldName) -> Option<&'static str> {
    self.field_errors.get(&field).copied()
  }

  /// Maps a document node back to the form field it holds
  pub fn field_of_node(&self, node: NodeId) -> Option<FieldName> {
    self
      .fields
      .iter()
      .find(|(_, id)| *id == node)
      .map(|(field, _)| *field)
  }

  /// Reads the current field values into a submission snapshot
  pub fn snapshot(&self, doc: &Document) -> FormInput {
    let mut input = FormInput::default();
    for (field, node) in &self.fields {
      let value = doc
        .node(*node)
        .map(|element| element.value().to_string())
        .unwrap_or_default();
      match field {
        FieldName::Name => input.name = value,
        FieldName::Email => input.email = value,
        FieldName::Subject => input.subject = value,
        FieldName::Message => input.message = value,
      }
    }
    input
  }

  /// Handles a submit attempt
  ///
  /// Invalid input raises a persistent error banner aggregating every
  /// failure and leaves the fields untouched. Valid input locks the form
  /// and hands the snapshot back for deferred completion.
  pub fn submit(&mut self, doc: &mut Document) -> SubmitOutcome {
    if self.phase == SubmitPhase::Loading {
      // Controls are disabled during loading; a second submit is the one
      // re-entrancy hazard and is dropped outright.
      debug!("submit ignored: submission already in flight");
      return SubmitOutcome::AlreadyLoading;
    }

    let input = self.snapshot(doc);
    let errors = validate::validate(&input);
    if !errors.is_empty() {
      debug!("form validation failed with {} error(s)", errors.len());
      self.show_banner(BannerKind::Error, error_banner_text(&errors));
      return SubmitOutcome::Rejected;
    }

    self.phase = SubmitPhase::Loading;
    self.set_controls_locked(doc, true);
    SubmitOutcome::Accepted(input)
  }

  /// Completes a submission once the simulated latency has elapsed
  ///
  /// Unlocks the controls, clears every field, and raises the success
  /// banner. Returns the banner sequence number so the engine can schedule
  /// its expiry [`SUCCESS_BANNER_MS`] from now.
  pub fn complete(&mut self, doc: &mut Document, input: &FormInput) -> u64 {
    self.phase = SubmitPhase::Idle;
    self.set_controls_locked(doc, false);

    for (field, node) in self.fields.clone() {
      doc.set_value(node, "");
      self.clear_field_error(doc, field);
    }

    match serde_json::to_string(input) {
      Ok(json) => info!("contact form submitted: {json}"),
      Err(_) => info!("contact form submitted by {}", input.name),
    }

    self.show_banner(
      BannerKind::Success,
      format!(
        "Thank you for your message, {}! I will get back to you as soon as possible.",
        input.name
      ),
    )
  }

  /// Dismisses the banner manually (the close control)
  pub fn dismiss_banner(&mut self) {
    self.banner = None;
  }

  /// Expires the success banner carrying `seq`
  ///
  /// A banner raised after this one was scheduled has a newer sequence
  /// number, so a stale expiry never removes it.
  pub fn expire_banner(&mut self, seq: u64) {
    if self.banner_seq == seq {
      self.banner = None;
    }
  }

  /// Revalidates one field on blur and projects its inline error
  pub fn field_blurred(&mut self, doc: &mut Document, field: FieldName) {
    let node = self.node_of_field(field);
    let value = doc
      .node(node)
      .map(|element| element.value().to_string())
      .unwrap_or_default();
    self.clear_field_error(doc, field);
    if let Some(error) = validate::validate_field(field, &value) {
      self.field_errors.insert(field, error.message);
      doc.add_class(node, FIELD_INVALID_CLASS);
    }
  }

  /// Records an edit: stores the value and clears the field's inline error
  ///
  /// The field is not revalidated until its next blur.
  pub fn field_edited(&mut self, doc: &mut Document, field: FieldName, value: &str) {
    let node = self.node_of_field(field);
    doc.set_value(node, value);
    self.clear_field_error(doc, field);
  }

  fn node_of_field(&self, field: FieldName) -> NodeId {
    self
      .fields
      .iter()
      .find(|(candidate, _)| *candidate == field)
      .map(|(_, node)| *node)
      .unwrap_or_default()
  }

  fn clear_field_error(&mut self, doc: &mut Document, field: FieldName) {
    if self.field_errors.remove(&field).is_some() {
      doc.remove_class(self.node_of_field(field), FIELD_INVALID_CLASS);
    }
  }

  fn show_banner(&mut self, kind: BannerKind, text: String) -> u64 {
    self.banner_seq += 1;
    self.banner = Some(Banner { kind, text });
    self.banner_seq
  }

  fn set_controls_locked(&self, doc: &mut Document, locked: bool) {
    for (_, node) in &self.fields {
      doc.set_disabled(*node, locked);
    }
    doc.set_disabled(self.submit, locked);
    if locked {
      doc.add_class(self.submit, LOADING_CLASS);
    } else {
      doc.remove_class(self.submit, LOADING_CLASS);
    }
  }
}

fn error_banner_text(errors: &[FieldError]) -> String {
  let mut text = String::from("There are errors in the form:");
  for error in errors {
    text.push_str("\n\u{2022} ");
    text.push_str(error.message);
  }
  text
}
