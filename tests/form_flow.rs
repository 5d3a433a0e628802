//! End-to-end contact form lifecycle through the public API.

mod common;

use common::{field, portfolio};
use vitrine::api::{Environment, Vitrine};
use vitrine::events::Event;
use vitrine::form::{SUBMIT_LATENCY_MS, SUCCESS_BANNER_MS};
use vitrine::validate::{EMAIL_INVALID, MESSAGE_TOO_SHORT, NAME_REQUIRED};
use vitrine::{BannerKind, FieldName, SubmitPhase};

fn mounted() -> Vitrine {
  common::init_logs();
  Vitrine::mount(portfolio(), Environment::default()).expect("fixture satisfies the contract")
}

fn type_into(page: &mut Vitrine, name: &str, value: &str) {
  let target = field(page.document(), name);
  page.dispatch(Event::Input {
    target,
    value: value.to_string(),
  });
}

fn fill_valid(page: &mut Vitrine) {
  type_into(page, "name", "Jan");
  type_into(page, "email", "jan@example.com");
  type_into(page, "subject", "Hi");
  type_into(page, "message", "Hello there!");
}

fn submit_button(page: &Vitrine) -> usize {
  let doc = page.document();
  doc
    .elements_with_attribute("type")
    .into_iter()
    .find(|node| doc.node(*node).unwrap().get_attribute_ref("type") == Some("submit"))
    .expect("fixture has a submit button")
}

#[test]
fn valid_submission_runs_the_full_lifecycle() {
  let mut page = mounted();
  fill_valid(&mut page);

  page.dispatch(Event::Submit);
  assert_eq!(page.submit_phase(), SubmitPhase::Loading);

  // Every control is locked for the duration of the simulated latency.
  let submit = submit_button(&page);
  assert!(page.document().node(submit).unwrap().is_disabled());
  assert!(page.document().has_class(submit, "loading"));
  for name in ["name", "email", "subject", "message"] {
    let node = field(page.document(), name);
    assert!(page.document().node(node).unwrap().is_disabled(), "{name} locked");
  }

  page.advance(SUBMIT_LATENCY_MS - 1);
  assert_eq!(page.submit_phase(), SubmitPhase::Loading);
  assert!(page.banner().is_none());

  page.advance(1);
  assert_eq!(page.submit_phase(), SubmitPhase::Idle);
  assert!(!page.document().node(submit).unwrap().is_disabled());
  assert!(!page.document().has_class(submit, "loading"));

  let banner = page.banner().expect("success banner");
  assert_eq!(banner.kind, BannerKind::Success);
  assert!(banner.text.contains("Jan"));

  for name in ["name", "email", "subject", "message"] {
    let node = field(page.document(), name);
    assert_eq!(page.document().node(node).unwrap().value(), "", "{name} cleared");
  }
}

#[test]
fn success_banner_expires_on_its_own() {
  let mut page = mounted();
  fill_valid(&mut page);
  page.dispatch(Event::Submit);
  page.advance(SUBMIT_LATENCY_MS);
  assert!(page.banner().is_some());

  page.advance(SUCCESS_BANNER_MS - 1);
  assert!(page.banner().is_some());
  page.advance(1);
  assert!(page.banner().is_none());
}

#[test]
fn invalid_submission_reports_every_error_in_order() {
  let mut page = mounted();
  type_into(&mut page, "email", "bad");
  type_into(&mut page, "message", "short");

  page.dispatch(Event::Submit);
  assert_eq!(page.submit_phase(), SubmitPhase::Idle);

  let banner = page.banner().expect("error banner");
  assert_eq!(banner.kind, BannerKind::Error);
  assert_eq!(banner.text.matches('\u{2022}').count(), 3);

  let name_at = banner.text.find(NAME_REQUIRED).expect("name error listed");
  let email_at = banner.text.find(EMAIL_INVALID).expect("email error listed");
  let message_at = banner
    .text
    .find(MESSAGE_TOO_SHORT)
    .expect("message error listed");
  assert!(name_at < email_at && email_at < message_at);

  // No loading, no reset: the user's values survive.
  let email = field(page.document(), "email");
  assert_eq!(page.document().node(email).unwrap().value(), "bad");
  assert!(!page.document().node(submit_button(&page)).unwrap().is_disabled());
}

#[test]
fn error_banner_persists_until_dismissed() {
  let mut page = mounted();
  page.dispatch(Event::Submit);
  assert!(page.banner().is_some());

  page.advance(60_000);
  assert!(page.banner().is_some(), "error banners never auto-dismiss");

  page.dismiss_banner();
  assert!(page.banner().is_none());
}

#[test]
fn success_replaces_a_standing_error_banner() {
  let mut page = mounted();
  page.dispatch(Event::Submit);
  assert_eq!(page.banner().unwrap().kind, BannerKind::Error);

  fill_valid(&mut page);
  page.dispatch(Event::Submit);
  // The old banner stays up while the submission is in flight.
  assert_eq!(page.banner().unwrap().kind, BannerKind::Error);

  page.advance(SUBMIT_LATENCY_MS);
  assert_eq!(page.banner().unwrap().kind, BannerKind::Success);
}

#[test]
fn repeat_submit_while_loading_is_ignored() {
  let mut page = mounted();
  fill_valid(&mut page);
  page.dispatch(Event::Submit);
  page.dispatch(Event::Submit);

  page.advance(SUBMIT_LATENCY_MS);
  assert_eq!(page.submit_phase(), SubmitPhase::Idle);
  assert_eq!(page.banner().unwrap().kind, BannerKind::Success);

  // Nothing else was queued: the far future brings only the banner expiry.
  page.advance(SUCCESS_BANNER_MS);
  assert!(page.banner().is_none());
  assert_eq!(page.submit_phase(), SubmitPhase::Idle);
}

#[test]
fn blur_shows_inline_error_and_typing_clears_it() {
  let mut page = mounted();
  let email = field(page.document(), "email");

  page.dispatch(Event::Focus { target: email });
  page.dispatch(Event::Input {
    target: email,
    value: "not-an-email".to_string(),
  });
  page.dispatch(Event::Blur { target: email });

  assert_eq!(page.field_error(FieldName::Email), Some(EMAIL_INVALID));
  assert!(page.document().has_class(email, "invalid"));

  // Any edit clears the message without revalidating until the next blur.
  page.dispatch(Event::Input {
    target: email,
    value: "still-wrong".to_string(),
  });
  assert_eq!(page.field_error(FieldName::Email), None);
  assert!(!page.document().has_class(email, "invalid"));

  page.dispatch(Event::Blur { target: email });
  assert_eq!(page.field_error(FieldName::Email), Some(EMAIL_INVALID));
}

#[test]
fn subject_never_gets_an_inline_error() {
  let mut page = mounted();
  let subject = field(page.document(), "subject");
  page.dispatch(Event::Focus { target: subject });
  page.dispatch(Event::Blur { target: subject });
  assert_eq!(page.field_error(FieldName::Subject), None);
  assert!(!page.document().has_class(subject, "invalid"));
}
