//! Mobile menu triggers and scroll locking through the public API.

mod common;

use common::{nav_link, portfolio};
use vitrine::api::{Environment, Vitrine};
use vitrine::dom::NodeId;
use vitrine::events::{Event, Key};
use vitrine::menu::MOBILE_BREAKPOINT_PX;

fn mounted() -> Vitrine {
  common::init_logs();
  Vitrine::mount(portfolio(), Environment::screen(390.0, 844.0))
    .expect("fixture satisfies the contract")
}

fn hamburger(page: &Vitrine) -> NodeId {
  page.document().by_id("hamburger").unwrap()
}

fn hamburger_bar(page: &Vitrine) -> NodeId {
  // The span inside the button; real clicks land here.
  page.document().node(hamburger(page)).unwrap().children()[0]
}

fn body(page: &Vitrine) -> NodeId {
  page.document().elements_with_tag("body")[0]
}

fn open_menu(page: &mut Vitrine) {
  page.dispatch(Event::Click {
    target: hamburger(page),
  });
  assert!(page.menu_state().open);
}

#[test]
fn trigger_click_toggles_and_locks_scroll() {
  let mut page = mounted();
  let body = body(&page);

  page.dispatch(Event::Click {
    target: hamburger(&page),
  });
  assert!(page.menu_state().open);
  assert!(page.document().has_class(body, "no-scroll"));
  assert!(page.document().has_class(hamburger(&page), "active"));

  page.dispatch(Event::Click {
    target: hamburger(&page),
  });
  assert!(!page.menu_state().open);
  assert!(!page.document().has_class(body, "no-scroll"));
}

#[test]
fn click_on_trigger_child_counts_as_trigger() {
  let mut page = mounted();
  let bar = hamburger_bar(&page);
  page.dispatch(Event::Click { target: bar });
  assert!(page.menu_state().open);
  page.dispatch(Event::Click { target: bar });
  assert!(!page.menu_state().open);
}

#[test]
fn nav_link_click_closes_the_menu() {
  let mut page = mounted();
  open_menu(&mut page);

  let link = nav_link(page.document(), "#about");
  page.dispatch(Event::Click { target: link });
  assert!(!page.menu_state().open);
  assert!(!page.document().has_class(body(&page), "no-scroll"));
  // The link still navigates.
  assert_eq!(page.scroll_requests().last().unwrap().top, 520.0);
}

#[test]
fn outside_click_closes_but_panel_click_does_not() {
  let mut page = mounted();
  open_menu(&mut page);

  let panel = page.document().elements_with_class("nav-menu")[0];
  page.dispatch(Event::Click { target: panel });
  assert!(page.menu_state().open, "clicks inside the panel keep it open");

  let section = page.document().by_id("about").unwrap();
  page.dispatch(Event::Click { target: section });
  assert!(!page.menu_state().open);
}

#[test]
fn escape_closes_the_menu() {
  let mut page = mounted();
  open_menu(&mut page);
  page.dispatch(Event::KeyDown { key: Key::Escape });
  assert!(!page.menu_state().open);

  // Escape with the menu already closed stays a no-op.
  page.dispatch(Event::KeyDown { key: Key::Escape });
  assert!(!page.menu_state().open);
}

#[test]
fn resize_past_breakpoint_closes_the_menu() {
  let mut page = mounted();
  open_menu(&mut page);

  page.dispatch(Event::Resize {
    width: MOBILE_BREAKPOINT_PX,
    height: 800.0,
  });
  assert!(page.menu_state().open, "exactly at the breakpoint stays mobile");

  page.dispatch(Event::Resize {
    width: 1280.0,
    height: 800.0,
  });
  assert!(!page.menu_state().open);
  assert!(!page.document().has_class(body(&page), "no-scroll"));
}
