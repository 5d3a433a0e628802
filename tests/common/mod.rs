//! Shared page fixture for the integration tests.
//!
//! Builds the portfolio document the behavior layer expects: sticky
//! header with hamburger and nav links, four identified sections, reveal
//! targets, a deferred image, and the contact form.

use vitrine::dom::{Document, NodeId};
use vitrine::Rect;

pub const PAGE_WIDTH: f32 = 1280.0;

pub fn init_logs() {
  let _ = env_logger::builder().is_test(true).try_init();
}

/// Full page layout:
/// header 80px; home [0, 600); about [600, 1400); projects [1400, 2200);
/// contact [2200, 3000). A project card sits at [1500, 1800) and a
/// deferred image at [2400, 2800).
pub fn portfolio() -> Document {
  let mut doc = Document::new();
  let body = doc.create_element("body");

  let header = doc.append_child(body, "header");
  doc.set_id(header, "header");
  doc.set_rect(header, Rect::from_xywh(0.0, 0.0, PAGE_WIDTH, 80.0));

  let hamburger = doc.append_child(header, "button");
  doc.set_id(hamburger, "hamburger");
  // The visible bars are children; clicks land on them, not the button.
  doc.append_child(hamburger, "span");

  let panel = doc.append_child(header, "nav");
  doc.add_class(panel, "nav-menu");
  for target in ["#home", "#about", "#projects", "#contact"] {
    let link = doc.append_child(panel, "a");
    doc.add_class(link, "nav-link");
    doc.set_attribute(link, "href", target);
  }

  let mut section_at = |doc: &mut Document, id: &str, top: f32, height: f32| -> NodeId {
    let section = doc.append_child(body, "section");
    doc.set_id(section, id);
    doc.set_rect(section, Rect::from_xywh(0.0, top, PAGE_WIDTH, height));
    section
  };

  let home = section_at(&mut doc, "home", 0.0, 600.0);
  let cta = doc.append_child(home, "a");
  doc.add_class(cta, "hero-cta");
  doc.set_attribute(cta, "href", "#contact");

  let about = section_at(&mut doc, "about", 600.0, 800.0);
  let about_content = doc.append_child(about, "div");
  doc.add_class(about_content, "about-content");
  doc.set_rect(about_content, Rect::from_xywh(0.0, 700.0, PAGE_WIDTH, 400.0));

  let projects = section_at(&mut doc, "projects", 1400.0, 800.0);
  let card = doc.append_child(projects, "div");
  doc.add_class(card, "project-card");
  doc.set_rect(card, Rect::from_xywh(0.0, 1500.0, 400.0, 300.0));

  let contact = section_at(&mut doc, "contact", 2200.0, 800.0);
  let shot = doc.append_child(contact, "img");
  doc.set_attribute(shot, "data-src", "assets/portrait.webp");
  doc.set_rect(shot, Rect::from_xywh(0.0, 2400.0, 600.0, 400.0));
  let form = doc.append_child(contact, "form");
  doc.set_id(form, "contactForm");
  for name in ["name", "email", "subject"] {
    let field = doc.append_child(form, "input");
    doc.set_attribute(field, "name", name);
  }
  let message = doc.append_child(form, "textarea");
  doc.set_attribute(message, "name", "message");
  let submit = doc.append_child(form, "button");
  doc.set_attribute(submit, "type", "submit");

  doc
}

/// Node of the form field with the given `name` attribute.
#[allow(dead_code)]
pub fn field(doc: &Document, name: &str) -> NodeId {
  doc
    .elements_with_attribute("name")
    .into_iter()
    .find(|node| doc.node(*node).unwrap().get_attribute_ref("name") == Some(name))
    .unwrap_or_else(|| panic!("fixture has no field named {name}"))
}

/// The nav link whose href is `target`.
#[allow(dead_code)]
pub fn nav_link(doc: &Document, target: &str) -> NodeId {
  doc
    .elements_with_class("nav-link")
    .into_iter()
    .find(|node| doc.node(*node).unwrap().get_attribute_ref("href") == Some(target))
    .unwrap_or_else(|| panic!("fixture has no nav link for {target}"))
}
