//! Viewport-intersection observation: reveal animations and lazy images
//!
//! A small analogue of `IntersectionObserver` over the synthetic document.
//! Each watcher holds the set of still-observed elements; a sweep tests
//! them against the current viewport and hands back the ones that crossed
//! the threshold, removing them from observation. Both consumers are
//! one-shot: a revealed element stays revealed, a loaded image stays
//! loaded.
//!
//! The reveal watcher shrinks its root by [`REVEAL_BOTTOM_INSET_PX`] at
//! the bottom, so an element must clear the lower edge by a margin before
//! its animation starts.

use crate::dom::Document;
use crate::dom::NodeId;
use crate::geometry::Rect;

/// Fraction of an element that must be visible to count as intersecting
pub const REVEAL_THRESHOLD: f32 = 0.1;

/// Bottom inset applied to the reveal watcher's root
pub const REVEAL_BOTTOM_INSET_PX: f32 = 50.0;

/// Class added to an element on its first intersection
pub const REVEAL_CLASS: &str = "animate";

/// Content classes observed for reveal animations
pub const REVEAL_TARGET_CLASSES: [&str; 6] = [
  "section-title",
  "about-content",
  "skills-category",
  "project-card",
  "contact-form-container",
  "contact-info",
];

/// Attribute carrying an image's deferred source
pub const DEFERRED_SRC_ATTR: &str = "data-src";

/// The real source attribute the deferred value is promoted into
pub const SRC_ATTR: &str = "src";

/// Tracks a set of elements until each first intersects the viewport
#[derive(Debug, Clone)]
pub struct IntersectionWatcher {
  targets: Vec<NodeId>,
  threshold: f32,
  bottom_inset: f32,
}

impl IntersectionWatcher {
  /// Creates a watcher with the given threshold and bottom root inset
  ///
  /// A zero threshold counts any overlap as an intersection, matching the
  /// platform observer's default.
  pub fn new(threshold: f32, bottom_inset: f32) -> Self {
    Self {
      targets: Vec::new(),
      threshold,
      bottom_inset,
    }
  }

  /// Adds an element to the observed set
  pub fn observe(&mut self, node: NodeId) {
    if !self.targets.contains(&node) {
      self.targets.push(node);
    }
  }

  /// Elements still being observed
  pub fn observed(&self) -> &[NodeId] {
    &self.targets
  }

  /// Tests observed elements against the viewport
  ///
  /// Returns the elements that intersect, in observation order, and stops
  /// observing them (one-shot semantics).
  pub fn sweep(&mut self, doc: &Document, viewport: Rect) -> Vec<NodeId> {
    let root = Rect::from_xywh(
      viewport.x,
      viewport.y,
      viewport.width,
      (viewport.height - self.bottom_inset).max(0.0),
    );

    let mut hits = Vec::new();
    self.targets.retain(|node| {
      let Some(element) = doc.node(*node) else {
        return true;
      };
      let fraction = element.rect().covered_fraction(root);
      let hit = if self.threshold > 0.0 {
        fraction >= self.threshold
      } else {
        fraction > 0.0
      };
      if hit {
        hits.push(*node);
      }
      !hit
    });
    hits
  }
}

/// Adds the reveal class to content elements entering the viewport
#[derive(Debug, Clone)]
pub struct RevealController {
  watcher: IntersectionWatcher,
}

impl RevealController {
  /// Observes every element carrying one of the reveal target classes
  pub fn new(doc: &Document) -> Self {
    let mut watcher = IntersectionWatcher::new(REVEAL_THRESHOLD, REVEAL_BOTTOM_INSET_PX);
    for class in REVEAL_TARGET_CLASSES {
      for node in doc.elements_with_class(class) {
        watcher.observe(node);
      }
    }
    Self { watcher }
  }

  /// Number of elements still waiting to be revealed
  pub fn pending(&self) -> usize {
    self.watcher.observed().len()
  }

  /// Reveals elements that entered the viewport; returns the newly revealed
  pub fn sweep(&mut self, doc: &mut Document, viewport: Rect) -> Vec<NodeId> {
    let hits = self.watcher.sweep(doc, viewport);
    for node in &hits {
      doc.add_class(*node, REVEAL_CLASS);
    }
    hits
  }
}

/// Promotes deferred image sources when images scroll into view
#[derive(Debug, Clone)]
pub struct LazyImageController {
  watcher: IntersectionWatcher,
}

impl LazyImageController {
  /// Observes every `img` carrying a deferred-source attribute
  pub fn new(doc: &Document) -> Self {
    let mut watcher = IntersectionWatcher::new(0.0, 0.0);
    for node in doc.elements_with_attribute(DEFERRED_SRC_ATTR) {
      if doc.node(node).map(|element| element.tag()) == Some("img") {
        watcher.observe(node);
      }
    }
    Self { watcher }
  }

  /// Number of images still deferred
  pub fn pending(&self) -> usize {
    self.watcher.observed().len()
  }

  /// Loads images that entered the viewport; returns the newly loaded
  pub fn sweep(&mut self, doc: &mut Document, viewport: Rect) -> Vec<NodeId> {
    let hits = self.watcher.sweep(doc, viewport);
    for node in &hits {
      let deferred = doc
        .node(*node)
        .and_then(|element| element.get_attribute_ref(DEFERRED_SRC_ATTR))
        .map(|value| value.to_string());
      if let Some(src) = deferred {
        doc.set_attribute(*node, SRC_ATTR, &src);
        doc.remove_attribute(*node, DEFERRED_SRC_ATTR);
      }
    }
    hits
  }
}
