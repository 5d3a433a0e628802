//! Core geometry types for scroll and viewport math
//!
//! This module provides the geometric primitives the behavior controllers
//! work with. All units are CSS pixels with the origin at the top-left
//! corner of the document:
//! - Positive X extends to the right
//! - Positive Y extends downward
//!
//! Element positions are absolute document coordinates (the equivalent of
//! `offsetTop` measured from the page origin), not viewport coordinates.
//! The viewport itself is modeled as a rect whose Y origin is the current
//! scroll offset.

use serde::Deserialize;
use serde::Serialize;

/// A 2D point in CSS pixel space
///
/// # Examples
///
/// ```
/// use vitrine::Point;
///
/// let p = Point::new(10.0, 20.0);
/// assert_eq!(p.x, 10.0);
/// assert_eq!(Point::ZERO, Point::new(0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
  /// X coordinate (horizontal position, increases to the right)
  pub x: f32,
  /// Y coordinate (vertical position, increases downward)
  pub y: f32,
}

impl Point {
  /// The zero point at the origin (0, 0)
  pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

  /// Creates a new point at the given coordinates
  pub const fn new(x: f32, y: f32) -> Self {
    Self { x, y }
  }
}

/// A 2D size in CSS pixels
///
/// # Examples
///
/// ```
/// use vitrine::Size;
///
/// let viewport = Size::new(1280.0, 800.0);
/// assert!(!viewport.is_empty());
/// assert!(Size::ZERO.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
  /// Width in CSS pixels
  pub width: f32,
  /// Height in CSS pixels
  pub height: f32,
}

impl Size {
  /// The zero size
  pub const ZERO: Self = Self {
    width: 0.0,
    height: 0.0,
  };

  /// Creates a new size
  pub const fn new(width: f32, height: f32) -> Self {
    Self { width, height }
  }

  /// Returns true if either dimension is zero or negative
  pub fn is_empty(&self) -> bool {
    self.width <= 0.0 || self.height <= 0.0
  }
}

/// An axis-aligned rectangle in CSS pixel space
///
/// Used both for element layout boxes (absolute document coordinates) and
/// for the viewport (whose `y` is the scroll offset).
///
/// # Examples
///
/// ```
/// use vitrine::Rect;
///
/// let rect = Rect::from_xywh(0.0, 100.0, 800.0, 400.0);
/// assert_eq!(rect.top(), 100.0);
/// assert_eq!(rect.bottom(), 500.0);
/// assert!(rect.contains_y(250.0));
/// assert!(!rect.contains_y(500.0)); // bottom edge is exclusive
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
  /// X coordinate of the left edge
  pub x: f32,
  /// Y coordinate of the top edge
  pub y: f32,
  /// Width in CSS pixels
  pub width: f32,
  /// Height in CSS pixels
  pub height: f32,
}

impl Rect {
  /// The zero rect at the origin
  pub const ZERO: Self = Self {
    x: 0.0,
    y: 0.0,
    width: 0.0,
    height: 0.0,
  };

  /// Creates a rect from position and dimensions
  pub const fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
    Self {
      x,
      y,
      width,
      height,
    }
  }

  /// Y coordinate of the top edge
  pub fn top(&self) -> f32 {
    self.y
  }

  /// Y coordinate of the bottom edge
  pub fn bottom(&self) -> f32 {
    self.y + self.height
  }

  /// X coordinate of the left edge
  pub fn left(&self) -> f32 {
    self.x
  }

  /// X coordinate of the right edge
  pub fn right(&self) -> f32 {
    self.x + self.width
  }

  /// Area of the rect, clamped to zero for degenerate rects
  pub fn area(&self) -> f32 {
    if self.width <= 0.0 || self.height <= 0.0 {
      0.0
    } else {
      self.width * self.height
    }
  }

  /// Returns true when `y` falls within `[top, bottom)`
  ///
  /// The half-open interval matches how section geometry is probed: a probe
  /// sitting exactly on a section's bottom edge belongs to the next section.
  pub fn contains_y(&self, y: f32) -> bool {
    y >= self.top() && y < self.bottom()
  }

  /// Computes the intersection with another rect
  ///
  /// Returns `None` when the rects do not overlap. Rects that merely share
  /// an edge produce a degenerate (zero-area) intersection and also return
  /// `None`.
  ///
  /// # Examples
  ///
  /// ```
  /// use vitrine::Rect;
  ///
  /// let a = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
  /// let b = Rect::from_xywh(5.0, 5.0, 10.0, 10.0);
  /// assert_eq!(a.intersection(b), Some(Rect::from_xywh(5.0, 5.0, 5.0, 5.0)));
  ///
  /// let far = Rect::from_xywh(20.0, 20.0, 10.0, 10.0);
  /// assert_eq!(a.intersection(far), None);
  /// ```
  pub fn intersection(&self, other: Rect) -> Option<Rect> {
    let left = self.left().max(other.left());
    let top = self.top().max(other.top());
    let right = self.right().min(other.right());
    let bottom = self.bottom().min(other.bottom());

    if left < right && top < bottom {
      Some(Rect::from_xywh(left, top, right - left, bottom - top))
    } else {
      None
    }
  }

  /// Fraction of this rect's area covered by `other`, in `[0, 1]`
  ///
  /// A zero-area rect is never covered. This is the ratio the intersection
  /// observers compare against their threshold.
  pub fn covered_fraction(&self, other: Rect) -> f32 {
    let area = self.area();
    if area <= 0.0 {
      return 0.0;
    }
    match self.intersection(other) {
      Some(overlap) => (overlap.area() / area).clamp(0.0, 1.0),
      None => 0.0,
    }
  }
}
