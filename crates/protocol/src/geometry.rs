//! Device-pixel geometry.
//!
//! All coordinates are integers with a top-left origin. [`Rect`] uses the
//! `left/top/right/bottom` convention of the platform, with `right` and
//! `bottom` exclusive.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A point in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
	/// X coordinate
	pub x: i32,
	/// Y coordinate
	pub y: i32,
}

impl Point {
	pub const fn new(x: i32, y: i32) -> Self {
		Self { x, y }
	}
}

impl fmt::Display for Point {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({}, {})", self.x, self.y)
	}
}

/// Element bounds in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
	pub left: i32,
	pub top: i32,
	pub right: i32,
	pub bottom: i32,
}

impl Rect {
	pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
		Self {
			left,
			top,
			right,
			bottom,
		}
	}

	/// Creates a rect from an origin and a size.
	pub const fn from_origin(x: i32, y: i32, width: i32, height: i32) -> Self {
		Self::new(x, y, x.saturating_add(width), y.saturating_add(height))
	}

	/// Horizontal extent, saturating for bounds wider than `i32::MAX`.
	pub const fn width(&self) -> i32 {
		self.right.saturating_sub(self.left)
	}

	pub const fn height(&self) -> i32 {
		self.bottom.saturating_sub(self.top)
	}

	/// Returns `true` when the rect has no area.
	pub const fn is_empty(&self) -> bool {
		self.left >= self.right || self.top >= self.bottom
	}

	/// Center point, rounded towards the top-left like the platform's `centerX/centerY`.
	pub const fn center(&self) -> Point {
		Point::new(midpoint(self.left, self.right), midpoint(self.top, self.bottom))
	}

	/// Returns `true` if `point` lies inside the rect (right/bottom exclusive).
	pub const fn contains(&self, point: Point) -> bool {
		!self.is_empty()
			&& point.x >= self.left
			&& point.x < self.right
			&& point.y >= self.top
			&& point.y < self.bottom
	}

	/// Overlapping area of two rects, or [`None`] if they do not overlap.
	pub fn intersect(&self, other: &Rect) -> Option<Rect> {
		let rect = Rect::new(
			self.left.max(other.left),
			self.top.max(other.top),
			self.right.min(other.right),
			self.bottom.min(other.bottom),
		);
		(!rect.is_empty()).then_some(rect)
	}

	/// Canonical short form, `[left,top][right,bottom]`.
	pub fn to_short_string(&self) -> String {
		format!("[{},{}][{},{}]", self.left, self.top, self.right, self.bottom)
	}
}

/// Floor of the mean of `a` and `b`. Always fits in an `i32`.
const fn midpoint(a: i32, b: i32) -> i32 {
	((a as i64 + b as i64) >> 1) as i32
}

impl fmt::Display for Rect {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_short_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn center_rounds_down() {
		let rect = Rect::new(0, 0, 101, 51);
		assert_eq!(rect.center(), Point::new(50, 25));
	}

	#[test]
	fn center_of_huge_bounds_does_not_overflow() {
		let rect = Rect::new(2_000_000_000, 0, 2_100_000_000, 10);
		assert_eq!(rect.center(), Point::new(2_050_000_000, 5));
		assert_eq!(Rect::new(-3, -3, 0, 0).center(), Point::new(-2, -2));

		let wide = Rect::new(i32::MIN, 0, i32::MAX, 1);
		assert_eq!(wide.width(), i32::MAX);
		assert_eq!(wide.center(), Point::new(-1, 0));
	}

	#[test]
	fn short_string_matches_platform_format() {
		let rect = Rect::new(10, 20, 110, 220);
		assert_eq!(rect.to_short_string(), "[10,20][110,220]");
		assert_eq!(rect.to_string(), "[10,20][110,220]");
	}

	#[test]
	fn contains_excludes_far_edges() {
		let rect = Rect::from_origin(0, 0, 100, 100);
		assert!(rect.contains(Point::new(0, 0)));
		assert!(rect.contains(Point::new(99, 99)));
		assert!(!rect.contains(Point::new(100, 50)));
		assert!(!Rect::default().contains(Point::new(0, 0)));
	}

	#[test]
	fn intersect_clips_to_overlap() {
		let screen = Rect::new(0, 0, 1080, 1920);
		let partly_off = Rect::new(1000, 100, 1200, 300);
		assert_eq!(screen.intersect(&partly_off), Some(Rect::new(1000, 100, 1080, 300)));
		assert_eq!(screen.intersect(&Rect::new(2000, 0, 2100, 10)), None);
	}
}
