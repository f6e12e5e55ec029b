//! Coordinate mappers from reported to device-absolute pixels.

use ua2_protocol::{Point, Rect};
use ua2_runtime::CoordinateMapper;

use crate::{Error, Result};

/// Passes points through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityCoordinates;

impl CoordinateMapper for IdentityCoordinates {
	fn to_device_absolute(&self, point: Point) -> Result<Point> {
		Ok(point)
	}
}

/// Scales logical points onto the display and rejects points that land outside it.
#[derive(Debug, Clone, Copy)]
pub struct ScaledCoordinates {
	display: Rect,
	scale_x: f64,
	scale_y: f64,
}

impl ScaledCoordinates {
	pub fn new(display: Rect, scale_x: f64, scale_y: f64) -> Self {
		Self {
			display,
			scale_x,
			scale_y,
		}
	}

	/// Same factor on both axes.
	pub fn uniform(display: Rect, scale: f64) -> Self {
		Self::new(display, scale, scale)
	}
}

impl CoordinateMapper for ScaledCoordinates {
	fn to_device_absolute(&self, point: Point) -> Result<Point> {
		let mapped = Point::new(
			(f64::from(point.x) * self.scale_x).round() as i32,
			(f64::from(point.y) * self.scale_y).round() as i32,
		);
		if !self.display.contains(mapped) {
			return Err(Error::InvalidCoordinates {
				x: point.x,
				y: point.y,
				reason: format!("maps to {mapped}, outside display {}", self.display),
			});
		}
		Ok(mapped)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const DISPLAY: Rect = Rect::new(0, 0, 1080, 1920);

	#[test]
	fn doubles_both_axes() {
		let mapper = ScaledCoordinates::uniform(DISPLAY, 2.0);
		assert_eq!(mapper.to_device_absolute(Point::new(100, 200)).unwrap(), Point::new(200, 400));
	}

	#[test]
	fn rounds_fractional_scale() {
		let mapper = ScaledCoordinates::new(DISPLAY, 1.5, 0.5);
		assert_eq!(mapper.to_device_absolute(Point::new(3, 5)).unwrap(), Point::new(5, 3));
	}

	#[test]
	fn rejects_points_off_display() {
		let mapper = ScaledCoordinates::uniform(DISPLAY, 2.0);
		let err = mapper.to_device_absolute(Point::new(600, 10)).unwrap_err();
		assert!(matches!(err, Error::InvalidCoordinates { x: 600, y: 10, .. }));
		assert!(mapper.to_device_absolute(Point::new(-1, 0)).is_err());
	}

	#[test]
	fn identity_is_a_no_op() {
		let point = Point::new(-5, 9000);
		assert_eq!(IdentityCoordinates.to_device_absolute(point).unwrap(), point);
	}
}
