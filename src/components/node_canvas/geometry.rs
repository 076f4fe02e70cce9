use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A point in canvas (or node-local) coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

impl Add for Point {
	type Output = Point;

	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl Sub for Point {
	type Output = Point;

	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
	pub width: f64,
	pub height: f64,
}

impl Size {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	pub fn is_empty(&self) -> bool {
		self.width <= 0.0 || self.height <= 0.0
	}
}

/// Axis-aligned rectangle. `contains` is inclusive of the top-left edge and
/// exclusive of the bottom-right one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
	pub origin: Point,
	pub size: Size,
}

impl Rect {
	pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
		Self {
			origin: Point::new(x, y),
			size: Size::new(width, height),
		}
	}

	pub fn right(&self) -> f64 {
		self.origin.x + self.size.width
	}

	pub fn bottom(&self) -> f64 {
		self.origin.y + self.size.height
	}

	pub fn contains(&self, p: Point) -> bool {
		p.x >= self.origin.x && p.x < self.right() && p.y >= self.origin.y && p.y < self.bottom()
	}

	pub fn center(&self) -> Point {
		Point::new(
			self.origin.x + self.size.width / 2.0,
			self.origin.y + self.size.height / 2.0,
		)
	}

	/// Intersection with `other`, or `None` when they do not overlap.
	pub fn intersect(&self, other: &Rect) -> Option<Rect> {
		let (x0, y0) = (
			self.origin.x.max(other.origin.x),
			self.origin.y.max(other.origin.y),
		);
		let (x1, y1) = (self.right().min(other.right()), self.bottom().min(other.bottom()));
		(x1 > x0 && y1 > y0).then(|| Rect::new(x0, y0, x1 - x0, y1 - y0))
	}
}

/// Clamp a node origin so a box of `size` stays inside `bounds`.
///
/// When `bounds` is smaller than the box on an axis, that axis pins to 0.
pub fn clamp_origin(origin: Point, size: Size, bounds: Size) -> Point {
	Point::new(
		origin.x.min(bounds.width - size.width).max(0.0),
		origin.y.min(bounds.height - size.height).max(0.0),
	)
}
