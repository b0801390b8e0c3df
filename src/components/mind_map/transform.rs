use kurbo::{Affine, Point, Vec2};

pub const MIN_SCALE: f64 = 0.5;
pub const MAX_SCALE: f64 = 2.0;
/// Scale change per unit of wheel `deltaY`.
pub const ZOOM_SENSITIVITY: f64 = -0.001;

/// Pan offset (screen pixels) and uniform scale applied to world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub offset: Vec2,
	pub scale: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			offset: Vec2::ZERO,
			scale: 1.0,
		}
	}
}

impl ViewTransform {
	/// World-to-screen mapping: scale about the origin, then pan.
	pub fn affine(&self) -> Affine {
		Affine::translate(self.offset) * Affine::scale(self.scale)
	}

	#[cfg(test)]
	pub fn world_to_screen(&self, world: Point) -> Point {
		self.affine() * world
	}

	pub fn screen_to_world(&self, screen: Point) -> Point {
		((screen - self.offset).to_vec2() / self.scale).to_point()
	}

	/// Applies a wheel step. The offset is left alone, so zoom pivots on the
	/// world origin rather than the cursor.
	pub fn zoom_by_wheel(&mut self, delta_y: f64) {
		self.scale = (self.scale + delta_y * ZOOM_SENSITIVITY).clamp(MIN_SCALE, MAX_SCALE);
	}
}
