use super::geometry::{Point, Size, clamp_origin};

/// Pointer capture for a single node.
///
/// Holds the offset from the node origin to the grab point while a drag is
/// active. Moves are applied immediately, with no threshold.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	grab_offset: Option<Point>,
}

impl DragState {
	pub fn begin(&mut self, local: Point) {
		self.grab_offset = Some(local);
	}

	pub fn is_active(&self) -> bool {
		self.grab_offset.is_some()
	}

	/// Origin the node should move to for a pointer at `pointer` (parent
	/// coordinates), clamped to `parent`. `None` when not captured.
	pub fn target(&self, pointer: Point, node_size: Size, parent: Size) -> Option<Point> {
		let offset = self.grab_offset?;
		Some(clamp_origin(pointer - offset, node_size, parent))
	}

	/// Ends capture; returns whether a drag was in progress.
	pub fn end(&mut self) -> bool {
		self.grab_offset.take().is_some()
	}
}
