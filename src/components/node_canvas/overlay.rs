use log::warn;

use super::geometry::{Point, Size};
use super::graph::ConnectionGraph;
use super::types::{Connection, Connector};

/// Resolves connector locations from live node geometry.
pub trait ConnectorLookup {
	/// Current canvas-space location of `connector`, or `None` when its node
	/// no longer exists.
	fn connector_point(&self, connector: Connector) -> Option<Point>;
}

/// One straight connection line, ready to paint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSegment {
	pub connection: Connection,
	pub from: Point,
	pub to: Point,
}

/// Everything the painter needs for one repaint.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverlayFrame {
	pub size: Size,
	pub segments: Vec<LineSegment>,
	/// Location of the armed first endpoint, if a gesture is in progress.
	pub pending: Option<Point>,
}

/// Paint surface for connection lines.
///
/// Keeps no position cache: every frame is recomputed from the graph and the
/// current node geometry. Tracks only its own bounds and whether anything
/// changed since the last frame was taken.
#[derive(Clone, Debug)]
pub struct Overlay {
	size: Size,
	dirty: bool,
}

impl Default for Overlay {
	fn default() -> Self {
		Self {
			size: Size::default(),
			dirty: true,
		}
	}
}

impl Overlay {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn size(&self) -> Size {
		self.size
	}

	/// The overlay never takes pointer input; hits fall through to whatever
	/// lies beneath or above it.
	pub fn intercepts_pointer(&self) -> bool {
		false
	}

	/// Matches the overlay to the canvas bounds. Returns whether they changed.
	pub fn sync_bounds(&mut self, canvas: Size) -> bool {
		if self.size == canvas {
			return false;
		}
		self.size = canvas;
		self.dirty = true;
		true
	}

	pub fn invalidate(&mut self) {
		self.dirty = true;
	}

	pub fn needs_repaint(&self) -> bool {
		self.dirty
	}

	/// Line segments for every edge whose endpoints both still resolve.
	pub fn segments(&self, graph: &ConnectionGraph, lookup: &impl ConnectorLookup) -> Vec<LineSegment> {
		graph
			.connections()
			.iter()
			.filter_map(|&connection| {
				let from = lookup.connector_point(connection.source);
				let to = lookup.connector_point(connection.target);
				match (from, to) {
					(Some(from), Some(to)) => Some(LineSegment {
						connection,
						from,
						to,
					}),
					_ => {
						warn!(
							"Skipping connection {} -> {}: endpoint node is gone",
							connection.source.node, connection.target.node
						);
						None
					}
				}
			})
			.collect()
	}

	pub fn frame(&self, graph: &ConnectionGraph, lookup: &impl ConnectorLookup) -> OverlayFrame {
		OverlayFrame {
			size: self.size,
			segments: self.segments(graph, lookup),
			pending: graph.pending().and_then(|c| lookup.connector_point(c)),
		}
	}

	/// A fresh frame if something changed since the last one, else `None`.
	pub fn take_frame(
		&mut self,
		graph: &ConnectionGraph,
		lookup: &impl ConnectorLookup,
	) -> Option<OverlayFrame> {
		if !self.dirty {
			return None;
		}
		self.dirty = false;
		Some(self.frame(graph, lookup))
	}
}
