use log::{debug, info};

use super::config::CanvasConfig;
use super::drag::DragState;
use super::geometry::{Point, Rect, Size, clamp_origin};
use super::types::{Connector, Mode, NodeEvent, NodeId, Payload, Side};

/// What a pointer press inside a node lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressTarget {
	Close,
	Connector(Side),
	/// Anywhere else; starts a drag.
	Body,
}

/// Affordance rectangles in node-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeLayout {
	pub close: Rect,
	pub left: Rect,
	pub right: Rect,
}

impl NodeLayout {
	pub fn new(size: Size, config: &CanvasConfig) -> Self {
		let body = Rect::new(0.0, 0.0, size.width, size.height);
		let r = config.connector_radius;
		let knob = |cx: f64| {
			let square = Rect::new(cx - r, size.height / 2.0 - r, 2.0 * r, 2.0 * r);
			body.intersect(&square).unwrap_or(square)
		};
		Self {
			close: Rect::new(
				size.width - config.close_size - config.close_margin,
				config.close_margin,
				config.close_size,
				config.close_size,
			),
			left: knob(0.0),
			right: knob(size.width),
		}
	}

	pub fn connector(&self, side: Side) -> Rect {
		match side {
			Side::Left => self.left,
			Side::Right => self.right,
		}
	}
}

/// A draggable information widget.
///
/// The node owns its geometry and drag capture, its two text buffers and the
/// opaque payloads. It knows nothing about the canvas it lives on: presses on
/// its affordances come back as [`NodeEvent`]s for the owner to act on.
#[derive(Clone, Debug)]
pub struct Node {
	id: NodeId,
	label: String,
	title: String,
	draft: String,
	mode: Mode,
	frame: Rect,
	layout: NodeLayout,
	drag: DragState,
	input_data: Payload,
	output_data: Payload,
	node_data: Payload,
}

impl Node {
	pub fn new(label: impl Into<String>, config: &CanvasConfig) -> Self {
		let size = config.node_size;
		Self {
			id: NodeId::new(),
			label: label.into(),
			title: config.default_title.clone(),
			draft: config.default_title.clone(),
			mode: Mode::Display,
			frame: Rect {
				origin: Point::default(),
				size,
			},
			layout: NodeLayout::new(size, config),
			drag: DragState::default(),
			input_data: Payload::new(),
			output_data: Payload::new(),
			node_data: Payload::new(),
		}
	}

	pub fn id(&self) -> NodeId {
		self.id
	}

	/// Text on the node's button.
	pub fn label(&self) -> &str {
		&self.label
	}

	/// Title shown by the display sub-view.
	pub fn title(&self) -> &str {
		&self.title
	}

	/// Contents of the edit field.
	pub fn draft(&self) -> &str {
		&self.draft
	}

	pub fn mode(&self) -> Mode {
		self.mode
	}

	pub fn position(&self) -> Point {
		self.frame.origin
	}

	pub fn size(&self) -> Size {
		self.frame.size
	}

	pub fn frame(&self) -> Rect {
		self.frame
	}

	pub fn layout(&self) -> &NodeLayout {
		&self.layout
	}

	pub fn is_dragging(&self) -> bool {
		self.drag.is_active()
	}

	/// Moves the origin to `origin`, clamped to `parent`. Returns where it
	/// actually landed.
	pub fn move_to(&mut self, origin: Point, parent: Size) -> Point {
		self.frame.origin = clamp_origin(origin, self.frame.size, parent);
		self.frame.origin
	}

	// ---- mode ----

	pub fn set_mode(&mut self, mode: Mode) {
		self.mode = mode;
		if mode == Mode::Editable {
			self.draft = self.title.clone();
		}
	}

	/// Textual variant of [`Node::set_mode`]; unknown values are ignored.
	pub fn apply_mode_value(&mut self, value: &str) -> bool {
		match value.parse::<Mode>() {
			Ok(mode) => {
				self.set_mode(mode);
				true
			}
			Err(err) => {
				debug!("{}: ignoring mode change: {err}", self.id);
				false
			}
		}
	}

	// ---- text ----

	pub fn set_text(&mut self, text: impl Into<String>) {
		let text = text.into();
		self.draft = text.clone();
		self.label = text;
	}

	pub fn set_title(&mut self, title: impl Into<String>) {
		self.title = title.into();
	}

	pub fn edit_draft(&mut self, text: impl Into<String>) {
		self.draft = text.into();
	}

	/// Finishes an edit: the draft becomes the title. The button label is
	/// left alone.
	pub fn commit_draft(&mut self) {
		self.title = self.draft.clone();
	}

	/// Label button click.
	pub fn announce(&self) -> &str {
		info!("Node {} button clicked, current text: {}", self.id, self.label);
		&self.label
	}

	// ---- payloads ----

	pub fn set_input_data(&mut self, data: Payload) {
		self.input_data = data;
	}

	pub fn input_data(&self) -> &Payload {
		&self.input_data
	}

	pub fn set_output_data(&mut self, data: Payload) {
		self.output_data = data;
	}

	pub fn output_data(&self) -> &Payload {
		&self.output_data
	}

	pub fn set_node_data(&mut self, data: Payload) {
		self.node_data = data;
	}

	pub fn node_data(&self) -> &Payload {
		&self.node_data
	}

	// ---- geometry queries ----

	/// Midpoint of the given side, in parent coordinates.
	pub fn connector_point(&self, side: Side) -> Point {
		let y = self.frame.origin.y + self.frame.size.height / 2.0;
		match side {
			Side::Left => Point::new(self.frame.origin.x, y),
			Side::Right => Point::new(self.frame.right(), y),
		}
	}

	pub fn contains(&self, p: Point) -> bool {
		self.frame.contains(p)
	}

	pub fn hit_test(&self, local: Point) -> PressTarget {
		if self.layout.close.contains(local) {
			return PressTarget::Close;
		}
		Side::ALL
			.into_iter()
			.find(|side| self.layout.connector(*side).contains(local))
			.map_or(PressTarget::Body, PressTarget::Connector)
	}

	// ---- pointer ----

	/// Press at a node-local point. Affordances produce an event and never
	/// start a drag.
	pub fn pointer_down(&mut self, local: Point) -> Option<NodeEvent> {
		match self.hit_test(local) {
			PressTarget::Close => Some(NodeEvent::Deleted(self.id)),
			PressTarget::Connector(side) => {
				Some(NodeEvent::ConnectorActivated(Connector::new(self.id, side)))
			}
			PressTarget::Body => {
				debug!("{}: drag start at {:?}", self.id, local);
				self.drag.begin(local);
				None
			}
		}
	}

	/// Pointer at `pointer` in parent coordinates. Emits `Moved` on every tick
	/// while captured, even when clamping leaves the origin unchanged.
	pub fn pointer_move(&mut self, pointer: Point, parent: Size) -> Option<NodeEvent> {
		let target = self.drag.target(pointer, self.frame.size, parent)?;
		self.frame.origin = target;
		Some(NodeEvent::Moved(self.id))
	}

	pub fn pointer_up(&mut self) -> bool {
		let was_dragging = self.drag.end();
		if was_dragging {
			debug!("{}: drag end at {:?}", self.id, self.frame.origin);
		}
		was_dragging
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	const PARENT: Size = Size::new(900.0, 600.0);

	fn node() -> Node {
		Node::new("Info widget 1", &CanvasConfig::default())
	}

	#[test]
	fn connector_points_sit_on_side_midpoints() {
		let mut n = node();
		n.move_to(Point::new(50.0, 50.0), PARENT);
		assert_eq!(n.connector_point(Side::Left), Point::new(50.0, 125.0));
		assert_eq!(n.connector_point(Side::Right), Point::new(270.0, 125.0));
	}

	#[test]
	fn connector_points_differ_by_width() {
		let mut n = node();
		for origin in [Point::new(0.0, 0.0), Point::new(133.5, 17.25), Point::new(680.0, 450.0)] {
			n.move_to(origin, PARENT);
			let (l, r) = (n.connector_point(Side::Left), n.connector_point(Side::Right));
			assert_eq!(r.x - l.x, n.size().width);
			assert_eq!(r.y, l.y);
		}
	}

	#[test]
	fn hit_test_finds_affordances() {
		let n = node();
		assert_eq!(n.hit_test(Point::new(208.0, 10.0)), PressTarget::Close);
		assert_eq!(n.hit_test(Point::new(2.0, 75.0)), PressTarget::Connector(Side::Left));
		assert_eq!(n.hit_test(Point::new(218.0, 75.0)), PressTarget::Connector(Side::Right));
		assert_eq!(n.hit_test(Point::new(110.0, 75.0)), PressTarget::Body);
	}

	#[test]
	fn press_on_close_requests_deletion_without_drag() {
		let mut n = node();
		let id = n.id();
		assert_eq!(n.pointer_down(Point::new(208.0, 10.0)), Some(NodeEvent::Deleted(id)));
		assert!(!n.is_dragging());
		assert_eq!(n.pointer_move(Point::new(400.0, 400.0), PARENT), None);
	}

	#[test]
	fn press_on_connector_emits_activation_without_drag() {
		let mut n = node();
		let event = n.pointer_down(Point::new(219.0, 75.0));
		assert_eq!(
			event,
			Some(NodeEvent::ConnectorActivated(Connector::new(n.id(), Side::Right)))
		);
		assert!(!n.is_dragging());
	}

	#[test]
	fn drag_moves_and_emits_on_every_tick() {
		let mut n = node();
		n.move_to(Point::new(50.0, 50.0), PARENT);
		assert_eq!(n.pointer_down(Point::new(100.0, 60.0)), None);
		assert_eq!(n.pointer_move(Point::new(400.0, 110.0), PARENT), Some(NodeEvent::Moved(n.id())));
		assert_eq!(n.position(), Point::new(300.0, 50.0));
		// pinned against the corner, still reported
		assert!(n.pointer_move(Point::new(-100.0, -100.0), PARENT).is_some());
		assert!(n.pointer_move(Point::new(-120.0, -100.0), PARENT).is_some());
		assert_eq!(n.position(), Point::new(0.0, 0.0));
		assert!(n.pointer_up());
		assert_eq!(n.pointer_move(Point::new(400.0, 400.0), PARENT), None);
	}

	#[test]
	fn editable_mode_seeds_draft_from_title() {
		let mut n = node();
		n.set_title("Planner");
		n.edit_draft("scratch");
		n.set_mode(Mode::Editable);
		assert_eq!(n.draft(), "Planner");
		assert_eq!(n.mode(), Mode::Editable);
	}

	#[test]
	fn committing_draft_updates_title_but_not_label() {
		let mut n = node();
		n.set_mode(Mode::Editable);
		n.edit_draft("Fetch data");
		n.commit_draft();
		assert_eq!(n.title(), "Fetch data");
		assert_eq!(n.label(), "Info widget 1");
	}

	#[test]
	fn invalid_mode_value_is_ignored() {
		let mut n = node();
		n.set_mode(Mode::Editable);
		assert!(!n.apply_mode_value("sideways"));
		assert_eq!(n.mode(), Mode::Editable);
		assert!(n.apply_mode_value("button"));
		assert_eq!(n.mode(), Mode::Display);
	}

	#[test]
	fn payloads_are_last_write_wins() {
		let mut n = node();
		let first = json!({ "a": 1, "b": 2 }).as_object().cloned().unwrap_or_default();
		let second = json!({ "c": 3 }).as_object().cloned().unwrap_or_default();
		n.set_output_data(first);
		n.set_output_data(second.clone());
		assert_eq!(n.output_data(), &second);
		assert!(n.input_data().is_empty());
		assert!(n.node_data().is_empty());
	}
}
