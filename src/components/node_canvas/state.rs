use log::{debug, info};
use serde::Serialize;
use thiserror::Error;

use super::config::CanvasConfig;
use super::geometry::{Point, Size};
use super::graph::{ConnectionGraph, GestureOutcome};
use super::node::Node;
use super::overlay::{ConnectorLookup, LineSegment, Overlay, OverlayFrame};
use super::types::{Connection, Connector, Mode, NodeEvent, NodeId, Payload};

/// Callback notified after the canvas has handled a node event.
pub type Listener = Box<dyn FnMut(&NodeEvent)>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
	#[error("Node '{0}' not found on the canvas")]
	UnknownNode(NodeId),
}

#[derive(Clone, Debug, Serialize)]
pub struct NodeSnapshot {
	pub id: NodeId,
	pub label: String,
	pub title: String,
	pub mode: Mode,
	pub position: Point,
	pub size: Size,
	pub input_data: Payload,
	pub output_data: Payload,
	pub node_data: Payload,
}

impl From<&Node> for NodeSnapshot {
	fn from(node: &Node) -> Self {
		Self {
			id: node.id(),
			label: node.label().to_string(),
			title: node.title().to_string(),
			mode: node.mode(),
			position: node.position(),
			size: node.size(),
			input_data: node.input_data().clone(),
			output_data: node.output_data().clone(),
			node_data: node.node_data().clone(),
		}
	}
}

/// Full arrangement, for whoever persists it.
#[derive(Clone, Debug, Serialize)]
pub struct CanvasSnapshot {
	pub nodes: Vec<NodeSnapshot>,
	pub connections: Vec<Connection>,
}

impl ConnectorLookup for Vec<Node> {
	fn connector_point(&self, connector: Connector) -> Option<Point> {
		self.iter()
			.find(|n| n.id() == connector.node)
			.map(|n| n.connector_point(connector.side))
	}
}

/// Owner of every node on one canvas, the connection graph and the overlay.
///
/// Pointer input is routed through here: the topmost node under the pointer
/// gets the press, and whatever events it emits are dispatched back into the
/// graph and overlay before listeners hear about them. Nodes are kept in
/// paint order, last on top.
pub struct CanvasState {
	config: CanvasConfig,
	nodes: Vec<Node>,
	graph: ConnectionGraph,
	overlay: Overlay,
	mode: Mode,
	size: Size,
	dragging: Option<NodeId>,
	listeners: Vec<Listener>,
}

impl ConnectorLookup for CanvasState {
	fn connector_point(&self, connector: Connector) -> Option<Point> {
		self.nodes.connector_point(connector)
	}
}

impl CanvasState {
	pub fn new(config: CanvasConfig, size: Size) -> Self {
		let mut overlay = Overlay::new();
		overlay.sync_bounds(size);
		Self {
			config,
			nodes: Vec::new(),
			graph: ConnectionGraph::new(),
			overlay,
			mode: Mode::default(),
			size,
			dragging: None,
			listeners: Vec::new(),
		}
	}

	pub fn config(&self) -> &CanvasConfig {
		&self.config
	}

	pub fn size(&self) -> Size {
		self.size
	}

	pub fn mode(&self) -> Mode {
		self.mode
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id() == id)
	}

	pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
		self.nodes.iter_mut().find(|n| n.id() == id)
	}

	pub fn graph(&self) -> &ConnectionGraph {
		&self.graph
	}

	pub fn connections(&self) -> &[Connection] {
		self.graph.connections()
	}

	pub fn pending(&self) -> Option<Connector> {
		self.graph.pending()
	}

	pub fn overlay(&self) -> &Overlay {
		&self.overlay
	}

	pub fn subscribe(&mut self, listener: impl FnMut(&NodeEvent) + 'static) {
		self.listeners.push(Box::new(listener));
	}

	// ---- lifecycle ----

	/// Adds a node at the configured spawn position, on top of the others,
	/// in the current global mode.
	pub fn create_node(&mut self, label: impl Into<String>) -> NodeId {
		let mut node = Node::new(label, &self.config);
		node.set_mode(self.mode);
		if self.size.is_empty() {
			node.move_to(self.config.spawn_position, Size::new(f64::MAX, f64::MAX));
		} else {
			node.move_to(self.config.spawn_position, self.size);
		}
		let id = node.id();
		info!("Created node {} ({})", id, node.label());
		self.nodes.push(node);
		id
	}

	/// Creates a node labelled after the current node count.
	pub fn create_next_node(&mut self) -> NodeId {
		let label = format!("{} {}", self.config.label_prefix, self.nodes.len() + 1);
		self.create_node(label)
	}

	/// Removes a node. Its edges and any pending gesture it started are
	/// dropped before the node itself is released. Unknown ids are a no-op.
	pub fn delete_node(&mut self, id: NodeId) -> Option<Node> {
		let dropped = self.graph.remove_connections_for_node(id);
		if self.dragging == Some(id) {
			self.dragging = None;
		}
		let index = self.nodes.iter().position(|n| n.id() == id)?;
		let node = self.nodes.remove(index);
		self.overlay.invalidate();
		info!("Deleted node {} and {} connection(s)", id, dropped);
		Some(node)
	}

	pub fn set_global_mode(&mut self, mode: Mode) {
		self.mode = mode;
		for node in &mut self.nodes {
			node.set_mode(mode);
		}
		debug!("Global mode set to {mode}");
	}

	/// Textual variant of [`CanvasState::set_global_mode`]; unknown values are
	/// ignored.
	pub fn set_global_mode_value(&mut self, value: &str) -> bool {
		match value.parse::<Mode>() {
			Ok(mode) => {
				self.set_global_mode(mode);
				true
			}
			Err(err) => {
				debug!("Ignoring global mode change: {err}");
				false
			}
		}
	}

	/// Moves a node programmatically, clamped to the canvas.
	pub fn place_node(&mut self, id: NodeId, origin: Point) -> Result<Point, CanvasError> {
		let size = self.size;
		let node = self.node_mut(id).ok_or(CanvasError::UnknownNode(id))?;
		let landed = node.move_to(origin, size);
		self.overlay.invalidate();
		Ok(landed)
	}

	/// Canvas resized or first shown. Nodes are pulled back inside the new
	/// bounds.
	pub fn resize(&mut self, size: Size) {
		self.size = size;
		if self.overlay.sync_bounds(size) {
			for node in &mut self.nodes {
				node.move_to(node.position(), size);
			}
			debug!("Canvas resized to {}x{}", size.width, size.height);
		}
	}

	// ---- node event handling ----

	pub fn on_connector_activated(&mut self, connector: Connector) -> GestureOutcome {
		let outcome = self.graph.activate(connector);
		if let GestureOutcome::Connected(_) = outcome {
			self.overlay.sync_bounds(self.size);
		}
		self.overlay.invalidate();
		outcome
	}

	pub fn on_node_moved(&mut self) {
		self.overlay.invalidate();
	}

	pub fn remove_connection(&mut self, connection: &Connection) -> bool {
		let removed = self.graph.remove_connection(connection);
		if removed {
			self.overlay.invalidate();
		}
		removed
	}

	/// Routes a node event into the graph and overlay, then tells listeners.
	pub fn dispatch(&mut self, event: NodeEvent) {
		match &event {
			NodeEvent::Deleted(id) => {
				self.delete_node(*id);
			}
			NodeEvent::ConnectorActivated(connector) => {
				self.on_connector_activated(*connector);
			}
			NodeEvent::Moved(_) => self.on_node_moved(),
		}
		for listener in &mut self.listeners {
			listener(&event);
		}
	}

	// ---- pointer routing ----

	/// Topmost node containing `point`.
	pub fn node_at(&self, point: Point) -> Option<NodeId> {
		self.nodes.iter().rev().find(|n| n.contains(point)).map(Node::id)
	}

	/// Press at a canvas point. Returns the event the press produced, after
	/// it has been dispatched.
	pub fn pointer_down(&mut self, point: Point) -> Option<NodeEvent> {
		let id = self.node_at(point)?;
		let node = self.node_mut(id)?;
		let event = node.pointer_down(point - node.position());
		if node.is_dragging() {
			self.dragging = Some(id);
		}
		if let Some(event) = &event {
			self.dispatch(event.clone());
		}
		event
	}

	/// Pointer moved to a canvas point. Returns whether a node moved.
	pub fn pointer_move(&mut self, point: Point) -> bool {
		let Some(id) = self.dragging else {
			return false;
		};
		let size = self.size;
		let Some(event) = self.node_mut(id).and_then(|n| n.pointer_move(point, size)) else {
			return false;
		};
		self.dispatch(event);
		true
	}

	pub fn pointer_up(&mut self) {
		if let Some(id) = self.dragging.take() {
			if let Some(node) = self.node_mut(id) {
				node.pointer_up();
			}
		}
	}

	// ---- overlay ----

	pub fn overlay_segments(&self) -> Vec<LineSegment> {
		self.overlay.segments(&self.graph, self)
	}

	/// Next overlay frame, or `None` when nothing changed since the last one.
	pub fn take_overlay_frame(&mut self) -> Option<OverlayFrame> {
		self.overlay.take_frame(&self.graph, &self.nodes)
	}

	pub fn snapshot(&self) -> CanvasSnapshot {
		CanvasSnapshot {
			nodes: self.nodes.iter().map(NodeSnapshot::from).collect(),
			connections: self.graph.connections().to_vec(),
		}
	}
}
