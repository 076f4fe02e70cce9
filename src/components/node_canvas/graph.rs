use log::{debug, info};

use super::types::{Connection, Connector, NodeId};

/// Result of feeding one connector activation into the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureOutcome {
	/// First click recorded; waiting for the second.
	Armed(Connector),
	/// Second click landed on the same node; the gesture was dropped.
	Cancelled(Connector),
	Connected(Connection),
}

/// The edge set plus the pending first endpoint of the two-click gesture.
///
/// Edges hold [`NodeId`] handles only. Whoever removes a node must call
/// [`ConnectionGraph::remove_connections_for_node`] first.
#[derive(Clone, Debug, Default)]
pub struct ConnectionGraph {
	edges: Vec<Connection>,
	pending: Option<Connector>,
}

impl ConnectionGraph {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn connections(&self) -> &[Connection] {
		&self.edges
	}

	pub fn len(&self) -> usize {
		self.edges.len()
	}

	pub fn is_empty(&self) -> bool {
		self.edges.is_empty()
	}

	pub fn pending(&self) -> Option<Connector> {
		self.pending
	}

	pub fn connections_for_node(&self, node: NodeId) -> impl Iterator<Item = &Connection> {
		self.edges.iter().filter(move |c| c.involves(node))
	}

	/// Advances the connection gesture with a click on `connector`.
	pub fn activate(&mut self, connector: Connector) -> GestureOutcome {
		let Some(first) = self.pending.take() else {
			debug!("Connection armed at {}:{}", connector.node, connector.side);
			self.pending = Some(connector);
			return GestureOutcome::Armed(connector);
		};
		match Connection::new(first, connector) {
			Some(edge) => {
				info!(
					"Connected {}:{} -> {}:{}",
					first.node, first.side, connector.node, connector.side
				);
				self.edges.push(edge);
				GestureOutcome::Connected(edge)
			}
			None => {
				debug!("Connection cancelled on {}", first.node);
				GestureOutcome::Cancelled(first)
			}
		}
	}

	pub fn cancel_pending(&mut self) -> Option<Connector> {
		self.pending.take()
	}

	/// Drops the pending endpoint if it belongs to `node`, then every edge
	/// touching `node`. Returns the number of edges removed.
	pub fn remove_connections_for_node(&mut self, node: NodeId) -> usize {
		if self.pending.is_some_and(|p| p.node == node) {
			self.pending = None;
		}
		let before = self.edges.len();
		self.edges.retain(|c| !c.involves(node));
		before - self.edges.len()
	}

	/// Removes the first edge equal to `connection`.
	pub fn remove_connection(&mut self, connection: &Connection) -> bool {
		match self.edges.iter().position(|c| c == connection) {
			Some(index) => {
				self.edges.remove(index);
				true
			}
			None => false,
		}
	}

	/// Replaces the whole edge set. Self-loops are dropped and the pending
	/// gesture is reset.
	pub fn set_connections(&mut self, connections: impl IntoIterator<Item = Connection>) {
		self.pending = None;
		self.edges = connections
			.into_iter()
			.filter(|c| c.source.node != c.target.node)
			.collect();
	}
}
