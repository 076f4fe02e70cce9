use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Opaque key-value payload attached to a node by outside collaborators.
pub type Payload = serde_json::Map<String, serde_json::Value>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(Uuid);

impl NodeId {
	pub fn new() -> Self {
		Self(Uuid::new_v4())
	}
}

impl Default for NodeId {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt(f)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
	Left,
	Right,
}

impl Side {
	pub const ALL: [Side; 2] = [Side::Left, Side::Right];

	pub fn as_str(&self) -> &'static str {
		match self {
			Side::Left => "left",
			Side::Right => "right",
		}
	}
}

impl fmt::Display for Side {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Which of the two mutually exclusive sub-views a node shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
	#[default]
	Display,
	Editable,
}

impl Mode {
	pub fn as_str(&self) -> &'static str {
		match self {
			Mode::Display => "button",
			Mode::Editable => "editable",
		}
	}
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown node mode '{0}'")]
pub struct UnknownMode(pub String);

impl FromStr for Mode {
	type Err = UnknownMode;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"button" | "display" => Ok(Mode::Display),
			"editable" => Ok(Mode::Editable),
			other => Err(UnknownMode(other.to_string())),
		}
	}
}

impl fmt::Display for Mode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One attachment point of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connector {
	pub node: NodeId,
	pub side: Side,
}

impl Connector {
	pub const fn new(node: NodeId, side: Side) -> Self {
		Self { node, side }
	}
}

/// A directed edge between two connectors on distinct nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
	pub source: Connector,
	pub target: Connector,
}

impl Connection {
	/// Builds an edge, refusing self-loops.
	pub fn new(source: Connector, target: Connector) -> Option<Self> {
		(source.node != target.node).then_some(Self { source, target })
	}

	pub fn involves(&self, node: NodeId) -> bool {
		self.source.node == node || self.target.node == node
	}
}

/// Messages a node emits towards its owning canvas.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeEvent {
	/// The close affordance was activated.
	Deleted(NodeId),
	ConnectorActivated(Connector),
	Moved(NodeId),
}

impl NodeEvent {
	pub fn node(&self) -> NodeId {
		match self {
			NodeEvent::Deleted(id) | NodeEvent::Moved(id) => *id,
			NodeEvent::ConnectorActivated(c) => c.node,
		}
	}
}
