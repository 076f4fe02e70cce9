//! Node canvas: draggable information widgets joined by connector lines.
//!
//! Everything except [`component`] and [`render`] is plain Rust with no
//! browser dependency.

mod component;
pub mod config;
pub mod drag;
pub mod geometry;
pub mod graph;
pub mod node;
pub mod overlay;
mod render;
pub mod state;
pub mod types;

pub use component::{CanvasHandle, NodeCanvas};
pub use config::{CanvasConfig, ConfigError};
pub use geometry::{Point, Rect, Size};
pub use graph::{ConnectionGraph, GestureOutcome};
pub use node::{Node, NodeLayout, PressTarget};
pub use overlay::{ConnectorLookup, LineSegment, Overlay, OverlayFrame};
pub use state::{CanvasError, CanvasSnapshot, CanvasState, NodeSnapshot};
pub use types::{Connection, Connector, Mode, NodeEvent, NodeId, Payload, Side};
