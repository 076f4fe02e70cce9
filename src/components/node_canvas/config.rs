use serde::Deserialize;
use thiserror::Error;

use super::geometry::{Point, Size};

/// Errors raised while loading a [`CanvasConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("Failed to parse canvas config: {0}")]
	Parse(#[from] serde_json::Error),

	#[error("Invalid canvas config: {0}")]
	Invalid(String),
}

/// Tunables for node layout and overlay painting.
///
/// Every field has a default, so a JSON override only needs the keys it
/// changes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
	pub node_size: Size,
	/// Where freshly created nodes land, before clamping.
	pub spawn_position: Point,
	pub close_size: f64,
	pub close_margin: f64,
	pub connector_radius: f64,
	pub default_title: String,
	pub label_prefix: String,
	pub line_color: String,
	pub line_width: f64,
	pub pending_color: String,
}

impl Default for CanvasConfig {
	fn default() -> Self {
		Self {
			node_size: Size::new(220.0, 150.0),
			spawn_position: Point::new(50.0, 50.0),
			close_size: 12.0,
			close_margin: 5.0,
			connector_radius: 6.0,
			default_title: "Draggable info widget".into(),
			label_prefix: "Info widget".into(),
			line_color: "rgb(80, 120, 200)".into(),
			line_width: 2.0,
			pending_color: "rgba(80, 120, 200, 0.8)".into(),
		}
	}
}

impl CanvasConfig {
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		let config: CanvasConfig = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if self.node_size.is_empty() {
			return Err(ConfigError::Invalid("node_size must be positive".into()));
		}
		if self.connector_radius <= 0.0 || self.close_size <= 0.0 {
			return Err(ConfigError::Invalid(
				"close_size and connector_radius must be positive".into(),
			));
		}
		if self.close_size + 2.0 * self.close_margin > self.node_size.width {
			return Err(ConfigError::Invalid("close affordance does not fit the node".into()));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_override_keeps_defaults() {
		let config = CanvasConfig::from_json(r#"{ "line_width": 3.5, "label_prefix": "Step" }"#)
			.expect("valid config");
		assert_eq!(config.line_width, 3.5);
		assert_eq!(config.label_prefix, "Step");
		assert_eq!(config.node_size, Size::new(220.0, 150.0));
	}

	#[test]
	fn rejects_degenerate_node_size() {
		let err = CanvasConfig::from_json(r#"{ "node_size": { "width": 0, "height": 10 } }"#)
			.unwrap_err();
		assert!(matches!(err, ConfigError::Invalid(_)));
	}

	#[test]
	fn reports_malformed_json() {
		assert!(matches!(CanvasConfig::from_json("{ nope"), Err(ConfigError::Parse(_))));
	}
}
