//! End-to-end canvas behaviour: dragging, the two-click connection gesture,
//! cascade deletion and overlay recompute.
use node_canvas::components::node_canvas::*;

const CANVAS: Size = Size::new(900.0, 600.0);

fn canvas() -> CanvasState {
	CanvasState::new(CanvasConfig::default(), CANVAS)
}

/// Canvas point inside `side`'s connector of `node`.
fn connector_hit(state: &CanvasState, node: NodeId, side: Side) -> Point {
	let n = state.node(node).expect("node exists");
	n.position() + n.layout().connector(side).center()
}

/// Canvas point on an empty part of the node body.
fn body_hit(state: &CanvasState, node: NodeId) -> Point {
	let n = state.node(node).expect("node exists");
	n.position() + Point::new(n.size().width / 2.0, 20.0)
}

fn click(state: &mut CanvasState, node: NodeId, side: Side) -> Option<NodeEvent> {
	let p = connector_hit(state, node, side);
	state.pointer_down(p)
}

fn connect(state: &mut CanvasState, a: NodeId, a_side: Side, b: NodeId, b_side: Side) {
	click(state, a, a_side);
	click(state, b, b_side);
	state.pointer_up();
}

#[test]
fn test_drag_stays_within_canvas() {
	let mut c = canvas();
	let a = c.create_node("A");
	let node_size = c.node(a).map(Node::size).expect("node exists");
	let start = body_hit(&c, a);
	assert_eq!(c.pointer_down(start), None);

	let path = [
		Point::new(-300.0, 40.0),
		Point::new(120.0, -80.0),
		Point::new(5000.0, 5000.0),
		Point::new(450.0, 300.0),
		Point::new(899.0, 0.0),
		Point::new(-1.0, 599.0),
	];
	for p in path {
		assert!(c.pointer_move(p));
		let pos = c.node(a).map(Node::position).expect("node exists");
		assert!(pos.x >= 0.0 && pos.x <= CANVAS.width - node_size.width, "{pos:?}");
		assert!(pos.y >= 0.0 && pos.y <= CANVAS.height - node_size.height, "{pos:?}");
	}
	c.pointer_up();
}

#[test]
fn test_press_on_affordances_never_drags() {
	let mut c = canvas();
	let a = c.create_node("A");
	let b = c.create_node("B");
	c.place_node(b, Point::new(400.0, 300.0)).expect("node exists");

	click(&mut c, a, Side::Right);
	assert!(!c.pointer_move(Point::new(700.0, 500.0)));
	assert_eq!(c.node(a).map(Node::position), Some(Point::new(50.0, 50.0)));
	c.pointer_up();
}

#[test]
fn test_drag_then_connect_uses_live_positions() {
	let mut c = canvas();
	let a = c.create_node("A");
	let b = c.create_node("B");
	assert_eq!(c.node(b).map(Node::position), Some(Point::new(50.0, 50.0)));

	// B is on top, so a press on the shared area grabs it
	let grab = body_hit(&c, b);
	c.pointer_down(grab);
	c.pointer_move(grab + Point::new(250.0, 0.0));
	c.pointer_up();
	assert_eq!(c.node(b).map(Node::position), Some(Point::new(300.0, 50.0)));

	click(&mut c, a, Side::Left);
	let event = click(&mut c, b, Side::Right);
	assert_eq!(
		event,
		Some(NodeEvent::ConnectorActivated(Connector::new(b, Side::Right)))
	);

	let expected = Connection {
		source: Connector::new(a, Side::Left),
		target: Connector::new(b, Side::Right),
	};
	assert_eq!(c.connections(), &[expected]);

	let segments = c.overlay_segments();
	assert_eq!(segments.len(), 1);
	assert_eq!(segments[0].from, Point::new(50.0, 125.0));
	assert_eq!(segments[0].to, Point::new(520.0, 125.0));
}

#[test]
fn test_overlay_tracks_moves_after_connecting() {
	let mut c = canvas();
	let a = c.create_node("A");
	let b = c.create_node("B");
	c.place_node(b, Point::new(400.0, 50.0)).expect("node exists");
	connect(&mut c, a, Side::Right, b, Side::Left);
	c.take_overlay_frame();

	let grab = body_hit(&c, b);
	c.pointer_down(grab);
	c.pointer_move(grab + Point::new(0.0, 200.0));
	c.pointer_up();

	let frame = c.take_overlay_frame().expect("move invalidates overlay");
	assert_eq!(frame.segments[0].to, Point::new(400.0, 325.0));
	assert!(c.take_overlay_frame().is_none());
}

#[test]
fn test_same_node_twice_cancels() {
	let mut c = canvas();
	let a = c.create_node("A");
	click(&mut c, a, Side::Left);
	assert_eq!(c.pending(), Some(Connector::new(a, Side::Left)));
	click(&mut c, a, Side::Left);
	assert_eq!(c.pending(), None);
	assert!(c.connections().is_empty());
}

#[test]
fn test_delete_cascades_and_second_delete_is_harmless() {
	let mut c = canvas();
	let a = c.create_node("A");
	let b = c.create_node("B");
	c.place_node(b, Point::new(400.0, 50.0)).expect("node exists");
	connect(&mut c, a, Side::Right, b, Side::Left);
	assert_eq!(c.connections().len(), 1);

	assert!(c.delete_node(a).is_some());
	assert!(c.connections().is_empty());
	assert!(c.delete_node(b).is_some());
	assert!(c.delete_node(b).is_none());
	assert!(c.nodes().is_empty());
}

#[test]
fn test_delete_removes_every_reference() {
	let mut c = canvas();
	let ids: Vec<NodeId> = (0..4).map(|i| c.create_node(format!("N{i}"))).collect();
	for (i, id) in ids.iter().enumerate() {
		c.place_node(*id, Point::new(230.0 * i as f64, 40.0 * i as f64))
			.expect("node exists");
	}
	for (x, y) in [(0, 1), (1, 2), (2, 0), (3, 1), (1, 3), (2, 3)] {
		connect(&mut c, ids[x], Side::Right, ids[y], Side::Left);
	}
	assert_eq!(c.connections().len(), 6);

	c.delete_node(ids[1]);
	assert!(c.connections().iter().all(|e| !e.involves(ids[1])));
	assert_eq!(c.connections().len(), 2);
	assert_eq!(c.overlay_segments().len(), 2);
}

#[test]
fn test_deleting_pending_node_resets_gesture() {
	let mut c = canvas();
	let a = c.create_node("A");
	let b = c.create_node("B");
	let d = c.create_node("D");
	c.place_node(b, Point::new(300.0, 50.0)).expect("node exists");
	c.place_node(d, Point::new(600.0, 50.0)).expect("node exists");

	click(&mut c, a, Side::Right);
	// close affordance of A
	let close = c.node(a).map(|n| n.position() + n.layout().close.center()).expect("node exists");
	assert_eq!(c.pointer_down(close), Some(NodeEvent::Deleted(a)));
	assert_eq!(c.pending(), None);

	click(&mut c, b, Side::Right);
	assert_eq!(c.pending(), Some(Connector::new(b, Side::Right)));
	assert!(c.connections().is_empty());
	click(&mut c, d, Side::Left);
	assert_eq!(c.connections().len(), 1);
}

#[test]
fn test_connector_points_differ_by_width() {
	let mut c = canvas();
	let a = c.create_node("A");
	for p in [Point::new(0.0, 0.0), Point::new(321.0, 77.0), Point::new(680.0, 450.0)] {
		c.place_node(a, p).expect("node exists");
		let n = c.node(a).expect("node exists");
		let gap = n.connector_point(Side::Right).x - n.connector_point(Side::Left).x;
		assert_eq!(gap, n.size().width);
	}
}

#[test]
fn test_snapshot_round_trips_through_json() {
	let mut c = canvas();
	let a = c.create_node("A");
	let b = c.create_node("B");
	c.place_node(b, Point::new(400.0, 50.0)).expect("node exists");
	connect(&mut c, a, Side::Right, b, Side::Left);
	let mut data = Payload::new();
	data.insert("model".into(), serde_json::json!("gpt"));
	c.node_mut(a).expect("node exists").set_node_data(data);

	let text = serde_json::to_string(&c.snapshot()).expect("serializable");
	let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
	assert_eq!(value["nodes"][0]["node_data"]["model"], "gpt");
	assert_eq!(value["connections"][0]["target"]["node"], b.to_string());
}
