pub mod node_canvas;
