//! Page building blocks.

pub mod graph_editor;
