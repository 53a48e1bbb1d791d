pub mod analysis;
mod component;
pub mod editor;
pub mod geometry;
pub mod graph;
mod render;
mod types;

pub use component::GraphEditorCanvas;
pub use types::GraphData;
