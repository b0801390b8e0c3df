mod component;
mod error;
mod graph;
mod layout;
mod render;
mod state;
mod transform;
mod types;

pub use component::MindMapCanvas;
pub use types::PALETTE;
