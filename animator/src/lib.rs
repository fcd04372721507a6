mod animator;
mod config;
mod node;
mod paint_context;

pub use animator::*;
pub use config::*;
pub use node::*;
pub use paint_context::*;
