//! Viewpoint-driven chunk streaming

pub mod host;
pub mod chunk;
pub mod registry;
pub mod config;
pub mod stats;
pub mod manager;

pub use host::{Drawable, NullDrawable, NullHost, RenderHost, ViewpointProvider};
pub use chunk::Chunk;
pub use registry::ChunkRegistry;
pub use config::StreamingConfig;
pub use stats::{StreamingStats, TickReport};
pub use manager::StreamingManager;
