//! Terrastream - streaming procedural terrain with deterministic resources

pub mod core;
pub mod terrain;
pub mod mesh;
pub mod generation;
pub mod streaming;
