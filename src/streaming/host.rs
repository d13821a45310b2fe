//! Interfaces to the rendering host and viewpoint provider

use glam::Vec3;

use crate::core::Result;
use crate::mesh::GeometryDescriptor;

/// A drawable created by the host from chunk geometry
pub trait Drawable {
    /// Release the host-side resources behind this drawable
    fn dispose(self);
}

/// Turns geometry descriptors into drawables.
///
/// `submit` is the only fallible call the streaming manager makes; an error
/// leaves the chunk unloaded so it is retried on a later scan.
pub trait RenderHost {
    type Drawable: Drawable;

    /// Materialize chunk-local geometry translated to `origin`
    fn submit(&mut self, geometry: &GeometryDescriptor, origin: Vec3) -> Result<Self::Drawable>;
}

/// Source of the current viewpoint position
pub trait ViewpointProvider {
    fn position(&self) -> Vec3;
}

impl ViewpointProvider for Vec3 {
    fn position(&self) -> Vec3 {
        *self
    }
}

/// Headless host: accepts everything, draws nothing
#[derive(Clone, Copy, Debug, Default)]
pub struct NullHost;

/// Drawable handed out by [`NullHost`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NullDrawable {
    pub origin: Vec3,
    pub triangles: usize,
}

impl Drawable for NullDrawable {
    fn dispose(self) {}
}

impl RenderHost for NullHost {
    type Drawable = NullDrawable;

    fn submit(&mut self, geometry: &GeometryDescriptor, origin: Vec3) -> Result<NullDrawable> {
        Ok(NullDrawable {
            origin,
            triangles: geometry.triangle_count(),
        })
    }
}
