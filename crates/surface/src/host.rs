use foundation::bounds::GeoBounds;
use foundation::geo::WeightedPoint;
use thiserror::Error;

use crate::options::{FitOptions, HeatStyle, SurfaceOptions, TileLayerOptions};

/// Identifies the host container a surface is mounted into.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ContainerId(pub u64);

/// Identifies a mounted drawable surface.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

/// Identifies a heat overlay attached to a surface.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct OverlayId(pub u64);

/// Events the embedding delivers back to a session.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// Surface construction finished; the surface now accepts layer
    /// attachment and geometry queries.
    SurfaceReady(SurfaceId),
    /// The host container changed size.
    ContainerResized(ContainerId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("surface is still initializing")]
    SurfaceNotReady,
    #[error("unknown surface")]
    UnknownSurface,
    #[error("unknown overlay")]
    UnknownOverlay,
    #[error("backend failure: {0}")]
    Backend(String),
}

/// The rendering seam: everything the engine may ask of a real map widget.
///
/// Surface construction is asynchronous. `create_surface` starts it and
/// returns a handle immediately; the embedding delivers
/// [`HostEvent::SurfaceReady`] once the surface is usable. Configuration
/// ops (`add_tile_layer`) are accepted during construction; geometry and
/// overlay ops fail with [`SurfaceError::SurfaceNotReady`] until readiness.
pub trait SurfaceHost {
    fn create_surface(&mut self, container: ContainerId, options: &SurfaceOptions) -> SurfaceId;

    fn add_tile_layer(
        &mut self,
        surface: SurfaceId,
        options: &TileLayerOptions,
    ) -> Result<(), SurfaceError>;

    /// Animates the camera to `bounds`. Fire-and-forget: a later call
    /// supersedes an animation still in flight.
    fn fly_to_bounds(
        &mut self,
        surface: SurfaceId,
        bounds: GeoBounds,
        fit: &FitOptions,
    ) -> Result<(), SurfaceError>;

    /// Recomputes the surface's pixel mapping after a container size change.
    fn invalidate_size(&mut self, surface: SurfaceId) -> Result<(), SurfaceError>;

    fn create_heat_overlay(
        &mut self,
        surface: SurfaceId,
        points: &[WeightedPoint],
        style: &HeatStyle,
    ) -> Result<OverlayId, SurfaceError>;

    /// Replaces an overlay's point set in place, preserving the overlay's
    /// identity and any renderer-internal caching.
    fn update_heat_overlay(
        &mut self,
        overlay: OverlayId,
        points: &[WeightedPoint],
    ) -> Result<(), SurfaceError>;

    fn remove_heat_overlay(&mut self, overlay: OverlayId) -> Result<(), SurfaceError>;

    /// Releases the surface and everything attached to it.
    fn destroy_surface(&mut self, surface: SurfaceId);
}
