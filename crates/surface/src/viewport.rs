use foundation::bounds::GeoBounds;
use foundation::geo::WeightedPoint;
use tracing::{debug, warn};

use crate::host::{ContainerId, SurfaceHost, SurfaceId};
use crate::options::{FitOptions, SurfaceOptions, TileLayerOptions};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum SurfacePhase {
    Creating,
    Ready,
}

/// Owns the drawable surface's lifecycle: created exactly once per mount,
/// torn down exactly once, with camera fits over the current point set in
/// between.
///
/// After `teardown`, every method is a no-op until `initialize` runs again;
/// asynchronous callbacks racing an unmount land harmlessly.
#[derive(Debug)]
pub struct ViewportController {
    surface: Option<(SurfaceId, SurfacePhase)>,
    options: SurfaceOptions,
    tile_layer: TileLayerOptions,
    fit: FitOptions,
}

impl ViewportController {
    pub fn new(options: SurfaceOptions, tile_layer: TileLayerOptions, fit: FitOptions) -> Self {
        Self {
            surface: None,
            options,
            tile_layer,
            fit,
        }
    }

    pub fn surface(&self) -> Option<SurfaceId> {
        self.surface.map(|(id, _)| id)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.surface, Some((_, SurfacePhase::Ready)))
    }

    /// Creates the surface with its default view and base tile layer.
    ///
    /// Idempotent: while a surface exists, returns its handle untouched.
    /// Readiness arrives later via [`crate::HostEvent::SurfaceReady`].
    pub fn initialize(&mut self, host: &mut dyn SurfaceHost, container: ContainerId) -> SurfaceId {
        if let Some((id, _)) = self.surface {
            return id;
        }

        let id = host.create_surface(container, &self.options);
        if let Err(err) = host.add_tile_layer(id, &self.tile_layer) {
            warn!(%err, "base tile layer could not be attached");
        }
        self.surface = Some((id, SurfacePhase::Creating));
        debug!(surface = id.0, "surface construction started");
        id
    }

    /// Marks the surface ready. Returns `true` only on the one
    /// false-to-true transition per mount.
    pub fn on_surface_ready(&mut self, surface: SurfaceId) -> bool {
        match &mut self.surface {
            Some((id, phase)) if *id == surface && *phase == SurfacePhase::Creating => {
                *phase = SurfacePhase::Ready;
                debug!(surface = surface.0, "surface ready");
                true
            }
            _ => false,
        }
    }

    /// Animates the camera to the minimal box covering `points`.
    ///
    /// An empty set leaves the camera at its last position. The animation is
    /// fire-and-forget; a later fit supersedes one still in flight.
    pub fn fit_to_bounds(&mut self, host: &mut dyn SurfaceHost, points: &[WeightedPoint]) {
        let Some((id, SurfacePhase::Ready)) = self.surface else {
            return;
        };
        let Some(bounds) = GeoBounds::from_points(points) else {
            return;
        };
        if let Err(err) = host.fly_to_bounds(id, bounds, &self.fit) {
            debug!(%err, "bounds fit skipped");
        }
    }

    /// Requests a pixel-mapping recalculation after a container size change.
    pub fn invalidate_size(&mut self, host: &mut dyn SurfaceHost) {
        let Some((id, SurfacePhase::Ready)) = self.surface else {
            return;
        };
        if let Err(err) = host.invalidate_size(id) {
            debug!(%err, "size invalidation skipped");
        }
    }

    /// Releases the surface and all attached layers. Requires a fresh
    /// `initialize` before reuse.
    pub fn teardown(&mut self, host: &mut dyn SurfaceHost) {
        if let Some((id, _)) = self.surface.take() {
            host.destroy_surface(id);
            debug!(surface = id.0, "surface destroyed");
        }
    }
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(
            SurfaceOptions::default(),
            TileLayerOptions::default(),
            FitOptions::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::ViewportController;
    use crate::headless::{HeadlessHost, HostOp};
    use crate::host::ContainerId;
    use foundation::bounds::GeoBounds;
    use foundation::geo::WeightedPoint;

    fn ready_controller(host: &mut HeadlessHost) -> ViewportController {
        let mut vp = ViewportController::default();
        let id = vp.initialize(host, ContainerId(1));
        host.complete_creation(id);
        assert!(vp.on_surface_ready(id));
        vp
    }

    #[test]
    fn initialize_is_idempotent_while_surface_exists() {
        let mut host = HeadlessHost::new();
        let mut vp = ViewportController::default();
        let first = vp.initialize(&mut host, ContainerId(1));
        let second = vp.initialize(&mut host, ContainerId(1));
        assert_eq!(first, second);
        let creations = host
            .ops()
            .iter()
            .filter(|op| matches!(op, HostOp::CreateSurface { .. }))
            .count();
        assert_eq!(creations, 1);
    }

    #[test]
    fn initialize_attaches_base_tiles() {
        let mut host = HeadlessHost::new();
        let mut vp = ViewportController::default();
        vp.initialize(&mut host, ContainerId(1));
        assert!(
            host.ops()
                .iter()
                .any(|op| matches!(op, HostOp::AddTileLayer { .. }))
        );
    }

    #[test]
    fn readiness_transition_happens_once() {
        let mut host = HeadlessHost::new();
        let mut vp = ViewportController::default();
        let id = vp.initialize(&mut host, ContainerId(1));
        assert!(!vp.is_ready());
        host.complete_creation(id);
        assert!(vp.on_surface_ready(id));
        assert!(vp.is_ready());
        assert!(!vp.on_surface_ready(id));
    }

    #[test]
    fn empty_fit_leaves_camera_alone() {
        let mut host = HeadlessHost::new();
        let mut vp = ready_controller(&mut host);
        vp.fit_to_bounds(&mut host, &[]);
        assert!(
            !host
                .ops()
                .iter()
                .any(|op| matches!(op, HostOp::FlyToBounds { .. }))
        );
    }

    #[test]
    fn fit_covers_the_point_span() {
        let mut host = HeadlessHost::new();
        let mut vp = ready_controller(&mut host);
        vp.fit_to_bounds(
            &mut host,
            &[
                WeightedPoint::new(10.0, 10.0, 1.5),
                WeightedPoint::new(20.0, 20.0, 1.5),
            ],
        );
        let fit = host
            .ops()
            .iter()
            .find_map(|op| match op {
                HostOp::FlyToBounds { bounds, .. } => Some(*bounds),
                _ => None,
            })
            .expect("fit requested");
        assert_eq!(fit, GeoBounds::new(10.0, 20.0, 10.0, 20.0));
    }

    #[test]
    fn fit_before_readiness_is_a_no_op() {
        let mut host = HeadlessHost::new();
        let mut vp = ViewportController::default();
        vp.initialize(&mut host, ContainerId(1));
        vp.fit_to_bounds(&mut host, &[WeightedPoint::new(1.0, 1.0, 1.5)]);
        assert!(
            !host
                .ops()
                .iter()
                .any(|op| matches!(op, HostOp::FlyToBounds { .. }))
        );
    }

    #[test]
    fn methods_after_teardown_are_no_ops() {
        let mut host = HeadlessHost::new();
        let mut vp = ready_controller(&mut host);
        vp.teardown(&mut host);
        let ops_after_teardown = host.ops().len();

        vp.fit_to_bounds(&mut host, &[WeightedPoint::new(1.0, 1.0, 1.5)]);
        vp.invalidate_size(&mut host);
        vp.teardown(&mut host);
        assert_eq!(host.ops().len(), ops_after_teardown);
        assert!(vp.surface().is_none());
    }

    #[test]
    fn reinitialize_after_teardown_creates_a_new_surface() {
        let mut host = HeadlessHost::new();
        let mut vp = ready_controller(&mut host);
        let first = vp.surface().unwrap();
        vp.teardown(&mut host);
        let second = vp.initialize(&mut host, ContainerId(1));
        assert_ne!(first, second);
        assert!(!vp.is_ready());
    }
}
