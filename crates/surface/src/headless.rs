use std::collections::BTreeMap;

use foundation::bounds::GeoBounds;
use foundation::geo::WeightedPoint;

use crate::host::{ContainerId, HostEvent, OverlayId, SurfaceError, SurfaceHost, SurfaceId};
use crate::options::{FitOptions, HeatStyle, SurfaceOptions, TileLayerOptions};

/// One recorded host operation, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum HostOp {
    CreateSurface {
        surface: SurfaceId,
        container: ContainerId,
    },
    AddTileLayer {
        surface: SurfaceId,
        url_template: String,
    },
    FlyToBounds {
        surface: SurfaceId,
        bounds: GeoBounds,
        padding_px: f64,
        duration_s: f64,
    },
    InvalidateSize {
        surface: SurfaceId,
    },
    CreateHeatOverlay {
        surface: SurfaceId,
        overlay: OverlayId,
        point_count: usize,
    },
    UpdateHeatOverlay {
        overlay: OverlayId,
        point_count: usize,
    },
    RemoveHeatOverlay {
        overlay: OverlayId,
    },
    DestroySurface {
        surface: SurfaceId,
    },
}

#[derive(Debug, Default)]
struct SurfaceState {
    ready: bool,
}

#[derive(Debug)]
struct OverlayState {
    surface: SurfaceId,
    points: Vec<WeightedPoint>,
}

/// In-memory [`SurfaceHost`] that records every operation.
///
/// Stands in for a real map widget in tests and replay runs. Surfaces stay
/// in their creating phase until `complete_creation`, mirroring the
/// asynchronous readiness of a real widget, and overlay operations can be
/// made to fail to exercise the non-fatal degrade path.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    next_surface: u64,
    next_overlay: u64,
    surfaces: BTreeMap<u64, SurfaceState>,
    overlays: BTreeMap<u64, OverlayState>,
    ops: Vec<HostOp>,
    fail_overlay_ops: bool,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[HostOp] {
        &self.ops
    }

    pub fn drain_ops(&mut self) -> Vec<HostOp> {
        std::mem::take(&mut self.ops)
    }

    /// Finishes a surface's construction and returns the readiness event
    /// the embedding would deliver.
    pub fn complete_creation(&mut self, surface: SurfaceId) -> HostEvent {
        if let Some(state) = self.surfaces.get_mut(&surface.0) {
            state.ready = true;
        }
        HostEvent::SurfaceReady(surface)
    }

    /// When set, overlay create/update/remove calls fail until cleared.
    pub fn set_fail_overlay_ops(&mut self, fail: bool) {
        self.fail_overlay_ops = fail;
    }

    pub fn surface_exists(&self, surface: SurfaceId) -> bool {
        self.surfaces.contains_key(&surface.0)
    }

    pub fn is_ready(&self, surface: SurfaceId) -> bool {
        self.surfaces.get(&surface.0).is_some_and(|s| s.ready)
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    pub fn overlay_points(&self, overlay: OverlayId) -> Option<&[WeightedPoint]> {
        self.overlays.get(&overlay.0).map(|o| o.points.as_slice())
    }

    fn ready_surface(&self, surface: SurfaceId) -> Result<(), SurfaceError> {
        match self.surfaces.get(&surface.0) {
            None => Err(SurfaceError::UnknownSurface),
            Some(state) if !state.ready => Err(SurfaceError::SurfaceNotReady),
            Some(_) => Ok(()),
        }
    }

    fn check_overlay_failure(&self) -> Result<(), SurfaceError> {
        if self.fail_overlay_ops {
            return Err(SurfaceError::Backend("injected failure".to_string()));
        }
        Ok(())
    }
}

impl SurfaceHost for HeadlessHost {
    fn create_surface(&mut self, container: ContainerId, _options: &SurfaceOptions) -> SurfaceId {
        self.next_surface += 1;
        let surface = SurfaceId(self.next_surface);
        self.surfaces.insert(surface.0, SurfaceState::default());
        self.ops.push(HostOp::CreateSurface { surface, container });
        surface
    }

    fn add_tile_layer(
        &mut self,
        surface: SurfaceId,
        options: &TileLayerOptions,
    ) -> Result<(), SurfaceError> {
        // Configuration is accepted while the surface is still creating.
        if !self.surfaces.contains_key(&surface.0) {
            return Err(SurfaceError::UnknownSurface);
        }
        self.ops.push(HostOp::AddTileLayer {
            surface,
            url_template: options.url_template.clone(),
        });
        Ok(())
    }

    fn fly_to_bounds(
        &mut self,
        surface: SurfaceId,
        bounds: GeoBounds,
        fit: &FitOptions,
    ) -> Result<(), SurfaceError> {
        self.ready_surface(surface)?;
        self.ops.push(HostOp::FlyToBounds {
            surface,
            bounds,
            padding_px: fit.padding_px,
            duration_s: fit.duration_s,
        });
        Ok(())
    }

    fn invalidate_size(&mut self, surface: SurfaceId) -> Result<(), SurfaceError> {
        self.ready_surface(surface)?;
        self.ops.push(HostOp::InvalidateSize { surface });
        Ok(())
    }

    fn create_heat_overlay(
        &mut self,
        surface: SurfaceId,
        points: &[WeightedPoint],
        _style: &HeatStyle,
    ) -> Result<OverlayId, SurfaceError> {
        self.ready_surface(surface)?;
        self.check_overlay_failure()?;
        self.next_overlay += 1;
        let overlay = OverlayId(self.next_overlay);
        self.overlays.insert(
            overlay.0,
            OverlayState {
                surface,
                points: points.to_vec(),
            },
        );
        self.ops.push(HostOp::CreateHeatOverlay {
            surface,
            overlay,
            point_count: points.len(),
        });
        Ok(overlay)
    }

    fn update_heat_overlay(
        &mut self,
        overlay: OverlayId,
        points: &[WeightedPoint],
    ) -> Result<(), SurfaceError> {
        self.check_overlay_failure()?;
        let state = self
            .overlays
            .get_mut(&overlay.0)
            .ok_or(SurfaceError::UnknownOverlay)?;
        state.points = points.to_vec();
        self.ops.push(HostOp::UpdateHeatOverlay {
            overlay,
            point_count: points.len(),
        });
        Ok(())
    }

    fn remove_heat_overlay(&mut self, overlay: OverlayId) -> Result<(), SurfaceError> {
        self.check_overlay_failure()?;
        if self.overlays.remove(&overlay.0).is_none() {
            return Err(SurfaceError::UnknownOverlay);
        }
        self.ops.push(HostOp::RemoveHeatOverlay { overlay });
        Ok(())
    }

    fn destroy_surface(&mut self, surface: SurfaceId) {
        if self.surfaces.remove(&surface.0).is_none() {
            return;
        }
        self.overlays.retain(|_, state| state.surface != surface);
        self.ops.push(HostOp::DestroySurface { surface });
    }
}

#[cfg(test)]
mod tests {
    use super::{HeadlessHost, HostOp};
    use crate::host::{ContainerId, SurfaceError, SurfaceHost, SurfaceId};
    use crate::options::{FitOptions, HeatStyle, SurfaceOptions};
    use foundation::bounds::GeoBounds;
    use foundation::geo::WeightedPoint;

    fn ready_surface(host: &mut HeadlessHost) -> SurfaceId {
        let id = host.create_surface(ContainerId(1), &SurfaceOptions::default());
        host.complete_creation(id);
        id
    }

    #[test]
    fn geometry_ops_require_readiness() {
        let mut host = HeadlessHost::new();
        let id = host.create_surface(ContainerId(1), &SurfaceOptions::default());

        let bounds = GeoBounds::new(0.0, 1.0, 0.0, 1.0);
        let err = host
            .fly_to_bounds(id, bounds, &FitOptions::default())
            .unwrap_err();
        assert_eq!(err, SurfaceError::SurfaceNotReady);
        assert_eq!(host.invalidate_size(id), Err(SurfaceError::SurfaceNotReady));

        host.complete_creation(id);
        assert!(host.invalidate_size(id).is_ok());
    }

    #[test]
    fn unknown_surface_is_rejected() {
        let mut host = HeadlessHost::new();
        assert_eq!(
            host.invalidate_size(SurfaceId(99)),
            Err(SurfaceError::UnknownSurface)
        );
    }

    #[test]
    fn overlays_store_their_points() {
        let mut host = HeadlessHost::new();
        let id = ready_surface(&mut host);
        let points = [WeightedPoint::new(1.0, 2.0, 3.0)];
        let overlay = host
            .create_heat_overlay(id, &points, &HeatStyle::default())
            .unwrap();
        assert_eq!(host.overlay_points(overlay), Some(&points[..]));

        let replaced = [
            WeightedPoint::new(4.0, 5.0, 6.0),
            WeightedPoint::new(7.0, 8.0, 9.0),
        ];
        host.update_heat_overlay(overlay, &replaced).unwrap();
        assert_eq!(host.overlay_points(overlay), Some(&replaced[..]));
    }

    #[test]
    fn injected_failures_reject_overlay_ops() {
        let mut host = HeadlessHost::new();
        let id = ready_surface(&mut host);
        host.set_fail_overlay_ops(true);
        let err = host
            .create_heat_overlay(id, &[], &HeatStyle::default())
            .unwrap_err();
        assert!(matches!(err, SurfaceError::Backend(_)));
        assert_eq!(host.overlay_count(), 0);
    }

    #[test]
    fn destroying_a_surface_releases_its_overlays() {
        let mut host = HeadlessHost::new();
        let id = ready_surface(&mut host);
        host.create_heat_overlay(id, &[WeightedPoint::new(1.0, 1.0, 1.5)], &HeatStyle::default())
            .unwrap();
        assert_eq!(host.overlay_count(), 1);

        host.destroy_surface(id);
        assert_eq!(host.overlay_count(), 0);
        assert!(!host.surface_exists(id));
        assert!(matches!(host.ops().last(), Some(HostOp::DestroySurface { .. })));
    }

    #[test]
    fn destroying_an_unknown_surface_is_silent() {
        let mut host = HeadlessHost::new();
        host.destroy_surface(SurfaceId(5));
        assert!(host.ops().is_empty());
    }
}
