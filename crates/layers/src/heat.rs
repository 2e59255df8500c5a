use foundation::geo::WeightedPoint;
use surface::{HeatStyle, OverlayId, SurfaceError, SurfaceHost, SurfaceId};
use tracing::warn;

/// Owns the heat overlay's lifecycle on one surface: created on first data,
/// updated in place on refresh, removed when the point set goes empty.
///
/// The overlay handle exists iff the last reconciliation produced at least
/// one valid point.
#[derive(Debug)]
pub struct HeatLayerManager {
    style: HeatStyle,
    overlay: Option<OverlayId>,
}

impl HeatLayerManager {
    pub fn new() -> Self {
        Self::with_style(HeatStyle::default())
    }

    pub fn with_style(style: HeatStyle) -> Self {
        Self {
            style,
            overlay: None,
        }
    }

    pub fn overlay(&self) -> Option<OverlayId> {
        self.overlay
    }

    /// Brings the overlay in line with `points`.
    ///
    /// Host failures are downgraded to a warning and leave the previous
    /// overlay state in place; this boundary never propagates an error.
    /// A bad refresh degrades to the last good overlay.
    pub fn reconcile(
        &mut self,
        host: &mut dyn SurfaceHost,
        surface: SurfaceId,
        points: &[WeightedPoint],
    ) {
        if let Err(err) = self.try_reconcile(host, surface, points) {
            warn!(%err, "heat overlay reconciliation failed; keeping previous overlay state");
        }
    }

    fn try_reconcile(
        &mut self,
        host: &mut dyn SurfaceHost,
        surface: SurfaceId,
        points: &[WeightedPoint],
    ) -> Result<(), SurfaceError> {
        match (self.overlay, points.is_empty()) {
            (Some(overlay), true) => {
                host.remove_heat_overlay(overlay)?;
                self.overlay = None;
            }
            (None, true) => {}
            (Some(overlay), false) => {
                // In-place update keeps the overlay's identity: no visible
                // flash, and renderer-internal caches survive.
                host.update_heat_overlay(overlay, points)?;
            }
            (None, false) => {
                self.overlay = Some(host.create_heat_overlay(surface, points, &self.style)?);
            }
        }
        Ok(())
    }

    /// Forgets the overlay without touching the host; for use when the
    /// surface it belonged to has been destroyed.
    pub fn release(&mut self) {
        self.overlay = None;
    }
}

impl Default for HeatLayerManager {
    fn default() -> Self {
        Self::new()
    }
}
