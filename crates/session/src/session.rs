use analytics::normalize::{NormalizeOptions, normalize};
use analytics::records::LocationRecord;
use foundation::time::Time;
use layers::heat::HeatLayerManager;
use surface::{
    ContainerId, FitOptions, HeatStyle, HostEvent, OverlayId, ResizeWatcher, SurfaceHost,
    SurfaceId, SurfaceOptions, TileLayerOptions, ViewportController,
};
use tracing::{debug, info};

use crate::state::SessionPhase;

/// Per-refresh accounting: points plotted vs records dropped by
/// normalization.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct RefreshStats {
    pub kept: usize,
    pub dropped: usize,
}

/// Everything configurable about a session, with the fixed visual defaults
/// filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    pub normalize: NormalizeOptions,
    pub style: HeatStyle,
    pub surface: SurfaceOptions,
    pub tile_layer: TileLayerOptions,
    pub fit: FitOptions,
    pub resize_debounce_s: f64,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            normalize: NormalizeOptions::default(),
            style: HeatStyle::default(),
            surface: SurfaceOptions::default(),
            tile_layer: TileLayerOptions::default(),
            fit: FitOptions::default(),
            resize_debounce_s: surface::RESIZE_DEBOUNCE_S,
        }
    }
}

/// Composition root for one mounted heat overlay.
///
/// Given a location array, keeps the visual overlay consistent with it,
/// however many times the array changes or the host container resizes.
/// Exactly one session exists per mounted surface; all handles it owns are
/// released on unmount and nothing persists across mounts.
#[derive(Debug)]
pub struct HeatmapSession {
    phase: SessionPhase,
    normalize: NormalizeOptions,
    viewport: ViewportController,
    heat: HeatLayerManager,
    resize: ResizeWatcher,
    /// Latest array seen before readiness; earlier ones are discarded.
    pending: Option<Vec<LocationRecord>>,
}

impl HeatmapSession {
    pub fn new() -> Self {
        Self::with_options(SessionOptions::default())
    }

    pub fn with_options(options: SessionOptions) -> Self {
        Self {
            phase: SessionPhase::Uninitialized,
            normalize: options.normalize,
            viewport: ViewportController::new(options.surface, options.tile_layer, options.fit),
            heat: HeatLayerManager::with_style(options.style),
            resize: ResizeWatcher::with_delay(options.resize_debounce_s),
            pending: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn surface(&self) -> Option<SurfaceId> {
        self.viewport.surface()
    }

    pub fn overlay(&self) -> Option<OverlayId> {
        self.heat.overlay()
    }

    /// Mounts the session into `container`, starting surface construction.
    /// Only the first call does anything.
    pub fn mount(&mut self, host: &mut dyn SurfaceHost, container: ContainerId) {
        if self.phase != SessionPhase::Uninitialized {
            return;
        }
        self.viewport.initialize(host, container);
        self.phase = SessionPhase::Initializing;
        debug!("session mounted; waiting for surface readiness");
    }

    /// Feeds the latest location array.
    ///
    /// The array fully replaces the previous one. In `Ready` it is applied
    /// synchronously (normalize → reconcile → fit) and the refresh stats are
    /// returned. While still `Initializing` only the newest array is
    /// retained, to be applied exactly once at readiness. Before mount and
    /// after teardown this is a no-op.
    pub fn update(
        &mut self,
        host: &mut dyn SurfaceHost,
        records: &[LocationRecord],
    ) -> Option<RefreshStats> {
        match self.phase {
            SessionPhase::Ready => Some(self.apply(host, records)),
            SessionPhase::Initializing => {
                self.pending = Some(records.to_vec());
                None
            }
            SessionPhase::Uninitialized | SessionPhase::TornDown => None,
        }
    }

    /// Delivers an embedding event at `now` on the session timeline.
    pub fn handle_event(&mut self, host: &mut dyn SurfaceHost, event: HostEvent, now: Time) {
        match event {
            HostEvent::SurfaceReady(surface) => {
                if self.phase != SessionPhase::Initializing
                    || !self.viewport.on_surface_ready(surface)
                {
                    return;
                }
                self.phase = SessionPhase::Ready;
                if let Some(records) = self.pending.take() {
                    let stats = self.apply(host, &records);
                    info!(
                        kept = stats.kept,
                        dropped = stats.dropped,
                        "applied buffered refresh at readiness"
                    );
                }
            }
            HostEvent::ContainerResized(_) => {
                if self.phase.is_mounted() {
                    self.resize.note_resize(now);
                }
            }
        }
    }

    /// Advances the session timeline, firing at most one pending geometry
    /// recalculation per coalesced resize burst.
    pub fn tick(&mut self, host: &mut dyn SurfaceHost, now: Time) {
        if self.resize.poll(now) {
            self.viewport.invalidate_size(host);
        }
    }

    /// Unmounts: detaches the resize watcher, then releases the surface and
    /// every handle with it. Subsequent calls and events are no-ops.
    pub fn unmount(&mut self, host: &mut dyn SurfaceHost) {
        if self.phase == SessionPhase::TornDown {
            return;
        }
        self.resize.detach();
        self.viewport.teardown(host);
        self.heat.release();
        self.pending = None;
        self.phase = SessionPhase::TornDown;
        debug!("session torn down");
    }

    fn apply(&mut self, host: &mut dyn SurfaceHost, records: &[LocationRecord]) -> RefreshStats {
        let points = normalize(records, &self.normalize);
        let stats = RefreshStats {
            kept: points.len(),
            dropped: records.len() - points.len(),
        };
        let Some(surface) = self.viewport.surface() else {
            return stats;
        };
        // Reconciliation completes synchronously before the fit for the
        // same array version is requested.
        self.heat.reconcile(host, surface, &points);
        self.viewport.fit_to_bounds(host, &points);
        stats
    }
}

impl Default for HeatmapSession {
    fn default() -> Self {
        Self::new()
    }
}
