use foundation::geo::LatLng;

/// Initial camera and interaction flags for a new surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceOptions {
    pub center: LatLng,
    pub zoom: f64,
    pub zoom_control: bool,
    pub attribution_control: bool,
    /// Canvas rendering performs better for dense heat overlays.
    pub prefer_canvas: bool,
    pub inertia: bool,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            center: LatLng::new(20.0, 0.0),
            zoom: 2.0,
            zoom_control: true,
            attribution_control: false,
            prefer_canvas: true,
            inertia: true,
        }
    }
}

/// Base tile layer attached right after surface creation.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayerOptions {
    pub url_template: String,
    pub attribution: String,
    pub max_zoom: f64,
}

impl Default for TileLayerOptions {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; OpenStreetMap contributors".to_string(),
            max_zoom: 19.0,
        }
    }
}

/// Camera animation parameters for a bounds fit.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FitOptions {
    pub padding_px: f64,
    pub duration_s: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            padding_px: 50.0,
            duration_s: 1.0,
        }
    }
}

/// One stop of the intensity-to-color ramp.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GradientStop {
    /// Position in the normalized intensity range, 0..=1.
    pub at: f64,
    /// RGBA, channels 0..=1.
    pub color: [f32; 4],
}

impl GradientStop {
    pub const fn new(at: f64, color: [f32; 4]) -> Self {
        Self { at, color }
    }
}

/// Visual configuration for a heat overlay: falloff radius and blur spread
/// in pixels, the zoom at which points render at full intensity, an opacity
/// floor, and a cold-to-hot gradient ordered by stop position.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatStyle {
    pub radius_px: f64,
    pub blur_px: f64,
    pub max_zoom: f64,
    pub min_opacity: f64,
    pub gradient: Vec<GradientStop>,
}

impl Default for HeatStyle {
    fn default() -> Self {
        Self {
            radius_px: 25.0,
            blur_px: 20.0,
            max_zoom: 17.0,
            min_opacity: 0.7,
            gradient: vec![
                GradientStop::new(0.2, [0.0, 119.0 / 255.0, 1.0, 0.7]), // blue
                GradientStop::new(0.4, [0.0, 1.0, 1.0, 0.8]),           // cyan
                GradientStop::new(0.6, [50.0 / 255.0, 1.0, 50.0 / 255.0, 0.9]), // green
                GradientStop::new(0.8, [1.0, 1.0, 0.0, 0.9]),           // yellow
                GradientStop::new(1.0, [1.0, 50.0 / 255.0, 50.0 / 255.0, 1.0]), // red
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HeatStyle, SurfaceOptions};

    #[test]
    fn default_view_matches_world_overview() {
        let opts = SurfaceOptions::default();
        assert_eq!((opts.center.lat, opts.center.lng), (20.0, 0.0));
        assert_eq!(opts.zoom, 2.0);
    }

    #[test]
    fn default_gradient_is_five_ascending_stops() {
        let style = HeatStyle::default();
        assert_eq!(style.gradient.len(), 5);
        for pair in style.gradient.windows(2) {
            assert!(pair[0].at < pair[1].at);
        }
        assert_eq!(style.gradient.last().unwrap().at, 1.0);
    }
}
