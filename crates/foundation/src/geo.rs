/// Geographic position in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// A drawable heat sample: position plus visual weight.
///
/// Produced fresh on every refresh by normalization; replaced wholesale,
/// never mutated in place.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WeightedPoint {
    pub lat: f64,
    pub lng: f64,
    pub intensity: f64,
}

impl WeightedPoint {
    pub fn new(lat: f64, lng: f64, intensity: f64) -> Self {
        Self {
            lat,
            lng,
            intensity,
        }
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::{LatLng, WeightedPoint};

    #[test]
    fn latlng_finite_check() {
        assert!(LatLng::new(51.5, -0.1).is_finite());
        assert!(!LatLng::new(f64::NAN, 0.0).is_finite());
        assert!(!LatLng::new(0.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn weighted_point_exposes_position() {
        let p = WeightedPoint::new(10.0, 20.0, 3.0);
        assert_eq!(p.position(), LatLng::new(10.0, 20.0));
    }
}
