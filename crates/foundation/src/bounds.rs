use crate::geo::{LatLng, WeightedPoint};

/// Geographic bounding box in degrees.
///
/// Undefined for an empty point set; `from_points` returns `None` there so
/// callers cannot fit the camera to nothing.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl GeoBounds {
    pub fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
    }

    /// A degenerate box covering a single position.
    pub fn at(position: LatLng) -> Self {
        Self::new(position.lat, position.lat, position.lng, position.lng)
    }

    /// Minimal box covering every point, or `None` for an empty set.
    pub fn from_points(points: &[WeightedPoint]) -> Option<Self> {
        let mut iter = points.iter();
        let first = iter.next()?;
        let mut bounds = Self::at(first.position());
        for point in iter {
            bounds.extend(point.position());
        }
        Some(bounds)
    }

    pub fn extend(&mut self, position: LatLng) {
        self.min_lat = self.min_lat.min(position.lat);
        self.max_lat = self.max_lat.max(position.lat);
        self.min_lng = self.min_lng.min(position.lng);
        self.max_lng = self.max_lng.max(position.lng);
    }

    pub fn contains(&self, position: LatLng) -> bool {
        position.lat >= self.min_lat
            && position.lat <= self.max_lat
            && position.lng >= self.min_lng
            && position.lng <= self.max_lng
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }
}
