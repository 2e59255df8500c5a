use foundation::geo::WeightedPoint;

use crate::records::LocationRecord;

/// Visual-weighting knobs for normalization.
///
/// The floor keeps low-count visits visible on the overlay; the scale is a
/// fixed multiplier, independent of the dataset's value range. Both shift
/// only visual weight, never which points are plotted.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NormalizeOptions {
    pub intensity_floor: f64,
    pub intensity_scale: f64,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            intensity_floor: 0.5,
            intensity_scale: 3.0,
        }
    }
}

/// Filters and weights raw location records into drawable points.
///
/// A record survives only with both coordinates present, finite, and
/// non-zero; zero doubles as the feed's "no location" sentinel. A missing,
/// non-finite, or zero count falls back to 1. Input order is preserved for
/// the records that survive. Pure and synchronous; empty or fully-invalid
/// input yields an empty vec, not an error.
pub fn normalize(records: &[LocationRecord], options: &NormalizeOptions) -> Vec<WeightedPoint> {
    records
        .iter()
        .filter_map(|record| normalize_record(record, options))
        .collect()
}

fn normalize_record(record: &LocationRecord, options: &NormalizeOptions) -> Option<WeightedPoint> {
    let lat = coordinate(record.latitude)?;
    let lng = coordinate(record.longitude)?;
    let count = match record.count {
        Some(c) if c.is_finite() && c != 0.0 => c,
        _ => 1.0,
    };
    let intensity = count.max(options.intensity_floor) * options.intensity_scale;
    Some(WeightedPoint::new(lat, lng, intensity))
}

fn coordinate(value: Option<f64>) -> Option<f64> {
    match value {
        Some(v) if v.is_finite() && v != 0.0 => Some(v),
        _ => None,
    }
}
