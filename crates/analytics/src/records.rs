use serde::{Deserialize, Deserializer};

/// One city-level visit aggregate as delivered by the analytics feed.
///
/// The feed is loosely typed: numeric fields arrive as JSON numbers or as
/// numeric strings depending on the upstream aggregator, and anything else
/// is treated as absent rather than rejected. Records are delivered as a
/// complete replacement array on every refresh; order is preserved for
/// downstream tabular display even though rendering does not depend on it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LocationRecord {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub count: Option<f64>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl LocationRecord {
    /// Convenience constructor for the common located-with-count shape.
    pub fn at(latitude: f64, longitude: f64, count: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            count: Some(count),
            ..Self::default()
        }
    }
}

/// Accepts a number, a numeric string, or anything else as `None`.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(value)) => Some(value),
        Some(Raw::Text(text)) => text.trim().parse().ok(),
        _ => None,
    })
}
