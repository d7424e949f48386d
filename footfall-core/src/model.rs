use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Canonical POI identifier (placekey).
///
/// The inner string is always trimmed and ASCII-lowercased, so two ids
/// compare equal exactly when their source spellings differ only in
/// surrounding whitespace or case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoiId(String);

impl PoiId {
    pub fn canonical(raw: &str) -> Self {
        PoiId(raw.trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for PoiId {
    fn from(raw: &str) -> Self {
        PoiId::canonical(raw)
    }
}

impl Borrow<str> for PoiId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PoiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointOfInterest {
    pub id: PoiId,
    pub name: String,
    pub location: GeoPoint,
    pub raw_visit_count: u64,
}

/// Where visitors to one POI came from, aggregated per county.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitorOriginRecord {
    pub poi_id: PoiId,
    /// County FIPS code, kept as text to preserve leading zeros.
    pub county_code: String,
    pub county_name: String,
    pub centroid: GeoPoint,
    /// Estimated visits; may be fractional.
    pub visits: f64,
}
