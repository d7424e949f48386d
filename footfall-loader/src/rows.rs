use serde::{Deserialize, Serialize};

/// Column names of the POI table, in file order.
pub const POI_COLUMNS: [&str; 5] = [
    "placekey",
    "location_name",
    "latitude",
    "longitude",
    "raw_visit_counts",
];

/// Column names of the visitor-origin table, in file order.
pub const VISIT_COLUMNS: [&str; 6] = ["placekey", "county", "NAME", "lat", "lon", "visits"];

/// One untyped row of the POI table.
///
/// Every field is kept as text so that numeric validation happens in one
/// place and can report the offending column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoiRow {
    pub placekey: Option<String>,
    pub location_name: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub raw_visit_counts: Option<String>,
}

impl PoiRow {
    pub fn new(placekey: &str, location_name: &str, latitude: &str, longitude: &str, raw_visit_counts: &str) -> Self {
        Self {
            placekey: Some(placekey.to_string()),
            location_name: Some(location_name.to_string()),
            latitude: Some(latitude.to_string()),
            longitude: Some(longitude.to_string()),
            raw_visit_counts: Some(raw_visit_counts.to_string()),
        }
    }
}

/// One untyped row of the visitor-origin table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisitRow {
    pub placekey: Option<String>,
    pub county: Option<String>,
    #[serde(rename = "NAME")]
    pub name: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub visits: Option<String>,
}

impl VisitRow {
    pub fn new(placekey: &str, county: &str, name: &str, lat: &str, lon: &str, visits: &str) -> Self {
        Self {
            placekey: Some(placekey.to_string()),
            county: Some(county.to_string()),
            name: Some(name.to_string()),
            lat: Some(lat.to_string()),
            lon: Some(lon.to_string()),
            visits: Some(visits.to_string()),
        }
    }
}
