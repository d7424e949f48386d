// Visual constants for the POI layer and the county overlay

use serde::{Deserialize, Serialize};

pub const SELECTED_POI_OPACITY: f64 = 1.0;
pub const DIMMED_POI_OPACITY: f64 = 0.3;
pub const BASE_POI_SIZE: f64 = 6.0;

pub const MIN_COUNTY_SIZE: f64 = 6.0;
pub const COUNTY_SIZE_SPAN: f64 = 18.0;
/// Used for every county when the group's maximum visit count is zero.
pub const FALLBACK_COUNTY_SIZE: f64 = 8.0;
pub const COUNTY_OPACITY: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    pub selected_poi_opacity: f64,
    pub dimmed_poi_opacity: f64,
    pub base_poi_size: f64,
    pub min_county_size: f64,
    pub county_size_span: f64,
    pub fallback_county_size: f64,
    pub county_opacity: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            selected_poi_opacity: SELECTED_POI_OPACITY,
            dimmed_poi_opacity: DIMMED_POI_OPACITY,
            base_poi_size: BASE_POI_SIZE,
            min_county_size: MIN_COUNTY_SIZE,
            county_size_span: COUNTY_SIZE_SPAN,
            fallback_county_size: FALLBACK_COUNTY_SIZE,
            county_opacity: COUNTY_OPACITY,
        }
    }
}

impl MarkerStyle {
    /// Size of a county marker given its visits and the group maximum.
    pub fn county_size(&self, visits: f64, max_visits: f64) -> f64 {
        if max_visits > 0.0 {
            self.min_county_size + self.county_size_span * (visits / max_visits)
        } else {
            self.fallback_county_size
        }
    }
}
