// Render payload and summary text for the external map renderer

use crate::derived::{CountyMarker, DerivedView};
use crate::model::PointOfInterest;
use crate::selection::SelectionState;
use crate::style::MarkerStyle;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Write;

pub const PROMPT_TEXT: &str = "Click a point of interest to see visitor origin counties.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayMarker {
    pub lat: f64,
    pub lon: f64,
    pub size: f64,
    pub opacity: f64,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderPayload {
    /// Aligned with the POI collection order.
    pub poi_opacity: Vec<f64>,
    pub overlay: Vec<OverlayMarker>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposedView {
    pub payload: RenderPayload,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoiMarker {
    pub lat: f64,
    pub lon: f64,
    pub size: f64,
    pub label: String,
}

/// The static POI layer drawn underneath every payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BaseLayer {
    pub markers: Vec<PoiMarker>,
}

impl BaseLayer {
    pub fn from_pois(pois: &[PointOfInterest], style: &MarkerStyle) -> Self {
        let markers = pois
            .iter()
            .map(|poi| PoiMarker {
                lat: poi.location.lat,
                lon: poi.location.lon,
                size: style.base_poi_size,
                label: poi_label(poi),
            })
            .collect();
        Self { markers }
    }
}

pub fn compose(derived: DerivedView, selection: &SelectionState) -> ComposedView {
    let summary = summary_text(&derived, selection);
    let overlay = derived
        .county_markers
        .iter()
        .map(|marker| OverlayMarker {
            lat: marker.position.lat,
            lon: marker.position.lon,
            size: marker.size,
            opacity: marker.opacity,
            label: county_label(marker),
        })
        .collect();

    ComposedView {
        payload: RenderPayload {
            poi_opacity: derived.poi_opacity,
            overlay,
        },
        summary,
    }
}

pub fn summary_text(derived: &DerivedView, selection: &SelectionState) -> String {
    let selection = match selection {
        SelectionState::NoSelection => return PROMPT_TEXT.to_string(),
        SelectionState::Selected(selection) => selection,
    };

    if derived.no_data || derived.county_markers.is_empty() {
        return format!(
            "No county-level visitor data found for placekey {}.",
            selection.display_id()
        );
    }

    let markers = &derived.county_markers;
    let distinct_counties: HashSet<&str> = markers.iter().map(|m| m.county_code.as_str()).collect();
    let total_visits: f64 = markers.iter().map(|m| m.visits).sum();

    let mut text = format!("Selected placekey: {}. ", selection.display_id());
    if let Some(raw) = selection.raw_visit_count {
        let _ = write!(text, "Raw visitor count: {}. ", raw);
    }
    let _ = write!(
        text,
        "Matched origin records: {}. Distinct origin counties: {}, total visits in sample: {}.",
        markers.len(),
        distinct_counties.len(),
        whole(total_visits)
    );
    text
}

pub fn county_label(marker: &CountyMarker) -> String {
    format!(
        "County: {}\nFIPS: {}\nVisits: {}",
        marker.county_name,
        marker.county_code,
        whole(marker.visits)
    )
}

pub fn poi_label(poi: &PointOfInterest) -> String {
    format!(
        "{}\nRaw visits: {}\nPlacekey: {}",
        poi.name, poi.raw_visit_count, poi.id
    )
}

/// Truncate toward zero for display.
pub fn whole(value: f64) -> u64 {
    value.trunc() as u64
}
