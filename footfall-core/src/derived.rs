use crate::index::PoiIndex;
use crate::model::{GeoPoint, PointOfInterest, VisitorOriginRecord};
use crate::selection::SelectionState;
use crate::style::MarkerStyle;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountyMarker {
    pub county_code: String,
    pub county_name: String,
    pub position: GeoPoint,
    pub visits: f64,
    pub size: f64,
    pub opacity: f64,
}

/// Visual attributes for one selection state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DerivedView {
    /// One entry per POI, in POI collection order.
    pub poi_opacity: Vec<f64>,
    pub county_markers: Vec<CountyMarker>,
    /// Set when a POI is selected but the index holds no origin records for it.
    pub no_data: bool,
}

pub fn compute(index: &PoiIndex, pois: &[PointOfInterest], selection: &SelectionState) -> DerivedView {
    compute_with(index, pois, selection, &MarkerStyle::default())
}

pub fn compute_with(
    index: &PoiIndex,
    pois: &[PointOfInterest],
    selection: &SelectionState,
    style: &MarkerStyle,
) -> DerivedView {
    let poi_opacity = poi_opacities(pois, selection, style);

    match selection.selected_id() {
        None => DerivedView {
            poi_opacity,
            county_markers: Vec::new(),
            no_data: false,
        },
        Some(id) => {
            let records = index.lookup(id);
            DerivedView {
                poi_opacity,
                county_markers: county_markers(records, style),
                no_data: records.is_empty(),
            }
        }
    }
}

pub fn poi_opacities(pois: &[PointOfInterest], selection: &SelectionState, style: &MarkerStyle) -> Vec<f64> {
    match selection.selected_id() {
        None => vec![style.selected_poi_opacity; pois.len()],
        Some(_) => pois
            .iter()
            .map(|poi| {
                if selection.is_selected(&poi.id) {
                    style.selected_poi_opacity
                } else {
                    style.dimmed_poi_opacity
                }
            })
            .collect(),
    }
}

/// Size county markers relative to the busiest county of the group.
pub fn county_markers(records: &[VisitorOriginRecord], style: &MarkerStyle) -> Vec<CountyMarker> {
    let max_visits = records
        .iter()
        .map(|r| r.visits)
        .fold(f64::NEG_INFINITY, f64::max);

    records
        .iter()
        .map(|r| CountyMarker {
            county_code: r.county_code.clone(),
            county_name: r.county_name.clone(),
            position: r.centroid,
            visits: r.visits,
            size: style.county_size(r.visits, max_visits),
            opacity: style.county_opacity,
        })
        .collect()
}
