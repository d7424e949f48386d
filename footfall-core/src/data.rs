use crate::error::{DataLoadError, Result};
use crate::index::PoiIndex;
use crate::model::{GeoPoint, PoiId, PointOfInterest, VisitorOriginRecord};
use crate::settings::DataSettings;
use footfall_loader::{DatasetReader, PoiRow, VisitRow};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

const POI_TABLE: &str = "POI";
const VISIT_TABLE: &str = "visitor-origin";

/// Read-only startup state: the POI collection and the origin index built from it.
///
/// Cloning is cheap; all clones share the same data.
#[derive(Debug, Clone)]
pub struct Dataset {
    pois: Arc<[PointOfInterest]>,
    index: Arc<PoiIndex>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStats {
    pub poi_count: usize,
    pub indexed_pois: usize,
    pub record_count: usize,
    pub pois_without_data: usize,
    pub orphan_ids: Vec<PoiId>,
}

impl Dataset {
    pub fn new(pois: Vec<PointOfInterest>, records: Vec<VisitorOriginRecord>) -> Result<Self> {
        let index = PoiIndex::build(&pois, records)?;
        Ok(Self {
            pois: pois.into(),
            index: Arc::new(index),
        })
    }

    pub fn from_rows(poi_rows: &[PoiRow], visit_rows: &[VisitRow]) -> Result<Self> {
        let pois = parse_pois(poi_rows)?;
        let records = parse_visits(visit_rows)?;
        Self::new(pois, records)
    }

    /// Read both tables from disk and build the index. Any failure is fatal.
    pub fn load(settings: &DataSettings) -> Result<Self> {
        let reader = DatasetReader::new();
        let poi_rows = reader.read_pois(&settings.pois)?;
        let visit_rows = reader.read_visits(&settings.visits)?;
        info!(
            "Loaded {} POI rows and {} origin rows",
            poi_rows.len(),
            visit_rows.len()
        );
        Self::from_rows(&poi_rows, &visit_rows)
    }

    pub fn pois(&self) -> &[PointOfInterest] {
        &self.pois
    }

    pub fn index(&self) -> &PoiIndex {
        &self.index
    }

    pub fn stats(&self) -> DatasetStats {
        let pois_without_data = self
            .pois
            .iter()
            .filter(|poi| !self.index.contains(&poi.id))
            .count();

        DatasetStats {
            poi_count: self.pois.len(),
            indexed_pois: self.index.len(),
            record_count: self.index.total_records(),
            pois_without_data,
            orphan_ids: self.index.orphans(&self.pois),
        }
    }
}

pub fn parse_pois(rows: &[PoiRow]) -> Result<Vec<PointOfInterest>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| parse_poi(row, i + 1))
        .collect()
}

pub fn parse_visits(rows: &[VisitRow]) -> Result<Vec<VisitorOriginRecord>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| parse_visit(row, i + 1))
        .collect()
}

fn parse_poi(row: &PoiRow, line: usize) -> Result<PointOfInterest> {
    let field = Field::new(POI_TABLE, line);

    let id = field.required(&row.placekey, "placekey")?;
    let name = field.required(&row.location_name, "location_name")?;
    let lat = field.coordinate(&row.latitude, "latitude")?;
    let lon = field.coordinate(&row.longitude, "longitude")?;
    let raw_visit_count = field.count(&row.raw_visit_counts, "raw_visit_counts")?;

    Ok(PointOfInterest {
        id: PoiId::canonical(id),
        name: name.to_string(),
        location: GeoPoint::new(lat, lon),
        raw_visit_count,
    })
}

fn parse_visit(row: &VisitRow, line: usize) -> Result<VisitorOriginRecord> {
    let field = Field::new(VISIT_TABLE, line);

    let poi_id = field.required(&row.placekey, "placekey")?;
    let county_code = field.required(&row.county, "county")?;
    let county_name = field.required(&row.name, "NAME")?;
    let lat = field.coordinate(&row.lat, "lat")?;
    let lon = field.coordinate(&row.lon, "lon")?;
    let visits = field.visits(&row.visits, "visits")?;

    Ok(VisitorOriginRecord {
        poi_id: PoiId::canonical(poi_id),
        county_code: county_code.to_string(),
        county_name: county_name.to_string(),
        centroid: GeoPoint::new(lat, lon),
        visits,
    })
}

/// Location of a cell being validated, for error reporting.
struct Field {
    table: &'static str,
    row: usize,
}

impl Field {
    fn new(table: &'static str, row: usize) -> Self {
        Self { table, row }
    }

    fn required<'a>(&self, value: &'a Option<String>, column: &'static str) -> Result<&'a str> {
        match value.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => Ok(v),
            _ => Err(DataLoadError::MissingField {
                table: self.table,
                row: self.row,
                column,
            }),
        }
    }

    fn number(&self, value: &Option<String>, column: &'static str) -> Result<f64> {
        let text = self.required(value, column)?;
        match text.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(n),
            _ => Err(self.invalid(text, column)),
        }
    }

    fn coordinate(&self, value: &Option<String>, column: &'static str) -> Result<f64> {
        self.number(value, column)
    }

    fn visits(&self, value: &Option<String>, column: &'static str) -> Result<f64> {
        let n = self.number(value, column)?;
        if n < 0.0 {
            return Err(self.negative(value, column));
        }
        Ok(n)
    }

    /// Whole, non-negative count. Integral decimal text such as `12.0` is accepted.
    fn count(&self, value: &Option<String>, column: &'static str) -> Result<u64> {
        let text = self.required(value, column)?;
        if let Ok(n) = text.parse::<u64>() {
            return Ok(n);
        }
        let n = self.number(value, column)?;
        if n < 0.0 {
            return Err(self.negative(value, column));
        }
        // u64::MAX rounds up to 2^64 as f64, so the bound is exclusive
        if n.fract() != 0.0 || n >= u64::MAX as f64 {
            return Err(self.invalid(text, column));
        }
        Ok(n as u64)
    }

    fn invalid(&self, text: &str, column: &'static str) -> DataLoadError {
        DataLoadError::InvalidNumber {
            table: self.table,
            row: self.row,
            column,
            value: text.to_string(),
        }
    }

    fn negative(&self, value: &Option<String>, column: &'static str) -> DataLoadError {
        DataLoadError::NegativeCount {
            table: self.table,
            row: self.row,
            column,
            value: value.as_deref().unwrap_or_default().trim().to_string(),
        }
    }
}
