use crate::error::{DataLoadError, Result};
use crate::model::{PoiId, PointOfInterest, VisitorOriginRecord};
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

/// Visitor-origin records grouped by POI identifier.
///
/// Built once at startup and never mutated afterwards. A POI without any
/// origin record has no entry at all; [`PoiIndex::lookup`] hides that
/// distinction by returning an empty slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoiIndex {
    groups: HashMap<PoiId, Vec<VisitorOriginRecord>>,
    total_records: usize,
}

impl PoiIndex {
    /// Group `records` by canonical POI id, keeping input order within each group.
    pub fn build(pois: &[PointOfInterest], records: Vec<VisitorOriginRecord>) -> Result<Self> {
        let mut seen = HashSet::new();
        for (i, poi) in pois.iter().enumerate() {
            let id = PoiId::canonical(poi.id.as_str());
            if id.is_empty() {
                return Err(DataLoadError::MissingField {
                    table: "POI",
                    row: i + 1,
                    column: "placekey",
                });
            }
            if !seen.insert(id) {
                warn!("Duplicate placekey '{}' in POI table (row {})", poi.id, i + 1);
            }
        }

        let total_records = records.len();
        let mut groups: HashMap<PoiId, Vec<VisitorOriginRecord>> = HashMap::new();

        for (i, mut record) in records.into_iter().enumerate() {
            record.poi_id = PoiId::canonical(record.poi_id.as_str());
            if record.poi_id.is_empty() {
                return Err(DataLoadError::MissingField {
                    table: "visitor-origin",
                    row: i + 1,
                    column: "placekey",
                });
            }
            groups.entry(record.poi_id.clone()).or_default().push(record);
        }

        let orphans = groups.keys().filter(|id| !seen.contains(*id)).count();
        if orphans > 0 {
            warn!("{} placekeys have origin records but no POI row", orphans);
        }

        info!(
            "Indexed {} origin records across {} POIs ({} POIs loaded)",
            total_records,
            groups.len(),
            pois.len()
        );

        Ok(Self {
            groups,
            total_records,
        })
    }

    pub fn lookup(&self, id: &PoiId) -> &[VisitorOriginRecord] {
        self.groups.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, id: &PoiId) -> bool {
        self.groups.contains_key(id)
    }

    /// Number of POIs with at least one origin record.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn total_records(&self) -> usize {
        self.total_records
    }

    /// Groups ordered by POI id.
    pub fn iter(&self) -> impl Iterator<Item = (&PoiId, &[VisitorOriginRecord])> {
        let mut ids: Vec<&PoiId> = self.groups.keys().collect();
        ids.sort();
        ids.into_iter().map(move |id| (id, self.lookup(id)))
    }

    /// Indexed ids that do not appear in `pois`, sorted.
    pub fn orphans(&self, pois: &[PointOfInterest]) -> Vec<PoiId> {
        let known: HashSet<&PoiId> = pois.iter().map(|p| &p.id).collect();
        let mut orphans: Vec<PoiId> = self
            .groups
            .keys()
            .filter(|id| !known.contains(id))
            .cloned()
            .collect();
        orphans.sort();
        orphans
    }
}
