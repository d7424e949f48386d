use crate::error::{LoadError, Result};
use crate::rows::{POI_COLUMNS, PoiRow, VISIT_COLUMNS, VisitRow};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

pub struct DatasetReader {
    delimiter: u8,
    trim: bool,
}

impl Default for DatasetReader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetReader {
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Whitespace-only cells count as empty when trimming is on.
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn read_pois(&self, path: &Path) -> Result<Vec<PoiRow>> {
        info!("Reading POI table from {}", path.display());
        let file = open(path)?;
        self.read_pois_from_reader(file)
    }

    pub fn read_visits(&self, path: &Path) -> Result<Vec<VisitRow>> {
        info!("Reading visitor-origin table from {}", path.display());
        let file = open(path)?;
        self.read_visits_from_reader(file)
    }

    pub fn read_pois_from_reader<R: Read>(&self, reader: R) -> Result<Vec<PoiRow>> {
        self.read_table(reader, "POI", &POI_COLUMNS)
    }

    pub fn read_visits_from_reader<R: Read>(&self, reader: R) -> Result<Vec<VisitRow>> {
        self.read_table(reader, "visitor-origin", &VISIT_COLUMNS)
    }

    fn read_table<R, T>(&self, reader: R, table: &'static str, required: &[&'static str]) -> Result<Vec<T>>
    where
        R: Read,
        T: DeserializeOwned,
    {
        let mut rdr = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        check_columns(&headers, table, required)?;

        let mut rows = Vec::new();
        for result in rdr.deserialize() {
            let row: T = result?;
            rows.push(row);
        }

        debug!("Read {} rows from {} table", rows.len(), table);
        Ok(rows)
    }
}

/// Read the POI table with default reader settings.
pub fn read_pois(path: &Path) -> Result<Vec<PoiRow>> {
    DatasetReader::new().read_pois(path)
}

/// Read the visitor-origin table with default reader settings.
pub fn read_visits(path: &Path) -> Result<Vec<VisitRow>> {
    DatasetReader::new().read_visits(path)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn check_columns(headers: &StringRecord, table: &'static str, required: &[&'static str]) -> Result<()> {
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(LoadError::MissingColumn { table, column });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_columns_reports_first_missing() {
        let headers = StringRecord::from(vec!["placekey", "county", "lat", "lon", "visits"]);
        let err = check_columns(&headers, "visitor-origin", &VISIT_COLUMNS).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingColumn {
                table: "visitor-origin",
                column: "NAME"
            }
        ));
    }

    #[test]
    fn test_check_columns_ignores_extra_columns() {
        let headers = StringRecord::from(vec![
            "placekey",
            "brand",
            "location_name",
            "latitude",
            "longitude",
            "raw_visit_counts",
        ]);
        assert!(check_columns(&headers, "POI", &POI_COLUMNS).is_ok());
    }
}
