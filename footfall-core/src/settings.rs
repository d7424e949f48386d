use crate::error::ConfigError;
use crate::style::MarkerStyle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_POI_CSV: &str = "df_poi_raw_jan.csv";
pub const DEFAULT_VISITS_CSV: &str = "df_visits_cnty_geo.csv";
pub const CONFIG_FILE_NAME: &str = "footfall.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data: DataSettings,
    pub style: MarkerStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub pois: PathBuf,
    pub visits: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            pois: PathBuf::from(DEFAULT_POI_CSV),
            visits: PathBuf::from(DEFAULT_VISITS_CSV),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Replace the dataset paths with whichever overrides are given.
    pub fn with_overrides(mut self, pois: Option<&Path>, visits: Option<&Path>) -> Self {
        if let Some(pois) = pois {
            self.data.pois = pois.to_path_buf();
        }
        if let Some(visits) = visits {
            self.data.visits = visits.to_path_buf();
        }
        self
    }
}
