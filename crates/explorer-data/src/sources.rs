//! City-to-CSV source mapping.
//!
//! The mapping is an explicit immutable value built from the configured data
//! directory and passed into the loader, rather than process-wide state.

use std::path::{Path, PathBuf};

use explorer_core::error::{ExplorerError, Result};
use explorer_core::models::City;

/// File name of each city's export within the data directory.
pub fn file_name(city: City) -> &'static str {
    match city {
        City::Chicago => "chicago.csv",
        City::NewYorkCity => "new_york_city.csv",
        City::Washington => "washington.csv",
    }
}

/// Immutable lookup table resolving each supported city to its CSV path.
#[derive(Debug, Clone)]
pub struct CitySources {
    data_dir: PathBuf,
}

impl CitySources {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The path a city's export would live at, whether or not it exists.
    pub fn path_for(&self, city: City) -> PathBuf {
        self.data_dir.join(file_name(city))
    }

    /// Resolve a city to an existing file, or fail with
    /// [`ExplorerError::DataFileNotFound`].
    pub fn resolve(&self, city: City) -> Result<PathBuf> {
        let path = self.path_for(city);
        if path.is_file() {
            Ok(path)
        } else {
            Err(ExplorerError::DataFileNotFound(path))
        }
    }
}
