//! Calibration persistence in a small JSON file
//!
//! ```json
//! { "factor": 0.962 }
//! ```
//!
//! Writes go to a sibling temporary file first and are renamed into place,
//! so a crash mid-write leaves the previous factor readable.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use weathercaster_core::CalibrationStore;

use crate::ConnectorError;

#[derive(Debug, Serialize, Deserialize)]
struct StoredCalibration {
    factor: f64,
}

/// Calibration store backed by one JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "calibration".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl CalibrationStore for JsonFileStore {
    type Error = ConnectorError;

    fn load(&self) -> Result<Option<f64>, ConnectorError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let stored: StoredCalibration = serde_json::from_str(&text)
            .map_err(|err| ConnectorError::Parse(format!("{}: {}", self.path.display(), err)))?;
        if !stored.factor.is_finite() || stored.factor <= 0.0 {
            return Err(ConnectorError::Parse(format!(
                "{}: implausible factor {}",
                self.path.display(),
                stored.factor
            )));
        }
        Ok(Some(stored.factor))
    }

    fn save(&self, factor: f64) -> Result<(), ConnectorError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let body = serde_json::to_string(&StoredCalibration { factor })
            .map_err(|err| ConnectorError::Parse(err.to_string()))?;
        let temp = self.temp_path();
        fs::write(&temp, body)?;
        fs::rename(&temp, &self.path)?;
        log::debug!("Calibration factor {:.4} saved to {}", factor, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("calibration.json"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("state").join("calibration.json"));
        store.save(0.9375).unwrap();
        assert_eq!(store.load().unwrap(), Some(0.9375));
        assert!(!store.temp_path().exists());

        store.save(1.05).unwrap();
        assert_eq!(store.load().unwrap(), Some(1.05));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("calibration.json");
        fs::write(&path, "{\"factor\": ").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(ConnectorError::Parse(_))));

        fs::write(&path, "{\"factor\": -1.0}").unwrap();
        assert!(store.load().is_err());
    }
}
