//! Farm profile persistence
//!
//! The dashboard is keyed by the farm location captured at signup. It is
//! stored through the `ProfileStore` port so callers never touch the
//! filesystem directly.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

/// Coordinates of the farm plot in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FarmLocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// What is kept about an account after signup. The password never is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub location: FarmLocation,
    pub created_at: DateTime<Utc>,
}

/// Persistence port for the farm profile
#[cfg_attr(test, mockall::automock)]
pub trait ProfileStore: Send + Sync {
    /// Load the saved profile, if any
    fn load(&self) -> Result<Option<FarmProfile>>;

    /// Replace the saved profile
    fn save(&self, profile: &FarmProfile) -> Result<()>;
}

/// Stores the profile as JSON in the platform data directory
pub struct FileProfileStore {
    path: Option<PathBuf>,
}

impl FileProfileStore {
    pub fn new() -> Self {
        let path = ProjectDirs::from("com", "hydrogrow", "crop-compass-tui")
            .map(|dirs| dirs.data_dir().join("profile.json"));
        Self { path }
    }

    /// Store at an explicit path
    #[allow(dead_code)]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }
}

impl Default for FileProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileStore for FileProfileStore {
    fn load(&self) -> Result<Option<FarmProfile>> {
        let Some(path) = &self.path else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading profile from {}", path.display()))?;
        let profile = serde_json::from_str(&content)
            .with_context(|| format!("parsing profile at {}", path.display()))?;
        Ok(Some(profile))
    }

    fn save(&self, profile: &FarmProfile) -> Result<()> {
        let path = self
            .path
            .as_ref()
            .context("no data directory available for this platform")?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(profile)?;
        fs::write(path, content)
            .with_context(|| format!("writing profile to {}", path.display()))?;
        tracing::info!(path = %path.display(), "saved farm profile");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_profile() -> FarmProfile {
        FarmProfile {
            id: Uuid::new_v4(),
            username: "validuser".to_string(),
            email: "user@example.com".to_string(),
            location: FarmLocation {
                latitude: 30.04,
                longitude: 31.23,
            },
            created_at: Utc::now(),
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("crop-compass-tui-test-{}", Uuid::new_v4()))
            .join(name)
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let store = FileProfileStore::at(temp_path("profile.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("profile.json");
        let store = FileProfileStore::at(&path);
        let profile = sample_profile();

        store.save(&profile).unwrap();
        let loaded = store.load().unwrap().expect("profile saved");
        assert_eq!(loaded, profile);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_saved_json_has_no_password() {
        let path = temp_path("profile.json");
        let store = FileProfileStore::at(&path);
        store.save(&sample_profile()).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("password"));
        assert!(raw.contains("\"latitude\": 30.04"));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = temp_path("profile.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let store = FileProfileStore::at(&path);
        assert!(store.load().is_err());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
