use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use outreach_core::UserSettings;
use outreach_logging::{outreach_info, outreach_warn, redact};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

const SETTINGS_FILENAME: &str = "settings.ron";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("settings directory missing or not writable: {0}")]
    SettingsDir(String),
    #[error("could not encode settings: {0}")]
    Encode(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedSettings {
    resume: String,
    api_key: String,
    /// Epoch millis of the last save.
    #[serde(default)]
    timestamp: Option<i64>,
}

/// The one persisted record: resume text, API key and when they were saved.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    dir: PathBuf,
}

impl SettingsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILENAME)
    }

    /// Reads the record; anything unreadable counts as "no settings".
    pub fn load(&self) -> Option<UserSettings> {
        self.load_record().map(|record| UserSettings {
            resume: record.resume,
            api_key: record.api_key,
        })
    }

    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        let millis = self.load_record()?.timestamp?;
        Utc.timestamp_millis_opt(millis).single()
    }

    fn load_record(&self) -> Option<PersistedSettings> {
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
            Err(err) => {
                outreach_warn!("Failed to read settings from {:?}: {}", path, err);
                return None;
            }
        };

        match ron::from_str::<PersistedSettings>(&content) {
            Ok(record) => Some(record),
            Err(err) => {
                outreach_warn!("Failed to parse settings from {:?}: {}", path, err);
                None
            }
        }
    }

    /// Writes the record atomically, stamping it with the current time.
    pub fn save(&self, settings: &UserSettings) -> Result<(), PersistError> {
        ensure_settings_dir(&self.dir)?;

        let record = PersistedSettings {
            resume: settings.resume.clone(),
            api_key: settings.api_key.clone(),
            timestamp: Some(Utc::now().timestamp_millis()),
        };
        let content = ron::ser::to_string_pretty(&record, ron::ser::PrettyConfig::new())
            .map_err(|err| PersistError::Encode(err.to_string()))?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(self.path()).map_err(|err| PersistError::Io(err.error))?;

        outreach_info!(
            "Saved settings to {:?} resume_len={} key={}",
            self.path(),
            settings.resume.len(),
            redact(&settings.api_key)
        );
        Ok(())
    }

    /// Erases the record. Clearing twice is not an error.
    pub fn clear(&self) -> Result<(), PersistError> {
        match fs::remove_file(self.path()) {
            Ok(()) => {
                outreach_info!("Cleared settings at {:?}", self.path());
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

fn ensure_settings_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::SettingsDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::SettingsDir("path is not a directory".into()));
        }
        Ok(())
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::SettingsDir(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> UserSettings {
        UserSettings {
            resume: "Ten years of Rust.\nLine two with \"quotes\".".to_string(),
            api_key: "sk-test-0123456789abcdef".to_string(),
        }
    }

    #[test]
    fn missing_file_means_no_settings() {
        let temp = TempDir::new().unwrap();
        let store = SettingsStore::new(temp.path());
        assert!(store.load().is_none());
        assert!(store.saved_at().is_none());
    }

    #[test]
    fn save_then_load_keeps_secrets_and_stamps_time() {
        let temp = TempDir::new().unwrap();
        let store = SettingsStore::new(temp.path().join("nested"));
        let before = Utc::now().timestamp_millis();

        store.save(&sample()).unwrap();

        assert_eq!(store.load(), Some(sample()));
        let saved_at = store.saved_at().expect("timestamp").timestamp_millis();
        assert!(saved_at >= before);
    }

    #[test]
    fn save_replaces_previous_record() {
        let temp = TempDir::new().unwrap();
        let store = SettingsStore::new(temp.path());
        store.save(&sample()).unwrap();

        let updated = UserSettings {
            resume: "New resume".to_string(),
            ..sample()
        };
        store.save(&updated).unwrap();
        assert_eq!(store.load(), Some(updated));
    }

    #[test]
    fn clear_removes_record_and_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let store = SettingsStore::new(temp.path());
        store.save(&sample()).unwrap();

        store.clear().unwrap();
        assert!(!store.path().exists());
        assert!(store.load().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_record_is_ignored() {
        let temp = TempDir::new().unwrap();
        let store = SettingsStore::new(temp.path());
        fs::write(store.path(), "this is not ron (").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn record_without_timestamp_still_loads() {
        let temp = TempDir::new().unwrap();
        let store = SettingsStore::new(temp.path());
        fs::write(
            store.path(),
            r#"(resume: "cv", api_key: "sk-test-0123456789abcdef")"#,
        )
        .unwrap();
        assert!(store.load().is_some());
        assert!(store.saved_at().is_none());
    }

    #[test]
    fn file_in_place_of_directory_is_rejected() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "x").unwrap();
        let store = SettingsStore::new(&blocker);
        assert!(matches!(
            store.save(&sample()),
            Err(PersistError::SettingsDir(_))
        ));
    }
}
