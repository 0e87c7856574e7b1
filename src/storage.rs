use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::Local;
use directories::ProjectDirs;
use log::{debug, warn};

use crate::{
    constants::{APP_NAME, FILE_NAMES, STORAGE_SETTINGS},
    date_math::DayKey,
    domain::{HabitRecord, Status},
    error::Result,
};

/// The single file slot holding the habit record.
#[derive(Clone, Debug)]
pub struct HabitStore {
    path: PathBuf,
}

impl HabitStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HabitStore { path: path.into() }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(FILE_NAMES.record))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the record. Missing, unreadable or corrupt data yields an empty
    /// record; the problem is only logged.
    pub fn load(&self) -> HabitRecord {
        if !self.path.exists() {
            debug!("No record at {}, starting empty", self.path.display());
            return HabitRecord::new();
        }

        match fs::read_to_string(&self.path) {
            Ok(content) => decode(&content),
            Err(e) => {
                warn!("Could not read {}: {}", self.path.display(), e);
                HabitRecord::new()
            }
        }
    }

    pub fn save(&self, record: &HabitRecord) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = encode(record)?;
        atomic_write(&self.path, &json)?;
        debug!("Saved {} entries to {}", record.len(), self.path.display());
        Ok(())
    }
}

pub fn encode(record: &HabitRecord) -> Result<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// Lenient decoding: unparsable input gives an empty record, and single
/// entries with a bad key or status token are skipped.
pub fn decode(content: &str) -> HabitRecord {
    if content.trim().is_empty() {
        return HabitRecord::new();
    }

    let raw: BTreeMap<String, serde_json::Value> = match serde_json::from_str(content) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Ignoring unreadable habit record: {}", e);
            return HabitRecord::new();
        }
    };

    raw.into_iter()
        .filter_map(|(raw_key, raw_status)| {
            let key = match raw_key.parse::<DayKey>() {
                Ok(key) => key,
                Err(e) => {
                    warn!("Skipping entry: {}", e);
                    return None;
                }
            };
            let Some(status) = raw_status.as_str().and_then(Status::from_token) else {
                warn!("Skipping entry {}: unknown status {}", raw_key, raw_status);
                return None;
            };
            Some((key, status))
        })
        .collect()
}

pub fn get_data_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        fs::create_dir_all(dir).ok();
        return dir.to_path_buf();
    }

    if Path::new(".").join(FILE_NAMES.record).exists() {
        return PathBuf::from(".");
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", APP_NAME, APP_NAME) {
        let data_dir = proj_dirs.data_dir().to_path_buf();
        fs::create_dir_all(&data_dir).ok();
        data_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_state_dir() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", APP_NAME, APP_NAME) {
        let dir = proj_dirs
            .state_dir()
            .unwrap_or_else(|| proj_dirs.cache_dir())
            .to_path_buf();
        fs::create_dir_all(&dir).ok();
        return dir;
    }
    PathBuf::from(".")
}

pub fn write_text_file(path: &Path, content: &str) -> Result<()> {
    atomic_write(path, content)
}

pub fn create_backup(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    let backup_dir = path
        .parent()
        .unwrap_or(Path::new("."))
        .join(FILE_NAMES.backups_dir);
    fs::create_dir_all(&backup_dir)?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let filename = format!(
        "{}.{}",
        path.file_name().unwrap_or_default().to_string_lossy(),
        timestamp
    );
    fs::copy(path, backup_dir.join(&filename))?;

    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    if let Ok(entries) = fs::read_dir(&backup_dir) {
        let mut backups: Vec<_> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(&*stem))
            .collect();
        backups.sort_by_key(|e| e.metadata().ok().and_then(|m| m.modified().ok()));

        let excess = backups.len().saturating_sub(STORAGE_SETTINGS.max_backups);
        for oldest in backups.iter().take(excess) {
            if let Err(e) = fs::remove_file(oldest.path()) {
                warn!("Could not prune backup {}: {}", oldest.path().display(), e);
            }
        }
    }

    Ok(())
}

pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        create_backup(path)?;
    }

    let tmp_path = path.with_extension("tmp");
    let mut tmp_file = File::create(&tmp_path)?;
    tmp_file.write_all(content.as_bytes())?;
    tmp_file.sync_all()?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
