//! alpha-storage-json
//!
//! Filesystem-backed JSON persistence for the roster snapshot: atomic saves,
//! timestamped backups with retention, the last-selected-account state file,
//! and import/export of the plain account array.

use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use alpha_core::{CoreError, RosterBackupInfo, RosterStorage};
use alpha_domain::Roster;

const SNAPSHOT_FILE: &str = "accounts.json";
const STATE_FILE: &str = "state.json";
const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";
const BACKUP_STEM: &str = "accounts";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// Filesystem-backed JSON persistence for the account roster.
#[derive(Clone)]
pub struct JsonRosterStorage {
    data_dir: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonRosterStorage {
    pub fn new(data_dir: PathBuf, backups_dir: PathBuf) -> Result<Self, CoreError> {
        Self::with_retention(data_dir, backups_dir, DEFAULT_RETENTION)
    }

    pub fn with_retention(
        data_dir: PathBuf,
        backups_dir: PathBuf,
        retention: usize,
    ) -> Result<Self, CoreError> {
        fs::create_dir_all(&data_dir)?;
        fs::create_dir_all(&backups_dir)?;
        Ok(Self {
            data_dir,
            backups_dir,
            retention: retention.max(1),
        })
    }

    pub fn backups_dir(&self) -> &Path {
        &self.backups_dir
    }

    fn state_path(&self) -> PathBuf {
        self.data_dir.join(STATE_FILE)
    }

    fn read_state(&self) -> Result<StoreState, CoreError> {
        let path = self.state_path();
        if !path.exists() {
            return Ok(StoreState::default());
        }
        let data = fs::read_to_string(path)?;
        serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
    }

    fn write_backup_file(
        &self,
        roster: &Roster,
        note: Option<&str>,
    ) -> Result<RosterBackupInfo, CoreError> {
        fs::create_dir_all(&self.backups_dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut stem = format!("{}_{}", BACKUP_STEM, timestamp);
        if let Some(label) = sanitize_backup_note(note) {
            stem.push('_');
            stem.push_str(&label);
        }
        let file_name = format!("{}.{}", stem, BACKUP_EXTENSION);
        let path = self.backups_dir.join(&file_name);
        write_atomic(&path, &serialize_roster(roster)?)?;
        self.prune_backups()?;
        Ok(RosterBackupInfo {
            id: file_name,
            created_at: timestamp,
            path,
        })
    }

    fn backup_existing_file(&self, path: &Path) -> Result<(), CoreError> {
        if !path.exists() {
            return Ok(());
        }
        fs::create_dir_all(&self.backups_dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let file_name = format!("{}_{}.{}", BACKUP_STEM, timestamp, BACKUP_EXTENSION);
        fs::copy(path, self.backups_dir.join(file_name))?;
        self.prune_backups()?;
        Ok(())
    }

    fn prune_backups(&self) -> Result<(), CoreError> {
        let mut entries = self.list_backups()?;
        entries.sort_by_key(|info| Reverse(parse_backup_timestamp(&info.id)));
        for entry in entries.into_iter().skip(self.retention) {
            let _ = fs::remove_file(entry.path);
        }
        Ok(())
    }
}

impl RosterStorage for JsonRosterStorage {
    fn save_roster(&self, roster: &Roster) -> Result<(), CoreError> {
        let path = self.roster_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        if path.exists() {
            self.backup_existing_file(&path)?;
        }
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &serialize_roster(roster)?)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn load_roster(&self) -> Result<Roster, CoreError> {
        load_roster_from_path(&self.roster_path())
    }

    fn roster_path(&self) -> PathBuf {
        self.data_dir.join(SNAPSHOT_FILE)
    }

    fn last_account(&self) -> Result<Option<String>, CoreError> {
        Ok(self.read_state()?.last_account)
    }

    fn record_last_account(&self, id: Option<&str>) -> Result<(), CoreError> {
        let mut state = self.read_state()?;
        state.last_account = id.map(str::to_string);
        let data = serde_json::to_string_pretty(&state)
            .map_err(|err| CoreError::Serde(err.to_string()))?;
        write_atomic(&self.state_path(), &data)?;
        Ok(())
    }

    fn backup_roster(
        &self,
        roster: &Roster,
        note: Option<&str>,
    ) -> Result<RosterBackupInfo, CoreError> {
        self.write_backup_file(roster, note)
    }

    fn list_backups(&self) -> Result<Vec<RosterBackupInfo>, CoreError> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(RosterBackupInfo {
                    id: file_name.to_string(),
                    created_at: file_name.to_string(),
                    path: path.clone(),
                });
            }
        }
        entries.sort_by_key(|info| Reverse(parse_backup_timestamp(&info.id)));
        Ok(entries)
    }

    fn restore_backup(&self, backup: &RosterBackupInfo) -> Result<Roster, CoreError> {
        if !backup.path.exists() {
            return Err(CoreError::Storage(format!(
                "backup `{}` not found",
                backup.id
            )));
        }
        let target = self.roster_path();
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&backup.path, &target)?;
        load_roster_from_path(&target)
    }

    fn export_to_path(&self, roster: &Roster, path: &Path) -> Result<(), CoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = tmp_path(path);
        write_atomic(&tmp, &serialize_roster(roster)?)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    fn import_from_path(&self, path: &Path) -> Result<Roster, CoreError> {
        let data = fs::read_to_string(path)?;
        let payload: Value =
            serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))?;
        let accounts = validate_snapshot(payload)?;
        serde_json::from_value(Value::Array(accounts))
            .map_err(|err| CoreError::Serde(err.to_string()))
    }
}

/// Loads the roster snapshot from an arbitrary filesystem path.
pub fn load_roster_from_path(path: &Path) -> Result<Roster, CoreError> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
}

/// Checks an imported payload the way the original did: the top level must
/// be an array, and every element needs an id, a string name, and an array
/// `pointsHistory`. Numeric ids are normalized to strings.
fn validate_snapshot(payload: Value) -> Result<Vec<Value>, CoreError> {
    let items = match payload {
        Value::Array(items) => items,
        _ => {
            return Err(CoreError::Validation(
                "imported snapshot must be a JSON array of accounts".into(),
            ))
        }
    };

    let mut accounts = Vec::with_capacity(items.len());
    for (index, mut item) in items.into_iter().enumerate() {
        let entry = item.as_object_mut().ok_or_else(|| {
            CoreError::Validation(format!("imported account #{} is not an object", index))
        })?;

        let id_ok = match entry.get("id") {
            Some(Value::String(id)) => !id.is_empty(),
            Some(Value::Number(_)) => true,
            _ => false,
        };
        if !id_ok {
            return Err(CoreError::Validation(format!(
                "imported account #{} is missing an id",
                index
            )));
        }
        let numeric_id = match entry.get("id") {
            Some(Value::Number(id)) => Some(id.to_string()),
            _ => None,
        };
        if let Some(id) = numeric_id {
            entry.insert("id".into(), Value::String(id));
        }

        if !matches!(entry.get("name"), Some(Value::String(_))) {
            return Err(CoreError::Validation(format!(
                "imported account #{} is missing a name",
                index
            )));
        }
        if !matches!(entry.get("pointsHistory"), Some(Value::Array(_))) {
            return Err(CoreError::Validation(format!(
                "imported account #{} is missing a pointsHistory array",
                index
            )));
        }

        accounts.push(item);
    }
    Ok(accounts)
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreState {
    last_account: Option<String>,
}

fn sanitize_backup_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    if raw.is_empty() {
        return None;
    }
    let mut sanitized = String::new();
    let mut last_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if (ch.is_whitespace() || matches!(ch, '-' | '.'))
            && !sanitized.is_empty()
            && !last_dash
        {
            sanitized.push('-');
            last_dash = true;
        }
    }
    let trimmed = sanitized.trim_matches('-').to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let trimmed = name.strip_suffix(&format!(".{}", BACKUP_EXTENSION))?;
    let segments: Vec<&str> = trimmed.split('_').collect();
    if segments.len() < 3 {
        return None;
    }
    let date = segments.get(1)?;
    let time = segments.get(2)?;
    if !is_digits(date, 8) || !is_digits(time, 4) {
        return None;
    }
    let raw = format!("{}{}", date, time);
    NaiveDateTime::parse_from_str(&raw, "%Y%m%d%H%M")
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

fn serialize_roster(roster: &Roster) -> Result<String, CoreError> {
    serde_json::to_string_pretty(roster).map_err(|err| CoreError::Serde(err.to_string()))
}
