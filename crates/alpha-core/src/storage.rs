use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use alpha_domain::Roster;

use crate::{error::CoreError, projection::ProjectionEngine};

/// Describes a persisted backup artifact for the roster snapshot.
#[derive(Debug, Clone)]
pub struct RosterBackupInfo {
    pub id: String,
    pub created_at: String,
    pub path: PathBuf,
}

/// Abstraction over persistence backends capable of storing the roster
/// snapshot, its backups, and the last-selected-account state.
pub trait RosterStorage: Send + Sync {
    fn save_roster(&self, roster: &Roster) -> Result<(), CoreError>;
    fn load_roster(&self) -> Result<Roster, CoreError>;
    fn roster_path(&self) -> PathBuf;
    fn last_account(&self) -> Result<Option<String>, CoreError>;
    fn record_last_account(&self, id: Option<&str>) -> Result<(), CoreError>;
    fn backup_roster(
        &self,
        roster: &Roster,
        note: Option<&str>,
    ) -> Result<RosterBackupInfo, CoreError>;
    fn list_backups(&self) -> Result<Vec<RosterBackupInfo>, CoreError>;
    fn restore_backup(&self, backup: &RosterBackupInfo) -> Result<Roster, CoreError>;
    fn export_to_path(&self, roster: &Roster, path: &Path) -> Result<(), CoreError>;
    fn import_from_path(&self, path: &Path) -> Result<Roster, CoreError>;
}

/// Detects anomalies within a roster snapshot.
///
/// Warnings are advisory: a loaded snapshot is still usable, but duplicate
/// ids break selection, duplicate dates break regeneration, and stale
/// cumulative sums mean the snapshot was written by hand or by an older
/// build.
pub fn roster_warnings(roster: &Roster) -> Vec<String> {
    let mut warnings = Vec::new();

    let mut seen_ids = HashSet::new();
    for account in &roster.accounts {
        if !seen_ids.insert(account.id.as_str()) {
            warnings.push(format!("duplicate account id {}", account.id));
        }

        let mut seen_dates = HashSet::new();
        for day in &account.points_history {
            if !seen_dates.insert(day.date.as_str()) {
                warnings.push(format!(
                    "account `{}` has duplicate history date {}",
                    account.name, day.date
                ));
            }
        }

        let (recomputed, _) = ProjectionEngine::compute_totals(&account.points_history);
        if recomputed != account.points_history {
            warnings.push(format!(
                "account `{}` has stale cumulative sums",
                account.name
            ));
        }
    }

    warnings
}
