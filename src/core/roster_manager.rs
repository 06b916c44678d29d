use std::path::Path;

use chrono::NaiveDate;
use tracing::{info, warn};

use alpha_core::{
    roster_warnings, AccountService, AccountStatus, HistoryService, RosterBackupInfo,
    RosterStorage, SummaryService,
};
use alpha_domain::{Account, AccountSummary, Roster};

use crate::errors::PointsError;

/// Facade that coordinates roster state, the current account selection, and
/// persistence.
///
/// Invariants kept by every mutation path: the roster holds at least one
/// account, and `current_id` always refers to a roster entry.
pub struct RosterManager {
    roster: Roster,
    current_id: String,
    storage: Box<dyn RosterStorage>,
}

impl RosterManager {
    /// Loads the persisted snapshot, or creates the default single-account
    /// roster when none exists yet, and restores the last selection.
    pub fn open(storage: Box<dyn RosterStorage>) -> Result<Self, PointsError> {
        let roster = if storage.roster_path().exists() {
            let loaded = storage.load_roster()?;
            for warning in roster_warnings(&loaded) {
                warn!("snapshot warning: {warning}");
            }
            if loaded.is_empty() {
                warn!("snapshot holds no accounts, recreating the default account");
                Roster::with_default_account()
            } else {
                loaded
            }
        } else {
            info!("no snapshot found, creating the default account");
            Roster::with_default_account()
        };

        let current_id = storage
            .last_account()?
            .filter(|id| roster.account(id).is_some())
            .unwrap_or_else(|| first_id(&roster));

        let mut manager = Self {
            roster,
            current_id,
            storage,
        };
        manager.save()?;
        Ok(manager)
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn current_id(&self) -> &str {
        &self.current_id
    }

    pub fn current(&self) -> &Account {
        self.roster
            .account(&self.current_id)
            .expect("current account id always refers to a roster entry")
    }

    /// Switches the current account by id or case-insensitive name.
    pub fn select(&mut self, key: &str) -> Result<&Account, PointsError> {
        let id = AccountService::find(&self.roster, key)
            .map(|account| account.id.clone())
            .ok_or_else(|| PointsError::AccountNotFound(key.to_string()))?;
        self.current_id = id;
        self.storage.record_last_account(Some(&self.current_id))?;
        Ok(self.current())
    }

    /// Creates an account, makes it current, and persists.
    pub fn create_account(&mut self, name: &str) -> Result<String, PointsError> {
        let id = AccountService::create(&mut self.roster, name)?;
        self.current_id = id.clone();
        self.save()?;
        Ok(id)
    }

    /// Removes an account by id or name; reselects the first account when
    /// the current one goes away.
    pub fn remove_account(&mut self, key: &str) -> Result<(), PointsError> {
        let id = AccountService::find(&self.roster, key)
            .map(|account| account.id.clone())
            .ok_or_else(|| PointsError::AccountNotFound(key.to_string()))?;
        AccountService::remove(&mut self.roster, &id)?;
        if self.current_id == id {
            self.current_id = first_id(&self.roster);
        }
        self.save()
    }

    /// Stores raw target text for the current account; empty text clears it.
    pub fn set_target(&mut self, raw: &str) -> Result<(), PointsError> {
        let id = self.current_id.clone();
        AccountService::set_target(&mut self.roster, &id, raw)?;
        self.save()
    }

    /// Regenerates the current account's 15-day window ending at `today` so
    /// today's row always exists, then persists.
    pub fn ensure_today(
        &mut self,
        today: NaiveDate,
        start_date: NaiveDate,
    ) -> Result<(), PointsError> {
        let history = HistoryService::generate(&self.current().points_history, today, start_date);
        let id = self.current_id.clone();
        AccountService::set_history(&mut self.roster, &id, history)?;
        self.save()
    }

    /// Applies a single-day points edit to the current account.
    pub fn edit_day(&mut self, index: usize, points: i64) -> Result<(), PointsError> {
        let history = HistoryService::set_points(&self.current().points_history, index, points)?;
        let id = self.current_id.clone();
        AccountService::set_history(&mut self.roster, &id, history)?;
        self.save()
    }

    pub fn status(&self) -> AccountStatus {
        SummaryService::account_status(self.current())
    }

    pub fn overview(&self) -> Vec<AccountSummary> {
        SummaryService::roster_overview(&self.roster)
    }

    pub fn export(&self, path: &Path) -> Result<(), PointsError> {
        self.storage.export_to_path(&self.roster, path)?;
        Ok(())
    }

    /// Replaces the whole roster with an imported snapshot and selects its
    /// first account. Callers confirm with the user before invoking this.
    pub fn import(&mut self, path: &Path) -> Result<usize, PointsError> {
        let roster = self.storage.import_from_path(path)?;
        if roster.is_empty() {
            return Err(PointsError::InvalidInput(
                "imported snapshot holds no accounts".into(),
            ));
        }
        info!(accounts = roster.len(), "imported snapshot");
        self.roster = roster;
        self.current_id = first_id(&self.roster);
        self.save()?;
        Ok(self.roster.len())
    }

    pub fn backup(&self, note: Option<&str>) -> Result<RosterBackupInfo, PointsError> {
        Ok(self.storage.backup_roster(&self.roster, note)?)
    }

    pub fn list_backups(&self) -> Result<Vec<RosterBackupInfo>, PointsError> {
        Ok(self.storage.list_backups()?)
    }

    /// Replaces the snapshot with a backup and reloads from it.
    pub fn restore(&mut self, backup: &RosterBackupInfo) -> Result<(), PointsError> {
        let roster = self.storage.restore_backup(backup)?;
        self.roster = if roster.is_empty() {
            Roster::with_default_account()
        } else {
            roster
        };
        self.current_id = first_id(&self.roster);
        self.save()
    }

    fn save(&mut self) -> Result<(), PointsError> {
        self.storage.save_roster(&self.roster)?;
        self.storage.record_last_account(Some(&self.current_id))?;
        Ok(())
    }
}

fn first_id(roster: &Roster) -> String {
    roster
        .first()
        .expect("roster holds at least one account")
        .id
        .clone()
}
