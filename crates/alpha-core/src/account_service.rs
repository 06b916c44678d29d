//! Business logic helpers for validated roster mutations.

use alpha_domain::{Account, DailyEntry, Roster, Target};

use crate::error::CoreError;

/// Provides validated mutations for [`Account`] entities within a roster.
pub struct AccountService;

impl AccountService {
    /// Adds a new account after validating its name, returning the new id.
    pub fn create(roster: &mut Roster, name: &str) -> Result<String, CoreError> {
        let name = Self::validate_name(roster, None, name)?;
        let account = Account::new(name);
        let id = account.id.clone();
        roster.accounts.push(account);
        Ok(id)
    }

    /// Renames an existing account, keeping names unique.
    pub fn rename(roster: &mut Roster, id: &str, name: &str) -> Result<(), CoreError> {
        let name = Self::validate_name(roster, Some(id), name)?;
        let account = roster
            .account_mut(id)
            .ok_or_else(|| CoreError::AccountNotFound(id.to_string()))?;
        account.name = name;
        Ok(())
    }

    /// Removes an account. The last remaining account cannot be removed so
    /// the roster always has a current account to show.
    pub fn remove(roster: &mut Roster, id: &str) -> Result<(), CoreError> {
        if roster.len() <= 1 {
            return Err(CoreError::InvalidOperation(
                "at least one account must remain".into(),
            ));
        }
        let before = roster.len();
        roster.accounts.retain(|account| account.id != id);
        if roster.len() == before {
            return Err(CoreError::AccountNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Stores raw target text for the account; empty text clears the target.
    pub fn set_target(roster: &mut Roster, id: &str, raw: &str) -> Result<(), CoreError> {
        let account = roster
            .account_mut(id)
            .ok_or_else(|| CoreError::AccountNotFound(id.to_string()))?;
        account.target_points = Target::from_raw(raw.trim());
        Ok(())
    }

    /// Replaces an account's history wholesale (already annotated upstream).
    pub fn set_history(
        roster: &mut Roster,
        id: &str,
        history: Vec<DailyEntry>,
    ) -> Result<(), CoreError> {
        let account = roster
            .account_mut(id)
            .ok_or_else(|| CoreError::AccountNotFound(id.to_string()))?;
        account.points_history = history;
        Ok(())
    }

    /// Finds an account by exact id or case-insensitive name.
    pub fn find<'a>(roster: &'a Roster, key: &str) -> Option<&'a Account> {
        roster.account(key).or_else(|| {
            let needle = key.trim().to_lowercase();
            roster
                .accounts
                .iter()
                .find(|account| account.name.trim().to_lowercase() == needle)
        })
    }

    fn validate_name(
        roster: &Roster,
        exclude: Option<&str>,
        candidate: &str,
    ) -> Result<String, CoreError> {
        let trimmed = candidate.trim();
        if trimmed.is_empty() {
            return Err(CoreError::Validation("account name is empty".into()));
        }
        let normalized = trimmed.to_lowercase();
        let duplicate = roster.accounts.iter().any(|account| {
            account.name.trim().to_lowercase() == normalized && exclude != Some(account.id.as_str())
        });
        if duplicate {
            return Err(CoreError::Validation(format!(
                "account `{}` already exists",
                trimmed
            )));
        }
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_empty_and_duplicate_names() {
        let mut roster = Roster::with_default_account();
        assert!(matches!(
            AccountService::create(&mut roster, "  "),
            Err(CoreError::Validation(_))
        ));
        AccountService::create(&mut roster, "Main").expect("first add succeeds");
        let err = AccountService::create(&mut roster, " main ").expect_err("duplicate must fail");
        assert!(
            matches!(err, CoreError::Validation(ref message) if message.contains("already exists")),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn remove_refuses_to_drop_the_last_account() {
        let mut roster = Roster::with_default_account();
        let id = roster.accounts[0].id.clone();
        let err = AccountService::remove(&mut roster, &id).expect_err("last account stays");
        assert!(matches!(err, CoreError::InvalidOperation(_)));

        AccountService::create(&mut roster, "Second").unwrap();
        AccountService::remove(&mut roster, &id).expect("removal succeeds with two accounts");
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.accounts[0].name, "Second");
    }

    #[test]
    fn remove_unknown_id_is_an_error() {
        let mut roster = Roster::with_default_account();
        AccountService::create(&mut roster, "Second").unwrap();
        assert!(matches!(
            AccountService::remove(&mut roster, "missing"),
            Err(CoreError::AccountNotFound(_))
        ));
    }

    #[test]
    fn set_target_stores_raw_text() {
        let mut roster = Roster::with_default_account();
        let id = roster.accounts[0].id.clone();
        AccountService::set_target(&mut roster, &id, " 220 ").unwrap();
        assert_eq!(roster.accounts[0].target_points.value(), Some(220));

        AccountService::set_target(&mut roster, &id, "").unwrap();
        assert!(!roster.accounts[0].target_points.is_set());
    }

    #[test]
    fn find_matches_id_then_name() {
        let mut roster = Roster::with_default_account();
        let id = AccountService::create(&mut roster, "Main").unwrap();
        assert_eq!(AccountService::find(&roster, &id).unwrap().name, "Main");
        assert_eq!(AccountService::find(&roster, "MAIN").unwrap().id, id);
        assert!(AccountService::find(&roster, "nobody").is_none());
    }

    #[test]
    fn rename_validates_against_other_accounts_only() {
        let mut roster = Roster::with_default_account();
        let id = AccountService::create(&mut roster, "Main").unwrap();
        AccountService::rename(&mut roster, &id, "Main").expect("same name is fine");
        let err = AccountService::rename(&mut roster, &id, "Default").expect_err("name taken");
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
