//! Aggregation helpers for per-account status and the roster overview.

use alpha_domain::{Account, AccountSummary, Roster};

use crate::projection::ProjectionEngine;

/// Live projection figures for a single account, as shown in the CLI header.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountStatus {
    pub today_points: i64,
    pub total_points: i64,
    pub target_points: Option<i64>,
    pub progress_percentage: Option<f64>,
    pub days_to_target: Option<u32>,
}

/// Aggregates roster data for summary views.
pub struct SummaryService;

impl SummaryService {
    /// Projects every account, preserving roster order.
    pub fn roster_overview(roster: &Roster) -> Vec<AccountSummary> {
        ProjectionEngine::summarize(&roster.accounts)
    }

    /// Status for one account.
    pub fn account_status(account: &Account) -> AccountStatus {
        let (_, total_points) = ProjectionEngine::compute_totals(&account.points_history);
        let target = account.target_points.value();
        let progress_percentage = match target {
            Some(value) if value > 0 => {
                Some((total_points as f64 / value as f64 * 100.0).min(100.0))
            }
            _ => None,
        };
        AccountStatus {
            today_points: account.today_points(),
            total_points,
            target_points: target,
            progress_percentage,
            days_to_target: ProjectionEngine::days_to_target(
                &account.points_history,
                total_points,
                target,
            ),
        }
    }
}
