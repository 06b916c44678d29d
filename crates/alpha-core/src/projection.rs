//! The points projection engine.
//!
//! Pure functions over newest-first daily histories: cumulative totals,
//! days-to-target under the rolling expiry window, and per-account
//! aggregation. No side effects, no retained state; calling any operation
//! twice with identical input yields identical output.

use std::collections::VecDeque;

use alpha_domain::{Account, AccountSummary, DailyEntry};

/// Points earned per simulated future day.
pub const DAILY_ACCRUAL: i64 = 16;

/// Number of most recent days whose points still count toward the live total.
pub const EXPIRY_WINDOW: usize = 15;

/// Upper bound on the forward simulation. With the window saturated the
/// steady-state total caps at `EXPIRY_WINDOW * DAILY_ACCRUAL`, so any larger
/// target never converges and the loop must cut off.
pub const PROJECTION_HORIZON_DAYS: u32 = 1000;

pub struct ProjectionEngine;

impl ProjectionEngine {
    /// Annotates a newest-first history with running suffix sums and returns
    /// it together with the grand total.
    ///
    /// The input is left untouched; the returned vector is a fresh copy with
    /// `cumulative_points[i] = points[i] + cumulative_points[i + 1]` (zero
    /// past the end). The grand total equals the suffix sum at index 0, which
    /// for an empty history is 0.
    pub fn compute_totals(history: &[DailyEntry]) -> (Vec<DailyEntry>, i64) {
        let mut annotated = history.to_vec();
        let mut cumulative = 0i64;
        for entry in annotated.iter_mut().rev() {
            cumulative += entry.points;
            entry.cumulative_points = cumulative;
        }
        (annotated, cumulative)
    }

    /// Days of future accrual until `target` is reached, with the default
    /// accrual rate and expiry window.
    pub fn days_to_target(
        history: &[DailyEntry],
        current_total: i64,
        target: Option<i64>,
    ) -> Option<u32> {
        Self::days_to_target_with(history, current_total, target, DAILY_ACCRUAL, EXPIRY_WINDOW)
    }

    /// Days of future accrual until `target` is reached.
    ///
    /// Returns `None` when no target is defined or the bounded simulation
    /// never reaches it, `Some(0)` when the target is already met (including
    /// overshoot), otherwise the smallest day count `d >= 1` at which the
    /// simulated live total reaches the target.
    ///
    /// The expiry queue is seeded from the first `window` entries of the
    /// history in its existing newest-first order. That matches the original
    /// behavior exactly: the seed is not re-sorted by actual recency, so a
    /// hand-edited out-of-order history expires in list order rather than
    /// date order. Intentional simplification; do not "fix".
    pub fn days_to_target_with(
        history: &[DailyEntry],
        current_total: i64,
        target: Option<i64>,
        rate: i64,
        window: usize,
    ) -> Option<u32> {
        let target = target?;
        if current_total >= target {
            return Some(0);
        }

        let mut queue: VecDeque<i64> = history.iter().take(window).map(|day| day.points).collect();
        for day in 1..=PROJECTION_HORIZON_DAYS {
            queue.push_front(rate);
            if queue.len() > window {
                queue.pop_back();
            }
            let live_total: i64 = queue.iter().sum();
            if live_total >= target {
                return Some(day);
            }
        }
        None
    }

    /// Projects every account in the slice, preserving input order.
    ///
    /// Accounts with unset or non-numeric target text never fail: progress
    /// and remaining points report as `None`, and the day projection falls
    /// through to `None` the same way the original's infinite sentinel
    /// target did once it hit the horizon bound.
    pub fn summarize(accounts: &[Account]) -> Vec<AccountSummary> {
        accounts
            .iter()
            .map(|account| {
                let (_, total_points) = Self::compute_totals(&account.points_history);
                let target = account.target_points.value();
                let (progress_percentage, points_to_target) = match target {
                    Some(value) if value > 0 => (
                        Some((total_points as f64 / value as f64 * 100.0).min(100.0)),
                        Some(value - total_points),
                    ),
                    _ => (None, None),
                };
                let days_to_target =
                    Self::days_to_target(&account.points_history, total_points, target);
                AccountSummary {
                    name: account.name.clone(),
                    total_points,
                    target_points: target,
                    progress_percentage,
                    points_to_target,
                    days_to_target,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alpha_domain::Target;

    fn history(points: &[i64]) -> Vec<DailyEntry> {
        points
            .iter()
            .enumerate()
            .map(|(index, value)| DailyEntry::new(format!("2025/08/{:02}", 20 - index), *value))
            .collect()
    }

    #[test]
    fn compute_totals_of_empty_history() {
        let (annotated, total) = ProjectionEngine::compute_totals(&[]);
        assert!(annotated.is_empty());
        assert_eq!(total, 0);
    }

    #[test]
    fn compute_totals_builds_suffix_sums() {
        let (annotated, total) = ProjectionEngine::compute_totals(&history(&[5, 3]));
        assert_eq!(annotated[0].cumulative_points, 8);
        assert_eq!(annotated[1].cumulative_points, 3);
        assert_eq!(total, 8);
    }

    #[test]
    fn grand_total_is_plain_sum_even_with_negatives() {
        let days = history(&[16, -4, 9, 0, -1]);
        let (_, total) = ProjectionEngine::compute_totals(&days);
        assert_eq!(total, days.iter().map(|day| day.points).sum::<i64>());
    }

    #[test]
    fn compute_totals_leaves_input_untouched() {
        let days = history(&[7, 2]);
        let before = days.clone();
        let _ = ProjectionEngine::compute_totals(&days);
        assert_eq!(days, before);
    }

    #[test]
    fn no_target_projects_to_none() {
        assert_eq!(
            ProjectionEngine::days_to_target(&history(&[16, 16]), 32, None),
            None
        );
    }

    #[test]
    fn met_target_projects_to_zero_days() {
        assert_eq!(
            ProjectionEngine::days_to_target(&[], 50, Some(50)),
            Some(0)
        );
        assert_eq!(
            ProjectionEngine::days_to_target(&[], 50, Some(10)),
            Some(0)
        );
    }

    #[test]
    fn one_day_of_accrual_reaches_exactly_one_rate() {
        assert_eq!(ProjectionEngine::days_to_target(&[], 0, Some(16)), Some(1));
    }

    #[test]
    fn steady_state_cap_is_window_times_rate() {
        assert_eq!(
            ProjectionEngine::days_to_target(&[], 0, Some(240)),
            Some(15)
        );
        assert_eq!(ProjectionEngine::days_to_target(&[], 0, Some(241)), None);
    }

    #[test]
    fn unreachable_target_hits_horizon_bound() {
        assert_eq!(
            ProjectionEngine::days_to_target(&[], 0, Some(999_999_999)),
            None
        );
    }

    #[test]
    fn seed_queue_uses_first_window_entries_in_list_order() {
        // 20 retained days: the 5 oldest are outside the seed window, so the
        // live total starts from the first 15 entries only (15, not 20*1),
        // and each simulated day expires the next entry in list order.
        let days = history(&[1; 20]);
        let total = 20;
        // Day 1 pushes 16 and expires a 1: live total 15 - 1 + 16 = 30.
        assert_eq!(
            ProjectionEngine::days_to_target(&days, total, Some(30)),
            Some(1)
        );
    }

    #[test]
    fn projection_is_idempotent() {
        let days = history(&[16, 8, 0, 16]);
        let first = ProjectionEngine::days_to_target(&days, 40, Some(200));
        let second = ProjectionEngine::days_to_target(&days, 40, Some(200));
        assert_eq!(first, second);

        let (annotated_a, total_a) = ProjectionEngine::compute_totals(&days);
        let (annotated_b, total_b) = ProjectionEngine::compute_totals(&days);
        assert_eq!(annotated_a, annotated_b);
        assert_eq!(total_a, total_b);
    }

    #[test]
    fn summarize_preserves_order_and_tolerates_bad_targets() {
        let mut reachable = Account::new("Reachable");
        reachable.points_history = history(&[16, 16]);
        reachable.target_points = Target::from_raw("40");

        let mut unset = Account::new("Unset");
        unset.points_history = history(&[16]);

        let mut garbage = Account::new("Garbage");
        garbage.target_points = Target::from_raw("soon");

        let summaries = ProjectionEngine::summarize(&[reachable, unset, garbage]);
        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[0].name, "Reachable");
        assert_eq!(summaries[0].total_points, 32);
        assert_eq!(summaries[0].points_to_target, Some(8));
        assert_eq!(summaries[0].progress_percentage, Some(80.0));
        assert_eq!(summaries[0].days_to_target, Some(1));

        assert_eq!(summaries[1].name, "Unset");
        assert_eq!(summaries[1].target_points, None);
        assert_eq!(summaries[1].days_to_target, None);

        assert_eq!(summaries[2].name, "Garbage");
        assert_eq!(summaries[2].progress_percentage, None);
        assert_eq!(summaries[2].points_to_target, None);
    }

    #[test]
    fn summarize_caps_progress_at_one_hundred() {
        let mut account = Account::new("Over");
        account.points_history = history(&[100]);
        account.target_points = Target::from_raw("50");
        let summaries = ProjectionEngine::summarize(&[account]);
        assert_eq!(summaries[0].progress_percentage, Some(100.0));
        assert_eq!(summaries[0].points_to_target, Some(-50));
        assert_eq!(summaries[0].days_to_target, Some(0));
    }
}
