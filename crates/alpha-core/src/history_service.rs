//! History window generation and pure single-day edits.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use alpha_domain::DailyEntry;

use crate::{
    error::CoreError,
    projection::{ProjectionEngine, DAILY_ACCRUAL, EXPIRY_WINDOW},
};

/// Day label format used throughout the snapshots.
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// Formats a calendar day the way history entries store it.
pub fn format_day(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Maintains the rolling 15-day history window for an account.
pub struct HistoryService;

impl HistoryService {
    /// Produces the newest-first window of [`EXPIRY_WINDOW`] days ending at
    /// `today`.
    ///
    /// Days already present in `history` keep their saved points (manual
    /// edits survive regeneration). Missing days default to [`DAILY_ACCRUAL`]
    /// on or after `start_date` and to 0 before it. Cumulative sums are
    /// recomputed on the result. Idempotent for a fixed `today`.
    pub fn generate(
        history: &[DailyEntry],
        today: NaiveDate,
        start_date: NaiveDate,
    ) -> Vec<DailyEntry> {
        let saved: HashMap<&str, i64> = history
            .iter()
            .map(|day| (day.date.as_str(), day.points))
            .collect();

        let mut window = Vec::with_capacity(EXPIRY_WINDOW);
        for offset in 0..EXPIRY_WINDOW {
            let date = today - Duration::days(offset as i64);
            let label = format_day(date);
            let points = saved.get(label.as_str()).copied().unwrap_or_else(|| {
                if date >= start_date {
                    DAILY_ACCRUAL
                } else {
                    0
                }
            });
            window.push(DailyEntry::new(label, points));
        }

        let (annotated, _) = ProjectionEngine::compute_totals(&window);
        annotated
    }

    /// Returns a new history with entry `index` set to `points` and every
    /// cumulative sum recomputed. The input history is never mutated.
    pub fn set_points(
        history: &[DailyEntry],
        index: usize,
        points: i64,
    ) -> Result<Vec<DailyEntry>, CoreError> {
        if index >= history.len() {
            return Err(CoreError::Validation(format!(
                "history index {} out of range (len {})",
                index,
                history.len()
            )));
        }
        let mut next = history.to_vec();
        next[index].points = points;
        let (annotated, _) = ProjectionEngine::compute_totals(&next);
        Ok(annotated)
    }
}
