use serde::Serialize;

/// Aggregate projection figures for one account, as shown in the
/// all-accounts overview table.
///
/// `progress_percentage` and `points_to_target` are `None` whenever the
/// target is unset (or not a positive integer); `days_to_target` is `None`
/// for an unset target or a target the bounded simulation cannot reach.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AccountSummary {
    pub name: String,
    pub total_points: i64,
    pub target_points: Option<i64>,
    pub progress_percentage: Option<f64>,
    pub points_to_target: Option<i64>,
    pub days_to_target: Option<u32>,
}
