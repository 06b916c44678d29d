use serde::{Deserialize, Serialize};

/// A single day of earned points within an account history.
///
/// Histories are ordered newest-first: index 0 is the most recent day.
/// `cumulative_points` is the suffix sum from this entry back to the oldest
/// retained entry; it is derived data and recomputed whenever a history
/// changes, but it is persisted so snapshots stay readable on their own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyEntry {
    pub date: String,
    pub points: i64,
    #[serde(default)]
    pub cumulative_points: i64,
}

impl DailyEntry {
    /// Creates an entry with a zeroed cumulative sum.
    pub fn new(date: impl Into<String>, points: i64) -> Self {
        Self {
            date: date.into(),
            points,
            cumulative_points: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_fields() {
        let entry = DailyEntry {
            date: "2025/08/08".into(),
            points: 16,
            cumulative_points: 48,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["date"], "2025/08/08");
        assert_eq!(json["points"], 16);
        assert_eq!(json["cumulativePoints"], 48);
    }

    #[test]
    fn missing_cumulative_defaults_to_zero() {
        let entry: DailyEntry =
            serde_json::from_str(r#"{"date":"2025/08/08","points":-3}"#).unwrap();
        assert_eq!(entry.points, -3);
        assert_eq!(entry.cumulative_points, 0);
    }
}
