use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{common::*, entry::DailyEntry, target::Target};

/// A tracked points account: a name, a newest-first daily history, and an
/// optional target balance.
///
/// Ids are opaque strings. New accounts get a UUID; ids from imported
/// snapshots (the original used millisecond timestamps) are kept verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub points_history: Vec<DailyEntry>,
    #[serde(default)]
    pub target_points: Target,
}

impl Account {
    /// Creates a new account with an empty history and no target.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            points_history: Vec::new(),
            target_points: Target::unset(),
        }
    }

    /// Sum of every retained day's points.
    pub fn total_points(&self) -> i64 {
        self.points_history.iter().map(|day| day.points).sum()
    }

    /// Points earned on the most recent retained day.
    pub fn today_points(&self) -> i64 {
        self.points_history.first().map(|day| day.points).unwrap_or(0)
    }
}

impl Identifiable for Account {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Account {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Account {
    fn display_label(&self) -> String {
        match self.target_points.value() {
            Some(target) => format!("{} ({}/{})", self.name, self.total_points(), target),
            None => format!("{} ({})", self.name, self.total_points()),
        }
    }
}
