use serde::{de::Deserializer, ser::Serializer, Deserialize, Serialize};

/// Raw target-points input as entered by the user.
///
/// The original snapshots store the target as free text (possibly empty),
/// so the raw string is preserved verbatim for round-tripping. Anything
/// that does not parse as an integer counts as "no target defined".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Target {
    raw: String,
}

impl Target {
    /// An unset target (empty raw text).
    pub fn unset() -> Self {
        Self::default()
    }

    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Parsed target value, or `None` for unset/non-numeric text.
    pub fn value(&self) -> Option<i64> {
        self.raw.trim().parse::<i64>().ok()
    }

    pub fn is_set(&self) -> bool {
        self.value().is_some()
    }
}

impl Serialize for Target {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Target {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Accept the shapes seen in the wild: string, bare number, or null.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
            Unset(()),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Target::from_raw(text),
            Raw::Number(value) => Target::from_raw(value.to_string()),
            Raw::Unset(()) => Target::unset(),
        })
    }
}
