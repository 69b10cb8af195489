use std::fmt;

use serde::{Deserialize, Serialize};

/// A skill or talent as it appears in a career definition or a player's
/// selection: a name plus an optional specialization.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Choice {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<String>,
}

impl Choice {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spec: None,
        }
    }

    pub fn with_spec(name: impl Into<String>, spec: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spec: Some(spec.into()),
        }
    }

    /// Comparison key: trimmed and case-folded name and specialization.
    ///
    /// A blank specialization is treated the same as no specialization.
    pub fn key(&self) -> ChoiceKey {
        let spec = self
            .spec
            .as_deref()
            .map(fold)
            .filter(|s| !s.is_empty());
        ChoiceKey {
            name: fold(&self.name),
            spec,
        }
    }

    /// Returns `true` if both choices normalize to the same key.
    pub fn matches(&self, other: &Choice) -> bool {
        self.key() == other.key()
    }

    /// Display label, `"Name (Spec)"` or just `"Name"`.
    pub fn label(&self) -> String {
        match self.spec.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(spec) => format!("{} ({spec})", self.name.trim()),
            None => self.name.trim().to_string(),
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Normalized identity of a [`Choice`], used for membership and duplicate
/// checks and for merging grants into a character.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChoiceKey {
    pub name: String,
    pub spec: Option<String>,
}

fn fold(s: &str) -> String {
    s.trim().to_lowercase()
}
