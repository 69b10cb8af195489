use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use xpl_types::Choice;

use crate::check::GrantKind;
use crate::error::GrantError;

/// A player's pick-group selections, keyed by group id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrantSelections {
    pub skills: BTreeMap<String, Vec<Choice>>,
    pub talents: BTreeMap<String, Vec<Choice>>,
}

impl GrantSelections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper: record the picks for a skill group.
    pub fn with_skills(mut self, group_id: impl Into<String>, picks: Vec<Choice>) -> Self {
        self.skills.insert(group_id.into(), picks);
        self
    }

    /// Builder-style helper: record the picks for a talent group.
    pub fn with_talents(mut self, group_id: impl Into<String>, picks: Vec<Choice>) -> Self {
        self.talents.insert(group_id.into(), picks);
        self
    }

    pub fn for_kind(&self, kind: GrantKind) -> &BTreeMap<String, Vec<Choice>> {
        match kind {
            GrantKind::Skill => &self.skills,
            GrantKind::Talent => &self.talents,
        }
    }

    /// Picks recorded for `group_id`; empty when the group was skipped.
    pub fn picks(&self, kind: GrantKind, group_id: &str) -> &[Choice] {
        self.for_kind(kind)
            .get(group_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns `true` if no group has any pick.
    pub fn is_empty(&self) -> bool {
        self.skills.values().all(Vec::is_empty) && self.talents.values().all(Vec::is_empty)
    }

    pub fn from_json(json: &str) -> Result<Self, GrantError> {
        Ok(serde_json::from_str(json)?)
    }
}
