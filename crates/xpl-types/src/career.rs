use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::characteristic::CharacteristicKey;
use crate::choice::Choice;
use crate::error::TypeError;

/// The five career classes a catalog may use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CareerClass {
    Academic,
    Ranger,
    Warrior,
    Criminal,
    Commoner,
}

impl CareerClass {
    pub const ALL: [CareerClass; 5] = [
        Self::Academic,
        Self::Ranger,
        Self::Warrior,
        Self::Criminal,
        Self::Commoner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Academic => "Academic",
            Self::Ranger => "Ranger",
            Self::Warrior => "Warrior",
            Self::Criminal => "Criminal",
            Self::Commoner => "Commoner",
        }
    }
}

impl fmt::Display for CareerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CareerClass {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|class| class.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TypeError::UnknownCareerClass(s.to_string()))
    }
}

/// A labeled set of offered options from which exactly `required_count`
/// must be chosen at career entry.
///
/// Content invariant: `1 <= required_count <= options.len()`. It is checked
/// by the offline catalog audit, not at runtime.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickGroup {
    /// Stable identifier; selections are keyed by it.
    pub group_id: String,
    pub required_count: usize,
    pub options: Vec<Choice>,
}

impl PickGroup {
    pub fn new(group_id: impl Into<String>, required_count: usize, options: Vec<Choice>) -> Self {
        Self {
            group_id: group_id.into(),
            required_count,
            options,
        }
    }

    /// Returns `true` if `choice` normalizes to one of the offered options.
    pub fn offers(&self, choice: &Choice) -> bool {
        let key = choice.key();
        self.options.iter().any(|opt| opt.key() == key)
    }
}

/// Skills or talents granted on entering a career.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantBlock {
    /// Granted unconditionally.
    #[serde(default)]
    pub required: Vec<Choice>,
    /// Groups the player must pick from.
    #[serde(default)]
    pub groups: Vec<PickGroup>,
}

/// A career as supplied by the content catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Career {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub career_class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub skills: GrantBlock,
    #[serde(default)]
    pub talents: GrantBlock,
    /// Maximum number of advances per characteristic while in this career.
    /// A missing key means the characteristic cannot be advanced here.
    #[serde(default)]
    pub characteristic_caps: BTreeMap<CharacteristicKey, u32>,
}

impl Career {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            career_class: String::new(),
            description: None,
            skills: GrantBlock::default(),
            talents: GrantBlock::default(),
            characteristic_caps: BTreeMap::new(),
        }
    }

    /// Advancement cap for `key`; absent means zero.
    pub fn cap_for(&self, key: CharacteristicKey) -> u32 {
        self.characteristic_caps.get(&key).copied().unwrap_or(0)
    }

    /// The parsed `career_class`; `Ok(None)` when the catalog left it blank.
    pub fn class(&self) -> Result<Option<CareerClass>, TypeError> {
        if self.career_class.trim().is_empty() {
            return Ok(None);
        }
        self.career_class.parse().map(Some)
    }

    /// Returns `true` if the career offers any pick-group.
    pub fn has_pick_groups(&self) -> bool {
        !self.skills.groups.is_empty() || !self.talents.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn career_class_parses_known_names() {
        let mut career = Career::new("rat-catcher", "Rat Catcher");
        assert_eq!(career.class(), Ok(None));

        career.career_class = "commoner".into();
        assert_eq!(career.class(), Ok(Some(CareerClass::Commoner)));

        career.career_class = "Wizard".into();
        assert_eq!(
            career.class(),
            Err(TypeError::UnknownCareerClass("Wizard".into()))
        );
    }

    fn mediator() -> Career {
        let mut career = Career::new("mediator", "Mediator");
        career.skills.required = vec![Choice::new("Evaluate"), Choice::new("Gossip")];
        career.skills.groups = vec![PickGroup::new(
            "animal_care_or_charm",
            1,
            vec![Choice::new("Animal Care"), Choice::new("Charm")],
        )];
        career
            .characteristic_caps
            .insert(CharacteristicKey::Fellowship, 2);
        career
    }

    #[test]
    fn absent_cap_is_zero() {
        let career = mediator();
        assert_eq!(career.cap_for(CharacteristicKey::Fellowship), 2);
        assert_eq!(career.cap_for(CharacteristicKey::Strength), 0);
    }

    #[test]
    fn group_offers_normalized_options() {
        let career = mediator();
        let group = &career.skills.groups[0];
        assert!(group.offers(&Choice::new(" charm ")));
        assert!(!group.offers(&Choice::new("Haggle")));
    }

    #[test]
    fn career_deserializes_with_defaults() {
        let json = r#"{
            "id": "rat_catcher",
            "name": "Rat Catcher",
            "characteristic_caps": { "weaponSkill": 2, "wounds": 1 }
        }"#;
        let career: Career = serde_json::from_str(json).unwrap();
        assert!(career.skills.required.is_empty());
        assert!(!career.has_pick_groups());
        assert_eq!(career.cap_for(CharacteristicKey::Wounds), 1);
    }
}
