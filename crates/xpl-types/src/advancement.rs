use std::fmt;

use serde::{Deserialize, Serialize};

use crate::characteristic::CharacteristicKey;
use crate::choice::Choice;
use crate::error::TypeError;

/// Kind of purchase recorded in a ledger entry.
///
/// The set is closed: cost lookup and replay match on it exhaustively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvancementKind {
    CharacteristicMain,
    CharacteristicSecondary,
    SkillAcquire,
    SkillImprove,
    TalentAcquire,
}

impl AdvancementKind {
    /// Returns `true` for both characteristic kinds.
    pub fn is_characteristic(&self) -> bool {
        matches!(self, Self::CharacteristicMain | Self::CharacteristicSecondary)
    }

    /// Returns `true` for skill acquisition and improvement.
    pub fn is_skill(&self) -> bool {
        matches!(self, Self::SkillAcquire | Self::SkillImprove)
    }
}

impl fmt::Display for AdvancementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CharacteristicMain => write!(f, "characteristic_main"),
            Self::CharacteristicSecondary => write!(f, "characteristic_secondary"),
            Self::SkillAcquire => write!(f, "skill_acquire"),
            Self::SkillImprove => write!(f, "skill_improve"),
            Self::TalentAcquire => write!(f, "talent_acquire"),
        }
    }
}

/// Skill identifier, e.g. `"Dodge Blow"` or `"Common Knowledge (The Empire)"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillId(String);

impl SkillId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&Choice> for SkillId {
    fn from(choice: &Choice) -> Self {
        Self(choice.label())
    }
}

/// Talent identifier, e.g. `"Luck"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TalentId(String);

impl TalentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TalentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&Choice> for TalentId {
    fn from(choice: &Choice) -> Self {
        Self(choice.label())
    }
}

/// What a purchase applies to.
///
/// Characteristic keys, skills, and talents live in separate variants so a
/// skill and a talent that share a name can never collide.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Characteristic(CharacteristicKey),
    Skill(SkillId),
    Talent(TalentId),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Characteristic(key) => write!(f, "{key}"),
            Self::Skill(id) => write!(f, "{id}"),
            Self::Talent(id) => write!(f, "{id}"),
        }
    }
}

/// Mastery of a single skill.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum SkillLevel {
    #[default]
    None,
    Acquired,
    Plus10,
    Plus20,
}

impl SkillLevel {
    pub fn as_u8(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Acquired => 1,
            Self::Plus10 => 2,
            Self::Plus20 => 3,
        }
    }

    /// The only level that may be purchased from this one, if any.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::None => Some(Self::Acquired),
            Self::Acquired => Some(Self::Plus10),
            Self::Plus10 => Some(Self::Plus20),
            Self::Plus20 => None,
        }
    }
}

impl TryFrom<u8> for SkillLevel {
    type Error = TypeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Acquired),
            2 => Ok(Self::Plus10),
            3 => Ok(Self::Plus20),
            other => Err(TypeError::InvalidSkillLevel(other)),
        }
    }
}

impl From<SkillLevel> for u8 {
    fn from(level: SkillLevel) -> Self {
        level.as_u8()
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Acquired => write!(f, "acquired"),
            Self::Plus10 => write!(f, "+10%"),
            Self::Plus20 => write!(f, "+20%"),
        }
    }
}

/// A requested purchase: the input to cost lookup, guards, and entry creation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Advance {
    Characteristic(CharacteristicKey),
    /// Purchase of `level` for `skill`. `SkillLevel::None` is never purchasable.
    Skill { skill: SkillId, level: SkillLevel },
    Talent(TalentId),
}

impl Advance {
    /// The ledger kind this purchase is recorded under.
    pub fn kind(&self) -> AdvancementKind {
        match self {
            Self::Characteristic(key) if key.is_secondary() => {
                AdvancementKind::CharacteristicSecondary
            }
            Self::Characteristic(_) => AdvancementKind::CharacteristicMain,
            Self::Skill {
                level: SkillLevel::None | SkillLevel::Acquired,
                ..
            } => AdvancementKind::SkillAcquire,
            Self::Skill { .. } => AdvancementKind::SkillImprove,
            Self::Talent(_) => AdvancementKind::TalentAcquire,
        }
    }

    /// The ledger target this purchase is recorded against.
    pub fn target(&self) -> Target {
        match self {
            Self::Characteristic(key) => Target::Characteristic(*key),
            Self::Skill { skill, .. } => Target::Skill(skill.clone()),
            Self::Talent(talent) => Target::Talent(talent.clone()),
        }
    }
}
