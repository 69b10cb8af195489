use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use xpl_types::{Advance, AdvancementKind, EntryId, SkillLevel, Target};

/// Schema version written into every new entry.
pub const SCHEMA_VERSION: u32 = 1;

/// Versions start at 1; anything newer than [`SCHEMA_VERSION`] is unknown.
pub fn is_supported_schema(version: u32) -> bool {
    (1..=SCHEMA_VERSION).contains(&version)
}

/// One accepted advancement purchase.
///
/// Entries are created only after a guard accepts a purchase and are never
/// edited or removed afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: EntryId,
    pub timestamp: DateTime<Utc>,
    pub kind: AdvancementKind,
    pub target: Target,
    /// Step size actually applied: +5 / +1 for characteristics, 0 / 10 / 20
    /// for skills, 1 for talents.
    pub magnitude: u32,
    pub xp_cost: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub schema_version: u32,
}

impl LedgerEntry {
    /// Record `advance` now, with a fresh time-ordered id.
    pub fn record(advance: &Advance, magnitude: u32, xp_cost: u32, note: Option<String>) -> Self {
        Self {
            id: EntryId::new(),
            timestamp: Utc::now(),
            kind: advance.kind(),
            target: advance.target(),
            magnitude,
            xp_cost,
            note,
            schema_version: SCHEMA_VERSION,
        }
    }

    /// Human-readable note for `advance` at `magnitude`, e.g.
    /// `"weaponSkill +5%"`, `"Dodge Blow +10%"`, `"Luck acquired"`.
    pub fn describe(advance: &Advance, magnitude: u32) -> String {
        match advance {
            Advance::Characteristic(key) => {
                let suffix = if key.is_secondary() { "" } else { "%" };
                format!("{key} +{magnitude}{suffix}")
            }
            Advance::Skill {
                skill,
                level: SkillLevel::None | SkillLevel::Acquired,
            } => format!("{skill} acquired"),
            Advance::Skill { skill, .. } => format!("{skill} +{magnitude}%"),
            Advance::Talent(talent) => format!("{talent} acquired"),
        }
    }
}
