use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// An advanceable characteristic.
///
/// The eight main characteristics are percentile values advanced in steps of
/// +5; the three secondary characteristics (attacks, wounds, magic) are flat
/// values advanced in steps of +1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CharacteristicKey {
    WeaponSkill,
    BallisticSkill,
    Strength,
    Toughness,
    Agility,
    Intelligence,
    WillPower,
    Fellowship,
    Attacks,
    Wounds,
    Magic,
}

impl CharacteristicKey {
    /// Every key, main characteristics first.
    pub const ALL: [CharacteristicKey; 11] = [
        Self::WeaponSkill,
        Self::BallisticSkill,
        Self::Strength,
        Self::Toughness,
        Self::Agility,
        Self::Intelligence,
        Self::WillPower,
        Self::Fellowship,
        Self::Attacks,
        Self::Wounds,
        Self::Magic,
    ];

    /// Returns `true` for attacks, wounds, and magic.
    pub fn is_secondary(&self) -> bool {
        matches!(self, Self::Attacks | Self::Wounds | Self::Magic)
    }

    /// Long camelCase name, as stored in the ledger.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WeaponSkill => "weaponSkill",
            Self::BallisticSkill => "ballisticSkill",
            Self::Strength => "strength",
            Self::Toughness => "toughness",
            Self::Agility => "agility",
            Self::Intelligence => "intelligence",
            Self::WillPower => "willPower",
            Self::Fellowship => "fellowship",
            Self::Attacks => "attacks",
            Self::Wounds => "wounds",
            Self::Magic => "magic",
        }
    }

    /// Character-sheet abbreviation (WS, BS, ..., Mag).
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::WeaponSkill => "WS",
            Self::BallisticSkill => "BS",
            Self::Strength => "S",
            Self::Toughness => "T",
            Self::Agility => "Ag",
            Self::Intelligence => "Int",
            Self::WillPower => "WP",
            Self::Fellowship => "Fel",
            Self::Attacks => "A",
            Self::Wounds => "W",
            Self::Magic => "Mag",
        }
    }
}

impl fmt::Display for CharacteristicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CharacteristicKey {
    type Err = TypeError;

    /// Accepts long names and abbreviations, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|key| {
                key.as_str().eq_ignore_ascii_case(wanted)
                    || key.abbreviation().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| TypeError::UnknownCharacteristic(s.to_string()))
    }
}
