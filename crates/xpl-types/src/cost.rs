use serde::{Deserialize, Serialize};

use crate::advancement::{Advance, SkillLevel};
use crate::characteristic::CharacteristicKey;

/// XP cost and step size for every purchase.
///
/// Lookups are pure: the same schedule and the same [`Advance`] always give
/// the same answer. Characteristic costs are flat per step and do not depend
/// on how many steps were already bought. Skill costs depend only on the
/// level being purchased, never on the skill.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostSchedule {
    pub characteristic_main: u32,
    pub characteristic_secondary: u32,
    pub skill_acquire: u32,
    pub skill_improve_10: u32,
    pub skill_improve_20: u32,
    pub talent_acquire: u32,
    /// Percentage points added per main characteristic step.
    pub main_step: u32,
    /// Flat points added per secondary characteristic step.
    pub secondary_step: u32,
}

impl CostSchedule {
    /// The standard advancement table.
    pub const fn standard() -> Self {
        Self {
            characteristic_main: 100,
            characteristic_secondary: 100,
            skill_acquire: 100,
            skill_improve_10: 100,
            skill_improve_20: 200,
            talent_acquire: 100,
            main_step: 5,
            secondary_step: 1,
        }
    }

    /// XP charged for `advance`.
    ///
    /// A skill purchase of `SkillLevel::None` is priced like an acquisition;
    /// guards never let such a request through.
    pub fn cost_of(&self, advance: &Advance) -> u32 {
        match advance {
            Advance::Characteristic(key) => self.characteristic_cost(*key),
            Advance::Skill { level, .. } => self.skill_cost(*level),
            Advance::Talent(_) => self.talent_acquire,
        }
    }

    /// Magnitude recorded in the ledger entry for `advance`.
    pub fn step_size_of(&self, advance: &Advance) -> u32 {
        match advance {
            Advance::Characteristic(key) => self.characteristic_step(*key),
            Advance::Skill { level, .. } => skill_magnitude(*level),
            Advance::Talent(_) => 1,
        }
    }

    pub fn characteristic_cost(&self, key: CharacteristicKey) -> u32 {
        if key.is_secondary() {
            self.characteristic_secondary
        } else {
            self.characteristic_main
        }
    }

    pub fn characteristic_step(&self, key: CharacteristicKey) -> u32 {
        if key.is_secondary() {
            self.secondary_step
        } else {
            self.main_step
        }
    }

    pub fn skill_cost(&self, level: SkillLevel) -> u32 {
        match level {
            SkillLevel::None | SkillLevel::Acquired => self.skill_acquire,
            SkillLevel::Plus10 => self.skill_improve_10,
            SkillLevel::Plus20 => self.skill_improve_20,
        }
    }

    /// Display text such as `"+5% (100 XP)"` or `"+1 (100 XP)"`.
    pub fn describe_characteristic(&self, key: CharacteristicKey) -> String {
        let suffix = if key.is_secondary() { "" } else { "%" };
        format!(
            "+{}{suffix} ({} XP)",
            self.characteristic_step(key),
            self.characteristic_cost(key)
        )
    }
}

impl Default for CostSchedule {
    fn default() -> Self {
        Self::standard()
    }
}

/// Ledger magnitude of a skill purchase: 0 for acquisition, 10 or 20 for
/// improvements.
pub fn skill_magnitude(level: SkillLevel) -> u32 {
    match level {
        SkillLevel::None | SkillLevel::Acquired => 0,
        SkillLevel::Plus10 => 10,
        SkillLevel::Plus20 => 20,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advancement::{SkillId, TalentId};

    fn skill(level: SkillLevel) -> Advance {
        Advance::Skill {
            skill: SkillId::new("Dodge Blow"),
            level,
        }
    }

    #[test]
    fn standard_characteristic_costs_and_steps() {
        let costs = CostSchedule::standard();
        let ws = Advance::Characteristic(CharacteristicKey::WeaponSkill);
        let attacks = Advance::Characteristic(CharacteristicKey::Attacks);
        assert_eq!(costs.cost_of(&ws), 100);
        assert_eq!(costs.step_size_of(&ws), 5);
        assert_eq!(costs.cost_of(&attacks), 100);
        assert_eq!(costs.step_size_of(&attacks), 1);
    }

    #[test]
    fn skill_cost_depends_on_level_only() {
        let costs = CostSchedule::standard();
        assert_eq!(costs.cost_of(&skill(SkillLevel::Acquired)), 100);
        assert_eq!(costs.cost_of(&skill(SkillLevel::Plus10)), 100);
        assert_eq!(costs.cost_of(&skill(SkillLevel::Plus20)), 200);

        let other = Advance::Skill {
            skill: SkillId::new("Gossip"),
            level: SkillLevel::Plus20,
        };
        assert_eq!(costs.cost_of(&other), costs.cost_of(&skill(SkillLevel::Plus20)));
    }

    #[test]
    fn skill_magnitudes() {
        let costs = CostSchedule::standard();
        assert_eq!(costs.step_size_of(&skill(SkillLevel::Acquired)), 0);
        assert_eq!(costs.step_size_of(&skill(SkillLevel::Plus10)), 10);
        assert_eq!(costs.step_size_of(&skill(SkillLevel::Plus20)), 20);
    }

    #[test]
    fn talent_is_flat() {
        let costs = CostSchedule::standard();
        let luck = Advance::Talent(TalentId::new("Luck"));
        assert_eq!(costs.cost_of(&luck), 100);
        assert_eq!(costs.step_size_of(&luck), 1);
    }

    #[test]
    fn describe_uses_percent_for_main_only() {
        let costs = CostSchedule::standard();
        assert_eq!(
            costs.describe_characteristic(CharacteristicKey::Toughness),
            "+5% (100 XP)"
        );
        assert_eq!(
            costs.describe_characteristic(CharacteristicKey::Wounds),
            "+1 (100 XP)"
        );
    }

    #[test]
    fn partial_override_keeps_standard_defaults() {
        let costs: CostSchedule =
            serde_json::from_str(r#"{ "skill_improve_20": 300 }"#).unwrap();
        assert_eq!(costs.skill_improve_20, 300);
        assert_eq!(costs.skill_acquire, 100);
        assert_eq!(costs.main_step, 5);
    }

    proptest::proptest! {
        #[test]
        fn lookups_are_pure(index in 0usize..11) {
            let costs = CostSchedule::standard();
            let advance = Advance::Characteristic(CharacteristicKey::ALL[index]);
            proptest::prop_assert_eq!(costs.cost_of(&advance), costs.cost_of(&advance));
            proptest::prop_assert_eq!(costs.step_size_of(&advance), costs.step_size_of(&advance));
        }
    }
}
