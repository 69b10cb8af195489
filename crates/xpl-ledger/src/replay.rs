use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use xpl_types::{AdvancementKind, CharacteristicKey, SkillId, SkillLevel, TalentId, Target};

use crate::entry::LedgerEntry;

/// Advancement state derived from a ledger. Never stored on its own.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AdvancementState {
    pub characteristic_advances: BTreeMap<CharacteristicKey, u32>,
    pub skill_levels: BTreeMap<SkillId, SkillLevel>,
    pub acquired_talents: BTreeSet<TalentId>,
    pub total_xp_spent: u64,
}

impl AdvancementState {
    /// Accepted steps for `key` (zero when never advanced).
    pub fn advances_for(&self, key: CharacteristicKey) -> u32 {
        self.characteristic_advances.get(&key).copied().unwrap_or(0)
    }

    pub fn skill_level(&self, skill: &SkillId) -> SkillLevel {
        self.skill_levels.get(skill).copied().unwrap_or_default()
    }

    pub fn has_talent(&self, talent: &TalentId) -> bool {
        self.acquired_talents.contains(talent)
    }

    /// Returns `true` if every component of `self` is at most the matching
    /// component of `other`.
    pub fn is_dominated_by(&self, other: &Self) -> bool {
        self.total_xp_spent <= other.total_xp_spent
            && self
                .characteristic_advances
                .iter()
                .all(|(key, count)| *count <= other.advances_for(*key))
            && self
                .skill_levels
                .iter()
                .all(|(skill, level)| *level <= other.skill_level(skill))
            && self.acquired_talents.is_subset(&other.acquired_talents)
    }
}

/// Deterministic replay of ledger histories.
pub struct ReplayEngine;

impl ReplayEngine {
    /// Fold `entries` from an empty state.
    pub fn replay(entries: &[LedgerEntry]) -> AdvancementState {
        Self::replay_onto(AdvancementState::default(), entries)
    }

    /// Continue a fold from `state`, e.g. the replay of a prefix.
    ///
    /// Counts, talents and spend are folded in ledger order. Skill entries
    /// are folded by `(timestamp, id)`, so an imported history stored out of
    /// order still ends at the latest transition. For histories whose
    /// timestamps never go backwards,
    /// `replay_onto(replay(a), b) == replay(a ++ b)`.
    pub fn replay_onto(mut state: AdvancementState, entries: &[LedgerEntry]) -> AdvancementState {
        let mut skill_entries = Vec::new();
        for entry in entries {
            if matches!(entry.target, Target::Skill(_)) {
                skill_entries.push(entry);
            } else {
                apply_entry(&mut state, entry);
            }
        }

        skill_entries.sort_by_key(|entry| (entry.timestamp, entry.id));
        for entry in skill_entries {
            apply_entry(&mut state, entry);
        }
        state
    }
}

fn apply_entry(state: &mut AdvancementState, entry: &LedgerEntry) {
    state.total_xp_spent += u64::from(entry.xp_cost);

    match (entry.kind, &entry.target) {
        (
            AdvancementKind::CharacteristicMain | AdvancementKind::CharacteristicSecondary,
            Target::Characteristic(key),
        ) => {
            *state.characteristic_advances.entry(*key).or_insert(0) += 1;
        }
        (AdvancementKind::SkillAcquire, Target::Skill(skill)) => {
            state.skill_levels.insert(skill.clone(), SkillLevel::Acquired);
        }
        (AdvancementKind::SkillImprove, Target::Skill(skill)) => {
            let level = match entry.magnitude {
                10 => SkillLevel::Plus10,
                20 => SkillLevel::Plus20,
                // Flagged by HistoryValidator; the level is left unchanged.
                _ => return,
            };
            state.skill_levels.insert(skill.clone(), level);
        }
        (AdvancementKind::TalentAcquire, Target::Talent(talent)) => {
            state.acquired_talents.insert(talent.clone());
        }
        // Kind/target mismatch: cost is still counted, nothing else applies.
        _ => {}
    }
}
