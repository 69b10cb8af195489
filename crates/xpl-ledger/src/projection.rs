use chrono::{DateTime, Utc};
use serde::Serialize;
use xpl_types::{AdvancementKind, EntryId, Target};

use crate::entry::LedgerEntry;

/// Row in the purchase history, for audit and display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HistoryRow {
    pub index: usize,
    pub id: EntryId,
    pub timestamp: DateTime<Utc>,
    pub kind: AdvancementKind,
    pub target: Target,
    pub xp_cost: u32,
    /// XP spent up to and including this entry.
    pub running_total: u64,
    pub summary: String,
}

/// Deterministic projection builders.
pub struct ProjectionBuilder;

impl ProjectionBuilder {
    pub fn history(entries: &[LedgerEntry]) -> Vec<HistoryRow> {
        let mut running_total = 0u64;
        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                running_total += u64::from(entry.xp_cost);
                HistoryRow {
                    index,
                    id: entry.id,
                    timestamp: entry.timestamp,
                    kind: entry.kind,
                    target: entry.target.clone(),
                    xp_cost: entry.xp_cost,
                    running_total,
                    summary: summarize(entry),
                }
            })
            .collect()
    }
}

fn summarize(entry: &LedgerEntry) -> String {
    match entry.kind {
        AdvancementKind::CharacteristicMain | AdvancementKind::SkillImprove => {
            format!("+{}% ({} XP)", entry.magnitude, entry.xp_cost)
        }
        AdvancementKind::CharacteristicSecondary => {
            format!("+{} ({} XP)", entry.magnitude, entry.xp_cost)
        }
        AdvancementKind::SkillAcquire | AdvancementKind::TalentAcquire => {
            format!("acquired ({} XP)", entry.xp_cost)
        }
    }
}

#[cfg(test)]
mod tests {
    use xpl_types::{Advance, CharacteristicKey, CostSchedule, SkillId, SkillLevel, TalentId};

    use super::*;
    use crate::ledger::Ledger;

    fn ledger_of(advances: &[Advance]) -> Ledger {
        let costs = CostSchedule::standard();
        let mut ledger = Ledger::new();
        for advance in advances {
            ledger.append(LedgerEntry::record(
                advance,
                costs.step_size_of(advance),
                costs.cost_of(advance),
                None,
            ));
        }
        ledger
    }

    #[test]
    fn history_has_running_totals() {
        let ledger = ledger_of(&[
            Advance::Characteristic(CharacteristicKey::Toughness),
            Advance::Skill {
                skill: SkillId::new("Dodge Blow"),
                level: SkillLevel::Acquired,
            },
            Advance::Skill {
                skill: SkillId::new("Dodge Blow"),
                level: SkillLevel::Plus10,
            },
            Advance::Skill {
                skill: SkillId::new("Dodge Blow"),
                level: SkillLevel::Plus20,
            },
        ]);

        let rows = ProjectionBuilder::history(ledger.entries());
        let totals: Vec<u64> = rows.iter().map(|r| r.running_total).collect();
        assert_eq!(totals, vec![100, 200, 300, 500]);
        assert_eq!(rows[3].index, 3);
    }

    #[test]
    fn summaries_follow_kind() {
        let ledger = ledger_of(&[
            Advance::Characteristic(CharacteristicKey::Fellowship),
            Advance::Characteristic(CharacteristicKey::Attacks),
            Advance::Talent(TalentId::new("Luck")),
        ]);

        let rows = ProjectionBuilder::history(ledger.entries());
        assert_eq!(rows[0].summary, "+5% (100 XP)");
        assert_eq!(rows[1].summary, "+1 (100 XP)");
        assert_eq!(rows[2].summary, "acquired (100 XP)");
    }

    #[test]
    fn history_is_deterministic() {
        let ledger = ledger_of(&[Advance::Talent(TalentId::new("Suave"))]);
        assert_eq!(
            ProjectionBuilder::history(ledger.entries()),
            ProjectionBuilder::history(ledger.entries())
        );
    }
}
