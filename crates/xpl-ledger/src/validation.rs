use serde::Serialize;
use xpl_types::{AdvancementKind, Target};

use crate::entry::{is_supported_schema, LedgerEntry};

/// Result of history validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub entry_count: usize,
    pub ids_monotonic: bool,
    pub timestamps_ordered: bool,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A specific integrity violation detected during validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub index: usize,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    IdOutOfOrder,
    TimestampOutOfOrder,
    UnsupportedSchema,
    KindTargetMismatch,
    InvalidMagnitude,
}

/// Integrity checks for histories loaded from outside the process.
///
/// Histories built through guards always pass. Replay stays well-defined
/// for histories that do not; this report explains what replay will
/// tolerate.
pub struct HistoryValidator;

impl HistoryValidator {
    pub fn validate(entries: &[LedgerEntry]) -> ValidationReport {
        let mut violations = Vec::new();
        let mut ids_monotonic = true;
        let mut timestamps_ordered = true;

        for (index, entry) in entries.iter().enumerate() {
            if index > 0 {
                let previous = &entries[index - 1];
                if entry.id <= previous.id {
                    ids_monotonic = false;
                    violations.push(Violation {
                        index,
                        kind: ViolationKind::IdOutOfOrder,
                        description: format!("id {} does not sort after {}", entry.id, previous.id),
                    });
                }
                if entry.timestamp < previous.timestamp {
                    timestamps_ordered = false;
                    violations.push(Violation {
                        index,
                        kind: ViolationKind::TimestampOutOfOrder,
                        description: format!(
                            "timestamp {} is earlier than {}",
                            entry.timestamp, previous.timestamp
                        ),
                    });
                }
            }

            if !is_supported_schema(entry.schema_version) {
                violations.push(Violation {
                    index,
                    kind: ViolationKind::UnsupportedSchema,
                    description: format!("schema version {}", entry.schema_version),
                });
            }

            if !kind_matches_target(entry.kind, &entry.target) {
                violations.push(Violation {
                    index,
                    kind: ViolationKind::KindTargetMismatch,
                    description: format!("{} entry targets {:?}", entry.kind, entry.target),
                });
            }

            if entry.kind == AdvancementKind::SkillImprove && !matches!(entry.magnitude, 10 | 20) {
                violations.push(Violation {
                    index,
                    kind: ViolationKind::InvalidMagnitude,
                    description: format!("skill improvement of {}", entry.magnitude),
                });
            }
        }

        for violation in &violations {
            tracing::warn!(
                index = violation.index,
                kind = ?violation.kind,
                "{}",
                violation.description
            );
        }

        ValidationReport {
            entry_count: entries.len(),
            ids_monotonic,
            timestamps_ordered,
            violations,
        }
    }
}

fn kind_matches_target(kind: AdvancementKind, target: &Target) -> bool {
    match (kind, target) {
        (AdvancementKind::CharacteristicMain, Target::Characteristic(key)) => !key.is_secondary(),
        (AdvancementKind::CharacteristicSecondary, Target::Characteristic(key)) => {
            key.is_secondary()
        }
        (AdvancementKind::SkillAcquire | AdvancementKind::SkillImprove, Target::Skill(_)) => true,
        (AdvancementKind::TalentAcquire, Target::Talent(_)) => true,
        _ => false,
    }
}
