//! Offline content-integrity audit of career definitions.
//!
//! A pick-group that asks for more picks than it offers can never be
//! satisfied, and a player would be stuck at career entry. These checks run
//! against the catalog (in CI or from `xpl audit`), never during a session.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use xpl_types::Career;

use crate::check::GrantKind;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum AuditProblem {
    /// `required_count` is zero.
    ZeroRequiredCount,
    /// The group asks for more picks than it offers.
    RequiredExceedsOptions { required: usize, options: usize },
    NoOptions,
    /// Two groups of the same kind share an id, so selections are ambiguous.
    DuplicateGroupId,
    /// Two careers in the catalog share an id.
    DuplicateCareerId,
    /// `career_class` is set but names no known class.
    UnknownCareerClass { class: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuditFinding {
    pub career_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<GrantKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    pub problem: AuditProblem,
    pub message: String,
}

impl fmt::Display for AuditFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Audit one career's class and pick-groups.
pub fn audit_career(career: &Career) -> Vec<AuditFinding> {
    let mut findings = Vec::new();
    if career.class().is_err() {
        findings.push(AuditFinding {
            career_id: career.id.clone(),
            kind: None,
            group_id: None,
            problem: AuditProblem::UnknownCareerClass {
                class: career.career_class.clone(),
            },
            message: format!(
                "{}: invalid career class '{}'",
                career.name, career.career_class
            ),
        });
    }
    for kind in GrantKind::BOTH {
        let mut seen = BTreeSet::new();
        for group in &kind.block(career).groups {
            let mut report = |problem: AuditProblem, message: String| {
                findings.push(AuditFinding {
                    career_id: career.id.clone(),
                    kind: Some(kind),
                    group_id: Some(group.group_id.clone()),
                    problem,
                    message: format!("{}: {kind} group {} {message}", career.name, group.group_id),
                });
            };

            if !seen.insert(group.group_id.as_str()) {
                report(AuditProblem::DuplicateGroupId, "reuses an existing group id".into());
            }
            if group.required_count == 0 {
                report(
                    AuditProblem::ZeroRequiredCount,
                    "has invalid pick count: 0".into(),
                );
            }
            if group.options.is_empty() {
                report(AuditProblem::NoOptions, "has no options".into());
            } else if group.required_count > group.options.len() {
                report(
                    AuditProblem::RequiredExceedsOptions {
                        required: group.required_count,
                        options: group.options.len(),
                    },
                    format!(
                        "requires {} picks but only has {} options",
                        group.required_count,
                        group.options.len()
                    ),
                );
            }
        }
    }
    findings
}

/// Audit every career, plus catalog-wide checks such as duplicate ids.
pub fn audit_catalog<'a, I>(careers: I) -> Vec<AuditFinding>
where
    I: IntoIterator<Item = &'a Career>,
{
    let mut findings = Vec::new();
    let mut ids = BTreeSet::new();
    for career in careers {
        if !ids.insert(career.id.as_str()) {
            findings.push(AuditFinding {
                career_id: career.id.clone(),
                kind: None,
                group_id: None,
                problem: AuditProblem::DuplicateCareerId,
                message: format!("{}: career id {} is used more than once", career.name, career.id),
            });
        }
        findings.extend(audit_career(career));
    }
    for finding in &findings {
        tracing::warn!(career = %finding.career_id, "{}", finding.message);
    }
    findings
}

#[cfg(test)]
mod tests {
    use xpl_types::{Choice, PickGroup};

    use super::*;

    fn career_with_groups(groups: Vec<PickGroup>) -> Career {
        let mut career = Career::new("scribe", "Scribe");
        career.skills.groups = groups;
        career
    }

    #[test]
    fn sound_career_has_no_findings() {
        let career = career_with_groups(vec![PickGroup::new(
            "lore",
            1,
            vec![Choice::new("Read/Write"), Choice::new("Evaluate")],
        )]);
        assert!(audit_career(&career).is_empty());
    }

    #[test]
    fn required_count_must_fit_options() {
        let career = career_with_groups(vec![PickGroup::new(
            "lore",
            3,
            vec![Choice::new("Read/Write"), Choice::new("Evaluate")],
        )]);
        let findings = audit_career(&career);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].problem,
            AuditProblem::RequiredExceedsOptions {
                required: 3,
                options: 2
            }
        );
        assert_eq!(
            findings[0].message,
            "Scribe: skill group lore requires 3 picks but only has 2 options"
        );
    }

    #[test]
    fn zero_count_and_empty_options() {
        let career = career_with_groups(vec![PickGroup::new("empty", 0, Vec::new())]);
        let problems: Vec<_> = audit_career(&career)
            .into_iter()
            .map(|f| f.problem)
            .collect();
        assert_eq!(
            problems,
            vec![AuditProblem::ZeroRequiredCount, AuditProblem::NoOptions]
        );
    }

    #[test]
    fn duplicate_group_ids_within_a_kind() {
        let group = PickGroup::new("lore", 1, vec![Choice::new("Evaluate")]);
        let mut career = career_with_groups(vec![group.clone(), group.clone()]);
        career.talents.groups = vec![group];

        let findings = audit_career(&career);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].problem, AuditProblem::DuplicateGroupId);
        assert_eq!(findings[0].kind, Some(GrantKind::Skill));
    }

    #[test]
    fn unknown_career_class_is_flagged() {
        let mut career = Career::new("scribe", "Scribe");
        career.career_class = "Academic".into();
        assert!(audit_career(&career).is_empty());

        career.career_class = "Wizard".into();
        let findings = audit_career(&career);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].problem,
            AuditProblem::UnknownCareerClass {
                class: "Wizard".into()
            }
        );
        assert_eq!(findings[0].message, "Scribe: invalid career class 'Wizard'");
    }

    #[test]
    fn catalog_detects_duplicate_career_ids() {
        let careers = vec![Career::new("scribe", "Scribe"), Career::new("scribe", "Clerk")];
        let findings = audit_catalog(&careers);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].problem, AuditProblem::DuplicateCareerId);
        assert_eq!(findings[0].kind, None);
    }
}
