use std::collections::BTreeSet;

use xpl_types::Career;

use crate::check::{GrantCheck, GrantKind};
use crate::issue::{GrantIssue, IssueCode};
use crate::selection::GrantSelections;

/// No option may be picked twice within one group.
pub struct DuplicateCheck;

impl GrantCheck for DuplicateCheck {
    fn name(&self) -> &str {
        "duplicate"
    }

    fn check(&self, career: &Career, selections: &GrantSelections) -> Vec<GrantIssue> {
        let mut issues = Vec::new();
        for kind in GrantKind::BOTH {
            for group in &kind.block(career).groups {
                let mut seen = BTreeSet::new();
                let mut reported = BTreeSet::new();
                for pick in selections.picks(kind, &group.group_id) {
                    let key = pick.key();
                    if !seen.insert(key.clone()) && reported.insert(key) {
                        issues.push(
                            GrantIssue::new(
                                IssueCode::DuplicateInGroup,
                                format!(
                                    "{pick} chosen more than once in {kind} group {}",
                                    group.group_id
                                ),
                            )
                            .in_group(&group.group_id),
                        );
                    }
                }
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use xpl_types::Choice;

    use super::*;
    use crate::checks::fixtures::mercenary;

    #[test]
    fn distinct_picks_pass() {
        let selections = GrantSelections::new()
            .with_skills("mercenary_skills", vec![Choice::new("Ride"), Choice::new("Swim")]);
        assert!(DuplicateCheck.check(&mercenary(), &selections).is_empty());
    }

    #[test]
    fn normalized_repeat_is_reported_once() {
        let selections = GrantSelections::new().with_skills(
            "mercenary_skills",
            vec![Choice::new("Ride"), Choice::new("ride "), Choice::new("RIDE")],
        );
        let issues = DuplicateCheck.check(&mercenary(), &selections);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, IssueCode::DuplicateInGroup);
        assert_eq!(issues[0].group_id.as_deref(), Some("mercenary_skills"));
    }

    #[test]
    fn different_specializations_are_distinct() {
        let mut career = mercenary();
        career.skills.groups[0].options.push(Choice::with_spec("Speak Language", "Breton"));
        let selections = GrantSelections::new().with_skills(
            "mercenary_skills",
            vec![
                Choice::with_spec("Speak Language", "Tilean"),
                Choice::with_spec("Speak Language", "Breton"),
            ],
        );
        assert!(DuplicateCheck.check(&career, &selections).is_empty());
    }
}
