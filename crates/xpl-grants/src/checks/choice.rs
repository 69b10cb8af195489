use xpl_types::Career;

use crate::check::{GrantCheck, GrantKind};
use crate::issue::{GrantIssue, IssueCode};
use crate::selection::GrantSelections;

/// Every pick must be one of its group's offered options, and every group id
/// in the selections must exist on the career.
pub struct ChoiceCheck;

impl GrantCheck for ChoiceCheck {
    fn name(&self) -> &str {
        "choice"
    }

    fn check(&self, career: &Career, selections: &GrantSelections) -> Vec<GrantIssue> {
        let mut issues = Vec::new();
        for kind in GrantKind::BOTH {
            let block = kind.block(career);

            for group in &block.groups {
                for pick in selections.picks(kind, &group.group_id) {
                    if !group.offers(pick) {
                        issues.push(
                            GrantIssue::new(
                                IssueCode::InvalidChoice,
                                format!("Invalid {kind} choice: {pick}"),
                            )
                            .in_group(&group.group_id),
                        );
                    }
                }
            }

            for group_id in selections.for_kind(kind).keys() {
                if !block.groups.iter().any(|g| &g.group_id == group_id) {
                    issues.push(
                        GrantIssue::new(
                            IssueCode::InvalidChoice,
                            format!("Unknown {kind} group: {group_id}"),
                        )
                        .in_group(group_id),
                    );
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
    fn normalized_options_are_accepted() {
        let selections = GrantSelections::new().with_skills(
            "mercenary_skills",
            vec![
                Choice::new("  ride "),
                Choice::with_spec("SPEAK LANGUAGE", " tilean"),
            ],
        );
        assert!(ChoiceCheck.check(&mercenary(), &selections).is_empty());
    }

    #[test]
    fn option_from_another_group_is_invalid() {
        let selections = GrantSelections::new()
            .with_skills("mercenary_skills", vec![Choice::new("Disarm")])
            .with_talents("mercenary_talents", vec![Choice::new("Swim")]);
        let issues = ChoiceCheck.check(&mercenary(), &selections);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.code == IssueCode::InvalidChoice));
        assert_eq!(issues[0].message, "Invalid skill choice: Disarm");
        assert_eq!(issues[1].message, "Invalid talent choice: Swim");
    }

    #[test]
    fn specialization_must_match() {
        let selections = GrantSelections::new().with_skills(
            "mercenary_skills",
            vec![Choice::with_spec("Speak Language", "Breton")],
        );
        let issues = ChoiceCheck.check(&mercenary(), &selections);
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].message,
            "Invalid skill choice: Speak Language (Breton)"
        );
    }

    #[test]
    fn unknown_group_is_invalid() {
        let selections =
            GrantSelections::new().with_talents("wizard_talents", vec![Choice::new("Aethyric Attunement")]);
        let issues = ChoiceCheck.check(&mercenary(), &selections);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].group_id.as_deref(), Some("wizard_talents"));
    }
}
