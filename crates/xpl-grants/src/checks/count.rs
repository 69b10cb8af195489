use xpl_types::Career;

use crate::check::{GrantCheck, GrantKind};
use crate::issue::{GrantIssue, IssueCode};
use crate::selection::GrantSelections;

/// Every pick-group must receive exactly `required_count` picks.
pub struct CountCheck;

impl GrantCheck for CountCheck {
    fn name(&self) -> &str {
        "count"
    }

    fn check(&self, career: &Career, selections: &GrantSelections) -> Vec<GrantIssue> {
        let mut issues = Vec::new();
        for kind in GrantKind::BOTH {
            for group in &kind.block(career).groups {
                let actual = selections.picks(kind, &group.group_id).len();
                if actual != group.required_count {
                    issues.push(
                        GrantIssue::new(
                            IssueCode::WrongCount,
                            format!(
                                "Pick exactly {} {kind}(s) in group {}.",
                                group.required_count, group.group_id
                            ),
                        )
                        .in_group(&group.group_id)
                        .with_counts(group.required_count, actual),
                    );
                }
            }
        }
        issues
    }
}
