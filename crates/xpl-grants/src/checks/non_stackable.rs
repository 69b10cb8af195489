use std::collections::BTreeSet;

use xpl_types::Career;

use super::cross_group::repeated_across_sources;
use crate::check::{GrantCheck, GrantKind};
use crate::issue::{GrantIssue, IssueCode};
use crate::selection::GrantSelections;

/// A talent may be granted more than once only if it is stackable.
pub struct NonStackableCheck {
    stackable: BTreeSet<String>,
}

impl NonStackableCheck {
    /// `stackable` holds talent names exempt from the check.
    pub fn new<I, S>(stackable: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stackable: stackable
                .into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .collect(),
        }
    }
}

impl GrantCheck for NonStackableCheck {
    fn name(&self) -> &str {
        "non_stackable"
    }

    fn check(&self, career: &Career, selections: &GrantSelections) -> Vec<GrantIssue> {
        repeated_across_sources(GrantKind::Talent, career, selections)
            .into_iter()
            .filter(|(talent, _)| !self.stackable.contains(&talent.key().name))
            .map(|(talent, _)| {
                GrantIssue::new(
                    IssueCode::NonStackable,
                    format!("talent {talent} is not stackable and cannot be granted twice"),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use xpl_types::Choice;

    use super::*;
    use crate::checks::fixtures::mercenary;

    fn repeat_required_talent() -> GrantSelections {
        GrantSelections::new()
            .with_talents("mercenary_talents", vec![Choice::new("Strike Mighty Blow")])
    }

    #[test]
    fn repeated_talent_is_reported() {
        let issues = NonStackableCheck::new(Vec::<String>::new())
            .check(&mercenary(), &repeat_required_talent());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, IssueCode::NonStackable);
    }

    #[test]
    fn stackable_talent_is_exempt() {
        let check = NonStackableCheck::new([" strike MIGHTY blow"]);
        assert!(check.check(&mercenary(), &repeat_required_talent()).is_empty());
    }

    #[test]
    fn distinct_talents_pass() {
        let selections =
            GrantSelections::new().with_talents("mercenary_talents", vec![Choice::new("Disarm")]);
        assert!(NonStackableCheck::new(Vec::<String>::new())
            .check(&mercenary(), &selections)
            .is_empty());
    }
}
