use std::collections::{BTreeMap, BTreeSet};

use xpl_types::{Career, Choice, ChoiceKey};

use crate::check::{granted_by_source, GrantCheck, GrantKind};
use crate::issue::{GrantIssue, IssueCode};
use crate::selection::GrantSelections;

/// No entry may be granted by more than one source, where the required list
/// and each pick-group are separate sources.
///
/// Repeats inside a single group are left to [`super::DuplicateCheck`].
pub struct CrossGroupCheck;

impl GrantCheck for CrossGroupCheck {
    fn name(&self) -> &str {
        "cross_group"
    }

    fn check(&self, career: &Career, selections: &GrantSelections) -> Vec<GrantIssue> {
        let mut issues = Vec::new();
        for kind in GrantKind::BOTH {
            for (choice, sources) in repeated_across_sources(kind, career, selections) {
                issues.push(GrantIssue::new(
                    IssueCode::DuplicateCrossGroup,
                    format!("{kind} {choice} is granted by {sources} sources"),
                ));
            }
        }
        issues
    }
}

/// Entries of `kind` that appear in more than one source, with the number of
/// sources granting them. Ordered by normalized key.
pub(crate) fn repeated_across_sources<'a>(
    kind: GrantKind,
    career: &'a Career,
    selections: &'a GrantSelections,
) -> Vec<(&'a Choice, usize)> {
    let mut counts: BTreeMap<ChoiceKey, (&Choice, usize)> = BTreeMap::new();
    for source in granted_by_source(kind, career, selections) {
        let mut in_source = BTreeSet::new();
        for choice in source {
            let key = choice.key();
            if in_source.insert(key.clone()) {
                counts.entry(key).or_insert((choice, 0)).1 += 1;
            }
        }
    }
    counts
        .into_values()
        .filter(|(_, count)| *count > 1)
        .collect()
}
