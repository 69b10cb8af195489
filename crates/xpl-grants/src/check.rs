use std::fmt;

use serde::{Deserialize, Serialize};
use xpl_types::{Career, Choice, GrantBlock};

use crate::issue::GrantIssue;
use crate::selection::GrantSelections;

/// Which half of a career's entry grants a group belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantKind {
    Skill,
    Talent,
}

impl GrantKind {
    pub const BOTH: [GrantKind; 2] = [GrantKind::Skill, GrantKind::Talent];

    /// The career's grant block for this kind.
    pub fn block(self, career: &Career) -> &GrantBlock {
        match self {
            Self::Skill => &career.skills,
            Self::Talent => &career.talents,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skill => "skill",
            Self::Talent => "talent",
        }
    }
}

impl fmt::Display for GrantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single check in the grant validation pipeline.
///
/// Unlike the purchase guards, checks never stop the pipeline: every check
/// runs and the validator returns the union of their issues.
///
/// The trait is object-safe and `Send + Sync` so checks can be stored in a
/// `Vec<Box<dyn GrantCheck>>`.
pub trait GrantCheck: Send + Sync {
    /// Short name used in logs (e.g. "count", "choice").
    fn name(&self) -> &str;

    /// Inspect the selections against the career and report every problem.
    fn check(&self, career: &Career, selections: &GrantSelections) -> Vec<GrantIssue>;
}

/// Every entry a career would grant for `kind`, grouped by source: the
/// required list first, then each pick-group's selections in career order.
pub(crate) fn granted_by_source<'a>(
    kind: GrantKind,
    career: &'a Career,
    selections: &'a GrantSelections,
) -> Vec<&'a [Choice]> {
    let block = kind.block(career);
    let mut sources = Vec::with_capacity(block.groups.len() + 1);
    sources.push(block.required.as_slice());
    for group in &block.groups {
        sources.push(selections.picks(kind, &group.group_id));
    }
    sources
}
