use serde::{Deserialize, Serialize};
use xpl_types::{Career, Choice};

use crate::check::{GrantCheck, GrantKind};
use crate::checks::{ChoiceCheck, CountCheck, CrossGroupCheck, DuplicateCheck, NonStackableCheck};
use crate::config::GrantPolicy;
use crate::error::GrantError;
use crate::issue::GrantIssue;
use crate::selection::GrantSelections;

// ---------------------------------------------------------------------------
// GrantBundle
// ---------------------------------------------------------------------------

/// Skills and talents granted on career entry, not yet merged into a
/// character. Required entries come first, then each group's picks in career
/// order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantBundle {
    pub skills: Vec<Choice>,
    pub talents: Vec<Choice>,
}

impl GrantBundle {
    pub fn len(&self) -> usize {
        self.skills.len() + self.talents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty() && self.talents.is_empty()
    }
}

// ---------------------------------------------------------------------------
// GrantValidator
// ---------------------------------------------------------------------------

/// Runs every grant check and applies grants all-or-nothing.
pub struct GrantValidator {
    checks: Vec<Box<dyn GrantCheck>>,
    policy: GrantPolicy,
}

impl GrantValidator {
    /// Create a validator with an empty pipeline.
    pub fn new(policy: GrantPolicy) -> Self {
        Self {
            checks: Vec::new(),
            policy,
        }
    }

    /// Create a validator with the standard pipeline:
    /// Count -> Choice -> Duplicate, followed by the optional checks the
    /// policy enables.
    pub fn with_default_checks(policy: GrantPolicy) -> Self {
        let mut validator = Self::new(policy);
        validator.add_check(Box::new(CountCheck));
        validator.add_check(Box::new(ChoiceCheck));
        validator.add_check(Box::new(DuplicateCheck));
        if validator.policy.cross_group_duplicates {
            validator.add_check(Box::new(CrossGroupCheck));
        }
        if validator.policy.non_stackable_talents {
            let check = NonStackableCheck::new(&validator.policy.stackable_talents);
            validator.add_check(Box::new(check));
        }
        validator
    }

    /// Like [`Self::with_default_checks`], validating the policy first.
    pub fn try_with_policy(policy: GrantPolicy) -> Result<Self, GrantError> {
        policy.validate()?;
        Ok(Self::with_default_checks(policy))
    }

    /// Append a check to the end of the pipeline.
    pub fn add_check(&mut self, check: Box<dyn GrantCheck>) {
        self.checks.push(check);
    }

    pub fn policy(&self) -> &GrantPolicy {
        &self.policy
    }

    pub fn check_count(&self) -> usize {
        self.checks.len()
    }

    /// Names of the checks in pipeline order.
    pub fn check_names(&self) -> Vec<&str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Run every check and return all issues. An empty list means the
    /// selections may be applied.
    pub fn validate(&self, career: &Career, selections: &GrantSelections) -> Vec<GrantIssue> {
        let mut issues = Vec::new();
        for check in &self.checks {
            let found = check.check(career, selections);
            tracing::debug!(
                career = %career.id,
                check = check.name(),
                issues = found.len(),
                "grant check finished"
            );
            issues.extend(found);
        }
        issues
    }

    /// Validate, then grant the required entries plus every pick. Nothing is
    /// granted if any issue exists.
    pub fn apply(
        &self,
        career: &Career,
        selections: &GrantSelections,
    ) -> Result<GrantBundle, Vec<GrantIssue>> {
        let issues = self.validate(career, selections);
        if !issues.is_empty() {
            return Err(issues);
        }

        let bundle = GrantBundle {
            skills: flatten(GrantKind::Skill, career, selections),
            talents: flatten(GrantKind::Talent, career, selections),
        };
        tracing::info!(
            career = %career.id,
            skills = bundle.skills.len(),
            talents = bundle.talents.len(),
            "career entry grants validated"
        );
        Ok(bundle)
    }
}

impl Default for GrantValidator {
    fn default() -> Self {
        Self::with_default_checks(GrantPolicy::default())
    }
}

/// Required entries, then each pick as the catalog spells it.
fn flatten(kind: GrantKind, career: &Career, selections: &GrantSelections) -> Vec<Choice> {
    let block = kind.block(career);
    let picked = block.groups.iter().flat_map(|group| {
        selections
            .picks(kind, &group.group_id)
            .iter()
            .map(move |pick| group.options.iter().find(|o| o.matches(pick)).unwrap_or(pick))
    });
    block.required.iter().chain(picked).cloned().collect()
}
