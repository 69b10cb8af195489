use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::GrantError;

/// Optional grant checks. Both are off by default.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrantPolicy {
    /// Reject an entry granted by more than one source (the required list or
    /// any pick-group).
    pub cross_group_duplicates: bool,
    /// Reject a talent granted more than once unless it is listed in
    /// `stackable_talents`.
    pub non_stackable_talents: bool,
    /// Talent names exempt from the non-stackable check. Compared trimmed and
    /// case-folded.
    pub stackable_talents: BTreeSet<String>,
}

impl GrantPolicy {
    /// Policy with every optional check enabled.
    pub fn strict() -> Self {
        Self {
            cross_group_duplicates: true,
            non_stackable_talents: true,
            stackable_talents: BTreeSet::new(),
        }
    }

    pub fn validate(&self) -> Result<(), GrantError> {
        if self.stackable_talents.iter().any(|t| t.trim().is_empty()) {
            return Err(GrantError::Config(
                "stackable talent names must not be blank".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_off() {
        let policy = GrantPolicy::default();
        assert!(!policy.cross_group_duplicates);
        assert!(!policy.non_stackable_talents);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn strict_enables_both_checks() {
        let policy = GrantPolicy::strict();
        assert!(policy.cross_group_duplicates);
        assert!(policy.non_stackable_talents);
    }

    #[test]
    fn deserializes_partial_json() {
        let policy: GrantPolicy =
            serde_json::from_str(r#"{ "non_stackable_talents": true }"#).unwrap();
        assert!(policy.non_stackable_talents);
        assert!(!policy.cross_group_duplicates);
    }

    #[test]
    fn blank_stackable_name_is_rejected() {
        let mut policy = GrantPolicy::default();
        policy.stackable_talents.insert(" ".into());
        assert!(matches!(policy.validate(), Err(GrantError::Config(_))));
    }
}
