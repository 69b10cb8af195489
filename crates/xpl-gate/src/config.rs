use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use xpl_types::{CostSchedule, TalentId};

use crate::error::GateError;

/// Configuration for the purchase guards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Cost table used for every guard decision.
    pub costs: CostSchedule,
    /// Talents that may be purchased more than once. Empty by default: every
    /// talent is non-stackable.
    pub stackable_talents: BTreeSet<TalentId>,
}

impl GateConfig {
    /// Reject configurations under which advancement would be meaningless.
    pub fn validate(&self) -> Result<(), GateError> {
        if self.costs.main_step == 0 || self.costs.secondary_step == 0 {
            return Err(GateError::Config(
                "characteristic step sizes must be positive".into(),
            ));
        }
        if let Some(blank) = self
            .stackable_talents
            .iter()
            .find(|t| t.as_str().trim().is_empty())
        {
            return Err(GateError::Config(format!(
                "stackable talent id {:?} is blank",
                blank.as_str()
            )));
        }
        Ok(())
    }

    pub fn is_stackable(&self, talent: &TalentId) -> bool {
        self.stackable_talents.contains(talent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid_and_standard() {
        let config = GateConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.costs, CostSchedule::standard());
        assert!(config.stackable_talents.is_empty());
    }

    #[test]
    fn zero_step_is_rejected() {
        let mut config = GateConfig::default();
        config.costs.main_step = 0;
        assert!(matches!(config.validate(), Err(GateError::Config(_))));
    }

    #[test]
    fn blank_stackable_talent_is_rejected() {
        let mut config = GateConfig::default();
        config.stackable_talents.insert(TalentId::new("  "));
        assert!(config.validate().is_err());
    }

    #[test]
    fn deserializes_partial_json() {
        let config: GateConfig =
            serde_json::from_str(r#"{ "stackable_talents": ["Sturdy"] }"#).unwrap();
        assert!(config.is_stackable(&TalentId::new("Sturdy")));
        assert_eq!(config.costs, CostSchedule::standard());
    }
}
