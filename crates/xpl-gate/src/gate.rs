use std::fmt;

use serde::{Deserialize, Serialize};
use xpl_types::{Advance, CharacteristicKey, SkillId, SkillLevel, TalentId};

use crate::config::GateConfig;
use crate::context::GuardContext;
use crate::decision::{GuardResult, RejectReason, Rejection, RejectionDetails};
use crate::error::GateError;

// ---------------------------------------------------------------------------
// PurchaseRequest
// ---------------------------------------------------------------------------

/// A purchase as requested by a player, before any guard has run.
///
/// Skill requests carry the raw target level so that out-of-range input
/// reaches the guard and is rejected as `INVALID_TARGET` rather than failing
/// to construct.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseRequest {
    Characteristic(CharacteristicKey),
    Skill { skill: SkillId, target_level: u8 },
    Talent(TalentId),
}

impl PurchaseRequest {
    /// The advance this request would record, or `None` for a skill level
    /// outside `1..=3`.
    pub fn advance(&self) -> Option<Advance> {
        match self {
            Self::Characteristic(key) => Some(Advance::Characteristic(*key)),
            Self::Skill {
                skill,
                target_level,
            } => match SkillLevel::try_from(*target_level) {
                Ok(SkillLevel::None) | Err(_) => None,
                Ok(level) => Some(Advance::Skill {
                    skill: skill.clone(),
                    level,
                }),
            },
            Self::Talent(talent) => Some(Advance::Talent(talent.clone())),
        }
    }
}

impl fmt::Display for PurchaseRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Characteristic(key) => write!(f, "{key} advance"),
            Self::Skill {
                skill,
                target_level,
            } => write!(f, "{skill} level {target_level}"),
            Self::Talent(talent) => write!(f, "talent {talent}"),
        }
    }
}

// ---------------------------------------------------------------------------
// AdvancementGate
// ---------------------------------------------------------------------------

/// Decides whether a purchase may be appended to the ledger.
///
/// Each guard checks its preconditions in a fixed order and stops at the
/// first failure. Guards never mutate the context.
#[derive(Clone, Debug, Default)]
pub struct AdvancementGate {
    config: GateConfig,
}

impl AdvancementGate {
    /// Gate over the standard cost table with every talent non-stackable.
    pub fn standard() -> Self {
        Self::default()
    }

    /// Create a gate, validating the configuration first.
    pub fn try_new(config: GateConfig) -> Result<Self, GateError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn guard_characteristic(
        &self,
        ctx: &GuardContext<'_>,
        key: CharacteristicKey,
    ) -> GuardResult {
        let Some(career) = ctx.career else {
            return log_decision("characteristic", key.as_str(), no_career());
        };

        let cost = self.config.costs.characteristic_cost(key);
        if let Some(rejection) = shortfall(cost, ctx.xp_available) {
            return log_decision("characteristic", key.as_str(), rejection.into());
        }

        let cap = career.cap_for(key);
        let current = ctx.state.advances_for(key);
        if current >= cap {
            let rejection = Rejection::new(
                RejectReason::AtCapForCareer,
                format!("{key} is at career cap ({cap} advances)"),
            )
            .with_details(RejectionDetails::Cap { cap, current });
            return log_decision("characteristic", key.as_str(), rejection.into());
        }

        log_decision("characteristic", key.as_str(), GuardResult::Accepted { cost })
    }

    pub fn guard_skill(
        &self,
        ctx: &GuardContext<'_>,
        skill: &SkillId,
        target_level: u8,
    ) -> GuardResult {
        if ctx.career.is_none() {
            return log_decision("skill", skill.as_str(), no_career());
        }

        let level = match SkillLevel::try_from(target_level) {
            Ok(level) if level != SkillLevel::None => level,
            _ => {
                let rejection =
                    Rejection::new(RejectReason::InvalidTarget, "Skill level must be 1-3");
                return log_decision("skill", skill.as_str(), rejection.into());
            }
        };

        let current = ctx.state.skill_level(skill);
        if current.next() != Some(level) {
            let rejection = Rejection::new(
                RejectReason::MissingPrerequisite,
                format!(
                    "Must advance skills sequentially. Currently at level {}",
                    current.as_u8()
                ),
            )
            .with_details(RejectionDetails::Level {
                current: current.as_u8(),
                requested: target_level,
            });
            return log_decision("skill", skill.as_str(), rejection.into());
        }

        let cost = self.config.costs.skill_cost(level);
        if let Some(rejection) = shortfall(cost, ctx.xp_available) {
            return log_decision("skill", skill.as_str(), rejection.into());
        }

        log_decision("skill", skill.as_str(), GuardResult::Accepted { cost })
    }

    pub fn guard_talent(&self, ctx: &GuardContext<'_>, talent: &TalentId) -> GuardResult {
        if ctx.career.is_none() {
            return log_decision("talent", talent.as_str(), no_career());
        }

        if ctx.state.has_talent(talent) && !self.config.is_stackable(talent) {
            let rejection =
                Rejection::new(RejectReason::TalentNotStackable, "Talent already acquired");
            return log_decision("talent", talent.as_str(), rejection.into());
        }

        let cost = self.config.costs.talent_acquire;
        if let Some(rejection) = shortfall(cost, ctx.xp_available) {
            return log_decision("talent", talent.as_str(), rejection.into());
        }

        log_decision("talent", talent.as_str(), GuardResult::Accepted { cost })
    }

    /// Dispatch a request to the matching guard.
    pub fn evaluate(&self, ctx: &GuardContext<'_>, request: &PurchaseRequest) -> GuardResult {
        match request {
            PurchaseRequest::Characteristic(key) => self.guard_characteristic(ctx, *key),
            PurchaseRequest::Skill {
                skill,
                target_level,
            } => self.guard_skill(ctx, skill, *target_level),
            PurchaseRequest::Talent(talent) => self.guard_talent(ctx, talent),
        }
    }

    /// Affordability only; ignores career and caps. Used for display.
    pub fn can_afford_characteristic(&self, ctx: &GuardContext<'_>, key: CharacteristicKey) -> bool {
        ctx.xp_available >= self.config.costs.characteristic_cost(key)
    }
}

fn no_career() -> GuardResult {
    Rejection::new(RejectReason::NoActiveCareer, "No active career selected").into()
}

fn shortfall(cost: u32, available: u32) -> Option<Rejection> {
    (available < cost).then(|| {
        Rejection::new(
            RejectReason::InsufficientXp,
            format!("Need {cost} XP, have {available}"),
        )
        .with_details(RejectionDetails::Shortfall { cost, available })
    })
}

fn log_decision(family: &str, target: &str, result: GuardResult) -> GuardResult {
    match &result {
        GuardResult::Accepted { cost } => {
            tracing::debug!(family, target, cost, "purchase accepted");
        }
        GuardResult::Rejected(rejection) => {
            tracing::debug!(
                family,
                target,
                reason = rejection.reason.code(),
                "purchase rejected: {}",
                rejection.message
            );
        }
    }
    result
}
