use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RejectReason
// ---------------------------------------------------------------------------

/// Closed taxonomy of guard rejections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    NoActiveCareer,
    InsufficientXp,
    AtCapForCareer,
    MissingPrerequisite,
    TalentNotStackable,
    InvalidTarget,
}

impl RejectReason {
    /// Stable machine-readable code, e.g. `"INSUFFICIENT_XP"`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoActiveCareer => "NO_ACTIVE_CAREER",
            Self::InsufficientXp => "INSUFFICIENT_XP",
            Self::AtCapForCareer => "AT_CAP_FOR_CAREER",
            Self::MissingPrerequisite => "MISSING_PREREQUISITE",
            Self::TalentNotStackable => "TALENT_NOT_STACKABLE",
            Self::InvalidTarget => "INVALID_TARGET",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// Rejection
// ---------------------------------------------------------------------------

/// Diagnostic payload attached to some rejections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum RejectionDetails {
    Shortfall { cost: u32, available: u32 },
    Cap { cap: u32, current: u32 },
    Level { current: u8, requested: u8 },
}

/// A rejected purchase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub reason: RejectReason,
    /// Human-readable explanation.
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<RejectionDetails>,
}

impl Rejection {
    pub fn new(reason: RejectReason, message: impl Into<String>) -> Self {
        Self {
            reason,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: RejectionDetails) -> Self {
        self.details = Some(details);
        self
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.reason, self.message)
    }
}

// ---------------------------------------------------------------------------
// GuardResult
// ---------------------------------------------------------------------------

/// Outcome of a guard: accepted with the exact cost to charge, or rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum GuardResult {
    Accepted { cost: u32 },
    Rejected(Rejection),
}

impl GuardResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Cost to charge, if accepted.
    pub fn cost(&self) -> Option<u32> {
        match self {
            Self::Accepted { cost } => Some(*cost),
            Self::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Accepted { .. } => None,
            Self::Rejected(rejection) => Some(rejection),
        }
    }

    pub fn reason(&self) -> Option<RejectReason> {
        self.rejection().map(|r| r.reason)
    }

    /// Converts into a `Result`, for callers that want `?`.
    pub fn into_result(self) -> Result<u32, Rejection> {
        match self {
            Self::Accepted { cost } => Ok(cost),
            Self::Rejected(rejection) => Err(rejection),
        }
    }
}

impl From<Rejection> for GuardResult {
    fn from(rejection: Rejection) -> Self {
        Self::Rejected(rejection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_serde_names() {
        for reason in [
            RejectReason::NoActiveCareer,
            RejectReason::InsufficientXp,
            RejectReason::AtCapForCareer,
            RejectReason::MissingPrerequisite,
            RejectReason::TalentNotStackable,
            RejectReason::InvalidTarget,
        ] {
            let json = serde_json::to_string(&reason).unwrap();
            assert_eq!(json, format!("\"{}\"", reason.code()));
        }
    }

    #[test]
    fn rejected_result_serializes_with_details() {
        let result = GuardResult::from(
            Rejection::new(RejectReason::InsufficientXp, "Need 200 XP, have 50").with_details(
                RejectionDetails::Shortfall {
                    cost: 200,
                    available: 50,
                },
            ),
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["outcome"], "rejected");
        assert_eq!(json["reason"], "INSUFFICIENT_XP");
        assert_eq!(json["details"]["type"], "shortfall");
        assert_eq!(json["details"]["cost"], 200);

        let back: GuardResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn accessors() {
        let accepted = GuardResult::Accepted { cost: 100 };
        assert!(accepted.is_accepted());
        assert_eq!(accepted.cost(), Some(100));
        assert_eq!(accepted.reason(), None);
        assert_eq!(accepted.into_result(), Ok(100));

        let rejected = GuardResult::from(Rejection::new(RejectReason::NoActiveCareer, "x"));
        assert_eq!(rejected.cost(), None);
        assert_eq!(rejected.reason(), Some(RejectReason::NoActiveCareer));
        assert_eq!(rejected.rejection().unwrap().to_string(), "NO_ACTIVE_CAREER: x");
    }
}
