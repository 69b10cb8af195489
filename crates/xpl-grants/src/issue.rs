use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed taxonomy of grant problems.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    WrongCount,
    InvalidChoice,
    DuplicateInGroup,
    DuplicateCrossGroup,
    NonStackable,
    AlreadyApplied,
    NoCareer,
    InvalidCareer,
    NoChoices,
}

impl IssueCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::WrongCount => "WRONG_COUNT",
            Self::InvalidChoice => "INVALID_CHOICE",
            Self::DuplicateInGroup => "DUPLICATE_IN_GROUP",
            Self::DuplicateCrossGroup => "DUPLICATE_CROSS_GROUP",
            Self::NonStackable => "NON_STACKABLE",
            Self::AlreadyApplied => "ALREADY_APPLIED",
            Self::NoCareer => "NO_CAREER",
            Self::InvalidCareer => "INVALID_CAREER",
            Self::NoChoices => "NO_CHOICES",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One problem found while validating or applying grants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantIssue {
    pub code: IssueCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<usize>,
}

impl GrantIssue {
    pub fn new(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            group_id: None,
            expected: None,
            actual: None,
        }
    }

    pub fn in_group(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    pub fn with_counts(mut self, expected: usize, actual: usize) -> Self {
        self.expected = Some(expected);
        self.actual = Some(actual);
        self
    }

    pub fn already_applied() -> Self {
        Self::new(
            IssueCode::AlreadyApplied,
            "Career entry grants have already been applied",
        )
    }

    pub fn no_career() -> Self {
        Self::new(IssueCode::NoCareer, "No career selected")
    }

    pub fn invalid_career(career_id: &str) -> Self {
        Self::new(
            IssueCode::InvalidCareer,
            format!("Invalid career ID: {career_id}"),
        )
    }

    pub fn no_choices() -> Self {
        Self::new(IssueCode::NoChoices, "No career entry choices have been made")
    }
}

impl fmt::Display for GrantIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}
