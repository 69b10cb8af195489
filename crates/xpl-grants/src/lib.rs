//! Career-entry grant validation.
//!
//! When a character enters a career they receive the career's required
//! skills and talents plus one pick per slot of every "pick N of M" group.
//! The [`GrantValidator`] runs a pipeline of [`GrantCheck`]s over the
//! player's [`GrantSelections`], accumulating every issue, and only produces
//! a [`GrantBundle`] when nothing is wrong.
//!
//! The [`audit`] module checks catalog content offline; it is never part of
//! a player session.

pub mod audit;
pub mod check;
pub mod checks;
pub mod config;
pub mod error;
pub mod issue;
pub mod selection;
pub mod validator;

pub use audit::{audit_career, audit_catalog, AuditFinding, AuditProblem};
pub use check::{GrantCheck, GrantKind};
pub use config::GrantPolicy;
pub use error::GrantError;
pub use issue::{GrantIssue, IssueCode};
pub use selection::GrantSelections;
pub use validator::{GrantBundle, GrantValidator};
