//! Append-only advancement ledger for the XP Ledger (XPL).
//!
//! This crate is the source of truth for a character's advancement. It
//! provides:
//! - The immutable [`LedgerEntry`] record
//! - The append-only [`Ledger`]
//! - Deterministic replay of a history into [`AdvancementState`]
//! - Projection builders (audit history rows)
//! - History validation for externally supplied ledgers

pub mod entry;
pub mod error;
pub mod ledger;
pub mod projection;
pub mod replay;
pub mod validation;

pub use entry::{is_supported_schema, LedgerEntry, SCHEMA_VERSION};
pub use error::LedgerError;
pub use ledger::Ledger;
pub use projection::{HistoryRow, ProjectionBuilder};
pub use replay::{AdvancementState, ReplayEngine};
pub use validation::{HistoryValidator, ValidationReport, Violation, ViolationKind};
