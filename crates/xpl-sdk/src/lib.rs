//! High-level SDK for the XP Ledger.
//!
//! A [`CharacterDraft`] owns a character's ledger, its career, and its
//! entry-grant flag. It is the only caller that appends to the ledger: every
//! purchase goes through a guard first, and derived state is always replayed
//! from the ledger rather than stored.

pub mod catalog;
pub mod draft;
pub mod error;
pub mod purchase;

pub use catalog::{CareerCatalog, InMemoryCatalog};
pub use draft::CharacterDraft;
pub use error::{SdkError, SdkResult};
pub use purchase::PurchaseReceipt;

// Re-export key types
pub use xpl_gate::{AdvancementGate, GateConfig, GuardResult, PurchaseRequest, RejectReason, Rejection};
pub use xpl_grants::{GrantBundle, GrantIssue, GrantPolicy, GrantSelections, GrantValidator, IssueCode};
pub use xpl_ledger::{AdvancementState, Ledger, LedgerEntry};
pub use xpl_types::{Career, CharacteristicKey, Choice, SkillId, TalentId};
