//! Purchase guards for the XP Ledger.
//!
//! Every advancement purchase must pass a guard before an entry may be
//! appended to the ledger. Guards are pure: they read a [`GuardContext`]
//! snapshot, check preconditions in a fixed order, stop at the first failure,
//! and report either the exact XP cost to charge or a rejection reason.
//!
//! # Quick Start
//!
//! ```rust
//! use xpl_gate::{AdvancementGate, GuardContext};
//! use xpl_ledger::AdvancementState;
//! use xpl_types::{Career, CharacteristicKey};
//!
//! let mut career = Career::new("soldier", "Soldier");
//! career.characteristic_caps.insert(CharacteristicKey::WeaponSkill, 2);
//!
//! let state = AdvancementState::default();
//! let ctx = GuardContext::new(250, Some(&career), &state);
//! let gate = AdvancementGate::standard();
//!
//! let result = gate.guard_characteristic(&ctx, CharacteristicKey::WeaponSkill);
//! assert_eq!(result.cost(), Some(100));
//! ```

pub mod config;
pub mod context;
pub mod decision;
pub mod error;
pub mod gate;

pub use config::GateConfig;
pub use context::GuardContext;
pub use decision::{GuardResult, RejectReason, Rejection, RejectionDetails};
pub use error::GateError;
pub use gate::{AdvancementGate, PurchaseRequest};
