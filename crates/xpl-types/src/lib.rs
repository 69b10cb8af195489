//! Foundation types for the XP Ledger (XPL).
//!
//! This crate provides the value types shared by every other XPL crate:
//! characteristic keys, typed advancement targets, career definitions, and the
//! pure cost schedule. Every other XPL crate depends on `xpl-types`.
//!
//! # Key Types
//!
//! - [`CharacteristicKey`]: The eleven advanceable characteristics
//! - [`AdvancementKind`]: Closed set of purchase kinds recorded in the ledger
//! - [`Target`]: What a purchase applies to (characteristic, skill, or talent)
//! - [`Advance`]: A requested purchase, the input to cost lookup and guards
//! - [`SkillLevel`]: none / acquired / +10% / +20%
//! - [`CareerClass`]: The five career classes
//! - [`Career`]: Catalog entry with characteristic caps and entry grants
//! - [`Choice`]: A skill or talent name with optional specialization
//! - [`CostSchedule`]: XP cost and step size per purchase
//! - [`EntryId`]: UUID v7 ledger entry identifier

pub mod advancement;
pub mod career;
pub mod characteristic;
pub mod choice;
pub mod cost;
pub mod entry_id;
pub mod error;

pub use advancement::{Advance, AdvancementKind, SkillId, SkillLevel, TalentId, Target};
pub use career::{Career, CareerClass, GrantBlock, PickGroup};
pub use characteristic::CharacteristicKey;
pub use choice::{Choice, ChoiceKey};
pub use cost::CostSchedule;
pub use entry_id::EntryId;
pub use error::TypeError;
