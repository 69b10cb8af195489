use serde::{Deserialize, Serialize};
use xpl_ledger::LedgerEntry;
use xpl_types::{AdvancementKind, EntryId, Target};

/// What an accepted purchase recorded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    pub entry_id: EntryId,
    pub kind: AdvancementKind,
    pub target: Target,
    pub cost: u32,
    pub magnitude: u32,
    pub note: Option<String>,
    /// XP left after the purchase.
    pub xp_remaining: u32,
}

impl PurchaseReceipt {
    pub(crate) fn for_entry(entry: &LedgerEntry, xp_remaining: u32) -> Self {
        Self {
            entry_id: entry.id,
            kind: entry.kind,
            target: entry.target.clone(),
            cost: entry.xp_cost,
            magnitude: entry.magnitude,
            note: entry.note.clone(),
            xp_remaining,
        }
    }
}
