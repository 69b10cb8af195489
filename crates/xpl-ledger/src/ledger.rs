use serde::{Deserialize, Serialize};

use crate::entry::{is_supported_schema, LedgerEntry, SCHEMA_VERSION};
use crate::error::LedgerError;

/// Append-only history of advancement purchases.
///
/// The ledger has no other state: skill levels, advance counts, and XP spent
/// are always recomputed from it by [`crate::ReplayEngine`]. Serialized as a
/// plain ordered JSON array of entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entry` to the end of the history.
    ///
    /// Never fails: whether the purchase is allowed was decided by a guard
    /// before this call.
    pub fn append(&mut self, entry: LedgerEntry) {
        tracing::info!(
            id = %entry.id,
            kind = %entry.kind,
            target = %entry.target,
            xp_cost = entry.xp_cost,
            "ledger entry appended"
        );
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&LedgerEntry> {
        self.entries.last()
    }

    /// The first `len` entries (clamped to the ledger length).
    pub fn prefix(&self, len: usize) -> &[LedgerEntry] {
        &self.entries[..len.min(self.entries.len())]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LedgerEntry> {
        self.entries.iter()
    }

    pub fn to_json(&self) -> Result<String, LedgerError> {
        serde_json::to_string_pretty(&self.entries)
            .map_err(|e| LedgerError::Serialization(e.to_string()))
    }

    /// Load a persisted history.
    ///
    /// Older schema versions load as-is; version 0 and entries written by a
    /// newer schema are refused.
    pub fn from_json(json: &str) -> Result<Self, LedgerError> {
        let entries: Vec<LedgerEntry> =
            serde_json::from_str(json).map_err(|e| LedgerError::Serialization(e.to_string()))?;
        let ledger = Self { entries };
        ledger.check_schema()?;
        Ok(ledger)
    }

    /// Fails on the first entry whose schema version is 0 or newer than this
    /// build understands.
    pub fn check_schema(&self) -> Result<(), LedgerError> {
        match self
            .entries
            .iter()
            .enumerate()
            .find(|(_, e)| !is_supported_schema(e.schema_version))
        {
            Some((index, entry)) => Err(LedgerError::UnsupportedSchemaVersion {
                index,
                found: entry.schema_version,
                supported: SCHEMA_VERSION,
            }),
            None => Ok(()),
        }
    }

    /// BLAKE3 digest of the canonical JSON encoding of the history.
    ///
    /// Two ledgers with equal digests replay to the same state.
    pub fn digest(&self) -> Result<[u8; 32], LedgerError> {
        let encoded = serde_json::to_vec(&self.entries)
            .map_err(|e| LedgerError::Serialization(e.to_string()))?;
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"xpl-ledger-v1:");
        hasher.update(&encoded);
        Ok(*hasher.finalize().as_bytes())
    }

    pub fn digest_hex(&self) -> Result<String, LedgerError> {
        Ok(hex::encode(self.digest()?))
    }
}

impl From<Vec<LedgerEntry>> for Ledger {
    fn from(entries: Vec<LedgerEntry>) -> Self {
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a LedgerEntry;
    type IntoIter = std::slice::Iter<'a, LedgerEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use xpl_types::{Advance, CharacteristicKey, TalentId};

    use super::*;

    fn entry(advance: Advance) -> LedgerEntry {
        LedgerEntry::record(&advance, 1, 100, None)
    }

    #[test]
    fn append_keeps_order() {
        let mut ledger = Ledger::new();
        let first = entry(Advance::Characteristic(CharacteristicKey::Wounds));
        let second = entry(Advance::Talent(TalentId::new("Luck")));
        ledger.append(first.clone());
        ledger.append(second.clone());

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.entries(), &[first, second.clone()]);
        assert_eq!(ledger.last(), Some(&second));
    }

    #[test]
    fn prefix_is_clamped() {
        let mut ledger = Ledger::new();
        ledger.append(entry(Advance::Talent(TalentId::new("Luck"))));
        assert_eq!(ledger.prefix(0).len(), 0);
        assert_eq!(ledger.prefix(1).len(), 1);
        assert_eq!(ledger.prefix(10).len(), 1);
    }

    #[test]
    fn json_is_a_plain_array() {
        let mut ledger = Ledger::new();
        ledger.append(entry(Advance::Talent(TalentId::new("Luck"))));
        let json = ledger.to_json().unwrap();
        assert!(json.trim_start().starts_with('['));
        assert_eq!(Ledger::from_json(&json).unwrap(), ledger);
    }

    #[test]
    fn newer_schema_is_refused() {
        let mut ledger = Ledger::new();
        let mut e = entry(Advance::Talent(TalentId::new("Luck")));
        e.schema_version = SCHEMA_VERSION + 1;
        ledger.append(e);
        let json = ledger.to_json().unwrap();

        let err = Ledger::from_json(&json).unwrap_err();
        assert_eq!(
            err,
            LedgerError::UnsupportedSchemaVersion {
                index: 0,
                found: SCHEMA_VERSION + 1,
                supported: SCHEMA_VERSION,
            }
        );
    }

    #[test]
    fn schema_version_zero_is_refused() {
        let mut ledger = Ledger::new();
        ledger.append(entry(Advance::Talent(TalentId::new("Luck"))));
        let mut e = entry(Advance::Talent(TalentId::new("Sturdy")));
        e.schema_version = 0;
        ledger.append(e);

        let err = Ledger::from_json(&ledger.to_json().unwrap()).unwrap_err();
        assert_eq!(
            err,
            LedgerError::UnsupportedSchemaVersion {
                index: 1,
                found: 0,
                supported: SCHEMA_VERSION,
            }
        );
        assert!(!crate::HistoryValidator::validate(ledger.entries()).is_valid());
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = Ledger::from_json("{ not json").unwrap_err();
        assert!(matches!(err, LedgerError::Serialization(_)));
    }

    #[test]
    fn digest_tracks_content() {
        let mut ledger = Ledger::new();
        let empty = ledger.digest().unwrap();
        ledger.append(entry(Advance::Talent(TalentId::new("Luck"))));
        let one = ledger.digest().unwrap();
        assert_ne!(empty, one);
        assert_eq!(one, ledger.clone().digest().unwrap());
        assert_eq!(ledger.digest_hex().unwrap().len(), 64);
    }
}
