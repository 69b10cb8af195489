use std::collections::BTreeMap;

use xpl_types::Career;

use crate::error::SdkResult;

/// Source of career definitions.
pub trait CareerCatalog {
    /// Look up a career by id.
    fn career(&self, id: &str) -> Option<&Career>;

    /// All careers, ordered by id.
    fn careers(&self) -> Vec<&Career>;
}

/// A catalog held in memory, keyed by career id.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCatalog {
    careers: BTreeMap<String, Career>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a career, returning the one it replaced.
    pub fn insert(&mut self, career: Career) -> Option<Career> {
        self.careers.insert(career.id.clone(), career)
    }

    pub fn len(&self) -> usize {
        self.careers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.careers.is_empty()
    }

    /// Load a catalog from a JSON array of careers. Later duplicates replace
    /// earlier ones; run the content audit on [`parse_careers`] output to
    /// catch them.
    pub fn from_json(json: &str) -> SdkResult<Self> {
        Ok(parse_careers(json)?.into_iter().collect())
    }
}

impl FromIterator<Career> for InMemoryCatalog {
    fn from_iter<I: IntoIterator<Item = Career>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for career in iter {
            catalog.insert(career);
        }
        catalog
    }
}

impl CareerCatalog for InMemoryCatalog {
    fn career(&self, id: &str) -> Option<&Career> {
        self.careers.get(id)
    }

    fn careers(&self) -> Vec<&Career> {
        self.careers.values().collect()
    }
}

/// Parse a JSON array of careers without de-duplicating.
pub fn parse_careers(json: &str) -> SdkResult<Vec<Career>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SdkError;

    const CATALOG: &str = r#"[
        { "id": "soldier", "name": "Soldier", "characteristic_caps": { "weaponSkill": 2 } },
        { "id": "scribe", "name": "Scribe" },
        { "id": "soldier", "name": "Veteran" }
    ]"#;

    #[test]
    fn from_json_keys_by_id() {
        let catalog = InMemoryCatalog::from_json(CATALOG).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.career("soldier").unwrap().name, "Veteran");
        assert!(catalog.career("wizard").is_none());

        let ids: Vec<_> = catalog.careers().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["scribe", "soldier"]);
    }

    #[test]
    fn parse_keeps_duplicates() {
        assert_eq!(parse_careers(CATALOG).unwrap().len(), 3);
    }

    #[test]
    fn malformed_catalog_is_an_error() {
        let err = InMemoryCatalog::from_json("{").unwrap_err();
        assert!(matches!(err, SdkError::Serialization(_)));
    }
}
