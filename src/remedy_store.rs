//! # Remedy Store Module
//!
//! Static lookup from disease label to the list of recommended actions,
//! backed by a JSON document of the form
//! `{"Late Blight": {"actions": ["...", "..."]}, ...}`.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Action returned when a label has no entry in the document
pub const NO_REMEDY_ACTION: &str = "No remedy found in database.";

/// Recommended actions for one disease, in document order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemedyEntry {
    pub actions: Vec<String>,
}

impl RemedyEntry {
    /// The entry served for labels missing from the document
    pub fn fallback() -> Self {
        Self {
            actions: vec![NO_REMEDY_ACTION.to_string()],
        }
    }
}

/// Read-only mapping from disease label to remedy entry
#[derive(Debug, Clone, Default)]
pub struct RemedyStore {
    entries: HashMap<String, RemedyEntry>,
}

impl RemedyStore {
    /// Load the remedy document from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid
    /// remedy document.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading remedy document from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read remedy document {}", path.display()))?;

        let store = Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse remedy document {}", path.display()))?;

        info!("Loaded {} remedy entries", store.len());
        Ok(store)
    }

    /// Parse a remedy document held in memory
    pub fn from_json_str(content: &str) -> Result<Self> {
        let entries: HashMap<String, RemedyEntry> =
            serde_json::from_str(content).context("Remedy document is not valid JSON")?;
        Ok(Self { entries })
    }

    /// Look up the remedy for a disease label, falling back to the default entry
    pub fn lookup(&self, disease: &str) -> RemedyEntry {
        match self.entries.get(disease) {
            Some(entry) => entry.clone(),
            None => {
                debug!("No remedy entry for label: {disease}");
                RemedyEntry::fallback()
            }
        }
    }

    pub fn contains(&self, disease: &str) -> bool {
        self.entries.contains_key(disease)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, RemedyEntry)> for RemedyStore {
    fn from_iter<I: IntoIterator<Item = (String, RemedyEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_preserves_action_order() {
        let store = RemedyStore::from_json_str(
            r#"{"Leaf Spot": {"actions": ["Remove leaves", "Apply copper", "Water at base"]}}"#,
        )
        .unwrap();

        let entry = store.lookup("Leaf Spot");
        assert_eq!(entry.actions, vec!["Remove leaves", "Apply copper", "Water at base"]);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let store =
            RemedyStore::from_json_str(r#"{"Leaf Spot": {"actions": ["Remove leaves"]}}"#).unwrap();
        assert_eq!(store.lookup("leaf spot"), RemedyEntry::fallback());
    }

    #[test]
    fn test_entry_without_actions_is_rejected() {
        assert!(RemedyStore::from_json_str(r#"{"Leaf Spot": {"steps": []}}"#).is_err());
    }
}
