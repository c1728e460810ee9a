//! Ordered, de-duplicated catalog lists

use std::collections::HashSet;
use std::hash::Hash;

use tracing::warn;

use super::builtin;
use super::entity::{CatalogEntry, ModelId, ValidatorId};

/// Ordered list of catalog entries, unique by id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogList<I> {
    entries: Vec<CatalogEntry<I>>,
}

impl<I> CatalogList<I>
where
    I: Clone + Eq + Hash + std::fmt::Display,
{
    /// Build a list keeping the first occurrence of every id.
    ///
    /// `name` only appears in the warning emitted for dropped duplicates.
    pub fn from_entries(name: &str, entries: impl IntoIterator<Item = CatalogEntry<I>>) -> Self {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();

        for entry in entries {
            if seen.insert(entry.id.clone()) {
                unique.push(entry);
            } else {
                warn!(list = name, id = %entry.id, "Dropping duplicate catalog entry");
            }
        }

        Self { entries: unique }
    }

    pub fn contains(&self, id: &I) -> bool {
        self.entries.iter().any(|e| &e.id == id)
    }

    pub fn label_for(&self, id: &I) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| &e.id == id)
            .map(|e| e.label.as_str())
    }

    pub fn entries(&self) -> &[CatalogEntry<I>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The validators and models a key can be configured with.
///
/// Provided once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorCatalog {
    input: CatalogList<ValidatorId>,
    output: CatalogList<ValidatorId>,
    models: CatalogList<ModelId>,
}

impl ValidatorCatalog {
    pub fn new(
        input: impl IntoIterator<Item = CatalogEntry<ValidatorId>>,
        output: impl IntoIterator<Item = CatalogEntry<ValidatorId>>,
        models: impl IntoIterator<Item = CatalogEntry<ModelId>>,
    ) -> Self {
        Self {
            input: CatalogList::from_entries("input", input),
            output: CatalogList::from_entries("output", output),
            models: CatalogList::from_entries("models", models),
        }
    }

    /// Catalog shipped with the guardrail service
    pub fn builtin() -> Self {
        Self::new(
            builtin::input_validators(),
            builtin::output_validators(),
            builtin::models(),
        )
    }

    pub fn input(&self) -> &CatalogList<ValidatorId> {
        &self.input
    }

    pub fn output(&self) -> &CatalogList<ValidatorId> {
        &self.output
    }

    pub fn models(&self) -> &CatalogList<ModelId> {
        &self.models
    }

    pub fn is_input(&self, id: &ValidatorId) -> bool {
        self.input.contains(id)
    }

    pub fn is_output(&self, id: &ValidatorId) -> bool {
        self.output.contains(id)
    }

    pub fn is_model(&self, id: &ModelId) -> bool {
        self.models.contains(id)
    }
}

impl Default for ValidatorCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
