//! Access to the host's variable collections.

use std::collections::HashSet;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::{
    error::SourceError,
    model::{Variable, VariableCollection},
};

/// Lookups against the design tool's variable store.
///
/// Every call is a suspension point; the walkers await each one before
/// issuing the next, so implementations never see concurrent calls from a
/// single export.
#[async_trait]
pub trait VariableSource: Send + Sync {
    /// All local collections, in the host's order.
    async fn local_collections(&self) -> Result<Vec<VariableCollection>, SourceError>;
    async fn variable_by_id(&self, id: &str) -> Result<Option<Variable>, SourceError>;
    async fn collection_by_id(&self, id: &str) -> Result<Option<VariableCollection>, SourceError>;
}

/// Snapshot of a file's variables, as exported from the host.
#[derive(Debug, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub collections: Vec<VariableCollection>,
    #[serde(default)]
    pub variables: Vec<Variable>,
}

/// In-memory [`VariableSource`] that preserves source order.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    collections: IndexMap<String, VariableCollection>,
    variables: IndexMap<String, Variable>,
    failing: HashSet<String>,
    fail_enumeration: bool,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut source = Self::new();
        for collection in snapshot.collections {
            source = source.with_collection(collection);
        }
        for variable in snapshot.variables {
            source = source.with_variable(variable);
        }
        source
    }
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let snapshot: Snapshot =
            serde_json::from_str(json).map_err(|err| SourceError::Snapshot {
                message: err.to_string(),
            })?;
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn with_collection(mut self, collection: VariableCollection) -> Self {
        self.collections.insert(collection.id.clone(), collection);
        self
    }
    pub fn with_variable(mut self, variable: Variable) -> Self {
        self.variables.insert(variable.id.clone(), variable);
        self
    }
    /// Makes every lookup of `id` (variable or collection) fail.
    pub fn with_failing_lookup(mut self, id: impl Into<String>) -> Self {
        self.failing.insert(id.into());
        self
    }
    /// Makes [`VariableSource::local_collections`] fail.
    pub fn with_failing_enumeration(mut self) -> Self {
        self.fail_enumeration = true;
        self
    }

    fn check(&self, kind: &'static str, id: &str) -> Result<(), SourceError> {
        if self.failing.contains(id) {
            return Err(SourceError::lookup(kind, id, "lookup rejected by source"));
        }
        Ok(())
    }
}

#[async_trait]
impl VariableSource for MemorySource {
    async fn local_collections(&self) -> Result<Vec<VariableCollection>, SourceError> {
        if self.fail_enumeration {
            return Err(SourceError::Enumeration {
                message: "collections unavailable".to_string(),
            });
        }
        Ok(self.collections.values().cloned().collect())
    }
    async fn variable_by_id(&self, id: &str) -> Result<Option<Variable>, SourceError> {
        self.check("variable", id)?;
        Ok(self.variables.get(id).cloned())
    }
    async fn collection_by_id(&self, id: &str) -> Result<Option<VariableCollection>, SourceError> {
        self.check("collection", id)?;
        Ok(self.collections.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "collections": [
            { "id": "c2", "name": "Semantic", "defaultModeId": "m2",
              "modes": [{ "modeId": "m2", "name": "Default" }], "variableIds": ["v2"] },
            { "id": "c1", "name": "Core", "defaultModeId": "m1",
              "modes": [{ "modeId": "m1", "name": "Default" }], "variableIds": ["v1"] }
        ],
        "variables": [
            { "id": "v1", "name": "color/red", "variableCollectionId": "c1",
              "valuesByMode": { "m1": { "r": 1, "g": 0, "b": 0, "a": 1 } } },
            { "id": "v2", "name": "text/danger", "variableCollectionId": "c2",
              "valuesByMode": { "m2": { "type": "VARIABLE_ALIAS", "id": "v1" } } }
        ]
    }"#;

    #[tokio::test]
    async fn snapshot_keeps_source_order() {
        let source = MemorySource::from_json(SNAPSHOT).unwrap();
        let names: Vec<_> = source
            .local_collections()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Semantic", "Core"]);
    }

    #[tokio::test]
    async fn lookups() {
        let source = MemorySource::from_json(SNAPSHOT).unwrap();
        assert_eq!(
            source.variable_by_id("v1").await.unwrap().unwrap().name,
            "color/red"
        );
        assert_eq!(source.variable_by_id("nope").await.unwrap(), None);
        assert_eq!(
            source.collection_by_id("c1").await.unwrap().unwrap().name,
            "Core"
        );
    }

    #[tokio::test]
    async fn injected_failures() {
        let source = MemorySource::from_json(SNAPSHOT)
            .unwrap()
            .with_failing_lookup("v1")
            .with_failing_enumeration();
        assert!(source.variable_by_id("v1").await.is_err());
        assert!(source.local_collections().await.is_err());
    }

    #[test]
    fn invalid_snapshot() {
        let err = MemorySource::from_json("{ nope").unwrap_err();
        assert!(matches!(err, SourceError::Snapshot { .. }));
    }
}
