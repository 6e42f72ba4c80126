use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use super::domain::{Artefact, ArtefactId, ArtefactSearchRecord};
use super::repository::{ArtefactRegistry, ArtefactSearchStore, RegistryError, SearchStoreError};

#[derive(Debug, Clone)]
struct StoredPublication {
    artefact: Artefact,
    payload: Value,
}

/// Artefact store backed by process memory, used by `serve` mode and tests.
#[derive(Default, Clone)]
pub struct InMemoryArtefactRegistry {
    records: Arc<Mutex<BTreeMap<ArtefactId, StoredPublication>>>,
}

#[async_trait]
impl ArtefactRegistry for InMemoryArtefactRegistry {
    async fn save(&self, artefact: Artefact, payload: Value) -> Result<(), RegistryError> {
        let mut guard = self.records.lock().expect("registry mutex poisoned");
        guard.insert(
            artefact.artefact_id.clone(),
            StoredPublication { artefact, payload },
        );
        Ok(())
    }

    async fn fetch(&self, artefact_id: &ArtefactId) -> Result<Option<Artefact>, RegistryError> {
        let guard = self.records.lock().expect("registry mutex poisoned");
        Ok(guard.get(artefact_id).map(|stored| stored.artefact.clone()))
    }

    async fn payload(&self, artefact_id: &ArtefactId) -> Result<Option<Value>, RegistryError> {
        let guard = self.records.lock().expect("registry mutex poisoned");
        Ok(guard.get(artefact_id).map(|stored| stored.payload.clone()))
    }

    async fn for_location(&self, location_id: &str) -> Result<Vec<Artefact>, RegistryError> {
        let guard = self.records.lock().expect("registry mutex poisoned");
        Ok(guard
            .values()
            .filter(|stored| stored.artefact.location_id == location_id)
            .map(|stored| stored.artefact.clone())
            .collect())
    }
}

/// Search index backed by process memory.
#[derive(Default, Clone)]
pub struct InMemorySearchStore {
    records: Arc<Mutex<Vec<ArtefactSearchRecord>>>,
}

impl InMemorySearchStore {
    /// Current index rows for one artefact, in insertion order.
    pub fn records_for(&self, artefact_id: &ArtefactId) -> Vec<ArtefactSearchRecord> {
        let guard = self.records.lock().expect("search store mutex poisoned");
        guard
            .iter()
            .filter(|record| record.artefact_id == *artefact_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ArtefactSearchStore for InMemorySearchStore {
    async fn delete_for_artefact(&self, artefact_id: &ArtefactId) -> Result<(), SearchStoreError> {
        let mut guard = self.records.lock().expect("search store mutex poisoned");
        guard.retain(|record| record.artefact_id != *artefact_id);
        Ok(())
    }

    async fn insert(&self, record: ArtefactSearchRecord) -> Result<(), SearchStoreError> {
        let mut guard = self.records.lock().expect("search store mutex poisoned");
        guard.push(record);
        Ok(())
    }

    async fn find_by_case_value(
        &self,
        value: &str,
    ) -> Result<Vec<ArtefactSearchRecord>, SearchStoreError> {
        let guard = self.records.lock().expect("search store mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| {
                record.case_number.as_deref() == Some(value)
                    || record.case_name.as_deref() == Some(value)
            })
            .cloned()
            .collect())
    }
}
