use async_trait::async_trait;
use serde_json::Value;

use super::domain::{Artefact, ArtefactId, ArtefactSearchRecord, ListTypeId, SearchFieldConfig};

/// Error enumeration for search-index collaborators.
#[derive(Debug, thiserror::Error)]
pub enum SearchStoreError {
    #[error("search configuration lookup failed: {0}")]
    Configuration(String),
    #[error("search store unavailable: {0}")]
    Unavailable(String),
}

/// Error enumeration for the artefact store.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("artefact registry unavailable: {0}")]
    Unavailable(String),
}

/// Supplies the per-list-type search field configuration.
#[async_trait]
pub trait SearchConfigSource: Send + Sync {
    /// `Ok(None)` means the list type is simply not searchable.
    async fn config_for_list_type(
        &self,
        list_type_id: &ListTypeId,
    ) -> Result<Option<SearchFieldConfig>, SearchStoreError>;
}

/// Persistence for the flat per-artefact case search index.
#[async_trait]
pub trait ArtefactSearchStore: Send + Sync {
    async fn delete_for_artefact(&self, artefact_id: &ArtefactId) -> Result<(), SearchStoreError>;

    async fn insert(&self, record: ArtefactSearchRecord) -> Result<(), SearchStoreError>;

    /// Exact match against either the case number or the case name.
    async fn find_by_case_value(
        &self,
        value: &str,
    ) -> Result<Vec<ArtefactSearchRecord>, SearchStoreError>;
}

/// Storage abstraction for published artefacts and their raw payloads.
#[async_trait]
pub trait ArtefactRegistry: Send + Sync {
    async fn save(&self, artefact: Artefact, payload: Value) -> Result<(), RegistryError>;

    async fn fetch(&self, artefact_id: &ArtefactId) -> Result<Option<Artefact>, RegistryError>;

    async fn payload(&self, artefact_id: &ArtefactId) -> Result<Option<Value>, RegistryError>;

    async fn for_location(&self, location_id: &str) -> Result<Vec<Artefact>, RegistryError>;
}
