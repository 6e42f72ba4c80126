use std::sync::Arc;

use async_trait::async_trait;
use axum::response::Response;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{json, Value};

use crate::publications::catalog::ListTypeCatalog;
use crate::publications::domain::{
    Artefact, ArtefactId, ArtefactSearchRecord, Language, ListType, ListTypeId, SearchFieldConfig,
    Sensitivity, Viewer, ViewerRole,
};
use crate::publications::memory::{InMemoryArtefactRegistry, InMemorySearchStore};
use crate::publications::repository::{ArtefactSearchStore, SearchConfigSource, SearchStoreError};
use crate::publications::search::ArtefactSearchIndexer;
use crate::publications::service::{PublicationService, PublicationSubmission};

pub(super) const COURT_PROVENANCE: &str = "COURT_GATEWAY";
pub(super) const CRIME_PROVENANCE: &str = "CRIME_GATEWAY";

pub(super) fn datetime(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("valid date")
        .and_hms_opt(hour, 0, 0)
        .expect("valid time")
}

pub(super) fn list_type(id: &str, provenance: &str) -> ListType {
    ListType {
        id: ListTypeId(id.to_string()),
        name: id.to_string(),
        friendly_name: id.to_string(),
        provenance: provenance.to_string(),
    }
}

pub(super) fn artefact(id: &str, sensitivity: Sensitivity, list_type_id: &str) -> Artefact {
    Artefact {
        artefact_id: ArtefactId(id.to_string()),
        location_id: "100".to_string(),
        list_type_id: ListTypeId(list_type_id.to_string()),
        sensitivity,
        provenance: COURT_PROVENANCE.to_string(),
        language: Language::English,
        content_date: NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date"),
        display_from: datetime(2026, 3, 1, 8),
        display_to: datetime(2026, 3, 8, 20),
    }
}

pub(super) fn viewer(role: ViewerRole) -> Viewer {
    Viewer::new(role, "ADMIN_PORTAL")
}

pub(super) fn verified(provenance: &str) -> Viewer {
    Viewer::new(ViewerRole::Verified, provenance)
}

pub(super) fn fields(number: Option<&str>, name: Option<&str>) -> SearchFieldConfig {
    SearchFieldConfig::new(number, name)
}

pub(super) fn artefact_id(raw: &str) -> ArtefactId {
    ArtefactId(raw.to_string())
}

pub(super) fn list_type_id(raw: &str) -> ListTypeId {
    ListTypeId(raw.to_string())
}

/// Civil daily cause list shape: cases live under
/// courtLists[].courtHouse.courtRoom[].session[].sittings[].hearing[].case[].
pub(super) fn civil_list_payload() -> Value {
    json!({
        "document": { "publicationDate": "2026-03-02T09:00:00Z" },
        "courtLists": [
            {
                "courtHouse": {
                    "courtHouseName": "Central County Court",
                    "courtRoom": [
                        {
                            "courtRoomName": "Courtroom 1",
                            "session": [
                                {
                                    "sittings": [
                                        {
                                            "sittingStart": "09:30",
                                            "hearing": [
                                                {
                                                    "case": [
                                                        {
                                                            "caseNumber": "CASE-1001",
                                                            "caseName": "Alder v Birch"
                                                        }
                                                    ]
                                                },
                                                {
                                                    "case": [
                                                        {
                                                            "caseNumber": "CASE-1002",
                                                            "caseName": "Croft v Dale"
                                                        }
                                                    ]
                                                }
                                            ]
                                        }
                                    ]
                                }
                            ]
                        },
                        {
                            "courtRoomName": "Courtroom 2",
                            "session": [
                                {
                                    "sittings": [
                                        {
                                            "hearing": [
                                                {
                                                    "case": [
                                                        {
                                                            "caseNumber": "CASE-1003",
                                                            "caseName": "Elm v Frost"
                                                        }
                                                    ]
                                                }
                                            ]
                                        }
                                    ]
                                }
                            ]
                        }
                    ]
                }
            }
        ]
    })
}

/// Config source that answers every list type with the same configuration.
pub(super) struct StaticConfigSource {
    pub(super) config: Option<SearchFieldConfig>,
}

#[async_trait]
impl SearchConfigSource for StaticConfigSource {
    async fn config_for_list_type(
        &self,
        _list_type_id: &ListTypeId,
    ) -> Result<Option<SearchFieldConfig>, SearchStoreError> {
        Ok(self.config.clone())
    }
}

pub(super) struct UnavailableConfigSource;

#[async_trait]
impl SearchConfigSource for UnavailableConfigSource {
    async fn config_for_list_type(
        &self,
        _list_type_id: &ListTypeId,
    ) -> Result<Option<SearchFieldConfig>, SearchStoreError> {
        Err(SearchStoreError::Configuration(
            "config service offline".to_string(),
        ))
    }
}

/// Store whose inserts always fail, for the swallowed-error paths.
pub(super) struct RejectingSearchStore;

#[async_trait]
impl ArtefactSearchStore for RejectingSearchStore {
    async fn delete_for_artefact(&self, _artefact_id: &ArtefactId) -> Result<(), SearchStoreError> {
        Ok(())
    }

    async fn insert(&self, _record: ArtefactSearchRecord) -> Result<(), SearchStoreError> {
        Err(SearchStoreError::Unavailable(
            "search table offline".to_string(),
        ))
    }

    async fn find_by_case_value(
        &self,
        _value: &str,
    ) -> Result<Vec<ArtefactSearchRecord>, SearchStoreError> {
        Ok(Vec::new())
    }
}

pub(super) fn indexer_with(
    config: Option<SearchFieldConfig>,
) -> (
    Arc<ArtefactSearchIndexer<StaticConfigSource, InMemorySearchStore>>,
    Arc<InMemorySearchStore>,
) {
    let store = Arc::new(InMemorySearchStore::default());
    let indexer = Arc::new(ArtefactSearchIndexer::new(
        Arc::new(StaticConfigSource { config }),
        store.clone(),
    ));
    (indexer, store)
}

pub(super) type MemoryPublicationService =
    PublicationService<InMemoryArtefactRegistry, ListTypeCatalog, InMemorySearchStore>;

pub(super) fn build_service() -> (
    Arc<MemoryPublicationService>,
    Arc<InMemoryArtefactRegistry>,
    Arc<InMemorySearchStore>,
) {
    let catalog = Arc::new(ListTypeCatalog::standard());
    let registry = Arc::new(InMemoryArtefactRegistry::default());
    let store = Arc::new(InMemorySearchStore::default());
    let service = Arc::new(PublicationService::new(
        registry.clone(),
        catalog.registry(),
        catalog,
        store.clone(),
    ));
    (service, registry, store)
}

pub(super) fn submission(
    list_type: &str,
    sensitivity: Sensitivity,
    payload: Value,
) -> PublicationSubmission {
    PublicationSubmission {
        location_id: "100".to_string(),
        list_type_id: ListTypeId(list_type.to_string()),
        sensitivity,
        provenance: COURT_PROVENANCE.to_string(),
        language: Language::English,
        content_date: NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date"),
        display_from: datetime(2000, 1, 1, 0),
        display_to: datetime(2100, 1, 1, 0),
        payload,
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
