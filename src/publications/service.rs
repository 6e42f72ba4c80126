use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::task::JoinHandle;

use super::access::{can_view_data, can_view_metadata, can_view_publication, filter_accessible};
use super::catalog::ListTypeRegistry;
use super::domain::{Artefact, ArtefactId, Language, ListTypeId, Sensitivity, Viewer};
use super::repository::{
    ArtefactRegistry, ArtefactSearchStore, RegistryError, SearchConfigSource, SearchStoreError,
};
use super::search::{ArtefactSearchIndexer, IndexOutcome};

/// Service composing the artefact store, the list-type registry, the search
/// index, and the access rules.
pub struct PublicationService<A, C, S> {
    registry: Arc<A>,
    list_types: ListTypeRegistry,
    store: Arc<S>,
    indexer: Arc<ArtefactSearchIndexer<C, S>>,
}

static ARTEFACT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_artefact_id() -> ArtefactId {
    let id = ARTEFACT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ArtefactId(format!("artefact-{id:06}"))
}

/// Inbound hearing list: descriptive metadata plus the raw payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicationSubmission {
    pub location_id: String,
    pub list_type_id: ListTypeId,
    #[serde(default)]
    pub sensitivity: Sensitivity,
    pub provenance: String,
    #[serde(default)]
    pub language: Language,
    pub content_date: NaiveDate,
    pub display_from: NaiveDateTime,
    pub display_to: NaiveDateTime,
    pub payload: Value,
}

/// Result of publishing: the stored artefact and the detached indexing run.
///
/// The handle may be dropped; extraction continues in the background and
/// ingestion never waits on it.
pub struct PublicationReceipt {
    pub artefact: Artefact,
    pub indexing: JoinHandle<IndexOutcome>,
}

/// Sanitized metadata projection returned to page controllers. Never carries
/// the payload body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtefactView {
    pub artefact_id: ArtefactId,
    pub location_id: String,
    pub list_type_id: ListTypeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_name: Option<String>,
    pub sensitivity: Sensitivity,
    pub language: Language,
    pub content_date: NaiveDate,
    pub display_from: NaiveDateTime,
    pub display_to: NaiveDateTime,
}

/// One search result: the matched case fields plus the owning publication.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseSearchHit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_name: Option<String>,
    pub publication: ArtefactView,
}

/// Error raised by the publication service.
#[derive(Debug, thiserror::Error)]
pub enum PublicationServiceError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Search(#[from] SearchStoreError),
}

impl<A, C, S> PublicationService<A, C, S>
where
    A: ArtefactRegistry + 'static,
    C: SearchConfigSource + 'static,
    S: ArtefactSearchStore + 'static,
{
    pub fn new(
        registry: Arc<A>,
        list_types: ListTypeRegistry,
        configs: Arc<C>,
        store: Arc<S>,
    ) -> Self {
        let indexer = Arc::new(ArtefactSearchIndexer::new(configs, Arc::clone(&store)));
        Self {
            registry,
            list_types,
            store,
            indexer,
        }
    }

    /// Persist a new hearing-list version and kick off search extraction.
    ///
    /// The artefact write is the only operation the caller's success depends
    /// on; indexing runs detached and its failure is observed in logs only.
    pub async fn publish(
        &self,
        submission: PublicationSubmission,
    ) -> Result<PublicationReceipt, PublicationServiceError> {
        let PublicationSubmission {
            location_id,
            list_type_id,
            sensitivity,
            provenance,
            language,
            content_date,
            display_from,
            display_to,
            payload,
        } = submission;

        let artefact = Artefact {
            artefact_id: next_artefact_id(),
            location_id,
            list_type_id,
            sensitivity,
            provenance,
            language,
            content_date,
            display_from,
            display_to,
        };

        self.registry
            .save(artefact.clone(), payload.clone())
            .await?;

        let indexing = self.indexer.spawn_index(
            artefact.artefact_id.clone(),
            artefact.list_type_id.clone(),
            payload,
        );

        Ok(PublicationReceipt { artefact, indexing })
    }

    /// Metadata for one publication, if this viewer may know it exists.
    /// Denied and missing are indistinguishable so existence never leaks.
    pub async fn metadata_for(
        &self,
        viewer: Option<&Viewer>,
        artefact_id: &ArtefactId,
    ) -> Result<Option<ArtefactView>, PublicationServiceError> {
        let artefact = match self.registry.fetch(artefact_id).await? {
            Some(artefact) => artefact,
            None => return Ok(None),
        };

        if !can_view_metadata(viewer, &artefact) {
            return Ok(None);
        }

        Ok(Some(self.view_of(&artefact)))
    }

    /// Raw list body for admin-facing rendering, gated by the data rules.
    pub async fn payload_for(
        &self,
        viewer: Option<&Viewer>,
        artefact_id: &ArtefactId,
    ) -> Result<Option<Value>, PublicationServiceError> {
        let artefact = match self.registry.fetch(artefact_id).await? {
            Some(artefact) => artefact,
            None => return Ok(None),
        };

        let list_type = self.list_types.resolve(&artefact.list_type_id);
        if !can_view_data(viewer, &artefact, list_type) {
            return Ok(None);
        }

        Ok(self.registry.payload(artefact_id).await?)
    }

    /// Publications a viewer may browse for one court, restricted to those
    /// currently inside their display window.
    pub async fn for_location(
        &self,
        viewer: Option<&Viewer>,
        location_id: &str,
        at: NaiveDateTime,
    ) -> Result<Vec<ArtefactView>, PublicationServiceError> {
        let artefacts = self.registry.for_location(location_id).await?;
        let live: Vec<Artefact> = artefacts
            .into_iter()
            .filter(|artefact| artefact.is_within_display_window(at))
            .collect();

        Ok(filter_accessible(viewer, &live, &self.list_types)
            .into_iter()
            .map(|artefact| self.view_of(artefact))
            .collect())
    }

    /// Resolve an exact case number or case name through the search index,
    /// keeping only publications the viewer may see on public pages.
    pub async fn search_cases(
        &self,
        viewer: Option<&Viewer>,
        value: &str,
    ) -> Result<Vec<CaseSearchHit>, PublicationServiceError> {
        let records = self.store.find_by_case_value(value).await?;

        let mut hits = Vec::new();
        for record in records {
            let artefact = match self.registry.fetch(&record.artefact_id).await? {
                Some(artefact) => artefact,
                None => continue,
            };

            // Unresolvable list types are excluded here exactly as in the
            // browse filter.
            let list_type = match self.list_types.resolve(&artefact.list_type_id) {
                Some(list_type) => list_type,
                None => continue,
            };

            if can_view_publication(viewer, &artefact, Some(list_type)) {
                hits.push(CaseSearchHit {
                    case_number: record.case_number,
                    case_name: record.case_name,
                    publication: self.view_of(&artefact),
                });
            }
        }

        Ok(hits)
    }

    pub(crate) fn view_of(&self, artefact: &Artefact) -> ArtefactView {
        let list_name = self
            .list_types
            .resolve(&artefact.list_type_id)
            .map(|list_type| list_type.friendly_name.clone());

        ArtefactView {
            artefact_id: artefact.artefact_id.clone(),
            location_id: artefact.location_id.clone(),
            list_type_id: artefact.list_type_id.clone(),
            list_name,
            sensitivity: artefact.sensitivity,
            language: artefact.language,
            content_date: artefact.content_date,
            display_from: artefact.display_from,
            display_to: artefact.display_to,
        }
    }
}
