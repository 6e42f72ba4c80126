use std::sync::Arc;

use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::super::domain::{ArtefactId, ArtefactSearchRecord, ListTypeId};
use super::super::repository::{ArtefactSearchStore, SearchConfigSource, SearchStoreError};
use super::locator::locate_cases;

/// How one indexing run ended. Skips and failures are outcomes, not errors:
/// this component must never fail the ingestion that triggered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOutcome {
    Indexed { records: usize },
    /// No search configuration exists for the list type.
    NotSearchable,
    /// The payload was not a JSON object or array.
    UnsupportedPayload,
    /// Nothing in the payload carried a configured case field.
    NoCases,
    /// A collaborator failed; details were logged and swallowed.
    Failed,
}

impl IndexOutcome {
    pub const fn label(self) -> &'static str {
        match self {
            IndexOutcome::Indexed { .. } => "indexed",
            IndexOutcome::NotSearchable => "not_searchable",
            IndexOutcome::UnsupportedPayload => "unsupported_payload",
            IndexOutcome::NoCases => "no_cases",
            IndexOutcome::Failed => "failed",
        }
    }
}

/// Rebuilds the flat case search index for one artefact version.
///
/// The rebuild is a full delete-then-recreate, so re-running for the same
/// artefact is idempotent and always reflects the latest payload. The two
/// store calls are not wrapped in a transaction: a concurrent reader may
/// briefly observe an empty index between them. Concurrent runs for the
/// same artefact are not coordinated here; callers that care about the
/// final state of rapid re-ingestion must serialize them.
pub struct ArtefactSearchIndexer<C, S> {
    configs: Arc<C>,
    store: Arc<S>,
}

impl<C, S> ArtefactSearchIndexer<C, S>
where
    C: SearchConfigSource + 'static,
    S: ArtefactSearchStore + 'static,
{
    pub fn new(configs: Arc<C>, store: Arc<S>) -> Self {
        Self { configs, store }
    }

    /// Extracts case fields from the payload and replaces the artefact's
    /// search index with the result.
    ///
    /// Infallible by contract: unsearchable list types, malformed payloads,
    /// and collaborator failures are logged and reported through the
    /// outcome. Nothing is deleted unless at least one case was located.
    pub async fn index_artefact(
        &self,
        artefact_id: &ArtefactId,
        list_type_id: &ListTypeId,
        payload: &Value,
    ) -> IndexOutcome {
        match self.replace_index(artefact_id, list_type_id, payload).await {
            Ok(outcome) => {
                match outcome {
                    IndexOutcome::Indexed { records } => {
                        info!(artefact = %artefact_id.0, records, "case search index rebuilt");
                    }
                    IndexOutcome::NotSearchable => {
                        info!(
                            artefact = %artefact_id.0,
                            list_type = %list_type_id.0,
                            "list type has no search configuration, index untouched"
                        );
                    }
                    IndexOutcome::UnsupportedPayload => {
                        info!(
                            artefact = %artefact_id.0,
                            "payload is not a JSON object or array, index untouched"
                        );
                    }
                    IndexOutcome::NoCases => {
                        info!(
                            artefact = %artefact_id.0,
                            "no case fields located in payload, index untouched"
                        );
                    }
                    IndexOutcome::Failed => {}
                }
                outcome
            }
            Err(err) => {
                warn!(artefact = %artefact_id.0, error = %err, "case search indexing failed");
                IndexOutcome::Failed
            }
        }
    }

    /// Detaches an indexing run from the caller. Ingestion responses must
    /// not wait on the handle; dropping it leaves the task running and any
    /// failure visible only in the logs.
    pub fn spawn_index(
        self: &Arc<Self>,
        artefact_id: ArtefactId,
        list_type_id: ListTypeId,
        payload: Value,
    ) -> JoinHandle<IndexOutcome> {
        let indexer = Arc::clone(self);
        tokio::spawn(async move {
            indexer
                .index_artefact(&artefact_id, &list_type_id, &payload)
                .await
        })
    }

    async fn replace_index(
        &self,
        artefact_id: &ArtefactId,
        list_type_id: &ListTypeId,
        payload: &Value,
    ) -> Result<IndexOutcome, SearchStoreError> {
        let fields = match self.configs.config_for_list_type(list_type_id).await? {
            Some(fields) => fields,
            None => return Ok(IndexOutcome::NotSearchable),
        };

        if !matches!(payload, Value::Object(_) | Value::Array(_)) {
            return Ok(IndexOutcome::UnsupportedPayload);
        }

        let cases = locate_cases(payload, &fields);
        if cases.is_empty() {
            return Ok(IndexOutcome::NoCases);
        }

        self.store.delete_for_artefact(artefact_id).await?;
        let records = cases.len();
        for case in cases {
            self.store
                .insert(ArtefactSearchRecord::from_case(artefact_id.clone(), case))
                .await?;
        }

        Ok(IndexOutcome::Indexed { records })
    }
}
