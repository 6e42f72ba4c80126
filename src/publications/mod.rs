//! Hearing-list publication core.
//!
//! Two pieces of logic carry this module: the tiered access decisions that
//! govern which viewers may see a publication's existence, metadata, or
//! rendered body, and the schema-agnostic case extractor that builds a flat
//! search index from arbitrarily shaped list payloads. Everything else is
//! thin glue around those two.

pub mod access;
pub mod catalog;
pub mod domain;
pub mod memory;
pub mod repository;
pub mod router;
pub mod search;
pub mod service;

#[cfg(test)]
mod tests;

pub use access::{can_view_data, can_view_metadata, can_view_publication, filter_accessible};
pub use catalog::{ListTypeCatalog, ListTypeCatalogEntry, ListTypeRegistry};
pub use domain::{
    Artefact, ArtefactId, ArtefactSearchRecord, Language, ListType, ListTypeId, LocatedCase,
    SearchFieldConfig, Sensitivity, Viewer, ViewerRole,
};
pub use memory::{InMemoryArtefactRegistry, InMemorySearchStore};
pub use repository::{
    ArtefactRegistry, ArtefactSearchStore, RegistryError, SearchConfigSource, SearchStoreError,
};
pub use router::publication_router;
pub use search::{locate_cases, ArtefactSearchIndexer, IndexOutcome};
pub use service::{
    ArtefactView, CaseSearchHit, PublicationReceipt, PublicationService, PublicationServiceError,
    PublicationSubmission,
};
