use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use serde_json::json;

use super::domain::{ArtefactId, Viewer, ViewerRole};
use super::repository::{ArtefactRegistry, ArtefactSearchStore, SearchConfigSource};
use super::service::{PublicationService, PublicationSubmission};

/// Router builder exposing the publication endpoints.
pub fn publication_router<A, C, S>(service: Arc<PublicationService<A, C, S>>) -> Router
where
    A: ArtefactRegistry + 'static,
    C: SearchConfigSource + 'static,
    S: ArtefactSearchStore + 'static,
{
    Router::new()
        .route("/api/v1/publications", post(publish_handler::<A, C, S>))
        .route(
            "/api/v1/publications/:artefact_id",
            get(metadata_handler::<A, C, S>),
        )
        .route(
            "/api/v1/publications/:artefact_id/payload",
            get(payload_handler::<A, C, S>),
        )
        .route(
            "/api/v1/publications/locations/:location_id",
            get(location_handler::<A, C, S>),
        )
        .route(
            "/api/v1/publications/search/:case_value",
            get(search_handler::<A, C, S>),
        )
        .with_state(service)
}

/// Header-based glue for the already-resolved account descriptor. Absent
/// headers mean an unauthenticated visitor; unknown role labels fall back
/// to the unprivileged role.
pub(crate) fn viewer_from_headers(headers: &HeaderMap) -> Option<Viewer> {
    let role = headers.get("x-viewer-role")?.to_str().ok()?;
    let provenance = headers
        .get("x-viewer-provenance")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    Some(Viewer::new(
        ViewerRole::from_label(role.trim()),
        provenance.trim(),
    ))
}

pub(crate) async fn publish_handler<A, C, S>(
    State(service): State<Arc<PublicationService<A, C, S>>>,
    axum::Json(submission): axum::Json<PublicationSubmission>,
) -> Response
where
    A: ArtefactRegistry + 'static,
    C: SearchConfigSource + 'static,
    S: ArtefactSearchStore + 'static,
{
    match service.publish(submission).await {
        Ok(receipt) => {
            let view = service.view_of(&receipt.artefact);
            // Extraction continues in the background; the response never
            // waits on the handle.
            drop(receipt.indexing);
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn metadata_handler<A, C, S>(
    State(service): State<Arc<PublicationService<A, C, S>>>,
    headers: HeaderMap,
    Path(artefact_id): Path<String>,
) -> Response
where
    A: ArtefactRegistry + 'static,
    C: SearchConfigSource + 'static,
    S: ArtefactSearchStore + 'static,
{
    let viewer = viewer_from_headers(&headers);
    let id = ArtefactId(artefact_id);

    match service.metadata_for(viewer.as_ref(), &id).await {
        Ok(Some(view)) => (StatusCode::OK, axum::Json(view)).into_response(),
        Ok(None) => not_found(),
        Err(err) => internal_error(err),
    }
}

pub(crate) async fn payload_handler<A, C, S>(
    State(service): State<Arc<PublicationService<A, C, S>>>,
    headers: HeaderMap,
    Path(artefact_id): Path<String>,
) -> Response
where
    A: ArtefactRegistry + 'static,
    C: SearchConfigSource + 'static,
    S: ArtefactSearchStore + 'static,
{
    let viewer = viewer_from_headers(&headers);
    let id = ArtefactId(artefact_id);

    match service.payload_for(viewer.as_ref(), &id).await {
        Ok(Some(payload)) => (StatusCode::OK, axum::Json(payload)).into_response(),
        Ok(None) => not_found(),
        Err(err) => internal_error(err),
    }
}

pub(crate) async fn location_handler<A, C, S>(
    State(service): State<Arc<PublicationService<A, C, S>>>,
    headers: HeaderMap,
    Path(location_id): Path<String>,
) -> Response
where
    A: ArtefactRegistry + 'static,
    C: SearchConfigSource + 'static,
    S: ArtefactSearchStore + 'static,
{
    let viewer = viewer_from_headers(&headers);
    let now = Local::now().naive_local();

    match service.for_location(viewer.as_ref(), &location_id, now).await {
        Ok(publications) => {
            let payload = json!({
                "location_id": location_id,
                "publications": publications,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => internal_error(err),
    }
}

pub(crate) async fn search_handler<A, C, S>(
    State(service): State<Arc<PublicationService<A, C, S>>>,
    headers: HeaderMap,
    Path(case_value): Path<String>,
) -> Response
where
    A: ArtefactRegistry + 'static,
    C: SearchConfigSource + 'static,
    S: ArtefactSearchStore + 'static,
{
    let viewer = viewer_from_headers(&headers);

    match service.search_cases(viewer.as_ref(), &case_value).await {
        Ok(hits) => {
            let payload = json!({
                "search_value": case_value,
                "hits": hits,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => internal_error(err),
    }
}

fn not_found() -> Response {
    let payload = json!({ "error": "publication not found" });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}

fn internal_error(err: impl std::fmt::Display) -> Response {
    let payload = json!({ "error": err.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
