use super::common::*;
use crate::publications::domain::{ArtefactSearchRecord, Sensitivity};
use crate::publications::repository::{ArtefactRegistry, ArtefactSearchStore};
use crate::publications::router::publication_router;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn publish_route_accepts_payloads() {
    let (service, _, _) = build_service();
    let router = publication_router(service);

    let body = serde_json::to_vec(&submission(
        "CIVIL_DAILY_CAUSE_LIST",
        Sensitivity::Public,
        civil_list_payload(),
    ))
    .expect("submission serializes");

    let response = router
        .oneshot(
            Request::post("/api/v1/publications")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let payload = read_json_body(response).await;
    assert!(payload.get("artefact_id").is_some());
    assert_eq!(payload.get("sensitivity"), Some(&json!("PUBLIC")));
}

#[tokio::test]
async fn metadata_route_hides_private_lists_from_anonymous_visitors() {
    let (service, _, _) = build_service();
    let router = publication_router(service.clone());

    let receipt = service
        .publish(submission(
            "CIVIL_DAILY_CAUSE_LIST",
            Sensitivity::Private,
            json!({}),
        ))
        .await
        .expect("publish succeeds");
    let uri = format!("/api/v1/publications/{}", receipt.artefact.artefact_id.0);

    let response = router
        .clone()
        .oneshot(
            Request::get(uri.as_str())
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = router
        .oneshot(
            Request::get(uri.as_str())
                .header("x-viewer-role", "VERIFIED")
                .header("x-viewer-provenance", COURT_PROVENANCE)
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("artefact_id").and_then(serde_json::Value::as_str),
        Some(receipt.artefact.artefact_id.0.as_str())
    );
}

#[tokio::test]
async fn payload_route_denies_internal_admins_the_body() {
    let (service, _, _) = build_service();
    let router = publication_router(service.clone());

    let list_payload = civil_list_payload();
    let receipt = service
        .publish(submission(
            "CIVIL_DAILY_CAUSE_LIST",
            Sensitivity::Private,
            list_payload.clone(),
        ))
        .await
        .expect("publish succeeds");
    let uri = format!(
        "/api/v1/publications/{}/payload",
        receipt.artefact.artefact_id.0
    );

    let response = router
        .clone()
        .oneshot(
            Request::get(uri.as_str())
                .header("x-viewer-role", "COURT_ADMIN")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = router
        .oneshot(
            Request::get(uri.as_str())
                .header("x-viewer-role", "SYSTEM_ADMIN")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json_body(response).await, list_payload);
}

#[tokio::test]
async fn unknown_role_headers_get_no_privilege() {
    let (service, _, _) = build_service();
    let router = publication_router(service.clone());

    let receipt = service
        .publish(submission(
            "CIVIL_DAILY_CAUSE_LIST",
            Sensitivity::Private,
            json!({}),
        ))
        .await
        .expect("publish succeeds");

    let uri = format!("/api/v1/publications/{}", receipt.artefact.artefact_id.0);
    let response = router
        .oneshot(
            Request::get(uri.as_str())
                .header("x-viewer-role", "SUPER_WIZARD")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_route_returns_hits_only_to_entitled_viewers() {
    let (service, registry, store) = build_service();
    let router = publication_router(service);

    let mut publication = artefact("search-1", Sensitivity::Private, "CIVIL_DAILY_CAUSE_LIST");
    publication.display_from = datetime(2000, 1, 1, 0);
    publication.display_to = datetime(2100, 1, 1, 0);
    registry
        .save(publication, json!({}))
        .await
        .expect("save succeeds");
    store
        .insert(ArtefactSearchRecord {
            artefact_id: artefact_id("search-1"),
            case_number: Some("CASE-9001".to_string()),
            case_name: Some("Gorse v Hawthorn".to_string()),
        })
        .await
        .expect("insert succeeds");

    let response = router
        .clone()
        .oneshot(
            Request::get("/api/v1/publications/search/CASE-9001")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["hits"], json!([]));

    let response = router
        .oneshot(
            Request::get("/api/v1/publications/search/CASE-9001")
                .header("x-viewer-role", "VERIFIED")
                .header("x-viewer-provenance", COURT_PROVENANCE)
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let hits = payload["hits"].as_array().expect("hits array");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["case_name"], json!("Gorse v Hawthorn"));
    assert_eq!(hits[0]["publication"]["artefact_id"], json!("search-1"));
}

#[tokio::test]
async fn location_route_lists_visible_publications() {
    let (service, registry, _) = build_service();
    let router = publication_router(service);

    let mut live = artefact("loc-1", Sensitivity::Public, "CIVIL_DAILY_CAUSE_LIST");
    live.display_from = datetime(2000, 1, 1, 0);
    live.display_to = datetime(2100, 1, 1, 0);
    let mut hidden = artefact("loc-2", Sensitivity::Private, "CIVIL_DAILY_CAUSE_LIST");
    hidden.display_from = datetime(2000, 1, 1, 0);
    hidden.display_to = datetime(2100, 1, 1, 0);

    registry.save(live, json!({})).await.expect("save succeeds");
    registry
        .save(hidden, json!({}))
        .await
        .expect("save succeeds");

    let response = router
        .oneshot(
            Request::get("/api/v1/publications/locations/100")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let publications = payload["publications"].as_array().expect("array");
    assert_eq!(publications.len(), 1);
    assert_eq!(publications[0]["artefact_id"], json!("loc-1"));
}
