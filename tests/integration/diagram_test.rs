//! Integration tests for diagram CRUD, optimistic updates, and versions.

mod helpers;

use chrono::{Duration, Utc};
use http::StatusCode;
use serde_json::json;

use archtool_auth::Claims;

#[tokio::test]
async fn test_create_returns_initial_revision_and_etag() {
    let app = helpers::TestApp::new();
    let token = app.token(7);

    let response = app
        .request(
            "POST",
            "/api/diagrams",
            Some(json!({ "name": "Flow A", "content": "<xml/>" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.etag(), Some("\"1\""));
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["revision"], 1);
    assert_eq!(response.body["data"]["owner_id"], 7);
    assert_eq!(response.body["data"]["registry_type"], json!(null));
}

#[tokio::test]
async fn test_stale_if_match_is_rejected() {
    let app = helpers::TestApp::new();
    let token = app.token(1);
    let id = app.create_diagram("Flow A", &token).await;
    let path = format!("/api/diagrams/{id}");

    let response = app
        .request_with_headers(
            "PUT",
            &path,
            Some(json!({ "name": "Flow A v2" })),
            Some(&token),
            &[("If-Match", "\"1\"")],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.etag(), Some("\"2\""));
    assert_eq!(response.body["data"]["name"], "Flow A v2");
    assert_eq!(response.body["data"]["content"], "<xml/>");

    let response = app
        .request_with_headers(
            "PUT",
            &path,
            Some(json!({ "name": "Flow A v3" })),
            Some(&token),
            &[("If-Match", "\"1\"")],
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");
    assert_eq!(response.body["details"]["current_revision"], 2);
    assert_eq!(response.etag(), Some("\"2\""));

    let response = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(response.body["data"]["name"], "Flow A v2");
    assert_eq!(response.etag(), Some("\"2\""));

    let versions = app
        .request("GET", &format!("{path}/versions"), None, Some(&token))
        .await;
    assert_eq!(versions.body["data"]["total"], 1);
    assert_eq!(versions.body["data"]["items"][0]["name"], "Flow A");
    assert_eq!(versions.body["data"]["items"][0]["modified_by"], 1);
}

#[tokio::test]
async fn test_if_match_forms() {
    let app = helpers::TestApp::new();
    let token = app.token(1);
    let id = app.create_diagram("Tags", &token).await;
    let path = format!("/api/diagrams/{id}");
    let edit = || Some(json!({ "content": "<xml><cell/></xml>" }));

    for (tag, next) in [("1", 2), ("W/\"2\"", 3), ("*", 4), ("garbage", 5)] {
        let response = app
            .request_with_headers("PUT", &path, edit(), Some(&token), &[("If-Match", tag)])
            .await;
        assert_eq!(response.status, StatusCode::OK, "If-Match {tag}");
        assert_eq!(response.body["data"]["revision"], next);
    }
}

#[tokio::test]
async fn test_update_without_if_match_always_applies() {
    let app = helpers::TestApp::new();
    let token = app.token(1);
    let id = app.create_diagram("Loose", &token).await;
    let path = format!("/api/diagrams/{id}");

    for _ in 0..3 {
        let response = app
            .request("PUT", &path, Some(json!({ "content": "<x/>" })), Some(&token))
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let response = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(response.body["data"]["revision"], 4);

    let versions = app
        .request(
            "GET",
            &format!("{path}/versions?limit=2&offset=1"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(versions.body["data"]["total"], 3);
    assert_eq!(versions.body["data"]["limit"], 2);
    assert_eq!(versions.body["data"]["items"][0]["revision"], 2);
    assert_eq!(versions.body["data"]["items"][1]["revision"], 1);
}

#[tokio::test]
async fn test_get_version() {
    let app = helpers::TestApp::new();
    let token = app.token(1);
    let id = app.create_diagram("Original", &token).await;
    app.request(
        "PUT",
        &format!("/api/diagrams/{id}"),
        Some(json!({ "name": "Renamed" })),
        Some(&token),
    )
    .await;

    let response = app
        .request("GET", &format!("/api/diagrams/{id}/versions/1"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "Original");
    assert_eq!(response.body["data"]["revision"], 1);

    let response = app
        .request("GET", &format!("/api/diagrams/{id}/versions/2"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("GET", &format!("/api/diagrams/{id}/versions/two"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_search_and_paging() {
    let app = helpers::TestApp::new();
    let alice = app.token(1);
    let bob = app.token(2);

    let empty = app.request("GET", "/api/diagrams?limit=10&offset=20", None, Some(&alice)).await;
    assert_eq!(empty.status, StatusCode::OK);
    assert_eq!(empty.body["data"]["items"], json!([]));
    assert_eq!(empty.body["data"]["total"], 0);

    app.create_diagram("Payments flow", &alice).await;
    app.create_diagram("Billing", &bob).await;
    app.create_diagram("payments overview", &bob).await;

    let response = app.request("GET", "/api/diagrams?q=PAYMENTS", None, Some(&alice)).await;
    assert_eq!(response.body["data"]["total"], 2);

    let response = app.request("GET", "/api/diagrams?owner_id=2", None, Some(&alice)).await;
    assert_eq!(response.body["data"]["total"], 2);

    let response = app
        .request("GET", "/api/diagrams?limit=1&offset=1", None, Some(&alice))
        .await;
    assert_eq!(response.body["data"]["total"], 3);
    assert_eq!(response.body["data"]["items"].as_array().map(Vec::len), Some(1));

    let response = app.request("GET", "/api/diagrams?limit=0", None, Some(&alice)).await;
    assert_eq!(response.body["data"]["limit"], 50);
}

#[tokio::test]
async fn test_unparseable_list_params_fall_back_to_defaults() {
    let app = helpers::TestApp::new();
    let alice = app.token(1);
    let bob = app.token(2);
    app.create_diagram("Mine", &alice).await;
    app.create_diagram("Theirs", &bob).await;

    for query in ["limit=abc", "limit=999999999999999999999", "offset=x", "owner_id=x"] {
        let response = app
            .request("GET", &format!("/api/diagrams?{query}"), None, Some(&alice))
            .await;
        assert_eq!(response.status, StatusCode::OK, "{query}");
        assert_eq!(response.body["data"]["limit"], 50, "{query}");
        assert_eq!(response.body["data"]["offset"], 0, "{query}");
        assert_eq!(response.body["data"]["total"], 2, "{query}");
    }

    let id = app.create_diagram("Paged", &alice).await;
    let response = app
        .request("GET", &format!("/api/diagrams/{id}/versions?limit=abc"), None, Some(&alice))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["limit"], 50);
}

#[tokio::test]
async fn test_delete_then_missing() {
    let app = helpers::TestApp::new();
    let token = app.token(1);
    let id = app.create_diagram("Short lived", &token).await;
    let path = format!("/api/diagrams/{id}");

    let response = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");

    let response = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("PUT", &path, Some(json!({ "name": "ghost" })), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_input() {
    let app = helpers::TestApp::new();
    let token = app.token(1);

    let response = app
        .request(
            "POST",
            "/api/diagrams",
            Some(json!({ "name": "", "content": "<xml/>" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let response = app
        .send_raw("POST", "/api/diagrams", "{not json".to_string(), Some(&token), &[])
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let response = app
        .request("GET", "/api/diagrams/12345", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_authentication() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/diagrams", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");

    let response = app.request("GET", "/api/diagrams", None, Some("garbage")).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let expired = helpers::sign(&Claims::new(1, Utc::now() - Duration::hours(1)));
    let response = app.request("GET", "/api/diagrams", None, Some(&expired)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Token has expired");

    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["backend"], "memory");
}

#[tokio::test]
async fn test_anonymous_callers() {
    let app = helpers::TestApp::anonymous();

    let response = app
        .request(
            "POST",
            "/api/diagrams",
            Some(json!({ "name": "Nobody's", "content": "<xml/>" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["owner_id"], json!(null));

    // A supplied token is still checked.
    let response = app.request("GET", "/api/diagrams", None, Some("garbage")).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
