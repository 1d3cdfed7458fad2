//! HTTP-level tests for the editorial FAQ workflow.
//!
//! Requests go straight to the router via `tower::ServiceExt::oneshot`,
//! authenticated with mock-auth headers unless stated otherwise.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_faq, delete_as, get, get_as, get_with_authorization, post_as, post_json_as,
    publish_faq, put_json_as, Actor, ADMIN, AUTHOR, REVIEWER, TEST_JWT_SECRET,
};
use faircms_api::auth::jwt::{generate_token, JwtConfig};
use faircms_core::roles::Role;
use sqlx::PgPool;

const PARK_HOURS: &str = "What are the park hours?";

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_routes_require_identity(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(&app, "/api/admin/faq").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");

    let response = get_with_authorization(&app, "/api/admin/faq", "Basic abc").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_with_authorization(&app, "/api/admin/faq", "Bearer not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bearer_token_identifies_editor(pool: PgPool) {
    let app = common::build_test_app(pool);
    let config = JwtConfig {
        secret: TEST_JWT_SECRET.into(),
        token_expiry_mins: 5,
    };
    let token = generate_token("author@fair.example.com", Role::Author, &config).unwrap();

    let response =
        get_with_authorization(&app, "/api/admin/faq", &format!("Bearer {token}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_authors_cannot_approve_or_delete(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (entry_id, version_id) = create_faq(
        &app,
        AUTHOR,
        serde_json::json!({"question": PARK_HOURS, "answer": "9 to 5"}),
    )
    .await;
    post_as(&app, &format!("/api/admin/faq/version/{version_id}/submit"), AUTHOR).await;

    let other_author = Actor {
        email: "other@fair.example.com",
        role: "author",
    };
    let response = post_as(
        &app,
        &format!("/api/admin/faq/version/{version_id}/approve"),
        other_author,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");

    let response = delete_as(&app, &format!("/api/admin/faq/{entry_id}"), other_author).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_publish_revise_and_reject_over_http(pool: PgPool) {
    let app = common::build_test_app(pool);

    // Create: version 1 in draft, not public.
    let response = post_json_as(
        &app,
        "/api/admin/faq",
        AUTHOR,
        serde_json::json!({"question": PARK_HOURS, "answer": "<p>9am to 5pm</p>"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let entry_id = json["data"]["entry"]["id"].as_i64().unwrap();
    let v1 = json["data"]["version"]["id"].as_i64().unwrap();
    let slug = json["data"]["entry"]["slug"].as_str().unwrap().to_string();
    assert_eq!(slug, "what-are-the-park-hours");
    assert_eq!(json["data"]["version"]["status"], "draft");
    assert_eq!(json["data"]["version"]["version_number"], 1);

    assert_eq!(get(&app, &format!("/api/faq/{slug}")).await.status(), StatusCode::NOT_FOUND);

    // Submit and approve.
    let response = post_as(&app, &format!("/api/admin/faq/version/{v1}/submit"), AUTHOR).await;
    assert_eq!(body_json(response).await["data"]["status"], "pending_review");

    let response = post_as(&app, &format!("/api/admin/faq/version/{v1}/approve"), REVIEWER).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["version"]["status"], "published");
    assert_eq!(json["data"]["entry"]["live_version_id"], v1);

    let response = get(&app, &format!("/api/faq/{slug}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["answer"], "<p>9am to 5pm</p>");

    // Revise: public copy stays on version 1.
    let response = post_json_as(
        &app,
        &format!("/api/admin/faq/{entry_id}/version"),
        AUTHOR,
        serde_json::json!({"question": PARK_HOURS, "answer": "<p>8am to 6pm</p>"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let v2 = body_json(response).await["data"]["id"].as_i64().unwrap();

    post_as(&app, &format!("/api/admin/faq/version/{v2}/submit"), AUTHOR).await;
    let response = post_json_as(
        &app,
        &format!("/api/admin/faq/version/{v2}/reject"),
        REVIEWER,
        serde_json::json!({"note": "Summer hours are not confirmed yet"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "draft");
    assert_eq!(json["data"]["rejection_note"], "Summer hours are not confirmed yet");

    let response = get(&app, &format!("/api/faq/{slug}")).await;
    assert_eq!(body_json(response).await["data"]["answer"], "<p>9am to 5pm</p>");

    // Admin detail shows both versions, newest first.
    let response = get_as(&app, &format!("/api/admin/faq/{entry_id}"), AUTHOR).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["versions"].as_array().unwrap().len(), 2);
    assert_eq!(json["data"]["latest_version"]["id"], v2);

    // Audit trail, newest first.
    let response = get_as(&app, &format!("/api/admin/faq/{entry_id}/audit"), AUTHOR).await;
    let json = body_json(response).await;
    let actions: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["action"].as_str().unwrap())
        .collect();
    assert_eq!(
        actions,
        vec!["rejected", "submitted", "updated", "approved", "submitted", "created"]
    );

    // The rejected filter finds it.
    let response = get_as(&app, "/api/admin/faq?status=rejected", AUTHOR).await;
    let json = body_json(response).await;
    assert_eq!(json["pagination"]["total"], 1);
    assert_eq!(json["data"][0]["latest_version_id"], v2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_self_approval_is_refused_even_for_reviewers(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, version_id) = create_faq(
        &app,
        REVIEWER,
        serde_json::json!({"question": PARK_HOURS, "answer": "9 to 5"}),
    )
    .await;
    post_as(&app, &format!("/api/admin/faq/version/{version_id}/submit"), REVIEWER).await;

    let response = post_as(
        &app,
        &format!("/api/admin/faq/version/{version_id}/approve"),
        REVIEWER,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "SELF_APPROVAL");

    // An admin who is not the author may approve.
    let response = post_as(&app, &format!("/api/admin/faq/version/{version_id}/approve"), ADMIN).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_transition_and_validation_errors(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, version_id) = create_faq(
        &app,
        AUTHOR,
        serde_json::json!({"question": PARK_HOURS, "answer": "9 to 5"}),
    )
    .await;

    // Approving a draft.
    let response = post_as(&app, &format!("/api/admin/faq/version/{version_id}/approve"), REVIEWER).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "INVALID_TRANSITION");

    // Rejecting without a note.
    post_as(&app, &format!("/api/admin/faq/version/{version_id}/submit"), AUTHOR).await;
    let response = post_json_as(
        &app,
        &format!("/api/admin/faq/version/{version_id}/reject"),
        REVIEWER,
        serde_json::json!({"note": "   "}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    // Missing version.
    let response = post_as(&app, "/api/admin/faq/version/999999/submit", AUTHOR).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Missing required content.
    let response = post_json_as(
        &app,
        "/api/admin/faq",
        AUTHOR,
        serde_json::json!({"answer": "no question"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    // Duplicate slug.
    let response = post_json_as(
        &app,
        "/api/admin/faq",
        AUTHOR,
        serde_json::json!({"question": PARK_HOURS, "answer": "again"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Metadata and deletion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_metadata_and_tags(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (entry_id, _) = publish_faq(&app, "parking", "Where do I park?", "Lot B").await;

    let response = post_json_as(&app, "/api/admin/tags", ADMIN, serde_json::json!({"name": "Getting Here"})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let tag = body_json(response).await;
    assert_eq!(tag["data"]["slug"], "getting-here");
    let tag_id = tag["data"]["id"].as_i64().unwrap();

    let response = put_json_as(
        &app,
        &format!("/api/admin/faq/{entry_id}"),
        AUTHOR,
        serde_json::json!({"is_featured": true, "sort_order": 3}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["is_featured"], true);
    assert_eq!(json["data"]["sort_order"], 3);

    let response = put_json_as(
        &app,
        &format!("/api/admin/faq/{entry_id}/tags"),
        AUTHOR,
        serde_json::json!({"tag_ids": [tag_id]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"][0]["slug"], "getting-here");

    let response = get(&app, "/api/faq?tag=getting-here").await;
    let json = body_json(response).await;
    assert_eq!(json["pagination"]["total"], 1);
    assert_eq!(json["data"][0]["is_featured"], true);

    let response = put_json_as(
        &app,
        &format!("/api/admin/faq/{entry_id}"),
        AUTHOR,
        serde_json::json!({"slug": "Not A Slug!"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_as(&app, "/api/admin/faq/999999", AUTHOR, serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_removes_public_entry_but_keeps_audit(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (entry_id, _) = publish_faq(&app, "lost-and-found", "Lost and found?", "Guest services").await;
    assert_eq!(get(&app, "/api/faq/lost-and-found").await.status(), StatusCode::OK);

    let response = delete_as(&app, &format!("/api/admin/faq/{entry_id}"), REVIEWER).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(get(&app, "/api/faq/lost-and-found").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        get_as(&app, &format!("/api/admin/faq/{entry_id}"), AUTHOR).await.status(),
        StatusCode::NOT_FOUND
    );

    let response = get_as(&app, &format!("/api/admin/faq/{entry_id}/audit"), AUTHOR).await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["action"], "deleted");

    let response = delete_as(&app, &format!("/api/admin/faq/{entry_id}"), REVIEWER).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_audit_by_actor_scoping(pool: PgPool) {
    let app = common::build_test_app(pool);
    publish_faq(&app, "tickets", "Where are tickets sold?", "At the gate").await;

    let response = get_as(&app, "/api/admin/audit", AUTHOR).await;
    let json = body_json(response).await;
    let actions: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["action"].as_str().unwrap())
        .collect();
    assert_eq!(actions, vec!["submitted", "created"]);

    let uri = format!("/api/admin/audit?actor={}", REVIEWER.email);
    assert_eq!(get_as(&app, &uri, AUTHOR).await.status(), StatusCode::FORBIDDEN);

    let uri = format!("/api/admin/audit?actor={}", AUTHOR.email);
    let response = get_as(&app, &uri, REVIEWER).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);
}
