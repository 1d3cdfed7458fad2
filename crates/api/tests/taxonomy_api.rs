//! HTTP-level tests for FAQ categories and tags, including their role gates.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_as, get_as, post_json_as, put_json_as, ADMIN, AUTHOR, REVIEWER};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tag_creation_requires_admin(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({"name": "Parking"});

    for actor in [AUTHOR, REVIEWER] {
        let response = post_json_as(&app, "/api/admin/tags", actor, body.clone()).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{} may not create tags", actor.email);
        assert_eq!(body_json(response).await["code"], "FORBIDDEN");
    }

    let response = post_json_as(&app, "/api/admin/tags", ADMIN, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let tag = body_json(response).await;
    assert_eq!(tag["data"]["slug"], "parking");
    let tag_id = tag["data"]["id"].as_i64().unwrap();

    // Everyone may read the list.
    let json = body_json(get_as(&app, "/api/admin/tags", AUTHOR).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let uri = format!("/api/admin/tags/{tag_id}");
    assert_eq!(delete_as(&app, &uri, REVIEWER).await.status(), StatusCode::FORBIDDEN);
    assert_eq!(delete_as(&app, &uri, ADMIN).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(delete_as(&app, &uri, ADMIN).await.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_category_writes_require_admin(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json_as(
        &app,
        "/api/admin/categories",
        REVIEWER,
        serde_json::json!({"name": "Tickets"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json_as(
        &app,
        "/api/admin/categories",
        ADMIN,
        serde_json::json!({"name": "Tickets"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/admin/categories/{id}");

    let response = put_json_as(&app, &uri, REVIEWER, serde_json::json!({"name": "Admission"})).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(delete_as(&app, &uri, REVIEWER).await.status(), StatusCode::FORBIDDEN);

    let response = put_json_as(&app, &uri, ADMIN, serde_json::json!({"name": "Admission"})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["name"], "Admission");

    assert_eq!(delete_as(&app, &uri, ADMIN).await.status(), StatusCode::NO_CONTENT);
    let json = body_json(get_as(&app, "/api/admin/categories", AUTHOR).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}
