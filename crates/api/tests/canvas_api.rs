//! HTTP-level integration tests for the canvas, its history and export.

mod common;

use axum::http::StatusCode;
use bmc_core::canvas::{FIELD_NAMES, MAX_FIELD_CHARS};
use common::{body_json, canvas_body, get, get_auth, post_auth, put_json_auth};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn get_canvas(pool: &PgPool, token: &str) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/canvas", token).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"].clone()
}

async fn save(pool: &PgPool, token: &str, body: serde_json::Value) -> axum::response::Response {
    let app = common::build_test_app(pool.clone());
    put_json_auth(app, "/api/v1/canvas", body, token).await
}

async fn versions(pool: &PgPool, token: &str, canvas_id: &str) -> Vec<serde_json::Value> {
    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/canvases/{canvas_id}/versions");
    let response = get_auth(app, &uri, token).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"]
        .as_array()
        .unwrap()
        .clone()
}

// ---------------------------------------------------------------------------
// Get and save
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_canvas_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/canvas").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_first_get_copies_template(pool: PgPool) {
    let (user, token) = common::user_with_token(&pool, "ada@example.com").await;

    let canvas = get_canvas(&pool, &token).await;

    assert_eq!(canvas["owner_id"], user.id.to_string());
    assert_eq!(
        canvas["value_propositions"],
        "What value do we deliver to the customer?"
    );
    assert_ne!(canvas["share_token"], "demo-canvas");

    let again = get_canvas(&pool, &token).await;
    assert_eq!(again["id"], canvas["id"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_save_then_history_scenario(pool: PgPool) {
    let (_user, token) = common::user_with_token(&pool, "ada@example.com").await;
    let template = get_canvas(&pool, &token).await;

    let mut body = canvas_body("");
    for name in FIELD_NAMES {
        body[name] = template[name].clone();
    }
    body["value_propositions"] = "v2".into();

    let response = save(&pool, &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let saved = body_json(response).await["data"].clone();
    assert_eq!(saved["value_propositions"], "v2");
    assert_eq!(saved["id"], template["id"]);

    let history = versions(&pool, &token, template["id"].as_str().unwrap()).await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["version_number"], 1);
    assert_eq!(
        history[0]["value_propositions"],
        template["value_propositions"]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_n_saves_produce_n_minus_one_versions(pool: PgPool) {
    let (_user, token) = common::user_with_token(&pool, "ada@example.com").await;

    let mut canvas_id = String::new();
    for i in 0..4 {
        let response = save(&pool, &token, canvas_body(&format!("rev {i}"))).await;
        assert_eq!(response.status(), StatusCode::OK);
        canvas_id = body_json(response).await["data"]["id"]
            .as_str()
            .unwrap()
            .to_string();
    }

    let history = versions(&pool, &token, &canvas_id).await;
    assert_eq!(history.len(), 3);
    assert_eq!(history[0]["channels"], "rev 2");
    assert_eq!(history[2]["channels"], "rev 0");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_oversized_field_is_rejected_without_change(pool: PgPool) {
    let (_user, token) = common::user_with_token(&pool, "ada@example.com").await;
    save(&pool, &token, canvas_body("original")).await;

    let mut body = canvas_body("changed");
    body["cost_structure"] = "x".repeat(MAX_FIELD_CHARS + 1).into();
    let response = save(&pool, &token, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("cost_structure"));

    let canvas = get_canvas(&pool, &token).await;
    assert_eq!(canvas["cost_structure"], "original");
    let history = versions(&pool, &token, canvas["id"].as_str().unwrap()).await;
    assert!(history.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_field_at_limit_is_accepted(pool: PgPool) {
    let (_user, token) = common::user_with_token(&pool, "ada@example.com").await;

    let mut body = canvas_body("");
    body["channels"] = "ü".repeat(MAX_FIELD_CHARS).into();
    let response = save(&pool, &token, body).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_incomplete_or_unknown_keys_are_rejected(pool: PgPool) {
    let (_user, token) = common::user_with_token(&pool, "ada@example.com").await;

    let mut missing = canvas_body("v");
    missing.as_object_mut().unwrap().remove("revenue_streams");
    let response = save(&pool, &token, missing).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let mut extra = canvas_body("v");
    extra["mission"] = "world domination".into();
    let response = save(&pool, &token, extra).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// History and restore
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_restore_round_trip_without_new_version(pool: PgPool) {
    let (_user, token) = common::user_with_token(&pool, "ada@example.com").await;
    save(&pool, &token, canvas_body("first")).await;
    let saved = body_json(save(&pool, &token, canvas_body("second")).await).await;
    let canvas_id = saved["data"]["id"].as_str().unwrap().to_string();

    let history = versions(&pool, &token, &canvas_id).await;
    assert_eq!(history.len(), 1);
    let version_id = history[0]["id"].as_str().unwrap();

    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/canvases/{canvas_id}/versions/{version_id}/restore");
    let response = post_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["key_partners"], "first");

    let canvas = get_canvas(&pool, &token).await;
    assert_eq!(canvas["key_partners"], "first");
    assert_eq!(versions(&pool, &token, &canvas_id).await.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_restore_unknown_version(pool: PgPool) {
    let (_user, token) = common::user_with_token(&pool, "ada@example.com").await;
    let saved = body_json(save(&pool, &token, canvas_body("live")).await).await;
    let canvas_id = saved["data"]["id"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let uri = format!(
        "/api/v1/canvases/{canvas_id}/versions/{}/restore",
        uuid::Uuid::now_v7()
    );
    let response = post_auth(app, &uri, &token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "VERSION_NOT_FOUND");
    assert_eq!(get_canvas(&pool, &token).await["channels"], "live");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_restore_foreign_version_is_mismatch(pool: PgPool) {
    let (_alice, alice_token) = common::user_with_token(&pool, "alice@example.com").await;
    let (_bob, bob_token) = common::user_with_token(&pool, "bob@example.com").await;

    save(&pool, &alice_token, canvas_body("a1")).await;
    let alice = body_json(save(&pool, &alice_token, canvas_body("a2")).await).await;
    let alice_canvas = alice["data"]["id"].as_str().unwrap().to_string();
    let alice_version = versions(&pool, &alice_token, &alice_canvas).await[0]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let bob = body_json(save(&pool, &bob_token, canvas_body("b1")).await).await;
    let bob_canvas = bob["data"]["id"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/canvases/{bob_canvas}/versions/{alice_version}/restore");
    let response = post_auth(app, &uri, &bob_token).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "VERSION_MISMATCH");
    assert_eq!(get_canvas(&pool, &bob_token).await["channels"], "b1");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_other_users_canvas_is_not_found(pool: PgPool) {
    let (_alice, alice_token) = common::user_with_token(&pool, "alice@example.com").await;
    let (_bob, bob_token) = common::user_with_token(&pool, "bob@example.com").await;
    let alice_canvas = get_canvas(&pool, &alice_token).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/canvases/{alice_canvas}/versions");
    let response = get_auth(app, &uri, &bob_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/canvases/{alice_canvas}/share");
    let response = post_auth(app, &uri, &bob_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_export_downloads_json_document(pool: PgPool) {
    let (_user, token) = common::user_with_token(&pool, "ada@example.com").await;
    save(&pool, &token, canvas_body("exported")).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/canvas/export", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-disposition"],
        "attachment; filename=\"business-model-canvas.json\""
    );
    let json = body_json(response).await;
    assert_eq!(json["title"], "Business Model Canvas");
    assert!(json["exported_at"].is_string());
    assert_eq!(json["data"]["revenue_streams"], "exported");
    assert_eq!(json["data"].as_object().unwrap().len(), 9);
}
