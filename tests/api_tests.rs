use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use muster::api::AppState;
use muster::config::Config;
use muster::db::Store;
use muster::domain::NewMember;
use muster::state::SharedState;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

/// Removes the test database file when the test ends.
struct TempDb(PathBuf);

impl Drop for TempDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

fn test_config() -> (Config, TempDb) {
    let db_path =
        std::env::temp_dir().join(format!("muster-api-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;
    (config, TempDb(db_path))
}

async fn spawn_app() -> (Arc<AppState>, Router, TempDb) {
    let (config, db) = test_config();
    let state = muster::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    let router = muster::api::router(state.clone());
    (state, router, db)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(
    app: &Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_string(body).unwrap()))
            .unwrap(),
    )
    .await
}

fn registration(name: &str, email: &str, rank: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "email": email,
        "password": "secret1",
        "confirm_password": "secret1",
        "phone": "",
        "address": "  ",
        "military_rank": rank,
    })
}

fn names(results: &serde_json::Value) -> Vec<String> {
    results
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_register_member() {
    let (_state, app, _db) = spawn_app().await;

    let (status, body) = post_json(
        &app,
        "/api/members",
        &registration("Ahmed Ali", "ahmed@example.com", "رائد"),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    let member = &body["data"];
    assert_eq!(member["name"], "Ahmed Ali");
    assert_eq!(member["email"], "ahmed@example.com");
    assert_eq!(member["military_rank"], "رائد");
    assert!(member["phone"].is_null());
    assert!(member["address"].is_null());
    assert!(member["id"].is_number());
    assert!(member["registration_date"].is_string());
    assert!(member.get("password").is_none());
    assert!(member.get("password_hash").is_none());

    let (_, count) = get(&app, "/api/members/count").await;
    assert_eq!(count["data"]["count"], 1);
}

#[tokio::test]
async fn test_register_reports_field_errors() {
    let (_state, app, _db) = spawn_app().await;

    let (status, body) = post_json(
        &app,
        "/api/members",
        &serde_json::json!({
            "name": "Al",
            "email": "not-an-email",
            "password": "12345",
            "confirm_password": "54321",
            "military_rank": "",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);

    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(
        fields,
        vec![
            "name",
            "email",
            "password",
            "confirm_password",
            "military_rank"
        ]
    );

    let (_, count) = get(&app, "/api/members/count").await;
    assert_eq!(count["data"]["count"], 0);
}

#[tokio::test]
async fn test_register_with_null_fields_reports_field_errors() {
    let (_state, app, _db) = spawn_app().await;

    let (status, body) = post_json(
        &app,
        "/api/members",
        &serde_json::json!({
            "name": null,
            "email": "ahmed@example.com",
            "password": "secret1",
            "confirm_password": "secret1",
            "phone": null,
            "address": null,
            "military_rank": null,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "military_rank"]);
}

#[tokio::test]
async fn test_duplicate_email_conflict() {
    let (_state, app, _db) = spawn_app().await;

    let (status, _) = post_json(
        &app,
        "/api/members",
        &registration("Ahmed Ali", "same@example.com", "رائد"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post_json(
        &app,
        "/api/members",
        &registration("Sara Ahmed", "same@example.com", "نقيب"),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "This email address is already registered");

    let (_, count) = get(&app, "/api/members/count").await;
    assert_eq!(count["data"]["count"], 1);
}

#[tokio::test]
async fn test_concurrent_registrations_with_same_email() {
    let (_state, app, _db) = spawn_app().await;

    let attempts = (0..6).map(|i| {
        let app = app.clone();
        async move {
            post_json(
                &app,
                "/api/members",
                &registration(&format!("Racer {i}"), "race@example.com", "جندي"),
            )
            .await
            .0
        }
    });
    let statuses = futures::future::join_all(attempts).await;

    let created = statuses
        .iter()
        .filter(|s| **s == StatusCode::CREATED)
        .count();
    let conflicts = statuses
        .iter()
        .filter(|s| **s == StatusCode::CONFLICT)
        .count();
    assert_eq!(created, 1);
    assert_eq!(conflicts, 5);

    let (_, count) = get(&app, "/api/members/count").await;
    assert_eq!(count["data"]["count"], 1);
}

#[tokio::test]
async fn test_search_members() {
    let (_state, app, _db) = spawn_app().await;
    for (name, email) in [
        ("Ahmed Ali", "a@example.com"),
        ("Sara Ahmed", "s@example.com"),
        ("Omar Khaled", "o@example.com"),
    ] {
        post_json(&app, "/api/members", &registration(name, email, "رقيب")).await;
    }

    let (status, body) = get(&app, "/api/members/search?q=Ahmed").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body["data"]["results"]), vec!["Ahmed Ali", "Sara Ahmed"]);
    assert!(body["data"].get("message").is_none());

    let (status, body) = get(&app, "/api/members/search?q=Zed").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["results"].as_array().unwrap().is_empty());
    assert_eq!(body["data"]["message"], "No members found with this name");

    // Case-sensitive by default
    let (_, body) = get(&app, "/api/members/search?q=ahmed").await;
    assert!(body["data"]["results"].as_array().unwrap().is_empty());

    for uri in [
        "/api/members/search",
        "/api/members/search?q=",
        "/api/members/search?q=%20%20%20",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"]["results"].as_array().unwrap().is_empty());
        assert!(body["data"].get("message").is_none());
    }
}

#[tokio::test]
async fn test_case_insensitive_search_config() {
    let (mut config, _db) = test_config();
    config.search.case_sensitive = false;
    let state = muster::api::create_app_state_from_config(config, None)
        .await
        .unwrap();
    let app = muster::api::router(state);

    post_json(
        &app,
        "/api/members",
        &registration("Ahmed Ali", "a@example.com", "عريف"),
    )
    .await;

    let (_, body) = get(&app, "/api/members/search?q=AHMED").await;
    assert_eq!(names(&body["data"]["results"]), vec!["Ahmed Ali"]);
}

#[tokio::test]
async fn test_list_members_newest_first() {
    let (_state, app, _db) = spawn_app().await;
    for (name, email) in [
        ("First Member", "1@example.com"),
        ("Second Member", "2@example.com"),
        ("Third Member", "3@example.com"),
    ] {
        post_json(&app, "/api/members", &registration(name, email, "عميد")).await;
    }

    let (status, body) = get(&app, "/api/members").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        names(&body["data"]),
        vec!["Third Member", "Second Member", "First Member"]
    );
}

#[tokio::test]
async fn test_rank_statistics() {
    let (state, app, _db) = spawn_app().await;
    for (name, email, rank) in [
        ("Ahmed Ali", "a@example.com", "عقيد"),
        ("Sara Ahmed", "s@example.com", "عقيد"),
        ("Omar Khaled", "o@example.com", "نقيب"),
    ] {
        post_json(&app, "/api/members", &registration(name, email, rank)).await;
    }

    // Rows without a rank can only exist in the store directly.
    state
        .store()
        .insert_member(NewMember {
            name: "Legacy Member".to_string(),
            email: "legacy@example.com".to_string(),
            password_hash: "legacy".to_string(),
            phone: None,
            address: None,
            military_rank: None,
        })
        .await
        .unwrap();

    let (status, body) = get(&app, "/api/ranks/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        serde_json::json!([
            { "rank_label": "عقيد", "count": 2 },
            { "rank_label": "نقيب", "count": 1 },
            { "rank_label": "غير محدد", "count": 1 },
        ])
    );
}

#[tokio::test]
async fn test_rank_catalog() {
    let (_state, app, _db) = spawn_app().await;

    let (status, body) = get(&app, "/api/ranks").await;
    assert_eq!(status, StatusCode::OK);

    let ranks = body["data"].as_array().unwrap();
    assert_eq!(ranks.len(), 18);
    assert_eq!(ranks[0]["value"], "");
    assert_eq!(ranks[1]["value"], "مشير");
    assert_eq!(ranks[17]["value"], "جندي");
}

#[tokio::test]
async fn test_member_by_email() {
    let (_state, app, _db) = spawn_app().await;
    post_json(
        &app,
        "/api/members",
        &registration("Ahmed Ali", "ahmed@example.com", "لواء"),
    )
    .await;

    let (status, body) = get(&app, "/api/members/by-email?email=ahmed@example.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Ahmed Ali");

    let (status, _) = get(&app, "/api/members/by-email?email=nobody@example.com").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&app, "/api/members/by-email").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_uninitialized_store() {
    let (config, _db) = test_config();
    let store = Store::connect(&config.general.database_path, 1, 1)
        .await
        .unwrap();
    let shared = Arc::new(SharedState::with_store(config, store).unwrap());
    let app = muster::api::router(muster::api::create_app_state(shared, None));

    let (status, body) = get(&app, "/api/members/count").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 0);

    let (status, body) = get(&app, "/api/health/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["data"]["checks"]["database"], true);
    assert_eq!(body["data"]["checks"]["schema"], false);

    let (status, body) = get(&app, "/api/members").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "A database error occurred");
}

#[tokio::test]
async fn test_health_endpoints() {
    let (_state, app, _db) = spawn_app().await;

    let (status, body) = get(&app, "/api/health/live").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "alive");

    let (status, body) = get(&app, "/api/health/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["ready"], true);
}

#[tokio::test]
async fn test_metrics_disabled_without_recorder() {
    let (_state, app, _db) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
