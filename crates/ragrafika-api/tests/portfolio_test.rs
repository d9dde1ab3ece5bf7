//! Portfolio endpoint integration tests.
//!
//! Run with: `cargo test -p ragrafika-api --test portfolio_test`

mod helpers;

use axum::http::{Method, StatusCode};
use helpers::fixtures::{self, ORIGINAL_BYTES, STYLED_BYTES, SUBMIT_PATH};
use helpers::{setup_failing_app, setup_test_app, stylize_settings, unconfigured};
use mockito::Matcher;
use serde_json::{json, Value};

#[tokio::test]
async fn test_preflight_returns_cors_headers() {
    let app = setup_test_app(unconfigured()).await;

    let response = app.client().method(Method::OPTIONS, "/").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().is_empty());
    assert_eq!(response.header("access-control-allow-origin"), "*");
    assert_eq!(
        response.header("access-control-allow-methods"),
        "GET, POST, DELETE, OPTIONS"
    );
    assert_eq!(
        response.header("access-control-allow-headers"),
        "Content-Type, X-Auth-Token"
    );
    assert_eq!(response.header("access-control-max-age"), "86400");
}

#[tokio::test]
async fn test_list_empty_portfolio() {
    let app = setup_test_app(unconfigured()).await;

    let response = app.client().get("/").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.header("access-control-allow-origin"), "*");
    assert_eq!(response.json::<Value>(), json!({ "photos": [] }));
}

#[tokio::test]
async fn test_list_is_newest_first_and_filters_by_category() {
    let app = setup_test_app(unconfigured()).await;
    let client = app.client();

    for category in ["weddings", "portraits", "weddings"] {
        let response = client.post("/").json(&fixtures::upload_body(Some(category))).await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    let all = client.get("/").await.json::<Value>();
    let ids: Vec<i64> = all["photos"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 2, 1]);

    let weddings = client
        .get("/")
        .add_query_param("category", "weddings")
        .await
        .json::<Value>();
    let photos = weddings["photos"].as_array().unwrap();
    assert_eq!(photos.len(), 2);
    assert!(photos.iter().all(|p| p["category"] == "weddings"));
    assert_eq!(photos[0]["id"], 3);

    let none = client
        .get("/")
        .add_query_param("category", "landscapes")
        .await
        .json::<Value>();
    assert_eq!(none["photos"], json!([]));
}

#[tokio::test]
async fn test_listed_record_shape() {
    let app = setup_test_app(unconfigured()).await;
    let client = app.client();

    client.post("/").json(&fixtures::upload_body(None)).await;

    let body = client.get("/portfolio").await.json::<Value>();
    let photo = &body["photos"][0];
    assert_eq!(photo["category"], "general");
    assert_eq!(photo["title"], "Morning");
    assert_eq!(photo["description"], "Studio session");
    assert_eq!(photo["is_processed"], false);
    assert!(photo["styled_url"].is_null());
    assert_eq!(photo["created_at"], "2024-01-01T00:00:01Z");
}

#[tokio::test]
async fn test_upload_without_image_is_rejected() {
    let app = setup_test_app(unconfigured()).await;

    let response = app
        .client()
        .post("/")
        .json(&json!({ "category": "weddings" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.header("access-control-allow-origin"), "*");
    assert_eq!(response.json::<Value>()["error"], "Image required");
    assert!(app.photos.all().is_empty());
}

#[tokio::test]
async fn test_upload_with_invalid_base64_is_rejected() {
    let app = setup_test_app(unconfigured()).await;

    let response = app
        .client()
        .post("/")
        .json(&json!({ "image": "%%% not base64 %%%" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(app.photos.all().is_empty());
}

#[tokio::test]
async fn test_upload_with_malformed_body_is_rejected() {
    let app = setup_test_app(unconfigured()).await;

    let response = app.client().post("/").text("{ not json").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_upload_without_credentials_stays_unprocessed() {
    let app = setup_test_app(unconfigured()).await;

    let response = app
        .client()
        .post("/")
        .json(&fixtures::upload_body(Some("weddings")))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["id"], 1);
    assert_eq!(body["is_processed"], false);
    assert!(body["styled_url"].is_null());

    let original_url = body["original_url"].as_str().unwrap();
    assert!(original_url.starts_with("http://localhost:4000/files/portfolio/original/weddings/"));
    assert!(original_url.ends_with(".jpg"));
    assert_eq!(app.stored_file(original_url).unwrap(), ORIGINAL_BYTES);

    let record = app.photos.get(1).unwrap();
    assert!(!record.is_processed);
    assert!(record.styled_url.is_none());
}

#[tokio::test]
async fn test_upload_accepts_data_url_prefix() {
    let app = setup_test_app(unconfigured()).await;

    let response = app
        .client()
        .post("/")
        .json(&json!({
            "image": format!("data:image/jpeg;base64,{}", fixtures::original_base64())
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let original_url = response.json::<Value>()["original_url"]
        .as_str()
        .unwrap()
        .to_string();
    assert_eq!(app.stored_file(&original_url).unwrap(), ORIGINAL_BYTES);
}

#[tokio::test]
async fn test_upload_is_stylized_when_generation_succeeds() {
    let mut api = mockito::Server::new_async().await;
    let submit = api
        .mock("POST", SUBMIT_PATH)
        .match_header("authorization", "Api-Key test-api-key")
        .match_body(Matcher::PartialJson(json!({
            "modelUri": "art://test-folder/yandex-art/latest"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(fixtures::submitted("op-1"))
        .create_async()
        .await;
    let poll = api
        .mock("GET", fixtures::operations_path("op-1").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(fixtures::completed("op-1"))
        .create_async()
        .await;

    let app = setup_test_app(stylize_settings(&api.url(), true)).await;

    let response = app
        .client()
        .post("/")
        .json(&fixtures::upload_body(Some("portraits")))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["is_processed"], true);

    let original_url = body["original_url"].as_str().unwrap();
    let styled_url = body["styled_url"].as_str().unwrap();
    assert!(styled_url.starts_with("http://localhost:4000/files/portfolio/styled/portraits/"));
    assert_eq!(
        styled_url.rsplit('/').next(),
        original_url.rsplit('/').next()
    );
    assert_eq!(app.stored_file(styled_url).unwrap(), STYLED_BYTES);

    let record = app.photos.get(body["id"].as_i64().unwrap()).unwrap();
    assert!(record.is_processed);
    assert_eq!(record.styled_url.as_deref(), Some(styled_url));

    submit.assert_async().await;
    poll.assert_async().await;
}

#[tokio::test]
async fn test_generation_api_error_leaves_photo_unprocessed() {
    let mut api = mockito::Server::new_async().await;
    let submit = api
        .mock("POST", SUBMIT_PATH)
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let app = setup_test_app(stylize_settings(&api.url(), true)).await;

    let response = app
        .client()
        .post("/")
        .json(&fixtures::upload_body(None))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["is_processed"], false);
    assert!(body["styled_url"].is_null());
    assert_eq!(app.photos.all().len(), 1);

    submit.assert_async().await;
}

#[tokio::test]
async fn test_generation_timeout_stops_after_max_attempts() {
    let mut api = mockito::Server::new_async().await;
    api.mock("POST", SUBMIT_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(fixtures::submitted("op-2"))
        .create_async()
        .await;
    let poll = api
        .mock("GET", fixtures::operations_path("op-2").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(fixtures::in_progress("op-2"))
        .expect(3)
        .create_async()
        .await;

    let app = setup_test_app(stylize_settings(&api.url(), true)).await;

    let response = app
        .client()
        .post("/")
        .json(&fixtures::upload_body(None))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["is_processed"], false);
    assert!(body["styled_url"].is_null());

    poll.assert_async().await;
}

#[tokio::test]
async fn test_failed_operation_leaves_photo_unprocessed() {
    let mut api = mockito::Server::new_async().await;
    api.mock("POST", SUBMIT_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(fixtures::submitted("op-3"))
        .create_async()
        .await;
    api.mock("GET", fixtures::operations_path("op-3").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": "op-3",
                "done": true,
                "error": { "code": 3, "message": "prompt rejected" }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let app = setup_test_app(stylize_settings(&api.url(), true)).await;

    let response = app
        .client()
        .post("/")
        .json(&fixtures::upload_body(None))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["is_processed"], false);
    assert!(!app.photos.get(1).unwrap().is_processed);
}

#[tokio::test]
async fn test_undecodable_generated_image_leaves_photo_unprocessed() {
    let mut api = mockito::Server::new_async().await;
    api.mock("POST", SUBMIT_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(fixtures::submitted("op-4"))
        .create_async()
        .await;
    let poll = api
        .mock("GET", fixtures::operations_path("op-4").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "id": "op-4", "done": true, "response": { "image": "!!" } }).to_string())
        .create_async()
        .await;

    let app = setup_test_app(stylize_settings(&api.url(), true)).await;

    let response = app
        .client()
        .post("/")
        .json(&fixtures::upload_body(Some("portraits")))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["is_processed"], false);
    assert!(body["styled_url"].is_null());

    let record = app.photos.get(body["id"].as_i64().unwrap()).unwrap();
    assert!(!record.is_processed);
    assert!(record.styled_url.is_none());
    assert_eq!(record.original_url, body["original_url"].as_str().unwrap());
    assert!(!app.storage_path.join("portfolio/styled").exists());

    poll.assert_async().await;
}

#[tokio::test]
async fn test_delete_removes_photo() {
    let app = setup_test_app(unconfigured()).await;
    let client = app.client();

    client.post("/").json(&fixtures::upload_body(None)).await;
    client.post("/").json(&fixtures::upload_body(None)).await;

    let response = client.delete("/").add_query_param("id", "1").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "success": true }));

    let ids: Vec<i64> = app.photos.all().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2]);
}

#[tokio::test]
async fn test_delete_unknown_id_succeeds() {
    let app = setup_test_app(unconfigured()).await;

    let response = app.client().delete("/").add_query_param("id", "999").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["success"], true);
}

#[tokio::test]
async fn test_delete_without_id_is_rejected() {
    let app = setup_test_app(unconfigured()).await;

    let response = app.client().delete("/").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Photo ID required");
}

#[tokio::test]
async fn test_delete_with_non_integer_id_is_rejected() {
    let app = setup_test_app(unconfigured()).await;

    let response = app.client().delete("/").add_query_param("id", "abc").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_other_methods_are_not_allowed() {
    let app = setup_test_app(unconfigured()).await;

    for method in [Method::PUT, Method::PATCH] {
        let response = app.client().method(method, "/").await;

        assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.header("access-control-allow-origin"), "*");
        assert_eq!(response.json::<Value>()["error"], "Method not allowed");
    }
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let app = setup_test_app(unconfigured()).await;

    let image = "A".repeat(helpers::MAX_BODY_BYTES + 16);
    let response = app.client().post("/").json(&json!({ "image": image })).await;

    assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(app.photos.all().is_empty());
}

#[tokio::test]
async fn test_database_failure_returns_500_with_cors() {
    let (server, _temp_dir) = setup_failing_app().await;

    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.header("access-control-allow-origin"), "*");
    assert!(response.json::<Value>()["error"].is_string());

    let response = server.post("/").json(&fixtures::upload_body(None)).await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = server.delete("/").add_query_param("id", "1").await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}
