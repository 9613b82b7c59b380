// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Upload gate tests against a mock TikTok.

use ark_gateway::models::{TokenRecord, UserRecord};
use ark_gateway::AppState;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;
use wiremock::{
    matchers::{body_string_contains, header as header_matcher, method, path},
    Mock, MockServer, ResponseTemplate,
};

mod common;

fn upload_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", common::BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

fn valid_upload() -> Request<Body> {
    upload_request(common::multipart_body(
        Some(("clip.mp4", b"VIDEOBYTES")),
        Some("my caption"),
    ))
}

/// Mount an upload endpoint that must never be called.
async fn forbid_upload(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/video/upload/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(server)
        .await;
}

async fn link_account(state: &AppState, username: &str, tokens: serde_json::Value) {
    let store = state.tiktok_service.store();
    store
        .save_user(&UserRecord(json!({"data": {"user": {"username": username}}})))
        .await
        .unwrap();
    store.save_tokens(&TokenRecord(tokens)).await.unwrap();
}

#[tokio::test]
async fn test_upload_without_confirmed_user() {
    let server = MockServer::start().await;
    forbid_upload(&server).await;
    let (app, _state) = common::create_test_app(common::mock_config(&server));

    let response = app.oneshot(valid_upload()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::json_body(response).await;
    assert_eq!(json, json!({"error": "No user confirmed"}));
}

#[tokio::test]
async fn test_upload_locked_to_authorized_account() {
    let server = MockServer::start().await;
    forbid_upload(&server).await;
    let (app, state) = common::create_test_app(common::mock_config(&server));
    link_account(&state, "someone_else", json!({"data": {"access_token": "act.x"}})).await;

    let response = app.oneshot(valid_upload()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::json_body(response).await;
    assert_eq!(json, json!({"error": "Uploads locked to lawrence72 only"}));
}

#[tokio::test]
async fn test_upload_without_access_token() {
    let server = MockServer::start().await;
    forbid_upload(&server).await;
    let (app, state) = common::create_test_app(common::mock_config(&server));
    link_account(&state, "lawrence72", json!({"data": {}})).await;

    let response = app.oneshot(valid_upload()).await.unwrap();

    let json = common::json_body(response).await;
    assert_eq!(
        json,
        json!({"error": "No access token. Please authenticate first."})
    );
}

#[tokio::test]
async fn test_upload_provider_failure_is_structured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/video/upload/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&server)
        .await;
    let (app, state) = common::create_test_app(common::mock_config(&server));
    link_account(&state, "lawrence72", json!({"data": {"access_token": "act.good"}})).await;

    let response = app.oneshot(valid_upload()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::json_body(response).await;
    assert!(json["error"].as_str().unwrap().contains("500"));
    assert_eq!(json["response"], "upstream exploded");
}

#[tokio::test]
async fn test_upload_success_forwards_video_and_caption() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/video/upload/"))
        .and(header_matcher("authorization", "Bearer act.good"))
        .and(body_string_contains("name=\"video\""))
        .and(body_string_contains("filename=\"clip.mp4\""))
        .and(body_string_contains("VIDEOBYTES"))
        .and(body_string_contains("name=\"caption\""))
        .and(body_string_contains("my caption"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"video_id": "v123"}})),
        )
        .expect(1)
        .mount(&server)
        .await;
    let (app, state) = common::create_test_app(common::mock_config(&server));
    link_account(&state, "lawrence72", json!({"data": {"access_token": "act.good"}})).await;

    let response = app.oneshot(valid_upload()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::json_body(response).await;
    assert_eq!(
        json,
        json!({"status": "success", "response": {"data": {"video_id": "v123"}}})
    );
}

#[tokio::test]
async fn test_upload_unparseable_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/video/upload/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&server)
        .await;
    let (app, state) = common::create_test_app(common::mock_config(&server));
    link_account(&state, "lawrence72", json!({"data": {"access_token": "act.good"}})).await;

    let response = app.oneshot(valid_upload()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::json_body(response).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("JSON parse error"));
    assert_eq!(json["response"], "<html>ok</html>");
    assert!(json.get("status").is_none());
}

#[tokio::test]
async fn test_upload_defaults_video_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/video/upload/"))
        .and(body_string_contains("filename=\"clip.mp4\""))
        .and(body_string_contains("Content-Type: video/mp4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": 1})))
        .expect(1)
        .mount(&server)
        .await;
    let (app, state) = common::create_test_app(common::mock_config(&server));
    link_account(&state, "lawrence72", json!({"data": {"access_token": "act.good"}})).await;

    let response = app
        .oneshot(upload_request(common::multipart_body_with_type(
            Some(("clip.mp4", b"VIDEOBYTES")),
            Some("my caption"),
            None,
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::json_body(response).await;
    assert_eq!(json, json!({"status": "success", "response": {"ok": 1}}));
}

#[tokio::test]
async fn test_upload_unreachable_provider_is_structured() {
    // test_default points the upload URL at a closed port
    let (app, state) = common::create_test_app(ark_gateway::config::Config::test_default());
    link_account(&state, "lawrence72", json!({"data": {"access_token": "act.good"}})).await;

    let response = app.oneshot(valid_upload()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::json_body(response).await;
    assert!(json["error"].is_string());
    assert!(json.get("response").is_none());
}

#[tokio::test]
async fn test_upload_requires_caption() {
    let (app, _state) = common::create_test_app(ark_gateway::config::Config::test_default());

    let response = app
        .oneshot(upload_request(common::multipart_body(
            Some(("clip.mp4", b"VIDEOBYTES")),
            None,
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_requires_video() {
    let (app, _state) = common::create_test_app(ark_gateway::config::Config::test_default());

    let response = app
        .oneshot(upload_request(common::multipart_body(None, Some("caption"))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
