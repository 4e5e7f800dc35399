//! Integration tests for the session store.
//!
//! Runs against a local mock of the auth endpoint.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use pocketshop_client::{ApiError, SessionStatus};
use pocketshop_integration_tests::{demo_credentials, login_json, mount_login, shop_for, user_json};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_login_success_sets_user_and_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"username": "emilys", "password": "emilyspass"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_json("token-abc")))
        .expect(1)
        .mount(&server)
        .await;

    let shop = shop_for(&server);
    let outcome = shop.login(&demo_credentials()).await.unwrap();
    assert_eq!(outcome.token.expose(), "token-abc");
    assert_eq!(outcome.user.username, "emilys");

    let session = shop.session().snapshot();
    assert_eq!(session.status(), SessionStatus::Authenticated);
    assert_eq!(session.user().unwrap().first_name, "Emily");
    assert_eq!(session.token().unwrap().expose(), "token-abc");
    assert!(session.error().is_none());
    assert!(!session.is_loading());
}

#[tokio::test]
async fn test_login_accepts_token_field() {
    let server = MockServer::start().await;
    let mut body = user_json();
    body["token"] = json!("legacy-token");
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let shop = shop_for(&server);
    let outcome = shop.session().login(&demo_credentials()).await.unwrap();
    assert_eq!(outcome.token.expose(), "legacy-token");
}

#[tokio::test]
async fn test_rejected_login_surfaces_service_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let shop = shop_for(&server);
    let err = shop.session().login(&demo_credentials()).await.unwrap_err();
    assert!(matches!(err, ApiError::Rejected { status: 400, .. }));

    let session = shop.session().snapshot();
    assert_eq!(session.status(), SessionStatus::AuthError);
    assert_eq!(session.error(), Some("Invalid credentials"));
    assert!(session.user().is_none());
    assert!(session.token().is_none());
    assert!(!session.is_loading());
}

#[tokio::test]
async fn test_rejected_login_without_message_uses_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let shop = shop_for(&server);
    shop.session().login(&demo_credentials()).await.unwrap_err();
    assert_eq!(
        shop.session().snapshot().error(),
        Some("Request failed with status code 503")
    );
}

#[tokio::test]
async fn test_success_without_token_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .mount(&server)
        .await;

    let shop = shop_for(&server);
    let err = shop.session().login(&demo_credentials()).await.unwrap_err();
    assert!(matches!(err, ApiError::MissingToken));

    let session = shop.session().snapshot();
    assert_eq!(session.error(), Some("No access token received"));
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_failed_login_clears_previous_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_json("first")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let shop = shop_for(&server);
    shop.login(&demo_credentials()).await.unwrap();
    assert!(shop.session().snapshot().is_authenticated());

    shop.login(&demo_credentials()).await.unwrap_err();
    let session = shop.session().snapshot();
    assert!(session.user().is_none());
    assert!(session.token().is_none());
}

#[tokio::test]
async fn test_network_failure() {
    // Nothing listens on port 1.
    let config = pocketshop_client::ClientConfig::with_api_url(
        Url::parse("http://127.0.0.1:1").unwrap(),
    );
    let shop = pocketshop_client::Shop::new(&config).unwrap();

    let err = shop.session().login(&demo_credentials()).await.unwrap_err();
    assert!(err.is_network());

    let session = shop.session().snapshot();
    assert_eq!(session.status(), SessionStatus::AuthError);
    assert!(session.error().is_some_and(|m| !m.is_empty()));
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let server = MockServer::start().await;
    mount_login(&server, "token-abc").await;

    let shop = shop_for(&server);
    shop.session().logout();
    assert_eq!(shop.session().snapshot().status(), SessionStatus::Anonymous);

    shop.login(&demo_credentials()).await.unwrap();
    shop.session().logout();
    shop.session().logout();

    let session = shop.session().snapshot();
    assert!(session.user().is_none());
    assert!(session.token().is_none());
    assert_eq!(session.status(), SessionStatus::Anonymous);
}

#[tokio::test]
async fn test_observers_see_loading_then_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(login_json("token-abc"))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let shop = shop_for(&server);
    let mut rx = shop.session().subscribe();

    let store = shop.session().clone();
    let task = tokio::spawn(async move { store.login(&demo_credentials()).await });

    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().is_loading());

    task.await.unwrap().unwrap();
    assert_eq!(rx.borrow().status(), SessionStatus::Authenticated);
}

#[tokio::test]
async fn test_overlapping_logins_last_completion_wins() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"username": "slow", "password": "pw"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(login_json("slow-token"))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"username": "fast", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_json("fast-token")))
        .mount(&server)
        .await;

    let shop = shop_for(&server);
    let slow = pocketshop_core::Credentials::new("slow", "pw");
    let fast = pocketshop_core::Credentials::new("fast", "pw");

    let (a, b) = tokio::join!(shop.login(&slow), shop.login(&fast));
    a.unwrap();
    b.unwrap();

    let session = shop.session().snapshot();
    assert_eq!(session.token().unwrap().expose(), "slow-token");
    assert!(!session.is_loading());
}

#[tokio::test]
async fn test_abandoned_login_still_applies_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(login_json("late-token"))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let shop = shop_for(&server);
    let mut rx = shop.session().subscribe();

    let abandoned =
        tokio::time::timeout(Duration::from_millis(50), shop.login(&demo_credentials())).await;
    assert!(abandoned.is_err());
    assert!(shop.session().snapshot().is_loading());

    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|s| !s.is_loading()))
        .await
        .unwrap()
        .unwrap();

    let session = shop.session().snapshot();
    assert!(!session.is_loading());
    assert_eq!(session.status(), SessionStatus::Authenticated);
    assert_eq!(session.token().unwrap().expose(), "late-token");
}

#[tokio::test]
async fn test_login_with_both_token_fields() {
    let server = MockServer::start().await;
    let mut body = login_json("access");
    body["token"] = json!("legacy");
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let shop = shop_for(&server);
    let outcome = shop.login(&demo_credentials()).await.unwrap();
    assert_eq!(outcome.token.expose(), "access");
    assert!(shop.session().snapshot().error().is_none());
}

#[tokio::test]
async fn test_login_with_partial_profile() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"accessToken": "t", "id": 1, "username": "emilys"}),
        ))
        .mount(&server)
        .await;

    let shop = shop_for(&server);
    let outcome = shop.login(&demo_credentials()).await.unwrap();
    assert_eq!(outcome.user.username, "emilys");
    assert_eq!(shop.session().snapshot().status(), SessionStatus::Authenticated);
}
