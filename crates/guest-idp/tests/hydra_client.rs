//! Hydra admin client tests against a wiremock Hydra.

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use guest_idp::{AdminApi, AdminError, HydraClient};

fn client(server: &MockServer) -> HydraClient {
    HydraClient::new(&server.uri()).expect("Mock server URI should be valid")
}

#[tokio::test]
async fn get_status_reads_status_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health/alive"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;

    assert_eq!(client(&server).get_status().await.unwrap(), "ok");
}

#[tokio::test]
async fn get_status_without_status_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health/alive"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "version": "v1" })))
        .mount(&server)
        .await;

    let err = client(&server).get_status().await.unwrap_err();
    assert!(matches!(err, AdminError::MissingStatus), "got {:?}", err);
}

#[tokio::test]
async fn get_status_rejects_non_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health/alive"))
        .respond_with(ResponseTemplate::new(200).set_body_string("alive"))
        .mount(&server)
        .await;

    let err = client(&server).get_status().await.unwrap_err();
    assert!(matches!(err, AdminError::Decode(_)), "got {:?}", err);
}

#[tokio::test]
async fn unreachable_hydra_is_a_transport_error() {
    // Reserve a free port, then release it so nothing is listening there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let hydra = HydraClient::new(&format!("http://{}", addr)).unwrap();
    let err = hydra.get_status().await.unwrap_err();
    assert!(matches!(err, AdminError::Transport(_)), "got {:?}", err);
}

#[tokio::test]
async fn fetch_login_context_by_challenge() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/oauth2/auth/requests/login"))
        .and(query_param("login_challenge", "a b&c"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "challenge": "a b&c",
            "subject": "existing-user",
            "request_url": "http://example.com/oauth2/auth?client_id=x",
            "skip": true,
            "oidc_context": { "ui_locales": ["en"] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let context = client(&server).fetch_login_context("a b&c").await.unwrap();
    assert_eq!(context.subject, "existing-user");
    assert!(context.skip);
    assert_eq!(context.oidc_context.ui_locales, vec!["en"]);
    assert_eq!(context.oidc_context.display, None);
}

#[tokio::test]
async fn error_body_becomes_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/oauth2/auth/requests/consent"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "Not Found",
            "error_description": "Unable to locate the requested resource"
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .fetch_consent_context("missing")
        .await
        .unwrap_err();
    match err {
        AdminError::Status { status, message } => {
            assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
            assert_eq!(message, "Not Found: Unable to locate the requested resource");
        }
        other => panic!("Expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn accept_login_sends_session_scoped_remember() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/oauth2/auth/requests/login/accept"))
        .and(query_param("login_challenge", "foobar"))
        .and(body_json(json!({
            "subject": "guest",
            "remember": true,
            "remember_for": 0
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "redirect_to": "http://next" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let redirect = client(&server).accept_login("foobar", "guest").await.unwrap();
    assert_eq!(redirect, "http://next");
}

#[tokio::test]
async fn accept_without_redirect_is_a_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/oauth2/auth/requests/login/accept"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/oauth2/auth/requests/consent/accept"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "redirect_to": null })))
        .mount(&server)
        .await;

    let hydra = client(&server);
    assert!(matches!(
        hydra.accept_login("foobar", "guest").await,
        Err(AdminError::MissingRedirect)
    ));
    assert!(matches!(
        hydra.accept_consent("foobar", vec![], vec![]).await,
        Err(AdminError::MissingRedirect)
    ));
}

#[tokio::test]
async fn accept_consent_sends_grant_and_guest_marker() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/oauth2/auth/requests/consent/accept"))
        .and(query_param("consent_challenge", "foobar"))
        .and(body_json(json!({
            "grant_access_token_audience": ["react-client"],
            "grant_scope": ["openid"],
            "remember": true,
            "remember_for": 0,
            "session": { "id_token": { "guest": { "1": true } } }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "redirect_to": "http://next" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let redirect = client(&server)
        .accept_consent(
            "foobar",
            vec!["react-client".to_string()],
            vec!["openid".to_string()],
        )
        .await
        .unwrap();
    assert_eq!(redirect, "http://next");
}

#[tokio::test]
async fn base_path_prefix_is_preserved() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/health/alive"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let hydra = HydraClient::new(&format!("{}/admin/", server.uri())).unwrap();
    assert_eq!(hydra.get_status().await.unwrap(), "ok");
}
