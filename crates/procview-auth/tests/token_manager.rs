//! Token manager behaviour against a fake identity provider.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use procview_auth::{AuthError, Credentials, ManualClock, TokenManager};
use serde_json::json;
use tokio::task::JoinSet;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN_PATH: &str = "/oauth/token";

fn t0() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

fn credentials(server: &MockServer) -> Credentials {
    Credentials::new(&format!("{}{}", server.uri(), TOKEN_PATH), "procview", "s3cret").unwrap()
}

fn manager_with(credentials: Credentials) -> (TokenManager, ManualClock) {
    let clock = ManualClock::new(t0());
    let manager = TokenManager::with_clock(credentials, Arc::new(clock.clone())).unwrap();
    (manager, clock)
}

fn granted(token: &str, expires_in: u64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "access_token": token,
        "token_type": "Bearer",
        "expires_in": expires_in,
    }))
}

async fn mount_once(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(response)
        .up_to_n_times(1)
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_single_fetch_within_validity_window() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(granted("tok1", 3600))
        .expect(1)
        .mount(&server)
        .await;

    let (manager, clock) = manager_with(credentials(&server));
    for _ in 0..5 {
        assert_eq!(manager.get_valid_token().await.unwrap(), "tok1");
        clock.advance(TimeDelta::seconds(600));
    }
}

#[tokio::test]
async fn test_sends_form_encoded_client_credentials_grant() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("client_id=procview"))
        .and(body_string_contains("client_secret=s3cret"))
        .and(body_string_contains("scope=engine%3Aread"))
        .respond_with(granted("tok1", 3600))
        .expect(1)
        .mount(&server)
        .await;

    let (manager, _clock) = manager_with(credentials(&server).with_scope("engine:read"));
    assert_eq!(manager.get_valid_token().await.unwrap(), "tok1");
}

#[tokio::test]
async fn test_scope_omitted_when_not_configured() {
    let server = MockServer::start().await;
    mount_once(&server, granted("tok1", 3600)).await;

    let (manager, _clock) = manager_with(credentials(&server));
    manager.get_valid_token().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8(requests[0].body.clone()).unwrap();
    assert!(!body.contains("scope="));
}

#[tokio::test]
async fn test_expiry_boundary_refetches_at_buffered_expiry() {
    let server = MockServer::start().await;
    mount_once(&server, granted("tok1", 120)).await;
    mount_once(&server, granted("tok2", 120)).await;

    let (manager, clock) = manager_with(credentials(&server));
    assert_eq!(manager.get_valid_token().await.unwrap(), "tok1");

    // 120s lifetime minus the 60s buffer: valid through t=59.
    clock.set(t0() + TimeDelta::seconds(59));
    assert_eq!(manager.get_valid_token().await.unwrap(), "tok1");

    clock.set(t0() + TimeDelta::seconds(60));
    assert_eq!(manager.get_valid_token().await.unwrap(), "tok2");
    assert_eq!(manager.get_valid_token().await.unwrap(), "tok2");
}

#[tokio::test]
async fn test_missing_expires_in_defaults_to_one_hour() {
    let server = MockServer::start().await;
    mount_once(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok1"})),
    )
    .await;
    mount_once(&server, granted("tok2", 3600)).await;

    let (manager, clock) = manager_with(credentials(&server));
    assert_eq!(manager.get_valid_token().await.unwrap(), "tok1");

    clock.set(t0() + TimeDelta::seconds(3539));
    assert_eq!(manager.get_valid_token().await.unwrap(), "tok1");

    clock.set(t0() + TimeDelta::seconds(3540));
    assert_eq!(manager.get_valid_token().await.unwrap(), "tok2");
}

#[tokio::test]
async fn test_failure_in_empty_state_keeps_failing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .expect(2)
        .mount(&server)
        .await;

    let (manager, _clock) = manager_with(credentials(&server));

    let err = manager.get_valid_token().await.unwrap_err();
    assert!(matches!(err, AuthError::Status { status: 500, .. }));
    assert!(manager.token_info().await.is_none());

    let err = manager.get_valid_token().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(manager.token_info().await.is_none());
}

#[tokio::test]
async fn test_failed_refresh_keeps_valid_cached_token() {
    let server = MockServer::start().await;
    mount_once(&server, granted("tok1", 3600)).await;
    mount_once(
        &server,
        ResponseTemplate::new(500).set_body_json(json!({
            "error": "temporarily_unavailable",
            "error_description": "try later",
        })),
    )
    .await;

    let (manager, clock) = manager_with(credentials(&server));
    assert_eq!(manager.get_valid_token().await.unwrap(), "tok1");

    match manager.refresh().await.unwrap_err() {
        AuthError::Status { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "temporarily_unavailable: try later");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    clock.advance(TimeDelta::seconds(60));
    assert_eq!(manager.get_valid_token().await.unwrap(), "tok1");
}

#[tokio::test]
async fn test_missing_access_token_keeps_valid_cached_token() {
    let server = MockServer::start().await;
    mount_once(&server, granted("tok1", 3600)).await;
    mount_once(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"expires_in": 3600})),
    )
    .await;

    let (manager, _clock) = manager_with(credentials(&server));
    assert_eq!(manager.get_valid_token().await.unwrap(), "tok1");

    let err = manager.refresh().await.unwrap_err();
    assert!(matches!(err, AuthError::MissingAccessToken));

    assert_eq!(manager.get_valid_token().await.unwrap(), "tok1");
}

#[tokio::test]
async fn test_stale_token_not_served_after_failed_fetch() {
    let server = MockServer::start().await;
    mount_once(&server, granted("tok1", 120)).await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let (manager, clock) = manager_with(credentials(&server));
    assert_eq!(manager.get_valid_token().await.unwrap(), "tok1");

    clock.advance(TimeDelta::seconds(60));
    assert!(manager.get_valid_token().await.is_err());
    assert!(manager.get_valid_token().await.is_err());

    let info = manager.token_info().await.unwrap();
    assert!(info.is_expired);
}

#[tokio::test]
async fn test_malformed_body_is_auth_error() {
    let server = MockServer::start().await;
    mount_once(
        &server,
        ResponseTemplate::new(200).set_body_string("<html>login</html>"),
    )
    .await;

    let (manager, _clock) = manager_with(credentials(&server));
    let err = manager.get_valid_token().await.unwrap_err();
    assert!(matches!(err, AuthError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_slow_provider_times_out_as_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(granted("tok1", 3600).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let creds = credentials(&server).with_timeout(Duration::from_millis(200));
    let (manager, _clock) = manager_with(creds);

    let err = manager.get_valid_token().await.unwrap_err();
    assert!(matches!(err, AuthError::Network(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_callers_share_one_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(granted("tok1", 3600).set_delay(Duration::from_millis(200)))
        .expect(1)
        .mount(&server)
        .await;

    let (manager, _clock) = manager_with(credentials(&server));
    let manager = Arc::new(manager);

    let mut set = JoinSet::new();
    for _ in 0..16 {
        let manager = Arc::clone(&manager);
        set.spawn(async move { manager.get_valid_token().await });
    }

    while let Some(result) = set.join_next().await {
        assert_eq!(result.unwrap().unwrap(), "tok1");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_stale_detections_share_one_refetch() {
    let server = MockServer::start().await;
    mount_once(&server, granted("tok1", 120)).await;
    mount_once(
        &server,
        granted("tok2", 120).set_delay(Duration::from_millis(200)),
    )
    .await;

    let (manager, clock) = manager_with(credentials(&server));
    let manager = Arc::new(manager);
    assert_eq!(manager.get_valid_token().await.unwrap(), "tok1");

    clock.advance(TimeDelta::seconds(90));

    let mut set = JoinSet::new();
    for _ in 0..16 {
        let manager = Arc::clone(&manager);
        set.spawn(async move { manager.get_valid_token().await });
    }

    while let Some(result) = set.join_next().await {
        assert_eq!(result.unwrap().unwrap(), "tok2");
    }
}

#[tokio::test]
async fn test_clear_cache_forces_new_fetch() {
    let server = MockServer::start().await;
    mount_once(&server, granted("tok1", 3600)).await;
    mount_once(&server, granted("tok2", 3600)).await;

    let (manager, _clock) = manager_with(credentials(&server));
    assert_eq!(manager.get_valid_token().await.unwrap(), "tok1");

    manager.clear_cache().await;
    assert!(manager.token_info().await.is_none());
    assert_eq!(manager.get_valid_token().await.unwrap(), "tok2");
}

#[tokio::test]
async fn test_token_info_reports_buffered_expiry() {
    let server = MockServer::start().await;
    mount_once(&server, granted("tok1", 3600)).await;

    let (manager, clock) = manager_with(credentials(&server));
    manager.get_valid_token().await.unwrap();

    clock.advance(TimeDelta::seconds(40));
    let info = manager.token_info().await.unwrap();
    assert_eq!(info.expires_at, t0() + TimeDelta::seconds(3540));
    assert_eq!(info.expires_in_secs, 3500);
    assert!(!info.is_expired);
}
