//! Error classification and pre-flight validation.

use kc_admin_client::{AdminConfig, Error, KeycloakAdmin};
use kc_integration_tests::TestEnv;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_unknown_auto_refresh_verb_fails_before_network() -> anyhow::Result<()> {
    let env = TestEnv::start().await;
    let config = env.config("acme").with_auto_refresh(["get", "patch"]);

    let err = KeycloakAdmin::connect(config).await.unwrap_err();

    assert!(matches!(err, Error::Configuration(_)));
    let message = err.to_string();
    assert!(message.contains("get, post, put, delete"), "{message}");
    assert!(env.server.received_requests().await.unwrap_or_default().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_delete_missing_user_is_delete_404() -> anyhow::Result<()> {
    let env = TestEnv::start().await;
    env.mount_password_grant("token").await;
    Mock::given(method("DELETE"))
        .and(path("/admin/realms/acme/users/does-not-exist"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "User not found" })))
        .expect(1)
        .mount(&env.server)
        .await;

    let admin = env.admin(env.config("acme")).await?;
    let err = admin.delete_user("does-not-exist").await.unwrap_err();

    assert!(matches!(err, Error::Delete { status: 404, .. }));
    assert!(err.is_not_found());
    assert!(err.body_text().unwrap_or_default().contains("User not found"));
    Ok(())
}

#[tokio::test]
async fn test_server_errors_keep_verb_status_and_body() -> anyhow::Result<()> {
    let env = TestEnv::start().await;
    env.mount_password_grant("token").await;
    Mock::given(method("GET"))
        .and(path("/admin/realms/acme/clients/c1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&env.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/admin/realms/acme/roles/viewer"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid role"))
        .mount(&env.server)
        .await;

    let admin = env.admin(env.config("acme")).await?;

    let err = admin.get_client("c1").await.unwrap_err();
    assert!(matches!(err, Error::Get { status: 500, .. }));
    assert_eq!(err.body_text().as_deref(), Some("boom"));

    let err = admin
        .update_realm_role("viewer", &json!({ "name": "viewer" }))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Put { status: 400, .. }));
    Ok(())
}

#[tokio::test]
async fn test_rejected_credentials_fail_construction() -> anyhow::Result<()> {
    let env = TestEnv::start().await;
    Mock::given(method("POST"))
        .and(path(kc_integration_tests::TOKEN_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid user credentials"
        })))
        .expect(1)
        .mount(&env.server)
        .await;

    let err = KeycloakAdmin::connect(env.config("acme")).await.unwrap_err();
    assert!(matches!(err, Error::Authentication { status: 401, .. }));
    Ok(())
}

#[tokio::test]
async fn test_transport_failure_is_not_retried() -> anyhow::Result<()> {
    let config = AdminConfig::new("http://127.0.0.1:9")
        .with_auto_refresh(["get"])
        .with_timeout_secs(2);
    let admin = KeycloakAdmin::new(config)?;

    let err = admin.get_realms().await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
    Ok(())
}

#[tokio::test]
async fn test_dot_segment_ids_never_reach_another_endpoint() -> anyhow::Result<()> {
    let env = TestEnv::start().await;
    env.mount_password_grant("token").await;

    let admin = env.admin(env.config("acme")).await?;

    let err = admin.delete_user("..").await.unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
    let err = admin.get_realm("..").await.unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
    assert!(admin.get_user(".").await.is_err());

    let admin_requests = env
        .server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|request| request.url.path().starts_with("/admin"))
        .count();
    assert_eq!(admin_requests, 0);
    Ok(())
}
