//! Initial token acquisition and realm scope.

use kc_admin_client::{AdminConfig, TokenRecord};
use kc_integration_tests::{token_body, TestEnv, TOKEN_PATH};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_connect_acquires_with_password_grant() -> anyhow::Result<()> {
    let env = TestEnv::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_string_contains("grant_type=password"))
        .and(body_string_contains("client_id=admin-cli"))
        .and(body_string_contains("username=admin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("a1", "r1")))
        .expect(1)
        .mount(&env.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/realms"))
        .and(header("authorization", "Bearer a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "realm": "master" }])))
        .expect(1)
        .mount(&env.server)
        .await;

    let admin = env.admin(env.config("acme")).await?;
    assert_eq!(admin.get_realms().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_connect_with_client_credentials() -> anyhow::Result<()> {
    let env = TestEnv::start().await;
    Mock::given(method("POST"))
        .and(path("/realms/acme/protocol/openid-connect/token"))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("client_secret=s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "svc", "expires_in": 300, "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&env.server)
        .await;

    let config = AdminConfig::new(env.uri())
        .with_realm("acme")
        .with_client_id("automation")
        .with_client_secret("s3cret");
    let admin = env.admin(config).await?;
    assert_eq!(admin.token().map(|t| t.access_token), Some("svc".to_string()));
    Ok(())
}

#[tokio::test]
async fn test_presupplied_token_skips_acquisition() -> anyhow::Result<()> {
    let env = TestEnv::start().await;
    let config = env.config("acme").with_token(TokenRecord::bearer("given"));
    let admin = env.admin(config).await?;

    assert_eq!(admin.token().map(|t| t.access_token), Some("given".to_string()));
    assert_eq!(env.count_requests("POST", TOKEN_PATH).await, 0);
    Ok(())
}

#[tokio::test]
async fn test_realm_switch_affects_later_calls_only() -> anyhow::Result<()> {
    let env = TestEnv::start().await;
    env.mount_password_grant("token").await;
    for realm in ["acme", "other"] {
        Mock::given(method("GET"))
            .and(path(format!("/admin/realms/{realm}/users/count")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(3)))
            .expect(1)
            .mount(&env.server)
            .await;
    }

    let mut admin = env.admin(env.config("acme")).await?;
    assert_eq!(admin.users_count(&kc_admin_client::Query::new()).await?, 3);
    admin.set_realm_name("other");
    assert_eq!(admin.users_count(&kc_admin_client::Query::new()).await?, 3);
    assert_eq!(admin.token_realm(), "master");
    Ok(())
}

#[tokio::test]
async fn test_custom_headers_are_sent() -> anyhow::Result<()> {
    let env = TestEnv::start().await;
    env.mount_password_grant("token").await;
    Mock::given(method("GET"))
        .and(path("/admin/serverinfo"))
        .and(header("x-request-source", "ops-console"))
        .and(header("x-trace", "t-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "systemInfo": { "version": "24.0.0" } })))
        .expect(1)
        .mount(&env.server)
        .await;

    let admin = env
        .admin(env.config("acme").with_header("X-Request-Source", "ops-console"))
        .await?;
    admin.add_param_headers("X-Trace", "t-1")?;
    let info = admin.get_server_info().await?;
    assert_eq!(info["systemInfo"]["version"], "24.0.0");

    assert!(admin.del_param_headers("X-Trace"));
    assert!(admin.add_param_headers("Authorization", "Basic x").is_err());
    Ok(())
}
