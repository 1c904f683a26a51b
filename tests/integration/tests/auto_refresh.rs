//! Refresh-and-retry on 401.

use kc_admin_client::{Error, Query, TokenRecord};
use kc_integration_tests::{TestEnv, TOKEN_PATH};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

const USERS: &str = "/admin/realms/acme/users";

#[tokio::test]
async fn test_401_without_auto_refresh_is_not_retried() -> anyhow::Result<()> {
    let env = TestEnv::start().await;
    env.mount_password_grant("initial").await;
    Mock::given(method("GET"))
        .and(path(USERS))
        .respond_with(ResponseTemplate::new(401).set_body_string("expired"))
        .mount(&env.server)
        .await;

    let admin = env.admin(env.config("acme").with_auto_refresh(["put"])).await?;
    let err = admin.get_users(&Query::new().param("max", 5)).await.unwrap_err();

    assert!(matches!(err, Error::Authentication { status: 401, .. }));
    assert_eq!(env.count_requests("GET", USERS).await, 1);
    assert_eq!(env.count_requests("POST", TOKEN_PATH).await, 1);
    Ok(())
}

#[tokio::test]
async fn test_stale_token_get_completes_after_one_refresh() -> anyhow::Result<()> {
    let env = TestEnv::start().await;
    env.mount_refresh_grant("fresh").await;
    Mock::given(method("GET"))
        .and(path("/admin/realms/acme"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&env.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/realms/acme"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "realm": "acme", "enabled": true })))
        .expect(1)
        .mount(&env.server)
        .await;

    let config = env
        .config("acme")
        .with_auto_refresh(["get"])
        .with_token(TokenRecord::bearer("stale").with_refresh_token("r-valid"));
    let admin = env.admin(config).await?;

    let realm = admin.get_realm("acme").await?;
    assert_eq!(realm["realm"], "acme");
    assert_eq!(admin.token().map(|t| t.access_token), Some("fresh".to_string()));
    assert_eq!(env.count_requests("POST", TOKEN_PATH).await, 1);
    Ok(())
}

#[tokio::test]
async fn test_second_401_fails_without_third_call() -> anyhow::Result<()> {
    let env = TestEnv::start().await;
    env.mount_password_grant("initial").await;
    env.mount_refresh_grant("still-rejected").await;
    Mock::given(method("DELETE"))
        .and(path("/admin/realms/acme/groups/g1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&env.server)
        .await;

    let admin = env.admin(env.config("acme").with_auto_refresh(["delete"])).await?;
    let err = admin.delete_group("g1").await.unwrap_err();

    assert!(err.is_authentication());
    assert_eq!(env.count_requests("DELETE", "/admin/realms/acme/groups/g1").await, 2);
    Ok(())
}

#[tokio::test]
async fn test_failed_refresh_is_an_authentication_error() -> anyhow::Result<()> {
    let env = TestEnv::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Token is not active"
        })))
        .mount(&env.server)
        .await;
    Mock::given(method("GET"))
        .and(path(USERS))
        .respond_with(ResponseTemplate::new(401))
        .mount(&env.server)
        .await;

    let config = env
        .config("acme")
        .with_auto_refresh(["get"])
        .with_token(TokenRecord::bearer("stale").with_refresh_token("r-expired"));
    let admin = env.admin(config).await?;
    let err = admin.get_users(&Query::new()).await.unwrap_err();

    assert!(matches!(err, Error::Authentication { status: 400, .. }));
    assert_eq!(env.count_requests("GET", USERS).await, 1);
    Ok(())
}

#[tokio::test]
async fn test_auto_refresh_change_applies_to_later_calls() -> anyhow::Result<()> {
    let env = TestEnv::start().await;
    env.mount_password_grant("initial").await;
    env.mount_refresh_grant("fresh").await;
    Mock::given(method("PUT"))
        .and(path("/admin/realms/acme/users/u1"))
        .and(header("authorization", "Bearer initial"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&env.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/admin/realms/acme/users/u1"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&env.server)
        .await;

    let mut admin = env.admin(env.config("acme")).await?;
    assert!(admin.update_user("u1", &json!({ "enabled": false })).await.is_err());

    admin.set_auto_refresh_token(["put"])?;
    admin.update_user("u1", &json!({ "enabled": false })).await?;
    assert_eq!(env.count_requests("PUT", "/admin/realms/acme/users/u1").await, 3);
    Ok(())
}

#[tokio::test]
async fn test_token_without_refresh_or_credentials_is_not_replayed() -> anyhow::Result<()> {
    let env = TestEnv::start().await;
    Mock::given(method("GET"))
        .and(path(USERS))
        .respond_with(ResponseTemplate::new(401))
        .mount(&env.server)
        .await;

    let config = kc_admin_client::AdminConfig::new(env.uri())
        .with_realm("acme")
        .with_auto_refresh(["get"])
        .with_token(TokenRecord::bearer("stale"));
    let admin = env.admin(config).await?;
    let err = admin.get_users(&Query::new()).await.unwrap_err();

    assert!(matches!(err, Error::Authentication { status: 401, .. }));
    assert_eq!(env.count_requests("GET", USERS).await, 1);
    assert_eq!(env.count_requests("POST", TOKEN_PATH).await, 0);
    Ok(())
}
