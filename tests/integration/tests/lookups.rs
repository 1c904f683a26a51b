//! Find-by-name helpers return `None` rather than an error.

use kc_admin_client::{get_subgroups, Error};
use kc_integration_tests::TestEnv;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_user_id_lookup() -> anyhow::Result<()> {
    let env = TestEnv::start().await;
    env.mount_password_grant("token").await;
    Mock::given(method("GET"))
        .and(path("/admin/realms/acme/users"))
        .and(query_param("username", "bob"))
        .and(query_param("exact", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "u-bob", "username": "bob" }])))
        .mount(&env.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/realms/acme/users"))
        .and(query_param("username", "nobody"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&env.server)
        .await;

    let admin = env.admin(env.config("acme")).await?;
    assert_eq!(admin.get_user_id("bob").await?.as_deref(), Some("u-bob"));
    assert_eq!(admin.get_user_id("nobody").await?, None);
    Ok(())
}

#[tokio::test]
async fn test_group_by_path_searches_subgroups() -> anyhow::Result<()> {
    let env = TestEnv::start().await;
    env.mount_password_grant("token").await;
    Mock::given(method("GET"))
        .and(path("/admin/realms/acme/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "g-eng",
                "name": "eng",
                "path": "/eng",
                "subGroups": [
                    { "id": "g-sre", "name": "sre", "path": "/eng/sre", "subGroups": [] }
                ]
            },
            { "id": "g-ops", "name": "ops", "path": "/ops", "subGroups": [] }
        ])))
        .mount(&env.server)
        .await;

    let admin = env.admin(env.config("acme")).await?;

    let top = admin.get_group_by_path("/ops", false).await?;
    assert_eq!(top.map(|g| g["id"].clone()), Some(json!("g-ops")));

    assert!(admin.get_group_by_path("/eng/sre", false).await?.is_none());
    let nested = admin.get_group_by_path("/eng/sre", true).await?;
    assert_eq!(nested.map(|g| g["id"].clone()), Some(json!("g-sre")));

    assert!(admin.get_group_by_path("/missing", true).await?.is_none());
    Ok(())
}

#[test]
fn test_subgroup_search_is_pure() {
    let tree = json!({
        "path": "/a",
        "subGroups": [{ "path": "/a/b", "subGroups": [{ "path": "/a/b/c", "id": "deep" }] }]
    });
    assert_eq!(get_subgroups(&tree, "/a/b/c").map(|g| g["id"].clone()), Some(json!("deep")));
    assert!(get_subgroups(&tree, "/a/x").is_none());
}

#[tokio::test]
async fn test_client_and_scope_lookups() -> anyhow::Result<()> {
    let env = TestEnv::start().await;
    env.mount_password_grant("token").await;
    Mock::given(method("GET"))
        .and(path("/admin/realms/acme/clients"))
        .and(query_param("clientId", "portal"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "c-1", "clientId": "portal" }])))
        .mount(&env.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/realms/acme/client-scopes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "s-1", "name": "profile" },
            { "id": "s-2", "name": "email" }
        ])))
        .mount(&env.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/realms/acme/authentication/required-actions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "alias": "VERIFY_EMAIL", "enabled": true }
        ])))
        .mount(&env.server)
        .await;

    let admin = env.admin(env.config("acme")).await?;
    assert_eq!(admin.get_client_id("portal").await?.as_deref(), Some("c-1"));
    assert_eq!(
        admin.get_client_scope_by_name("email").await?.map(|s| s["id"].clone()),
        Some(json!("s-2"))
    );
    assert!(admin.get_client_scope_by_name("roles").await?.is_none());
    assert!(admin.get_required_action_by_alias("VERIFY_EMAIL").await?.is_some());
    assert!(admin.get_required_action_by_alias("TERMS_AND_CONDITIONS").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_missing_container_is_still_an_error() -> anyhow::Result<()> {
    let env = TestEnv::start().await;
    env.mount_password_grant("token").await;
    Mock::given(method("GET"))
        .and(path("/admin/realms/acme/client-scopes"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Realm not found." })))
        .mount(&env.server)
        .await;

    let admin = env.admin(env.config("acme")).await?;
    let err = admin.get_client_scope_by_name("email").await.unwrap_err();
    assert!(matches!(err, Error::Get { status: 404, .. }));
    Ok(())
}
