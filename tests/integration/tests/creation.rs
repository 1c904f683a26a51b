//! Creation calls and the "already exists" sentinel.

use kc_admin_client::dto::RealmRepresentation;
use kc_admin_client::{CreateResult, Error};
use kc_integration_tests::TestEnv;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

const REALMS: &str = "/admin/realms";

async fn conflicting_realm(env: &TestEnv) {
    Mock::given(method("POST"))
        .and(path(REALMS))
        .respond_with(ResponseTemplate::new(201).insert_header("Location", format!("{}/admin/realms/test", env.uri())))
        .up_to_n_times(1)
        .mount(&env.server)
        .await;
    Mock::given(method("POST"))
        .and(path(REALMS))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "errorMessage": "Conflict detected. See logs for details" })),
        )
        .mount(&env.server)
        .await;
}

#[tokio::test]
async fn test_create_realm_twice_without_skip_exists() -> anyhow::Result<()> {
    let env = TestEnv::start().await;
    env.mount_password_grant("token").await;
    conflicting_realm(&env).await;

    let admin = env.admin(env.config("master")).await?;
    let created = admin.create_realm(&RealmRepresentation::new("test"), false).await?;
    assert_eq!(created.id(), Some("test"));

    let err = admin
        .create_realm(&RealmRepresentation::new("test"), false)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Post { status: 409, .. }));
    assert!(err.body_text().unwrap_or_default().contains("Conflict detected"));
    Ok(())
}

#[tokio::test]
async fn test_create_realm_twice_with_skip_exists() -> anyhow::Result<()> {
    let env = TestEnv::start().await;
    env.mount_password_grant("token").await;
    conflicting_realm(&env).await;

    let admin = env.admin(env.config("master")).await?;
    admin.create_realm(&json!({ "realm": "test" }), true).await?;
    let second = admin.create_realm(&json!({ "realm": "test" }), true).await?;

    assert!(matches!(second, CreateResult::AlreadyExists));
    assert_eq!(second.to_json(), json!({ "msg": "Already exists" }));
    assert_eq!(env.count_requests("POST", REALMS).await, 2);
    assert_eq!(env.count_requests("GET", REALMS).await, 0);
    Ok(())
}

#[tokio::test]
async fn test_create_user_returns_location_id() -> anyhow::Result<()> {
    let env = TestEnv::start().await;
    env.mount_password_grant("token").await;
    Mock::given(method("POST"))
        .and(path("/admin/realms/acme/users"))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("Location", format!("{}/admin/realms/acme/users/5f1c-77", env.uri())),
        )
        .expect(1)
        .mount(&env.server)
        .await;

    let admin = env.admin(env.config("acme")).await?;
    let id = admin
        .create_user(&json!({ "username": "alice", "enabled": true }), false)
        .await?;
    assert_eq!(id, "5f1c-77");
    Ok(())
}

#[tokio::test]
async fn test_create_user_exist_ok_returns_existing_id() -> anyhow::Result<()> {
    let env = TestEnv::start().await;
    env.mount_password_grant("token").await;
    Mock::given(method("GET"))
        .and(path("/admin/realms/acme/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "u-9", "username": "alice" }])))
        .mount(&env.server)
        .await;

    let admin = env.admin(env.config("acme")).await?;
    let id = admin.create_user(&json!({ "username": "Alice" }), true).await?;
    assert_eq!(id, "u-9");
    assert_eq!(env.count_requests("POST", "/admin/realms/acme/users").await, 0);
    Ok(())
}

#[tokio::test]
async fn test_copy_authentication_flow_sends_new_name() -> anyhow::Result<()> {
    let env = TestEnv::start().await;
    env.mount_password_grant("token").await;
    Mock::given(method("POST"))
        .and(path("/admin/realms/acme/authentication/flows/browser/copy"))
        .and(wiremock::matchers::body_json(json!({ "newName": "browser-otp" })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&env.server)
        .await;

    let admin = env.admin(env.config("acme")).await?;
    let created = admin.copy_authentication_flow("browser", "browser-otp").await?;
    assert!(!created.is_already_exists());
    Ok(())
}

#[tokio::test]
async fn test_typed_payloads_reach_the_server_as_camel_case() -> anyhow::Result<()> {
    use kc_admin_client::dto::{ClientRepresentation, GroupRepresentation, RoleRepresentation, UserRepresentation};
    use wiremock::matchers::body_json;

    let env = TestEnv::start().await;
    env.mount_password_grant("token").await;
    Mock::given(method("POST"))
        .and(path("/admin/realms/acme/users"))
        .and(body_json(json!({ "username": "carol", "enabled": true, "email": "carol@example.com" })))
        .respond_with(
            ResponseTemplate::new(201).insert_header("Location", format!("{}/admin/realms/acme/users/u-c", env.uri())),
        )
        .expect(1)
        .mount(&env.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/admin/realms/acme/groups/g-eng/children"))
        .and(body_json(json!({ "name": "sre" })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&env.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/admin/realms/acme/clients"))
        .and(body_json(json!({ "clientId": "portal", "publicClient": true })))
        .respond_with(ResponseTemplate::new(409))
        .expect(1)
        .mount(&env.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/admin/realms/acme/roles"))
        .and(body_json(json!({ "name": "viewer", "composite": false })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&env.server)
        .await;

    let admin = env.admin(env.config("acme")).await?;

    let mut user = UserRepresentation::new("carol");
    user.email = Some("carol@example.com".into());
    assert_eq!(admin.create_user(&user, false).await?, "u-c");

    admin
        .create_group(&GroupRepresentation::new("sre"), Some("g-eng"), false)
        .await?;

    let mut client = ClientRepresentation::new("portal");
    client.public_client = Some(true);
    assert!(admin.create_client(&client, true).await?.is_already_exists());

    let mut role = RoleRepresentation::new("viewer");
    role.composite = Some(false);
    admin.create_realm_role(&role, false).await?;
    Ok(())
}

#[tokio::test]
async fn test_listed_groups_read_into_typed_representation() -> anyhow::Result<()> {
    use kc_admin_client::dto::GroupRepresentation;

    let env = TestEnv::start().await;
    env.mount_password_grant("token").await;
    Mock::given(method("GET"))
        .and(path("/admin/realms/acme/groups/g-eng"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "g-eng",
            "name": "eng",
            "path": "/eng",
            "access": { "view": true },
            "subGroups": [{ "id": "g-sre", "name": "sre", "path": "/eng/sre" }]
        })))
        .mount(&env.server)
        .await;

    let admin = env.admin(env.config("acme")).await?;
    let group: GroupRepresentation = serde_json::from_value(admin.get_group("g-eng").await?)?;

    assert_eq!(group.name, "eng");
    assert_eq!(group.sub_groups[0].id.as_deref(), Some("g-sre"));
    assert!(group.other.contains_key("access"));
    Ok(())
}
