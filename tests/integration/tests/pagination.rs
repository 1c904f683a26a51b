//! Auto-pagination of list operations.

use kc_admin_client::Query;
use kc_integration_tests::TestEnv;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

const USERS: &str = "/admin/realms/acme/users";
const PAGE_SIZE: usize = 20;

fn users(range: std::ops::Range<usize>) -> Vec<Value> {
    range.map(|i| json!({ "id": format!("u{i}"), "username": format!("user{i}") })).collect()
}

async fn mount_page(env: &TestEnv, first: usize, records: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(USERS))
        .and(query_param("first", first.to_string()))
        .and(query_param("max", PAGE_SIZE.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(records))
        .expect(1)
        .mount(&env.server)
        .await;
}

#[tokio::test]
async fn test_listing_assembles_every_page_in_order() -> anyhow::Result<()> {
    let env = TestEnv::start().await;
    env.mount_password_grant("token").await;
    let total = PAGE_SIZE * 2 + PAGE_SIZE / 2;
    mount_page(&env, 0, users(0..PAGE_SIZE)).await;
    mount_page(&env, PAGE_SIZE, users(PAGE_SIZE..PAGE_SIZE * 2)).await;
    mount_page(&env, PAGE_SIZE * 2, users(PAGE_SIZE * 2..total)).await;

    let admin = env.admin(env.config("acme").with_page_size(PAGE_SIZE)).await?;
    let listed = admin.get_users(&Query::new()).await?;

    assert_eq!(listed.len(), total);
    assert_eq!(listed, users(0..total));
    assert_eq!(env.count_requests("GET", USERS).await, 3);
    Ok(())
}

#[tokio::test]
async fn test_filters_are_kept_on_every_page() -> anyhow::Result<()> {
    let env = TestEnv::start().await;
    env.mount_password_grant("token").await;
    Mock::given(method("GET"))
        .and(path(USERS))
        .and(query_param("search", "ali"))
        .and(query_param("first", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users(0..3)))
        .expect(1)
        .mount(&env.server)
        .await;

    let admin = env.admin(env.config("acme").with_page_size(PAGE_SIZE)).await?;
    let listed = admin.get_users(&Query::new().param("search", "ali")).await?;
    assert_eq!(listed.len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_explicit_first_makes_one_call() -> anyhow::Result<()> {
    let env = TestEnv::start().await;
    env.mount_password_grant("token").await;
    Mock::given(method("GET"))
        .and(path(USERS))
        .and(query_param("first", "40"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users(40..40 + PAGE_SIZE)))
        .expect(1)
        .mount(&env.server)
        .await;

    let admin = env.admin(env.config("acme").with_page_size(PAGE_SIZE)).await?;
    let page = admin.get_users(&Query::new().param("first", 40)).await?;

    assert_eq!(page, users(40..40 + PAGE_SIZE));
    assert_eq!(env.count_requests("GET", USERS).await, 1);
    Ok(())
}

#[tokio::test]
async fn test_explicit_max_makes_one_call() -> anyhow::Result<()> {
    let env = TestEnv::start().await;
    env.mount_password_grant("token").await;
    Mock::given(method("GET"))
        .and(path("/admin/realms/acme/groups"))
        .and(query_param("max", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "g0", "name": "a", "path": "/a" },
            { "id": "g1", "name": "b", "path": "/b" },
            { "id": "g2", "name": "c", "path": "/c" },
            { "id": "g3", "name": "d", "path": "/d" },
            { "id": "g4", "name": "e", "path": "/e" }
        ])))
        .expect(1)
        .mount(&env.server)
        .await;

    let admin = env.admin(env.config("acme").with_page_size(5)).await?;
    let groups = admin.get_groups(&Query::new().param("max", 5)).await?;
    assert_eq!(groups.len(), 5);
    Ok(())
}
