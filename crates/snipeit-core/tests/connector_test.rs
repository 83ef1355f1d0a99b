#![allow(clippy::unwrap_used)]
// End-to-end connector tests against a wiremock Snipe-IT.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use snipeit_core::model::{Annotation, PageToken, Purpose, Resource, ResourceId, Role};
use snipeit_core::pagination::{self, RESOURCE_PAGE_SIZE};
use snipeit_core::syncers::group::{group_resource, member_entitlement};
use snipeit_core::syncers::role::role_resource;
use snipeit_core::syncers::user::user_resource;
use snipeit_core::{ConnectorConfig, ConnectorError, SnipeIt, sync_all};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, SnipeIt) {
    let server = MockServer::start().await;
    let config = ConnectorConfig::new(
        &server.uri(),
        SecretString::from("test-token".to_owned()),
    )
    .unwrap();
    let connector = SnipeIt::new(&config).unwrap();
    (server, connector)
}

fn user_json(id: u64, group_ids: &[u64], permissions: serde_json::Value) -> serde_json::Value {
    let rows: Vec<_> = group_ids
        .iter()
        .map(|g| json!({ "id": g, "name": format!("group-{g}") }))
        .collect();
    json!({
        "id": id,
        "username": format!("user{id}"),
        "first_name": "Test",
        "last_name": format!("User{id}"),
        "email": format!("user{id}@example.com"),
        "activated": true,
        "groups": { "total": rows.len(), "rows": rows },
        "permissions": permissions
    })
}

fn users_page(rows: Vec<serde_json::Value>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "total": rows.len(), "rows": rows }))
}

fn group_10() -> Resource {
    group_resource(&snipeit_api::Group {
        id: 10,
        name: "IT".into(),
        ..snipeit_api::Group::default()
    })
}

fn user_1() -> Resource {
    user_resource(&snipeit_api::User {
        id: 1,
        username: "user1".into(),
        ..snipeit_api::User::default()
    })
}

// ── Group grants ────────────────────────────────────────────────────

#[tokio::test]
async fn test_group_grants_only_include_members() {
    let (server, connector) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .and(query_param("group_id", "10"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "50"))
        .respond_with(users_page(vec![
            user_json(1, &[10], json!({})),
            user_json(2, &[11], json!({})),
        ]))
        .expect(1)
        .mount(&server)
        .await;

    let syncer = connector.syncer("group").unwrap();
    let page = syncer.grants(&group_10(), &PageToken::empty()).await.unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].principal, ResourceId::new("user", "1"));
    assert_eq!(page.items[0].id, "group:10:member:user:1");
    assert!(page.is_last());
}

#[tokio::test]
async fn test_group_grants_page_through_users() {
    let (server, connector) = setup().await;

    let full: Vec<_> = (1..=RESOURCE_PAGE_SIZE)
        .map(|id| user_json(id, &[10], json!({})))
        .collect();
    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .and(query_param("offset", "0"))
        .respond_with(users_page(full))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .and(query_param("offset", "50"))
        .respond_with(users_page(vec![user_json(51, &[10], json!({}))]))
        .mount(&server)
        .await;

    let syncer = connector.syncer("group").unwrap();
    let first = syncer.grants(&group_10(), &PageToken::empty()).await.unwrap();
    assert_eq!(first.items.len(), 50);
    assert!(!first.next_token.is_empty());
    assert_eq!(pagination::decode(&first.next_token, "user").unwrap(), 50);

    let second = syncer.grants(&group_10(), &first.next_token).await.unwrap();
    assert_eq!(second.items.len(), 1);
    assert!(second.next_token.is_empty());
}

#[tokio::test]
async fn test_group_list_carries_rate_limit() {
    let (server, connector) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/groups"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-ratelimit-limit", "120")
                .insert_header("x-ratelimit-remaining", "42")
                .set_body_json(json!({
                    "total": 1,
                    "rows": [{ "id": 10, "name": "IT", "permissions": null }]
                })),
        )
        .mount(&server)
        .await;

    let page = connector
        .syncer("group")
        .unwrap()
        .list(None, &PageToken::empty())
        .await
        .unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].display_name, "IT");
    assert!(page.is_last());
    assert_eq!(page.annotations.rate_limit().unwrap().remaining, Some(42));
}

// ── Users ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_user_list_token_depends_on_page_fill() {
    let (server, connector) = setup().await;

    let full: Vec<_> = (1..=RESOURCE_PAGE_SIZE)
        .map(|id| user_json(id, &[], json!({})))
        .collect();
    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .and(query_param("offset", "0"))
        .respond_with(users_page(full))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .and(query_param("offset", "50"))
        .respond_with(users_page(Vec::new()))
        .mount(&server)
        .await;

    let syncer = connector.syncer("user").unwrap();
    let first = syncer.list(None, &PageToken::empty()).await.unwrap();
    assert_eq!(first.items.len(), 50);
    assert!(!first.next_token.is_empty());

    let second = syncer.list(None, &first.next_token).await.unwrap();
    assert!(second.items.is_empty());
    assert!(second.next_token.is_empty());
}

#[tokio::test]
async fn test_user_list_tolerates_unrecognized_permission_values() {
    let (server, connector) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(users_page(vec![
            user_json(1, &[], json!({ "users.view": "1" })),
            user_json(2, &[], json!({ "reports.view": "" })),
        ]))
        .mount(&server)
        .await;

    let page = connector
        .syncer("user")
        .unwrap()
        .list(None, &PageToken::empty())
        .await
        .unwrap();

    let ids: Vec<_> = page.items.iter().map(|r| r.id.resource.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
    assert!(page.next_token.is_empty());
}

#[tokio::test]
async fn test_user_list_offset_overflow_is_an_error() {
    let (server, connector) = setup().await;

    let full: Vec<_> = (1..=RESOURCE_PAGE_SIZE)
        .map(|id| user_json(id, &[], json!({})))
        .collect();
    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(users_page(full))
        .mount(&server)
        .await;

    let token = pagination::next_page("user", u64::MAX - 10).unwrap();
    let err = connector
        .syncer("user")
        .unwrap()
        .list(None, &token)
        .await
        .unwrap_err();

    assert!(matches!(err, ConnectorError::PageOffsetOverflow { .. }));
}

#[tokio::test]
async fn test_user_list_error_has_context() {
    let (server, connector) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = connector
        .syncer("user")
        .unwrap()
        .list(None, &PageToken::empty())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(
        err.to_string(),
        "snipe-it-connector: Failed to get users: Snipe-IT API error: boom with statusCode: 500"
    );
}

#[tokio::test]
async fn test_bad_page_token_is_rejected_before_any_request() {
    let (server, connector) = setup().await;

    Mock::given(method("GET"))
        .respond_with(users_page(Vec::new()))
        .expect(0)
        .mount(&server)
        .await;

    let err = connector
        .syncer("user")
        .unwrap()
        .list(None, &PageToken::from("garbage"))
        .await
        .unwrap_err();
    assert!(matches!(err, ConnectorError::PageToken(_)));
}

// ── Roles ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_roles_list_without_api_calls() {
    let (server, connector) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let page = connector
        .syncer("role")
        .unwrap()
        .list(None, &PageToken::empty())
        .await
        .unwrap();

    let names: Vec<_> = page.items.iter().map(|r| r.display_name.as_str()).collect();
    assert_eq!(names, vec!["Superuser", "Admin", "Other"]);
    assert!(page.is_last());
}

#[tokio::test]
async fn test_admin_role_entitlements_short_circuit() {
    let (server, connector) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let syncer = connector.syncer("role").unwrap();
    for role in [Role::Superuser, Role::Admin] {
        let page = syncer
            .entitlements(&role_resource(role), &PageToken::empty())
            .await
            .unwrap();

        assert_eq!(page.items.len(), 2);
        assert!(page.items.iter().all(|e| e.slug == "assigned"));
        assert!(page.items.iter().all(|e| e.purpose == Purpose::Assignment));
        assert!(page.is_last());
    }
}

#[tokio::test]
async fn test_other_role_entitlements_from_groups_and_users() {
    let (server, connector) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1,
            "rows": [{ "id": 10, "name": "IT", "permissions": { "assets.view": "1", "admin": "1" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(users_page(vec![
            user_json(1, &[], json!({ "users.view": "1", "users.edit": "0" })),
            user_json(2, &[], json!({ "users.view": 1, "superuser": 1 })),
        ]))
        .mount(&server)
        .await;

    let page = connector
        .syncer("role")
        .unwrap()
        .entitlements(&role_resource(Role::Other), &PageToken::empty())
        .await
        .unwrap();

    let summary: Vec<_> = page
        .items
        .iter()
        .map(|e| (e.slug.as_str(), e.grantable_to[0].as_str()))
        .collect();
    assert_eq!(summary, vec![("view assets", "group"), ("view users", "user")]);
    assert!(page.items.iter().all(|e| e.purpose == Purpose::Permission));
    assert!(page.is_last());
}

#[tokio::test]
async fn test_later_role_pages_skip_groups() {
    let (server, connector) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total": 0, "rows": [] })))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .and(query_param("offset", "50"))
        .respond_with(users_page(vec![user_json(51, &[], json!({ "users.view": "1" }))]))
        .expect(1)
        .mount(&server)
        .await;

    let token = pagination::next_page("user", 50).unwrap();
    let page = connector
        .syncer("role")
        .unwrap()
        .grants(&role_resource(Role::Other), &token)
        .await
        .unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, "role:Other:view users:user:51");
}

#[tokio::test]
async fn test_admin_role_grants_follow_flags() {
    let (server, connector) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 2,
            "rows": [
                { "id": 10, "name": "IT", "permissions": { "superuser": "1" } },
                { "id": 11, "name": "Helpdesk", "permissions": { "admin": "1" } }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(users_page(vec![
            user_json(1, &[], json!({ "superuser": "1", "users.view": "1" })),
            user_json(2, &[], json!({ "superuser": "-1" })),
        ]))
        .mount(&server)
        .await;

    let page = connector
        .syncer("role")
        .unwrap()
        .grants(&role_resource(Role::Superuser), &PageToken::empty())
        .await
        .unwrap();

    let ids: Vec<_> = page.items.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["role:Superuser:assigned:group:10", "role:Superuser:assigned:user:1"]
    );
}

#[tokio::test]
async fn test_role_grants_surface_malformed_permissions() {
    let (server, connector) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total": 0, "rows": [] })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(users_page(vec![user_json(1, &[], json!({ "import": "1" }))]))
        .mount(&server)
        .await;

    let err = connector
        .syncer("role")
        .unwrap()
        .grants(&role_resource(Role::Other), &PageToken::empty())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "snipe-it-connector: invalid permission: import");
}

// ── Provisioning ────────────────────────────────────────────────────

#[tokio::test]
async fn test_grant_membership_patches_groups() {
    let (server, connector) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(1, &[3], json!({}))))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/users/1"))
        .and(body_json(json!({ "groups": [10, 3] })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-ratelimit-remaining", "7")
                .set_body_json(json!({ "status": "success" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provisioner = connector.provisioner("group").unwrap();
    let annotations = provisioner
        .grant(&user_1(), &member_entitlement(&group_10()))
        .await
        .unwrap();

    assert_eq!(annotations.rate_limit().unwrap().remaining, Some(7));
}

#[tokio::test]
async fn test_revoke_membership_patches_remaining_groups() {
    let (server, connector) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(1, &[10], json!({}))))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/users/1"))
        .and(body_json(json!({ "groups": [] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(1)
        .mount(&server)
        .await;

    let grant = snipeit_core::model::Grant::new(
        &ResourceId::new("group", "10"),
        "member",
        ResourceId::new("user", "1"),
    );
    connector.provisioner("group").unwrap().revoke(&grant).await.unwrap();
}

#[tokio::test]
async fn test_grant_rejects_group_principal_without_requests() {
    let (server, connector) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = connector
        .provisioner("group")
        .unwrap()
        .grant(&group_10(), &member_entitlement(&group_10()))
        .await
        .unwrap_err();
    assert!(matches!(err, ConnectorError::UnsupportedPrincipal { .. }));
}

#[tokio::test]
async fn test_grant_failure_is_returned() {
    let (server, connector) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(1, &[], json!({}))))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "messages": "Group does not exist"
        })))
        .mount(&server)
        .await;

    let err = connector
        .provisioner("group")
        .unwrap()
        .grant(&user_1(), &member_entitlement(&group_10()))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("failed to add user to group"));
    assert!(err.to_string().contains("Group does not exist"));
}

#[tokio::test]
async fn test_only_groups_are_provisionable() {
    let (_server, connector) = setup().await;

    assert!(matches!(
        connector.provisioner("role"),
        Err(ConnectorError::NotProvisionable(_))
    ));
    assert!(matches!(
        connector.syncer("asset"),
        Err(ConnectorError::UnknownResourceType(_))
    ));
}

// ── Validate ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_validate_wraps_failure() {
    let (server, connector) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthenticated."))
        .mount(&server)
        .await;

    let err = connector.validate().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(
        err.to_string()
            .starts_with("snipe-it-connector: Not enough permissions to get users")
    );
}

#[tokio::test]
async fn test_validate_corrects_api_suffix() {
    let server = MockServer::start().await;
    let config = ConnectorConfig::new(
        &format!("{}/api/v1", server.uri()),
        SecretString::from("test-token".to_owned()),
    )
    .unwrap();
    let connector = SnipeIt::new(&config).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v1/api/v1/users"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(users_page(Vec::new()))
        .mount(&server)
        .await;

    connector.validate().await.unwrap();
    assert_eq!(
        connector.client().base_url().as_str(),
        format!("{}/", server.uri())
    );
}

// ── Full sync ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_sync_all_walks_every_type() {
    let (server, connector) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1,
            "rows": [{ "id": 10, "name": "IT", "permissions": { "admin": "1" } }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .and(query_param("group_id", "10"))
        .respond_with(users_page(vec![user_json(1, &[10], json!({}))]))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(users_page(vec![
            user_json(1, &[10], json!({ "users.view": "1" })),
            user_json(2, &[], json!({ "superuser": "1" })),
        ]))
        .mount(&server)
        .await;

    let report = sync_all(&connector).await.unwrap();

    let types: Vec<_> = report.resource_types.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(types, vec!["user", "group", "role"]);
    // 2 users + 1 group + 3 roles
    assert_eq!(report.resources.len(), 6);

    // member; Superuser and Admin assigned x2; Other "view users"
    assert_eq!(report.entitlements.len(), 6);

    let mut grants: Vec<_> = report.grants.iter().map(|g| g.id.clone()).collect();
    grants.sort();
    assert_eq!(
        grants,
        vec![
            "group:10:member:user:1",
            "role:Admin:assigned:group:10",
            "role:Other:view users:user:1",
            "role:Superuser:assigned:user:2",
        ]
    );
    assert!(
        !report
            .annotations
            .iter()
            .any(|a| matches!(a, Annotation::SkipEntitlementsAndGrants))
    );
}
