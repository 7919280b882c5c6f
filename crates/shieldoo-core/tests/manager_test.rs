#![allow(clippy::unwrap_used)]
// Integration tests for `Manager` command sequences using wiremock.

use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shieldoo_api::{ApiClient, ApiConfig};
use shieldoo_core::{
    CoreError, Firewall, FirewallRef, FirewallSelector, Lookup, Manager, ResourceKind, Server,
    parse_firewall_rules, parse_groups, parse_listeners,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Manager) {
    let server = MockServer::start().await;
    let config = ApiConfig::new(
        Url::parse(&server.uri()).unwrap(),
        SecretString::from("secret"),
    );
    let manager = Manager::new(ApiClient::new(&config).unwrap());
    (server, manager)
}

fn server_draft(name: &str) -> Server {
    Server {
        id: None,
        name: name.into(),
        groups: parse_groups("name=devs").unwrap(),
        firewall: FirewallRef { id: String::new() },
        listeners: parse_listeners("80;tcp;8080;backend.local").unwrap(),
        ip_address: String::new(),
        description: String::new(),
    }
}

async fn json_bodies(server: &MockServer, verb: &str) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method.as_str() == verb)
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}

// ── Ensure firewall ─────────────────────────────────────────────────

#[tokio::test]
async fn test_ensure_firewall_updates_existing() {
    let (server, manager) = setup().await;

    Mock::given(method("GET"))
        .and(path("/cliapi/firewalls"))
        .and(query_param("name", "web"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "id": "fw-1", "name": "web" }, { "id": "fw-2" }])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/cliapi/firewalls/fw-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":"fw-1"}"#))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let rules_in = parse_firewall_rules("tcp;22;group;name=admins").unwrap();
    let out = manager
        .ensure_firewall(Firewall::new("web", rules_in, Vec::new()))
        .await
        .unwrap();
    assert_eq!(out, r#"{"id":"fw-1"}"#);

    let sent = json_bodies(&server, "PUT").await;
    assert_eq!(sent[0]["id"], "fw-1");
    assert_eq!(sent[0]["rulesOut"], json!([{ "protocol": "any", "port": "any", "host": "any", "groups": [] }]));
    assert_eq!(sent[0]["rulesIn"][0]["groups"][0]["name"], "admins");
}

#[tokio::test]
async fn test_ensure_firewall_creates_when_absent() {
    let (server, manager) = setup().await;

    Mock::given(method("GET"))
        .and(path("/cliapi/firewalls"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/cliapi/firewalls"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":"fw-new"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let out = manager
        .ensure_firewall(Firewall::new("web", Vec::new(), Vec::new()))
        .await
        .unwrap();
    assert_eq!(out, r#"{"id":"fw-new"}"#);

    let sent = json_bodies(&server, "POST").await;
    assert!(sent[0].get("id").is_none());
    assert_eq!(sent[0]["name"], "web");
}

#[tokio::test]
async fn test_null_lookup_counts_as_absent() {
    let (server, manager) = setup().await;

    Mock::given(method("GET"))
        .and(path("/cliapi/firewalls"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/cliapi/firewalls"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    manager
        .ensure_firewall(Firewall::new("web", Vec::new(), Vec::new()))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_undecodable_lookup_is_reported() {
    let (server, manager) = setup().await;

    Mock::given(method("GET"))
        .and(path("/cliapi/firewalls"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
        .mount(&server)
        .await;

    let err = manager
        .ensure_firewall(Firewall::new("web", Vec::new(), Vec::new()))
        .await
        .unwrap_err();

    match err {
        CoreError::Decode { kind, body, .. } => {
            assert_eq!(kind, ResourceKind::Firewall);
            assert_eq!(body, "<html>proxy error</html>");
        }
        other => panic!("expected Decode, got {other:?}"),
    }
}

// ── Ensure server ───────────────────────────────────────────────────

#[tokio::test]
async fn test_ensure_server_resolves_firewall_and_updates() {
    let (server, manager) = setup().await;

    Mock::given(method("GET"))
        .and(path("/cliapi/firewalls"))
        .and(query_param("name", "default"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "fw-7" }])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cliapi/servers"))
        .and(query_param("name", "web"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "srv-3", "autoupdate": true }])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/cliapi/servers/srv-3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":"srv-3"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let out = manager
        .ensure_server(server_draft("web"), &FirewallSelector::Name("default".into()))
        .await
        .unwrap();
    assert_eq!(out, r#"{"id":"srv-3"}"#);

    let sent = json_bodies(&server, "PUT").await;
    assert_eq!(sent[0]["id"], "srv-3");
    assert_eq!(sent[0]["firewall"], json!({ "id": "fw-7" }));
    assert_eq!(sent[0]["listeners"][0]["forwardPort"], 8080);
    assert!(sent[0].get("autoupdate").is_none());
}

#[tokio::test]
async fn test_ensure_server_with_firewall_id_skips_lookup() {
    let (server, manager) = setup().await;

    Mock::given(method("GET"))
        .and(path("/cliapi/firewalls"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cliapi/servers"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/cliapi/servers"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":"srv-9"}"#))
        .expect(1)
        .mount(&server)
        .await;

    manager
        .ensure_server(server_draft("web"), &FirewallSelector::Id("fw-1".into()))
        .await
        .unwrap();

    let sent = json_bodies(&server, "POST").await;
    assert_eq!(sent[0]["firewall"]["id"], "fw-1");
}

#[tokio::test]
async fn test_ensure_server_unknown_firewall_aborts() {
    let (server, manager) = setup().await;

    Mock::given(method("GET"))
        .and(path("/cliapi/firewalls"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cliapi/servers"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(0)
        .mount(&server)
        .await;

    let err = manager
        .ensure_server(server_draft("web"), &FirewallSelector::Name("nope".into()))
        .await
        .unwrap_err();

    assert!(
        matches!(
            &err,
            CoreError::NotFound { kind: ResourceKind::Firewall, identifier } if identifier == "nope"
        ),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn test_ensure_stops_on_api_error() {
    let (server, manager) = setup().await;

    Mock::given(method("GET"))
        .and(path("/cliapi/servers"))
        .respond_with(ResponseTemplate::new(500).set_body_string("db down"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = manager
        .ensure_server(server_draft("web"), &FirewallSelector::Id("fw-1".into()))
        .await
        .unwrap_err();

    match err {
        CoreError::Api(api) => assert_eq!(api.response_body(), Some("db down")),
        other => panic!("expected Api error, got {other:?}"),
    }
}

// ── Show / list / delete ────────────────────────────────────────────

#[tokio::test]
async fn test_show_null_is_not_found() {
    let (server, manager) = setup().await;

    Mock::given(method("GET"))
        .and(path("/cliapi/servers"))
        .and(query_param("name", "ghost"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let err = manager
        .show(ResourceKind::Server, &Lookup::by_name("ghost"))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::NotFound { kind: ResourceKind::Server, .. }));
}

#[tokio::test]
async fn test_show_unwraps_single_match() {
    let (server, manager) = setup().await;

    Mock::given(method("GET"))
        .and(path("/cliapi/firewalls"))
        .and(query_param("name", "web"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"[{"id":"x"}]"#))
        .mount(&server)
        .await;

    let out = manager
        .show(ResourceKind::Firewall, &Lookup::by_name("web"))
        .await
        .unwrap();
    assert_eq!(out, r#"{"id":"x"}"#);
}

#[tokio::test]
async fn test_show_by_id_uses_path() {
    let (server, manager) = setup().await;

    Mock::given(method("GET"))
        .and(path("/cliapi/groups/g-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":"g-1","name":"devs"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let out = manager
        .show(ResourceKind::Group, &Lookup::by_id("g-1"))
        .await
        .unwrap();
    assert_eq!(out, r#"{"id":"g-1","name":"devs"}"#);
}

#[tokio::test]
async fn test_list_passes_body_through() {
    let (server, manager) = setup().await;

    let body = r#"[{"id":"a"},{"id":"b"}]"#;
    Mock::given(method("GET"))
        .and(path("/cliapi/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    assert_eq!(manager.list(ResourceKind::Group).await.unwrap(), body);
}

#[tokio::test]
async fn test_delete_targets_id() {
    let (server, manager) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/cliapi/firewalls/fw-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    manager.delete(ResourceKind::Firewall, "fw-1").await.unwrap();
}

#[tokio::test]
async fn test_delete_failure_carries_body() {
    let (server, manager) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/cliapi/servers/srv-1"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such server"))
        .mount(&server)
        .await;

    let err = manager
        .delete(ResourceKind::Server, "srv-1")
        .await
        .unwrap_err();
    match err {
        CoreError::Api(api) => {
            assert!(api.is_not_found());
            assert_eq!(api.response_body(), Some("no such server"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

// ── Empty identifiers ───────────────────────────────────────────────

/// A catch-all that fails verification if any request arrives.
async fn forbid_requests(server: &MockServer) {
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "fw-prod" }])))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_ensure_with_empty_name_sends_nothing() {
    let (server, manager) = setup().await;
    forbid_requests(&server).await;

    let err = manager
        .ensure_firewall(Firewall::new("", Vec::new(), Vec::new()))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::MissingIdentifier {
            kind: ResourceKind::Firewall
        }
    ));

    let err = manager
        .ensure_server(server_draft(""), &FirewallSelector::Id("fw-1".into()))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::MissingIdentifier {
            kind: ResourceKind::Server
        }
    ));
}

#[tokio::test]
async fn test_show_with_empty_name_sends_nothing() {
    let (server, manager) = setup().await;
    forbid_requests(&server).await;

    let err = manager
        .show(ResourceKind::Firewall, &Lookup::by_name(""))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::MissingIdentifier { .. }));
}

#[tokio::test]
async fn test_show_ignores_empty_name_next_to_id() {
    let (server, manager) = setup().await;

    Mock::given(method("GET"))
        .and(path("/cliapi/servers/srv-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":"srv-1"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let lookup = Lookup {
        name: Some(String::new()),
        id: Some("srv-1".into()),
    };
    let out = manager.show(ResourceKind::Server, &lookup).await.unwrap();
    assert_eq!(out, r#"{"id":"srv-1"}"#);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_empty_firewall_selector_sends_nothing() {
    let (server, manager) = setup().await;
    forbid_requests(&server).await;

    for selector in [
        FirewallSelector::Id(String::new()),
        FirewallSelector::Name(String::new()),
    ] {
        let err = manager
            .ensure_server(server_draft("web"), &selector)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::MissingIdentifier {
                kind: ResourceKind::Firewall
            }
        ));
    }
}
