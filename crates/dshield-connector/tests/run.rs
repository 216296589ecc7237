use clap::Parser;
use dshield_connector::cli::args::{Cli, RunMode};
use dshield_connector::cli::execute;
use dshield_core::ExportDocument;
use serde_json::json;
use std::path::Path;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NO_CONFIG: &str = "/nonexistent/dshield-connector/config.toml";

async fn mount_feed(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/intelfeed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"ip": "192.0.2.1", "description": "webscanner"},
            {"ip": "not-an-ip", "description": "tldns"},
            {"ip": "192.0.2.3", "ssh-scan": true, "webscanner": true}
        ])))
        .mount(server)
        .await;
}

fn graphql(server_marker: &str, data: serde_json::Value) -> Mock {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains(server_marker))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": data })))
}

#[tokio::test]
async fn file_mode_writes_export() {
    let server = MockServer::start().await;
    mount_feed(&server).await;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("export.json");

    let cli = Cli::parse_from([
        "dshield-connector",
        "--test",
        "--config",
        NO_CONFIG,
        "--feed-url",
        server.uri().as_str(),
        "--output",
        output.to_str().unwrap(),
    ]);
    let summary = execute(cli).await.unwrap();

    assert_eq!(summary.mode, RunMode::File);
    assert_eq!(summary.records, 3);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.objects, 2);
    assert!(summary.delivery.is_none());

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        written,
        json!({
            "labels": ["dshield", "web-scanner", "ssh-scanner"],
            "objects": [
                {"type": "ipv4-addr", "value": "192.0.2.1", "labels": ["dshield", "web-scanner"]},
                {"type": "ipv4-addr", "value": "192.0.2.3", "labels": ["dshield", "web-scanner", "ssh-scanner"]}
            ]
        })
    );
}

#[tokio::test]
async fn file_mode_without_source_label() {
    let server = MockServer::start().await;
    mount_feed(&server).await;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("export.json");

    let cli = Cli::parse_from([
        "dshield-connector",
        "--test",
        "--no-source-label",
        "--config",
        NO_CONFIG,
        "--feed-url",
        server.uri().as_str(),
        "--output",
        output.to_str().unwrap(),
    ]);
    execute(cli).await.unwrap();

    let written: ExportDocument =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    let labels: Vec<_> = written.labels.iter().map(|l| l.as_str()).collect();
    assert_eq!(labels, ["web-scanner", "ssh-scanner"]);
}

#[tokio::test]
async fn unreachable_feed_fails_without_writing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/intelfeed"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("export.json");

    let cli = Cli::parse_from([
        "dshield-connector",
        "--test",
        "--config",
        NO_CONFIG,
        "--feed-url",
        server.uri().as_str(),
        "--output",
        output.to_str().unwrap(),
    ]);
    let err = execute(cli).await.unwrap_err();

    assert!(format!("{err:#}").contains("failed to fetch DShield intel feed"));
    assert!(!Path::new(&output).exists());
}

#[tokio::test]
async fn platform_mode_registers_labels_then_observables() {
    let server = MockServer::start().await;
    mount_feed(&server).await;
    graphql(
        "mutation ExternalReferenceAdd",
        json!({"externalReferenceAdd": {"id": "ref-1"}}),
    )
    .mount(&server)
    .await;
    graphql(
        "mutation IdentityAdd",
        json!({"identityAdd": {"id": "identity-1"}}),
    )
    .mount(&server)
    .await;
    graphql("query Labels", json!({"labels": {"edges": []}}))
        .mount(&server)
        .await;
    graphql(
        "mutation LabelAdd",
        json!({"labelAdd": {"id": "label-1", "value": "any"}}),
    )
    .expect(3)
    .mount(&server)
    .await;
    graphql(
        "mutation ObservableAdd",
        json!({"stixCyberObservableAdd": {"id": "observable-1"}}),
    )
    .expect(2)
    .mount(&server)
    .await;

    let cli = Cli::parse_from([
        "dshield-connector",
        "--config",
        NO_CONFIG,
        "--feed-url",
        server.uri().as_str(),
        "--opencti-url",
        server.uri().as_str(),
        "--opencti-token",
        "secret",
    ]);
    let summary = execute(cli).await.unwrap();

    assert_eq!(summary.mode, RunMode::Platform);
    let delivery = summary.delivery.unwrap();
    assert!(delivery.is_complete());
    assert_eq!(delivery.labels_registered, 3);
    assert_eq!(delivery.objects_registered, 2);
}
