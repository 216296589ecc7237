use dshield_client::opencti::TLP_GREEN;
use dshield_client::{DshieldError, LabelHandle, OpenCtiClient, OpenCtiConfig, Platform};
use dshield_core::Label;
use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> OpenCtiClient {
    OpenCtiClient::new(OpenCtiConfig::new(server.uri(), "secret-token")).unwrap()
}

async fn mount_empty_label_search(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("query Labels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"labels": {"edges": []}}
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn creates_missing_label_once() {
    let server = MockServer::start().await;
    mount_empty_label_search(&server).await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("authorization", "Bearer secret-token"))
        .and(body_string_contains("mutation LabelAdd"))
        .and(body_partial_json(json!({
            "variables": {"input": {"value": "web-scanner", "color": "#ffa500"}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"labelAdd": {"id": "label-1", "value": "web-scanner"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let label = Label::new("web-scanner");
    let first = client.create_or_get_label(&label).await.unwrap();
    let second = client.create_or_get_label(&label).await.unwrap();

    assert_eq!(first.id, "label-1");
    assert_eq!(first, second);
}

#[tokio::test]
async fn reuses_existing_label_case_insensitively() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("query Labels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"labels": {"edges": [
                {"node": {"id": "label-0", "value": "dshield-extra"}},
                {"node": {"id": "label-7", "value": "DShield"}}
            ]}}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("mutation LabelAdd"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let handle = client_for(&server)
        .create_or_get_label(&Label::new("dshield"))
        .await
        .unwrap();

    assert_eq!(
        handle,
        LabelHandle {
            id: "label-7".into(),
            value: "DShield".into()
        }
    );
}

#[tokio::test]
async fn graphql_errors_become_api_errors() {
    let server = MockServer::start().await;
    mount_empty_label_search(&server).await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("mutation LabelAdd"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{"message": "You are not allowed to do this."}]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_or_get_label(&Label::new("ssh-scanner"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DshieldError::Api { ref message, .. } if message.contains("not allowed")
    ));
}

#[tokio::test]
async fn unauthorized_status_is_mapped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_or_get_label(&Label::new("x"))
        .await
        .unwrap_err();
    assert!(err.is_auth_error());
}

#[tokio::test]
async fn observable_carries_labels_marking_and_provenance() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("mutation ExternalReferenceAdd"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"externalReferenceAdd": {"id": "ref-1"}}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("mutation IdentityAdd"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"identityAdd": {"id": "identity-1"}}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("mutation ObservableAdd"))
        .and(body_partial_json(json!({
            "variables": {
                "type": "IPv4-Addr",
                "x_opencti_score": 60,
                "createIndicator": true,
                "createdBy": "identity-1",
                "objectMarking": [TLP_GREEN],
                "objectLabel": ["label-1", "label-2"],
                "externalReferences": ["ref-1"],
                "IPv4Addr": {"value": "198.51.100.23"}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"stixCyberObservableAdd": {"id": "observable-1"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let provenance = client.prepare().await.unwrap();
    assert_eq!(provenance.author_id, "identity-1");
    // a second prepare reuses the first registration
    assert_eq!(client.prepare().await.unwrap(), provenance);

    let labels = [
        LabelHandle {
            id: "label-1".into(),
            value: "dshield".into(),
        },
        LabelHandle {
            id: "label-2".into(),
            value: "web-scanner".into(),
        },
    ];
    let object = client
        .create_or_get_ipv4_object("198.51.100.23", &labels)
        .await
        .unwrap();

    assert_eq!(object.id, "observable-1");
}

#[test]
fn rejects_empty_token() {
    let err = OpenCtiClient::new(OpenCtiConfig::new("https://cti.example.org", " ")).err();
    assert!(matches!(err, Some(DshieldError::Config(_))));
}
