//! OpenCTI platform client.
//!
//! Talks to the platform's GraphQL endpoint. Labels are looked up before
//! they are created and every handle is cached for the lifetime of the
//! client, so a label is created at most once per run.

mod queries;

pub use queries::TLP_GREEN;

use crate::config::OpenCtiConfig;
use crate::http::{status_error, transport_error};
use crate::platform::{LabelHandle, ObjectHandle, Platform};
use async_trait::async_trait;
use dshield_core::{DshieldError, Label, ObservableKind, Result};
use queries::{
    ExternalReferenceAddData, GraphQlResponse, IdentityAddData, LabelAddData, LabelsData,
    ObservableAddData,
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tracing::{debug, info, instrument};

/// Where the connector's data comes from
const SOURCE_NAME: &str = "dshield.org";
const SOURCE_URL: &str = "https://dshield.org/";
const FEED_REFERENCE_URL: &str = "https://isc.sans.edu/api/intelfeed?json";

/// Ids attached to every observable: author and feed reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    /// Id of the "DShield" organization identity
    pub author_id: String,
    /// Id of the intel feed external reference
    pub external_reference_id: String,
}

/// OpenCTI GraphQL client
#[derive(Clone)]
pub struct OpenCtiClient {
    inner: Arc<OpenCtiInner>,
}

struct OpenCtiInner {
    http: HttpClient,
    endpoint: String,
    config: OpenCtiConfig,
    labels: Mutex<HashMap<String, LabelHandle>>,
    provenance: OnceLock<Provenance>,
}

impl OpenCtiClient {
    /// Create a client for the configured platform
    pub fn new(config: OpenCtiConfig) -> Result<Self> {
        url::Url::parse(&config.url)
            .map_err(|e| DshieldError::InvalidUrl(format!("{}: {e}", config.url)))?;
        if config.token.trim().is_empty() {
            return Err(DshieldError::Config("OpenCTI API token is empty".into()));
        }

        let http = HttpClient::builder()
            .timeout(config.timeout)
            .user_agent(format!("dshield-connector/{}", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()
            .map_err(|e| DshieldError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            inner: Arc::new(OpenCtiInner {
                http,
                endpoint: config.graphql_endpoint(),
                config,
                labels: Mutex::new(HashMap::new()),
                provenance: OnceLock::new(),
            }),
        })
    }

    /// Register the DShield organization and the feed external reference.
    ///
    /// Observables created afterwards are attributed to that organization and
    /// point at the feed. Calling this again returns the first result.
    pub async fn prepare(&self) -> Result<Provenance> {
        if let Some(provenance) = self.inner.provenance.get() {
            return Ok(provenance.clone());
        }

        let org_reference = self.external_reference(SOURCE_URL).await?;
        let data: IdentityAddData = self
            .graphql(
                queries::IDENTITY_ADD,
                json!({
                    "input": {
                        "type": "Organization",
                        "name": "DShield",
                        "description": "DShield Intel Feed importer",
                        "externalReferences": [org_reference],
                    }
                }),
            )
            .await?;
        let feed_reference = self.external_reference(FEED_REFERENCE_URL).await?;

        let provenance = Provenance {
            author_id: data.identity_add.id,
            external_reference_id: feed_reference,
        };
        info!(author = %provenance.author_id, "registered DShield identity");

        Ok(self.inner.provenance.get_or_init(|| provenance).clone())
    }

    async fn external_reference(&self, url: &str) -> Result<String> {
        let data: ExternalReferenceAddData = self
            .graphql(
                queries::EXTERNAL_REFERENCE_ADD,
                json!({ "input": { "source_name": SOURCE_NAME, "url": url } }),
            )
            .await?;
        Ok(data.external_reference_add.id)
    }

    fn cached_label(&self, key: &str) -> Option<LabelHandle> {
        self.inner
            .labels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn cache_label(&self, key: String, handle: &LabelHandle) {
        self.inner
            .labels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, handle.clone());
    }

    async fn find_label(&self, name: &str) -> Result<Option<LabelHandle>> {
        let data: LabelsData = self
            .graphql(
                queries::LABELS_SEARCH,
                json!({ "search": name, "first": 50 }),
            )
            .await?;

        Ok(data
            .labels
            .edges
            .into_iter()
            .map(|edge| edge.node)
            .find(|node| node.value.eq_ignore_ascii_case(name))
            .map(|node| LabelHandle {
                id: node.id,
                value: node.value,
            }))
    }

    /// POST a GraphQL document and unwrap its `data`
    async fn graphql<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T> {
        debug!(endpoint = %self.inner.endpoint, "GraphQL request");

        let response = self
            .inner
            .http
            .post(&self.inner.endpoint)
            .bearer_auth(&self.inner.config.token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| transport_error(&e, self.inner.config.timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DshieldError::Http(e.to_string()))?;
        if !status.is_success() {
            return Err(status_error(status, body));
        }

        let envelope: GraphQlResponse<T> = serde_json::from_str(&body)?;
        if !envelope.errors.is_empty() {
            let message = envelope
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(DshieldError::Api {
                code: status.as_u16(),
                message,
            });
        }

        envelope
            .data
            .ok_or_else(|| DshieldError::Internal("GraphQL response carried no data".into()))
    }
}

#[async_trait]
impl Platform for OpenCtiClient {
    #[instrument(skip(self), fields(label = %name))]
    async fn create_or_get_label(&self, name: &Label) -> Result<LabelHandle> {
        let key = name.as_str().to_lowercase();
        if let Some(handle) = self.cached_label(&key) {
            return Ok(handle);
        }

        let handle = if let Some(existing) = self.find_label(name.as_str()).await? {
            debug!("found existing label");
            existing
        } else {
            debug!("creating label");
            let data: LabelAddData = self
                .graphql(
                    queries::LABEL_ADD,
                    json!({
                        "input": {
                            "value": name.as_str(),
                            "color": self.inner.config.label_color,
                        }
                    }),
                )
                .await?;
            LabelHandle {
                id: data.label_add.id,
                value: data.label_add.value,
            }
        };

        self.cache_label(key, &handle);
        Ok(handle)
    }

    #[instrument(skip(self, labels), fields(labels = labels.len()))]
    async fn create_or_get_ipv4_object(
        &self,
        address: &str,
        labels: &[LabelHandle],
    ) -> Result<ObjectHandle> {
        let config = &self.inner.config;
        let provenance = self.inner.provenance.get();
        let label_ids: Vec<&str> = labels.iter().map(|l| l.id.as_str()).collect();

        let data: ObservableAddData = self
            .graphql(
                queries::OBSERVABLE_ADD,
                json!({
                    "type": ObservableKind::Ipv4Addr.stix_type(),
                    "x_opencti_score": config.score,
                    "x_opencti_description": format!("DShield Intel Feed entry for {address}"),
                    "createIndicator": config.create_indicator,
                    "createdBy": provenance.map(|p| p.author_id.as_str()),
                    "objectMarking": [TLP_GREEN],
                    "objectLabel": label_ids,
                    "externalReferences": provenance
                        .map(|p| vec![p.external_reference_id.as_str()])
                        .unwrap_or_default(),
                    "IPv4Addr": { "value": address },
                }),
            )
            .await?;

        Ok(ObjectHandle {
            id: data.stix_cyber_observable_add.id,
        })
    }
}
