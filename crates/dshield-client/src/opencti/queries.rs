//! GraphQL documents and response shapes used against OpenCTI.

use serde::Deserialize;

/// STIX id of the TLP:GREEN marking definition
pub const TLP_GREEN: &str = "marking-definition--34098fce-860f-48ae-8e50-ebd3cc5e41da";

pub(crate) const LABELS_SEARCH: &str = r"
query Labels($search: String, $first: Int) {
  labels(search: $search, first: $first) {
    edges { node { id value } }
  }
}";

pub(crate) const LABEL_ADD: &str = r"
mutation LabelAdd($input: LabelAddInput!) {
  labelAdd(input: $input) { id value }
}";

pub(crate) const EXTERNAL_REFERENCE_ADD: &str = r"
mutation ExternalReferenceAdd($input: ExternalReferenceAddInput!) {
  externalReferenceAdd(input: $input) { id }
}";

pub(crate) const IDENTITY_ADD: &str = r"
mutation IdentityAdd($input: IdentityAddInput!) {
  identityAdd(input: $input) { id }
}";

pub(crate) const OBSERVABLE_ADD: &str = r"
mutation ObservableAdd(
  $type: String!
  $x_opencti_score: Int
  $x_opencti_description: String
  $createIndicator: Boolean
  $createdBy: String
  $objectMarking: [String]
  $objectLabel: [String]
  $externalReferences: [String]
  $IPv4Addr: IPv4AddrAddInput
) {
  stixCyberObservableAdd(
    type: $type
    x_opencti_score: $x_opencti_score
    x_opencti_description: $x_opencti_description
    createIndicator: $createIndicator
    createdBy: $createdBy
    objectMarking: $objectMarking
    objectLabel: $objectLabel
    externalReferences: $externalReferences
    IPv4Addr: $IPv4Addr
  ) { id }
}";

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Node {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LabelNode {
    pub id: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LabelsData {
    pub labels: Connection<LabelNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LabelAddData {
    pub label_add: LabelNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExternalReferenceAddData {
    pub external_reference_add: Node,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IdentityAddData {
    pub identity_add: Node,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ObservableAddData {
    pub stix_cyber_observable_add: Node,
}
