use crate::error::{DshieldError, Result};
use crate::types::{FeedRecord, Label, NormalizedObject, ObservableKind};
use std::net::Ipv4Addr;

/// Build the observable for one record.
///
/// Validation is strict: the address must be a plain dotted quad.
/// Surrounding whitespace, leading zeros and IPv6 are all rejected with
/// [`DshieldError::InvalidIp`].
pub fn normalize(record: &FeedRecord, labels: Vec<Label>) -> Result<NormalizedObject> {
    record
        .ip
        .parse::<Ipv4Addr>()
        .map_err(|_| DshieldError::InvalidIp(record.ip.clone()))?;

    Ok(NormalizedObject {
        kind: ObservableKind::Ipv4Addr,
        value: record.ip.clone(),
        labels,
    })
}
