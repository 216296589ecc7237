//! HTTP clients for the DShield connector.
//!
//! - [`DshieldClient`] fetches the DShield intel feed
//! - [`OpenCtiClient`] registers labels and observables with OpenCTI
//! - [`Platform`] is the seam between the connector and any intel platform

#![doc(html_root_url = "https://docs.rs/dshield-client/0.1.0")]

mod client;
mod config;
mod http;
mod platform;
pub mod api;
pub mod opencti;

pub use client::{DshieldClient, DshieldClientBuilder, DEFAULT_FEED_URL};
pub use config::*;
pub use dshield_core::{DshieldError, Result};
pub use opencti::OpenCtiClient;
pub use platform::{LabelHandle, ObjectHandle, Platform};
