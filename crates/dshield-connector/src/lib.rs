//! # dshield-connector
//!
//! Imports the DShield intel feed into OpenCTI.
//!
//! ## Run modes
//!
//! - **Platform mode** (default): labels, then `IPv4-Addr` observables, are
//!   upserted through the OpenCTI GraphQL API
//! - **File mode** (`--test`): the export document is written to a JSON file
//!
//! Either way the feed is fetched once, classified, normalized and assembled
//! by `dshield-core` before it reaches a sink.

pub mod cli;
pub mod config;
pub mod logging;
pub mod sink;

pub use cli::run;
