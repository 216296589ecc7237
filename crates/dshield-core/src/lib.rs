//! Core types and the feed-to-export transformation for the DShield connector.
//!
//! This crate provides the foundational pieces shared by the client and the
//! connector binary:
//!
//! - **Types**: feed records, labels, normalized observables and the export document
//! - **Transform**: the label classifier, object normalizer and export assembler
//! - **Errors**: one error type, [`DshieldError`], for the whole workspace
//!
//! # Example
//!
//! ```rust,ignore
//! use dshield_core::{ExportAssembler, FeedRecord, LabelClassifier};
//!
//! let records: Vec<FeedRecord> = serde_json::from_str(body)?;
//! let assembly = ExportAssembler::new(LabelClassifier::with_source_label("dshield"))
//!     .assemble(&records);
//! println!("{} objects, {} skipped", assembly.document.objects.len(), assembly.skipped.len());
//! ```

#![doc(html_root_url = "https://docs.rs/dshield-core/0.1.0")]

mod error;
pub mod transform;
pub mod types;

pub use error::{DshieldError, Result};
pub use transform::*;
pub use types::*;
