//! Destinations for the export document.
//!
//! Exactly one sink is used per run, chosen from [`RunMode`](crate::cli::args::RunMode).

mod file;
mod platform;

pub use file::FileSink;
pub use platform::{DeliveryReport, PlatformSink};
