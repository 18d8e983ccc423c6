//! InsightDash PDF export
//!
//! Loads each dashboard page in turn, lets it render, and prints it to
//! `page_<index>.pdf`. Pages that fail are logged and skipped.

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]

pub mod config;
pub mod error;
pub mod exporter;
pub mod renderer;

pub use config::{DEFAULT_PAGES, ExportConfig, PageTarget};
pub use error::{ExportError, Result};
pub use exporter::{ExportReport, ExportedPage, PdfExporter, SkipReason, SkippedPage, pdf_file_name};
pub use renderer::{ChromiumRenderer, PageRenderer};
