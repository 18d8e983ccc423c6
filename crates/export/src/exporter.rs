//! Sequential export loop.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;
use tracing::{error, info, warn};
use url::Url;

use crate::config::{ExportConfig, PageTarget};
use crate::error::Result;
use crate::renderer::PageRenderer;

/// File name for the page at `index` in the page list.
pub fn pdf_file_name(index: usize) -> String {
    format!("page_{index}.pdf")
}

/// A page that was printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedPage {
    pub index: usize,
    pub label: String,
    pub path: PathBuf,
}

/// Why a page produced no file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    LoadFailed,
    RenderFailed,
}

/// A page that produced no file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPage {
    pub index: usize,
    pub url: Url,
    pub reason: SkipReason,
    pub detail: String,
}

/// Outcome of an export run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub exported: Vec<ExportedPage>,
    pub skipped: Vec<SkippedPage>,
}

impl ExportReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Exports pages one at a time through a [`PageRenderer`].
pub struct PdfExporter<R> {
    renderer: R,
    out_dir: PathBuf,
    settle: Duration,
    pause: Duration,
}

impl<R: PageRenderer> PdfExporter<R> {
    pub fn new(renderer: R, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            renderer,
            out_dir: out_dir.into(),
            settle: Duration::from_millis(3000),
            pause: Duration::from_millis(1000),
        }
    }

    /// Exporter with the directory and delays from `config`.
    pub fn from_config(renderer: R, config: &ExportConfig) -> Self {
        Self::new(renderer, config.out_dir.clone())
            .settle(config.settle)
            .pause(config.pause)
    }

    #[must_use]
    pub const fn settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    #[must_use]
    pub const fn pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Export `pages` in order, writing `page_<index>.pdf` for each page that loads.
    ///
    /// Pages that fail to load or print are logged and skipped; the run
    /// continues with the next page.
    ///
    /// # Errors
    ///
    /// Returns an error only if the output directory cannot be created.
    pub async fn run(&self, pages: &[PageTarget]) -> Result<ExportReport> {
        tokio::fs::create_dir_all(&self.out_dir).await?;

        let mut report = ExportReport::default();

        for (index, page) in pages.iter().enumerate() {
            info!("Loading: {}", page.label);

            if let Err(e) = self.renderer.load(page).await {
                error!("Failed to load {}", page.url);
                warn!(error = %e, "Skipping page {}", index);
                report.skipped.push(SkippedPage {
                    index,
                    url: page.url.clone(),
                    reason: SkipReason::LoadFailed,
                    detail: e.to_string(),
                });
                continue;
            }

            let path = self.out_dir.join(pdf_file_name(index));
            info!("Exporting to {}", path.display());

            match self.renderer.print_to_pdf(page, &path, self.settle).await {
                Ok(()) => report.exported.push(ExportedPage {
                    index,
                    label: page.label.clone(),
                    path,
                }),
                Err(e) => {
                    error!(error = %e, "Failed to export {}", page.url);
                    report.skipped.push(SkippedPage {
                        index,
                        url: page.url.clone(),
                        reason: SkipReason::RenderFailed,
                        detail: e.to_string(),
                    });
                }
            }

            tokio::time::sleep(self.pause).await;
        }

        info!("PDF export complete.");
        Ok(report)
    }
}
