//! Page loading and PDF printing.
//!
//! The production renderer probes each page over HTTP and then shells out to
//! a headless Chromium, which waits out client-side rendering through
//! `--virtual-time-budget` before printing.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::config::{ExportConfig, PageTarget};
use crate::error::{ExportError, Result};

/// Loads pages and prints them to PDF.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Check that the page can be loaded.
    async fn load(&self, page: &PageTarget) -> Result<()>;

    /// Print the page to `output`, letting it render for `settle` first.
    async fn print_to_pdf(&self, page: &PageTarget, output: &Path, settle: Duration) -> Result<()>;
}

/// Renderer backed by `reqwest` and a headless Chromium binary.
#[derive(Debug, Clone)]
pub struct ChromiumRenderer {
    browser: String,
    http_client: reqwest::Client,
    load_timeout: Duration,
}

impl ChromiumRenderer {
    /// Create a renderer using `browser` with a load probe timeout.
    ///
    /// A browser run is killed once it exceeds the settle time plus
    /// `load_timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(browser: impl Into<String>, load_timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder().timeout(load_timeout).build()?;
        Ok(Self {
            browser: browser.into(),
            http_client,
            load_timeout,
        })
    }

    /// Create a renderer from export configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &ExportConfig) -> Result<Self> {
        Self::new(config.browser.clone(), config.load_timeout)
    }

    pub fn browser(&self) -> &str {
        &self.browser
    }

    /// Arguments passed to the browser for one page.
    fn print_args(page: &PageTarget, output: &Path, settle: Duration) -> Vec<String> {
        vec![
            "--headless".to_string(),
            "--disable-gpu".to_string(),
            "--no-pdf-header-footer".to_string(),
            format!("--virtual-time-budget={}", settle.as_millis()),
            format!("--print-to-pdf={}", output.display()),
            page.url.to_string(),
        ]
    }
}

#[async_trait]
impl PageRenderer for ChromiumRenderer {
    async fn load(&self, page: &PageTarget) -> Result<()> {
        let response = self
            .http_client
            .get(page.url.clone())
            .send()
            .await
            .map_err(|e| ExportError::load_failed(page.url.as_str(), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExportError::load_failed(
                page.url.as_str(),
                format!("status {status}"),
            ));
        }

        debug!(url = %page.url, %status, "Page loaded");
        Ok(())
    }

    async fn print_to_pdf(&self, page: &PageTarget, output: &Path, settle: Duration) -> Result<()> {
        // A PDF left over from an earlier run must not pass for this one
        match tokio::fs::remove_file(output).await {
            Ok(()) => debug!(path = %output.display(), "Removed stale PDF"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        let limit = settle.saturating_add(self.load_timeout);
        let run = Command::new(&self.browser)
            .args(Self::print_args(page, output, settle))
            .kill_on_drop(true)
            .output();

        let output_result = tokio::time::timeout(limit, run).await.map_err(|_| {
            ExportError::render_failed(
                page.url.as_str(),
                format!("browser timed out after {}ms", limit.as_millis()),
            )
        })?;

        let result = output_result
            .map_err(|e| ExportError::browser_unavailable(&self.browser, e.to_string()))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(ExportError::render_failed(
                page.url.as_str(),
                format!("{}: {}", result.status, stderr.trim()),
            ));
        }

        if !tokio::fs::try_exists(output).await? {
            return Err(ExportError::render_failed(
                page.url.as_str(),
                "browser exited without writing a PDF",
            ));
        }

        Ok(())
    }
}
