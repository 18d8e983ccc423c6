//! Error types for the export crate.

use thiserror::Error;

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors that can occur while exporting dashboard pages.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The page could not be fetched or answered with a non-success status.
    #[error("failed to load {url}: {reason}")]
    LoadFailed { url: String, reason: String },

    /// The browser could not be started.
    #[error("browser '{browser}' could not be started: {reason}")]
    BrowserUnavailable { browser: String, reason: String },

    /// The browser ran but produced no PDF.
    #[error("failed to print {url} to PDF: {reason}")]
    RenderFailed { url: String, reason: String },

    /// A page target string was not `URL=LABEL`.
    #[error("invalid page target '{input}': {reason}")]
    InvalidTarget { input: String, reason: String },

    /// HTTP client error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parse error.
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// Create a load failed error.
    pub fn load_failed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::LoadFailed {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a browser unavailable error.
    pub fn browser_unavailable(browser: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::BrowserUnavailable {
            browser: browser.into(),
            reason: reason.into(),
        }
    }

    /// Create a render failed error.
    pub fn render_failed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RenderFailed {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid target error.
    pub fn invalid_target(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTarget {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_failed_names_url() {
        let err = ExportError::load_failed("http://127.0.0.1:5000/fte", "status 500");
        assert_eq!(
            err.to_string(),
            "failed to load http://127.0.0.1:5000/fte: status 500"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let err: ExportError = std::io::Error::other("disk full").into();
        assert!(matches!(err, ExportError::Io(_)));
    }
}
