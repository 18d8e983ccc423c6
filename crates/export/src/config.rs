//! Configuration for the PDF exporter.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ExportError, Result};

/// Dashboards exported when no page list is configured, relative to the base URL.
pub const DEFAULT_PAGES: [(&str, &str); 4] = [
    ("/", "Home Dashboard"),
    ("/productivity", "Productivity Dashboard"),
    ("/fte", "FTE Dashboard"),
    ("/sankey", "Sankey Dashboard"),
];

/// A page to export and the label it is logged under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageTarget {
    pub url: Url,
    pub label: String,
}

impl PageTarget {
    pub fn new(url: Url, label: impl Into<String>) -> Self {
        Self {
            url,
            label: label.into(),
        }
    }
}

impl fmt::Display for PageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.url, self.label)
    }
}

/// Parses `URL=LABEL`. The label is everything after the last `=`.
impl FromStr for PageTarget {
    type Err = ExportError;

    fn from_str(input: &str) -> Result<Self> {
        let (url, label) = input
            .rsplit_once('=')
            .ok_or_else(|| ExportError::invalid_target(input, "expected URL=LABEL"))?;

        if label.trim().is_empty() {
            return Err(ExportError::invalid_target(input, "label is empty"));
        }

        let url = url
            .parse::<Url>()
            .map_err(|e| ExportError::invalid_target(input, e.to_string()))?;

        Ok(Self::new(url, label.trim()))
    }
}

/// Configuration for a PDF export run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Server the default page list is resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Directory the `page_<index>.pdf` files are written to.
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Time client-side rendering gets before printing.
    #[serde(
        rename = "settle_ms",
        with = "duration_millis",
        default = "default_settle"
    )]
    pub settle: Duration,

    /// Pause after each printed page.
    #[serde(
        rename = "pause_ms",
        with = "duration_millis",
        default = "default_pause"
    )]
    pub pause: Duration,

    /// Headless browser executable.
    #[serde(default = "default_browser")]
    pub browser: String,

    /// Timeout for the page load probe.
    #[serde(
        rename = "load_timeout_ms",
        with = "duration_millis",
        default = "default_load_timeout"
    )]
    pub load_timeout: Duration,

    /// Explicit page list; empty means [`DEFAULT_PAGES`].
    #[serde(default)]
    pub pages: Vec<PageTarget>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            out_dir: default_out_dir(),
            settle: default_settle(),
            pause: default_pause(),
            browser: default_browser(),
            load_timeout: default_load_timeout(),
            pages: Vec::new(),
        }
    }
}

impl ExportConfig {
    /// Apply `INSIGHTDASH_BROWSER` read through `lookup`.
    #[must_use]
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(browser) = lookup("INSIGHTDASH_BROWSER") {
            self.browser = browser;
        }
        self
    }

    /// Defaults with overrides from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// The pages to export, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse.
    pub fn targets(&self) -> Result<Vec<PageTarget>> {
        if !self.pages.is_empty() {
            return Ok(self.pages.clone());
        }

        let base = Url::parse(&self.base_url)?;
        DEFAULT_PAGES
            .into_iter()
            .map(|(path, label)| Ok(PageTarget::new(base.join(path)?, label)))
            .collect()
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000/".to_string()
}

fn default_out_dir() -> PathBuf {
    PathBuf::from(".")
}

const fn default_settle() -> Duration {
    Duration::from_millis(3000)
}

const fn default_pause() -> Duration {
    Duration::from_millis(1000)
}

const fn default_load_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_browser() -> String {
    ["chromium", "chromium-browser", "google-chrome"]
        .into_iter()
        .find_map(|name| which::which(name).ok())
        .map_or_else(
            || "chromium".to_string(),
            |path| path.to_string_lossy().to_string(),
        )
}

/// Serialization helper for Duration as milliseconds.
mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
