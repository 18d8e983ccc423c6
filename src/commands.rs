//! CLI command handlers.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use insightdash_core::{RawTable, SankeyGraph, build_sankey, convert_table, sample_relation};
use insightdash_export::{ChromiumRenderer, ExportConfig, PageTarget, PdfExporter};
use insightdash_web::ServerConfig;
use tracing::{info, warn};

use crate::cli::Commands;
use crate::config::Config;

/// Execute a CLI command.
///
/// This is the main command dispatcher that routes to the appropriate handler.
pub async fn execute_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Serve {
            bind,
            pages_dir,
            static_dir,
        } => cmd_serve(serve_config(config.server, bind, pages_dir, static_dir)).await,

        Commands::Export {
            base_url,
            out_dir,
            settle_ms,
            pause_ms,
            browser,
            pages,
        } => {
            let overrides = ExportOverrides {
                base_url,
                out_dir,
                settle_ms,
                pause_ms,
                browser,
                pages,
            };
            cmd_export(overrides.apply(config.export)).await
        }

        Commands::Sankey { file, sample } => cmd_sankey(file.as_deref(), sample),
    }
}

/// Apply `serve` flags on top of the loaded server configuration.
pub fn serve_config(
    base: ServerConfig,
    bind: Option<String>,
    pages_dir: Option<PathBuf>,
    static_dir: Option<PathBuf>,
) -> ServerConfig {
    ServerConfig {
        bind_address: bind.unwrap_or(base.bind_address),
        pages_dir: pages_dir.unwrap_or(base.pages_dir),
        static_dir: static_dir.unwrap_or(base.static_dir),
        ..base
    }
}

/// `export` flags that override the loaded export configuration.
#[derive(Debug, Default)]
pub struct ExportOverrides {
    pub base_url: Option<String>,
    pub out_dir: Option<PathBuf>,
    pub settle_ms: Option<u64>,
    pub pause_ms: Option<u64>,
    pub browser: Option<String>,
    pub pages: Vec<PageTarget>,
}

impl ExportOverrides {
    pub fn apply(self, base: ExportConfig) -> ExportConfig {
        ExportConfig {
            base_url: self.base_url.unwrap_or(base.base_url),
            out_dir: self.out_dir.unwrap_or(base.out_dir),
            settle: self.settle_ms.map_or(base.settle, Duration::from_millis),
            pause: self.pause_ms.map_or(base.pause, Duration::from_millis),
            browser: self.browser.unwrap_or(base.browser),
            pages: if self.pages.is_empty() {
                base.pages
            } else {
                self.pages
            },
            ..base
        }
    }
}

async fn cmd_serve(config: ServerConfig) -> Result<()> {
    info!("Starting dashboard server on {}", config.bind_address);
    insightdash_web::server::run_server(config)
        .await
        .context("Dashboard server failed")
}

async fn cmd_export(config: ExportConfig) -> Result<()> {
    let targets = config.targets().context("Failed to resolve export pages")?;
    let renderer =
        ChromiumRenderer::from_config(&config).context("Failed to create page renderer")?;

    info!(
        browser = renderer.browser(),
        pages = targets.len(),
        "Exporting to {}",
        config.out_dir.display()
    );

    let exporter = PdfExporter::from_config(renderer, &config);
    let report = exporter
        .run(&targets)
        .await
        .with_context(|| format!("Failed to export into {}", config.out_dir.display()))?;

    if !report.is_complete() {
        warn!(
            exported = report.exported.len(),
            skipped = report.skipped.len(),
            "Some pages were not exported"
        );
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_sankey(file: Option<&Path>, sample: bool) -> Result<()> {
    let graph = if sample {
        build_sankey(&sample_relation())
    } else {
        let input = read_input(file)?;
        sankey_from_json(&input)?
    };

    println!("{}", serde_json::to_string_pretty(&graph)?);
    Ok(())
}

/// Parse a table in record or split form and build its Sankey graph.
///
/// # Errors
///
/// Returns an error if the input is not a table or fails validation.
pub fn sankey_from_json(input: &str) -> Result<SankeyGraph> {
    let table = RawTable::from_json_str(input).context("Input is not a JSON table")?;
    convert_table(&table).context("Table cannot be converted to a Sankey graph")
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    #![allow(clippy::indexing_slicing)]
    #![allow(clippy::arithmetic_side_effects)]

    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_serve_flags_override_config() {
        let base = ServerConfig {
            cors_origin: "https://dash.example.com".to_string(),
            ..ServerConfig::default()
        };

        let config = serve_config(base, Some("0.0.0.0:80".to_string()), None, None);

        assert_eq!(config.bind_address, "0.0.0.0:80");
        assert_eq!(config.cors_origin, "https://dash.example.com");
        assert_eq!(config.pages_dir, PathBuf::from("templates"));
    }

    #[test]
    fn test_export_overrides_only_replace_given_flags() -> TestResult {
        let page: PageTarget = "http://localhost:5000/combined=Combined".parse()?;
        let overrides = ExportOverrides {
            settle_ms: Some(250),
            pages: vec![page.clone()],
            ..ExportOverrides::default()
        };

        let config = overrides.apply(ExportConfig::default());

        assert_eq!(config.settle, Duration::from_millis(250));
        assert_eq!(config.pause, Duration::from_millis(1000));
        assert_eq!(config.targets()?, vec![page]);
        Ok(())
    }

    #[test]
    fn test_sankey_from_json_record_form() -> TestResult {
        let graph = sankey_from_json(
            r#"[
                {"source": "A", "target": "B", "value": 10},
                {"source": "B", "target": "C", "value": 5}
            ]"#,
        )?;

        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.links.len(), 2);
        assert!((graph.total_flow() - 15.0).abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn test_sankey_from_json_rejects_missing_column() {
        let result = sankey_from_json(r#"{"columns": ["source", "target"], "data": [["A", "B"]]}"#);
        let err = result.err().map(|e| format!("{e:#}")).unwrap_or_default();
        assert!(err.contains("value"), "{err}");
    }
}
