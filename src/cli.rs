//! CLI command definitions using clap.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use insightdash_export::PageTarget;

/// InsightDash - metric dashboards and Sankey flows
#[derive(Parser, Debug)]
#[command(name = "insightdash")]
#[command(version)]
#[command(about = "Mock metric dashboards, Sankey flow graphs, and PDF export")]
#[command(
    long_about = "InsightDash serves dashboard pages backed by generated metrics, converts flow tables into Sankey graphs, and exports dashboards to PDF through a headless browser."
)]
pub struct Cli {
    /// Configuration file (defaults to ./insightdash.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the dashboard web server
    Serve {
        /// Address to bind to
        #[arg(long)]
        bind: Option<String>,

        /// Directory holding the dashboard HTML pages
        #[arg(long)]
        pages_dir: Option<PathBuf>,

        /// Directory served under /static
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Export dashboard pages to PDF
    Export {
        /// Server the default page list is resolved against
        #[arg(long)]
        base_url: Option<String>,

        /// Directory to write page_<index>.pdf files to
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Milliseconds of client-side rendering before printing
        #[arg(long)]
        settle_ms: Option<u64>,

        /// Milliseconds to pause between pages
        #[arg(long)]
        pause_ms: Option<u64>,

        /// Headless browser executable
        #[arg(long)]
        browser: Option<String>,

        /// Page to export as URL=LABEL (repeatable, replaces the default list)
        #[arg(long = "page")]
        pages: Vec<PageTarget>,
    },

    /// Convert a flow table (JSON) into a Sankey graph
    Sankey {
        /// Table file in record or split form; reads stdin when omitted
        file: Option<PathBuf>,

        /// Print the graph of the bundled sample flows
        #[arg(long, conflicts_with = "file")]
        sample: bool,
    },
}
