//! Shared application state and the metrics source seam.

use std::sync::Arc;

use chrono::Local;
use insightdash_core::{Relation, Result};

use crate::generators::{MonthlySnapshot, generate_flow_rows, generate_time_series};

/// Where dashboard handlers get their data from.
pub trait MetricsSource: Send + Sync {
    /// A series of monthly snapshots, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the series cannot be produced.
    fn monthly_snapshots(&self) -> Result<Vec<MonthlySnapshot>>;

    /// Flow rows for the Sankey dashboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the rows cannot be produced.
    fn flow_rows(&self) -> Result<Relation>;
}

/// Fresh random data on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomMetrics;

impl MetricsSource for RandomMetrics {
    fn monthly_snapshots(&self) -> Result<Vec<MonthlySnapshot>> {
        Ok(generate_time_series(
            Local::now().date_naive(),
            &mut rand::thread_rng(),
        ))
    }

    fn flow_rows(&self) -> Result<Relation> {
        Ok(generate_flow_rows(&mut rand::thread_rng()))
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<dyn MetricsSource>,
}

impl AppState {
    /// Create state backed by the given metrics source.
    pub fn new(metrics: impl MetricsSource + 'static) -> Self {
        Self {
            metrics: Arc::new(metrics),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(RandomMetrics)
    }
}
