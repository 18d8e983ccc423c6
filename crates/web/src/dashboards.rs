//! Dashboard payload assembly.
//!
//! The overview, productivity and FTE dashboards share one response shape:
//! three monthly series (line, bar, area), an optional scatter series, and
//! the current value of each series metric with its trend against the
//! previous month.

#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::generators::MonthlySnapshot;
use crate::generators::time_series::round2;

/// Direction of a metric relative to the previous month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    #[serde(rename = "↑")]
    Up,
    #[serde(rename = "↓")]
    Down,
}

/// Which way a metric should move to count as an improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    HigherIsBetter,
    LowerIsBetter,
}

/// Trend arrow for a metric.
///
/// Without a previous value the comparison is false, so higher-is-better
/// metrics read `Down` and lower-is-better metrics read `Up`.
#[must_use]
pub fn trend_direction(current: f64, previous: Option<f64>, polarity: Polarity) -> TrendDirection {
    match polarity {
        Polarity::HigherIsBetter => {
            if previous.is_some_and(|p| current > p) {
                TrendDirection::Up
            } else {
                TrendDirection::Down
            }
        }
        Polarity::LowerIsBetter => {
            if previous.is_some_and(|p| current < p) {
                TrendDirection::Down
            } else {
                TrendDirection::Up
            }
        }
    }
}

/// Percent change from `previous` to `current`, rounded to two places.
///
/// Zero when there is no previous value or it is zero.
#[must_use]
pub fn percent_change(current: f64, previous: Option<f64>) -> f64 {
    match previous {
        Some(p) if p != 0.0 => round2((current - p) / p * 100.0),
        _ => 0.0,
    }
}

/// An integer metric carried by every snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    CountId,
    CountGf,
    CountGfc,
    TasksCompleted,
    AvgCompletionTime,
    EfficiencyRate,
    TotalFte,
    Utilization,
    OvertimeHours,
}

impl Metric {
    /// JSON key of the metric.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::CountId => "count_id",
            Self::CountGf => "count_gf",
            Self::CountGfc => "count_gfc",
            Self::TasksCompleted => "tasks_completed",
            Self::AvgCompletionTime => "avg_completion_time",
            Self::EfficiencyRate => "efficiency_rate",
            Self::TotalFte => "total_fte",
            Self::Utilization => "utilization",
            Self::OvertimeHours => "overtime_hours",
        }
    }

    /// Improvement direction.
    #[must_use]
    pub const fn polarity(self) -> Polarity {
        match self {
            Self::AvgCompletionTime | Self::OvertimeHours => Polarity::LowerIsBetter,
            _ => Polarity::HigherIsBetter,
        }
    }

    /// Read the metric from a snapshot.
    #[must_use]
    pub const fn read(self, snapshot: &MonthlySnapshot) -> u32 {
        match self {
            Self::CountId => snapshot.count_id,
            Self::CountGf => snapshot.count_gf,
            Self::CountGfc => snapshot.count_gfc,
            Self::TasksCompleted => snapshot.tasks_completed,
            Self::AvgCompletionTime => snapshot.avg_completion_time,
            Self::EfficiencyRate => snapshot.efficiency_rate,
            Self::TotalFte => snapshot.total_fte,
            Self::Utilization => snapshot.utilization,
            Self::OvertimeHours => snapshot.overtime_hours,
        }
    }
}

/// The metric dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dashboard {
    Overview,
    Productivity,
    Fte,
}

impl Dashboard {
    /// API path serving this dashboard.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Overview => "/api/data",
            Self::Productivity => "/api/productivity_data",
            Self::Fte => "/api/fte_data",
        }
    }

    /// Metrics plotted as line, bar and area series, in that order.
    #[must_use]
    pub const fn series(self) -> [Metric; 3] {
        match self {
            Self::Overview => [Metric::CountId, Metric::CountGf, Metric::CountGfc],
            Self::Productivity => [
                Metric::TasksCompleted,
                Metric::AvgCompletionTime,
                Metric::EfficiencyRate,
            ],
            Self::Fte => [Metric::TotalFte, Metric::Utilization, Metric::OvertimeHours],
        }
    }

    /// Whether the dashboard plots the `total_tf`/`ocm_overall` scatter.
    #[must_use]
    pub const fn has_scatter(self) -> bool {
        matches!(self, Self::Overview)
    }
}

/// A labelled point of a monthly series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: u32,
}

/// A labelled point of the scatter series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub label: String,
    pub total_tf: f64,
    pub ocm_overall: f64,
}

/// Current metric values and their trends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardMetrics {
    pub current_metrics: Map<String, Value>,
}

/// JSON payload of a metric dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub line_data: Vec<SeriesPoint>,
    pub bar_data: Vec<SeriesPoint>,
    pub area_data: Vec<SeriesPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scatter_data: Option<Vec<ScatterPoint>>,
    pub metrics: DashboardMetrics,
}

/// Assemble a dashboard from snapshots ordered oldest first.
///
/// The most recent snapshot is the current month. Returns `None` when there are
/// no snapshots.
#[must_use]
pub fn assemble(dashboard: Dashboard, snapshots: &[MonthlySnapshot]) -> Option<DashboardResponse> {
    let current = snapshots.last()?;
    let previous = snapshots.iter().rev().nth(1);
    let [line, bar, area] = dashboard.series();

    let series = |metric: Metric| -> Vec<SeriesPoint> {
        snapshots
            .iter()
            .map(|snapshot| SeriesPoint {
                label: snapshot.month_end.clone(),
                value: metric.read(snapshot),
            })
            .collect()
    };

    let scatter_data = dashboard.has_scatter().then(|| {
        snapshots
            .iter()
            .map(|snapshot| ScatterPoint {
                label: snapshot.month_end.clone(),
                total_tf: snapshot.total_tf,
                ocm_overall: snapshot.ocm_overall,
            })
            .collect()
    });

    Some(DashboardResponse {
        line_data: series(line),
        bar_data: series(bar),
        area_data: series(area),
        scatter_data,
        metrics: DashboardMetrics {
            current_metrics: current_metrics(&dashboard.series(), current, previous),
        },
    })
}

fn current_metrics(
    metrics: &[Metric],
    current: &MonthlySnapshot,
    previous: Option<&MonthlySnapshot>,
) -> Map<String, Value> {
    let mut trends = Map::new();
    let mut values = Map::new();

    for &metric in metrics {
        let now = f64::from(metric.read(current));
        let before = previous.map(|snapshot| f64::from(metric.read(snapshot)));
        let direction = trend_direction(now, before, metric.polarity());

        values.insert(metric.key().to_string(), Value::from(metric.read(current)));
        trends.insert(
            format!("{}_trend", metric.key()),
            serde_json::to_value(direction).unwrap_or(Value::Null),
        );
        trends.insert(
            format!("{}_percent_change", metric.key()),
            Value::from(percent_change(now, before)),
        );
    }

    values.insert("trends".to_string(), Value::Object(trends));
    values
}
