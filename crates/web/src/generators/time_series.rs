//! Monthly business metric snapshots.

use chrono::{Days, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of monthly snapshots in a series.
pub const SERIES_LENGTH: u64 = 12;

/// Days between consecutive snapshots.
const DAYS_PER_STEP: u64 = 30;

/// Month label format, e.g. `Mar '26`.
const MONTH_LABEL_FORMAT: &str = "%b '%y";

/// One month of dashboard metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySnapshot {
    /// Month label, e.g. `Mar '26`.
    pub month_end: String,
    pub count_id: u32,
    pub count_gf: u32,
    pub count_gfc: u32,
    pub total_tf: f64,
    pub ocm_overall: f64,
    pub total_clients: u32,
    pub active_clients: u32,
    pub satisfaction: u32,
    pub tasks_completed: u32,
    pub avg_completion_time: u32,
    pub efficiency_rate: u32,
    pub overdue_tasks: u32,
    pub total_fte: u32,
    pub utilization: u32,
    pub overtime_hours: u32,
}

impl MonthlySnapshot {
    /// Draw a random snapshot for the given month.
    pub fn random<R: Rng + ?Sized>(month_end: String, rng: &mut R) -> Self {
        Self {
            month_end,
            count_id: rng.gen_range(100..=230),
            count_gf: rng.gen_range(80..=135),
            count_gfc: rng.gen_range(100..=210),
            total_tf: round2(rng.gen_range(2.5..3.7)),
            ocm_overall: round2(rng.gen_range(1.5..2.05)),
            total_clients: rng.gen_range(50..=150),
            active_clients: rng.gen_range(30..=100),
            satisfaction: rng.gen_range(60..=95),
            tasks_completed: rng.gen_range(200..=500),
            avg_completion_time: rng.gen_range(10..=30),
            efficiency_rate: rng.gen_range(70..=95),
            overdue_tasks: rng.gen_range(5..=20),
            total_fte: rng.gen_range(20..=60),
            utilization: rng.gen_range(60..=90),
            overtime_hours: rng.gen_range(10..=40),
        }
    }
}

/// Generate a year of snapshots ending one step before `today`, oldest first.
pub fn generate_time_series<R: Rng + ?Sized>(
    today: NaiveDate,
    rng: &mut R,
) -> Vec<MonthlySnapshot> {
    (1..=SERIES_LENGTH)
        .rev()
        .filter_map(|step| today.checked_sub_days(Days::new(step.saturating_mul(DAYS_PER_STEP))))
        .map(|date| MonthlySnapshot::random(month_label(date), rng))
        .collect()
}

/// Format a date as a short month label.
#[must_use]
pub fn month_label(date: NaiveDate) -> String {
    date.format(MONTH_LABEL_FORMAT).to_string()
}

/// Round to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
