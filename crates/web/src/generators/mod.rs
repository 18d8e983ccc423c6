//! Mock metric generators.
//!
//! Everything here draws from an explicit `Rng` so callers can seed it.

pub mod flows;
pub mod time_series;

pub use flows::generate_flow_rows;
pub use time_series::{MonthlySnapshot, generate_time_series};
