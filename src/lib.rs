#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! # InsightDash
//!
//! Command-line front end for the InsightDash workspace crates.

pub use insightdash_core;
pub use insightdash_export;
pub use insightdash_web;

pub mod cli;
pub mod commands;
pub mod config;
