//! InsightDash core.
//!
//! Typed input tables, the flow relation, and the Sankey graph builder shared
//! by the web service and the command line.

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod relation;
pub mod result;
pub mod sankey;
pub mod table;

pub use error::Error;
pub use relation::{
    FlowRow, Label, REQUIRED_COLUMNS, Relation, SOURCE_COLUMN, TARGET_COLUMN, VALUE_COLUMN,
};
pub use result::{Result, ResultExt};
pub use sankey::{
    SankeyGraph, SankeyLink, SankeyNode, build_sankey, convert_table, sample_relation,
};
pub use table::RawTable;
