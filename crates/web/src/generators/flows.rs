//! Vertical-to-request-type flow rows for the Sankey dashboard.

use insightdash_core::{FlowRow, Relation};
use rand::{Rng, seq::SliceRandom};

/// Business verticals on the left of the diagram.
pub const VERTICALS: [&str; 6] = [
    "Retail",
    "Technology",
    "Education",
    "Finance",
    "Manufacturing",
    "Healthcare",
];

/// Request types on the right of the diagram.
pub const REQUEST_TYPES: [&str; 12] = [
    "Inquiry",
    "Support",
    "Complaint",
    "Feedback",
    "Onboarding",
    "Billing",
    "Technical",
    "Consultation",
    "Escalation",
    "Training",
    "Refund",
    OTHER,
];

/// Catch-all request type receiving aggregated small flows.
pub const OTHER: &str = "Other";

/// Flows below this value are folded into a single `Other` row.
pub const AGGREGATION_THRESHOLD: u32 = 10;

/// The generated relation is padded up to this many rows.
pub const MIN_ROWS: usize = 30;

/// Generate flow rows from verticals to request types.
///
/// Every vertical draws 8 to 10 distinct request types with a value in
/// `5..=50`. Sub-threshold values are summed into one `Other` row from a random
/// vertical, and the result is padded with fresh pairs valued `10..=50` until it
/// holds at least [`MIN_ROWS`] rows.
pub fn generate_flow_rows<R: Rng + ?Sized>(rng: &mut R) -> Relation {
    let mut rows = Vec::new();
    let mut other_total: u32 = 0;

    for vertical in VERTICALS {
        let sample_size = rng.gen_range(8..=10);
        for request_type in REQUEST_TYPES.choose_multiple(rng, sample_size) {
            let value: u32 = rng.gen_range(5..=50);
            if value < AGGREGATION_THRESHOLD {
                other_total = other_total.saturating_add(value);
            } else {
                rows.push(FlowRow::new(vertical, *request_type, f64::from(value)));
            }
        }
    }

    if other_total > 0 {
        if let Some(vertical) = VERTICALS.choose(rng) {
            rows.push(FlowRow::new(*vertical, OTHER, f64::from(other_total)));
        }
    }

    while rows.len() < MIN_ROWS {
        let (Some(vertical), Some(request_type)) =
            (VERTICALS.choose(rng), REQUEST_TYPES.choose(rng))
        else {
            break;
        };
        let taken = rows
            .iter()
            .any(|row| row.source.as_str() == *vertical && row.target.as_str() == *request_type);
        if !taken {
            let value: u32 = rng.gen_range(AGGREGATION_THRESHOLD..=50);
            rows.push(FlowRow::new(*vertical, *request_type, f64::from(value)));
        }
    }

    Relation::new(rows)
}
