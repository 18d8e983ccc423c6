//! Property-based tests for the Sankey graph builder.
//!
//! Uses proptest to validate, for arbitrary relations:
//! - node and link counts
//! - link indices stay in bounds
//! - flow conservation (node values sum to twice the link values)
//! - determinism

#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

use std::collections::HashSet;

use insightdash_core::{FlowRow, Relation, build_sankey};
use proptest::prelude::*;

fn arb_relation() -> impl Strategy<Value = Relation> {
    prop::collection::vec(("[a-f]{1,2}", "[a-f]{1,2}", 0u32..10_000), 0..40).prop_map(|rows| {
        rows.into_iter()
            .map(|(source, target, value)| FlowRow::new(source, target, f64::from(value)))
            .collect()
    })
}

fn distinct_labels(relation: &Relation) -> usize {
    relation
        .iter()
        .flat_map(|row| [row.source.as_str(), row.target.as_str()])
        .collect::<HashSet<_>>()
        .len()
}

proptest! {
    /// Property: K distinct labels and N rows yield K nodes and N links
    #[test]
    fn prop_counts(relation in arb_relation()) {
        let graph = build_sankey(&relation);
        prop_assert_eq!(graph.nodes.len(), distinct_labels(&relation));
        prop_assert_eq!(graph.links.len(), relation.len());
    }

    /// Property: every link references a valid node index
    #[test]
    fn prop_links_in_bounds(relation in arb_relation()) {
        let graph = build_sankey(&relation);
        let node_count = graph.nodes.len();
        for link in &graph.links {
            prop_assert!(link.source < node_count);
            prop_assert!(link.target < node_count);
        }
    }

    /// Property: node throughput sums to twice the total link flow
    #[test]
    fn prop_flow_conservation(relation in arb_relation()) {
        let graph = build_sankey(&relation);
        let node_total: f64 = graph.nodes.iter().map(|node| node.value).sum();
        let link_total = graph.total_flow();
        prop_assert!((node_total - 2.0 * link_total).abs() < 1e-6);
    }

    /// Property: links preserve row order and carry row labels
    #[test]
    fn prop_links_follow_rows(relation in arb_relation()) {
        let graph = build_sankey(&relation);
        for (row, link) in relation.iter().zip(&graph.links) {
            let source = graph.nodes.get(link.source).map(|node| node.name.as_str());
            let target = graph.nodes.get(link.target).map(|node| node.name.as_str());
            prop_assert_eq!(source, Some(row.source.as_str()));
            prop_assert_eq!(target, Some(row.target.as_str()));
            prop_assert!((link.value - row.value).abs() < f64::EPSILON);
        }
    }

    /// Property: building twice gives identical output
    #[test]
    fn prop_determinism(relation in arb_relation()) {
        prop_assert_eq!(build_sankey(&relation), build_sankey(&relation));
    }

    /// Property: built graphs always pass the invariant check
    #[test]
    fn prop_invariants_hold(relation in arb_relation()) {
        prop_assert!(build_sankey(&relation).check_invariants().is_ok());
    }
}
