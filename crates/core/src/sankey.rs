//! Sankey graph construction.
//!
//! Converts a flat [`Relation`] of `(source, target, value)` rows into a
//! node-link graph for visualization libraries:
//!
//! - one [`SankeyNode`] per distinct label, indexed by first occurrence
//! - one [`SankeyLink`] per row, in row order, referencing nodes by index
//! - each node's `value` is its throughput (incoming + outgoing flow)
//!
//! Labels are scanned row-major: `row0.source, row0.target, row1.source, ...`.
//! A label first seen as a target in row 0 therefore precedes a label first
//! seen as a source in row 1.

use std::collections::HashMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{Error, FlowRow, Label, RawTable, Relation, Result};

/// Tolerance for comparing accumulated floating point flows.
const FLOW_EPSILON: f64 = 1e-9;

/// A graph node: a distinct label and the flow passing through it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SankeyNode {
    pub name: Label,
    pub value: f64,
}

/// A directed, weighted edge between two node indices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SankeyLink {
    pub source: usize,
    pub target: usize,
    pub value: f64,
}

/// Node-link graph ready for JSON serialization as `{nodes, links}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SankeyGraph {
    pub nodes: Vec<SankeyNode>,
    pub links: Vec<SankeyLink>,
}

impl SankeyGraph {
    /// Whether the graph has neither nodes nor links.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }

    /// Sum of all link values.
    #[must_use]
    pub fn total_flow(&self) -> f64 {
        self.links.iter().map(|link| link.value).sum()
    }

    /// Index of the node with the given name.
    #[must_use]
    pub fn node_index(&self, name: &str) -> Option<usize> {
        self.nodes.iter().position(|node| node.name.as_str() == name)
    }

    /// Verify the structural guarantees of a built graph.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvariantViolated` describing the first violation:
    /// a dangling link index, a duplicated node name, an unreferenced node, or
    /// a node value that differs from its throughput.
    pub fn check_invariants(&self) -> Result<()> {
        let node_count = self.nodes.len();

        if let Some((i, link)) = self
            .links
            .iter()
            .enumerate()
            .find(|(_, link)| link.source >= node_count || link.target >= node_count)
        {
            return Err(Error::invariant_violated(format!(
                "link {i} references node {} -> {} but only {node_count} nodes exist",
                link.source, link.target
            )));
        }

        if !self.nodes.iter().map(|node| &node.name).all_unique() {
            return Err(Error::invariant_violated("node names are not unique"));
        }

        let expected = throughput(node_count, &self.links);
        let referenced = referenced_nodes(node_count, &self.links);

        self.nodes
            .iter()
            .zip(expected)
            .zip(referenced)
            .try_for_each(|((node, expected), referenced)| {
                if !referenced {
                    Err(Error::invariant_violated(format!(
                        "node '{}' is not referenced by any link",
                        node.name
                    )))
                } else if !approx_eq(node.value, expected) {
                    Err(Error::invariant_violated(format!(
                        "node '{}' has value {} but its links carry {expected}",
                        node.name, node.value
                    )))
                } else {
                    Ok(())
                }
            })
    }
}

/// Build a Sankey graph from a validated relation.
///
/// Deterministic: the same relation always yields the same graph.
#[must_use]
pub fn build_sankey(relation: &Relation) -> SankeyGraph {
    let mut index = LabelIndex::default();

    let links: Vec<SankeyLink> = relation
        .iter()
        .map(|row| SankeyLink {
            source: index.intern(&row.source),
            target: index.intern(&row.target),
            value: row.value,
        })
        .collect();

    let labels = index.into_labels();
    let totals = throughput(labels.len(), &links);

    let nodes = labels
        .into_iter()
        .zip(totals)
        .map(|(name, value)| SankeyNode {
            name: name.clone(),
            value,
        })
        .collect();

    SankeyGraph { nodes, links }
}

/// Validate a raw table and build its Sankey graph.
///
/// # Errors
///
/// Returns `Error::MissingColumns` if `source`, `target` or `value` is absent,
/// checked before any row is read, or a type error for an unusable cell.
pub fn convert_table(table: &RawTable) -> Result<SankeyGraph> {
    let relation = Relation::try_from(table)?;
    let graph = build_sankey(&relation);
    tracing::debug!(
        nodes = graph.nodes.len(),
        links = graph.links.len(),
        "Built sankey graph"
    );
    Ok(graph)
}

/// A small industry-to-industry flow relation for demos.
#[must_use]
pub fn sample_relation() -> Relation {
    [
        ("Retail", "Technology", 500.0),
        ("Technology", "Education", 300.0),
        ("Education", "Healthcare", 200.0),
        ("Healthcare", "Manufacturing", 150.0),
        ("Manufacturing", "Finance", 250.0),
    ]
    .into_iter()
    .map(|(source, target, value)| FlowRow::new(source, target, value))
    .collect()
}

/// Assigns indices to labels in first-occurrence order.
#[derive(Default)]
struct LabelIndex<'a> {
    positions: HashMap<&'a Label, usize>,
    labels: Vec<&'a Label>,
}

impl<'a> LabelIndex<'a> {
    fn intern(&mut self, label: &'a Label) -> usize {
        *self.positions.entry(label).or_insert_with(|| {
            let next = self.labels.len();
            self.labels.push(label);
            next
        })
    }

    fn into_labels(self) -> Vec<&'a Label> {
        self.labels
    }
}

/// Per-node throughput, folded from the links into a fresh vector.
fn throughput(node_count: usize, links: &[SankeyLink]) -> Vec<f64> {
    links
        .iter()
        .fold(vec![0.0; node_count], |mut totals, link| {
            for index in [link.source, link.target] {
                if let Some(total) = totals.get_mut(index) {
                    *total += link.value;
                }
            }
            totals
        })
}

fn referenced_nodes(node_count: usize, links: &[SankeyLink]) -> Vec<bool> {
    links
        .iter()
        .fold(vec![false; node_count], |mut seen, link| {
            for index in [link.source, link.target] {
                if let Some(flag) = seen.get_mut(index) {
                    *flag = true;
                }
            }
            seen
        })
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= FLOW_EPSILON * a.abs().max(b.abs()).max(1.0)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    #![allow(clippy::indexing_slicing)]
    #![allow(clippy::arithmetic_side_effects)]

    use super::*;
    use serde_json::json;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    fn link(source: usize, target: usize, value: f64) -> SankeyLink {
        SankeyLink {
            source,
            target,
            value,
        }
    }

    fn node(name: &str, value: f64) -> SankeyNode {
        SankeyNode {
            name: name.into(),
            value,
        }
    }

    fn relation(rows: &[(&str, &str, f64)]) -> Relation {
        rows.iter()
            .map(|&(source, target, value)| FlowRow::new(source, target, value))
            .collect()
    }

    #[test]
    fn test_three_row_example() {
        let graph = build_sankey(&relation(&[
            ("A", "B", 10.0),
            ("B", "C", 5.0),
            ("A", "C", 20.0),
        ]));

        let names: Vec<&str> = graph.nodes.iter().map(|n| n.name.as_str()).collect();
        let values: Vec<f64> = graph.nodes.iter().map(|n| n.value).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert_eq!(values, [30.0, 15.0, 25.0]);
        assert_eq!(
            graph.links,
            [link(0, 1, 10.0), link(1, 2, 5.0), link(0, 2, 20.0)]
        );
    }

    #[test]
    fn test_empty_relation_yields_empty_graph() -> TestResult {
        let graph = build_sankey(&Relation::default());
        assert!(graph.is_empty());
        assert_eq!(serde_json::to_value(&graph)?, json!({"nodes": [], "links": []}));
        Ok(())
    }

    #[test]
    fn test_target_seen_in_first_row_precedes_later_source() {
        let graph = build_sankey(&relation(&[("X", "Y", 1.0), ("Z", "X", 1.0)]));
        let names: Vec<&str> = graph.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["X", "Y", "Z"]);
    }

    #[test]
    fn test_duplicate_rows_are_kept_as_separate_links() {
        let graph = build_sankey(&relation(&[("A", "B", 1.0), ("A", "B", 2.0)]));
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.links.len(), 2);
        assert_eq!(graph.node_index("B"), Some(1));
        assert!((graph.nodes[1].value - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_self_loop_counts_twice_on_its_node() -> TestResult {
        let graph = build_sankey(&relation(&[("A", "A", 4.0)]));
        assert_eq!(graph.nodes.len(), 1);
        assert!((graph.nodes[0].value - 8.0).abs() < f64::EPSILON);
        graph.check_invariants()?;
        Ok(())
    }

    #[test]
    fn test_negative_values_are_not_rejected() -> TestResult {
        let graph = build_sankey(&relation(&[("A", "B", -5.0), ("B", "C", 5.0)]));
        assert!((graph.nodes[1].value).abs() < f64::EPSILON);
        graph.check_invariants()?;
        Ok(())
    }

    #[test]
    fn test_serializes_to_node_link_shape() -> TestResult {
        let graph = build_sankey(&relation(&[("A", "B", 10.0)]));
        assert_eq!(
            serde_json::to_value(&graph)?,
            json!({
                "nodes": [{"name": "A", "value": 10.0}, {"name": "B", "value": 10.0}],
                "links": [{"source": 0, "target": 1, "value": 10.0}]
            })
        );
        Ok(())
    }

    #[test]
    fn test_convert_table_rejects_missing_value_column() -> TestResult {
        let table = RawTable::from_json_str(r#"[{"source": "A", "target": "B"}]"#)?;
        let result = convert_table(&table);
        assert!(matches!(result, Err(Error::MissingColumns { .. })));
        Ok(())
    }

    #[test]
    fn test_convert_table_from_records() -> TestResult {
        let table = RawTable::from_json_str(
            r#"[{"source": "A", "target": "B", "value": 10},
                {"source": "B", "target": "C", "value": 5},
                {"source": "A", "target": "C", "value": 20}]"#,
        )?;
        let graph = convert_table(&table)?;
        assert_eq!(graph.nodes.len(), 3);
        assert!((graph.total_flow() - 35.0).abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn test_check_invariants_detects_dangling_link() {
        let graph = SankeyGraph {
            nodes: vec![node("A", 1.0)],
            links: vec![link(0, 3, 1.0)],
        };
        assert!(matches!(
            graph.check_invariants(),
            Err(Error::InvariantViolated { .. })
        ));
    }

    #[test]
    fn test_check_invariants_detects_wrong_throughput() {
        let mut graph = build_sankey(&relation(&[("A", "B", 2.0)]));
        graph.nodes[0].value = 5.0;
        assert!(graph.check_invariants().is_err());
    }

    #[test]
    fn test_check_invariants_detects_orphan_node() {
        let mut graph = build_sankey(&relation(&[("A", "B", 2.0)]));
        graph.nodes.push(node("C", 0.0));
        assert!(graph.check_invariants().is_err());
    }

    #[test]
    fn test_sample_relation_is_a_chain() -> TestResult {
        let graph = build_sankey(&sample_relation());
        assert_eq!(graph.nodes.len(), 6);
        assert_eq!(graph.node_index("Finance"), Some(5));
        graph.check_invariants()?;
        Ok(())
    }
}
