use crate::game::{IS_FINAL, TURN};
use crate::property_graph::{PropertyGraph, PropertyValue, VertexId};
use std::collections::BTreeSet;

/// Reference computation of the player 1 winning region.
///
/// Deliberately avoids the adjacency index and the overlay: every round scans the full edge
/// list for every vertex and adds winning vertices in place. Vertices with a `turn` value
/// other than 1 or 2 are never added.
pub fn naive_winning_region(graph: &PropertyGraph) -> BTreeSet<VertexId> {
    let edges = graph.edges().collect::<Vec<_>>();
    let mut win = graph
        .vertices()
        .filter(|v| graph.get_vertex_property(IS_FINAL, *v) == Ok(PropertyValue::Bool(true)))
        .collect::<BTreeSet<_>>();

    loop {
        let mut changed = false;
        for v in graph.vertices() {
            if win.contains(&v) {
                continue;
            }

            let moves = edges
                .iter()
                .filter(|e| e.source == v)
                .map(|e| e.target)
                .collect::<Vec<_>>();
            let attracted = match graph.get_vertex_property(TURN, v) {
                Ok(PropertyValue::Int(1)) => moves.iter().any(|t| win.contains(t)),
                Ok(PropertyValue::Int(2)) => {
                    !moves.is_empty() && moves.iter().all(|t| win.contains(t))
                }
                _ => false,
            };

            if attracted {
                win.insert(v);
                changed = true;
            }
        }

        if !changed {
            return win;
        }
    }
}
