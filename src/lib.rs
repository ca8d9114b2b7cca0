//! Winning regions of two-player, turn-based reachability games.
//!
//! A game is a [`PropertyGraph`](property_graph::PropertyGraph) whose vertices carry
//! an `is_final` flag and a `turn` owner (player 1 or 2). The [`attractor`] module computes
//! the set of vertices from which player 1 can force every play into a final vertex.

use crate::property_graph::VertexId;
use std::collections::BTreeSet;

#[cfg(test)]
mod test_utils;

pub mod attractor;
pub mod game;
pub mod property_graph;

mod error;

pub use error::{GameError, GameResult};

/// A utility method for printing useful metadata of vertex sets.
fn log_region(set: &BTreeSet<VertexId>) -> String {
    match (set.first(), set.last()) {
        (Some(min), Some(max)) => format!("elements={}; range={}..={}", set.len(), min, max),
        _ => "elements=0".to_string(),
    }
}

/// Extract the "simple name" of a type argument at compile time.
///
/// Used to name step operators in log messages, e.g. `Union<ControllablePredecessors>`.
fn simple_type_name<T>() -> &'static str {
    std::any::type_name::<T>().split("::").last().unwrap_or("?")
}
