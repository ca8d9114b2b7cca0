//! Attractor-based solving of turn-based reachability games.
//!
//! The winning region of player 1 is the least fixpoint of
//!
//! ```text
//! win(0)   = { v | is_final(v) }
//! win(i+1) = win(i) ∪ pre1(win(i)) ∪ pre2(win(i))
//! ```
//!
//! where `pre1` collects player 1 vertices with *some* move into `win` and `pre2` collects
//! player 2 vertices with *all* moves into `win` (and at least one move). The fixpoint grows
//! monotonically and stabilizes after at most `|V|` expanding iterations.
//!
//! The fixpoint is implemented as a resumable [`Computation`]: [`AttractorConfig`] is the
//! immutable context, [`AttractorState`] the mutable state, and [`IterativeUnion`] performs
//! one iteration per step using a [`PredecessorStep`] operator. Every iteration checks for
//! cancellation, so the computation can be bounded with
//! [`AttractorConfig::max_iterations`] or any `cancel_this` trigger.
//!
//! Most users want the [`AttractorSolver`] wrapper, which validates the game and owns the
//! resulting [`WinningRegionOverlay`]:
//!
//! ```
//! use reachability_games::attractor::AttractorSolver;
//! use reachability_games::game::{ACT, Game, GameKind, IS_FINAL, TURN};
//! use reachability_games::property_graph::{PropertyGraph, PropertyType};
//!
//! let mut graph = PropertyGraph::with_properties(
//!     &[(IS_FINAL, PropertyType::Bool), (TURN, PropertyType::Int)],
//!     &[(ACT, PropertyType::Int)],
//!     &[],
//! ).unwrap();
//! let v = graph.add_vertices(3).unwrap();
//! graph.add_edges([(v[0], v[1]), (v[1], v[2]), (v[2], v[2])]).unwrap();
//! graph.set_vertex_property(IS_FINAL, v[1], true).unwrap();
//! graph.set_vertex_property(TURN, v[0], 1).unwrap();
//! graph.set_vertex_property(TURN, v[1], 2).unwrap();
//! graph.set_vertex_property(TURN, v[2], 2).unwrap();
//!
//! let mut game = Game::new(GameKind::TurnBased);
//! game.define(graph).unwrap();
//!
//! let mut solver = AttractorSolver::new(&game).unwrap();
//! let win = solver.solve().unwrap();
//! assert_eq!(win.into_iter().collect::<Vec<_>>(), vec![v[0], v[1]]);
//! ```
//!
//! The computation can also be driven directly:
//!
//! ```
//! # use reachability_games::game::{ACT, IS_FINAL, TURN};
//! # use reachability_games::property_graph::{PropertyGraph, PropertyType};
//! use reachability_games::attractor::{AttractorConfig, AttractorState, ZielonkaAttractor};
//! use computation_process::Algorithm;
//! use std::sync::Arc;
//!
//! # let mut graph = PropertyGraph::with_properties(
//! #     &[(IS_FINAL, PropertyType::Bool), (TURN, PropertyType::Int)],
//! #     &[(ACT, PropertyType::Int)],
//! #     &[],
//! # ).unwrap();
//! # let v = graph.add_vertices(2).unwrap();
//! # graph.add_edge(v[0], v[1]).unwrap();
//! # graph.set_vertex_property(IS_FINAL, v[1], true).unwrap();
//! # graph.set_vertex_property(TURN, v[0], 1).unwrap();
//! # graph.set_vertex_property(TURN, v[1], 1).unwrap();
//! let config = AttractorConfig::new(Arc::new(graph)).unwrap();
//! let initial = AttractorState::try_from(&config).unwrap();
//! let overlay = ZielonkaAttractor::run(config, initial).unwrap();
//! assert_eq!(overlay.marked().len(), 2);
//! ```

mod attractor_config;
mod attractor_state;
mod iterative_union;
mod overlay;
mod solver;
mod step_operators;

#[cfg(test)]
mod tests;

use crate::property_graph::VertexId;
use cancel_this::Cancellable;
use computation_process::Computation;
use std::collections::BTreeSet;

pub use attractor_config::AttractorConfig;
pub use attractor_state::AttractorState;
pub use iterative_union::IterativeUnion;
pub use overlay::WinningRegionOverlay;
pub use solver::AttractorSolver;
pub use step_operators::{ControllablePredecessors, Player1Predecessors, Player2Predecessors};

/// A helper alias which allows us to use [`AttractorComputation`] as shorthand for
/// `Computation<Context = AttractorConfig, State = AttractorState>`.
pub type AttractorComputation<STEP> =
    Computation<AttractorConfig, AttractorState, WinningRegionOverlay, STEP>;

/// The backward attractor of the final vertices for player 1, adding all controllable
/// predecessors in every iteration.
pub type ZielonkaAttractor = AttractorComputation<IterativeUnion<ControllablePredecessors>>;

/// A "predecessor operator" computes the vertices outside of `win` that should be attracted
/// into `win` in the next iteration.
///
/// Implementations must not return vertices that are already in `win`; an empty result means
/// the fixpoint has been reached.
pub trait PredecessorStep {
    fn step(
        context: &AttractorConfig,
        win: &BTreeSet<VertexId>,
    ) -> Cancellable<BTreeSet<VertexId>>;
}
