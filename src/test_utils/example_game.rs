//! A documented 8-vertex turn-based game used as the canonical test case for the solver.
//!
//! # Game Design
//!
//! Vertices `0..=7`; player 1 owns `{0, 4, 6}`, player 2 owns `{1, 2, 3, 5, 7}`. The final
//! vertices are `{3, 4}`. The edge at position `i` of [`EDGES`] has action id `i`.
//!
//! | Vertex | Owner | Successors  | Predecessors  |
//! |--------|-------|-------------|---------------|
//! | 0      | 1     | 1, 3        | 1, 3, 7       |
//! | 1      | 2     | 0, 2, 4     | 0             |
//! | 2      | 2     | 4, 2        | 1, 2          |
//! | 3      | 2     | 0, 4, 5     | 0, 4, 5, 7    |
//! | 4      | 1     | 3           | 1, 2, 3       |
//! | 5      | 2     | 3, 6        | 3             |
//! | 6      | 1     | 6, 7        | 5, 6          |
//! | 7      | 2     | 0, 3        | 6             |
//!
//! ## Attractor Computation
//!
//! Starting from `win = {3, 4}`:
//!
//! 1. `0` joins (player 1, edge to `3`). `7` cannot join yet (its move to `0` leaves `win`).
//! 2. `7` joins (both moves, to `0` and `3`, are in `win`).
//! 3. `6` joins (player 1, edge to `7`).
//! 4. `5` joins (both moves, to `3` and `6`, are in `win`).
//! 5. Fixpoint: player 2 can always move from `1` to `2`, and from `2` back to `2`.
//!
//! The winning region of player 1 is `{0, 3, 4, 5, 6, 7}`.

use crate::GameResult;
use crate::property_graph::PropertyGraph;
use crate::test_utils::mk_game_graph;

/// Number of vertices in the example game.
pub const NUM_VERTICES: usize = 8;

/// Edges of the example game; the index of an edge is its action id.
pub const EDGES: &[(usize, usize)] = &[
    (0, 1),
    (0, 3),
    (1, 0),
    (1, 2),
    (1, 4),
    (2, 4),
    (2, 2),
    (3, 0),
    (3, 4),
    (3, 5),
    (4, 3),
    (5, 3),
    (5, 6),
    (6, 6),
    (6, 7),
    (7, 0),
    (7, 3),
];

pub mod sets {
    pub const FINAL: &[usize] = &[3, 4];
    pub const PLAYER_1: &[usize] = &[0, 4, 6];
    pub const PLAYER_2: &[usize] = &[1, 2, 3, 5, 7];
    /// The expected winning region of player 1.
    pub const WIN_1: &[usize] = &[0, 3, 4, 5, 6, 7];
    /// Vertices attracted by each expanding iteration, in order.
    pub const ATTRACTED_PER_ITERATION: &[&[usize]] = &[&[0], &[7], &[6], &[5]];
}

/// Create the example game graph.
pub fn create_example_graph() -> GameResult<PropertyGraph> {
    mk_game_graph(
        NUM_VERTICES,
        EDGES,
        sets::FINAL,
        sets::PLAYER_1,
        sets::PLAYER_2,
    )
}
