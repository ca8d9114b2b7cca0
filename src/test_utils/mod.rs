pub mod example_game;
pub mod naive_attractor;

use crate::GameResult;
use crate::game::{ACT, Game, GameKind, IS_FINAL, TURN};
use crate::property_graph::{PropertyGraph, PropertyType, VertexId};
use std::collections::BTreeSet;

/// Initialize env_logger for tests. Safe to call multiple times.
pub fn init_logger() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

/// Convert a slice of vertex indices to a set of handles.
pub fn vertex_set(vertices: &[usize]) -> BTreeSet<VertexId> {
    vertices.iter().copied().map(VertexId::new).collect()
}

/// Build a turn-based game graph with vertices `0..num_vertices`.
///
/// Declares `is_final: bool`, `turn: int` and `act: int` (the action id of an edge is its
/// position in `edges`). Vertices listed in neither `player_1` nor `player_2` keep the
/// default `turn` value `0`.
pub fn mk_game_graph(
    num_vertices: usize,
    edges: &[(usize, usize)],
    finals: &[usize],
    player_1: &[usize],
    player_2: &[usize],
) -> GameResult<PropertyGraph> {
    let mut graph = PropertyGraph::with_properties(
        &[(IS_FINAL, PropertyType::Bool), (TURN, PropertyType::Int)],
        &[(ACT, PropertyType::Int)],
        &[],
    )?;
    if num_vertices > 0 {
        graph.add_vertices(num_vertices)?;
    }

    let pairs = edges
        .iter()
        .map(|(s, t)| (VertexId::new(*s), VertexId::new(*t)));
    let edge_ids = graph.add_edges(pairs)?;
    for (action, edge) in edge_ids.into_iter().enumerate() {
        graph.set_edge_property(ACT, edge, action as i64)?;
    }

    for v in finals {
        graph.set_vertex_property(IS_FINAL, VertexId::new(*v), true)?;
    }
    for v in player_1 {
        graph.set_vertex_property(TURN, VertexId::new(*v), 1)?;
    }
    for v in player_2 {
        graph.set_vertex_property(TURN, VertexId::new(*v), 2)?;
    }
    Ok(graph)
}

/// Wrap `graph` into a defined turn-based game.
pub fn mk_turn_based_game(graph: PropertyGraph) -> GameResult<Game> {
    let mut game = Game::new(GameKind::TurnBased);
    game.define(graph)?;
    Ok(game)
}

/// Build a game graph from compact random data: `owners[i]` decides whether vertex `i` is
/// owned by player 1 and `finals[i]` whether it is final.
pub fn mk_random_game_graph(
    owners: &[bool],
    finals: &[bool],
    edges: &[(usize, usize)],
) -> GameResult<PropertyGraph> {
    let n = owners.len();
    let final_vertices = (0..n).filter(|i| finals[*i]).collect::<Vec<_>>();
    let player_1 = (0..n).filter(|i| owners[*i]).collect::<Vec<_>>();
    let player_2 = (0..n).filter(|i| !owners[*i]).collect::<Vec<_>>();
    mk_game_graph(n, edges, &final_vertices, &player_1, &player_2)
}
