use crate::attractor::{AttractorConfig, AttractorSolver, WinningRegionOverlay};
use crate::game::{ACT, Game, GameKind, IS_FINAL, TURN};
use crate::property_graph::{PropertyGraph, PropertyScope, PropertyType, PropertyValue, VertexId};
use crate::test_utils::example_game::{NUM_VERTICES, create_example_graph, sets};
use crate::test_utils::naive_attractor::naive_winning_region;
use crate::test_utils::{init_logger, mk_game_graph, mk_turn_based_game, vertex_set};
use crate::{GameError, GameResult};
use std::sync::Arc;

fn v(index: usize) -> VertexId {
    VertexId::new(index)
}

#[test]
fn example_winning_region() -> GameResult<()> {
    init_logger();
    let game = mk_turn_based_game(create_example_graph()?)?;
    let mut solver = AttractorSolver::new(&game)?;

    let win = solver.solve()?;
    assert_eq!(win, vertex_set(sets::WIN_1));
    assert!(win.is_superset(&vertex_set(sets::FINAL)));
    // Player 2 escapes from 1 to 2, and 2 keeps the play in its self-loop.
    assert!(!win.contains(&v(1)));
    assert!(!win.contains(&v(2)));

    // Four expanding iterations and one that confirms the fixpoint.
    assert_eq!(solver.iterations(), Some(5));
    assert_eq!(win, naive_winning_region(game.graph()?));
    Ok(())
}

#[test]
fn results_require_a_run() -> GameResult<()> {
    let game = mk_turn_based_game(create_example_graph()?)?;
    let mut solver = AttractorSolver::new(&game)?;
    assert!(matches!(solver.winning_region_1(), Err(GameError::NotReady(_))));
    assert!(solver.overlay().is_none());
    assert_eq!(solver.iterations(), None);

    solver.run()?;
    assert!(solver.winning_region_1().is_ok());

    // A run that computes nothing discards the previous result.
    solver.configure(false, false);
    solver.run()?;
    assert!(matches!(solver.winning_region_1(), Err(GameError::NotReady(_))));
    Ok(())
}

#[test]
fn winning_region_2_is_unsupported() -> GameResult<()> {
    init_logger();
    let game = mk_turn_based_game(create_example_graph()?)?;
    let mut solver = AttractorSolver::new(&game)?;
    assert!(solver.compute_win1());
    assert!(solver.compute_win2());

    solver.configure(true, false);
    assert!(!solver.compute_win2());
    solver.configure(true, true);
    assert!(solver.compute_win2());

    assert_eq!(solver.solve()?, vertex_set(sets::WIN_1));
    assert!(matches!(solver.winning_region_2(), Err(GameError::Unsupported(_))));
    Ok(())
}

#[test]
fn rerun_is_idempotent() -> GameResult<()> {
    let game = mk_turn_based_game(create_example_graph()?)?;
    let mut solver = AttractorSolver::new(&game)?;
    let first = solver.solve()?;
    let second = solver.solve()?;
    assert_eq!(first, second);

    let mut other = AttractorSolver::new(&game)?;
    assert_eq!(other.solve()?, first);
    Ok(())
}

#[test]
fn caller_properties_are_untouched() -> GameResult<()> {
    let graph = Arc::new(create_example_graph()?);
    let finals_before = graph.get_vertex_property_map(IS_FINAL)?;
    let turns_before = graph.get_vertex_property_map(TURN)?;
    let properties_before = graph.properties().map(str::to_string).collect::<Vec<_>>();

    let mut game = Game::new(GameKind::TurnBased);
    game.define(graph.clone())?;
    AttractorSolver::new(&game)?.solve()?;

    assert_eq!(graph.get_vertex_property_map(IS_FINAL)?, finals_before);
    assert_eq!(graph.get_vertex_property_map(TURN)?, turns_before);
    assert_eq!(
        graph.properties().map(str::to_string).collect::<Vec<_>>(),
        properties_before
    );
    assert!(!graph.has_vertex_property(WinningRegionOverlay::DEFAULT_NAME, None));
    Ok(())
}

#[test]
fn player_2_dead_end_is_not_attracted() -> GameResult<()> {
    init_logger();
    // 0: player 2 dead end, 1: final, 2: player 2 with a single move to 1,
    // 3: player 1 dead end, 4: player 1 with moves to 0 and 3.
    let graph = mk_game_graph(5, &[(2, 1), (4, 0), (4, 3)], &[1], &[1, 3, 4], &[0, 2])?;
    let game = mk_turn_based_game(graph)?;

    let win = AttractorSolver::new(&game)?.solve()?;
    assert_eq!(win, vertex_set(&[1, 2]));
    Ok(())
}

#[test]
fn final_dead_ends_are_winning() -> GameResult<()> {
    // Final vertices win even without moves; their predecessors follow.
    let graph = mk_game_graph(3, &[(0, 1), (2, 0)], &[1], &[0], &[1, 2])?;
    let game = mk_turn_based_game(graph)?;
    assert_eq!(AttractorSolver::new(&game)?.solve()?, vertex_set(&[0, 1, 2]));
    Ok(())
}

#[test]
fn no_final_vertices_means_empty_region() -> GameResult<()> {
    let graph = mk_game_graph(3, &[(0, 1), (1, 2), (2, 0)], &[], &[0, 1], &[2])?;
    let game = mk_turn_based_game(graph)?;
    let mut solver = AttractorSolver::new(&game)?;
    assert!(solver.solve()?.is_empty());
    assert_eq!(solver.iterations(), Some(1));
    Ok(())
}

#[test]
fn empty_game_has_empty_region() -> GameResult<()> {
    let game = mk_turn_based_game(mk_game_graph(0, &[], &[], &[], &[])?)?;
    assert!(AttractorSolver::new(&game)?.solve()?.is_empty());
    Ok(())
}

#[test]
fn solver_handles_removed_vertices() -> GameResult<()> {
    let mut graph = create_example_graph()?;
    assert!(graph.remove_vertex(v(1)));
    assert!(graph.remove_vertex(v(6)));
    let expected = naive_winning_region(&graph);
    // Without 6, vertex 5 has a single move into the final vertex 3.
    assert_eq!(expected, vertex_set(&[0, 3, 4, 5, 7]));

    let game = mk_turn_based_game(graph)?;
    assert_eq!(AttractorSolver::new(&game)?.solve()?, expected);
    Ok(())
}

#[test]
fn solver_requires_defined_turn_based_game() -> GameResult<()> {
    let undefined = Game::new(GameKind::TurnBased);
    assert!(matches!(
        AttractorSolver::new(&undefined),
        Err(GameError::NotReady(_))
    ));

    let mut concurrent = Game::new(GameKind::Concurrent);
    concurrent.define(create_example_graph()?)?;
    assert!(matches!(
        AttractorSolver::new(&concurrent),
        Err(GameError::Unsupported(_))
    ));

    // A concurrent game graph does not need `turn`, but the solver does.
    let graph = PropertyGraph::with_properties(
        &[(IS_FINAL, PropertyType::Bool)],
        &[(ACT, PropertyType::Int)],
        &[],
    )?;
    let mut concurrent = Game::new(GameKind::Concurrent);
    concurrent.define(graph)?;
    assert!(matches!(
        AttractorSolver::new(&concurrent),
        Err(GameError::Unsupported(_))
    ));
    Ok(())
}

#[test]
fn solver_rejects_turn_values_outside_domain() -> GameResult<()> {
    init_logger();
    let mut graph = create_example_graph()?;
    graph.set_vertex_property(TURN, v(2), 3)?;
    let game = mk_turn_based_game(graph)?;

    match AttractorSolver::new(&game) {
        Err(GameError::GameValidation { property, reason }) => {
            assert_eq!(property, TURN);
            assert!(reason.contains("vertex 2"), "{reason}");
        }
        other => panic!("Expected a validation error, got {other:?}"),
    }

    // Vertices without an owner keep the default turn value 0.
    let graph = mk_game_graph(NUM_VERTICES, &[], &[], &[], &[])?;
    let game = mk_turn_based_game(graph)?;
    assert!(matches!(
        AttractorSolver::new(&game),
        Err(GameError::GameValidation { .. })
    ));
    Ok(())
}

#[test]
fn config_reports_invalid_turn_value() -> GameResult<()> {
    let mut graph = create_example_graph()?;
    graph.set_vertex_property(TURN, v(5), -1)?;
    graph.set_vertex_property(TURN, v(6), 7)?;

    assert_eq!(
        AttractorConfig::new(Arc::new(graph)).err(),
        Some(GameError::InvalidTurnValue {
            vertex: v(5),
            value: -1,
        })
    );
    Ok(())
}

#[test]
fn config_requires_typed_properties() -> GameResult<()> {
    let graph = PropertyGraph::with_properties(&[(TURN, PropertyType::Int)], &[], &[])?;
    assert_eq!(
        AttractorConfig::new(Arc::new(graph)).err(),
        Some(GameError::UnknownProperty {
            name: IS_FINAL.to_string(),
            scope: PropertyScope::Vertex,
        })
    );

    let mut graph = PropertyGraph::with_properties(
        &[(TURN, PropertyType::Int), (IS_FINAL, PropertyType::Int)],
        &[],
        &[],
    )?;
    let vertex = graph.add_vertex();
    graph.set_vertex_property(TURN, vertex, 1)?;
    assert!(matches!(
        AttractorConfig::new(Arc::new(graph)),
        Err(GameError::GameValidation { .. })
    ));
    Ok(())
}

#[test]
fn overlay_avoids_caller_property_names() -> GameResult<()> {
    init_logger();
    let mut graph = create_example_graph()?;
    graph.add_vertex_property(WinningRegionOverlay::DEFAULT_NAME, PropertyType::Bool)?;
    graph.add_edge_property("win1_1", PropertyType::Int)?;
    graph.set_vertex_property(WinningRegionOverlay::DEFAULT_NAME, v(1), true)?;
    let game = mk_turn_based_game(graph)?;

    let mut solver = AttractorSolver::new(&game)?;
    assert_eq!(solver.solve()?, vertex_set(sets::WIN_1));
    assert_eq!(solver.overlay().map(WinningRegionOverlay::name), Some("win1_2"));

    // The caller's `win1` property is neither read nor written by the solver.
    let graph = game.graph()?;
    assert_eq!(
        graph.get_vertex_property(WinningRegionOverlay::DEFAULT_NAME, v(1)),
        Ok(PropertyValue::Bool(true))
    );
    assert_eq!(
        graph.get_vertex_property(WinningRegionOverlay::DEFAULT_NAME, v(0)),
        Ok(PropertyValue::Bool(false))
    );
    Ok(())
}

#[test]
fn max_iterations_cancels_run() -> GameResult<()> {
    init_logger();
    let game = mk_turn_based_game(create_example_graph()?)?;
    let mut solver = AttractorSolver::new(&game)?;

    solver.set_max_iterations(4);
    assert!(matches!(solver.run(), Err(GameError::Cancelled(_))));
    assert!(solver.winning_region_1().is_err());

    solver.set_max_iterations(5);
    assert_eq!(solver.solve()?, vertex_set(sets::WIN_1));
    Ok(())
}
