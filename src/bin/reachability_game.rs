use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;
use reachability_games::GameResult;
use reachability_games::attractor::AttractorSolver;
use reachability_games::game::{ACT, Game, GameKind, IS_FINAL, TURN};
use reachability_games::property_graph::{PropertyGraph, PropertyType, VertexId};

#[derive(Parser)]
#[command(name = "reachability_game")]
#[command(about = "Solve a small turn-based reachability game and print the winning region")]
struct Args {
    /// Cancel the solver after the given number of fixpoint iterations (0 = unlimited)
    #[arg(long, default_value_t = 0, require_equals = true)]
    max_iterations: usize,

    /// Logging verbosity (use -v for info, or -v=LEVEL for a specific level)
    #[arg(long, short = 'v', value_name = "LEVEL", num_args = 0..=1, default_missing_value = "info", require_equals = true)]
    verbose: Option<Option<LogLevel>>,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
        }
    }
}

/// Moves of the example game; the position of a move is its action id.
const EDGES: &[(usize, usize)] = &[
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
const FINAL: &[usize] = &[3, 4];
const PLAYER_1: &[usize] = &[0, 4, 6];

fn build_example_graph() -> GameResult<PropertyGraph> {
    let mut graph = PropertyGraph::with_properties(
        &[(IS_FINAL, PropertyType::Bool), (TURN, PropertyType::Int)],
        &[(ACT, PropertyType::Int)],
        &[],
    )?;
    let vertices = graph.add_vertices(8)?;
    let edges = graph.add_edges(
        EDGES
            .iter()
            .map(|(s, t)| (vertices[*s], vertices[*t])),
    )?;
    for (action, edge) in edges.into_iter().enumerate() {
        graph.set_edge_property(ACT, edge, action as i64)?;
    }
    for (index, vertex) in vertices.iter().enumerate() {
        let owner = if PLAYER_1.contains(&index) { 1 } else { 2 };
        graph.set_vertex_property(TURN, *vertex, owner)?;
        graph.set_vertex_property(IS_FINAL, *vertex, FINAL.contains(&index))?;
    }
    Ok(graph)
}

fn solve(max_iterations: usize) -> GameResult<()> {
    let graph = build_example_graph()?;
    println!("{graph}");
    for edge in graph.edges() {
        println!("  {edge} act={}", graph.get_edge_property(ACT, edge.id)?);
    }

    let mut game = Game::new(GameKind::TurnBased);
    game.define(graph)?;

    let mut solver = AttractorSolver::new(&game)?;
    solver.configure(true, false);
    if max_iterations > 0 {
        solver.set_max_iterations(max_iterations);
    }
    let win = solver.solve()?;

    let graph = game.graph()?;
    for vertex in graph.vertices() {
        println!(
            "Vertex {vertex}: turn={}, is_final={}, winning={}",
            graph.get_vertex_property(TURN, vertex)?,
            graph.get_vertex_property(IS_FINAL, vertex)?,
            win.contains(&vertex)
        );
    }

    let win = win.iter().map(VertexId::to_string).collect::<Vec<_>>();
    println!(
        "Winning region of player 1 ({} iterations): {{{}}}",
        solver.iterations().unwrap_or_default(),
        win.join(", ")
    );
    Ok(())
}

fn main() {
    let args = Args::parse();

    let log_level = match args.verbose {
        None => LevelFilter::Off,
        Some(None) => LevelFilter::Info,
        Some(Some(level)) => level.into(),
    };
    Builder::from_default_env().filter_level(log_level).init();

    if let Err(e) = solve(args.max_iterations) {
        eprintln!("Failed to solve the game: {e}");
        std::process::exit(1);
    }
}
