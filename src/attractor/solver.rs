use crate::attractor::{AttractorConfig, AttractorState, WinningRegionOverlay, ZielonkaAttractor};
use crate::game::{Game, GameKind, TURN};
use crate::property_graph::{PropertyGraph, PropertyValue, VertexId};
use crate::{GameError, GameResult, log_region};
use computation_process::{Computable, Stateful};
use log::{info, warn};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Computes the winning region of player 1 in a turn-based reachability game.
///
/// The solver is bound to the graph of one defined game. Every call to [`AttractorSolver::run`]
/// creates a fresh [`WinningRegionOverlay`], so results of earlier runs are discarded and
/// the caller's properties are never written.
#[derive(Clone, Debug)]
pub struct AttractorSolver {
    graph: Arc<PropertyGraph>,
    compute_win1: bool,
    compute_win2: bool,
    max_iterations: usize,
    overlay: Option<WinningRegionOverlay>,
    iterations: Option<usize>,
}

impl AttractorSolver {
    /// Bind a new solver to `game`.
    ///
    /// Fails with [`GameError::NotReady`] if the game is not defined, with
    /// [`GameError::Unsupported`] if it is not turn-based, and with
    /// [`GameError::GameValidation`] if the graph lacks a bool `is_final` or an int `turn`
    /// vertex property, or if some `turn` value is not `1` or `2`.
    pub fn new(game: &Game) -> GameResult<AttractorSolver> {
        let graph = game.shared_graph()?;
        if game.kind() != GameKind::TurnBased {
            return Err(GameError::Unsupported(
                "only turn-based games can be solved by the attractor solver",
            ));
        }

        Game::validate_graph(GameKind::TurnBased, &graph)?;
        for vertex in graph.vertices() {
            match graph.get_vertex_property(TURN, vertex)? {
                PropertyValue::Int(1 | 2) => (),
                value => {
                    return Err(GameError::GameValidation {
                        property: TURN.to_string(),
                        reason: format!("vertex {vertex} has value {value:?}, expected 1 or 2"),
                    });
                }
            }
        }

        Ok(AttractorSolver {
            graph,
            compute_win1: true,
            compute_win2: true,
            max_iterations: usize::MAX,
            overlay: None,
            iterations: None,
        })
    }

    /// Choose which winning regions the next run computes (both are requested by default).
    ///
    /// Only the winning region of player 1 is implemented; requesting the region of player 2
    /// is recorded but has no effect.
    pub fn configure(&mut self, compute_win1: bool, compute_win2: bool) {
        if compute_win2 {
            warn!("Winning region of player 2 is not supported; the option is ignored.");
        }
        self.compute_win1 = compute_win1;
        self.compute_win2 = compute_win2;
    }

    /// Cancel subsequent runs after `max_iterations` fixpoint iterations.
    pub fn set_max_iterations(&mut self, max_iterations: usize) {
        self.max_iterations = max_iterations;
    }

    pub fn compute_win1(&self) -> bool {
        self.compute_win1
    }

    pub fn compute_win2(&self) -> bool {
        self.compute_win2
    }

    pub fn graph(&self) -> &PropertyGraph {
        &self.graph
    }

    /// Run the attractor fixpoint, replacing the result of any previous run.
    ///
    /// On failure (including cancellation), no result is available until the next
    /// successful run.
    pub fn run(&mut self) -> GameResult<()> {
        self.overlay = None;
        self.iterations = None;
        if !self.compute_win1 {
            info!("Attractor solver has nothing to compute.");
            return Ok(());
        }

        let mut config = AttractorConfig::new(self.graph.clone())?;
        config.max_iterations = self.max_iterations;
        let initial = AttractorState::try_from(&config)?;
        info!(
            "Attractor solver started with {} final vertices ({}).",
            config.finals.len(),
            log_region(&config.finals)
        );

        let mut computation = ZielonkaAttractor::configure(config, initial);
        let overlay = computation.compute()?;
        let iterations = computation.state().iteration;

        info!(
            "Attractor solver finished after {} iterations with {} winning vertices.",
            iterations,
            overlay.marked().len()
        );
        self.overlay = Some(overlay);
        self.iterations = Some(iterations);
        Ok(())
    }

    /// Run the solver and return the winning region of player 1.
    pub fn solve(&mut self) -> GameResult<BTreeSet<VertexId>> {
        self.run()?;
        self.winning_region_1()
    }

    /// Vertices from which player 1 can force a visit to a final vertex.
    ///
    /// Fails with [`GameError::NotReady`] if the solver has not completed a run that
    /// computes this region.
    pub fn winning_region_1(&self) -> GameResult<BTreeSet<VertexId>> {
        self.overlay
            .as_ref()
            .map(WinningRegionOverlay::marked)
            .ok_or(GameError::NotReady("winning region of player 1 is not computed"))
    }

    /// Always fails with [`GameError::Unsupported`].
    pub fn winning_region_2(&self) -> GameResult<BTreeSet<VertexId>> {
        Err(GameError::Unsupported("winning region of player 2"))
    }

    /// The overlay produced by the last successful run.
    pub fn overlay(&self) -> Option<&WinningRegionOverlay> {
        self.overlay.as_ref()
    }

    /// Number of fixpoint iterations of the last successful run, including the final
    /// iteration that found no new vertices.
    pub fn iterations(&self) -> Option<usize> {
        self.iterations
    }
}
