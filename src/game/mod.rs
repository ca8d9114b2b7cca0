//! Two-player game definitions on top of [`PropertyGraph`].
//!
//! A game graph must declare:
//!
//! - a vertex property [`IS_FINAL`] of type `bool` marking the target vertices,
//! - an edge property [`ACT`] of type `int` labelling moves with action ids,
//! - for [`GameKind::TurnBased`] games, a vertex property [`TURN`] of type `int` holding
//!   the player (`1` or `2`) who moves at each vertex.
//!
//! Once defined, the graph is shared immutably (through an [`Arc`]) with every solver
//! created for the game, so it cannot change while a solver works on it.


use crate::property_graph::{PropertyGraph, PropertyScope, PropertyType};
use crate::{GameError, GameResult};
use log::debug;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Name of the vertex property marking final (target) vertices.
pub const IS_FINAL: &str = "is_final";
/// Name of the vertex property holding the owner of each vertex in turn-based games.
pub const TURN: &str = "turn";
/// Name of the edge property holding the action id of each move.
pub const ACT: &str = "act";

/// Whether players move simultaneously or one at a time.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameKind {
    #[default]
    Concurrent,
    TurnBased,
}

/// A player of a two-player game. In turn-based games, vertices store their owner as the
/// integer `1` or `2`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Player {
    One,
    Two,
}

/// A deterministic two-player game, possibly not yet defined.
#[derive(Clone, Debug, Default)]
pub struct Game {
    kind: GameKind,
    graph: Option<Arc<PropertyGraph>>,
}

impl Display for GameKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GameKind::Concurrent => write!(f, "Concurrent"),
            GameKind::TurnBased => write!(f, "Turn-based"),
        }
    }
}

impl Player {
    /// The value of the `turn` property for vertices owned by this player.
    pub fn turn_value(&self) -> i64 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

impl TryFrom<i64> for Player {
    /// The rejected `turn` value.
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            other => Err(other),
        }
    }
}

impl Game {
    /// A new, undefined game of the given kind.
    pub fn new(kind: GameKind) -> Game {
        Game { kind, graph: None }
    }

    pub fn kind(&self) -> GameKind {
        self.kind
    }

    pub fn is_defined(&self) -> bool {
        self.graph.is_some()
    }

    /// Define the game by its graph.
    ///
    /// Fails with [`GameError::GameValidation`] naming the first missing or ill-typed
    /// property; the game is left unchanged in that case.
    pub fn define<G: Into<Arc<PropertyGraph>>>(&mut self, graph: G) -> GameResult<()> {
        let graph = graph.into();
        Self::validate_graph(self.kind, &graph)?;
        debug!(
            "{} game defined on graph with {} vertices and {} edges.",
            self.kind,
            graph.num_vertices(),
            graph.num_edges()
        );
        self.graph = Some(graph);
        Ok(())
    }

    /// The game graph. Fails with [`GameError::NotReady`] if the game is not defined.
    pub fn graph(&self) -> GameResult<&PropertyGraph> {
        self.graph
            .as_deref()
            .ok_or(GameError::NotReady("game graph is not defined"))
    }

    /// A shared handle to the game graph.
    pub fn shared_graph(&self) -> GameResult<Arc<PropertyGraph>> {
        self.graph
            .clone()
            .ok_or(GameError::NotReady("game graph is not defined"))
    }

    /// Check that `graph` declares every property a game of `kind` requires.
    pub fn validate_graph(kind: GameKind, graph: &PropertyGraph) -> GameResult<()> {
        if kind == GameKind::TurnBased {
            require(
                TURN,
                PropertyScope::Vertex,
                PropertyType::Int,
                graph.typeof_vertex_property(TURN).ok(),
            )?;
        }
        require(
            IS_FINAL,
            PropertyScope::Vertex,
            PropertyType::Bool,
            graph.typeof_vertex_property(IS_FINAL).ok(),
        )?;
        require(
            ACT,
            PropertyScope::Edge,
            PropertyType::Int,
            graph.typeof_edge_property(ACT).ok(),
        )
    }
}

fn require(
    name: &str,
    scope: PropertyScope,
    expected: PropertyType,
    declared: Option<PropertyType>,
) -> GameResult<()> {
    match declared {
        Some(found) if found == expected => Ok(()),
        Some(found) => Err(GameError::GameValidation {
            property: name.to_string(),
            reason: format!("expected a {scope} property of type {expected}, found {found}"),
        }),
        None => Err(GameError::GameValidation {
            property: name.to_string(),
            reason: format!("missing {scope} property of type {expected}"),
        }),
    }
}
