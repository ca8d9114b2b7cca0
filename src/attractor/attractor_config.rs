use crate::game::{IS_FINAL, Player, TURN};
use crate::property_graph::{PropertyGraph, VertexId};
use crate::{GameError, GameResult};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// A configuration object for the attractor fixpoint.
///
/// The configuration is extracted from a game graph once, before the fixpoint starts: the
/// owner of every vertex is decoded from the `turn` property and the final vertices are read
/// from `is_final`. The fixpoint itself only consults this typed view and the adjacency index
/// of the graph.
#[derive(Clone, Debug)]
pub struct AttractorConfig {
    /// The game graph. The graph is shared and cannot change while the fixpoint runs.
    pub graph: Arc<PropertyGraph>,
    /// The player who moves at each vertex.
    pub owners: BTreeMap<VertexId, Player>,
    /// Vertices marked by the `is_final` property.
    pub finals: BTreeSet<VertexId>,
    /// Cancel the procedure if it exceeds the specified number of iterations (default:
    /// `usize::MAX`). The final iteration that confirms the fixpoint counts as well.
    pub max_iterations: usize,
}

impl AttractorConfig {
    /// Create a new instance of [`AttractorConfig`] from a game graph.
    ///
    /// Fails with [`GameError::UnknownProperty`] if `turn` or `is_final` is not declared on
    /// vertices, with [`GameError::GameValidation`] if either has the wrong type, and with
    /// [`GameError::InvalidTurnValue`] for the first vertex whose `turn` is not `1` or `2`.
    pub fn new(graph: Arc<PropertyGraph>) -> GameResult<AttractorConfig> {
        let turn = graph.vertex_column(TURN)?;
        let is_final = graph.vertex_column(IS_FINAL)?;

        let mut owners = BTreeMap::new();
        let mut finals = BTreeSet::new();
        for vertex in graph.vertices() {
            let value = turn.get_int(vertex.index()).ok_or_else(|| ill_typed(TURN))?;
            let owner = Player::try_from(value)
                .map_err(|value| GameError::InvalidTurnValue { vertex, value })?;
            owners.insert(vertex, owner);

            if is_final
                .get_bool(vertex.index())
                .ok_or_else(|| ill_typed(IS_FINAL))?
            {
                finals.insert(vertex);
            }
        }

        Ok(AttractorConfig {
            graph,
            owners,
            finals,
            max_iterations: usize::MAX,
        })
    }

    pub fn owner(&self, vertex: VertexId) -> Option<Player> {
        self.owners.get(&vertex).copied()
    }

    /// Sources of edges ending in `vertex` (empty for vertices that are not in the graph).
    pub fn predecessors(&self, vertex: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.graph.predecessors(vertex).into_iter().flatten()
    }

    /// Targets of edges starting in `vertex` (empty for vertices that are not in the graph).
    pub fn successors(&self, vertex: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.graph.successors(vertex).into_iter().flatten()
    }
}

fn ill_typed(property: &str) -> GameError {
    GameError::GameValidation {
        property: property.to_string(),
        reason: "vertex property has the wrong type".to_string(),
    }
}
