use crate::property_graph::{EdgeId, PropertyScope, PropertyType, VertexId};
use cancel_this::Cancelled;

/// Errors reported by graph, game and solver operations.
///
/// Every variant carries the offending name, value or handle. Operations that fail leave
/// the object they were called on unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Vertex count must be positive, got {count}")]
    InvalidVertexCount { count: usize },

    #[error("Property `{name}` is already declared (as a {existing} property)")]
    PropertyNameConflict {
        name: String,
        existing: PropertyScope,
    },

    #[error("Invalid property type `{tag}` (expected one of bool, int, float, string, object)")]
    InvalidPropertyType { tag: String },

    #[error("Unknown {scope} property `{name}`")]
    UnknownProperty { name: String, scope: PropertyScope },

    #[error("Property `{name}` has type {expected}, cannot store a {found} value")]
    TypeMismatch {
        name: String,
        expected: PropertyType,
        found: PropertyType,
    },

    #[error("Vertex {vertex} is not in the graph")]
    VertexNotFound { vertex: VertexId },

    #[error("Edge {edge} is not in the graph")]
    EdgeNotFound { edge: EdgeId },

    #[error("Game validation failed on property `{property}`: {reason}")]
    GameValidation { property: String, reason: String },

    #[error("Vertex {vertex} has turn value {value} (expected 1 or 2)")]
    InvalidTurnValue { vertex: VertexId, value: i64 },

    #[error("Not ready: {0}")]
    NotReady(&'static str),

    #[error("Unsupported: {0}")]
    Unsupported(&'static str),

    #[error("Computation cancelled: {0}")]
    Cancelled(Cancelled),
}

impl From<Cancelled> for GameError {
    fn from(value: Cancelled) -> Self {
        GameError::Cancelled(value)
    }
}

/// Shorthand for results carrying a [`GameError`].
pub type GameResult<T> = Result<T, GameError>;
