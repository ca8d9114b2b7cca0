use crate::property_graph::{
    PropertyColumn, PropertyGraph, PropertyScope, PropertyType, PropertyValue, VertexId,
};
use crate::{GameError, GameResult};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// A named boolean vertex property layered over a shared game graph.
///
/// The overlay stores its values outside of the graph, so every solver run owns its overlay
/// exclusively and never writes to properties of the caller. Reads and writes go through the
/// same accessors as [`PropertyGraph`] vertex properties, restricted to the overlay's name.
#[derive(Clone, Debug)]
pub struct WinningRegionOverlay {
    name: String,
    graph: Arc<PropertyGraph>,
    column: PropertyColumn,
}

impl WinningRegionOverlay {
    /// Preferred name of the overlay created by
    /// [`AttractorSolver`](crate::attractor::AttractorSolver).
    pub const DEFAULT_NAME: &'static str = "win1";

    /// The first of `base`, `base_1`, `base_2`, ... that is not declared on `graph`.
    pub fn free_name(graph: &PropertyGraph, base: &str) -> String {
        let mut name = base.to_string();
        let mut suffix = 0usize;
        while graph.property_scope(&name).is_some() {
            suffix += 1;
            name = format!("{base}_{suffix}");
        }
        name
    }

    /// A new overlay with every vertex unmarked.
    ///
    /// Fails with [`GameError::PropertyNameConflict`] if the graph already declares a property
    /// called `name` (in any scope). Use [`WinningRegionOverlay::free_name`] to pick a name
    /// that cannot conflict.
    pub fn new(graph: Arc<PropertyGraph>, name: &str) -> GameResult<WinningRegionOverlay> {
        if let Some(existing) = graph.property_scope(name) {
            return Err(GameError::PropertyNameConflict {
                name: name.to_string(),
                existing,
            });
        }

        let column = PropertyColumn::new(PropertyType::Bool, graph.vertex_capacity());
        Ok(WinningRegionOverlay {
            name: name.to_string(),
            graph,
            column,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn graph(&self) -> &PropertyGraph {
        &self.graph
    }

    /// All vertices of the underlying graph, marked or not.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.graph.vertices()
    }

    pub fn has_vertex_property(&self, name: &str, value_type: Option<PropertyType>) -> bool {
        name == self.name && value_type.is_none_or(|t| t == PropertyType::Bool)
    }

    pub fn get_vertex_property(&self, name: &str, vertex: VertexId) -> GameResult<PropertyValue> {
        self.check_name(name)?;
        self.check_vertex(vertex)?;
        Ok(PropertyValue::Bool(self.is_marked(vertex)))
    }

    /// Values of the overlay for all vertices of the graph.
    pub fn get_vertex_property_map(
        &self,
        name: &str,
    ) -> GameResult<BTreeMap<VertexId, PropertyValue>> {
        self.check_name(name)?;
        Ok(self
            .vertices()
            .map(|v| (v, PropertyValue::Bool(self.is_marked(v))))
            .collect())
    }

    pub fn set_vertex_property<V: Into<PropertyValue>>(
        &mut self,
        name: &str,
        vertex: VertexId,
        value: V,
    ) -> GameResult<()> {
        self.check_name(name)?;
        self.check_vertex(vertex)?;
        self.column
            .set(vertex.index(), value.into())
            .map_err(|found| GameError::TypeMismatch {
                name: name.to_string(),
                expected: PropertyType::Bool,
                found,
            })
    }

    pub fn is_marked(&self, vertex: VertexId) -> bool {
        self.column.get_bool(vertex.index()).unwrap_or(false)
    }

    /// The set of marked vertices.
    pub fn marked(&self) -> BTreeSet<VertexId> {
        self.vertices().filter(|v| self.is_marked(*v)).collect()
    }

    pub(crate) fn mark(&mut self, vertex: VertexId) {
        self.column.set_bool(vertex.index(), true);
    }

    fn check_name(&self, name: &str) -> GameResult<()> {
        if name == self.name {
            Ok(())
        } else {
            Err(GameError::UnknownProperty {
                name: name.to_string(),
                scope: PropertyScope::Vertex,
            })
        }
    }

    fn check_vertex(&self, vertex: VertexId) -> GameResult<()> {
        if self.graph.contains_vertex(vertex) {
            Ok(())
        } else {
            Err(GameError::VertexNotFound { vertex })
        }
    }
}
