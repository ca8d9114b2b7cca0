//! Directed multigraphs with named, typed properties.
//!
//! A [`PropertyGraph`] stores vertices and edges (self-loops and parallel edges are allowed)
//! and any number of properties attached to vertices, edges, or the graph itself. Every
//! property has a name that is unique within the graph (across all three scopes) and one of
//! the value types listed in [`PropertyType`]. Entities that exist when a property is
//! declared, and entities created later, start with the type's default value.
//!
//! # Handles
//!
//! Vertices and edges are identified by [`VertexId`] and [`EdgeId`] handles. Handles are
//! stable: removing an entity never changes the handles of other entities. Slots of removed
//! entities are recycled by later insertions, so a stale handle may eventually refer to
//! a new entity.
//!
//! # Example
//!
//! ```
//! use reachability_games::property_graph::{PropertyGraph, PropertyType, PropertyValue};
//!
//! let mut graph = PropertyGraph::new();
//! let v = graph.add_vertices(2).unwrap();
//! let e = graph.add_edge(v[0], v[1]).unwrap();
//!
//! graph.add_vertex_property("is_final", PropertyType::Bool).unwrap();
//! graph.add_edge_property("act", PropertyType::Int).unwrap();
//! graph.set_vertex_property("is_final", v[1], true).unwrap();
//! graph.set_edge_property("act", e, 7).unwrap();
//!
//! assert_eq!(graph.get_vertex_property("is_final", v[0]), Ok(PropertyValue::Bool(false)));
//! assert_eq!(graph.get_edge_property("act", e), Ok(PropertyValue::Int(7)));
//! assert_eq!(graph.in_neighbors(v[1]).unwrap().into_iter().collect::<Vec<_>>(), vec![v[0]]);
//! ```

mod arena;
mod property_store;
mod property_value;


use crate::property_graph::arena::SlotArena;
use crate::{GameError, GameResult};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};

pub(crate) use property_store::PropertyColumn;
use property_store::PropertyStore;
pub use property_value::{Opaque, PropertyScope, PropertyType, PropertyValue};

/// Handle of a vertex in a [`PropertyGraph`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VertexId(usize);

/// Handle of an edge in a [`PropertyGraph`]. Parallel edges have distinct handles.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeId(usize);

/// An edge together with its endpoints.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Edge {
    pub id: EdgeId,
    pub source: VertexId,
    pub target: VertexId,
}

#[derive(Clone, Debug, Default)]
struct VertexEntry {
    incoming: Vec<EdgeId>,
    outgoing: Vec<EdgeId>,
}

#[derive(Copy, Clone, Debug)]
struct EdgeEntry {
    source: VertexId,
    target: VertexId,
}

/// A directed multigraph with vertex, edge and graph properties.
///
/// Each vertex keeps the lists of its incoming and outgoing edges, so neighbor queries cost
/// time proportional to the vertex degree.
#[derive(Clone, Debug, Default)]
pub struct PropertyGraph {
    vertices: SlotArena<VertexEntry>,
    edges: SlotArena<EdgeEntry>,
    properties: PropertyStore,
}

impl VertexId {
    pub fn new(index: usize) -> VertexId {
        VertexId(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for VertexId {
    fn from(value: usize) -> Self {
        VertexId(value)
    }
}

impl Display for VertexId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl EdgeId {
    pub fn new(index: usize) -> EdgeId {
        EdgeId(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl Display for EdgeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}", self.0)
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Edge(source={}, target={})", self.source, self.target)
    }
}

impl PropertyGraph {
    /// An empty graph without properties.
    pub fn new() -> PropertyGraph {
        PropertyGraph::default()
    }

    /// An empty graph with the given vertex, edge and graph properties declared.
    pub fn with_properties(
        vertex_properties: &[(&str, PropertyType)],
        edge_properties: &[(&str, PropertyType)],
        graph_properties: &[(&str, PropertyType)],
    ) -> GameResult<PropertyGraph> {
        let mut graph = PropertyGraph::new();
        for (name, value_type) in vertex_properties {
            graph.add_vertex_property(name, *value_type)?;
        }
        for (name, value_type) in edge_properties {
            graph.add_edge_property(name, *value_type)?;
        }
        for (name, value_type) in graph_properties {
            graph.add_graph_property(name, *value_type)?;
        }
        Ok(graph)
    }

    /// Live vertices in ascending handle order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.iter().map(|(index, _)| VertexId(index))
    }

    /// Live edges in ascending handle order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges.iter().map(|(index, entry)| Edge {
            id: EdgeId(index),
            source: entry.source,
            target: entry.target,
        })
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Upper bound (exclusive) on the index of every live vertex handle.
    pub fn vertex_capacity(&self) -> usize {
        self.vertices.capacity()
    }

    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.vertices.contains(vertex.0)
    }

    pub fn contains_edge(&self, edge: EdgeId) -> bool {
        self.edges.contains(edge.0)
    }

    /// Look up the endpoints of `edge`.
    pub fn edge(&self, edge: EdgeId) -> GameResult<Edge> {
        let entry = self
            .edges
            .get(edge.0)
            .ok_or(GameError::EdgeNotFound { edge })?;
        Ok(Edge {
            id: edge,
            source: entry.source,
            target: entry.target,
        })
    }

    pub fn vertex_properties(&self) -> impl Iterator<Item = &str> + '_ {
        self.properties.names(PropertyScope::Vertex)
    }

    pub fn edge_properties(&self) -> impl Iterator<Item = &str> + '_ {
        self.properties.names(PropertyScope::Edge)
    }

    pub fn graph_properties(&self) -> impl Iterator<Item = &str> + '_ {
        self.properties.names(PropertyScope::Graph)
    }

    /// Names of all properties, regardless of scope.
    pub fn properties(&self) -> impl Iterator<Item = &str> + '_ {
        self.properties.all_names()
    }

    /// The scope in which `name` is declared, if any.
    pub fn property_scope(&self, name: &str) -> Option<PropertyScope> {
        self.properties.scope_of(name)
    }

    pub fn add_vertex(&mut self) -> VertexId {
        let index = self.vertices.insert(VertexEntry::default());
        for column in self.properties.columns_mut(PropertyScope::Vertex) {
            column.ensure_len(index + 1);
            column.reset(index);
        }
        VertexId(index)
    }

    /// Add `count` vertices. Fails with [`GameError::InvalidVertexCount`] when `count` is zero.
    pub fn add_vertices(&mut self, count: usize) -> GameResult<Vec<VertexId>> {
        if count == 0 {
            return Err(GameError::InvalidVertexCount { count });
        }
        Ok((0..count).map(|_| self.add_vertex()).collect())
    }

    /// Add an edge from `source` to `target`. Both vertices must be live.
    pub fn add_edge(&mut self, source: VertexId, target: VertexId) -> GameResult<EdgeId> {
        self.check_vertex(source)?;
        self.check_vertex(target)?;
        Ok(self.insert_edge(source, target))
    }

    /// Add one edge per `(source, target)` pair.
    ///
    /// All endpoints are checked before any edge is added, so on failure the graph
    /// is unchanged.
    pub fn add_edges<I>(&mut self, pairs: I) -> GameResult<Vec<EdgeId>>
    where
        I: IntoIterator<Item = (VertexId, VertexId)>,
    {
        let pairs = pairs.into_iter().collect::<Vec<_>>();
        for (source, target) in &pairs {
            self.check_vertex(*source)?;
            self.check_vertex(*target)?;
        }
        Ok(pairs
            .into_iter()
            .map(|(source, target)| self.insert_edge(source, target))
            .collect())
    }

    /// Remove `vertex` and every edge incident to it. Returns `false` (and does nothing)
    /// if the vertex is not live.
    pub fn remove_vertex(&mut self, vertex: VertexId) -> bool {
        let Some(entry) = self.vertices.get(vertex.0) else {
            return false;
        };

        // Self-loops appear in both lists.
        let incident = entry
            .incoming
            .iter()
            .chain(entry.outgoing.iter())
            .copied()
            .collect::<BTreeSet<_>>();
        for edge in incident {
            self.remove_edge(edge);
        }

        self.vertices.remove(vertex.0);
        for column in self.properties.columns_mut(PropertyScope::Vertex) {
            column.reset(vertex.0);
        }
        true
    }

    /// Remove every listed vertex that is live. The order of `vertices` does not matter.
    pub fn remove_vertices<I>(&mut self, vertices: I)
    where
        I: IntoIterator<Item = VertexId>,
    {
        for vertex in vertices {
            self.remove_vertex(vertex);
        }
    }

    /// Remove `edge`. Returns `false` (and does nothing) if the edge is not live.
    pub fn remove_edge(&mut self, edge: EdgeId) -> bool {
        let Some(entry) = self.edges.remove(edge.0) else {
            return false;
        };
        if let Some(source) = self.vertices.get_mut(entry.source.0) {
            source.outgoing.retain(|e| *e != edge);
        }
        if let Some(target) = self.vertices.get_mut(entry.target.0) {
            target.incoming.retain(|e| *e != edge);
        }
        for column in self.properties.columns_mut(PropertyScope::Edge) {
            column.reset(edge.0);
        }
        true
    }

    pub fn remove_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = EdgeId>,
    {
        for edge in edges {
            self.remove_edge(edge);
        }
    }

    pub fn add_vertex_property(&mut self, name: &str, value_type: PropertyType) -> GameResult<()> {
        let slots = self.vertices.capacity();
        self.properties
            .declare(name, PropertyScope::Vertex, value_type, slots)
    }

    pub fn add_edge_property(&mut self, name: &str, value_type: PropertyType) -> GameResult<()> {
        let slots = self.edges.capacity();
        self.properties
            .declare(name, PropertyScope::Edge, value_type, slots)
    }

    pub fn add_graph_property(&mut self, name: &str, value_type: PropertyType) -> GameResult<()> {
        self.properties
            .declare(name, PropertyScope::Graph, value_type, 0)
    }

    /// Check that a vertex property `name` exists and, if given, has type `value_type`.
    pub fn has_vertex_property(&self, name: &str, value_type: Option<PropertyType>) -> bool {
        self.has_property(name, PropertyScope::Vertex, value_type)
    }

    pub fn has_edge_property(&self, name: &str, value_type: Option<PropertyType>) -> bool {
        self.has_property(name, PropertyScope::Edge, value_type)
    }

    pub fn has_graph_property(&self, name: &str, value_type: Option<PropertyType>) -> bool {
        self.has_property(name, PropertyScope::Graph, value_type)
    }

    pub fn typeof_vertex_property(&self, name: &str) -> GameResult<PropertyType> {
        self.properties.value_type(name, PropertyScope::Vertex)
    }

    pub fn typeof_edge_property(&self, name: &str) -> GameResult<PropertyType> {
        self.properties.value_type(name, PropertyScope::Edge)
    }

    pub fn typeof_graph_property(&self, name: &str) -> GameResult<PropertyType> {
        self.properties.value_type(name, PropertyScope::Graph)
    }

    pub fn get_vertex_property(&self, name: &str, vertex: VertexId) -> GameResult<PropertyValue> {
        let column = self.vertex_column(name)?;
        self.check_vertex(vertex)?;
        Ok(column
            .get(vertex.0)
            .unwrap_or_else(|| column.value_type().default_value()))
    }

    /// Values of property `name` for all live vertices.
    pub fn get_vertex_property_map(
        &self,
        name: &str,
    ) -> GameResult<BTreeMap<VertexId, PropertyValue>> {
        let column = self.vertex_column(name)?;
        Ok(self
            .vertices()
            .map(|v| {
                let value = column
                    .get(v.0)
                    .unwrap_or_else(|| column.value_type().default_value());
                (v, value)
            })
            .collect())
    }

    pub fn set_vertex_property<V: Into<PropertyValue>>(
        &mut self,
        name: &str,
        vertex: VertexId,
        value: V,
    ) -> GameResult<()> {
        let column = self.properties.column_mut(name, PropertyScope::Vertex)?;
        if !self.vertices.contains(vertex.0) {
            return Err(GameError::VertexNotFound { vertex });
        }
        column
            .set(vertex.0, value.into())
            .map_err(|found| GameError::TypeMismatch {
                name: name.to_string(),
                expected: column.value_type(),
                found,
            })
    }

    pub fn get_edge_property(&self, name: &str, edge: EdgeId) -> GameResult<PropertyValue> {
        let column = self.properties.column(name, PropertyScope::Edge)?;
        self.check_edge(edge)?;
        Ok(column
            .get(edge.0)
            .unwrap_or_else(|| column.value_type().default_value()))
    }

    /// Values of property `name` for all live edges.
    pub fn get_edge_property_map(&self, name: &str) -> GameResult<BTreeMap<EdgeId, PropertyValue>> {
        let column = self.properties.column(name, PropertyScope::Edge)?;
        Ok(self
            .edges
            .iter()
            .map(|(index, _)| {
                let value = column
                    .get(index)
                    .unwrap_or_else(|| column.value_type().default_value());
                (EdgeId(index), value)
            })
            .collect())
    }

    pub fn set_edge_property<V: Into<PropertyValue>>(
        &mut self,
        name: &str,
        edge: EdgeId,
        value: V,
    ) -> GameResult<()> {
        let column = self.properties.column_mut(name, PropertyScope::Edge)?;
        if !self.edges.contains(edge.0) {
            return Err(GameError::EdgeNotFound { edge });
        }
        column
            .set(edge.0, value.into())
            .map_err(|found| GameError::TypeMismatch {
                name: name.to_string(),
                expected: column.value_type(),
                found,
            })
    }

    pub fn get_graph_property(&self, name: &str) -> GameResult<PropertyValue> {
        self.properties.graph_value(name).cloned()
    }

    pub fn set_graph_property<V: Into<PropertyValue>>(
        &mut self,
        name: &str,
        value: V,
    ) -> GameResult<()> {
        self.properties.set_graph_value(name, value.into())
    }

    /// Handles of edges ending in `vertex`.
    pub fn in_edges(&self, vertex: VertexId) -> GameResult<impl Iterator<Item = EdgeId> + '_> {
        Ok(self.vertex_entry(vertex)?.incoming.iter().copied())
    }

    /// Handles of edges starting in `vertex`.
    pub fn out_edges(&self, vertex: VertexId) -> GameResult<impl Iterator<Item = EdgeId> + '_> {
        Ok(self.vertex_entry(vertex)?.outgoing.iter().copied())
    }

    /// Sources of all edges ending in `vertex`, once per edge (a source connected by parallel
    /// edges is repeated).
    pub fn predecessors(
        &self,
        vertex: VertexId,
    ) -> GameResult<impl Iterator<Item = VertexId> + '_> {
        Ok(self
            .vertex_entry(vertex)?
            .incoming
            .iter()
            .filter_map(move |e| self.edges.get(e.0).map(|entry| entry.source)))
    }

    /// Targets of all edges starting in `vertex`, once per edge (a target connected by
    /// parallel edges is repeated).
    pub fn successors(&self, vertex: VertexId) -> GameResult<impl Iterator<Item = VertexId> + '_> {
        Ok(self
            .vertex_entry(vertex)?
            .outgoing
            .iter()
            .filter_map(move |e| self.edges.get(e.0).map(|entry| entry.target)))
    }

    /// The set of vertices with an edge into `vertex`.
    pub fn in_neighbors(&self, vertex: VertexId) -> GameResult<BTreeSet<VertexId>> {
        Ok(self.predecessors(vertex)?.collect())
    }

    /// The set of vertices reachable from `vertex` by one edge.
    pub fn out_neighbors(&self, vertex: VertexId) -> GameResult<BTreeSet<VertexId>> {
        Ok(self.successors(vertex)?.collect())
    }

    pub(crate) fn vertex_column(&self, name: &str) -> GameResult<&PropertyColumn> {
        self.properties.column(name, PropertyScope::Vertex)
    }

    fn has_property(
        &self,
        name: &str,
        scope: PropertyScope,
        value_type: Option<PropertyType>,
    ) -> bool {
        match self.properties.value_type(name, scope) {
            Ok(declared) => value_type.is_none_or(|expected| expected == declared),
            Err(_) => false,
        }
    }

    fn insert_edge(&mut self, source: VertexId, target: VertexId) -> EdgeId {
        let edge = EdgeId(self.edges.insert(EdgeEntry { source, target }));
        if let Some(entry) = self.vertices.get_mut(source.0) {
            entry.outgoing.push(edge);
        }
        if let Some(entry) = self.vertices.get_mut(target.0) {
            entry.incoming.push(edge);
        }
        for column in self.properties.columns_mut(PropertyScope::Edge) {
            column.ensure_len(edge.0 + 1);
            column.reset(edge.0);
        }
        edge
    }

    fn vertex_entry(&self, vertex: VertexId) -> GameResult<&VertexEntry> {
        self.vertices
            .get(vertex.0)
            .ok_or(GameError::VertexNotFound { vertex })
    }

    fn check_vertex(&self, vertex: VertexId) -> GameResult<()> {
        self.vertex_entry(vertex).map(|_| ())
    }

    fn check_edge(&self, edge: EdgeId) -> GameResult<()> {
        if self.edges.contains(edge.0) {
            Ok(())
        } else {
            Err(GameError::EdgeNotFound { edge })
        }
    }
}

impl Display for PropertyGraph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let names = |scope: PropertyScope| {
            self.properties
                .names(scope)
                .map(|name| format!("'{name}'"))
                .collect::<Vec<_>>()
                .join(", ")
        };
        write!(
            f,
            "Graph(|V|={}, |E|={}, vprops=[{}], eprops=[{}], gprops=[{}])",
            self.num_vertices(),
            self.num_edges(),
            names(PropertyScope::Vertex),
            names(PropertyScope::Edge),
            names(PropertyScope::Graph),
        )
    }
}
