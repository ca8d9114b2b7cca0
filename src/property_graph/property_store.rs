use crate::property_graph::{Opaque, PropertyScope, PropertyType, PropertyValue};
use crate::{GameError, GameResult};
use std::collections::BTreeMap;

/// Values of one vertex or edge property, indexed by entity slot.
///
/// A column is typed: every value it holds has the column's [`PropertyType`]. Values
/// passed to [`PropertyColumn::set`] are coerced first.
#[derive(Clone, Debug)]
pub(crate) enum PropertyColumn {
    Bool(Vec<bool>),
    Int(Vec<i64>),
    Float(Vec<f64>),
    String(Vec<String>),
    Opaque(Vec<Opaque>),
}

#[derive(Clone, Debug)]
enum PropertyEntry {
    Vertex(PropertyColumn),
    Edge(PropertyColumn),
    Graph(PropertyValue),
}

/// All properties of one graph, keyed by name.
///
/// Names are unique across scopes: a name declared for vertices cannot be declared
/// again for edges or for the graph.
#[derive(Clone, Debug, Default)]
pub(crate) struct PropertyStore {
    entries: BTreeMap<String, PropertyEntry>,
}

impl PropertyColumn {
    /// A column of `len` default values.
    pub fn new(value_type: PropertyType, len: usize) -> PropertyColumn {
        match value_type {
            PropertyType::Bool => PropertyColumn::Bool(vec![false; len]),
            PropertyType::Int => PropertyColumn::Int(vec![0; len]),
            PropertyType::Float => PropertyColumn::Float(vec![0.0; len]),
            PropertyType::String => PropertyColumn::String(vec![String::new(); len]),
            PropertyType::Opaque => PropertyColumn::Opaque(vec![Opaque::none(); len]),
        }
    }

    pub fn value_type(&self) -> PropertyType {
        match self {
            PropertyColumn::Bool(_) => PropertyType::Bool,
            PropertyColumn::Int(_) => PropertyType::Int,
            PropertyColumn::Float(_) => PropertyType::Float,
            PropertyColumn::String(_) => PropertyType::String,
            PropertyColumn::Opaque(_) => PropertyType::Opaque,
        }
    }

    pub fn get(&self, slot: usize) -> Option<PropertyValue> {
        match self {
            PropertyColumn::Bool(values) => values.get(slot).copied().map(PropertyValue::Bool),
            PropertyColumn::Int(values) => values.get(slot).copied().map(PropertyValue::Int),
            PropertyColumn::Float(values) => values.get(slot).copied().map(PropertyValue::Float),
            PropertyColumn::String(values) => values.get(slot).cloned().map(PropertyValue::String),
            PropertyColumn::Opaque(values) => values.get(slot).cloned().map(PropertyValue::Opaque),
        }
    }

    pub fn get_bool(&self, slot: usize) -> Option<bool> {
        match self {
            PropertyColumn::Bool(values) => values.get(slot).copied(),
            _ => None,
        }
    }

    pub fn get_int(&self, slot: usize) -> Option<i64> {
        match self {
            PropertyColumn::Int(values) => values.get(slot).copied(),
            _ => None,
        }
    }

    /// Store a flag at `slot` of a bool column, growing the column if needed. Returns `false`
    /// (and leaves the column unchanged) for columns of any other type.
    pub fn set_bool(&mut self, slot: usize, value: bool) -> bool {
        match self {
            PropertyColumn::Bool(values) => {
                grow(values, slot + 1);
                values[slot] = value;
                true
            }
            _ => false,
        }
    }

    /// Coerce `value` to the column type and store it at `slot`, growing the column if needed.
    ///
    /// On failure, returns the type of the rejected value and leaves the column unchanged.
    pub fn set(&mut self, slot: usize, value: PropertyValue) -> Result<(), PropertyType> {
        let value = value.coerce(self.value_type())?;
        self.ensure_len(slot + 1);
        match (self, value) {
            (PropertyColumn::Bool(values), PropertyValue::Bool(v)) => values[slot] = v,
            (PropertyColumn::Int(values), PropertyValue::Int(v)) => values[slot] = v,
            (PropertyColumn::Float(values), PropertyValue::Float(v)) => values[slot] = v,
            (PropertyColumn::String(values), PropertyValue::String(v)) => values[slot] = v,
            (PropertyColumn::Opaque(values), PropertyValue::Opaque(v)) => values[slot] = v,
            (_, value) => return Err(value.value_type()),
        }
        Ok(())
    }

    /// Restore the default value at `slot` (no-op for slots beyond the column length).
    pub fn reset(&mut self, slot: usize) {
        match self {
            PropertyColumn::Bool(values) => reset_slot(values, slot),
            PropertyColumn::Int(values) => reset_slot(values, slot),
            PropertyColumn::Float(values) => reset_slot(values, slot),
            PropertyColumn::String(values) => reset_slot(values, slot),
            PropertyColumn::Opaque(values) => reset_slot(values, slot),
        }
    }

    /// Grow the column with default values so that it has at least `len` slots.
    pub fn ensure_len(&mut self, len: usize) {
        match self {
            PropertyColumn::Bool(values) => grow(values, len),
            PropertyColumn::Int(values) => grow(values, len),
            PropertyColumn::Float(values) => grow(values, len),
            PropertyColumn::String(values) => grow(values, len),
            PropertyColumn::Opaque(values) => grow(values, len),
        }
    }
}

fn reset_slot<T: Default>(values: &mut [T], slot: usize) {
    if let Some(value) = values.get_mut(slot) {
        *value = T::default();
    }
}

fn grow<T: Default + Clone>(values: &mut Vec<T>, len: usize) {
    if values.len() < len {
        values.resize(len, T::default());
    }
}

impl PropertyEntry {
    fn scope(&self) -> PropertyScope {
        match self {
            PropertyEntry::Vertex(_) => PropertyScope::Vertex,
            PropertyEntry::Edge(_) => PropertyScope::Edge,
            PropertyEntry::Graph(_) => PropertyScope::Graph,
        }
    }

    fn value_type(&self) -> PropertyType {
        match self {
            PropertyEntry::Vertex(column) | PropertyEntry::Edge(column) => column.value_type(),
            PropertyEntry::Graph(value) => value.value_type(),
        }
    }
}

impl PropertyStore {
    /// Declare a new property. Vertex and edge columns are created with `slots` default values.
    pub fn declare(
        &mut self,
        name: &str,
        scope: PropertyScope,
        value_type: PropertyType,
        slots: usize,
    ) -> GameResult<()> {
        if let Some(existing) = self.entries.get(name) {
            return Err(GameError::PropertyNameConflict {
                name: name.to_string(),
                existing: existing.scope(),
            });
        }

        let entry = match scope {
            PropertyScope::Vertex => PropertyEntry::Vertex(PropertyColumn::new(value_type, slots)),
            PropertyScope::Edge => PropertyEntry::Edge(PropertyColumn::new(value_type, slots)),
            PropertyScope::Graph => PropertyEntry::Graph(value_type.default_value()),
        };
        self.entries.insert(name.to_string(), entry);
        Ok(())
    }

    pub fn scope_of(&self, name: &str) -> Option<PropertyScope> {
        self.entries.get(name).map(PropertyEntry::scope)
    }

    /// Names of all properties in `scope`, sorted.
    pub fn names(&self, scope: PropertyScope) -> impl Iterator<Item = &str> + '_ {
        self.entries
            .iter()
            .filter(move |(_, entry)| entry.scope() == scope)
            .map(|(name, _)| name.as_str())
    }

    /// Names of all properties regardless of scope, sorted.
    pub fn all_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn value_type(&self, name: &str, scope: PropertyScope) -> GameResult<PropertyType> {
        match self.entries.get(name) {
            Some(entry) if entry.scope() == scope => Ok(entry.value_type()),
            _ => Err(unknown(name, scope)),
        }
    }

    /// The column of a vertex or edge property.
    pub fn column(&self, name: &str, scope: PropertyScope) -> GameResult<&PropertyColumn> {
        match (scope, self.entries.get(name)) {
            (PropertyScope::Vertex, Some(PropertyEntry::Vertex(column)))
            | (PropertyScope::Edge, Some(PropertyEntry::Edge(column))) => Ok(column),
            _ => Err(unknown(name, scope)),
        }
    }

    pub fn column_mut(
        &mut self,
        name: &str,
        scope: PropertyScope,
    ) -> GameResult<&mut PropertyColumn> {
        match (scope, self.entries.get_mut(name)) {
            (PropertyScope::Vertex, Some(PropertyEntry::Vertex(column)))
            | (PropertyScope::Edge, Some(PropertyEntry::Edge(column))) => Ok(column),
            _ => Err(unknown(name, scope)),
        }
    }

    /// Every column of the given scope (empty for [`PropertyScope::Graph`]).
    pub fn columns_mut(
        &mut self,
        scope: PropertyScope,
    ) -> impl Iterator<Item = &mut PropertyColumn> + '_ {
        self.entries
            .values_mut()
            .filter_map(move |entry| match (scope, entry) {
                (PropertyScope::Vertex, PropertyEntry::Vertex(column))
                | (PropertyScope::Edge, PropertyEntry::Edge(column)) => Some(column),
                _ => None,
            })
    }

    pub fn graph_value(&self, name: &str) -> GameResult<&PropertyValue> {
        match self.entries.get(name) {
            Some(PropertyEntry::Graph(value)) => Ok(value),
            _ => Err(unknown(name, PropertyScope::Graph)),
        }
    }

    pub fn set_graph_value(&mut self, name: &str, value: PropertyValue) -> GameResult<()> {
        match self.entries.get_mut(name) {
            Some(PropertyEntry::Graph(current)) => {
                let expected = current.value_type();
                *current = value
                    .coerce(expected)
                    .map_err(|found| GameError::TypeMismatch {
                        name: name.to_string(),
                        expected,
                        found,
                    })?;
                Ok(())
            }
            _ => Err(unknown(name, PropertyScope::Graph)),
        }
    }
}

fn unknown(name: &str, scope: PropertyScope) -> GameError {
    GameError::UnknownProperty {
        name: name.to_string(),
        scope,
    }
}
