//! Entities built from the assertions: classes, property descriptors, instances and shapes.

use crate::label::Cardinality;
use rustc_hash::FxHashMap;
use std::slice;

/// Insertion-ordered map of entities keyed by IRI.
///
/// Iteration follows the order in which keys were first inserted so that the compiled
/// diagrams do not depend on hashing.
#[derive(Debug, Clone)]
pub struct EntityMap<T> {
    entries: Vec<T>,
    index: FxHashMap<String, usize>,
}

impl<T> EntityMap<T> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.entries.get(*self.index.get(id)?)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.entries.get_mut(*self.index.get(id)?)
    }

    /// Returns the entity for `id`, creating it with `create` if it does not exist yet.
    ///
    /// An existing entity is never replaced.
    pub(crate) fn upsert_with(&mut self, id: &str, create: impl FnOnce(String) -> T) -> &mut T {
        let position = if let Some(position) = self.index.get(id) {
            *position
        } else {
            let position = self.entries.len();
            self.entries.push(create(id.to_owned()));
            self.index.insert(id.to_owned(), position);
            position
        };
        &mut self.entries[position]
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.entries.iter()
    }

    #[inline]
    pub(crate) fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.entries.iter_mut()
    }
}

impl<T> Default for EntityMap<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }
}

impl<'a, T> IntoIterator for &'a EntityMap<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl EntityMap<ClassEntity> {
    /// Registers a class if it is not already known.
    ///
    /// Both explicit `rdfs:Class` declarations and instance types go through this method.
    #[inline]
    pub(crate) fn upsert(&mut self, id: &str) -> &mut ClassEntity {
        self.upsert_with(id, ClassEntity::new)
    }
}

/// A class of the ontology view.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ClassEntity {
    pub id: String,
    /// Formatted scalar properties like `name: <string> [1..1]`.
    pub properties: Vec<String>,
    pub relations: Vec<ClassRelation>,
}

impl ClassEntity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            properties: Vec::new(),
            relations: Vec::new(),
        }
    }
}

/// A typed relation between two classes.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ClassRelation {
    /// Local name of the property.
    pub name: String,
    /// IRI of the range class.
    pub target: String,
    pub cardinality: Cardinality,
}

/// What is known about a property: its range and the shape constraining it.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PropertyDescriptor {
    pub id: String,
    pub range: Option<String>,
    pub shape_info: Option<ShapeInfo>,
}

impl PropertyDescriptor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            range: None,
            shape_info: None,
        }
    }

    /// The shape cardinality, `0..*` without shape.
    pub fn cardinality(&self) -> Cardinality {
        self.shape_info
            .as_ref()
            .map(ShapeInfo::cardinality)
            .unwrap_or_default()
    }
}

/// Link between a property and the property shape constraining it.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ShapeInfo {
    /// Target class of the owning node shape.
    pub shape: Option<String>,
    pub property_shape: String,
    pub min_count: Option<u64>,
    pub max_count: Option<u64>,
}

impl ShapeInfo {
    pub fn new(shape: Option<String>, property_shape: impl Into<String>) -> Self {
        Self {
            shape,
            property_shape: property_shape.into(),
            min_count: None,
            max_count: None,
        }
    }

    pub fn cardinality(&self) -> Cardinality {
        Cardinality::new(self.min_count.unwrap_or(0), self.max_count)
    }
}

/// A concrete resource of the object view.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct InstanceEntity {
    pub id: String,
    /// The `rdf:type` of the instance.
    pub class: String,
    /// Formatted scalar values like `age: 42`.
    pub properties: Vec<String>,
    pub relations: Vec<InstanceRelation>,
}

impl InstanceEntity {
    pub fn new(id: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            class: class.into(),
            properties: Vec::new(),
            relations: Vec::new(),
        }
    }
}

/// A link between two instances.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct InstanceRelation {
    /// Full IRI of the predicate.
    pub predicate: String,
    pub target: String,
}

/// A `sh:NodeShape`.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ShapeEntity {
    pub id: String,
    pub target_class: Option<String>,
    /// Property shape nodes, in `sh:property` order.
    pub property_shapes: Vec<String>,
}

impl ShapeEntity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            target_class: None,
            property_shapes: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_keeps_first_entry_and_order() {
        let mut classes = EntityMap::new();
        classes.upsert("http://example.com/B");
        classes.upsert("http://example.com/A").properties.push("p:".into());
        classes.upsert("http://example.com/B");
        assert_eq!(classes.len(), 2);
        let ids = classes.iter().map(|c| c.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, ["http://example.com/B", "http://example.com/A"]);
        classes.upsert("http://example.com/A");
        assert_eq!(
            classes
                .get("http://example.com/A")
                .map(|c| c.properties.len()),
            Some(1)
        );
    }

    #[test]
    fn missing_entity() {
        let map = EntityMap::<ClassEntity>::default();
        assert!(map.is_empty());
        assert!(!map.contains("http://example.com/A"));
        assert!(map.get("http://example.com/A").is_none());
    }

    #[test]
    fn default_cardinality() {
        let mut property = PropertyDescriptor::new("http://example.com/p");
        assert_eq!(property.cardinality(), Cardinality::new(0, None));
        let mut info = ShapeInfo::new(None, "_:ps");
        info.max_count = Some(3);
        property.shape_info = Some(info);
        assert_eq!(property.cardinality().to_string(), "0..3");
    }
}
