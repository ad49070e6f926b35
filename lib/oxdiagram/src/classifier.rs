//! First stage: sorts the assertions into classes, property descriptors, instances and shapes.

use crate::assertion::Assertion;
use crate::entity::{ClassEntity, EntityMap, InstanceEntity, PropertyDescriptor, ShapeEntity};
use crate::vocab::{rdf, rdfs, shacl};
use rustc_hash::FxHashMap;

/// Output of [`classify`].
///
/// Shapes are complete: their target class and property shapes are attached whatever the
/// order of the `sh:*` assertions in the input.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub classes: EntityMap<ClassEntity>,
    pub properties: EntityMap<PropertyDescriptor>,
    pub instances: EntityMap<InstanceEntity>,
    pub shapes: EntityMap<ShapeEntity>,
    /// Property shape node -> IRI of the node shape owning it.
    pub(crate) shape_owners: FxHashMap<String, String>,
}

impl Classification {
    /// The node shape listing `property_shape` in its `sh:property` values.
    pub fn owning_shape(&self, property_shape: &str) -> Option<&ShapeEntity> {
        self.shapes.get(self.shape_owners.get(property_shape)?)
    }
}

/// Builds the entity maps from `rdf:type`, `rdfs:range`, `sh:targetClass` and `sh:property` assertions.
///
/// All other assertions are ignored at this stage.
pub fn classify(assertions: &[Assertion]) -> Classification {
    let mut classification = Classification::default();
    let mut target_classes = FxHashMap::<&str, &str>::default();
    let mut property_shapes = FxHashMap::<&str, Vec<&str>>::default();

    for assertion in assertions {
        if assertion.has_predicate(rdf::TYPE) {
            classify_type(&mut classification, assertion);
        } else if assertion.has_predicate(rdfs::RANGE) {
            let property = classification
                .properties
                .upsert_with(&assertion.subject, PropertyDescriptor::new);
            if property.range.is_none() {
                property.range = Some(assertion.object.value().to_owned());
            }
        } else if assertion.has_predicate(shacl::TARGET_CLASS) {
            target_classes
                .entry(assertion.subject.as_str())
                .or_insert(assertion.object.value());
        } else if assertion.has_predicate(shacl::PROPERTY) {
            property_shapes
                .entry(assertion.subject.as_str())
                .or_default()
                .push(assertion.object.value());
        }
    }

    // Shape facts are only kept for subjects declared as sh:NodeShape
    let Classification {
        shapes,
        shape_owners,
        ..
    } = &mut classification;
    for shape in shapes.iter_mut() {
        shape.target_class = target_classes
            .get(shape.id.as_str())
            .map(|class| (*class).to_owned());
        for property_shape in property_shapes.remove(shape.id.as_str()).unwrap_or_default() {
            shape_owners
                .entry(property_shape.to_owned())
                .or_insert_with(|| shape.id.clone());
            shape.property_shapes.push(property_shape.to_owned());
        }
    }
    classification
}

fn classify_type(classification: &mut Classification, assertion: &Assertion) {
    // Literal objects are read by their lexical value like IRIs
    let object = assertion.object.value();
    let subject = assertion.subject.as_str();
    if object == rdfs::CLASS.as_str() && subject != rdf::PROPERTY.as_str() {
        classification.classes.upsert(subject);
    } else if object == shacl::NODE_SHAPE.as_str() {
        classification.shapes.upsert_with(subject, ShapeEntity::new);
    } else if object != rdf::PROPERTY.as_str() {
        // rdf:Property declared as rdfs:Class is an instance of rdfs:Class
        classification
            .instances
            .upsert_with(subject, |id| InstanceEntity::new(id, object));
        classification.classes.upsert(object);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assertion::AssertionObject;

    const EX: &str = "http://example.com/";

    fn ex(name: &str) -> String {
        format!("{EX}{name}")
    }

    fn node(subject: &str, predicate: &str, object: &str) -> Assertion {
        Assertion::new(subject, predicate, AssertionObject::node(object))
    }

    #[test]
    fn type_assertions() {
        let classification = classify(&[
            node(&ex("Person"), rdf::TYPE.as_str(), rdfs::CLASS.as_str()),
            node(&ex("Alice"), rdf::TYPE.as_str(), &ex("Person")),
            node(&ex("Bob"), rdf::TYPE.as_str(), &ex("Robot")),
            node(&ex("knows"), rdf::TYPE.as_str(), rdf::PROPERTY.as_str()),
            node(rdf::PROPERTY.as_str(), rdf::TYPE.as_str(), rdfs::CLASS.as_str()),
            node(&ex("PersonShape"), rdf::TYPE.as_str(), shacl::NODE_SHAPE.as_str()),
        ]);
        let classes = classification
            .classes
            .iter()
            .map(|c| c.id.clone())
            .collect::<Vec<_>>();
        assert_eq!(
            classes,
            [ex("Person"), ex("Robot"), rdfs::CLASS.as_str().to_owned()]
        );
        let instances = classification
            .instances
            .iter()
            .map(|i| (i.id.clone(), i.class.clone()))
            .collect::<Vec<_>>();
        assert_eq!(
            instances,
            [
                (ex("Alice"), ex("Person")),
                (ex("Bob"), ex("Robot")),
                (
                    rdf::PROPERTY.as_str().to_owned(),
                    rdfs::CLASS.as_str().to_owned()
                )
            ]
        );
        assert!(classification.shapes.contains(&ex("PersonShape")));
        assert!(!classification.instances.contains(&ex("knows")));
        assert!(!classification.classes.contains(rdf::PROPERTY.as_str()));
    }

    #[test]
    fn instance_keeps_its_first_type() {
        let classification = classify(&[
            node(&ex("Alice"), rdf::TYPE.as_str(), &ex("Person")),
            node(&ex("Alice"), rdf::TYPE.as_str(), &ex("Employee")),
        ]);
        assert_eq!(
            classification
                .instances
                .get(&ex("Alice"))
                .map(|i| i.class.as_str()),
            Some(ex("Person").as_str())
        );
        assert_eq!(classification.classes.len(), 2);
    }

    #[test]
    fn literal_type_is_read_by_value() {
        let classification = classify(&[Assertion::new(
            ex("Alice"),
            rdf::TYPE.as_str(),
            AssertionObject::literal(ex("Person")),
        )]);
        assert_eq!(
            classification
                .instances
                .get(&ex("Alice"))
                .map(|i| i.class.as_str()),
            Some(ex("Person").as_str())
        );
        assert!(classification.classes.contains(&ex("Person")));
    }

    #[test]
    fn range_creates_descriptor() {
        let classification = classify(&[
            node(&ex("age"), rdfs::RANGE.as_str(), &ex("Integer")),
            node(&ex("age"), rdfs::RANGE.as_str(), &ex("Decimal")),
        ]);
        let property = classification.properties.get(&ex("age"));
        assert_eq!(
            property.and_then(|p| p.range.as_deref()),
            Some(ex("Integer").as_str())
        );
    }

    #[test]
    fn shape_facts_before_declaration() {
        let classification = classify(&[
            node(&ex("PersonShape"), shacl::PROPERTY.as_str(), "ps1"),
            node(&ex("PersonShape"), shacl::TARGET_CLASS.as_str(), &ex("Person")),
            node(&ex("PersonShape"), shacl::PROPERTY.as_str(), "ps2"),
            node(&ex("PersonShape"), rdf::TYPE.as_str(), shacl::NODE_SHAPE.as_str()),
            node(&ex("Orphan"), shacl::PROPERTY.as_str(), "ps3"),
        ]);
        let shape = classification.shapes.get(&ex("PersonShape"));
        assert_eq!(
            shape.and_then(|s| s.target_class.as_deref()),
            Some(ex("Person").as_str())
        );
        assert_eq!(
            shape.map(|s| s.property_shapes.clone()),
            Some(vec!["ps1".to_owned(), "ps2".to_owned()])
        );
        assert_eq!(
            classification.owning_shape("ps2").map(|s| s.id.as_str()),
            Some(ex("PersonShape").as_str())
        );
        assert!(classification.owning_shape("ps3").is_none());
        assert!(!classification.shapes.contains(&ex("Orphan")));
    }
}
