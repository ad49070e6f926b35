//! Third stage: splits property usages between scalar properties and typed relations.

use crate::assertion::Assertion;
use crate::entity::{
    ClassEntity, ClassRelation, EntityMap, InstanceEntity, InstanceRelation, PropertyDescriptor,
};
use crate::label::local_name;
use crate::shape::ResolvedSchema;
use crate::vocab::{rdf, rdfs};

/// Output of [`ResolvedSchema::classify_relations`]: classes and instances with their
/// properties and relations filled in.
#[derive(Debug, Clone)]
pub struct ClassifiedEntities {
    pub classes: EntityMap<ClassEntity>,
    pub instances: EntityMap<InstanceEntity>,
}

impl ResolvedSchema {
    /// Attaches every `rdfs:domain` declaration to its class and every statement about an
    /// instance to that instance.
    ///
    /// A property whose range is a known class becomes a [`ClassRelation`], any other one a
    /// formatted property string. Statements linking two instances become an
    /// [`InstanceRelation`], any other one a formatted value string.
    pub fn classify_relations(self, assertions: &[Assertion]) -> ClassifiedEntities {
        let Self {
            mut classes,
            properties,
            mut instances,
        } = self;

        for assertion in assertions {
            if assertion.has_predicate(rdfs::DOMAIN) {
                add_domain(&mut classes, &properties, assertion);
            } else if !assertion.has_predicate(rdf::TYPE) {
                add_statement(&mut instances, assertion);
            }
        }

        ClassifiedEntities { classes, instances }
    }
}

fn add_domain(
    classes: &mut EntityMap<ClassEntity>,
    properties: &EntityMap<PropertyDescriptor>,
    assertion: &Assertion,
) {
    let domain = assertion.object.value();
    if !classes.contains(domain) {
        return;
    }
    let property = properties.get(&assertion.subject);
    let name = local_name(&assertion.subject);
    let range = property.and_then(|p| p.range.as_deref());
    let relation = range
        .filter(|range| classes.contains(range))
        .map(|range| ClassRelation {
            name: name.to_owned(),
            target: range.to_owned(),
            cardinality: property.map(PropertyDescriptor::cardinality).unwrap_or_default(),
        });
    let Some(class) = classes.get_mut(domain) else {
        return;
    };
    if let Some(relation) = relation {
        class.relations.push(relation);
    } else {
        class.properties.push(format_property(name, property));
    }
}

/// `name: <range> [min..max]`, each suffix being omitted if unknown.
fn format_property(name: &str, property: Option<&PropertyDescriptor>) -> String {
    let range = property
        .and_then(|p| p.range.as_deref())
        .map(|range| format!(" <{}>", local_name(range)))
        .unwrap_or_default();
    let cardinality = property
        .and_then(|p| p.shape_info.as_ref())
        .map(|shape_info| format!(" [{}]", shape_info.cardinality()))
        .unwrap_or_default();
    format!("{name}:{range}{cardinality}")
}

fn add_statement(instances: &mut EntityMap<InstanceEntity>, assertion: &Assertion) {
    let target = assertion
        .object
        .as_node()
        .filter(|target| instances.contains(target));
    let Some(instance) = instances.get_mut(&assertion.subject) else {
        return;
    };
    if let Some(target) = target {
        instance.relations.push(InstanceRelation {
            predicate: assertion.predicate.clone(),
            target: target.to_owned(),
        });
    } else {
        instance.properties.push(format!(
            "{}: {}",
            local_name(&assertion.predicate),
            assertion.object.value()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assertion::AssertionObject;
    use crate::classifier::classify;
    use crate::label::Cardinality;
    use crate::vocab::shacl;

    const PERSON: &str = "http://example.com/Person";
    const KNOWS: &str = "http://example.com/knows";
    const NAME: &str = "http://example.com/name";
    const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    fn node(subject: &str, predicate: &str, object: &str) -> Assertion {
        Assertion::new(subject, predicate, AssertionObject::node(object))
    }

    fn classified(assertions: &[Assertion]) -> ClassifiedEntities {
        classify(assertions)
            .resolve_shapes(assertions)
            .classify_relations(assertions)
    }

    fn person(entities: &ClassifiedEntities) -> &ClassEntity {
        let Some(person) = entities.classes.get(PERSON) else {
            panic!("{PERSON} is not a class");
        };
        person
    }

    #[test]
    fn range_class_makes_a_relation() {
        let entities = classified(&[
            node(PERSON, rdf::TYPE.as_str(), rdfs::CLASS.as_str()),
            node(KNOWS, rdfs::DOMAIN.as_str(), PERSON),
            node(KNOWS, rdfs::RANGE.as_str(), PERSON),
        ]);
        let person = person(&entities);
        assert_eq!(
            person.relations,
            [ClassRelation {
                name: "knows".into(),
                target: PERSON.into(),
                cardinality: Cardinality::default(),
            }]
        );
        assert!(person.properties.is_empty());
    }

    #[test]
    fn datatype_range_makes_a_property() {
        let entities = classified(&[
            node(PERSON, rdf::TYPE.as_str(), rdfs::CLASS.as_str()),
            node(NAME, rdfs::DOMAIN.as_str(), PERSON),
            node(NAME, rdfs::RANGE.as_str(), STRING),
            node(KNOWS, rdfs::DOMAIN.as_str(), PERSON),
        ]);
        let person = person(&entities);
        assert_eq!(person.properties, ["name: <string>", "knows:"]);
        assert!(person.relations.is_empty());
    }

    #[test]
    fn property_with_shape() {
        let entities = classified(&[
            node(PERSON, rdf::TYPE.as_str(), rdfs::CLASS.as_str()),
            node(NAME, rdfs::DOMAIN.as_str(), PERSON),
            node("s", rdf::TYPE.as_str(), shacl::NODE_SHAPE.as_str()),
            node("s", shacl::PROPERTY.as_str(), "ps"),
            node("ps", shacl::PATH.as_str(), NAME),
            Assertion::new("ps", shacl::MIN_COUNT.as_str(), AssertionObject::literal("1")),
        ]);
        assert_eq!(person(&entities).properties, ["name: [1..*]"]);
    }

    #[test]
    fn unknown_domain_is_ignored() {
        let entities = classified(&[node(NAME, rdfs::DOMAIN.as_str(), PERSON)]);
        assert!(entities.classes.is_empty());
    }

    #[test]
    fn instance_statements() {
        let alice = "http://example.com/Alice";
        let bob = "http://example.com/Bob";
        let entities = classified(&[
            node(alice, rdf::TYPE.as_str(), PERSON),
            node(alice, KNOWS, bob),
            node(alice, KNOWS, "http://example.com/Carol"),
            Assertion::new(alice, NAME, AssertionObject::literal("Alice")),
            Assertion::new(alice, KNOWS, AssertionObject::literal(bob)),
            node(bob, rdf::TYPE.as_str(), PERSON),
        ]);
        let Some(alice) = entities.instances.get(alice) else {
            panic!("Alice is not an instance");
        };
        assert_eq!(
            alice.relations,
            [InstanceRelation {
                predicate: KNOWS.into(),
                target: bob.into(),
            }]
        );
        assert_eq!(
            alice.properties,
            [
                "knows: http://example.com/Carol",
                "name: Alice",
                "knows: http://example.com/Bob"
            ]
        );
    }
}
