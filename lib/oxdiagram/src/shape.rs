//! Second stage: reads property cardinalities from SHACL property shapes.

use crate::assertion::Assertion;
use crate::classifier::Classification;
use crate::entity::{ClassEntity, EntityMap, InstanceEntity, PropertyDescriptor, ShapeInfo};
use crate::vocab::shacl;
use rustc_hash::FxHashMap;

/// Output of [`Classification::resolve_shapes`]: every property descriptor carries its
/// range and, if some property shape targets it through `sh:path`, its shape information.
#[derive(Debug, Clone)]
pub struct ResolvedSchema {
    pub classes: EntityMap<ClassEntity>,
    pub properties: EntityMap<PropertyDescriptor>,
    pub instances: EntityMap<InstanceEntity>,
}

#[derive(Clone, Copy)]
enum Bound {
    Min,
    Max,
}

impl Classification {
    /// Attaches the shape information to the property descriptors.
    ///
    /// `sh:path` assertions are processed before `sh:minCount` and `sh:maxCount` ones so that
    /// the bounds are found whatever their position in the input.
    /// Property shapes not listed by a node shape and unparsable bounds are ignored.
    pub fn resolve_shapes(self, assertions: &[Assertion]) -> ResolvedSchema {
        let mut properties = self.properties;
        // Property shapes that attached their shape info -> constrained property
        let mut governed = FxHashMap::<&str, &str>::default();

        for assertion in assertions {
            if !assertion.has_predicate(shacl::PATH) {
                continue;
            }
            let Some(owner) = self
                .shape_owners
                .get(&assertion.subject)
                .and_then(|shape| self.shapes.get(shape))
            else {
                continue;
            };
            let property =
                properties.upsert_with(assertion.object.value(), PropertyDescriptor::new);
            // The first property shape reaching a property wins, later sh:path are ignored
            if property.shape_info.is_none() {
                property.shape_info = Some(ShapeInfo::new(
                    owner.target_class.clone(),
                    assertion.subject.as_str(),
                ));
                governed
                    .entry(assertion.subject.as_str())
                    .or_insert(assertion.object.value());
            }
        }

        for assertion in assertions {
            let bound = if assertion.has_predicate(shacl::MIN_COUNT) {
                Bound::Min
            } else if assertion.has_predicate(shacl::MAX_COUNT) {
                Bound::Max
            } else {
                continue;
            };
            let Some(shape_info) = governed
                .get(assertion.subject.as_str())
                .and_then(|property| properties.get_mut(property))
                .and_then(|property| property.shape_info.as_mut())
            else {
                continue;
            };
            let Ok(count) = assertion.object.value().trim().parse::<u64>() else {
                continue;
            };
            match bound {
                Bound::Min => shape_info.min_count = Some(count),
                Bound::Max => shape_info.max_count = Some(count),
            }
        }

        ResolvedSchema {
            classes: self.classes,
            properties,
            instances: self.instances,
        }
    }
}
