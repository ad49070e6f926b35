//! Vocabulary terms driving the compilation.
//!
//! RDF and RDFS terms are re-exported from [`oxrdf::vocab`].
//! Only the small subset of [SHACL](https://www.w3.org/TR/shacl/) needed to read cardinalities is provided here.

pub use oxrdf::vocab::{rdf, rdfs};

pub mod shacl {
    //! [SHACL](https://www.w3.org/TR/shacl/) vocabulary subset.
    use oxrdf::NamedNodeRef;

    /// The SHACL namespace: `http://www.w3.org/ns/shacl#`
    pub const NAMESPACE: &str = "http://www.w3.org/ns/shacl#";

    /// The class of all node shapes.
    pub const NODE_SHAPE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#NodeShape");
    /// Links a shape to a class whose instances are to be validated.
    pub const TARGET_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#targetClass");
    /// Links a shape to its property shapes.
    pub const PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#property");
    /// Specifies the property path of a property shape.
    pub const PATH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#path");
    /// Minimum number of values.
    pub const MIN_COUNT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#minCount");
    /// Maximum number of values.
    pub const MAX_COUNT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#maxCount");
}
