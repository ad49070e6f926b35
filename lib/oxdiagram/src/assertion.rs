use oxrdf::{NamedNodeRef, Quad, Subject, Term, Triple};
use std::fmt;

/// A subject-predicate-object fact, the input unit of the compiler.
///
/// IRIs and blank node identifiers are kept as opaque strings.
/// Literals only keep their lexical value: datatypes and language tags are not interpreted.
///
/// ```
/// use oxdiagram::{Assertion, AssertionObject};
///
/// let assertion = Assertion::new(
///     "http://example.com/Alice",
///     "http://example.com/name",
///     AssertionObject::literal("Alice"),
/// );
/// assert_eq!(assertion.object.value(), "Alice");
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Assertion {
    pub subject: String,
    pub predicate: String,
    pub object: AssertionObject,
}

impl Assertion {
    #[inline]
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<AssertionObject>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    #[inline]
    pub(crate) fn has_predicate(&self, predicate: NamedNodeRef<'_>) -> bool {
        self.predicate == predicate.as_str()
    }

    /// Checks if the object is a reference to the given term.
    #[inline]
    pub(crate) fn has_object(&self, object: NamedNodeRef<'_>) -> bool {
        self.object.as_node() == Some(object.as_str())
    }
}

impl fmt::Display for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> <{}> {}", self.subject, self.predicate, self.object)
    }
}

impl From<Triple> for Assertion {
    fn from(triple: Triple) -> Self {
        Self {
            subject: subject_value(triple.subject),
            predicate: triple.predicate.into_string(),
            object: triple.object.into(),
        }
    }
}

impl From<Quad> for Assertion {
    /// The graph name is dropped: all graphs are merged into a single assertion set.
    fn from(quad: Quad) -> Self {
        Self {
            subject: subject_value(quad.subject),
            predicate: quad.predicate.into_string(),
            object: quad.object.into(),
        }
    }
}

fn subject_value(subject: Subject) -> String {
    match subject {
        Subject::NamedNode(node) => node.into_string(),
        Subject::BlankNode(node) => node.into_string(),
    }
}

/// The object of an [`Assertion`].
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum AssertionObject {
    /// An IRI or a blank node identifier.
    Node(String),
    /// The lexical value of a literal.
    Literal(String),
}

impl AssertionObject {
    #[inline]
    pub fn node(id: impl Into<String>) -> Self {
        Self::Node(id.into())
    }

    #[inline]
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    /// The IRI, blank node identifier or literal lexical value.
    #[inline]
    pub fn value(&self) -> &str {
        match self {
            Self::Node(value) | Self::Literal(value) => value,
        }
    }

    #[inline]
    pub fn as_node(&self) -> Option<&str> {
        match self {
            Self::Node(id) => Some(id),
            Self::Literal(_) => None,
        }
    }
}

impl fmt::Display for AssertionObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(id) => write!(f, "<{id}>"),
            Self::Literal(value) => write!(f, "{value:?}"),
        }
    }
}

impl From<Term> for AssertionObject {
    fn from(term: Term) -> Self {
        match term {
            Term::NamedNode(node) => Self::Node(node.into_string()),
            Term::BlankNode(node) => Self::Node(node.into_string()),
            Term::Literal(literal) => Self::Literal(literal.value().to_owned()),
        }
    }
}
