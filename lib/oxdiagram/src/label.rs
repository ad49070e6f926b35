use std::fmt;

/// Returns the last path or fragment segment of an IRI.
///
/// ```
/// use oxdiagram::local_name;
///
/// assert_eq!(local_name("http://example.com/ns#has_owner"), "has_owner");
/// assert_eq!(local_name("http://example.com/people/Alice"), "Alice");
/// assert_eq!(local_name("urn:example:thing"), "urn:example:thing");
/// ```
pub fn local_name(iri: &str) -> &str {
    let segment = iri.rsplit('/').next().unwrap_or(iri);
    segment.rsplit('#').next().unwrap_or(segment)
}

/// Human readable name of an IRI: its local name split on `_` with each word capitalized.
///
/// ```
/// use oxdiagram::display_name;
///
/// assert_eq!(display_name("http://example.com/ns#legal_person"), "Legal Person");
/// ```
pub fn display_name(iri: &str) -> String {
    local_name(iri)
        .split('_')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Inclusive occurrence bounds of a property, `0..*` if unconstrained.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Default)]
pub struct Cardinality {
    pub min: u64,
    /// `None` means unbounded.
    pub max: Option<u64>,
}

impl Cardinality {
    #[inline]
    pub fn new(min: u64, max: Option<u64>) -> Self {
        Self { min, max }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(max) = self.max {
            write!(f, "{}..{max}", self.min)
        } else {
            write!(f, "{}..*", self.min)
        }
    }
}
