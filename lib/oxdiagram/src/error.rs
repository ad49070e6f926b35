use oxrdf::IriParseError;
use oxttl::TurtleSyntaxError;

/// Error returned when the input document can not be turned into assertions.
///
/// Compilation itself never fails: this error is raised before any pipeline stage runs.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The base IRI given to the parser is not valid.
    #[error("Invalid base IRI '{iri}': {error}")]
    InvalidBaseIri {
        iri: String,
        #[source]
        error: IriParseError,
    },
    /// The document is not valid in the requested syntax.
    #[error(transparent)]
    Syntax(#[from] TurtleSyntaxError),
}

impl ParseError {
    pub(crate) fn invalid_base_iri(iri: impl Into<String>, error: IriParseError) -> Self {
        Self::InvalidBaseIri {
            iri: iri.into(),
            error,
        }
    }
}
