use crate::assertion::Assertion;
use crate::classifier::classify;
use crate::error::ParseError;
use crate::model::CompiledDiagram;
use crate::parser::{AssertionFormat, parse_assertions};

/// Compiles a complete assertion set into its class and object diagrams.
///
/// The stages run one after the other, each one consuming the output of the previous one:
/// [`classify`], [`resolve_shapes`](crate::Classification::resolve_shapes),
/// [`classify_relations`](crate::ResolvedSchema::classify_relations) and
/// [`build_models`](crate::ClassifiedEntities::build_models).
///
/// Compilation is total: assertions that do not match anything are ignored.
///
/// ```
/// use oxdiagram::{compile, Assertion, AssertionObject};
///
/// let rdf_type = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
/// let diagram = compile(&[Assertion::new(
///     "http://example.com/Alice",
///     rdf_type,
///     AssertionObject::node("http://example.com/Person"),
/// )]);
/// assert_eq!(diagram.class_view.nodes[0].label, "<b>Person</b>\n\n");
/// assert_eq!(diagram.object_view.nodes[0].id, "http://example.com/Alice");
/// ```
pub fn compile(assertions: &[Assertion]) -> CompiledDiagram {
    classify(assertions)
        .resolve_shapes(assertions)
        .classify_relations(assertions)
        .build_models()
}

/// Parses a complete document and compiles it.
///
/// Nothing is compiled if the document is not valid.
pub fn compile_document(
    format: AssertionFormat,
    data: &[u8],
    base_iri: Option<&str>,
) -> Result<CompiledDiagram, ParseError> {
    Ok(compile(&parse_assertions(format, data, base_iri)?))
}
