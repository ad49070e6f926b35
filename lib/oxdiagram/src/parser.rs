use crate::assertion::Assertion;
use crate::error::ParseError;
use oxttl::{NQuadsParser, NTriplesParser, TriGParser, TurtleParser};
use std::fmt;

/// RDF serialization formats the assertions can be read from.
///
/// ```
/// use oxdiagram::AssertionFormat;
///
/// assert_eq!(AssertionFormat::from_extension("ttl"), Some(AssertionFormat::Turtle));
/// assert_eq!(
///     AssertionFormat::from_media_type("application/n-quads; charset=utf-8"),
///     Some(AssertionFormat::NQuads)
/// );
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
#[non_exhaustive]
pub enum AssertionFormat {
    /// [N-Quads](https://www.w3.org/TR/n-quads/)
    NQuads,
    /// [N-Triples](https://www.w3.org/TR/n-triples/)
    NTriples,
    /// [TriG](https://www.w3.org/TR/trig/)
    TriG,
    /// [Turtle](https://www.w3.org/TR/turtle/)
    Turtle,
}

impl AssertionFormat {
    const ALL: [Self; 4] = [Self::NQuads, Self::NTriples, Self::TriG, Self::Turtle];

    /// The format canonical IRI according to the [Unique URIs for file formats registry](https://www.w3.org/ns/formats/).
    #[inline]
    pub const fn iri(self) -> &'static str {
        match self {
            Self::NQuads => "http://www.w3.org/ns/formats/N-Quads",
            Self::NTriples => "http://www.w3.org/ns/formats/N-Triples",
            Self::TriG => "http://www.w3.org/ns/formats/TriG",
            Self::Turtle => "http://www.w3.org/ns/formats/Turtle",
        }
    }

    /// The format [IANA media type](https://tools.ietf.org/html/rfc2046).
    #[inline]
    pub const fn media_type(self) -> &'static str {
        match self {
            Self::NQuads => "application/n-quads",
            Self::NTriples => "application/n-triples",
            Self::TriG => "application/trig",
            Self::Turtle => "text/turtle",
        }
    }

    /// The format [IANA-registered](https://tools.ietf.org/html/rfc2046) file extension.
    #[inline]
    pub const fn file_extension(self) -> &'static str {
        match self {
            Self::NQuads => "nq",
            Self::NTriples => "nt",
            Self::TriG => "trig",
            Self::Turtle => "ttl",
        }
    }

    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NQuads => "N-Quads",
            Self::NTriples => "N-Triples",
            Self::TriG => "TriG",
            Self::Turtle => "Turtle",
        }
    }

    /// Looks for a known format from a media type.
    ///
    /// Media type parameters are ignored. `text/plain` is read as Turtle.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        let media_type = media_type
            .split_once(';')
            .map_or(media_type, |(base, _)| base)
            .trim();
        if media_type.eq_ignore_ascii_case("text/plain") {
            return Some(Self::Turtle);
        }
        Self::ALL
            .into_iter()
            .find(|format| format.media_type().eq_ignore_ascii_case(media_type))
            .or_else(|| {
                if media_type.eq_ignore_ascii_case("application/x-turtle") {
                    Some(Self::Turtle)
                } else if media_type.eq_ignore_ascii_case("text/x-nquads") {
                    Some(Self::NQuads)
                } else {
                    None
                }
            })
    }

    /// Looks for a known format from an extension.
    pub fn from_extension(extension: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.file_extension().eq_ignore_ascii_case(extension))
            .or_else(|| {
                if extension.eq_ignore_ascii_case("turtle") {
                    Some(Self::Turtle)
                } else if extension.eq_ignore_ascii_case("nquads") {
                    Some(Self::NQuads)
                } else if extension.eq_ignore_ascii_case("ntriples") {
                    Some(Self::NTriples)
                } else {
                    None
                }
            })
    }
}

impl fmt::Display for AssertionFormat {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a complete document into assertions.
///
/// Graph names are dropped. Nothing is returned if the document contains a syntax error:
/// the pipeline only ever sees complete assertion sets.
///
/// ```
/// use oxdiagram::{parse_assertions, AssertionFormat};
///
/// let assertions = parse_assertions(
///     AssertionFormat::Turtle,
///     b"<s> a <Person> .",
///     Some("http://example.com/"),
/// )?;
/// assert_eq!(assertions[0].subject, "http://example.com/s");
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
pub fn parse_assertions(
    format: AssertionFormat,
    data: &[u8],
    base_iri: Option<&str>,
) -> Result<Vec<Assertion>, ParseError> {
    Ok(match format {
        AssertionFormat::NQuads => NQuadsParser::new()
            .for_slice(data)
            .map(|quad| quad.map(Assertion::from))
            .collect::<Result<_, _>>()?,
        AssertionFormat::NTriples => NTriplesParser::new()
            .for_slice(data)
            .map(|triple| triple.map(Assertion::from))
            .collect::<Result<_, _>>()?,
        AssertionFormat::TriG => {
            let mut parser = TriGParser::new();
            if let Some(base_iri) = base_iri {
                parser = parser
                    .with_base_iri(base_iri)
                    .map_err(|error| ParseError::invalid_base_iri(base_iri, error))?;
            }
            parser
                .for_slice(data)
                .map(|quad| quad.map(Assertion::from))
                .collect::<Result<_, _>>()?
        }
        AssertionFormat::Turtle => {
            let mut parser = TurtleParser::new();
            if let Some(base_iri) = base_iri {
                parser = parser
                    .with_base_iri(base_iri)
                    .map_err(|error| ParseError::invalid_base_iri(base_iri, error))?;
            }
            parser
                .for_slice(data)
                .map(|triple| triple.map(Assertion::from))
                .collect::<Result<_, _>>()?
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_lookup() {
        for format in AssertionFormat::ALL {
            assert_eq!(
                AssertionFormat::from_extension(format.file_extension()),
                Some(format)
            );
            assert_eq!(
                AssertionFormat::from_media_type(format.media_type()),
                Some(format)
            );
        }
        assert_eq!(
            AssertionFormat::from_media_type("Text/Plain"),
            Some(AssertionFormat::Turtle)
        );
        assert_eq!(AssertionFormat::from_extension("rdf"), None);
        assert_eq!(AssertionFormat::from_media_type("text/foo"), None);
    }

    #[test]
    fn turtle_with_prefixes() -> Result<(), ParseError> {
        let assertions = parse_assertions(
            AssertionFormat::Turtle,
            br#"@prefix ex: <http://example.com/> .
            ex:Alice a ex:Person ; ex:name "Alice"@en ; ex:knows [ ex:name "Bob" ] ."#,
            None,
        )?;
        assert_eq!(assertions.len(), 4);
        assert_eq!(assertions[0].subject, "http://example.com/Alice");
        assert_eq!(assertions[1].object.value(), "Alice");
        assert!(assertions[1].object.as_node().is_none());
        Ok(())
    }

    #[test]
    fn quads_are_flattened() -> Result<(), ParseError> {
        let assertions = parse_assertions(
            AssertionFormat::TriG,
            b"<s> <p> <o> . <g> { <s> <p> <o2> . }",
            Some("http://example.com/"),
        )?;
        let objects = assertions
            .iter()
            .map(|a| a.object.value())
            .collect::<Vec<_>>();
        assert_eq!(objects, ["http://example.com/o", "http://example.com/o2"]);
        Ok(())
    }

    #[test]
    fn syntax_error_returns_nothing() {
        let result = parse_assertions(
            AssertionFormat::Turtle,
            b"<http://example.com/s> <http://example.com/p> <http://example.com/o> . <http://example.com/s>",
            None,
        );
        assert!(matches!(result, Err(ParseError::Syntax(_))));
    }

    #[test]
    fn invalid_base_iri() {
        let result = parse_assertions(AssertionFormat::Turtle, b"", Some("not an iri"));
        assert!(matches!(result, Err(ParseError::InvalidBaseIri { .. })));
    }
}
