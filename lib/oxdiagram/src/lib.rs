#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc(html_favicon_url = "https://raw.githubusercontent.com/oxigraph/oxigraph/main/logo.svg")]
#![doc(html_logo_url = "https://raw.githubusercontent.com/oxigraph/oxigraph/main/logo.svg")]

mod assertion;
mod classifier;
mod compiler;
mod entity;
mod error;
mod label;
mod model;
mod parser;
mod relation;
mod shape;
pub mod vocab;

pub use crate::assertion::{Assertion, AssertionObject};
pub use crate::classifier::{Classification, classify};
pub use crate::compiler::{compile, compile_document};
pub use crate::entity::{
    ClassEntity, ClassRelation, EntityMap, InstanceEntity, InstanceRelation, PropertyDescriptor,
    ShapeEntity, ShapeInfo,
};
pub use crate::error::ParseError;
pub use crate::label::{Cardinality, display_name, local_name};
pub use crate::model::{
    CompiledDiagram, Edge, EdgeStyle, GraphModel, Node, NodeStyle, View,
};
pub use crate::parser::{AssertionFormat, parse_assertions};
pub use crate::relation::ClassifiedEntities;
pub use crate::shape::ResolvedSchema;
