//! Fourth stage: renders the classified entities as two node/edge graph models.

use crate::entity::{ClassEntity, InstanceEntity};
use crate::label::{display_name, local_name};
use crate::relation::ClassifiedEntities;

const BORDER_COLOR: &str = "#8B0000";
const CLASS_BACKGROUND: &str = "#FFFACD";
const OBJECT_BACKGROUND: &str = "#FAFAD2";

/// A diagram: boxes and arrows.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GraphModel {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl GraphModel {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Edges leaving the node `from`.
    pub fn edges_from<'a>(&'a self, from: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |edge| edge.from == from)
    }
}

/// A box of a [`GraphModel`].
///
/// The label is made of the bold display name, an empty line and one line per property.
#[derive(Eq, PartialEq, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Node {
    pub id: String,
    pub label: String,
    pub style: NodeStyle,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NodeStyle {
    pub background: &'static str,
    pub border: &'static str,
}

/// An arrow of a [`GraphModel`] from the node `from` to the node `to`.
#[derive(Eq, PartialEq, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub label: String,
    pub style: EdgeStyle,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EdgeStyle {
    pub color: &'static str,
    pub arrows: &'static str,
}

const EDGE_STYLE: EdgeStyle = EdgeStyle {
    color: BORDER_COLOR,
    arrows: "to",
};

/// The two diagrams compiled from a set of assertions.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CompiledDiagram {
    /// Classes with their properties and the relations between them.
    pub class_view: GraphModel,
    /// Instances with their values and the relations between them.
    pub object_view: GraphModel,
}

impl CompiledDiagram {
    #[inline]
    pub fn view(&self, view: View) -> &GraphModel {
        match view {
            View::Class => &self.class_view,
            View::Object => &self.object_view,
        }
    }
}

/// Selects one of the models of a [`CompiledDiagram`].
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Default)]
pub enum View {
    #[default]
    Class,
    Object,
}

impl ClassifiedEntities {
    /// Builds the class and the object views.
    pub fn build_models(&self) -> CompiledDiagram {
        CompiledDiagram {
            class_view: self.class_view(),
            object_view: self.object_view(),
        }
    }

    fn class_view(&self) -> GraphModel {
        let mut model = GraphModel::default();
        for class in &self.classes {
            model.nodes.push(class_node(class));
            for relation in &class.relations {
                if !self.classes.contains(&relation.target) {
                    continue;
                }
                model.edges.push(Edge {
                    from: class.id.clone(),
                    to: relation.target.clone(),
                    label: format!("{}\n<b>[{}]</b>", relation.name, relation.cardinality),
                    style: EDGE_STYLE,
                });
            }
        }
        model
    }

    fn object_view(&self) -> GraphModel {
        let mut model = GraphModel::default();
        for instance in &self.instances {
            model.nodes.push(instance_node(instance));
            for relation in &instance.relations {
                model.edges.push(Edge {
                    from: instance.id.clone(),
                    to: relation.target.clone(),
                    label: local_name(&relation.predicate).to_owned(),
                    style: EDGE_STYLE,
                });
            }
        }
        model
    }
}

fn class_node(class: &ClassEntity) -> Node {
    Node {
        id: class.id.clone(),
        label: node_label(&class.id, &class.properties),
        style: NodeStyle {
            background: CLASS_BACKGROUND,
            border: BORDER_COLOR,
        },
    }
}

fn instance_node(instance: &InstanceEntity) -> Node {
    Node {
        id: instance.id.clone(),
        label: node_label(&instance.id, &instance.properties),
        style: NodeStyle {
            background: OBJECT_BACKGROUND,
            border: BORDER_COLOR,
        },
    }
}

fn node_label(id: &str, properties: &[String]) -> String {
    format!("<b>{}</b>\n\n{}", display_name(id), properties.join("\n"))
}
