// SymViz - Symbolic Execution Tree Visualizer
// Copyright (C) 2024 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Incremental construction of the exploration graph
//!
//! The [`Materializer`] owns one visualization session: the destination graph
//! and the node identifier counter. Every call to [`Materializer::add_step`]
//! adds exactly one node and, when a parent is given, exactly one edge.

use petgraph::{
    dot::{Config, Dot},
    graph::{DiGraph, NodeIndex},
    Direction,
};
use serde::Serialize;
use std::{collections::HashSet, fmt};
use symviz_common::types::{ExecutionStep, LocalBindings, PathCondition};
use tracing::{debug, error};

use crate::{
    classifier::{classify, NodeAttribute, NodeColor, NodeShape},
    config::VisualizerConfig,
};

/// Handle to a node created by a [`Materializer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRef(NodeIndex);

impl NodeRef {
    /// Index of the node in the underlying graph
    pub fn index(&self) -> NodeIndex {
        self.0
    }
}

/// A node of the exploration graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    /// Session-unique identifier, `0`, `1`, ... in creation order
    pub id: String,
    /// Multi-line label
    pub label: String,
    /// Outline color
    pub color: NodeColor,
    /// Outline shape, `None` for the renderer's default
    pub shape: Option<NodeShape>,
}

impl GraphNode {
    fn new(id: String) -> Self {
        Self { id, label: String::new(), color: NodeColor::Black, shape: None }
    }

    /// Apply a single display attribute
    pub fn set_attribute(&mut self, attribute: NodeAttribute) {
        match attribute {
            NodeAttribute::Label(label) => self.label = label,
            NodeAttribute::Color(color) => self.color = color,
            NodeAttribute::Shape(shape) => self.shape = Some(shape),
        }
    }

    /// The node's display attributes, in label, color, shape order
    pub fn attributes(&self) -> Vec<NodeAttribute> {
        let mut attributes =
            vec![NodeAttribute::Label(self.label.clone()), NodeAttribute::Color(self.color)];
        attributes.extend(self.shape.map(NodeAttribute::Shape));
        attributes
    }

    fn dot_attributes(&self) -> String {
        self.attributes().iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
    }
}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Parent-to-child edge. Carries no data beyond its direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transition;

impl fmt::Display for Transition {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ok(())
    }
}

/// The destination graph of a visualization session
pub type ExplorationGraph = DiGraph<GraphNode, Transition>;

/// Materializes execution steps into an [`ExplorationGraph`]
///
/// One instance per visualization session. Not meant to be shared between
/// threads: parallel explorations each use their own materializer.
#[derive(Debug, Default)]
pub struct Materializer {
    graph: ExplorationGraph,
    next_id: u64,
    issued: HashSet<String>,
    config: VisualizerConfig,
}

impl Materializer {
    /// Create a session using the default label conventions
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session using the given configuration
    pub fn with_config(config: VisualizerConfig) -> Self {
        Self { config, ..Default::default() }
    }

    /// The session configuration
    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    /// Materialize one execution step below `parent` and return the new node
    ///
    /// Pass the returned reference back as `parent` for the step's successors.
    /// Passing the same parent several times produces sibling branches.
    ///
    /// # Panics
    ///
    /// If `parent` does not belong to this session's graph, or if the
    /// identifier counter produced an identifier that was already issued.
    pub fn add_step(
        &mut self,
        parent: Option<NodeRef>,
        step: &ExecutionStep,
        path_condition: Option<&PathCondition>,
        locals: &LocalBindings,
    ) -> NodeRef {
        if let Some(parent) = parent {
            self.ensure_owned(parent);
        }

        let id = self.next_id.to_string();
        self.next_id += 1;
        if !self.issued.insert(id.clone()) {
            error!(id = %id, "Node identifier issued twice");
            panic!("node identifier {id} issued twice");
        }

        let mut node = GraphNode::new(id);
        for attribute in classify(step, path_condition, locals, &self.config.label) {
            node.set_attribute(attribute);
        }
        debug!(
            id = %node.id,
            category = %step.category(),
            mnemonic = step.mnemonic(),
            "Materialized node"
        );

        let index = self.graph.add_node(node);
        if let Some(parent) = parent {
            self.graph.add_edge(parent.0, index, Transition);
            debug!(from = %self.graph[parent.0].id, to = %self.graph[index].id, "Added edge");
        }

        NodeRef(index)
    }

    fn ensure_owned(&self, node: NodeRef) {
        if self.graph.node_weight(node.0).is_none() {
            error!(index = node.0.index(), "Parent node does not belong to this graph");
            panic!("parent node {} does not belong to this graph", node.0.index());
        }
    }

    /// Look up a node
    pub fn node(&self, node: NodeRef) -> Option<&GraphNode> {
        self.graph.node_weight(node.0)
    }

    /// Number of nodes created so far
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges created so far
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// The parent of `node`, `None` for a root
    pub fn parent(&self, node: NodeRef) -> Option<NodeRef> {
        self.graph.neighbors_directed(node.0, Direction::Incoming).next().map(NodeRef)
    }

    /// Children of `node` in creation order
    pub fn children(&self, node: NodeRef) -> Vec<NodeRef> {
        let mut children: Vec<_> =
            self.graph.neighbors_directed(node.0, Direction::Outgoing).map(NodeRef).collect();
        children.sort();
        children
    }

    /// The destination graph
    pub fn graph(&self) -> &ExplorationGraph {
        &self.graph
    }

    /// End the session and take the destination graph
    pub fn into_graph(self) -> ExplorationGraph {
        self.graph
    }

    /// Serialize the graph in the DOT language
    ///
    /// Labels are emitted as-is apart from escaping double quotes, so the `\n`
    /// escapes they contain are interpreted by the DOT renderer.
    pub fn to_dot(&self) -> String {
        let dot = Dot::with_attr_getters(
            &self.graph,
            &[Config::EdgeNoLabel, Config::NodeNoLabel],
            &|_, _| String::new(),
            &|_, (_, node)| node.dot_attributes(),
        );
        format!("{dot}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_creation_order() {
        let mut m = Materializer::new();
        let locals = LocalBindings::new();

        let mut parent = None;
        for i in 0..5 {
            let step = ExecutionStep::other("NOP", format!("A.java:{i}"));
            let node = m.add_step(parent, &step, None, &locals);
            assert_eq!(m.node(node).unwrap().id, i.to_string());
            parent = Some(node);
        }
        assert_eq!(m.node_count(), 5);
        assert_eq!(m.edge_count(), 4);
    }

    #[test]
    fn test_attributes_round_trip_through_node() {
        let mut node = GraphNode::new("7".to_string());
        node.set_attribute(NodeAttribute::Label("L".to_string()));
        node.set_attribute(NodeAttribute::Color(NodeColor::Blue));
        node.set_attribute(NodeAttribute::Shape(NodeShape::Diamond));

        assert_eq!(node.to_string(), "7");
        assert_eq!(node.dot_attributes(), r#"label="L" color="blue" shape="diamond""#);
    }

    #[test]
    #[should_panic(expected = "does not belong to this graph")]
    fn test_foreign_parent_is_fatal() {
        let mut other = Materializer::new();
        let locals = LocalBindings::new();
        let step = ExecutionStep::other("NOP", "A.java:1");
        let _ = other.add_step(None, &step, None, &locals);
        let foreign = other.add_step(None, &step, None, &locals);

        let mut m = Materializer::new();
        m.add_step(Some(foreign), &step, None, &locals);
    }

    #[test]
    #[should_panic(expected = "issued twice")]
    fn test_reissued_identifier_is_fatal() {
        let mut m = Materializer::new();
        let locals = LocalBindings::new();
        let step = ExecutionStep::other("NOP", "A.java:1");
        m.add_step(None, &step, None, &locals);

        m.next_id = 0;
        m.add_step(None, &step, None, &locals);
    }
}
