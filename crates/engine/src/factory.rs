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

//! The seam between an exploration listener and the graph it feeds

use symviz_common::types::{ExecutionStep, LocalBindings, PathCondition};

use crate::materializer::{Materializer, NodeRef};

/// Everything observed at one execution step
#[derive(Debug, Clone, Copy)]
pub struct StepSnapshot<'a> {
    /// The instruction
    pub step: &'a ExecutionStep,
    /// Path condition, absent before any constraint was collected
    pub path_condition: Option<&'a PathCondition>,
    /// Locals of the top stack frame
    pub locals: &'a LocalBindings,
}

impl<'a> StepSnapshot<'a> {
    /// Bundle the state observed at one step
    pub fn new(
        step: &'a ExecutionStep,
        path_condition: Option<&'a PathCondition>,
        locals: &'a LocalBindings,
    ) -> Self {
        Self { step, path_condition, locals }
    }
}

/// Builds one tree node per observed step
///
/// Exploration listeners are written against this trait so the node
/// representation can be swapped without touching the listener.
pub trait NodeFactory {
    /// Handle of a constructed node
    type Node;

    /// Construct the node for `snapshot` as a child of `parent` (a root when `None`)
    fn construct_node(
        &mut self,
        parent: Option<&Self::Node>,
        snapshot: &StepSnapshot<'_>,
    ) -> Self::Node;
}

impl NodeFactory for Materializer {
    type Node = NodeRef;

    fn construct_node(&mut self, parent: Option<&NodeRef>, snapshot: &StepSnapshot<'_>) -> NodeRef {
        self.add_step(parent.copied(), snapshot.step, snapshot.path_condition, snapshot.locals)
    }
}
