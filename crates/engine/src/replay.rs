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

//! Materialization of recorded exploration traces

use std::collections::HashMap;

use symviz_common::types::{ExecutionStep, ExplorationTrace, StepError};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    config::VisualizerConfig,
    factory::{NodeFactory, StepSnapshot},
    materializer::Materializer,
};

/// Errors raised while replaying a recorded trace
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    /// An entry refers to a parent that has not been materialized before it
    #[error("trace entry {id} refers to parent {parent_id}, which has not been materialized yet")]
    UnknownParent {
        /// Offending entry
        id: usize,
        /// Referenced parent
        parent_id: usize,
    },
    /// Two entries share the same id
    #[error("trace entry id {id} appears more than once")]
    DuplicateEntry {
        /// Repeated id
        id: usize,
    },
    /// An entry does not describe a valid step
    #[error("trace entry {id}: {source}")]
    InvalidStep {
        /// Offending entry
        id: usize,
        /// Underlying step error
        #[source]
        source: StepError,
    },
}

/// Feed every entry of `trace`, in order, to `factory`
///
/// Returns the constructed nodes in entry order. A parent must appear before
/// its children. Nothing is constructed past the first invalid entry.
pub fn replay_into<F>(
    trace: &ExplorationTrace,
    factory: &mut F,
) -> Result<Vec<F::Node>, ReplayError>
where
    F: NodeFactory,
    F::Node: Clone,
{
    let mut by_id: HashMap<usize, F::Node> = HashMap::with_capacity(trace.len());
    let mut nodes = Vec::with_capacity(trace.len());

    for entry in trace {
        let step = ExecutionStep::try_from(entry.step.clone())
            .map_err(|source| ReplayError::InvalidStep { id: entry.id, source })?;

        let parent = match entry.parent_id {
            Some(parent_id) => Some(
                by_id
                    .get(&parent_id)
                    .ok_or(ReplayError::UnknownParent { id: entry.id, parent_id })?,
            ),
            None => None,
        };

        if by_id.contains_key(&entry.id) {
            return Err(ReplayError::DuplicateEntry { id: entry.id });
        }

        let snapshot = StepSnapshot::new(&step, entry.path_condition.as_ref(), &entry.locals);
        let node = factory.construct_node(parent, &snapshot);
        debug!(entry = entry.id, parent = ?entry.parent_id, "Replayed trace entry");

        by_id.insert(entry.id, node.clone());
        nodes.push(node);
    }

    Ok(nodes)
}

/// Materialize `trace` into a fresh session using `config`
pub fn replay(
    trace: &ExplorationTrace,
    config: VisualizerConfig,
) -> Result<Materializer, ReplayError> {
    let mut materializer = Materializer::with_config(config);
    replay_into(trace, &mut materializer)?;

    info!(
        nodes = materializer.node_count(),
        edges = materializer.edge_count(),
        "Materialized exploration trace"
    );
    Ok(materializer)
}
