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

use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

use super::{LocalBindings, PathCondition, StepCategory, StepRecord};

/// Recorded exploration history, in the order steps were discovered
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExplorationTrace {
    inner: Vec<TraceEntry>,
}

impl Deref for ExplorationTrace {
    type Target = Vec<TraceEntry>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ExplorationTrace {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl ExplorationTrace {
    /// Convert trace to serde_json::Value
    pub fn to_json_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Parse a trace from its JSON form
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Create a new empty trace
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a trace entry to this trace
    pub fn push(&mut self, entry: TraceEntry) {
        self.inner.push(entry);
    }

    /// Record a newly observed step below `parent_id` and return its id
    ///
    /// The id is the entry's index; the depth is one more than the parent's.
    pub fn record(
        &mut self,
        parent_id: Option<usize>,
        step: StepRecord,
        path_condition: Option<PathCondition>,
        locals: LocalBindings,
    ) -> usize {
        let id = self.inner.len();
        let depth = parent_id.and_then(|p| self.inner.get(p)).map_or(0, |p| p.depth + 1);
        self.inner.push(TraceEntry { id, parent_id, depth, step, path_condition, locals });
        id
    }

    /// Get the number of trace entries
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if the trace is empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl IntoIterator for ExplorationTrace {
    type Item = TraceEntry;
    type IntoIter = std::vec::IntoIter<TraceEntry>;
    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a> IntoIterator for &'a ExplorationTrace {
    type Item = &'a TraceEntry;
    type IntoIter = std::slice::Iter<'a, TraceEntry>;
    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

/// Single recorded step together with the state observed at that step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Unique ID of this entry (its index in the trace vector)
    pub id: usize,
    /// ID of the parent entry (None for the root of an exploration)
    pub parent_id: Option<usize>,
    /// Depth in the exploration tree (0 = root)
    #[serde(default)]
    pub depth: usize,
    /// The observed instruction
    pub step: StepRecord,
    /// Path condition at this step, absent before any constraint was collected
    #[serde(default)]
    pub path_condition: Option<PathCondition>,
    /// Locals of the top stack frame at this step
    #[serde(default)]
    pub locals: LocalBindings,
}

// Pretty print for ExplorationTrace
impl ExplorationTrace {
    /// Print the exploration tree showing parent-child relationships
    pub fn print_trace_tree(&self) {
        println!();
        println!(
            "\x1b[36m╔══════════════════════════════════════════════════════════════════╗\x1b[0m"
        );
        println!(
            "\x1b[36m║                      EXPLORATION TREE                            ║\x1b[0m"
        );
        println!(
            "\x1b[36m╚══════════════════════════════════════════════════════════════════╝\x1b[0m"
        );
        println!();

        let roots = self.roots();
        if roots.is_empty() {
            println!("  \x1b[90mNo trace entries found\x1b[0m");
            return;
        }

        for (i, root) in roots.iter().enumerate() {
            let is_last = i == roots.len() - 1;
            self.print_trace_entry(root, 0, is_last, vec![]);
        }

        println!();
        println!(
            "\x1b[36m══════════════════════════════════════════════════════════════════\x1b[0m"
        );
        self.print_summary();
    }

    fn print_trace_entry(
        &self,
        entry: &TraceEntry,
        indent_level: usize,
        is_last: bool,
        mut prefix: Vec<bool>,
    ) {
        let mut tree_str = String::new();
        for &is_empty in &prefix {
            tree_str.push_str(if is_empty { "    " } else { "\x1b[90m│\x1b[0m   " });
        }

        let connector = if indent_level > 0 {
            if is_last {
                "\x1b[90m└──\x1b[0m "
            } else {
                "\x1b[90m├──\x1b[0m "
            }
        } else {
            ""
        };
        tree_str.push_str(connector);

        let category = entry.step.effective_category();
        let color = match category {
            StepCategory::Call | StepCategory::Return => "\x1b[31m",
            StepCategory::Branch => "\x1b[34m",
            StepCategory::Other => "\x1b[37m",
        };

        print!("{tree_str}{color}{:14}\x1b[0m", entry.step.mnemonic);
        if !entry.step.source_position.is_empty() {
            print!(" \x1b[90m({})\x1b[0m", entry.step.source_position);
        }
        if let Some(target) = &entry.step.invoked_target {
            print!(" \x1b[93m→ {target}\x1b[0m");
        }
        if let Some(successor) = &entry.step.successor_method {
            print!(" \x1b[93m↩ {successor}\x1b[0m");
        }
        println!();

        if let Some(pc) = entry.path_condition.as_ref().filter(|pc| !pc.is_empty()) {
            let padding = "    ".repeat(indent_level + 1);
            println!("{padding}\x1b[90m└ PC: {pc}\x1b[0m");
        }

        let children = self.get_children(entry.id);

        if indent_level > 0 {
            prefix.push(is_last);
        }

        for (i, child) in children.iter().enumerate() {
            let child_is_last = i == children.len() - 1;
            self.print_trace_entry(child, indent_level + 1, child_is_last, prefix.clone());
        }
    }

    fn print_summary(&self) {
        let count = |category: StepCategory| {
            self.inner.iter().filter(|e| e.step.effective_category() == category).count()
        };
        let branching_points =
            self.inner.iter().filter(|e| self.get_children(e.id).len() > 1).count();
        let max_depth = self.inner.iter().map(|e| e.depth).max().unwrap_or(0);

        println!("\x1b[36mSummary:\x1b[0m");
        println!(
            "  Total: {} | \x1b[31mCalls: {}\x1b[0m | \x1b[31mReturns: {}\x1b[0m | \x1b[34mBranches: {}\x1b[0m | Other: {} | Forks: {} | Depth: {}",
            self.inner.len(),
            count(StepCategory::Call),
            count(StepCategory::Return),
            count(StepCategory::Branch),
            count(StepCategory::Other),
            branching_points,
            max_depth
        );
    }

    /// Entries without a parent
    pub fn roots(&self) -> Vec<&TraceEntry> {
        self.inner.iter().filter(|entry| entry.parent_id.is_none()).collect()
    }

    /// Get the parent trace entry for a given trace entry ID
    pub fn get_parent(&self, trace_id: usize) -> Option<&TraceEntry> {
        self.inner
            .get(trace_id)
            .and_then(|entry| entry.parent_id.and_then(|parent_id| self.inner.get(parent_id)))
    }

    /// Get all children trace entries for a given trace entry ID
    pub fn get_children(&self, trace_id: usize) -> Vec<&TraceEntry> {
        self.inner.iter().filter(|entry| entry.parent_id == Some(trace_id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(category: StepCategory, mnemonic: &str) -> StepRecord {
        StepRecord {
            category: Some(category),
            mnemonic: mnemonic.to_string(),
            source_position: "T.java:1".to_string(),
            ..Default::default()
        }
    }

    fn branching_trace() -> ExplorationTrace {
        let mut trace = ExplorationTrace::new();
        let root =
            trace.record(None, step(StepCategory::Branch, "IFLE"), None, LocalBindings::new());
        let left = trace.record(
            Some(root),
            step(StepCategory::Other, "ILOAD"),
            Some(PathCondition::from_clauses(["x<=0"])),
            LocalBindings::new(),
        );
        trace.record(
            Some(root),
            step(StepCategory::Other, "ISTORE"),
            Some(PathCondition::from_clauses(["x>0"])),
            LocalBindings::new(),
        );
        trace.record(Some(left), step(StepCategory::Return, "RETURN"), None, LocalBindings::new());
        trace
    }

    #[test]
    fn test_record_assigns_ids_and_depths() {
        let trace = branching_trace();

        let ids: Vec<_> = trace.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        let depths: Vec<_> = trace.iter().map(|e| e.depth).collect();
        assert_eq!(depths, vec![0, 1, 1, 2]);
    }

    #[test]
    fn test_parent_and_children_queries() {
        let trace = branching_trace();

        assert_eq!(trace.roots().len(), 1);
        assert!(trace.get_parent(0).is_none());
        assert_eq!(trace.get_parent(3).map(|e| e.id), Some(1));

        let children: Vec<_> = trace.get_children(0).iter().map(|e| e.id).collect();
        assert_eq!(children, vec![1, 2]);
        assert!(trace.get_children(2).is_empty());
    }

    #[test]
    fn test_json_round_trip_preserves_structure() {
        let trace = branching_trace();
        let json = trace.to_json_value().unwrap().to_string();
        let parsed = ExplorationTrace::from_json(&json).unwrap();

        assert_eq!(parsed.len(), trace.len());
        assert_eq!(parsed[3].parent_id, Some(1));
        assert_eq!(parsed[1].path_condition, Some(PathCondition::from_text("x<=0")));
    }

    #[test]
    fn test_print_trace_tree_does_not_panic() {
        branching_trace().print_trace_tree();
        ExplorationTrace::new().print_trace_tree();
    }
}
