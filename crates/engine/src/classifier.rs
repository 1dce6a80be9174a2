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

//! Node attribute classification
//!
//! Maps one execution step to the display attributes of its graph node.
//!
//! | Category | Label                                              | Color | Shape   |
//! |----------|----------------------------------------------------|-------|---------|
//! | Call     | mnemonic, `Calling:`, invoked method               | red   | box     |
//! | Return   | mnemonic, position, path condition, `Returning to:`| red   | box     |
//! | Branch   | mnemonic, position, path condition                 | blue  | diamond |
//! | Other    | mnemonic, position, path condition                 | black | -       |
//!
//! Call labels describe what is about to happen, so they carry neither the
//! source position nor the path condition.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;
use symviz_common::types::{ExecutionStep, LocalBindings, PathCondition, StepKind};

use crate::{config::LabelStyle, render::render_path_condition};

/// Node color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum NodeColor {
    /// Calls and returns
    #[display("red")]
    Red,
    /// Conditional branches
    #[display("blue")]
    Blue,
    /// Everything else
    #[display("black")]
    Black,
}

/// Node shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum NodeShape {
    /// Calls and returns
    #[display("box")]
    Box,
    /// Conditional branches
    #[display("diamond")]
    Diamond,
}

/// A single display attribute of a graph node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeAttribute {
    /// Multi-line label text
    Label(String),
    /// Outline color
    Color(NodeColor),
    /// Outline shape
    Shape(NodeShape),
}

impl NodeAttribute {
    /// Attribute key in the graph description format
    pub fn key(&self) -> &'static str {
        match self {
            Self::Label(_) => "label",
            Self::Color(_) => "color",
            Self::Shape(_) => "shape",
        }
    }
}

impl fmt::Display for NodeAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label(label) => write!(f, "{}=\"{}\"", self.key(), label.replace('"', "\\\"")),
            Self::Color(color) => write!(f, "{}=\"{color}\"", self.key()),
            Self::Shape(shape) => write!(f, "{}=\"{shape}\"", self.key()),
        }
    }
}

/// Compute the ordered attributes (label, color, then shape if any) of the node for `step`
pub fn classify(
    step: &ExecutionStep,
    path_condition: Option<&PathCondition>,
    locals: &LocalBindings,
    style: &LabelStyle,
) -> Vec<NodeAttribute> {
    let lb = style.line_break.as_str();

    match step.kind() {
        StepKind::Call { target } => {
            let label = format!("{}{lb}{}{lb}{target}", step.mnemonic(), style.call_marker);
            vec![
                NodeAttribute::Label(label),
                NodeAttribute::Color(NodeColor::Red),
                NodeAttribute::Shape(NodeShape::Box),
            ]
        }
        StepKind::Return { returning_to } => {
            let mut label = positioned_label(step, path_condition, locals, style);
            if let Some(method) = returning_to {
                label.push_str(&style.return_marker);
                label.push_str(lb);
                label.push_str(method);
            }
            vec![
                NodeAttribute::Label(label),
                NodeAttribute::Color(NodeColor::Red),
                NodeAttribute::Shape(NodeShape::Box),
            ]
        }
        StepKind::Branch => vec![
            NodeAttribute::Label(positioned_label(step, path_condition, locals, style)),
            NodeAttribute::Color(NodeColor::Blue),
            NodeAttribute::Shape(NodeShape::Diamond),
        ],
        StepKind::Other => vec![
            NodeAttribute::Label(positioned_label(step, path_condition, locals, style)),
            NodeAttribute::Color(NodeColor::Black),
        ],
    }
}

/// `mnemonic`, `(position)` and the path condition block
fn positioned_label(
    step: &ExecutionStep,
    path_condition: Option<&PathCondition>,
    locals: &LocalBindings,
    style: &LabelStyle,
) -> String {
    let lb = style.line_break.as_str();
    let mut label = format!("{}{lb}({}){lb}", step.mnemonic(), step.source_position());
    label.push_str(&render_path_condition(locals, path_condition, style));
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label_of(attrs: &[NodeAttribute]) -> &str {
        match attrs.first() {
            Some(NodeAttribute::Label(label)) => label,
            other => panic!("expected a label first, got {other:?}"),
        }
    }

    fn sample_state() -> (PathCondition, LocalBindings) {
        let mut locals = LocalBindings::new();
        locals.bind("x", "X_0");
        (PathCondition::from_clauses(["X_0>3", "Y_1==2"]), locals)
    }

    #[test]
    fn test_branch_attributes() {
        let step = ExecutionStep::branch("IFEQ", "Foo.java:42");
        let pc = PathCondition::from_clauses(["x>0"]);

        let attrs = classify(&step, Some(&pc), &LocalBindings::new(), &LabelStyle::default());
        assert_eq!(
            attrs,
            vec![
                NodeAttribute::Label("IFEQ\\n(Foo.java:42)\\nx>0\r".to_string()),
                NodeAttribute::Color(NodeColor::Blue),
                NodeAttribute::Shape(NodeShape::Diamond),
            ]
        );
    }

    #[test]
    fn test_call_label_excludes_path_condition() {
        let (pc, locals) = sample_state();
        let step = ExecutionStep::call("INVOKEVIRTUAL", "Foo.java:10", "Bar.baz()V");

        let attrs = classify(&step, Some(&pc), &locals, &LabelStyle::default());
        let label = label_of(&attrs);
        assert_eq!(label, "INVOKEVIRTUAL\\nCalling:\\nBar.baz()V");
        assert!(!label.contains("X_0"));
        assert!(!label.contains("Foo.java"));
        assert_eq!(attrs[1], NodeAttribute::Color(NodeColor::Red));
        assert_eq!(attrs[2], NodeAttribute::Shape(NodeShape::Box));
    }

    #[test]
    fn test_return_with_successor() {
        let (pc, locals) = sample_state();
        let step = ExecutionStep::ret("IRETURN", "Foo.java:12", Some("Main.run()V".to_string()));

        let attrs = classify(&step, Some(&pc), &locals, &LabelStyle::default());
        assert_eq!(
            label_of(&attrs),
            "IRETURN\\n(Foo.java:12)\\nx=X_0&&\\nX_0>3 &&\\nY_1==2\rReturning to:\\nMain.run()V"
        );
        assert_eq!(
            attrs[1..],
            [NodeAttribute::Color(NodeColor::Red), NodeAttribute::Shape(NodeShape::Box)]
        );
    }

    #[test]
    fn test_return_without_successor() {
        let step = ExecutionStep::ret("RETURN", "Main.java:3", None);

        let attrs = classify(&step, None, &LocalBindings::new(), &LabelStyle::default());
        assert_eq!(label_of(&attrs), "RETURN\\n(Main.java:3)\\n\r");
    }

    #[test]
    fn test_other_has_no_shape() {
        let (pc, locals) = sample_state();
        let step = ExecutionStep::other("ISTORE", "Foo.java:20");

        let attrs = classify(&step, Some(&pc), &locals, &LabelStyle::default());
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[1], NodeAttribute::Color(NodeColor::Black));
        assert!(!attrs.iter().any(|a| matches!(a, NodeAttribute::Shape(_))));
    }

    #[test]
    fn test_every_category_has_one_label_and_one_color() {
        let steps = [
            ExecutionStep::call("INVOKESTATIC", "A.java:1", "A.f()V"),
            ExecutionStep::ret("RETURN", "A.java:2", None),
            ExecutionStep::branch("IFNE", "A.java:3"),
            ExecutionStep::other("NOP", "A.java:4"),
        ];
        for step in &steps {
            let attrs = classify(step, None, &LocalBindings::new(), &LabelStyle::default());
            let count = |key: &str| attrs.iter().filter(|a| a.key() == key).count();
            assert_eq!(count("label"), 1, "{step:?}");
            assert_eq!(count("color"), 1, "{step:?}");
            assert!(count("shape") <= 1, "{step:?}");
        }
    }

    #[test]
    fn test_attribute_display_escapes_quotes() {
        let attr = NodeAttribute::Label("say \"hi\"".to_string());
        assert_eq!(attr.to_string(), "label=\"say \\\"hi\\\"\"");
        assert_eq!(NodeAttribute::Shape(NodeShape::Diamond).to_string(), "shape=\"diamond\"");
    }
}
