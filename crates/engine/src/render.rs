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

//! Rendering of the path condition block shown in node labels

use symviz_common::types::{LocalBindings, PathCondition};
use tracing::trace;

use crate::config::LabelStyle;

/// Render the local bindings and the path condition into one text block
///
/// Bound locals come first as `name=value`, in declaration order, separated by
/// the binding separator. If any local was rendered the separator is repeated
/// once more. The path condition text is then split on the conjunction token
/// and re-joined with the clause separator. The terminator closes the block.
///
/// The path condition is treated as opaque text; no attempt is made to parse it.
pub fn render_path_condition(
    locals: &LocalBindings,
    path_condition: Option<&PathCondition>,
    style: &LabelStyle,
) -> String {
    let mut out = String::new();

    let mut emitted = false;
    for (name, value) in locals.bound() {
        if emitted {
            out.push_str(&style.binding_separator);
        }
        out.push_str(name);
        out.push('=');
        out.push_str(value);
        emitted = true;
    }
    if emitted {
        out.push_str(&style.binding_separator);
    }

    if let Some(pc) = path_condition {
        let clauses = split_clauses(pc.as_text(), &style.conjunction);
        for (i, clause) in clauses.iter().enumerate() {
            out.push_str(clause);
            if i != clauses.len() - 1 {
                out.push_str(&style.clause_separator);
            }
        }
    }

    out.push_str(&style.terminator);
    trace!(rendered = ?out, "Rendered path condition");
    out
}

/// Split `text` on `conjunction`, dropping trailing empty pieces
///
/// Text without the conjunction yields itself, even when empty.
pub fn split_clauses<'a>(text: &'a str, conjunction: &str) -> Vec<&'a str> {
    if conjunction.is_empty() || !text.contains(conjunction) {
        return vec![text];
    }

    let mut clauses: Vec<&str> = text.split(conjunction).collect();
    while clauses.last().is_some_and(|c| c.is_empty()) {
        clauses.pop();
    }
    clauses
}
