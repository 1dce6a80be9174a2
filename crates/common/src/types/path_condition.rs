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

use std::fmt;

use serde::{Deserialize, Serialize};

/// Snapshot of the accumulated path condition at one execution step
///
/// The condition is kept as opaque text in which clauses are conjoined by
/// [`PathCondition::CONJUNCTION`]. Nothing here parses the constraints themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathCondition {
    text: String,
}

impl PathCondition {
    /// Textual conjunction marker between clauses
    pub const CONJUNCTION: &'static str = "&&";

    /// Build a path condition from its textual form
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Build a path condition by conjoining `clauses` in order
    pub fn from_clauses<I, S>(clauses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        for (i, clause) in clauses.into_iter().enumerate() {
            if i != 0 {
                text.push_str(Self::CONJUNCTION);
            }
            text.push_str(clause.as_ref());
        }
        Self { text }
    }

    /// The textual form
    pub fn as_text(&self) -> &str {
        &self.text
    }

    /// Whether the condition has no text at all
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append a clause at the end of the conjunction
    pub fn conjoin(&mut self, clause: impl AsRef<str>) {
        if !self.text.is_empty() {
            self.text.push_str(Self::CONJUNCTION);
        }
        self.text.push_str(clause.as_ref());
    }
}

impl fmt::Display for PathCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl<S: AsRef<str>> FromIterator<S> for PathCondition {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_clauses(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_clauses_joins_with_conjunction() {
        let pc = PathCondition::from_clauses(["a>0", "b<10"]);
        assert_eq!(pc.as_text(), "a>0&&b<10");
        assert_eq!(pc.to_string(), "a>0&&b<10");
    }

    #[test]
    fn test_conjoin() {
        let mut pc = PathCondition::default();
        assert!(pc.is_empty());

        pc.conjoin("x>0");
        pc.conjoin("y==1");
        assert_eq!(pc, PathCondition::from_text("x>0&&y==1"));
    }

    #[test]
    fn test_serializes_as_plain_text() {
        let pc: PathCondition = ["x>0", "y<2"].into_iter().collect();
        assert_eq!(serde_json::to_string(&pc).unwrap(), r#""x>0&&y<2""#);
    }
}
