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

use std::{
    fmt,
    ops::{Deref, DerefMut},
};

use serde::{Deserialize, Serialize};

/// One local variable of the current stack frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalBinding {
    /// Variable name
    pub name: String,
    /// Rendered symbolic value attached to the variable, if any
    #[serde(default)]
    pub value: Option<String>,
}

/// Locals of the current stack frame, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalBindings {
    inner: Vec<LocalBinding>,
}

impl Deref for LocalBindings {
    type Target = Vec<LocalBinding>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for LocalBindings {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl LocalBindings {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a local carrying a symbolic value
    pub fn bind(&mut self, name: impl Into<String>, value: impl fmt::Display) -> &mut Self {
        self.inner.push(LocalBinding { name: name.into(), value: Some(value.to_string()) });
        self
    }

    /// Append a local with no symbolic attachment
    pub fn declare(&mut self, name: impl Into<String>) -> &mut Self {
        self.inner.push(LocalBinding { name: name.into(), value: None });
        self
    }

    /// Locals that carry a symbolic value, in declaration order
    pub fn bound(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.inner.iter().filter_map(|b| b.value.as_deref().map(|v| (b.name.as_str(), v)))
    }
}

impl<N: Into<String>> FromIterator<(N, Option<String>)> for LocalBindings {
    fn from_iter<I: IntoIterator<Item = (N, Option<String>)>>(iter: I) -> Self {
        Self {
            inner: iter
                .into_iter()
                .map(|(name, value)| LocalBinding { name: name.into(), value })
                .collect(),
        }
    }
}
