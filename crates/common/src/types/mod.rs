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

//! Data model shared between the exploration side and the graph materializer

/// Local-variable binding snapshots of the top stack frame
pub mod bindings;
/// Path condition snapshots
pub mod path_condition;
/// Execution steps and their wire form
pub mod step;
/// Recorded exploration histories
pub mod trace;

pub use bindings::*;
pub use path_condition::*;
pub use step::*;
pub use trace::*;
