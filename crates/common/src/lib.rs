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

//! SymViz Common - Shared functionality for SymViz components
//!
//! This crate provides the data model reported by an exploration engine
//! (execution steps, path conditions, local bindings, recorded traces) and
//! the logging setup shared by every SymViz component.

/// Execution steps, path conditions, local bindings and recorded exploration traces
pub mod types;

/// Logging setup and utilities for consistent logging across SymViz components
pub mod logging;
/// JVM mnemonic analysis used to categorize recorded steps
pub mod mnemonic;

pub use logging::*;
pub use mnemonic::*;
