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

//! SymViz Engine - exploration tree materialization
//!
//! Turns the execution steps reported by a symbolic-execution engine into a
//! directed graph with one labeled node per step and one edge per
//! parent-to-child transition.
//!
//! ```text
//! engine ──(parent, step, path condition, locals)──▶ Materializer
//!                                                      ├─ classifier ── render
//!                                                      └─ petgraph graph ──▶ DOT
//! ```

/// Node attribute classification of execution steps
pub mod classifier;
/// Label style configuration
pub mod config;
/// Node factory trait implemented by the materializer
pub mod factory;
/// Session-owned graph construction
pub mod materializer;
/// Path condition rendering
pub mod render;
/// Replay of recorded exploration traces
pub mod replay;

pub use classifier::*;
pub use config::*;
pub use factory::*;
pub use materializer::*;
pub use render::*;
pub use replay::*;
