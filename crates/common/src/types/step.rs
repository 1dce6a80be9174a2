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

use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::MnemonicTr;

/// Semantic category of an execution step
///
/// The set is closed: every instruction observed by the exploration engine falls
/// into exactly one of these, with [`StepCategory::Other`] as the catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum StepCategory {
    /// Method invocation
    #[display("call")]
    Call,
    /// Return from the current method
    #[display("return")]
    Return,
    /// Conditional branch
    #[display("branch")]
    Branch,
    /// Any other instruction
    #[display("other")]
    Other,
}

/// Category-specific payload of an execution step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepKind {
    /// Method invocation
    Call {
        /// Fully-qualified name of the invoked method
        target: String,
    },
    /// Return from the current method
    Return {
        /// Enclosing method of the successor instruction, if any
        returning_to: Option<String>,
    },
    /// Conditional branch
    Branch,
    /// Any other instruction
    Other,
}

impl StepKind {
    /// The category tag of this payload
    pub fn category(&self) -> StepCategory {
        match self {
            Self::Call { .. } => StepCategory::Call,
            Self::Return { .. } => StepCategory::Return,
            Self::Branch => StepCategory::Branch,
            Self::Other => StepCategory::Other,
        }
    }
}

/// One observed instruction occurrence reported by the exploration engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionStep {
    mnemonic: String,
    source_position: String,
    kind: StepKind,
}

impl ExecutionStep {
    /// Create a new execution step
    pub fn new(
        mnemonic: impl Into<String>,
        source_position: impl Into<String>,
        kind: StepKind,
    ) -> Self {
        Self { mnemonic: mnemonic.into(), source_position: source_position.into(), kind }
    }

    /// Create a call step invoking `target`
    pub fn call(
        mnemonic: impl Into<String>,
        source_position: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self::new(mnemonic, source_position, StepKind::Call { target: target.into() })
    }

    /// Create a return step, optionally naming the method control returns to
    pub fn ret(
        mnemonic: impl Into<String>,
        source_position: impl Into<String>,
        returning_to: Option<String>,
    ) -> Self {
        Self::new(mnemonic, source_position, StepKind::Return { returning_to })
    }

    /// Create a conditional branch step
    pub fn branch(mnemonic: impl Into<String>, source_position: impl Into<String>) -> Self {
        Self::new(mnemonic, source_position, StepKind::Branch)
    }

    /// Create a step of no particular category
    pub fn other(mnemonic: impl Into<String>, source_position: impl Into<String>) -> Self {
        Self::new(mnemonic, source_position, StepKind::Other)
    }

    /// Display name of the instruction
    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    /// Source position, e.g. `Foo.java:42`
    pub fn source_position(&self) -> &str {
        &self.source_position
    }

    /// Category-specific payload
    pub fn kind(&self) -> &StepKind {
        &self.kind
    }

    /// Category tag
    pub fn category(&self) -> StepCategory {
        self.kind.category()
    }
}

/// Errors raised when a step record does not describe a valid execution step
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    /// A call step was reported without the method it invokes
    #[error("call step `{mnemonic}` has no invoked target")]
    MissingInvokedTarget {
        /// Mnemonic of the offending step
        mnemonic: String,
    },
    /// A step was reported without a mnemonic
    #[error("step at `{source_position}` has an empty mnemonic")]
    EmptyMnemonic {
        /// Source position of the offending step
        source_position: String,
    },
}

/// Flat wire form of an execution step, as recorded by an exploration listener
///
/// When `category` is omitted it is inferred from the mnemonic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Reported category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<StepCategory>,
    /// Display name of the instruction
    pub mnemonic: String,
    /// Source position
    #[serde(default)]
    pub source_position: String,
    /// Invoked method, for call steps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoked_target: Option<String>,
    /// Enclosing method of the successor instruction, for return steps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successor_method: Option<String>,
}

impl StepRecord {
    /// The reported category, or the one implied by the mnemonic
    pub fn effective_category(&self) -> StepCategory {
        self.category.unwrap_or_else(|| self.mnemonic.category_hint())
    }
}

impl TryFrom<StepRecord> for ExecutionStep {
    type Error = StepError;

    fn try_from(record: StepRecord) -> Result<Self, Self::Error> {
        if record.mnemonic.is_empty() {
            return Err(StepError::EmptyMnemonic { source_position: record.source_position });
        }

        let kind = match record.effective_category() {
            StepCategory::Call => {
                let Some(target) = record.invoked_target else {
                    return Err(StepError::MissingInvokedTarget { mnemonic: record.mnemonic });
                };
                StepKind::Call { target }
            }
            StepCategory::Return => StepKind::Return { returning_to: record.successor_method },
            category @ (StepCategory::Branch | StepCategory::Other) => {
                if record.invoked_target.is_some() || record.successor_method.is_some() {
                    debug!(%category, mnemonic = %record.mnemonic, "Ignoring call/return fields");
                }
                if category == StepCategory::Branch {
                    StepKind::Branch
                } else {
                    StepKind::Other
                }
            }
        };

        Ok(Self { mnemonic: record.mnemonic, source_position: record.source_position, kind })
    }
}

impl From<&ExecutionStep> for StepRecord {
    fn from(step: &ExecutionStep) -> Self {
        let (invoked_target, successor_method) = match step.kind() {
            StepKind::Call { target } => (Some(target.clone()), None),
            StepKind::Return { returning_to } => (None, returning_to.clone()),
            StepKind::Branch | StepKind::Other => (None, None),
        };

        Self {
            category: Some(step.category()),
            mnemonic: step.mnemonic.clone(),
            source_position: step.source_position.clone(),
            invoked_target,
            successor_method,
        }
    }
}
