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

use crate::types::StepCategory;

const INVOKE_MNEMONICS: &[&str] =
    &["INVOKEVIRTUAL", "INVOKESPECIAL", "INVOKESTATIC", "INVOKEINTERFACE", "INVOKEDYNAMIC"];

const RETURN_MNEMONICS: &[&str] =
    &["RETURN", "IRETURN", "LRETURN", "FRETURN", "DRETURN", "ARETURN"];

const BRANCH_MNEMONICS: &[&str] = &[
    "IFEQ",
    "IFNE",
    "IFLT",
    "IFGE",
    "IFGT",
    "IFLE",
    "IF_ICMPEQ",
    "IF_ICMPNE",
    "IF_ICMPLT",
    "IF_ICMPGE",
    "IF_ICMPGT",
    "IF_ICMPLE",
    "IF_ACMPEQ",
    "IF_ACMPNE",
    "IFNULL",
    "IFNONNULL",
];

/// Extended trait for JVM instruction mnemonic analysis
///
/// Lets a recorded step that does not carry an explicit category still be
/// classified. Matching is case-insensitive.
pub trait MnemonicTr {
    /// Check if this mnemonic is a method invocation
    ///
    /// # Example
    /// ```rust
    /// use symviz_common::MnemonicTr;
    ///
    /// assert!("INVOKEVIRTUAL".is_invoke());
    /// assert!("invokestatic".is_invoke());
    /// assert!(!"IRETURN".is_invoke());
    /// ```
    fn is_invoke(&self) -> bool;

    /// Check if this mnemonic returns from the current method
    ///
    /// # Example
    /// ```rust
    /// use symviz_common::MnemonicTr;
    ///
    /// assert!("ARETURN".is_return());
    /// assert!(!"RET".is_return()); // subroutine return, not a method return
    /// ```
    fn is_return(&self) -> bool;

    /// Check if this mnemonic is a conditional branch
    ///
    /// `GOTO`, `TABLESWITCH` and `LOOKUPSWITCH` are not conditional branches.
    fn is_conditional_branch(&self) -> bool;

    /// The step category implied by this mnemonic
    ///
    /// # Example
    /// ```rust
    /// use symviz_common::{types::StepCategory, MnemonicTr};
    ///
    /// assert_eq!("IF_ICMPLT".category_hint(), StepCategory::Branch);
    /// assert_eq!("ILOAD".category_hint(), StepCategory::Other);
    /// ```
    fn category_hint(&self) -> StepCategory {
        if self.is_invoke() {
            StepCategory::Call
        } else if self.is_return() {
            StepCategory::Return
        } else if self.is_conditional_branch() {
            StepCategory::Branch
        } else {
            StepCategory::Other
        }
    }
}

fn matches_any(mnemonic: &str, table: &[&str]) -> bool {
    let mnemonic = mnemonic.trim();
    table.iter().any(|m| m.eq_ignore_ascii_case(mnemonic))
}

impl MnemonicTr for str {
    fn is_invoke(&self) -> bool {
        matches_any(self, INVOKE_MNEMONICS)
    }

    fn is_return(&self) -> bool {
        matches_any(self, RETURN_MNEMONICS)
    }

    fn is_conditional_branch(&self) -> bool {
        matches_any(self, BRANCH_MNEMONICS)
    }
}

impl MnemonicTr for String {
    fn is_invoke(&self) -> bool {
        self.as_str().is_invoke()
    }

    fn is_return(&self) -> bool {
        self.as_str().is_return()
    }

    fn is_conditional_branch(&self) -> bool {
        self.as_str().is_conditional_branch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_are_disjoint() {
        for table in [INVOKE_MNEMONICS, RETURN_MNEMONICS, BRANCH_MNEMONICS] {
            for m in table {
                let hits = [m.is_invoke(), m.is_return(), m.is_conditional_branch()]
                    .iter()
                    .filter(|hit| **hit)
                    .count();
                assert_eq!(hits, 1, "{m} matched {hits} categories");
            }
        }
    }

    #[test]
    fn test_unconditional_jumps_are_other() {
        assert_eq!("GOTO".category_hint(), StepCategory::Other);
        assert_eq!("TABLESWITCH".category_hint(), StepCategory::Other);
        assert_eq!(" ifnonnull ".to_string().category_hint(), StepCategory::Branch);
    }
}
