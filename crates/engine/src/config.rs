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

//! Configuration of the textual conventions used in node labels
//!
//! The defaults reproduce the label format expected by existing downstream
//! tooling bit-for-bit. Overrides are read from a TOML file.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Environment variable overriding the configuration file location
pub const CONFIG_PATH_ENV: &str = "SYMVIZ_CONFIG";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    /// Label text conventions
    pub label: LabelStyle,
}

/// Tokens used when composing node labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelStyle {
    /// Line break inside a label. The default is the two-character DOT escape `\n`.
    pub line_break: String,
    /// Token the path condition text is split on
    pub conjunction: String,
    /// Separator placed between re-joined path condition clauses
    pub clause_separator: String,
    /// Separator placed between rendered local bindings, and after the last one
    pub binding_separator: String,
    /// Terminator appended to every rendered path condition block
    pub terminator: String,
    /// Heading placed before the invoked method of a call
    pub call_marker: String,
    /// Heading placed before the method a return goes back to
    pub return_marker: String,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            line_break: "\\n".to_string(),
            conjunction: "&&".to_string(),
            clause_separator: " &&\\n".to_string(),
            binding_separator: "&&\\n".to_string(),
            terminator: "\r".to_string(),
            call_marker: "Calling:".to_string(),
            return_marker: "Returning to:".to_string(),
        }
    }
}

impl VisualizerConfig {
    /// Get the config file path: `$SYMVIZ_CONFIG` if set, `~/.symviz.toml` otherwise
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let home =
            dirs::home_dir().ok_or_else(|| eyre::eyre!("Unable to determine home directory"))?;
        Ok(home.join(".symviz.toml"))
    }

    /// Load configuration from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        Self::load_or_default(&Self::config_path()?)
    }

    /// Load configuration from `path`, using defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        Self::load_from(path)
    }

    /// Load configuration from `path`
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path:?}"))?;

        let config: Self =
            toml::from_str(&content).with_context(|| "Failed to parse config file as TOML")?;

        debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize config to TOML")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {path:?}"))?;

        debug!("Saved configuration to {:?}", path);
        Ok(())
    }
}
