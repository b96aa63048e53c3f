use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::build_mode::BuildMode;
use crate::color::Color;
use crate::context::ContextHandle;
use crate::error::ConfigError;
use crate::level::{LevelSet, Severity};

/// Per-logger settings. Every field is optional in the json form, missing
/// fields keep their defaults.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
	pub levels_in_release: LevelSet,
	pub levels_in_debug: LevelSet,
	pub levels_in_editor: LevelSet,

	pub use_action_in_release: bool,
	pub use_action_in_debug: bool,
	pub use_action_in_editor: bool,

	/// Only honoured in the editor.
	pub use_color: bool,
	pub default_color: Color,

	/// Context used when a call doesn't pass one.
	pub cached_context: Option<ContextHandle>,
}

impl Default for LoggerConfig {
	fn default() -> Self {
		LoggerConfig {
			levels_in_release: Severity::Exception | Severity::Error,
			levels_in_debug: Severity::Warning | Severity::Exception | Severity::Error,
			levels_in_editor: LevelSet::ALL,

			use_action_in_release: false,
			use_action_in_debug: false,
			use_action_in_editor: true,

			use_color: false,
			default_color: Color::WHITE,

			cached_context: None,
		}
	}
}

impl LoggerConfig {
	pub fn levels(&self, mode: BuildMode) -> LevelSet {
		match mode {
			BuildMode::ReleaseBuild => self.levels_in_release,
			BuildMode::DebugBuild => self.levels_in_debug,
			BuildMode::Editor => self.levels_in_editor,
		}
	}

	pub fn levels_mut(&mut self, mode: BuildMode) -> &mut LevelSet {
		match mode {
			BuildMode::ReleaseBuild => &mut self.levels_in_release,
			BuildMode::DebugBuild => &mut self.levels_in_debug,
			BuildMode::Editor => &mut self.levels_in_editor,
		}
	}

	/// Accepts a [`LevelSet`], a single [`Severity`] or a
	/// [`Threshold`](crate::Threshold).
	pub fn set_levels(&mut self, mode: BuildMode, levels: impl Into<LevelSet>) {
		*self.levels_mut(mode) = levels.into();
	}

	pub fn use_action(&self, mode: BuildMode) -> bool {
		match mode {
			BuildMode::ReleaseBuild => self.use_action_in_release,
			BuildMode::DebugBuild => self.use_action_in_debug,
			BuildMode::Editor => self.use_action_in_editor,
		}
	}

	pub fn set_use_action(&mut self, mode: BuildMode, enabled: bool) {
		match mode {
			BuildMode::ReleaseBuild => self.use_action_in_release = enabled,
			BuildMode::DebugBuild => self.use_action_in_debug = enabled,
			BuildMode::Editor => self.use_action_in_editor = enabled,
		}
	}

	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		Ok(serde_json::from_str(json)?)
	}

	pub fn to_json(&self) -> Result<String, ConfigError> {
		Ok(serde_json::to_string_pretty(self)?)
	}

	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let contents = std::fs::read_to_string(path)?;
		let config = Self::from_json(&contents)?;
		debug!("Logger config loaded from {}", path.display());
		Ok(config)
	}

	pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
		std::fs::write(path, self.to_json()?)?;
		debug!("Logger config saved to {}", path.display());
		Ok(())
	}
}
