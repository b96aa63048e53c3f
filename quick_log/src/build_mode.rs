use std::ffi::OsStr;
use std::fmt::{Display, Formatter};

use log::debug;
use serde::{Deserialize, Serialize};

/// Environment variable that marks the process as running inside the editor.
pub const EDITOR_ENV_VAR: &str = "QUICK_LOG_EDITOR";

/// Questions asked about the host when resolving a [`BuildMode`].
pub trait Environment {
	/// Running under interactive tooling.
	fn is_editor(&self) -> bool;

	/// Build is instrumented for debugging.
	fn is_debug_build(&self) -> bool;
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum BuildMode {
	Editor,
	DebugBuild,
	ReleaseBuild,
}

impl BuildMode {
	/// Editor wins over a debug build. Each query is asked at most once, so the
	/// result is meant to be computed at startup and handed to every logger.
	pub fn resolve<E>(env: &E) -> Self
	where
		E: Environment + ?Sized,
	{
		let mode = if env.is_editor() {
			BuildMode::Editor
		} else if env.is_debug_build() {
			BuildMode::DebugBuild
		} else {
			BuildMode::ReleaseBuild
		};
		debug!("Resolved build mode: {}", mode);
		mode
	}

	pub fn is_editor(self) -> bool {
		matches!(self, BuildMode::Editor)
	}
}

impl Display for BuildMode {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			BuildMode::Editor => write!(f, "editor"),
			BuildMode::DebugBuild => write!(f, "debug build"),
			BuildMode::ReleaseBuild => write!(f, "release build"),
		}
	}
}

/// Explicit description of the host process.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct HostEnvironment {
	pub editor: bool,
	pub debug_build: bool,
}

impl HostEnvironment {
	pub const fn new(editor: bool, debug_build: bool) -> Self {
		HostEnvironment {
			editor,
			debug_build,
		}
	}

	/// Debug builds are recognized through `debug_assertions`, the editor
	/// through [`EDITOR_ENV_VAR`].
	pub fn detect() -> Self {
		HostEnvironment {
			editor: flag_enabled(std::env::var_os(EDITOR_ENV_VAR).as_deref()),
			debug_build: cfg!(debug_assertions),
		}
	}

	pub fn build_mode(&self) -> BuildMode {
		BuildMode::resolve(self)
	}
}

impl Environment for HostEnvironment {
	fn is_editor(&self) -> bool {
		self.editor
	}

	fn is_debug_build(&self) -> bool {
		self.debug_build
	}
}

fn flag_enabled(value: Option<&OsStr>) -> bool {
	let Some(value) = value.and_then(OsStr::to_str) else {
		return false;
	};
	matches!(
		value.trim().to_ascii_lowercase().as_str(),
		"1" | "true" | "yes" | "on"
	)
}
