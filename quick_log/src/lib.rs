use std::borrow::Cow;
use std::fmt::Display;

use log::trace;

pub use build_mode::{BuildMode, Environment, HostEnvironment};
pub use color::{decorate, Color};
pub use config::LoggerConfig;
pub use context::ContextHandle;
pub use error::{ColorParseError, ConfigError, LevelParseError};
pub use exception::Exception;
pub use level::{Bucket, LevelSet, Severity, Threshold};
pub use sink::{LogFacadeSink, RecordingSink, Sink, TermSink};

pub mod build_mode;
pub mod color;
pub mod config;
pub mod context;
pub mod error;
pub mod exception;
pub mod level;
pub mod sink;

/// A message that made it through the gate, as handed to the host action.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LogRecord {
	pub severity: Severity,
	pub message: String,
	pub context: Option<ContextHandle>,
}

type Action = Box<dyn Fn(&LogRecord) + Send + Sync>;

/// Gates messages by severity for the build mode it was created with, adds
/// color markup in the editor and writes to a [`Sink`].
pub struct QuickLog<S = LogFacadeSink> {
	config: LoggerConfig,
	build_mode: BuildMode,
	sink: S,
	action: Option<Action>,
}

impl QuickLog<LogFacadeSink> {
	pub fn with_facade(config: LoggerConfig, build_mode: BuildMode) -> Self {
		QuickLog::new(config, build_mode, LogFacadeSink)
	}
}

impl<S: Sink> QuickLog<S> {
	pub fn new(config: LoggerConfig, build_mode: BuildMode, sink: S) -> Self {
		QuickLog {
			config,
			build_mode,
			sink,
			action: None,
		}
	}

	/// Called with every emitted record while the use-action switch is on for
	/// the current build mode.
	pub fn set_action<F>(&mut self, action: F)
	where
		F: Fn(&LogRecord) + Send + Sync + 'static,
	{
		self.action = Some(Box::new(action));
	}

	pub fn clear_action(&mut self) {
		self.action = None;
	}

	pub fn config(&self) -> &LoggerConfig {
		&self.config
	}

	pub fn config_mut(&mut self) -> &mut LoggerConfig {
		&mut self.config
	}

	pub fn build_mode(&self) -> BuildMode {
		self.build_mode
	}

	pub fn sink(&self) -> &S {
		&self.sink
	}

	pub fn enabled(&self, level: Severity) -> bool {
		self.config.levels(self.build_mode).contains(level)
	}

	pub fn log(
		&self,
		message: &str,
		level: Severity,
		context: Option<ContextHandle>,
		color: Option<Color>,
	) {
		if !self.enabled(level) {
			trace!("{} message suppressed in {}", level, self.build_mode);
			return;
		}

		let context = context.or(self.config.cached_context);
		let message = match self.markup_color(color) {
			Some(color) => Cow::Owned(decorate(message, color)),
			None => Cow::Borrowed(message),
		};

		self.sink.emit(level.bucket(), &message, context);
		self.run_action(level, message, context);
	}

	pub fn log_info(&self, message: &str, context: Option<ContextHandle>, color: Option<Color>) {
		self.log(message, Severity::Info, context, color);
	}

	pub fn log_debug(&self, message: &str, context: Option<ContextHandle>, color: Option<Color>) {
		self.log(message, Severity::Debug, context, color);
	}

	pub fn log_warning(&self, message: &str, context: Option<ContextHandle>, color: Option<Color>) {
		self.log(message, Severity::Warning, context, color);
	}

	pub fn log_error(&self, message: &str, context: Option<ContextHandle>, color: Option<Color>) {
		self.log(message, Severity::Error, context, color);
	}

	/// Logs `object.to_string()` at debug level. The string is only built when
	/// debug messages are enabled.
	pub fn log_object<T>(&self, object: &T, context: Option<ContextHandle>, color: Option<Color>)
	where
		T: Display + ?Sized,
	{
		if self.enabled(Severity::Debug) {
			self.log(&object.to_string(), Severity::Debug, context, color);
		}
	}

	/// Goes straight to [`Sink::exception`], never through the message path.
	pub fn log_exception(&self, exception: &Exception, context: Option<ContextHandle>) {
		if !self.enabled(Severity::Exception) {
			trace!("exception suppressed in {}", self.build_mode);
			return;
		}

		let context = context.or(self.config.cached_context);
		self.sink.exception(exception, context);
		self.run_action(
			Severity::Exception,
			Cow::Owned(exception.to_string()),
			context,
		);
	}

	// Markup only exists in the editor console.
	fn markup_color(&self, color: Option<Color>) -> Option<Color> {
		if !self.build_mode.is_editor() {
			return None;
		}
		color.or_else(|| self.config.use_color.then_some(self.config.default_color))
	}

	fn run_action(&self, severity: Severity, message: Cow<'_, str>, context: Option<ContextHandle>) {
		if !self.config.use_action(self.build_mode) {
			return;
		}
		if let Some(action) = &self.action {
			action(&LogRecord {
				severity,
				message: message.into_owned(),
				context,
			});
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::{Arc, Mutex};

	use super::*;
	use crate::sink::{Recorded, SinkCall};

	fn logger(levels: impl Into<LevelSet>, build_mode: BuildMode) -> QuickLog<RecordingSink> {
		let mut config = LoggerConfig::default();
		config.set_levels(build_mode, levels);
		QuickLog::new(config, build_mode, RecordingSink::new())
	}

	fn recorded(call: SinkCall, message: &str) -> Recorded {
		Recorded {
			call,
			message: message.to_string(),
			context: None,
		}
	}

	#[test]
	fn warning_and_error_mask() {
		let log = logger(Severity::Warning | Severity::Error, BuildMode::Editor);

		log.log("x", Severity::Info, None, None);
		assert!(log.sink().is_empty());

		log.log("x", Severity::Warning, None, None);
		assert_eq!(log.sink().take(), vec![recorded(SinkCall::Warn, "x")]);

		log.log("x", Severity::Error, None, Some(Color::RED));
		assert_eq!(
			log.sink().take(),
			vec![recorded(SinkCall::Error, "<color=#FF0000>x</color>")]
		);
	}

	#[test]
	fn exception_threshold() {
		let log = logger(Threshold::Exception, BuildMode::DebugBuild);

		log.log("m", Severity::Warning, None, None);
		assert!(log.sink().is_empty());

		log.log("m", Severity::Error, None, None);
		assert_eq!(log.sink().take(), vec![recorded(SinkCall::Error, "m")]);

		log.log("m", Severity::Exception, None, None);
		assert_eq!(log.sink().take(), vec![recorded(SinkCall::Error, "m")]);
	}

	#[test]
	fn none_threshold_is_silent() {
		for mode in [BuildMode::Editor, BuildMode::DebugBuild, BuildMode::ReleaseBuild] {
			let log = logger(Threshold::None, mode);
			for level in Severity::ALL {
				log.log("quiet", level, None, Some(Color::RED));
			}
			log.log_object(&42, None, None);
			log.log_exception(&Exception::new("quiet"), None);
			assert!(log.sink().is_empty(), "{mode}");
		}
	}

	#[test]
	fn info_and_debug_go_to_log_bucket() {
		let log = logger(LevelSet::ALL, BuildMode::ReleaseBuild);
		log.log_info("i", None, None);
		log.log_debug("d", None, None);
		log.log_warning("w", None, None);
		log.log_error("e", None, None);
		assert_eq!(
			log.sink().take(),
			vec![
				recorded(SinkCall::Log, "i"),
				recorded(SinkCall::Log, "d"),
				recorded(SinkCall::Warn, "w"),
				recorded(SinkCall::Error, "e"),
			]
		);
	}

	#[test]
	fn mode_selects_level_set() {
		let config = LoggerConfig::default();
		let release = QuickLog::new(config.clone(), BuildMode::ReleaseBuild, RecordingSink::new());
		let editor = QuickLog::new(config, BuildMode::Editor, RecordingSink::new());

		release.log_debug("hidden", None, None);
		editor.log_debug("shown", None, None);

		assert!(release.sink().is_empty());
		assert_eq!(editor.sink().take(), vec![recorded(SinkCall::Log, "shown")]);
	}

	#[test]
	fn color_only_in_editor() {
		let mut config = LoggerConfig::default();
		config.levels_in_debug = LevelSet::ALL;
		config.use_color = true;
		config.default_color = Color::YELLOW;

		let debug = QuickLog::new(config.clone(), BuildMode::DebugBuild, RecordingSink::new());
		debug.log_info("plain", None, Some(Color::RED));
		assert_eq!(debug.sink().take(), vec![recorded(SinkCall::Log, "plain")]);

		let editor = QuickLog::new(config, BuildMode::Editor, RecordingSink::new());
		editor.log_info("default", None, None);
		editor.log_info("explicit", None, Some(Color::RED));
		assert_eq!(
			editor.sink().take(),
			vec![
				recorded(SinkCall::Log, "<color=#FFFF00>default</color>"),
				recorded(SinkCall::Log, "<color=#FF0000>explicit</color>"),
			]
		);
	}

	#[test]
	fn no_markup_without_use_color() {
		let log = logger(LevelSet::ALL, BuildMode::Editor);
		log.log_info("plain", None, None);
		assert_eq!(log.sink().take(), vec![recorded(SinkCall::Log, "plain")]);
	}

	#[test]
	fn context_fallback() {
		let cached = ContextHandle::new();
		let explicit = ContextHandle::new();
		let mut log = logger(LevelSet::ALL, BuildMode::Editor);
		log.config_mut().cached_context = Some(cached);

		log.log_warning("a", None, None);
		log.log_warning("b", Some(explicit), None);
		log.log_exception(&Exception::new("c"), None);

		let contexts: Vec<_> = log.sink().take().into_iter().map(|r| r.context).collect();
		assert_eq!(contexts, vec![Some(cached), Some(explicit), Some(cached)]);
	}

	#[test]
	fn exception_uses_exception_channel() {
		let mut log = logger(LevelSet::ALL, BuildMode::Editor);
		log.config_mut().use_color = true;
		log.config_mut().default_color = Color::RED;

		log.log_exception(&Exception::new("disk on fire"), None);
		assert_eq!(
			log.sink().take(),
			vec![recorded(SinkCall::Exception, "disk on fire")]
		);
	}

	#[test]
	fn exception_gated_by_exception_category() {
		let log = logger(Severity::Error, BuildMode::ReleaseBuild);
		log.log_exception(&Exception::new("ignored"), None);
		assert!(log.sink().is_empty());

		let log = logger(Severity::Exception, BuildMode::ReleaseBuild);
		log.log_exception(&Exception::new("kept"), None);
		assert_eq!(log.sink().len(), 1);
	}

	#[test]
	fn log_object_uses_display() {
		let log = logger(Severity::Debug, BuildMode::DebugBuild);
		log.log_object(&3.5_f32, None, None);
		log.log_object("str slice", None, None);
		assert_eq!(
			log.sink().take(),
			vec![recorded(SinkCall::Log, "3.5"), recorded(SinkCall::Log, "str slice")]
		);
	}

	#[test]
	fn action_runs_when_enabled_for_mode() {
		let seen = Arc::new(Mutex::new(Vec::new()));

		let mut editor = logger(Severity::Warning | Severity::Exception, BuildMode::Editor);
		let sink = Arc::clone(&seen);
		editor.set_action(move |record: &LogRecord| sink.lock().unwrap().push(record.clone()));

		editor.log_info("suppressed", None, None);
		editor.log_warning("kept", None, Some(Color::RED));
		editor.log_exception(&Exception::new("boom"), None);

		let records = seen.lock().unwrap().clone();
		assert_eq!(
			records,
			vec![
				LogRecord {
					severity: Severity::Warning,
					message: "<color=#FF0000>kept</color>".to_string(),
					context: None,
				},
				LogRecord {
					severity: Severity::Exception,
					message: "boom".to_string(),
					context: None,
				},
			]
		);

		editor.config_mut().use_action_in_editor = false;
		editor.log_warning("no action", None, None);
		assert_eq!(seen.lock().unwrap().len(), 2);
	}

	#[test]
	fn action_off_by_default_outside_editor() {
		let calls = Arc::new(Mutex::new(0));
		let mut release = logger(LevelSet::ALL, BuildMode::ReleaseBuild);
		let counter = Arc::clone(&calls);
		release.set_action(move |_| *counter.lock().unwrap() += 1);

		release.log_error("e", None, None);
		assert_eq!(*calls.lock().unwrap(), 0);
		assert_eq!(release.sink().len(), 1);
	}

	#[test]
	fn config_mutation_changes_gate() {
		let mut log = logger(LevelSet::NONE, BuildMode::DebugBuild);
		assert!(!log.enabled(Severity::Error));
		log.config_mut().levels_mut(BuildMode::DebugBuild).insert(Severity::Error);
		assert!(log.enabled(Severity::Error));
		assert!(!log.enabled(Severity::Warning));
	}
}
