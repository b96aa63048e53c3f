use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use console::{style, Term};
use log::{log, Level};

use crate::context::ContextHandle;
use crate::exception::Exception;
use crate::level::Bucket;

pub const TARGET: &str = "quick_log";

/// Console that receives gated messages.
pub trait Sink: Send + Sync {
	fn log(&self, message: &str, context: Option<ContextHandle>);

	fn warn(&self, message: &str, context: Option<ContextHandle>);

	fn error(&self, message: &str, context: Option<ContextHandle>);

	/// Exceptions have their own channel so the backtrace reaches the console.
	fn exception(&self, exception: &Exception, context: Option<ContextHandle>);

	fn emit(&self, bucket: Bucket, message: &str, context: Option<ContextHandle>) {
		match bucket {
			Bucket::Log => self.log(message, context),
			Bucket::Warn => self.warn(message, context),
			Bucket::Error => self.error(message, context),
		}
	}
}

impl<S> Sink for Arc<S>
where
	S: Sink + ?Sized,
{
	fn log(&self, message: &str, context: Option<ContextHandle>) {
		(**self).log(message, context)
	}

	fn warn(&self, message: &str, context: Option<ContextHandle>) {
		(**self).warn(message, context)
	}

	fn error(&self, message: &str, context: Option<ContextHandle>) {
		(**self).error(message, context)
	}

	fn exception(&self, exception: &Exception, context: Option<ContextHandle>) {
		(**self).exception(exception, context)
	}
}

/// Forwards to the `log` facade under the [`TARGET`] target.
#[derive(Debug, Default, Copy, Clone)]
pub struct LogFacadeSink;

fn facade(level: Level, message: &str, context: Option<ContextHandle>) {
	match context {
		Some(context) => log!(target: TARGET, level, "{} (context: {})", message, context),
		None => log!(target: TARGET, level, "{}", message),
	}
}

impl Sink for LogFacadeSink {
	fn log(&self, message: &str, context: Option<ContextHandle>) {
		facade(Level::Info, message, context);
	}

	fn warn(&self, message: &str, context: Option<ContextHandle>) {
		facade(Level::Warn, message, context);
	}

	fn error(&self, message: &str, context: Option<ContextHandle>) {
		facade(Level::Error, message, context);
	}

	fn exception(&self, exception: &Exception, context: Option<ContextHandle>) {
		facade(Level::Error, &exception.to_string(), context);
		log!(target: TARGET, Level::Error, "{:?}", exception.backtrace());
	}
}

/// Writes styled lines to a terminal, stderr by default.
#[derive(Debug, Clone)]
pub struct TermSink {
	term: Term,
}

impl TermSink {
	pub fn new(term: Term) -> Self {
		TermSink { term }
	}

	fn write(&self, tag: String, message: &str, context: Option<ContextHandle>) {
		let line = match context {
			Some(context) => format!("{} {} {}", tag, message, style(context).dim()),
			None => format!("{} {}", tag, message),
		};
		// Nowhere to report a broken terminal to.
		let _ = self.term.write_line(&line);
	}
}

impl Default for TermSink {
	fn default() -> Self {
		TermSink::new(Term::stderr())
	}
}

impl Sink for TermSink {
	fn log(&self, message: &str, context: Option<ContextHandle>) {
		self.write(style("[Log]").dim().to_string(), message, context);
	}

	fn warn(&self, message: &str, context: Option<ContextHandle>) {
		self.write(style("[Warning]").yellow().to_string(), message, context);
	}

	fn error(&self, message: &str, context: Option<ContextHandle>) {
		self.write(style("[Error]").red().to_string(), message, context);
	}

	fn exception(&self, exception: &Exception, context: Option<ContextHandle>) {
		let tag = style("[Exception]").red().bold().to_string();
		self.write(tag, &exception.to_string(), context);
		let _ = self.term.write_line(&format!("{:?}", exception.backtrace()));
	}
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SinkCall {
	Log,
	Warn,
	Error,
	Exception,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Recorded {
	pub call: SinkCall,
	pub message: String,
	pub context: Option<ContextHandle>,
}

/// Keeps every call in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
	calls: Mutex<Vec<Recorded>>,
}

impl RecordingSink {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn calls(&self) -> Vec<Recorded> {
		self.lock().clone()
	}

	/// Returns the recorded calls and starts over.
	pub fn take(&self) -> Vec<Recorded> {
		std::mem::take(&mut *self.lock())
	}

	pub fn len(&self) -> usize {
		self.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.lock().is_empty()
	}

	fn lock(&self) -> MutexGuard<'_, Vec<Recorded>> {
		self.calls.lock().unwrap_or_else(PoisonError::into_inner)
	}

	fn record(&self, call: SinkCall, message: String, context: Option<ContextHandle>) {
		self.lock().push(Recorded {
			call,
			message,
			context,
		});
	}
}

impl Sink for RecordingSink {
	fn log(&self, message: &str, context: Option<ContextHandle>) {
		self.record(SinkCall::Log, message.to_string(), context);
	}

	fn warn(&self, message: &str, context: Option<ContextHandle>) {
		self.record(SinkCall::Warn, message.to_string(), context);
	}

	fn error(&self, message: &str, context: Option<ContextHandle>) {
		self.record(SinkCall::Error, message.to_string(), context);
	}

	fn exception(&self, exception: &Exception, context: Option<ContextHandle>) {
		self.record(SinkCall::Exception, exception.to_string(), context);
	}
}
