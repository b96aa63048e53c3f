use std::error::Error as StdError;
use std::fmt::{Debug, Display, Formatter};

use backtrace::Backtrace;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// An error handed over for reporting, together with the backtrace captured
/// when it was wrapped. The logger never looks inside.
pub struct Exception {
	error: BoxError,
	backtrace: Backtrace,
}

impl Exception {
	pub fn new<E>(error: E) -> Self
	where
		E: Into<BoxError>,
	{
		Exception {
			error: error.into(),
			backtrace: Backtrace::new(),
		}
	}

	pub fn error(&self) -> &(dyn StdError + Send + Sync + 'static) {
		self.error.as_ref()
	}

	pub fn backtrace(&self) -> &Backtrace {
		&self.backtrace
	}

	pub fn into_error(self) -> BoxError {
		self.error
	}
}

impl<E> From<E> for Exception
where
	E: StdError + Send + Sync + 'static,
{
	fn from(error: E) -> Self {
		Exception::new(error)
	}
}

impl Display for Exception {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self.error, f)
	}
}

impl Debug for Exception {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Exception")
			.field("error", &self.error)
			.finish_non_exhaustive()
	}
}
