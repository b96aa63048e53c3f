use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque reference to the object a message is about. Sinks can use it to
/// navigate back to the source object, the logger only passes it along.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextHandle(Uuid);

impl ContextHandle {
	pub fn new() -> Self {
		ContextHandle(Uuid::new_v4())
	}

	pub fn uuid(&self) -> Uuid {
		self.0
	}
}

impl Default for ContextHandle {
	fn default() -> Self {
		Self::new()
	}
}

impl From<Uuid> for ContextHandle {
	fn from(uuid: Uuid) -> Self {
		ContextHandle(uuid)
	}
}

impl Display for ContextHandle {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}
