use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

#[derive(Debug, Error, Eq, PartialEq)]
#[error("Unknown severity level {input:?}. Possible levels: [info|debug|warning|exception|error|none]")]
pub struct LevelParseError {
	pub input: String,
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum ColorParseError {
	#[error("Color string is empty")]
	Empty,

	#[error("Invalid html color: {0:?}")]
	Invalid(String),
}
