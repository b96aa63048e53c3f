use std::fmt::{Display, Formatter};
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::LevelParseError;

/// Importance category of a message, ordered from least to most severe.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Severity {
	Info,
	Debug,
	Warning,
	Exception,
	Error,
}

impl Severity {
	pub const ALL: [Severity; 5] = [
		Severity::Info,
		Severity::Debug,
		Severity::Warning,
		Severity::Exception,
		Severity::Error,
	];

	/// Sink channel a message of this severity is written to.
	pub fn bucket(self) -> Bucket {
		match self {
			Severity::Info | Severity::Debug => Bucket::Log,
			Severity::Warning => Bucket::Warn,
			Severity::Exception | Severity::Error => Bucket::Error,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Severity::Info => "Info",
			Severity::Debug => "Debug",
			Severity::Warning => "Warning",
			Severity::Exception => "Exception",
			Severity::Error => "Error",
		}
	}

	fn bit(self) -> u8 {
		1 << self as u8
	}
}

impl Display for Severity {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Severity {
	type Err = LevelParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"info" => Ok(Severity::Info),
			"debug" => Ok(Severity::Debug),
			"warning" | "warn" => Ok(Severity::Warning),
			"exception" => Ok(Severity::Exception),
			"error" => Ok(Severity::Error),
			_ => Err(LevelParseError {
				input: s.to_string(),
			}),
		}
	}
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Bucket {
	Log,
	Warn,
	Error,
}

/// Ordinal verbosity setting. A threshold enables its own severity and every
/// severity above it. `None` sits above `Error`, so it enables nothing.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(u8)]
pub enum Threshold {
	Info = 0,
	Debug = 1,
	Warning = 2,
	Exception = 3,
	Error = 4,
	None = 5,
}

impl Threshold {
	pub fn admits(self, level: Severity) -> bool {
		level as u8 >= self as u8
	}

	pub fn levels(self) -> LevelSet {
		Severity::ALL
			.into_iter()
			.filter(|level| self.admits(*level))
			.collect()
	}
}

impl From<Severity> for Threshold {
	fn from(level: Severity) -> Self {
		match level {
			Severity::Info => Threshold::Info,
			Severity::Debug => Threshold::Debug,
			Severity::Warning => Threshold::Warning,
			Severity::Exception => Threshold::Exception,
			Severity::Error => Threshold::Error,
		}
	}
}

impl FromStr for Threshold {
	type Err = LevelParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s.trim().eq_ignore_ascii_case("none") {
			return Ok(Threshold::None);
		}
		s.parse::<Severity>().map(Threshold::from)
	}
}

/// Set of enabled severities.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct LevelSet(u8);

impl LevelSet {
	pub const NONE: LevelSet = LevelSet(0);
	pub const ALL: LevelSet = LevelSet(0b1_1111);

	pub fn of(levels: &[Severity]) -> Self {
		levels.iter().copied().collect()
	}

	pub fn contains(self, level: Severity) -> bool {
		self.0 & level.bit() != 0
	}

	pub fn insert(&mut self, level: Severity) {
		self.0 |= level.bit();
	}

	pub fn remove(&mut self, level: Severity) {
		self.0 &= !level.bit();
	}

	pub fn with(mut self, level: Severity) -> Self {
		self.insert(level);
		self
	}

	pub fn is_empty(self) -> bool {
		self.0 == 0
	}

	pub fn len(self) -> usize {
		self.0.count_ones() as usize
	}

	pub fn iter(self) -> impl Iterator<Item = Severity> {
		Severity::ALL
			.into_iter()
			.filter(move |level| self.contains(*level))
	}
}

impl std::fmt::Debug for LevelSet {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_set().entries(self.iter()).finish()
	}
}

impl Display for LevelSet {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if self.is_empty() {
			return f.write_str("None");
		}
		for (idx, level) in self.iter().enumerate() {
			if idx > 0 {
				f.write_str(" | ")?;
			}
			f.write_str(level.as_str())?;
		}
		Ok(())
	}
}

impl From<Severity> for LevelSet {
	fn from(level: Severity) -> Self {
		LevelSet(level.bit())
	}
}

impl From<Threshold> for LevelSet {
	fn from(threshold: Threshold) -> Self {
		threshold.levels()
	}
}

impl FromIterator<Severity> for LevelSet {
	fn from_iter<I: IntoIterator<Item = Severity>>(iter: I) -> Self {
		iter.into_iter()
			.fold(LevelSet::NONE, |set, level| set.with(level))
	}
}

impl BitOr for LevelSet {
	type Output = LevelSet;

	fn bitor(self, rhs: LevelSet) -> Self::Output {
		LevelSet(self.0 | rhs.0)
	}
}

impl BitOr<Severity> for LevelSet {
	type Output = LevelSet;

	fn bitor(self, rhs: Severity) -> Self::Output {
		self.with(rhs)
	}
}

impl BitOr for Severity {
	type Output = LevelSet;

	fn bitor(self, rhs: Severity) -> Self::Output {
		LevelSet::from(self).with(rhs)
	}
}

impl BitOrAssign<Severity> for LevelSet {
	fn bitor_assign(&mut self, rhs: Severity) {
		self.insert(rhs);
	}
}

impl Serialize for LevelSet {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_seq(self.iter())
	}
}

// Either a list of severities or a single threshold name.
#[derive(Deserialize)]
#[serde(untagged)]
enum LevelSetRepr {
	Threshold(String),
	List(Vec<String>),
}

impl<'de> Deserialize<'de> for LevelSet {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		match LevelSetRepr::deserialize(deserializer)? {
			LevelSetRepr::Threshold(name) => name
				.parse::<Threshold>()
				.map(LevelSet::from)
				.map_err(D::Error::custom),
			LevelSetRepr::List(names) => names
				.iter()
				.map(|name| name.parse::<Severity>())
				.collect::<Result<LevelSet, _>>()
				.map_err(D::Error::custom),
		}
	}
}
