use std::fmt::{Display, Formatter};
use std::str::FromStr;

use nom::branch::alt;
use nom::bytes::complete::take_while_m_n;
use nom::character::complete::char;
use nom::combinator::{all_consuming, map, map_res, opt};
use nom::sequence::{preceded, tuple};
use nom::IResult;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ColorParseError;

/// 8-bit RGB color used for console markup.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
}

static NAMED_COLORS: [(&str, Color); 22] = [
	("red", Color::RED),
	("cyan", Color::CYAN),
	("blue", Color::BLUE),
	("darkblue", Color::new(0x00, 0x00, 0xA0)),
	("lightblue", Color::new(0xAD, 0xD8, 0xE6)),
	("purple", Color::new(0x80, 0x00, 0x80)),
	("yellow", Color::YELLOW),
	("lime", Color::new(0x00, 0xFF, 0x00)),
	("fuchsia", Color::MAGENTA),
	("white", Color::WHITE),
	("silver", Color::new(0xC0, 0xC0, 0xC0)),
	("grey", Color::GREY),
	("black", Color::BLACK),
	("orange", Color::ORANGE),
	("brown", Color::new(0xA5, 0x2A, 0x2A)),
	("maroon", Color::new(0x80, 0x00, 0x00)),
	("green", Color::GREEN),
	("olive", Color::new(0x80, 0x80, 0x00)),
	("navy", Color::new(0x00, 0x00, 0x80)),
	("teal", Color::new(0x00, 0x80, 0x80)),
	("aqua", Color::CYAN),
	("magenta", Color::MAGENTA),
];

impl Color {
	pub const WHITE: Color = Color::new(0xFF, 0xFF, 0xFF);
	pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
	pub const RED: Color = Color::new(0xFF, 0x00, 0x00);
	pub const GREEN: Color = Color::new(0x00, 0x80, 0x00);
	pub const BLUE: Color = Color::new(0x00, 0x00, 0xFF);
	pub const YELLOW: Color = Color::new(0xFF, 0xFF, 0x00);
	pub const CYAN: Color = Color::new(0x00, 0xFF, 0xFF);
	pub const MAGENTA: Color = Color::new(0xFF, 0x00, 0xFF);
	pub const GREY: Color = Color::new(0x80, 0x80, 0x80);
	pub const ORANGE: Color = Color::new(0xFF, 0xA5, 0x00);

	pub const fn new(r: u8, g: u8, b: u8) -> Self {
		Color { r, g, b }
	}

	/// Builds a color from engine style channels in `0.0..=1.0`. Out of range
	/// values are clamped.
	pub fn from_rgb_f32(r: f32, g: f32, b: f32) -> Self {
		fn channel(value: f32) -> u8 {
			(value.clamp(0.0, 1.0) * 255.0).round() as u8
		}
		Color::new(channel(r), channel(g), channel(b))
	}

	/// `RRGGBB`, uppercase, no leading `#`.
	pub fn to_html_rgb(self) -> String {
		format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
	}

	pub fn named(name: &str) -> Option<Color> {
		NAMED_COLORS
			.iter()
			.find(|(color_name, _)| color_name.eq_ignore_ascii_case(name))
			.map(|(_, color)| *color)
	}
}

/// Wraps `text` in console color markup: `<color=#RRGGBB>text</color>`.
pub fn decorate(text: &str, color: Color) -> String {
	format!("<color=#{}>{}</color>", color.to_html_rgb(), text)
}

impl Display for Color {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "#{}", self.to_html_rgb())
	}
}

impl FromStr for Color {
	type Err = ColorParseError;

	/// Accepts `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` and named colors.
	/// Alpha is parsed but dropped.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		if s.is_empty() {
			return Err(ColorParseError::Empty);
		}
		if s.starts_with('#') {
			return all_consuming(parse_html_color)(s)
				.map(|(_, color)| color)
				.map_err(|_| ColorParseError::Invalid(s.to_string()));
		}
		Color::named(s).ok_or_else(|| ColorParseError::Invalid(s.to_string()))
	}
}

fn parse_html_color(input: &str) -> IResult<&str, Color> {
	preceded(
		char('#'),
		alt((
			map(
				tuple((hex_pair, hex_pair, hex_pair, opt(hex_pair))),
				|(r, g, b, _alpha)| Color::new(r, g, b),
			),
			map(
				tuple((hex_single, hex_single, hex_single, opt(hex_single))),
				|(r, g, b, _alpha)| Color::new(r, g, b),
			),
		)),
	)(input)
}

fn hex_pair(input: &str) -> IResult<&str, u8> {
	map_res(
		take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()),
		|digits: &str| u8::from_str_radix(digits, 16),
	)(input)
}

// `F` expands to `FF`
fn hex_single(input: &str) -> IResult<&str, u8> {
	map_res(
		take_while_m_n(1, 1, |c: char| c.is_ascii_hexdigit()),
		|digit: &str| u8::from_str_radix(digit, 16).map(|value| value * 17),
	)(input)
}

impl Serialize for Color {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for Color {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let s = String::deserialize(deserializer)?;
		s.parse().map_err(D::Error::custom)
	}
}
