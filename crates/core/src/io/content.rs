use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use crate::error::{FileError, Result};

/// A character set that file contents can be decoded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
	/// UTF-8. Invalid sequences are an error
	#[default]
	Utf8,
	/// ISO-8859-1, where every byte maps to the code point of the same value
	Latin1,
	/// 7-bit US-ASCII. Bytes above 0x7F are an error
	Ascii,
}

impl Charset {
	/// Decodes bytes in this charset into a string, or returns None if they are invalid
	pub fn decode(&self, bytes: Vec<u8>) -> Option<String> {
		match self {
			Self::Utf8 => String::from_utf8(bytes).ok(),
			Self::Latin1 => Some(bytes.into_iter().map(char::from).collect()),
			Self::Ascii => {
				if bytes.is_ascii() {
					String::from_utf8(bytes).ok()
				} else {
					None
				}
			}
		}
	}
}

impl FromStr for Charset {
	type Err = FileError;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s.to_ascii_lowercase().replace('_', "-").as_str() {
			"utf-8" | "utf8" => Ok(Self::Utf8),
			"iso-8859-1" | "iso8859-1" | "latin1" | "latin-1" => Ok(Self::Latin1),
			"us-ascii" | "ascii" => Ok(Self::Ascii),
			_ => Err(FileError::Config(format!("Unsupported charset '{s}'"))),
		}
	}
}

impl Display for Charset {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"{}",
			match self {
				Self::Utf8 => "UTF-8",
				Self::Latin1 => "ISO-8859-1",
				Self::Ascii => "US-ASCII",
			}
		)
	}
}

/// Reads a whole file and decodes it with the given charset
pub fn load_content(path: impl AsRef<Path>, charset: Charset) -> Result<String> {
	let path = path.as_ref();
	let bytes = std::fs::read(path).map_err(|e| FileError::io(path, e))?;
	charset.decode(bytes).ok_or_else(|| FileError::Encoding {
		path: path.to_owned(),
		charset,
	})
}

/// Reads a whole file as UTF-8 text
pub fn load_content_as_string(path: impl AsRef<Path>) -> Result<String> {
	load_content(path, Charset::Utf8)
}
