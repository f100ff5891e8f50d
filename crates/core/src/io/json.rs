use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::files;
use crate::error::{FileError, Result};

/// Writes a value to a file as pretty-printed JSON, creating leading directories
pub fn serialize<S: Serialize + ?Sized>(path: impl AsRef<Path>, data: &S) -> Result<()> {
	write_json(path.as_ref(), data, true)
}

/// Writes a value to a file as compact JSON, creating leading directories
pub fn serialize_compact<S: Serialize + ?Sized>(path: impl AsRef<Path>, data: &S) -> Result<()> {
	write_json(path.as_ref(), data, false)
}

/// Reads JSON from a file with a buffer into the requested type
pub fn deserialize<D: DeserializeOwned>(path: impl AsRef<Path>) -> Result<D> {
	let path = path.as_ref();
	let file = BufReader::new(File::open(path).map_err(|e| FileError::io(path, e))?);
	serde_json::from_reader(file).map_err(|e| FileError::json(path, e))
}

/// Serializes a value to a pretty JSON string
pub fn to_string<S: Serialize + ?Sized>(data: &S) -> Result<String> {
	serde_json::to_string_pretty(data).map_err(|e| FileError::json("<memory>", e))
}

/// Parses a JSON string into the requested type
pub fn from_str<D: DeserializeOwned>(text: &str) -> Result<D> {
	serde_json::from_str(text).map_err(|e| FileError::json("<memory>", e))
}

fn write_json<S: Serialize + ?Sized>(path: &Path, data: &S, pretty: bool) -> Result<()> {
	files::create_leading_dirs(path).map_err(|e| FileError::io(path, e))?;
	let mut file = BufWriter::new(File::create(path).map_err(|e| FileError::io(path, e))?);
	let written = if pretty {
		serde_json::to_writer_pretty(&mut file, data)
	} else {
		serde_json::to_writer(&mut file, data)
	};
	written.map_err(|e| FileError::json(path, e))?;
	file.flush().map_err(|e| FileError::io(path, e))?;

	Ok(())
}
