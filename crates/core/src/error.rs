use std::path::PathBuf;
use std::time::Duration;

use avocado_net::download::FetchError;

use crate::io::content::Charset;

/// Shorthand for results of avocado operations
pub type Result<T> = std::result::Result<T, FileError>;

/// Error returned when a resource cannot be located, read, or (de)serialized
#[derive(Debug, thiserror::Error)]
pub enum FileError {
	/// Nothing exists at the place the reference points to
	#[error("Resource '{reference}' was not found")]
	NotFound {
		/// The reference that was being resolved
		reference: String,
	},
	/// A remote resource did not arrive within the configured timeout
	#[error("Fetching '{url}' did not finish within {}ms", .timeout.as_millis())]
	FetchTimeout {
		/// The URL being fetched
		url: String,
		/// The timeout that was exceeded
		timeout: Duration,
	},
	/// A remote resource could not be fetched
	#[error(transparent)]
	Fetch(FetchError),
	/// Reading or writing a local file failed
	#[error("I/O failure on {}: {source}", .path.display())]
	Io {
		/// The file that was being accessed
		path: PathBuf,
		/// The underlying I/O error
		#[source]
		source: std::io::Error,
	},
	/// A JAR or ZIP archive could not be read
	#[error("Failed to read archive {}: {source}", .path.display())]
	Archive {
		/// The archive file
		path: PathBuf,
		/// The underlying archive error
		#[source]
		source: zip::result::ZipError,
	},
	/// The file contents are not valid in the requested character set
	#[error("Contents of {} are not valid {charset}", .path.display())]
	Encoding {
		/// The file that was being decoded
		path: PathBuf,
		/// The character set that was requested
		charset: Charset,
	},
	/// The file is not syntactically valid JSON
	#[error("Malformed JSON in {}: {source}", .path.display())]
	JsonParse {
		/// The JSON file
		path: PathBuf,
		/// The underlying parse error
		#[source]
		source: serde_json::Error,
	},
	/// The JSON does not have the shape of the requested type
	#[error("JSON in {} does not match the requested shape: {source}", .path.display())]
	JsonShape {
		/// The JSON file
		path: PathBuf,
		/// The underlying mapping error
		#[source]
		source: serde_json::Error,
	},
	/// A configuration value is invalid
	#[error("Invalid configuration: {0}")]
	Config(String),
}

impl FileError {
	/// Creates an I/O error for a path
	pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		Self::Io {
			path: path.into(),
			source,
		}
	}

	/// Sorts a serde_json error into the parse, shape, or I/O kind
	pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
		let path = path.into();
		match source.classify() {
			serde_json::error::Category::Data => Self::JsonShape { path, source },
			serde_json::error::Category::Syntax | serde_json::error::Category::Eof => {
				Self::JsonParse { path, source }
			}
			serde_json::error::Category::Io => Self::Io {
				path,
				source: source.into(),
			},
		}
	}

	/// Whether this is a resource-not-found error
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::NotFound { .. })
	}
}
