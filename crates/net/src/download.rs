use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use avocado_shared::output::{AvocadoOutput, MessageContents, MessageLevel};
use reqwest::blocking::Response;
use reqwest::{StatusCode, Url};

/// Re-export of reqwest's blocking client for users of this download module
pub use reqwest::blocking::Client;

/// How long a fetch may take before it is abandoned, unless configured otherwise
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Error returned when fetching a remote resource fails
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
	/// The transfer did not finish within the client's timeout
	#[error("Request to {url} timed out")]
	Timeout {
		/// The URL that was requested
		url: String,
	},
	/// The server answered with a non-success status
	#[error("Server reported status {status} for {url}")]
	Status {
		/// The URL that was requested
		url: String,
		/// The status the server answered with
		status: StatusCode,
	},
	/// The request could not be sent or its body could not be read
	#[error("Request to {url} failed: {source}")]
	Request {
		/// The URL that was requested
		url: String,
		/// The underlying client error
		#[source]
		source: reqwest::Error,
	},
	/// The response body could not be read to the end
	#[error("Failed to read the response body from {url}: {source}")]
	Body {
		/// The URL that was requested
		url: String,
		/// The underlying read error
		#[source]
		source: io::Error,
	},
	/// The HTTP client could not be created
	#[error("Failed to build the HTTP client: {0}")]
	Client(#[source] reqwest::Error),
	/// The downloaded contents could not be written out
	#[error("Failed to write downloaded contents to path {}", .path.display())]
	Io {
		/// The path being written
		path: PathBuf,
		/// The underlying I/O error
		#[source]
		source: std::io::Error,
	},
	/// The URL could not be parsed
	#[error("Invalid URL '{url}': {reason}. It may help to make sure that either http:// or https:// is before the domain name")]
	InvalidUrl {
		/// The text that failed to parse
		url: String,
		/// Why parsing failed
		reason: String,
	},
}

impl FetchError {
	/// Whether this error means the resource does not exist on the server
	pub fn is_not_found(&self) -> bool {
		matches!(
			self,
			Self::Status {
				status: StatusCode::NOT_FOUND | StatusCode::GONE,
				..
			}
		)
	}

	/// Whether this error is a timeout
	pub fn is_timeout(&self) -> bool {
		matches!(self, Self::Timeout { .. })
	}

	fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
		if error.is_timeout() {
			Self::Timeout { url: url.into() }
		} else {
			Self::Request {
				url: url.into(),
				source: error,
			}
		}
	}

	/// Classifies an error from reading a response body. The blocking client
	/// wraps its own errors, timeouts included, inside the I/O error
	fn from_body(url: &str, error: io::Error) -> Self {
		let kind = error.kind();
		match error.into_inner().map(|inner| inner.downcast::<reqwest::Error>()) {
			Some(Ok(error)) => Self::from_reqwest(url, *error),
			_ if kind == io::ErrorKind::TimedOut => Self::Timeout { url: url.into() },
			Some(Err(inner)) => Self::Body {
				url: url.into(),
				source: io::Error::new(kind, inner),
			},
			None => Self::Body {
				url: url.into(),
				source: kind.into(),
			},
		}
	}
}

/// The User-Agent header for requests
pub fn user_agent() -> String {
	let version = env!("CARGO_PKG_VERSION");
	format!("avocado_net_{version}")
}

/// Creates a client whose every request is bounded by the given timeout
pub fn client(timeout: Duration, user_agent: &str) -> Result<Client, FetchError> {
	Client::builder()
		.timeout(timeout)
		.connect_timeout(timeout)
		.user_agent(user_agent)
		.build()
		.map_err(FetchError::Client)
}

/// Sends a GET request and checks the response status
pub fn download(url: &str, client: &Client) -> Result<Response, FetchError> {
	let parsed = validate_url(url)?;
	let resp = client
		.get(parsed)
		.send()
		.map_err(|e| FetchError::from_reqwest(url, e))?;

	let status = resp.status();
	if !status.is_success() {
		return Err(FetchError::Status {
			url: url.into(),
			status,
		});
	}

	Ok(resp)
}

/// Downloads and streams the contents into a file, returning the number of bytes written
pub fn file(
	url: &str,
	path: impl AsRef<Path>,
	client: &Client,
	o: &mut impl AvocadoOutput,
) -> Result<u64, FetchError> {
	let path = path.as_ref();
	let io_err = |source| FetchError::Io {
		path: path.to_owned(),
		source,
	};

	let mut resp = download(url, client)?;
	let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
	let mut buf = vec![0u8; 64 * 1024];
	let mut written = 0u64;
	loop {
		let read = match resp.read(&mut buf) {
			Ok(0) => break,
			Ok(read) => read,
			Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
			Err(e) => return Err(FetchError::from_body(url, e)),
		};
		writer.write_all(&buf[..read]).map_err(io_err)?;
		written += read as u64;
	}
	writer.flush().map_err(io_err)?;

	o.display(
		MessageContents::Property(
			format!("Downloaded {written} bytes to"),
			Box::new(MessageContents::Location(path.to_string_lossy().into())),
		),
		MessageLevel::Debug,
	);

	Ok(written)
}

/// Validates a URL with a helpful error message
pub fn validate_url(url: &str) -> Result<Url, FetchError> {
	Url::parse(url).map_err(|e| FetchError::InvalidUrl {
		url: url.into(),
		reason: e.to_string(),
	})
}
