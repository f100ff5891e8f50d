use std::path::{Path, PathBuf};
use std::time::Duration;

use avocado_net::download::{self, DEFAULT_FETCH_TIMEOUT};
use serde::{Deserialize, Serialize};

use crate::error::{FileError, Result};
use crate::io::content::Charset;
use crate::io::java::classpath::Classpath;
use crate::io::json;

/// Environment variable holding the default classpath
pub const CLASSPATH_ENV: &str = "AVOCADO_CLASSPATH";
/// Environment variable overriding the fetch timeout, in milliseconds
pub const FETCH_TIMEOUT_ENV: &str = "AVOCADO_FETCH_TIMEOUT_MS";

macro_rules! builder_method {
	($name:ident, $ty:ty, $doc:literal) => {
		#[doc = $doc]
		pub fn $name(mut self, $name: $ty) -> Self {
			self.config.$name = $name;
			self
		}
	};
}

/// Configuration for locating and loading resources
#[derive(Debug, Clone)]
pub struct Configuration {
	/// How long a remote fetch may take in total
	pub(crate) fetch_timeout: Duration,
	/// Where `/`-prefixed references are looked up
	pub(crate) classpath: Classpath,
	/// Where downloaded and extracted copies are placed
	pub(crate) temp_dir: PathBuf,
	/// The User-Agent sent with remote fetches
	pub(crate) user_agent: String,
	/// The charset used when no other is given
	pub(crate) charset: Charset,
	/// Whether a `/`-prefixed reference missing from the classpath is
	/// tried as an absolute filesystem path before failing
	pub(crate) absolute_path_fallback: bool,
}

impl Default for Configuration {
	fn default() -> Self {
		Self::new()
	}
}

impl Configuration {
	/// Construct the default configuration
	pub fn new() -> Self {
		Self {
			fetch_timeout: DEFAULT_FETCH_TIMEOUT,
			classpath: default_classpath(),
			temp_dir: std::env::temp_dir(),
			user_agent: download::user_agent(),
			charset: Charset::Utf8,
			absolute_path_fallback: false,
		}
	}

	/// Construct the default configuration, with overrides read from the environment
	pub fn from_env() -> Result<Self> {
		let mut out = Self::new();
		if let Ok(timeout) = std::env::var(FETCH_TIMEOUT_ENV) {
			out.fetch_timeout = parse_fetch_timeout(&timeout)?;
		}

		Ok(out)
	}

	/// Load the configuration from a JSON file
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let deser: ConfigDeser = json::deserialize(path)?;
		Self::from_deser(deser)
	}

	/// Create the configuration from its deserialized form
	pub fn from_deser(deser: ConfigDeser) -> Result<Self> {
		let mut out = Self::new();
		if let Some(millis) = deser.fetch_timeout_ms {
			out.fetch_timeout = fetch_timeout_from_millis(millis, "fetch_timeout_ms")?;
		}
		if let Some(entries) = deser.classpath {
			let mut classpath = Classpath::new();
			classpath.add_multiple(entries.into_iter());
			out.classpath = classpath;
		}
		if let Some(temp_dir) = deser.temp_dir {
			out.temp_dir = temp_dir;
		}
		if let Some(user_agent) = deser.user_agent {
			out.user_agent = user_agent;
		}
		if let Some(charset) = deser.charset {
			out.charset = charset.parse()?;
		}
		out.absolute_path_fallback = deser.absolute_path_fallback;

		Ok(out)
	}

	/// Get a builder for the configuration
	pub fn builder() -> ConfigBuilder {
		ConfigBuilder::new()
	}

	/// How long a remote fetch may take in total
	pub fn fetch_timeout(&self) -> Duration {
		self.fetch_timeout
	}

	/// Where `/`-prefixed references are looked up
	pub fn classpath(&self) -> &Classpath {
		&self.classpath
	}

	/// Where downloaded and extracted copies are placed
	pub fn temp_dir(&self) -> &Path {
		&self.temp_dir
	}

	/// The charset used when no other is given
	pub fn charset(&self) -> Charset {
		self.charset
	}

	/// Whether `/`-prefixed references missing from the classpath are tried as absolute paths
	pub fn absolute_path_fallback(&self) -> bool {
		self.absolute_path_fallback
	}
}

/// Simple builder for the configuration
pub struct ConfigBuilder {
	config: Configuration,
}

impl ConfigBuilder {
	/// Start a new ConfigBuilder with default configuration
	pub fn new() -> Self {
		Self {
			config: Configuration::new(),
		}
	}

	/// Finish building and get the configuration
	pub fn build(self) -> Configuration {
		self.config
	}

	/// Add an entry to the end of the classpath
	pub fn classpath_entry(mut self, entry: impl Into<PathBuf>) -> Self {
		self.config.classpath.add(entry);
		self
	}

	builder_method!(
		fetch_timeout,
		Duration,
		"Set how long a remote fetch may take before failing with a timeout"
	);

	builder_method!(classpath, Classpath, "Replace the whole classpath");

	builder_method!(
		temp_dir,
		PathBuf,
		"Set the directory that downloaded and extracted copies are placed in"
	);

	builder_method!(user_agent, String, "Set the User-Agent sent with remote fetches");

	builder_method!(charset, Charset, "Set the charset used when no other is given");

	builder_method!(
		absolute_path_fallback,
		bool,
		"Set whether `/`-prefixed references missing from the classpath are tried as absolute paths"
	);
}

impl From<Configuration> for ConfigBuilder {
	fn from(config: Configuration) -> Self {
		Self { config }
	}
}

impl Default for ConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// Deserialization struct for the configuration
#[derive(Deserialize, Serialize, Default, Debug)]
#[serde(default)]
pub struct ConfigDeser {
	/// Fetch timeout in milliseconds
	#[serde(skip_serializing_if = "Option::is_none")]
	pub fetch_timeout_ms: Option<u64>,
	/// Classpath entries, in lookup order
	#[serde(skip_serializing_if = "Option::is_none")]
	pub classpath: Option<Vec<String>>,
	/// Directory for temporary copies
	#[serde(skip_serializing_if = "Option::is_none")]
	pub temp_dir: Option<PathBuf>,
	/// User-Agent for remote fetches
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_agent: Option<String>,
	/// Name of the default charset, like `UTF-8` or `ISO-8859-1`
	#[serde(skip_serializing_if = "Option::is_none")]
	pub charset: Option<String>,
	/// Whether to try missing classpath references as absolute paths
	pub absolute_path_fallback: bool,
}

/// Parses the value of [FETCH_TIMEOUT_ENV]
fn parse_fetch_timeout(value: &str) -> Result<Duration> {
	let millis = value.trim().parse::<u64>().map_err(|_| {
		FileError::Config(format!(
			"{FETCH_TIMEOUT_ENV} must be a whole number of milliseconds, got '{value}'"
		))
	})?;

	fetch_timeout_from_millis(millis, FETCH_TIMEOUT_ENV)
}

/// A zero timeout would fail every fetch before it starts
fn fetch_timeout_from_millis(millis: u64, setting: &str) -> Result<Duration> {
	if millis == 0 {
		return Err(FileError::Config(format!("{setting} must not be zero")));
	}

	Ok(Duration::from_millis(millis))
}

/// The classpath from the environment, or the current directory if it is unset
fn default_classpath() -> Classpath {
	match std::env::var(CLASSPATH_ENV) {
		Ok(var) if !var.trim().is_empty() => Classpath::parse(&var),
		_ => {
			let mut out = Classpath::new();
			out.add(".");
			out
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_builder() {
		let config = Configuration::builder()
			.fetch_timeout(Duration::from_millis(250))
			.classpath(Classpath::new())
			.classpath_entry("resources")
			.charset(Charset::Latin1)
			.build();

		assert_eq!(config.fetch_timeout(), Duration::from_millis(250));
		assert_eq!(config.classpath().get_str(), "resources");
		assert_eq!(config.charset(), Charset::Latin1);
		assert!(!config.absolute_path_fallback);
	}

	#[test]
	fn test_load_from_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("avocado.json");
		std::fs::write(
			&path,
			r#"{"fetch_timeout_ms": 1500, "classpath": ["a", "b.jar"], "charset": "ISO-8859-1"}"#,
		)
		.unwrap();

		let config = Configuration::load(&path).unwrap();
		assert_eq!(config.fetch_timeout(), Duration::from_millis(1500));
		assert_eq!(
			config.classpath().get_entries(),
			&[PathBuf::from("a"), PathBuf::from("b.jar")]
		);
		assert_eq!(config.charset(), Charset::Latin1);
		assert_eq!(config.temp_dir(), std::env::temp_dir());
	}

	#[test]
	fn test_invalid_values() {
		let zero = ConfigDeser {
			fetch_timeout_ms: Some(0),
			..Default::default()
		};
		assert!(matches!(
			Configuration::from_deser(zero),
			Err(FileError::Config(..))
		));

		let charset = ConfigDeser {
			charset: Some("KOI8-R".into()),
			..Default::default()
		};
		assert!(Configuration::from_deser(charset).is_err());
	}

	#[test]
	fn test_env_timeout() {
		assert_eq!(
			parse_fetch_timeout("1500").unwrap(),
			Duration::from_millis(1500)
		);
		assert_eq!(
			parse_fetch_timeout(" 20 \n").unwrap(),
			Duration::from_millis(20)
		);

		let err = parse_fetch_timeout("soon").unwrap_err();
		assert!(matches!(&err, FileError::Config(msg) if msg.contains(FETCH_TIMEOUT_ENV)));
		assert!(parse_fetch_timeout("-5").is_err());

		let err = parse_fetch_timeout("0").unwrap_err();
		assert!(matches!(&err, FileError::Config(msg) if msg.ends_with("must not be zero")));
	}

	#[test]
	fn test_builder_from_config() {
		let base = Configuration::builder()
			.fetch_timeout(Duration::from_secs(2))
			.build();
		let config = ConfigBuilder::from(base)
			.absolute_path_fallback(true)
			.build();

		assert_eq!(config.fetch_timeout(), Duration::from_secs(2));
		assert!(config.absolute_path_fallback());
	}
}
