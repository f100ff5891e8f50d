#![warn(missing_docs)]

//! Locate files wherever they live, load their contents, and keep values in
//! JSON files.
//!
//! ```no_run
//! let content = avocado::load_file_content_as_string("/log.properties")?;
//! # Ok::<(), avocado::FileError>(())
//! ```

pub use avocado_net as net;
pub use avocado_shared as shared;

pub use avocado_core::io::json;
pub use avocado_core::{
	config, error, io, locator, Charset, Classpath, ConfigBuilder, Configuration, FileError,
	FileLocator, Origin, ResolvedFile, ResourceReference, Result,
};

use avocado_shared::output::NoOp;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Resolves a reference to a local file using the configuration from the environment.
/// A `/`-prefixed reference that is not on the classpath is tried as an absolute path
pub fn get_file(reference: &str) -> Result<ResolvedFile> {
	default_locator()?.resolve(reference, &mut NoOp)
}

/// Resolves a reference and reads it as UTF-8 text
pub fn load_file_content_as_string(reference: &str) -> Result<String> {
	default_locator()?.load_content_as_string(reference, &mut NoOp)
}

/// Resolves a reference and reads it as text in the given charset
pub fn load_file_content(reference: &str, charset: Charset) -> Result<String> {
	default_locator()?.load_content(reference, charset, &mut NoOp)
}

/// Writes a value to a JSON file, creating leading directories
pub fn serialize<S: Serialize + ?Sized>(path: impl AsRef<Path>, value: &S) -> Result<()> {
	json::serialize(path, value)
}

/// Reads a JSON file into a value of the requested type
pub fn deserialize<D: DeserializeOwned>(path: impl AsRef<Path>) -> Result<D> {
	json::deserialize(path)
}

fn default_locator() -> Result<FileLocator> {
	let config = ConfigBuilder::from(Configuration::from_env()?)
		.absolute_path_fallback(true)
		.build();

	Ok(FileLocator::new(config))
}
