/// Parsing of resource reference strings
pub mod reference;
/// Handles to resolved files
pub mod resolved;

use std::path::Path;
use std::sync::OnceLock;

use avocado_net::download::{self, Client, FetchError};
use avocado_shared::output::{AvocadoOutput, MessageContents, MessageLevel, OutputProcess};
use serde::de::DeserializeOwned;

use crate::config::Configuration;
use crate::error::{FileError, Result};
use crate::io::content::{self, Charset};
use crate::io::files;
use crate::io::java::classpath::ClasspathHit;
use crate::io::java::jar;
use crate::io::json;

pub use reference::ResourceReference;
pub use resolved::{Origin, ResolvedFile};

/// Turns resource references into files on local disk
pub struct FileLocator {
	config: Configuration,
	client: OnceLock<Client>,
}

impl FileLocator {
	/// Create a locator with the given configuration
	pub fn new(config: Configuration) -> Self {
		Self {
			config,
			client: OnceLock::new(),
		}
	}

	/// Create a locator with the default configuration
	pub fn with_defaults() -> Self {
		Self::new(Configuration::new())
	}

	/// Get the configuration of this locator
	pub fn config(&self) -> &Configuration {
		&self.config
	}

	/// Resolves a reference to a local file. See [ResourceReference] for the schemes
	/// that are understood; the first scheme that matches the string is used
	pub fn resolve(&self, reference: &str, o: &mut impl AvocadoOutput) -> Result<ResolvedFile> {
		let parsed = ResourceReference::parse(reference);
		o.display(
			MessageContents::Property(
				format!("Resolving {} reference", parsed.kind()),
				Box::new(MessageContents::Location(reference.into())),
			),
			MessageLevel::Debug,
		);

		self.resolve_parsed(&parsed, o)
	}

	/// Resolves a reference and reads it as text in the configured charset
	pub fn load_content_as_string(
		&self,
		reference: &str,
		o: &mut impl AvocadoOutput,
	) -> Result<String> {
		self.load_content(reference, self.config.charset, o)
	}

	/// Resolves a reference and reads it as text in the given charset
	pub fn load_content(
		&self,
		reference: &str,
		charset: Charset,
		o: &mut impl AvocadoOutput,
	) -> Result<String> {
		let file = self.resolve(reference, o)?;
		content::load_content(file.path(), charset)
	}

	/// Resolves a reference and deserializes it as JSON
	pub fn deserialize_json<D: DeserializeOwned>(
		&self,
		reference: &str,
		o: &mut impl AvocadoOutput,
	) -> Result<D> {
		let file = self.resolve(reference, o)?;
		json::deserialize(file.path())
	}

	fn resolve_parsed(
		&self,
		reference: &ResourceReference,
		o: &mut impl AvocadoOutput,
	) -> Result<ResolvedFile> {
		match reference {
			ResourceReference::Jar { archive, entry } => {
				self.resolve_jar(reference, archive, entry, o)
			}
			ResourceReference::Remote(url) => self.fetch(url, o),
			ResourceReference::FileUrl(path) | ResourceReference::Path(path) => {
				local_file(path, reference)
			}
			ResourceReference::Classpath(name) => self.resolve_classpath(name, o),
		}
	}

	fn resolve_jar(
		&self,
		reference: &ResourceReference,
		archive: &ResourceReference,
		entry: &str,
		o: &mut impl AvocadoOutput,
	) -> Result<ResolvedFile> {
		let archive_file = self.resolve_parsed(archive, o)?;
		let extracted = jar::extract_entry(archive_file.path(), entry, &self.config.temp_dir)?
			.ok_or_else(|| not_found(reference))?;

		o.display(
			MessageContents::Property(
				format!("Extracted {entry} to"),
				Box::new(MessageContents::Location(
					extracted.to_string_lossy().into(),
				)),
			),
			MessageLevel::Debug,
		);

		Ok(ResolvedFile::temporary(
			extracted,
			Origin::Jar {
				archive: archive_file.path().to_owned(),
				entry: entry.to_string(),
			},
		))
	}

	fn resolve_classpath(&self, name: &str, o: &mut impl AvocadoOutput) -> Result<ResolvedFile> {
		let hit = self
			.config
			.classpath
			.find(name, &self.config.temp_dir, o)?;

		match hit {
			Some(ClasspathHit::File(path)) => {
				let root = classpath_root(&path, name);
				Ok(ResolvedFile::in_place(path, Origin::Classpath { root }))
			}
			Some(ClasspathHit::Extracted { archive, temp }) => Ok(ResolvedFile::temporary(
				temp,
				Origin::Classpath { root: archive },
			)),
			None if self.config.absolute_path_fallback => {
				o.display(
					MessageContents::Simple(format!(
						"{name} is not on the classpath, trying it as an absolute path"
					)),
					MessageLevel::Trace,
				);
				local_file(Path::new(name), &ResourceReference::Classpath(name.into()))
			}
			None => Err(FileError::NotFound {
				reference: name.into(),
			}),
		}
	}

	fn fetch(&self, url: &str, o: &mut impl AvocadoOutput) -> Result<ResolvedFile> {
		let client = self.client()?;
		let temp = files::temp_file(&self.config.temp_dir, url)
			.map_err(|e| FileError::io(&self.config.temp_dir, e))?
			.into_temp_path();

		let process = OutputProcess::new(o);
		process.0.display(
			MessageContents::StartProcess(format!("Downloading {url}")),
			MessageLevel::Extra,
		);
		download::file(url, &temp, client, &mut *process.0)
			.map_err(|e| self.fetch_error(url, e))?;
		process.0.display(
			MessageContents::Success(format!("Downloaded {url}")),
			MessageLevel::Extra,
		);

		Ok(ResolvedFile::temporary(
			temp,
			Origin::Remote { url: url.into() },
		))
	}

	fn fetch_error(&self, url: &str, error: FetchError) -> FileError {
		match error {
			FetchError::Timeout { url } => FileError::FetchTimeout {
				url,
				timeout: self.config.fetch_timeout,
			},
			FetchError::Io { path, source } => FileError::Io { path, source },
			e if e.is_not_found() => FileError::NotFound {
				reference: url.into(),
			},
			e => FileError::Fetch(e),
		}
	}

	fn client(&self) -> Result<&Client> {
		if let Some(client) = self.client.get() {
			return Ok(client);
		}
		let client = download::client(self.config.fetch_timeout, &self.config.user_agent)
			.map_err(FileError::Fetch)?;

		Ok(self.client.get_or_init(|| client))
	}
}

fn not_found(reference: &ResourceReference) -> FileError {
	FileError::NotFound {
		reference: reference.to_string(),
	}
}

/// Uses an existing regular file in place
fn local_file(path: &Path, reference: &ResourceReference) -> Result<ResolvedFile> {
	if path.is_file() {
		Ok(ResolvedFile::in_place(path.to_owned(), Origin::Filesystem))
	} else {
		Err(not_found(reference))
	}
}

/// Recovers the classpath directory a resource was found in from its full path
fn classpath_root(path: &Path, name: &str) -> std::path::PathBuf {
	let depth = Path::new(name.trim_start_matches('/')).components().count();
	path.ancestors()
		.nth(depth)
		.map(Path::to_path_buf)
		.unwrap_or_else(|| path.to_path_buf())
}
