use std::path::{Path, PathBuf};

use tempfile::TempPath;

use crate::error::{FileError, Result};

/// Where the bytes of a resolved file came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
	/// A file on the local filesystem, used in place
	Filesystem,
	/// A resource found on the classpath
	Classpath {
		/// The classpath entry (directory or archive) that held the resource
		root: PathBuf,
	},
	/// An entry copied out of a JAR archive
	Jar {
		/// The archive the entry was read from
		archive: PathBuf,
		/// The name of the entry
		entry: String,
	},
	/// A resource downloaded from a URL
	Remote {
		/// The URL the resource was fetched from
		url: String,
	},
}

/// A resource that is available as a file on local disk.
///
/// Downloaded and extracted resources are temporary copies owned by this
/// handle and are deleted when it is dropped, unless [ResolvedFile::keep] is used
#[derive(Debug)]
pub struct ResolvedFile {
	path: PathBuf,
	origin: Origin,
	temp: Option<TempPath>,
}

impl ResolvedFile {
	/// A file that is used in place
	pub(crate) fn in_place(path: PathBuf, origin: Origin) -> Self {
		Self {
			path,
			origin,
			temp: None,
		}
	}

	/// A temporary copy that this handle owns
	pub(crate) fn temporary(temp: TempPath, origin: Origin) -> Self {
		Self {
			path: temp.to_path_buf(),
			origin,
			temp: Some(temp),
		}
	}

	/// The local path of the file
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Where the file came from
	pub fn origin(&self) -> &Origin {
		&self.origin
	}

	/// Whether the file is a temporary copy that is deleted with this handle
	pub fn is_temporary(&self) -> bool {
		self.temp.is_some()
	}

	/// Gives up ownership of a temporary copy so that it outlives this handle,
	/// and returns the path of the file
	pub fn keep(self) -> Result<PathBuf> {
		if let Some(temp) = self.temp {
			temp.keep().map_err(|e| FileError::io(&self.path, e.error))
		} else {
			Ok(self.path)
		}
	}
}

impl AsRef<Path> for ResolvedFile {
	fn as_ref(&self) -> &Path {
		&self.path
	}
}
