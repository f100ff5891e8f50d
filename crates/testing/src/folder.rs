use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use anyhow::Context;
use avocado_core::{Classpath, Configuration, FileLocator};
use avocado_shared::output::{AvocadoOutput, MessageContents, MessageLevel, NoOp};
use uuid::Uuid;

/// A uniquely named folder under the system temporary directory that is
/// deleted, with everything in it, when dropped
pub struct TestFolder {
	path: PathBuf,
	locator: FileLocator,
}

impl TestFolder {
	/// Creates a new folder under the system temporary directory
	pub fn new(o: &mut impl AvocadoOutput) -> anyhow::Result<Self> {
		Self::new_in(&std::env::temp_dir(), o)
	}

	/// Creates a new folder under another directory
	pub fn new_in(base: &Path, o: &mut impl AvocadoOutput) -> anyhow::Result<Self> {
		let path = base.join(Uuid::new_v4().to_string());
		std::fs::create_dir_all(&path)
			.with_context(|| format!("Failed to create test folder {}", path.display()))?;

		o.display(
			MessageContents::Property(
				"Test folder set to".into(),
				Box::new(MessageContents::Location(path.to_string_lossy().into())),
			),
			MessageLevel::Debug,
		);

		let locator = FileLocator::new(
			Configuration::builder()
				.classpath(Classpath::new())
				.temp_dir(path.join(".resolved"))
				.build(),
		);

		Ok(Self { path, locator })
	}

	/// The path of the folder
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// The path of a file inside the folder. The file is not created
	pub fn file(&self, name: &str) -> PathBuf {
		self.path.join(name)
	}

	/// A path inside the folder with a fresh random name and the given extension
	pub fn random_file(&self, extension: &str) -> PathBuf {
		self.path.join(format!("{}.{extension}", Uuid::new_v4()))
	}

	/// Checks whether a file exists in this folder.
	///
	/// A name containing a path separator must be in exactly this folder; any
	/// other directory means the file is reported as missing. A bare name is
	/// looked up inside the folder
	pub fn exist_file(&self, filename: &str) -> bool {
		let reference = if let Some(pos) = filename.rfind(MAIN_SEPARATOR) {
			let dir = &filename[..=pos];
			if normalize_folder_name(dir) != normalize_folder_name(&self.path.to_string_lossy()) {
				return false;
			}
			format!("file:{filename}")
		} else {
			format!("file:{}", self.file(filename).display())
		};

		match self.locator.resolve(&reference, &mut NoOp) {
			Ok(file) => file.path().is_file(),
			Err(..) => false,
		}
	}

	/// Deletes the folder now, reporting any failure
	pub fn delete(self, o: &mut impl AvocadoOutput) -> anyhow::Result<()> {
		std::fs::remove_dir_all(&self.path)
			.with_context(|| format!("Failed to delete test folder {}", self.path.display()))?;
		o.display(
			MessageContents::Success(format!("Test folder {} deleted", self.path.display())),
			MessageLevel::Debug,
		);

		Ok(())
	}
}

impl Drop for TestFolder {
	fn drop(&mut self) {
		if self.path.exists() {
			let _ = std::fs::remove_dir_all(&self.path);
		}
	}
}

/// Removes one leading and one trailing separator from a folder name
fn normalize_folder_name(name: &str) -> &str {
	let name = name.strip_prefix(MAIN_SEPARATOR).unwrap_or(name);
	name.strip_suffix(MAIN_SEPARATOR).unwrap_or(name)
}
