use std::path::{Component, Path, PathBuf};

use avocado_shared::output::{AvocadoOutput, MessageContents, MessageLevel};
use tempfile::TempPath;

use super::jar;
use crate::error::Result;

/// The separator for entries in the classpath
#[cfg(not(target_os = "windows"))]
pub const CLASSPATH_SEP: char = ':';
/// The separator for entries in the classpath
#[cfg(target_os = "windows")]
pub const CLASSPATH_SEP: char = ';';

/// An ordered list of directories and archives that resources are looked up in.
/// When more than one entry holds a resource, the earliest entry wins
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Classpath {
	entries: Vec<PathBuf>,
}

/// Where a classpath resource was found
#[derive(Debug)]
pub enum ClasspathHit {
	/// A plain file inside a directory entry
	File(PathBuf),
	/// An entry of an archive, copied out to a temporary file
	Extracted {
		/// The archive the entry came from
		archive: PathBuf,
		/// The temporary copy
		temp: TempPath,
	},
}

impl Classpath {
	/// Create a new empty classpath
	pub fn new() -> Self {
		Self {
			entries: Vec::new(),
		}
	}

	/// Parse a classpath string where entries are separated by [CLASSPATH_SEP]
	pub fn parse(string: &str) -> Self {
		let mut out = Self::new();
		out.add_multiple(string.split(CLASSPATH_SEP).filter(|x| !x.is_empty()));
		out
	}

	/// Appends a path to the end of the classpath
	pub fn add(&mut self, path: impl Into<PathBuf>) {
		self.entries.push(path.into());
	}

	/// Adds multiple paths to the classpath
	pub fn add_multiple<I: Into<PathBuf>>(&mut self, paths: impl Iterator<Item = I>) {
		for path in paths {
			self.add(path);
		}
	}

	/// Extends the classpath with another classpath
	pub fn extend(&mut self, other: Classpath) {
		self.entries.extend(other.entries);
	}

	/// Obtain the classpath as a string
	pub fn get_str(&self) -> String {
		let mut buf = [0; 4];
		let entries: Vec<_> = self
			.entries
			.iter()
			.map(|x| x.to_string_lossy())
			.collect();
		entries.join(CLASSPATH_SEP.encode_utf8(&mut buf))
	}

	/// Get the classpath as a list of entries
	pub fn get_entries(&self) -> &[PathBuf] {
		&self.entries
	}

	/// Whether the classpath has no entries
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Looks up a resource name like `/META-INF/MANIFEST.MF` in every entry, in order.
	/// Resources found inside archives are extracted to `temp_dir`.
	/// Entries that do not exist or cannot be read are skipped.
	/// Names that would leave the entry they are looked up in, like `/../a.txt`, are never found
	pub fn find(
		&self,
		name: &str,
		temp_dir: &Path,
		o: &mut impl AvocadoOutput,
	) -> Result<Option<ClasspathHit>> {
		let name = name.trim_start_matches('/');
		if name.is_empty() {
			return Ok(None);
		}
		if !is_contained(name) {
			o.display(
				MessageContents::Warning(format!(
					"Refusing classpath resource {name} that points outside its entry"
				)),
				MessageLevel::Debug,
			);
			return Ok(None);
		}

		for entry in &self.entries {
			if entry.is_dir() {
				let candidate = entry.join(name);
				if candidate.is_file() {
					return Ok(Some(ClasspathHit::File(candidate)));
				}
			} else if entry.is_file() && jar::is_archive(entry) {
				match jar::extract_entry(entry, name, temp_dir) {
					Ok(Some(temp)) => {
						return Ok(Some(ClasspathHit::Extracted {
							archive: entry.clone(),
							temp,
						}))
					}
					Ok(None) => {}
					Err(e) => o.display(
						MessageContents::Warning(format!(
							"Skipping unreadable classpath archive {}: {e}",
							entry.display()
						)),
						MessageLevel::Debug,
					),
				}
			} else {
				o.display(
					MessageContents::Property(
						"Skipping classpath entry".into(),
						Box::new(MessageContents::Location(entry.to_string_lossy().into())),
					),
					MessageLevel::Trace,
				);
			}
		}

		Ok(None)
	}
}

/// Whether a relative resource name stays below the entry it is joined to
fn is_contained(name: &str) -> bool {
	Path::new(name)
		.components()
		.all(|x| matches!(x, Component::Normal(..) | Component::CurDir))
}

#[cfg(test)]
mod tests {
	use avocado_shared::output::{Collect, NoOp};

	use super::*;
	use crate::io::java::jar::tests::write_jar;

	#[test]
	fn test_classpath() {
		let mut classpath = Classpath::new();
		assert_eq!(classpath.get_str(), String::new());
		classpath.add("foo");
		assert_eq!(classpath.get_str(), "foo".to_string());
		classpath.add("bar");
		assert_eq!(
			classpath.get_str(),
			"foo".to_string() + &CLASSPATH_SEP.to_string() + "bar"
		);
	}

	#[test]
	fn test_classpath_parse_and_extend() {
		let mut classpath = Classpath::parse(&format!("foo{0}{0}bar", CLASSPATH_SEP));
		assert_eq!(classpath.get_entries().len(), 2);
		let mut classpath2 = Classpath::new();
		classpath2.add("hello");
		classpath.extend(classpath2);
		assert_eq!(
			classpath.get_str(),
			format!("foo{0}bar{0}hello", CLASSPATH_SEP)
		);
	}

	#[test]
	fn test_first_entry_wins() {
		let dir = tempfile::tempdir().unwrap();
		let first = dir.path().join("first");
		let second = dir.path().join("second");
		std::fs::create_dir_all(first.join("conf")).unwrap();
		std::fs::create_dir_all(second.join("conf")).unwrap();
		std::fs::write(first.join("conf/app.properties"), "first").unwrap();
		std::fs::write(second.join("conf/app.properties"), "second").unwrap();

		let mut classpath = Classpath::new();
		classpath.add(&second);
		classpath.add(&first);

		let hit = classpath
			.find("/conf/app.properties", dir.path(), &mut NoOp)
			.unwrap();
		let Some(ClasspathHit::File(path)) = hit else {
			panic!("Expected a plain file hit");
		};
		assert_eq!(std::fs::read_to_string(path).unwrap(), "second");
	}

	#[test]
	fn test_archive_entry() {
		let dir = tempfile::tempdir().unwrap();
		let jar = dir.path().join("lib.jar");
		write_jar(&jar, &[("changelog.txt", "from the jar")]);
		let empty = dir.path().join("empty");
		std::fs::create_dir(&empty).unwrap();

		let mut classpath = Classpath::new();
		classpath.add(dir.path().join("does-not-exist"));
		classpath.add(&empty);
		classpath.add(&jar);

		let mut o = Collect::new();
		let hit = classpath
			.find("/changelog.txt", &dir.path().join("tmp"), &mut o)
			.unwrap();
		let Some(ClasspathHit::Extracted { archive, temp }) = hit else {
			panic!("Expected an extracted hit");
		};
		assert_eq!(archive, jar);
		assert_eq!(std::fs::read_to_string(&temp).unwrap(), "from the jar");
		assert_eq!(o.texts(MessageLevel::Trace).len(), 1);
	}

	#[test]
	fn test_not_found() {
		let dir = tempfile::tempdir().unwrap();
		let mut classpath = Classpath::new();
		classpath.add(dir.path());

		assert!(classpath
			.find("/missing.txt", dir.path(), &mut NoOp)
			.unwrap()
			.is_none());
		assert!(classpath.find("/", dir.path(), &mut NoOp).unwrap().is_none());
	}

	#[test]
	fn test_parent_components_stay_inside() {
		let dir = tempfile::tempdir().unwrap();
		let resources = dir.path().join("resources");
		std::fs::create_dir_all(resources.join("conf")).unwrap();
		std::fs::write(dir.path().join("secret.txt"), "outside").unwrap();
		std::fs::write(resources.join("conf/app.properties"), "inside").unwrap();
		let mut classpath = Classpath::new();
		classpath.add(&resources);

		let mut o = Collect::new();
		for name in ["/../secret.txt", "/conf/../../secret.txt", "//../secret.txt"] {
			assert!(classpath.find(name, dir.path(), &mut o).unwrap().is_none());
		}
		assert_eq!(o.texts(MessageLevel::Debug).len(), 3);

		let hit = classpath
			.find("/./conf/app.properties", dir.path(), &mut NoOp)
			.unwrap();
		assert!(matches!(hit, Some(ClasspathHit::File(..))));
	}
}
