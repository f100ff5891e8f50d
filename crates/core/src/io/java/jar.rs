use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tempfile::TempPath;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{FileError, Result};
use crate::io::files;

/// File extensions of archives that can hold classpath resources
pub const ARCHIVE_EXTENSIONS: [&str; 2] = ["jar", "zip"];

/// Checks whether a path names a JAR or ZIP archive by its extension
pub fn is_archive(path: &Path) -> bool {
	path.extension()
		.map(|ext| {
			let ext = ext.to_string_lossy();
			ARCHIVE_EXTENSIONS
				.iter()
				.any(|x| ext.eq_ignore_ascii_case(x))
		})
		.unwrap_or(false)
}

/// Opens a JAR archive for reading
pub fn open(path: &Path) -> Result<ZipArchive<BufReader<File>>> {
	let file = BufReader::new(File::open(path).map_err(|e| FileError::io(path, e))?);
	ZipArchive::new(file).map_err(|e| FileError::Archive {
		path: path.to_owned(),
		source: e,
	})
}

/// Copies one entry of a JAR archive into a new temporary file in `temp_dir`.
/// Returns None if the archive has no such entry, or if the entry is a directory
pub fn extract_entry(path: &Path, entry: &str, temp_dir: &Path) -> Result<Option<TempPath>> {
	let entry = entry.trim_start_matches('/');
	let mut archive = open(path)?;
	let mut zipped = match archive.by_name(entry) {
		Ok(zipped) => zipped,
		Err(ZipError::FileNotFound) => return Ok(None),
		Err(e) => {
			return Err(FileError::Archive {
				path: path.to_owned(),
				source: e,
			})
		}
	};
	if zipped.is_dir() {
		return Ok(None);
	}

	let temp = files::temp_file(temp_dir, entry).map_err(|e| FileError::io(temp_dir, e))?;
	let temp_path = temp.path().to_owned();
	let mut writer = BufWriter::new(temp.as_file());
	std::io::copy(&mut zipped, &mut writer).map_err(|e| FileError::io(&temp_path, e))?;
	writer.flush().map_err(|e| FileError::io(&temp_path, e))?;
	drop(writer);

	Ok(Some(temp.into_temp_path()))
}

#[cfg(test)]
pub(crate) mod tests {
	use std::path::PathBuf;

	use zip::write::SimpleFileOptions;
	use zip::{CompressionMethod, ZipWriter};

	use super::*;

	/// Writes a JAR archive containing the given entries
	pub(crate) fn write_jar(path: &Path, entries: &[(&str, &str)]) {
		let file = File::create(path).unwrap();
		let mut zip = ZipWriter::new(file);
		let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
		for (name, contents) in entries {
			zip.start_file(*name, options).unwrap();
			zip.write_all(contents.as_bytes()).unwrap();
		}
		zip.finish().unwrap();
	}

	#[test]
	fn test_is_archive() {
		assert!(is_archive(Path::new("libs/junit-4.13.jar")));
		assert!(is_archive(Path::new("bundle.ZIP")));
		assert!(!is_archive(Path::new("resources")));
		assert!(!is_archive(Path::new("notes.txt")));
	}

	#[test]
	fn test_extract_entry() {
		let dir = tempfile::tempdir().unwrap();
		let jar = dir.path().join("lib.jar");
		write_jar(
			&jar,
			&[
				("META-INF/MANIFEST.MF", "Manifest-Version: 1.0\n"),
				("changelog.txt", "v1: first\n"),
			],
		);

		let temp_dir = dir.path().join("tmp");
		let extracted = extract_entry(&jar, "/META-INF/MANIFEST.MF", &temp_dir)
			.unwrap()
			.unwrap();
		assert_eq!(
			std::fs::read_to_string(&extracted).unwrap(),
			"Manifest-Version: 1.0\n"
		);

		let path: PathBuf = extracted.to_path_buf();
		drop(extracted);
		assert!(!path.exists());
	}

	#[test]
	fn test_missing_entry() {
		let dir = tempfile::tempdir().unwrap();
		let jar = dir.path().join("lib.jar");
		write_jar(&jar, &[("a.txt", "a")]);

		assert!(extract_entry(&jar, "b.txt", dir.path()).unwrap().is_none());
	}

	#[test]
	fn test_not_an_archive() {
		let dir = tempfile::tempdir().unwrap();
		let fake = dir.path().join("fake.jar");
		std::fs::write(&fake, "not a zip").unwrap();

		assert!(matches!(
			extract_entry(&fake, "a.txt", dir.path()),
			Err(FileError::Archive { .. })
		));
	}
}
