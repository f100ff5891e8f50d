use std::fs;
use std::path::Path;

use tempfile::NamedTempFile;

/// Create all the directories leading up to a path
pub fn create_leading_dirs(path: &Path) -> std::io::Result<()> {
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent)?;
	}

	Ok(())
}

/// Create a directory that may already exist without an error
pub fn create_dir(path: &Path) -> std::io::Result<()> {
	if path.exists() {
		Ok(())
	} else {
		fs::create_dir_all(path)
	}
}

/// Creates an empty temporary file inside a directory. The file name ends with the
/// last segment of `name_hint` so that copies keep the extension of what they copy
pub fn temp_file(dir: &Path, name_hint: &str) -> std::io::Result<NamedTempFile> {
	create_dir(dir)?;
	let suffix = temp_suffix(name_hint);
	tempfile::Builder::new()
		.prefix("avocado-")
		.suffix(&suffix)
		.tempfile_in(dir)
}

fn temp_suffix(name_hint: &str) -> String {
	let name = name_hint
		.split(['?', '#'])
		.next()
		.unwrap_or_default()
		.rsplit(['/', '\\'])
		.next()
		.unwrap_or_default();
	let name: String = name
		.chars()
		.filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
		.collect();

	if name.is_empty() {
		String::new()
	} else {
		format!("-{name}")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_temp_suffix() {
		assert_eq!(temp_suffix("https://example.com/a/b/data.txt?x=1"), "-data.txt");
		assert_eq!(temp_suffix("META-INF/MANIFEST.MF"), "-MANIFEST.MF");
		assert_eq!(temp_suffix("https://example.com/"), "");
	}

	#[test]
	fn test_temp_file_in_missing_dir() {
		let dir = tempfile::tempdir().unwrap();
		let nested = dir.path().join("not/yet/here");
		let file = temp_file(&nested, "thing.json").unwrap();
		assert!(file.path().starts_with(&nested));
		assert!(file
			.path()
			.file_name()
			.unwrap()
			.to_string_lossy()
			.ends_with("-thing.json"));
	}

	#[test]
	fn test_leading_dirs() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("a/b/c.json");
		create_leading_dirs(&path).unwrap();
		assert!(dir.path().join("a/b").is_dir());
		assert!(!path.exists());
	}
}
