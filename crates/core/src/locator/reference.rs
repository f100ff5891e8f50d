use std::fmt::Display;
use std::path::PathBuf;

use url::Url;

/// A resource reference, sorted by the scheme it was written with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceReference {
	/// `jar:<archive>!/<entry>`: an entry inside an archive that is itself referenced
	Jar {
		/// Reference to the archive
		archive: Box<ResourceReference>,
		/// Name of the entry inside the archive
		entry: String,
	},
	/// `http://` or `https://` URL
	Remote(String),
	/// `file:` URL, already converted to a path
	FileUrl(PathBuf),
	/// `/`-prefixed name looked up on the classpath
	Classpath(String),
	/// Anything else, used directly as a filesystem path
	Path(PathBuf),
}

/// Tries to read a reference in one particular scheme
type Matcher = fn(&str) -> Option<ResourceReference>;

/// Matchers in priority order. The first one that accepts a string decides its scheme
const MATCHERS: [Matcher; 4] = [match_jar, match_remote, match_file_url, match_classpath];

impl ResourceReference {
	/// Sorts a reference string into its scheme. Strings that no scheme accepts are paths
	pub fn parse(reference: &str) -> Self {
		MATCHERS
			.iter()
			.find_map(|matcher| matcher(reference))
			.unwrap_or_else(|| Self::Path(PathBuf::from(reference)))
	}

	/// Short name of the scheme, used in messages
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Jar { .. } => "jar",
			Self::Remote(..) => "remote",
			Self::FileUrl(..) => "file URL",
			Self::Classpath(..) => "classpath",
			Self::Path(..) => "path",
		}
	}
}

impl Display for ResourceReference {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Jar { archive, entry } => write!(f, "jar:{archive}!/{entry}"),
			Self::Remote(url) => write!(f, "{url}"),
			Self::FileUrl(path) => write!(f, "file:{}", path.display()),
			Self::Classpath(name) => write!(f, "{name}"),
			Self::Path(path) => write!(f, "{}", path.display()),
		}
	}
}

/// Strips a URL scheme prefix, ignoring ASCII case the way URL schemes do
fn strip_scheme<'a>(string: &'a str, scheme: &str) -> Option<&'a str> {
	let prefix = string.get(..scheme.len())?;
	if prefix.eq_ignore_ascii_case(scheme) {
		Some(&string[scheme.len()..])
	} else {
		None
	}
}

fn match_jar(string: &str) -> Option<ResourceReference> {
	let rest = strip_scheme(string, "jar:")?;
	let (archive, entry) = rest.split_once("!/")?;
	if archive.is_empty() {
		return None;
	}

	Some(ResourceReference::Jar {
		archive: Box::new(ResourceReference::parse(archive)),
		entry: entry.to_string(),
	})
}

fn match_remote(string: &str) -> Option<ResourceReference> {
	if strip_scheme(string, "http://").is_some() || strip_scheme(string, "https://").is_some() {
		Some(ResourceReference::Remote(string.to_string()))
	} else {
		None
	}
}

fn match_file_url(string: &str) -> Option<ResourceReference> {
	let rest = strip_scheme(string, "file:")?;
	if rest.starts_with("//") {
		// Authority form like file:///etc/hosts, which may be percent-encoded
		if let Some(path) = Url::parse(string)
			.ok()
			.and_then(|url| url.to_file_path().ok())
		{
			return Some(ResourceReference::FileUrl(path));
		}
	}

	Some(ResourceReference::FileUrl(PathBuf::from(rest)))
}

fn match_classpath(string: &str) -> Option<ResourceReference> {
	if string.starts_with('/') {
		Some(ResourceReference::Classpath(string.to_string()))
	} else {
		None
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_plain_paths() {
		assert_eq!(
			ResourceReference::parse("config/app.json"),
			ResourceReference::Path("config/app.json".into())
		);
		assert_eq!(
			ResourceReference::parse("notes.txt"),
			ResourceReference::Path("notes.txt".into())
		);
	}

	#[test]
	fn test_classpath() {
		assert_eq!(
			ResourceReference::parse("/META-INF/MANIFEST.MF"),
			ResourceReference::Classpath("/META-INF/MANIFEST.MF".into())
		);
	}

	#[test]
	fn test_remote() {
		let reference = ResourceReference::parse("HTTPS://www.w3.org/TR/PNG/iso_8859-1.txt");
		assert_eq!(reference.kind(), "remote");
		assert!(matches!(
			ResourceReference::parse("http://localhost:8080/a"),
			ResourceReference::Remote(..)
		));
		assert_eq!(
			ResourceReference::parse("httpdocs/index.html").kind(),
			"path"
		);
	}

	#[test]
	fn test_file_urls() {
		assert_eq!(
			ResourceReference::parse("file:../etc/deploy-settings.xml"),
			ResourceReference::FileUrl("../etc/deploy-settings.xml".into())
		);
		assert_eq!(
			ResourceReference::parse("file:/var/data/x.properties"),
			ResourceReference::FileUrl("/var/data/x.properties".into())
		);
		#[cfg(unix)]
		assert_eq!(
			ResourceReference::parse("file:///var/my%20data/x.properties"),
			ResourceReference::FileUrl("/var/my data/x.properties".into())
		);
	}

	#[test]
	fn test_jar() {
		let reference = ResourceReference::parse(
			"jar:file:./src/test/resources/credentials-0.16.1.jar!/META-INF/MANIFEST.MF",
		);
		assert_eq!(
			reference,
			ResourceReference::Jar {
				archive: Box::new(ResourceReference::FileUrl(
					"./src/test/resources/credentials-0.16.1.jar".into()
				)),
				entry: "META-INF/MANIFEST.MF".into(),
			}
		);

		let remote = ResourceReference::parse("jar:https://example.com/lib.jar!/a/b.txt");
		let ResourceReference::Jar { archive, entry } = remote else {
			panic!("Expected a jar reference");
		};
		assert_eq!(archive.kind(), "remote");
		assert_eq!(entry, "a/b.txt");
	}

	#[test]
	fn test_jar_without_entry_separator_is_a_path() {
		assert_eq!(
			ResourceReference::parse("jar:lib.jar"),
			ResourceReference::Path("jar:lib.jar".into())
		);
	}

	#[test]
	fn test_display() {
		let reference = "jar:file:lib.jar!/a.txt";
		assert_eq!(ResourceReference::parse(reference).to_string(), reference);
	}
}
