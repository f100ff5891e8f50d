#![warn(missing_docs)]

//! Locating, loading and (de)serializing files. A resource reference is a
//! string naming a file by plain path, `file:` URL, `http(s)` URL,
//! classpath-absolute name (`/…`) or JAR entry (`jar:…!/entry`). The
//! [FileLocator] turns any of them into a file on local disk.
//!
//! Everything here is blocking.

/// Configuration for locating resources
pub mod config;
/// Errors returned by this library
pub mod error;
/// Input / output with files, archives and data formats
pub mod io;
/// Resolution of resource references to local files
pub mod locator;

pub use config::{ConfigBuilder, Configuration};
pub use error::{FileError, Result};
pub use io::content::Charset;
pub use io::java::classpath::Classpath;
pub use locator::{FileLocator, Origin, ResolvedFile, ResourceReference};
