/// Reading file contents as text
pub mod content;
/// Utilities for dealing with the filesystem
pub mod files;
/// Interaction with Java's classpath and archive formats
pub mod java;
/// JSON serialization to and from files
pub mod json;
