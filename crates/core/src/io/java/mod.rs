/// Ordered lists of resource roots
pub mod classpath;
/// Reading entries out of JAR archives
pub mod jar;
