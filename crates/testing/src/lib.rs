#![warn(missing_docs)]

//! Helpers for writing tests: a temporary folder that lives as long as a
//! test run, and a generator of fake names, words and numbers.

/// Fake data generation
pub mod fake;
/// Temporary folders for test runs
pub mod folder;

pub use fake::Faker;
pub use folder::TestFolder;
