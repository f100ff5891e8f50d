#![warn(missing_docs)]

//! Networking for avocado. Everything here is blocking; a fetch either
//! finishes within the client's timeout or fails.

/// Download utilities
pub mod download;
