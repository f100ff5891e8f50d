#![warn(missing_docs)]

//! Types shared by every avocado crate. At the moment this is the output
//! abstraction that library functions report their progress through.

/// Output and logging of messages
pub mod output;
