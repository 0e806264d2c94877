//! Converter tests
//!
//! End-to-end conversion through the public API:
//! - A full library: tree shape, merging, overloads, heritage, groups
//! - Type node and resolved type conversion
//! - Extension points: custom converters and listeners

pub mod tests_extension;
pub mod tests_library;
pub mod tests_types;
