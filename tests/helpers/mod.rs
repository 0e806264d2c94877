//! Shared fixtures and assertions for the integration tests.

pub mod program_fixtures;
pub mod project_assertions;
