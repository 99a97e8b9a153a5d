//! Shared test fixtures for the routest workspace.
//!
//! This crate is a dev-dependency only and is never published.
//!
//! # Modules
//!
//! - [`project`]: [`TestProject`](project::TestProject) builder for
//!   on-disk routest projects

pub mod project;

pub use project::TestProject;
