//! Load options and per-environment configuration
//!
//! # Load options
//!
//! [`LoadOptions`] carries everything the loader needs to know that is not
//! in the project itself: where the schemas live, which environment is
//! selected, and how deep `$ref` chains may nest. Options are built by the
//! caller; [`LoadOptions::from_env`] is the single place that reads process
//! environment variables.
//!
//! # Environment configuration
//!
//! A project may carry one configuration file per environment:
//!
//! ```text
//! <project>/config/
//!   qa.yaml
//!   stage.json
//!   prod.toml
//! ```
//!
//! When an environment is selected, exactly one `config/<env>.*` file must
//! exist. Its parsed contents are attached to the application.

mod environment;
mod options;

pub use environment::EnvironmentConfig;
pub use options::{ENVIRONMENT_VAR, LoadOptions, SCHEMA_DIR_VAR, default_schema_dir};
