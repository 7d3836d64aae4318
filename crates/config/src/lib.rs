// Configuration loading

pub mod cli;

pub use cli::{CliConfig, ConfigError};
