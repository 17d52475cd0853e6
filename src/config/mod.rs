#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{Cli, Command};
pub use toml_config::{AllPairsConfig, ContainerSettings, DatasetConfig, OutputConfig};
