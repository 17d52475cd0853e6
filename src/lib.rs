pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::Cli;

pub use adapters::{CliContainerExecutor, TableDataset};
pub use config::{AllPairsConfig, ContainerSettings};
pub use core::{
    allpairs::AllPairs,
    engine::{PathwayEngine, PipelineLayout, PipelineReport},
};
pub use domain::model::{ContainerFramework, FilenameMap, RunParams};
pub use domain::ports::{ContainerExecutor, Dataset, PathwayAlgorithm};
pub use utils::error::{PrmError, Result};
