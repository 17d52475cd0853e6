pub mod allpairs;
pub mod engine;
pub mod inputs;
pub mod output;
pub mod runner;
pub mod volume;

pub use crate::domain::model::{
    ContainerFramework, ContainerInvocation, Edge, FilenameMap, InputKind, InputSummary,
    NodeFlags, NodeType, RunParams, VolumeBinding,
};
pub use crate::domain::ports::{ContainerExecutor, Dataset, PathwayAlgorithm};
pub use crate::utils::error::Result;
