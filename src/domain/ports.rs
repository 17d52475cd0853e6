use crate::domain::model::{
    ContainerInvocation, Edge, FilenameMap, InputKind, InputSummary, NodeFlags, RunParams,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Read access to a caller-owned dataset.
pub trait Dataset {
    /// Nodes carrying a source or target annotation, or `None` when the
    /// dataset has no such annotations.
    fn request_sources_targets(&self) -> Result<Option<Vec<NodeFlags>>>;

    fn get_interactome(&self) -> Result<Vec<Edge>>;
}

/// Runs a command inside a container and returns its captured output.
/// Implementations fail on non-zero exit.
#[async_trait]
pub trait ContainerExecutor: Send + Sync {
    async fn run_container(&self, invocation: &ContainerInvocation) -> Result<String>;
}

/// A pathway reconstruction method wrapped as three file-to-file stages.
#[async_trait]
pub trait PathwayAlgorithm: Send + Sync {
    fn name(&self) -> &'static str;

    fn required_inputs(&self) -> &'static [InputKind];

    fn generate_inputs(
        &self,
        data: &dyn Dataset,
        filename_map: &FilenameMap,
    ) -> Result<Option<InputSummary>>;

    async fn run(&self, params: &RunParams) -> Result<()>;

    fn parse_output(&self, raw_pathway_file: &Path, standardized_pathway_file: &Path)
        -> Result<usize>;
}
