use crate::config::toml_config::ContainerSettings;
use crate::core::{inputs, output, runner};
use crate::domain::model::{FilenameMap, InputKind, InputSummary, RunParams};
use crate::domain::ports::{ContainerExecutor, Dataset, PathwayAlgorithm};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// All-pairs shortest paths between sources and targets, run from the
/// `annaritz/allpairs` image.
pub struct AllPairs<E: ContainerExecutor> {
    executor: E,
    settings: ContainerSettings,
}

impl<E: ContainerExecutor> AllPairs<E> {
    pub fn new(executor: E, settings: ContainerSettings) -> Self {
        Self { executor, settings }
    }

    pub fn settings(&self) -> &ContainerSettings {
        &self.settings
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }
}

#[async_trait]
impl<E: ContainerExecutor> PathwayAlgorithm for AllPairs<E> {
    fn name(&self) -> &'static str {
        "allpairs"
    }

    fn required_inputs(&self) -> &'static [InputKind] {
        inputs::REQUIRED_INPUTS
    }

    fn generate_inputs(
        &self,
        data: &dyn Dataset,
        filename_map: &FilenameMap,
    ) -> Result<Option<InputSummary>> {
        inputs::generate_inputs(data, filename_map)
    }

    async fn run(&self, params: &RunParams) -> Result<()> {
        runner::run(&self.executor, &self.settings, params).await?;
        Ok(())
    }

    fn parse_output(
        &self,
        raw_pathway_file: &Path,
        standardized_pathway_file: &Path,
    ) -> Result<usize> {
        output::parse_output(raw_pathway_file, standardized_pathway_file)
    }
}
