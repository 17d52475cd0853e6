use crate::domain::model::{ContainerFramework, FilenameMap, InputKind, InputSummary, RunParams};
use crate::domain::ports::{Dataset, PathwayAlgorithm};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Files of one pipeline run, all under a single directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineLayout {
    pub nodetypes: PathBuf,
    pub network: PathBuf,
    pub raw_pathway: PathBuf,
    pub pathway: PathBuf,
}

impl PipelineLayout {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            nodetypes: dir.join("nodetypes.txt"),
            network: dir.join("network.txt"),
            raw_pathway: dir.join("raw-pathway.txt"),
            pathway: dir.join("pathway.txt"),
        }
    }

    pub fn filename_map(&self) -> FilenameMap {
        let mut map = FilenameMap::new();
        map.insert(InputKind::NodeTypes.as_str().to_string(), self.nodetypes.clone());
        map.insert(InputKind::Network.as_str().to_string(), self.network.clone());
        map
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PhaseTiming {
    pub phase: &'static str,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub algorithm: &'static str,
    pub framework: ContainerFramework,
    pub inputs: InputSummary,
    pub pathway_edges: usize,
    pub layout: PipelineLayout,
    pub phases: Vec<PhaseTiming>,
}

impl PipelineReport {
    pub fn total_duration(&self) -> Duration {
        Duration::from_millis(self.phases.iter().map(|p| p.duration_ms).sum())
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Chains input generation, the container run and output standardization.
pub struct PathwayEngine<A: PathwayAlgorithm> {
    algorithm: A,
    monitor: SystemMonitor,
}

impl<A: PathwayAlgorithm> PathwayEngine<A> {
    pub fn new(algorithm: A) -> Self {
        Self {
            algorithm,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(algorithm: A, enable_monitoring: bool) -> Self {
        Self {
            algorithm,
            monitor: SystemMonitor::new(enable_monitoring),
        }
    }

    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }

    /// Returns `Ok(None)` when the dataset lacks source/target annotations;
    /// no container is launched in that case.
    pub async fn run(
        &self,
        data: &dyn Dataset,
        layout: &PipelineLayout,
        framework: ContainerFramework,
    ) -> Result<Option<PipelineReport>> {
        let name = self.algorithm.name();
        tracing::info!("Starting {} pipeline", name);
        self.monitor.log_stats("Start");

        for path in [&layout.nodetypes, &layout.network, &layout.pathway] {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }

        let mut phases = Vec::with_capacity(3);

        tracing::info!("Generating {} inputs...", name);
        let started = Instant::now();
        let Some(inputs) = self
            .algorithm
            .generate_inputs(data, &layout.filename_map())?
        else {
            tracing::warn!("{} inputs could not be generated, stopping", name);
            return Ok(None);
        };
        phases.push(timing("generate_inputs", started));
        tracing::info!(
            "Wrote {} nodes and {} edges",
            inputs.node_rows,
            inputs.edge_rows
        );
        self.monitor.log_stats("Inputs");

        tracing::info!("Running {} with {}...", name, framework);
        let started = Instant::now();
        let params = RunParams {
            nodetypes: Some(layout.nodetypes.clone()),
            network: Some(layout.network.clone()),
            output_file: Some(layout.raw_pathway.clone()),
            framework,
        };
        self.algorithm.run(&params).await?;
        phases.push(timing("run", started));
        self.monitor.log_stats("Run");

        tracing::info!("Standardizing {} output...", name);
        let started = Instant::now();
        let pathway_edges = self
            .algorithm
            .parse_output(&layout.raw_pathway, &layout.pathway)?;
        phases.push(timing("parse_output", started));
        self.monitor.log_final_stats();

        tracing::info!("Pathway saved to: {}", layout.pathway.display());

        Ok(Some(PipelineReport {
            algorithm: name,
            framework,
            inputs,
            pathway_edges,
            layout: layout.clone(),
            phases,
        }))
    }
}

fn timing(phase: &'static str, started: Instant) -> PhaseTiming {
    PhaseTiming {
        phase,
        duration_ms: started.elapsed().as_millis() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_filename_map() {
        let layout = PipelineLayout::in_dir(Path::new("work"));
        let map = layout.filename_map();

        assert_eq!(map.len(), 2);
        assert_eq!(map["nodetypes"], PathBuf::from("work/nodetypes.txt"));
        assert_eq!(map["network"], PathBuf::from("work/network.txt"));
        assert_eq!(layout.raw_pathway, PathBuf::from("work/raw-pathway.txt"));
    }
}
