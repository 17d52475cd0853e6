use allpairs_prm::core::runner::OUTPUT_FILENAME;
use allpairs_prm::domain::model::{ContainerInvocation, Edge, NodeFlags};
use allpairs_prm::{
    AllPairs, ContainerExecutor, ContainerFramework, ContainerSettings, PathwayAlgorithm,
    PathwayEngine, PipelineLayout, PrmError, RunParams, TableDataset,
};
use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Stands in for the AllPairs image: records each invocation and writes
/// `pathway` to the host side of the `--output` argument.
#[derive(Clone, Default)]
struct FakeAllPairsImage {
    invocations: Arc<Mutex<Vec<ContainerInvocation>>>,
    pathway: Option<String>,
}

impl FakeAllPairsImage {
    fn producing(pathway: &str) -> Self {
        Self {
            invocations: Arc::default(),
            pathway: Some(pathway.to_string()),
        }
    }

    fn silent() -> Self {
        Self::default()
    }

    fn invocations(&self) -> Vec<ContainerInvocation> {
        self.invocations.lock().unwrap().clone()
    }
}

fn host_path(invocation: &ContainerInvocation, container_path: &str) -> Option<PathBuf> {
    invocation.volumes.iter().find_map(|volume| {
        container_path
            .strip_prefix(&format!("{}/", volume.container_path))
            .map(|rest| volume.host_path.join(rest))
    })
}

#[async_trait]
impl ContainerExecutor for FakeAllPairsImage {
    async fn run_container(&self, invocation: &ContainerInvocation) -> allpairs_prm::Result<String> {
        self.invocations.lock().unwrap().push(invocation.clone());

        if let Some(pathway) = &self.pathway {
            let position = invocation
                .command
                .iter()
                .position(|arg| arg == "--output")
                .expect("--output argument");
            let target = host_path(invocation, &invocation.command[position + 1])
                .expect("output directory is bound");
            std::fs::write(target, pathway)?;
        }
        Ok("Computed shortest paths".to_string())
    }
}

/// Fails like a container exiting non-zero.
struct CrashingImage;

#[async_trait]
impl ContainerExecutor for CrashingImage {
    async fn run_container(&self, _invocation: &ContainerInvocation) -> allpairs_prm::Result<String> {
        Err(PrmError::ContainerFailedError {
            framework: "docker".to_string(),
            status: "exit status: 1".to_string(),
            stderr: "Traceback".to_string(),
        })
    }
}

fn write_inputs(dir: &Path) -> Result<(PathBuf, PathBuf)> {
    let nodetypes = dir.join("nodetypes.txt");
    let network = dir.join("network.txt");
    std::fs::write(&nodetypes, "#Node\tNode type\nA\tsource\nC\ttarget\n")?;
    std::fs::write(&network, "#Interactor1\tInteractor2\tWeight\nA\tB\t1.0\nB\tC\t1.0\n")?;
    Ok((nodetypes, network))
}

#[tokio::test]
async fn test_run_moves_output_to_requested_path() -> Result<()> {
    let dir = TempDir::new()?;
    let (nodetypes, network) = write_inputs(dir.path())?;
    let output_file = dir.path().join("results").join("nested").join("raw-pathway.txt");

    let image = FakeAllPairsImage::producing("A\tB\nB\tC\n");
    let allpairs = AllPairs::new(image.clone(), ContainerSettings::default());
    let params = RunParams {
        nodetypes: Some(nodetypes.clone()),
        network: Some(network.clone()),
        output_file: Some(output_file.clone()),
        framework: ContainerFramework::Docker,
    };

    allpairs.run(&params).await?;

    assert_eq!(std::fs::read_to_string(&output_file)?, "A\tB\nB\tC\n");
    assert!(!output_file.with_file_name(OUTPUT_FILENAME).exists());

    let invocations = image.invocations();
    assert_eq!(invocations.len(), 1);
    let invocation = &invocations[0];
    assert_eq!(invocation.framework, ContainerFramework::Docker);
    assert_eq!(invocation.image, "annaritz/allpairs");
    assert_eq!(invocation.work_dir, "/allpairs");
    assert_eq!(
        &invocation.command[..2],
        &["python".to_string(), "all-pairs-shortest-paths.py".to_string()]
    );
    assert_eq!(
        host_path(invocation, &invocation.command[3]),
        Some(network)
    );
    assert_eq!(
        host_path(invocation, &invocation.command[5]),
        Some(nodetypes)
    );
    assert!(invocation.command[7].ends_with("/out.txt"));
    Ok(())
}

#[tokio::test]
async fn test_run_uses_selected_framework() -> Result<()> {
    let dir = TempDir::new()?;
    let (nodetypes, network) = write_inputs(dir.path())?;

    let image = FakeAllPairsImage::producing("A\tC\n");
    let allpairs = AllPairs::new(image.clone(), ContainerSettings::default());
    let params = RunParams {
        nodetypes: Some(nodetypes),
        network: Some(network),
        output_file: Some(dir.path().join("out").join("pathway.txt")),
        framework: ContainerFramework::Singularity,
    };

    allpairs.run(&params).await?;

    assert_eq!(
        image.invocations()[0].framework,
        ContainerFramework::Singularity
    );
    Ok(())
}

#[tokio::test]
async fn test_run_without_nodetypes_launches_nothing() -> Result<()> {
    let dir = TempDir::new()?;
    let (_, network) = write_inputs(dir.path())?;
    let output_file = dir.path().join("never").join("pathway.txt");

    let image = FakeAllPairsImage::producing("A\tB\n");
    let allpairs = AllPairs::new(image.clone(), ContainerSettings::default());
    let params = RunParams {
        nodetypes: None,
        network: Some(network),
        output_file: Some(output_file.clone()),
        framework: ContainerFramework::Docker,
    };

    let err = allpairs.run(&params).await.unwrap_err();

    assert!(matches!(err, PrmError::MissingArgumentsError { .. }));
    assert!(image.invocations().is_empty());
    assert!(!output_file.parent().unwrap().exists());
    Ok(())
}

#[tokio::test]
async fn test_missing_tool_output_is_reported() -> Result<()> {
    let dir = TempDir::new()?;
    let (nodetypes, network) = write_inputs(dir.path())?;

    let allpairs = AllPairs::new(FakeAllPairsImage::silent(), ContainerSettings::default());
    let params = RunParams {
        nodetypes: Some(nodetypes),
        network: Some(network),
        output_file: Some(dir.path().join("out").join("pathway.txt")),
        framework: ContainerFramework::Docker,
    };

    let err = allpairs.run(&params).await.unwrap_err();

    match err {
        PrmError::OutputNotFoundError { path } => assert!(path.ends_with("out/out.txt")),
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_container_failure_propagates() -> Result<()> {
    let dir = TempDir::new()?;
    let (nodetypes, network) = write_inputs(dir.path())?;
    let output_file = dir.path().join("out").join("pathway.txt");

    let allpairs = AllPairs::new(CrashingImage, ContainerSettings::default());
    let params = RunParams {
        nodetypes: Some(nodetypes),
        network: Some(network),
        output_file: Some(output_file.clone()),
        framework: ContainerFramework::Docker,
    };

    let err = allpairs.run(&params).await.unwrap_err();

    assert!(matches!(err, PrmError::ContainerFailedError { .. }));
    assert!(!output_file.exists());
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_pipeline() -> Result<()> {
    let dir = TempDir::new()?;
    let dataset = TableDataset::new(
        Some(vec![
            NodeFlags::new("A", true, false),
            NodeFlags::new("C", false, true),
        ]),
        vec![Edge::new("A", "B", "0.5"), Edge::new("B", "C", "0.5")],
    );
    let layout = PipelineLayout::in_dir(&dir.path().join("run"));

    let image = FakeAllPairsImage::producing("A\tB\nB\tC\n");
    let engine = PathwayEngine::new(AllPairs::new(image.clone(), ContainerSettings::default()));

    let report = engine
        .run(&dataset, &layout, ContainerFramework::Docker)
        .await?
        .expect("pipeline should complete");

    assert_eq!(report.algorithm, "allpairs");
    assert_eq!(report.inputs.node_rows, 2);
    assert_eq!(report.inputs.edge_rows, 2);
    assert_eq!(report.pathway_edges, 2);
    assert_eq!(report.phases.len(), 3);
    assert_eq!(
        std::fs::read_to_string(&layout.pathway)?,
        "A\tB\t1\nB\tC\t1\n"
    );
    assert_eq!(image.invocations().len(), 1);

    let metrics = dir.path().join("metrics").join("run.json");
    report.write_json(&metrics)?;
    let json = std::fs::read_to_string(&metrics)?;
    assert!(json.contains("\"pathway_edges\": 2"));
    assert!(json.contains("\"framework\": \"docker\""));
    Ok(())
}

#[tokio::test]
async fn test_pipeline_stops_without_annotations() -> Result<()> {
    let dir = TempDir::new()?;
    let dataset = TableDataset::new(None, vec![Edge::new("A", "B", "0.5")]);
    let layout = PipelineLayout::in_dir(dir.path());

    let image = FakeAllPairsImage::producing("A\tB\n");
    let engine = PathwayEngine::new(AllPairs::new(image.clone(), ContainerSettings::default()));

    let report = engine
        .run(&dataset, &layout, ContainerFramework::Docker)
        .await?;

    assert!(report.is_none());
    assert!(image.invocations().is_empty());
    assert!(!layout.pathway.exists());
    Ok(())
}
