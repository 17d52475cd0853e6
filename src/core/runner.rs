use crate::config::toml_config::ContainerSettings;
use crate::core::volume::prepare_volume;
use crate::domain::model::{ContainerInvocation, RunParams};
use crate::domain::ports::ContainerExecutor;
use crate::utils::error::{PrmError, Result};
use crate::utils::validation::present_path;
use std::path::{Path, PathBuf};

/// File name AllPairs writes inside the mapped output directory.
pub const OUTPUT_FILENAME: &str = "out.txt";

const SCRIPT: &str = "all-pairs-shortest-paths.py";

/// Host paths of a run after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    pub nodetypes: PathBuf,
    pub network: PathBuf,
    pub output_file: PathBuf,
}

impl RunPaths {
    /// Fails with every missing argument named when any path is unset or empty.
    pub fn from_params(params: &RunParams) -> Result<Self> {
        let nodetypes = present_path(&params.nodetypes);
        let network = present_path(&params.network);
        let output_file = present_path(&params.output_file);

        match (nodetypes, network, output_file) {
            (Some(nodetypes), Some(network), Some(output_file)) => Ok(Self {
                nodetypes: nodetypes.to_path_buf(),
                network: network.to_path_buf(),
                output_file: output_file.to_path_buf(),
            }),
            _ => {
                let missing: Vec<&str> = [
                    ("nodetypes", nodetypes.is_none()),
                    ("network", network.is_none()),
                    ("output_file", output_file.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                Err(PrmError::MissingArgumentsError {
                    algorithm: "AllPairs".to_string(),
                    arguments: missing.join(", "),
                })
            }
        }
    }

    /// Directory AllPairs writes into. Created when missing.
    pub fn output_dir(&self) -> PathBuf {
        match self.output_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

/// Builds the container invocation for a validated run. Creates the output
/// directory as a side effect since AllPairs requires it to exist.
pub fn build_invocation(
    paths: &RunPaths,
    params: &RunParams,
    settings: &ContainerSettings,
) -> Result<ContainerInvocation> {
    let work_dir = settings.work_dir.as_str();
    let mut volumes = Vec::new();

    let (binding, node_file) = prepare_volume(&paths.nodetypes, work_dir, settings.hash_length)?;
    volumes.push(binding);

    let (binding, network_file) = prepare_volume(&paths.network, work_dir, settings.hash_length)?;
    volumes.push(binding);

    // AllPairs has no output directory argument, only --output for the file.
    let out_dir = paths.output_dir();
    std::fs::create_dir_all(&out_dir)?;
    let (binding, mapped_out_dir) = prepare_volume(&out_dir, work_dir, settings.hash_length)?;
    volumes.push(binding);
    let mapped_out_file = format!("{}/{}", mapped_out_dir, OUTPUT_FILENAME);

    let command = vec![
        "python".to_string(),
        SCRIPT.to_string(),
        "--network".to_string(),
        network_file,
        "--nodes".to_string(),
        node_file,
        "--output".to_string(),
        mapped_out_file,
    ];

    Ok(ContainerInvocation {
        framework: params.framework,
        image: settings.image.clone(),
        command,
        volumes,
        work_dir: work_dir.to_string(),
    })
}

/// Moves the tool's fixed-name output to the requested location.
pub fn relocate_output(out_dir: &Path, output_file: &Path) -> Result<()> {
    let produced = out_dir.join(OUTPUT_FILENAME);
    if !produced.is_file() {
        return Err(PrmError::OutputNotFoundError { path: produced });
    }
    std::fs::rename(&produced, output_file)?;
    tracing::debug!(
        "Moved {} to {}",
        produced.display(),
        output_file.display()
    );
    Ok(())
}

/// Runs AllPairs in a container and leaves its pathway at `output_file`.
pub async fn run<E: ContainerExecutor + ?Sized>(
    executor: &E,
    settings: &ContainerSettings,
    params: &RunParams,
) -> Result<PathBuf> {
    let paths = RunPaths::from_params(params)?;
    let invocation = build_invocation(&paths, params, settings)?;

    tracing::info!(
        "Running AllPairs with arguments: {}",
        invocation.command.join(" ")
    );

    let out = executor.run_container(&invocation).await?;
    if !out.trim().is_empty() {
        tracing::info!("{}", out.trim_end());
    }

    relocate_output(&paths.output_dir(), &paths.output_file)?;
    Ok(paths.output_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ContainerFramework;
    use tempfile::TempDir;

    fn params(dir: &Path) -> RunParams {
        RunParams {
            nodetypes: Some(dir.join("nodetypes.txt")),
            network: Some(dir.join("network.txt")),
            output_file: Some(dir.join("out").join("pathway.txt")),
            framework: ContainerFramework::Docker,
        }
    }

    #[test]
    fn test_missing_arguments_are_listed() {
        let params = RunParams {
            nodetypes: None,
            network: Some(PathBuf::from("network.txt")),
            output_file: Some(PathBuf::new()),
            framework: ContainerFramework::Docker,
        };

        let err = RunPaths::from_params(&params).unwrap_err();
        match err {
            PrmError::MissingArgumentsError { algorithm, arguments } => {
                assert_eq!(algorithm, "AllPairs");
                assert_eq!(arguments, "nodetypes, output_file");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_output_dir_defaults_to_current_dir() {
        let paths = RunPaths {
            nodetypes: PathBuf::from("n.txt"),
            network: PathBuf::from("e.txt"),
            output_file: PathBuf::from("pathway.txt"),
        };
        assert_eq!(paths.output_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_build_invocation_command_and_volumes() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("nodetypes.txt"), "").unwrap();
        std::fs::write(dir.path().join("network.txt"), "").unwrap();
        let params = params(dir.path());
        let paths = RunPaths::from_params(&params).unwrap();

        let invocation =
            build_invocation(&paths, &params, &ContainerSettings::default()).unwrap();

        assert!(dir.path().join("out").is_dir());
        assert_eq!(invocation.image, "annaritz/allpairs");
        assert_eq!(invocation.work_dir, "/allpairs");
        assert_eq!(invocation.volumes.len(), 3);
        assert_eq!(invocation.command[0], "python");
        assert_eq!(invocation.command[1], "all-pairs-shortest-paths.py");
        assert_eq!(invocation.command[2], "--network");
        assert!(invocation.command[3].ends_with("/network.txt"));
        assert_eq!(invocation.command[4], "--nodes");
        assert!(invocation.command[5].ends_with("/nodetypes.txt"));
        assert_eq!(invocation.command[6], "--output");
        assert_eq!(
            invocation.command[7],
            format!("{}/out.txt", invocation.volumes[2].container_path)
        );
        assert!(invocation.command[7].starts_with("/allpairs/"));
    }

    #[test]
    fn test_relocate_output_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = relocate_output(dir.path(), &dir.path().join("pathway.txt")).unwrap_err();
        assert!(matches!(err, PrmError::OutputNotFoundError { .. }));
    }

    #[test]
    fn test_relocate_output_renames() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(OUTPUT_FILENAME), "A\tB\n").unwrap();
        let target = dir.path().join("pathway.txt");

        relocate_output(dir.path(), &target).unwrap();

        assert!(!dir.path().join(OUTPUT_FILENAME).exists());
        assert_eq!(std::fs::read_to_string(target).unwrap(), "A\tB\n");
    }
}
