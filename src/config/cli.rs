use crate::config::toml_config::{AllPairsConfig, DatasetConfig};
use crate::domain::model::ContainerFramework;
use crate::utils::error::{PrmError, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "allpairs")]
#[command(about = "Run AllPairs shortest-paths pathway reconstruction in a container")]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[arg(long, global = true, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Write the node-type and network files from a dataset
    GenerateInputs {
        #[command(flatten)]
        dataset: DatasetArgs,

        #[arg(long)]
        nodetypes: PathBuf,

        #[arg(long)]
        network: PathBuf,
    },

    /// Run AllPairs on prepared input files
    Run {
        #[arg(long)]
        nodetypes: Option<PathBuf>,

        #[arg(long)]
        network: Option<PathBuf>,

        #[arg(long)]
        output_file: Option<PathBuf>,

        #[command(flatten)]
        container: ContainerArgs,
    },

    /// Convert a raw AllPairs pathway into the universal pathway format
    ParseOutput {
        #[arg(long)]
        raw_pathway: PathBuf,

        #[arg(long)]
        standardized_pathway: PathBuf,
    },

    /// Generate inputs, run AllPairs and standardize its output
    Pipeline {
        #[command(flatten)]
        dataset: DatasetArgs,

        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Write phase timings and counts as JSON
        #[arg(long)]
        metrics_file: Option<PathBuf>,

        #[command(flatten)]
        container: ContainerArgs,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct DatasetArgs {
    /// File listing source node ids, one per line
    #[arg(long)]
    pub sources: Option<PathBuf>,

    /// File listing target node ids, one per line
    #[arg(long)]
    pub targets: Option<PathBuf>,

    /// Headerless tab-separated edge file: Interactor1, Interactor2, Weight
    #[arg(long)]
    pub interactome: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ContainerArgs {
    #[arg(long, help = "Use singularity instead of docker")]
    pub singularity: bool,

    /// Container framework, overriding the configuration file
    #[arg(long, value_name = "docker|singularity", conflicts_with = "singularity")]
    pub framework: Option<ContainerFramework>,

    #[arg(long)]
    pub image: Option<String>,
}

impl DatasetArgs {
    /// Command line values win over the configuration file.
    pub fn resolve(&self, config: &AllPairsConfig) -> Result<DatasetConfig> {
        let from_file = config.dataset.as_ref();
        let interactome = self
            .interactome
            .clone()
            .or_else(|| from_file.map(|d| d.interactome.clone()))
            .ok_or_else(|| PrmError::MissingConfigError {
                field: "dataset.interactome".to_string(),
            })?;

        Ok(DatasetConfig {
            sources: self
                .sources
                .clone()
                .or_else(|| from_file.and_then(|d| d.sources.clone())),
            targets: self
                .targets
                .clone()
                .or_else(|| from_file.and_then(|d| d.targets.clone())),
            interactome,
        })
    }
}

impl ContainerArgs {
    pub fn apply(&self, config: &mut AllPairsConfig) {
        if let Some(framework) = self.framework {
            config.container.framework = framework;
        } else if self.singularity {
            config.container.framework = ContainerFramework::Singularity;
        }
        if let Some(image) = &self.image {
            config.container.image = image.clone();
        }
    }
}
