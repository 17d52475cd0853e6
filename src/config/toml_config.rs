use crate::core::volume::DEFAULT_HASH_LENGTH;
use crate::domain::model::ContainerFramework;
use crate::utils::error::{PrmError, Result};
use crate::utils::validation::{
    validate_container_path, validate_non_empty_string, validate_path, validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_IMAGE: &str = "annaritz/allpairs";
pub const DEFAULT_WORK_DIR: &str = "/allpairs";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllPairsConfig {
    #[serde(default)]
    pub container: ContainerSettings,
    pub dataset: Option<DatasetConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSettings {
    #[serde(default)]
    pub framework: ContainerFramework,
    #[serde(default = "default_image")]
    pub image: String,
    #[serde(default = "default_work_dir")]
    pub work_dir: String,
    #[serde(default = "default_hash_length")]
    pub hash_length: usize,
    #[serde(default = "default_docker_binary")]
    pub docker_binary: String,
    #[serde(default = "default_singularity_binary")]
    pub singularity_binary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub sources: Option<PathBuf>,
    pub targets: Option<PathBuf>,
    pub interactome: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,
    pub metrics_file: Option<PathBuf>,
}

fn default_image() -> String {
    DEFAULT_IMAGE.to_string()
}

fn default_work_dir() -> String {
    DEFAULT_WORK_DIR.to_string()
}

fn default_hash_length() -> usize {
    DEFAULT_HASH_LENGTH
}

fn default_docker_binary() -> String {
    "docker".to_string()
}

fn default_singularity_binary() -> String {
    "singularity".to_string()
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("output")
}

impl Default for ContainerSettings {
    fn default() -> Self {
        Self {
            framework: ContainerFramework::default(),
            image: default_image(),
            work_dir: default_work_dir(),
            hash_length: default_hash_length(),
            docker_binary: default_docker_binary(),
            singularity_binary: default_singularity_binary(),
        }
    }
}

impl AllPairsConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PrmError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the value of the environment variable. Unset
    /// variables are left untouched.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| PrmError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn output_directory(&self) -> PathBuf {
        self.output
            .as_ref()
            .map(|o| o.directory.clone())
            .unwrap_or_else(default_output_directory)
    }

    pub fn metrics_file(&self) -> Option<&Path> {
        self.output.as_ref().and_then(|o| o.metrics_file.as_deref())
    }
}

impl Validate for ContainerSettings {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("container.image", &self.image)?;
        validate_container_path("container.work_dir", &self.work_dir)?;
        validate_range("container.hash_length", self.hash_length, 1, 64)?;
        validate_non_empty_string("container.docker_binary", &self.docker_binary)?;
        validate_non_empty_string("container.singularity_binary", &self.singularity_binary)?;
        Ok(())
    }
}

impl Validate for AllPairsConfig {
    fn validate(&self) -> Result<()> {
        self.container.validate()?;

        if let Some(dataset) = &self.dataset {
            validate_path("dataset.interactome", &dataset.interactome)?;
            if let Some(sources) = &dataset.sources {
                validate_path("dataset.sources", sources)?;
            }
            if let Some(targets) = &dataset.targets {
                validate_path("dataset.targets", targets)?;
            }
        }

        if let Some(output) = &self.output {
            validate_path("output.directory", &output.directory)?;
            if let Some(metrics) = &output.metrics_file {
                validate_path("output.metrics_file", metrics)?;
            }
        }

        Ok(())
    }
}
