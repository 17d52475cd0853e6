use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// A node as returned by a source/target query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeFlags {
    pub node_id: String,
    pub sources: bool,
    pub targets: bool,
}

impl NodeFlags {
    pub fn new(node_id: impl Into<String>, sources: bool, targets: bool) -> Self {
        Self {
            node_id: node_id.into(),
            sources,
            targets,
        }
    }

    pub fn is_both(&self) -> bool {
        self.sources && self.targets
    }
}

/// One weighted interactome edge. The weight keeps the text it was read
/// with so the network file is written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub interactor1: String,
    pub interactor2: String,
    pub weight: String,
}

impl Edge {
    pub fn new(
        interactor1: impl Into<String>,
        interactor2: impl Into<String>,
        weight: impl Into<String>,
    ) -> Self {
        Self {
            interactor1: interactor1.into(),
            interactor2: interactor2.into(),
            weight: weight.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Source,
    Target,
}

impl NodeType {
    /// Target is assigned after source, so a node carrying both flags ends up a target.
    pub fn from_flags(flags: &NodeFlags) -> Option<Self> {
        let mut node_type = None;
        if flags.sources {
            node_type = Some(NodeType::Source);
        }
        if flags.targets {
            node_type = Some(NodeType::Target);
        }
        node_type
    }
}

/// Logical input files an algorithm asks the caller for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InputKind {
    NodeTypes,
    Network,
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::NodeTypes => "nodetypes",
            InputKind::Network => "network",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps logical input names (`nodetypes`, `network`) to destination files.
pub type FilenameMap = HashMap<String, PathBuf>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerFramework {
    #[default]
    Docker,
    Singularity,
}

impl ContainerFramework {
    pub fn from_singularity_flag(singularity: bool) -> Self {
        if singularity {
            ContainerFramework::Singularity
        } else {
            ContainerFramework::Docker
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerFramework::Docker => "docker",
            ContainerFramework::Singularity => "singularity",
        }
    }
}

impl fmt::Display for ContainerFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContainerFramework {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "docker" => Ok(ContainerFramework::Docker),
            "singularity" => Ok(ContainerFramework::Singularity),
            other => Err(format!(
                "unknown container framework '{}', expected docker or singularity",
                other
            )),
        }
    }
}

/// A host directory made visible inside the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeBinding {
    pub host_path: PathBuf,
    pub container_path: String,
}

impl VolumeBinding {
    pub fn to_bind_arg(&self) -> String {
        format!("{}:{}", self.host_path.display(), self.container_path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerInvocation {
    pub framework: ContainerFramework,
    pub image: String,
    pub command: Vec<String>,
    pub volumes: Vec<VolumeBinding>,
    pub work_dir: String,
}

/// Arguments of a single container run. Paths stay optional so that
/// missing ones are reported together before anything is launched.
#[derive(Debug, Clone, Default)]
pub struct RunParams {
    pub nodetypes: Option<PathBuf>,
    pub network: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub framework: ContainerFramework,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InputSummary {
    pub node_rows: usize,
    pub edge_rows: usize,
    pub both_source_and_target: Vec<String>,
}
