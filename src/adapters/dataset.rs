use crate::domain::model::{Edge, NodeFlags};
use crate::domain::ports::Dataset;
use crate::utils::error::{PrmError, Result};
use std::collections::HashMap;
use std::path::Path;

/// In-memory dataset: a node table with source/target flags plus the
/// interactome.
#[derive(Debug, Clone, Default)]
pub struct TableDataset {
    nodes: Option<Vec<NodeFlags>>,
    interactome: Vec<Edge>,
}

impl TableDataset {
    /// `nodes` is `None` when the dataset has no source/target annotations.
    pub fn new(nodes: Option<Vec<NodeFlags>>, interactome: Vec<Edge>) -> Self {
        Self { nodes, interactome }
    }

    /// Loads node lists (one id per line) and a headerless tab-separated
    /// `Interactor1 Interactor2 Weight` edge file.
    pub fn from_files(
        sources: Option<&Path>,
        targets: Option<&Path>,
        interactome: &Path,
    ) -> Result<Self> {
        let nodes = if sources.is_none() && targets.is_none() {
            None
        } else {
            let mut table = NodeTable::default();
            if let Some(path) = sources {
                for id in read_node_list(path)? {
                    table.flag(id, |node| node.sources = true);
                }
            }
            if let Some(path) = targets {
                for id in read_node_list(path)? {
                    table.flag(id, |node| node.targets = true);
                }
            }
            Some(table.nodes)
        };

        let interactome = read_interactome(interactome)?;
        tracing::debug!(
            "Loaded dataset with {} annotated nodes and {} edges",
            nodes.as_ref().map(Vec::len).unwrap_or(0),
            interactome.len()
        );
        Ok(Self::new(nodes, interactome))
    }
}

impl Dataset for TableDataset {
    fn request_sources_targets(&self) -> Result<Option<Vec<NodeFlags>>> {
        let Some(nodes) = &self.nodes else {
            return Ok(None);
        };
        if !nodes.iter().any(|node| node.sources || node.targets) {
            tracing::warn!("No nodes are labeled as sources or targets");
            return Ok(None);
        }
        Ok(Some(nodes.clone()))
    }

    fn get_interactome(&self) -> Result<Vec<Edge>> {
        Ok(self.interactome.clone())
    }
}

#[derive(Default)]
struct NodeTable {
    nodes: Vec<NodeFlags>,
    index: HashMap<String, usize>,
}

impl NodeTable {
    fn flag(&mut self, id: String, set: impl FnOnce(&mut NodeFlags)) {
        let position = match self.index.get(&id).copied() {
            Some(position) => position,
            None => {
                self.nodes.push(NodeFlags::new(id.clone(), false, false));
                self.index.insert(id, self.nodes.len() - 1);
                self.nodes.len() - 1
            }
        };
        set(&mut self.nodes[position]);
    }
}

fn read_node_list(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

fn read_interactome(path: &Path) -> Result<Vec<Edge>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_path(path)?;

    let mut edges = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let malformed = |reason: String| PrmError::MalformedDatasetError {
            path: path.to_path_buf(),
            line,
            reason,
        };

        if record.len() < 3 {
            return Err(malformed(format!(
                "expected Interactor1, Interactor2 and Weight, found {} columns",
                record.len()
            )));
        }
        let weight = record[2].trim();
        weight
            .parse::<f64>()
            .map_err(|e| malformed(format!("invalid weight '{}': {}", weight, e)))?;
        edges.push(Edge::new(&record[0], &record[1], weight));
    }
    Ok(edges)
}
