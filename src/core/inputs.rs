use crate::domain::model::{Edge, FilenameMap, InputKind, InputSummary, NodeFlags, NodeType};
use crate::domain::ports::Dataset;
use crate::utils::error::{PrmError, Result};
use serde::Serialize;
use std::path::Path;

pub const REQUIRED_INPUTS: &[InputKind] = &[InputKind::NodeTypes, InputKind::Network];

const NODE_TYPE_HEADER: [&str; 2] = ["#Node", "Node type"];
const NETWORK_HEADER: [&str; 3] = ["#Interactor1", "Interactor2", "Weight"];

#[derive(Serialize)]
struct NodeTypeRow<'a> {
    node: &'a str,
    node_type: Option<NodeType>,
}

/// Looks up the destination of a required input.
pub fn required_input(filename_map: &FilenameMap, kind: InputKind) -> Result<&Path> {
    filename_map
        .get(kind.as_str())
        .map(|path| path.as_path())
        .ok_or_else(|| PrmError::MissingInputError {
            input: kind.as_str().to_string(),
        })
}

/// Writes the node-type and network files for AllPairs.
///
/// Returns `Ok(None)` without writing anything when the dataset cannot
/// provide source/target annotations.
pub fn generate_inputs<D: Dataset + ?Sized>(
    data: &D,
    filename_map: &FilenameMap,
) -> Result<Option<InputSummary>> {
    let nodetypes_path = required_input(filename_map, InputKind::NodeTypes)?;
    let network_path = required_input(filename_map, InputKind::Network)?;

    let Some(sources_targets) = data.request_sources_targets()? else {
        tracing::warn!("Dataset has no source/target annotations, skipping AllPairs inputs");
        return Ok(None);
    };

    let mut both_source_and_target = Vec::new();
    for node in sources_targets.iter().filter(|node| node.is_both()) {
        tracing::warn!(
            "{} has been labeled as both a source and a target.",
            node.node_id
        );
        both_source_and_target.push(node.node_id.clone());
    }

    let node_rows = write_node_types(nodetypes_path, &sources_targets)?;
    tracing::debug!("Wrote {} node rows to {}", node_rows, nodetypes_path.display());

    // The whole interactome is materialized here; large networks cost memory.
    let interactome = data.get_interactome()?;
    let edge_rows = write_network(network_path, &interactome)?;
    tracing::debug!("Wrote {} edges to {}", edge_rows, network_path.display());

    Ok(Some(InputSummary {
        node_rows,
        edge_rows,
        both_source_and_target,
    }))
}

fn tsv_writer(path: &Path) -> Result<csv::Writer<std::fs::File>> {
    Ok(csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_path(path)?)
}

pub fn write_node_types(path: &Path, nodes: &[NodeFlags]) -> Result<usize> {
    let mut writer = tsv_writer(path)?;
    writer.write_record(NODE_TYPE_HEADER)?;
    for node in nodes {
        writer.serialize(NodeTypeRow {
            node: &node.node_id,
            node_type: NodeType::from_flags(node),
        })?;
    }
    writer.flush()?;
    Ok(nodes.len())
}

pub fn write_network(path: &Path, edges: &[Edge]) -> Result<usize> {
    let mut writer = tsv_writer(path)?;
    writer.write_record(NETWORK_HEADER)?;
    for edge in edges {
        writer.serialize(edge)?;
    }
    writer.flush()?;
    Ok(edges.len())
}
