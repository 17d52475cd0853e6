use crate::domain::model::VolumeBinding;
use crate::utils::error::{PrmError, Result};
use sha2::{Digest, Sha256};
use std::path::Path;

pub const DEFAULT_HASH_LENGTH: usize = 7;

/// Hex SHA-256 of `filename`, cut to `length` characters.
pub fn hash_filename(filename: &str, length: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(filename.as_bytes());
    let mut digest = format!("{:x}", hasher.finalize());
    if length > 0 && length < digest.len() {
        digest.truncate(length);
    }
    digest
}

/// Computes the bind mount that exposes `path` under `volume_base` in the
/// container, and the path to use for it inside the container.
///
/// Files are bound through their parent directory. The destination is keyed
/// by a hash of the given path so two inputs with the same basename never
/// collide.
pub fn prepare_volume(
    path: &Path,
    volume_base: &str,
    hash_length: usize,
) -> Result<(VolumeBinding, String)> {
    let filename_hash = hash_filename(&path.to_string_lossy(), hash_length);
    let dest = format!("{}/{}", volume_base.trim_end_matches('/'), filename_hash);

    let abs_path = std::path::absolute(path)?;
    let name = abs_path
        .file_name()
        .ok_or_else(|| PrmError::InvalidConfigValueError {
            field: "volume".to_string(),
            value: path.display().to_string(),
            reason: "Path has no file or directory name".to_string(),
        })?
        .to_string_lossy()
        .into_owned();
    let container_path = format!("{}/{}", dest, name);

    let binding = if abs_path.is_dir() {
        VolumeBinding {
            host_path: abs_path,
            container_path: container_path.clone(),
        }
    } else {
        // an absolute path with a file name always has a parent
        let parent = abs_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| abs_path.clone());
        VolumeBinding {
            host_path: parent,
            container_path: dest,
        }
    };

    tracing::debug!(
        "Binding {} -> {} for {}",
        binding.host_path.display(),
        binding.container_path,
        path.display()
    );
    Ok((binding, container_path))
}
