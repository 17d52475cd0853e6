use crate::utils::error::{PrmError, Result};
use std::path::{Path, PathBuf};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let as_str = path.to_string_lossy();
    if as_str.is_empty() {
        return Err(PrmError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: as_str.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if as_str.contains('\0') {
        return Err(PrmError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: as_str.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_container_path(field_name: &str, path: &str) -> Result<()> {
    validate_non_empty_string(field_name, path)?;
    if !path.starts_with('/') {
        return Err(PrmError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Container paths must be absolute".to_string(),
        });
    }
    Ok(())
}

/// Returns the path when it is set and non-empty.
pub fn present_path(value: &Option<PathBuf>) -> Option<&Path> {
    value
        .as_deref()
        .filter(|path| !path.as_os_str().is_empty())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PrmError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(PrmError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("network", Path::new("data/network.txt")).is_ok());
        assert!(validate_path("network", Path::new("")).is_err());
    }

    #[test]
    fn test_validate_container_path() {
        assert!(validate_container_path("container.work_dir", "/allpairs").is_ok());
        assert!(validate_container_path("container.work_dir", "allpairs").is_err());
        assert!(validate_container_path("container.work_dir", " ").is_err());
    }

    #[test]
    fn test_present_path_treats_empty_as_missing() {
        assert!(present_path(&None).is_none());
        assert!(present_path(&Some(PathBuf::new())).is_none());
        assert_eq!(
            present_path(&Some(PathBuf::from("a.txt"))),
            Some(Path::new("a.txt"))
        );
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("container.hash_length", 7, 1, 64).is_ok());
        assert!(validate_range("container.hash_length", 0, 1, 64).is_err());
        assert!(validate_range("container.hash_length", 65, 1, 64).is_err());
    }
}
