use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrmError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{input} filename is missing")]
    MissingInputError { input: String },

    #[error("Required {algorithm} arguments are missing: {arguments}")]
    MissingArgumentsError { algorithm: String, arguments: String },

    #[error("Malformed dataset file {path}: line {line}: {reason}")]
    MalformedDatasetError {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    #[error("Malformed pathway file {path}: line {line}: {reason}")]
    MalformedPathwayError {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    #[error("Failed to launch {framework}: {source}")]
    ContainerLaunchError {
        framework: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{framework} container exited with {status}: {stderr}")]
    ContainerFailedError {
        framework: String,
        status: String,
        stderr: String,
    },

    #[error("Tool produced no output: expected {path}")]
    OutputNotFoundError { path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Container,
    Output,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl PrmError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PrmError::ConfigError { .. }
            | PrmError::MissingConfigError { .. }
            | PrmError::InvalidConfigValueError { .. }
            | PrmError::MissingInputError { .. }
            | PrmError::MissingArgumentsError { .. } => ErrorCategory::Configuration,
            PrmError::CsvError(_) | PrmError::MalformedDatasetError { .. } => ErrorCategory::Input,
            PrmError::ContainerLaunchError { .. } | PrmError::ContainerFailedError { .. } => {
                ErrorCategory::Container
            }
            PrmError::OutputNotFoundError { .. }
            | PrmError::MalformedPathwayError { .. }
            | PrmError::SerializationError(_) => ErrorCategory::Output,
            PrmError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Output => ErrorSeverity::High,
            ErrorCategory::Container | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PrmError::MissingInputError { .. } => {
                "Provide both the nodetypes and network destination paths"
            }
            PrmError::MissingArgumentsError { .. } => {
                "Pass --nodetypes, --network and --output-file"
            }
            PrmError::ConfigError { .. }
            | PrmError::MissingConfigError { .. }
            | PrmError::InvalidConfigValueError { .. } => {
                "Check the configuration file and command line flags"
            }
            PrmError::CsvError(_) | PrmError::MalformedDatasetError { .. } => {
                "Check that input files are tab-separated with the expected columns"
            }
            PrmError::MalformedPathwayError { .. } => {
                "The raw pathway needs at least two tab-separated columns per row"
            }
            PrmError::ContainerLaunchError { .. } => {
                "Make sure docker or singularity is installed and on PATH"
            }
            PrmError::ContainerFailedError { .. } => {
                "Inspect the container output above and verify the input files"
            }
            PrmError::OutputNotFoundError { .. } => {
                "The tool did not write out.txt; check its log output and the network/nodes inputs"
            }
            PrmError::IoError(_) | PrmError::SerializationError(_) => {
                "Check file permissions and available disk space"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Could not read input: {}", self),
            ErrorCategory::Container => format!("Container run failed: {}", self),
            ErrorCategory::Output => format!("Could not produce pathway: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, PrmError>;
