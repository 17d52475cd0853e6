use crate::config::toml_config::ContainerSettings;
use crate::domain::model::{ContainerFramework, ContainerInvocation};
use crate::domain::ports::ContainerExecutor;
use crate::utils::error::{PrmError, Result};
use async_trait::async_trait;
use tokio::process::Command;

/// Runs containers through the `docker` or `singularity` command line tools.
#[derive(Debug, Clone)]
pub struct CliContainerExecutor {
    docker_binary: String,
    singularity_binary: String,
}

impl CliContainerExecutor {
    pub fn new(docker_binary: impl Into<String>, singularity_binary: impl Into<String>) -> Self {
        Self {
            docker_binary: docker_binary.into(),
            singularity_binary: singularity_binary.into(),
        }
    }

    pub fn from_settings(settings: &ContainerSettings) -> Self {
        Self::new(&settings.docker_binary, &settings.singularity_binary)
    }

    pub fn binary(&self, framework: ContainerFramework) -> &str {
        match framework {
            ContainerFramework::Docker => &self.docker_binary,
            ContainerFramework::Singularity => &self.singularity_binary,
        }
    }
}

impl Default for CliContainerExecutor {
    fn default() -> Self {
        Self::new("docker", "singularity")
    }
}

/// Arguments passed to the framework binary for `invocation`.
pub fn container_args(invocation: &ContainerInvocation) -> Vec<String> {
    let mut args = Vec::new();
    match invocation.framework {
        ContainerFramework::Docker => {
            args.push("run".to_string());
            args.push("--rm".to_string());
            for volume in &invocation.volumes {
                args.push("-v".to_string());
                args.push(volume.to_bind_arg());
            }
            args.push("-w".to_string());
            args.push(invocation.work_dir.clone());
            args.push(invocation.image.clone());
        }
        ContainerFramework::Singularity => {
            args.push("exec".to_string());
            args.push("--cleanenv".to_string());
            args.push("--containall".to_string());
            args.push("--pwd".to_string());
            args.push(invocation.work_dir.clone());
            if !invocation.volumes.is_empty() {
                let binds: Vec<String> =
                    invocation.volumes.iter().map(|v| v.to_bind_arg()).collect();
                args.push("--bind".to_string());
                args.push(binds.join(","));
            }
            args.push(format!("docker://{}", invocation.image));
        }
    }
    args.extend(invocation.command.iter().cloned());
    args
}

#[async_trait]
impl ContainerExecutor for CliContainerExecutor {
    async fn run_container(&self, invocation: &ContainerInvocation) -> Result<String> {
        let framework = invocation.framework;
        let binary = self.binary(framework);
        let args = container_args(invocation);
        tracing::debug!("Executing: {} {}", binary, args.join(" "));

        let output = Command::new(binary)
            .args(&args)
            .output()
            .await
            .map_err(|source| PrmError::ContainerLaunchError {
                framework: framework.to_string(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            return Err(PrmError::ContainerFailedError {
                framework: framework.to_string(),
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        let mut captured = stdout.into_owned();
        if !stderr.trim().is_empty() {
            captured.push_str(&stderr);
        }
        Ok(captured)
    }
}
