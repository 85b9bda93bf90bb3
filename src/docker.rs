use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum DockerCliError {
    #[error("failed to run docker {command}: {source}")]
    Spawn {
        command: &'static str,
        source: std::io::Error,
    },
    #[error("docker {command} exited with {status}: {stderr}")]
    Failed {
        command: &'static str,
        status: ExitStatus,
        stderr: String,
    },
    #[error("docker {command} did not finish within {timeout:?}")]
    TimedOut {
        command: &'static str,
        timeout: Duration,
    },
}

/// Runs `docker` subcommands with fixed argument shapes. One invocation per
/// HTTP response; no batching, no retries.
#[derive(Debug, Clone)]
pub struct DockerCli {
    timeout: Duration,
}

impl DockerCli {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Names of all containers, one per line of `docker ps` output, in
    /// whatever order the runtime returns them.
    pub async fn list_containers(&self) -> Result<Vec<String>, DockerCliError> {
        let out = self.run("ps", list_args()).await?;
        Ok(String::from_utf8_lossy(&out)
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    pub async fn logs(
        &self,
        name: &str,
        tail: u64,
        timestamps: bool,
    ) -> Result<Vec<u8>, DockerCliError> {
        self.run("logs", logs_args(name, tail, timestamps)).await
    }

    /// Raw `docker inspect` output. The caller must validate the bytes parse
    /// as JSON before trusting them.
    pub async fn inspect(&self, name: &str) -> Result<Vec<u8>, DockerCliError> {
        self.run("inspect", inspect_args(name)).await
    }

    /// Health status string, trimmed of surrounding whitespace.
    pub async fn health(&self, name: &str) -> Result<String, DockerCliError> {
        let out = self.run("inspect", health_args(name)).await?;
        Ok(String::from_utf8_lossy(&out).trim().to_string())
    }

    async fn run(
        &self,
        command: &'static str,
        args: Vec<String>,
    ) -> Result<Vec<u8>, DockerCliError> {
        let child = Command::new("docker")
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, child)
            .await
            .map_err(|_| DockerCliError::TimedOut {
                command,
                timeout: self.timeout,
            })?
            .map_err(|source| DockerCliError::Spawn { command, source })?;

        if output.status.success() {
            // docker logs writes the container's stderr stream to its own
            // stderr; callers get both streams combined.
            let mut bytes = output.stdout;
            bytes.extend_from_slice(&output.stderr);
            Ok(bytes)
        } else {
            Err(DockerCliError::Failed {
                command,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

fn list_args() -> Vec<String> {
    vec![
        "ps".to_string(),
        "--all".to_string(),
        "--format".to_string(),
        "{{.Names}}".to_string(),
    ]
}

fn logs_args(name: &str, tail: u64, timestamps: bool) -> Vec<String> {
    let mut args = vec!["logs".to_string(), "--tail".to_string(), tail.to_string()];
    if timestamps {
        args.push("-t".to_string());
    }
    args.push(name.to_string());
    args
}

fn inspect_args(name: &str) -> Vec<String> {
    vec!["inspect".to_string(), name.to_string()]
}

fn health_args(name: &str) -> Vec<String> {
    vec![
        "inspect".to_string(),
        "--format".to_string(),
        "{{.State.Health.Status}}".to_string(),
        name.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_args_request_all_names() {
        assert_eq!(list_args(), ["ps", "--all", "--format", "{{.Names}}"]);
    }

    #[test]
    fn logs_args_carry_tail_and_name() {
        assert_eq!(logs_args("web", 5, false), ["logs", "--tail", "5", "web"]);
    }

    #[test]
    fn logs_args_add_timestamp_flag_when_requested() {
        assert_eq!(
            logs_args("web", 5, true),
            ["logs", "--tail", "5", "-t", "web"]
        );
    }

    #[test]
    fn health_args_query_health_status_only() {
        assert_eq!(
            health_args("db"),
            ["inspect", "--format", "{{.State.Health.Status}}", "db"]
        );
    }

    #[test]
    fn inspect_args_name_the_container() {
        assert_eq!(inspect_args("db"), ["inspect", "db"]);
    }
}
