//! Subprocess-backed engine

use super::{EngineInvocation, VectorEngine};
use crate::error::{EngineError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Where the engine lives and how long to wait for it
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Path to the engine executable
    pub binary: PathBuf,
    /// Working directory for every invocation; the engine resolves its
    /// database path relative to it
    pub working_dir: PathBuf,
    /// Upper bound on a single invocation. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl EngineConfig {
    pub fn new(binary: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            working_dir: working_dir.into(),
            timeout: None,
        }
    }

    /// Conventional layout: `<root>/build/vectorforge`, run from `<root>`
    pub fn for_root(root: &Path) -> Self {
        Self::new(Self::default_binary(root), root)
    }

    pub fn default_binary(root: &Path) -> PathBuf {
        root.join("build").join("vectorforge")
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Runs the engine binary once per invocation
#[derive(Debug, Clone)]
pub struct ProcessEngine {
    config: EngineConfig,
}

impl ProcessEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    fn spawn_error(&self, source: std::io::Error) -> EngineError {
        EngineError::Spawn {
            path: self.config.binary.clone(),
            source,
        }
    }
}

#[async_trait]
impl VectorEngine for ProcessEngine {
    async fn invoke(&self, invocation: &EngineInvocation) -> Result<Value> {
        tracing::debug!(
            command = %invocation.command,
            binary = ?self.config.binary,
            "Invoking VectorForge"
        );

        let child = Command::new(&self.config.binary)
            .current_dir(&self.config.working_dir)
            .arg(invocation.command.as_str())
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = match self.config.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| {
                    tracing::error!(command = %invocation.command, "VectorForge timed out after {:?}", limit);
                    EngineError::Timeout(limit)
                })?,
            None => child.wait_with_output().await,
        }
        .map_err(|e| self.spawn_error(e))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        if !stderr.is_empty() {
            tracing::warn!("VectorForge stderr: {}", stderr);
        }

        if !output.status.success() {
            tracing::error!(command = %invocation.command, "VectorForge execution failed: {}", output.status);
            return Err(EngineError::Execution {
                status: output.status.to_string(),
                stderr: stderr.to_string(),
            });
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|e| EngineError::protocol(format!("stdout is not UTF-8: {}", e)))?;

        serde_json::from_str(stdout.trim())
            .map_err(|e| EngineError::protocol(format!("stdout is not JSON ({}): {}", e, stdout.trim())))
    }
}
