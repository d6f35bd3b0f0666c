//! Command-line configuration
//!
//! Resolved once at startup into an [`EngineConfig`]; nothing downstream
//! looks at the environment or the current directory again.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use vectorforge_memory::EngineConfig;

#[derive(Debug, Parser)]
#[command(name = "vectorforge-mcp")]
#[command(about = "VectorForge memory tools over the Model Context Protocol")]
#[command(version)]
pub struct Cli {
    /// VectorForge root directory; the engine runs here and keeps its
    /// database under `data/` [default: current directory]
    #[arg(long, env = "VECTORFORGE_ROOT")]
    pub root: Option<PathBuf>,

    /// Engine executable [default: <root>/build/vectorforge]
    #[arg(long = "engine-bin", env = "VECTORFORGE_BIN")]
    pub engine_bin: Option<PathBuf>,

    /// Abort engine calls that run longer than this many seconds (0 = wait forever)
    #[arg(long = "timeout-secs", env = "VECTORFORGE_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

impl Cli {
    /// Build the engine configuration, falling back to the current
    /// directory when no root was given.
    pub fn engine_config(&self) -> std::io::Result<EngineConfig> {
        let root = match &self.root {
            Some(root) => root.clone(),
            None => std::env::current_dir()?,
        };

        let binary = self
            .engine_bin
            .clone()
            .unwrap_or_else(|| EngineConfig::default_binary(&root));

        let timeout = self
            .timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Ok(EngineConfig::new(binary, root).with_timeout(timeout))
    }
}
