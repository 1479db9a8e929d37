use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_NAMESPACE: &str = "EBSMonitoring";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Empty in-memory inventory; useful for wiring checks and dry runs.
    Mock,
    /// Inventory loaded from a JSON fixture document on disk.
    Fixture,
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(Mode::Mock),
            "fixture" => Ok(Mode::Fixture),
            _ => anyhow::bail!("Invalid MODE: {}. Must be 'mock' or 'fixture'", s),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    /// Grouping under which all observations are published.
    pub namespace: String,
    pub fixture_path: Option<PathBuf>,
    /// Externally imposed invocation budget; None means no deadline.
    pub deadline_seconds: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let mode_str = env::var("MODE").unwrap_or_else(|_| "mock".to_string());
        let mode = Mode::from_str(&mode_str)?;

        let namespace =
            env::var("CLOUDWATCH_NAMESPACE").unwrap_or_else(|_| DEFAULT_NAMESPACE.to_string());

        let fixture_path = env::var("FIXTURE_PATH").ok().map(PathBuf::from);

        let deadline_seconds = match env::var("DEADLINE_SECONDS") {
            Ok(raw) => Some(
                raw.parse::<u64>()
                    .context("Failed to parse DEADLINE_SECONDS")?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            mode,
            namespace,
            fixture_path,
            deadline_seconds,
        })
    }
}
