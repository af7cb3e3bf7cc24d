//! Generator-derived defaults: ports and database addresses
//!
//! Every value has a built-in default, so with no configuration file the
//! generated output depends only on the user's answers.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Environment variable naming a configuration file
pub const CONFIG_ENV: &str = "STACKFORGE_CONFIG";

const DEFAULT_LISTEN_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "localhost";
const DEFAULT_POSTGRES_PORT: u16 = 5432;
const DEFAULT_NEO4J_PORT: u16 = 7687;
const DEFAULT_REDIS_PORT: u16 = 6379;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Port the generated service listens on
    pub listen_port: u16,
    pub postgres: PostgresDefaults,
    pub neo4j: Neo4jDefaults,
    pub redis: RedisDefaults,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            listen_port: DEFAULT_LISTEN_PORT,
            postgres: PostgresDefaults::default(),
            neo4j: Neo4jDefaults::default(),
            redis: RedisDefaults::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostgresDefaults {
    pub host: String,
    pub port: u16,
}

impl Default for PostgresDefaults {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_POSTGRES_PORT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Neo4jDefaults {
    /// Bolt URI scheme (`neo4j`, `neo4j+s`, `bolt`, ...)
    pub scheme: String,
    pub host: String,
    pub port: u16,
    /// Database used when the user is not asked for one
    pub database: String,
}

impl Default for Neo4jDefaults {
    fn default() -> Self {
        Self {
            scheme: "neo4j".to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_NEO4J_PORT,
            database: "neo4j".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisDefaults {
    pub host: String,
    pub port: u16,
}

impl Default for RedisDefaults {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_REDIS_PORT,
        }
    }
}

impl GeneratorConfig {
    /// Parse a YAML document; absent keys keep their defaults
    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).context("Failed to parse generator config")
    }

    /// Read a configuration file
    pub async fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Resolve configuration: explicit path, then `STACKFORGE_CONFIG`, then defaults
    pub async fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        match path {
            Some(path) => Self::from_file(&path).await,
            None => Ok(Self::default()),
        }
    }
}
