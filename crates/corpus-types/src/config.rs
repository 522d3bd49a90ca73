//! Configuration loading for the semantic corpus tools.
//!
//! Layered config: defaults -> config file -> env vars -> CLI flags.
//! Default config file lives at `<config dir>/semantic-corpus/config.toml`.
//! Environment variables use the `CORPUS_` prefix and `__` between nested
//! keys, e.g. `CORPUS_STORE__URI` or `CORPUS_SERVICE__PORT`.

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::CorpusError;

const APP_NAME: &str = "semantic-corpus";

/// Embedding model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Hub repository id or local directory holding the model files
    #[serde(default = "default_model_identifier")]
    pub identifier: String,

    /// Where downloaded model files are cached
    #[serde(default = "default_model_cache_dir")]
    pub cache_dir: String,

    /// Texts per forward pass when batch encoding
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Dimension the downstream vector index was built for
    #[serde(default = "default_expected_dimension")]
    pub expected_dimension: usize,
}

fn default_model_identifier() -> String {
    "sentence-transformers/all-MiniLM-L6-v2".to_string()
}

fn default_model_cache_dir() -> String {
    directories::BaseDirs::new()
        .map(|d| d.cache_dir().join(APP_NAME).join("models"))
        .unwrap_or_else(|| PathBuf::from(".cache/models"))
        .to_string_lossy()
        .to_string()
}

fn default_batch_size() -> usize {
    32
}

fn default_expected_dimension() -> usize {
    384
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            identifier: default_model_identifier(),
            cache_dir: default_model_cache_dir(),
            batch_size: default_batch_size(),
            expected_dimension: default_expected_dimension(),
        }
    }
}

/// HTTP embedding service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSettings {
    #[serde(default = "default_service_host")]
    pub host: String,

    #[serde(default = "default_service_port")]
    pub port: u16,

    /// Largest accepted request body, in megabytes
    #[serde(default = "default_max_body_mb")]
    pub max_body_mb: usize,
}

fn default_service_host() -> String {
    "0.0.0.0".to_string()
}

fn default_service_port() -> u16 {
    5001
}

fn default_max_body_mb() -> usize {
    16
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            host: default_service_host(),
            port: default_service_port(),
            max_body_mb: default_max_body_mb(),
        }
    }
}

/// Document store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Connection string (`rocksdb:///path/to/root` or a plain path)
    #[serde(default = "default_store_uri")]
    pub uri: String,

    #[serde(default = "default_database")]
    pub database: String,

    #[serde(default = "default_collection")]
    pub collection: String,

    /// Name of the vector index the search engine is expected to use
    #[serde(default = "default_vector_index")]
    pub vector_index: String,
}

fn default_store_uri() -> String {
    ProjectDirs::from("", "", APP_NAME)
        .map(|p| p.data_local_dir().join("store"))
        .unwrap_or_else(|| PathBuf::from("./store"))
        .to_string_lossy()
        .to_string()
}

fn default_database() -> String {
    "semantic_search_db".to_string()
}

fn default_collection() -> String {
    "documents".to_string()
}

fn default_vector_index() -> String {
    "vector_index".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            uri: default_store_uri(),
            database: default_database(),
            collection: default_collection(),
            vector_index: default_vector_index(),
        }
    }
}

/// Readiness verifier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifySettings {
    /// Oldest toolchain the binaries are supported on (major.minor)
    #[serde(default = "default_min_rust_version")]
    pub min_rust_version: String,
}

fn default_min_rust_version() -> String {
    "1.80".to_string()
}

impl Default for VerifySettings {
    fn default() -> Self {
        Self {
            min_rust_version: default_min_rust_version(),
        }
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub model: ModelSettings,

    #[serde(default)]
    pub service: ServiceSettings,

    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub verify: VerifySettings,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            model: ModelSettings::default(),
            service: ServiceSettings::default(),
            store: StoreSettings::default(),
            verify: VerifySettings::default(),
        }
    }
}

impl Settings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Default config file
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (CORPUS_*)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, CorpusError> {
        let config_dir = ProjectDirs::from("", "", APP_NAME)
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let default_config_path = config_dir.join("config");

        let mut builder = Config::builder()
            .set_default("log_level", default_log_level())
            .map_err(|e| CorpusError::Config(e.to_string()))?
            .set_default("model.identifier", default_model_identifier())
            .map_err(|e| CorpusError::Config(e.to_string()))?
            .set_default("service.port", default_service_port() as i64)
            .map_err(|e| CorpusError::Config(e.to_string()))?
            .set_default("store.uri", default_store_uri())
            .map_err(|e| CorpusError::Config(e.to_string()))?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("CORPUS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| CorpusError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CorpusError::Config(e.to_string()))
    }

    /// Socket address for the embedding service
    pub fn service_addr(&self) -> String {
        format!("{}:{}", self.service.host, self.service.port)
    }

    /// Names of required settings that are empty.
    ///
    /// Everything listed here has a built-in default, so a non-empty result
    /// means a config file or environment variable blanked it out.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let required = [
            ("store.uri", self.store.uri.as_str()),
            ("store.database", self.store.database.as_str()),
            ("store.collection", self.store.collection.as_str()),
            ("store.vector_index", self.store.vector_index.as_str()),
            ("model.identifier", self.model.identifier.as_str()),
        ];
        let mut missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();
        if self.model.expected_dimension == 0 {
            missing.push("model.expected_dimension");
        }
        missing
    }
}

/// Expand a leading `~/` to the user's home directory
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(dirs) = directories::BaseDirs::new() {
            return dirs.home_dir().join(rest);
        }
    }
    PathBuf::from(path)
}
