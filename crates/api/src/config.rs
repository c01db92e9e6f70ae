//! Service configuration.
//!
//! Loaded from TOML; every field has a default, so an empty file is a
//! valid configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tabula_core::{Error, Result};
use tabula_query::ast::{CoercionPolicy, DEFAULT_LIMIT, MAX_LIMIT};

/// Service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Page size used when a listing request names none.
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Largest page size a listing request may ask for.
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,

    /// Largest accepted upload, in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,

    /// Accepted file extensions, with the leading dot.
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,

    /// How aggregation treats values that are not numbers:
    /// `"zero_row"` or `"zero_group"`.
    #[serde(default = "default_aggregate_coercion")]
    pub aggregate_coercion: String,

    #[serde(default)]
    pub log: LogConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directives. `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_filter")]
    pub filter: String,

    /// Colored output.
    #[serde(default = "default_true")]
    pub ansi: bool,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

fn default_max_limit() -> usize {
    MAX_LIMIT
}

fn default_max_upload_bytes() -> u64 {
    10 * 1024 * 1024
}

fn default_allowed_extensions() -> Vec<String> {
    vec![".csv".to_string(), ".xlsx".to_string(), ".xls".to_string()]
}

fn default_aggregate_coercion() -> String {
    "zero_row".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            max_upload_bytes: default_max_upload_bytes(),
            allowed_extensions: default_allowed_extensions(),
            aggregate_coercion: default_aggregate_coercion(),
            log: LogConfig::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            ansi: default_true(),
        }
    }
}

impl ApiConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::invalid_argument(format!("invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::internal(format!("failed to read config {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Converts configuration to TOML string.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::internal(e.to_string()))
    }

    /// Checks limits and enum-valued fields.
    pub fn validate(&self) -> Result<()> {
        if self.max_limit == 0 {
            return Err(Error::invalid_argument("max_limit must be at least 1"));
        }
        if self.default_limit == 0 || self.default_limit > self.max_limit {
            return Err(Error::invalid_argument(format!(
                "default_limit must be between 1 and {}, got {}",
                self.max_limit, self.default_limit
            )));
        }
        if self.allowed_extensions.is_empty() {
            return Err(Error::invalid_argument("allowed_extensions must not be empty"));
        }
        self.coercion_policy()?;
        Ok(())
    }

    /// The configured aggregation coercion policy.
    pub fn coercion_policy(&self) -> Result<CoercionPolicy> {
        self.aggregate_coercion.parse()
    }

    /// Human-readable upload limit, e.g. `10MB`.
    pub fn max_upload_label(&self) -> String {
        const MIB: u64 = 1024 * 1024;
        if self.max_upload_bytes % MIB == 0 {
            format!("{}MB", self.max_upload_bytes / MIB)
        } else {
            format!("{} bytes", self.max_upload_bytes)
        }
    }
}
