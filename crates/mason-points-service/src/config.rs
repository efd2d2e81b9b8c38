//! Service configuration.

use std::path::Path;

use mason_points_core::LoyaltyRulesConfig;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8080").
    pub listen_addr: String,

    /// Path to `RocksDB` data directory (default: "/data/mason-points").
    pub data_dir: String,

    /// HS256 secret for mason JWT tokens.
    pub jwt_secret: Option<String>,

    /// Operator API key for back-office endpoints.
    pub operator_api_key: Option<String>,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,

    /// Loyalty rules configuration.
    pub rules: LoyaltyRulesConfig,
}

impl ServiceConfig {
    /// Load configuration from environment variables and the optional
    /// rules file.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "/data/mason-points".into()),
            jwt_secret: std::env::var("JWT_SECRET").ok(),
            operator_api_key: std::env::var("OPERATOR_API_KEY").ok(),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1024 * 1024), // 1MB
            request_timeout_seconds: std::env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            rules: load_rules_config(),
        }
    }
}

/// Load the loyalty rules from a JSON file, falling back to defaults.
///
/// Campaign windows and point rates change season to season, so they live
/// in a deployable file rather than in code.
fn load_rules_config() -> LoyaltyRulesConfig {
    let path = std::env::var("RULES_CONFIG_PATH").unwrap_or_else(|_| "rules.json".into());

    match load_rules_file(&path) {
        Ok(rules) => {
            tracing::info!(path = %path, "Loaded loyalty rules from file");
            rules
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path, "Rules file not found, using default rules");
            LoyaltyRulesConfig::default()
        }
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "Failed to load rules file, using defaults");
            LoyaltyRulesConfig::default()
        }
    }
}

/// Parse a rules file.
fn load_rules_file(path: &str) -> Result<LoyaltyRulesConfig, std::io::Error> {
    let path = Path::new(path);
    if !path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "rules file not found",
        ));
    }
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}
