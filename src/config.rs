use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
///
/// All settings can be configured via environment variables with the `WARDROBE_` prefix
/// and double underscores between section and key.
/// For example: `WARDROBE_SERVER__PORT=5000`, `WARDROBE_DEMO__ENABLED=true`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Product search configuration
    #[serde(default)]
    pub search: SearchConfig,

    /// Image analysis configuration
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Demo mode configuration
    #[serde(default)]
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum accepted request body (image uploads included)
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_upload_bytes() -> usize {
    16 * 1024 * 1024
}

impl ServerConfig {
    /// Returns the socket address for binding the server
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Query live shopping sites (disable to return recommendations only)
    #[serde(default = "default_search_enabled")]
    pub enabled: bool,

    /// Minimum delay between outbound requests, in seconds
    #[serde(default = "default_request_delay")]
    pub request_delay_s: f64,

    /// Later sources are only queried while fewer products than this were found
    #[serde(default = "default_fallback_below_products")]
    pub fallback_below_products: usize,

    /// Per-request HTTP timeout, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_s: u64,

    /// User agent sent to shopping sites
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: default_search_enabled(),
            request_delay_s: default_request_delay(),
            fallback_below_products: default_fallback_below_products(),
            timeout_s: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_search_enabled() -> bool {
    true
}

fn default_request_delay() -> f64 {
    1.0
}

fn default_fallback_below_products() -> usize {
    10
}

fn default_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/91.0.4472.124 Safari/537.36"
        .to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Upper bound on the number of dominant colors reported
    #[serde(default = "default_max_colors")]
    pub max_colors: usize,

    /// Seed for k-means initialisation
    #[serde(default = "default_kmeans_seed")]
    pub kmeans_seed: u64,

    /// Iteration cap for k-means
    #[serde(default = "default_kmeans_iterations")]
    pub kmeans_max_iterations: usize,

    /// ONNX image-classification model; unset uses the aspect-ratio heuristic
    #[serde(default)]
    pub classifier_model: Option<PathBuf>,

    /// Labels file for the model, one label per output index
    #[serde(default)]
    pub classifier_labels: Option<PathBuf>,

    /// Square input edge length the model expects
    #[serde(default = "default_classifier_input_size")]
    pub classifier_input_size: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_colors: default_max_colors(),
            kmeans_seed: default_kmeans_seed(),
            kmeans_max_iterations: default_kmeans_iterations(),
            classifier_model: None,
            classifier_labels: None,
            classifier_input_size: default_classifier_input_size(),
        }
    }
}

fn default_max_colors() -> usize {
    5
}

fn default_kmeans_seed() -> u64 {
    42
}

fn default_kmeans_iterations() -> usize {
    50
}

fn default_classifier_input_size() -> u32 {
    crate::analyzer::DEFAULT_INPUT_SIZE
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DemoConfig {
    /// Serve fixed sample payloads from the combined endpoint
    #[serde(default)]
    pub enabled: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// - `WARDROBE_SERVER__PORT` -> server.port
    /// - `WARDROBE_SEARCH__REQUEST_DELAY_S` -> search.request_delay_s
    /// - `WARDROBE_DEMO__ENABLED` -> demo.enabled
    /// - `WARDROBE_ANALYSIS__CLASSIFIER_MODEL` -> analysis.classifier_model
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("WARDROBE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.max_upload_bytes, 16 * 1024 * 1024);
        assert!(config.search.enabled);
        assert_eq!(config.search.request_delay_s, 1.0);
        assert_eq!(config.search.fallback_below_products, 10);
        assert_eq!(config.analysis.max_colors, 5);
        assert_eq!(config.analysis.kmeans_seed, 42);
        assert!(config.analysis.classifier_model.is_none());
        assert_eq!(config.analysis.classifier_input_size, 224);
        assert!(!config.demo.enabled);
    }

    #[test]
    fn test_socket_addr() {
        let server = ServerConfig::default();
        let addr = server.socket_addr().unwrap();
        assert_eq!(addr.port(), 5000);
    }

    #[test]
    fn test_invalid_socket_addr() {
        let server = ServerConfig {
            host: "not a host".to_string(),
            ..ServerConfig::default()
        };
        assert!(server.socket_addr().is_err());
    }
}
