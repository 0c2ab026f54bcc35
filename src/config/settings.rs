//! Settings structures for papervote configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    pub database: DatabaseSettings,
    pub providers: ProviderSettings,
    pub papers: PaperSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables.
    ///
    /// `PAPERVOTE_*` variables override server and storage settings. The
    /// provider credentials use the names the Google APIs document.
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    fn merge_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("PAPERVOTE_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Some(val) = var("PAPERVOTE_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("PAPERVOTE_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = var("PAPERVOTE_DATABASE_PATH") {
            self.database.path = PathBuf::from(val);
        }
        if let Some(val) = var("YOUTUBE_API_KEY") {
            self.providers.youtube_api_key = val;
        }
        if let Some(val) = var("GOOGLE_API_KEY") {
            self.providers.google_api_key = val;
        }
        if let Some(val) = var("GOOGLE_CSE_ID") {
            self.providers.google_cse_id = val;
        }
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Instance name displayed in UI
    pub instance_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "papervote".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 5000,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Pool max idle connections per host
    pub pool_maxsize: usize,
    /// Proxy for all outgoing traffic
    pub proxy: Option<String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 10.0,
            pool_maxsize: 20,
            proxy: None,
        }
    }
}

/// Vote database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SQLite file holding vote tallies
    pub path: PathBuf,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("votes.db"),
        }
    }
}

/// Credentials and endpoints for the YouTube and Google providers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub youtube_api_key: String,
    /// Base of the YouTube Data API; `/search` and `/videos` are appended
    pub youtube_api_base: String,
    pub google_api_key: String,
    pub google_cse_id: String,
    pub google_api_url: String,
    /// Results requested from each provider per search
    pub results_per_source: u32,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            youtube_api_key: String::new(),
            youtube_api_base: "https://www.googleapis.com/youtube/v3".to_string(),
            google_api_key: String::new(),
            google_cse_id: String::new(),
            google_api_url: "https://www.googleapis.com/customsearch/v1".to_string(),
            results_per_source: 5,
        }
    }
}

/// arXiv listing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaperSettings {
    pub api_url: String,
    /// arXiv search_query filter
    pub category: String,
    /// Number of most recent entries fetched per listing
    pub batch_size: u32,
    pub per_page: u32,
}

impl Default for PaperSettings {
    fn default() -> Self {
        Self {
            api_url: "https://export.arxiv.org/api/query".to_string(),
            category: "cat:cs.AI".to_string(),
            batch_size: 50,
            per_page: 10,
        }
    }
}
