use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for the ilicoo client
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IlicooConfig {
    /// Backend REST API
    pub api: ApiConfig,
    /// Auth service and credential storage
    pub auth: AuthConfig,
    /// Geocoding, routing and place search providers
    pub maps: MapsConfig,
    /// Phone verification
    pub verification: VerificationConfig,
    /// Push notifications
    pub notifications: NotificationConfig,
    /// Logging settings
    pub observability: ObservabilityConfig,
}

/// Device platform the client runs as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Overrides the per-platform default base URL
    pub base_url: Option<String>,
    pub platform: Platform,
    pub timeout_seconds: u64,
    /// How long a fetched list is served from cache
    pub query_cache_ttl_seconds: u64,
    pub query_cache_capacity: u64,
}

impl ApiConfig {
    /// Base URL of the REST API, always ending with a slash.
    ///
    /// The Android emulator reaches the host machine through 10.0.2.2.
    pub fn resolved_base_url(&self) -> String {
        let base = match (&self.base_url, self.platform) {
            (Some(url), _) => url.clone(),
            (None, Platform::Ios) => "http://localhost:3000/api/v1/".to_string(),
            (None, Platform::Android) => "http://10.0.2.2:3000/api/v1/".to_string(),
        };
        if base.ends_with('/') {
            base
        } else {
            format!("{base}/")
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Auth service root; session routes live under /api/auth
    pub base_url: String,
    /// Deep-link scheme of the app
    pub scheme: String,
    /// Prefix for keys in the credential store
    pub storage_prefix: String,
    /// Directory of the file-backed credential store
    pub storage_dir: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MapsConfig {
    pub nominatim_url: String,
    pub osrm_url: String,
    pub places_url: String,
    /// Google Maps key (also read from EXPO_PUBLIC_GOOGLE_MAPS_API_KEY)
    pub google_maps_api_key: Option<String>,
    /// ISO country restricting place search
    pub country_code: String,
    pub language: String,
    /// Sent with every request; Nominatim rejects anonymous clients
    pub user_agent: String,
    pub geocoding_requests_per_second: u32,
    pub search_debounce_ms: u64,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    pub duration_seconds: u32,
    /// Code accepted locally until the server issues codes
    pub expected_code: String,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            duration_seconds: crate::verification::OTP_DURATION_SECONDS,
            expected_code: crate::verification::DEFAULT_OTP_CODE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationConfig {
    /// Project id used when requesting a push token
    pub project_id: Option<String>,
    /// Simulate permissions and tokens (no real push service)
    pub simulator: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level
    pub log_level: String,
    /// Emit JSON lines instead of human-readable logs
    pub json_logs: bool,
}

impl Default for IlicooConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: None,
                platform: Platform::Ios,
                timeout_seconds: 30,
                query_cache_ttl_seconds: 60,
                query_cache_capacity: 100,
            },
            auth: AuthConfig {
                base_url: "http://localhost:3000".to_string(),
                scheme: "ilicooapp".to_string(),
                storage_prefix: "ilicooapp".to_string(),
                storage_dir: ".ilicoo".to_string(),
            },
            maps: MapsConfig {
                nominatim_url: "https://nominatim.openstreetmap.org/".to_string(),
                osrm_url: "https://router.project-osrm.org/".to_string(),
                places_url: "https://maps.googleapis.com/maps/api/place/".to_string(),
                google_maps_api_key: None,
                country_code: "ml".to_string(),
                language: "fr".to_string(),
                user_agent: concat!("ilicoo/", env!("CARGO_PKG_VERSION")).to_string(),
                geocoding_requests_per_second: 1, // Nominatim usage policy
                search_debounce_ms: 350,
                timeout_seconds: 10,
            },
            verification: VerificationConfig::default(),
            notifications: NotificationConfig {
                project_id: None,
                simulator: true, // No push service outside a device
            },
            observability: ObservabilityConfig {
                log_level: "warn".to_string(),
                json_logs: false,
            },
        }
    }
}

impl IlicooConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration files (ilicoo.toml, .ilicoo-rc)
    /// 3. Environment variables (ILICOO__SECTION__KEY)
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if Path::new("ilicoo.toml").exists() {
            builder = builder.add_source(File::with_name("ilicoo"));
        }

        if Path::new(".ilicoo-rc").exists() {
            builder = builder.add_source(
                File::with_name(".ilicoo-rc").format(config::FileFormat::Toml),
            );
        }

        // Double underscore keeps snake_case keys intact
        builder = builder.add_source(
            Environment::with_prefix("ILICOO")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let mut ilicoo_config: IlicooConfig = builder.build()?.try_deserialize()?;

        // Same variable the mobile build reads
        if ilicoo_config.maps.google_maps_api_key.is_none() {
            if let Ok(key) = std::env::var("EXPO_PUBLIC_GOOGLE_MAPS_API_KEY") {
                ilicoo_config.maps.google_maps_api_key = Some(key);
            }
        }

        Ok(ilicoo_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<IlicooConfig, anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        // Load .env file first
        let _ = IlicooConfig::load_env_file();
        IlicooConfig::load()
    });

/// Get the global configuration
pub fn config() -> Result<&'static IlicooConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}

/// Initialize configuration (called at startup)
pub fn init_config() -> Result<()> {
    let _config = config()?;
    tracing::info!("Configuration loaded successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_follows_platform() {
        let mut api = IlicooConfig::default().api;
        assert_eq!(api.resolved_base_url(), "http://localhost:3000/api/v1/");

        api.platform = Platform::Android;
        assert_eq!(api.resolved_base_url(), "http://10.0.2.2:3000/api/v1/");

        api.base_url = Some("https://api.ilicoo.ml/v1".to_string());
        assert_eq!(api.resolved_base_url(), "https://api.ilicoo.ml/v1/");
    }

    #[test]
    fn defaults_round_trip_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ilicoo.toml");
        IlicooConfig::default().save_to_file(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: IlicooConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.verification.duration_seconds, 30);
        assert_eq!(parsed.verification.expected_code, "1234");
        assert_eq!(parsed.maps.search_debounce_ms, 350);
        assert_eq!(parsed.api.platform, Platform::Ios);
    }
}
