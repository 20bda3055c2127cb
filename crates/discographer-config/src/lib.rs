// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub api_base_url: String,
    pub accounts_base_url: String,
    pub timeout_secs: u64,
    /// Minimum spacing between consecutive requests, shared by every caller of one client.
    pub min_request_interval_ms: u64,
    /// Optional ISO 3166-1 market used to filter releases.
    pub market: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            api_base_url: "https://api.spotify.com/v1".to_string(),
            accounts_base_url: "https://accounts.spotify.com".to_string(),
            timeout_secs: 30,
            min_request_interval_ms: 100,
            market: None,
        }
    }
}

impl CatalogConfig {
    /// Client credentials, failing before any network activity when either is missing.
    pub fn credentials(&self) -> Result<(&str, &str)> {
        let id = self.client_id.as_deref().map(str::trim).unwrap_or_default();
        let secret = self
            .client_secret
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();

        if id.is_empty() || secret.is_empty() {
            bail!(
                "Spotify credentials not found. Set SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET \
                 (environment or .env file), or catalog.client_id / catalog.client_secret in the \
                 config file"
            );
        }

        Ok((id, secret))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Wait applied when a throttling response carries no Retry-After hint.
    pub default_rate_limit_secs: u64,
    pub transient_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            default_rate_limit_secs: 5,
            transient_delay_secs: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    pub page_size: u32,
    /// Number of releases whose track listings may be fetched at once.
    pub concurrency: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            page_size: 50,
            concurrency: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub directory: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("discography"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub retry: RetryConfig,
    pub fetch: FetchConfig,
    pub export: ExportConfig,
    pub telemetry: TelemetryConfig,
}

/// Load configuration from defaults, optional TOML file, and environment overrides.
///
/// `SPOTIFY_CLIENT_ID` / `SPOTIFY_CLIENT_SECRET` are accepted as credential aliases;
/// `DISCOGRAPHER_`-prefixed variables (nested with `__`) take precedence over them.
pub fn load(config_path: Option<&Path>) -> Result<AppConfig> {
    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

    if let Some(path) = config_path {
        figment = figment.merge(Toml::file(path));
    }

    figment = figment
        .merge(
            Env::raw()
                .only(&["SPOTIFY_CLIENT_ID", "SPOTIFY_CLIENT_SECRET"])
                .map(|key| {
                    if key.as_str().eq_ignore_ascii_case("spotify_client_id") {
                        "catalog.client_id".into()
                    } else {
                        "catalog.client_secret".into()
                    }
                }),
        )
        .merge(Env::prefixed("DISCOGRAPHER_").split("__"));

    let config: AppConfig = figment.extract()?;
    info!(target: "config", "configuration loaded");
    Ok(config)
}
