// SPDX-License-Identifier: GPL-3.0-or-later

use crate::api::CatalogApi;
use crate::auth::TokenProvider;
use crate::error::{parse_retry_after, CatalogError, Result};
use crate::models::{ArtistSearchResponse, CatalogArtist, CatalogRelease, CatalogTrack, Page};
use crate::rate_limiter::RateLimiter;
use async_trait::async_trait;
use discographer_domain::ReleaseType;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

const SPOTIFY_API_BASE: &str = "https://api.spotify.com/v1";
const SPOTIFY_ACCOUNTS_BASE: &str = "https://accounts.spotify.com";
const USER_AGENT: &str = concat!("Discographer/", env!("CARGO_PKG_VERSION"));

/// Spotify Web API client with client-credentials auth and request pacing.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    client: Client,
    base_url: String,
    tokens: TokenProvider,
    rate_limiter: RateLimiter,
    market: Option<String>,
}

impl SpotifyClient {
    /// Create a client builder for the given application credentials.
    pub fn builder(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> SpotifyClientBuilder {
        SpotifyClientBuilder::new(client_id, client_secret)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Url::parse(&format!("{}/{}", self.base_url, path))
            .map_err(|e| CatalogError::fatal(format!("invalid endpoint URL: {}", e)))
    }

    /// Internal method to perform paced, authenticated GET requests.
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let token = self.tokens.bearer().await?;
        self.rate_limiter.acquire().await;

        trace!(target: "catalog", "GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        debug!(target: "catalog", %status, "response status");

        if status == StatusCode::UNAUTHORIZED {
            // Expired or revoked token; a fresh one is fetched on the next attempt.
            self.tokens.invalidate().await;
            return Err(CatalogError::transient(format!(
                "access token rejected for {}",
                url
            )));
        }

        if !status.is_success() {
            let retry_after = parse_retry_after(response.headers());
            if let (StatusCode::TOO_MANY_REQUESTS, Some(wait)) = (status, retry_after) {
                self.rate_limiter.hold_off(wait).await;
            }
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::from_status(status, retry_after, &body));
        }

        let body = response.text().await?;
        trace!(target: "catalog", "response body: {}", body);

        serde_json::from_str(&body).map_err(|e| {
            CatalogError::transient(format!("Failed to parse response from {}: {}", url, e))
        })
    }

    fn cursor(&self, cursor: &str) -> Result<Url> {
        Url::parse(cursor)
            .map_err(|e| CatalogError::fatal(format!("invalid page cursor '{}': {}", cursor, e)))
    }
}

#[async_trait]
impl CatalogApi for SpotifyClient {
    async fn search_artists(&self, query: &str, limit: u32) -> Result<Vec<CatalogArtist>> {
        let mut url = self.endpoint("search")?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("type", "artist")
            .append_pair("limit", &limit.to_string());

        let response: ArtistSearchResponse = self.get(url).await?;
        Ok(response.artists.items)
    }

    async fn get_artist(&self, artist_id: &str) -> Result<CatalogArtist> {
        let url = self.endpoint(&format!("artists/{}", artist_id))?;
        self.get(url).await
    }

    async fn artist_releases(
        &self,
        artist_id: &str,
        groups: &[ReleaseType],
        page_size: u32,
    ) -> Result<Page<CatalogRelease>> {
        let include_groups = groups
            .iter()
            .map(ReleaseType::as_str)
            .collect::<Vec<_>>()
            .join(",");

        let mut url = self.endpoint(&format!("artists/{}/albums", artist_id))?;
        url.query_pairs_mut()
            .append_pair("include_groups", &include_groups)
            .append_pair("limit", &page_size.to_string());

        if let Some(market) = self.market.as_deref() {
            url.query_pairs_mut().append_pair("market", market);
        }

        self.get(url).await
    }

    async fn next_releases(&self, cursor: &str) -> Result<Page<CatalogRelease>> {
        self.get(self.cursor(cursor)?).await
    }

    async fn release_tracks(&self, release_id: &str, page_size: u32) -> Result<Page<CatalogTrack>> {
        let mut url = self.endpoint(&format!("albums/{}/tracks", release_id))?;
        url.query_pairs_mut()
            .append_pair("limit", &page_size.to_string());

        if let Some(market) = self.market.as_deref() {
            url.query_pairs_mut().append_pair("market", market);
        }

        self.get(url).await
    }

    async fn next_tracks(&self, cursor: &str) -> Result<Page<CatalogTrack>> {
        self.get(self.cursor(cursor)?).await
    }
}

/// Builder for configuring a Spotify client.
#[derive(Debug)]
pub struct SpotifyClientBuilder {
    client_id: String,
    client_secret: String,
    base_url: String,
    accounts_base_url: String,
    timeout: Duration,
    rate_limit_interval: Duration,
    market: Option<String>,
}

impl SpotifyClientBuilder {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            base_url: SPOTIFY_API_BASE.to_string(),
            accounts_base_url: SPOTIFY_ACCOUNTS_BASE.to_string(),
            timeout: Duration::from_secs(30),
            rate_limit_interval: Duration::from_millis(100),
            market: None,
        }
    }

    /// Set a custom API base URL (useful for testing with mock servers).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom accounts (token) base URL.
    pub fn accounts_base_url(mut self, url: impl Into<String>) -> Self {
        self.accounts_base_url = url.into();
        self
    }

    /// Set request timeout duration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set minimum interval between requests.
    pub fn rate_limit_interval(mut self, interval: Duration) -> Self {
        self.rate_limit_interval = interval;
        self
    }

    pub fn market(mut self, market: Option<String>) -> Self {
        self.market = market.filter(|m| !m.trim().is_empty());
        self
    }

    /// Build the Spotify client.
    pub fn build(self) -> Result<SpotifyClient> {
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CatalogError::fatal(format!("failed to build HTTP client: {}", e)))?;

        let tokens = TokenProvider::new(
            client.clone(),
            &self.accounts_base_url,
            self.client_id,
            self.client_secret,
        );

        Ok(SpotifyClient {
            client,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            tokens,
            rate_limiter: RateLimiter::new(self.rate_limit_interval),
            market: self.market,
        })
    }
}
