// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use crate::models::{CatalogArtist, CatalogRelease, CatalogTrack, Page};
use async_trait::async_trait;
use discographer_domain::ReleaseType;

/// Remote catalog operations. Each call performs exactly one request; retrying is
/// left to the caller.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Free-text artist search, best matches first.
    async fn search_artists(&self, query: &str, limit: u32) -> Result<Vec<CatalogArtist>>;

    async fn get_artist(&self, artist_id: &str) -> Result<CatalogArtist>;

    /// First page of an artist's releases restricted to `groups`.
    async fn artist_releases(
        &self,
        artist_id: &str,
        groups: &[ReleaseType],
        page_size: u32,
    ) -> Result<Page<CatalogRelease>>;

    async fn next_releases(&self, cursor: &str) -> Result<Page<CatalogRelease>>;

    /// First page of a release's track listing.
    async fn release_tracks(&self, release_id: &str, page_size: u32) -> Result<Page<CatalogTrack>>;

    async fn next_tracks(&self, cursor: &str) -> Result<Page<CatalogTrack>>;
}
