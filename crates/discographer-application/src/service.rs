// SPDX-License-Identifier: GPL-3.0-or-later
use discographer_catalog::{CatalogApi, CatalogArtist, CatalogError};
use discographer_config::FetchConfig;
use discographer_domain::{ReleaseType, TrackRecord};
use tracing::info;

use crate::aggregate::{aggregate_tracks, AggregateOptions};
use crate::dedup::{deduplicate_releases, UniqueReleases};
use crate::pager::collect_pages;
use crate::resolve::{resolve_artist, ArtistSelector, ResolveError};
use crate::retry::{RetryPolicy, Sleeper, TokioSleeper};
use crate::stats::DiscographyStats;

/// Result of one run: the resolved artist, its unique releases and every track.
#[derive(Debug, Clone, PartialEq)]
pub struct Discography {
    pub artist: CatalogArtist,
    pub releases: UniqueReleases,
    pub tracks: Vec<TrackRecord>,
}

impl Discography {
    pub fn stats(&self) -> DiscographyStats {
        DiscographyStats::compute(&self.tracks)
    }
}

/// Wires the catalog, retry policy and fetch options into the retrieval pipeline.
pub struct DiscographyService<C, S = TokioSleeper> {
    api: C,
    retry: RetryPolicy<S>,
    options: AggregateOptions,
}

impl<C, S> DiscographyService<C, S>
where
    C: CatalogApi,
    S: Sleeper,
{
    pub fn new(api: C, retry: RetryPolicy<S>, fetch: &FetchConfig) -> Self {
        Self {
            api,
            retry,
            options: AggregateOptions {
                page_size: fetch.page_size,
                concurrency: fetch.concurrency,
            },
        }
    }

    pub fn api(&self) -> &C {
        &self.api
    }

    pub fn retry(&self) -> &RetryPolicy<S> {
        &self.retry
    }

    pub async fn resolve_artist<Sel>(
        &self,
        input: &str,
        selector: &mut Sel,
    ) -> Result<CatalogArtist, ResolveError>
    where
        Sel: ArtistSelector + ?Sized,
    {
        resolve_artist(&self.api, &self.retry, input, selector).await
    }

    /// All album, single, compilation and appears-on releases, deduplicated by name.
    pub async fn fetch_releases(&self, artist_id: &str) -> Result<UniqueReleases, CatalogError> {
        let api = &self.api;
        let raw = collect_pages(
            &self.retry,
            || api.artist_releases(artist_id, &ReleaseType::ALL, self.options.page_size),
            move |cursor: String| async move { api.next_releases(&cursor).await },
        )
        .await?;

        let fetched = raw.len();
        let releases = deduplicate_releases(raw.iter().map(|entry| entry.to_release()));
        info!(
            target: "service",
            artist_id,
            fetched,
            unique = releases.len(),
            "retrieved releases"
        );
        Ok(releases)
    }

    /// Releases and tracks for `artist`. `progress` receives `(done, total)` per release.
    pub async fn fetch_discography<P>(
        &self,
        artist: CatalogArtist,
        progress: P,
    ) -> Result<Discography, CatalogError>
    where
        P: FnMut(usize, usize),
    {
        let releases = self.fetch_releases(&artist.id).await?;
        let tracks = aggregate_tracks(
            &self.api,
            &self.retry,
            &artist.name,
            &releases,
            self.options,
            progress,
        )
        .await?;

        Ok(Discography {
            artist,
            releases,
            tracks,
        })
    }
}
