// SPDX-License-Identifier: GPL-3.0-or-later
use discographer_catalog::{CatalogApi, CatalogError, CatalogTrack};
use discographer_domain::{format_duration, Release, TrackRecord};
use futures::stream::{self, StreamExt};
use tracing::{debug, info};

use crate::dedup::UniqueReleases;
use crate::pager::collect_pages;
use crate::retry::{RetryPolicy, Sleeper};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    pub page_size: u32,
    /// Releases fetched at once. Values below 1 are treated as 1.
    pub concurrency: usize,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            page_size: 50,
            concurrency: 1,
        }
    }
}

/// Every track of one release, flattened into records.
pub async fn release_track_records<C, S>(
    api: &C,
    retry: &RetryPolicy<S>,
    artist_name: &str,
    release: &Release,
    page_size: u32,
) -> Result<Vec<TrackRecord>, CatalogError>
where
    C: CatalogApi,
    S: Sleeper,
{
    let tracks = collect_pages(
        retry,
        || api.release_tracks(&release.id, page_size),
        move |cursor: String| async move { api.next_tracks(&cursor).await },
    )
    .await?;

    debug!(target: "aggregate", release = %release.name, tracks = tracks.len(), "fetched release tracks");

    Ok(tracks
        .into_iter()
        .map(|track| track_record(artist_name, release, track))
        .collect())
}

/// Fetch and flatten the tracks of every release, keeping release order.
///
/// Aborts on the first unrecoverable error; no partial result is returned.
/// `progress` is called with `(releases_done, releases_total)` after each release.
pub async fn aggregate_tracks<C, S, P>(
    api: &C,
    retry: &RetryPolicy<S>,
    artist_name: &str,
    releases: &UniqueReleases,
    options: AggregateOptions,
    mut progress: P,
) -> Result<Vec<TrackRecord>, CatalogError>
where
    C: CatalogApi,
    S: Sleeper,
    P: FnMut(usize, usize),
{
    let total = releases.len();
    info!(target: "aggregate", releases = total, concurrency = options.concurrency, "aggregating tracks");

    let mut fetches = stream::iter(releases.iter())
        .map(|release| release_track_records(api, retry, artist_name, release, options.page_size))
        .buffered(options.concurrency.max(1));

    let mut records = Vec::new();
    let mut done = 0;
    while let Some(batch) = fetches.next().await {
        records.extend(batch?);
        done += 1;
        progress(done, total);
    }

    info!(target: "aggregate", tracks = records.len(), "aggregation complete");
    Ok(records)
}

fn track_record(artist_name: &str, release: &Release, track: CatalogTrack) -> TrackRecord {
    TrackRecord {
        artist: artist_name.to_string(),
        url: track.url().unwrap_or_default().to_string(),
        track: track.name,
        album: release.name.clone(),
        year: release.year().to_string(),
        release_type: release.release_type,
        duration: format_duration(track.duration_ms),
    }
}
