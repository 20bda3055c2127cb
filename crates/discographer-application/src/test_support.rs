// SPDX-License-Identifier: GPL-3.0-or-later
//! In-memory catalog and sleeper used by the unit tests of this crate.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use discographer_catalog::{
    CatalogApi, CatalogArtist, CatalogError, CatalogRelease, CatalogTrack, ExternalUrls,
    Followers, Page,
};
use discographer_domain::ReleaseType;

use crate::retry::Sleeper;

/// Records requested delays instead of sleeping.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    slept: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn slept(&self) -> Vec<Duration> {
        self.slept.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.slept.lock().unwrap().push(duration);
    }
}

pub fn artist(id: &str, name: &str) -> CatalogArtist {
    CatalogArtist {
        id: id.to_string(),
        name: name.to_string(),
        followers: Followers { total: 1_234 },
        genres: vec!["rock".to_string()],
        external_urls: ExternalUrls {
            spotify: Some(format!("https://open.spotify.com/artist/{}", id)),
        },
    }
}

pub fn release(id: &str, name: &str, date: &str, kind: ReleaseType) -> CatalogRelease {
    CatalogRelease {
        id: id.to_string(),
        name: name.to_string(),
        release_date: date.to_string(),
        album_type: Some(kind.as_str().to_string()),
        album_group: Some(kind.as_str().to_string()),
    }
}

pub fn track(name: &str, duration_ms: u64) -> CatalogTrack {
    CatalogTrack {
        id: Some(name.to_lowercase().replace(' ', "-")),
        name: name.to_string(),
        duration_ms,
        external_urls: ExternalUrls {
            spotify: Some(format!("https://open.spotify.com/track/{}", name.len())),
        },
    }
}

/// Scripted catalog. Queued errors are returned, one per call, before any data.
#[derive(Debug, Default)]
pub struct FakeCatalog {
    artists: Vec<CatalogArtist>,
    release_pages: Vec<Vec<CatalogRelease>>,
    track_pages: HashMap<String, Vec<Vec<CatalogTrack>>>,
    errors: Mutex<VecDeque<CatalogError>>,
    calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_artists(mut self, artists: Vec<CatalogArtist>) -> Self {
        self.artists = artists;
        self
    }

    pub fn with_release_pages(mut self, pages: Vec<Vec<CatalogRelease>>) -> Self {
        self.release_pages = pages;
        self
    }

    pub fn with_tracks(mut self, release_id: &str, pages: Vec<Vec<CatalogTrack>>) -> Self {
        self.track_pages.insert(release_id.to_string(), pages);
        self
    }

    pub fn fail_with(self, errors: Vec<CatalogError>) -> Self {
        *self.errors.lock().unwrap() = errors.into();
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), CatalogError> {
        self.calls.lock().unwrap().push(call);
        match self.errors.lock().unwrap().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn page_of<T: Clone>(pages: &[Vec<T>], index: usize, prefix: &str) -> Page<T> {
        let items = pages.get(index).cloned().unwrap_or_default();
        let next = (index + 1 < pages.len()).then(|| format!("{}:{}", prefix, index + 1));
        Page::new(items, next)
    }

    fn cursor_index(cursor: &str) -> usize {
        cursor
            .rsplit(':')
            .next()
            .and_then(|index| index.parse().ok())
            .unwrap_or(usize::MAX)
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn search_artists(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<CatalogArtist>, CatalogError> {
        self.record(format!("search:{}", query))?;
        Ok(self.artists.iter().take(limit as usize).cloned().collect())
    }

    async fn get_artist(&self, artist_id: &str) -> Result<CatalogArtist, CatalogError> {
        self.record(format!("artist:{}", artist_id))?;
        self.artists
            .iter()
            .find(|artist| artist.id == artist_id)
            .cloned()
            .ok_or_else(|| CatalogError::fatal("404 - Resource not found"))
    }

    async fn artist_releases(
        &self,
        artist_id: &str,
        _groups: &[ReleaseType],
        _page_size: u32,
    ) -> Result<Page<CatalogRelease>, CatalogError> {
        self.record(format!("releases:{}", artist_id))?;
        Ok(Self::page_of(&self.release_pages, 0, "releases"))
    }

    async fn next_releases(&self, cursor: &str) -> Result<Page<CatalogRelease>, CatalogError> {
        self.record(cursor.to_string())?;
        Ok(Self::page_of(
            &self.release_pages,
            Self::cursor_index(cursor),
            "releases",
        ))
    }

    async fn release_tracks(
        &self,
        release_id: &str,
        _page_size: u32,
    ) -> Result<Page<CatalogTrack>, CatalogError> {
        self.record(format!("tracks:{}", release_id))?;
        let pages = self
            .track_pages
            .get(release_id)
            .map(Vec::as_slice)
            .unwrap_or_default();
        Ok(Self::page_of(pages, 0, &format!("tracks:{}", release_id)))
    }

    async fn next_tracks(&self, cursor: &str) -> Result<Page<CatalogTrack>, CatalogError> {
        self.record(cursor.to_string())?;
        let release_id = cursor.split(':').nth(1).unwrap_or_default();
        let pages = self
            .track_pages
            .get(release_id)
            .map(Vec::as_slice)
            .unwrap_or_default();
        Ok(Self::page_of(
            pages,
            Self::cursor_index(cursor),
            &format!("tracks:{}", release_id),
        ))
    }
}
