// SPDX-License-Identifier: GPL-3.0-or-later

use discographer_domain::{Release, ReleaseType};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One page of a paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    /// Items on this page, in service order.
    pub items: Vec<T>,
    /// Opaque cursor (absolute URL) of the following page; absent on the last page.
    #[serde(default)]
    pub next: Option<String>,
    /// Total number of items across all pages, when reported.
    #[serde(default)]
    pub total: Option<u32>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next: Option<String>) -> Self {
        Self {
            items,
            next,
            total: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Followers {
    #[serde(default)]
    pub total: u64,
}

/// Artist profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogArtist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub followers: Followers,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

impl CatalogArtist {
    pub fn url(&self) -> Option<&str> {
        self.external_urls.spotify.as_deref()
    }
}

/// Release entry from an artist's discography listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogRelease {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub release_date: String,
    /// Format of the release itself: album, single or compilation.
    #[serde(default)]
    pub album_type: Option<String>,
    /// Relationship to the requested artist; the only field that can say `appears_on`.
    #[serde(default)]
    pub album_group: Option<String>,
}

impl CatalogRelease {
    pub fn release_type(&self) -> ReleaseType {
        let raw = self
            .album_group
            .as_deref()
            .or(self.album_type.as_deref())
            .unwrap_or_default();

        ReleaseType::parse(raw).unwrap_or_else(|| {
            debug!(target: "catalog", release = %self.name, raw, "unrecognised release type, treating as album");
            ReleaseType::Album
        })
    }

    pub fn to_release(&self) -> Release {
        Release::new(
            self.id.clone(),
            self.name.clone(),
            self.release_date.clone(),
            self.release_type(),
        )
    }
}

/// Track entry from a release's track listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogTrack {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

impl CatalogTrack {
    pub fn url(&self) -> Option<&str> {
        self.external_urls.spotify.as_deref()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ArtistSearchResponse {
    pub artists: Page<CatalogArtist>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(album_type: Option<&str>, album_group: Option<&str>) -> CatalogRelease {
        CatalogRelease {
            id: "id".to_string(),
            name: "Name".to_string(),
            release_date: "2020-01-01".to_string(),
            album_type: album_type.map(str::to_string),
            album_group: album_group.map(str::to_string),
        }
    }

    #[test]
    fn album_group_takes_precedence() {
        let entry = release(Some("album"), Some("appears_on"));
        assert_eq!(entry.release_type(), ReleaseType::AppearsOn);
    }

    #[test]
    fn falls_back_to_album_type_then_album() {
        assert_eq!(
            release(Some("compilation"), None).release_type(),
            ReleaseType::Compilation
        );
        assert_eq!(release(None, None).release_type(), ReleaseType::Album);
        assert_eq!(release(Some("ep"), None).release_type(), ReleaseType::Album);
    }

    #[test]
    fn converts_to_domain_release() {
        let domain = release(Some("single"), Some("single")).to_release();
        assert_eq!(domain.name, "Name");
        assert_eq!(domain.year(), "2020");
        assert_eq!(domain.release_type, ReleaseType::Single);
    }

    #[test]
    fn deserializes_page_without_next() {
        let page: Page<CatalogTrack> = serde_json::from_value(serde_json::json!({
            "items": [{"name": "Intro", "duration_ms": 61000}],
            "next": null
        }))
        .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].url(), None);
        assert!(page.next.is_none());
    }
}
