// SPDX-License-Identifier: GPL-3.0-or-later

//! Music catalog client for resolving artists and walking their discographies.
//!
//! [`CatalogApi`] is the abstract remote surface the rest of the workspace
//! programs against. [`SpotifyClient`] implements it over the Spotify Web API
//! with client-credentials authentication and request pacing. Every failure is
//! reported as a [`CatalogError`] tagged as rate-limited, transient or fatal so
//! callers can decide whether to retry.

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod rate_limiter;

pub use api::CatalogApi;
pub use client::{SpotifyClient, SpotifyClientBuilder};
pub use error::{CatalogError, Result};
pub use models::{CatalogArtist, CatalogRelease, CatalogTrack, ExternalUrls, Followers, Page};
