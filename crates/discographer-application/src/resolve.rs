// SPDX-License-Identifier: GPL-3.0-or-later
use discographer_catalog::{CatalogApi, CatalogArtist, CatalogError};
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::retry::{RetryPolicy, Sleeper};

/// Candidates requested for a free-text artist search.
pub const SEARCH_LIMIT: u32 = 5;

lazy_static! {
    static ref ARTIST_ID: Regex =
        Regex::new(r"(?:/artist/|spotify:artist:)([A-Za-z0-9]+)").expect("artist id pattern");
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no artist name or URL given")]
    EmptyInput,
    #[error("Artist '{0}' not found.")]
    NotFound(String),
    #[error("selection {choice} is out of range (1-{available})")]
    SelectionOutOfRange { choice: usize, available: usize },
    #[error("artist selection aborted: {0}")]
    SelectionAborted(String),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// How the user identified an artist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtistInput {
    Id(String),
    Query(String),
}

impl ArtistInput {
    /// Recognise artist URLs/URIs; anything else is a search query.
    pub fn parse(input: &str) -> Result<Self, ResolveError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ResolveError::EmptyInput);
        }

        match ARTIST_ID.captures(input).and_then(|captures| captures.get(1)) {
            Some(id) => Ok(Self::Id(id.as_str().to_string())),
            None => Ok(Self::Query(input.to_string())),
        }
    }
}

/// Picks one artist when a search is ambiguous.
pub trait ArtistSelector {
    /// 1-based ordinal of the chosen candidate.
    fn select(&mut self, candidates: &[CatalogArtist]) -> Result<usize, ResolveError>;
}

/// Always takes the best-ranked candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstCandidate;

impl ArtistSelector for FirstCandidate {
    fn select(&mut self, _candidates: &[CatalogArtist]) -> Result<usize, ResolveError> {
        Ok(1)
    }
}

pub async fn resolve_artist<C, S, Sel>(
    api: &C,
    retry: &RetryPolicy<S>,
    input: &str,
    selector: &mut Sel,
) -> Result<CatalogArtist, ResolveError>
where
    C: CatalogApi,
    S: Sleeper,
    Sel: ArtistSelector + ?Sized,
{
    match ArtistInput::parse(input)? {
        ArtistInput::Id(id) => {
            debug!(target: "resolve", %id, "looking up artist by id");
            Ok(retry.call(|| api.get_artist(&id)).await?)
        }
        ArtistInput::Query(name) => {
            let query = format!("artist:{}", name);
            let mut candidates = retry
                .call(|| api.search_artists(&query, SEARCH_LIMIT))
                .await?;
            debug!(target: "resolve", %query, candidates = candidates.len(), "artist search finished");

            match candidates.len() {
                0 => Err(ResolveError::NotFound(name)),
                1 => Ok(candidates.remove(0)),
                available => {
                    let choice = selector.select(&candidates)?;
                    if choice == 0 || choice > available {
                        return Err(ResolveError::SelectionOutOfRange { choice, available });
                    }
                    Ok(candidates.swap_remove(choice - 1))
                }
            }
        }
    }
}
