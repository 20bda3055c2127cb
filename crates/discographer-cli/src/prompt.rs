// SPDX-License-Identifier: GPL-3.0-or-later
use anyhow::{Context, Result};
use dialoguer::{Confirm, Input, Select};
use discographer_application::{ArtistSelector, ResolveError};
use discographer_catalog::CatalogArtist;
use tracing::warn;

use crate::report::group_thousands;

/// Interactive selection among ambiguous search results.
#[derive(Debug, Default)]
pub struct DialoguerSelector;

impl ArtistSelector for DialoguerSelector {
    fn select(&mut self, candidates: &[CatalogArtist]) -> Result<usize, ResolveError> {
        let labels: Vec<String> = candidates
            .iter()
            .map(|artist| {
                format!(
                    "{} ({} followers)",
                    artist.name,
                    group_thousands(artist.followers.total)
                )
            })
            .collect();

        Select::new()
            .with_prompt("Multiple artists found with similar names. Select artist")
            .items(&labels)
            .default(0)
            .interact()
            .map(|index| index + 1)
            .map_err(|error| ResolveError::SelectionAborted(error.to_string()))
    }
}

pub fn ask_artist() -> Result<String> {
    Input::<String>::new()
        .with_prompt("Enter artist name or Spotify artist URL")
        .interact_text()
        .context("Failed to read artist input")
}

/// Yes/no question; an unreadable terminal counts as "no".
pub fn confirm(prompt: &str) -> bool {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .unwrap_or_else(|error| {
            warn!(target: "cli", %error, "prompt failed, assuming no");
            false
        })
}

/// Keyword for the song search, if the user wants one.
pub fn ask_keyword() -> Option<String> {
    if !confirm("Search for a specific song?") {
        return None;
    }

    Input::<String>::new()
        .with_prompt("Enter keyword")
        .interact_text()
        .map_err(|error| warn!(target: "cli", %error, "failed to read keyword"))
        .ok()
}
