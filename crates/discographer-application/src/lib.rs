// SPDX-License-Identifier: GPL-3.0-or-later
pub mod aggregate;
pub mod dedup;
pub mod export;
pub mod pager;
pub mod resolve;
pub mod retry;
pub mod search;
pub mod service;
pub mod stats;
#[cfg(test)]
mod test_support;

pub use aggregate::{aggregate_tracks, AggregateOptions};
pub use dedup::{deduplicate_releases, UniqueReleases};
pub use export::{export_tracks, ExportError};
pub use resolve::{ArtistInput, ArtistSelector, FirstCandidate, ResolveError};
pub use retry::{RetryPolicy, Sleeper, TokioSleeper};
pub use search::search_tracks;
pub use service::{Discography, DiscographyService};
pub use stats::{DiscographyStats, YearRange, TOP_YEARS_LIMIT};
