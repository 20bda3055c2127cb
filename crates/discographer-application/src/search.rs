// SPDX-License-Identifier: GPL-3.0-or-later
use discographer_domain::TrackRecord;

/// Tracks whose title contains `keyword`, ignoring case, in list order.
/// The keyword is matched as typed, surrounding spaces included.
pub fn search_tracks<'a>(records: &'a [TrackRecord], keyword: &str) -> Vec<&'a TrackRecord> {
    let keyword = keyword.to_lowercase();
    records
        .iter()
        .filter(|record| record.track.to_lowercase().contains(&keyword))
        .collect()
}
