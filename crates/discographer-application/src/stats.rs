// SPDX-License-Identifier: GPL-3.0-or-later
use std::collections::HashMap;
use std::hash::Hash;

use discographer_domain::{ReleaseType, TrackRecord};

/// Number of entries kept in [`DiscographyStats::top_years`].
pub const TOP_YEARS_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub min: u32,
    pub max: u32,
}

/// Descriptive statistics over a track list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscographyStats {
    pub total_songs: usize,
    /// `None` when no track carries a numeric year.
    pub year_range: Option<YearRange>,
    pub total_duration_minutes: u64,
    /// Most productive years, highest count first; ties keep first-seen order.
    pub top_years: Vec<(u32, usize)>,
    /// Track count per release type, in first-seen order.
    pub type_distribution: Vec<(ReleaseType, usize)>,
}

impl DiscographyStats {
    pub fn compute(records: &[TrackRecord]) -> Self {
        let years: Vec<u32> = records.iter().filter_map(TrackRecord::numeric_year).collect();

        let year_range = match (years.iter().min(), years.iter().max()) {
            (Some(&min), Some(&max)) => Some(YearRange { min, max }),
            _ => None,
        };

        let total_seconds: u64 = records
            .iter()
            .filter_map(TrackRecord::duration_seconds)
            .sum();

        let mut top_years = count_in_order(years);
        top_years.sort_by(|a, b| b.1.cmp(&a.1));
        top_years.truncate(TOP_YEARS_LIMIT);

        Self {
            total_songs: records.len(),
            year_range,
            total_duration_minutes: total_seconds / 60,
            top_years,
            type_distribution: count_in_order(records.iter().map(|record| record.release_type)),
        }
    }
}

/// Occurrence counts keyed in first-seen order.
fn count_in_order<K, I>(keys: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Copy,
    I: IntoIterator<Item = K>,
{
    let mut counts: Vec<(K, usize)> = Vec::new();
    let mut index: HashMap<K, usize> = HashMap::new();

    for key in keys {
        match index.get(&key) {
            Some(&position) => counts[position].1 += 1,
            None => {
                index.insert(key, counts.len());
                counts.push((key, 1));
            }
        }
    }

    counts
}
