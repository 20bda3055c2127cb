// SPDX-License-Identifier: GPL-3.0-or-later
use std::collections::HashSet;

use discographer_domain::Release;
use tracing::debug;

/// Releases keyed by exact name, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniqueReleases {
    releases: Vec<Release>,
    names: HashSet<String>,
}

impl UniqueReleases {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `release` unless one with the same name is already present.
    /// Returns whether it was kept.
    pub fn insert(&mut self, release: Release) -> bool {
        if self.names.contains(&release.name) {
            debug!(target: "dedup", name = %release.name, id = %release.id, "dropping duplicate release");
            return false;
        }

        self.names.insert(release.name.clone());
        self.releases.push(release);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Release> {
        self.releases.iter()
    }

    pub fn as_slice(&self) -> &[Release] {
        &self.releases
    }

    pub fn into_vec(self) -> Vec<Release> {
        self.releases
    }
}

impl FromIterator<Release> for UniqueReleases {
    fn from_iter<I: IntoIterator<Item = Release>>(iter: I) -> Self {
        let mut unique = Self::new();
        for release in iter {
            unique.insert(release);
        }
        unique
    }
}

impl IntoIterator for UniqueReleases {
    type Item = Release;
    type IntoIter = std::vec::IntoIter<Release>;

    fn into_iter(self) -> Self::IntoIter {
        self.releases.into_iter()
    }
}

impl<'a> IntoIterator for &'a UniqueReleases {
    type Item = &'a Release;
    type IntoIter = std::slice::Iter<'a, Release>;

    fn into_iter(self) -> Self::IntoIter {
        self.releases.iter()
    }
}

/// Keep the first release seen for every distinct (case-sensitive) name.
pub fn deduplicate_releases(releases: impl IntoIterator<Item = Release>) -> UniqueReleases {
    releases.into_iter().collect()
}
