// SPDX-License-Identifier: GPL-3.0-or-later
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Release
// ============================================================================

/// Kind of release as reported by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseType {
    Album,
    Single,
    Compilation,
    AppearsOn,
}

impl ReleaseType {
    /// Every release group requested when listing an artist's discography.
    pub const ALL: [ReleaseType; 4] = [
        ReleaseType::Album,
        ReleaseType::Single,
        ReleaseType::Compilation,
        ReleaseType::AppearsOn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Album => "album",
            Self::Single => "single",
            Self::Compilation => "compilation",
            Self::AppearsOn => "appears_on",
        }
    }

    /// Parse a catalog release type, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "album" => Some(Self::Album),
            "single" => Some(Self::Single),
            "compilation" => Some(Self::Compilation),
            "appears_on" => Some(Self::AppearsOn),
            _ => None,
        }
    }

    /// Capitalised label used in reports ("Album", "Appears_on").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Album => "Album",
            Self::Single => "Single",
            Self::Compilation => "Compilation",
            Self::AppearsOn => "Appears_on",
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A release collected from an artist's paginated discography listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub id: String,
    /// Release title; also the deduplication key.
    pub name: String,
    /// Raw release date as delivered by the catalog (`YYYY`, `YYYY-MM` or `YYYY-MM-DD`).
    pub release_date: String,
    pub release_type: ReleaseType,
}

impl Release {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        release_date: impl Into<String>,
        release_type: ReleaseType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            release_date: release_date.into(),
            release_type,
        }
    }

    /// Year component of the release date. May be non-numeric when the catalog
    /// delivers an unexpected date.
    pub fn year(&self) -> &str {
        release_year(&self.release_date)
    }
}

/// Portion of a date string before the first `-` separator.
pub fn release_year(release_date: &str) -> &str {
    release_date
        .split('-')
        .next()
        .unwrap_or(release_date)
        .trim()
}

/// Parse a year field that consists only of ASCII digits.
pub fn parse_year(year: &str) -> Option<u32> {
    if year.is_empty() || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    year.parse().ok()
}

// ============================================================================
// TrackRecord
// ============================================================================

/// Flattened per-track row used for the report and the CSV export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub artist: String,
    pub track: String,
    pub album: String,
    /// Year text taken from the release date; not guaranteed to be numeric.
    pub year: String,
    pub release_type: ReleaseType,
    /// Display duration in `M:SS` form.
    pub duration: String,
    pub url: String,
}

impl TrackRecord {
    pub fn numeric_year(&self) -> Option<u32> {
        parse_year(&self.year)
    }

    /// Whole seconds recovered from the display duration.
    pub fn duration_seconds(&self) -> Option<u64> {
        parse_duration(&self.duration)
    }
}

// ============================================================================
// Durations
// ============================================================================

/// Convert a millisecond duration to `M:SS`, discarding sub-second remainder.
pub fn format_duration(duration_ms: u64) -> String {
    let minutes = duration_ms / 60_000;
    let seconds = (duration_ms % 60_000) / 1_000;
    format!("{}:{:02}", minutes, seconds)
}

/// Parse an `M:SS` display duration back into whole seconds.
pub fn parse_duration(display: &str) -> Option<u64> {
    let (minutes, seconds) = display.trim().split_once(':')?;
    let minutes: u64 = minutes.parse().ok()?;
    let seconds: u64 = seconds.parse().ok()?;
    Some(minutes * 60 + seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_type_parses_catalog_strings() {
        assert_eq!(ReleaseType::parse("album"), Some(ReleaseType::Album));
        assert_eq!(ReleaseType::parse(" Single "), Some(ReleaseType::Single));
        assert_eq!(
            ReleaseType::parse("APPEARS_ON"),
            Some(ReleaseType::AppearsOn)
        );
        assert_eq!(ReleaseType::parse("ep"), None);
    }

    #[test]
    fn release_type_labels_are_capitalised() {
        assert_eq!(ReleaseType::Compilation.label(), "Compilation");
        assert_eq!(ReleaseType::AppearsOn.label(), "Appears_on");
        assert_eq!(ReleaseType::AppearsOn.to_string(), "appears_on");
    }

    #[test]
    fn release_year_takes_leading_component() {
        let release = Release::new("1", "Album", "2021-05-10", ReleaseType::Album);
        assert_eq!(release.year(), "2021");
        assert_eq!(release_year("1997"), "1997");
        assert_eq!(release_year("unknown"), "unknown");
        assert_eq!(release_year(""), "");
    }

    #[test]
    fn parse_year_rejects_non_digits() {
        assert_eq!(parse_year("2021"), Some(2021));
        assert_eq!(parse_year("unknown"), None);
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("-202"), None);
    }

    #[test]
    fn format_duration_pads_seconds() {
        assert_eq!(format_duration(245_000), "4:05");
        assert_eq!(format_duration(59_999), "0:59");
        assert_eq!(format_duration(3_600_000), "60:00");
        assert_eq!(format_duration(0), "0:00");
    }

    #[test]
    fn duration_round_trip_floors_to_whole_seconds() {
        assert_eq!(parse_duration(&format_duration(245_000)), Some(245));
        assert_eq!(parse_duration(&format_duration(245_999)), Some(245));
        assert_eq!(parse_duration("nope"), None);
    }

    #[test]
    fn track_record_exposes_parsed_fields() {
        let record = TrackRecord {
            artist: "Artist".to_string(),
            track: "Song".to_string(),
            album: "Album".to_string(),
            year: "unknown".to_string(),
            release_type: ReleaseType::Single,
            duration: "3:30".to_string(),
            url: String::new(),
        };

        assert_eq!(record.numeric_year(), None);
        assert_eq!(record.duration_seconds(), Some(210));
    }
}
