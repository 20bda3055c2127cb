// SPDX-License-Identifier: GPL-3.0-or-later
//! Plain-text rendering of the artist header, statistics, track table and
//! search results.

use discographer_application::{DiscographyStats, TOP_YEARS_LIMIT};
use discographer_catalog::CatalogArtist;
use discographer_domain::TrackRecord;
use std::io::{self, Write};

const MAX_GENRES: usize = 3;
const TITLE_WIDTH: usize = 35;
const ALBUM_WIDTH: usize = 30;
const RULE_WIDTH: usize = 105;

pub fn write_artist_header<W: Write>(out: &mut W, artist: &CatalogArtist) -> io::Result<()> {
    writeln!(out, "\nArtist selected: {}", artist.name)?;
    writeln!(out, "• Followers: {}", group_thousands(artist.followers.total))?;

    let genres = if artist.genres.is_empty() {
        "No genres available".to_string()
    } else {
        artist
            .genres
            .iter()
            .take(MAX_GENRES)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };
    writeln!(out, "• Genres: {genres}")?;
    writeln!(out, "• Link: {}", artist.url().unwrap_or("unavailable"))
}

pub fn write_stats<W: Write>(out: &mut W, stats: &DiscographyStats) -> io::Result<()> {
    writeln!(out, "\n{}", "=".repeat(50))?;
    writeln!(out, "DISCOGRAPHY STATISTICS")?;
    writeln!(out, "{}", "=".repeat(50))?;
    writeln!(out, "• Total Songs: {}", stats.total_songs)?;
    match stats.year_range {
        Some(range) => writeln!(out, "• Year Range: {} - {}", range.min, range.max)?,
        None => writeln!(out, "• Year Range: unavailable")?,
    }
    writeln!(out, "• Total Duration: {} minutes", stats.total_duration_minutes)?;

    if !stats.top_years.is_empty() {
        writeln!(out, "\nTop {TOP_YEARS_LIMIT} Most Productive Years:")?;
        for (year, count) in &stats.top_years {
            writeln!(out, "   {year}: {count} songs")?;
        }
    }

    if !stats.type_distribution.is_empty() {
        writeln!(out, "\nRelease Type Distribution:")?;
        for (release_type, count) in &stats.type_distribution {
            writeln!(out, "   {}: {count} songs", release_type.label())?;
        }
    }
    Ok(())
}

pub fn write_track_table<W: Write>(out: &mut W, tracks: &[TrackRecord]) -> io::Result<()> {
    writeln!(out, "\n{}", "=".repeat(RULE_WIDTH))?;
    writeln!(
        out,
        "{:>4}  {:<TITLE_WIDTH$}  {:<ALBUM_WIDTH$}  {:^6}  {:^8}  {:<11}",
        "No", "Track Title", "Album", "Year", "Duration", "Type"
    )?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

    for (index, record) in tracks.iter().enumerate() {
        writeln!(
            out,
            "{:>4}  {:<TITLE_WIDTH$}  {:<ALBUM_WIDTH$}  {:^6}  {:^8}  {:<11}",
            index + 1,
            truncate(&record.track, TITLE_WIDTH),
            truncate(&record.album, ALBUM_WIDTH),
            record.year,
            record.duration,
            record.release_type.label()
        )?;
    }
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

pub fn write_search_results<W: Write>(
    out: &mut W,
    keyword: &str,
    found: &[&TrackRecord],
) -> io::Result<()> {
    if found.is_empty() {
        return writeln!(out, "\nNo songs found matching '{keyword}'");
    }

    writeln!(out, "\nFound {} songs:", found.len())?;
    for (index, record) in found.iter().enumerate() {
        writeln!(
            out,
            "{}. {} - {} ({})",
            index + 1,
            record.track,
            record.album,
            record.year
        )?;
        if !record.url.is_empty() {
            writeln!(out, "   {}", record.url)?;
        }
    }
    Ok(())
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// First `max` characters of `value`.
pub fn truncate(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}
