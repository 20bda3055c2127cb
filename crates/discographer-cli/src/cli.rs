// SPDX-License-Identifier: GPL-3.0-or-later
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Fetch an artist's full discography from Spotify, summarise it and export it to CSV.
#[derive(Debug, Parser)]
#[command(name = "discographer", version)]
pub struct Cli {
    /// Artist name or Spotify artist URL (prompted for when omitted)
    pub artist: Option<String>,

    /// Export the track list to CSV without asking
    #[arg(long, conflicts_with = "no_export")]
    pub export: bool,

    /// Skip the CSV export question
    #[arg(long)]
    pub no_export: bool,

    /// Search the track list for KEYWORD after the report
    #[arg(long, value_name = "KEYWORD")]
    pub search: Option<String>,

    /// Never prompt: take the best search match and skip unanswered questions
    #[arg(long)]
    pub no_prompt: bool,

    /// Directory for CSV exports (overrides the configured one)
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, env = "DISCOGRAPHER_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Whether to export without prompting; `None` means ask.
    pub fn export_decision(&self) -> Option<bool> {
        if self.export {
            Some(true)
        } else if self.no_export || self.no_prompt {
            Some(false)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_non_interactive_run() {
        let cli = Cli::parse_from([
            "discographer",
            "https://open.spotify.com/artist/abc",
            "--export",
            "--search",
            "love",
            "--no-prompt",
            "-vv",
        ]);

        assert_eq!(cli.artist.as_deref(), Some("https://open.spotify.com/artist/abc"));
        assert_eq!(cli.export_decision(), Some(true));
        assert_eq!(cli.search.as_deref(), Some("love"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn export_decision_defaults_to_prompt() {
        let cli = Cli::parse_from(["discographer"]);
        assert_eq!(cli.export_decision(), None);

        let cli = Cli::parse_from(["discographer", "--no-prompt"]);
        assert_eq!(cli.export_decision(), Some(false));
    }

    #[test]
    fn export_flags_conflict() {
        assert!(Cli::try_parse_from(["discographer", "--export", "--no-export"]).is_err());
    }
}
