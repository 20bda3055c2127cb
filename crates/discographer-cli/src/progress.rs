// SPDX-License-Identifier: GPL-3.0-or-later
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const TEMPLATE: &str =
    "Fetching tracks [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} releases ({percent}%)";

/// Per-release progress of the track fetch, drawn on stderr.
pub struct FetchProgress {
    bar: ProgressBar,
}

impl FetchProgress {
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(None, target);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        Self { bar }
    }

    pub fn update(&self, done: usize, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(done as u64);
    }

    pub fn finish(&self) {
        self.bar.finish();
    }
}
