//! Progress display for a running crawl.
//!
//! A spinner while the application list downloads, then one bar over every
//! pending ID with running valid / invalid counts.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

pub(crate) struct CrawlProgress {
    bar: ProgressBar,
    valid: usize,
    rejected: usize,
    abandoned: usize,
}

impl CrawlProgress {
    /// When `quiet` is true, nothing is drawn.
    pub(crate) fn new(quiet: bool) -> Self {
        let bar = ProgressBar::new_spinner();
        if quiet {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        bar.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                .expect("static pattern")
                .tick_chars("/-\\|"),
        );
        Self {
            bar,
            valid: 0,
            rejected: 0,
            abandoned: 0,
        }
    }

    pub(crate) fn listing(&self) {
        self.bar.enable_steady_tick(std::time::Duration::from_millis(100));
        self.bar.set_message("Fetching the Steam app list...");
    }

    /// Switch from the spinner to a bar over `pending` IDs.
    pub(crate) fn start(&self, pending: usize) {
        self.bar.disable_steady_tick();
        self.bar.set_length(pending as u64);
        self.bar.set_position(0);
        self.bar.set_style(
            ProgressStyle::with_template(
                "  {bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}<{eta_precise}] {msg}",
            )
            .expect("static pattern")
            .progress_chars("=> "),
        );
        self.refresh();
    }

    pub(crate) fn batch(&self, batch: usize, batches: usize) {
        self.bar.set_prefix(format!("batch {}/{}", batch + 1, batches));
        self.refresh();
    }

    pub(crate) fn finished(&mut self, outcome: steamdex_lib::OutcomeKind) {
        match outcome {
            steamdex_lib::OutcomeKind::Valid => self.valid += 1,
            steamdex_lib::OutcomeKind::Rejected => self.rejected += 1,
            steamdex_lib::OutcomeKind::Abandoned => self.abandoned += 1,
        }
        self.bar.inc(1);
        self.refresh();
    }

    /// Print a line without tearing the bar.
    pub(crate) fn println(&self, f: impl FnOnce()) {
        self.bar.suspend(f);
    }

    pub(crate) fn clear(&self) {
        self.bar.finish_and_clear();
    }

    fn refresh(&self) {
        let mut msg = format!("{} valid, {} invalid", self.valid, self.rejected);
        if self.abandoned > 0 {
            msg.push_str(&format!(", {} abandoned", self.abandoned));
        }
        let prefix = self.bar.prefix();
        if prefix.is_empty() {
            self.bar.set_message(msg);
        } else {
            self.bar.set_message(format!("{} ({})", msg, prefix));
        }
    }
}
