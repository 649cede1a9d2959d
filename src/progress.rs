//! Progress reporting utilities using indicatif.
//!
//! This module provides the [`Progress`] struct which implements [`ProgressCallback`]
//! to display a progress bar on stderr while archives are scanned.

use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress callback for check phases.
///
/// Implement this trait to receive progress updates while a check runs.
pub trait ProgressCallback: Send + Sync {
    /// Called when a phase starts.
    ///
    /// # Arguments
    ///
    /// * `phase` - Name of the phase (e.g., "scan")
    /// * `total` - Total number of items to process
    fn on_phase_start(&self, phase: &str, total: usize);

    /// Called when an item starts being processed.
    ///
    /// # Arguments
    ///
    /// * `current` - Current item number (1-based)
    /// * `name` - Name of the item being processed
    fn on_progress(&self, current: usize, name: &str);

    /// Called when a phase completes.
    fn on_phase_end(&self, phase: &str);
}

/// Progress reporter using indicatif.
///
/// Only created when the bar should be drawn; quiet and JSON runs pass no
/// callback at all.
#[derive(Default)]
pub struct Progress {
    bar: Mutex<Option<ProgressBar>>,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// # Examples
    ///
    /// ```
    /// use jarclash::progress::Progress;
    ///
    /// let progress = Progress::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} archives {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█>-")
    }

    fn with_bar(&self, f: impl FnOnce(&mut Option<ProgressBar>)) {
        // Keep drawing after a poisoned lock
        let mut guard = match self.bar.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut *guard);
    }
}

impl ProgressCallback for Progress {
    fn on_phase_start(&self, phase: &str, total: usize) {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(Self::style());
        pb.set_message(phase.to_string());
        self.with_bar(|bar| *bar = Some(pb));
    }

    fn on_progress(&self, current: usize, name: &str) {
        self.with_bar(|bar| {
            if let Some(pb) = bar {
                pb.set_position(current as u64);
                pb.set_message(truncate_name(name, 30));
            }
        });
    }

    fn on_phase_end(&self, phase: &str) {
        self.with_bar(|bar| {
            if let Some(pb) = bar.take() {
                pb.finish_and_clear();
                log::debug!("{phase} phase complete");
            }
        });
    }
}

/// Truncate an archive name for display in the progress bar.
fn truncate_name(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        return name.to_string();
    }

    let tail: String = name
        .chars()
        .rev()
        .take(max_len.saturating_sub(3))
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("...{tail}")
}
