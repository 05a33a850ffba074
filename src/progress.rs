//! Progress reporting utilities

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinners for the loading and comparison phases
#[derive(Debug)]
pub struct ProgressReporter {
    pub load_pb: Option<ProgressBar>,
    pub compare_pb: Option<ProgressBar>,
    show_progress: bool,
}

impl ProgressReporter {
    /// Create progress reporter for a comparison run
    pub fn new_for_compare() -> Self {
        Self {
            load_pb: Some(create_spinner("Loading tables...")),
            compare_pb: None,
            show_progress: true,
        }
    }

    /// Create minimal progress reporter (no progress bars)
    pub fn new_minimal() -> Self {
        Self {
            load_pb: None,
            compare_pb: None,
            show_progress: false,
        }
    }

    /// Finish loading and start the comparison spinner
    pub fn finish_loading(&mut self, message: &str) {
        if let Some(pb) = self.load_pb.take() {
            pb.finish_with_message(message.to_string());
        }
        if self.show_progress && self.compare_pb.is_none() {
            self.compare_pb = Some(create_spinner("Comparing columns..."));
        }
    }

    pub fn finish_compare(&mut self, message: &str) {
        if let Some(pb) = self.compare_pb.take() {
            pb.finish_with_message(message.to_string());
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(pb) = self.load_pb.take() {
            pb.finish_and_clear();
        }
        if let Some(pb) = self.compare_pb.take() {
            pb.finish_and_clear();
        }
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.green} {msg}")
            .expect("Invalid progress template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
