//! Progress reporting for the command-line run
//!
//! A single spinner whose message tracks the current pipeline stage.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Template shared by every spinner
pub const SPINNER_TEMPLATE: &str = "{spinner:.green} {elapsed_precise} {msg}";

/// Create a spinner for operations without a known length
///
/// Falls back to the default spinner style if the template is rejected.
#[must_use]
pub fn create_spinner(message: Option<&str>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template(SPINNER_TEMPLATE) {
        pb.set_style(style);
    }

    if let Some(msg) = message {
        pb.set_message(msg.to_string());
    }

    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Finish a spinner with an optional completion message
pub fn finish_progress_bar(pb: &ProgressBar, message: Option<&str>) {
    if let Some(msg) = message {
        pb.finish_with_message(msg.to_string());
    } else {
        pb.finish();
    }
}
