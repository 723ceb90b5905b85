//! Progress reporting over the feature loop.

use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str = "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} ({eta}) {msg}";

/// A bar of `len` steps, or a hidden one when `enabled` is false.
pub fn feature_progress(len: usize, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(len as u64);
    match ProgressStyle::default_bar().template(TEMPLATE) {
        Ok(style) => bar.set_style(style.progress_chars("##-")),
        Err(e) => tracing::debug!(error = %e, "Invalid progress template, using default"),
    }
    bar.set_message("Matching features");
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_bar_still_counts() {
        let bar = feature_progress(3, false);
        bar.inc(2);
        assert_eq!(bar.position(), 2);
        assert!(bar.is_hidden());
    }
}
