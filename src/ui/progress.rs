use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Progress bar for a running sync, drawn on stderr so stdout stays document-only.
pub struct ProgressReporter {
    sync_progress: Option<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            sync_progress: None,
            enabled,
        }
    }

    /// Enabled only when stderr is an interactive terminal
    pub fn for_terminal(requested: bool) -> Self {
        Self::new(requested && atty::is(atty::Stream::Stderr))
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn start_sync(&mut self, total_documents: usize) {
        if !self.enabled {
            return;
        }

        let pb = ProgressBar::with_draw_target(
            Some(total_documents as u64),
            ProgressDrawTarget::stderr(),
        );
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} tldrs pulled {msg}",
        ) {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.enable_steady_tick(Duration::from_millis(120));
        self.sync_progress = Some(pb);
    }

    pub fn update_sync_progress(&self, current: usize, name: &str) {
        if let Some(ref pb) = self.sync_progress {
            pb.set_position(current as u64);
            pb.set_message(name.to_string());
        }
    }

    pub fn finish_and_clear(&self) {
        if let Some(ref pb) = self.sync_progress {
            pb.finish_and_clear();
        }
    }

    pub fn log_warning(&self, message: &str) {
        if let Some(ref pb) = self.sync_progress {
            pb.println(format!("⚠ {message}"));
        }
    }
}
