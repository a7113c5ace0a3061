use indicatif::{HumanDuration, ProgressBar};
use std::time::{Duration, Instant};

/// Spinner shown while a slow operation runs. Hidden when stdout is not a terminal.
pub struct Spinner {
    pb: ProgressBar,
    started: Instant,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let pb = if console::Term::stdout().is_term() {
            let pb = ProgressBar::new_spinner();
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        } else {
            ProgressBar::hidden()
        };
        pb.set_message(message.to_string());
        Self {
            pb,
            started: Instant::now(),
        }
    }

    /// Finish and report how long the operation took
    pub fn finish_timed(&self, msg: &str) {
        let elapsed = HumanDuration(self.started.elapsed());
        self.pb.finish_with_message(format!("{} in {}", msg, elapsed));
    }

    pub fn clear(&self) {
        self.pb.finish_and_clear();
    }
}
