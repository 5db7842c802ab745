//! Progress display for uploads
//!
//! A byte-counting spinner on stderr. indicatif hides it when stderr is
//! not a terminal, so piped invocations stay quiet.

/// Spinner wrapper used by streaming uploads
#[derive(Debug)]
pub struct Progress {
    bar: Option<indicatif::ProgressBar>,
}

impl Progress {
    /// Create a byte-counting spinner with the given message
    pub fn spinner(message: &str) -> Self {
        let bar = indicatif::ProgressBar::new_spinner();
        bar.set_style(
            indicatif::ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} {bytes}")
                .expect("valid template"),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    /// A progress handle that displays nothing
    pub fn hidden() -> Self {
        Self { bar: None }
    }

    /// Advance the byte counter
    pub fn inc(&self, delta: u64) {
        if let Some(bar) = &self.bar {
            bar.inc(delta);
        }
    }

    /// Remove the spinner from the terminal
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}
