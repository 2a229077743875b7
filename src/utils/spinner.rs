use crate::utils::logger::{LogLevel, Logger};
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::Cell;
use std::time::Duration;

pub struct Spinner {
    bar: ProgressBar,
    active: Cell<bool>,
}

impl Spinner {
    pub fn new(message: impl Into<String>) -> Self {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        bar.set_style(style);
        bar.set_message(message.into());
        bar.enable_steady_tick(Duration::from_millis(80));

        Spinner {
            bar,
            active: Cell::new(true),
        }
    }

    pub fn succeed(&self, message: impl Into<String>) {
        if self.active.get() {
            self.bar.finish_and_clear();
            Logger::new().log_message(LogLevel::Success, &message.into());
            self.active.set(false);
        }
    }

    pub fn finish_and_clear(&self) {
        if self.active.get() {
            self.bar.finish_and_clear();
            self.active.set(false);
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if self.active.get() {
            self.bar.abandon();
            self.active.set(false);
        }
    }
}

/// Runs `action` behind a spinner. Success resolves to a log line; an error only
/// clears the spinner and is left for the caller to report.
pub fn run_step<T, E, F, S>(start_message: &str, on_success: S, action: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
    S: FnOnce(&T) -> String,
{
    let spinner = Spinner::new(start_message);
    match action() {
        Ok(value) => {
            spinner.succeed(on_success(&value));
            Ok(value)
        }
        Err(err) => {
            spinner.finish_and_clear();
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_through_value_and_error() {
        let ok: Result<u32, String> = run_step("working", |v| format!("got {}", v), || Ok(7));
        assert_eq!(ok, Ok(7));

        let err: Result<u32, String> =
            run_step("working", |_| unreachable!(), || Err("boom".to_string()));
        assert_eq!(err, Err("boom".to_string()));
    }

    #[test]
    fn spinner_settles_once() {
        let spinner = Spinner::new("working");
        spinner.finish_and_clear();
        assert!(!spinner.active.get());
        spinner.succeed("ignored once settled");
        assert!(!spinner.active.get());
    }
}
