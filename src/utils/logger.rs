use crossterm::style::{Attribute, Color, ResetColor, SetAttribute, SetForegroundColor};
use std::fmt::Write;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogLevel {
    Success,
    Error,
    Info,
    Warning,
    Debug,
}

/// Status lines for humans. Everything goes to stderr; stdout is reserved for
/// the value handed to the pipeline.
#[derive(Debug, Clone, Default)]
pub struct Logger;

impl Logger {
    pub fn new() -> Self {
        Logger
    }

    pub fn set_verbose(verbose: bool) {
        VERBOSE.store(verbose, Ordering::Relaxed);
    }

    fn enabled(level: LogLevel) -> bool {
        level != LogLevel::Debug || VERBOSE.load(Ordering::Relaxed)
    }

    pub fn log_message(&self, level: LogLevel, message: &str) {
        if !Self::enabled(level) {
            return;
        }
        eprintln!(
            "{} {} {}",
            self.tool_signature(),
            self.format_status(level),
            message
        );
    }

    pub fn log_message_with_trace(&self, level: LogLevel, message: &str, trace: Vec<&str>) {
        if !Self::enabled(level) {
            return;
        }
        self.log_message(level, message);
        for t in trace {
            eprintln!("     ↳ {}", t);
        }
    }

    fn tool_signature(&self) -> String {
        let mut s = String::new();

        let _ = write!(&mut s, "{}", SetForegroundColor(Color::Grey));
        s.push('[');
        let _ = write!(
            &mut s,
            "{}",
            SetForegroundColor(Color::Rgb {
                r: 29,
                g: 211,
                b: 176,
            })
        );
        let _ = write!(&mut s, "{}", SetAttribute(Attribute::Bold));
        s.push_str("plistbump");
        let _ = write!(&mut s, "{}", SetAttribute(Attribute::Reset));
        let _ = write!(&mut s, "{}", SetForegroundColor(Color::Grey));
        s.push(']');
        let _ = write!(&mut s, "{}", ResetColor);

        s
    }

    fn format_status(&self, level: LogLevel) -> String {
        let mut s = String::new();

        let color = match level {
            LogLevel::Success => Color::Rgb {
                r: 76,
                g: 175,
                b: 80,
            },
            LogLevel::Error => Color::Rgb {
                r: 244,
                g: 67,
                b: 54,
            },
            LogLevel::Info => Color::Rgb {
                r: 33,
                g: 150,
                b: 243,
            },
            LogLevel::Warning => Color::Rgb {
                r: 255,
                g: 152,
                b: 0,
            },
            LogLevel::Debug => Color::Rgb {
                r: 103,
                g: 58,
                b: 183,
            },
        };

        let status = match level {
            LogLevel::Success => "SUCCESS",
            LogLevel::Error => "ERROR",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Debug => "DEBUG",
        };

        s.push('[');
        let _ = write!(&mut s, "{}", SetForegroundColor(color));
        let _ = write!(&mut s, "{}", SetAttribute(Attribute::Bold));
        s.push_str(status);
        let _ = write!(&mut s, "{}", SetAttribute(Attribute::Reset));
        s.push(']');
        let _ = write!(&mut s, "{}", ResetColor);

        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_is_gated_on_verbosity() {
        assert!(Logger::enabled(LogLevel::Info));
        assert!(Logger::enabled(LogLevel::Error));
        Logger::set_verbose(false);
        assert!(!Logger::enabled(LogLevel::Debug));
        Logger::set_verbose(true);
        assert!(Logger::enabled(LogLevel::Debug));
        Logger::set_verbose(false);
    }

    #[test]
    fn status_tag_names_the_level() {
        let tag = Logger::new().format_status(LogLevel::Warning);
        assert!(tag.contains("WARNING"));
        assert!(tag.starts_with('['));
    }
}
