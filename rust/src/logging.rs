//! Logging macros with verbosity level control.
//!
//! Nothing is emitted when verbosity is 0. Events go to `tracing`, so the
//! embedding application decides where they end up.
//! - 0: SILENT
//! - 1: CHANGES (pool refills)
//! - 2: CHECKS (new index assignments)
//! - 3: DEBUG (index normalization)

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_CHANGES: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at CHANGES level (verbosity >= 1).
///
/// Used for: pool refills.
#[macro_export]
macro_rules! log_changes {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHANGES {
            ::tracing::info!($($arg)*);
        }
    };
}

/// Log at CHECKS level (verbosity >= 2).
///
/// Used for: first-time assignment of a token to an index.
#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHECKS {
            ::tracing::debug!($($arg)*);
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
///
/// Used for: index normalization details.
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            ::tracing::trace!($($arg)*);
        }
    };
}

/// Run `f` under a scoped subscriber and return everything it logged.
#[cfg(test)]
pub(crate) fn capture_events<F: FnOnce()>(f: F) -> String {
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let buffer = Buffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .without_time()
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);

    let bytes = buffer.0.lock().unwrap().clone();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_constants() {
        assert_eq!(VERBOSITY_SILENT, 0);
        assert_eq!(VERBOSITY_CHANGES, 1);
        assert_eq!(VERBOSITY_CHECKS, 2);
        assert_eq!(VERBOSITY_DEBUG, 3);
    }

    #[test]
    fn test_log_macros_compile() {
        for verbosity in [VERBOSITY_SILENT, VERBOSITY_DEBUG] {
            log_changes!(verbosity, "refill {}", 1);
            log_checks!(verbosity, "assign {}", 2);
            log_debug!(verbosity, "normalize {}", 3);
        }
    }

    #[test]
    fn test_silent_emits_nothing() {
        let output = capture_events(|| {
            log_changes!(VERBOSITY_SILENT, "silent changes");
            log_checks!(VERBOSITY_SILENT, "silent checks");
            log_debug!(VERBOSITY_SILENT, "silent debug");
        });
        assert!(output.is_empty(), "{output}");
    }

    #[test]
    fn test_each_level_gates_its_macro() {
        let output = capture_events(|| {
            log_changes!(VERBOSITY_CHANGES, "changes at changes");
            log_checks!(VERBOSITY_CHANGES, "checks at changes");
            log_checks!(VERBOSITY_CHECKS, "checks at checks");
            log_debug!(VERBOSITY_CHECKS, "debug at checks");
            log_debug!(VERBOSITY_DEBUG, "debug at debug");
        });
        assert!(output.contains("changes at changes"), "{output}");
        assert!(output.contains("checks at checks"), "{output}");
        assert!(output.contains("debug at debug"), "{output}");
        assert!(!output.contains("checks at changes"), "{output}");
        assert!(!output.contains("debug at checks"), "{output}");
    }

    #[test]
    fn test_levels_map_to_tracing_levels() {
        let output = capture_events(|| {
            log_changes!(VERBOSITY_DEBUG, "refill");
            log_checks!(VERBOSITY_DEBUG, "assign");
            log_debug!(VERBOSITY_DEBUG, "normalize");
        });
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3, "{output}");
        assert!(lines[0].contains("INFO") && lines[0].contains("refill"));
        assert!(lines[1].contains("DEBUG") && lines[1].contains("assign"));
        assert!(lines[2].contains("TRACE") && lines[2].contains("normalize"));
    }
}
