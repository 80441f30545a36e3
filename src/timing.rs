//! Wall-clock timing around arbitrary operations

use std::time::{Duration, Instant};
use tracing::debug;

/// Run `op` and report its elapsed wall-clock time to `sink`.
///
/// The operation's return value passes through untouched, so existing call
/// sites can be wrapped without restructuring.
pub fn timed<T>(op: impl FnOnce() -> T, sink: impl FnOnce(Duration)) -> T {
    let start = Instant::now();
    let out = op();
    sink(start.elapsed());
    out
}

/// Guard that logs the elapsed time of its enclosing scope when dropped.
pub struct ScopedTimer {
    label: String,
    start: Instant,
}

impl ScopedTimer {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            start: Instant::now(),
        }
    }

    /// Elapsed time so far, without ending the scope.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        debug!(
            "{} took {:.3}ms",
            self.label,
            self.start.elapsed().as_secs_f64() * 1000.0
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timed_passes_value_through() {
        let mut reported = None;
        let out = timed(|| 40 + 2, |elapsed| reported = Some(elapsed));
        assert_eq!(out, 42);
        assert!(reported.is_some());
    }

    #[test]
    fn test_timed_measures_the_operation() {
        let mut reported = Duration::ZERO;
        timed(
            || std::thread::sleep(Duration::from_millis(10)),
            |elapsed| reported = elapsed,
        );
        assert!(reported >= Duration::from_millis(10));
    }

    #[test]
    fn test_scoped_timer_elapsed_is_monotonic() {
        let timer = ScopedTimer::new("scope");
        let first = timer.elapsed();
        std::thread::sleep(Duration::from_millis(1));
        assert!(timer.elapsed() >= first);
    }
}
