//! Timing helpers for the ingestion and query phases.

use std::time::Instant;

/// RAII timer that logs elapsed wall time on drop.
///
/// # Example
/// ```ignore
/// let _t = Timed::start("index");
/// // ... do work ...
/// // logs "index: 12.3ms" when _t is dropped
/// ```
pub struct Timed {
    label: &'static str,
    start: Instant,
}

impl Timed {
    /// Starts a timer that reports at info level when dropped.
    pub fn start(label: &'static str) -> Self {
        log::debug!("{label}...");
        Self {
            label,
            start: Instant::now(),
        }
    }
}

impl Drop for Timed {
    fn drop(&mut self) {
        log::info!(
            "{}: {:.1}ms",
            self.label,
            self.start.elapsed().as_secs_f64() * 1000.0
        );
    }
}
