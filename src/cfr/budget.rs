use crate::MAX_ITERATIONS;
use crate::MAX_WALLCLOCK_MS;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::time::Duration;

/// Limits on a single solve, checked at iteration boundaries only.
///
/// Running out of budget is not a failure: the trainer stops and reports
/// whatever average strategy it has.
#[derive(Debug, Clone)]
pub struct Budget {
    iterations: usize,
    wallclock: Duration,
    cancel: Option<Arc<AtomicBool>>,
}

impl Budget {
    pub fn new(iterations: usize, wallclock: Duration) -> Self {
        Self {
            iterations: iterations.max(1),
            wallclock,
            cancel: None,
        }
    }
    /// an iteration cap with effectively no deadline
    pub fn iterations(iterations: usize) -> Self {
        Self::new(iterations, Duration::from_secs(60 * 60))
    }
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }
    /// What a cancelled solve actually delivered: the iterations it ran,
    /// with no wall clock to its credit.
    pub fn truncated(&self, iterations: usize) -> Self {
        Self {
            iterations: iterations.min(self.iterations).max(1),
            wallclock: Duration::ZERO,
            cancel: None,
        }
    }
    pub fn max_iterations(&self) -> usize {
        self.iterations
    }
    pub fn max_wallclock(&self) -> Duration {
        self.wallclock
    }
    pub fn cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map_or(false, |flag| flag.load(Ordering::Relaxed))
    }
    pub fn exhausted(&self, epochs: usize, elapsed: Duration) -> bool {
        epochs >= self.iterations || self.overrun(elapsed)
    }
    /// out of time or cancelled, regardless of iterations
    pub fn overrun(&self, elapsed: Duration) -> bool {
        elapsed >= self.wallclock || self.cancelled()
    }
    /// whether a result produced under self satisfies a request for other
    pub fn covers(&self, other: &Self) -> bool {
        self.iterations >= other.iterations && self.wallclock >= other.wallclock
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self::new(MAX_ITERATIONS, Duration::from_millis(MAX_WALLCLOCK_MS))
    }
}

impl std::fmt::Display for Budget {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} its / {}ms", self.iterations, self.wallclock.as_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_least_one_iteration() {
        assert_eq!(Budget::iterations(0).max_iterations(), 1);
    }

    #[test]
    fn cancel_flag_exhausts() {
        let flag = Arc::new(AtomicBool::new(false));
        let budget = Budget::iterations(100).with_cancel(flag.clone());
        assert!(!budget.exhausted(1, Duration::ZERO));
        flag.store(true, Ordering::Relaxed);
        assert!(budget.exhausted(1, Duration::ZERO));
    }

    #[test]
    fn truncation_covers_only_what_ran() {
        let budget = Budget::new(100, Duration::from_millis(100)).truncated(7);
        assert_eq!(budget.max_iterations(), 7);
        assert!(!budget.covers(&Budget::new(7, Duration::from_millis(1))));
        assert!(budget.covers(&Budget::new(7, Duration::ZERO)));
    }

    #[test]
    fn coverage() {
        let small = Budget::new(10, Duration::from_millis(100));
        let large = Budget::new(100, Duration::from_millis(100));
        assert!(large.covers(&small));
        assert!(!small.covers(&large));
    }
}
