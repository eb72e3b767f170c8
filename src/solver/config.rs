use crate::CONVERGENCE_THRESHOLD;
use crate::EXPLOITABILITY_INTERVAL;
use crate::HORIZON;
use crate::RESPONSE_WORLDS;
use crate::Utility;
use crate::WORLD_COUNT;
use crate::cfr::Convergence;

/// Solver parameters that are fixed for the life of a process.
///
/// Defaults come from the crate constants; the server binary overrides
/// them from the command line. Budgets vary per request and live in
/// [`Budget`](crate::cfr::Budget) instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// exploitability, in pots, below which a solve stops early
    pub threshold: Utility,
    /// iterations between exploitability checkpoints
    pub interval: usize,
    /// streets spanned before frontier valuation
    pub horizon: usize,
    /// chance worlds dealt per solve
    pub worlds: usize,
    /// worlds the best response averages over
    pub samples: usize,
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: CONVERGENCE_THRESHOLD,
            interval: EXPLOITABILITY_INTERVAL,
            horizon: HORIZON,
            worlds: WORLD_COUNT,
            samples: RESPONSE_WORLDS,
            seed: 0,
        }
    }
}

impl Config {
    pub fn convergence(&self) -> Convergence {
        Convergence {
            threshold: self.threshold,
            interval: self.interval,
            worlds: self.samples,
        }
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "threshold {} interval {} horizon {} worlds {} samples {} seed {}",
            self.threshold, self.interval, self.horizon, self.worlds, self.samples, self.seed
        )
    }
}
