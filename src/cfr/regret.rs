//! Regret accumulation schedules.

use crate::REGRET_MIN;
use crate::Utility;

/// How immediate regret folds into accumulated regret.
pub trait RegretSchedule {
    fn gain(accumulated: Utility, immediate: Utility, epoch: usize) -> Utility;
}

/// Vanilla regret sums, floored at [`REGRET_MIN`] to bound storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummedRegret;

impl RegretSchedule for SummedRegret {
    fn gain(accumulated: Utility, immediate: Utility, _: usize) -> Utility {
        (accumulated + immediate).max(REGRET_MIN)
    }
}

/// CFR+ regret update strategy.
///
/// Floors regrets at zero after each update, so an action that turns
/// good again is picked up immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlooredRegret;

impl RegretSchedule for FlooredRegret {
    fn gain(accumulated: Utility, immediate: Utility, _: usize) -> Utility {
        (accumulated + immediate).max(0.0)
    }
}
