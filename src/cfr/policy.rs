//! Average strategy weighting schemes.

use crate::Probability;

/// How the current strategy folds into the average strategy.
pub trait PolicySchedule {
    fn learn(accumulated: Probability, immediate: Probability, epoch: usize) -> Probability;
}

/// All iterations are weighted equally.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantPolicy;

impl PolicySchedule for ConstantPolicy {
    fn learn(accumulated: Probability, immediate: Probability, _: usize) -> Probability {
        accumulated + immediate
    }
}

/// Iteration t is weighted by t, washing out the uniform early strategies.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearPolicy;

impl PolicySchedule for LinearPolicy {
    fn learn(accumulated: Probability, immediate: Probability, epoch: usize) -> Probability {
        accumulated + immediate * (epoch + 1) as Probability
    }
}
