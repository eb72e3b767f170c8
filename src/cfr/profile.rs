use super::info::CfrInfo;
use super::policy::PolicySchedule;
use super::regret::RegretSchedule;
use crate::MENU_CAPACITY;
use crate::POLICY_MIN;
use crate::Probability;
use crate::Utility;
use std::collections::BTreeMap;
use std::collections::HashMap;

/// Regret matching: play in proportion to positive regret,
/// or uniformly when no action has positive regret.
pub fn regret_matching(regrets: &[Utility]) -> Vec<Probability> {
    let positive = regrets.iter().map(|r| r.max(0.0)).collect::<Vec<_>>();
    let sum = positive.iter().sum::<Utility>();
    match sum > POLICY_MIN {
        true => positive.into_iter().map(|r| r / sum).collect(),
        false => uniform(regrets.len()),
    }
}

/// Normalize accumulated weights, falling back to uniform without mass.
pub fn normalize(weights: &[Probability]) -> Vec<Probability> {
    let sum = weights.iter().map(|w| w.max(0.0)).sum::<Probability>();
    match sum > POLICY_MIN {
        true => weights.iter().map(|w| w.max(0.0) / sum).collect(),
        false => uniform(weights.len()),
    }
}

pub fn uniform(width: usize) -> Vec<Probability> {
    vec![1.0 / width.max(1) as Probability; width]
}

/// Accumulators for one information set, one scalar per menu slot.
#[derive(Debug, Clone, Copy)]
struct Memory {
    regret: [Utility; MENU_CAPACITY],
    policy: [Probability; MENU_CAPACITY],
    width: usize,
}

impl Memory {
    fn new(width: usize) -> Self {
        Self {
            regret: [0.0; MENU_CAPACITY],
            policy: [0.0; MENU_CAPACITY],
            width: width.min(MENU_CAPACITY),
        }
    }
    fn current(&self) -> Vec<Probability> {
        regret_matching(&self.regret[..self.width])
    }
    fn average(&self) -> Vec<Probability> {
        normalize(&self.policy[..self.width])
    }
}

/// The mutable regret and strategy-sum tables of a single trainer.
///
/// Information sets are created lazily with zero regret. A table is never
/// shared; once training stops it is frozen into a [`StrategyProfile`].
#[derive(Debug)]
pub struct Profile<I: CfrInfo> {
    table: HashMap<I, Memory>,
}

impl<I: CfrInfo> Default for Profile<I> {
    fn default() -> Self {
        Self {
            table: HashMap::new(),
        }
    }
}

impl<I: CfrInfo> Profile<I> {
    pub fn len(&self) -> usize {
        self.table.len()
    }
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
    /// current strategy by regret matching
    pub fn current(&self, info: &I, width: usize) -> Vec<Probability> {
        self.table
            .get(info)
            .map(Memory::current)
            .unwrap_or_else(|| uniform(width))
    }
    /// long-run average strategy
    pub fn average(&self, info: &I, width: usize) -> Vec<Probability> {
        self.table
            .get(info)
            .map(Memory::average)
            .unwrap_or_else(|| uniform(width))
    }
    pub fn regret<R: RegretSchedule>(
        &mut self,
        info: &I,
        width: usize,
        slot: usize,
        gain: Utility,
        epoch: usize,
    ) {
        let memory = self.table.entry(*info).or_insert_with(|| Memory::new(width));
        if let Some(regret) = memory.regret.get_mut(slot) {
            *regret = R::gain(*regret, gain, epoch);
        }
    }
    pub fn policy<P: PolicySchedule>(&mut self, info: &I, strategy: &[Probability], epoch: usize) {
        let memory = self
            .table
            .entry(*info)
            .or_insert_with(|| Memory::new(strategy.len()));
        for (sum, p) in memory.policy.iter_mut().zip(strategy) {
            *sum = P::learn(*sum, *p, epoch);
        }
    }
    pub fn freeze(&self) -> StrategyProfile<I> {
        StrategyProfile(
            self.table
                .iter()
                .map(|(info, memory)| (*info, memory.average()))
                .collect(),
        )
    }
}

/// Average strategies of a finished solve, ordered by information set.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyProfile<I: CfrInfo>(BTreeMap<I, Vec<Probability>>);

impl<I: CfrInfo> Default for StrategyProfile<I> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<I: CfrInfo> StrategyProfile<I> {
    pub fn get(&self, info: &I) -> Option<&[Probability]> {
        self.0.get(info).map(Vec::as_slice)
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&I, &Vec<Probability>)> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfr::ConstantPolicy;
    use crate::cfr::SummedRegret;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    struct Key(u8);
    impl CfrInfo for Key {}

    #[test]
    fn nonpositive_regret_is_uniform() {
        assert_eq!(regret_matching(&[-1.0, 0.0, -5.0, 0.0]), vec![0.25; 4]);
    }

    #[test]
    fn positive_regret_is_proportional() {
        assert_eq!(regret_matching(&[3.0, -2.0, 1.0]), vec![0.75, 0.0, 0.25]);
    }

    #[test]
    fn unseen_info_is_uniform() {
        let profile = Profile::<Key>::default();
        assert_eq!(profile.current(&Key(0), 2), vec![0.5, 0.5]);
        assert_eq!(profile.average(&Key(0), 4), vec![0.25; 4]);
    }

    #[test]
    fn average_follows_sums() {
        let mut profile = Profile::<Key>::default();
        profile.policy::<ConstantPolicy>(&Key(1), &[1.0, 0.0], 0);
        profile.policy::<ConstantPolicy>(&Key(1), &[0.0, 1.0], 1);
        profile.policy::<ConstantPolicy>(&Key(1), &[1.0, 0.0], 2);
        let average = profile.average(&Key(1), 2);
        assert!((average[0] - 2.0 / 3.0).abs() < 1e-6);
        profile.regret::<SummedRegret>(&Key(1), 2, 1, 4.0, 3);
        assert_eq!(profile.current(&Key(1), 2), vec![0.0, 1.0]);
        assert_eq!(profile.freeze().len(), 1);
    }
}
