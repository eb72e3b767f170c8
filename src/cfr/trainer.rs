use super::budget::Budget;
use super::encoder::Encoder;
use super::game::CfrGame;
use super::policy::LinearPolicy;
use super::policy::PolicySchedule;
use super::profile::Profile;
use super::profile::StrategyProfile;
use super::regret::RegretSchedule;
use super::regret::SummedRegret;
use super::response::Response;
use super::tree::Frame;
use super::tree::Tree;
use super::turn::Turn;
use crate::CONVERGENCE_THRESHOLD;
use crate::EXPLOITABILITY_INTERVAL;
use crate::Error;
use crate::POLICY_MIN;
use crate::Probability;
use crate::RESPONSE_WORLDS;
use crate::Result;
use crate::Utility;
use rand::Rng;
use rand::SeedableRng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::SmallRng;
use std::marker::PhantomData;
use std::time::Duration;
use std::time::Instant;

/// When and how a trainer checks whether it may stop early.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Convergence {
    /// exploitability, in units of the root's scale, that counts as solved
    pub threshold: Utility,
    /// iterations between checkpoints
    pub interval: usize,
    /// worlds the best response averages over
    pub worlds: usize,
}

impl Default for Convergence {
    fn default() -> Self {
        Self {
            threshold: CONVERGENCE_THRESHOLD,
            interval: EXPLOITABILITY_INTERVAL,
            worlds: RESPONSE_WORLDS,
        }
    }
}

/// Lifecycle of one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Initialized,
    Iterating,
    Converged,
    Exhausted,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Initialized => write!(f, "initialized"),
            Self::Iterating => write!(f, "iterating"),
            Self::Converged => write!(f, "converged"),
            Self::Exhausted => write!(f, "exhausted"),
        }
    }
}

/// What a finished solve reports about itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub epochs: usize,
    pub phase: Phase,
    pub exploitability: Option<Utility>,
    pub elapsed: Duration,
}

/// External-sampling Monte Carlo CFR over an encoder's world pool.
///
/// Each iteration draws one world and walks the tree once per player.
/// The walking player expands every action; everyone else samples one
/// action from their current strategy and has that strategy added to
/// their average. Traversal is iterative: the sampled tree is built into
/// an arena first and values are then backed up in reverse index order.
///
/// All randomness comes from a seeded rng, so two trainers built from the
/// same encoder, root and seed produce identical profiles when run for the
/// same number of iterations.
pub struct Trainer<N, R = SummedRegret, P = LinearPolicy>
where
    N: Encoder,
{
    encoder: N,
    root: N::G,
    profile: Profile<N::I>,
    rng: SmallRng,
    epochs: usize,
    phase: Phase,
    convergence: Convergence,
    schedule: PhantomData<(R, P)>,
}

impl<N, R, P> Trainer<N, R, P>
where
    N: Encoder,
    R: RegretSchedule,
    P: PolicySchedule,
{
    pub fn new(encoder: N, root: N::G, seed: u64, convergence: Convergence) -> Self {
        Self {
            encoder,
            root,
            profile: Profile::default(),
            rng: SmallRng::seed_from_u64(seed),
            epochs: 0,
            phase: Phase::Initialized,
            convergence,
            schedule: PhantomData,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn epochs(&self) -> usize {
        self.epochs
    }
    pub fn encoder(&self) -> &N {
        &self.encoder
    }
    pub fn root(&self) -> &N::G {
        &self.root
    }
    pub fn profile(&self) -> &Profile<N::I> {
        &self.profile
    }
    pub fn freeze(&self) -> StrategyProfile<N::I> {
        self.profile.freeze()
    }

    /// Iterate until converged or out of budget. At least one iteration
    /// always runs, and convergence is only tested at checkpoints.
    pub fn solve(&mut self, budget: &Budget) -> Result<Summary> {
        self.solve_since(budget, Instant::now())
    }

    /// As [`solve`](Self::solve), with the wall clock already running since
    /// `start` so that setup work is charged to the budget. The closing
    /// exploitability estimate is skipped once the budget is overrun.
    pub fn solve_since(&mut self, budget: &Budget, start: Instant) -> Result<Summary> {
        let interval = self.convergence.interval.max(2);
        let mut estimate = None;
        let mut checked = 0;
        self.phase = Phase::Iterating;
        loop {
            self.step()?;
            if self.epochs % interval == 0 {
                estimate = self.exploitability();
                checked = self.epochs;
                log::debug!(
                    "checkpoint {:>6} exploitability {}",
                    self.epochs,
                    estimate.map_or("n/a".to_string(), |x| format!("{:.5}", x))
                );
                if estimate.map_or(false, |x| x < self.convergence.threshold) {
                    self.phase = Phase::Converged;
                    break;
                }
            }
            if budget.exhausted(self.epochs, start.elapsed()) {
                self.phase = Phase::Exhausted;
                break;
            }
        }
        if checked != self.epochs && !budget.overrun(start.elapsed()) {
            estimate = self.exploitability();
        }
        Ok(Summary {
            epochs: self.epochs,
            phase: self.phase,
            exploitability: estimate,
            elapsed: start.elapsed(),
        })
    }

    /// One iteration: one world, one traversal per player.
    pub fn step(&mut self) -> Result<()> {
        let n = self.encoder.worlds().len();
        if n == 0 {
            return Err(Error::internal("empty world pool"));
        }
        let world = self.rng.random_range(0..n);
        for walker in 0..self.root.players() {
            self.traverse(walker, world)?;
        }
        self.epochs += 1;
        Ok(())
    }

    /// Best-response exploitability of the current average strategy over
    /// the leading worlds of the pool.
    pub fn exploitability(&self) -> Option<Utility> {
        let worlds = self.encoder.worlds();
        let worlds = &worlds[..self.convergence.worlds.min(worlds.len())];
        Response::new(&self.encoder, &self.profile, worlds).exploitability(&self.root)
    }

    fn traverse(&mut self, walker: usize, world: usize) -> Result<()> {
        let ref world = self.encoder.worlds()[world];
        let (mut tree, root) = Tree::<N::G, N::I>::new(self.root.clone());
        let mut todo = vec![root];
        while let Some(index) = todo.pop() {
            let game = tree.at(index).game.clone();
            let history = tree.at(index).history;
            match game.turn() {
                Turn::Terminal => {}
                Turn::Chance => {
                    let frame = Frame::new(game.reveal(world), history.reveal());
                    todo.push(tree.grow(index, 0, frame));
                }
                Turn::Choice(player) => {
                    let menu = game.menu();
                    let info = self.encoder.info(&game, world, &history);
                    let strategy = self.profile.current(&info, menu.len());
                    if player == walker {
                        for (slot, edge) in menu.iter().enumerate() {
                            let frame = Frame::new(game.apply(edge), history.push(&edge));
                            todo.push(tree.grow(index, slot, frame));
                        }
                    } else {
                        let slot = sample(&mut self.rng, &strategy)?;
                        let edge = menu
                            .get(slot)
                            .ok_or_else(|| {
                                Error::internal(format!("slot {} off menu {}", slot, menu.len()))
                            })?;
                        self.profile.policy::<P>(&info, &strategy, self.epochs);
                        let frame = Frame::new(game.apply(edge), history.push(&edge));
                        todo.push(tree.grow(index, slot, frame));
                    }
                    tree.annotate(index, info, strategy);
                }
            }
        }
        let mut values = vec![0.0 as Utility; tree.len()];
        let mut gains = Vec::new();
        for index in tree.indices().rev() {
            let frame = tree.at(index);
            let children = tree.children(index);
            let value = match frame.game.turn() {
                Turn::Terminal => frame.game.payoff(world, walker),
                Turn::Choice(player) if player == walker => {
                    let value = children
                        .iter()
                        .map(|&(slot, child)| frame.strategy[slot] * values[child.index()])
                        .sum::<Utility>();
                    if let Some(info) = frame.info {
                        for &(slot, child) in children.iter() {
                            let regret = values[child.index()] - value;
                            gains.push((info, frame.strategy.len(), slot, regret));
                        }
                    }
                    value
                }
                _ => children
                    .first()
                    .map(|&(_, child)| values[child.index()])
                    .unwrap_or_default(),
            };
            if !value.is_finite() {
                return Err(Error::internal(format!("non-finite utility at {:?}", frame.game)));
            }
            values[index.index()] = value;
        }
        for (info, width, slot, gain) in gains {
            self.profile.regret::<R>(&info, width, slot, gain, self.epochs);
        }
        Ok(())
    }
}

fn sample(rng: &mut SmallRng, strategy: &[Probability]) -> Result<usize> {
    WeightedIndex::new(strategy.iter().map(|p| p.max(POLICY_MIN)))
        .map(|distribution| distribution.sample(rng))
        .map_err(|e| Error::internal(format!("cannot sample {:?}: {}", strategy, e)))
}
