use crate::cfr::Budget;
use crate::solver::Fingerprint;
use crate::solver::SolveResult;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// A cached result and the budget it was solved under.
#[derive(Debug, Clone)]
pub struct Entry {
    pub result: Arc<SolveResult>,
    pub budget: Budget,
}

impl Entry {
    /// A converged result answers any budget; otherwise the stored budget
    /// must be at least as generous as the requested one.
    pub fn satisfies(&self, budget: &Budget) -> bool {
        self.result.converged || self.budget.covers(budget)
    }
}

/// Fingerprint-keyed LRU of finished solves.
///
/// Entries only ever improve: a result with fewer iterations than the one
/// already stored is discarded, so what a fingerprint maps to is
/// non-decreasing in iterations for as long as it stays resident.
pub struct StrategyCache {
    lru: LruCache<Fingerprint, Entry>,
}

impl StrategyCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            lru: LruCache::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)),
        }
    }
    /// Promotes the entry to most recently used.
    pub fn get(&mut self, fingerprint: &Fingerprint) -> Option<Entry> {
        self.lru.get(fingerprint).cloned()
    }
    pub fn peek(&self, fingerprint: &Fingerprint) -> Option<&Entry> {
        self.lru.peek(fingerprint)
    }
    /// Store unless a result with more iterations is already present.
    /// Returns the entry the cache holds afterwards.
    pub fn insert(&mut self, fingerprint: Fingerprint, entry: Entry) -> Entry {
        let better = self
            .lru
            .get(&fingerprint)
            .filter(|held| held.result.iterations > entry.result.iterations)
            .cloned();
        match better {
            Some(held) => held,
            None => {
                self.lru.put(fingerprint, entry.clone());
                entry
            }
        }
    }
    pub fn len(&self) -> usize {
        self.lru.len()
    }
    pub fn is_empty(&self) -> bool {
        self.lru.is_empty()
    }
    pub fn capacity(&self) -> usize {
        self.lru.cap().get()
    }
    pub fn clear(&mut self) {
        self.lru.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::*;
    use crate::gameplay::*;
    use crate::solver::Recommendation;
    use crate::solver::Status;

    fn key(pot: crate::Chips) -> Fingerprint {
        let sb = Seat::new(Position::SB, 99, 1, State::Betting, Pocket::Unknown);
        let bb = Seat::new(Position::BB, 98, 2, State::Betting, Pocket::Unknown);
        let game = Game::new(Street::Pref, pot, Board::empty(), vec![sb, bb], 0, 2).unwrap();
        Fingerprint::from(&game)
    }

    fn entry(iterations: usize) -> Entry {
        Entry {
            result: Arc::new(SolveResult {
                recommendation: Recommendation::Act(Edge::Call),
                distribution: vec![(Edge::Fold, 0.5), (Edge::Call, 0.5)],
                exploitability: None,
                iterations,
                converged: false,
                status: Status::BudgetExhausted,
                fingerprint: key(3),
                bucket: None,
                profile: Arc::default(),
            }),
            budget: Budget::iterations(iterations),
        }
    }

    #[test]
    fn inserts_are_monotone() {
        let mut cache = StrategyCache::new(4);
        cache.insert(key(3), entry(100));
        let held = cache.insert(key(3), entry(10));
        assert_eq!(held.result.iterations, 100);
        assert_eq!(cache.get(&key(3)).unwrap().result.iterations, 100);
        cache.insert(key(3), entry(1000));
        assert_eq!(cache.get(&key(3)).unwrap().result.iterations, 1000);
    }

    #[test]
    fn stored_budget_decides_hits() {
        let held = entry(100);
        assert!(held.satisfies(&Budget::iterations(50)));
        assert!(!held.satisfies(&Budget::iterations(500)));
    }

    #[test]
    fn least_recent_is_evicted() {
        let mut cache = StrategyCache::new(2);
        cache.insert(key(3), entry(1));
        cache.insert(key(40), entry(1));
        cache.get(&key(3));
        cache.insert(key(400), entry(1));
        assert_eq!(cache.len(), 2);
        assert!(cache.peek(&key(3)).is_some());
        assert!(cache.peek(&key(40)).is_none());
    }
}
