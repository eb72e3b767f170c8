use super::cache::Entry;
use super::cache::StrategyCache;
use super::flight::Flight;
use super::stats::Snapshot;
use super::stats::Stats;
use crate::CACHE_CAPACITY;
use crate::Error;
use crate::Result;
use crate::cfr::Budget;
use crate::gameplay::Game;
use crate::solver;
use crate::solver::Config;
use crate::solver::Fingerprint;
use crate::solver::SolveResult;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::OnceLock;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

/// The function a coordinator calls on a cache miss.
pub type Solver = dyn Fn(&Game, &Budget, &Config) -> Result<SolveResult> + Send + Sync;

/// Process-wide front door to the solver.
///
/// Requests are keyed by [`Fingerprint`]. A cached result that satisfies
/// the requested budget is returned directly. Otherwise the first request
/// for a key leads a solve on its own thread and later requests for the
/// same key wait on that flight and share its result.
///
/// Locks are always taken flights first, then cache, and neither is held
/// while solving.
pub struct Coordinator {
    config: Config,
    solver: Arc<Solver>,
    cache: Mutex<StrategyCache>,
    flights: Mutex<HashMap<Fingerprint, Arc<Flight>>>,
    stats: Stats,
}

enum Role {
    Leader(Arc<Flight>),
    Waiter(Arc<Flight>),
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(CACHE_CAPACITY, Config::default())
    }
}

impl Coordinator {
    pub fn new(capacity: usize, config: Config) -> Self {
        Self::with_solver(capacity, config, Arc::new(solver::solve))
    }
    pub fn with_solver(capacity: usize, config: Config, solver: Arc<Solver>) -> Self {
        Self {
            config,
            solver,
            cache: Mutex::new(StrategyCache::new(capacity)),
            flights: Mutex::new(HashMap::new()),
            stats: Stats::default(),
        }
    }
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Answer from cache, join a flight, or lead a new solve.
    ///
    /// A waiter receives the leader's result even if it asked for a larger
    /// budget; the next request after landing refines it. A solve cut short
    /// by its cancel flag is cached only as good as the iterations it ran.
    ///
    /// Blocks while waiting on a flight, so call it from a plain thread and
    /// never from inside a rayon worker.
    pub fn solve(&self, game: &Game, budget: Budget) -> Result<Arc<SolveResult>> {
        let fingerprint = Fingerprint::from(game);
        let role = {
            let mut flights = lock(&self.flights);
            let cached = lock(&self.cache)
                .get(&fingerprint)
                .filter(|entry| entry.satisfies(&budget));
            if let Some(entry) = cached {
                self.stats.hit();
                return Ok(entry.result);
            }
            match flights.get(&fingerprint) {
                Some(flight) => {
                    self.stats.join();
                    Role::Waiter(flight.clone())
                }
                None => {
                    self.stats.miss();
                    let flight = Arc::new(Flight::default());
                    flights.insert(fingerprint, flight.clone());
                    Role::Leader(flight)
                }
            }
        };
        match role {
            Role::Waiter(flight) => flight.wait(),
            Role::Leader(flight) => self.lead(fingerprint, game, budget, flight),
        }
    }

    /// Solve many snapshots in parallel, each through the cache. `each`
    /// sees every outcome as it lands, in completion order.
    ///
    /// Batch workers are plain scoped threads rather than rayon tasks. A
    /// waiter parks its thread on a flight, and a parked rayon worker could
    /// be the one a leader's world dealing is waiting to steal work from.
    pub fn batch<F>(
        &self,
        games: &[Game],
        budget: &Budget,
        each: F,
    ) -> Vec<Result<Arc<SolveResult>>>
    where
        F: Fn(&Result<Arc<SolveResult>>) + Sync,
    {
        let next = AtomicUsize::new(0);
        let slots = games
            .iter()
            .map(|_| OnceLock::new())
            .collect::<Vec<OnceLock<Result<Arc<SolveResult>>>>>();
        let width = rayon::current_num_threads().clamp(1, games.len().max(1));
        std::thread::scope(|scope| {
            for _ in 0..width {
                scope.spawn(|| {
                    loop {
                        let i = next.fetch_add(1, Ordering::Relaxed);
                        let Some(game) = games.get(i) else {
                            break;
                        };
                        let outcome = self.solve(game, budget.clone());
                        each(&outcome);
                        let _ = slots[i].set(outcome);
                    }
                });
            }
        });
        slots
            .into_iter()
            .map(|slot| {
                slot.into_inner()
                    .unwrap_or_else(|| Err(Error::internal("batch worker stopped early")))
            })
            .collect()
    }

    pub fn stats(&self) -> Snapshot {
        let cache = lock(&self.cache);
        self.stats.snapshot(cache.len(), cache.capacity())
    }

    /// Drop every cached result. Flights in progress still land.
    pub fn clear(&self) {
        lock(&self.cache).clear();
        log::info!("strategy cache cleared");
    }

    fn lead(
        &self,
        fingerprint: Fingerprint,
        game: &Game,
        budget: Budget,
        flight: Arc<Flight>,
    ) -> Result<Arc<SolveResult>> {
        let pilot = Pilot {
            coordinator: self,
            fingerprint,
            flight: flight.clone(),
        };
        self.stats.takeoff();
        let outcome = match (self.solver)(game, &budget, &self.config) {
            Ok(result) => {
                self.stats.landed(result.iterations);
                let budget = match budget.cancelled() {
                    true => budget.truncated(result.iterations),
                    false => budget,
                };
                let entry = Entry {
                    result: Arc::new(result),
                    budget,
                };
                let mut flights = lock(&self.flights);
                let held = lock(&self.cache).insert(fingerprint, entry);
                flights.remove(&fingerprint);
                Ok(held.result)
            }
            Err(e) => {
                self.stats.crashed();
                log::warn!("solve {} failed: {}", fingerprint, e);
                lock(&self.flights).remove(&fingerprint);
                Err(e)
            }
        };
        flight.land(outcome.clone());
        drop(pilot);
        outcome
    }
}

/// Held by a flight's leader. If the leader unwinds before landing, the
/// flight is grounded with an error so waiters are released and the next
/// request starts afresh.
struct Pilot<'a> {
    coordinator: &'a Coordinator,
    fingerprint: Fingerprint,
    flight: Arc<Flight>,
}

impl Drop for Pilot<'_> {
    fn drop(&mut self) {
        if !self.flight.is_landed() {
            log::warn!("solve {} died before landing", self.fingerprint);
            self.coordinator.stats.crashed();
            lock(&self.coordinator.flights).remove(&self.fingerprint);
            self.flight
                .land(Err(Error::internal("solver thread died before finishing")));
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
