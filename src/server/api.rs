use crate::Error;
use crate::Probability;
use crate::Result;
use crate::Utility;
use crate::cfr::Budget;
use crate::coordinator::Coordinator;
use crate::coordinator::Snapshot;
use crate::dto::AnalysisResponse;
use crate::dto::BatchAccepted;
use crate::dto::BatchProgress;
use crate::dto::BatchRequest;
use crate::dto::GameRequest;
use crate::dto::StrategyResponse;
use crate::gameplay::Game;
use crate::solver::SolveResult;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Instant;

/// Progress of one background batch.
#[derive(Debug)]
pub struct Batch {
    total: usize,
    started: Instant,
    tally: Mutex<Tally>,
}

#[derive(Debug, Default)]
struct Tally {
    completed: usize,
    failed: usize,
    confidence: Probability,
    exploitability: Option<Utility>,
}

impl Batch {
    fn new(total: usize) -> Self {
        Self {
            total,
            started: Instant::now(),
            tally: Mutex::new(Tally::default()),
        }
    }
    fn record(&self, outcome: &Result<Arc<SolveResult>>) {
        let mut tally = self.tally.lock().unwrap_or_else(|e| e.into_inner());
        tally.completed += 1;
        match outcome {
            Ok(result) => {
                tally.confidence += result.confidence();
                tally.exploitability = result.exploitability.or(tally.exploitability);
            }
            Err(_) => tally.failed += 1,
        }
    }
    /// Count every unfinished scenario as failed, for a batch whose worker
    /// died before recording them.
    pub fn abandon(&self) {
        let mut tally = self.tally.lock().unwrap_or_else(|e| e.into_inner());
        tally.failed += self.total - tally.completed;
        tally.completed = self.total;
    }
    pub fn progress(&self) -> BatchProgress {
        let tally = self.tally.lock().unwrap_or_else(|e| e.into_inner());
        let solved = tally.completed - tally.failed;
        let remaining = self.total - tally.completed;
        let eta = match tally.completed {
            0 => 0,
            n => (self.started.elapsed().as_secs_f64() / n as f64 * remaining as f64).ceil() as u64,
        };
        BatchProgress {
            completed: tally.completed,
            total: self.total,
            failed: tally.failed,
            current_exploitability: tally.exploitability,
            average_convergence_rate: match solved {
                0 => 0.0,
                n => tally.confidence / n as Probability,
            },
            estimated_time_remaining: eta,
        }
    }
}

/// Everything the handlers share: the coordinator and the batch registry.
pub struct API {
    coordinator: Arc<Coordinator>,
    batches: Mutex<HashMap<String, Arc<Batch>>>,
    counter: AtomicUsize,
}

impl From<Coordinator> for API {
    fn from(coordinator: Coordinator) -> Self {
        Self {
            coordinator: Arc::new(coordinator),
            batches: Mutex::new(HashMap::new()),
            counter: AtomicUsize::new(0),
        }
    }
}

impl API {
    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    /// Blocking. Call from the blocking pool.
    pub fn strategy(&self, request: &GameRequest, budget: Budget) -> Result<StrategyResponse> {
        let game = Game::try_from(request)?;
        let result = self.coordinator.solve(&game, budget)?;
        Ok(StrategyResponse::from((&game, result.as_ref())))
    }

    /// Blocking. Call from the blocking pool.
    pub fn analysis(&self, request: &GameRequest, budget: Budget) -> Result<AnalysisResponse> {
        let game = Game::try_from(request)?;
        let result = self.coordinator.solve(&game, budget)?;
        Ok(AnalysisResponse::from((&game, result.as_ref())))
    }

    /// Validate every scenario and register the batch. Nothing is solved
    /// until [`run`](Self::run) is called with the returned games.
    pub fn enqueue(&self, request: &BatchRequest) -> Result<(BatchAccepted, Vec<Game>)> {
        let games = request
            .scenarios
            .iter()
            .enumerate()
            .map(|(i, scenario)| {
                Game::try_from(scenario)
                    .map_err(|e| Error::malformed(format!("scenario {}: {}", i, e)))
            })
            .collect::<Result<Vec<Game>>>()?;
        let id = format!("batch-{}", self.counter.fetch_add(1, Ordering::Relaxed));
        self.batches
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id.clone(), Arc::new(Batch::new(games.len())));
        log::info!("{} accepted with {} scenarios", id, games.len());
        let accepted = BatchAccepted {
            check_url: format!("/api/gto/batch/{}", id),
            batch_id: id,
            status: "processing".to_string(),
            total_scenarios: games.len(),
        };
        Ok((accepted, games))
    }

    /// Blocking. Solves a registered batch, recording each outcome.
    pub fn run(&self, id: &str, games: &[Game], budget: &Budget) {
        let Some(batch) = self.batch(id) else {
            log::warn!("{} is not registered", id);
            return;
        };
        self.coordinator.batch(games, budget, |outcome| batch.record(outcome));
        let progress = batch.progress();
        log::info!(
            "{} finished: {} solved, {} failed in {:?}",
            id,
            progress.completed - progress.failed,
            progress.failed,
            batch.started.elapsed()
        );
    }

    pub fn batch(&self, id: &str) -> Option<Arc<Batch>> {
        self.batches
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .cloned()
    }

    pub fn stats(&self) -> Snapshot {
        self.coordinator.stats()
    }

    pub fn clear(&self) {
        self.coordinator.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abandoned_batches_finish_as_failed() {
        let batch = Batch::new(3);
        batch.record(&Err(Error::internal("boom")));
        batch.abandon();
        let progress = batch.progress();
        assert_eq!(progress.completed, 3);
        assert_eq!(progress.failed, 3);
        assert_eq!(progress.estimated_time_remaining, 0);
        assert_eq!(progress.average_convergence_rate, 0.0);
    }
}
