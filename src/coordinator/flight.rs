use crate::Error;
use crate::Result;
use crate::solver::SolveResult;
use std::sync::Arc;
use std::sync::Condvar;
use std::sync::Mutex;

/// One in-progress solve that later requests for the same fingerprint wait on.
///
/// The leader lands exactly one outcome; every waiter receives a clone of it.
#[derive(Debug, Default)]
pub struct Flight {
    outcome: Mutex<Option<Result<Arc<SolveResult>>>>,
    landed: Condvar,
}

impl Flight {
    /// Publish the outcome and wake all waiters. Only the first landing counts.
    pub fn land(&self, outcome: Result<Arc<SolveResult>>) {
        let mut slot = self.outcome.lock().unwrap_or_else(|e| e.into_inner());
        if slot.is_none() {
            *slot = Some(outcome);
            self.landed.notify_all();
        }
    }
    /// Block until the leader lands.
    pub fn wait(&self) -> Result<Arc<SolveResult>> {
        let slot = self.outcome.lock().unwrap_or_else(|e| e.into_inner());
        let slot = self
            .landed
            .wait_while(slot, |outcome| outcome.is_none())
            .unwrap_or_else(|e| e.into_inner());
        (*slot)
            .clone()
            .unwrap_or_else(|| Err(Error::internal("flight woke without an outcome")))
    }
    pub fn is_landed(&self) -> bool {
        self.outcome
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }
}
