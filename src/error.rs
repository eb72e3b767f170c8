/// Failures surfaced to callers of the solver.
///
/// Budget exhaustion is not an error; it is reported on a valid result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Input that does not describe a legal hand in progress.
    #[error("malformed hand: {0}")]
    MalformedHand(String),
    /// Invariant violated while solving. Never cached.
    #[error("internal solver error: {0}")]
    InternalSolver(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedHand(msg.into())
    }
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::InternalSolver(msg.into())
    }
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedHand(_))
    }
}
