//! Real-time strategy advice for No-Limit Texas Hold'em.
//!
//! A request snapshot of a hand in progress is validated into a [`gameplay::Game`],
//! abstracted into a bounded subgame, and solved with Monte Carlo counterfactual
//! regret minimization. Results are cached by a fingerprint of the abstracted spot
//! and shared between concurrent requests.
//!
//! - [`cards`]: card, hand, board model; evaluation; equity
//! - [`abstraction`]: equity buckets and sampled chance worlds
//! - [`gameplay`]: action menus, state transitions, side pots
//! - [`cfr`]: game-agnostic MCCFR traits, trainer, best response
//! - [`solver`]: the poker adapter and solve entry point
//! - [`coordinator`]: fingerprint cache and single-flight solving
//! - [`dto`]: JSON request and response shapes
pub mod abstraction;
pub mod cards;
pub mod cfr;
pub mod coordinator;
pub mod dto;
pub mod error;
pub mod gameplay;
pub mod solver;

#[cfg(feature = "server")]
pub mod server;

pub use error::Error;
pub use error::Result;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Stack sizes, pots and bet amounts in chips.
pub type Chips = i32;
/// Expected values, regrets, and payoffs.
pub type Utility = f32;
/// Strategy weights, sampling distributions, and reach probabilities.
pub type Probability = f32;
/// Showdown win probability against a random holding.
pub type Equity = f32;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and Monte Carlo sampling.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// GAME TREE PARAMETERS
// ============================================================================
/// Most seats a request may describe.
pub const MAX_PLAYERS: usize = 10;
/// Default big blind when a request omits it.
pub const B_BLIND: Chips = 2;
/// Maximum raises per betting round (limits tree width).
pub const MAX_RAISE_REPEATS: usize = 3;
/// Fixed capacity of an action menu.
pub const MENU_CAPACITY: usize = 8;
/// Streets spanned by a subgame before frontier check-down valuation.
pub const HORIZON: usize = 1;

// ============================================================================
// HAND ABSTRACTION
// ============================================================================
/// Monte Carlo runouts per equity estimate before the river.
pub const EQUITY_TRIALS: usize = 512;
/// Sampled chance worlds per solve.
pub const WORLD_COUNT: usize = 256;

// ============================================================================
// REGRET MATCHING
// Convert cumulative regrets to current iteration strategy via normalization.
// ============================================================================
/// Minimum policy weight to prevent division by zero in normalization.
pub const POLICY_MIN: Probability = Probability::MIN_POSITIVE;
/// Floor for cumulative regret storage (prevents unbounded negative growth).
pub const REGRET_MIN: Utility = -4e6;

// ============================================================================
// CONVERGENCE
// Best response over a fixed world subset, reported in pots.
// ============================================================================
/// Exploitability below which a solve is declared converged.
pub const CONVERGENCE_THRESHOLD: Utility = 0.005;
/// Iterations between exploitability checkpoints.
pub const EXPLOITABILITY_INTERVAL: usize = 128;
/// Worlds a best response averages over.
pub const RESPONSE_WORLDS: usize = 16;
/// Public tree size beyond which a best response gives up.
pub const RESPONSE_NODE_LIMIT: usize = 1 << 16;

// ============================================================================
// REQUEST BUDGET
// ============================================================================
/// Default iteration budget per request.
pub const MAX_ITERATIONS: usize = 2048;
/// Default wall-clock budget per request (milliseconds).
pub const MAX_WALLCLOCK_MS: u64 = 2000;
/// Cached strategies kept before LRU eviction.
pub const CACHE_CAPACITY: usize = 1024;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Register Ctrl+C handler for immediate (non-graceful) termination.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.unwrap();
        println!();
        log::warn!("violent interrupt received, exiting immediately");
        std::process::exit(0);
    });
}
