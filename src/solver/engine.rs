use super::config::Config;
use super::encoder::Abstraction;
use super::fingerprint::Fingerprint;
use super::result::Recommendation;
use super::result::SolveResult;
use super::result::Status;
use super::spot::Spot;
use crate::Error;
use crate::Probability;
use crate::Result;
use crate::abstraction::Bucket;
use crate::abstraction::Pool;
use crate::cfr::Budget;
use crate::cfr::CfrGame;
use crate::cfr::Encoder;
use crate::cfr::History;
use crate::cfr::Phase;
use crate::cfr::Trainer;
use crate::cfr::Turn;
use crate::gameplay::Edge;
use crate::gameplay::Game;
use std::sync::Arc;
use std::time::Instant;

/// Solve a validated snapshot within a budget.
///
/// Builds the world pool and horizon-bounded subgame, runs MCCFR until it
/// converges or the budget runs out, and reads the actor's average strategy
/// at the root. The root strategy is averaged over the pool, since the
/// actor's bucket varies across worlds whenever their cards are hidden.
///
/// A snapshot where nobody is to act is answered without training.
pub fn solve(game: &Game, budget: &Budget, config: &Config) -> Result<SolveResult> {
    let start = Instant::now();
    let bucket = Fingerprint::bucket(game);
    let fingerprint = Fingerprint::new(game, bucket);
    let spot = Spot::new(game.clone(), config.horizon);
    if !matches!(spot.turn(), Turn::Choice(_)) {
        log::debug!("{} needs no decision ({})", fingerprint, spot.turn());
        return Ok(settled(fingerprint, bucket));
    }
    let pool = Pool::sample(game, config.horizon, config.worlds, config.seed)?;
    let mut trainer: Trainer<Abstraction> = Trainer::new(
        Abstraction::from(pool),
        spot.clone(),
        config.seed,
        config.convergence(),
    );
    let summary = trainer.solve_since(budget, start)?;
    let menu = spot.menu();
    let distribution = menu.iter().zip(root(&trainer, &spot)).collect::<Vec<_>>();
    validate(&distribution)?;
    let status = match summary.phase {
        Phase::Converged => Status::Converged,
        _ => Status::BudgetExhausted,
    };
    let result = SolveResult {
        recommendation: SolveResult::argmax(&distribution),
        distribution,
        exploitability: summary.exploitability,
        iterations: summary.epochs,
        converged: status == Status::Converged,
        status,
        fingerprint,
        bucket,
        profile: Arc::new(trainer.freeze()),
    };
    log::info!(
        "solved {} in {:?}: {} its, exploitability {}, {}",
        fingerprint,
        start.elapsed(),
        result.iterations,
        result
            .exploitability
            .map_or("n/a".to_string(), |x| format!("{:.5}", x)),
        result.status
    );
    Ok(result)
}

/// The actor's average root strategy, averaged again over the pool.
fn root(trainer: &Trainer<Abstraction>, spot: &Spot) -> Vec<Probability> {
    let width = spot.menu().len();
    let worlds = trainer.encoder().worlds();
    let mut mean = vec![0.0 as Probability; width];
    for world in worlds {
        let info = trainer.encoder().info(spot, world, &History::default());
        for (sum, p) in mean.iter_mut().zip(trainer.profile().average(&info, width)) {
            *sum += p;
        }
    }
    let n = worlds.len().max(1) as Probability;
    mean.into_iter().map(|p| p / n).collect()
}

fn validate(distribution: &[(Edge, Probability)]) -> Result<()> {
    if distribution.is_empty() {
        return Err(Error::internal("empty root menu at a decision"));
    }
    if let Some((edge, p)) = distribution.iter().find(|(_, p)| !p.is_finite() || *p < 0.0) {
        return Err(Error::internal(format!("{} has probability {}", edge, p)));
    }
    let total = distribution.iter().map(|(_, p)| p).sum::<Probability>();
    if (total - 1.0).abs() > 1e-4 {
        return Err(Error::internal(format!("root strategy sums to {}", total)));
    }
    Ok(())
}

fn settled(fingerprint: Fingerprint, bucket: Option<Bucket>) -> SolveResult {
    SolveResult {
        recommendation: Recommendation::NoneNeeded,
        distribution: vec![(Edge::Check, 1.0)],
        exploitability: Some(0.0),
        iterations: 0,
        converged: true,
        status: Status::Terminal,
        fingerprint,
        bucket,
        profile: Arc::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Chips;
    use crate::cards::*;
    use crate::gameplay::Position;
    use crate::gameplay::Seat;
    use crate::gameplay::State;
    use std::sync::atomic::AtomicBool;
    use std::time::Duration;

    fn config() -> Config {
        Config {
            worlds: 24,
            samples: 4,
            interval: 16,
            ..Config::default()
        }
    }

    fn budget(iterations: usize) -> Budget {
        Budget::new(iterations, Duration::from_secs(600))
    }

    fn seat(pocket: &str, stack: Chips, spent: Chips) -> Seat {
        let pocket = Pocket::try_from(pocket).unwrap();
        Seat::new(Position::Unlabeled, stack, spent, State::Betting, pocket)
    }

    fn river(hero: &str) -> Game {
        Game::new(
            Street::Rive,
            40,
            Board::try_from("2c7d9hJsQd").unwrap(),
            vec![seat(hero, 80, 20), seat("XX", 80, 20)],
            0,
            2,
        )
        .unwrap()
    }

    #[test]
    fn distribution_covers_the_menu() {
        let game = river("AsAh");
        let result = solve(&game, &budget(64), &config()).unwrap();
        let menu = game.menu();
        let total = result.distribution.iter().map(|(_, p)| p).sum::<Probability>();
        assert!((total - 1.0).abs() < 1e-4);
        assert_eq!(result.distribution.len(), menu.len());
        assert!(result.distribution.iter().all(|(e, _)| menu.contains(e)));
        assert!(matches!(result.recommendation, Recommendation::Act(e) if menu.contains(&e)));
        assert!(result.bucket.is_some());
    }

    #[test]
    fn solves_are_deterministic() {
        let game = river("KsKh");
        let a = solve(&game, &budget(48), &config()).unwrap();
        let b = solve(&game, &budget(48), &config()).unwrap();
        assert_eq!(a.fingerprint, b.fingerprint);
        assert_eq!(a, b);
    }

    #[test]
    fn single_iteration_is_not_converged() {
        let result = solve(&river("8s8h"), &budget(1), &config()).unwrap();
        assert!(!result.converged);
        assert_eq!(result.status, Status::BudgetExhausted);
        assert_eq!(result.iterations, 1);
        assert!(!result.distribution.is_empty());
    }

    #[test]
    fn decided_hand_needs_nothing() {
        let folded = Seat::new(Position::Unlabeled, 80, 20, State::Folding, Pocket::Unknown);
        let game = Game::new(
            Street::Rive,
            40,
            Board::try_from("2c7d9hJsQd").unwrap(),
            vec![seat("AsAh", 80, 20), folded],
            0,
            2,
        )
        .unwrap();
        let result = solve(&game, &budget(64), &config()).unwrap();
        assert_eq!(result.recommendation, Recommendation::NoneNeeded);
        assert_eq!(result.status, Status::Terminal);
        assert_eq!(result.distribution, vec![(Edge::Check, 1.0)]);
        assert!(result.profile.is_empty());
    }

    #[test]
    fn unknown_hero_is_averaged_over_worlds() {
        let result = solve(&river("XX"), &budget(32), &config()).unwrap();
        assert!(result.bucket.is_none());
        let total = result.distribution.iter().map(|(_, p)| p).sum::<Probability>();
        assert!((total - 1.0).abs() < 1e-4);
    }

    #[test]
    fn river_reports_exploitability() {
        let result = solve(&river("AsAh"), &budget(32), &config()).unwrap();
        assert!(result.exploitability.is_some());
        assert!(result.confidence() <= 1.0);
    }

    #[test]
    fn turn_spans_the_river_with_a_longer_horizon() {
        let game = Game::new(
            Street::Turn,
            40,
            Board::try_from("2c7d9hJs").unwrap(),
            vec![seat("AsAh", 80, 20), seat("XX", 80, 20)],
            0,
            2,
        )
        .unwrap();
        let config = Config { horizon: 2, ..config() };
        let result = solve(&game, &budget(16), &config).unwrap();
        assert_eq!(result.iterations, 16);
        assert!(!result.distribution.is_empty());
    }

    fn normalized(result: &SolveResult) -> bool {
        let total = result.distribution.iter().map(|(_, p)| p).sum::<Probability>();
        (total - 1.0).abs() < 1e-4 && result.distribution.iter().all(|(_, p)| *p >= 0.0)
    }

    #[test]
    fn wallclock_cuts_a_large_budget_short() {
        let config = Config { threshold: 0.0, ..config() };
        let cap = 1_000_000;
        let budget = Budget::new(cap, Duration::from_millis(50));
        let result = solve(&river("QsQh"), &budget, &config).unwrap();
        assert_eq!(result.status, Status::BudgetExhausted);
        assert!(!result.converged);
        assert!(result.iterations >= 1);
        assert!(result.iterations < cap);
        assert!(normalized(&result));
    }

    #[test]
    fn cancellation_still_answers() {
        let flag = Arc::new(AtomicBool::new(true));
        let budget = budget(1 << 20).with_cancel(flag);
        let result = solve(&river("JsJh"), &budget, &config()).unwrap();
        assert_eq!(result.status, Status::BudgetExhausted);
        assert!(!result.converged);
        assert_eq!(result.iterations, 1);
        assert!(normalized(&result));
    }
}
