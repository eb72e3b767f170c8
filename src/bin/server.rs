//! Strategy Server Binary
//!
//! Serves real-time strategy advice over HTTP.

use clap::Parser;
use robosolver::coordinator::Coordinator;
use robosolver::server::API;
use robosolver::server::Server;
use robosolver::solver::Config;
use robosolver::*;

#[derive(Parser)]
#[command(author, version, about = "Serve MCCFR strategy advice over HTTP", long_about = None)]
struct Args {
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:8080")]
    bind: String,
    #[arg(long, default_value_t = num_cpus::get())]
    workers: usize,
    #[arg(long, default_value_t = CACHE_CAPACITY)]
    capacity: usize,
    #[arg(long, default_value_t = CONVERGENCE_THRESHOLD)]
    threshold: Utility,
    #[arg(long, default_value_t = EXPLOITABILITY_INTERVAL)]
    interval: usize,
    #[arg(long, default_value_t = HORIZON)]
    horizon: usize,
    #[arg(long, default_value_t = WORLD_COUNT)]
    worlds: usize,
    #[arg(long, default_value_t = RESPONSE_WORLDS)]
    samples: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        Config {
            threshold: args.threshold,
            interval: args.interval,
            horizon: args.horizon,
            worlds: args.worlds,
            samples: args.samples,
            seed: args.seed,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    log();
    kys();
    let config = Config::from(&args);
    log::info!("solver {}", config);
    log::info!("cache capacity {}", args.capacity);
    let api = API::from(Coordinator::new(args.capacity, config));
    Server::run(args.bind, args.workers, api).await?;
    Ok(())
}
