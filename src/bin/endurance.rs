//! Endurance driver for `PositionMap`.
//!
//! Alternates batches of random edits and batches of random queries on one
//! growing map until the time budget runs out, reporting how query latency
//! evolves as the history grows.
//!
//! ```text
//! cargo run --release --features bench --bin endurance -- --duration 30
//! RUST_LOG=debug cargo run --release --features bench --bin endurance
//! ```

use std::time::{Duration, Instant};

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use remap::{Direction, PositionMap};

/// Grow a position map under load and watch query latency
#[derive(Parser, Debug)]
#[command(name = "endurance")]
#[command(about = "Grow a position map under load and watch query latency")]
struct Cli {
    /// Seconds to keep running
    #[arg(long, default_value_t = 30)]
    duration: u64,

    /// Edits recorded per iteration
    #[arg(long, default_value_t = 1000)]
    batch: usize,

    /// Queries issued per iteration
    #[arg(long, default_value_t = 10_000)]
    queries: usize,

    /// Positions are drawn from 0..span
    #[arg(long, default_value_t = 100_000, value_parser = clap::value_parser!(i64).range(1..))]
    span: i64,

    /// Edit lengths are drawn from 1..=max-len
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(i64).range(1..))]
    max_len: i64,

    /// RNG seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let seed = cli.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    log::info!("seed {}", seed);

    let mut map = PositionMap::new();
    let budget = Duration::from_secs(cli.duration);
    let overall = Instant::now();

    let mut iteration = 0u64;
    let mut total_edits = 0usize;
    let mut total_queries = 0usize;
    let mut total_unmapped = 0usize;

    while overall.elapsed() < budget {
        iteration += 1;

        let start = Instant::now();
        for _ in 0..cli.batch {
            let position = rng.gen_range(0..cli.span);
            let length = rng.gen_range(1..=cli.max_len);
            let result = if rng.gen_bool(0.5) {
                map.insert(position, length)
            } else {
                map.delete(position, length)
            };
            if let Err(err) = result {
                log::warn!("edit rejected: {}", err);
            }
        }
        let edit_time = start.elapsed();
        total_edits += cli.batch;

        let start = Instant::now();
        let mut visited = 0usize;
        for _ in 0..cli.queries {
            let position = rng.gen_range(0..cli.span);
            let (mapped, stats) = map.map_with_stats(Direction::OriginToCurrent, position);
            visited += stats.visited;
            if mapped.is_none() {
                total_unmapped += 1;
            }
        }
        let query_time = start.elapsed();
        total_queries += cli.queries;

        log::debug!(
            "iteration {}: {} edits in {:?} | {} queries in {:?} ({:?} avg, {:.1} edits visited avg) | depth {}",
            iteration,
            cli.batch,
            edit_time,
            cli.queries,
            query_time,
            query_time / cli.queries.max(1) as u32,
            visited as f64 / cli.queries.max(1) as f64,
            map.depth()
        );
    }

    println!("iterations:  {}", iteration);
    println!("edits:       {}", total_edits);
    println!("queries:     {} ({} unmapped)", total_queries, total_unmapped);
    println!("tree depth:  {}", map.depth());
    println!("total time:  {:?}", overall.elapsed());
}
