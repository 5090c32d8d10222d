use anyhow::{Context, Result};
use tracing::{debug, info};

use kestrel_core::GameTree;
use kestrel_engine::{SearchInfo, SearchParams, Searcher};

const DEFAULT_DEPTH: i32 = 6;
const DEFAULT_TIME_MS: u64 = 10_000;
const DEFAULT_SEED: u64 = 0x5eed;
const BRANCHING: usize = 5;

/// Bench: search a deterministic random game tree.
///
/// Usage: `kestrel [depth] [time_ms] [seed]`
fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let depth: i32 = parse_arg(args.next(), "depth", DEFAULT_DEPTH)?;
    let time_ms: u64 = parse_arg(args.next(), "time_ms", DEFAULT_TIME_MS)?;
    let seed: u64 = parse_arg(args.next(), "seed", DEFAULT_SEED)?;
    anyhow::ensure!(depth >= 1, "depth must be at least 1, got {depth}");

    let tree_depth = usize::try_from(depth).context("depth out of range")? + 2;
    let mut tree = GameTree::random(seed, BRANCHING, tree_depth);
    info!(depth, time_ms, seed, nodes = tree.len(), "kestrel bench starting");

    let mut searcher = Searcher::with_params(SearchParams {
        max_depth: depth,
        ..SearchParams::default()
    });
    debug!(params = ?searcher.params(), "search parameters");
    let mut info = SearchInfo::new();
    searcher
        .iterative_deepening(&mut tree, &mut info, time_ms)
        .context("search failed")?;

    println!("{info}");
    println!("bestmove {}", info.best_move);

    let profile = info.move_ordering_profile();
    info!(
        nodes = info.nodes,
        qnodes = info.qnodes,
        elapsed_ms = info.time.elapsed().as_millis() as u64,
        first_move_cutoff_pct = profile[0],
        "bench complete"
    );
    Ok(())
}

fn parse_arg<T: std::str::FromStr>(arg: Option<String>, name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match arg {
        Some(raw) => raw.parse().with_context(|| format!("invalid {name}: {raw:?}")),
        None => Ok(default),
    }
}
