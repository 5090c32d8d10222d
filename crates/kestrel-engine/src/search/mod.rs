//! Search algorithms and move ordering.

pub mod control;
pub mod guard;
pub mod hash_moves;
pub mod heuristics;
pub mod info;
pub mod negamax;
pub mod ordering;
pub mod params;
pub mod picker;

use kestrel_core::{Move, Position};
use tracing::{debug, info};

use crate::error::SearchError;
use hash_moves::HashMoveTable;
use heuristics::{HistoryTable, KillerTable};
use info::SearchInfo;
use negamax::{PvTable, SearchContext, aspiration_search};
use params::SearchParams;

/// Iterative-deepening searcher.
///
/// Owns the ordering heuristics (history, killers, hash moves), which carry
/// over from one search to the next until [`reset`](Self::reset).
pub struct Searcher {
    params: SearchParams,
    history: HistoryTable,
    killers: KillerTable,
    hash_moves: HashMoveTable,
}

impl Searcher {
    /// Create a searcher with default parameters.
    pub fn new() -> Self {
        Self::with_params(SearchParams::default())
    }

    /// Create a searcher with the given parameters.
    pub fn with_params(params: SearchParams) -> Self {
        let hash_moves = HashMoveTable::new(params.hash_moves_mb);
        Self {
            params,
            history: HistoryTable::new(),
            killers: KillerTable::new(),
            hash_moves,
        }
    }

    /// The parameters this searcher runs with.
    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// History scores accumulated so far.
    pub fn history(&self) -> &HistoryTable {
        &self.history
    }

    /// Killer moves accumulated so far.
    pub fn killers(&self) -> &KillerTable {
        &self.killers
    }

    /// Forget all ordering knowledge (preserving allocations).
    pub fn reset(&mut self) {
        self.history.clear();
        self.killers.clear();
        self.hash_moves.clear();
    }

    /// Search `pos` with increasing depth until `max_depth` or the time
    /// budget of `time_limit_ms` milliseconds is spent.
    ///
    /// Results land in `info`, which is reset first. Depth 1 always
    /// completes; a deeper iteration interrupted by the clock is discarded,
    /// so `info` describes the last completed depth. `pos` is restored to
    /// its original state on every return path.
    ///
    /// # Errors
    ///
    /// [`SearchError::IllegalMove`] if the position hands the move picker a
    /// move it does not accept as pseudo-legal.
    pub fn iterative_deepening<P: Position>(
        &mut self,
        pos: &mut P,
        info: &mut SearchInfo,
        time_limit_ms: u64,
    ) -> Result<(), SearchError> {
        info.reset();
        info.init_time(time_limit_ms);

        let mut ctx = SearchContext {
            info,
            pv: PvTable::new(),
            killers: &mut self.killers,
            history: &mut self.history,
            hash_moves: &mut self.hash_moves,
            params: &self.params,
            iteration: 0,
        };

        let mut prev_score = 0;

        for depth in 1..=self.params.max_depth {
            // Don't start an iteration we have no time for
            if depth > 1 && ctx.info.time_over() {
                break;
            }

            ctx.iteration = depth;
            let score = aspiration_search(pos, depth, prev_score, &mut ctx)?;

            // An interrupted iteration is discarded
            if ctx.info.stopped {
                debug!(depth, "iteration interrupted, keeping depth {}", depth - 1);
                break;
            }

            prev_score = score;

            let pv = ctx.pv.root_pv();
            ctx.info.depth = depth;
            ctx.info.score = score;
            ctx.info.best_move = pv.first().copied().unwrap_or(Move::NULL);
            ctx.info.set_pv(pv);

            info!(
                depth,
                seldepth = ctx.info.seldepth,
                score,
                nodes = ctx.info.total_nodes(),
                elapsed_ms = ctx.info.time.elapsed().as_millis() as u64,
                pv = %format_line(ctx.info.pv()),
                "iteration complete"
            );
        }

        Ok(())
    }
}

impl std::fmt::Debug for Searcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searcher")
            .field("params", &self.params)
            .field("hash_moves", &self.hash_moves)
            .finish()
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Space-separated coordinate notation of a move line.
fn format_line(line: &[Move]) -> String {
    line.iter().map(Move::to_string).collect::<Vec<_>>().join(" ")
}
