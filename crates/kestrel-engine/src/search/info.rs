//! Per-run search bookkeeping: counters, result, principal variation.

use std::fmt;

use kestrel_core::Move;

use crate::search::control::TimeControl;
use crate::search::negamax::{MATE_SCORE, MATE_THRESHOLD, MAX_PLY};

/// Number of fail-high buckets. The last bucket collects every cutoff that
/// happened on the sixth move or later.
pub const FAIL_HIGH_MOVES: usize = 6;

/// State of one iterative-deepening run.
///
/// After [`Searcher::iterative_deepening`](crate::Searcher::iterative_deepening)
/// returns, `depth`, `score`, `best_move` and the PV describe the last
/// completed iteration; the counters cover every node visited, including
/// aspiration re-searches and the aborted final iteration.
#[derive(Debug, Clone)]
pub struct SearchInfo {
    /// Last fully completed depth.
    pub depth: i32,
    /// Deepest ply reached, quiescence included.
    pub seldepth: usize,
    /// Main-search nodes.
    pub nodes: u64,
    /// Quiescence nodes.
    pub qnodes: u64,
    /// Score of the last completed depth, side to move's point of view.
    pub score: i32,
    /// Best move of the last completed depth, or [`Move::NULL`].
    pub best_move: Move,
    /// Principal variation, terminated by [`Move::NULL`].
    pub pv: [Move; MAX_PLY],
    /// Cutoff tally by the index of the move that caused it.
    pub fail_high: [u64; FAIL_HIGH_MOVES],
    /// Clock for this run.
    pub time: TimeControl,
    /// Latched once the budget ran out mid-iteration.
    pub stopped: bool,
}

impl SearchInfo {
    /// A zeroed record with an unlimited clock.
    pub fn new() -> Self {
        Self {
            depth: 0,
            seldepth: 0,
            nodes: 0,
            qnodes: 0,
            score: 0,
            best_move: Move::NULL,
            pv: [Move::NULL; MAX_PLY],
            fail_high: [0; FAIL_HIGH_MOVES],
            time: TimeControl::default(),
            stopped: false,
        }
    }

    /// Clear results and counters. The clock is left untouched.
    pub fn reset(&mut self) {
        let time = self.time;
        *self = Self::new();
        self.time = time;
    }

    /// Start the clock with a budget of `limit_ms` milliseconds.
    pub fn init_time(&mut self, limit_ms: u64) {
        self.time.restart(limit_ms);
    }

    /// Whether the time budget is spent.
    pub fn time_over(&self) -> bool {
        self.time.time_over()
    }

    /// Main and quiescence nodes together.
    pub fn total_nodes(&self) -> u64 {
        self.nodes + self.qnodes
    }

    /// The principal variation up to its terminating [`Move::NULL`].
    pub fn pv(&self) -> &[Move] {
        let len = self.pv.iter().position(|m| m.is_null()).unwrap_or(MAX_PLY);
        &self.pv[..len]
    }

    /// Replace the principal variation, truncating at `MAX_PLY - 1` moves.
    pub fn set_pv(&mut self, line: &[Move]) {
        self.pv = [Move::NULL; MAX_PLY];
        for (slot, &mv) in self.pv.iter_mut().zip(line.iter().take(MAX_PLY - 1)) {
            if mv.is_null() {
                break;
            }
            *slot = mv;
        }
    }

    /// Record a cutoff caused by the `moves_tried`-th move (1-based).
    pub fn record_fail_high(&mut self, moves_tried: usize) {
        let bucket = moves_tried.saturating_sub(1).min(FAIL_HIGH_MOVES - 1);
        self.fail_high[bucket] += 1;
    }

    /// Share of cutoffs per bucket, in percent. All zero before any cutoff.
    pub fn move_ordering_profile(&self) -> [f64; FAIL_HIGH_MOVES] {
        let total: u64 = self.fail_high.iter().sum();
        let mut profile = [0.0; FAIL_HIGH_MOVES];
        if total == 0 {
            return profile;
        }
        for (share, &count) in profile.iter_mut().zip(&self.fail_high) {
            *share = count as f64 * 100.0 / total as f64;
        }
        profile
    }
}

impl Default for SearchInfo {
    fn default() -> Self {
        Self::new()
    }
}

/// Protocol-style progress line:
/// `info score cp 31 depth 6 seldepth 11 nodes 48213 time 52 pv e2e4 e7e5`.
impl fmt::Display for SearchInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "info score ")?;
        if self.score.abs() < MATE_THRESHOLD {
            write!(f, "cp {}", self.score)?;
        } else {
            let moves = (MATE_SCORE - self.score.abs()) / 2 + i32::from(self.score > 0);
            let signed = if self.score > 0 { moves } else { -moves };
            write!(f, "mate {signed}")?;
        }
        write!(
            f,
            " depth {} seldepth {} nodes {} time {} pv",
            self.depth,
            self.seldepth,
            self.total_nodes(),
            self.time.elapsed().as_millis()
        )?;
        for mv in self.pv() {
            write!(f, " {mv}")?;
        }
        Ok(())
    }
}
