//! Search core for kestrel: move ordering and iterative-deepening
//! alpha-beta over any [`Position`](kestrel_core::Position).

pub mod error;
pub mod search;

pub use error::SearchError;
pub use search::Searcher;
pub use search::heuristics::{HISTORY_MAX, HistoryTable, KillerTable};
pub use search::info::{FAIL_HIGH_MOVES, SearchInfo};
pub use search::negamax::{DRAW_SCORE, INF, MATE_SCORE, MATE_THRESHOLD, MAX_PLY};
pub use search::ordering::{ScoredMove, score_moves, score_noisy_moves};
pub use search::params::SearchParams;
pub use search::picker::{MovePicker, Stage};
