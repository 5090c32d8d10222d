//! Tunable search parameters.

use crate::search::negamax::MAX_PLY;

/// Pruning, reduction and window parameters for one [`Searcher`](crate::Searcher).
///
/// [`Default`] gives the tuned values; tests and tools override single fields
/// with struct-update syntax.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    /// Deepest iteration iterative deepening will start.
    pub max_depth: i32,
    /// First depth searched with an aspiration window.
    pub aspiration_min_depth: i32,
    /// Half-width of the initial aspiration window, in centipawns.
    pub aspiration_window: i32,
    /// Extra depth removed from a null-move search.
    pub null_move_reduction: i32,
    /// Shallowest remaining depth at which null moves are tried.
    pub null_move_min_depth: i32,
    /// Null moves are only tried while `phase < null_move_phase_limit`.
    pub null_move_phase_limit: f32,
    /// Deepest remaining depth at which futility pruning applies.
    pub futility_max_depth: i32,
    /// Futility margin per ply of remaining depth.
    pub futility_margin: i32,
    /// Safety margin for delta pruning in quiescence.
    pub delta_margin: i32,
    /// Shallowest remaining depth at which late moves are reduced.
    pub lmr_min_depth: i32,
    /// Deepest remaining depth at which late quiet moves are pruned.
    pub lmp_max_depth: i32,
    /// Legal moves searched before late quiet moves are pruned.
    pub lmp_move_count: usize,
    /// Maximum plies of quiescence below the horizon.
    pub max_qsearch_depth: usize,
    /// Size of the hash-move table in megabytes.
    pub hash_moves_mb: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_depth: (MAX_PLY - 1) as i32,
            aspiration_min_depth: 5,
            aspiration_window: 35,
            null_move_reduction: 2,
            null_move_min_depth: 3,
            null_move_phase_limit: 0.8,
            futility_max_depth: 8,
            futility_margin: 150,
            delta_margin: 125,
            lmr_min_depth: 3,
            lmp_max_depth: 3,
            lmp_move_count: 7,
            max_qsearch_depth: 16,
            hash_moves_mb: 4,
        }
    }
}
