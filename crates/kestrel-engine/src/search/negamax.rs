//! Negamax alpha-beta search with quiescence.

use kestrel_core::{Move, PieceKind, Position};
use tracing::debug;

use crate::error::SearchError;
use crate::search::control::TimeControl;
use crate::search::guard::{MoveGuard, NullMoveGuard};
use crate::search::hash_moves::HashMoveTable;
use crate::search::heuristics::{HistoryTable, KillerTable};
use crate::search::info::SearchInfo;
use crate::search::ordering::lmr_reduction;
use crate::search::params::SearchParams;
use crate::search::picker::MovePicker;

/// Score representing an unreachable upper/lower bound.
pub const INF: i32 = 30_000;

/// Base score for checkmate (adjusted by ply for mate distance).
pub const MATE_SCORE: i32 = 29_000;

/// Scores above this threshold indicate a forced mate.
pub const MATE_THRESHOLD: i32 = 28_000;

/// Score of a drawn position.
pub const DRAW_SCORE: i32 = 0;

/// Maximum search depth (in plies) for array sizing and recursion limits.
pub const MAX_PLY: usize = 128;

/// Aspiration failures tolerated before the window is opened completely.
pub const MAX_ASPIRATION_WIDENINGS: u32 = 3;

/// Negamax alpha-beta search.
///
/// Returns the best score for the side to move. The principal
/// variation is collected into `ctx.pv`. Once the time budget runs out the
/// returned score is meaningless and `ctx.info.stopped` is set; callers must
/// check it before using the result.
pub(super) fn negamax<P: Position>(
    pos: &mut P,
    depth: i32,
    ply: usize,
    mut alpha: i32,
    beta: i32,
    allow_null: bool,
    ctx: &mut SearchContext<'_>,
) -> Result<i32, SearchError> {
    ctx.pv.clear_ply(ply);

    // Horizon: resolve captures before trusting the evaluation
    if depth <= 0 || ply >= MAX_PLY - 1 {
        return qsearch(pos, ply, 0, alpha, beta, ctx);
    }

    ctx.info.nodes += 1;
    ctx.info.seldepth = ctx.info.seldepth.max(ply);

    if ctx.should_stop() {
        return Ok(0);
    }

    if ply > 0 && pos.is_draw() {
        return Ok(DRAW_SCORE);
    }

    let params = ctx.params;
    let in_check = pos.in_check();

    // Null-move pruning: if passing still fails high, a real move will too
    if allow_null
        && ply > 0
        && !in_check
        && depth >= params.null_move_min_depth
        && pos.phase() < params.null_move_phase_limit
        && beta.abs() < MATE_THRESHOLD
    {
        let reduced = depth - 1 - params.null_move_reduction;
        let score = {
            let mut passed = NullMoveGuard::make(pos);
            -negamax(&mut *passed, reduced, ply + 1, -beta, -beta + 1, false, ctx)?
        };
        if ctx.info.stopped {
            return Ok(0);
        }
        if score >= beta {
            return Ok(beta);
        }
    }

    // Futility: near the horizon, quiet moves cannot lift a hopeless eval
    let futile = ply > 0
        && !in_check
        && depth <= params.futility_max_depth
        && alpha.abs() < MATE_THRESHOLD
        && pos.evaluate() + params.futility_margin * depth <= alpha;

    let side = pos.side_to_move();
    let hash_move = ctx.hash_moves.probe(pos.key());
    let mut picker = MovePicker::new(hash_move, ply);

    let mut best_score = -INF;
    let mut best_move = Move::NULL;
    let mut legal = 0usize;
    let mut tried = 0usize;
    let mut quiets_tried: Vec<(PieceKind, Move)> = Vec::new();

    while let Some(mv) = picker.next(pos, &*ctx.killers, &mut *ctx.history)? {
        let quiet = mv.is_quiet();
        let piece = pos.moved_piece(mv);

        // Late-move pruning
        if quiet && !in_check && depth <= params.lmp_max_depth && legal > params.lmp_move_count {
            continue;
        }

        let mut child = MoveGuard::make(pos, mv);
        if !child.is_legal() {
            continue;
        }
        legal += 1;
        let gives_check = child.in_check();

        if futile && quiet && !gives_check && legal > 1 {
            continue;
        }
        tried += 1;

        // Late-move reductions: try a reduced null window first
        let reduction = if depth >= params.lmr_min_depth && quiet && !in_check && !gives_check {
            lmr_reduction(tried - 1)
        } else {
            0
        };

        let mut score;
        if reduction > 0 {
            let reduced = (depth - 1 - reduction).max(1);
            score = -negamax(&mut *child, reduced, ply + 1, -alpha - 1, -alpha, true, ctx)?;
            if score > alpha && !ctx.info.stopped {
                score = -negamax(&mut *child, depth - 1, ply + 1, -beta, -alpha, true, ctx)?;
            }
        } else {
            score = -negamax(&mut *child, depth - 1, ply + 1, -beta, -alpha, true, ctx)?;
        }
        drop(child);

        if ctx.info.stopped {
            return Ok(0);
        }

        if score > best_score {
            best_score = score;
            best_move = mv;
            if score > alpha {
                alpha = score;
                ctx.pv.update(ply, mv);
            }
        }

        if alpha >= beta {
            ctx.info.record_fail_high(tried);
            if quiet {
                ctx.killers.store(ply, mv);
                if let Some(piece) = piece {
                    ctx.history.update_good(side, piece, mv.dest(), depth);
                }
                for &(p, q) in &quiets_tried {
                    ctx.history.update_bad(side, p, q.dest(), depth);
                }
            }
            break;
        }

        if quiet {
            if let Some(piece) = piece {
                quiets_tried.push((piece, mv));
            }
        }
    }

    // No legal moves: checkmate or stalemate
    if legal == 0 {
        return Ok(if in_check {
            -(MATE_SCORE - ply as i32)
        } else {
            DRAW_SCORE
        });
    }

    ctx.hash_moves.store(pos.key(), best_move);
    Ok(best_score)
}

/// Quiescence search: resolve tactical sequences before evaluating.
///
/// Only considers captures and promotions (via [`MovePicker::new_noisy`])
/// to avoid the horizon effect.
pub(super) fn qsearch<P: Position>(
    pos: &mut P,
    ply: usize,
    qdepth: usize,
    mut alpha: i32,
    beta: i32,
    ctx: &mut SearchContext<'_>,
) -> Result<i32, SearchError> {
    ctx.pv.clear_ply(ply);
    ctx.info.qnodes += 1;
    ctx.info.seldepth = ctx.info.seldepth.max(ply);

    if ctx.should_stop() {
        return Ok(0);
    }

    // Stand pat: the side to move can choose not to capture
    let stand_pat = pos.evaluate();
    if ply >= MAX_PLY - 1 || qdepth >= ctx.params.max_qsearch_depth {
        return Ok(stand_pat);
    }
    if stand_pat >= beta {
        return Ok(stand_pat);
    }

    // Delta pruning: even the best capture on the board cannot reach alpha
    let delta_margin = ctx.params.delta_margin;
    if stand_pat + pos.greatest_tactical_gain() + delta_margin < alpha {
        return Ok(alpha);
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    let mut picker = MovePicker::new_noisy();

    while let Some(mv) = picker.next(pos, &*ctx.killers, &mut *ctx.history)? {
        let victim = pos.captured_piece(mv).map_or(0, PieceKind::value);
        if !mv.is_promotion() && stand_pat + victim + delta_margin <= alpha {
            continue;
        }

        let mut child = MoveGuard::make(pos, mv);
        if !child.is_legal() {
            continue;
        }
        let score = -qsearch(&mut *child, ply + 1, qdepth + 1, -beta, -alpha, ctx)?;
        drop(child);

        if ctx.info.stopped {
            return Ok(0);
        }
        if score >= beta {
            return Ok(score);
        }
        if score > alpha {
            alpha = score;
            ctx.pv.update(ply, mv);
        }
    }

    Ok(alpha)
}

/// Search the root at `depth`, starting from a narrow window around
/// `prev_score` once depth reaches `aspiration_min_depth`.
///
/// A fail low or high widens the failing side with a doubling margin; after
/// [`MAX_ASPIRATION_WIDENINGS`] failures the window is fully open, where the
/// score always lands inside.
pub(super) fn aspiration_search<P: Position>(
    pos: &mut P,
    depth: i32,
    prev_score: i32,
    ctx: &mut SearchContext<'_>,
) -> Result<i32, SearchError> {
    let params = ctx.params;
    if depth < params.aspiration_min_depth {
        return negamax(pos, depth, 0, -INF, INF, true, ctx);
    }

    let mut delta = params.aspiration_window;
    let mut alpha = (prev_score - delta).max(-INF);
    let mut beta = (prev_score + delta).min(INF);
    let mut widenings = 0;

    loop {
        let score = negamax(pos, depth, 0, alpha, beta, true, ctx)?;
        if ctx.info.stopped {
            return Ok(score);
        }

        if score <= alpha {
            debug!(depth, score, alpha, beta, "aspiration fail low");
            alpha = (alpha - delta).max(-INF);
        } else if score >= beta {
            debug!(depth, score, alpha, beta, "aspiration fail high");
            beta = (beta + delta).min(INF);
        } else {
            return Ok(score);
        }

        widenings += 1;
        delta *= 2;
        if widenings >= MAX_ASPIRATION_WIDENINGS {
            alpha = -INF;
            beta = INF;
        }
    }
}

/// Triangular PV table for collecting principal variation lines.
///
/// Each row `ply` contains the PV continuation from that ply onward.
pub struct PvTable {
    moves: [[Move; MAX_PLY]; MAX_PLY],
    len: [usize; MAX_PLY],
}

impl PvTable {
    /// Create an empty PV table.
    pub fn new() -> Self {
        Self {
            moves: [[Move::NULL; MAX_PLY]; MAX_PLY],
            len: [0; MAX_PLY],
        }
    }

    /// Clear the PV line at `ply` (called at the top of each node).
    pub fn clear_ply(&mut self, ply: usize) {
        if ply < MAX_PLY {
            self.len[ply] = 0;
        }
    }

    /// Update the PV at `ply`: set `mv` as the best move and copy
    /// the continuation from `ply + 1`.
    ///
    /// After this call, `self.moves[ply]` = `[mv, pv[ply+1]...]`.
    pub fn update(&mut self, ply: usize, mv: Move) {
        if ply >= MAX_PLY {
            return;
        }

        self.moves[ply][0] = mv;

        let child_ply = ply + 1;
        if child_ply < MAX_PLY {
            let copy_len = self.len[child_ply].min(MAX_PLY - 1 - ply);
            let (top, bottom) = self.moves.split_at_mut(child_ply);
            top[ply][1..1 + copy_len].copy_from_slice(&bottom[0][..copy_len]);
            self.len[ply] = 1 + copy_len;
        } else {
            self.len[ply] = 1;
        }
    }

    /// The principal variation from the root.
    pub fn root_pv(&self) -> &[Move] {
        &self.moves[0][..self.len[0]]
    }
}

impl Default for PvTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Search state threaded through negamax calls.
pub(super) struct SearchContext<'a> {
    /// Counters, clock and stop latch of the current run.
    pub info: &'a mut SearchInfo,
    /// Principal variation table.
    pub pv: PvTable,
    pub killers: &'a mut KillerTable,
    pub history: &'a mut HistoryTable,
    pub hash_moves: &'a mut HashMoveTable,
    pub params: &'a SearchParams,
    /// Depth of the iteration in progress. Depth 1 is never interrupted.
    pub iteration: i32,
}

impl SearchContext<'_> {
    /// Whether the search must unwind now.
    ///
    /// Reads the clock only every few thousand nodes and latches the answer
    /// in `info.stopped`.
    fn should_stop(&mut self) -> bool {
        if self.info.stopped {
            return true;
        }
        if self.iteration > 1 && TimeControl::should_check(self.info.total_nodes()) && self.info.time_over() {
            debug!(iteration = self.iteration, nodes = self.info.total_nodes(), "time budget spent");
            self.info.stopped = true;
        }
        self.info.stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kestrel_core::{Color, GameTree, Square};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    struct Tables {
        info: SearchInfo,
        killers: KillerTable,
        history: HistoryTable,
        hash_moves: HashMoveTable,
        params: SearchParams,
    }

    impl Tables {
        fn new() -> Self {
            Self {
                info: SearchInfo::new(),
                killers: KillerTable::new(),
                history: HistoryTable::new(),
                hash_moves: HashMoveTable::new(1),
                params: SearchParams::default(),
            }
        }

        fn ctx(&mut self) -> SearchContext<'_> {
            SearchContext {
                info: &mut self.info,
                pv: PvTable::new(),
                killers: &mut self.killers,
                history: &mut self.history,
                hash_moves: &mut self.hash_moves,
                params: &self.params,
                iteration: 1,
            }
        }
    }

    fn idx(index: u8) -> Square {
        Square::from_index(index).unwrap()
    }

    /// White node with a single quiet move into a Black stalemate.
    fn passing_tree(phase: f32) -> GameTree {
        let mut tree = GameTree::new(Color::White, 500);
        let root = tree.root();
        tree.set_phase(root, phase).unwrap();
        tree.add_move(root, Move::quiet(sq("e2"), sq("e3")), PieceKind::Pawn, 500).unwrap();
        tree
    }

    #[test]
    fn null_move_cutoff_returns_beta() {
        let mut tree = passing_tree(0.0);
        let mut tables = Tables::new();
        let mut ctx = tables.ctx();
        let score = negamax(&mut tree, 3, 1, 0, 100, true, &mut ctx).unwrap();
        assert_eq!(score, 100);
        // Only the passed position was looked at.
        assert_eq!(ctx.info.nodes, 1);
        assert_eq!(ctx.info.qnodes, 1);
        assert_eq!(tree.ply(), 0);
        assert!(ctx.hash_moves.probe(tree.key()).is_null());
    }

    #[test]
    fn null_move_is_skipped_in_the_endgame() {
        let mut tree = passing_tree(0.9);
        let mut tables = Tables::new();
        let mut ctx = tables.ctx();
        let score = negamax(&mut tree, 3, 1, 0, 100, true, &mut ctx).unwrap();
        assert_eq!(score, DRAW_SCORE);
        assert_eq!(ctx.info.nodes, 2);
        assert_eq!(ctx.info.qnodes, 0);
    }

    #[test]
    fn null_move_needs_permission() {
        let mut tree = passing_tree(0.0);
        let mut tables = Tables::new();
        let mut ctx = tables.ctx();
        let score = negamax(&mut tree, 3, 1, 0, 100, false, &mut ctx).unwrap();
        assert_eq!(score, DRAW_SCORE);
        assert_eq!(ctx.info.nodes, 2);
    }

    /// White node far below alpha: a quiet move that would win big comes
    /// second and is pruned unless it gives check.
    fn futile_tree(second_gives_check: bool) -> (GameTree, Move) {
        let mut tree = GameTree::new(Color::White, -500);
        let root = tree.root();
        tree.add_move(root, Move::quiet(sq("a2"), sq("a3")), PieceKind::Pawn, -500).unwrap();
        let shot = Move::quiet(sq("d1"), sq("h5"));
        let after = tree.add_move(root, shot, PieceKind::Queen, 900).unwrap();
        tree.set_in_check(after, second_gives_check).unwrap();
        (tree, shot)
    }

    #[test]
    fn futility_skips_quiet_moves_after_the_first() {
        let (mut tree, _) = futile_tree(false);
        let mut tables = Tables::new();
        let mut ctx = tables.ctx();
        let score = negamax(&mut tree, 1, 1, 0, 100, true, &mut ctx).unwrap();
        assert_eq!(score, -500);
        assert_eq!(ctx.info.qnodes, 1);
    }

    #[test]
    fn futility_keeps_checking_moves() {
        let (mut tree, shot) = futile_tree(true);
        let mut tables = Tables::new();
        let mut ctx = tables.ctx();
        let score = negamax(&mut tree, 1, 1, 0, 100, true, &mut ctx).unwrap();
        assert_eq!(score, 100);
        assert_eq!(ctx.info.qnodes, 2);
        assert_eq!(ctx.info.fail_high, [0, 1, 0, 0, 0, 0]);
        assert_eq!(ctx.killers.at(1)[0], shot);
    }

    #[test]
    fn late_quiet_moves_are_pruned_at_low_depth() {
        let mut tree = GameTree::new(Color::White, 0);
        let root = tree.root();
        for i in 0..8 {
            tree.add_move(root, Move::quiet(idx(i), idx(i + 16)), PieceKind::Knight, 0).unwrap();
        }
        // Ninth move would win a rook, but seven moves were already searched.
        tree.add_move(root, Move::quiet(idx(8), idx(24)), PieceKind::Rook, 800).unwrap();

        let mut tables = Tables::new();
        let mut ctx = tables.ctx();
        let score = negamax(&mut tree, 1, 1, -INF, INF, true, &mut ctx).unwrap();
        assert_eq!(score, 0);
        assert_eq!(ctx.info.qnodes, 8);
    }

    /// Four quiet root moves, each followed by a forced two-ply line. Only
    /// the last one leads anywhere (+300).
    fn lmr_tree() -> (GameTree, Move) {
        let mut tree = GameTree::new(Color::White, 0);
        let root = tree.root();
        let mut last = Move::NULL;
        for i in 0..4u8 {
            let eval = if i == 3 { 300 } else { 0 };
            let mv = Move::quiet(idx(i), idx(i + 8));
            let c = tree.add_move(root, mv, PieceKind::Knight, eval).unwrap();
            let g = tree.add_move(c, Move::quiet(idx(48 + i), idx(40 + i)), PieceKind::Pawn, eval).unwrap();
            tree.add_move(g, Move::quiet(idx(16 + i), idx(24 + i)), PieceKind::Rook, eval).unwrap();
            last = mv;
        }
        (tree, last)
    }

    #[test]
    fn reduced_move_that_beats_alpha_is_searched_again() {
        let (mut tree, best) = lmr_tree();
        let mut tables = Tables::new();
        let mut ctx = tables.ctx();
        let score = negamax(&mut tree, 3, 0, -INF, INF, true, &mut ctx).unwrap();
        assert_eq!(score, 300);
        assert_eq!(ctx.pv.root_pv()[0], best);
        // root + three full lines + reduced search + full re-search
        assert_eq!(ctx.info.nodes, 1 + 3 * 2 + 1 + 2);
    }

    #[test]
    fn without_reductions_every_move_is_searched_once() {
        let (mut tree, best) = lmr_tree();
        let mut tables = Tables::new();
        tables.params.lmr_min_depth = 100;
        let mut ctx = tables.ctx();
        let score = negamax(&mut tree, 3, 0, -INF, INF, true, &mut ctx).unwrap();
        assert_eq!(score, 300);
        assert_eq!(ctx.pv.root_pv()[0], best);
        assert_eq!(ctx.info.nodes, 1 + 4 * 2);
    }

    #[test]
    fn quiet_cutoff_updates_killers_and_history() {
        let mut tree = GameTree::new(Color::White, 0);
        let root = tree.root();
        let dull = Move::quiet(sq("g1"), sq("f3"));
        let strong = Move::quiet(sq("f1"), sq("c4"));
        tree.add_move(root, dull, PieceKind::Knight, 0).unwrap();
        tree.add_move(root, strong, PieceKind::Bishop, 200).unwrap();

        let mut tables = Tables::new();
        let mut ctx = tables.ctx();
        let score = negamax(&mut tree, 1, 2, 0, 50, false, &mut ctx).unwrap();
        assert_eq!(score, 50);
        assert_eq!(ctx.info.fail_high, [0, 1, 0, 0, 0, 0]);
        assert_eq!(ctx.killers.at(2), [strong, Move::NULL]);
        assert_eq!(ctx.history.score(Color::White, PieceKind::Bishop, sq("c4")), 1);
        assert_eq!(ctx.history.score(Color::White, PieceKind::Knight, sq("f3")), -1);
        assert_eq!(ctx.hash_moves.probe(tree.key()), strong);
    }

    #[test]
    fn illegal_moves_are_skipped() {
        let mut tree = GameTree::new(Color::White, 0);
        let root = tree.root();
        let blunder = Move::quiet(sq("e1"), sq("e2"));
        let safe = Move::quiet(sq("e1"), sq("f1"));
        tree.add_move(root, blunder, PieceKind::King, 900).unwrap();
        tree.add_move(root, safe, PieceKind::King, 10).unwrap();
        tree.set_illegal(root, blunder).unwrap();

        let mut tables = Tables::new();
        let mut ctx = tables.ctx();
        let score = negamax(&mut tree, 1, 0, -INF, INF, true, &mut ctx).unwrap();
        assert_eq!(score, 10);
        assert_eq!(ctx.pv.root_pv(), &[safe]);
        assert_eq!(ctx.info.qnodes, 1);
        assert_eq!(tree.ply(), 0);
    }

    #[test]
    fn only_illegal_moves_is_mate_or_stalemate() {
        let mut tree = GameTree::new(Color::White, 0);
        let root = tree.root();
        let mv = Move::quiet(sq("e1"), sq("e2"));
        tree.add_move(root, mv, PieceKind::King, 0).unwrap();
        tree.set_illegal(root, mv).unwrap();

        let mut tables = Tables::new();
        let mut ctx = tables.ctx();
        assert_eq!(negamax(&mut tree, 2, 3, -INF, INF, true, &mut ctx).unwrap(), DRAW_SCORE);

        tree.set_in_check(root, true).unwrap();
        assert_eq!(negamax(&mut tree, 2, 3, -INF, INF, true, &mut ctx).unwrap(), -(MATE_SCORE - 3));
        assert!(ctx.pv.root_pv().is_empty());
    }

    #[test]
    fn drawn_node_below_root_scores_zero() {
        let mut tree = GameTree::new(Color::White, 700);
        let root = tree.root();
        tree.add_capture(root, Move::capture(sq("d1"), sq("d8")), PieceKind::Queen, PieceKind::Queen, 1700)
            .unwrap();
        tree.set_draw(root, true).unwrap();

        let mut tables = Tables::new();
        let mut ctx = tables.ctx();
        assert_eq!(negamax(&mut tree, 2, 1, -INF, INF, true, &mut ctx).unwrap(), DRAW_SCORE);
        assert_eq!(ctx.info.nodes, 1);
        assert_eq!(ctx.info.qnodes, 0);

        // The root itself is always searched.
        let score = negamax(&mut tree, 1, 0, -INF, INF, true, &mut ctx).unwrap();
        assert_eq!(score, 1700);
    }

    #[test]
    fn depth_zero_without_captures_returns_stand_pat() {
        let mut tree = GameTree::new(Color::Black, 120);
        let root = tree.root();
        tree.add_move(root, Move::quiet(sq("g8"), sq("f6")), PieceKind::Knight, 0).unwrap();

        let mut tables = Tables::new();
        let mut ctx = tables.ctx();
        let score = negamax(&mut tree, 0, 0, -INF, INF, true, &mut ctx).unwrap();
        assert_eq!(score, -120);
        assert_eq!(ctx.info.qnodes, 1);
        assert_eq!(ctx.info.nodes, 0);
    }

    #[test]
    fn qsearch_takes_a_free_piece() {
        let mut tree = GameTree::new(Color::White, 0);
        let root = tree.root();
        let grab = Move::capture(sq("c4"), sq("f7"));
        tree.add_capture(root, grab, PieceKind::Bishop, PieceKind::Rook, 500).unwrap();

        let mut tables = Tables::new();
        let mut ctx = tables.ctx();
        let score = qsearch(&mut tree, 0, 0, -INF, INF, &mut ctx).unwrap();
        assert_eq!(score, 500);
        assert_eq!(ctx.pv.root_pv(), &[grab]);
        assert_eq!(tree.current(), tree.root());
    }

    #[test]
    fn qsearch_stands_pat_over_losing_capture() {
        let mut tree = GameTree::new(Color::White, 40);
        let root = tree.root();
        let bad = Move::capture(sq("d1"), sq("d7"));
        let after = tree.add_capture(root, bad, PieceKind::Queen, PieceKind::Pawn, 140).unwrap();
        // The pawn was defended: black recaptures the queen.
        let recapture = Move::capture(sq("c8"), sq("d7"));
        tree.add_capture(after, recapture, PieceKind::Bishop, PieceKind::Queen, -835).unwrap();

        let mut tables = Tables::new();
        let mut ctx = tables.ctx();
        let score = qsearch(&mut tree, 0, 0, -INF, INF, &mut ctx).unwrap();
        assert_eq!(score, 40);
        assert!(ctx.pv.root_pv().is_empty());
    }

    #[test]
    fn qsearch_depth_limit_returns_eval() {
        let mut tree = GameTree::new(Color::White, 10);
        let root = tree.root();
        tree.add_capture(root, Move::capture(sq("a1"), sq("a8")), PieceKind::Rook, PieceKind::Rook, 510)
            .unwrap();
        let mut tables = Tables::new();
        tables.params.max_qsearch_depth = 0;
        let mut ctx = tables.ctx();
        assert_eq!(qsearch(&mut tree, 0, 0, -INF, INF, &mut ctx).unwrap(), 10);
    }

    #[test]
    fn pv_update_splices_child_line() {
        let a = Move::quiet(sq("e2"), sq("e4"));
        let b = Move::quiet(sq("e7"), sq("e5"));
        let c = Move::quiet(sq("g1"), sq("f3"));
        let mut pv = PvTable::new();
        pv.update(2, c);
        pv.update(1, b);
        pv.update(0, a);
        assert_eq!(pv.root_pv(), &[a, b, c]);

        pv.clear_ply(1);
        pv.update(0, b);
        assert_eq!(pv.root_pv(), &[b]);
    }

    #[test]
    fn pv_update_at_last_ply_does_not_overflow() {
        let mv = Move::quiet(sq("a2"), sq("a3"));
        let mut pv = PvTable::new();
        pv.update(MAX_PLY - 1, mv);
        pv.update(MAX_PLY, mv);
        for ply in (0..MAX_PLY - 1).rev() {
            pv.update(ply, mv);
        }
        assert_eq!(pv.root_pv().len(), MAX_PLY);
    }
}
