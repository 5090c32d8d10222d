//! Move scoring: hash move, exchange value, killers and history.

use kestrel_core::{Move, PieceKind, Position, PromotionPiece};

use crate::search::heuristics::{HistoryTable, KillerTable};

/// Score given to the hash move so it always sorts first.
pub const HASH_MOVE_SCORE: i32 = i32::MAX - 1;

/// Base for captures and promotions that do not lose material.
const GOOD_TACTICAL: i32 = 100_000;

/// Base for captures that lose material in the exchange. Still above every
/// killer and quiet move.
const BAD_TACTICAL: i32 = 20_000;

/// Killer bonuses: primary and secondary slot at this ply, then primary and
/// secondary slot two plies up (same side to move).
const KILLER_BONUS: [i32; 4] = [8_000, 7_500, 7_250, 7_000];

/// Late-move reduction in plies, indexed by the number of moves already tried.
const LMR_TABLE: [i32; 64] = [
    0, 0, 0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2, //
    2, 2, 2, 2, 2, 2, 2, 2, 3, 3, 3, 3, 3, 3, 3, 3, //
    3, 3, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4, 4, 4, 4, //
    4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, //
];

/// A move paired with its ordering priority. Higher scores are tried first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

/// Late-move reduction for a move tried after `moves_tried` others.
pub fn lmr_reduction(moves_tried: usize) -> i32 {
    LMR_TABLE[moves_tried.min(LMR_TABLE.len() - 1)]
}

/// Extra priority for a promotion; grows as material comes off the board.
fn promotion_bonus(promo: PromotionPiece, phase: f32) -> i32 {
    let gain = promo.to_piece_kind().value() - PieceKind::Pawn.value();
    (gain as f32 * 0.25 * (1.0 + phase.clamp(0.0, 1.0))) as i32
}

/// Most-valuable-victim / least-valuable-attacker tie-break, kept small so
/// it only separates moves with equal exchange values.
fn mvv_lva<P: Position>(pos: &P, mv: Move) -> i32 {
    let victim = pos.captured_piece(mv).map_or(0, PieceKind::value);
    let attacker = pos.moved_piece(mv).map_or(0, PieceKind::value);
    victim / 10 - attacker / 100
}

/// Score a capture or promotion by its exchange value.
fn score_tactical<P: Position>(pos: &P, mv: Move, phase: f32) -> i32 {
    let promo = mv.promotion_piece().map_or(0, |p| promotion_bonus(p, phase));
    let bonus = pos.see(mv) + promo + mvv_lva(pos, mv);
    if pos.see_ge(mv, 0) {
        GOOD_TACTICAL + bonus
    } else {
        (BAD_TACTICAL + bonus).max(KILLER_BONUS[0] + 1)
    }
}

/// Score every move of a main-search node.
///
/// Returns the scored moves in generation order and whether the history
/// table should be aged before the next bonus lands. The flag is raised
/// when any quiet move's history entry already sits at the bound.
pub fn score_moves<P: Position>(
    pos: &P,
    moves: &[Move],
    ply: usize,
    phase: f32,
    hash_move: Move,
    killers: &KillerTable,
    history: &HistoryTable,
) -> (Vec<ScoredMove>, bool) {
    let side = pos.side_to_move();
    let mut age_history = false;

    let scored = moves
        .iter()
        .map(|&mv| {
            let score = if !hash_move.is_null() && mv == hash_move {
                HASH_MOVE_SCORE
            } else if mv.is_tactical() {
                score_tactical(pos, mv, phase)
            } else if let Some(slot) = killers.slot_of(ply, mv) {
                KILLER_BONUS[slot]
            } else if let Some(slot) = ply.checked_sub(2).and_then(|p| killers.slot_of(p, mv)) {
                KILLER_BONUS[2 + slot]
            } else if let Some(piece) = pos.moved_piece(mv) {
                if history.is_saturated(side, piece, mv.dest()) {
                    age_history = true;
                }
                history.score(side, piece, mv.dest())
            } else {
                0
            };
            ScoredMove { mv, score }
        })
        .collect();

    (scored, age_history)
}

/// Score only the captures and promotions among `moves` (quiescence).
///
/// Killers and history are never consulted.
pub fn score_noisy_moves<P: Position>(pos: &P, moves: &[Move]) -> Vec<ScoredMove> {
    moves
        .iter()
        .filter(|mv| mv.is_tactical())
        .map(|&mv| ScoredMove {
            mv,
            score: score_tactical(pos, mv, 0.0),
        })
        .collect()
}
