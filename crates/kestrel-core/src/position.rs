//! The contract the search core expects from a game position.

use std::fmt;

use crate::chess_move::Move;
use crate::piece::{Color, PieceKind};

/// A mutable game position driven by make/unmake.
///
/// Implementors own board representation, move generation, evaluation and
/// static exchange evaluation. The search never inspects the board directly;
/// everything it needs goes through this trait. `Display` renders a snapshot
/// used in diagnostics.
pub trait Position: fmt::Display {
    /// Side to move.
    fn side_to_move(&self) -> Color;

    /// Hash key identifying the position (including side to move).
    fn key(&self) -> u64;

    /// All pseudo-legal moves, freshly generated, in generation order.
    fn generate_moves(&self) -> Vec<Move>;

    /// Whether `mv` is pseudo-legal in this exact position.
    fn is_pseudo_legal(&self, mv: Move) -> bool;

    /// Kind of the piece standing on the move's source square.
    fn moved_piece(&self, mv: Move) -> Option<PieceKind>;

    /// Kind of the piece the move captures, if any.
    fn captured_piece(&self, mv: Move) -> Option<PieceKind>;

    /// Apply a pseudo-legal move.
    ///
    /// Returns `false` when the move leaves the mover's king attacked. The
    /// move is applied either way and must be reverted with
    /// [`unmake_move`](Position::unmake_move).
    fn make_move(&mut self, mv: Move) -> bool;

    /// Revert the most recent [`make_move`](Position::make_move) of `mv`.
    fn unmake_move(&mut self, mv: Move);

    /// Pass the turn without moving.
    fn make_null_move(&mut self);

    /// Revert the most recent [`make_null_move`](Position::make_null_move).
    fn unmake_null_move(&mut self);

    /// Whether the side to move is in check.
    fn in_check(&self) -> bool;

    /// Game progression in `[0, 1]`: 0 is the opening, 1 a bare endgame.
    fn phase(&self) -> f32;

    /// Static evaluation in centipawns from the side to move's point of view.
    fn evaluate(&self) -> i32;

    /// Static exchange evaluation of `mv`: net material the mover expects
    /// to gain on the destination square.
    fn see(&self, mv: Move) -> i32;

    /// Whether the exchange started by `mv` nets at least `threshold`.
    fn see_ge(&self, mv: Move, threshold: i32) -> bool {
        self.see(mv) >= threshold
    }

    /// Upper bound on the material the side to move can win with one
    /// tactical move. Used for delta pruning.
    fn greatest_tactical_gain(&self) -> i32;

    /// Whether the position is drawn by rule (repetition, fifty moves,
    /// insufficient material).
    fn is_draw(&self) -> bool;
}
