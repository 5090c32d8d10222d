//! Killer move table and history heuristic for quiet move ordering.

use kestrel_core::{Color, Move, PieceKind, Square};
use tracing::debug;

use crate::search::negamax::MAX_PLY;

/// Two killer moves per ply: quiet moves that caused beta cutoffs.
///
/// Slot 0 holds the most recent killer, slot 1 the one before it.
pub struct KillerTable {
    slots: [[Move; 2]; MAX_PLY + 1],
}

impl KillerTable {
    /// Create an empty killer table.
    pub fn new() -> Self {
        Self {
            slots: [[Move::NULL; 2]; MAX_PLY + 1],
        }
    }

    /// Forget every killer.
    pub fn clear(&mut self) {
        self.slots = [[Move::NULL; 2]; MAX_PLY + 1];
    }

    /// Store a killer move at the given ply.
    ///
    /// Tactical moves are ignored. Shifts slot 0 to slot 1 if the new move
    /// differs from slot 0.
    pub fn store(&mut self, ply: usize, mv: Move) {
        if ply > MAX_PLY || !mv.is_quiet() {
            return;
        }
        if self.slots[ply][0] != mv {
            self.slots[ply][1] = self.slots[ply][0];
            self.slots[ply][0] = mv;
        }
    }

    /// Which slot (0 = primary, 1 = secondary) holds `mv` at `ply`, if any.
    pub fn slot_of(&self, ply: usize, mv: Move) -> Option<usize> {
        if ply > MAX_PLY || mv.is_null() {
            return None;
        }
        self.slots[ply].iter().position(|&k| k == mv)
    }

    /// Check if a move is a killer at the given ply.
    pub fn is_killer(&self, ply: usize, mv: Move) -> bool {
        self.slot_of(ply, mv).is_some()
    }

    /// Both killer slots at `ply`, most recent first.
    pub fn at(&self, ply: usize) -> [Move; 2] {
        self.slots.get(ply).copied().unwrap_or([Move::NULL; 2])
    }
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Maximum absolute value for history scores.
pub const HISTORY_MAX: i32 = 6_400;

/// History heuristic table, indexed by `[side][piece_kind][to_square]`.
///
/// Rewards quiet moves that cause beta cutoffs and penalises the quiet
/// moves tried before them. Scores never leave `[-HISTORY_MAX, HISTORY_MAX]`:
/// an update that would overflow first halves the whole table.
pub struct HistoryTable {
    table: [[[i32; Square::COUNT]; PieceKind::COUNT]; Color::COUNT],
}

impl HistoryTable {
    /// Create a zeroed history table.
    pub fn new() -> Self {
        Self {
            table: [[[0; Square::COUNT]; PieceKind::COUNT]; Color::COUNT],
        }
    }

    /// Zero every entry.
    pub fn clear(&mut self) {
        self.table = [[[0; Square::COUNT]; PieceKind::COUNT]; Color::COUNT];
    }

    /// Get the history score for a quiet move.
    pub fn score(&self, side: Color, piece: PieceKind, to: Square) -> i32 {
        self.table[side.index()][piece.index()][to.index()]
    }

    /// Whether the entry sits at the bound, so any further bonus in that
    /// direction would overflow.
    pub fn is_saturated(&self, side: Color, piece: PieceKind, to: Square) -> bool {
        self.score(side, piece, to).abs() >= HISTORY_MAX
    }

    /// Reward a quiet move that caused a beta cutoff.
    ///
    /// Returns `true` if the table had to be aged first.
    pub fn update_good(&mut self, side: Color, piece: PieceKind, to: Square, depth: i32) -> bool {
        self.apply(side, piece, to, depth * depth)
    }

    /// Penalise a quiet move that was searched but did not cause a cutoff.
    ///
    /// Returns `true` if the table had to be aged first.
    pub fn update_bad(&mut self, side: Color, piece: PieceKind, to: Square, depth: i32) -> bool {
        self.apply(side, piece, to, -(depth * depth))
    }

    /// Halve every entry.
    pub fn age(&mut self) {
        for entry in self.table.iter_mut().flatten().flatten() {
            *entry /= 2;
        }
    }

    fn apply(&mut self, side: Color, piece: PieceKind, to: Square, delta: i32) -> bool {
        // A halved entry plus a half-range delta always fits.
        let delta = delta.clamp(-HISTORY_MAX / 2, HISTORY_MAX / 2);
        let current = self.score(side, piece, to);
        let aged = (current + delta).abs() > HISTORY_MAX;
        if aged {
            debug!(current, delta, "history overflow, ageing table");
            self.age();
        }
        let entry = &mut self.table[side.index()][piece.index()][to.index()];
        *entry = (*entry + delta).clamp(-HISTORY_MAX, HISTORY_MAX);
        aged
    }
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}
