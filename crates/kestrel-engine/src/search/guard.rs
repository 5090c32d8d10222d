//! Scoped make/unmake.
//!
//! A guard applies a move on creation and reverts it when dropped, so every
//! exit from a node (cutoff, pruning, time abort, error) restores the
//! position.

use std::ops::{Deref, DerefMut};

use kestrel_core::{Move, Position};

/// A move applied to a position for the lifetime of the guard.
pub struct MoveGuard<'a, P: Position> {
    pos: &'a mut P,
    mv: Move,
    legal: bool,
}

impl<'a, P: Position> MoveGuard<'a, P> {
    /// Apply `mv` to `pos`.
    pub fn make(pos: &'a mut P, mv: Move) -> Self {
        let legal = pos.make_move(mv);
        Self { pos, mv, legal }
    }

    /// Whether the move left the mover's king safe.
    pub fn is_legal(&self) -> bool {
        self.legal
    }
}

impl<P: Position> Deref for MoveGuard<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.pos
    }
}

impl<P: Position> DerefMut for MoveGuard<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        self.pos
    }
}

impl<P: Position> Drop for MoveGuard<'_, P> {
    fn drop(&mut self) {
        self.pos.unmake_move(self.mv);
    }
}

/// A passed turn for the lifetime of the guard.
pub struct NullMoveGuard<'a, P: Position> {
    pos: &'a mut P,
}

impl<'a, P: Position> NullMoveGuard<'a, P> {
    /// Pass the turn in `pos`.
    pub fn make(pos: &'a mut P) -> Self {
        pos.make_null_move();
        Self { pos }
    }
}

impl<P: Position> Deref for NullMoveGuard<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.pos
    }
}

impl<P: Position> DerefMut for NullMoveGuard<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        self.pos
    }
}

impl<P: Position> Drop for NullMoveGuard<'_, P> {
    fn drop(&mut self) {
        self.pos.unmake_null_move();
    }
}
