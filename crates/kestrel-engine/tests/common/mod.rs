//! Test positions shared by the integration tests.

#![allow(dead_code)]

use std::fmt;

use kestrel_core::{Color, GameTree, Move, PieceKind, Position, Square};

fn sq(index: u8) -> Square {
    Square::from_index(index).unwrap()
}

/// SplitMix64 finalizer.
fn mix(mut x: u64) -> u64 {
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}

/// An unbounded game: every position has `branching` moves, the first of
/// which captures a pawn. Keys and evaluations are derived from the path.
pub struct Endless {
    keys: Vec<u64>,
    side: Color,
    branching: u8,
}

impl Endless {
    pub fn new(seed: u64, branching: u8) -> Self {
        Self {
            keys: vec![mix(seed)],
            side: Color::White,
            branching: branching.clamp(1, 16),
        }
    }

    pub fn ply(&self) -> usize {
        self.keys.len() - 1
    }

    fn moves(&self) -> impl Iterator<Item = Move> {
        (0..self.branching).map(|i| {
            if i == 0 {
                Move::capture(sq(i), sq(i + 16))
            } else {
                Move::quiet(sq(i), sq(i + 16))
            }
        })
    }

    fn top(&self) -> u64 {
        self.keys[self.keys.len() - 1]
    }
}

impl fmt::Display for Endless {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "endless ply {} ({} to move)", self.ply(), self.side)
    }
}

impl Position for Endless {
    fn side_to_move(&self) -> Color {
        self.side
    }

    fn key(&self) -> u64 {
        self.top()
    }

    fn generate_moves(&self) -> Vec<Move> {
        self.moves().collect()
    }

    fn is_pseudo_legal(&self, mv: Move) -> bool {
        self.moves().any(|m| m == mv)
    }

    fn moved_piece(&self, mv: Move) -> Option<PieceKind> {
        self.is_pseudo_legal(mv).then_some(PieceKind::Knight)
    }

    fn captured_piece(&self, mv: Move) -> Option<PieceKind> {
        (self.is_pseudo_legal(mv) && mv.is_capture()).then_some(PieceKind::Pawn)
    }

    fn make_move(&mut self, mv: Move) -> bool {
        self.keys.push(mix(self.top() ^ u64::from(mv.raw())));
        self.side = !self.side;
        true
    }

    fn unmake_move(&mut self, _mv: Move) {
        self.keys.pop();
        self.side = !self.side;
    }

    fn make_null_move(&mut self) {
        self.keys.push(mix(!self.top()));
        self.side = !self.side;
    }

    fn unmake_null_move(&mut self) {
        self.keys.pop();
        self.side = !self.side;
    }

    fn in_check(&self) -> bool {
        false
    }

    fn phase(&self) -> f32 {
        0.0
    }

    fn evaluate(&self) -> i32 {
        (mix(self.top()) % 201) as i32 - 100
    }

    fn see(&self, mv: Move) -> i32 {
        if mv.is_capture() { PieceKind::Pawn.value() } else { 0 }
    }

    fn greatest_tactical_gain(&self) -> i32 {
        PieceKind::Pawn.value()
    }

    fn is_draw(&self) -> bool {
        false
    }
}

/// A game tree whose generator also emits a move the position does not
/// accept as pseudo-legal.
pub struct Broken {
    pub tree: GameTree,
    pub bogus: Move,
}

impl fmt::Display for Broken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.tree, f)
    }
}

impl Position for Broken {
    fn side_to_move(&self) -> Color {
        self.tree.side_to_move()
    }

    fn key(&self) -> u64 {
        self.tree.key()
    }

    fn generate_moves(&self) -> Vec<Move> {
        let mut moves = self.tree.generate_moves();
        moves.push(self.bogus);
        moves
    }

    fn is_pseudo_legal(&self, mv: Move) -> bool {
        self.tree.is_pseudo_legal(mv)
    }

    fn moved_piece(&self, mv: Move) -> Option<PieceKind> {
        self.tree.moved_piece(mv)
    }

    fn captured_piece(&self, mv: Move) -> Option<PieceKind> {
        self.tree.captured_piece(mv)
    }

    fn make_move(&mut self, mv: Move) -> bool {
        self.tree.make_move(mv)
    }

    fn unmake_move(&mut self, mv: Move) {
        self.tree.unmake_move(mv)
    }

    fn make_null_move(&mut self) {
        self.tree.make_null_move()
    }

    fn unmake_null_move(&mut self) {
        self.tree.unmake_null_move()
    }

    fn in_check(&self) -> bool {
        self.tree.in_check()
    }

    fn phase(&self) -> f32 {
        self.tree.phase()
    }

    fn evaluate(&self) -> i32 {
        self.tree.evaluate()
    }

    fn see(&self, mv: Move) -> i32 {
        self.tree.see(mv)
    }

    fn greatest_tactical_gain(&self) -> i32 {
        self.tree.greatest_tactical_gain()
    }

    fn is_draw(&self) -> bool {
        self.tree.is_draw()
    }
}
