//! Best-move cache keyed by position hash.
//!
//! Stores only the move that was best (or caused a cutoff) the last time a
//! position was searched. Scores and bounds are not kept; the entry is an
//! ordering hint for the move picker.
//!
//! ## Bit layout
//!
//! ```text
//! entry (u64):
//!   bits 63-32: key   (upper 32 bits of the position key)
//!   bits 31-16: unused
//!   bits 15-0:  move
//! ```

use kestrel_core::Move;

/// Always-replace table of hash moves.
pub struct HashMoveTable {
    entries: Box<[u64]>,
    /// Index mask: `num_entries - 1` (power-of-two allocation).
    mask: u64,
}

impl HashMoveTable {
    /// Create a table with the given size in megabytes.
    ///
    /// The number of entries is rounded down to a power of two.
    pub fn new(mb: usize) -> Self {
        let bytes = mb.max(1) * 1024 * 1024;
        let slots = bytes / std::mem::size_of::<u64>();
        let num_entries = 1usize << slots.ilog2();
        Self {
            entries: vec![0; num_entries].into_boxed_slice(),
            mask: (num_entries - 1) as u64,
        }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Forget every entry, keeping the allocation.
    pub fn clear(&mut self) {
        self.entries.fill(0);
    }

    /// The stored move for `key`, or [`Move::NULL`] on a miss.
    pub fn probe(&self, key: u64) -> Move {
        let entry = self.entries[(key & self.mask) as usize];
        if entry == 0 || entry >> 32 != key >> 32 {
            return Move::NULL;
        }
        Move::from_raw((entry & 0xFFFF) as u16)
    }

    /// Record `mv` as the best move for `key`. Null moves are not stored.
    pub fn store(&mut self, key: u64, mv: Move) {
        if mv.is_null() {
            return;
        }
        let entry = (key >> 32) << 32 | mv.raw() as u64;
        self.entries[(key & self.mask) as usize] = entry;
    }
}

impl std::fmt::Debug for HashMoveTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashMoveTable")
            .field("capacity", &self.entries.len())
            .finish()
    }
}
