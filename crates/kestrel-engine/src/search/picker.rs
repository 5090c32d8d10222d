//! Staged move picker.
//!
//! A picker lives for exactly one node's move loop and hands out one move
//! per call:
//!
//! ```text
//! Start -> TryHash -> GenerateAndScore -> Sequential -> Done
//! ```
//!
//! The hash move is tried before anything is generated, so a cutoff on it
//! skips generation entirely. Later stages fall through within a single
//! call until a move is available.

use std::fmt;

use kestrel_core::{Move, Position};
use tracing::{debug, error};

use crate::error::SearchError;
use crate::search::heuristics::{HistoryTable, KillerTable};
use crate::search::ordering::{ScoredMove, score_moves, score_noisy_moves};

/// Where a [`MovePicker`] is in its sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    TryHash,
    GenerateAndScore,
    Sequential,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::TryHash => "try-hash",
            Stage::GenerateAndScore => "generate-and-score",
            Stage::Sequential => "sequential",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy)]
enum Kind {
    /// Every pseudo-legal move, ordered with killers and history.
    Main { ply: usize },
    /// Captures and promotions only.
    Noisy,
}

/// Resumable, staged supplier of moves for one node.
#[derive(Debug)]
pub struct MovePicker {
    stage: Stage,
    kind: Kind,
    hash_move: Move,
    moves: Vec<ScoredMove>,
    dispatched: usize,
}

impl MovePicker {
    /// Picker for a main-search node at `ply`, trying `hash_move` first.
    pub fn new(hash_move: Move, ply: usize) -> Self {
        Self {
            stage: Stage::Start,
            kind: Kind::Main { ply },
            hash_move,
            moves: Vec::new(),
            dispatched: 0,
        }
    }

    /// Picker for quiescence: captures and promotions, no hash move.
    pub fn new_noisy() -> Self {
        Self {
            stage: Stage::Start,
            kind: Kind::Noisy,
            hash_move: Move::NULL,
            moves: Vec::new(),
            dispatched: 0,
        }
    }

    /// Current stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Yield the next move, or `None` once every move has been handed out.
    ///
    /// After the first `None` every later call returns `None` again. Each
    /// pseudo-legal move is yielded at most once; the hash move, if
    /// pseudo-legal, comes first.
    ///
    /// # Errors
    ///
    /// [`SearchError::IllegalMove`] if a generated move is not pseudo-legal
    /// in `pos`, which means the position or its generator broke contract.
    pub fn next<P: Position>(
        &mut self,
        pos: &P,
        killers: &KillerTable,
        history: &mut HistoryTable,
    ) -> Result<Option<Move>, SearchError> {
        loop {
            match self.stage {
                Stage::Start => self.stage = Stage::TryHash,

                Stage::TryHash => {
                    self.stage = Stage::GenerateAndScore;
                    if !self.hash_move.is_null() {
                        if pos.is_pseudo_legal(self.hash_move) {
                            return Ok(Some(self.hash_move));
                        }
                        // A stale hint: nothing to skip later either.
                        self.hash_move = Move::NULL;
                    }
                }

                Stage::GenerateAndScore => {
                    let generated = pos.generate_moves();
                    self.moves = match self.kind {
                        Kind::Main { ply } => {
                            let (scored, age_history) =
                                score_moves(pos, &generated, ply, pos.phase(), self.hash_move, killers, history);
                            if age_history {
                                debug!(ply, "history saturated, ageing before ordering");
                                history.age();
                            }
                            scored
                        }
                        Kind::Noisy => score_noisy_moves(pos, &generated),
                    };
                    // Stable: equal scores keep generation order.
                    self.moves.sort_by(|a, b| b.score.cmp(&a.score));
                    self.stage = Stage::Sequential;
                }

                Stage::Sequential => {
                    while let Some(&ScoredMove { mv, .. }) = self.moves.get(self.dispatched) {
                        self.dispatched += 1;
                        if !pos.is_pseudo_legal(mv) {
                            error!(%mv, position = %pos, stage = %Stage::Sequential, "picked move is not pseudo-legal");
                            return Err(SearchError::IllegalMove {
                                stage: Stage::Sequential,
                                mv,
                                position: pos.to_string(),
                            });
                        }
                        if mv == self.hash_move {
                            continue;
                        }
                        return Ok(Some(mv));
                    }
                    self.stage = Stage::Done;
                }

                Stage::Done => return Ok(None),
            }
        }
    }
}
