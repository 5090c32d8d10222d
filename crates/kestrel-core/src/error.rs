//! Errors raised while building a [`GameTree`](crate::tree::GameTree).

use crate::chess_move::Move;

/// Misuse of the game-tree builder API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The node id does not belong to this tree.
    #[error("unknown node {node}")]
    UnknownNode {
        /// The offending node index.
        node: usize,
    },
    /// The parent already has an edge for this move.
    #[error("node {node} already has move {mv}")]
    DuplicateMove {
        /// Parent node index.
        node: usize,
        /// The repeated move.
        mv: Move,
    },
    /// The parent has no edge for this move.
    #[error("node {node} has no move {mv}")]
    UnknownMove {
        /// Parent node index.
        node: usize,
        /// The missing move.
        mv: Move,
    },
    /// The null move cannot label an edge.
    #[error("the null move cannot be added to a tree")]
    NullMove,
}
