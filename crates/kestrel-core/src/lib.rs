//! Core types shared by the kestrel search: moves, squares, pieces, and the
//! [`Position`] contract the search drives.

mod chess_move;
mod error;
mod piece;
mod position;
mod square;
mod tree;

pub use chess_move::{Move, PromotionPiece};
pub use error::TreeError;
pub use piece::{Color, PieceKind};
pub use position::Position;
pub use square::Square;
pub use tree::{GameTree, NodeId};
