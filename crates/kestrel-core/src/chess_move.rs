//! Move representation, bit-packed into a u16.

use std::fmt;

use crate::piece::PieceKind;
use crate::square::Square;

const SRC_MASK: u16 = 0x003F;
const DST_MASK: u16 = 0x0FC0;
const PROMO_MASK: u16 = 0x3000;
const PROMOTION_FLAG: u16 = 0x4000;
const CAPTURE_FLAG: u16 = 0x8000;
const DST_SHIFT: u32 = 6;
const PROMO_SHIFT: u32 = 12;

/// The piece a pawn promotes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PromotionPiece {
    Knight = 0,
    Bishop = 1,
    Rook = 2,
    Queen = 3,
}

impl PromotionPiece {
    /// Convert to the corresponding [`PieceKind`].
    pub const fn to_piece_kind(self) -> PieceKind {
        match self {
            PromotionPiece::Knight => PieceKind::Knight,
            PromotionPiece::Bishop => PieceKind::Bishop,
            PromotionPiece::Rook => PieceKind::Rook,
            PromotionPiece::Queen => PieceKind::Queen,
        }
    }
}

/// A move encoded in 16 bits.
///
/// ```text
/// bits  0-5:  source square      (0-63)
/// bits  6-11: destination square (0-63)
/// bits 12-13: promotion piece    (Knight=0, Bishop=1, Rook=2, Queen=3)
/// bit  14:    promotion flag
/// bit  15:    capture flag
/// ```
///
/// [`Move::NULL`] packs a1→a1, which no piece can play, so it never
/// collides with a real move.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    /// The "no move" sentinel.
    pub const NULL: Move = Move(0);

    const fn squares(source: Square, dest: Square) -> u16 {
        (source.index() as u16) | ((dest.index() as u16) << DST_SHIFT)
    }

    /// A non-capturing, non-promoting move.
    pub const fn quiet(source: Square, dest: Square) -> Move {
        Move(Self::squares(source, dest))
    }

    /// A capture.
    pub const fn capture(source: Square, dest: Square) -> Move {
        Move(Self::squares(source, dest) | CAPTURE_FLAG)
    }

    /// A promotion, optionally capturing on the promotion square.
    pub const fn promotion(source: Square, dest: Square, promo: PromotionPiece, capture: bool) -> Move {
        let capture_bit = if capture { CAPTURE_FLAG } else { 0 };
        Move(
            Self::squares(source, dest)
                | ((promo as u16) << PROMO_SHIFT)
                | PROMOTION_FLAG
                | capture_bit,
        )
    }

    /// Source square.
    pub const fn source(self) -> Square {
        Square::from_index_unchecked((self.0 & SRC_MASK) as u8)
    }

    /// Destination square.
    pub const fn dest(self) -> Square {
        Square::from_index_unchecked(((self.0 & DST_MASK) >> DST_SHIFT) as u8)
    }

    /// Promotion piece, if this is a promotion.
    pub const fn promotion_piece(self) -> Option<PromotionPiece> {
        if !self.is_promotion() {
            return None;
        }
        Some(match (self.0 & PROMO_MASK) >> PROMO_SHIFT {
            0 => PromotionPiece::Knight,
            1 => PromotionPiece::Bishop,
            2 => PromotionPiece::Rook,
            _ => PromotionPiece::Queen,
        })
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    pub const fn is_capture(self) -> bool {
        self.0 & CAPTURE_FLAG != 0
    }

    pub const fn is_promotion(self) -> bool {
        self.0 & PROMOTION_FLAG != 0
    }

    /// Captures and promotions: the moves quiescence search looks at.
    pub const fn is_tactical(self) -> bool {
        self.0 & (CAPTURE_FLAG | PROMOTION_FLAG) != 0
    }

    /// Neither a capture nor a promotion. The null move is not quiet.
    pub const fn is_quiet(self) -> bool {
        !self.is_null() && !self.is_tactical()
    }

    /// Raw 16-bit encoding.
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Rebuild a move from [`Move::raw`].
    pub const fn from_raw(raw: u16) -> Move {
        Move(raw)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "0000");
        }
        write!(f, "{}{}", self.source(), self.dest())?;
        if let Some(promo) = self.promotion_piece() {
            write!(f, "{}", promo.to_piece_kind().letter())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match (self.is_capture(), self.is_promotion()) {
            (true, true) => "capture-promotion",
            (true, false) => "capture",
            (false, true) => "promotion",
            (false, false) => "quiet",
        };
        write!(f, "Move({self} {tag})")
    }
}
