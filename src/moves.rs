use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
    str::FromStr,
};

use crate::{
    board::Board,
    castling_right::CastlingSide,
    coord::{Coord, ParseCoordError, pawn_promotion_rank},
    piece::{Piece, PieceKind},
};

/// A single ply. The moved and captured pieces are snapshotted from the board
/// at construction, so the record stays valid after the board changes.
///
/// Two moves are equal when they share origin and destination. This holds up
/// because promotion always resolves to a queen, leaving at most one legal
/// move between any two squares.
#[derive(Debug, Clone, Copy)]
pub struct Move {
    origin: Coord,
    destination: Coord,
    moved: Piece,
    captured: Option<Piece>,
    castle: bool,
}
impl Move {
    /// # Panics
    ///
    /// Panics when `origin` holds no piece.
    pub fn new(origin: Coord, destination: Coord, board: &Board) -> Self {
        Move::with_castle(origin, destination, board, false)
    }
    /// A castling move, described by the king's own two-square shift.
    ///
    /// # Panics
    ///
    /// Panics when `origin` holds no piece.
    pub fn castle(origin: Coord, destination: Coord, board: &Board) -> Self {
        Move::with_castle(origin, destination, board, true)
    }
    fn with_castle(origin: Coord, destination: Coord, board: &Board, castle: bool) -> Self {
        let Some(moved) = board[origin] else {
            panic!("{origin} holds no piece to move");
        };
        Move {
            origin,
            destination,
            moved,
            captured: board[destination],
            castle,
        }
    }
    pub fn origin(self) -> Coord {
        self.origin
    }
    pub fn destination(self) -> Coord {
        self.destination
    }
    pub fn moved(self) -> Piece {
        self.moved
    }
    pub fn captured(self) -> Option<Piece> {
        self.captured
    }
    pub fn is_castle(self) -> bool {
        self.castle
    }
    pub fn is_promotion(self) -> bool {
        self.moved.kind == PieceKind::Pawn
            && self.destination.y() == pawn_promotion_rank(self.moved.color)
    }
    /// The piece that ends up on the destination square.
    pub fn placed(self) -> Piece {
        if self.is_promotion() {
            Piece::new(self.moved.color, PieceKind::Queen)
        } else {
            self.moved
        }
    }
    /// Origin and destination of the rook that accompanies a castling king.
    pub fn castling_rook(self) -> Option<(Coord, Coord)> {
        self.castle.then(|| {
            let side = CastlingSide::from_king_move(self.origin, self.destination);
            (
                side.rook_origin(self.moved.color),
                side.rook_destination(self.moved.color),
            )
        })
    }
    pub fn id(self) -> u16 {
        (u16::from(u8::from(self.origin)) << 8) | u16::from(u8::from(self.destination))
    }
    pub fn notation(self) -> Notation {
        Notation {
            origin: self.origin,
            destination: self.destination,
        }
    }
}
impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
impl Eq for Move {}
impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}
impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation())?;
        Ok(())
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseNotationError {
    InvalidChar,
    ParseCoordError(ParseCoordError),
    Unexpected(char),
}
impl From<ParseCoordError> for ParseNotationError {
    fn from(value: ParseCoordError) -> Self {
        ParseNotationError::ParseCoordError(value)
    }
}
impl Display for ParseNotationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseNotationError::InvalidChar => {
                write!(f, "provided string contains invalid character")?;
            }
            ParseNotationError::ParseCoordError(err) => write!(f, "{err}")?,
            ParseNotationError::Unexpected(c) => write!(f, "unexpected `{c}`")?,
        }
        Ok(())
    }
}
impl Error for ParseNotationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseNotationError::ParseCoordError(err) => Some(err),
            _ => None,
        }
    }
}

/// Origin square followed by destination square, such as `e2e4`. Carries no
/// capture, check, or promotion marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Notation {
    pub origin: Coord,
    pub destination: Coord,
}
impl Display for Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin, self.destination)?;
        Ok(())
    }
}
impl FromStr for Notation {
    type Err = ParseNotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let origin = s.get(0..2).ok_or(ParseNotationError::InvalidChar)?.parse()?;
        let destination = s.get(2..4).ok_or(ParseNotationError::InvalidChar)?.parse()?;
        let rest = s.get(4..).ok_or(ParseNotationError::InvalidChar)?;
        if let Some(c) = rest.chars().next() {
            return Err(ParseNotationError::Unexpected(c));
        }
        Ok(Notation {
            origin,
            destination,
        })
    }
}
