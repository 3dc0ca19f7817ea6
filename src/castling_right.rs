use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::{
    color::Color,
    coord::{Coord, home_rank},
    moves::Move,
    piece::PieceKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidCastlingCharacter(pub char);

impl Display for InvalidCastlingCharacter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "found `{}`, expected one of `K`, `Q`, `k`, `q`, or `-`",
            self.0
        )?;
        Ok(())
    }
}
impl Error for InvalidCastlingCharacter {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}
impl CastlingSide {
    pub const ALL: [Self; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];
    pub const KING_ORIGIN_X: u8 = 4;

    pub fn rook_origin_x(self) -> u8 {
        match self {
            CastlingSide::KingSide => 7,
            CastlingSide::QueenSide => 0,
        }
    }
    pub fn king_destination_x(self) -> u8 {
        match self {
            CastlingSide::KingSide => 6,
            CastlingSide::QueenSide => 2,
        }
    }
    /// The square the king passes over.
    pub fn rook_destination_x(self) -> u8 {
        match self {
            CastlingSide::KingSide => 5,
            CastlingSide::QueenSide => 3,
        }
    }
    /// Files between king and rook, all of which must be empty.
    pub fn empty_files(self) -> &'static [u8] {
        match self {
            CastlingSide::KingSide => &[5, 6],
            CastlingSide::QueenSide => &[1, 2, 3],
        }
    }
    /// Files the king crosses or lands on, none of which may be attacked.
    pub fn safe_files(self) -> &'static [u8] {
        match self {
            CastlingSide::KingSide => &[5, 6],
            CastlingSide::QueenSide => &[2, 3],
        }
    }
    pub fn from_rook_origin(position: Coord, color: Color) -> Option<Self> {
        if position.y() != home_rank(color) {
            return None;
        }
        CastlingSide::ALL
            .into_iter()
            .find(|side| side.rook_origin_x() == position.x())
    }
    /// Side of a castling move given the king's origin and destination.
    pub fn from_king_move(origin: Coord, destination: Coord) -> Self {
        if destination.x() > origin.x() {
            CastlingSide::KingSide
        } else {
            CastlingSide::QueenSide
        }
    }
    pub fn rook_origin(self, color: Color) -> Coord {
        Coord::new(self.rook_origin_x(), home_rank(color))
    }
    pub fn rook_destination(self, color: Color) -> Coord {
        Coord::new(self.rook_destination_x(), home_rank(color))
    }
}

// Bit structure: 0000qkQK
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRight(u8);

impl CastlingRight {
    pub fn none() -> Self {
        CastlingRight(0)
    }
    pub fn all() -> Self {
        CastlingRight(0b_1111)
    }
    fn bit(color: Color, side: CastlingSide) -> u8 {
        let shift = match (color, side) {
            (Color::White, CastlingSide::KingSide) => 0,
            (Color::White, CastlingSide::QueenSide) => 1,
            (Color::Black, CastlingSide::KingSide) => 2,
            (Color::Black, CastlingSide::QueenSide) => 3,
        };
        0b_1 << shift
    }
    pub fn get(self, color: Color, side: CastlingSide) -> bool {
        self.0 & CastlingRight::bit(color, side) != 0
    }
    pub fn add(&mut self, color: Color, side: CastlingSide) {
        self.0 |= CastlingRight::bit(color, side);
    }
    pub fn remove(&mut self, color: Color, side: CastlingSide) {
        self.0 &= !CastlingRight::bit(color, side);
    }
    pub fn clear(&mut self, color: Color) {
        for side in CastlingSide::ALL {
            self.remove(color, side);
        }
    }
    /// Rights that remain once `movement` has been played. A king move loses
    /// both sides, a rook leaving its corner loses its side, and capturing a
    /// rook on its corner takes that side from the opponent.
    pub fn after_move(self, movement: &Move) -> Self {
        let mut new = self;
        let moved = movement.moved();
        match moved.kind {
            PieceKind::King => new.clear(moved.color),
            PieceKind::Rook => {
                if let Some(side) = CastlingSide::from_rook_origin(movement.origin(), moved.color) {
                    new.remove(moved.color, side);
                }
            }
            _ => (),
        }
        if let Some(captured) = movement.captured()
            && captured.kind == PieceKind::Rook
            && let Some(side) =
                CastlingSide::from_rook_origin(movement.destination(), captured.color)
        {
            new.remove(captured.color, side);
        }
        new
    }
}
impl Default for CastlingRight {
    fn default() -> Self {
        CastlingRight::all()
    }
}
impl Display for CastlingRight {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut written = false;
        for (color, side, c) in [
            (Color::White, CastlingSide::KingSide, 'K'),
            (Color::White, CastlingSide::QueenSide, 'Q'),
            (Color::Black, CastlingSide::KingSide, 'k'),
            (Color::Black, CastlingSide::QueenSide, 'q'),
        ] {
            if self.get(color, side) {
                written = true;
                write!(f, "{c}")?;
            }
        }
        if !written {
            write!(f, "-")?;
        }
        Ok(())
    }
}
impl FromStr for CastlingRight {
    type Err = InvalidCastlingCharacter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut castling_right = CastlingRight::none();
        for c in s.chars() {
            match c {
                'K' => castling_right.add(Color::White, CastlingSide::KingSide),
                'Q' => castling_right.add(Color::White, CastlingSide::QueenSide),
                'k' => castling_right.add(Color::Black, CastlingSide::KingSide),
                'q' => castling_right.add(Color::Black, CastlingSide::QueenSide),
                '-' => (),
                c => return Err(InvalidCastlingCharacter(c)),
            }
        }
        Ok(castling_right)
    }
}
#[cfg(test)]
mod test {
    use crate::{
        board::Board,
        castling_right::{CastlingRight, CastlingSide, InvalidCastlingCharacter},
        color::Color,
        coord,
        moves::Move,
        piece::{Piece, PieceKind},
    };

    #[test]
    fn display_and_parse() {
        assert_eq!(CastlingRight::all().to_string(), "KQkq");
        assert_eq!(CastlingRight::none().to_string(), "-");
        let rights: CastlingRight = "Kq".parse().unwrap();
        assert!(rights.get(Color::White, CastlingSide::KingSide));
        assert!(!rights.get(Color::White, CastlingSide::QueenSide));
        assert!(!rights.get(Color::Black, CastlingSide::KingSide));
        assert!(rights.get(Color::Black, CastlingSide::QueenSide));
        assert_eq!(
            "KX".parse::<CastlingRight>(),
            Err(InvalidCastlingCharacter('X'))
        );
    }
    #[test]
    fn king_move_loses_both_sides() {
        let mut board = Board::starting_position();
        board[coord!("e2")] = None;
        let movement = Move::new(coord!("e1"), coord!("e2"), &board);
        assert_eq!(CastlingRight::all().after_move(&movement).to_string(), "kq");
    }
    #[test]
    fn rook_leaving_corner_loses_its_side() {
        let mut board = Board::starting_position();
        board[coord!("h2")] = None;
        let movement = Move::new(coord!("h1"), coord!("h4"), &board);
        assert_eq!(CastlingRight::all().after_move(&movement).to_string(), "Qkq");
    }
    #[test]
    fn capturing_rook_on_corner_takes_opponent_side() {
        let mut board = Board::starting_position();
        board[coord!("g7")] = Some(Piece::new(Color::White, PieceKind::Bishop));
        let movement = Move::new(coord!("g7"), coord!("h8"), &board);
        assert_eq!(CastlingRight::all().after_move(&movement).to_string(), "KQq");
    }
}
