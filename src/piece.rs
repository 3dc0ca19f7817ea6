use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use crate::{
    color::Color,
    coord::{Vector, pawn_direction},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}
impl PieceKind {
    pub const STARTING_CONFIGURATION: [Self; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];
    pub fn uppercase(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
    pub fn lowercase(self) -> char {
        self.uppercase().to_ascii_lowercase()
    }
    pub fn from_fen(c: char) -> Result<Self, InvalidFenPiece> {
        let piece = match c {
            'p' | 'P' => PieceKind::Pawn,
            'n' | 'N' => PieceKind::Knight,
            'b' | 'B' => PieceKind::Bishop,
            'r' | 'R' => PieceKind::Rook,
            'q' | 'Q' => PieceKind::Queen,
            'k' | 'K' => PieceKind::King,
            c => return Err(InvalidFenPiece(c)),
        };
        Ok(piece)
    }
    /// Ray directions of sliding pieces, empty for the others.
    pub fn directions(self) -> &'static [Vector] {
        match self {
            PieceKind::Bishop => &Vector::BISHOP_DIRECTIONS,
            PieceKind::Rook => &Vector::ROOK_DIRECTIONS,
            PieceKind::Queen => &Vector::QUEEN_DIRECTIONS,
            PieceKind::Pawn | PieceKind::Knight | PieceKind::King => &[],
        }
    }
}
impl Display for PieceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::Pawn => write!(f, "pawn")?,
            PieceKind::Knight => write!(f, "knight")?,
            PieceKind::Bishop => write!(f, "bishop")?,
            PieceKind::Rook => write!(f, "rook")?,
            PieceKind::Queen => write!(f, "queen")?,
            PieceKind::King => write!(f, "king")?,
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}
impl Piece {
    pub fn new(color: Color, kind: PieceKind) -> Self {
        Piece { color, kind }
    }
    pub fn fen(self) -> char {
        match self.color {
            Color::White => self.kind.uppercase(),
            Color::Black => self.kind.lowercase(),
        }
    }
    pub fn from_fen(c: char) -> Result<Self, InvalidFenPiece> {
        let kind = PieceKind::from_fen(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Ok(Piece::new(color, kind))
    }
    pub fn figurine(self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::King) => '♔',
            (Color::Black, PieceKind::Pawn) => '♟',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::King) => '♚',
        }
    }
    /// Whether this piece attacks a square lying `distance` steps away in the
    /// opposite of `direction`, where `direction` is a unit vector pointing
    /// from that square to this piece. Knights are never ray attackers.
    pub fn attacks_along(self, direction: Vector, distance: u8) -> bool {
        match self.kind {
            PieceKind::Pawn => {
                distance == 1 && direction.x != 0 && direction.y == -pawn_direction(self.color)
            }
            PieceKind::Knight => false,
            PieceKind::Bishop => direction.is_diagonal(),
            PieceKind::Rook => direction.is_orthogonal(),
            PieceKind::Queen => true,
            PieceKind::King => distance == 1,
        }
    }
}
impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)?;
        Ok(())
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidFenPiece(pub char);
impl Display for InvalidFenPiece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "found `{}`, expected one of `p`, `n`, `b`, `r`, `k`, `q`, or uppercase forms of these letters",
            self.0
        )?;
        Ok(())
    }
}
impl Error for InvalidFenPiece {}

#[cfg(test)]
mod test {
    use crate::{
        color::Color,
        coord::Vector,
        piece::{InvalidFenPiece, Piece, PieceKind},
    };

    #[test]
    fn pawns_attack_toward_the_opponent() {
        let white_pawn = Piece::new(Color::White, PieceKind::Pawn);
        let black_pawn = Piece::new(Color::Black, PieceKind::Pawn);
        // seen from a black king, a white pawn attacks from one rank below
        assert!(white_pawn.attacks_along(Vector { x: 1, y: 1 }, 1));
        assert!(!white_pawn.attacks_along(Vector { x: 1, y: -1 }, 1));
        assert!(black_pawn.attacks_along(Vector { x: -1, y: -1 }, 1));
        assert!(!black_pawn.attacks_along(Vector { x: -1, y: -1 }, 2));
        assert!(!black_pawn.attacks_along(Vector { x: 0, y: -1 }, 1));
    }
    #[test]
    fn sliders_attack_along_their_own_lines() {
        let bishop = Piece::new(Color::Black, PieceKind::Bishop);
        let rook = Piece::new(Color::Black, PieceKind::Rook);
        let king = Piece::new(Color::Black, PieceKind::King);
        assert!(bishop.attacks_along(Vector { x: 1, y: -1 }, 5));
        assert!(!bishop.attacks_along(Vector { x: 0, y: -1 }, 1));
        assert!(rook.attacks_along(Vector { x: 0, y: 1 }, 7));
        assert!(!rook.attacks_along(Vector { x: 1, y: 1 }, 1));
        assert!(king.attacks_along(Vector { x: 1, y: 1 }, 1));
        assert!(!king.attacks_along(Vector { x: 1, y: 1 }, 2));
    }
    #[test]
    fn fen_letters() {
        assert_eq!(
            Piece::from_fen('n'),
            Ok(Piece::new(Color::Black, PieceKind::Knight))
        );
        assert_eq!(Piece::new(Color::White, PieceKind::Queen).fen(), 'Q');
        assert_eq!(Piece::from_fen('x'), Err(InvalidFenPiece('x')));
    }
}
