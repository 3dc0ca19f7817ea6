use std::ops::{Index, IndexMut};

use crate::{
    color::Color,
    coord::Coord,
    piece::{Piece, PieceKind},
};

/// The 8×8 grid, indexed by `[y][x]` with row 0 being rank 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board([[Option<Piece>; 8]; 8]);

impl Board {
    pub fn empty() -> Self {
        Board::default()
    }
    pub fn starting_position() -> Self {
        let back_rank =
            |color| PieceKind::STARTING_CONFIGURATION.map(|kind| Some(Piece::new(color, kind)));
        let pawns = |color| [Some(Piece::new(color, PieceKind::Pawn)); 8];
        Board([
            back_rank(Color::Black),
            pawns(Color::Black),
            [None; 8],
            [None; 8],
            [None; 8],
            [None; 8],
            pawns(Color::White),
            back_rank(Color::White),
        ])
    }
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Piece>; 8]> {
        self.0.iter()
    }
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        Coord::all().filter_map(|position| self[position].map(|piece| (position, piece)))
    }
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }
    pub fn kings(&self, color: Color) -> impl Iterator<Item = Coord> + '_ {
        self.pieces_of(color)
            .filter(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(position, _)| position)
    }
    /// Moves whatever stands on `origin` to `destination` and returns what was
    /// there before.
    pub fn relocate(&mut self, origin: Coord, destination: Coord) -> Option<Piece> {
        let piece = self[origin].take();
        std::mem::replace(&mut self[destination], piece)
    }
}
impl Index<Coord> for Board {
    type Output = Option<Piece>;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.0[index.y() as usize][index.x() as usize]
    }
}
impl IndexMut<Coord> for Board {
    fn index_mut(&mut self, index: Coord) -> &mut Self::Output {
        &mut self.0[index.y() as usize][index.x() as usize]
    }
}
#[cfg(test)]
mod test {
    use crate::{
        board::Board,
        color::Color,
        coord,
        piece::{Piece, PieceKind},
    };

    #[test]
    fn starting_layout() {
        let board = Board::starting_position();
        assert_eq!(
            board[coord!("e1")],
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(
            board[coord!("d8")],
            Some(Piece::new(Color::Black, PieceKind::Queen))
        );
        assert_eq!(board[coord!("e4")], None);
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.kings(Color::Black).collect::<Vec<_>>(), [coord!("e8")]);
    }
    #[test]
    fn relocate_returns_captured_piece() {
        let mut board = Board::starting_position();
        let captured = board.relocate(coord!("a1"), coord!("a7"));
        assert_eq!(captured, Some(Piece::new(Color::Black, PieceKind::Pawn)));
        assert_eq!(board[coord!("a1")], None);
        assert_eq!(
            board[coord!("a7")],
            Some(Piece::new(Color::White, PieceKind::Rook))
        );
    }
}
