use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    ops::{Index, IndexMut},
};

use crate::{
    analysis::Analysis,
    board::Board,
    castling_right::{CastlingRight, CastlingSide},
    color::Color,
    coord::{Coord, home_rank},
    end_state::EndState,
    fen::Fen,
    movegen::MoveGen,
    moves::{Move, Notation, ParseNotationError},
    piece::{Piece, PieceKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidBoard {
    MissingKing(Color),
    ExceededKings(Color),
    KingLocationMismatch(Color),
    PawnOnBackRank(Coord),
    NonPlayerInCheck,
    MoreThanTwoCheckers,
    InvalidCastlingRight,
}
impl Display for InvalidBoard {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InvalidBoard::MissingKing(color) => write!(f, "no {color} king found")?,
            InvalidBoard::ExceededKings(color) => write!(f, "found more than 1 {color} kings")?,
            InvalidBoard::KingLocationMismatch(color) => {
                write!(f, "{color} king is not where it was last recorded")?;
            }
            InvalidBoard::PawnOnBackRank(position) => write!(f, "found a pawn on {position}")?,
            InvalidBoard::NonPlayerInCheck => write!(f, "non-player in check")?,
            InvalidBoard::MoreThanTwoCheckers => {
                write!(f, "found more than 2 pieces delivering check")?;
            }
            InvalidBoard::InvalidCastlingRight => write!(f, "invalid castling right")?,
        }
        Ok(())
    }
}
impl Error for InvalidBoard {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplayError {
    ParseNotationError {
        index: usize,
        err: ParseNotationError,
    },
    IllegalMove {
        index: usize,
        notation: Notation,
    },
}
impl ReplayError {
    /// Position of the offending notation within the replayed sequence.
    pub fn index(self) -> usize {
        match self {
            ReplayError::ParseNotationError { index, .. }
            | ReplayError::IllegalMove { index, .. } => index,
        }
    }
}
impl Display for ReplayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::ParseNotationError { index, err } => write!(f, "move #{index}: {err}")?,
            ReplayError::IllegalMove { index, notation } => {
                write!(f, "move #{index}: {notation} is not a legal move")?;
            }
        }
        Ok(())
    }
}
impl Error for ReplayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ReplayError::ParseNotationError { err, .. } => Some(err),
            ReplayError::IllegalMove { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Kings {
    white: Coord,
    black: Coord,
}
impl Index<Color> for Kings {
    type Output = Coord;

    fn index(&self, index: Color) -> &Self::Output {
        match index {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }
}
impl IndexMut<Color> for Kings {
    fn index_mut(&mut self, index: Color) -> &mut Self::Output {
        match index {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
}

/// Everything that determines the legal moves of a position, for comparing a
/// position before and after a sequence of moves and their undoing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Snapshot {
    pub board: Board,
    pub current_player: Color,
    pub white_king: Coord,
    pub black_king: Coord,
    pub castling_right: CastlingRight,
}

/// The authoritative game state. Moves passed to [`Position::execute`] must
/// come from [`Position::legal_moves`] of the same position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: Board,
    current_player: Color,
    kings: Kings,
    history: Vec<Move>,
    castling_right: CastlingRight,
    // always one entry longer than `history`
    castling_right_history: Vec<CastlingRight>,
    end_state: Option<EndState>,
}
impl Position {
    pub fn new() -> Self {
        Position {
            board: Board::starting_position(),
            current_player: Color::White,
            kings: Kings {
                white: Coord::new(CastlingSide::KING_ORIGIN_X, home_rank(Color::White)),
                black: Coord::new(CastlingSide::KING_ORIGIN_X, home_rank(Color::Black)),
            },
            history: Vec::new(),
            castling_right: CastlingRight::all(),
            castling_right_history: vec![CastlingRight::all()],
            end_state: None,
        }
    }
    /// Builds a position with an empty history, locating the kings on the
    /// board.
    pub fn from_parts(
        board: Board,
        current_player: Color,
        castling_right: CastlingRight,
    ) -> Result<Self, InvalidBoard> {
        let king = |color| {
            board
                .kings(color)
                .next()
                .ok_or(InvalidBoard::MissingKing(color))
        };
        let position = Position {
            board,
            current_player,
            kings: Kings {
                white: king(Color::White)?,
                black: king(Color::Black)?,
            },
            history: Vec::new(),
            castling_right,
            castling_right_history: vec![castling_right],
            end_state: None,
        };
        position.validate()?;
        Ok(position)
    }
    /// Plays the notations from the starting position, each resolved against
    /// the legal moves of the position it is played on.
    pub fn replay<'a>(notations: impl IntoIterator<Item = &'a str>) -> Result<Self, ReplayError> {
        let mut position = Position::new();
        for (index, notation) in notations.into_iter().enumerate() {
            let notation: Notation = notation
                .parse()
                .map_err(|err| ReplayError::ParseNotationError { index, err })?;
            let movement = position
                .find_move(notation)
                .ok_or(ReplayError::IllegalMove { index, notation })?;
            position.execute(movement);
        }
        position.legal_moves();
        Ok(position)
    }
    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn current_player(&self) -> Color {
        self.current_player
    }
    pub fn king(&self, color: Color) -> Coord {
        self.kings[color]
    }
    pub fn castling_right(&self) -> CastlingRight {
        self.castling_right
    }
    pub fn history(&self) -> &[Move] {
        &self.history
    }
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }
    pub fn analysis(&self, color: Color) -> Analysis {
        Analysis::new(&self.board, self.kings[color], color)
    }
    pub fn is_in_check(&self) -> bool {
        self.analysis(self.current_player).in_check()
    }
    /// Generates every legal move for the side to move and records whether the
    /// game has ended.
    pub fn legal_moves(&mut self) -> Vec<Move> {
        let king = self.kings[self.current_player];
        let analysis = Analysis::new(&self.board, king, self.current_player);
        let moves = MoveGen::new(
            &self.board,
            self.current_player,
            king,
            self.castling_right,
            &analysis,
        )
        .legal_moves();
        self.end_state = if !moves.is_empty() {
            None
        } else if analysis.in_check() {
            Some(EndState::Checkmate(!self.current_player))
        } else {
            Some(EndState::Stalemate)
        };
        moves
    }
    /// The outcome found by the last call to [`Position::legal_moves`].
    pub fn end_state(&self) -> Option<EndState> {
        self.end_state
    }
    pub fn is_checkmate(&self) -> bool {
        matches!(self.end_state, Some(EndState::Checkmate(_)))
    }
    pub fn is_stalemate(&self) -> bool {
        self.end_state == Some(EndState::Stalemate)
    }
    /// `"1-0"`, `"0-1"`, `"1/2-1/2"`, or `"*"` while the game goes on.
    pub fn result(&self) -> &'static str {
        self.end_state.map_or("*", EndState::result)
    }
    pub fn find_move(&mut self, notation: Notation) -> Option<Move> {
        self.legal_moves()
            .into_iter()
            .find(|movement| movement.notation() == notation)
    }
    pub fn execute(&mut self, movement: Move) {
        let moved = movement.moved();
        self.board[movement.origin()] = None;
        self.board[movement.destination()] = Some(movement.placed());
        if moved.kind == PieceKind::King {
            self.kings[moved.color] = movement.destination();
        }
        if let Some((origin, destination)) = movement.castling_rook() {
            self.board.relocate(origin, destination);
        }
        self.castling_right = self.castling_right.after_move(&movement);
        self.castling_right_history.push(self.castling_right);
        self.history.push(movement);
        self.current_player = !self.current_player;
        self.end_state = None;
        debug_assert_eq!(self.validate(), Ok(()));
    }
    /// Takes back the last move. Does nothing when no move has been played.
    pub fn undo(&mut self) {
        let Some(movement) = self.history.pop() else {
            return;
        };
        self.castling_right_history.pop();
        if let Some(castling_right) = self.castling_right_history.last() {
            self.castling_right = *castling_right;
        }
        let moved = movement.moved();
        self.board[movement.origin()] = Some(moved);
        self.board[movement.destination()] = movement.captured();
        if moved.kind == PieceKind::King {
            self.kings[moved.color] = movement.origin();
        }
        if let Some((origin, destination)) = movement.castling_rook() {
            self.board.relocate(destination, origin);
        }
        self.current_player = !self.current_player;
        self.end_state = None;
        debug_assert_eq!(self.validate(), Ok(()));
    }
    /// Counts the leaf nodes of the legal move tree `depth` plies deep.
    pub fn perft(&mut self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }
        let mut nodes = 0;
        for movement in moves {
            self.execute(movement);
            nodes += self.perft(depth - 1);
            self.undo();
        }
        nodes
    }
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            current_player: self.current_player,
            white_king: self.kings.white,
            black_king: self.kings.black,
            castling_right: self.castling_right,
        }
    }
    pub fn as_fen(&self) -> Fen {
        Fen {
            board: self.board,
            current_player: self.current_player,
            castling_right: self.castling_right,
            half_move: 0,
            full_move: 1,
        }
    }
    pub fn validate(&self) -> Result<(), InvalidBoard> {
        for color in Color::ALL {
            let mut kings = self.board.kings(color);
            let Some(king) = kings.next() else {
                return Err(InvalidBoard::MissingKing(color));
            };
            if kings.next().is_some() {
                return Err(InvalidBoard::ExceededKings(color));
            }
            if king != self.kings[color] {
                return Err(InvalidBoard::KingLocationMismatch(color));
            }
        }
        if let Some((position, _)) = self.board.pieces().find(|(position, piece)| {
            piece.kind == PieceKind::Pawn && (position.y() == 0 || position.y() == 7)
        }) {
            return Err(InvalidBoard::PawnOnBackRank(position));
        }
        if self.analysis(!self.current_player).in_check() {
            return Err(InvalidBoard::NonPlayerInCheck);
        }
        if self.analysis(self.current_player).checks.len() > 2 {
            return Err(InvalidBoard::MoreThanTwoCheckers);
        }
        for color in Color::ALL {
            let king = Coord::new(CastlingSide::KING_ORIGIN_X, home_rank(color));
            for side in CastlingSide::ALL {
                if self.castling_right.get(color, side)
                    && (self.board[king] != Some(Piece::new(color, PieceKind::King))
                        || self.board[side.rook_origin(color)]
                            != Some(Piece::new(color, PieceKind::Rook)))
                {
                    return Err(InvalidBoard::InvalidCastlingRight);
                }
            }
        }
        Ok(())
    }
}
impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}
