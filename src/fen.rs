use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    iter::{once, repeat},
    num::ParseIntError,
    str::FromStr,
};

use crate::{
    board::Board,
    castling_right::{CastlingRight, InvalidCastlingCharacter},
    color::{Color, ParseColorError},
    coord::{Coord, ParseCoordError},
    piece::{InvalidFenPiece, Piece},
    position::{InvalidBoard, Position},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFenError {
    NotEnoughSquaresOnRow,
    ExceedingSquaresOnRow,
    InvalidFenPiece(InvalidFenPiece),
    ParseColorError(ParseColorError),
    InvalidCastlingCharacter(InvalidCastlingCharacter),
    ParseCoordError(ParseCoordError),
    ParseIntError(ParseIntError),
    Unexpected(String),
    UnexpectedEol,
}
impl From<InvalidFenPiece> for ParseFenError {
    fn from(value: InvalidFenPiece) -> Self {
        ParseFenError::InvalidFenPiece(value)
    }
}
impl From<ParseColorError> for ParseFenError {
    fn from(value: ParseColorError) -> Self {
        ParseFenError::ParseColorError(value)
    }
}
impl From<InvalidCastlingCharacter> for ParseFenError {
    fn from(value: InvalidCastlingCharacter) -> Self {
        ParseFenError::InvalidCastlingCharacter(value)
    }
}
impl From<ParseCoordError> for ParseFenError {
    fn from(value: ParseCoordError) -> Self {
        ParseFenError::ParseCoordError(value)
    }
}
impl From<ParseIntError> for ParseFenError {
    fn from(value: ParseIntError) -> Self {
        ParseFenError::ParseIntError(value)
    }
}
impl Display for ParseFenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseFenError::NotEnoughSquaresOnRow => {
                write!(f, "found row with less than 8 squares")?;
            }
            ParseFenError::ExceedingSquaresOnRow => {
                write!(f, "found row with more than 8 squares")?;
            }
            ParseFenError::InvalidFenPiece(err) => write!(f, "{err}")?,
            ParseFenError::ParseColorError(err) => write!(f, "{err}")?,
            ParseFenError::InvalidCastlingCharacter(err) => write!(f, "{err}")?,
            ParseFenError::ParseCoordError(err) => write!(f, "{err}")?,
            ParseFenError::ParseIntError(err) => write!(f, "{err}")?,
            ParseFenError::Unexpected(token) => write!(f, "unexpected `{token}`")?,
            ParseFenError::UnexpectedEol => write!(f, "unexpected end of line")?,
        }
        Ok(())
    }
}
impl Error for ParseFenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseFenError::InvalidFenPiece(err) => Some(err),
            ParseFenError::ParseColorError(err) => Some(err),
            ParseFenError::InvalidCastlingCharacter(err) => Some(err),
            ParseFenError::ParseCoordError(err) => Some(err),
            ParseFenError::ParseIntError(err) => Some(err),
            _ => None,
        }
    }
}

/// A parsed FEN record. The en passant field is read but not kept, since
/// en passant captures are not part of the move rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fen {
    pub board: Board,
    pub current_player: Color,
    pub castling_right: CastlingRight,
    pub half_move: u32,
    pub full_move: u32,
}
impl Fen {
    fn parse_placement(s: &str) -> Result<Board, ParseFenError> {
        let mut board = Board::empty();
        let mut rows = s.split('/');
        for y in 0..8 {
            let row = rows.next().ok_or(ParseFenError::UnexpectedEol)?;
            let mut x: u8 = 0;
            for c in row.chars() {
                if let Some(skip) = c.to_digit(10).filter(|skip| (1..=8).contains(skip)) {
                    x += u8::try_from(skip).map_err(|_| ParseFenError::ExceedingSquaresOnRow)?;
                } else {
                    if x >= 8 {
                        return Err(ParseFenError::ExceedingSquaresOnRow);
                    }
                    board[Coord::new(x, y)] = Some(Piece::from_fen(c)?);
                    x += 1;
                }
                if x > 8 {
                    return Err(ParseFenError::ExceedingSquaresOnRow);
                }
            }
            if x < 8 {
                return Err(ParseFenError::NotEnoughSquaresOnRow);
            }
        }
        if let Some(row) = rows.next() {
            return Err(ParseFenError::Unexpected(row.to_owned()));
        }
        Ok(board)
    }
}
impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split_whitespace();
        let board = Fen::parse_placement(fields.next().ok_or(ParseFenError::UnexpectedEol)?)?;
        let current_player = match fields.next().ok_or(ParseFenError::UnexpectedEol)? {
            "w" => Color::White,
            "b" => Color::Black,
            field => field.parse::<Color>()?,
        };
        let castling_right = fields
            .next()
            .ok_or(ParseFenError::UnexpectedEol)?
            .parse::<CastlingRight>()?;
        match fields.next() {
            None | Some("-") => (),
            Some(en_passant) => {
                en_passant.parse::<Coord>()?;
            }
        }
        let half_move = fields.next().map(str::parse::<u32>).transpose()?.unwrap_or(0);
        let full_move = fields.next().map(str::parse::<u32>).transpose()?.unwrap_or(1);
        if let Some(field) = fields.next() {
            return Err(ParseFenError::Unexpected(field.to_owned()));
        }
        Ok(Fen {
            board,
            current_player,
            castling_right,
            half_move,
            full_move,
        })
    }
}
impl Display for Fen {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (row, first) in self.board.rows().zip(once(true).chain(repeat(false))) {
            if !first {
                write!(f, "/")?;
            }
            let mut pieces = row.iter().peekable();
            while let Some(piece) = pieces.next() {
                if let Some(piece) = piece {
                    write!(f, "{}", piece.fen())?;
                } else {
                    let mut count = 1;
                    while pieces.peek().is_some_and(|piece| piece.is_none()) {
                        pieces.next();
                        count += 1;
                    }
                    write!(f, "{count}")?;
                }
            }
        }
        write!(f, " {}", self.current_player.lowercase())?;
        write!(f, " {}", self.castling_right)?;
        write!(f, " - {} {}", self.half_move, self.full_move)?;
        Ok(())
    }
}
impl TryFrom<Fen> for Position {
    type Error = InvalidBoard;

    fn try_from(value: Fen) -> Result<Self, Self::Error> {
        Position::from_parts(value.board, value.current_player, value.castling_right)
    }
}
#[cfg(test)]
mod test {
    use crate::{
        board::Board,
        castling_right::InvalidCastlingCharacter,
        color::Color,
        coord,
        fen::{Fen, ParseFenError},
        piece::InvalidFenPiece,
        position::Position,
    };

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn starting_position_round_trip() {
        let fen: Fen = START.parse().unwrap();
        assert_eq!(fen.board, Board::starting_position());
        assert_eq!(fen.current_player, Color::White);
        assert_eq!(fen.to_string(), START);
        assert_eq!(Position::new().as_fen().to_string(), START);
    }
    #[test]
    fn optional_fields() {
        let fen: Fen = "4k3/8/8/8/8/8/8/4K3 b - e3".parse().unwrap();
        assert_eq!(fen.current_player, Color::Black);
        assert_eq!((fen.half_move, fen.full_move), (0, 1));
        assert_eq!(fen.to_string(), "4k3/8/8/8/8/8/8/4K3 b - - 0 1");
        let fen: Fen = "4k3/8/8/8/8/8/8/4K3 w - - 12 40".parse().unwrap();
        assert_eq!((fen.half_move, fen.full_move), (12, 40));
        assert_eq!(fen.board[coord!("e1")].map(|piece| piece.fen()), Some('K'));
    }
    #[test]
    fn malformed_records() {
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K2 w - - 0 1".parse::<Fen>(),
            Err(ParseFenError::NotEnoughSquaresOnRow)
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K4 w - - 0 1".parse::<Fen>(),
            Err(ParseFenError::ExceedingSquaresOnRow)
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8/4X3 w - - 0 1".parse::<Fen>(),
            Err(ParseFenError::InvalidFenPiece(InvalidFenPiece('X')))
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K3 w KX - 0 1".parse::<Fen>(),
            Err(ParseFenError::InvalidCastlingCharacter(
                InvalidCastlingCharacter('X')
            ))
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8".parse::<Fen>(),
            Err(ParseFenError::UnexpectedEol)
        );
        assert!("4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra".parse::<Fen>().is_err());
        assert!("4k3/8/8/8/8/8/8/4K3 x - - 0 1".parse::<Fen>().is_err());
    }
}
