use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    num::NonZero,
    ops::{Mul, Neg, Sub},
    str::FromStr,
};

use crate::color::Color;

/// Builds a [`Coord`] from a square name such as `"e4"`, checked at compile time.
#[macro_export]
macro_rules! coord {
    ($square:literal) => {{
        const COORD: $crate::coord::Coord = $crate::coord::Coord::from_literal($square);
        COORD
    }};
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseCoordError {
    InvalidX(char),
    InvalidY(char),
    NotEnoughCharacter(u8),
    Unexpected(char),
}
impl Display for ParseCoordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseCoordError::InvalidX(x) => write!(
                f,
                "found `{x}`, characters from `a` to `h` were expected instead"
            )?,
            ParseCoordError::InvalidY(y) => write!(
                f,
                "found `{y}`, characters from `1` to `8` were expected instead"
            )?,
            ParseCoordError::NotEnoughCharacter(len) => write!(
                f,
                "provided string have length of {len} characters, 2 were expected"
            )?,
            ParseCoordError::Unexpected(c) => write!(f, "unexpected `{c}`")?,
        }
        Ok(())
    }
}
impl Error for ParseCoordError {}

/// A square of the board. `x` is the file (0 = a) and `y` is the row counted
/// from black's back rank (0 = rank 8, 7 = rank 1).
// Bit structure: 01XXXYYY
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord(NonZero<u8>);

impl Coord {
    /// # Panics
    ///
    /// Panics when `x` or `y` is not within `0..8`.
    pub const fn new(x: u8, y: u8) -> Self {
        assert!(x < 8 && y < 8, "coordinates must be within 0..8");
        match NonZero::new(0b_0100_0000 | (x << 3) | y) {
            Some(byte) => Coord(byte),
            None => unreachable!(),
        }
    }
    /// # Panics
    ///
    /// Panics when `square` is not a square name such as `"e4"`.
    pub const fn from_literal(square: &str) -> Self {
        let bytes = square.as_bytes();
        assert!(bytes.len() == 2, "expected a square name such as `e4`");
        assert!(
            matches!(bytes[0], b'a'..=b'h'),
            "file must be within `a` and `h`"
        );
        assert!(
            matches!(bytes[1], b'1'..=b'8'),
            "rank must be within `1` and `8`"
        );
        Coord::new(bytes[0] - b'a', b'8' - bytes[1])
    }
    pub fn from_chars(x: char, y: char) -> Result<Self, ParseCoordError> {
        let x = match x {
            'a'..='h' => x as u8 - b'a',
            _ => return Err(ParseCoordError::InvalidX(x)),
        };
        let y = match y {
            '1'..='8' => b'8' - y as u8,
            _ => return Err(ParseCoordError::InvalidY(y)),
        };
        Ok(Coord::new(x, y))
    }
    pub fn new_checked(x: u8, y: u8) -> Option<Self> {
        if x >= 8 || y >= 8 {
            None
        } else {
            Some(Self::new(x, y))
        }
    }
    pub fn x(self) -> u8 {
        (self.0.get() >> 3) & 0b_111
    }
    pub fn y(self) -> u8 {
        self.0.get() & 0b_111
    }
    pub fn file(self) -> char {
        (b'a' + self.x()) as char
    }
    pub fn rank(self) -> char {
        (b'8' - self.y()) as char
    }
    pub fn all() -> impl Iterator<Item = Self> {
        (0..8).flat_map(|y| (0..8).map(move |x| Coord::new(x, y)))
    }
    pub fn move_by(self, movement: Vector) -> Option<Self> {
        Self::new_checked(
            self.x().checked_add_signed(movement.x)?,
            self.y().checked_add_signed(movement.y)?,
        )
    }
    pub fn line(self, direction: Vector, start: i8) -> impl Iterator<Item = Self> {
        debug_assert_ne!(direction, Vector::ZERO);
        debug_assert_eq!(direction, direction.as_unit());
        (start..).map_while(move |difference| self.move_by(direction * difference))
    }
    pub fn line_exclusive(self, direction: Vector) -> impl Iterator<Item = Self> {
        self.line(direction, 1)
    }
    /// Squares after `self` up to and including `end`. `end` must lie on the line.
    pub fn line_exclusive_inclusive(
        self,
        end: Coord,
        direction: Vector,
    ) -> impl Iterator<Item = Self> {
        let mut resume = true;
        self.line_exclusive(direction).take_while(move |position| {
            resume && {
                resume = *position != end;
                true
            }
        })
    }
    /// Shade of the square, a8 is light.
    pub fn color(self) -> Color {
        if (self.x() + self.y()) % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }
}
pub fn home_rank(color: Color) -> u8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}
pub fn pawn_home_rank(color: Color) -> u8 {
    match color {
        Color::White => 6,
        Color::Black => 1,
    }
}
pub fn pawn_promotion_rank(color: Color) -> u8 {
    home_rank(!color)
}
pub fn pawn_direction(color: Color) -> i8 {
    match color {
        Color::White => -1,
        Color::Black => 1,
    }
}
impl Display for Coord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())?;
        Ok(())
    }
}
impl FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let Some(x) = chars.next() else {
            return Err(ParseCoordError::NotEnoughCharacter(0));
        };
        let Some(y) = chars.next() else {
            return Err(ParseCoordError::NotEnoughCharacter(1));
        };
        if let Some(c) = chars.next() {
            return Err(ParseCoordError::Unexpected(c));
        }
        Coord::from_chars(x, y)
    }
}
impl From<Coord> for u8 {
    fn from(value: Coord) -> Self {
        value.0.get()
    }
}
impl Sub<Self> for Coord {
    type Output = Vector;

    #[allow(
        clippy::cast_possible_wrap,
        reason = "both coordinates are below 8 so the casts are lossless"
    )]
    fn sub(self, rhs: Self) -> Self::Output {
        Vector {
            x: self.x() as i8 - rhs.x() as i8,
            y: self.y() as i8 - rhs.y() as i8,
        }
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vector {
    pub x: i8,
    pub y: i8,
}
impl Vector {
    pub const ZERO: Self = Vector { x: 0, y: 0 };

    pub const KNIGHT_MOVES: [Self; 8] = [
        Vector { x: -1, y: -2 },
        Vector { x: 1, y: -2 },
        Vector { x: -2, y: -1 },
        Vector { x: 2, y: -1 },
        Vector { x: -2, y: 1 },
        Vector { x: 2, y: 1 },
        Vector { x: -1, y: 2 },
        Vector { x: 1, y: 2 },
    ];
    pub const ROOK_DIRECTIONS: [Self; 4] = [
        Vector { x: 0, y: -1 },
        Vector { x: -1, y: 0 },
        Vector { x: 0, y: 1 },
        Vector { x: 1, y: 0 },
    ];
    pub const BISHOP_DIRECTIONS: [Self; 4] = [
        Vector { x: -1, y: -1 },
        Vector { x: 1, y: -1 },
        Vector { x: -1, y: 1 },
        Vector { x: 1, y: 1 },
    ];
    pub const QUEEN_DIRECTIONS: [Self; 8] = [
        Vector { x: 0, y: -1 },
        Vector { x: -1, y: 0 },
        Vector { x: 0, y: 1 },
        Vector { x: 1, y: 0 },
        Vector { x: -1, y: -1 },
        Vector { x: 1, y: -1 },
        Vector { x: -1, y: 1 },
        Vector { x: 1, y: 1 },
    ];
    pub const KING_MOVES: [Self; 8] = Vector::QUEEN_DIRECTIONS;

    pub fn pawn_single_move(color: Color) -> Self {
        Vector {
            x: 0,
            y: pawn_direction(color),
        }
    }
    pub fn pawn_attacks(color: Color) -> [Self; 2] {
        [-1, 1].map(|x| Vector {
            x,
            y: pawn_direction(color),
        })
    }
    pub fn is_orthogonal(self) -> bool {
        (self.x == 0) != (self.y == 0)
    }
    pub fn is_diagonal(self) -> bool {
        self.x != 0 && self.x.abs() == self.y.abs()
    }
    pub fn as_unit(self) -> Self {
        Vector {
            x: self.x.signum(),
            y: self.y.signum(),
        }
    }
}
impl Mul<i8> for Vector {
    type Output = Self;

    fn mul(self, rhs: i8) -> Self::Output {
        Vector {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}
impl Neg for Vector {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Vector {
            x: -self.x,
            y: -self.y,
        }
    }
}
