use std::fmt::{self, Display, Formatter};

use crate::{board::Board, color::Color, coord::Coord, piece::Piece};

const WHITE: &str = "\x1b[30;107m";
const BLACK: &str = "\x1b[30;47m";
const HIGHLIGHTED: &str = "\x1b[30;103m";
const CHECKED: &str = "\x1b[30;101m";
const RESET: &str = "\x1b[0m";

/// Text rendering of a board with the info lines printed beside it.
pub struct BoardDisplay<'a, 'b> {
    pub board: &'a Board,
    pub view: Color,
    pub highlighted: &'a [Coord],
    pub checked: Option<Coord>,
    pub info: &'b str,
}
impl<'a> BoardDisplay<'a, '_> {
    pub fn new(board: &'a Board) -> Self {
        BoardDisplay {
            board,
            view: Color::White,
            highlighted: &[],
            checked: None,
            info: "",
        }
    }
}
impl Display for BoardDisplay<'_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut lines = self.info.lines().fuse();
        for y in 0..8 {
            let y = match self.view {
                Color::White => y,
                Color::Black => 7 - y,
            };
            for x in 0..8 {
                let x = match self.view {
                    Color::White => x,
                    Color::Black => 7 - x,
                };
                let position = Coord::new(x, y);
                let color = if self.checked == Some(position) {
                    CHECKED
                } else if self.highlighted.contains(&position) {
                    HIGHLIGHTED
                } else {
                    match position.color() {
                        Color::White => WHITE,
                        Color::Black => BLACK,
                    }
                };
                let figurine = self.board[position].map_or(' ', Piece::figurine);
                write!(f, "{color}{figurine} {RESET}")?;
            }
            write!(f, "{}", 8 - y)?;
            if let Some(line) = lines.next() {
                write!(f, " {line}")?;
            }
            writeln!(f)?;
        }
        match self.view {
            Color::White => write!(f, "a b c d e f g h")?,
            Color::Black => write!(f, "h g f e d c b a")?,
        }
        if let Some(line) = lines.next() {
            write!(f, "   {line}")?;
        }
        writeln!(f)?;
        for line in lines {
            writeln!(f, "                  {line}")?;
        }
        Ok(())
    }
}
#[cfg(test)]
mod test {
    use crate::{board::Board, board_display::BoardDisplay, color::Color, coord};

    #[test]
    fn info_lines_follow_the_ranks() {
        let board = Board::starting_position();
        let text = BoardDisplay {
            info: "white plays\nsecond\nthird",
            ..BoardDisplay::new(&board)
        }
        .to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert!(lines[0].starts_with("\x1b[30;107m♜ "));
        assert!(lines[0].ends_with("8 white plays"));
        assert!(lines[1].ends_with("7 second"));
        assert_eq!(lines[8], "a b c d e f g h");
        assert!(text.contains("third") && !lines[8].contains("third"));
    }
    #[test]
    fn flipped_view_and_check_marker() {
        let board = Board::starting_position();
        let text = BoardDisplay {
            view: Color::Black,
            checked: Some(coord!("e1")),
            ..BoardDisplay::new(&board)
        }
        .to_string();
        let lines: Vec<_> = text.lines().collect();
        assert!(lines[0].ends_with('1'));
        assert!(lines[0].contains("\x1b[30;101m♔ "));
        assert_eq!(lines[8], "h g f e d c b a");
    }
}
