use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    io::{self, BufRead, Write, stderr, stdin, stdout},
    num::ParseIntError,
    str::FromStr,
};

use chess_position::{
    board_display::BoardDisplay,
    color::Color,
    coord::Coord,
    fen::{Fen, ParseFenError},
    fuzz::fuzz,
    moves::{Notation, ParseNotationError},
    position::Position,
};
use rustc_hash::FxHashMap;

const FUZZ_PLIES: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Input {
    Help,
    Flip,
    Reset,
    Undo,
    History,
    Quit,
    Import(Fen),
    ExportFen,
    Perft(u32),
    Fuzz(u32),
    Coord(Coord),
    Move(Notation),
}
impl Display for Input {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Input::Help => write!(f, "help")?,
            Input::Flip => write!(f, "flip")?,
            Input::Reset => write!(f, "reset")?,
            Input::Undo => write!(f, "undo")?,
            Input::History => write!(f, "history")?,
            Input::Quit => write!(f, "quit")?,
            Input::Import(fen) => write!(f, "import {fen}")?,
            Input::ExportFen => write!(f, "fen")?,
            Input::Perft(depth) => write!(f, "perft {depth}")?,
            Input::Fuzz(games) => write!(f, "fuzz {games}")?,
            Input::Coord(position) => write!(f, "{position}")?,
            Input::Move(notation) => write!(f, "{notation}")?,
        }
        Ok(())
    }
}
impl FromStr for Input {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "help" => Ok(Input::Help),
            "flip" => Ok(Input::Flip),
            "reset" => Ok(Input::Reset),
            "undo" => Ok(Input::Undo),
            "history" => Ok(Input::History),
            "quit" => Ok(Input::Quit),
            "fen" => Ok(Input::ExportFen),
            s => {
                if let Some(s) = strip_prefix_token(s, "import") {
                    Ok(Input::Import(s.parse()?))
                } else if let Some(s) = strip_prefix_token(s, "perft") {
                    Ok(Input::Perft(s.parse()?))
                } else if let Some(s) = strip_prefix_token(s, "fuzz") {
                    Ok(Input::Fuzz(s.parse()?))
                } else if let Ok(position) = s.parse() {
                    Ok(Input::Coord(position))
                } else {
                    Ok(Input::Move(s.parse()?))
                }
            }
        }
    }
}
fn strip_prefix_token<'a>(src: &'a str, search: &str) -> Option<&'a str> {
    src.strip_prefix(search)
        .filter(|src| src.chars().next().is_none_or(char::is_whitespace))
        .map(str::trim_start)
}
fn status(position: &Position) -> String {
    let mut info = match position.end_state() {
        Some(end_state) => format!("{end_state}\n"),
        None if position.is_in_check() => {
            format!("{} plays, in check\n", position.current_player())
        }
        None => format!("{} plays\n", position.current_player()),
    };
    if let Some(movement) = position.last_move() {
        info.push_str(&format!("last move: {movement}\n"));
    }
    info
}
fn history(position: &Position) -> String {
    position
        .history()
        .chunks(2)
        .enumerate()
        .map(|(i, pair)| {
            let moves: Vec<_> = pair.iter().map(ToString::to_string).collect();
            format!("{}. {}", i + 1, moves.join(" "))
        })
        .collect::<Vec<_>>()
        .join(" ")
}
#[allow(
    clippy::too_many_lines,
    reason = "further decomposition could potentially hurt readability"
)]
pub fn repl() -> io::Result<()> {
    let input = stdin().lock();
    let mut output = stdout().lock();
    let mut error = stderr().lock();

    let mut lines = input.lines();

    let mut position = Position::new();
    let mut info = String::new();
    let mut highlighted = Vec::new();
    let mut legal_moves = FxHashMap::default();
    let mut update = true;
    let mut view = Color::White;
    let mut first_time = true;
    loop {
        if update {
            legal_moves.clear();
            legal_moves.extend(
                position
                    .legal_moves()
                    .into_iter()
                    .map(|movement| (movement.notation(), movement)),
            );
            info = status(&position);
        }
        if first_time {
            info.push_str("type `help` for instructions\n");
            first_time = false;
        }
        update = false;
        writeln!(
            output,
            "{}",
            BoardDisplay {
                board: position.board(),
                view,
                highlighted: &highlighted,
                checked: position
                    .is_in_check()
                    .then(|| position.king(position.current_player())),
                info: &info,
            },
        )?;
        loop {
            write!(output, "> ")?;
            output.flush()?;
            let Some(text) = lines.next() else {
                return Ok(());
            };
            let text = text?;
            let input = match text.trim().parse() {
                Ok(input) => input,
                Err(err) => {
                    writeln!(error, "Error: {err}")?;
                    writeln!(error, "for available command, enter `help`")?;
                    continue;
                }
            };
            match input {
                Input::Help => {
                    writeln!(output, "flip           - flip the board")?;
                    writeln!(output, "reset          - reset to starting position")?;
                    writeln!(output, "undo           - take back the last move")?;
                    writeln!(output, "history        - list the moves played")?;
                    writeln!(output, "quit           - quit the game")?;
                    writeln!(output, "import <fen>   - import a position")?;
                    writeln!(output, "fen            - export the position as fen")?;
                    writeln!(output, "perft <depth>  - count leaf nodes of the move tree")?;
                    writeln!(output, "fuzz <games>   - compare moves against a reference")?;
                    writeln!(output, "e2             - view legal moves")?;
                    writeln!(output, "e2e4           - play the move")?;
                    writeln!(output, "e7e8           - move and promote to a queen")?;
                    writeln!(output, "e1g1           - perform castling")?;
                }
                Input::Flip => {
                    view = !view;
                }
                Input::Reset => {
                    position = Position::new();
                    update = true;
                    highlighted.clear();
                }
                Input::Undo => {
                    if position.history().is_empty() {
                        writeln!(error, "Error: No move to undo")?;
                        continue;
                    }
                    position.undo();
                    update = true;
                    highlighted.clear();
                }
                Input::History => {
                    writeln!(output, "{}", history(&position))?;
                }
                Input::Quit => return Ok(()),
                Input::Import(fen) => {
                    position = match fen.try_into() {
                        Ok(position) => position,
                        Err(err) => {
                            writeln!(error, "Error: {err}")?;
                            continue;
                        }
                    };
                    update = true;
                    highlighted.clear();
                }
                Input::ExportFen => {
                    writeln!(output, "{}", position.as_fen())?;
                }
                Input::Perft(depth) => {
                    writeln!(output, "{}", position.perft(depth))?;
                    update = true;
                }
                Input::Fuzz(games) => match fuzz(games, FUZZ_PLIES, rand::random()) {
                    Ok(checked) => writeln!(output, "{checked} positions agree")?,
                    Err(mismatch) => {
                        writeln!(error, "Error: {mismatch}")?;
                        continue;
                    }
                },
                Input::Coord(coord) => {
                    if let Some(piece) = position.board()[coord] {
                        if piece.color != position.current_player() {
                            writeln!(error, "Error: It is {}'s turn", position.current_player())?;
                            continue;
                        }
                        highlighted.clear();
                        highlighted.extend(
                            legal_moves
                                .keys()
                                .filter(|notation| notation.origin == coord)
                                .map(|notation| notation.destination),
                        );
                    } else {
                        writeln!(error, "Error: No piece found on {coord}")?;
                        continue;
                    }
                }
                Input::Move(notation) => {
                    let Some(movement) = legal_moves.get(&notation) else {
                        writeln!(error, "Error: {notation} is an invalid move")?;
                        continue;
                    };
                    position.execute(*movement);
                    highlighted.clear();
                    highlighted.push(notation.origin);
                    highlighted.push(notation.destination);
                    update = true;
                }
            }
            break;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseInputError {
    Fen(ParseFenError),
    Move(ParseNotationError),
    Int(ParseIntError),
}
impl From<ParseFenError> for ParseInputError {
    fn from(value: ParseFenError) -> Self {
        ParseInputError::Fen(value)
    }
}
impl From<ParseNotationError> for ParseInputError {
    fn from(value: ParseNotationError) -> Self {
        ParseInputError::Move(value)
    }
}
impl From<ParseIntError> for ParseInputError {
    fn from(value: ParseIntError) -> Self {
        ParseInputError::Int(value)
    }
}
impl Display for ParseInputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseInputError::Fen(err) => write!(f, "{err}")?,
            ParseInputError::Move(err) => write!(f, "{err}")?,
            ParseInputError::Int(err) => write!(f, "{err}")?,
        }
        Ok(())
    }
}
impl Error for ParseInputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseInputError::Fen(err) => Some(err),
            ParseInputError::Move(err) => Some(err),
            ParseInputError::Int(err) => Some(err),
        }
    }
}
