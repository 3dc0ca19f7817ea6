use std::fmt::{self, Display, Formatter};

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndState {
    /// Holds the winner.
    Checkmate(Color),
    Stalemate,
}
impl EndState {
    /// PGN-style result code.
    pub fn result(self) -> &'static str {
        match self {
            EndState::Checkmate(Color::White) => "1-0",
            EndState::Checkmate(Color::Black) => "0-1",
            EndState::Stalemate => "1/2-1/2",
        }
    }
}
impl Display for EndState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EndState::Checkmate(color) => write!(f, "{color} wins by checkmate")?,
            EndState::Stalemate => write!(f, "draw by stalemate")?,
        }
        Ok(())
    }
}
#[cfg(test)]
mod test {
    use crate::{color::Color, end_state::EndState};

    #[test]
    fn result_codes() {
        assert_eq!(EndState::Checkmate(Color::White).result(), "1-0");
        assert_eq!(EndState::Checkmate(Color::Black).result(), "0-1");
        assert_eq!(EndState::Stalemate.result(), "1/2-1/2");
        assert_eq!(
            EndState::Checkmate(Color::Black).to_string(),
            "black wins by checkmate"
        );
    }
}
