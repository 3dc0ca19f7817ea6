//! Differential testing of [`Position::legal_moves`] against the `chess`
//! crate's move generator.

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use rand::{Rng, SeedableRng, rngs::SmallRng};
use rustc_hash::FxHashSet;

use crate::{
    coord::Coord,
    fen::Fen,
    moves::{Move, Notation},
    position::Position,
};

impl From<chess::Square> for Coord {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "file and rank indices are always below 8"
    )]
    fn from(value: chess::Square) -> Self {
        Coord::new(
            value.get_file().to_index() as u8,
            7 - value.get_rank().to_index() as u8,
        )
    }
}
/// Drops the promotion piece, which is always a queen here.
impl From<chess::ChessMove> for Notation {
    fn from(value: chess::ChessMove) -> Self {
        Notation {
            origin: value.get_source().into(),
            destination: value.get_dest().into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MismatchKind {
    /// Generated here but illegal according to the reference.
    Unexpected(Notation),
    /// Legal according to the reference but not generated here.
    Missing(Notation),
    LeavesKingInCheck(Notation),
    UndoDiverged(Notation),
    RejectedFen(String),
}
impl Display for MismatchKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MismatchKind::Unexpected(notation) => {
                write!(f, "found {notation} but it's not a legal move")?;
            }
            MismatchKind::Missing(notation) => write!(f, "{notation} not found")?,
            MismatchKind::LeavesKingInCheck(notation) => {
                write!(f, "{notation} leaves the king in check")?;
            }
            MismatchKind::UndoDiverged(notation) => {
                write!(f, "undoing {notation} did not restore the position")?;
            }
            MismatchKind::RejectedFen(message) => {
                write!(f, "reference rejected the position: {message}")?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub fen: Fen,
    pub kind: MismatchKind,
}
impl Display for Mismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {}", self.kind, self.fen)?;
        Ok(())
    }
}
impl Error for Mismatch {}

fn compare(position: &Position, moves: &[Move]) -> Result<(), Mismatch> {
    let fen = position.as_fen();
    let reference: chess::Board = fen.to_string().parse().map_err(|err| Mismatch {
        fen,
        kind: MismatchKind::RejectedFen(format!("{err:?}")),
    })?;
    let found: FxHashSet<Notation> = moves.iter().map(|movement| movement.notation()).collect();
    let expected: FxHashSet<Notation> = chess::MoveGen::new_legal(&reference)
        .map(Into::into)
        .collect();
    if let Some(notation) = found.difference(&expected).next() {
        return Err(Mismatch {
            fen,
            kind: MismatchKind::Unexpected(*notation),
        });
    }
    if let Some(notation) = expected.difference(&found).next() {
        return Err(Mismatch {
            fen,
            kind: MismatchKind::Missing(*notation),
        });
    }
    Ok(())
}
/// Plays `games` random games of at most `max_plies` plies each, checking
/// every visited position, and returns how many positions were checked.
pub fn fuzz(games: u32, max_plies: u32, seed: u64) -> Result<u64, Mismatch> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut checked = 0;
    for _ in 0..games {
        let mut position = Position::new();
        for _ in 0..max_plies {
            let moves = position.legal_moves();
            compare(&position, &moves)?;
            checked += 1;
            if moves.is_empty() {
                break;
            }
            let movement = moves[rng.random_range(0..moves.len())];
            let fen = position.as_fen();
            let before = position.snapshot();
            let mover = position.current_player();
            position.execute(movement);
            if position.analysis(mover).in_check() {
                return Err(Mismatch {
                    fen,
                    kind: MismatchKind::LeavesKingInCheck(movement.notation()),
                });
            }
            position.undo();
            if position.snapshot() != before {
                return Err(Mismatch {
                    fen,
                    kind: MismatchKind::UndoDiverged(movement.notation()),
                });
            }
            position.execute(movement);
        }
    }
    Ok(checked)
}
