//! Check and pin detection around a king.

use crate::{
    board::Board,
    color::Color,
    coord::{Coord, Vector},
    piece::PieceKind,
};

/// A friendly piece that may only move along `axis`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pin {
    pub position: Coord,
    pub axis: Vector,
}
/// An enemy piece attacking the king. `direction` points from the king toward
/// the checker: a unit vector for ray attackers, the knight offset otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Check {
    pub position: Coord,
    pub direction: Vector,
}

/// Safety of one king, recomputed for every legality query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Analysis {
    pub pins: Vec<Pin>,
    pub checks: Vec<Check>,
}
impl Analysis {
    /// Scans outward from `king`, treating pieces of `color` as friendly.
    ///
    /// Along each of the eight rays, the first friendly piece is a pin
    /// candidate and a second one shuts the ray. The first enemy piece ends
    /// the ray; it registers a check when nothing stands in between, or a pin
    /// on the candidate otherwise, provided it can attack along that ray from
    /// that distance. Knights are probed separately since they check through
    /// blockers and never pin.
    pub fn new(board: &Board, king: Coord, color: Color) -> Self {
        let mut pins = Vec::new();
        let mut checks = Vec::new();
        for direction in Vector::QUEEN_DIRECTIONS {
            let mut candidate = None;
            for (distance, position) in (1..).zip(king.line_exclusive(direction)) {
                let Some(piece) = board[position] else {
                    continue;
                };
                if piece.color == color {
                    if candidate.is_some() {
                        break;
                    }
                    candidate = Some(position);
                    continue;
                }
                if piece.attacks_along(direction, distance) {
                    match candidate {
                        Some(pinned) => pins.push(Pin {
                            position: pinned,
                            axis: direction,
                        }),
                        None => checks.push(Check {
                            position,
                            direction,
                        }),
                    }
                }
                break;
            }
        }
        for offset in Vector::KNIGHT_MOVES {
            if let Some(position) = king.move_by(offset)
                && board[position]
                    .is_some_and(|piece| piece.color != color && piece.kind == PieceKind::Knight)
            {
                checks.push(Check {
                    position,
                    direction: offset,
                });
            }
        }
        Analysis { pins, checks }
    }
    pub fn in_check(&self) -> bool {
        !self.checks.is_empty()
    }
    pub fn is_double_check(&self) -> bool {
        self.checks.len() >= 2
    }
    pub fn pin_axis(&self, position: Coord) -> Option<Vector> {
        self.pins
            .iter()
            .find(|pin| pin.position == position)
            .map(|pin| pin.axis)
    }
}
/// Whether any piece of `by` attacks `position`, with the current occupancy
/// acting as blockers.
pub fn is_attacked(board: &Board, position: Coord, by: Color) -> bool {
    Analysis::new(board, position, !by).in_check()
}

#[cfg(test)]
mod test {
    use crate::{
        analysis::{Analysis, Check, Pin, is_attacked},
        color::Color,
        coord,
        coord::Vector,
        fen::Fen,
    };

    fn analyze(fen: &str, king: crate::coord::Coord, color: Color) -> Analysis {
        let fen: Fen = fen.parse().unwrap();
        Analysis::new(&fen.board, king, color)
    }

    #[test]
    fn starting_position_is_quiet() {
        let analysis = analyze(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            coord!("e1"),
            Color::White,
        );
        assert_eq!(analysis, Analysis::default());
    }
    #[test]
    fn pin_along_file() {
        let analysis = analyze("4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1", coord!("e1"), Color::White);
        assert!(!analysis.in_check());
        assert_eq!(
            analysis.pins,
            [Pin {
                position: coord!("e2"),
                axis: Vector { x: 0, y: -1 },
            }]
        );
    }
    #[test]
    fn second_friendly_piece_shuts_the_ray() {
        let analysis = analyze("4k3/4r3/8/8/8/4B3/4N3/4K3 w - - 0 1", coord!("e1"), Color::White);
        assert_eq!(analysis, Analysis::default());
    }
    #[test]
    fn ineligible_enemy_shuts_the_ray() {
        // the knight on e4 neither checks along the file nor lets the rook through
        let analysis = analyze("4k3/4r3/8/8/4n3/8/8/4K3 w - - 0 1", coord!("e1"), Color::White);
        assert_eq!(analysis, Analysis::default());
    }
    #[test]
    fn slider_and_knight_give_double_check() {
        let analysis = analyze("4r2k/8/8/8/8/3n4/R7/4K3 w - - 0 1", coord!("e1"), Color::White);
        assert!(analysis.is_double_check());
        assert!(analysis.checks.contains(&Check {
            position: coord!("e8"),
            direction: Vector { x: 0, y: -1 },
        }));
        assert!(analysis.checks.contains(&Check {
            position: coord!("d3"),
            direction: Vector { x: -1, y: -2 },
        }));
    }
    #[test]
    fn pawn_checks_only_forward_diagonally() {
        let checked = analyze("8/8/8/8/8/3p4/4K3/k7 w - - 0 1", coord!("e2"), Color::White);
        assert_eq!(
            checked.checks,
            [Check {
                position: coord!("d3"),
                direction: Vector { x: -1, y: -1 },
            }]
        );
        // a black pawn behind the king does not attack it
        let quiet = analyze("8/8/8/8/8/8/4K3/k2p4 w - - 0 1", coord!("e2"), Color::White);
        assert!(!quiet.in_check());
    }
    #[test]
    fn bishop_pins_but_does_not_check_orthogonally() {
        let analysis = analyze("4k3/8/8/8/8/2b5/3P4/4K3 w - - 0 1", coord!("e1"), Color::White);
        assert!(!analysis.in_check());
        assert_eq!(analysis.pin_axis(coord!("d2")), Some(Vector { x: -1, y: -1 }));
        let rook = analyze("4k3/8/8/8/8/2r5/3P4/4K3 w - - 0 1", coord!("e1"), Color::White);
        assert_eq!(rook, Analysis::default());
    }
    #[test]
    fn attacked_squares_respect_blockers() {
        let fen: Fen = "4kr2/8/8/8/8/8/5P2/4K2R w K - 0 1".parse().unwrap();
        assert!(!is_attacked(&fen.board, coord!("f1"), Color::Black));
        assert!(is_attacked(&fen.board, coord!("f3"), Color::Black));
        assert!(is_attacked(&fen.board, coord!("d8"), Color::Black));
        assert!(!is_attacked(&fen.board, coord!("g1"), Color::Black));
    }
}
