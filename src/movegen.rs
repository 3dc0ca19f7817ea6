//! Legal move generation: per-piece pseudo-legal generators gated by pins,
//! castling, and the check filter.

use crate::{
    analysis::{Analysis, Check, is_attacked},
    board::Board,
    castling_right::{CastlingRight, CastlingSide},
    color::Color,
    coord::{Coord, Vector, home_rank, pawn_home_rank},
    moves::Move,
    piece::PieceKind,
};

pub struct MoveGen<'a> {
    board: &'a Board,
    color: Color,
    king: Coord,
    castling_right: CastlingRight,
    analysis: &'a Analysis,
}
impl<'a> MoveGen<'a> {
    /// `analysis` must be the one computed for `color`'s king on `king`.
    pub fn new(
        board: &'a Board,
        color: Color,
        king: Coord,
        castling_right: CastlingRight,
        analysis: &'a Analysis,
    ) -> Self {
        MoveGen {
            board,
            color,
            king,
            castling_right,
            analysis,
        }
    }
    /// Legal moves in board order, castling moves right after the king's own.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for (position, piece) in self.board.pieces_of(self.color) {
            match piece.kind {
                PieceKind::Pawn => self.pawn_moves(position, &mut moves),
                PieceKind::Knight => self.knight_moves(position, &mut moves),
                PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                    self.sliding_moves(position, piece.kind.directions(), &mut moves);
                }
                PieceKind::King => {
                    self.king_moves(position, &mut moves);
                    self.castling_moves(position, &mut moves);
                }
            }
        }
        moves.retain(|movement| self.resolves_check(*movement));
        moves
    }
    fn push(&self, origin: Coord, destination: Coord, moves: &mut Vec<Move>) {
        moves.push(Move::new(origin, destination, self.board));
    }
    fn is_enemy(&self, position: Coord) -> bool {
        self.board[position].is_some_and(|piece| piece.color != self.color)
    }
    fn is_enterable(&self, position: Coord) -> bool {
        self.board[position].is_none_or(|piece| piece.color != self.color)
    }
    fn respects_pin(&self, origin: Coord, destination: Coord) -> bool {
        self.analysis.pin_axis(origin).is_none_or(|axis| {
            let direction = (destination - origin).as_unit();
            direction == axis || direction == -axis
        })
    }
    fn pawn_moves(&self, position: Coord, moves: &mut Vec<Move>) {
        let forward_jumps = if position.y() == pawn_home_rank(self.color) {
            2
        } else {
            1
        };
        let pushes = position
            .line_exclusive(Vector::pawn_single_move(self.color))
            .take(forward_jumps)
            .take_while(|destination| self.board[*destination].is_none());
        let captures = Vector::pawn_attacks(self.color)
            .into_iter()
            .filter_map(|attack| position.move_by(attack))
            .filter(|destination| self.is_enemy(*destination));
        for destination in pushes.chain(captures) {
            if self.respects_pin(position, destination) {
                self.push(position, destination, moves);
            }
        }
    }
    fn knight_moves(&self, position: Coord, moves: &mut Vec<Move>) {
        // no pin axis admits an L-shaped step
        if self.analysis.pin_axis(position).is_some() {
            return;
        }
        for destination in Vector::KNIGHT_MOVES
            .into_iter()
            .filter_map(|offset| position.move_by(offset))
        {
            if self.is_enterable(destination) {
                self.push(position, destination, moves);
            }
        }
    }
    fn sliding_moves(&self, position: Coord, directions: &[Vector], moves: &mut Vec<Move>) {
        let axis = self.analysis.pin_axis(position);
        for direction in directions.iter().copied() {
            if axis.is_some_and(|axis| direction != axis && direction != -axis) {
                continue;
            }
            for destination in position.line_exclusive(direction) {
                if self.is_enterable(destination) {
                    self.push(position, destination, moves);
                }
                if self.board[destination].is_some() {
                    break;
                }
            }
        }
    }
    fn king_moves(&self, position: Coord, moves: &mut Vec<Move>) {
        for destination in Vector::KING_MOVES
            .into_iter()
            .filter_map(|offset| position.move_by(offset))
        {
            if self.is_enterable(destination) && self.is_king_safe(position, destination) {
                self.push(position, destination, moves);
            }
        }
    }
    /// Probes the king on `destination` using a copy of the board, so the
    /// square it leaves no longer blocks rays aimed at it.
    fn is_king_safe(&self, origin: Coord, destination: Coord) -> bool {
        let mut probe = *self.board;
        probe.relocate(origin, destination);
        !Analysis::new(&probe, destination, self.color).in_check()
    }
    fn castling_moves(&self, king: Coord, moves: &mut Vec<Move>) {
        if self.analysis.in_check() {
            return;
        }
        let y = home_rank(self.color);
        for side in CastlingSide::ALL {
            if !self.castling_right.get(self.color, side) {
                continue;
            }
            let is_clear = side
                .empty_files()
                .iter()
                .all(|x| self.board[Coord::new(*x, y)].is_none());
            let is_safe = side
                .safe_files()
                .iter()
                .all(|x| !is_attacked(self.board, Coord::new(*x, y), !self.color));
            if is_clear && is_safe {
                moves.push(Move::castle(
                    king,
                    Coord::new(side.king_destination_x(), y),
                    self.board,
                ));
            }
        }
    }
    fn resolves_check(&self, movement: Move) -> bool {
        if movement.moved().kind == PieceKind::King {
            // already probed for safety
            return true;
        }
        match self.analysis.checks.as_slice() {
            [] => true,
            [check] => self.blocks_or_captures(*check, movement.destination()),
            _ => false,
        }
    }
    fn blocks_or_captures(&self, check: Check, destination: Coord) -> bool {
        let is_knight = self.board[check.position]
            .is_some_and(|piece| piece.kind == PieceKind::Knight);
        if is_knight {
            destination == check.position
        } else {
            self.king
                .line_exclusive_inclusive(check.position, check.direction)
                .any(|position| position == destination)
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{coord, fen::Fen, moves::Notation, position::Position};

    fn position(fen: &str) -> Position {
        let fen: Fen = fen.parse().unwrap();
        fen.try_into().unwrap()
    }
    fn notations(position: &mut Position) -> Vec<String> {
        position
            .legal_moves()
            .into_iter()
            .map(|movement| movement.to_string())
            .collect()
    }
    fn moves_from(position: &mut Position, origin: crate::coord::Coord) -> Vec<String> {
        position
            .legal_moves()
            .into_iter()
            .filter(|movement| movement.origin() == origin)
            .map(|movement| movement.to_string())
            .collect()
    }

    #[test]
    fn starting_position_has_twenty_moves() {
        let mut position = Position::new();
        let moves = position.legal_moves();
        assert_eq!(moves.len(), 20);
        assert!(moves.iter().all(|movement| !movement.is_castle()));
        assert_eq!(
            moves
                .iter()
                .filter(|movement| movement.moved().kind == crate::piece::PieceKind::Pawn)
                .count(),
            16
        );
    }
    #[test]
    fn pinned_knight_cannot_move() {
        let mut position = position("4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1");
        assert!(moves_from(&mut position, coord!("e2")).is_empty());
    }
    #[test]
    fn pinned_rook_slides_along_the_pin() {
        let mut position = position("4k3/4r3/8/8/8/8/4R3/4K3 w - - 0 1");
        let mut moves = moves_from(&mut position, coord!("e2"));
        moves.sort();
        assert_eq!(moves, ["e2e3", "e2e4", "e2e5", "e2e6", "e2e7"]);
    }
    #[test]
    fn pinned_pawn_may_only_capture_the_pinner() {
        let mut position = position("4k3/8/8/8/8/2b5/3P4/4K3 w - - 0 1");
        assert_eq!(moves_from(&mut position, coord!("d2")), ["d2c3"]);
    }
    #[test]
    fn double_check_allows_only_king_moves() {
        let mut position = position("4r2k/8/8/8/8/3n4/R7/4K3 w - - 0 1");
        let mut moves = notations(&mut position);
        moves.sort();
        assert_eq!(moves, ["e1d1", "e1d2", "e1f1"]);
        assert!(position.is_in_check());
    }
    #[test]
    fn knight_check_cannot_be_blocked() {
        let mut position = position("4k3/8/8/8/8/R2n4/8/4K3 w - - 0 1");
        assert_eq!(moves_from(&mut position, coord!("a3")), ["a3d3"]);
        let mut king_moves = moves_from(&mut position, coord!("e1"));
        king_moves.sort();
        assert_eq!(king_moves, ["e1d1", "e1d2", "e1e2", "e1f1"]);
    }
    #[test]
    fn slider_check_can_be_blocked_or_captured() {
        let mut position = position("4k3/8/8/8/8/8/5B2/4K2r w - - 0 1");
        assert_eq!(moves_from(&mut position, coord!("f2")), ["f2g1"]);
        let mut king_moves = moves_from(&mut position, coord!("e1"));
        king_moves.sort();
        assert_eq!(king_moves, ["e1d2", "e1e2"]);

        let mut position = self::position("4k3/8/8/8/8/8/8/3RK2r w - - 0 1");
        assert!(moves_from(&mut position, coord!("d1")).is_empty());
        let mut position = self::position("4k3/8/8/8/8/8/7R/4K2r w - - 0 1");
        assert_eq!(moves_from(&mut position, coord!("h2")), ["h2h1"]);
    }
    #[test]
    fn king_cannot_step_along_the_checking_ray() {
        let mut position = position("4k3/8/8/8/8/8/8/r3K3 w - - 0 1");
        let mut moves = notations(&mut position);
        moves.sort();
        assert_eq!(moves, ["e1d2", "e1e2", "e1f2"]);
    }
    #[test]
    fn kings_keep_their_distance() {
        let mut position = position("8/8/8/8/8/4k3/8/4K3 w - - 0 1");
        let mut moves = notations(&mut position);
        moves.sort();
        assert_eq!(moves, ["e1d1", "e1f1"]);
    }
    #[test]
    fn castling_is_offered_on_both_wings() {
        let mut position = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let castles: Vec<_> = position
            .legal_moves()
            .into_iter()
            .filter(|movement| movement.is_castle())
            .map(|movement| movement.to_string())
            .collect();
        assert_eq!(castles, ["e1g1", "e1c1"]);
    }
    #[test]
    fn king_side_castling_excluded_when_transit_attacked() {
        for fen in [
            "4kr2/8/8/8/8/8/8/4K2R w K - 0 1",
            "4k1r1/8/8/8/8/8/8/4K2R w K - 0 1",
        ] {
            let mut position = position(fen);
            assert!(
                !notations(&mut position).contains(&"e1g1".to_owned()),
                "{fen}"
            );
        }
        let mut position = position("4k2r/8/8/8/8/8/8/4K2R w K - 0 1");
        assert!(notations(&mut position).contains(&"e1g1".to_owned()));
    }
    #[test]
    fn queen_side_castling_needs_the_knight_square_empty_but_not_safe() {
        let mut blocked = position("4k3/8/8/8/8/8/8/RN2K3 w Q - 0 1");
        assert!(!notations(&mut blocked).contains(&"e1c1".to_owned()));
        // b1 is attacked yet only d1 and c1 have to be safe
        let mut attacked = position("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert!(notations(&mut attacked).contains(&"e1c1".to_owned()));
        let mut unsafe_transit = position("3rk3/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert!(!notations(&mut unsafe_transit).contains(&"e1c1".to_owned()));
    }
    #[test]
    fn castling_unavailable_while_in_check() {
        let mut position = position("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(
            position
                .legal_moves()
                .iter()
                .all(|movement| !movement.is_castle())
        );
    }
    #[test]
    fn castling_requires_the_right() {
        let mut position = position("4k3/8/8/8/8/8/8/R3K2R w - - 0 1");
        assert!(
            position
                .legal_moves()
                .iter()
                .all(|movement| !movement.is_castle())
        );
    }
    #[test]
    fn notation_lookup() {
        let mut position = Position::new();
        let notation: Notation = "g1f3".parse().unwrap();
        assert!(position.find_move(notation).is_some());
        let notation: Notation = "g1g3".parse().unwrap();
        assert!(position.find_move(notation).is_none());
    }
}
