use crate::game::{LegalMoves, CENTER_COL};

/// Center-first column order for better alpha-beta pruning.
///
/// Sorts by distance from the center column; the sort is stable, so of two
/// equally distant columns the lower index comes first.
pub fn order_moves(mut moves: LegalMoves) -> LegalMoves {
    moves.sort_by_key(|&col| col.abs_diff(CENTER_COL));
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, Player, ROWS};

    #[test]
    fn full_row_is_center_out() {
        let ordered = order_moves(Board::new().legal_moves());
        assert_eq!(ordered.as_slice(), &[3, 2, 4, 1, 5, 0, 6]);
    }

    #[test]
    fn ties_keep_ascending_order() {
        let moves: LegalMoves = [6, 0, 5, 1].into_iter().collect();
        // 1 and 5 are equally far from center, as are 0 and 6; input order wins
        assert_eq!(order_moves(moves).as_slice(), &[5, 1, 6, 0]);

        let moves: LegalMoves = [0, 1, 5, 6].into_iter().collect();
        assert_eq!(order_moves(moves).as_slice(), &[1, 5, 0, 6]);
    }

    #[test]
    fn skips_full_columns() {
        let mut board = Board::new();
        for _ in 0..ROWS {
            board = board.apply_move(3, Player::Red).unwrap();
        }
        let ordered = order_moves(board.legal_moves());
        assert_eq!(ordered.as_slice(), &[2, 4, 1, 5, 0, 6]);
    }

    #[test]
    fn empty_stays_empty() {
        assert!(order_moves(LegalMoves::new()).is_empty());
    }
}
