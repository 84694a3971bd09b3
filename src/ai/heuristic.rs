use crate::game::{Board, Cell, Player, CENTER_COL, ROWS, WIN_LENGTH};

/// Static evaluation of a board from a player's perspective.
pub trait Heuristic: Send + Sync {
    fn evaluate(&self, board: &Board, player: Player) -> i32;
}

/// Bonus per own piece in the center column. Opponent pieces there score 0.
pub const CENTER_BONUS: i32 = 6;

/// Default heuristic that scans all 4-cell windows and scores threats.
///
/// Own patterns are weighted above the matching opponent patterns, so the
/// evaluation leans towards building threats over blocking them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectFourHeuristic;

impl ConnectFourHeuristic {
    fn score_window(own: usize, opp: usize, empty: usize) -> i32 {
        if own == 4 {
            100
        } else if own == 3 && empty == 1 {
            10
        } else if own == 2 && empty == 2 {
            5
        } else if opp == 3 && empty == 1 {
            -8
        } else if opp == 2 && empty == 2 {
            -4
        } else {
            0
        }
    }
}

impl Heuristic for ConnectFourHeuristic {
    fn evaluate(&self, board: &Board, player: Player) -> i32 {
        let own_cell = player.to_cell();
        let mut score = 0;

        // Center column bonus
        for row in 0..ROWS {
            if board.get(row, CENTER_COL) == own_cell {
                score += CENTER_BONUS;
            }
        }

        for window in board.windows() {
            let mut own = 0;
            let mut opp = 0;
            let mut empty = 0;
            for cell in window {
                match cell {
                    Cell::Empty => empty += 1,
                    c if c == own_cell => own += 1,
                    _ => opp += 1,
                }
            }
            debug_assert_eq!(own + opp + empty, WIN_LENGTH);
            score += Self::score_window(own, opp, empty);
        }

        score
    }
}

/// Evaluate with the default heuristic.
pub fn evaluate(board: &Board, player: Player) -> i32 {
    ConnectFourHeuristic.evaluate(board, player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{COLS, ROWS};

    fn board_from_rows(rows: [&str; ROWS]) -> Board {
        let flat: Vec<u8> = rows
            .iter()
            .flat_map(|row| row.chars())
            .map(|c| match c {
                'X' => 1,
                'O' => 2,
                _ => 0,
            })
            .collect();
        Board::from_flat(&flat).unwrap()
    }

    /// Same physical position with the colors swapped.
    fn swap_colors(board: &Board) -> Board {
        let flat: Vec<u8> = board
            .to_flat()
            .iter()
            .map(|&code| match code {
                1 => 2,
                2 => 1,
                other => other,
            })
            .collect();
        Board::from_flat(&flat).unwrap()
    }

    #[test]
    fn heuristic_empty_board_is_zero() {
        let board = Board::new();
        assert_eq!(evaluate(&board, Player::Red), 0);
        assert_eq!(evaluate(&board, Player::Yellow), 0);
    }

    #[test]
    fn heuristic_single_center_piece() {
        let board = Board::new().apply_move(CENTER_COL, Player::Red).unwrap();
        // Only the center bonus: every window holds at most one piece
        assert_eq!(evaluate(&board, Player::Red), CENTER_BONUS);
        // The bonus is not mirrored as a penalty for the other side
        assert_eq!(evaluate(&board, Player::Yellow), 0);
    }

    #[test]
    fn heuristic_center_preference() {
        let center = Board::new().apply_move(3, Player::Red).unwrap();
        let edge = Board::new().apply_move(0, Player::Red).unwrap();
        assert!(evaluate(&center, Player::Red) > evaluate(&edge, Player::Red));
    }

    #[test]
    fn heuristic_window_weights() {
        // Red: two on the bottom row at columns 0-1.
        let board = board_from_rows([
            ".......",
            ".......",
            ".......",
            ".......",
            ".......",
            "XX.....",
        ]);
        // Horizontal windows with 2 red + 2 empty: cols 0-3 and... only 0-3 covers both
        // with room; cols 1-4 holds one red piece.
        assert_eq!(evaluate(&board, Player::Red), 5);
        assert_eq!(evaluate(&board, Player::Yellow), -4);
    }

    #[test]
    fn heuristic_three_in_a_row() {
        let board = board_from_rows([
            ".......",
            ".......",
            ".......",
            ".......",
            ".......",
            "XXX....",
        ]);
        // cols 0-3: three + empty (+10); cols 1-4: two + two empty (+5)
        assert_eq!(evaluate(&board, Player::Red), 15);
        assert_eq!(evaluate(&board, Player::Yellow), -12);
    }

    #[test]
    fn heuristic_mixed_windows_score_nothing() {
        let board = board_from_rows([
            ".......",
            ".......",
            ".......",
            ".......",
            ".......",
            "XO.....",
        ]);
        // The only windows with two pieces hold one of each
        assert_eq!(evaluate(&board, Player::Red), 0);
        assert_eq!(evaluate(&board, Player::Yellow), 0);
    }

    #[test]
    fn heuristic_complete_window() {
        let board = board_from_rows([
            ".......",
            ".......",
            ".......",
            ".......",
            ".......",
            "XXXX...",
        ]);
        // 0-3: four (+100), 1-4: three (+10), 2-5: two (+5), plus one center piece
        assert_eq!(evaluate(&board, Player::Red), 100 + 10 + 5 + CENTER_BONUS);
    }

    #[test]
    fn heuristic_symmetric_under_relabeling() {
        let board = board_from_rows([
            ".......",
            ".......",
            "...O...",
            "..XXO..",
            ".OXOX..",
            "XOXOOX.",
        ]);
        let swapped = swap_colors(&board);
        assert_eq!(
            evaluate(&board, Player::Red),
            evaluate(&swapped, Player::Yellow)
        );
        assert_eq!(
            evaluate(&board, Player::Yellow),
            evaluate(&swapped, Player::Red)
        );
    }

    #[test]
    fn heuristic_trait_object() {
        let h: Box<dyn Heuristic> = Box::new(ConnectFourHeuristic);
        let board = Board::new().apply_move(COLS - 1, Player::Yellow).unwrap();
        assert_eq!(h.evaluate(&board, Player::Yellow), 0);
    }
}
