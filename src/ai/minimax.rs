//! Depth-limited minimax with alpha-beta pruning.
//!
//! The AI is always the maximizing side. Terminal positions score
//! `WIN_SCORE + depth` (or its negation), where `depth` is the budget still
//! left at that node, so a shallower win outranks a deeper one and a loss
//! that comes later outranks one that comes sooner. Positions at the depth
//! horizon fall back to the [`Heuristic`].

use std::time::Instant;

use tracing::{debug, trace};

use crate::game::{Board, GameState, Player};

use super::agent::Agent;
use super::heuristic::{ConnectFourHeuristic, Heuristic};
use super::ordering::order_moves;
use super::stats::SearchStats;

/// Base value of a won (or, negated, lost) terminal position.
pub const WIN_SCORE: i32 = 1000;
pub const NEG_INF: i32 = i32::MIN;
pub const POS_INF: i32 = i32::MAX;

/// Whether the search may cut off subtrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pruning {
    #[default]
    AlphaBeta,
    /// Plain minimax over the whole tree. Same result, more nodes.
    Disabled,
}

/// Search configuration: the leaf evaluator and the pruning mode.
#[derive(Clone, Copy)]
pub struct Searcher<'h> {
    heuristic: &'h dyn Heuristic,
    pruning: Pruning,
}

impl<'h> Searcher<'h> {
    pub fn new(heuristic: &'h dyn Heuristic) -> Self {
        Searcher {
            heuristic,
            pruning: Pruning::AlphaBeta,
        }
    }

    pub fn with_pruning(mut self, pruning: Pruning) -> Self {
        self.pruning = pruning;
        self
    }

    /// Pick the best column for `ai` by searching `max_depth` plies.
    ///
    /// Every root move gets a full (-inf, +inf) window, so root values are
    /// exact and the first strictly better one wins. Ties keep the earlier
    /// move in center-first order.
    ///
    /// # Panics
    ///
    /// If `board` has no legal moves or `max_depth` is 0. Callers check
    /// `is_terminal` first.
    pub fn best_move(&self, board: &Board, ai: Player, max_depth: usize) -> (usize, SearchStats) {
        assert!(max_depth >= 1, "search depth must be at least 1");
        let moves = order_moves(board.legal_moves());
        assert!(
            !moves.is_empty(),
            "best_move called on a board with no legal moves"
        );

        let start = Instant::now();
        let mut stats = SearchStats {
            depth: max_depth,
            ..SearchStats::default()
        };

        let mut best_col = moves[0];
        let mut best_score = NEG_INF;

        for &col in &moves {
            let child = board
                .apply_move(col, ai)
                .expect("column comes from legal_moves");
            // The AI just moved, so the opponent replies next
            let score = self.minimax(&child, max_depth - 1, false, ai, NEG_INF, POS_INF, &mut stats);
            trace!(col, score, "root move scored");
            if score > best_score {
                best_score = score;
                best_col = col;
            }
        }

        stats.time_seconds = start.elapsed().as_secs_f64();
        stats.best_score = best_score;
        debug!(
            player = ai.name(),
            col = best_col,
            score = best_score,
            nodes = stats.nodes_expanded,
            depth = max_depth,
            seconds = stats.time_seconds,
            "search finished"
        );

        (best_col, stats)
    }

    /// Minimax value of `board` from `ai`'s point of view.
    ///
    /// `maximizing` is true when `ai` is to move. Every call counts as one
    /// expanded node in `stats`.
    #[allow(clippy::too_many_arguments)]
    pub fn minimax(
        &self,
        board: &Board,
        depth: usize,
        maximizing: bool,
        ai: Player,
        mut alpha: i32,
        mut beta: i32,
        stats: &mut SearchStats,
    ) -> i32 {
        stats.nodes_expanded += 1;

        if let Some(value) = terminal_value(board, ai, depth) {
            return value;
        }

        if depth == 0 {
            return self.heuristic.evaluate(board, ai);
        }

        let moves = order_moves(board.legal_moves());

        if maximizing {
            let mut best = NEG_INF;
            for col in moves {
                let child = board
                    .apply_move(col, ai)
                    .expect("column comes from legal_moves");
                let score = self.minimax(&child, depth - 1, false, ai, alpha, beta, stats);
                best = best.max(score);
                alpha = alpha.max(best);
                if self.pruning == Pruning::AlphaBeta && alpha >= beta {
                    break; // beta cutoff
                }
            }
            best
        } else {
            let opponent = ai.other();
            let mut best = POS_INF;
            for col in moves {
                let child = board
                    .apply_move(col, opponent)
                    .expect("column comes from legal_moves");
                let score = self.minimax(&child, depth - 1, true, ai, alpha, beta, stats);
                best = best.min(score);
                beta = beta.min(best);
                if self.pruning == Pruning::AlphaBeta && alpha >= beta {
                    break; // alpha cutoff
                }
            }
            best
        }
    }
}

/// Exact value of a terminal board, `None` if play continues.
///
/// Same outcome as [`Board::utility`], scaled by the remaining depth.
fn terminal_value(board: &Board, ai: Player, depth: usize) -> Option<i32> {
    let remaining = depth as i32;
    match board.winner() {
        Some(winner) if winner == ai => Some(WIN_SCORE + remaining),
        Some(_) => Some(-WIN_SCORE - remaining),
        None if board.is_full() => Some(0),
        None => None,
    }
}

/// Best move for `ai` with the default heuristic and alpha-beta pruning.
pub fn best_move(board: &Board, ai: Player, max_depth: usize) -> (usize, SearchStats) {
    Searcher::new(&ConnectFourHeuristic).best_move(board, ai, max_depth)
}

/// Minimax agent with alpha-beta pruning.
pub struct MinimaxAgent {
    depth: usize,
    heuristic: Box<dyn Heuristic>,
    last_search: Option<SearchStats>,
}

impl MinimaxAgent {
    pub fn new(depth: usize) -> Self {
        Self::with_heuristic(depth, Box::new(ConnectFourHeuristic))
    }

    pub fn with_heuristic(depth: usize, heuristic: Box<dyn Heuristic>) -> Self {
        MinimaxAgent {
            depth,
            heuristic,
            last_search: None,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn set_depth(&mut self, depth: usize) {
        self.depth = depth;
    }
}

impl Agent for MinimaxAgent {
    fn select_action(&mut self, state: &GameState) -> usize {
        let searcher = Searcher::new(self.heuristic.as_ref());
        let (col, stats) = searcher.best_move(state.board(), state.current_player(), self.depth);
        self.last_search = Some(stats);
        col
    }

    fn name(&self) -> &str {
        "Minimax"
    }

    fn last_search(&self) -> Option<SearchStats> {
        self.last_search
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::RandomAgent;
    use crate::game::{GameOutcome, CENTER_COL, COLS, ROWS};
    use proptest::prelude::*;

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

    fn unpruned_best_move(board: &Board, ai: Player, depth: usize) -> (usize, SearchStats) {
        Searcher::new(&ConnectFourHeuristic)
            .with_pruning(Pruning::Disabled)
            .best_move(board, ai, depth)
    }

    // --- Terminal scoring ---

    #[test]
    fn terminal_scores_rank_by_remaining_depth() {
        let board = board_from_rows([
            ".......",
            ".......",
            ".......",
            ".......",
            "OOO....",
            "XXXX...",
        ]);
        let searcher = Searcher::new(&ConnectFourHeuristic);
        let mut stats = SearchStats::default();

        let v = searcher.minimax(&board, 3, true, Player::Red, NEG_INF, POS_INF, &mut stats);
        assert_eq!(v, WIN_SCORE + 3);
        let v = searcher.minimax(&board, 0, false, Player::Red, NEG_INF, POS_INF, &mut stats);
        assert_eq!(v, WIN_SCORE);
        let v = searcher.minimax(&board, 2, true, Player::Yellow, NEG_INF, POS_INF, &mut stats);
        assert_eq!(v, -WIN_SCORE - 2);
        // One node per call, terminals included
        assert_eq!(stats.nodes_expanded, 3);
    }

    #[test]
    fn drawn_board_scores_zero() {
        let board = board_from_rows([
            "XXOOXXO",
            "OOXXOOX",
            "XXOOXXO",
            "OOXXOOX",
            "XXOOXXO",
            "OOXXOOX",
        ]);
        let searcher = Searcher::new(&ConnectFourHeuristic);
        let mut stats = SearchStats::default();
        for depth in [0, 4] {
            let v = searcher.minimax(&board, depth, true, Player::Red, NEG_INF, POS_INF, &mut stats);
            assert_eq!(v, 0);
        }
    }

    #[test]
    fn horizon_uses_heuristic() {
        let board = Board::new().apply_move(CENTER_COL, Player::Red).unwrap();
        let searcher = Searcher::new(&ConnectFourHeuristic);
        let mut stats = SearchStats::default();
        let v = searcher.minimax(&board, 0, true, Player::Red, NEG_INF, POS_INF, &mut stats);
        assert_eq!(v, ConnectFourHeuristic.evaluate(&board, Player::Red));
    }

    // --- Best-move selection ---

    #[test]
    fn empty_board_depth_one_takes_center() {
        let (col, stats) = best_move(&Board::new(), Player::Red, 1);
        assert_eq!(col, CENTER_COL);
        assert_eq!(stats.nodes_expanded, COLS as u64);
        assert_eq!(stats.depth, 1);
        assert!(stats.time_seconds >= 0.0);
    }

    #[test]
    fn takes_winning_move() {
        let board = board_from_rows([
            ".......",
            ".......",
            ".......",
            ".......",
            "......O",
            "XXX..OO",
        ]);
        for depth in 1..=5 {
            let (col, stats) = best_move(&board, Player::Red, depth);
            assert_eq!(col, 3, "depth {depth} should take the win at column 3");
            assert_eq!(stats.best_score, WIN_SCORE + depth as i32 - 1);
        }
    }

    #[test]
    fn blocks_opponent_win() {
        let board = board_from_rows([
            ".......",
            ".......",
            ".......",
            ".......",
            "......X",
            "OOO..XX",
        ]);
        for depth in 2..=4 {
            let (col, _) = best_move(&board, Player::Red, depth);
            assert_eq!(col, 3, "depth {depth} should block column 3");
        }
    }

    #[test]
    fn prefers_win_over_block() {
        // Both sides threaten column 3; Red to move takes the win
        let board = board_from_rows([
            ".......",
            ".......",
            ".......",
            ".......",
            "OOO....",
            "XXX....",
        ]);
        let (col, stats) = best_move(&board, Player::Red, 4);
        assert_eq!(col, 3);
        assert_eq!(stats.best_score, WIN_SCORE + 3);
    }

    #[test]
    fn plays_for_yellow_too() {
        let board = board_from_rows([
            ".......",
            ".......",
            ".......",
            "O......",
            "O......",
            "OXXX..X",
        ]);
        // Yellow wins on top of column 0; blocking at 4 comes too late
        let (col, _) = best_move(&board, Player::Yellow, 3);
        assert_eq!(col, 0);
    }

    #[test]
    #[should_panic(expected = "no legal moves")]
    fn full_board_panics() {
        let board = board_from_rows([
            "XXOOXXO",
            "OOXXOOX",
            "XXOOXXO",
            "OOXXOOX",
            "XXOOXXO",
            "OOXXOOX",
        ]);
        best_move(&board, Player::Red, 3);
    }

    #[test]
    #[should_panic(expected = "at least 1")]
    fn zero_depth_panics() {
        best_move(&Board::new(), Player::Red, 0);
    }

    // --- Pruning ---

    #[test]
    fn unpruned_search_visits_whole_tree() {
        // No game can end within four plies of the empty board
        let (_, stats) = unpruned_best_move(&Board::new(), Player::Red, 4);
        assert_eq!(stats.nodes_expanded, 7 * (1 + 7 + 49 + 343));
    }

    #[test]
    fn pruning_matches_full_minimax_on_empty_board() {
        let (full_col, full) = unpruned_best_move(&Board::new(), Player::Red, 4);
        let (pruned_col, pruned) = best_move(&Board::new(), Player::Red, 4);
        assert_eq!(pruned_col, full_col);
        assert_eq!(pruned.best_score, full.best_score);
        assert!(pruned.nodes_expanded < full.nodes_expanded);
    }

    /// Alternate legal moves picked by index until the game ends or choices run out.
    fn reachable(choices: &[usize]) -> Option<(Board, Player)> {
        let mut board = Board::new();
        let mut player = Player::Red;
        for &choice in choices {
            let legal = board.legal_moves();
            let next = board.apply_move(legal[choice % legal.len()], player).unwrap();
            if next.is_terminal() {
                break;
            }
            board = next;
            player = player.other();
        }
        (!board.is_terminal()).then_some((board, player))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_pruning_preserves_choice(
            choices in proptest::collection::vec(0..COLS, 0..24),
            depth in 1usize..=4,
        ) {
            if let Some((board, to_move)) = reachable(&choices) {
                let (full_col, full) = unpruned_best_move(&board, to_move, depth);
                let (pruned_col, pruned) = best_move(&board, to_move, depth);
                prop_assert_eq!(pruned_col, full_col);
                prop_assert_eq!(pruned.best_score, full.best_score);
                prop_assert!(pruned.nodes_expanded <= full.nodes_expanded);
            }
        }
    }

    // --- Agent ---

    #[test]
    fn agent_records_last_search() {
        let mut agent = MinimaxAgent::new(3);
        assert!(agent.last_search().is_none());
        let state = GameState::initial();
        let action = agent.select_action(&state);
        assert!(state.legal_moves().contains(&action));
        let stats = agent.last_search().unwrap();
        assert_eq!(stats.depth, 3);
        assert!(stats.nodes_expanded > 0);
        assert_eq!(agent.name(), "Minimax");
    }

    #[test]
    fn full_game_vs_self_completes() {
        let mut agent1 = MinimaxAgent::new(3);
        let mut agent2 = MinimaxAgent::new(3);
        let mut state = GameState::initial();
        let mut turn = 0;

        while !state.is_terminal() && turn < ROWS * COLS {
            let action = if turn % 2 == 0 {
                agent1.select_action(&state)
            } else {
                agent2.select_action(&state)
            };
            state = state.apply_move(action).unwrap();
            turn += 1;
        }

        assert!(state.is_terminal(), "Game should complete");
        assert!(state.outcome().is_some());
    }

    #[test]
    fn beats_random_agent() {
        let games_per_color = 10;
        let mut minimax_wins = 0;
        let total = games_per_color * 2;

        for game in 0..total {
            let minimax_color = if game % 2 == 0 { Player::Red } else { Player::Yellow };
            let mut minimax = MinimaxAgent::new(4);
            let mut random = RandomAgent::seeded(game as u64);
            let mut state = GameState::initial();

            while !state.is_terminal() {
                let action = if state.current_player() == minimax_color {
                    minimax.select_action(&state)
                } else {
                    random.select_action(&state)
                };
                state = state.apply_move(action).unwrap();
            }

            if state.outcome() == Some(GameOutcome::Winner(minimax_color)) {
                minimax_wins += 1;
            }
        }

        let win_rate = minimax_wins as f64 / total as f64;
        assert!(
            win_rate > 0.80,
            "Minimax should beat random >80% of the time, got {:.0}% ({minimax_wins}/{total})",
            win_rate * 100.0
        );
    }
}
