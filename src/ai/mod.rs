//! The computer opponent: static evaluation, center-first move ordering,
//! minimax search with alpha-beta pruning, and the agents built on it.

mod agent;
pub mod heuristic;
pub mod minimax;
pub mod ordering;
mod random;
pub mod stats;

pub use agent::Agent;
pub use heuristic::{evaluate, ConnectFourHeuristic, Heuristic};
pub use minimax::{best_move, MinimaxAgent, Pruning, Searcher};
pub use ordering::order_moves;
pub use random::RandomAgent;
pub use stats::{SearchStats, SessionStats};
