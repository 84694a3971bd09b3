//! Terminal UI for playing against the minimax AI: board, search statistics
//! for the last AI move, and a per-game AI performance summary.

mod app;
mod game_view;

pub use app::App;
