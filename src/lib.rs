//! # Minimax Connect Four
//!
//! Connect Four against a depth-limited minimax opponent with alpha-beta
//! pruning. Ships a terminal UI built with Ratatui for human-vs-AI play and a
//! headless arena for pitting agents against each other.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, win windows, player, state machine
//! - [`ai`] — Heuristic evaluation, move ordering, minimax search, agents
//! - [`arena`] — Headless games between agents and match tallies
//! - [`ui`] — Terminal UI: board, AI search stats, session summary
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod arena;
pub mod config;
pub mod error;
pub mod game;
pub mod ui;
