use crate::game::GameState;

use super::stats::SearchStats;

/// Universal interface for all AI agents.
pub trait Agent {
    /// Select an action (column) given the current game state.
    /// Only called on non-terminal states.
    fn select_action(&mut self, state: &GameState) -> usize;

    /// Return the agent's display name.
    fn name(&self) -> &str;

    /// Statistics of the most recent search, for agents that search.
    fn last_search(&self) -> Option<SearchStats> {
        None
    }
}
