use std::time::Duration;

/// Statistics for one `best_move` call.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct SearchStats {
    /// Every search call, leaves and terminals included.
    pub nodes_expanded: u64,
    /// Wall-clock time of the whole call.
    pub time_seconds: f64,
    /// The `max_depth` the search ran with.
    pub depth: usize,
    /// Value of the chosen root move.
    pub best_score: i32,
}

/// Cumulative AI performance over one game.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct SessionStats {
    pub total_nodes: u64,
    pub moves: usize,
    pub total_seconds: f64,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, stats: &SearchStats) {
        self.total_nodes += stats.nodes_expanded;
        self.total_seconds += stats.time_seconds;
        self.moves += 1;
    }

    /// Average nodes per move, rounded down (0 before the first move).
    pub fn average_nodes(&self) -> u64 {
        self.total_nodes / self.moves.max(1) as u64
    }

    pub fn total_time(&self) -> Duration {
        Duration::from_secs_f64(self.total_seconds)
    }

    pub fn merge(&mut self, other: &SessionStats) {
        self.total_nodes += other.total_nodes;
        self.moves += other.moves;
        self.total_seconds += other.total_seconds;
    }
}
