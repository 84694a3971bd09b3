use crate::game::Player;

use super::GameRecord;

/// Results over a series of games, by color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct MatchTally {
    pub red_wins: usize,
    pub yellow_wins: usize,
    pub draws: usize,
}

impl MatchTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, winner: Option<Player>) {
        match winner {
            Some(Player::Red) => self.red_wins += 1,
            Some(Player::Yellow) => self.yellow_wins += 1,
            None => self.draws += 1,
        }
    }

    pub fn record_game(&mut self, record: &GameRecord) {
        self.record(record.winner());
    }

    pub fn games(&self) -> usize {
        self.red_wins + self.yellow_wins + self.draws
    }

    pub fn wins(&self, player: Player) -> usize {
        match player {
            Player::Red => self.red_wins,
            Player::Yellow => self.yellow_wins,
        }
    }

    /// Fraction of games won by `player`.
    pub fn win_rate(&self, player: Player) -> f32 {
        let games = self.games();
        if games == 0 {
            return 0.0;
        }
        self.wins(player) as f32 / games as f32
    }

    pub fn draw_rate(&self) -> f32 {
        let games = self.games();
        if games == 0 {
            return 0.0;
        }
        self.draws as f32 / games as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tally_has_zero_rates() {
        let tally = MatchTally::new();
        assert_eq!(tally.games(), 0);
        assert_eq!(tally.win_rate(Player::Red), 0.0);
        assert_eq!(tally.draw_rate(), 0.0);
    }

    #[test]
    fn counts_by_color() {
        let mut tally = MatchTally::new();
        tally.record(Some(Player::Red));
        tally.record(Some(Player::Red));
        tally.record(Some(Player::Yellow));
        tally.record(None);

        assert_eq!(tally.games(), 4);
        assert_eq!(tally.wins(Player::Red), 2);
        assert!((tally.win_rate(Player::Red) - 0.5).abs() < 1e-6);
        assert!((tally.win_rate(Player::Yellow) - 0.25).abs() < 1e-6);
        assert!((tally.draw_rate() - 0.25).abs() < 1e-6);
    }
}
