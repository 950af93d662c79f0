use crate::analysis::rounded_percent;
use crate::game::choice::Outcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Running scoreboard. `win_rate` is always derived from the counters,
/// both after each round and when a stored record is loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    player_score: u32,
    computer_score: u32,
    games_played: u32,
    #[serde(default)]
    win_rate: u32,
    #[serde(default)]
    last_updated: Option<DateTime<Utc>>,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.player_score += 1,
            Outcome::Lose => self.computer_score += 1,
            Outcome::Tie => {}
        }
        self.games_played += 1;
        self.last_updated = Some(Utc::now());
        self.recompute();
    }

    /// Re-derive `win_rate` from the counters, e.g. after deserialising.
    pub fn recompute(&mut self) {
        self.win_rate = rounded_percent(self.player_score as usize, self.games_played as usize);
    }

    pub fn player_score(&self) -> u32 {
        self.player_score
    }

    pub fn computer_score(&self) -> u32 {
        self.computer_score
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn win_rate(&self) -> u32 {
        self.win_rate
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_rule() {
        let mut score = Score::new();
        score.record(Outcome::Win);
        score.record(Outcome::Lose);
        score.record(Outcome::Tie);
        assert_eq!(score.player_score(), 1);
        assert_eq!(score.computer_score(), 1);
        assert_eq!(score.games_played(), 3);
        assert_eq!(score.win_rate(), 33);
        assert!(score.last_updated().is_some());
    }

    #[test]
    fn test_win_rate_rounds_half_up() {
        let mut score = Score::new();
        score.record(Outcome::Win);
        score.record(Outcome::Tie);
        assert_eq!(score.win_rate(), 50);
        score.record(Outcome::Win);
        assert_eq!(score.win_rate(), 67);
    }

    #[test]
    fn test_empty_score_has_zero_rate() {
        let mut score = Score::new();
        score.recompute();
        assert_eq!(score.win_rate(), 0);
    }

    #[test]
    fn test_stored_win_rate_is_not_trusted() {
        let mut score: Score = serde_json::from_str(
            r#"{"playerScore":3,"computerScore":1,"gamesPlayed":4,"winRate":99}"#,
        )
        .unwrap();
        score.recompute();
        assert_eq!(score.win_rate(), 75);
    }
}
