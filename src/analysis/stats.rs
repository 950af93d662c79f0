use crate::error::AppError;
use crate::game::choice::{Choice, Outcome};
use crate::storage::{self, Store, STATS_KEY};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceStats {
    pub played: u32,
    pub won: u32,
}

impl ChoiceStats {
    pub fn win_rate(&self) -> f64 {
        if self.played == 0 {
            0.0
        } else {
            self.won as f64 / self.played as f64
        }
    }
}

/// Aggregate view over every round since the last reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_games: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub win_streak: u32,
    pub max_win_streak: u32,
    pub loss_streak: u32,
    pub max_loss_streak: u32,
    pub favorite_choice: Option<Choice>,
    #[serde(rename = "choiceStats")]
    pub per_choice: BTreeMap<Choice, ChoiceStats>,
    #[serde(rename = "lastPlayed")]
    pub last_played_at: Option<DateTime<Utc>>,
}

impl Default for Stats {
    fn default() -> Self {
        Stats {
            total_games: 0,
            wins: 0,
            losses: 0,
            ties: 0,
            win_streak: 0,
            max_win_streak: 0,
            loss_streak: 0,
            max_loss_streak: 0,
            favorite_choice: None,
            per_choice: Choice::ALL
                .iter()
                .map(|c| (*c, ChoiceStats::default()))
                .collect(),
            last_played_at: None,
        }
    }
}

impl Stats {
    pub fn choice(&self, choice: Choice) -> ChoiceStats {
        self.per_choice.get(&choice).copied().unwrap_or_default()
    }

    /// Fold one completed round into the aggregate.
    pub fn apply(&mut self, outcome: Outcome, player_choice: Choice, at: DateTime<Utc>) {
        self.total_games += 1;
        let entry = self.per_choice.entry(player_choice).or_default();

        match outcome {
            Outcome::Win => {
                self.wins += 1;
                self.win_streak += 1;
                self.loss_streak = 0;
                self.max_win_streak = self.max_win_streak.max(self.win_streak);
                entry.won += 1;
            }
            Outcome::Lose => {
                self.losses += 1;
                self.loss_streak += 1;
                self.win_streak = 0;
                self.max_loss_streak = self.max_loss_streak.max(self.loss_streak);
            }
            Outcome::Tie => {
                self.ties += 1;
                self.win_streak = 0;
                self.loss_streak = 0;
            }
        }

        entry.played += 1;
        self.last_played_at = Some(at);
        self.recompute();
    }

    /// Re-derive `favorite_choice` from the per-choice counts, e.g. after
    /// deserialising a record written elsewhere.
    pub fn recompute(&mut self) {
        self.favorite_choice = self.most_played();
    }

    /// Highest `played` count; equal counts go to the earlier choice in
    /// rock, paper, scissors order. `None` before anything was played.
    pub fn most_played(&self) -> Option<Choice> {
        let mut best: Option<(Choice, u32)> = None;
        for choice in Choice::ALL {
            let played = self.choice(choice).played;
            if played == 0 {
                continue;
            }
            match best {
                Some((_, best_played)) if best_played >= played => {}
                _ => best = Some((choice, played)),
            }
        }
        best.map(|(choice, _)| choice)
    }

    pub fn win_percentage(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            (self.wins as f64 / self.total_games as f64) * 100.0
        }
    }
}

pub struct StatsAggregator {
    stats: Stats,
}

impl StatsAggregator {
    pub fn new() -> Self {
        StatsAggregator {
            stats: Stats::default(),
        }
    }

    pub fn from_stats(stats: Stats) -> Self {
        StatsAggregator { stats }
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Update the in-memory aggregate and return a copy of it.
    pub fn record_round(
        &mut self,
        outcome: Outcome,
        player_choice: Choice,
        computer_choice: Choice,
    ) -> Stats {
        self.stats.apply(outcome, player_choice, Utc::now());
        log::debug!(
            "recorded {} ({} vs {}), total {}",
            outcome,
            player_choice,
            computer_choice,
            self.stats.total_games
        );
        self.stats.clone()
    }

    pub fn persist(&self, store: &mut dyn Store) -> Result<(), AppError> {
        storage::save_record(store, STATS_KEY, &self.stats)
    }

    pub fn load(store: &dyn Store) -> Result<Self, AppError> {
        let mut stats = storage::load_record::<Stats>(store, STATS_KEY)?.unwrap_or_default();
        stats.recompute();
        Ok(Self::from_stats(stats))
    }

    pub fn reset(&mut self) {
        self.stats = Stats::default();
    }
}

impl Default for StatsAggregator {
    fn default() -> Self {
        Self::new()
    }
}
