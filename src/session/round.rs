use crate::game::choice::{Choice, Outcome};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub player_choice: Choice,
    pub computer_choice: Choice,
    pub result: Outcome,
    pub timestamp: DateTime<Utc>,
}

impl Round {
    pub fn new(player_choice: Choice, computer_choice: Choice, result: Outcome) -> Self {
        Round {
            player_choice,
            computer_choice,
            result,
            timestamp: Utc::now(),
        }
    }
}

/// Bounded round log, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    rounds: VecDeque<Round>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, round: Round) {
        self.rounds.push_front(round);
        self.rounds.truncate(HISTORY_CAPACITY);
    }

    /// Drop anything past capacity, e.g. after loading an oversized record.
    pub fn enforce_capacity(&mut self) {
        self.rounds.truncate(HISTORY_CAPACITY);
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn latest(&self) -> Option<&Round> {
        self.rounds.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Round> {
        self.rounds.iter()
    }

    pub fn recent(&self, limit: usize) -> Vec<Round> {
        self.rounds.iter().take(limit).cloned().collect()
    }

    pub fn player_choices(&self) -> Vec<Choice> {
        self.rounds.iter().map(|r| r.player_choice).collect()
    }

    pub fn computer_choices(&self) -> Vec<Choice> {
        self.rounds.iter().map(|r| r.computer_choice).collect()
    }

    pub fn clear(&mut self) {
        self.rounds.clear();
    }
}
