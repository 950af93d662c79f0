use super::round::{History, Round};
use super::score::Score;
use super::slot::{RequestSlot, Ticket};
use crate::analysis::stats::{Stats, StatsAggregator};
use crate::analysis::streak::{current_streak, Streak};
use crate::error::AppError;
use crate::game::choice::Choice;
use crate::game::rules::evaluate;
use crate::opponent::Opponent;
use crate::storage::{self, Store, HISTORY_KEY, SCORES_KEY, STATS_KEY};

pub const DEFAULT_RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing on the table: fresh session, or the last round was cleared.
    Idle,
    RoundComplete(Round),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    RoundPlayed(Round),
    ResetRound,
    ResetScores,
    ResetHistory,
    ResetStats,
    ResetAll,
}

/// A validated player move waiting for the opponent's answer.
#[derive(Debug)]
#[must_use = "a pending round does nothing until completed"]
pub struct PendingRound {
    ticket: Ticket,
    player_choice: Choice,
}

impl PendingRound {
    pub fn player_choice(&self) -> Choice {
        self.player_choice
    }
}

#[derive(Debug)]
pub struct RoundReport {
    pub round: Round,
    pub score: Score,
    pub stats: Stats,
    /// Storage failures hit while persisting this round. The in-memory
    /// state above is authoritative regardless.
    pub warnings: Vec<AppError>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Dirty {
    scores: bool,
    history: bool,
    stats: bool,
}

pub struct Session {
    state: SessionState,
    score: Score,
    history: History,
    stats: StatsAggregator,
    slot: RequestSlot,
    store: Box<dyn Store>,
    dirty: Dirty,
}

impl Session {
    pub fn new(store: Box<dyn Store>) -> Self {
        Session {
            state: SessionState::Idle,
            score: Score::new(),
            history: History::new(),
            stats: StatsAggregator::new(),
            slot: RequestSlot::new(),
            store,
            dirty: Dirty::default(),
        }
    }

    /// Restore from `store`. Unreadable records fall back to defaults and
    /// come back as warnings.
    pub fn load(store: Box<dyn Store>) -> (Self, Vec<AppError>) {
        let mut session = Session::new(store);
        let mut warnings = Vec::new();

        match storage::load_record::<Score>(session.store.as_ref(), SCORES_KEY) {
            Ok(Some(mut score)) => {
                score.recompute();
                session.score = score;
            }
            Ok(None) => {}
            Err(e) => warnings.push(e),
        }

        match storage::load_record::<History>(session.store.as_ref(), HISTORY_KEY) {
            Ok(Some(mut history)) => {
                history.enforce_capacity();
                session.history = history;
            }
            Ok(None) => {}
            Err(e) => warnings.push(e),
        }

        match StatsAggregator::load(session.store.as_ref()) {
            Ok(stats) => session.stats = stats,
            Err(e) => warnings.push(e),
        }

        for warning in &warnings {
            log::warn!("starting from defaults: {}", warning);
        }

        (session, warnings)
    }

    /// Validate, ask the opponent, evaluate, record and persist.
    /// A failed validation or opponent call leaves every counter untouched.
    pub fn play_round(
        &mut self,
        token: &str,
        opponent: &mut dyn Opponent,
    ) -> Result<RoundReport, AppError> {
        let pending = self.begin_round(token)?;
        opponent.prepare(pending.player_choice());

        let computer_choice = match opponent.next_move(&self.history.player_choices()) {
            Ok(choice) => choice,
            Err(e) => {
                self.slot.cancel();
                return Err(e);
            }
        };

        self.complete_round(pending, computer_choice)
            .ok_or(AppError::Cancelled)
    }

    /// Validate `token` and claim the in-flight slot. Any earlier pending
    /// round is superseded.
    pub fn begin_round(&mut self, token: &str) -> Result<PendingRound, AppError> {
        let player_choice = token.parse::<Choice>()?;
        let ticket = self.slot.issue();
        Ok(PendingRound {
            ticket,
            player_choice,
        })
    }

    /// Commit a pending round. Returns `None`, with no state change, when
    /// the round was superseded or cancelled in the meantime.
    pub fn complete_round(
        &mut self,
        pending: PendingRound,
        computer_choice: Choice,
    ) -> Option<RoundReport> {
        if !self.slot.settle(pending.ticket) {
            log::debug!("discarding superseded round ({})", pending.player_choice);
            return None;
        }

        let result = evaluate(pending.player_choice, computer_choice);
        let round = Round::new(pending.player_choice, computer_choice, result);
        self.apply(Transition::RoundPlayed(round.clone()));
        log::info!(
            "round {}: {} vs {} -> {}",
            self.score.games_played(),
            round.player_choice,
            round.computer_choice,
            round.result
        );

        let warnings = self.flush();
        Some(RoundReport {
            round,
            score: self.score.clone(),
            stats: self.stats.stats().clone(),
            warnings,
        })
    }

    pub fn cancel_pending(&mut self) -> bool {
        self.slot.cancel()
    }

    pub fn has_pending(&self) -> bool {
        self.slot.is_busy()
    }

    /// Apply one in-memory transition. Persistence is left to [`Session::flush`].
    pub fn apply(&mut self, transition: Transition) -> &SessionState {
        match transition {
            Transition::RoundPlayed(round) => {
                self.score.record(round.result);
                self.history.push(round.clone());
                self.stats
                    .record_round(round.result, round.player_choice, round.computer_choice);
                self.state = SessionState::RoundComplete(round);
                self.dirty = Dirty {
                    scores: true,
                    history: true,
                    stats: true,
                };
            }
            Transition::ResetRound => {
                self.state = SessionState::Idle;
            }
            Transition::ResetScores => {
                self.score = Score::new();
                self.dirty.scores = true;
            }
            Transition::ResetHistory => {
                self.history.clear();
                self.dirty.history = true;
            }
            Transition::ResetStats => {
                self.stats.reset();
                self.dirty.stats = true;
            }
            Transition::ResetAll => {
                self.slot.cancel();
                self.state = SessionState::Idle;
                self.score = Score::new();
                self.history.clear();
                self.stats.reset();
                self.dirty = Dirty {
                    scores: true,
                    history: true,
                    stats: true,
                };
            }
        }
        &self.state
    }

    /// Clear the last-round view; scores and history stay.
    pub fn reset_round(&mut self) {
        self.apply(Transition::ResetRound);
    }

    pub fn reset_scores(&mut self) -> Vec<AppError> {
        self.apply(Transition::ResetScores);
        self.flush()
    }

    pub fn reset_history(&mut self) -> Vec<AppError> {
        self.apply(Transition::ResetHistory);
        self.flush()
    }

    pub fn reset_stats(&mut self) -> Vec<AppError> {
        self.apply(Transition::ResetStats);
        self.flush()
    }

    pub fn reset_all(&mut self) -> Vec<AppError> {
        self.apply(Transition::ResetAll);
        self.flush()
    }

    /// Write every dirty record. Records that fail stay dirty so the next
    /// flush retries them.
    pub fn flush(&mut self) -> Vec<AppError> {
        let mut warnings = Vec::new();

        if self.dirty.scores {
            match self.write_scores() {
                Ok(()) => self.dirty.scores = false,
                Err(e) => warnings.push(e),
            }
        }
        if self.dirty.history {
            match self.write_history() {
                Ok(()) => self.dirty.history = false,
                Err(e) => warnings.push(e),
            }
        }
        if self.dirty.stats {
            match self.write_stats() {
                Ok(()) => self.dirty.stats = false,
                Err(e) => warnings.push(e),
            }
        }

        for warning in &warnings {
            log::warn!("keeping in-memory state: {}", warning);
        }
        warnings
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.scores || self.dirty.history || self.dirty.stats
    }

    // Default records are removed rather than written, the same as a
    // store that never saw them.
    fn write_scores(&mut self) -> Result<(), AppError> {
        if self.score == Score::default() {
            self.store.remove(SCORES_KEY)
        } else {
            storage::save_record(self.store.as_mut(), SCORES_KEY, &self.score)
        }
    }

    fn write_history(&mut self) -> Result<(), AppError> {
        if self.history.is_empty() {
            self.store.remove(HISTORY_KEY)
        } else {
            storage::save_record(self.store.as_mut(), HISTORY_KEY, &self.history)
        }
    }

    fn write_stats(&mut self) -> Result<(), AppError> {
        if self.stats.stats() == &Stats::default() {
            self.store.remove(STATS_KEY)
        } else {
            self.stats.persist(self.store.as_mut())
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn last_round(&self) -> Option<&Round> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::RoundComplete(round) => Some(round),
        }
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn stats(&self) -> &Stats {
        self.stats.stats()
    }

    pub fn current_streak(&self) -> Streak {
        current_streak(self.history.iter().map(|r| r.result))
    }

    pub fn recent_rounds(&self, limit: usize) -> Vec<Round> {
        self.history.recent(limit)
    }
}
