pub mod computer;
pub mod config;

use crate::error::AppError;
use crate::game::choice::Choice;
use crate::game::source::ChoiceSource;
use config::OpponentConfig;

/// Anything that can supply the other hand for a round.
pub trait Opponent {
    /// Pick a move given the player's moves so far (newest first).
    fn next_move(&mut self, player_history: &[Choice]) -> Result<Choice, AppError>;

    /// Called with the player's validated move just before `next_move`.
    /// Local opponents must not peek, so the default ignores it.
    fn prepare(&mut self, _player_choice: Choice) {}

    fn name(&self) -> String;
}

/// Local computer player driven by an [`OpponentConfig`] and an entropy source.
pub struct ComputerOpponent<S: ChoiceSource> {
    config: OpponentConfig,
    source: S,
}

impl<S: ChoiceSource> ComputerOpponent<S> {
    pub fn new(config: OpponentConfig, source: S) -> Self {
        ComputerOpponent { config, source }
    }

    pub fn config(&self) -> &OpponentConfig {
        &self.config
    }
}

impl<S: ChoiceSource> Opponent for ComputerOpponent<S> {
    fn next_move(&mut self, player_history: &[Choice]) -> Result<Choice, AppError> {
        // The live session history wins over any history baked into the config.
        if player_history.is_empty() {
            return Ok(computer::choose_move(&self.config, &mut self.source));
        }
        let config = self.config.clone().with_history(player_history.to_vec());
        Ok(computer::choose_move(&config, &mut self.source))
    }

    fn name(&self) -> String {
        format!(
            "computer ({}, difficulty {:.2})",
            self.config.strategy(),
            self.config.difficulty()
        )
    }
}

/// Always throws the same hand. Useful for practice and for pinning rounds.
pub struct FixedOpponent {
    choice: Choice,
}

impl FixedOpponent {
    pub fn new(choice: Choice) -> Self {
        FixedOpponent { choice }
    }
}

impl Opponent for FixedOpponent {
    fn next_move(&mut self, _player_history: &[Choice]) -> Result<Choice, AppError> {
        Ok(self.choice)
    }

    fn name(&self) -> String {
        format!("fixed ({})", self.choice)
    }
}
