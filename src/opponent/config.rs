use crate::error::AppError;
use crate::game::choice::Choice;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_DIFFICULTY: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Random,
    Strategic,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Random => "random",
            Strategy::Strategic => "strategic",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = AppError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_lowercase().as_str() {
            "random" => Ok(Strategy::Random),
            "strategic" => Ok(Strategy::Strategic),
            _ => Err(AppError::InvalidConfiguration(format!(
                "Unknown strategy: {}. Use 'random' or 'strategic'",
                token
            ))),
        }
    }
}

/// Validated opponent settings. Only constructible through the checked
/// constructors, so a value in hand always satisfies `0 <= difficulty <= 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct OpponentConfig {
    strategy: Strategy,
    player_history: Vec<Choice>,
    difficulty: f64,
}

impl OpponentConfig {
    pub fn new(
        strategy: Strategy,
        player_history: Vec<Choice>,
        difficulty: f64,
    ) -> Result<Self, AppError> {
        if !difficulty.is_finite() || !(0.0..=1.0).contains(&difficulty) {
            return Err(AppError::InvalidConfiguration(format!(
                "Difficulty must be a number between 0 and 1 (got {})",
                difficulty
            )));
        }

        Ok(OpponentConfig {
            strategy,
            player_history,
            difficulty,
        })
    }

    pub fn random() -> Self {
        OpponentConfig {
            strategy: Strategy::Random,
            player_history: Vec::new(),
            difficulty: DEFAULT_DIFFICULTY,
        }
    }

    pub fn strategic(difficulty: f64) -> Result<Self, AppError> {
        Self::new(Strategy::Strategic, Vec::new(), difficulty)
    }

    /// Build from loose tokens. History entries that are not valid
    /// choices are dropped rather than rejected.
    pub fn from_tokens<S: AsRef<str>>(
        strategy: &str,
        player_history: &[S],
        difficulty: f64,
    ) -> Result<Self, AppError> {
        let strategy = strategy.parse::<Strategy>()?;
        let history = player_history
            .iter()
            .filter_map(|token| token.as_ref().parse::<Choice>().ok())
            .collect();
        Self::new(strategy, history, difficulty)
    }

    /// Parse a JSON option bag such as
    /// `{"strategy": "strategic", "playerHistory": ["rock"], "difficulty": 0.8}`.
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let raw: RawOpponentConfig = serde_json::from_str(raw)
            .map_err(|e| AppError::InvalidConfiguration(e.to_string()))?;
        raw.try_into()
    }

    pub fn with_history(mut self, player_history: Vec<Choice>) -> Self {
        self.player_history = player_history;
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn player_history(&self) -> &[Choice] {
        &self.player_history
    }

    pub fn difficulty(&self) -> f64 {
        self.difficulty
    }
}

impl Default for OpponentConfig {
    fn default() -> Self {
        Self::random()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct RawOpponentConfig {
    #[serde(default)]
    strategy: Option<String>,
    #[serde(default)]
    player_history: Option<Vec<String>>,
    #[serde(default)]
    difficulty: Option<f64>,
}

impl TryFrom<RawOpponentConfig> for OpponentConfig {
    type Error = AppError;

    fn try_from(raw: RawOpponentConfig) -> Result<Self, Self::Error> {
        let strategy = raw.strategy.unwrap_or_else(|| Strategy::Random.to_string());
        let history = raw.player_history.unwrap_or_default();
        let difficulty = raw.difficulty.unwrap_or(DEFAULT_DIFFICULTY);
        OpponentConfig::from_tokens(&strategy, history.as_slice(), difficulty)
    }
}
