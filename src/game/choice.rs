use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three hand shapes. Variant order is the canonical
/// precedence used wherever counts tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    pub fn as_str(&self) -> &'static str {
        match self {
            Choice::Rock => "rock",
            Choice::Paper => "paper",
            Choice::Scissors => "scissors",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Choice::Rock => 0,
            Choice::Paper => 1,
            Choice::Scissors => 2,
        }
    }

    /// The choice this one defeats.
    pub fn defeats(&self) -> Choice {
        match self {
            Choice::Rock => Choice::Scissors,
            Choice::Scissors => Choice::Paper,
            Choice::Paper => Choice::Rock,
        }
    }

    pub fn beats(&self, other: Choice) -> bool {
        self.defeats() == other
    }

    /// The choice that defeats this one.
    pub fn counter(&self) -> Choice {
        match self {
            Choice::Rock => Choice::Paper,
            Choice::Paper => Choice::Scissors,
            Choice::Scissors => Choice::Rock,
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Choice {
    type Err = AppError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_lowercase().as_str() {
            "rock" => Ok(Choice::Rock),
            "paper" => Ok(Choice::Paper),
            "scissors" => Ok(Choice::Scissors),
            _ => Err(AppError::InvalidChoice(token.to_string())),
        }
    }
}

/// Round result, always from the player's side of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Lose,
    Tie,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Lose => "lose",
            Outcome::Tie => "tie",
        }
    }

    /// The same round seen from the other seat.
    pub fn reversed(&self) -> Outcome {
        match self {
            Outcome::Win => Outcome::Lose,
            Outcome::Lose => Outcome::Win,
            Outcome::Tie => Outcome::Tie,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn is_valid_choice(token: &str) -> bool {
    token.parse::<Choice>().is_ok()
}

/// Canonical lowercase form of a choice token.
pub fn normalize_choice(token: &str) -> Result<&'static str, AppError> {
    token.parse::<Choice>().map(|c| c.as_str())
}

pub fn valid_choices() -> Vec<Choice> {
    Choice::ALL.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive_and_trimmed() {
        assert_eq!("ROCK".parse::<Choice>().unwrap(), Choice::Rock);
        assert_eq!("  Paper ".parse::<Choice>().unwrap(), Choice::Paper);
        assert_eq!("sCiSsOrS".parse::<Choice>().unwrap(), Choice::Scissors);
    }

    #[test]
    fn test_parse_rejects_unknown_tokens() {
        for token in ["lizard", "", "   ", "rocks", "spock"] {
            match token.parse::<Choice>() {
                Err(AppError::InvalidChoice(t)) => assert_eq!(t, token),
                other => panic!("expected InvalidChoice for {:?}, got {:?}", token, other),
            }
        }
    }

    #[test]
    fn test_counter_beats_the_original() {
        for choice in Choice::ALL {
            assert!(choice.counter().beats(choice));
            assert!(!choice.beats(choice));
        }
    }

    #[test]
    fn test_normalize_and_validate() {
        assert!(is_valid_choice("Scissors"));
        assert!(!is_valid_choice("paperclip"));
        assert_eq!(normalize_choice("ROCK").unwrap(), "rock");
        assert!(normalize_choice("dynamite").is_err());
    }

    #[test]
    fn test_valid_choices_order() {
        assert_eq!(
            valid_choices(),
            vec![Choice::Rock, Choice::Paper, Choice::Scissors]
        );
    }

    #[test]
    fn test_serde_uses_lowercase_tokens() {
        assert_eq!(serde_json::to_string(&Choice::Scissors).unwrap(), "\"scissors\"");
        assert_eq!(serde_json::to_string(&Outcome::Lose).unwrap(), "\"lose\"");
        let parsed: Outcome = serde_json::from_str("\"tie\"").unwrap();
        assert_eq!(parsed, Outcome::Tie);
    }
}
