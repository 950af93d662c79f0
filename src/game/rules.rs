use super::choice::{Choice, Outcome};
use crate::error::AppError;

/// Decide a round from the player's perspective.
pub fn evaluate(player: Choice, opponent: Choice) -> Outcome {
    if player == opponent {
        Outcome::Tie
    } else if player.beats(opponent) {
        Outcome::Win
    } else {
        Outcome::Lose
    }
}

/// Same as [`evaluate`] for raw tokens. Either token failing to parse
/// yields `InvalidChoice` naming that token.
pub fn evaluate_tokens(player: &str, opponent: &str) -> Result<Outcome, AppError> {
    let player = player.parse::<Choice>()?;
    let opponent = opponent.parse::<Choice>()?;
    Ok(evaluate(player, opponent))
}
