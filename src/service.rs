use crate::api::models::{ChoicesResponse, HealthResponse, RoundResponse};
use crate::error::AppError;
use crate::game::choice::{valid_choices, Choice};
use crate::game::rules::evaluate;
use crate::opponent::Opponent;
use crate::session::round::Round;
use chrono::Utc;

pub const SERVICE_NAME: &str = "rock-paper-scissors-backend";

/// Stateless single round: no score, history or stats are touched.
pub fn play(token: &str, opponent: &mut dyn Opponent) -> Result<RoundResponse, AppError> {
    let player_choice = token.parse::<Choice>()?;
    opponent.prepare(player_choice);
    let computer_choice = opponent.next_move(&[])?;
    let result = evaluate(player_choice, computer_choice);
    Ok(Round::new(player_choice, computer_choice, result).into())
}

pub fn choices() -> ChoicesResponse {
    ChoicesResponse {
        choices: valid_choices(),
    }
}

pub fn health() -> HealthResponse {
    HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        service: SERVICE_NAME.to_string(),
    }
}
