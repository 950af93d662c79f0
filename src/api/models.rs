use crate::game::choice::{Choice, Outcome};
use crate::session::round::Round;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct PlayRequest {
    pub choice: String,
}

// POST /game/play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResponse {
    pub player_choice: Choice,
    pub computer_choice: Choice,
    pub result: Outcome,
    pub timestamp: DateTime<Utc>,
}

impl From<Round> for RoundResponse {
    fn from(round: Round) -> Self {
        RoundResponse {
            player_choice: round.player_choice,
            computer_choice: round.computer_choice,
            result: round.result,
            timestamp: round.timestamp,
        }
    }
}

// GET /game/choices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoicesResponse {
    pub choices: Vec<Choice>,
}

// GET /health
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub service: String,
}

// Any 4xx/5xx body
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_response_wire_format() {
        let body = r#"{
            "playerChoice": "rock",
            "computerChoice": "scissors",
            "result": "win",
            "timestamp": "2024-05-01T12:00:00.000Z"
        }"#;
        let response: RoundResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.player_choice, Choice::Rock);
        assert_eq!(response.computer_choice, Choice::Scissors);
        assert_eq!(response.result, Outcome::Win);
    }

    #[test]
    fn test_health_without_service_name() {
        let body = r#"{"status":"healthy","timestamp":"2024-05-01T12:00:00Z"}"#;
        let health: HealthResponse = serde_json::from_str(body).unwrap();
        assert_eq!(health.status, "healthy");
        assert!(health.service.is_empty());
    }

    #[test]
    fn test_play_request_body() {
        let body = serde_json::to_string(&PlayRequest {
            choice: "paper".into(),
        })
        .unwrap();
        assert_eq!(body, r#"{"choice":"paper"}"#);
    }
}
