use crate::error::AppError;
use crate::game::choice::Choice;
use crate::opponent::Opponent;
use governor::clock::{Clock, DefaultClock};
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::thread;
use std::time::Duration;

use super::endpoints::{join, CHOICES_PATH, HEALTH_PATH, PLAY_PATH};
use super::models::*;

const USER_AGENT: &str = "rps_arena/0.1.0";
const MAX_RETRIES: u32 = 3;
const RETRY_UNIT: Duration = Duration::from_millis(2000);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const CONNECTION_MESSAGE: &str =
    "Unable to connect to the game server. Please check your connection and try again.";

/// Blocking client for the remote game service.
pub struct GameApiClient {
    base_url: String,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    clock: DefaultClock,
}

impl GameApiClient {
    pub fn new(base_url: &str) -> Self {
        // 10 requests per second is plenty for a human player
        let per_second = NonZeroU32::new(10).unwrap_or(NonZeroU32::MIN);
        GameApiClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            rate_limiter: RateLimiter::direct(Quota::per_second(per_second)),
            clock: DefaultClock::default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn pace(&self) {
        while let Err(not_until) = self.rate_limiter.check() {
            thread::sleep(not_until.wait_time_from(self.clock.now()));
        }
    }

    fn execute_request<T, F>(&self, send: F) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        F: Fn() -> Result<ureq::Response, ureq::Error>,
    {
        let mut retry_count = 0;

        loop {
            self.pace();

            match send() {
                Ok(resp) => {
                    return resp.into_json::<T>().map_err(|e| {
                        AppError::ServerError(format!("Malformed response: {}", e))
                    });
                }
                Err(ureq::Error::Status(429, _)) => {
                    if retry_count >= MAX_RETRIES {
                        return Err(AppError::RateLimited);
                    }
                    let wait = RETRY_UNIT * (retry_count + 1);
                    log::warn!("rate limited, waiting {}ms before retry", wait.as_millis());
                    thread::sleep(wait);
                    retry_count += 1;
                }
                Err(ureq::Error::Status(code, resp)) => {
                    let message = resp
                        .into_json::<ErrorResponse>()
                        .map(|body| body.error)
                        .unwrap_or_else(|_| format!("HTTP {}", code));
                    return Err(if code == 400 {
                        AppError::InvalidChoice(message)
                    } else {
                        AppError::ServerError(message)
                    });
                }
                Err(ureq::Error::Transport(e)) => {
                    log::warn!("transport error: {}", e);
                    return Err(AppError::TransportFailure(CONNECTION_MESSAGE.to_string()));
                }
            }
        }
    }

    /// Play one round remotely. The token is lowercased before sending.
    pub fn play(&self, choice: &str) -> Result<RoundResponse, AppError> {
        let token = choice.trim();
        if token.is_empty() {
            return Err(AppError::InvalidChoice(choice.to_string()));
        }

        let url = join(&self.base_url, PLAY_PATH);
        let body = PlayRequest {
            choice: token.to_lowercase(),
        };
        self.execute_request(|| {
            ureq::post(&url)
                .set("User-Agent", USER_AGENT)
                .timeout(REQUEST_TIMEOUT)
                .send_json(&body)
        })
    }

    pub fn choices(&self) -> Result<ChoicesResponse, AppError> {
        let url = join(&self.base_url, CHOICES_PATH);
        self.execute_request(|| {
            ureq::get(&url)
                .set("User-Agent", USER_AGENT)
                .timeout(REQUEST_TIMEOUT)
                .call()
        })
    }

    pub fn health(&self) -> Result<HealthResponse, AppError> {
        let url = join(&self.base_url, HEALTH_PATH);
        self.execute_request(|| {
            ureq::get(&url)
                .set("User-Agent", USER_AGENT)
                .timeout(REQUEST_TIMEOUT)
                .call()
        })
    }
}

/// Opponent whose move comes from the remote service. The outcome is
/// still evaluated locally by the session.
pub struct RemoteOpponent {
    client: GameApiClient,
    next_player_choice: Option<Choice>,
}

impl RemoteOpponent {
    pub fn new(client: GameApiClient) -> Self {
        RemoteOpponent {
            client,
            next_player_choice: None,
        }
    }
}

impl Opponent for RemoteOpponent {
    // The service evaluates a whole round, so it needs the player's move.
    fn prepare(&mut self, player_choice: Choice) {
        self.next_player_choice = Some(player_choice);
    }

    fn next_move(&mut self, _player_history: &[Choice]) -> Result<Choice, AppError> {
        let choice = self.next_player_choice.take().ok_or_else(|| {
            AppError::InvalidConfiguration(
                "remote opponent needs the player's choice before each round".to_string(),
            )
        })?;
        let response = self.client.play(choice.as_str())?;
        Ok(response.computer_choice)
    }

    fn name(&self) -> String {
        format!("remote ({})", self.client.base_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Port 9 (discard) is not expected to be listening on loopback.
    const DEAD_SERVER: &str = "http://127.0.0.1:9/api";

    #[test]
    fn test_base_url_is_trimmed() {
        let client = GameApiClient::new("http://localhost:3001/api/");
        assert_eq!(client.base_url(), "http://localhost:3001/api");
    }

    #[test]
    fn test_pace_waits_once_burst_is_spent() {
        let client = GameApiClient::new(DEAD_SERVER);
        let start = std::time::Instant::now();
        for _ in 0..10 {
            client.pace();
        }
        assert!(start.elapsed() < Duration::from_millis(50));

        // 11th call has to wait for the next 100ms cell
        client.pace();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(50), "waited {:?}", elapsed);
        assert!(elapsed < Duration::from_secs(1), "waited {:?}", elapsed);
    }

    #[test]
    fn test_empty_choice_is_rejected_before_sending() {
        let client = GameApiClient::new(DEAD_SERVER);
        assert!(matches!(client.play("   "), Err(AppError::InvalidChoice(_))));
    }

    #[test]
    fn test_unreachable_server_is_transport_failure() {
        let client = GameApiClient::new(DEAD_SERVER);
        match client.health() {
            Err(AppError::TransportFailure(message)) => assert_eq!(message, CONNECTION_MESSAGE),
            other => panic!("expected TransportFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_remote_opponent_requires_player_choice() {
        let mut opponent = RemoteOpponent::new(GameApiClient::new(DEAD_SERVER));
        assert!(matches!(
            opponent.next_move(&[]),
            Err(AppError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_remote_opponent_surfaces_transport_failure() {
        let mut opponent = RemoteOpponent::new(GameApiClient::new(DEAD_SERVER));
        opponent.prepare(Choice::Paper);
        let err = opponent.next_move(&[]).unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(opponent.name(), "remote (http://127.0.0.1:9/api)");
    }
}
