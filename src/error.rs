use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid choice: {0}. Must be one of: rock, paper, scissors")]
    InvalidChoice(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Storage error: {0}")]
    StorageFailure(String),

    #[error("{0}")]
    TransportFailure(String),

    #[error("Rate limit exceeded, please try again later")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Round request was superseded or cancelled")]
    Cancelled,
}

impl AppError {
    /// Errors the caller may retry without changing its input.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::TransportFailure(_) | AppError::RateLimited | AppError::StorageFailure(_)
        )
    }

    /// Errors caused by what the player typed (a "bad request").
    pub fn is_user_facing(&self) -> bool {
        matches!(self, AppError::InvalidChoice(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(AppError::InvalidChoice("lizard".into()).is_user_facing());
        assert!(!AppError::InvalidChoice("lizard".into()).is_retryable());
        assert!(AppError::TransportFailure("down".into()).is_retryable());
        assert!(AppError::StorageFailure("disk full".into()).is_retryable());
        assert!(AppError::RateLimited.is_retryable());
        assert!(!AppError::InvalidConfiguration("bad".into()).is_retryable());
    }

    #[test]
    fn test_invalid_choice_message_names_the_token() {
        let message = AppError::InvalidChoice("lizard".into()).to_string();
        assert!(message.contains("lizard"));
        assert!(message.contains("rock, paper, scissors"));
    }
}
