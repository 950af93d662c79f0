// Paths relative to the configured API base, e.g. `http://localhost:3001/api`.

pub const PLAY_PATH: &str = "/game/play";
pub const CHOICES_PATH: &str = "/game/choices";
pub const HEALTH_PATH: &str = "/health";

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3001/api";

pub fn join(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_trims_trailing_slash() {
        assert_eq!(
            join("http://localhost:3001/api/", PLAY_PATH),
            "http://localhost:3001/api/game/play"
        );
        assert_eq!(join(DEFAULT_SERVER_URL, HEALTH_PATH), "http://localhost:3001/api/health");
    }
}
