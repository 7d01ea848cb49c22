use std::net::SocketAddr;

use url::Url;

use crate::error::QuizError;

pub const DEFAULT_QUESTIONS_PER_ROUND: usize = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub teloxide_token: String,
    pub database_url: String,
    pub log_level: String,
    pub questions_per_round: usize,
    pub webhook: Option<(Url, SocketAddr)>,
}

impl Config {
    /// Reads the configuration from the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, QuizError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, QuizError> {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| QuizError::Config(format!("{key} should be set.")))
        };

        let teloxide_token = required("TELOXIDE_TOKEN")?;
        let database_url = required("DATABASE_URL")?;
        let log_level = lookup("LOG_LEVEL").unwrap_or("error".into());

        let questions_per_round = match lookup("QUESTIONS_PER_ROUND") {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|count| *count > 0)
                .ok_or_else(|| {
                    QuizError::Config(format!("QUESTIONS_PER_ROUND must be a positive number, got '{raw}'"))
                })?,
            None => DEFAULT_QUESTIONS_PER_ROUND,
        };

        let ngrok_url = lookup("NGROK_URL")
            .map(|raw| {
                raw.parse::<Url>()
                    .map_err(|e| QuizError::Config(format!("NGROK_URL can't be parsed: {e}")))
            })
            .transpose()?;
        let ngrok_addr = lookup("NGROK_ADDR")
            .map(|raw| {
                raw.parse::<SocketAddr>()
                    .map_err(|e| QuizError::Config(format!("NGROK_ADDR can't be parsed: {e}")))
            })
            .transpose()?;

        Ok(Self {
            teloxide_token,
            database_url,
            log_level,
            questions_per_round,
            webhook: ngrok_url.zip(ngrok_addr),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        move |key: &str| vars.get(key).map(|v| v.to_string())
    }

    #[test]
    fn defaults_apply_when_optional_values_are_missing() {
        let config = Config::from_lookup(lookup(&[
            ("TELOXIDE_TOKEN", "token"),
            ("DATABASE_URL", "postgres://localhost/quiz"),
        ]))
        .unwrap();

        assert_eq!(config.questions_per_round, DEFAULT_QUESTIONS_PER_ROUND);
        assert_eq!(config.log_level, "error");
        assert!(config.webhook.is_none());
    }

    #[test]
    fn missing_token_is_rejected() {
        let err = Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/quiz")]))
            .unwrap_err();
        assert!(matches!(err, QuizError::Config(msg) if msg.contains("TELOXIDE_TOKEN")));
    }

    #[test]
    fn zero_questions_per_round_is_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("TELOXIDE_TOKEN", "token"),
            ("DATABASE_URL", "postgres://localhost/quiz"),
            ("QUESTIONS_PER_ROUND", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, QuizError::Config(_)));
    }

    #[test]
    fn webhook_needs_both_url_and_address() {
        let config = Config::from_lookup(lookup(&[
            ("TELOXIDE_TOKEN", "token"),
            ("DATABASE_URL", "postgres://localhost/quiz"),
            ("NGROK_URL", "https://example.ngrok.app"),
        ]))
        .unwrap();
        assert!(config.webhook.is_none());

        let config = Config::from_lookup(lookup(&[
            ("TELOXIDE_TOKEN", "token"),
            ("DATABASE_URL", "postgres://localhost/quiz"),
            ("NGROK_URL", "https://example.ngrok.app"),
            ("NGROK_ADDR", "127.0.0.1:8443"),
        ]))
        .unwrap();
        assert!(config.webhook.is_some());
    }
}
