use std::fs;
use std::path::Path;

pub const DEFAULT_QUESTIONS_PER_ROUND: usize = 10;
pub const DEFAULT_MAX_ROUNDS: u32 = 3;
pub const DEFAULT_PLACEHOLDER_DISTRACTOR: &str = "???";

/// Tunables for a quiz session. Missing keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Target number of questions drawn per round.
    pub questions_per_round: usize,
    /// Highest round ordinal a perfect score can advance to.
    pub max_rounds: u32,
    /// Offered when no other record has a different answer value.
    pub placeholder_distractor: String,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            questions_per_round: DEFAULT_QUESTIONS_PER_ROUND,
            max_rounds: DEFAULT_MAX_ROUNDS,
            placeholder_distractor: DEFAULT_PLACEHOLDER_DISTRACTOR.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file at {path}: {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("questions_per_round must be at least 1")]
    EmptyRound,
    #[error("max_rounds must be at least 1")]
    NoRounds,
}

impl QuizConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.questions_per_round == 0 {
            return Err(ConfigError::EmptyRound);
        }
        if self.max_rounds == 0 {
            return Err(ConfigError::NoRounds);
        }
        Ok(())
    }
}
