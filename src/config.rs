use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::clients::ClientType;
use crate::error::ConfigError;

pub const PROVIDER_VAR: &str = "QUIZ_PROVIDER";
pub const MODEL_VAR: &str = "QUIZ_MODEL";
pub const BASE_URL_VAR: &str = "QUIZ_MODEL_BASE_URL";
pub const BIND_ADDR_VAR: &str = "QUIZ_BIND_ADDR";
pub const QUESTIONS_PER_CHAPTER_VAR: &str = "QUIZ_QUESTIONS_PER_CHAPTER";
pub const TRANSCRIPT_DIR_VAR: &str = "QUIZ_TRANSCRIPT_DIR";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_QUESTIONS_PER_CHAPTER: usize = 10;

/// Trait for clients whose credential comes from an environment variable
pub trait KeyFromEnv {
    /// The environment variable name for this client's API key
    const KEY_NAME: &'static str;
}

/// Look up the credential stored under `key_name`; a blank value counts as missing.
fn lookup_key<F>(key_name: &'static str, lookup: F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key_name)
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .ok_or(ConfigError::MissingKey(key_name))
}

/// Command-line values that take precedence over the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bind: Option<String>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub questions_per_chapter: Option<String>,
    pub transcript_dir: Option<String>,
}

impl ConfigOverrides {
    /// Set values paired with the variable each one replaces
    pub fn into_pairs(self) -> Vec<(&'static str, String)> {
        [
            (BIND_ADDR_VAR, self.bind),
            (PROVIDER_VAR, self.provider),
            (MODEL_VAR, self.model),
            (QUESTIONS_PER_CHAPTER_VAR, self.questions_per_chapter),
            (TRANSCRIPT_DIR_VAR, self.transcript_dir),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }
}

/// Variable source where `overrides` win and everything else falls through to `lookup`.
pub fn layered<'a, F>(
    overrides: &'a [(&'static str, String)],
    lookup: F,
) -> impl Fn(&str) -> Option<String> + 'a
where
    F: Fn(&str) -> Option<String> + 'a,
{
    move |name: &str| {
        overrides
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.clone())
            .or_else(|| lookup(name))
    }
}

/// Everything the server and the CLI need to start.
#[derive(Clone)]
pub struct ServiceConfig {
    pub client_type: ClientType,
    pub api_key: String,
    /// Model id; `None` selects the provider default
    pub model: Option<String>,
    /// Provider endpoint override, mostly for pointing at a local stub
    pub base_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub questions_per_chapter: usize,
    pub transcript_dir: Option<PathBuf>,
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("client_type", &self.client_type)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("bind_addr", &self.bind_addr)
            .field("questions_per_chapter", &self.questions_per_chapter)
            .field("transcript_dir", &self.transcript_dir)
            .finish()
    }
}

impl ServiceConfig {
    /// Load `.env` (if present) and read the process environment, with
    /// `overrides` taking precedence.
    pub fn from_env_with_overrides(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        // A missing .env file is fine; real deployments set variables directly.
        let _ = dotenvy::dotenv();
        let pairs = overrides.into_pairs();
        Self::from_lookup(layered(&pairs, |name| env::var(name).ok()))
    }

    /// Build a configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let client_type = match non_empty(PROVIDER_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<ClientType>()
                .map_err(|reason| ConfigError::InvalidValue {
                    name: PROVIDER_VAR,
                    value: raw.clone(),
                    reason,
                })?,
            None => ClientType::default(),
        };

        let api_key = lookup_key(client_type.key_name(), &lookup)?;

        let bind_addr = match non_empty(BIND_ADDR_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<SocketAddr>()
                .map_err(|e| ConfigError::InvalidValue {
                    name: BIND_ADDR_VAR,
                    value: raw.clone(),
                    reason: e.to_string(),
                })?,
            None => default_bind_addr(),
        };

        let questions_per_chapter = match non_empty(QUESTIONS_PER_CHAPTER_VAR) {
            Some(raw) => parse_question_count(&raw).map_err(|reason| ConfigError::InvalidValue {
                name: QUESTIONS_PER_CHAPTER_VAR,
                value: raw.clone(),
                reason,
            })?,
            None => DEFAULT_QUESTIONS_PER_CHAPTER,
        };

        Ok(Self {
            client_type,
            api_key,
            model: non_empty(MODEL_VAR).map(|m| m.trim().to_string()),
            base_url: non_empty(BASE_URL_VAR).map(|u| u.trim().to_string()),
            bind_addr,
            questions_per_chapter,
            transcript_dir: non_empty(TRANSCRIPT_DIR_VAR).map(PathBuf::from),
        })
    }

    /// Model id that will actually be requested
    pub fn effective_model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.client_type.default_model())
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8000))
}

/// Parse a questions-per-chapter count; zero is rejected.
pub fn parse_question_count(raw: &str) -> Result<usize, String> {
    let count: usize = raw.trim().parse().map_err(|e| format!("{}", e))?;
    if count == 0 {
        return Err("must be at least 1".to_string());
    }
    Ok(count)
}
