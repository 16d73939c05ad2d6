use thiserror::Error;

/// Failure of a single call to a model provider.
#[derive(Error, Debug)]
pub enum AIError {
    #[error("Gemini API error: {0}")]
    Gemini(#[from] GeminiError),
    #[error("DeepSeek API error: {0}")]
    DeepSeek(#[from] DeepSeekError),
    #[error("Model returned an empty reply ({0})")]
    EmptyReply(String),
    #[error("Mock client error: {0}")]
    Mock(String),
}

#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("Rate limit exceeded")]
    RateLimit,
    #[error("Authentication failed")]
    Authentication,
}

#[derive(Error, Debug)]
pub enum DeepSeekError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("Rate limit exceeded")]
    RateLimit,
    #[error("Authentication failed")]
    Authentication,
}

/// The model reply did not contain every field of a question.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("no `Question:` line in reply")]
    MissingQuestion,
    #[error("expected 4 option lines, found {found}")]
    MissingOptions { found: usize },
    #[error("no `Answer:` line in reply")]
    MissingAnswer,
    #[error("no `Hint:` line in reply")]
    MissingHint,
    #[error("field `{0}` is empty")]
    EmptyField(&'static str),
}

/// One generation attempt failed, either at the model or while parsing its reply.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("model call failed: {0}")]
    Ai(#[from] AIError),
    #[error("unusable model reply: {0}")]
    Parse(#[from] ParseError),
}

/// Errors that reach the HTTP surface.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Invalid chapter")]
    InvalidChapter(String),
    #[error("Failed to generate any questions")]
    EmptyBatch { chapter: String },
    #[error("Failed to generate any questions for any chapter")]
    NoChapterSucceeded,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingKey(&'static str),
    #[error("invalid value {value:?} for {name}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Fatal conditions detected before the server accepts requests.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("model probe failed: {0}")]
    Probe(#[from] AIError),
}
