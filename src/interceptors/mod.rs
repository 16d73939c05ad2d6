use async_trait::async_trait;
use std::fmt::Debug;

/// One prompt/reply exchange for a generation attempt.
#[derive(Debug, Clone, Copy)]
pub struct Exchange<'a> {
    pub chapter_id: &'a str,
    pub attempt: usize,
    pub prompt: &'a str,
    pub response: &'a str,
}

/// Observer of raw model exchanges, used to keep transcripts of model output.
#[async_trait]
pub trait Interceptor: Send + Sync + Debug {
    async fn save(&self, exchange: &Exchange<'_>) -> std::io::Result<()>;
}

pub mod file;
pub use file::FileInterceptor;
