use crate::chapters::Chapter;
use crate::core::LowLevelClient;
use crate::error::GenerationError;
use crate::interceptors::{Exchange, Interceptor};
use crate::question::GeneratedQuestion;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Prompt asking for one question about `chapter` in the template the parser reads.
pub fn build_prompt(chapter: &Chapter) -> String {
    format!(
        "Generate one multiple-choice question about \"{title}\" for someone learning personal finance.\n\
         Give exactly 4 options, the letter of the correct option, and a short hint.\n\
         Reply using exactly this format:\n\
         Question: [question text]\n\
         Options:\n\
         A) [option A]\n\
         B) [option B]\n\
         C) [option C]\n\
         D) [option D]\n\
         Answer: [correct option letter]\n\
         Hint: [hint text]",
        title = chapter.title
    )
}

/// Produces single questions by prompting the model once and parsing the reply.
#[derive(Debug, Clone)]
pub struct QuestionGenerator<C: LowLevelClient> {
    client: C,
    interceptor: Option<Arc<dyn Interceptor>>,
}

impl<C: LowLevelClient> QuestionGenerator<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            interceptor: None,
        }
    }

    /// Record every prompt/reply pair through `interceptor`.
    pub fn with_interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptor = Some(interceptor);
        self
    }

    /// One attempt: a single model call, no retry.
    ///
    /// Model failures and unusable replies both come back as `GenerationError`.
    #[instrument(skip(self, chapter), fields(chapter = chapter.id))]
    pub async fn generate(
        &self,
        chapter: &Chapter,
        attempt: usize,
    ) -> Result<GeneratedQuestion, GenerationError> {
        let prompt = build_prompt(chapter);
        let response = self.client.ask_raw(prompt.clone()).await?;
        debug!(response_len = response.len(), response = %response, "Model response");

        if let Some(interceptor) = &self.interceptor {
            let exchange = Exchange {
                chapter_id: chapter.id,
                attempt,
                prompt: &prompt,
                response: &response,
            };
            if let Err(e) = interceptor.save(&exchange).await {
                warn!(error = %e, "Failed to save transcript");
            }
        }

        Ok(GeneratedQuestion::parse(&response)?)
    }
}
