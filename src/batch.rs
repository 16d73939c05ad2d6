//! Assembly of per-chapter question batches with partial-failure tolerance.
//!
//! Attempts run one after another; a failed attempt is logged and leaves a gap
//! in the `question_<i>` keys rather than being retried or backfilled.

use crate::chapters::{self, Chapter, CHAPTERS};
use crate::core::LowLevelClient;
use crate::error::BatchError;
use crate::generator::QuestionGenerator;
use crate::question::GeneratedQuestion;
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{error, info, instrument, warn};

/// Successful questions for one chapter, keyed by 1-based attempt index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBatch {
    entries: Vec<(usize, GeneratedQuestion)>,
    attempts: usize,
}

impl QuestionBatch {
    fn new(attempts: usize) -> Self {
        Self {
            entries: Vec::with_capacity(attempts),
            attempts,
        }
    }

    fn insert(&mut self, attempt: usize, question: GeneratedQuestion) {
        self.entries.push((attempt, question));
    }

    pub fn key_for(attempt: usize) -> String {
        format!("question_{}", attempt)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attempts that produced nothing. Logged, never serialized.
    pub fn failed(&self) -> usize {
        self.attempts - self.entries.len()
    }

    /// Question produced by attempt `attempt`, if it succeeded
    pub fn get(&self, attempt: usize) -> Option<&GeneratedQuestion> {
        self.entries
            .iter()
            .find(|(index, _)| *index == attempt)
            .map(|(_, question)| question)
    }

    /// Surviving attempt indices, ascending
    pub fn attempt_indices(&self) -> Vec<usize> {
        self.entries.iter().map(|(index, _)| *index).collect()
    }
}

impl Serialize for QuestionBatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (attempt, question) in &self.entries {
            map.serialize_entry(&Self::key_for(*attempt), question)?;
        }
        map.end()
    }
}

/// Batches keyed by chapter title, in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterQuestions {
    chapters: Vec<(&'static Chapter, QuestionBatch)>,
}

impl ChapterQuestions {
    /// Result holding a single chapter's batch
    pub fn single(chapter: &'static Chapter, batch: QuestionBatch) -> Self {
        Self {
            chapters: vec![(chapter, batch)],
        }
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    pub fn get(&self, title: &str) -> Option<&QuestionBatch> {
        self.chapters
            .iter()
            .find(|(chapter, _)| chapter.title == title)
            .map(|(_, batch)| batch)
    }

    pub fn titles(&self) -> Vec<&'static str> {
        self.chapters.iter().map(|(chapter, _)| chapter.title).collect()
    }
}

impl Serialize for ChapterQuestions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.chapters.len()))?;
        for (chapter, batch) in &self.chapters {
            map.serialize_entry(chapter.title, batch)?;
        }
        map.end()
    }
}

/// Runs the generator a fixed number of times per chapter.
#[derive(Debug, Clone)]
pub struct BatchAssembler<C: LowLevelClient> {
    generator: QuestionGenerator<C>,
    questions_per_chapter: usize,
}

impl<C: LowLevelClient> BatchAssembler<C> {
    pub fn new(generator: QuestionGenerator<C>, questions_per_chapter: usize) -> Self {
        Self {
            generator,
            questions_per_chapter,
        }
    }

    /// Resolve `chapter_id` and assemble its batch.
    pub async fn assemble_by_id(
        &self,
        chapter_id: &str,
    ) -> Result<(&'static Chapter, QuestionBatch), BatchError> {
        let chapter = chapters::lookup(chapter_id)
            .ok_or_else(|| BatchError::InvalidChapter(chapter_id.to_string()))?;
        let batch = self.assemble(chapter).await?;
        Ok((chapter, batch))
    }

    /// Make `questions_per_chapter` attempts for `chapter`, keeping the successes.
    #[instrument(skip(self, chapter), fields(chapter = chapter.id, attempts = self.questions_per_chapter))]
    pub async fn assemble(&self, chapter: &Chapter) -> Result<QuestionBatch, BatchError> {
        let mut batch = QuestionBatch::new(self.questions_per_chapter);

        for attempt in 1..=self.questions_per_chapter {
            match self.generator.generate(chapter, attempt).await {
                Ok(question) => batch.insert(attempt, question),
                Err(e) => {
                    error!(chapter = chapter.id, attempt, error = %e, "Question generation attempt failed");
                }
            }
        }

        if batch.is_empty() {
            warn!(chapter = chapter.id, "No question could be generated for chapter");
            return Err(BatchError::EmptyBatch {
                chapter: chapter.id.to_string(),
            });
        }

        info!(
            chapter = chapter.id,
            generated = batch.len(),
            failed = batch.failed(),
            "Assembled question batch"
        );
        Ok(batch)
    }

    /// Assemble every registered chapter in turn, dropping chapters with no successes.
    #[instrument(skip(self))]
    pub async fn assemble_all(&self) -> Result<ChapterQuestions, BatchError> {
        let mut result = ChapterQuestions::default();

        for chapter in CHAPTERS {
            match self.assemble(chapter).await {
                Ok(batch) => result.chapters.push((chapter, batch)),
                Err(e) => warn!(chapter = chapter.id, error = %e, "Omitting chapter from combined result"),
            }
        }

        if result.is_empty() {
            error!("No chapter produced any question");
            return Err(BatchError::NoChapterSucceeded);
        }

        info!(chapters = result.len(), "Assembled questions for all chapters");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::mock::{MockClient, MockResponse};

    fn reply(tag: &str) -> MockResponse {
        MockResponse::text(format!(
            "Question: Q{tag}?\nA) a{tag}\nB) b{tag}\nC) c{tag}\nD) d{tag}\nAnswer: C\nHint: h{tag}"
        ))
    }

    fn assembler(responses: Vec<MockResponse>, n: usize) -> BatchAssembler<MockClient> {
        let (client, _) = MockClient::with_responses(responses);
        BatchAssembler::new(QuestionGenerator::new(client), n)
    }

    #[tokio::test]
    async fn keys_follow_attempt_order_in_json() {
        let responses = (1..=11).map(|i| reply(&i.to_string())).collect();
        let (_, batch) = assembler(responses, 11)
            .assemble_by_id("budgeting_and_expense_tracking")
            .await
            .unwrap();

        let json = serde_json::to_string(&batch).unwrap();
        let pos_2 = json.find("\"question_2\"").unwrap();
        let pos_10 = json.find("\"question_10\"").unwrap();
        assert!(pos_2 < pos_10, "{json}");
    }

    #[tokio::test]
    async fn failure_count_is_not_serialized() {
        let responses = vec![reply("1"), MockResponse::error("x")];
        let batch = assembler(responses, 2).assemble(&CHAPTERS[0]).await.unwrap();
        assert_eq!(batch.failed(), 1);

        let value = serde_json::to_value(&batch).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["question_1"]);
    }

    #[tokio::test]
    async fn unknown_chapter_makes_no_model_call() {
        let (client, handle) = MockClient::with_responses(vec![reply("1")]);
        let assembler = BatchAssembler::new(QuestionGenerator::new(client), 3);

        let err = assembler.assemble_by_id("crypto_moonshots").await.unwrap_err();
        assert!(matches!(err, BatchError::InvalidChapter(id) if id == "crypto_moonshots"));
        assert_eq!(handle.call_count(), 0);
    }

    #[test]
    fn single_result_is_keyed_by_title() {
        let question = GeneratedQuestion::parse(
            "Question: q\nA) 1\nB) 2\nC) 3\nD) 4\nAnswer: A\nHint: h",
        )
        .unwrap();
        let mut batch = QuestionBatch::new(1);
        batch.insert(1, question);

        let result = ChapterQuestions::single(&CHAPTERS[1], batch);
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["Setting Financial Goals"]["question_1"]["hint"], "h");
    }
}
