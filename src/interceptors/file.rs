use super::{Exchange, Interceptor};
use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Process-wide counter so exchanges saved in the same millisecond get distinct names.
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Writes each exchange to its own markdown file under `base_path`.
#[derive(Debug)]
pub struct FileInterceptor {
    base_path: PathBuf,
}

impl FileInterceptor {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn file_name(exchange: &Exchange<'_>) -> String {
        format!(
            "{}_q{}_{}_{:04}.md",
            exchange.chapter_id,
            exchange.attempt,
            Utc::now().format("%Y%m%d_%H%M%S_%3f"),
            SEQUENCE.fetch_add(1, Ordering::Relaxed)
        )
    }
}

#[async_trait]
impl Interceptor for FileInterceptor {
    async fn save(&self, exchange: &Exchange<'_>) -> std::io::Result<()> {
        fs::create_dir_all(&self.base_path).await?;
        let file_path = self.base_path.join(Self::file_name(exchange));

        let content = format!(
            "# Chapter\n\n{} (attempt {})\n\n# Prompt\n\n{}\n\n# Response\n\n{}\n",
            exchange.chapter_id, exchange.attempt, exchange.prompt, exchange.response
        );

        // Never truncate an earlier transcript.
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&file_path)
            .await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_one_file_per_exchange() {
        let dir = tempfile::tempdir().unwrap();
        let interceptor = FileInterceptor::new(dir.path().join("transcripts"));
        let exchange = Exchange {
            chapter_id: "setting_financial_goals",
            attempt: 3,
            prompt: "the prompt",
            response: "the reply",
        };

        interceptor.save(&exchange).await.unwrap();

        let mut entries = std::fs::read_dir(interceptor.base_path()).unwrap();
        let entry = entries.next().unwrap().unwrap();
        assert!(entries.next().is_none());

        let name = entry.file_name().into_string().unwrap();
        assert!(name.starts_with("setting_financial_goals_q3_"), "{name}");
        let content = std::fs::read_to_string(entry.path()).unwrap();
        assert!(content.contains("the prompt"));
        assert!(content.contains("the reply"));
    }

    #[tokio::test]
    async fn repeated_exchanges_keep_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let interceptor = FileInterceptor::new(dir.path().to_path_buf());
        let first = Exchange {
            chapter_id: "c",
            attempt: 1,
            prompt: "same prompt",
            response: "first reply",
        };
        let second = Exchange {
            response: "second reply",
            ..first
        };

        interceptor.save(&first).await.unwrap();
        interceptor.save(&second).await.unwrap();

        let contents: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| std::fs::read_to_string(entry.unwrap().path()).unwrap())
            .collect();
        assert_eq!(contents.len(), 2);
        assert!(contents.iter().any(|c| c.contains("first reply")));
        assert!(contents.iter().any(|c| c.contains("second reply")));
    }
}
