use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::{core::LowLevelClient, error::AIError};

/// One scripted outcome of `ask_raw`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockResponse {
    Text(String),
    Error(String),
}

impl MockResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }
}

#[derive(Debug, Default)]
struct MockState {
    responses: VecDeque<MockResponse>,
    prompts: Vec<String>,
}

/// Shared control surface for a `MockClient`: queue replies and inspect prompts.
#[derive(Debug, Default)]
pub struct MockHandle {
    state: Mutex<MockState>,
}

impl MockHandle {
    fn lock(&self) -> MutexGuard<'_, MockState> {
        // A panic in another test thread must not hide the recorded prompts.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn push(&self, response: MockResponse) {
        self.lock().responses.push_back(response);
    }

    pub fn extend(&self, responses: impl IntoIterator<Item = MockResponse>) {
        self.lock().responses.extend(responses);
    }

    /// Scripted responses not yet consumed
    pub fn remaining(&self) -> usize {
        self.lock().responses.len()
    }

    /// Every prompt received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.lock().prompts.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().prompts.len()
    }

    fn next(&self, prompt: String) -> Option<MockResponse> {
        let mut state = self.lock();
        state.prompts.push(prompt);
        state.responses.pop_front()
    }
}

/// Mock client that replays a queue of scripted responses.
///
/// Once the queue is exhausted every call fails with `AIError::Mock`.
#[derive(Debug, Clone)]
pub struct MockClient {
    handle: Arc<MockHandle>,
}

impl MockClient {
    pub fn new() -> (Self, Arc<MockHandle>) {
        Self::with_responses(Vec::new())
    }

    pub fn with_responses(responses: Vec<MockResponse>) -> (Self, Arc<MockHandle>) {
        let handle = Arc::new(MockHandle::default());
        handle.extend(responses);
        (
            Self {
                handle: Arc::clone(&handle),
            },
            handle,
        )
    }
}

#[async_trait]
impl LowLevelClient for MockClient {
    async fn ask_raw(&self, prompt: String) -> Result<String, AIError> {
        match self.handle.next(prompt) {
            Some(MockResponse::Text(text)) => Ok(text),
            Some(MockResponse::Error(message)) => Err(AIError::Mock(message)),
            None => Err(AIError::Mock("no scripted response left".to_string())),
        }
    }

    fn clone_box(&self) -> Box<dyn LowLevelClient> {
        Box::new(self.clone())
    }
}
