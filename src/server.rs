//! HTTP surface: routes requests to the batch assembler.

use crate::batch::{ChapterQuestions, BatchAssembler};
use crate::chapters;
use crate::core::LowLevelClient;
use crate::error::BatchError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

pub const WELCOME_MESSAGE: &str = "Welcome to the Finance Q&A Generator";
pub const USAGE: &str = "Use the /generate_questions/{chapter} endpoint to generate questions";

pub struct AppState<C: LowLevelClient> {
    pub assembler: Arc<BatchAssembler<C>>,
}

impl<C: LowLevelClient> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            assembler: Arc::clone(&self.assembler),
        }
    }
}

#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub usage: &'static str,
    pub available_chapters: Vec<&'static str>,
}

impl IntoResponse for BatchError {
    fn into_response(self) -> Response {
        let status = match &self {
            BatchError::InvalidChapter(_) => StatusCode::BAD_REQUEST,
            BatchError::EmptyBatch { .. } | BatchError::NoChapterSucceeded => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

pub fn router<C: LowLevelClient + 'static>(assembler: BatchAssembler<C>) -> Router {
    let state = AppState {
        assembler: Arc::new(assembler),
    };

    Router::new()
        .route("/", get(root))
        .route("/generate_questions/:chapter", get(generate_questions::<C>))
        .route("/generate_all_questions", get(generate_all_questions::<C>))
        .with_state(state)
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: WELCOME_MESSAGE,
        usage: USAGE,
        available_chapters: chapters::ids(),
    })
}

pub async fn generate_questions<C: LowLevelClient + 'static>(
    State(state): State<AppState<C>>,
    Path(chapter): Path<String>,
) -> Result<Json<ChapterQuestions>, BatchError> {
    info!(chapter = %chapter, "Generating questions for chapter");

    match state.assembler.assemble_by_id(&chapter).await {
        Ok((chapter, batch)) => Ok(Json(ChapterQuestions::single(chapter, batch))),
        Err(e) => {
            warn!(chapter = %chapter, error = %e, "Chapter request failed");
            Err(e)
        }
    }
}

pub async fn generate_all_questions<C: LowLevelClient + 'static>(
    State(state): State<AppState<C>>,
) -> Result<Json<ChapterQuestions>, BatchError> {
    info!("Generating questions for all chapters");
    let result = state.assembler.assemble_all().await?;
    Ok(Json(result))
}
