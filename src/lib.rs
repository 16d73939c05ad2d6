pub mod batch;
pub mod chapters;
pub mod clients;
pub mod config;
pub mod core;
pub mod error;
pub mod generator;
pub mod interceptors;
pub mod logging;
pub mod question;
pub mod server;
pub mod startup;

// Convenient re-exports
pub use batch::{ChapterQuestions, BatchAssembler, QuestionBatch};
pub use chapters::{Chapter, CHAPTERS};
pub use config::ServiceConfig;
pub use generator::QuestionGenerator;
pub use question::GeneratedQuestion;
