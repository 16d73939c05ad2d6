//! Process startup shared by the server and the CLI.

use crate::batch::BatchAssembler;
use crate::clients::FlexibleClient;
use crate::config::ServiceConfig;
use crate::core::probe;
use crate::error::StartupError;
use crate::generator::QuestionGenerator;
use crate::interceptors::FileInterceptor;
use std::sync::Arc;
use tracing::info;

/// Build the configured client, verify it with a live probe, and wrap it in an assembler.
///
/// Fails when the probe call errors or returns nothing, so a bad credential
/// never reaches request handling.
pub async fn build_assembler(
    config: &ServiceConfig,
) -> Result<BatchAssembler<FlexibleClient>, StartupError> {
    info!(
        provider = %config.client_type,
        model = %config.effective_model(),
        questions_per_chapter = config.questions_per_chapter,
        "Configuring model client"
    );

    let client = FlexibleClient::from_config(config);
    probe(&client).await?;

    let mut generator = QuestionGenerator::new(client);
    if let Some(dir) = &config.transcript_dir {
        info!(dir = %dir.display(), "Recording model transcripts");
        generator = generator.with_interceptor(Arc::new(FileInterceptor::new(dir.clone())));
    }

    Ok(BatchAssembler::new(generator, config.questions_per_chapter))
}
