use anyhow::{Context, Result};
use clap::Parser;
use finance_quiz::config::{ConfigOverrides, ServiceConfig};
use finance_quiz::{logging, server, startup};
use tracing::info;

#[derive(Parser)]
#[command(author, version, about = "Finance quiz question generator service", long_about = None)]
#[command(after_help = "ENVIRONMENT VARIABLES:
    GEMINI_API_KEY               Credential for the Gemini provider (default provider)
    DEEPSEEK_API_KEY             Credential for the DeepSeek provider
    QUIZ_PROVIDER                gemini | deepseek
    QUIZ_MODEL                   Model id override
    QUIZ_MODEL_BASE_URL          Provider endpoint override
    QUIZ_BIND_ADDR               Listen address [default: 0.0.0.0:8000]
    QUIZ_QUESTIONS_PER_CHAPTER   Attempts per chapter [default: 10]
    QUIZ_TRANSCRIPT_DIR          Directory for prompt/reply transcripts
    RUST_LOG                     Log filter [default: finance_quiz=info]")]
struct Args {
    /// Address to listen on
    #[arg(short, long)]
    bind: Option<String>,

    /// Model provider: gemini, deepseek
    #[arg(short, long)]
    provider: Option<String>,

    /// Model id
    #[arg(short, long)]
    model: Option<String>,

    /// Generation attempts per chapter
    #[arg(short = 'n', long)]
    questions_per_chapter: Option<String>,

    /// Write every prompt/reply pair to this directory
    #[arg(long)]
    transcript_dir: Option<String>,
}

impl Args {
    fn overrides(self) -> ConfigOverrides {
        ConfigOverrides {
            bind: self.bind,
            provider: self.provider,
            model: self.model,
            questions_per_chapter: self.questions_per_chapter,
            transcript_dir: self.transcript_dir,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load .env first so RUST_LOG in .env is seen
    let _ = dotenvy::dotenv();
    logging::init(logging::DEFAULT_FILTER);

    let config = ServiceConfig::from_env_with_overrides(args.overrides())
        .context("failed to load configuration")?;
    let assembler = startup::build_assembler(&config)
        .await
        .context("failed to initialise the model client")?;

    let app = server::router(assembler);
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "Finance quiz service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await
        .context("server error")?;

    Ok(())
}
