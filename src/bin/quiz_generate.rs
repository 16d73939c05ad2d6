use anyhow::{Context, Result};
use clap::Parser;
use finance_quiz::config::{ConfigOverrides, ServiceConfig};
use finance_quiz::{chapters, logging, startup, ChapterQuestions};

#[derive(Parser)]
#[command(author, version, about = "Generate finance quiz questions from the command line", long_about = None)]
#[command(after_help = "EXAMPLES:
    quiz-generate --list                                 # Show chapter ids
    quiz-generate setting_financial_goals -n 3           # Three attempts for one chapter
    quiz-generate --all --provider deepseek > quiz.json  # Every chapter via DeepSeek")]
struct Args {
    /// Chapter id to generate questions for
    chapter: Option<String>,

    /// Generate for every chapter
    #[arg(long, conflicts_with = "chapter")]
    all: bool,

    /// List chapter ids and exit
    #[arg(long)]
    list: bool,

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

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.list {
        for chapter in chapters::CHAPTERS {
            println!("{:<36} {}", chapter.id, chapter.title);
        }
        return Ok(());
    }

    if args.chapter.is_none() && !args.all {
        anyhow::bail!("pass a chapter id, --all, or --list");
    }

    let _ = dotenvy::dotenv();
    logging::init("finance_quiz=warn");

    let overrides = ConfigOverrides {
        provider: args.provider,
        model: args.model,
        questions_per_chapter: args.questions_per_chapter,
        transcript_dir: args.transcript_dir,
        ..Default::default()
    };

    let config = ServiceConfig::from_env_with_overrides(overrides)
        .context("failed to load configuration")?;
    let assembler = startup::build_assembler(&config)
        .await
        .context("failed to initialise the model client")?;

    let result = match args.chapter {
        Some(id) => {
            let (chapter, batch) = assembler.assemble_by_id(&id).await?;
            ChapterQuestions::single(chapter, batch)
        }
        None => assembler.assemble_all().await?,
    };

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
