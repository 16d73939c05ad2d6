use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "finance_quiz=info";

/// Install the fmt subscriber. `RUST_LOG` wins over `default_filter`.
///
/// Call after `dotenvy::dotenv()` so a `RUST_LOG` in `.env` is honoured.
pub fn init(default_filter: &str) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(default_filter)
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
