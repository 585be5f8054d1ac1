use anyhow::Result;
use clap::Parser;
use typetape::cli::{self, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so playback owns stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    cli::run(Cli::parse()).await
}
