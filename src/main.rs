use clap::Parser;
use pathnorm::cli::{self, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("pathnorm debug logging enabled");
    }

    let stdin = std::io::stdin();
    cli::run(cli.command, stdin.lock(), std::io::stdout().lock())
}
