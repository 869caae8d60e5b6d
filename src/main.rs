use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use variable_tokens::{render, run, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string())),
        )
        .with_writer(std::io::stderr)
        .init();

    let messages = run(&cli).await?;
    let output = render(&messages, cli.pretty)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
