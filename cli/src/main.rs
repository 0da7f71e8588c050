use clap::Parser;
use infrastructure::config::Config;
use presentation::cli::{Cli, CliApp};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shared::telemetry::init_tracing("warn");
    let cli = Cli::parse();
    let config = Config::load();
    let mut app = CliApp::from_config(&config)?;
    app.run(cli).await?;
    Ok(())
}
