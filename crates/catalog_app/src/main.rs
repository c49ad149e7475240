mod app;
mod config;
mod logging;
mod ui;

use clap::Parser;

use crate::config::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log);
    app::run_app(cli).await
}
