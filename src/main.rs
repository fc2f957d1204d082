//! # reqline entry point

use anyhow::{bail, Result};
use reqline::cmd_args::CommandLineArgs;
use reqline::config::AppConfig;
use reqline::io::{TerminalEventStream, TerminalRenderStream};
use reqline::{logging, AppController};

#[tokio::main]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();
    logging::init_tracing_subscriber(cmd_args.log_file())?;

    if !atty::is(atty::Stream::Stdout) {
        bail!("reqline needs an interactive terminal on stdout");
    }

    let config = AppConfig::resolve(&cmd_args)?;
    tracing::debug!("configuration: {:?}", config);

    let mut app = AppController::with_io_streams(
        config,
        TerminalEventStream::new(),
        TerminalRenderStream::new(),
    )?;
    app.run().await
}
