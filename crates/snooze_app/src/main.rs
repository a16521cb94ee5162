mod cli;
mod commands;
mod logging;
mod render;
mod session;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use snooze_client::{ensure_state_dir, ApiSettings, CredentialStore, ReqwestStoryApi};
use snooze_logging::snooze_error;

use crate::cli::Cli;
use crate::session::Session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let state_dir = match cli.state_dir {
        Some(dir) => dir,
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    ensure_state_dir(&state_dir)
        .with_context(|| format!("cannot use state directory {}", state_dir.display()))?;
    logging::initialize(cli.log, &state_dir, cli.verbose);

    let api = ReqwestStoryApi::new(ApiSettings::with_base_url(cli.base_url))?;
    let mut session = Session::new(api, CredentialStore::new(state_dir));

    match commands::run(cli.command, &mut session).await {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(err) => {
            snooze_error!("Command failed: {:#}", err);
            Err(err)
        }
    }
}
