use std::process::ExitCode;

use clap::Parser;
use storagevisor::service::{self, Command, Opts};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let opts = Opts::parse();
    if let Err(e) = service::logging::init(&opts.log) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }
    match &opts.command {
        Command::StoragePublicLinkData(cmd) => info!(
            addr = %cmd.addr,
            debug_addr = %cmd.debug_addr,
            "starting {}",
            service::STORAGE_PUBLIC_LINK_DATA
        ),
    }

    match service::execute(opts.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(err = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}
