use std::{io, process::ExitCode};

use clap::Parser;
use scripts::{
    cli::{Cli, DeployConfig},
    deployer::ChainDeployer,
    errors::ScriptError,
    orchestrator::DeploymentOrchestrator,
};
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr, stdout only carries the deployed addresses
    tracing_subscriber::fmt()
        .pretty()
        .with_writer(io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{:?}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), ScriptError> {
    let config = DeployConfig::try_from(cli)?;
    info!(
        "Deploying from {:#x} to {}",
        config.signer.address(),
        config.rpc_url
    );

    let deployer = ChainDeployer::new(&config);
    let mut orchestrator = DeploymentOrchestrator::new(deployer, config.nft_contract, io::stdout())
        .with_deployments_path(config.deployments_path);
    orchestrator.run().await?;

    Ok(())
}
