//! Definitions of CLI arguments and configuration for the deploy script

use std::{path::PathBuf, str::FromStr};

use alloy::{signers::local::PrivateKeySigner, transports::http::reqwest::Url};
use alloy_primitives::Address;
use clap::Parser;

use crate::{
    constants::{
        CRYPTODEVS_NFT_CONTRACT_ADDRESS, DEFAULT_ARTIFACTS_DIR, DEFAULT_DEVNET_PKEY,
        DEFAULT_RPC_URL, NUM_DEPLOY_CONFIRMATIONS,
    },
    errors::ScriptError,
    utils::parse_signer,
};

/// Deploy the FakeNFTMarketplace and CryptoDevsDAO contracts.
///
/// Every argument can be set from the environment, with no arguments at all
/// the script deploys to a local devnet using its first default account.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Private key of the deployer
    #[arg(short, long, env = "PKEY", default_value = DEFAULT_DEVNET_PKEY)]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Address of the CryptoDevs NFT collection the DAO is gated on
    #[arg(
        short,
        long,
        env = "CRYPTODEVS_NFT_CONTRACT_ADDRESS",
        default_value = CRYPTODEVS_NFT_CONTRACT_ADDRESS
    )]
    pub nft_contract: String,

    /// Directory containing the compiled contract artifacts
    #[arg(short, long, env = "ARTIFACTS_DIR", default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,

    /// Path to a JSON file in which to record the deployed addresses
    #[arg(short, long, env = "DEPLOYMENTS_PATH")]
    pub deployments_path: Option<PathBuf>,

    /// Number of confirmations to wait for on each deployment
    #[arg(short, long, env = "NUM_CONFIRMATIONS", default_value_t = NUM_DEPLOY_CONFIRMATIONS)]
    pub confirmations: u64,
}

/// The configuration of a deployment run, with every value parsed
#[derive(Debug, Clone)]
pub struct DeployConfig {
    /// The RPC endpoint of the target chain
    pub rpc_url: Url,
    /// The signer for deployment transactions
    pub signer: PrivateKeySigner,
    /// The address of the CryptoDevs NFT collection
    pub nft_contract: Address,
    /// The directory containing the compiled contract artifacts
    pub artifacts_dir: PathBuf,
    /// Where to record deployed addresses, if anywhere
    pub deployments_path: Option<PathBuf>,
    /// The number of confirmations to wait for on each deployment
    pub confirmations: u64,
}

impl TryFrom<Cli> for DeployConfig {
    type Error = ScriptError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let rpc_url = Url::parse(&cli.rpc_url)
            .map_err(|e| ScriptError::Config(format!("invalid RPC URL {}: {}", cli.rpc_url, e)))?;
        let signer = parse_signer(&cli.priv_key)?;
        let nft_contract = Address::from_str(&cli.nft_contract).map_err(|e| {
            ScriptError::Config(format!(
                "invalid NFT contract address {}: {}",
                cli.nft_contract, e
            ))
        })?;

        Ok(Self {
            rpc_url,
            signer,
            nft_contract,
            artifacts_dir: cli.artifacts_dir,
            deployments_path: cli.deployments_path,
            confirmations: cli.confirmations,
        })
    }
}
