//! Type definitions used throughout the scripts

use std::fmt::{self, Display};

use alloy_primitives::{Address, TxHash, U256};
use alloy_sol_types::SolValue;

use crate::constants::{
    CRYPTODEVS_DAO_CONTRACT_KEY, CRYPTODEVS_DAO_CONTRACT_NAME, CRYPTODEVS_DAO_DISPLAY_NAME,
    FAKE_NFT_MARKETPLACE_CONTRACT_KEY, FAKE_NFT_MARKETPLACE_CONTRACT_NAME,
};

/// The contracts deployed by the scripts
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DeployableContract {
    /// The mock NFT marketplace the DAO buys from
    FakeNftMarketplace,
    /// The CryptoDevs DAO
    CryptoDevsDao,
}

impl DeployableContract {
    /// The name of the contract's compilation artifact
    pub fn artifact_name(&self) -> &'static str {
        match self {
            DeployableContract::FakeNftMarketplace => FAKE_NFT_MARKETPLACE_CONTRACT_NAME,
            DeployableContract::CryptoDevsDao => CRYPTODEVS_DAO_CONTRACT_NAME,
        }
    }

    /// The key under which the contract's address is stored in the deployments file
    pub fn deployments_key(&self) -> &'static str {
        match self {
            DeployableContract::FakeNftMarketplace => FAKE_NFT_MARKETPLACE_CONTRACT_KEY,
            DeployableContract::CryptoDevsDao => CRYPTODEVS_DAO_CONTRACT_KEY,
        }
    }
}

impl Display for DeployableContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployableContract::FakeNftMarketplace => {
                write!(f, "{}", FAKE_NFT_MARKETPLACE_CONTRACT_NAME)
            }
            DeployableContract::CryptoDevsDao => write!(f, "{}", CRYPTODEVS_DAO_DISPLAY_NAME),
        }
    }
}

/// A handle to a contract whose deployment has been confirmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedContract {
    /// The contract that was deployed
    pub contract: DeployableContract,
    /// The address at which the contract lives
    pub address: Address,
    /// The hash of the contract creation transaction
    pub tx_hash: TxHash,
}

/// The parameters of the DAO deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaoDeployParams {
    /// The address of the deployed marketplace
    pub marketplace: Address,
    /// The address of the CryptoDevs NFT collection
    pub nft_collection: Address,
    /// The amount of wei sent with the deployment
    pub value: U256,
}

impl DaoDeployParams {
    /// ABI-encode the DAO constructor arguments,
    /// `constructor(address _nftMarketplace, address _cryptoDevsNFT)`
    pub fn constructor_args(&self) -> Vec<u8> {
        (self.marketplace, self.nft_collection).abi_encode_params()
    }
}

/// The progress of a deployment run
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DeployStage {
    /// Nothing has been deployed yet
    NotStarted,
    /// The marketplace is deployed, the DAO is not
    MarketplaceDeployed,
    /// Both contracts are deployed
    DaoDeployed,
    /// One of the deployments failed
    Failed,
}

/// The result of a successful deployment run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentSummary {
    /// The deployed marketplace
    pub marketplace: DeployedContract,
    /// The deployed DAO
    pub dao: DeployedContract,
}
