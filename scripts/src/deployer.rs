//! The capability of deploying the DAO contracts, and its implementation
//! against a live network

use std::{future::Future, path::PathBuf};

use alloy::{
    network::TransactionBuilder, providers::Provider, rpc::types::TransactionRequest,
};
use alloy_primitives::U256;
use tracing::info;

use crate::{
    cli::DeployConfig,
    errors::ScriptError,
    types::{DaoDeployParams, DeployableContract, DeployedContract},
    utils::{read_artifact_bytecode, setup_client, Wallet},
};

/// Deploys the contracts orchestrated by the scripts.
///
/// Implementations only resolve once the deployment is confirmed, a returned
/// [`DeployedContract`] always refers to a live contract.
pub trait ContractDeployer {
    /// Deploy the `FakeNFTMarketplace` contract, which takes no constructor
    /// arguments and no value
    fn deploy_marketplace(
        &self,
    ) -> impl Future<Output = Result<DeployedContract, ScriptError>>;

    /// Deploy the `CryptoDevsDAO` contract with the given parameters
    fn deploy_dao(
        &self,
        params: &DaoDeployParams,
    ) -> impl Future<Output = Result<DeployedContract, ScriptError>>;
}

/// A [`ContractDeployer`] sending contract creation transactions through an RPC node
pub struct ChainDeployer {
    /// The signing provider
    client: Wallet,
    /// The directory holding the compiled contract artifacts
    artifacts_dir: PathBuf,
    /// The number of confirmations to wait for on each deployment
    confirmations: u64,
}

impl ChainDeployer {
    /// Create a deployer from the script configuration
    pub fn new(config: &DeployConfig) -> Self {
        let client = setup_client(&config.rpc_url, config.signer.clone());

        Self {
            client,
            artifacts_dir: config.artifacts_dir.clone(),
            confirmations: config.confirmations,
        }
    }

    /// Deploy the given contract with ABI-encoded constructor arguments
    /// and an attached value, waiting for the deployment to be confirmed
    async fn deploy(
        &self,
        contract: DeployableContract,
        constructor_args: &[u8],
        value: U256,
    ) -> Result<DeployedContract, ScriptError> {
        let bytecode = read_artifact_bytecode(&self.artifacts_dir, contract)?;

        let mut deploy_code = bytecode.to_vec();
        deploy_code.extend_from_slice(constructor_args);

        let tx = TransactionRequest::default()
            .with_deploy_code(deploy_code)
            .with_value(value);

        let pending_tx = self
            .client
            .send_transaction(tx)
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        let tx_hash = *pending_tx.tx_hash();
        info!("Sent {} deployment transaction {:#x}", contract, tx_hash);

        let receipt = pending_tx
            .with_required_confirmations(self.confirmations)
            .get_receipt()
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        if !receipt.status() {
            return Err(ScriptError::ContractDeployment(format!(
                "{} deployment transaction {:#x} reverted",
                contract, tx_hash
            )));
        }

        let address = receipt.contract_address.ok_or_else(|| {
            ScriptError::ContractDeployment(format!(
                "no contract address in receipt of {:#x}",
                tx_hash
            ))
        })?;

        Ok(DeployedContract {
            contract,
            address,
            tx_hash,
        })
    }
}

impl ContractDeployer for ChainDeployer {
    async fn deploy_marketplace(&self) -> Result<DeployedContract, ScriptError> {
        self.deploy(DeployableContract::FakeNftMarketplace, &[], U256::ZERO)
            .await
    }

    async fn deploy_dao(&self, params: &DaoDeployParams) -> Result<DeployedContract, ScriptError> {
        self.deploy(
            DeployableContract::CryptoDevsDao,
            &params.constructor_args(),
            params.value,
        )
        .await
    }
}
