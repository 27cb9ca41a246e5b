//! Sequencing of the marketplace and DAO deployments

use std::{io::Write, path::PathBuf};

use alloy_primitives::Address;
use tracing::{error, info};

use crate::{
    deployer::ContractDeployer,
    errors::ScriptError,
    types::{DaoDeployParams, DeployStage, DeployedContract, DeploymentSummary},
    utils::{dao_deploy_value, write_deployed_address},
};

/// Deploys the marketplace, then the DAO wired to it, reporting each
/// confirmed address to `out`
pub struct DeploymentOrchestrator<D, W> {
    /// The deployment capability
    deployer: D,
    /// The address of the CryptoDevs NFT collection
    nft_contract: Address,
    /// Where to record deployed addresses, if anywhere
    deployments_path: Option<PathBuf>,
    /// The sink for progress lines
    out: W,
    /// The progress of the run
    stage: DeployStage,
}

impl<D: ContractDeployer, W: Write> DeploymentOrchestrator<D, W> {
    /// Create an orchestrator which has not deployed anything yet
    pub fn new(deployer: D, nft_contract: Address, out: W) -> Self {
        Self {
            deployer,
            nft_contract,
            deployments_path: None,
            out,
            stage: DeployStage::NotStarted,
        }
    }

    /// Record each deployed address in the given deployments file
    pub fn with_deployments_path(mut self, deployments_path: Option<PathBuf>) -> Self {
        self.deployments_path = deployments_path;
        self
    }

    /// The progress of the run
    pub fn stage(&self) -> DeployStage {
        self.stage
    }

    /// Consume the orchestrator, returning the progress sink
    pub fn into_output(self) -> W {
        self.out
    }

    /// Deploy both contracts in order.
    ///
    /// The DAO is only deployed once the marketplace deployment is confirmed,
    /// a marketplace left on-chain by a failed DAO deployment is not undone.
    pub async fn run(&mut self) -> Result<DeploymentSummary, ScriptError> {
        let res = self.deploy_all().await;
        if let Err(e) = &res {
            error!("Deployment failed at stage {:?}: {}", self.stage, e);
            self.stage = DeployStage::Failed;
        }

        res
    }

    /// Run both deployment steps, advancing the stage after each
    async fn deploy_all(&mut self) -> Result<DeploymentSummary, ScriptError> {
        let value = dao_deploy_value()?;

        info!("Deploying FakeNFTMarketplace");
        let marketplace = self.deployer.deploy_marketplace().await?;
        if marketplace.address.is_zero() {
            return Err(ScriptError::ContractDeployment(format!(
                "{} deployed to the zero address",
                marketplace.contract
            )));
        }

        self.record(&marketplace)?;
        self.stage = DeployStage::MarketplaceDeployed;

        let params = DaoDeployParams {
            marketplace: marketplace.address,
            nft_collection: self.nft_contract,
            value,
        };

        info!(
            "Deploying CryptoDevsDAO with marketplace {:#x}, NFT collection {:#x}, value {} wei",
            params.marketplace, params.nft_collection, params.value
        );
        let dao = self.deployer.deploy_dao(&params).await?;

        self.record(&dao)?;
        self.stage = DeployStage::DaoDeployed;

        Ok(DeploymentSummary { marketplace, dao })
    }

    /// Report a confirmed deployment, and write it to the deployments file if one is set
    fn record(&mut self, deployed: &DeployedContract) -> Result<(), ScriptError> {
        writeln!(
            self.out,
            "{} deployed to: {}",
            deployed.contract, deployed.address
        )
        .map_err(|e| ScriptError::Output(e.to_string()))?;

        if let Some(path) = &self.deployments_path {
            write_deployed_address(path, deployed.contract.deployments_key(), deployed.address)?;
            info!("Recorded {} in {}", deployed.contract, path.display());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::VecDeque};

    use alloy_primitives::{address, TxHash, U256};
    use tempfile::TempDir;

    use crate::{types::DeployableContract, utils::read_deployment};

    use super::*;

    /// The NFT collection address used in the tests
    const NFT_COLLECTION: Address = address!("0000000000000000000000000000000000abc123");
    /// The address the mock deploys the marketplace to
    const MARKETPLACE: Address = address!("0000000000000000000000000000000000000111");
    /// The address the mock deploys the DAO to
    const DAO: Address = address!("0000000000000000000000000000000000000222");

    /// A call made to the mock deployer
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum DeployCall {
        /// A marketplace deployment
        Marketplace,
        /// A DAO deployment with the given parameters
        Dao(DaoDeployParams),
    }

    /// A deployer returning scripted results and recording its calls
    #[derive(Default)]
    struct MockDeployer {
        /// The calls made, in order
        calls: RefCell<Vec<DeployCall>>,
        /// The results of the marketplace deployments
        marketplace_results: RefCell<VecDeque<Result<Address, ScriptError>>>,
        /// The results of the DAO deployments
        dao_results: RefCell<VecDeque<Result<Address, ScriptError>>>,
    }

    impl MockDeployer {
        /// A deployer whose two deployments return the given results
        fn new(marketplace: Result<Address, ScriptError>, dao: Result<Address, ScriptError>) -> Self {
            Self {
                calls: RefCell::default(),
                marketplace_results: RefCell::new(VecDeque::from([marketplace])),
                dao_results: RefCell::new(VecDeque::from([dao])),
            }
        }

        /// The calls made so far
        fn calls(&self) -> Vec<DeployCall> {
            self.calls.borrow().clone()
        }

        /// Build a handle from the next scripted result
        fn next(
            results: &RefCell<VecDeque<Result<Address, ScriptError>>>,
            contract: DeployableContract,
        ) -> Result<DeployedContract, ScriptError> {
            let address = results
                .borrow_mut()
                .pop_front()
                .expect("unexpected deployment")?;

            Ok(DeployedContract {
                contract,
                address,
                tx_hash: TxHash::ZERO,
            })
        }
    }

    impl ContractDeployer for &MockDeployer {
        async fn deploy_marketplace(&self) -> Result<DeployedContract, ScriptError> {
            self.calls.borrow_mut().push(DeployCall::Marketplace);
            MockDeployer::next(
                &self.marketplace_results,
                DeployableContract::FakeNftMarketplace,
            )
        }

        async fn deploy_dao(
            &self,
            params: &DaoDeployParams,
        ) -> Result<DeployedContract, ScriptError> {
            self.calls.borrow_mut().push(DeployCall::Dao(params.clone()));
            MockDeployer::next(&self.dao_results, DeployableContract::CryptoDevsDao)
        }
    }

    /// A deployment failure as surfaced by a deployer
    fn deploy_failure() -> ScriptError {
        ScriptError::ContractDeployment("insufficient funds for gas * price + value".to_string())
    }

    /// The lines written to the progress sink
    fn output_lines(out: Vec<u8>) -> Vec<String> {
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[tokio::test]
    async fn test_deploys_dao_against_marketplace() {
        let deployer = MockDeployer::new(Ok(MARKETPLACE), Ok(DAO));
        let mut orchestrator = DeploymentOrchestrator::new(&deployer, NFT_COLLECTION, Vec::new());

        let summary = orchestrator.run().await.unwrap();
        assert_eq!(summary.marketplace.address, MARKETPLACE);
        assert_eq!(summary.dao.address, DAO);
        assert_eq!(orchestrator.stage(), DeployStage::DaoDeployed);

        let expected_params = DaoDeployParams {
            marketplace: MARKETPLACE,
            nft_collection: NFT_COLLECTION,
            value: U256::from(200_000_000_000_000_000_u128),
        };
        assert_eq!(
            deployer.calls(),
            vec![DeployCall::Marketplace, DeployCall::Dao(expected_params)]
        );
    }

    #[tokio::test]
    async fn test_reports_both_deployments_in_order() {
        let deployer = MockDeployer::new(Ok(MARKETPLACE), Ok(DAO));
        let mut orchestrator = DeploymentOrchestrator::new(&deployer, NFT_COLLECTION, Vec::new());
        orchestrator.run().await.unwrap();

        let lines = output_lines(orchestrator.into_output());
        assert_eq!(
            lines,
            vec![
                format!("FakeNFTMarketplace deployed to: {}", MARKETPLACE),
                format!("CryptoDevsDAO deployed to: {}", DAO),
            ]
        );
    }

    #[tokio::test]
    async fn test_marketplace_failure_skips_dao() {
        let deployer = MockDeployer::new(Err(deploy_failure()), Ok(DAO));
        let mut orchestrator = DeploymentOrchestrator::new(&deployer, NFT_COLLECTION, Vec::new());

        let res = orchestrator.run().await;
        assert_eq!(res, Err(deploy_failure()));
        assert_eq!(orchestrator.stage(), DeployStage::Failed);
        assert_eq!(deployer.calls(), vec![DeployCall::Marketplace]);
        assert!(output_lines(orchestrator.into_output()).is_empty());
    }

    #[tokio::test]
    async fn test_dao_failure_after_marketplace() {
        let deployer = MockDeployer::new(Ok(MARKETPLACE), Err(deploy_failure()));
        let mut orchestrator = DeploymentOrchestrator::new(&deployer, NFT_COLLECTION, Vec::new());

        let res = orchestrator.run().await;
        assert_eq!(res, Err(deploy_failure()));
        assert_eq!(orchestrator.stage(), DeployStage::Failed);
        assert_eq!(deployer.calls().len(), 2);

        let lines = output_lines(orchestrator.into_output());
        assert_eq!(
            lines,
            vec![format!("FakeNFTMarketplace deployed to: {}", MARKETPLACE)]
        );
    }

    #[tokio::test]
    async fn test_zero_marketplace_address_skips_dao() {
        let deployer = MockDeployer::new(Ok(Address::ZERO), Ok(DAO));
        let mut orchestrator = DeploymentOrchestrator::new(&deployer, NFT_COLLECTION, Vec::new());

        let res = orchestrator.run().await;
        assert!(matches!(res, Err(ScriptError::ContractDeployment(_))));
        assert_eq!(orchestrator.stage(), DeployStage::Failed);
        assert_eq!(deployer.calls(), vec![DeployCall::Marketplace]);
    }

    #[tokio::test]
    async fn test_records_deployments() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deployments.json");

        let deployer = MockDeployer::new(Ok(MARKETPLACE), Ok(DAO));
        let mut orchestrator = DeploymentOrchestrator::new(&deployer, NFT_COLLECTION, Vec::new())
            .with_deployments_path(Some(path.clone()));
        orchestrator.run().await.unwrap();

        assert_eq!(read_deployment(&path, "FakeNFTMarketplace").unwrap(), MARKETPLACE);
        assert_eq!(read_deployment(&path, "CryptoDevsDAO").unwrap(), DAO);
    }

    #[tokio::test]
    async fn test_marketplace_recorded_when_dao_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deployments.json");

        let deployer = MockDeployer::new(Ok(MARKETPLACE), Err(deploy_failure()));
        let mut orchestrator = DeploymentOrchestrator::new(&deployer, NFT_COLLECTION, Vec::new())
            .with_deployments_path(Some(path.clone()));
        assert!(orchestrator.run().await.is_err());

        assert_eq!(read_deployment(&path, "FakeNFTMarketplace").unwrap(), MARKETPLACE);
        assert!(read_deployment(&path, "CryptoDevsDAO").is_err());
    }
}
