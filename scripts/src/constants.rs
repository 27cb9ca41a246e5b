//! Constants used in the deploy scripts

/// The address of the CryptoDevs NFT collection.
///
/// Holders of this collection are the members of the DAO, the DAO contract
/// takes it as its second constructor argument.
pub const CRYPTODEVS_NFT_CONTRACT_ADDRESS: &str = "0x8ba1f109551bd432803012645ac136ddd64dba72";

/// The amount of ether sent along with the DAO deployment, funding its treasury
pub const DAO_DEPLOY_VALUE_ETHER: &str = "0.2";

/// The default RPC URL, a local Anvil / Hardhat devnet node
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// The default private key, the first default account in an Anvil / Hardhat node
pub const DEFAULT_DEVNET_PKEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// The default directory containing the compiled contract artifacts,
/// as laid out by `npx hardhat compile`
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts/contracts";

/// The number of confirmations to wait for on each contract deployment transaction
pub const NUM_DEPLOY_CONFIRMATIONS: u64 = 1;

/// The extension of a Solidity source file, used as the artifact subdirectory name
pub const SOLIDITY_EXTENSION: &str = "sol";

/// The extension of a compilation artifact
pub const ARTIFACT_EXTENSION: &str = "json";

/// The bytecode key in a compilation artifact
pub const BYTECODE_KEY: &str = "bytecode";

/// The name of the marketplace contract
pub const FAKE_NFT_MARKETPLACE_CONTRACT_NAME: &str = "FakeNFTMarketplace";

/// The name of the DAO contract, as compiled
pub const CRYPTODEVS_DAO_CONTRACT_NAME: &str = "CryptoDevsDao";

/// The name under which the DAO contract is reported
pub const CRYPTODEVS_DAO_DISPLAY_NAME: &str = "CryptoDevsDAO";

/// The marketplace contract key in the deployments file
pub const FAKE_NFT_MARKETPLACE_CONTRACT_KEY: &str = "FakeNFTMarketplace";

/// The DAO contract key in the deployments file
pub const CRYPTODEVS_DAO_CONTRACT_KEY: &str = "CryptoDevsDAO";
