//! Utilities for the deploy scripts.

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use alloy::{
    network::Ethereum,
    providers::{DynProvider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use alloy_primitives::{utils::parse_ether, Address, Bytes, U256};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
    constants::{ARTIFACT_EXTENSION, DAO_DEPLOY_VALUE_ETHER, SOLIDITY_EXTENSION},
    errors::ScriptError,
    types::DeployableContract,
};

/// The provider type used by the scripts, signing with the deployer's key
pub type Wallet = DynProvider<Ethereum>;

/// Sets up a provider which fills nonces, gas and chain id
/// and signs transactions with the given key
pub fn setup_client(rpc_url: &Url, signer: PrivateKeySigner) -> Wallet {
    let provider = ProviderBuilder::new()
        .wallet(signer)
        .connect_http(rpc_url.clone());

    DynProvider::new(provider)
}

/// Parses a hex-encoded private key into a signer
pub fn parse_signer(priv_key: &str) -> Result<PrivateKeySigner, ScriptError> {
    PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))
}

/// The amount of wei sent along with the DAO deployment
pub fn dao_deploy_value() -> Result<U256, ScriptError> {
    parse_ether(DAO_DEPLOY_VALUE_ETHER).map_err(|e| ScriptError::Config(e.to_string()))
}

// -------------
// | Artifacts |
// -------------

/// The subset of a compilation artifact the scripts care about
#[derive(Deserialize)]
struct Artifact {
    /// The contract creation bytecode
    bytecode: ArtifactBytecode,
}

/// The bytecode of an artifact, either a bare hex string (Hardhat)
/// or an object wrapping one (Foundry)
#[derive(Deserialize)]
#[serde(untagged)]
enum ArtifactBytecode {
    /// `"bytecode": "0x..."`
    Hex(String),
    /// `"bytecode": { "object": "0x...", ... }`
    Object {
        /// The hex-encoded bytecode
        object: String,
    },
}

impl ArtifactBytecode {
    /// The hex-encoded bytecode
    fn into_hex(self) -> String {
        match self {
            ArtifactBytecode::Hex(hex) | ArtifactBytecode::Object { object: hex } => hex,
        }
    }
}

/// The path of the given contract's artifact, `<dir>/<Name>.sol/<Name>.json`
pub fn artifact_path(artifacts_dir: &Path, contract: DeployableContract) -> PathBuf {
    let name = contract.artifact_name();
    artifacts_dir
        .join(format!("{name}.{SOLIDITY_EXTENSION}"))
        .join(format!("{name}.{ARTIFACT_EXTENSION}"))
}

/// Reads the creation bytecode of the given contract from its compilation artifact
pub fn read_artifact_bytecode(
    artifacts_dir: &Path,
    contract: DeployableContract,
) -> Result<Bytes, ScriptError> {
    let path = artifact_path(artifacts_dir, contract);
    let contents = fs::read_to_string(&path)
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))?;
    let artifact: Artifact = serde_json::from_str(&contents)
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))?;

    let bytecode = Bytes::from_str(&artifact.bytecode.into_hex())
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))?;

    // Abstract contracts and interfaces compile to empty bytecode
    if bytecode.is_empty() {
        return Err(ScriptError::ArtifactParsing(format!(
            "{}: {} has no creation bytecode",
            path.display(),
            contract
        )));
    }

    Ok(bytecode)
}

// ---------------
// | Deployments |
// ---------------

/// Reads the deployments file, a flat JSON object of contract names to addresses
fn read_deployments_json(file_path: &Path) -> Result<Map<String, Value>, ScriptError> {
    let contents =
        fs::read_to_string(file_path).map_err(|e| ScriptError::ReadDeployments(e.to_string()))?;

    match serde_json::from_str::<Value>(&contents) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ScriptError::ReadDeployments(
            "deployments file is not a JSON object".to_string(),
        )),
        Err(e) => Err(ScriptError::ReadDeployments(e.to_string())),
    }
}

/// Reads the address stored under the given key in the deployments file
pub fn read_deployment(file_path: &Path, contract_key: &str) -> Result<Address, ScriptError> {
    let deployments = read_deployments_json(file_path)?;

    let addr_str = deployments
        .get(contract_key)
        .and_then(Value::as_str)
        .ok_or_else(|| {
            ScriptError::ReadDeployments(format!(
                "key {} not found in deployments file",
                contract_key
            ))
        })?;

    Address::from_str(addr_str).map_err(|e| ScriptError::ReadDeployments(e.to_string()))
}

/// Writes the address under the given key in the deployments file,
/// creating the file if it doesn't exist and keeping all other entries
pub fn write_deployed_address(
    file_path: &Path,
    contract_key: &str,
    address: Address,
) -> Result<(), ScriptError> {
    let mut deployments = if file_path.exists() {
        read_deployments_json(file_path)?
    } else {
        Map::new()
    };

    deployments.insert(contract_key.to_string(), Value::String(format!("{address:#x}")));

    let contents = serde_json::to_string_pretty(&Value::Object(deployments))
        .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
    fs::write(file_path, contents).map_err(|e| ScriptError::WriteDeployments(e.to_string()))
}
