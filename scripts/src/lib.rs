//! Scripts for deploying the CryptoDevs DAO and the mock NFT marketplace it trades on.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod cli;
pub mod constants;
pub mod deployer;
pub mod errors;
pub mod orchestrator;
pub mod types;
pub mod utils;
