pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use config::{artifact::Artifact, toml_config::TomlConfig};
pub use core::app::{App, ContractSource, GAS_AMOUNT};
pub use core::contract::{ProjectSubmission, TxOptions};
pub use core::rpc::{HttpTransport, Web3};
pub use domain::model::{
    Address, Project, ProjectHash, ProjectStatus, TransactionOutcome, TransactionReceipt,
    University, H256, U256,
};
pub use utils::error::{ClientError, Result};
