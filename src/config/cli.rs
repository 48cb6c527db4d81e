use crate::config::toml_config::{
    AccountConfig, ContractConfig, NetworkConfig, TomlConfig, DEFAULT_RPC_URL,
};
use crate::domain::model::{parse_address, parse_hash, Address, ProjectHash, ProjectStatus};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};

fn address_arg(value: &str) -> std::result::Result<Address, String> {
    parse_address("address", value).map_err(|e| e.to_string())
}

fn hash_arg(value: &str) -> std::result::Result<ProjectHash, String> {
    parse_hash("project_hash", value).map_err(|e| e.to_string())
}

fn status_arg(value: &str) -> std::result::Result<ProjectStatus, String> {
    value.parse::<ProjectStatus>().map_err(|e| e.to_string())
}

#[derive(Debug, Clone, Parser)]
#[command(name = "project-submission")]
#[command(about = "Command line client for the ProjectSubmission contract")]
pub struct CliConfig {
    /// JSON-RPC endpoint of the Ethereum node
    #[arg(long)]
    pub rpc_url: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Truffle build artifact used to locate the deployment
    #[arg(long, default_value = "build/contracts/ProjectSubmission.json")]
    pub artifact: String,

    /// Contract address; skips the artifact lookup
    #[arg(long)]
    pub contract_address: Option<String>,

    /// Sender account for transactions
    #[arg(long)]
    pub from: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the contract owner
    Owner,
    /// Print the owner's withdrawable balance (wei)
    OwnerBalance,
    /// Print the first account exposed by the node
    Account,
    /// Read a university's state
    University {
        #[arg(value_parser = address_arg)]
        account: Address,
    },
    /// Register a university (owner only)
    RegisterUniversity {
        #[arg(value_parser = address_arg)]
        account: Address,
    },
    /// Disable a university (owner only)
    DisableUniversity {
        #[arg(value_parser = address_arg)]
        account: Address,
    },
    /// Submit a project, paying the submission fee in ether
    SubmitProject {
        #[arg(value_parser = hash_arg)]
        project_hash: ProjectHash,
        #[arg(value_parser = address_arg)]
        university: Address,
        /// Amount in ether
        amount: String,
    },
    /// Review a project (owner only)
    ReviewProject {
        #[arg(value_parser = hash_arg)]
        project_hash: ProjectHash,
        /// waiting, rejected, approved or disabled
        #[arg(value_parser = status_arg)]
        status: ProjectStatus,
    },
    /// Read a project's state
    Project {
        #[arg(value_parser = hash_arg)]
        project_hash: ProjectHash,
    },
    /// Donate to an approved project
    Donate {
        #[arg(value_parser = hash_arg)]
        project_hash: ProjectHash,
        /// Amount in wei
        amount: String,
    },
    /// Withdraw the sender's university or owner balance
    Withdraw,
    /// Withdraw a project author's balance
    AuthorWithdraw {
        #[arg(value_parser = hash_arg)]
        project_hash: ProjectHash,
    },
}

impl CliConfig {
    /// 載入 TOML 設定 (若有指定)，並以命令列參數覆蓋
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig {
                network: NetworkConfig {
                    rpc_url: DEFAULT_RPC_URL.to_string(),
                    request_timeout_seconds: None,
                },
                contract: ContractConfig {
                    artifact: Some(self.artifact.clone()),
                    address: None,
                },
                transactions: None,
                account: None,
            },
        };

        if let Some(rpc_url) = &self.rpc_url {
            config.network.rpc_url = rpc_url.clone();
        }
        if let Some(address) = &self.contract_address {
            config.contract.address = Some(address.clone());
        }
        if config.contract.artifact.is_none() {
            config.contract.artifact = Some(self.artifact.clone());
        }
        if let Some(from) = &self.from {
            config.account = Some(AccountConfig {
                default: Some(from.clone()),
            });
        }

        config.validate()?;
        Ok(config)
    }
}
