use crate::core::ConfigProvider;
use crate::utils::error::{ClientError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_RECEIPT_POLL_INTERVAL_MS: u64 = 500;
pub const DEFAULT_RECEIPT_TIMEOUT_SECONDS: u64 = 120;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub network: NetworkConfig,
    pub contract: ContractConfig,
    pub transactions: Option<TransactionsConfig>,
    pub account: Option<AccountConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub rpc_url: String,
    pub request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractConfig {
    pub artifact: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsConfig {
    pub receipt_poll_interval_ms: Option<u64>,
    pub receipt_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    pub default: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ClientError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ClientError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${RPC_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ClientError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        crate::utils::validation::validate_url("network.rpc_url", &self.network.rpc_url)?;

        if let Some(timeout) = self.network.request_timeout_seconds {
            crate::utils::validation::validate_range(
                "network.request_timeout_seconds",
                timeout,
                1,
                600,
            )?;
        }

        match (&self.contract.address, &self.contract.artifact) {
            (Some(address), _) => {
                crate::utils::validation::validate_address("contract.address", address)?
            }
            (None, Some(artifact)) => {
                crate::utils::validation::validate_path("contract.artifact", artifact)?;
                crate::utils::validation::validate_file_extension(
                    "contract.artifact",
                    artifact,
                    &["json"],
                )?;
            }
            (None, None) => {
                return Err(ClientError::MissingConfigError {
                    field: "contract.artifact".to_string(),
                })
            }
        }

        if let Some(transactions) = &self.transactions {
            if let Some(interval) = transactions.receipt_poll_interval_ms {
                crate::utils::validation::validate_range(
                    "transactions.receipt_poll_interval_ms",
                    interval,
                    10,
                    60_000,
                )?;
            }
            if let Some(timeout) = transactions.receipt_timeout_seconds {
                crate::utils::validation::validate_range(
                    "transactions.receipt_timeout_seconds",
                    timeout,
                    1,
                    3_600,
                )?;
            }
        }

        if let Some(account) = self.default_account() {
            crate::utils::validation::validate_address("account.default", account)?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn rpc_url(&self) -> &str {
        &self.network.rpc_url
    }

    fn artifact_path(&self) -> Option<&str> {
        self.contract.artifact.as_deref()
    }

    fn contract_address(&self) -> Option<&str> {
        self.contract.address.as_deref()
    }

    fn default_account(&self) -> Option<&str> {
        self.account.as_ref().and_then(|a| a.default.as_deref())
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.network
                .request_timeout_seconds
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECONDS),
        )
    }

    fn receipt_poll_interval(&self) -> Duration {
        Duration::from_millis(
            self.transactions
                .as_ref()
                .and_then(|t| t.receipt_poll_interval_ms)
                .unwrap_or(DEFAULT_RECEIPT_POLL_INTERVAL_MS),
        )
    }

    fn receipt_timeout(&self) -> Duration {
        Duration::from_secs(
            self.transactions
                .as_ref()
                .and_then(|t| t.receipt_timeout_seconds)
                .unwrap_or(DEFAULT_RECEIPT_TIMEOUT_SECONDS),
        )
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
