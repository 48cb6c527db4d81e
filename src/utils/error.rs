use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("JSON-RPC error {code}: {message}")]
    RpcError {
        code: i64,
        message: String,
        data: Option<serde_json::Value>,
    },

    #[error("Unexpected JSON-RPC response for {method}: {message}")]
    InvalidResponseError { method: String, message: String },

    #[error("Transaction {tx_hash} reverted")]
    TransactionReverted { tx_hash: String },

    #[error("Timed out after {seconds}s waiting for receipt of {tx_hash}")]
    ReceiptTimeout { tx_hash: String, seconds: u64 },

    #[error("ABI decoding error: {message}")]
    AbiError { message: String },

    #[error("Contract not deployed on network {network_id}")]
    NotDeployed { network_id: String },

    #[error("Adapter not initialized: call init() first")]
    NotInitialized,

    #[error("No accounts available from the node")]
    NoAccounts,

    #[error("Invalid amount '{value}': {reason}")]
    InvalidAmount { value: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation error in field '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for field '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Contract,
    Configuration,
    Input,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ClientError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::HttpError(_)
            | ClientError::RpcError { .. }
            | ClientError::InvalidResponseError { .. }
            | ClientError::ReceiptTimeout { .. }
            | ClientError::NoAccounts => ErrorCategory::Network,
            ClientError::TransactionReverted { .. }
            | ClientError::AbiError { .. }
            | ClientError::NotDeployed { .. }
            | ClientError::NotInitialized => ErrorCategory::Contract,
            ClientError::ConfigError { .. }
            | ClientError::ConfigValidationError { .. }
            | ClientError::MissingConfigError { .. }
            | ClientError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ClientError::InvalidAmount { .. } => ErrorCategory::Input,
            ClientError::IoError(_) | ClientError::SerializationError(_) => {
                ErrorCategory::Internal
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 節點可能只是暫時無法連線，重試即可
            ClientError::HttpError(_) | ClientError::ReceiptTimeout { .. } => {
                ErrorSeverity::Medium
            }
            ClientError::RpcError { .. }
            | ClientError::InvalidResponseError { .. }
            | ClientError::TransactionReverted { .. }
            | ClientError::AbiError { .. }
            | ClientError::InvalidAmount { .. }
            | ClientError::NoAccounts => ErrorSeverity::High,
            ClientError::NotDeployed { .. }
            | ClientError::NotInitialized
            | ClientError::ConfigError { .. }
            | ClientError::ConfigValidationError { .. }
            | ClientError::MissingConfigError { .. }
            | ClientError::InvalidConfigValueError { .. }
            | ClientError::IoError(_)
            | ClientError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check that the Ethereum node is running and reachable at the configured RPC URL"
            }
            ErrorCategory::Contract => match self {
                ClientError::NotDeployed { .. } => {
                    "Deploy the contract (e.g. `truffle migrate`) or pass --contract-address"
                }
                ClientError::TransactionReverted { .. } => {
                    "Check the sender account and the contract state; the contract rejected the call"
                }
                _ => "Verify the artifact matches the deployed contract",
            },
            ErrorCategory::Configuration => "Review the configuration file and CLI arguments",
            ErrorCategory::Input => "Check the command arguments",
            ErrorCategory::Internal => "Re-run with --verbose and inspect the logs",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ClientError::HttpError(_) => "Could not reach the Ethereum node".to_string(),
            ClientError::RpcError { message, .. } => {
                format!("The node rejected the request: {}", message)
            }
            ClientError::TransactionReverted { tx_hash } => {
                format!("Transaction {} was reverted by the contract", tx_hash)
            }
            ClientError::NotDeployed { network_id } => {
                format!("ProjectSubmission is not deployed on network {}", network_id)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering_drives_exit_codes() {
        let timeout = ClientError::ReceiptTimeout {
            tx_hash: "0x01".to_string(),
            seconds: 5,
        };
        let reverted = ClientError::TransactionReverted {
            tx_hash: "0x01".to_string(),
        };
        assert_eq!(timeout.severity(), ErrorSeverity::Medium);
        assert_eq!(reverted.severity(), ErrorSeverity::High);
        assert!(ClientError::NotInitialized.severity() > reverted.severity());
    }

    #[test]
    fn test_categories() {
        assert_eq!(ClientError::NoAccounts.category(), ErrorCategory::Network);
        assert_eq!(
            ClientError::MissingConfigError {
                field: "network.rpc_url".to_string()
            }
            .category(),
            ErrorCategory::Configuration
        );
    }

    #[test]
    fn test_user_friendly_message_for_rpc_error() {
        let err = ClientError::RpcError {
            code: -32000,
            message: "sender account not recognized".to_string(),
            data: None,
        };
        assert_eq!(
            err.user_friendly_message(),
            "The node rejected the request: sender account not recognized"
        );
    }
}
