use crate::domain::model::Address;
use crate::utils::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Truffle build artifact (`build/contracts/<Name>.json`).
///
/// Only the parts needed to locate a deployment are read; the ABI is kept as
/// raw JSON because the method layout is compiled into the binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    #[serde(default)]
    pub abi: serde_json::Value,
    #[serde(default)]
    pub networks: HashMap<String, NetworkDeployment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDeployment {
    pub address: Address,
    #[serde(default)]
    pub transaction_hash: Option<String>,
}

impl Artifact {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| ClientError::ConfigValidationError {
            field: "contract.artifact".to_string(),
            message: format!("Artifact parsing error: {}", e),
        })
    }

    /// 依網路 ID 取得部署地址
    pub fn deployed_address(&self, network_id: &str) -> Result<Address> {
        self.networks
            .get(network_id)
            .map(|deployment| deployment.address)
            .ok_or_else(|| ClientError::NotDeployed {
                network_id: network_id.to_string(),
            })
    }
}
