use crate::config::artifact::Artifact;
use crate::core::app::ContractSource;
use crate::core::rpc::{HttpTransport, Web3};
use crate::domain::model::parse_address;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use std::sync::Arc;

/// 依設定建立 HTTP 連線與預設帳號
pub fn connect<C: ConfigProvider>(config: &C) -> Result<Web3> {
    let transport = HttpTransport::new(config.rpc_url(), config.request_timeout())?;
    let mut web3 = Web3::new(Arc::new(transport))
        .with_receipt_polling(config.receipt_poll_interval(), config.receipt_timeout());

    if let Some(account) = config.default_account() {
        web3.set_default_account(Some(parse_address("account.default", account)?));
    }

    tracing::debug!("Using JSON-RPC endpoint {}", config.rpc_url());
    Ok(web3)
}

/// An explicit address wins over the artifact lookup.
pub fn contract_source<C: ConfigProvider>(config: &C) -> Result<ContractSource> {
    if let Some(address) = config.contract_address() {
        return Ok(ContractSource::Address(parse_address("contract.address", address)?));
    }

    let artifact_path = config.artifact_path();
    let path = validate_required_field("contract.artifact", &artifact_path)?;
    tracing::debug!("Loading artifact from {}", path);
    Ok(ContractSource::Artifact(Artifact::from_file(path)?))
}
