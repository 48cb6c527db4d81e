//! `ProjectSubmission` 合約的轉接層
//!
//! 每個方法以固定 gas 上限與預設帳戶轉送給合約綁定；
//! 失敗時記錄錯誤並回傳 `None`，不向呼叫端拋出

use crate::config::artifact::Artifact;
use crate::core::contract::{ProjectSubmission, TxOptions};
use crate::core::rpc::Web3;
use crate::domain::model::{
    Address, Project, ProjectHash, ProjectStatus, TransactionOutcome, University, U256,
};
use crate::utils::error::{ClientError, Result};
use crate::utils::units::{to_wei, Unit};
use std::fmt::Display;

/// 每筆交易帶的 gas 上限
pub const GAS_AMOUNT: u64 = 3_000_000;

/// `init` 取得合約地址的來源
#[derive(Debug, Clone)]
pub enum ContractSource {
    Artifact(Artifact),
    Address(Address),
}

pub struct App {
    pub web3: Option<Web3>,
    pub network_id: Option<String>,
    pub contract: Option<ProjectSubmission>,
    pub account: Option<Address>,
    pub contract_owner: Option<Address>,
    default_account: Option<Address>,
    source: ContractSource,
}

fn swallow<T>(operation: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::error!("❌ {} failed: {}", operation, e);
            None
        }
    }
}

impl App {
    pub fn new(source: ContractSource) -> Self {
        Self {
            web3: None,
            network_id: None,
            contract: None,
            account: None,
            contract_owner: None,
            default_account: None,
            source,
        }
    }

    /// 設定 web3、網路 ID 與合約；重複呼叫會覆寫先前的狀態
    pub async fn init(&mut self, mut web3: Web3) -> Option<()> {
        // init 之前設定的帳戶優先於 web3 本身的預設值
        if self.default_account.is_some() {
            web3.set_default_account(self.default_account);
        }
        self.web3 = Some(web3.clone());
        let result = self.try_init(web3).await;
        swallow("init", result)
    }

    async fn try_init(&mut self, web3: Web3) -> Result<()> {
        let network_id = web3.net_version().await?;
        self.network_id = Some(network_id.clone());
        let contract = match &self.source {
            ContractSource::Artifact(artifact) => {
                ProjectSubmission::deployed(web3, artifact, &network_id)?
            }
            ContractSource::Address(address) => ProjectSubmission::at(*address, web3),
        };
        tracing::info!(
            "🔗 Connected to network {} (contract {:?})",
            network_id,
            contract.address()
        );
        self.contract = Some(contract);
        Ok(())
    }

    /// 之後交易的發送帳戶；`None` 由節點決定。可在 `init` 之前呼叫
    pub fn set_default_account(&mut self, account: Option<Address>) {
        self.default_account = account;
        if let Some(web3) = self.web3.as_mut() {
            web3.set_default_account(account);
        }
    }

    fn web3(&self) -> Result<&Web3> {
        self.web3.as_ref().ok_or(ClientError::NotInitialized)
    }

    fn contract(&self) -> Result<&ProjectSubmission> {
        self.contract.as_ref().ok_or(ClientError::NotInitialized)
    }

    fn tx_options(&self, value: Option<U256>) -> Result<TxOptions> {
        Ok(TxOptions {
            from: self.web3()?.default_account(),
            gas: Some(GAS_AMOUNT),
            value,
        })
    }

    pub async fn get_account(&mut self) -> Option<Address> {
        let result = async {
            let accounts = self.web3()?.accounts().await?;
            accounts.first().copied().ok_or(ClientError::NoAccounts)
        }
        .await;
        let account = swallow("get_account", result)?;
        self.account = Some(account);
        Some(account)
    }

    pub async fn read_owner_address(&mut self) -> Option<Address> {
        let result = async { self.contract()?.owner().await }.await;
        let owner = swallow("read_owner_address", result)?;
        self.contract_owner = Some(owner);
        Some(owner)
    }

    pub async fn read_owner_balance(&self) -> Option<U256> {
        let result = async { self.contract()?.owner_balance().await }.await;
        swallow("read_owner_balance", result)
    }

    pub async fn read_university_state(&self, account: Address) -> Option<University> {
        let result = async { self.contract()?.universities(account).await }.await;
        swallow("read_university_state", result)
    }

    pub async fn register_university(&self, account: Address) -> Option<TransactionOutcome> {
        let result = async {
            let options = self.tx_options(None)?;
            self.contract()?.register_university(account, options).await
        }
        .await;
        swallow("register_university", result)
    }

    pub async fn disable_university(&self, account: Address) -> Option<TransactionOutcome> {
        let result = async {
            let options = self.tx_options(None)?;
            self.contract()?.disable_university(account, options).await
        }
        .await;
        swallow("disable_university", result)
    }

    /// `amount` 單位為 ether
    pub async fn submit_project(
        &self,
        project_hash: ProjectHash,
        university: Address,
        amount: impl Display,
    ) -> Option<TransactionOutcome> {
        let result = async {
            let value = to_wei(&amount.to_string(), Unit::Ether)?;
            let options = self.tx_options(Some(value))?;
            self.contract()?
                .submit_project(project_hash, university, options)
                .await
        }
        .await;
        swallow("submit_project", result)
    }

    pub async fn review_project(
        &self,
        project_hash: ProjectHash,
        status: ProjectStatus,
    ) -> Option<TransactionOutcome> {
        let result = async {
            let options = self.tx_options(None)?;
            self.contract()?
                .review_project(project_hash, status, options)
                .await
        }
        .await;
        swallow("review_project", result)
    }

    pub async fn read_project_state(&self, project_hash: ProjectHash) -> Option<Project> {
        let result = async { self.contract()?.projects(project_hash).await }.await;
        swallow("read_project_state", result)
    }

    /// `amount` 單位為 wei
    pub async fn donate(
        &self,
        project_hash: ProjectHash,
        amount: impl Display,
    ) -> Option<TransactionOutcome> {
        let result = async {
            let value = to_wei(&amount.to_string(), Unit::Wei)?;
            let options = self.tx_options(Some(value))?;
            self.contract()?.donate(project_hash, options).await
        }
        .await;
        swallow("donate", result)
    }

    pub async fn withdraw(&self) -> Option<TransactionOutcome> {
        let result = async {
            let options = self.tx_options(None)?;
            self.contract()?.withdraw(options).await
        }
        .await;
        swallow("withdraw", result)
    }

    pub async fn author_withdraw(&self, project_hash: ProjectHash) -> Option<TransactionOutcome> {
        let result = async {
            let options = self.tx_options(None)?;
            self.contract()?.withdraw_project(project_hash, options).await
        }
        .await;
        swallow("author_withdraw", result)
    }
}
