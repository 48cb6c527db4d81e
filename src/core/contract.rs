//! 已部署 `ProjectSubmission` 合約的型別化綁定

use crate::config::artifact::Artifact;
use crate::core::abi::{self, Decoder, Token};
use crate::core::rpc::Web3;
use crate::domain::model::{
    Address, Bytes, Project, ProjectHash, ProjectStatus, TransactionOutcome, TransactionRequest,
    University, U256,
};
use crate::utils::error::{ClientError, Result};
use serde_json::Value;

/// 每筆交易的 `{from, gas, value}` 選項
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TxOptions {
    pub from: Option<Address>,
    pub gas: Option<u64>,
    pub value: Option<U256>,
}

#[derive(Clone)]
pub struct ProjectSubmission {
    address: Address,
    web3: Web3,
}

impl ProjectSubmission {
    pub fn at(address: Address, web3: Web3) -> Self {
        Self { address, web3 }
    }

    /// 從 Truffle artifact 找出目前網路上的部署地址
    pub fn deployed(web3: Web3, artifact: &Artifact, network_id: &str) -> Result<Self> {
        let address = artifact.deployed_address(network_id)?;
        tracing::debug!(
            "{} deployed at {:?} on network {}",
            artifact.contract_name,
            address,
            network_id
        );
        Ok(Self::at(address, web3))
    }

    pub fn address(&self) -> Address {
        self.address
    }

    async fn call(&self, signature: &str, tokens: &[Token]) -> Result<Bytes> {
        let request = TransactionRequest {
            to: self.address,
            data: abi::encode_call(signature, tokens),
            ..Default::default()
        };
        self.web3.call(&request).await.map_err(with_revert_reason)
    }

    async fn send(
        &self,
        signature: &str,
        tokens: &[Token],
        options: TxOptions,
    ) -> Result<TransactionOutcome> {
        let request = TransactionRequest {
            from: options.from,
            to: self.address,
            gas: options.gas.map(U256::from),
            value: options.value,
            data: abi::encode_call(signature, tokens),
        };

        let tx = self
            .web3
            .send_transaction(&request)
            .await
            .map_err(with_revert_reason)?;
        tracing::debug!("{} submitted as {:?}", signature, tx);

        let receipt = self.web3.wait_for_receipt(tx).await?;
        if !receipt.succeeded() {
            return Err(ClientError::TransactionReverted {
                tx_hash: format!("{:?}", tx),
            });
        }

        let logs = receipt.logs.clone();
        Ok(TransactionOutcome { tx, receipt, logs })
    }

    pub async fn owner(&self) -> Result<Address> {
        let data = self.call("owner()", &[]).await?;
        Decoder::new(data.as_slice()).address()
    }

    pub async fn owner_balance(&self) -> Result<U256> {
        let data = self.call("ownerBalance()", &[]).await?;
        Decoder::new(data.as_slice()).uint()
    }

    pub async fn universities(&self, account: Address) -> Result<University> {
        let data = self
            .call("universities(address)", &[Token::Address(account)])
            .await?;
        let mut decoder = Decoder::new(data.as_slice());
        Ok(University {
            balance: decoder.uint()?,
            available: decoder.bool()?,
        })
    }

    pub async fn register_university(
        &self,
        account: Address,
        options: TxOptions,
    ) -> Result<TransactionOutcome> {
        self.send("registerUniversity(address)", &[Token::Address(account)], options)
            .await
    }

    pub async fn disable_university(
        &self,
        account: Address,
        options: TxOptions,
    ) -> Result<TransactionOutcome> {
        self.send("disableUniversity(address)", &[Token::Address(account)], options)
            .await
    }

    pub async fn submit_project(
        &self,
        project_hash: ProjectHash,
        university: Address,
        options: TxOptions,
    ) -> Result<TransactionOutcome> {
        self.send(
            "submitProject(bytes32,address)",
            &[Token::FixedBytes(project_hash), Token::Address(university)],
            options,
        )
        .await
    }

    pub async fn review_project(
        &self,
        project_hash: ProjectHash,
        status: ProjectStatus,
        options: TxOptions,
    ) -> Result<TransactionOutcome> {
        self.send(
            "reviewProject(bytes32,uint256)",
            &[
                Token::FixedBytes(project_hash),
                Token::Uint(U256::from(status.as_u8())),
            ],
            options,
        )
        .await
    }

    pub async fn projects(&self, project_hash: ProjectHash) -> Result<Project> {
        let data = self
            .call("projects(bytes32)", &[Token::FixedBytes(project_hash)])
            .await?;
        let mut decoder = Decoder::new(data.as_slice());
        Ok(Project {
            author: decoder.address()?,
            university: decoder.address()?,
            status: ProjectStatus::try_from(decoder.uint8()?)?,
            balance: decoder.uint()?,
        })
    }

    pub async fn donate(
        &self,
        project_hash: ProjectHash,
        options: TxOptions,
    ) -> Result<TransactionOutcome> {
        self.send("donate(bytes32)", &[Token::FixedBytes(project_hash)], options)
            .await
    }

    /// `withdraw()`：提領大學或擁有者餘額
    pub async fn withdraw(&self, options: TxOptions) -> Result<TransactionOutcome> {
        self.send("withdraw()", &[], options).await
    }

    /// `withdraw(bytes32)`：提領專案作者餘額
    pub async fn withdraw_project(
        &self,
        project_hash: ProjectHash,
        options: TxOptions,
    ) -> Result<TransactionOutcome> {
        self.send("withdraw(bytes32)", &[Token::FixedBytes(project_hash)], options)
            .await
    }
}

/// 節點錯誤若帶有 `Error(string)` 資料，把原因附加到訊息
fn with_revert_reason(err: ClientError) -> ClientError {
    match err {
        ClientError::RpcError {
            code,
            message,
            data: Some(data),
        } => {
            let reason = revert_data(&data)
                .and_then(|hex_data| hex::decode(hex_data.trim_start_matches("0x")).ok())
                .and_then(|bytes| abi::decode_revert_reason(&bytes));
            let message = match reason {
                Some(reason) if !message.contains(&reason) => {
                    format!("{} (revert reason: {})", message, reason)
                }
                _ => message,
            };
            ClientError::RpcError {
                code,
                message,
                data: Some(data),
            }
        }
        other => other,
    }
}

// Geth 直接放 hex 字串；Ganache 放在 `data` 或 `result` 欄位
fn revert_data(data: &Value) -> Option<&str> {
    match data {
        Value::String(s) => Some(s.as_str()),
        Value::Object(map) => map
            .get("data")
            .or_else(|| map.get("result"))
            .and_then(Value::as_str),
        _ => None,
    }
}
