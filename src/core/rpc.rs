use crate::domain::model::{Address, Bytes, TransactionReceipt, TransactionRequest, H256};
use crate::domain::ports::Transport;
use crate::utils::error::{ClientError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Deserialize)]
struct JsonRpcErrorObject {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcErrorObject>,
}

/// 以 HTTP POST 傳送 JSON-RPC 2.0 請求
pub struct HttpTransport {
    client: Client,
    url: String,
    next_id: AtomicU64,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            next_id: AtomicU64::new(1),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        tracing::debug!("→ {} (id {})", method, id);
        let response = self.client.post(&self.url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::InvalidResponseError {
                method: method.to_string(),
                message: format!("HTTP status {}", status),
            });
        }

        let payload: JsonRpcResponse = response.json().await?;
        if let Some(error) = payload.error {
            tracing::debug!("← {} failed: {} ({})", method, error.message, error.code);
            return Err(ClientError::RpcError {
                code: error.code,
                message: error.message,
                data: error.data,
            });
        }

        tracing::debug!("← {} ok", method);
        Ok(payload.result.unwrap_or(Value::Null))
    }
}

/// 節點呼叫的型別化封裝，並保存預設發送帳戶
#[derive(Clone)]
pub struct Web3 {
    transport: Arc<dyn Transport>,
    default_account: Option<Address>,
    receipt_poll_interval: Duration,
    receipt_timeout: Duration,
}

impl Web3 {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            default_account: None,
            receipt_poll_interval: Duration::from_millis(500),
            receipt_timeout: Duration::from_secs(120),
        }
    }

    pub fn with_receipt_polling(mut self, interval: Duration, timeout: Duration) -> Self {
        self.receipt_poll_interval = interval;
        self.receipt_timeout = timeout;
        self
    }

    pub fn default_account(&self) -> Option<Address> {
        self.default_account
    }

    pub fn set_default_account(&mut self, account: Option<Address>) {
        self.default_account = account;
    }

    async fn request<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let value = self.transport.request(method, params).await?;
        serde_json::from_value(value).map_err(|e| ClientError::InvalidResponseError {
            method: method.to_string(),
            message: e.to_string(),
        })
    }

    pub async fn net_version(&self) -> Result<String> {
        // Ganache 回傳字串，部分節點回傳數字
        let value: Value = self.request("net_version", json!([])).await?;
        match value {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(ClientError::InvalidResponseError {
                method: "net_version".to_string(),
                message: format!("unexpected value {}", other),
            }),
        }
    }

    pub async fn accounts(&self) -> Result<Vec<Address>> {
        self.request("eth_accounts", json!([])).await
    }

    pub async fn call(&self, request: &TransactionRequest) -> Result<Bytes> {
        self.request("eth_call", json!([request, "latest"])).await
    }

    pub async fn send_transaction(&self, request: &TransactionRequest) -> Result<H256> {
        self.request("eth_sendTransaction", json!([request])).await
    }

    pub async fn get_transaction_receipt(
        &self,
        tx_hash: H256,
    ) -> Result<Option<TransactionReceipt>> {
        self.request("eth_getTransactionReceipt", json!([tx_hash])).await
    }

    /// 輪詢直到交易被打包或逾時
    pub async fn wait_for_receipt(&self, tx_hash: H256) -> Result<TransactionReceipt> {
        let deadline = Instant::now() + self.receipt_timeout;
        loop {
            if let Some(receipt) = self.get_transaction_receipt(tx_hash).await? {
                return Ok(receipt);
            }
            if Instant::now() >= deadline {
                return Err(ClientError::ReceiptTimeout {
                    tx_hash: format!("{:?}", tx_hash),
                    seconds: self.receipt_timeout.as_secs(),
                });
            }
            tracing::debug!("Receipt for {:?} not available yet", tx_hash);
            tokio::time::sleep(self.receipt_poll_interval).await;
        }
    }
}
