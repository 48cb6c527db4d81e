use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// JSON-RPC 傳輸層，回傳 `result` 欄位內容
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, method: &str, params: Value) -> Result<Value>;
}

pub trait ConfigProvider: Send + Sync {
    fn rpc_url(&self) -> &str;
    fn artifact_path(&self) -> Option<&str>;
    fn contract_address(&self) -> Option<&str>;
    fn default_account(&self) -> Option<&str>;
    fn request_timeout(&self) -> Duration;
    fn receipt_poll_interval(&self) -> Duration;
    fn receipt_timeout(&self) -> Duration;
}
