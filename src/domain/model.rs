use crate::utils::error::{ClientError, Result};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

pub use primitive_types::{H160 as Address, H256, U256};

/// 專案雜湊 (合約中的 `bytes32`)
pub type ProjectHash = H256;

fn decode_fixed_hex(field: &str, value: &str, len: usize) -> Result<Vec<u8>> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    let invalid = |reason: String| ClientError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason,
    };
    let bytes = hex::decode(digits).map_err(|e| invalid(e.to_string()))?;
    if bytes.len() != len {
        return Err(invalid(format!("expected {} bytes, got {}", len, bytes.len())));
    }
    Ok(bytes)
}

/// 解析 `0x` 開頭的 20 bytes 地址
pub fn parse_address(field: &str, value: &str) -> Result<Address> {
    decode_fixed_hex(field, value, 20).map(|bytes| Address::from_slice(&bytes))
}

/// 解析 `0x` 開頭的 32 bytes 雜湊
pub fn parse_hash(field: &str, value: &str) -> Result<H256> {
    decode_fixed_hex(field, value, 32).map(|bytes| H256::from_slice(&bytes))
}

/// Hex-encoded byte string as used by Ethereum JSON-RPC (`"0x..."`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(v: Vec<u8>) -> Self {
        Bytes(v)
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Bytes {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{}", hex::encode(&self.0)))
    }
}

impl<'de> Deserialize<'de> for Bytes {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let s = s.strip_prefix("0x").unwrap_or(&s);
        hex::decode(s)
            .map(Bytes)
            .map_err(|_| de::Error::custom("invalid hex bytes"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    Waiting = 0,
    Rejected = 1,
    Approved = 2,
    Disabled = 3,
}

impl ProjectStatus {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for ProjectStatus {
    type Error = ClientError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(ProjectStatus::Waiting),
            1 => Ok(ProjectStatus::Rejected),
            2 => Ok(ProjectStatus::Approved),
            3 => Ok(ProjectStatus::Disabled),
            other => Err(ClientError::AbiError {
                message: format!("unknown project status {}", other),
            }),
        }
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "waiting" | "0" => Ok(ProjectStatus::Waiting),
            "rejected" | "1" => Ok(ProjectStatus::Rejected),
            "approved" | "2" => Ok(ProjectStatus::Approved),
            "disabled" | "3" => Ok(ProjectStatus::Disabled),
            _ => Err(ClientError::InvalidConfigValueError {
                field: "status".to_string(),
                value: s.to_string(),
                reason: "Expected waiting, rejected, approved or disabled".to_string(),
            }),
        }
    }
}

/// `universities(address)` 的回傳值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct University {
    pub balance: U256,
    pub available: bool,
}

/// `projects(bytes32)` 的回傳值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub author: Address,
    pub university: Address,
    pub status: ProjectStatus,
    pub balance: U256,
}

/// Call object for `eth_call` and `eth_sendTransaction`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    pub to: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    pub data: Bytes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    pub address: Address,
    #[serde(default)]
    pub topics: Vec<H256>,
    #[serde(default)]
    pub data: Bytes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: H256,
    #[serde(default)]
    pub block_hash: Option<H256>,
    #[serde(default)]
    pub block_number: Option<U256>,
    #[serde(default)]
    pub from: Option<Address>,
    #[serde(default)]
    pub to: Option<Address>,
    #[serde(default)]
    pub gas_used: Option<U256>,
    #[serde(default)]
    pub status: Option<U256>,
    #[serde(default)]
    pub logs: Vec<Log>,
}

impl TransactionReceipt {
    /// 舊節點 (pre-Byzantium) 不回傳 status，視為成功
    pub fn succeeded(&self) -> bool {
        self.status.map(|s| !s.is_zero()).unwrap_or(true)
    }
}

/// Result of a state-changing contract call: hash, mined receipt and its logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionOutcome {
    pub tx: H256,
    pub receipt: TransactionReceipt,
    pub logs: Vec<Log>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address_and_hash() {
        let address = parse_address("from", "0x627306090abaB3A6e1400e9345bC60c78a8BEf57").unwrap();
        assert_eq!(
            format!("{:?}", address),
            "0x627306090abab3a6e1400e9345bc60c78a8bef57"
        );
        assert!(parse_address("from", "0x62").is_err());
        assert!(parse_address("from", "not-hex").is_err());

        let hash = parse_hash("project_hash", &format!("0x{}", "01".repeat(32))).unwrap();
        assert_eq!(hash, H256::repeat_byte(0x01));
        assert!(parse_hash("project_hash", "0x0102").is_err());
    }

    #[test]
    fn test_bytes_serde() {
        let bytes = Bytes(vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(serde_json::to_string(&bytes).unwrap(), "\"0xdeadbeef\"");
        let parsed: Bytes = serde_json::from_str("\"0xdeadbeef\"").unwrap();
        assert_eq!(parsed, bytes);
    }

    #[test]
    fn test_transaction_request_omits_empty_fields() {
        let request = TransactionRequest {
            to: Address::repeat_byte(0x11),
            data: Bytes(vec![0x8d, 0xa5, 0xcb, 0x5b]),
            ..Default::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["to"], "0x1111111111111111111111111111111111111111");
        assert_eq!(json["data"], "0x8da5cb5b");
        assert!(json.get("from").is_none());
        assert!(json.get("gas").is_none());
    }

    #[test]
    fn test_receipt_status() {
        let receipt: TransactionReceipt = serde_json::from_value(serde_json::json!({
            "transactionHash": format!("0x{}", "ab".repeat(32)),
            "blockNumber": "0x10",
            "status": "0x0",
            "logs": []
        }))
        .unwrap();
        assert!(!receipt.succeeded());
        assert_eq!(receipt.block_number, Some(U256::from(16u64)));
    }

    #[test]
    fn test_project_status_parsing() {
        assert_eq!("approved".parse::<ProjectStatus>().unwrap(), ProjectStatus::Approved);
        assert_eq!("1".parse::<ProjectStatus>().unwrap(), ProjectStatus::Rejected);
        assert!("pending".parse::<ProjectStatus>().is_err());
        assert!(ProjectStatus::try_from(4u8).is_err());
    }
}
