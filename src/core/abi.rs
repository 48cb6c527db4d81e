//! 合約用到的 Solidity ABI 靜態型別編解碼
//!
//! 所有參數與回傳值都是靜態型別，每個值各佔一個 32 bytes 的 word

use crate::domain::model::{Address, Bytes, H256, U256};
use crate::utils::error::{ClientError, Result};
use sha3::{Digest, Keccak256};

const WORD: usize = 32;

/// `Error(string)` 的函式選擇器
const ERROR_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Address(Address),
    FixedBytes(H256),
    Uint(U256),
    Bool(bool),
}

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// 函式簽章 (例如 `"submitProject(bytes32,address)"`) keccak 雜湊的前 4 bytes
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

fn encode_token(token: &Token) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    match token {
        Token::Address(address) => word[12..].copy_from_slice(address.as_bytes()),
        Token::FixedBytes(hash) => word.copy_from_slice(hash.as_bytes()),
        Token::Uint(value) => value.to_big_endian(&mut word),
        Token::Bool(flag) => word[WORD - 1] = u8::from(*flag),
    }
    word
}

pub fn encode_call(signature: &str, tokens: &[Token]) -> Bytes {
    let mut data = Vec::with_capacity(4 + tokens.len() * WORD);
    data.extend_from_slice(&selector(signature));
    for token in tokens {
        data.extend_from_slice(&encode_token(token));
    }
    Bytes(data)
}

/// 依序讀取 ABI 編碼的回傳資料
pub struct Decoder<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn next_word(&mut self) -> Result<&'a [u8]> {
        let end = self.offset + WORD;
        if end > self.data.len() {
            return Err(ClientError::AbiError {
                message: format!(
                    "return data too short: need {} bytes, got {}",
                    end,
                    self.data.len()
                ),
            });
        }
        let word = &self.data[self.offset..end];
        self.offset = end;
        Ok(word)
    }

    pub fn uint(&mut self) -> Result<U256> {
        Ok(U256::from_big_endian(self.next_word()?))
    }

    pub fn address(&mut self) -> Result<Address> {
        let word = self.next_word()?;
        if word[..12].iter().any(|b| *b != 0) {
            return Err(ClientError::AbiError {
                message: "address word has non-zero padding".to_string(),
            });
        }
        Ok(Address::from_slice(&word[12..]))
    }

    pub fn bool(&mut self) -> Result<bool> {
        match self.uint()? {
            v if v.is_zero() => Ok(false),
            v if v == U256::one() => Ok(true),
            v => Err(ClientError::AbiError {
                message: format!("invalid bool value {}", v),
            }),
        }
    }

    pub fn uint8(&mut self) -> Result<u8> {
        let value = self.uint()?;
        if value > U256::from(u8::MAX) {
            return Err(ClientError::AbiError {
                message: format!("value {} does not fit in uint8", value),
            });
        }
        Ok(value.low_u32() as u8)
    }
}

/// 解出 `require`/`revert` 附帶的錯誤訊息
pub fn decode_revert_reason(data: &[u8]) -> Option<String> {
    if data.len() < 4 + 2 * WORD || data[..4] != ERROR_SELECTOR {
        return None;
    }

    // selector(4) + offset(32) 之後是字串長度
    let len_start = 4 + WORD;
    let len = U256::from_big_endian(&data[len_start..len_start + WORD]);
    if len > U256::from(data.len()) {
        return None;
    }
    let len = len.as_usize();

    let start = len_start + WORD;
    let bytes = data.get(start..start + len)?;
    String::from_utf8(bytes.to_vec()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_selectors() {
        assert_eq!(selector("owner()"), [0x8d, 0xa5, 0xcb, 0x5b]);
        assert_eq!(selector("withdraw()"), [0x3c, 0xcf, 0xd6, 0x0b]);
        assert_eq!(selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
        assert_eq!(selector("Error(string)"), ERROR_SELECTOR);
    }

    #[test]
    fn test_overloads_get_distinct_selectors() {
        assert_ne!(selector("withdraw()"), selector("withdraw(bytes32)"));
    }

    #[test]
    fn test_encode_call_pads_arguments() {
        let university = Address::repeat_byte(0xaa);
        let data = encode_call(
            "reviewProject(bytes32,uint256)",
            &[
                Token::FixedBytes(H256::repeat_byte(0x01)),
                Token::Uint(U256::from(2u64)),
            ],
        );
        assert_eq!(data.len(), 4 + 64);
        assert_eq!(&data.as_slice()[4..36], &[0x01; 32]);
        assert_eq!(data.as_slice()[67], 2);

        let data = encode_call("registerUniversity(address)", &[Token::Address(university)]);
        assert_eq!(&data.as_slice()[4..16], &[0u8; 12]);
        assert_eq!(&data.as_slice()[16..36], university.as_bytes());
    }

    #[test]
    fn test_decoder_reads_struct_words() {
        let mut data = vec![0u8; 64];
        data[31] = 7;
        data[63] = 1;
        let mut decoder = Decoder::new(&data);
        assert_eq!(decoder.uint().unwrap(), U256::from(7u64));
        assert!(decoder.bool().unwrap());
        assert!(decoder.uint().is_err());
    }

    #[test]
    fn test_decoder_rejects_dirty_address_and_bool() {
        let data = [0xffu8; 32];
        assert!(Decoder::new(&data).address().is_err());
        assert!(Decoder::new(&data).bool().is_err());
        assert!(Decoder::new(&data).uint8().is_err());
    }

    #[test]
    fn test_decode_revert_reason() {
        let reason = b"Only owner";
        let mut data = ERROR_SELECTOR.to_vec();
        let mut word = [0u8; 32];
        word[31] = 0x20;
        data.extend_from_slice(&word);
        let mut word = [0u8; 32];
        word[31] = reason.len() as u8;
        data.extend_from_slice(&word);
        let mut padded = reason.to_vec();
        padded.resize(32, 0);
        data.extend_from_slice(&padded);

        assert_eq!(decode_revert_reason(&data).as_deref(), Some("Only owner"));
        assert_eq!(decode_revert_reason(&data[..40]), None);
        assert_eq!(decode_revert_reason(&[0u8; 100]), None);
    }
}
