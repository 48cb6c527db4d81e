use crate::utils::error::{ClientError, Result};
use primitive_types::U256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    Wei,
    Gwei,
    #[default]
    Ether,
}

impl Unit {
    pub fn decimals(self) -> usize {
        match self {
            Unit::Wei => 0,
            Unit::Gwei => 9,
            Unit::Ether => 18,
        }
    }
}

/// 將十進位金額字串轉換為 wei，例如 `to_wei("1.5", Unit::Ether)`
pub fn to_wei(amount: &str, unit: Unit) -> Result<U256> {
    let invalid = |reason: &str| ClientError::InvalidAmount {
        value: amount.to_string(),
        reason: reason.to_string(),
    };

    let amount = amount.trim();
    if amount.is_empty() {
        return Err(invalid("amount is empty"));
    }

    let (whole, fraction) = match amount.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (amount, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid("amount has no digits"));
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return Err(invalid("amount must be a non-negative decimal number"));
    }
    if fraction.len() > unit.decimals() {
        return Err(invalid("too many decimal places for unit"));
    }

    let padded = format!(
        "{}{}{}",
        whole,
        fraction,
        "0".repeat(unit.decimals() - fraction.len())
    );
    let digits = padded.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::zero());
    }

    U256::from_dec_str(digits).map_err(|_| invalid("amount overflows 256 bits"))
}
