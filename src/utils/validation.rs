use crate::utils::error::{ClientError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ClientError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_extensions.contains(&extension) => Ok(()),
        Some(extension) => Err(ClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(ClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

/// 驗證 `0x` 開頭、40 個十六進位字元的地址
pub fn validate_address(field_name: &str, value: &str) -> Result<()> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Expected a 20-byte hex address".to_string(),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ClientError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("rpc_url", "http://127.0.0.1:8545").is_ok());
        assert!(validate_url("rpc_url", "https://rpc.example.com").is_ok());
        assert!(validate_url("rpc_url", "").is_err());
        assert!(validate_url("rpc_url", "invalid-url").is_err());
        assert!(validate_url("rpc_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_address() {
        assert!(validate_address("from", "0x627306090abaB3A6e1400e9345bC60c78a8BEf57").is_ok());
        assert!(validate_address("from", "627306090abab3a6e1400e9345bc60c78a8bef57").is_ok());
        assert!(validate_address("from", "0x1234").is_err());
        assert!(validate_address("from", "0xZZ7306090abab3a6e1400e9345bc60c78a8bef57").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("artifact", "build/ProjectSubmission.json", &["json"]).is_ok());
        assert!(validate_file_extension("artifact", "ProjectSubmission.sol", &["json"]).is_err());
        assert!(validate_file_extension("artifact", "ProjectSubmission", &["json"]).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("gas_limit", 3_000_000u64, 21_000, 30_000_000).is_ok());
        assert!(validate_range("gas_limit", 100u64, 21_000, 30_000_000).is_err());
    }
}
