//! Utility functions for the HashPilot MCP server

use ethers::types::U256;
use ethers::utils::format_units;
use serde::de::DeserializeOwned;
use serde_json::{from_value, Value};
use validator::Validate;

use crate::error::ToolError;

/// Deserializes and validates tool arguments into `T`.
pub fn parse_args<T: DeserializeOwned + Validate>(args: &Value) -> Result<T, ToolError> {
    let parsed: T = from_value(args.clone())
        .map_err(|e| ToolError::invalid(format!("Invalid arguments: {}", e)))?;
    parsed
        .validate()
        .map_err(|e| ToolError::invalid(format!("Invalid arguments: {}", e)))?;
    Ok(parsed)
}

/// Formats a weibar amount as whole HBAR, e.g. `1.0` or `0.000021`.
pub fn format_hbar(amount: U256) -> Result<String, ToolError> {
    format_trimmed(amount, "ether")
}

/// Formats a weibar amount in gwei, e.g. `540.0`.
pub fn format_gwei(amount: U256) -> Result<String, ToolError> {
    format_trimmed(amount, "gwei")
}

// Trailing fractional zeros are dropped but at least one digit is kept,
// so 10^18 renders as "1.0" rather than "1.000000000000000000".
fn format_trimmed(amount: U256, units: &str) -> Result<String, ToolError> {
    let formatted = format_units(amount, units)
        .map_err(|e| ToolError::invalid(format!("Failed to format amount: {}", e)))?;
    Ok(match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                format!("{}.0", whole)
            } else {
                format!("{}.{}", whole, fraction)
            }
        }
        None => format!("{}.0", formatted),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn test_format_hbar() {
        assert_eq!(format_hbar(U256::exp10(18)).unwrap(), "1.0");
        assert_eq!(format_hbar(U256::zero()).unwrap(), "0.0");
        assert_eq!(format_hbar(U256::exp10(17) * U256::from(5)).unwrap(), "0.5");
        assert_eq!(
            format_hbar(U256::exp10(21) + U256::one()).unwrap(),
            "1000.000000000000000001"
        );
    }

    #[test]
    fn test_format_gwei() {
        assert_eq!(format_gwei(U256::from(540_000_000_000u64)).unwrap(), "540.0");
        assert_eq!(format_gwei(U256::from(1_500_000_000u64)).unwrap(), "1.5");
        assert_eq!(format_gwei(U256::from(1u64)).unwrap(), "0.000000001");
    }

    #[derive(Debug, Deserialize, Validate)]
    struct Sample {
        #[validate(length(min = 1))]
        name: String,
    }

    #[test]
    fn test_parse_args() {
        let ok: Sample = parse_args(&json!({"name": "x"})).unwrap();
        assert_eq!(ok.name, "x");

        assert!(matches!(
            parse_args::<Sample>(&json!({})),
            Err(ToolError::InvalidArguments(_))
        ));
        assert!(matches!(
            parse_args::<Sample>(&json!({"name": ""})),
            Err(ToolError::InvalidArguments(_))
        ));
        assert!(matches!(
            parse_args::<Sample>(&json!({"name": 7})),
            Err(ToolError::InvalidArguments(_))
        ));
    }
}
