// src/blockchain/address.rs

use std::fmt;
use std::str::FromStr;

use ethers::types::{Address, U256};

use crate::error::ToolError;

/// A Hedera account identifier in `shard.realm.num` notation.
///
/// Only `num` contributes to the derived EVM address; shard and realm are
/// checked for shape and otherwise ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountId {
    pub shard: u64,
    pub realm: u64,
    pub num: U256,
}

impl AccountId {
    /// Long-zero EVM address: `num` as a big-endian 20-byte value.
    pub fn to_evm_address(&self) -> Address {
        let mut buf = [0u8; 32];
        self.num.to_big_endian(&mut buf);
        Address::from_slice(&buf[12..])
    }
}

impl FromStr for AccountId {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ToolError::MalformedIdentifier(s.to_string());

        let parts: Vec<&str> = s.split('.').collect();
        let [shard, realm, num] = parts.as_slice() else {
            return Err(malformed());
        };

        if ![shard, realm, num].iter().all(|p| is_decimal(p)) {
            return Err(malformed());
        }

        let shard = shard.parse::<u64>().map_err(|_| malformed())?;
        let realm = realm.parse::<u64>().map_err(|_| malformed())?;
        let num = U256::from_dec_str(num).map_err(|_| malformed())?;
        if num.bits() > 160 {
            return Err(malformed());
        }

        Ok(Self { shard, realm, num })
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.shard, self.realm, self.num)
    }
}

fn is_decimal(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// Renders an address as `0x` followed by 40 lowercase hex digits.
pub fn format_address(address: &Address) -> String {
    format!("0x{}", hex::encode(address.as_bytes()))
}

/// Translates `shard.realm.num` into its `0x`-prefixed EVM address.
pub fn to_chain_address(identifier: &str) -> Result<String, ToolError> {
    let account: AccountId = identifier.parse()?;
    Ok(format_address(&account.to_evm_address()))
}

/// Accepts either notation: `0x` addresses are used as given, anything
/// else is translated from `shard.realm.num`.
pub fn resolve_address(input: &str) -> Result<Address, ToolError> {
    if input.starts_with("0x") {
        Address::from_str(input)
            .map_err(|e| ToolError::invalid(format!("Invalid EVM address '{}': {}", input, e)))
    } else {
        Ok(input.parse::<AccountId>()?.to_evm_address())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_translation() {
        assert_eq!(
            to_chain_address("0.0.12345").unwrap(),
            "0x0000000000000000000000000000000000003039"
        );
        assert_eq!(
            to_chain_address("0.0.0").unwrap(),
            "0x0000000000000000000000000000000000000000"
        );
        // shard and realm do not affect the address
        assert_eq!(
            to_chain_address("1.2.255").unwrap(),
            to_chain_address("0.0.255").unwrap()
        );
    }

    #[test]
    fn test_translation_round_trips_num() {
        for num in [1u64, 2, 10, 1000, 98_765_432, u32::MAX as u64, u64::MAX] {
            let address = to_chain_address(&format!("0.0.{}", num)).unwrap();
            assert!(address.starts_with("0x"));
            assert_eq!(address.len(), 42);
            let digits = &address[2..];
            assert!(digits.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
            assert_eq!(u128::from_str_radix(digits, 16).unwrap(), num as u128);
        }
    }

    #[test]
    fn test_largest_20_byte_num_is_accepted() {
        let limit = U256::from(2).pow(U256::from(160));
        let max = limit - 1;
        let address = to_chain_address(&format!("0.0.{}", max)).unwrap();
        assert_eq!(address, format!("0x{}", "f".repeat(40)));

        assert!(matches!(
            to_chain_address(&format!("0.0.{}", limit)),
            Err(ToolError::MalformedIdentifier(_))
        ));
    }

    #[test]
    fn test_malformed_identifiers() {
        for input in ["abc", "0.0", "0.0.abc", "0.0.0.1", "", "0..5", ".0.5", "0.0.-1", "0.0.12a", "0.0. 1"] {
            match to_chain_address(input) {
                Err(ToolError::MalformedIdentifier(s)) => assert_eq!(s, input),
                other => panic!("expected MalformedIdentifier for {:?}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_display_round_trip() {
        let account: AccountId = "0.0.800".parse().unwrap();
        assert_eq!(account.to_string(), "0.0.800");
    }

    #[test]
    fn test_resolve_address_passes_0x_through() {
        let input = "0x00000000000000000000000000000000000004d2";
        let address = resolve_address(input).unwrap();
        assert_eq!(format_address(&address), input);

        let translated = resolve_address("0.0.1234").unwrap();
        assert_eq!(translated, address);

        assert!(matches!(
            resolve_address("0xnothex"),
            Err(ToolError::InvalidArguments(_))
        ));
    }
}
