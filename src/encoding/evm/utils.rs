use std::str::FromStr;

use alloy_primitives::{aliases::U24, Address, Uint, U256};
use num_bigint::BigUint;

use crate::encoding::errors::EncodingError;

/// Converts a `BigUint` into a fixed width integer, failing if it does not fit.
pub fn biguint_to_uint<const BITS: usize, const LIMBS: usize>(
    value: &BigUint,
) -> Result<Uint<BITS, LIMBS>, EncodingError> {
    Uint::<BITS, LIMBS>::try_from_be_slice(&value.to_bytes_be()).ok_or_else(|| {
        EncodingError::InvalidInput(format!("Value {} does not fit in {} bits", value, BITS))
    })
}

pub fn biguint_to_u256(value: &BigUint) -> Result<U256, EncodingError> {
    biguint_to_uint(value)
}

pub fn fee_to_u24(fee: u32) -> Result<U24, EncodingError> {
    U24::try_from(fee).map_err(|_| {
        EncodingError::InvalidInput(format!("Pool fee {} does not fit in a uint24", fee))
    })
}

/// Validates and parses a hex address.
///
/// The lowercase `0x` prefix is optional and surrounding whitespace is rejected. Addresses
/// written in mixed case must carry a valid EIP-55 checksum; all lowercase or all uppercase
/// addresses are accepted as they are.
pub fn canonicalize_address(address: &str) -> Result<Address, EncodingError> {
    let hex_part = address
        .strip_prefix("0x")
        .unwrap_or(address);
    if hex_part.len() != 40 ||
        !hex_part
            .chars()
            .all(|c| c.is_ascii_hexdigit())
    {
        return Err(EncodingError::InvalidAddress(format!("Malformed address: {:?}", address)));
    }

    let parsed = Address::from_str(hex_part)
        .map_err(|e| EncodingError::InvalidAddress(format!("{:?}: {}", address, e)))?;

    let has_lower = hex_part
        .chars()
        .any(|c| c.is_ascii_lowercase());
    let has_upper = hex_part
        .chars()
        .any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper && parsed.to_checksum(None)[2..] != *hex_part {
        return Err(EncodingError::InvalidAddress(format!(
            "Bad address checksum: {:?}",
            address
        )));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use alloy_primitives::aliases::U160;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2")]
    #[case("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2")]
    #[case("0xC02AAA39B223FE8D0A0E5C4F27EAD9083C756CC2")]
    #[case("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2")]
    fn test_canonicalize_address(#[case] input: &str) {
        let expected = Address::from_str("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2").unwrap();
        assert_eq!(canonicalize_address(input).unwrap(), expected);
    }

    #[rstest]
    #[case("0xc02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2")]
    #[case("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc")]
    #[case("0xg02aaa39b223fe8d0a0e5c4f27ead9083c756cc2")]
    #[case("0XC02AAA39B223FE8D0A0E5C4F27EAD9083C756CC2")]
    #[case("  0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2 ")]
    #[case("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2\n")]
    #[case("")]
    #[case("recipient")]
    fn test_canonicalize_address_rejects(#[case] input: &str) {
        assert!(matches!(canonicalize_address(input), Err(EncodingError::InvalidAddress(_))));
    }

    #[test]
    fn test_biguint_to_uint_bounds() {
        let max_u160 = (BigUint::from(1u32) << 160) - 1u32;
        assert_eq!(biguint_to_uint::<160, 3>(&max_u160).unwrap(), U160::MAX);
        assert!(biguint_to_uint::<160, 3>(&(max_u160 + 1u32)).is_err());
        assert_eq!(biguint_to_u256(&BigUint::ZERO).unwrap(), U256::ZERO);
        assert!(biguint_to_u256(&(BigUint::from(1u32) << 256)).is_err());
    }

    #[test]
    fn test_fee_to_u24() {
        assert_eq!(fee_to_u24(3000).unwrap(), U24::from(3000u32));
        assert!(fee_to_u24(1 << 24).is_err());
    }
}
