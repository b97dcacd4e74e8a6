use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::Num;
use serde::{self, Deserialize, Deserializer, Serializer};

fn serialize_biguint<S>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_string())
}

/// Parses a decimal string, or a `0x`-prefixed hex string as produced by most quoting services.
pub(crate) fn parse_biguint(value: &str) -> Result<BigUint, String> {
    let value = value.trim();
    let parsed = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some("") => Ok(BigUint::ZERO),
        Some(hex) => BigUint::from_str_radix(hex, 16),
        None => BigUint::from_str(value),
    };
    parsed.map_err(|e| format!("Invalid unsigned integer {:?}: {}", value, e))
}

fn deserialize_biguint<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_biguint(&s).map_err(serde::de::Error::custom)
}

pub mod biguint_string {
    use super::*;

    pub fn serialize<S>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_biguint(value, serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_biguint(deserializer)
    }
}

pub mod biguint_string_option {
    use super::*;

    pub fn serialize<S>(value: &Option<BigUint>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serialize_biguint(v, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<BigUint>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|s| parse_biguint(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("1000", 1000u64)]
    #[case("0x3e8", 1000u64)]
    #[case("0X3E8", 1000u64)]
    #[case("0x", 0u64)]
    #[case(" 42 ", 42u64)]
    fn test_parse_biguint(#[case] input: &str, #[case] expected: u64) {
        assert_eq!(parse_biguint(input).unwrap(), BigUint::from(expected));
    }

    #[test]
    fn test_parse_biguint_rejects_garbage() {
        assert!(parse_biguint("12ab").is_err());
        assert!(parse_biguint("0xzz").is_err());
        assert!(parse_biguint("-1").is_err());
    }
}
