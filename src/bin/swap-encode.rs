use std::{
    io::{self, Read},
    str::FromStr,
};

use alloy_primitives::Address;
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use swap_router_encoding::encoding::{
    evm::encoder_builders::SwapRouterEncoderBuilder,
    models::{SwapOptions, Trade},
    swap_call_encoder::SwapCallEncoder,
};
use tracing::info;

mod lib {
    pub mod cli;
    pub mod logging;
}

use lib::cli::{Cli, Parser};

#[derive(Deserialize)]
struct EncodeRequest {
    trades: Vec<Trade>,
    options: Value,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    lib::logging::init_logging();

    // Read from stdin until EOF
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| format!("Failed to read from stdin: {}", e))?;

    if buffer.trim().is_empty() {
        return Err("No input provided. Expected JSON input on stdin.".into());
    }

    let encoded = encode_swap(&buffer, &cli)?;

    // Output the encoded result as JSON to stdout
    println!(
        "{}",
        serde_json::to_string(&encoded)
            .map_err(|e| format!("Failed to serialize output: {}", e))?
    );

    Ok(())
}

fn encode_swap(input: &str, cli: &Cli) -> Result<Value, Box<dyn std::error::Error>> {
    let request: EncodeRequest = serde_json::from_str(input)?;
    let options = parse_options(request.options, cli.deadline_offset)?;

    let mut builder = SwapRouterEncoderBuilder::new().chain(cli.chain);
    if let Some(path) = &cli.routers_file {
        builder = builder.routers_file_path(path.clone());
    }
    if let Some(address) = &cli.router_address {
        builder = builder.router_address(options.interface_variant, Address::from_str(address)?);
    }
    let encoder = builder.build()?;

    let transaction = encoder.encode_transaction(&request.trades, &options)?;
    info!(chain = %cli.chain, to = %transaction.to, "Encoded swap transaction");

    Ok(serde_json::json!({
        "to": format!("{}", transaction.to),
        "value": format!("0x{}", transaction.value.to_str_radix(16)),
        "data": format!("0x{}", hex::encode(&transaction.data)),
    }))
}

/// Parses the swap options, filling in the deadline when the caller left it out.
fn parse_options(
    mut options: Value,
    deadline_offset: u64,
) -> Result<SwapOptions, Box<dyn std::error::Error>> {
    if let Some(fields) = options.as_object_mut() {
        if !fields.contains_key("deadline") {
            let now = Utc::now().timestamp().max(0) as u64;
            let deadline = now
                .checked_add(deadline_offset)
                .ok_or_else(|| format!("Deadline offset {} is too large", deadline_offset))?;
            fields.insert("deadline".to_string(), Value::from(deadline));
        }
    }
    Ok(serde_json::from_value(options)?)
}

#[cfg(test)]
mod tests {
    use alloy_sol_types::SolCall;
    use serde_json::json;
    use swap_router_encoding::encoding::evm::router_interface::abi::IAlgebraSwapRouter;

    use super::*;

    const RECIPIENT: &str = "0x1d96f2f6bef1202e4ce1ff6dad0c2cb002861d3e";

    fn options_json(deadline: Option<u64>) -> Value {
        let mut options = json!({
            "slippage_tolerance": {"numerator": "1", "denominator": "100"},
            "recipient": RECIPIENT,
        });
        if let Some(deadline) = deadline {
            options["deadline"] = Value::from(deadline);
        }
        options
    }

    /// 100 wei of MATIC for exactly 50 USDC units on polygon.
    fn request_json(deadline: Option<u64>) -> String {
        json!({
            "trades": [{
                "trade_type": "exact_output",
                "swaps": [{
                    "route": {
                        "pools": [{
                            "token0": "0x0d500b1d8e8ef31e21c99d1db9a6444d3adf1270",
                            "token1": "0x3c499c542cef5e3811e1192ce70d8cc03d5c3359",
                            "fee": 500
                        }],
                        "token_path": [
                            "0x0d500b1d8e8ef31e21c99d1db9a6444d3adf1270",
                            "0x3c499c542cef5e3811e1192ce70d8cc03d5c3359"
                        ]
                    },
                    "input_amount": {
                        "currency": {
                            "kind": "native",
                            "wrapped": "0x0d500b1d8e8ef31e21c99d1db9a6444d3adf1270"
                        },
                        "amount": "100"
                    },
                    "output_amount": {
                        "currency": {
                            "kind": "token",
                            "address": "0x3c499c542cef5e3811e1192ce70d8cc03d5c3359"
                        },
                        "amount": "50"
                    }
                }]
            }],
            "options": options_json(deadline),
        })
        .to_string()
    }

    fn encoded_router(encoded: &Value) -> String {
        encoded["to"]
            .as_str()
            .unwrap()
            .to_lowercase()
    }

    fn decode_deadline(encoded: &Value) -> u64 {
        let data = hex::decode(
            encoded["data"]
                .as_str()
                .unwrap()
                .trim_start_matches("0x"),
        )
        .unwrap();
        let calls = IAlgebraSwapRouter::multicallCall::abi_decode(&data, true)
            .unwrap()
            .data;
        let swap = IAlgebraSwapRouter::exactOutputSingleCall::abi_decode(&calls[0], true)
            .unwrap()
            .params;
        swap.deadline.to::<u64>()
    }

    #[test]
    fn test_parse_options_fills_missing_deadline() {
        let before = Utc::now().timestamp() as u64;
        let options = parse_options(options_json(None), 600).unwrap();
        let after = Utc::now().timestamp() as u64;
        assert!(options.deadline >= before + 600);
        assert!(options.deadline <= after + 600);
    }

    #[test]
    fn test_parse_options_keeps_explicit_deadline() {
        let options = parse_options(options_json(Some(1_700_000_000)), 600).unwrap();
        assert_eq!(options.deadline, 1_700_000_000);
    }

    #[test]
    fn test_parse_options_rejects_overflowing_offset() {
        assert!(parse_options(options_json(None), u64::MAX).is_err());
        // Unused when the deadline is given
        assert!(parse_options(options_json(Some(1_700_000_000)), u64::MAX).is_ok());
    }

    #[test]
    fn test_encode_swap_output() {
        let cli = Cli::parse_from(["swap-encode"]);
        let encoded = encode_swap(&request_json(Some(1_700_000_000)), &cli).unwrap();

        // Algebra router on polygon
        assert_eq!(encoded_router(&encoded), "0xf5b509bb0909a69b1c207e495f687a596c168e12");
        // 100 plus 1% slippage
        assert_eq!(encoded["value"], "0x65");
        assert!(encoded["data"]
            .as_str()
            .unwrap()
            .starts_with("0xac9650d8"));
        assert_eq!(decode_deadline(&encoded), 1_700_000_000);
    }

    #[test]
    fn test_encode_swap_fills_deadline() {
        let cli = Cli::parse_from(["swap-encode", "--deadline-offset", "60"]);
        let before = Utc::now().timestamp() as u64;
        let encoded = encode_swap(&request_json(None), &cli).unwrap();
        assert!(decode_deadline(&encoded) >= before + 60);
    }

    #[test]
    fn test_encode_swap_router_address_override() {
        let cli = Cli::parse_from([
            "swap-encode",
            "--router-address",
            "0x00000000000000000000000000000000000000bb",
        ]);
        let encoded = encode_swap(&request_json(Some(1_700_000_000)), &cli).unwrap();
        assert_eq!(encoded_router(&encoded), "0x00000000000000000000000000000000000000bb");
    }

    #[test]
    fn test_encode_swap_overflowing_offset_fails() {
        let offset = u64::MAX.to_string();
        let cli = Cli::parse_from(["swap-encode", "--deadline-offset", offset.as_str()]);
        assert!(encode_swap(&request_json(None), &cli).is_err());
    }
}
