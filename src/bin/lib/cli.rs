pub use clap::Parser;
use swap_router_encoding::encoding::models::Chain;

#[derive(Parser)]
/// Encode swap router calls for concentrated liquidity AMMs
///
/// Reads a JSON object from stdin with the following structure:
/// ```json
/// {
///     "trades": [{
///         "trade_type": "exact_input",
///         "swaps": [{
///             "route": {
///                 "pools": [{"token0": "0x...", "token1": "0x...", "fee": 500}],
///                 "token_path": ["0x...", "0x..."]
///             },
///             "input_amount": {
///                 "currency": {"kind": "token", "address": "0x..."},
///                 "amount": "123..."
///             },
///             "output_amount": {
///                 "currency": {"kind": "native", "wrapped": "0x..."},
///                 "amount": "123..."
///             }
///         }]
///     }],
///     "options": {
///         "slippage_tolerance": {"numerator": "50", "denominator": "10000"},
///         "recipient": "0x...",
///         "deadline": 1700000000,
///         "interface_variant": "standard"
///     }
/// }
/// ```
///
/// When `options.deadline` is omitted it is set to the current time plus `--deadline-offset`.
pub struct Cli {
    /// Chain whose router addresses are used
    #[arg(short, long, default_value = "polygon", value_parser = parse_chain)]
    pub chain: Chain,

    /// Router contract address, overriding the configured one for the selected interface variant
    #[arg(short, long)]
    pub router_address: Option<String>,

    /// JSON file with the router addresses per chain and interface variant
    #[arg(long)]
    pub routers_file: Option<String>,

    /// Seconds from now until the swap expires, used when the input has no deadline
    #[arg(long, default_value_t = 1200)]
    pub deadline_offset: u64,
}

fn parse_chain(chain: &str) -> Result<Chain, String> {
    chain
        .parse()
        .map_err(|e| format!("{}", e))
}
