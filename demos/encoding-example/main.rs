use std::str::FromStr;

use alloy_primitives::Address;
use swap_router_encoding::encoding::{
    evm::{build_swap_call, encoder_builders::SwapRouterEncoderBuilder},
    models::{
        Chain, Currency, CurrencyAmount, FeeOptions, InterfaceVariant, Percent, Pool, Route,
        SwapLeg, SwapOptions, Trade, TradeType,
    },
    swap_call_encoder::SwapCallEncoder,
};

fn main() {
    // Setup variables
    let wmatic = Address::from_str("0x0d500b1d8e8ef31e21c99d1db9a6444d3adf1270")
        .expect("Failed to create WMATIC address");
    let weth = Address::from_str("0x7ceb23fd6bc0add59e62ac25578270cff1b9f619")
        .expect("Failed to create WETH address");
    let usdc = Address::from_str("0x3c499c542cef5e3811e1192ce70d8cc03d5c3359")
        .expect("Failed to create USDC address");
    let user_address = "0xcd09f75e2bf2a4d11f3ab23f1389fcc1621c0cc2";
    let deadline = 1_900_000_000;

    // Initialize the encoder
    let encoder = SwapRouterEncoderBuilder::new()
        .chain(Chain::Polygon)
        .build()
        .expect("Failed to build encoder");

    // ------------------- Encode a simple swap -------------------
    // Prepare data to encode. We will swap 1 MATIC for at least the quoted USDC through the
    // WMATIC-USDC pool of the Algebra router.
    let simple_trade = Trade::new(
        TradeType::ExactInput,
        vec![SwapLeg::new(
            Route::new(vec![Pool::new(wmatic, usdc, 0)], vec![wmatic, usdc]),
            CurrencyAmount::new(Currency::native(wmatic), 1_000_000_000_000_000_000u64),
            CurrencyAmount::new(Currency::token(usdc), 520_000u64),
        )],
    );
    let options = SwapOptions::new(Percent::from_bips(50), user_address, deadline);

    let transaction = encoder
        .encode_transaction(&[simple_trade], &options)
        .expect("Failed to encode transaction");
    println!(" ====== Simple swap MATIC -> USDC ======");
    println!("To: {}", transaction.to);
    println!("Value: {}", transaction.value);
    println!("Data: 0x{}", hex::encode(&transaction.data));

    // ------------------- Encode a multi-hop swap with a fee -------------------
    // Swap 1000 USDC for exactly 0.3 WETH through WMATIC on the Uniswap V3 router, sending the
    // output to the router first so that a 0.25% fee is taken out of it.
    let multi_hop_trade = Trade::new(
        TradeType::ExactOutput,
        vec![SwapLeg::new(
            Route::new(
                vec![Pool::new(wmatic, usdc, 500), Pool::new(wmatic, weth, 3000)],
                vec![usdc, wmatic, weth],
            ),
            CurrencyAmount::new(Currency::token(usdc), 1_000_000_000u64),
            CurrencyAmount::new(Currency::token(weth), 300_000_000_000_000_000u64),
        )],
    );
    let mut options = SwapOptions::new(Percent::from_bips(100), user_address, deadline);
    options.interface_variant = InterfaceVariant::ExternalV3Compatible;
    options.fee = Some(FeeOptions {
        fee: Percent::from_bips(25),
        recipient: "0x00000000000000000000000000000000000fee00".to_string(),
    });

    let parameters =
        build_swap_call(&[multi_hop_trade], &options).expect("Failed to build swap call");
    println!(" ====== Multi-hop swap USDC -> WMATIC -> WETH with fee ======");
    println!("Value: {}", parameters.value_hex());
    println!("Calldata: {}", parameters.calldata_hex());
}
