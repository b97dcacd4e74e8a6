use std::sync::LazyLock;

use crate::encoding::{
    errors::EncodingError,
    models::{MethodParameters, SwapOptions, Trade},
    swap_call_encoder::SwapCallEncoder,
};

mod constants;
pub mod encoder_builders;
pub mod router_interface;
pub mod swap_router_encoder;
pub mod utils;

static DEFAULT_ENCODER: LazyLock<swap_router_encoder::SwapRouterEncoder> =
    LazyLock::new(swap_router_encoder::SwapRouterEncoder::default);

/// Encodes `trades` into a single swap router call.
///
/// Uses an encoder supporting every router interface variant. The returned call data is not
/// addressed to any router; use a `SwapRouterEncoderBuilder` to get complete transactions.
pub fn build_swap_call(
    trades: &[Trade],
    options: &SwapOptions,
) -> Result<MethodParameters, EncodingError> {
    DEFAULT_ENCODER.build_swap_call(trades, options)
}
