use crate::encoding::{
    errors::EncodingError,
    models::{MethodParameters, SwapOptions, Trade, Transaction},
};

/// An encoder must implement this trait in order to turn trades into a router call.
pub trait SwapCallEncoder: Send + Sync {
    /// Produces the call data and native value of a router call executing all `trades`.
    ///
    /// Trades must share their wrapped input and output currencies. Nothing is encoded if any
    /// trade or option fails validation.
    fn build_swap_call(
        &self,
        trades: &[Trade],
        options: &SwapOptions,
    ) -> Result<MethodParameters, EncodingError>;

    /// Same as `build_swap_call`, addressed to the router of the selected interface variant.
    fn encode_transaction(
        &self,
        trades: &[Trade],
        options: &SwapOptions,
    ) -> Result<Transaction, EncodingError>;

    /// Raises an `EncodingError` if the trades and options cannot be encoded together.
    fn validate_trades(&self, trades: &[Trade], options: &SwapOptions) -> Result<(), EncodingError>;
}
