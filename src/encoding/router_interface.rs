use alloy_primitives::{aliases::U160, Address, U256};

use crate::encoding::{
    errors::EncodingError,
    models::{InterfaceVariant, PermitOptions, Pool, RecipientTarget, Route},
};

/// Arguments of a swap through a single pool.
///
/// `amount_out` is the minimum output bound for exact input swaps and the fixed output for exact
/// output swaps; `amount_in` mirrors it.
pub struct SingleHopCall<'a> {
    pub token_in: Address,
    pub token_out: Address,
    pub pool: &'a Pool,
    pub recipient: RecipientTarget,
    pub deadline: U256,
    pub amount_in: U256,
    pub amount_out: U256,
    pub sqrt_price_limit: U160,
}

/// Arguments of a swap along an encoded multi-pool path.
pub struct MultiHopCall {
    pub path: Vec<u8>,
    pub recipient: RecipientTarget,
    pub deadline: U256,
    pub amount_in: U256,
    pub amount_out: U256,
}

/// A router ABI family. Implementors must produce the call data of every router entrypoint the
/// swap call encoder needs, so adding a router family never touches the encoding logic.
pub trait RouterInterface: Send + Sync {
    fn variant(&self) -> InterfaceVariant;

    /// Bytes placed between two tokens of an encoded path to identify the pool.
    fn encode_pool_descriptor(&self, pool: &Pool) -> Result<Vec<u8>, EncodingError>;

    /// Encodes the route as `token (descriptor token)*`.
    ///
    /// Exact output paths are encoded from the last token to the first, since the router walks
    /// them backwards.
    fn encode_path(&self, route: &Route, exact_output: bool) -> Result<Vec<u8>, EncodingError> {
        let mut tokens: Vec<&Address> = route.token_path.iter().collect();
        let mut pools: Vec<&Pool> = route.pools.iter().collect();
        if exact_output {
            tokens.reverse();
            pools.reverse();
        }
        let first = tokens
            .first()
            .ok_or_else(|| EncodingError::InvalidInput("Cannot encode an empty path".to_string()))?;

        let mut path = first.as_slice().to_vec();
        for (pool, token) in pools.iter().zip(tokens.iter().skip(1)) {
            path.extend(self.encode_pool_descriptor(pool)?);
            path.extend_from_slice(token.as_slice());
        }
        Ok(path)
    }

    /// Variants without a fee-on-transfer entrypoint ignore `fee_on_transfer`.
    fn exact_input_single(
        &self,
        call: &SingleHopCall,
        fee_on_transfer: bool,
    ) -> Result<Vec<u8>, EncodingError>;

    fn exact_output_single(&self, call: &SingleHopCall) -> Result<Vec<u8>, EncodingError>;

    fn exact_input(&self, call: &MultiHopCall) -> Vec<u8>;

    fn exact_output(&self, call: &MultiHopCall) -> Vec<u8>;

    fn unwrap_native(&self, amount_minimum: U256, recipient: Address) -> Vec<u8>;

    fn unwrap_native_with_fee(
        &self,
        amount_minimum: U256,
        recipient: Address,
        fee_bips: U256,
        fee_recipient: Address,
    ) -> Vec<u8>;

    fn sweep_token_with_fee(
        &self,
        token: Address,
        amount_minimum: U256,
        recipient: Address,
        fee_bips: U256,
        fee_recipient: Address,
    ) -> Vec<u8>;

    fn refund_native(&self) -> Vec<u8>;

    fn self_permit(&self, token: Address, permit: &PermitOptions) -> Result<Vec<u8>, EncodingError>;

    fn multicall(&self, calls: Vec<Vec<u8>>) -> Vec<u8>;

    fn clone_box(&self) -> Box<dyn RouterInterface>;
}

impl Clone for Box<dyn RouterInterface> {
    fn clone(&self) -> Box<dyn RouterInterface> {
        self.clone_box()
    }
}
