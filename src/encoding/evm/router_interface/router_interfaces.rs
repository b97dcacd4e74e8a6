use alloy_primitives::{Address, Bytes as AlloyBytes, U256};
use alloy_sol_types::SolCall;

use crate::encoding::{
    errors::EncodingError,
    evm::{
        router_interface::abi::{
            IAlgebraIntegralSwapRouter, IAlgebraSwapRouter, ISelfPermit, IUniswapV3SwapRouter,
        },
        utils::{biguint_to_u256, fee_to_u24},
    },
    models::{InterfaceVariant, PermitOptions, Pool},
    router_interface::{MultiHopCall, RouterInterface, SingleHopCall},
};

/// Encodes a `selfPermit` or `selfPermitAllowed` call for the given token.
fn encode_self_permit(token: Address, permit: &PermitOptions) -> Result<Vec<u8>, EncodingError> {
    let calldata = match permit {
        PermitOptions::Standard { v, r, s, amount, deadline } => ISelfPermit::selfPermitCall {
            token,
            value: biguint_to_u256(amount)?,
            deadline: biguint_to_u256(deadline)?,
            v: *v,
            r: *r,
            s: *s,
        }
        .abi_encode(),
        PermitOptions::Allowed { v, r, s, nonce, expiry } => ISelfPermit::selfPermitAllowedCall {
            token,
            nonce: biguint_to_u256(nonce)?,
            expiry: biguint_to_u256(expiry)?,
            v: *v,
            r: *r,
            s: *s,
        }
        .abi_encode(),
    };
    Ok(calldata)
}

/// Encodes calls to the Algebra swap router.
///
/// Algebra pools have a dynamic fee, so paths carry no pool descriptor and exact input swaps only
/// name the two tokens.
#[derive(Clone, Default)]
pub struct AlgebraSwapRouter;

impl RouterInterface for AlgebraSwapRouter {
    fn variant(&self) -> InterfaceVariant {
        InterfaceVariant::Standard
    }

    fn encode_pool_descriptor(&self, _pool: &Pool) -> Result<Vec<u8>, EncodingError> {
        Ok(Vec::new())
    }

    fn exact_input_single(
        &self,
        call: &SingleHopCall,
        fee_on_transfer: bool,
    ) -> Result<Vec<u8>, EncodingError> {
        let params = IAlgebraSwapRouter::ExactInputSingleParams {
            tokenIn: call.token_in,
            tokenOut: call.token_out,
            recipient: call.recipient.address(),
            deadline: call.deadline,
            amountIn: call.amount_in,
            amountOutMinimum: call.amount_out,
            limitSqrtPrice: call.sqrt_price_limit,
        };
        if fee_on_transfer {
            Ok(IAlgebraSwapRouter::exactInputSingleSupportingFeeOnTransferTokensCall { params }
                .abi_encode())
        } else {
            Ok(IAlgebraSwapRouter::exactInputSingleCall { params }.abi_encode())
        }
    }

    fn exact_output_single(&self, call: &SingleHopCall) -> Result<Vec<u8>, EncodingError> {
        let params = IAlgebraSwapRouter::ExactOutputSingleParams {
            tokenIn: call.token_in,
            tokenOut: call.token_out,
            fee: fee_to_u24(call.pool.fee)?,
            recipient: call.recipient.address(),
            deadline: call.deadline,
            amountOut: call.amount_out,
            amountInMaximum: call.amount_in,
            limitSqrtPrice: call.sqrt_price_limit,
        };
        Ok(IAlgebraSwapRouter::exactOutputSingleCall { params }.abi_encode())
    }

    fn exact_input(&self, call: &MultiHopCall) -> Vec<u8> {
        let params = IAlgebraSwapRouter::ExactInputParams {
            path: AlloyBytes::from(call.path.clone()),
            recipient: call.recipient.address(),
            deadline: call.deadline,
            amountIn: call.amount_in,
            amountOutMinimum: call.amount_out,
        };
        IAlgebraSwapRouter::exactInputCall { params }.abi_encode()
    }

    fn exact_output(&self, call: &MultiHopCall) -> Vec<u8> {
        let params = IAlgebraSwapRouter::ExactOutputParams {
            path: AlloyBytes::from(call.path.clone()),
            recipient: call.recipient.address(),
            deadline: call.deadline,
            amountOut: call.amount_out,
            amountInMaximum: call.amount_in,
        };
        IAlgebraSwapRouter::exactOutputCall { params }.abi_encode()
    }

    fn unwrap_native(&self, amount_minimum: U256, recipient: Address) -> Vec<u8> {
        IAlgebraSwapRouter::unwrapWNativeTokenCall { amountMinimum: amount_minimum, recipient }
            .abi_encode()
    }

    fn unwrap_native_with_fee(
        &self,
        amount_minimum: U256,
        recipient: Address,
        fee_bips: U256,
        fee_recipient: Address,
    ) -> Vec<u8> {
        IAlgebraSwapRouter::unwrapWNativeTokenWithFeeCall {
            amountMinimum: amount_minimum,
            recipient,
            feeBips: fee_bips,
            feeRecipient: fee_recipient,
        }
        .abi_encode()
    }

    fn sweep_token_with_fee(
        &self,
        token: Address,
        amount_minimum: U256,
        recipient: Address,
        fee_bips: U256,
        fee_recipient: Address,
    ) -> Vec<u8> {
        IAlgebraSwapRouter::sweepTokenWithFeeCall {
            token,
            amountMinimum: amount_minimum,
            recipient,
            feeBips: fee_bips,
            feeRecipient: fee_recipient,
        }
        .abi_encode()
    }

    fn refund_native(&self) -> Vec<u8> {
        IAlgebraSwapRouter::refundNativeTokenCall {}.abi_encode()
    }

    fn self_permit(
        &self,
        token: Address,
        permit: &PermitOptions,
    ) -> Result<Vec<u8>, EncodingError> {
        encode_self_permit(token, permit)
    }

    fn multicall(&self, calls: Vec<Vec<u8>>) -> Vec<u8> {
        let data = calls
            .into_iter()
            .map(AlloyBytes::from)
            .collect();
        IAlgebraSwapRouter::multicallCall { data }.abi_encode()
    }

    fn clone_box(&self) -> Box<dyn RouterInterface> {
        Box::new(self.clone())
    }
}

/// Encodes calls to the Algebra Integral swap router.
///
/// Pools are identified by their deployer, both in single hop swaps and in paths. Everything else
/// is encoded as for the Algebra router.
#[derive(Clone, Default)]
pub struct AlgebraIntegralSwapRouter {
    algebra: AlgebraSwapRouter,
}

impl RouterInterface for AlgebraIntegralSwapRouter {
    fn variant(&self) -> InterfaceVariant {
        InterfaceVariant::AlgebraV4
    }

    fn encode_pool_descriptor(&self, pool: &Pool) -> Result<Vec<u8>, EncodingError> {
        Ok(pool.deployer.as_slice().to_vec())
    }

    fn exact_input_single(
        &self,
        call: &SingleHopCall,
        fee_on_transfer: bool,
    ) -> Result<Vec<u8>, EncodingError> {
        let params = IAlgebraIntegralSwapRouter::ExactInputSingleParams {
            tokenIn: call.token_in,
            tokenOut: call.token_out,
            deployer: call.pool.deployer,
            recipient: call.recipient.address(),
            deadline: call.deadline,
            amountIn: call.amount_in,
            amountOutMinimum: call.amount_out,
            limitSqrtPrice: call.sqrt_price_limit,
        };
        if fee_on_transfer {
            Ok(
                IAlgebraIntegralSwapRouter::exactInputSingleSupportingFeeOnTransferTokensCall {
                    params,
                }
                .abi_encode(),
            )
        } else {
            Ok(IAlgebraIntegralSwapRouter::exactInputSingleCall { params }.abi_encode())
        }
    }

    fn exact_output_single(&self, call: &SingleHopCall) -> Result<Vec<u8>, EncodingError> {
        let params = IAlgebraIntegralSwapRouter::ExactOutputSingleParams {
            tokenIn: call.token_in,
            tokenOut: call.token_out,
            deployer: call.pool.deployer,
            recipient: call.recipient.address(),
            deadline: call.deadline,
            amountOut: call.amount_out,
            amountInMaximum: call.amount_in,
            limitSqrtPrice: call.sqrt_price_limit,
        };
        Ok(IAlgebraIntegralSwapRouter::exactOutputSingleCall { params }.abi_encode())
    }

    fn exact_input(&self, call: &MultiHopCall) -> Vec<u8> {
        self.algebra.exact_input(call)
    }

    fn exact_output(&self, call: &MultiHopCall) -> Vec<u8> {
        self.algebra.exact_output(call)
    }

    fn unwrap_native(&self, amount_minimum: U256, recipient: Address) -> Vec<u8> {
        self.algebra
            .unwrap_native(amount_minimum, recipient)
    }

    fn unwrap_native_with_fee(
        &self,
        amount_minimum: U256,
        recipient: Address,
        fee_bips: U256,
        fee_recipient: Address,
    ) -> Vec<u8> {
        self.algebra
            .unwrap_native_with_fee(amount_minimum, recipient, fee_bips, fee_recipient)
    }

    fn sweep_token_with_fee(
        &self,
        token: Address,
        amount_minimum: U256,
        recipient: Address,
        fee_bips: U256,
        fee_recipient: Address,
    ) -> Vec<u8> {
        self.algebra
            .sweep_token_with_fee(token, amount_minimum, recipient, fee_bips, fee_recipient)
    }

    fn refund_native(&self) -> Vec<u8> {
        self.algebra.refund_native()
    }

    fn self_permit(
        &self,
        token: Address,
        permit: &PermitOptions,
    ) -> Result<Vec<u8>, EncodingError> {
        encode_self_permit(token, permit)
    }

    fn multicall(&self, calls: Vec<Vec<u8>>) -> Vec<u8> {
        self.algebra.multicall(calls)
    }

    fn clone_box(&self) -> Box<dyn RouterInterface> {
        Box::new(self.clone())
    }
}

/// Encodes calls to the Uniswap V3 swap router and routers exposing the same ABI.
///
/// Pools are identified by their uint24 fee tier. There is no fee-on-transfer entrypoint.
#[derive(Clone, Default)]
pub struct UniswapV3SwapRouter;

impl RouterInterface for UniswapV3SwapRouter {
    fn variant(&self) -> InterfaceVariant {
        InterfaceVariant::ExternalV3Compatible
    }

    fn encode_pool_descriptor(&self, pool: &Pool) -> Result<Vec<u8>, EncodingError> {
        let fee = fee_to_u24(pool.fee)?;
        Ok(fee.to_be_bytes_vec())
    }

    fn exact_input_single(
        &self,
        call: &SingleHopCall,
        _fee_on_transfer: bool,
    ) -> Result<Vec<u8>, EncodingError> {
        let params = IUniswapV3SwapRouter::ExactInputSingleParams {
            tokenIn: call.token_in,
            tokenOut: call.token_out,
            fee: fee_to_u24(call.pool.fee)?,
            recipient: call.recipient.address(),
            deadline: call.deadline,
            amountIn: call.amount_in,
            amountOutMinimum: call.amount_out,
            sqrtPriceLimitX96: call.sqrt_price_limit,
        };
        Ok(IUniswapV3SwapRouter::exactInputSingleCall { params }.abi_encode())
    }

    fn exact_output_single(&self, call: &SingleHopCall) -> Result<Vec<u8>, EncodingError> {
        let params = IUniswapV3SwapRouter::ExactOutputSingleParams {
            tokenIn: call.token_in,
            tokenOut: call.token_out,
            fee: fee_to_u24(call.pool.fee)?,
            recipient: call.recipient.address(),
            deadline: call.deadline,
            amountOut: call.amount_out,
            amountInMaximum: call.amount_in,
            sqrtPriceLimitX96: call.sqrt_price_limit,
        };
        Ok(IUniswapV3SwapRouter::exactOutputSingleCall { params }.abi_encode())
    }

    fn exact_input(&self, call: &MultiHopCall) -> Vec<u8> {
        let params = IUniswapV3SwapRouter::ExactInputParams {
            path: AlloyBytes::from(call.path.clone()),
            recipient: call.recipient.address(),
            deadline: call.deadline,
            amountIn: call.amount_in,
            amountOutMinimum: call.amount_out,
        };
        IUniswapV3SwapRouter::exactInputCall { params }.abi_encode()
    }

    fn exact_output(&self, call: &MultiHopCall) -> Vec<u8> {
        let params = IUniswapV3SwapRouter::ExactOutputParams {
            path: AlloyBytes::from(call.path.clone()),
            recipient: call.recipient.address(),
            deadline: call.deadline,
            amountOut: call.amount_out,
            amountInMaximum: call.amount_in,
        };
        IUniswapV3SwapRouter::exactOutputCall { params }.abi_encode()
    }

    fn unwrap_native(&self, amount_minimum: U256, recipient: Address) -> Vec<u8> {
        IUniswapV3SwapRouter::unwrapWETH9Call { amountMinimum: amount_minimum, recipient }
            .abi_encode()
    }

    fn unwrap_native_with_fee(
        &self,
        amount_minimum: U256,
        recipient: Address,
        fee_bips: U256,
        fee_recipient: Address,
    ) -> Vec<u8> {
        IUniswapV3SwapRouter::unwrapWETH9WithFeeCall {
            amountMinimum: amount_minimum,
            recipient,
            feeBips: fee_bips,
            feeRecipient: fee_recipient,
        }
        .abi_encode()
    }

    fn sweep_token_with_fee(
        &self,
        token: Address,
        amount_minimum: U256,
        recipient: Address,
        fee_bips: U256,
        fee_recipient: Address,
    ) -> Vec<u8> {
        IUniswapV3SwapRouter::sweepTokenWithFeeCall {
            token,
            amountMinimum: amount_minimum,
            recipient,
            feeBips: fee_bips,
            feeRecipient: fee_recipient,
        }
        .abi_encode()
    }

    fn refund_native(&self) -> Vec<u8> {
        IUniswapV3SwapRouter::refundETHCall {}.abi_encode()
    }

    fn self_permit(
        &self,
        token: Address,
        permit: &PermitOptions,
    ) -> Result<Vec<u8>, EncodingError> {
        encode_self_permit(token, permit)
    }

    fn multicall(&self, calls: Vec<Vec<u8>>) -> Vec<u8> {
        let data = calls
            .into_iter()
            .map(AlloyBytes::from)
            .collect();
        IUniswapV3SwapRouter::multicallCall { data }.abi_encode()
    }

    fn clone_box(&self) -> Box<dyn RouterInterface> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use alloy_primitives::{aliases::U160, B256};
    use hex::encode;
    use num_bigint::BigUint;

    use super::*;
    use crate::encoding::models::{RecipientTarget, Route};

    fn weth() -> Address {
        Address::from_str("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2").unwrap()
    }

    fn dai() -> Address {
        Address::from_str("0x6b175474e89094c44da98b954eedeac495271d0f").unwrap()
    }

    fn usdc() -> Address {
        Address::from_str("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48").unwrap()
    }

    fn receiver() -> Address {
        Address::from_str("0x1d96f2f6bef1202e4ce1ff6dad0c2cb002861d3e").unwrap()
    }

    fn deployer() -> Address {
        Address::from_str("0x0000000000000000000000000000000000000123").unwrap()
    }

    fn three_token_route() -> Route {
        Route::new(
            vec![
                Pool::new(weth(), dai(), 500).with_deployer(deployer()),
                Pool::new(dai(), usdc(), 100),
            ],
            vec![weth(), dai(), usdc()],
        )
    }

    fn single_hop_call(pool: &Pool, recipient: RecipientTarget) -> SingleHopCall {
        SingleHopCall {
            token_in: weth(),
            token_out: dai(),
            pool,
            recipient,
            deadline: U256::from(1_700_000_000u64),
            amount_in: U256::from(1_000u64),
            amount_out: U256::from(990u64),
            sqrt_price_limit: U160::ZERO,
        }
    }

    #[test]
    fn test_encode_path_uniswap_v3() {
        let path = UniswapV3SwapRouter
            .encode_path(&three_token_route(), false)
            .unwrap();
        assert_eq!(
            encode(path),
            String::from(concat!(
                // weth
                "c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
                // fee 500
                "0001f4",
                // dai
                "6b175474e89094c44da98b954eedeac495271d0f",
                // fee 100
                "000064",
                // usdc
                "a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
            ))
        );
    }

    #[test]
    fn test_encode_path_uniswap_v3_exact_output() {
        let path = UniswapV3SwapRouter
            .encode_path(&three_token_route(), true)
            .unwrap();
        assert_eq!(
            encode(path),
            String::from(concat!(
                // usdc
                "a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
                // fee 100
                "000064",
                // dai
                "6b175474e89094c44da98b954eedeac495271d0f",
                // fee 500
                "0001f4",
                // weth
                "c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
            ))
        );
    }

    #[test]
    fn test_encode_path_algebra() {
        let path = AlgebraSwapRouter
            .encode_path(&three_token_route(), false)
            .unwrap();
        assert_eq!(
            encode(path),
            String::from(concat!(
                "c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
                "6b175474e89094c44da98b954eedeac495271d0f",
                "a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
            ))
        );
    }

    #[test]
    fn test_encode_path_algebra_integral() {
        let path = AlgebraIntegralSwapRouter::default()
            .encode_path(&three_token_route(), false)
            .unwrap();
        assert_eq!(
            encode(path),
            String::from(concat!(
                // weth
                "c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
                // deployer
                "0000000000000000000000000000000000000123",
                // dai
                "6b175474e89094c44da98b954eedeac495271d0f",
                // base pool deployer
                "0000000000000000000000000000000000000000",
                // usdc
                "a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
            ))
        );
    }

    #[test]
    fn test_encode_path_rejects_oversized_fee() {
        let route = Route::new(vec![Pool::new(weth(), dai(), 1 << 24)], vec![weth(), dai()]);
        assert!(UniswapV3SwapRouter
            .encode_path(&route, false)
            .is_err());
    }

    #[test]
    fn test_uniswap_v3_exact_input_single_selector() {
        let pool = Pool::new(weth(), dai(), 3000);
        let calldata = UniswapV3SwapRouter
            .exact_input_single(&single_hop_call(&pool, RecipientTarget::Direct(receiver())), true)
            .unwrap();
        // exactInputSingle((address,address,uint24,address,uint256,uint256,uint256,uint160))
        assert_eq!(encode(&calldata[..4]), "414bf389");

        let decoded = IUniswapV3SwapRouter::exactInputSingleCall::abi_decode(&calldata, true)
            .unwrap()
            .params;
        assert_eq!(decoded.fee, fee_to_u24(3000).unwrap());
        assert_eq!(decoded.recipient, receiver());
        assert_eq!(decoded.amountIn, U256::from(1_000u64));
        assert_eq!(decoded.amountOutMinimum, U256::from(990u64));
    }

    #[test]
    fn test_uniswap_v3_payment_selectors() {
        let router = UniswapV3SwapRouter;
        assert_eq!(encode(router.refund_native()), "12210e8a");
        assert_eq!(encode(&router.unwrap_native(U256::from(1u64), receiver())[..4]), "49404b7c");
        assert_eq!(encode(&router.multicall(vec![router.refund_native()])[..4]), "ac9650d8");
    }

    #[test]
    fn test_algebra_exact_input_single_fee_on_transfer() {
        let pool = Pool::new(weth(), dai(), 3000);
        let call = single_hop_call(&pool, RecipientTarget::RouterCustody);

        let regular = AlgebraSwapRouter
            .exact_input_single(&call, false)
            .unwrap();
        assert_eq!(regular[..4], IAlgebraSwapRouter::exactInputSingleCall::SELECTOR);
        let decoded = IAlgebraSwapRouter::exactInputSingleCall::abi_decode(&regular, true)
            .unwrap()
            .params;
        assert_eq!(decoded.recipient, Address::ZERO);

        let fee_on_transfer = AlgebraSwapRouter
            .exact_input_single(&call, true)
            .unwrap();
        assert_eq!(
            fee_on_transfer[..4],
            IAlgebraSwapRouter::exactInputSingleSupportingFeeOnTransferTokensCall::SELECTOR
        );
        // Same parameters, different entrypoint
        assert_eq!(regular[4..], fee_on_transfer[4..]);
    }

    #[test]
    fn test_algebra_exact_output_single_carries_fee() {
        let pool = Pool::new(weth(), dai(), 500);
        let calldata = AlgebraSwapRouter
            .exact_output_single(&single_hop_call(&pool, RecipientTarget::Direct(receiver())))
            .unwrap();
        let decoded = IAlgebraSwapRouter::exactOutputSingleCall::abi_decode(&calldata, true)
            .unwrap()
            .params;
        assert_eq!(decoded.fee, fee_to_u24(500).unwrap());
        assert_eq!(decoded.amountOut, U256::from(990u64));
        assert_eq!(decoded.amountInMaximum, U256::from(1_000u64));
    }

    #[test]
    fn test_algebra_integral_single_hop_carries_deployer() {
        let pool = Pool::new(weth(), dai(), 0).with_deployer(deployer());
        let router = AlgebraIntegralSwapRouter::default();
        let call = single_hop_call(&pool, RecipientTarget::Direct(receiver()));

        let exact_in = router
            .exact_input_single(&call, false)
            .unwrap();
        let decoded = IAlgebraIntegralSwapRouter::exactInputSingleCall::abi_decode(&exact_in, true)
            .unwrap()
            .params;
        assert_eq!(decoded.deployer, deployer());

        let exact_out = router
            .exact_output_single(&call)
            .unwrap();
        let decoded =
            IAlgebraIntegralSwapRouter::exactOutputSingleCall::abi_decode(&exact_out, true)
                .unwrap()
                .params;
        assert_eq!(decoded.deployer, deployer());
        assert_eq!(decoded.amountInMaximum, U256::from(1_000u64));
    }

    #[test]
    fn test_algebra_integral_shares_payment_entrypoints() {
        let integral = AlgebraIntegralSwapRouter::default();
        let algebra = AlgebraSwapRouter;
        assert_eq!(integral.refund_native(), algebra.refund_native());
        assert_eq!(
            integral.unwrap_native(U256::from(5u64), receiver()),
            algebra.unwrap_native(U256::from(5u64), receiver())
        );
    }

    #[test]
    fn test_self_permit() {
        let standard = PermitOptions::Standard {
            v: 27,
            r: B256::repeat_byte(0x11),
            s: B256::repeat_byte(0x22),
            amount: BigUint::from(1_000u32),
            deadline: BigUint::from(1_700_000_000u64),
        };
        let calldata = AlgebraSwapRouter
            .self_permit(weth(), &standard)
            .unwrap();
        let decoded = ISelfPermit::selfPermitCall::abi_decode(&calldata, true).unwrap();
        assert_eq!(decoded.token, weth());
        assert_eq!(decoded.value, U256::from(1_000u64));
        assert_eq!(decoded.v, 27);
        assert_eq!(decoded.r, B256::repeat_byte(0x11));

        let allowed = PermitOptions::Allowed {
            v: 28,
            r: B256::repeat_byte(0x33),
            s: B256::repeat_byte(0x44),
            nonce: BigUint::from(7u32),
            expiry: BigUint::from(1_700_000_000u64),
        };
        let calldata = UniswapV3SwapRouter
            .self_permit(dai(), &allowed)
            .unwrap();
        let decoded = ISelfPermit::selfPermitAllowedCall::abi_decode(&calldata, true).unwrap();
        assert_eq!(decoded.token, dai());
        assert_eq!(decoded.nonce, U256::from(7u64));
        assert_eq!(decoded.s, B256::repeat_byte(0x44));
    }
}
