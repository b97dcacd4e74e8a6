use std::collections::HashMap;

use alloy_primitives::{aliases::U160, Address, U256};
use num_bigint::BigUint;
use tracing::{debug, trace};

use crate::encoding::{
    errors::EncodingError,
    evm::{
        constants::{FEE_BIPS_DENOMINATOR, MAX_UINT24},
        router_interface::router_interface_registry::RouterInterfaceRegistry,
        utils::{biguint_to_u256, biguint_to_uint, canonicalize_address},
    },
    models::{
        Currency, InterfaceVariant, MethodParameters, Percent, RecipientTarget, SwapLeg,
        SwapOptions, Trade, TradeType, Transaction,
    },
    router_interface::{MultiHopCall, RouterInterface, SingleHopCall},
    swap_call_encoder::SwapCallEncoder,
};

/// Encodes trades into calls to a concentrated liquidity swap router.
///
/// # Fields
/// * `interfaces`: Registry of the supported router ABI families
/// * `router_addresses`: Router to address transactions to, per ABI family
#[derive(Clone, Default)]
pub struct SwapRouterEncoder {
    interfaces: RouterInterfaceRegistry,
    router_addresses: HashMap<InterfaceVariant, Address>,
}

/// Values shared by the encoding of every leg of a swap call.
struct LegContext<'a> {
    slippage: &'a Percent,
    recipient: RecipientTarget,
    deadline: U256,
    sqrt_price_limit: U160,
    fee_on_transfer: bool,
}

impl SwapRouterEncoder {
    pub fn new(
        interfaces: RouterInterfaceRegistry,
        router_addresses: HashMap<InterfaceVariant, Address>,
    ) -> Self {
        SwapRouterEncoder { interfaces, router_addresses }
    }

    pub fn router_address(&self, variant: InterfaceVariant) -> Option<Address> {
        self.router_addresses
            .get(&variant)
            .copied()
    }

    /// Input and output currencies of the first trade, which decide native handling for all of
    /// them.
    fn sample_currencies(trades: &[Trade]) -> Result<(Currency, Currency), EncodingError> {
        let sample_trade = trades
            .first()
            .ok_or_else(|| EncodingError::InvalidInput("No trades to encode".to_string()))?;
        match (sample_trade.input_currency(), sample_trade.output_currency()) {
            (Some(input), Some(output)) => Ok((*input, *output)),
            _ => Err(EncodingError::InvalidInput("Trade has no swaps".to_string())),
        }
    }

    fn encode_leg(
        router: &dyn RouterInterface,
        trade_type: TradeType,
        leg: &SwapLeg,
        context: &LegContext,
    ) -> Result<Vec<u8>, EncodingError> {
        let amount_in = biguint_to_u256(
            &trade_type.maximum_amount_in(context.slippage, &leg.input_amount.amount),
        )?;
        let amount_out = biguint_to_u256(
            &trade_type.minimum_amount_out(context.slippage, &leg.output_amount.amount),
        )?;
        let route = &leg.route;

        let calldata = if route.is_single_hop() {
            let call = SingleHopCall {
                token_in: route.token_path[0],
                token_out: route.token_path[1],
                pool: &route.pools[0],
                recipient: context.recipient,
                deadline: context.deadline,
                amount_in,
                amount_out,
                sqrt_price_limit: context.sqrt_price_limit,
            };
            match trade_type {
                TradeType::ExactInput => router.exact_input_single(&call, context.fee_on_transfer)?,
                TradeType::ExactOutput => router.exact_output_single(&call)?,
            }
        } else {
            let call = MultiHopCall {
                path: router.encode_path(route, trade_type == TradeType::ExactOutput)?,
                recipient: context.recipient,
                deadline: context.deadline,
                amount_in,
                amount_out,
            };
            match trade_type {
                TradeType::ExactInput => router.exact_input(&call),
                TradeType::ExactOutput => router.exact_output(&call),
            }
        };
        trace!(
            ?trade_type,
            hops = route.pools.len(),
            %amount_in,
            %amount_out,
            "Encoded swap leg"
        );
        Ok(calldata)
    }
}

impl SwapCallEncoder for SwapRouterEncoder {
    fn build_swap_call(
        &self,
        trades: &[Trade],
        options: &SwapOptions,
    ) -> Result<MethodParameters, EncodingError> {
        self.validate_trades(trades, options)?;
        let router = self
            .interfaces
            .get_interface(options.interface_variant)?;
        let recipient = canonicalize_address(&options.recipient)?;
        let slippage = &options.slippage_tolerance;

        let (input_currency, output_currency) = Self::sample_currencies(trades)?;

        let input_is_native = input_currency.is_native();
        let output_is_native = output_currency.is_native();
        // Native value sent for exact output trades may exceed what is spent
        let must_refund = input_is_native &&
            trades
                .iter()
                .any(|trade| trade.trade_type == TradeType::ExactOutput);
        // Output goes to the router first when it has to be unwrapped or charged a fee
        let router_must_custody = output_is_native || options.fee.is_some();

        let mut total_value = BigUint::ZERO;
        let mut total_amount_out = BigUint::ZERO;
        for trade in trades {
            if input_is_native {
                total_value += trade.maximum_amount_in(slippage)?.amount;
            }
            total_amount_out += trade.minimum_amount_out(slippage)?.amount;
        }

        let mut calldatas: Vec<Vec<u8>> = Vec::new();

        if let Some(permit) = &options.input_token_permit {
            let token = input_currency
                .address()
                .ok_or(EncodingError::NonTokenPermit)?;
            calldatas.push(router.self_permit(token, permit)?);
        }

        let context = LegContext {
            slippage,
            recipient: if router_must_custody {
                RecipientTarget::RouterCustody
            } else {
                RecipientTarget::Direct(recipient)
            },
            deadline: U256::from(options.deadline),
            sqrt_price_limit: match &options.sqrt_price_limit {
                Some(limit) => biguint_to_uint(limit)?,
                None => U160::ZERO,
            },
            fee_on_transfer: options.fee_on_transfer && !input_is_native,
        };
        for trade in trades {
            for leg in trade.swaps.iter() {
                calldatas.push(Self::encode_leg(router, trade.trade_type, leg, &context)?);
            }
        }

        if router_must_custody {
            let amount_minimum = biguint_to_u256(&total_amount_out)?;
            match &options.fee {
                Some(fee) => {
                    let fee_recipient = canonicalize_address(&fee.recipient)?;
                    let fee_bips = biguint_to_u256(
                        &fee.fee
                            .apply(&BigUint::from(FEE_BIPS_DENOMINATOR)),
                    )?;
                    if output_is_native {
                        calldatas.push(router.unwrap_native_with_fee(
                            amount_minimum,
                            recipient,
                            fee_bips,
                            fee_recipient,
                        ));
                    } else {
                        calldatas.push(router.sweep_token_with_fee(
                            output_currency.wrapped(),
                            amount_minimum,
                            recipient,
                            fee_bips,
                            fee_recipient,
                        ));
                    }
                }
                None => calldatas.push(router.unwrap_native(amount_minimum, recipient)),
            }
        }

        if must_refund {
            calldatas.push(router.refund_native());
        }

        debug!(
            variant = %options.interface_variant,
            trades = trades.len(),
            calls = calldatas.len(),
            input_is_native,
            output_is_native,
            router_must_custody,
            must_refund,
            value = %total_value,
            "Encoded swap call"
        );

        let calldata = if calldatas.len() == 1 {
            calldatas.remove(0)
        } else {
            router.multicall(calldatas)
        };
        Ok(MethodParameters { calldata, value: total_value })
    }

    fn encode_transaction(
        &self,
        trades: &[Trade],
        options: &SwapOptions,
    ) -> Result<Transaction, EncodingError> {
        let to = self
            .router_address(options.interface_variant)
            .ok_or_else(|| {
                EncodingError::FatalError(format!(
                    "No router address configured for {}",
                    options.interface_variant
                ))
            })?;
        let parameters = self.build_swap_call(trades, options)?;
        Ok(Transaction { to, value: parameters.value, data: parameters.calldata })
    }

    /// Raises an `EncodingError` if the trades cannot be encoded in one call.
    ///
    /// Trades are considered valid if all the following conditions are met:
    /// * There is at least one trade and every trade has at least one leg.
    /// * Every leg has the same wrapped input token and the same wrapped output token.
    /// * A permit is only given for a token input.
    /// * A price limit is only given if every leg is single hop.
    /// * Every route is well formed, connects the leg's currencies and only uses pools of the
    ///   selected router family.
    /// * Slippage and fee are at most 100%, and every amount fits its ABI type.
    /// * The recipient and fee recipient are valid addresses.
    fn validate_trades(
        &self,
        trades: &[Trade],
        options: &SwapOptions,
    ) -> Result<(), EncodingError> {
        if trades
            .iter()
            .any(|trade| trade.swaps.is_empty())
        {
            return Err(EncodingError::InvalidInput("Trade has no swaps".to_string()));
        }
        let (input_currency, output_currency) = Self::sample_currencies(trades)?;
        let token_in = input_currency.wrapped();
        let token_out = output_currency.wrapped();
        let legs = || {
            trades
                .iter()
                .flat_map(|trade| trade.swaps.iter())
        };

        if !legs().all(|leg| leg.input_amount.currency.wrapped() == token_in) {
            return Err(EncodingError::TokenInMismatch);
        }
        if !legs().all(|leg| leg.output_amount.currency.wrapped() == token_out) {
            return Err(EncodingError::TokenOutMismatch);
        }
        if options.input_token_permit.is_some() && input_currency.is_native() {
            return Err(EncodingError::NonTokenPermit);
        }
        if options.sqrt_price_limit.is_some() && !legs().all(|leg| leg.route.is_single_hop()) {
            return Err(EncodingError::MultihopPriceLimit);
        }

        for trade in trades {
            // Legs of one trade must agree on the exact currencies, not only the wrapped ones
            trade.input_amount()?;
            trade.output_amount()?;
        }
        for leg in legs() {
            biguint_to_u256(&leg.input_amount.amount)?;
            biguint_to_u256(&leg.output_amount.amount)?;
            leg.route.validate()?;
            if leg.route.input_token() != Some(&token_in) ||
                leg.route.output_token() != Some(&token_out)
            {
                return Err(EncodingError::InvalidInput(format!(
                    "Route does not go from {} to {}",
                    token_in, token_out
                )));
            }
            for pool in leg.route.pools.iter() {
                if pool.fee > MAX_UINT24 {
                    return Err(EncodingError::InvalidInput(format!(
                        "Pool fee {} does not fit in a uint24",
                        pool.fee
                    )));
                }
                if let Some(family) = pool.family {
                    if family != options.interface_variant {
                        return Err(EncodingError::InvalidInput(format!(
                            "Pool of the {} family cannot be swapped through a {} router",
                            family, options.interface_variant
                        )));
                    }
                }
            }
        }

        if options.slippage_tolerance.exceeds_one() {
            return Err(EncodingError::InvalidInput(format!(
                "Slippage tolerance {} is above 100%",
                options.slippage_tolerance
            )));
        }
        if let Some(limit) = &options.sqrt_price_limit {
            biguint_to_uint::<160, 3>(limit)?;
        }
        canonicalize_address(&options.recipient)?;
        if let Some(fee) = &options.fee {
            if fee.fee.exceeds_one() {
                return Err(EncodingError::InvalidInput(format!(
                    "Fee {} is above 100%",
                    fee.fee
                )));
            }
            canonicalize_address(&fee.recipient)?;
        }
        Ok(())
    }
}
