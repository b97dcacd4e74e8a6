use std::{fmt, str::FromStr};

use alloy_primitives::{Address, B256};
use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::encoding::{
    errors::EncodingError,
    serde_primitives::{biguint_string, biguint_string_option},
};

/// Chains with a known router deployment in the default configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Chain {
    Ethereum,
    Polygon,
    Arbitrum,
}

impl Chain {
    pub fn name(&self) -> &'static str {
        match self {
            Chain::Ethereum => "ethereum",
            Chain::Polygon => "polygon",
            Chain::Arbitrum => "arbitrum",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Chain {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ethereum" => Ok(Chain::Ethereum),
            "polygon" => Ok(Chain::Polygon),
            "arbitrum" => Ok(Chain::Arbitrum),
            other => Err(EncodingError::InvalidInput(format!("Unsupported chain: {}", other))),
        }
    }
}

/// The router ABI family a swap call is encoded for.
///
/// * `Standard` - Algebra swap router.
/// * `AlgebraV4` - Algebra Integral swap router, pools are addressed by their deployer.
/// * `ExternalV3Compatible` - Uniswap V3 swap router and its forks, pools are addressed by fee.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceVariant {
    #[default]
    Standard,
    AlgebraV4,
    ExternalV3Compatible,
}

impl InterfaceVariant {
    pub const ALL: [InterfaceVariant; 3] = [
        InterfaceVariant::Standard,
        InterfaceVariant::AlgebraV4,
        InterfaceVariant::ExternalV3Compatible,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            InterfaceVariant::Standard => "standard",
            InterfaceVariant::AlgebraV4 => "algebra_v4",
            InterfaceVariant::ExternalV3Compatible => "external_v3_compatible",
        }
    }
}

impl fmt::Display for InterfaceVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InterfaceVariant {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InterfaceVariant::ALL
            .into_iter()
            .find(|variant| variant.name() == s.to_lowercase())
            .ok_or_else(|| EncodingError::InvalidInput(format!("Unknown interface variant: {}", s)))
    }
}

/// A native chain currency or a fungible token.
///
/// Pools never hold the native currency directly, so every currency resolves to a wrapped token
/// address used for routing and pool math.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Currency {
    Native { wrapped: Address },
    Token { address: Address },
}

impl Currency {
    pub fn native(wrapped: Address) -> Self {
        Currency::Native { wrapped }
    }

    pub fn token(address: Address) -> Self {
        Currency::Token { address }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Currency::Native { .. })
    }

    pub fn is_token(&self) -> bool {
        !self.is_native()
    }

    /// Token address of the currency, `None` for the native currency.
    pub fn address(&self) -> Option<Address> {
        match self {
            Currency::Native { .. } => None,
            Currency::Token { address } => Some(*address),
        }
    }

    pub fn wrapped(&self) -> Address {
        match self {
            Currency::Native { wrapped } => *wrapped,
            Currency::Token { address } => *address,
        }
    }
}

/// An amount of a currency, denominated in its smallest unit.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CurrencyAmount {
    pub currency: Currency,
    #[serde(with = "biguint_string")]
    pub amount: BigUint,
}

impl CurrencyAmount {
    pub fn new<T: Into<BigUint>>(currency: Currency, amount: T) -> Self {
        Self { currency, amount: amount.into() }
    }

    pub fn add(&self, other: &CurrencyAmount) -> Result<CurrencyAmount, EncodingError> {
        if self.currency != other.currency {
            return Err(EncodingError::InvalidInput(format!(
                "Cannot add amounts of different currencies: {:?} and {:?}",
                self.currency, other.currency
            )));
        }
        Ok(CurrencyAmount { currency: self.currency, amount: &self.amount + &other.amount })
    }
}

#[derive(Deserialize, Serialize)]
struct RawPercent {
    #[serde(with = "biguint_string")]
    numerator: BigUint,
    #[serde(with = "biguint_string")]
    denominator: BigUint,
}

/// A rational percentage, `numerator / denominator`. The denominator is never zero.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "RawPercent", into = "RawPercent")]
pub struct Percent {
    numerator: BigUint,
    denominator: BigUint,
}

impl TryFrom<RawPercent> for Percent {
    type Error = EncodingError;

    fn try_from(raw: RawPercent) -> Result<Self, Self::Error> {
        Percent::new(raw.numerator, raw.denominator)
    }
}

impl From<Percent> for RawPercent {
    fn from(percent: Percent) -> Self {
        RawPercent { numerator: percent.numerator, denominator: percent.denominator }
    }
}

impl Percent {
    pub fn new<N: Into<BigUint>, D: Into<BigUint>>(
        numerator: N,
        denominator: D,
    ) -> Result<Self, EncodingError> {
        let denominator = denominator.into();
        if denominator.is_zero() {
            return Err(EncodingError::InvalidInput(
                "Percent denominator cannot be zero".to_string(),
            ));
        }
        Ok(Self { numerator: numerator.into(), denominator })
    }

    /// Builds a percent out of basis points, e.g. `50` is 0.5%.
    pub fn from_bips(bips: u32) -> Self {
        Self { numerator: BigUint::from(bips), denominator: BigUint::from(10_000u32) }
    }

    /// `amount * self`, rounded down.
    pub fn apply(&self, amount: &BigUint) -> BigUint {
        amount * &self.numerator / &self.denominator
    }

    /// True when the percent is strictly above 100%.
    pub fn exceeds_one(&self) -> bool {
        self.numerator > self.denominator
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeType {
    ExactInput,
    ExactOutput,
}

impl TradeType {
    /// Largest input the trade may consume at the given slippage. Exact input trades spend exactly
    /// their input amount.
    pub fn maximum_amount_in(&self, slippage: &Percent, amount_in: &BigUint) -> BigUint {
        match self {
            TradeType::ExactInput => amount_in.clone(),
            TradeType::ExactOutput => {
                (amount_in * (&slippage.denominator + &slippage.numerator)) / &slippage.denominator
            }
        }
    }

    /// Smallest output the trade may return at the given slippage. Exact output trades return
    /// exactly their output amount.
    ///
    /// The slippage must not exceed 100%.
    pub fn minimum_amount_out(&self, slippage: &Percent, amount_out: &BigUint) -> BigUint {
        match self {
            TradeType::ExactInput => {
                let remaining = if slippage.exceeds_one() {
                    BigUint::ZERO
                } else {
                    &slippage.denominator - &slippage.numerator
                };
                (amount_out * remaining) / &slippage.denominator
            }
            TradeType::ExactOutput => amount_out.clone(),
        }
    }
}

/// A liquidity venue between two wrapped tokens.
///
/// # Fields
/// * `fee` - Fee tier (Uniswap V3) or fee descriptor of the pool, limited to uint24.
/// * `deployer` - Pool deployer for Algebra Integral pools, zero for base pools.
/// * `family` - Router family the pool belongs to, if known.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Pool {
    pub token0: Address,
    pub token1: Address,
    #[serde(default)]
    pub fee: u32,
    #[serde(default)]
    pub deployer: Address,
    #[serde(default)]
    pub family: Option<InterfaceVariant>,
}

impl Pool {
    pub fn new(token0: Address, token1: Address, fee: u32) -> Self {
        Self { token0, token1, fee, deployer: Address::ZERO, family: None }
    }

    pub fn with_deployer(mut self, deployer: Address) -> Self {
        self.deployer = deployer;
        self
    }

    pub fn with_family(mut self, family: InterfaceVariant) -> Self {
        self.family = Some(family);
        self
    }

    pub fn involves_token(&self, token: &Address) -> bool {
        self.token0 == *token || self.token1 == *token
    }
}

/// An ordered list of pools and the wrapped tokens they connect.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Route {
    pub pools: Vec<Pool>,
    pub token_path: Vec<Address>,
}

impl Route {
    pub fn new(pools: Vec<Pool>, token_path: Vec<Address>) -> Self {
        Self { pools, token_path }
    }

    pub fn is_single_hop(&self) -> bool {
        self.pools.len() == 1
    }

    pub fn input_token(&self) -> Option<&Address> {
        self.token_path.first()
    }

    pub fn output_token(&self) -> Option<&Address> {
        self.token_path.last()
    }

    /// Checks the path is well formed: one more token than pools, and every pool connecting the
    /// tokens on either side of it.
    pub fn validate(&self) -> Result<(), EncodingError> {
        if self.pools.is_empty() {
            return Err(EncodingError::InvalidInput("Route has no pools".to_string()));
        }
        if self.token_path.len() != self.pools.len() + 1 {
            return Err(EncodingError::InvalidInput(format!(
                "Route token path has {} tokens for {} pools",
                self.token_path.len(),
                self.pools.len()
            )));
        }
        for (i, pool) in self.pools.iter().enumerate() {
            let (token_in, token_out) = (&self.token_path[i], &self.token_path[i + 1]);
            if !pool.involves_token(token_in) || !pool.involves_token(token_out) {
                return Err(EncodingError::InvalidInput(format!(
                    "Pool {} does not connect {} and {}",
                    i, token_in, token_out
                )));
            }
        }
        Ok(())
    }
}

/// One concrete traversal of a route with its expected amounts at the current price.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SwapLeg {
    pub route: Route,
    pub input_amount: CurrencyAmount,
    pub output_amount: CurrencyAmount,
}

impl SwapLeg {
    pub fn new(route: Route, input_amount: CurrencyAmount, output_amount: CurrencyAmount) -> Self {
        Self { route, input_amount, output_amount }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Trade {
    pub trade_type: TradeType,
    /// Legs of the trade, executed in order.
    pub swaps: Vec<SwapLeg>,
}

impl Trade {
    pub fn new(trade_type: TradeType, swaps: Vec<SwapLeg>) -> Self {
        Self { trade_type, swaps }
    }

    pub fn input_currency(&self) -> Option<&Currency> {
        self.swaps
            .first()
            .map(|swap| &swap.input_amount.currency)
    }

    pub fn output_currency(&self) -> Option<&Currency> {
        self.swaps
            .first()
            .map(|swap| &swap.output_amount.currency)
    }

    /// Sum of the input amounts of all legs.
    pub fn input_amount(&self) -> Result<CurrencyAmount, EncodingError> {
        Self::sum(self.swaps.iter().map(|swap| &swap.input_amount))
    }

    /// Sum of the output amounts of all legs.
    pub fn output_amount(&self) -> Result<CurrencyAmount, EncodingError> {
        Self::sum(self.swaps.iter().map(|swap| &swap.output_amount))
    }

    pub fn maximum_amount_in(&self, slippage: &Percent) -> Result<CurrencyAmount, EncodingError> {
        let input = self.input_amount()?;
        let amount = self
            .trade_type
            .maximum_amount_in(slippage, &input.amount);
        Ok(CurrencyAmount { currency: input.currency, amount })
    }

    pub fn minimum_amount_out(&self, slippage: &Percent) -> Result<CurrencyAmount, EncodingError> {
        let output = self.output_amount()?;
        let amount = self
            .trade_type
            .minimum_amount_out(slippage, &output.amount);
        Ok(CurrencyAmount { currency: output.currency, amount })
    }

    fn sum<'a>(
        mut amounts: impl Iterator<Item = &'a CurrencyAmount>,
    ) -> Result<CurrencyAmount, EncodingError> {
        let first = amounts
            .next()
            .ok_or_else(|| EncodingError::InvalidInput("Trade has no swaps".to_string()))?;
        amounts.try_fold(first.clone(), |total, amount| total.add(amount))
    }
}

/// Protocol fee taken out of the output of a swap.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct FeeOptions {
    /// The percent of the output that will be taken as a fee.
    pub fee: Percent,
    /// The recipient of the fee.
    pub recipient: String,
}

/// An off-chain signed approval for the input token, redeemed by the router before swapping.
///
/// `Standard` is an EIP-2612 permit, `Allowed` is the DAI-style permit with a nonce and expiry.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PermitOptions {
    Standard {
        v: u8,
        r: B256,
        s: B256,
        #[serde(with = "biguint_string")]
        amount: BigUint,
        #[serde(with = "biguint_string")]
        deadline: BigUint,
    },
    Allowed {
        v: u8,
        r: B256,
        s: B256,
        #[serde(with = "biguint_string")]
        nonce: BigUint,
        #[serde(with = "biguint_string")]
        expiry: BigUint,
    },
}

/// Options for producing the arguments of a router call.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SwapOptions {
    /// How much the execution price is allowed to move unfavorably from the trade execution price.
    pub slippage_tolerance: Percent,
    /// The account that should receive the output.
    pub recipient: String,
    /// When the transaction expires, in epoch seconds.
    pub deadline: u64,
    /// Use the entrypoints that tolerate deflationary input tokens.
    #[serde(default)]
    pub fee_on_transfer: bool,
    #[serde(default)]
    pub input_token_permit: Option<PermitOptions>,
    /// Price limit of the pool, only valid for single hop routes.
    #[serde(default, with = "biguint_string_option")]
    pub sqrt_price_limit: Option<BigUint>,
    #[serde(default)]
    pub fee: Option<FeeOptions>,
    #[serde(default)]
    pub interface_variant: InterfaceVariant,
}

impl SwapOptions {
    pub fn new(slippage_tolerance: Percent, recipient: &str, deadline: u64) -> Self {
        Self {
            slippage_tolerance,
            recipient: recipient.to_string(),
            deadline,
            fee_on_transfer: false,
            input_token_permit: None,
            sqrt_price_limit: None,
            fee: None,
            interface_variant: InterfaceVariant::default(),
        }
    }
}

/// Who receives the output of a pool swap.
///
/// `RouterCustody` keeps the funds at the router so a later call can unwrap them or take a fee.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecipientTarget {
    Direct(Address),
    RouterCustody,
}

impl RecipientTarget {
    /// The address passed to the router. The router treats the zero address as itself.
    pub fn address(&self) -> Address {
        match self {
            RecipientTarget::Direct(address) => *address,
            RecipientTarget::RouterCustody => Address::ZERO,
        }
    }
}

/// Call data and native value to send to the router.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MethodParameters {
    #[serde(serialize_with = "serialize_hex")]
    pub calldata: Vec<u8>,
    #[serde(with = "biguint_string")]
    pub value: BigUint,
}

impl MethodParameters {
    pub fn calldata_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.calldata))
    }

    pub fn value_hex(&self) -> String {
        format!("0x{}", self.value.to_str_radix(16))
    }
}

fn serialize_hex<S>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&format!("0x{}", hex::encode(value)))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    // Address of the router to call with the calldata
    pub to: Address,
    // Native value to be sent with the transaction.
    pub value: BigUint,
    // Encoded calldata for the transaction.
    pub data: Vec<u8>,
}
