pub const DEFAULT_ROUTERS_JSON: &str = include_str!("../../../config/router_addresses.json");

/// Protocol fees are passed to the router in basis points.
pub const FEE_BIPS_DENOMINATOR: u32 = 10_000;

/// Largest pool fee descriptor that fits the router's uint24 fee argument.
pub const MAX_UINT24: u32 = (1 << 24) - 1;
