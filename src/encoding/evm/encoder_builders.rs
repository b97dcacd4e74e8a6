use std::{collections::HashMap, fs, str::FromStr};

use alloy_primitives::Address;

use crate::encoding::{
    errors::EncodingError,
    evm::{
        constants::DEFAULT_ROUTERS_JSON,
        router_interface::router_interface_registry::RouterInterfaceRegistry,
        swap_router_encoder::SwapRouterEncoder,
    },
    models::{Chain, InterfaceVariant},
    swap_call_encoder::SwapCallEncoder,
};

/// Builder pattern for constructing a `SwapRouterEncoder` with customizable options.
///
/// Router addresses are read from the routers file of the chain and can be overridden one
/// interface variant at a time.
pub struct SwapRouterEncoderBuilder {
    chain: Option<Chain>,
    routers_file_path: Option<String>,
    router_addresses: HashMap<InterfaceVariant, Address>,
}

impl Default for SwapRouterEncoderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SwapRouterEncoderBuilder {
    pub fn new() -> Self {
        SwapRouterEncoderBuilder {
            chain: None,
            routers_file_path: None,
            router_addresses: HashMap::new(),
        }
    }

    pub fn chain(mut self, chain: Chain) -> Self {
        self.chain = Some(chain);
        self
    }

    /// Sets the `routers_file_path` manually.
    /// If it's not set, the default config will be used (config/router_addresses.json)
    pub fn routers_file_path(mut self, routers_file_path: String) -> Self {
        self.routers_file_path = Some(routers_file_path);
        self
    }

    /// Sets the router address of an interface variant, taking precedence over the routers file.
    pub fn router_address(mut self, variant: InterfaceVariant, router_address: Address) -> Self {
        self.router_addresses
            .insert(variant, router_address);
        self
    }

    /// Builds the `SwapRouterEncoder` instance using the configured chain.
    /// Returns an error if the chain has not been set or the routers file cannot be read.
    pub fn build(self) -> Result<Box<dyn SwapCallEncoder>, EncodingError> {
        if let Some(chain) = self.chain {
            let mut router_addresses =
                load_router_addresses(self.routers_file_path.as_deref(), chain)?;
            router_addresses.extend(self.router_addresses);
            Ok(Box::new(SwapRouterEncoder::new(RouterInterfaceRegistry::new(), router_addresses)))
        } else {
            Err(EncodingError::FatalError(
                "Please set the chain before building the encoder".to_string(),
            ))
        }
    }
}

/// Reads the router address of every interface variant deployed on `chain`.
///
/// A chain missing from the file has no routers, which is only an error once a transaction is
/// addressed to one of them.
fn load_router_addresses(
    routers_file_path: Option<&str>,
    chain: Chain,
) -> Result<HashMap<InterfaceVariant, Address>, EncodingError> {
    let config_str = if let Some(path) = routers_file_path {
        fs::read_to_string(path).map_err(|e| {
            EncodingError::FatalError(format!("Error reading routers file from {:?}: {}", path, e))
        })?
    } else {
        DEFAULT_ROUTERS_JSON.to_string()
    };
    let config: HashMap<String, HashMap<String, String>> = serde_json::from_str(&config_str)?;
    let Some(routers) = config.get(chain.name()) else {
        return Ok(HashMap::new());
    };

    let mut router_addresses = HashMap::new();
    for (variant, address) in routers {
        let variant = InterfaceVariant::from_str(variant)
            .map_err(|e| EncodingError::FatalError(format!("Invalid routers file: {}", e)))?;
        let address = Address::from_str(address).map_err(|e| {
            EncodingError::FatalError(format!("Invalid router address {}: {}", address, e))
        })?;
        router_addresses.insert(variant, address);
    }
    Ok(router_addresses)
}
