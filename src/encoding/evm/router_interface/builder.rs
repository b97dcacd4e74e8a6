use crate::encoding::{
    evm::router_interface::router_interfaces::{
        AlgebraIntegralSwapRouter, AlgebraSwapRouter, UniswapV3SwapRouter,
    },
    models::InterfaceVariant,
    router_interface::RouterInterface,
};

/// Builds the `RouterInterface` of the given router family.
pub struct RouterInterfaceBuilder {
    variant: InterfaceVariant,
}

impl RouterInterfaceBuilder {
    pub fn new(variant: InterfaceVariant) -> Self {
        RouterInterfaceBuilder { variant }
    }

    pub fn build(self) -> Box<dyn RouterInterface> {
        match self.variant {
            InterfaceVariant::Standard => Box::new(AlgebraSwapRouter),
            InterfaceVariant::AlgebraV4 => Box::new(AlgebraIntegralSwapRouter::default()),
            InterfaceVariant::ExternalV3Compatible => Box::new(UniswapV3SwapRouter),
        }
    }
}
