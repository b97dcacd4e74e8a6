use std::collections::HashMap;

use crate::encoding::{
    errors::EncodingError, evm::router_interface::builder::RouterInterfaceBuilder,
    models::InterfaceVariant, router_interface::RouterInterface,
};

/// Registry containing the `RouterInterface` of every supported router family.
///
/// Built once and only read afterwards, so it can be shared freely between threads.
#[derive(Clone)]
pub struct RouterInterfaceRegistry {
    interfaces: HashMap<InterfaceVariant, Box<dyn RouterInterface>>,
}

impl Default for RouterInterfaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RouterInterfaceRegistry {
    pub fn new() -> Self {
        let interfaces = InterfaceVariant::ALL
            .into_iter()
            .map(|variant| (variant, RouterInterfaceBuilder::new(variant).build()))
            .collect();
        Self { interfaces }
    }

    pub fn get_interface(
        &self,
        variant: InterfaceVariant,
    ) -> Result<&dyn RouterInterface, EncodingError> {
        self.interfaces
            .get(&variant)
            .map(|interface| interface.as_ref())
            .ok_or_else(|| {
                EncodingError::FatalError(format!("No router interface registered for {}", variant))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_every_variant() {
        let registry = RouterInterfaceRegistry::new();
        for variant in InterfaceVariant::ALL {
            let interface = registry.get_interface(variant).unwrap();
            assert_eq!(interface.variant(), variant);
        }
    }

    #[test]
    fn test_registry_clone() {
        let registry = RouterInterfaceRegistry::new().clone();
        assert_eq!(
            registry
                .get_interface(InterfaceVariant::AlgebraV4)
                .unwrap()
                .variant(),
            InterfaceVariant::AlgebraV4
        );
    }
}
