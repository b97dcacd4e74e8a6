pub mod abi;
mod builder;
pub mod router_interface_registry;
pub mod router_interfaces;
