pub mod errors;
#[cfg(feature = "evm")]
pub mod evm;
pub mod models;
pub mod router_interface;
mod serde_primitives;
pub mod swap_call_encoder;
