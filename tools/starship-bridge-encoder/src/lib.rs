//! Off-chain encoding for Starship ONFT transfers.
//!
//! Everything here is pure: the bytes produced must match what the destination composer and the
//! LayerZero executors decode, so no function touches the network.

pub mod encoder;
pub mod envelope;
pub mod errors;
pub mod options;

pub use encoder::{
    address_to_bytes32, decode_compose_message, encode_compose_message, pad_address_to_32_bytes,
    parse_address, parse_hex_bytes,
};
pub use envelope::build_envelope;
pub use errors::EncodeError;
pub use options::{default_compose_options, ExecutorOptionType, ExecutorOptions};
