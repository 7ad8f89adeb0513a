//! Shared types for the Starship ONFT transfer envelope, fee quote and contract ABI.

pub mod interfaces;
pub mod intent;

pub use interfaces::{IStarshipONFT, MessagingFee, SendParam};
pub use intent::{FeeQuote, SendEnvelope, TransferIntent};
