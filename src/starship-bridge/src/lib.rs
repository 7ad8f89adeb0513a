//! Client-side orchestration for Starship ONFT cross-chain transfers.
//!
//! A transfer is a short, strictly ordered chain:
//! - build the `SendParam` envelope from a [`TransferIntent`] (pure, in `starship-bridge-encoder`)
//! - price it with `quoteSend` ([`quoter`])
//! - make sure the wallet is on the contract's chain, switching if needed ([`executor`])
//! - submit `send` with the quoted native fee as value
//!
//! [`TransferAttempt`] walks that sequence for one envelope so the quoted message is the submitted
//! one. Network I/O goes through the [`ReadClient`] and [`WalletSigner`] traits.

pub mod accessors;
pub mod binding;
pub mod cancel;
pub mod config;
pub mod context;
pub mod errors;
pub mod executor;
pub mod quoter;
pub mod rpc;
pub mod transfer;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use binding::ContractBinding;
pub use cancel::{cancel_pair, CallOptions, CancelHandle, CancelToken};
pub use config::{NetworkBook, NetworkConfig};
pub use context::{ExecutionContext, NetworkAction};
pub use errors::BridgeError;
pub use rpc::{
    ReadClient, RpcError, SwitchRejected, TransactionHandle, TransactionRequest, WalletSigner,
};
pub use transfer::{TransferAttempt, TransferState};

pub use starship_bridge_types::{FeeQuote, SendEnvelope, TransferIntent};

#[cfg(test)]
mod tests;
