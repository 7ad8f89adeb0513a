use alloy_primitives::Bytes;
use starship_bridge_encoder::EncodeError;
use thiserror::Error;

use crate::{rpc::RpcError, transfer::TransferState};

pub type Result<T> = std::result::Result<T, BridgeError>;

/// Every way a quote, send or accessor call can fail. None of these are retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// No signer is connected; nothing was constructed or submitted.
    #[error("wallet unavailable")]
    WalletUnavailable,
    #[error("switch to chain {chain_id} rejected: {reason}")]
    NetworkSwitchRejected { chain_id: u64, reason: String },
    /// The wallet's active chain moved between verification and submission.
    #[error("active network changed before submission (expected {expected}, found {active:?})")]
    NetworkMismatch { expected: u64, active: Option<u64> },
    /// Transport failure on a read or write call.
    #[error("network unavailable: {0}")]
    NetworkUnavailable(String),
    /// The contract rejected the envelope (unknown destination eid, bad options, ...).
    #[error("invalid envelope: {0}")]
    InvalidEnvelope(String),
    #[error("invalid address length: expected 20 bytes, got {0}")]
    InvalidAddressLength(usize),
    #[error("encoding failed: {0}")]
    Encoding(String),
    /// A read-only accessor reverted (eg `ownerOf` for a token that does not exist).
    #[error("call reverted (data: {0:?})")]
    CallReverted(Bytes),
    #[error("malformed return data: {0}")]
    MalformedReturn(String),
    /// The signer refused the transaction.
    #[error("transaction rejected by signer: {0}")]
    TransactionRejected(String),
    #[error("operation cancelled")]
    Cancelled,
    #[error("operation timed out")]
    TimedOut,
    #[error("`{operation}` is not allowed while the transfer is {state:?}")]
    OutOfOrder {
        state: TransferState,
        operation: &'static str,
    },
    #[error("unknown network `{0}`")]
    UnknownNetwork(String),
    #[error("config error: {0}")]
    Config(String),
}

impl BridgeError {
    /// Whether a fresh attempt (rebuilt envelope, new quote) may succeed without changing inputs.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BridgeError::WalletUnavailable
                | BridgeError::NetworkSwitchRejected { .. }
                | BridgeError::NetworkMismatch { .. }
                | BridgeError::NetworkUnavailable(_)
                | BridgeError::TransactionRejected(_)
                | BridgeError::Cancelled
                | BridgeError::TimedOut
        )
    }
}

impl From<EncodeError> for BridgeError {
    fn from(err: EncodeError) -> Self {
        match err {
            EncodeError::InvalidAddressLength(len) => BridgeError::InvalidAddressLength(len),
            other => BridgeError::Encoding(other.to_string()),
        }
    }
}

impl From<RpcError> for BridgeError {
    fn from(err: RpcError) -> Self {
        match err {
            RpcError::Transport(msg) => BridgeError::NetworkUnavailable(msg),
            RpcError::Reverted(data) => BridgeError::CallReverted(data),
            RpcError::Rejected(msg) => BridgeError::TransactionRejected(msg),
        }
    }
}

impl From<alloy_sol_types::Error> for BridgeError {
    fn from(err: alloy_sol_types::Error) -> Self {
        BridgeError::MalformedReturn(err.to_string())
    }
}
