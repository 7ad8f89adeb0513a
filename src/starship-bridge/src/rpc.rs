//! Collaborator seams: the read RPC endpoint and the wallet/signer.
//!
//! Both are implemented by the CLI over `ethers`, and by the `testing` mocks for offline tests.

use std::{fmt, sync::Arc};

use alloy_primitives::{Address, Bytes, B256, U256};
use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by a collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RpcError {
    /// Endpoint unreachable, timed out at the transport, or returned garbage.
    #[error("transport error: {0}")]
    Transport(String),
    /// The call executed and reverted.
    #[error("execution reverted (data: {0:?})")]
    Reverted(Bytes),
    /// The signer declined (user rejection, missing key for `from`).
    #[error("rejected: {0}")]
    Rejected(String),
}

/// Why a wallet did not move to the requested chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct SwitchRejected {
    pub reason: String,
}

impl SwitchRejected {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A state-mutating call, ready for signing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionRequest {
    pub to: Address,
    /// Account whose key signs the transaction.
    pub from: Address,
    pub data: Bytes,
    pub value: U256,
    pub chain_id: u64,
}

/// Hash of a submitted (not necessarily mined) transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransactionHandle(pub B256);

impl fmt::Display for TransactionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only contract calls (`eth_call`).
#[async_trait]
pub trait ReadClient: Send + Sync {
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, RpcError>;
}

/// Wallet holding the signer and the process-wide active network.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// Chain the wallet would sign for right now; `None` when no account is connected.
    async fn current_network(&self) -> Option<u64>;

    /// Ask the wallet to move to `chain_id`. Resolves once the switch is done or refused.
    async fn request_network_switch(&self, chain_id: u64) -> Result<(), SwitchRejected>;

    /// Sign and broadcast. Does not wait for inclusion.
    async fn submit_transaction(
        &self,
        tx: TransactionRequest,
    ) -> Result<TransactionHandle, RpcError>;
}

#[async_trait]
impl<T: ReadClient + ?Sized> ReadClient for Arc<T> {
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, RpcError> {
        (**self).call(to, data).await
    }
}

#[async_trait]
impl<T: WalletSigner + ?Sized> WalletSigner for Arc<T> {
    async fn current_network(&self) -> Option<u64> {
        (**self).current_network().await
    }

    async fn request_network_switch(&self, chain_id: u64) -> Result<(), SwitchRejected> {
        (**self).request_network_switch(chain_id).await
    }

    async fn submit_transaction(
        &self,
        tx: TransactionRequest,
    ) -> Result<TransactionHandle, RpcError> {
        (**self).submit_transaction(tx).await
    }
}
