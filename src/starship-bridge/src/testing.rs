//! In-memory collaborators for offline tests.
//!
//! Both mocks record every call so tests can assert on exact calldata, switch requests and the
//! number of submissions. Compiled for this crate's tests, or for dependents via the `testing`
//! feature.

use std::{
    collections::VecDeque,
    sync::{Mutex, MutexGuard},
};

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::SolValue;
use async_trait::async_trait;
use starship_bridge_types::{FeeQuote, MessagingFee};

use crate::{
    cancel::CancelHandle,
    rpc::{
        ReadClient, RpcError, SwitchRejected, TransactionHandle, TransactionRequest,
        WalletSigner,
    },
};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Scripted `eth_call` responses, consumed in order.
#[derive(Debug, Default)]
pub struct MockReadClient {
    responses: Mutex<VecDeque<Result<Bytes, RpcError>>>,
    calls: Mutex<Vec<(Address, Bytes)>>,
    hang_next: Mutex<bool>,
}

impl MockReadClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, response: Result<Bytes, RpcError>) -> &Self {
        lock(&self.responses).push_back(response);
        self
    }

    /// Queue the return data of a successful `quoteSend`.
    pub fn push_quote(&self, quote: FeeQuote) -> &Self {
        let fee: MessagingFee = quote.into();
        self.push_response(Ok(Bytes::from(fee.abi_encode())))
    }

    /// Queue the return data of a call returning a single ABI value.
    pub fn push_return<T: SolValue>(&self, value: T) -> &Self {
        self.push_response(Ok(Bytes::from(value.abi_encode())))
    }

    /// The next call is recorded but never answered.
    pub fn hang_next(&self) -> &Self {
        *lock(&self.hang_next) = true;
        self
    }

    pub fn calls(&self) -> Vec<(Address, Bytes)> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl ReadClient for MockReadClient {
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, RpcError> {
        lock(&self.calls).push((to, data));
        let hang = std::mem::take(&mut *lock(&self.hang_next));
        if hang {
            return std::future::pending().await;
        }
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Err(RpcError::Transport("no scripted response".to_string())))
    }
}

/// How the mock wallet answers a switch request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwitchPolicy {
    Accept,
    Reject,
    /// Accept, but land on this chain instead (another flow switched in between).
    LandOn(u64),
    /// Never answer; only cancellation or a timeout ends the wait.
    Hang,
}

#[derive(Debug)]
pub struct MockWallet {
    active: Mutex<Option<u64>>,
    policy: SwitchPolicy,
    submit_error: Mutex<Option<RpcError>>,
    reads_hang: Mutex<bool>,
    cancel_after_switch: Mutex<Option<CancelHandle>>,
    switch_requests: Mutex<Vec<u64>>,
    submitted: Mutex<Vec<TransactionRequest>>,
}

impl MockWallet {
    /// Wallet connected to `chain_id` (or not connected at all for `None`).
    pub fn on(chain_id: Option<u64>, policy: SwitchPolicy) -> Self {
        Self {
            active: Mutex::new(chain_id),
            policy,
            submit_error: Mutex::new(None),
            reads_hang: Mutex::new(false),
            cancel_after_switch: Mutex::new(None),
            switch_requests: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// Make the next submission fail with `err`.
    pub fn fail_next_submit(&self, err: RpcError) {
        *lock(&self.submit_error) = Some(err);
    }

    /// `current_network` stops answering.
    pub fn hang_network_reads(&self) {
        *lock(&self.reads_hang) = true;
    }

    /// Fire `handle` as the next switch completes, just before the switch call returns.
    pub fn cancel_after_switch(&self, handle: CancelHandle) {
        *lock(&self.cancel_after_switch) = Some(handle);
    }

    pub fn active(&self) -> Option<u64> {
        *lock(&self.active)
    }

    pub fn switch_requests(&self) -> Vec<u64> {
        lock(&self.switch_requests).clone()
    }

    pub fn submitted(&self) -> Vec<TransactionRequest> {
        lock(&self.submitted).clone()
    }
}

#[async_trait]
impl WalletSigner for MockWallet {
    async fn current_network(&self) -> Option<u64> {
        let hang = *lock(&self.reads_hang);
        if hang {
            return std::future::pending().await;
        }
        *lock(&self.active)
    }

    async fn request_network_switch(&self, chain_id: u64) -> Result<(), SwitchRejected> {
        lock(&self.switch_requests).push(chain_id);
        let landed = match self.policy {
            SwitchPolicy::Accept => chain_id,
            SwitchPolicy::LandOn(other) => other,
            SwitchPolicy::Reject => return Err(SwitchRejected::new("user rejected the request")),
            SwitchPolicy::Hang => return std::future::pending().await,
        };
        *lock(&self.active) = Some(landed);
        if let Some(handle) = lock(&self.cancel_after_switch).take() {
            handle.cancel();
        }
        Ok(())
    }

    async fn submit_transaction(
        &self,
        tx: TransactionRequest,
    ) -> Result<TransactionHandle, RpcError> {
        if let Some(err) = lock(&self.submit_error).take() {
            return Err(err);
        }
        let mut submitted = lock(&self.submitted);
        submitted.push(tx);
        let nonce = U256::from(submitted.len());
        Ok(TransactionHandle(B256::from(nonce.to_be_bytes::<32>())))
    }
}
