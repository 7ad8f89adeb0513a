//! Contract binding: one deployed ONFT on one chain, plus the clients that reach it.

use alloy_primitives::{Address, U256};
use starship_bridge_types::{FeeQuote, SendEnvelope, TransferIntent};

use crate::{
    accessors,
    cancel::CallOptions,
    config::NetworkConfig,
    errors::Result,
    executor, quoter,
    rpc::{ReadClient, TransactionHandle, WalletSigner},
    transfer::TransferAttempt,
};

/// Immutable binding of a network key to (contract, chain, endpoint, reader, wallet).
///
/// Built once and passed by reference to the quote/send/accessor functions; it holds no mutable
/// state of its own. The wallet is optional so read-only callers need no signer.
#[derive(Debug)]
pub struct ContractBinding<R, W> {
    network: String,
    address: Address,
    chain_id: u64,
    endpoint_id: u32,
    reader: R,
    wallet: Option<W>,
}

impl<R, W> ContractBinding<R, W> {
    pub fn new(
        network: impl Into<String>,
        config: &NetworkConfig,
        reader: R,
        wallet: Option<W>,
    ) -> Self {
        Self {
            network: network.into(),
            address: config.contract_address,
            chain_id: config.chain_id,
            endpoint_id: config.endpoint_id,
            reader,
            wallet,
        }
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// EVM chain id the contract lives on; mutating calls must be signed for it.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// LayerZero endpoint id of this network.
    pub fn endpoint_id(&self) -> u32 {
        self.endpoint_id
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn wallet(&self) -> Option<&W> {
        self.wallet.as_ref()
    }
}

impl<R: ReadClient, W: WalletSigner> ContractBinding<R, W> {
    pub async fn balance_of(&self, owner: Address, opts: &CallOptions) -> Result<U256> {
        accessors::balance_of(self, owner, opts).await
    }

    pub async fn owner_of(&self, token_id: U256, opts: &CallOptions) -> Result<Address> {
        accessors::owner_of(self, token_id, opts).await
    }

    pub async fn token_uri(&self, token_id: U256, opts: &CallOptions) -> Result<String> {
        accessors::token_uri(self, token_id, opts).await
    }

    pub async fn quote(
        &self,
        envelope: &SendEnvelope,
        pay_in_alternate_token: bool,
        opts: &CallOptions,
    ) -> Result<FeeQuote> {
        quoter::quote_send(self, envelope, pay_in_alternate_token, opts).await
    }

    pub async fn send(
        &self,
        envelope: &SendEnvelope,
        fee: &FeeQuote,
        refund_address: Address,
        composer_address: Address,
        opts: &CallOptions,
    ) -> Result<TransactionHandle> {
        executor::send(self, envelope, fee, refund_address, composer_address, opts).await
    }

    pub async fn mint(
        &self,
        to: Address,
        amount: U256,
        opts: &CallOptions,
    ) -> Result<TransactionHandle> {
        executor::mint(self, to, amount, opts).await
    }

    /// Start a transfer attempt whose envelope is fixed from here on.
    pub fn prepare_transfer(&self, intent: TransferIntent) -> TransferAttempt {
        TransferAttempt::new(intent)
    }
}
