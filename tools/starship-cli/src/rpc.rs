//! `ethers`-backed collaborators: a JSON-RPC reader and a local-key wallet.

use std::{collections::HashMap, sync::RwLock};

use alloy_primitives::{Address, Bytes, B256, U256};
use anyhow::{Context, Result};
use async_trait::async_trait;
use ethers::{
    middleware::SignerMiddleware,
    providers::{Http, Middleware, MiddlewareError, Provider},
    signers::{LocalWallet, Signer},
    types::{
        transaction::eip2718::TypedTransaction, Address as EthAddress, Bytes as EthBytes,
        TransactionRequest as EthTransactionRequest, U256 as EthU256,
    },
};
use starship_bridge::{
    ReadClient, RpcError, SwitchRejected, TransactionHandle, TransactionRequest, WalletSigner,
};
use tracing::debug;

/// EIP-1193 "user rejected request".
const USER_REJECTED: i64 = 4001;

pub fn connect(rpc_url: &str) -> Result<Provider<Http>> {
    Provider::<Http>::try_from(rpc_url).with_context(|| format!("invalid RPC URL {rpc_url}"))
}

fn to_eth_address(address: Address) -> EthAddress {
    EthAddress::from_slice(address.as_slice())
}

fn to_eth_u256(value: U256) -> EthU256 {
    EthU256::from_big_endian(&value.to_be_bytes::<32>())
}

/// Sort a middleware failure into revert / rejection / transport.
fn classify<E: MiddlewareError>(err: E) -> RpcError {
    if let Some(resp) = err.as_error_response() {
        if let Some(data) = resp.as_revert_data() {
            return RpcError::Reverted(Bytes::from(data.to_vec()));
        }
        if resp.message.contains("revert") {
            return RpcError::Reverted(Bytes::new());
        }
        if resp.code == USER_REJECTED {
            return RpcError::Rejected(resp.message.clone());
        }
    }
    RpcError::Transport(err.to_string())
}

pub struct EthersReader {
    provider: Provider<Http>,
}

impl EthersReader {
    pub fn new(provider: Provider<Http>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl ReadClient for EthersReader {
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, RpcError> {
        let tx: TypedTransaction = EthTransactionRequest::new()
            .to(to_eth_address(to))
            .data(EthBytes::from(data.to_vec()))
            .into();
        let out = self.provider.call(&tx, None).await.map_err(classify)?;
        Ok(Bytes::from(out.to_vec()))
    }
}

/// Local private key plus one provider per chain it may sign for.
///
/// The active chain is process-wide state: a switch is accepted only if an endpoint for the
/// requested chain is configured and actually serves that chain.
pub struct EthersWallet {
    signer: LocalWallet,
    providers: HashMap<u64, Provider<Http>>,
    active: RwLock<Option<u64>>,
}

impl EthersWallet {
    pub fn new(
        signer: LocalWallet,
        providers: HashMap<u64, Provider<Http>>,
        active: Option<u64>,
    ) -> Self {
        Self {
            signer,
            providers,
            active: RwLock::new(active),
        }
    }

    pub fn from_private_key(
        private_key: &str,
        providers: HashMap<u64, Provider<Http>>,
        active: Option<u64>,
    ) -> Result<Self> {
        let key = private_key.trim();
        let key = key.strip_prefix("0x").unwrap_or(key);
        let signer: LocalWallet = key.parse().context("invalid private key")?;
        Ok(Self::new(signer, providers, active))
    }

    pub fn address(&self) -> Address {
        Address::from_slice(self.signer.address().as_bytes())
    }
}

#[async_trait]
impl WalletSigner for EthersWallet {
    async fn current_network(&self) -> Option<u64> {
        self.active.read().map(|active| *active).unwrap_or(None)
    }

    async fn request_network_switch(&self, chain_id: u64) -> Result<(), SwitchRejected> {
        let provider = self.providers.get(&chain_id).ok_or_else(|| {
            SwitchRejected::new(format!("no RPC endpoint configured for chain {chain_id}"))
        })?;
        let served = provider.get_chainid().await.map_err(|e| {
            SwitchRejected::new(format!("chain {chain_id} endpoint unreachable: {e}"))
        })?;
        if served != EthU256::from(chain_id) {
            return Err(SwitchRejected::new(format!(
                "endpoint for chain {chain_id} serves chain {served}"
            )));
        }
        if let Ok(mut active) = self.active.write() {
            *active = Some(chain_id);
        }
        debug!(chain_id, "wallet switched network");
        Ok(())
    }

    async fn submit_transaction(
        &self,
        tx: TransactionRequest,
    ) -> Result<TransactionHandle, RpcError> {
        if tx.from != self.address() {
            return Err(RpcError::Rejected(format!(
                "loaded key is {}, cannot sign for {}",
                self.address(),
                tx.from
            )));
        }
        let provider = self
            .providers
            .get(&tx.chain_id)
            .cloned()
            .ok_or_else(|| {
                RpcError::Transport(format!(
                    "no RPC endpoint configured for chain {}",
                    tx.chain_id
                ))
            })?;

        let signer = self.signer.clone().with_chain_id(tx.chain_id);
        let client = SignerMiddleware::new(provider, signer);
        let request = EthTransactionRequest::new()
            .from(to_eth_address(tx.from))
            .to(to_eth_address(tx.to))
            .data(EthBytes::from(tx.data.to_vec()))
            .value(to_eth_u256(tx.value))
            .chain_id(tx.chain_id);

        let pending = client.send_transaction(request, None).await.map_err(classify)?;
        Ok(TransactionHandle(B256::from(pending.tx_hash().0)))
    }
}
