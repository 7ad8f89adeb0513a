//! Network precondition for state-mutating calls.

use crate::{
    cancel::CallOptions,
    errors::{BridgeError, Result},
    rpc::WalletSigner,
};

/// Snapshot of the wallet's network versus the contract's, taken right before a mutating call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecutionContext {
    pub active_network_id: Option<u64>,
    pub target_network_id: u64,
    pub wallet_available: bool,
}

/// What must happen before the mutating call may be built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NetworkAction {
    Ready,
    SwitchRequired { from: u64, to: u64 },
}

impl ExecutionContext {
    /// Read the wallet's active network now, under `opts`. Never cached across calls.
    pub async fn observe<W: WalletSigner + ?Sized>(
        wallet: Option<&W>,
        target_network_id: u64,
        opts: &CallOptions,
    ) -> Result<Self> {
        let active_network_id = match wallet {
            Some(w) => opts.run(async { Ok(w.current_network().await) }).await?,
            None => None,
        };
        Ok(Self {
            active_network_id,
            target_network_id,
            wallet_available: wallet.is_some(),
        })
    }

    /// Pure precondition check.
    pub fn check(&self) -> Result<NetworkAction> {
        if !self.wallet_available {
            return Err(BridgeError::WalletUnavailable);
        }
        match self.active_network_id {
            // A wallet with no connected account cannot sign.
            None => Err(BridgeError::WalletUnavailable),
            Some(active) if active == self.target_network_id => Ok(NetworkAction::Ready),
            Some(active) => Ok(NetworkAction::SwitchRequired {
                from: active,
                to: self.target_network_id,
            }),
        }
    }
}
