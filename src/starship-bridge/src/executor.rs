//! Network-guarded submission of state-mutating calls (`send`, `mint`).
//!
//! Order per call: observe the wallet network, switch if needed, encode, re-read the network,
//! submit once. A failed precondition means no transaction was built.

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use starship_bridge_types::{FeeQuote, IStarshipONFT, SendEnvelope};
use tracing::{debug, info, warn};

use crate::{
    binding::ContractBinding,
    cancel::CallOptions,
    context::{ExecutionContext, NetworkAction},
    errors::{BridgeError, Result},
    rpc::{TransactionHandle, TransactionRequest, WalletSigner},
};

/// Make sure the wallet is on the binding's chain, requesting a switch if it is not.
///
/// Returns the context as it stands after any switch.
pub async fn verify_network<R, W: WalletSigner>(
    binding: &ContractBinding<R, W>,
    opts: &CallOptions,
) -> Result<ExecutionContext> {
    opts.ensure_active()?;
    let wallet = binding.wallet();
    let ctx = ExecutionContext::observe(wallet, binding.chain_id(), opts).await?;

    let (wallet, from, to) = match (ctx.check()?, wallet) {
        (NetworkAction::Ready, _) => return Ok(ctx),
        (NetworkAction::SwitchRequired { from, to }, Some(wallet)) => (wallet, from, to),
        (NetworkAction::SwitchRequired { .. }, None) => {
            return Err(BridgeError::WalletUnavailable)
        }
    };

    info!(network = binding.network(), from, to, "requesting network switch");
    opts.run(async {
        wallet.request_network_switch(to).await.map_err(|rejected| {
            warn!(
                network = binding.network(),
                chain_id = to,
                reason = %rejected,
                "network switch rejected"
            );
            BridgeError::NetworkSwitchRejected {
                chain_id: to,
                reason: rejected.reason,
            }
        })
    })
    .await?;

    Ok(ExecutionContext {
        active_network_id: Some(to),
        ..ctx
    })
}

/// Submit `data` to the bound contract, re-reading the active network immediately before.
///
/// The re-read honors `opts`. Submission itself is not raced against cancellation: once handed
/// to the wallet the transaction is either sent or it is not.
pub async fn submit<R, W: WalletSigner>(
    binding: &ContractBinding<R, W>,
    from: Address,
    data: Vec<u8>,
    value: U256,
    opts: &CallOptions,
) -> Result<TransactionHandle> {
    let wallet = binding.wallet().ok_or(BridgeError::WalletUnavailable)?;

    let active = opts.run(async { Ok(wallet.current_network().await) }).await?;
    if active != Some(binding.chain_id()) {
        return Err(BridgeError::NetworkMismatch {
            expected: binding.chain_id(),
            active,
        });
    }
    opts.ensure_active()?;

    let tx = TransactionRequest {
        to: binding.address(),
        from,
        data: Bytes::from(data),
        value,
        chain_id: binding.chain_id(),
    };
    debug!(
        network = binding.network(),
        %from,
        %value,
        data_len = tx.data.len(),
        "submitting transaction"
    );

    let handle = wallet
        .submit_transaction(tx)
        .await
        .map_err(BridgeError::from)?;
    info!(network = binding.network(), tx_hash = %handle, "transaction submitted");
    Ok(handle)
}

/// `send(SendParam, MessagingFee, refund, composer)` with `value = fee.native_fee`.
///
/// The fee goes out exactly as given, both fields; nothing is re-quoted here.
pub async fn send<R, W: WalletSigner>(
    binding: &ContractBinding<R, W>,
    envelope: &SendEnvelope,
    fee: &FeeQuote,
    refund_address: Address,
    composer_address: Address,
    opts: &CallOptions,
) -> Result<TransactionHandle> {
    verify_network(binding, opts).await?;
    submit_send(binding, envelope, fee, refund_address, composer_address, opts).await
}

/// The submission half of [`send`]; the caller has already run [`verify_network`].
pub async fn submit_send<R, W: WalletSigner>(
    binding: &ContractBinding<R, W>,
    envelope: &SendEnvelope,
    fee: &FeeQuote,
    refund_address: Address,
    composer_address: Address,
    opts: &CallOptions,
) -> Result<TransactionHandle> {
    let data = encode_send_call(envelope, fee, refund_address, composer_address);
    submit(binding, refund_address, data, fee.native_fee, opts)
        .await
        .map_err(|err| match err {
            // A revert at submission comes from gas estimation: the contract refused the envelope.
            BridgeError::CallReverted(data) => BridgeError::InvalidEnvelope(format!(
                "send reverted for dstEid {} (data: {data:?})",
                envelope.destination_network_id
            )),
            other => other,
        })
}

/// `mint(to, amount)`, signed by `to`.
pub async fn mint<R, W: WalletSigner>(
    binding: &ContractBinding<R, W>,
    to: Address,
    amount: U256,
    opts: &CallOptions,
) -> Result<TransactionHandle> {
    verify_network(binding, opts).await?;
    let data = IStarshipONFT::mintCall { to, amount }.abi_encode();
    submit(binding, to, data, U256::ZERO, opts).await
}

/// Calldata for `send`.
pub fn encode_send_call(
    envelope: &SendEnvelope,
    fee: &FeeQuote,
    refund_address: Address,
    composer_address: Address,
) -> Vec<u8> {
    IStarshipONFT::sendCall {
        _sendParam: envelope.to_send_param(),
        _fee: (*fee).into(),
        _refundAddress: refund_address,
        _composer: composer_address,
    }
    .abi_encode()
}
