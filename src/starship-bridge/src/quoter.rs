//! `quoteSend` pricing.

use alloy_sol_types::SolCall;
use starship_bridge_types::{FeeQuote, IStarshipONFT, SendEnvelope};
use tracing::{debug, info};

use crate::{
    accessors::read_raw,
    binding::ContractBinding,
    cancel::CallOptions,
    errors::{BridgeError, Result},
    rpc::ReadClient,
};

/// Price `envelope` on the bound contract. Read-only; the result is not cached anywhere.
///
/// A revert means the contract refused the envelope itself (unknown destination eid, invalid
/// options) and surfaces as [`BridgeError::InvalidEnvelope`].
pub async fn quote_send<R: ReadClient, W>(
    binding: &ContractBinding<R, W>,
    envelope: &SendEnvelope,
    pay_in_alternate_token: bool,
    opts: &CallOptions,
) -> Result<FeeQuote> {
    let call = IStarshipONFT::quoteSendCall {
        _sendParam: envelope.to_send_param(),
        _payInLzToken: pay_in_alternate_token,
    };
    debug!(
        network = binding.network(),
        dst_eid = envelope.destination_network_id,
        pay_in_alternate_token,
        "quoting send"
    );

    let out = read_raw(binding, call.abi_encode(), opts)
        .await
        .map_err(|err| match err {
            BridgeError::CallReverted(data) => BridgeError::InvalidEnvelope(format!(
                "quoteSend reverted for dstEid {} (data: {data:?})",
                envelope.destination_network_id
            )),
            other => other,
        })?;

    let ret = IStarshipONFT::quoteSendCall::abi_decode_returns(&out, true)?;
    let quote = FeeQuote::from(ret.msgFee);
    info!(
        network = binding.network(),
        dst_eid = envelope.destination_network_id,
        native_fee = %quote.native_fee,
        alternate_token_fee = %quote.alternate_token_fee,
        "quoted send"
    );
    Ok(quote)
}
