//! Send envelope construction.

use alloy_primitives::Bytes;
use starship_bridge_types::{SendEnvelope, TransferIntent};
use tracing::debug;

use crate::encoder::{address_to_bytes32, encode_compose_message};

/// Assemble the `SendParam` for a transfer intent.
///
/// The same intent always yields the same envelope, so an envelope built once can be quoted and
/// then submitted without the fee drifting from the message.
pub fn build_envelope(intent: &TransferIntent) -> SendEnvelope {
    let compose_message = encode_compose_message(intent.player_id, intent.token_id);
    let recipient_field = address_to_bytes32(intent.recipient_composer_address);
    let execution_options = intent.execution_options.clone().unwrap_or_default();

    debug!(
        dst_eid = intent.destination_network_id,
        token_id = %intent.token_id,
        player_id = intent.player_id,
        options_len = execution_options.len(),
        "built send envelope"
    );

    SendEnvelope {
        destination_network_id: intent.destination_network_id,
        recipient_field,
        token_id: intent.token_id,
        execution_options,
        compose_message,
        command: Bytes::new(),
    }
}
