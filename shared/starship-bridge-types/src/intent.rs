use alloy_primitives::{Address, Bytes, FixedBytes, U256};
use alloy_sol_types::SolValue;

use crate::interfaces::{MessagingFee, SendParam};

/// What the caller wants moved: one token, to one composer, tagged with one player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferIntent {
    /// LayerZero endpoint id of the destination network (not the EVM chain id).
    pub destination_network_id: u32,
    pub token_id: U256,
    /// Destination-side composer that receives and interprets the compose message.
    pub recipient_composer_address: Address,
    pub player_id: u8,
    /// Executor options; `None` is sent as empty bytes.
    pub execution_options: Option<Bytes>,
}

impl TransferIntent {
    pub fn new(
        destination_network_id: u32,
        token_id: U256,
        recipient_composer_address: Address,
        player_id: u8,
    ) -> Self {
        Self {
            destination_network_id,
            token_id,
            recipient_composer_address,
            player_id,
            execution_options: None,
        }
    }

    pub fn with_execution_options(mut self, options: Bytes) -> Self {
        self.execution_options = Some(options);
        self
    }
}

/// The complete send request, used unchanged for both `quoteSend` and `send`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SendEnvelope {
    pub destination_network_id: u32,
    /// Recipient address left-padded to 32 bytes.
    pub recipient_field: FixedBytes<32>,
    pub token_id: U256,
    pub execution_options: Bytes,
    pub compose_message: Bytes,
    /// Reserved for ONFT commands; always empty here.
    pub command: Bytes,
}

impl SendEnvelope {
    /// ABI struct as passed to the contract.
    pub fn to_send_param(&self) -> SendParam {
        SendParam {
            dstEid: self.destination_network_id,
            to: self.recipient_field,
            tokenId: self.token_id,
            extraOptions: self.execution_options.clone(),
            composeMsg: self.compose_message.clone(),
            onftCmd: self.command.clone(),
        }
    }

    /// Canonical ABI encoding of the envelope (the `SendParam` tuple).
    pub fn abi_encoded(&self) -> Vec<u8> {
        self.to_send_param().abi_encode()
    }
}

impl From<SendParam> for SendEnvelope {
    fn from(param: SendParam) -> Self {
        Self {
            destination_network_id: param.dstEid,
            recipient_field: param.to,
            token_id: param.tokenId,
            execution_options: param.extraOptions,
            compose_message: param.composeMsg,
            command: param.onftCmd,
        }
    }
}

/// Price of delivering one envelope, as returned by `quoteSend`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeQuote {
    pub native_fee: U256,
    /// Fee in the alternate (LayerZero) token; zero unless it was requested.
    pub alternate_token_fee: U256,
}

impl FeeQuote {
    pub fn native(native_fee: U256) -> Self {
        Self {
            native_fee,
            alternate_token_fee: U256::ZERO,
        }
    }
}

impl From<MessagingFee> for FeeQuote {
    fn from(fee: MessagingFee) -> Self {
        Self {
            native_fee: fee.nativeFee,
            alternate_token_fee: fee.lzTokenFee,
        }
    }
}

impl From<FeeQuote> for MessagingFee {
    fn from(fee: FeeQuote) -> Self {
        MessagingFee {
            nativeFee: fee.native_fee,
            lzTokenFee: fee.alternate_token_fee,
        }
    }
}
