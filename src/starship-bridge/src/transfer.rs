//! One transfer attempt: a single envelope carried from quote to submission.
//!
//! ```text
//! Idle -> EnvelopeBuilt -> Quoted -> NetworkVerified -> Submitted
//!   ^                                      |
//!   +---------- switch rejected -----------+
//! (transport / contract errors from any network-dependent state) -> Failed
//! ```
//!
//! Cancellation and timeouts never submit anything, so they leave the attempt where it was
//! before the interrupted step; a verified attempt falls back to `Quoted`.

use alloy_primitives::Address;
use starship_bridge_encoder::build_envelope;
use starship_bridge_types::{FeeQuote, SendEnvelope, TransferIntent};
use tracing::debug;

use crate::{
    binding::ContractBinding,
    cancel::CallOptions,
    errors::{BridgeError, Result},
    executor, quoter,
    rpc::{ReadClient, TransactionHandle, WalletSigner},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferState {
    Idle,
    EnvelopeBuilt,
    Quoted,
    NetworkVerified,
    Submitted,
    Failed,
}

#[derive(Clone, Debug)]
pub struct TransferAttempt {
    intent: TransferIntent,
    envelope: SendEnvelope,
    state: TransferState,
    quote: Option<FeeQuote>,
    handle: Option<TransactionHandle>,
}

impl TransferAttempt {
    /// Build the envelope for `intent`; the attempt starts in `EnvelopeBuilt`.
    pub fn new(intent: TransferIntent) -> Self {
        let envelope = build_envelope(&intent);
        Self {
            intent,
            envelope,
            state: TransferState::EnvelopeBuilt,
            quote: None,
            handle: None,
        }
    }

    pub fn intent(&self) -> &TransferIntent {
        &self.intent
    }

    pub fn envelope(&self) -> &SendEnvelope {
        &self.envelope
    }

    pub fn state(&self) -> TransferState {
        self.state
    }

    pub fn quoted_fee(&self) -> Option<&FeeQuote> {
        self.quote.as_ref()
    }

    pub fn handle(&self) -> Option<TransactionHandle> {
        self.handle
    }

    /// Leave `Idle` by rebuilding the envelope from the intent. The old quote is gone.
    pub fn rebuild(&mut self) -> Result<&SendEnvelope> {
        self.require(&[TransferState::Idle], "rebuild")?;
        self.envelope = build_envelope(&self.intent);
        self.quote = None;
        self.transition(TransferState::EnvelopeBuilt);
        Ok(&self.envelope)
    }

    /// Price this attempt's envelope. Re-quoting an already quoted attempt replaces the quote.
    pub async fn quote<R: ReadClient, W>(
        &mut self,
        binding: &ContractBinding<R, W>,
        pay_in_alternate_token: bool,
        opts: &CallOptions,
    ) -> Result<FeeQuote> {
        self.require(&[TransferState::EnvelopeBuilt, TransferState::Quoted], "quote")?;

        match quoter::quote_send(binding, &self.envelope, pay_in_alternate_token, opts).await {
            Ok(quote) => {
                self.quote = Some(quote);
                self.transition(TransferState::Quoted);
                Ok(quote)
            }
            Err(err) => {
                self.fail_on(&err);
                Err(err)
            }
        }
    }

    /// Verify the network and submit `send` with the quoted fee. Consumes the attempt's one
    /// submission; there is no way out of `Submitted`.
    pub async fn submit<R, W: WalletSigner>(
        &mut self,
        binding: &ContractBinding<R, W>,
        refund_address: Address,
        composer_address: Address,
        opts: &CallOptions,
    ) -> Result<TransactionHandle> {
        self.require(&[TransferState::Quoted], "submit")?;
        let fee = match self.quote {
            Some(fee) => fee,
            None => {
                return Err(BridgeError::OutOfOrder {
                    state: self.state,
                    operation: "submit",
                })
            }
        };

        if let Err(err) = executor::verify_network(binding, opts).await {
            self.fail_on(&err);
            return Err(err);
        }
        self.transition(TransferState::NetworkVerified);

        let submitted = executor::submit_send(
            binding,
            &self.envelope,
            &fee,
            refund_address,
            composer_address,
            opts,
        )
        .await;
        match submitted {
            Ok(handle) => {
                self.handle = Some(handle);
                self.transition(TransferState::Submitted);
                Ok(handle)
            }
            Err(err) => {
                self.fail_on(&err);
                Err(err)
            }
        }
    }

    fn require(&self, allowed: &[TransferState], operation: &'static str) -> Result<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(BridgeError::OutOfOrder {
                state: self.state,
                operation,
            })
        }
    }

    /// Cancellation and timeouts undo the interrupted step; wallet/network precondition failures
    /// send the attempt back to `Idle`; everything else is terminal.
    fn fail_on(&mut self, err: &BridgeError) {
        let next = match err {
            BridgeError::Cancelled | BridgeError::TimedOut => match self.state {
                TransferState::NetworkVerified => TransferState::Quoted,
                _ => return,
            },
            BridgeError::WalletUnavailable
            | BridgeError::NetworkSwitchRejected { .. }
            | BridgeError::NetworkMismatch { .. } => TransferState::Idle,
            _ => TransferState::Failed,
        };
        if next == TransferState::Idle {
            self.quote = None;
        }
        self.transition(next);
    }

    fn transition(&mut self, next: TransferState) {
        debug!(from = ?self.state, to = ?next, token_id = %self.intent.token_id, "transfer state");
        self.state = next;
    }
}
