#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use alloy_primitives::{Address, Bytes, U256};
    use alloy_sol_types::SolCall;
    use starship_bridge_encoder::{build_envelope, encode_compose_message};
    use starship_bridge_types::{FeeQuote, IStarshipONFT, SendEnvelope, TransferIntent};

    use crate::{
        cancel::{cancel_pair, CallOptions},
        config::{NetworkBook, NetworkConfig},
        context::{ExecutionContext, NetworkAction},
        errors::BridgeError,
        rpc::RpcError,
        testing::{MockReadClient, MockWallet, SwitchPolicy},
        transfer::{TransferAttempt, TransferState},
        ContractBinding,
    };

    const BASE_CHAIN: u64 = 84532;
    const ARB_CHAIN: u64 = 421614;
    const ARB_EID: u32 = 40231;

    type TestBinding = ContractBinding<Arc<MockReadClient>, Arc<MockWallet>>;

    fn contract() -> Address {
        Address::repeat_byte(0x11)
    }

    fn composer() -> Address {
        Address::repeat_byte(0xAA)
    }

    fn refund() -> Address {
        Address::repeat_byte(0x22)
    }

    fn binding(reader: &Arc<MockReadClient>, wallet: Option<&Arc<MockWallet>>) -> TestBinding {
        let config = NetworkConfig {
            contract_address: contract(),
            chain_id: BASE_CHAIN,
            endpoint_id: 40245,
            rpc_url: None,
        };
        ContractBinding::new("base-sepolia", &config, reader.clone(), wallet.cloned())
    }

    fn scenario_intent() -> TransferIntent {
        TransferIntent::new(ARB_EID, U256::from(7u64), composer(), 3)
    }

    fn scenario_envelope() -> SendEnvelope {
        build_envelope(&scenario_intent())
    }

    fn fee(native: u64) -> FeeQuote {
        FeeQuote::native(U256::from(native))
    }

    #[tokio::test]
    async fn test_quote_issues_quote_send_with_envelope() {
        let reader = Arc::new(MockReadClient::new());
        reader.push_quote(fee(1_000));
        let binding = binding(&reader, None);
        let envelope = scenario_envelope();

        let quote = binding
            .quote(&envelope, false, &CallOptions::default())
            .await
            .unwrap();
        assert_eq!(quote, fee(1_000));
        assert_eq!(quote.alternate_token_fee, U256::ZERO);

        let calls = reader.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, contract());
        let decoded = IStarshipONFT::quoteSendCall::abi_decode(&calls[0].1, true).unwrap();
        assert!(!decoded._payInLzToken);
        assert_eq!(SendEnvelope::from(decoded._sendParam), envelope);
    }

    #[tokio::test]
    async fn test_quote_revert_is_invalid_envelope() {
        let reader = Arc::new(MockReadClient::new());
        reader.push_response(Err(RpcError::Reverted(Bytes::from(vec![0xde, 0xad]))));
        let binding = binding(&reader, None);

        let err = binding
            .quote(&scenario_envelope(), false, &CallOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::InvalidEnvelope(_)));
        assert!(!err.is_recoverable());
    }

    #[tokio::test]
    async fn test_quote_transport_error_is_network_unavailable() {
        let reader = Arc::new(MockReadClient::new());
        reader.push_response(Err(RpcError::Transport("connection refused".into())));
        let binding = binding(&reader, None);

        let err = binding
            .quote(&scenario_envelope(), true, &CallOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err, BridgeError::NetworkUnavailable("connection refused".into()));
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_quote_malformed_return() {
        let reader = Arc::new(MockReadClient::new());
        reader.push_response(Ok(Bytes::from(vec![0u8; 12])));
        let binding = binding(&reader, None);

        let err = binding
            .quote(&scenario_envelope(), false, &CallOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::MalformedReturn(_)));
    }

    #[tokio::test]
    async fn test_send_on_correct_network_submits_once() {
        let reader = Arc::new(MockReadClient::new());
        let wallet = Arc::new(MockWallet::on(Some(BASE_CHAIN), SwitchPolicy::Reject));
        let binding = binding(&reader, Some(&wallet));
        let envelope = scenario_envelope();

        binding
            .send(&envelope, &fee(5_000), refund(), composer(), &CallOptions::default())
            .await
            .unwrap();

        assert!(wallet.switch_requests().is_empty());
        let submitted = wallet.submitted();
        assert_eq!(submitted.len(), 1);
        let tx = &submitted[0];
        assert_eq!(tx.to, contract());
        assert_eq!(tx.from, refund());
        assert_eq!(tx.value, U256::from(5_000u64));
        assert_eq!(tx.chain_id, BASE_CHAIN);

        let decoded = IStarshipONFT::sendCall::abi_decode(&tx.data, true).unwrap();
        assert_eq!(SendEnvelope::from(decoded._sendParam), envelope);
        assert_eq!(decoded._fee.nativeFee, U256::from(5_000u64));
        assert_eq!(decoded._fee.lzTokenFee, U256::ZERO);
        assert_eq!(decoded._refundAddress, refund());
        assert_eq!(decoded._composer, composer());
    }

    #[tokio::test]
    async fn test_send_switches_network_first() {
        let reader = Arc::new(MockReadClient::new());
        let wallet = Arc::new(MockWallet::on(Some(ARB_CHAIN), SwitchPolicy::Accept));
        let binding = binding(&reader, Some(&wallet));

        binding
            .send(&scenario_envelope(), &fee(1), refund(), composer(), &CallOptions::default())
            .await
            .unwrap();

        assert_eq!(wallet.switch_requests(), vec![BASE_CHAIN]);
        assert_eq!(wallet.active(), Some(BASE_CHAIN));
        assert_eq!(wallet.submitted().len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_switch_submits_nothing() {
        let reader = Arc::new(MockReadClient::new());
        let wallet = Arc::new(MockWallet::on(Some(ARB_CHAIN), SwitchPolicy::Reject));
        let binding = binding(&reader, Some(&wallet));

        let err = binding
            .send(&scenario_envelope(), &fee(1), refund(), composer(), &CallOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            BridgeError::NetworkSwitchRejected { chain_id: BASE_CHAIN, .. }
        ));
        assert_eq!(wallet.switch_requests(), vec![BASE_CHAIN]);
        assert!(wallet.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_missing_wallet_is_wallet_unavailable() {
        let reader = Arc::new(MockReadClient::new());
        let binding = binding(&reader, None);
        let err = binding
            .send(&scenario_envelope(), &fee(1), refund(), composer(), &CallOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err, BridgeError::WalletUnavailable);

        let disconnected = Arc::new(MockWallet::on(None, SwitchPolicy::Accept));
        let binding = self::binding(&reader, Some(&disconnected));
        let err = binding
            .mint(refund(), U256::from(1u64), &CallOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err, BridgeError::WalletUnavailable);
        assert!(disconnected.switch_requests().is_empty());
        assert!(disconnected.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_network_moved_before_submission() {
        let reader = Arc::new(MockReadClient::new());
        let wallet = Arc::new(MockWallet::on(Some(ARB_CHAIN), SwitchPolicy::LandOn(1)));
        let binding = binding(&reader, Some(&wallet));

        let err = binding
            .send(&scenario_envelope(), &fee(1), refund(), composer(), &CallOptions::default())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            BridgeError::NetworkMismatch {
                expected: BASE_CHAIN,
                active: Some(1)
            }
        );
        assert!(wallet.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_switch_wait_times_out() {
        let reader = Arc::new(MockReadClient::new());
        let wallet = Arc::new(MockWallet::on(Some(ARB_CHAIN), SwitchPolicy::Hang));
        let binding = binding(&reader, Some(&wallet));

        let opts = CallOptions::with_timeout(Duration::from_millis(20));
        let err = binding
            .send(&scenario_envelope(), &fee(1), refund(), composer(), &opts)
            .await
            .unwrap_err();
        assert_eq!(err, BridgeError::TimedOut);
        assert!(wallet.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_switch_wait_cancelled() {
        let reader = Arc::new(MockReadClient::new());
        let wallet = Arc::new(MockWallet::on(Some(ARB_CHAIN), SwitchPolicy::Hang));
        let binding = binding(&reader, Some(&wallet));

        let (handle, token) = cancel_pair();
        let opts = CallOptions::default().cancellable(token);
        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            handle.cancel();
        });

        let err = binding
            .send(&scenario_envelope(), &fee(1), refund(), composer(), &opts)
            .await
            .unwrap_err();
        canceller.await.unwrap();
        assert_eq!(err, BridgeError::Cancelled);
        assert!(wallet.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_before_read() {
        let reader = Arc::new(MockReadClient::new());
        reader.push_quote(fee(1));
        let binding = binding(&reader, None);

        let (handle, token) = cancel_pair();
        handle.cancel();
        let err = binding
            .quote(&scenario_envelope(), false, &CallOptions::default().cancellable(token))
            .await
            .unwrap_err();
        assert_eq!(err, BridgeError::Cancelled);
        assert!(reader.calls().is_empty());
    }

    #[tokio::test]
    async fn test_alternate_token_fee_is_carried_through() {
        let reader = Arc::new(MockReadClient::new());
        let wallet = Arc::new(MockWallet::on(Some(BASE_CHAIN), SwitchPolicy::Accept));
        let binding = binding(&reader, Some(&wallet));
        let quoted = FeeQuote {
            native_fee: U256::from(9u64),
            alternate_token_fee: U256::from(4u64),
        };

        binding
            .send(&scenario_envelope(), &quoted, refund(), composer(), &CallOptions::default())
            .await
            .unwrap();

        let tx = &wallet.submitted()[0];
        assert_eq!(tx.value, U256::from(9u64));
        let decoded = IStarshipONFT::sendCall::abi_decode(&tx.data, true).unwrap();
        assert_eq!(decoded._fee.lzTokenFee, U256::from(4u64));
    }

    #[tokio::test]
    async fn test_send_revert_is_invalid_envelope() {
        let reader = Arc::new(MockReadClient::new());
        let wallet = Arc::new(MockWallet::on(Some(BASE_CHAIN), SwitchPolicy::Accept));
        wallet.fail_next_submit(RpcError::Reverted(Bytes::new()));
        let binding = binding(&reader, Some(&wallet));

        let err = binding
            .send(&scenario_envelope(), &fee(1), refund(), composer(), &CallOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::InvalidEnvelope(_)));
    }

    #[tokio::test]
    async fn test_transfer_attempt_quote_and_send_share_envelope() {
        let reader = Arc::new(MockReadClient::new());
        reader.push_quote(fee(777));
        let wallet = Arc::new(MockWallet::on(Some(ARB_CHAIN), SwitchPolicy::Accept));
        let binding = binding(&reader, Some(&wallet));
        let opts = CallOptions::default();

        let mut attempt = binding.prepare_transfer(scenario_intent());
        assert_eq!(attempt.state(), TransferState::EnvelopeBuilt);

        let quote = attempt.quote(&binding, false, &opts).await.unwrap();
        assert_eq!(attempt.state(), TransferState::Quoted);

        let handle = attempt.submit(&binding, refund(), composer(), &opts).await.unwrap();
        assert_eq!(attempt.state(), TransferState::Submitted);
        assert_eq!(attempt.handle(), Some(handle));

        let quoted = IStarshipONFT::quoteSendCall::abi_decode(&reader.calls()[0].1, true).unwrap();
        let tx = &wallet.submitted()[0];
        let sent = IStarshipONFT::sendCall::abi_decode(&tx.data, true).unwrap();

        let quoted_envelope = SendEnvelope::from(quoted._sendParam);
        let sent_envelope = SendEnvelope::from(sent._sendParam);
        assert_eq!(quoted_envelope.abi_encoded(), sent_envelope.abi_encoded());
        assert_eq!(tx.value, quote.native_fee);

        // scenario bytes
        let mut recipient = [0u8; 32];
        recipient[12..].fill(0xAA);
        assert_eq!(sent_envelope.recipient_field.as_slice(), &recipient);
        assert_eq!(sent_envelope.compose_message, encode_compose_message(3, U256::from(7u64)));
        assert_eq!(sent_envelope.destination_network_id, ARB_EID);

        let err = attempt.submit(&binding, refund(), composer(), &opts).await.unwrap_err();
        assert!(matches!(
            err,
            BridgeError::OutOfOrder {
                state: TransferState::Submitted,
                ..
            }
        ));
        assert_eq!(wallet.submitted().len(), 1);
    }

    #[tokio::test]
    async fn test_transfer_attempt_requires_quote() {
        let reader = Arc::new(MockReadClient::new());
        let wallet = Arc::new(MockWallet::on(Some(BASE_CHAIN), SwitchPolicy::Accept));
        let binding = binding(&reader, Some(&wallet));

        let mut attempt = TransferAttempt::new(scenario_intent());
        let err = attempt
            .submit(&binding, refund(), composer(), &CallOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::OutOfOrder { operation: "submit", .. }));
        assert!(wallet.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_transfer_attempt_rejected_switch_returns_to_idle() {
        let reader = Arc::new(MockReadClient::new());
        reader.push_quote(fee(10)).push_quote(fee(12));
        let wallet = Arc::new(MockWallet::on(Some(ARB_CHAIN), SwitchPolicy::Reject));
        let binding = binding(&reader, Some(&wallet));
        let opts = CallOptions::default();

        let mut attempt = TransferAttempt::new(scenario_intent());
        attempt.quote(&binding, false, &opts).await.unwrap();
        let err = attempt.submit(&binding, refund(), composer(), &opts).await.unwrap_err();
        assert!(matches!(err, BridgeError::NetworkSwitchRejected { .. }));
        assert_eq!(attempt.state(), TransferState::Idle);
        assert!(attempt.quoted_fee().is_none());

        // Idle needs a rebuild and a fresh quote before anything else.
        assert!(attempt.quote(&binding, false, &opts).await.is_err());
        attempt.rebuild().unwrap();
        assert_eq!(attempt.state(), TransferState::EnvelopeBuilt);
        let requote = attempt.quote(&binding, false, &opts).await.unwrap();
        assert_eq!(requote, fee(12));
        assert!(wallet.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_transfer_attempt_transport_error_is_terminal() {
        let reader = Arc::new(MockReadClient::new());
        reader.push_response(Err(RpcError::Transport("timeout".into())));
        let binding = binding(&reader, None);

        let mut attempt = TransferAttempt::new(scenario_intent());
        let err = attempt
            .quote(&binding, false, &CallOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::NetworkUnavailable(_)));
        assert_eq!(attempt.state(), TransferState::Failed);
        assert!(attempt.rebuild().is_err());
    }

    #[tokio::test]
    async fn test_unanswered_network_read_times_out() {
        let reader = Arc::new(MockReadClient::new());
        let wallet = Arc::new(MockWallet::on(Some(BASE_CHAIN), SwitchPolicy::Accept));
        wallet.hang_network_reads();
        let binding = binding(&reader, Some(&wallet));
        let opts = CallOptions::with_timeout(Duration::from_millis(20));

        let minted = tokio::time::timeout(
            Duration::from_millis(500),
            binding.mint(refund(), U256::from(1u64), &opts),
        )
        .await
        .expect("mint ignored its own timeout");
        assert_eq!(minted.unwrap_err(), BridgeError::TimedOut);
        assert!(wallet.switch_requests().is_empty());
        assert!(wallet.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_transfer_attempt_quote_cancelled_keeps_state() {
        let reader = Arc::new(MockReadClient::new());
        reader.hang_next().push_quote(fee(5));
        let binding = binding(&reader, None);

        let (handle, token) = cancel_pair();
        let opts = CallOptions::default().cancellable(token);
        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            handle.cancel();
        });

        let mut attempt = TransferAttempt::new(scenario_intent());
        let err = attempt.quote(&binding, false, &opts).await.unwrap_err();
        canceller.await.unwrap();
        assert_eq!(err, BridgeError::Cancelled);
        assert_eq!(attempt.state(), TransferState::EnvelopeBuilt);
        assert!(attempt.quoted_fee().is_none());

        let quote = attempt
            .quote(&binding, false, &CallOptions::default())
            .await
            .unwrap();
        assert_eq!(quote, fee(5));
        assert_eq!(attempt.state(), TransferState::Quoted);
        assert_eq!(reader.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_transfer_attempt_switch_wait_cancelled_stays_quoted() {
        let reader = Arc::new(MockReadClient::new());
        reader.push_quote(fee(8));
        let wallet = Arc::new(MockWallet::on(Some(ARB_CHAIN), SwitchPolicy::Hang));
        let binding = binding(&reader, Some(&wallet));

        let mut attempt = TransferAttempt::new(scenario_intent());
        attempt
            .quote(&binding, false, &CallOptions::default())
            .await
            .unwrap();

        let (handle, token) = cancel_pair();
        let opts = CallOptions::default().cancellable(token);
        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            handle.cancel();
        });

        let err = attempt
            .submit(&binding, refund(), composer(), &opts)
            .await
            .unwrap_err();
        canceller.await.unwrap();
        assert_eq!(err, BridgeError::Cancelled);
        assert_eq!(attempt.state(), TransferState::Quoted);
        assert_eq!(attempt.quoted_fee(), Some(&fee(8)));
        assert_eq!(wallet.switch_requests(), vec![BASE_CHAIN]);
        assert!(wallet.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_transfer_attempt_cancelled_after_switch_can_resubmit() {
        let reader = Arc::new(MockReadClient::new());
        reader.push_quote(fee(30));
        let wallet = Arc::new(MockWallet::on(Some(ARB_CHAIN), SwitchPolicy::Accept));
        let binding = binding(&reader, Some(&wallet));

        let mut attempt = TransferAttempt::new(scenario_intent());
        attempt
            .quote(&binding, false, &CallOptions::default())
            .await
            .unwrap();

        // The switch succeeds and the caller cancels before the transaction is built.
        let (handle, token) = cancel_pair();
        wallet.cancel_after_switch(handle);
        let err = attempt
            .submit(&binding, refund(), composer(), &CallOptions::default().cancellable(token))
            .await
            .unwrap_err();
        assert_eq!(err, BridgeError::Cancelled);
        assert_eq!(wallet.active(), Some(BASE_CHAIN));
        assert!(wallet.submitted().is_empty());
        assert_eq!(attempt.state(), TransferState::Quoted);
        assert_eq!(attempt.quoted_fee(), Some(&fee(30)));

        let handle = attempt
            .submit(&binding, refund(), composer(), &CallOptions::default())
            .await
            .unwrap();
        assert_eq!(attempt.state(), TransferState::Submitted);
        assert_eq!(attempt.handle(), Some(handle));
        let submitted = wallet.submitted();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].value, U256::from(30u64));
        assert_eq!(wallet.switch_requests(), vec![BASE_CHAIN]);
    }

    #[tokio::test]
    async fn test_transfer_attempt_network_read_timeout_stays_quoted() {
        let reader = Arc::new(MockReadClient::new());
        reader.push_quote(fee(2));
        let wallet = Arc::new(MockWallet::on(Some(BASE_CHAIN), SwitchPolicy::Accept));
        let binding = binding(&reader, Some(&wallet));

        let mut attempt = TransferAttempt::new(scenario_intent());
        attempt
            .quote(&binding, false, &CallOptions::default())
            .await
            .unwrap();

        wallet.hang_network_reads();
        let err = attempt
            .submit(
                &binding,
                refund(),
                composer(),
                &CallOptions::with_timeout(Duration::from_millis(20)),
            )
            .await
            .unwrap_err();
        assert_eq!(err, BridgeError::TimedOut);
        assert_eq!(attempt.state(), TransferState::Quoted);
        assert!(wallet.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_accessors_pass_through() {
        let reader = Arc::new(MockReadClient::new());
        let owner = Address::repeat_byte(0x33);
        reader
            .push_return(U256::from(2u64))
            .push_return(owner)
            .push_return("ipfs://starship/7".to_string());
        let binding = binding(&reader, None);
        let opts = CallOptions::default();

        assert_eq!(binding.balance_of(owner, &opts).await.unwrap(), U256::from(2u64));
        assert_eq!(binding.owner_of(U256::from(7u64), &opts).await.unwrap(), owner);
        assert_eq!(
            binding.token_uri(U256::from(7u64), &opts).await.unwrap(),
            "ipfs://starship/7"
        );

        let calls = reader.calls();
        assert_eq!(
            &calls[0].1[..],
            IStarshipONFT::balanceOfCall { owner }.abi_encode().as_slice()
        );
        assert_eq!(&calls[1].1[..4], IStarshipONFT::ownerOfCall::SELECTOR.as_slice());
        assert_eq!(&calls[2].1[..4], IStarshipONFT::tokenURICall::SELECTOR.as_slice());
    }

    #[tokio::test]
    async fn test_owner_of_revert_is_call_reverted() {
        let reader = Arc::new(MockReadClient::new());
        reader.push_response(Err(RpcError::Reverted(Bytes::new())));
        let binding = binding(&reader, None);

        let err = binding
            .owner_of(U256::from(99u64), &CallOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err, BridgeError::CallReverted(Bytes::new()));
    }

    #[tokio::test]
    async fn test_mint_is_network_guarded() {
        let reader = Arc::new(MockReadClient::new());
        let wallet = Arc::new(MockWallet::on(Some(ARB_CHAIN), SwitchPolicy::Accept));
        let binding = binding(&reader, Some(&wallet));
        let to = Address::repeat_byte(0x44);

        binding
            .mint(to, U256::from(3u64), &CallOptions::default())
            .await
            .unwrap();

        assert_eq!(wallet.switch_requests(), vec![BASE_CHAIN]);
        let tx = &wallet.submitted()[0];
        assert_eq!(tx.from, to);
        assert_eq!(tx.value, U256::ZERO);
        let decoded = IStarshipONFT::mintCall::abi_decode(&tx.data, true).unwrap();
        assert_eq!(decoded.to, to);
        assert_eq!(decoded.amount, U256::from(3u64));
    }

    #[test]
    fn test_execution_context_check() {
        let ready = ExecutionContext {
            active_network_id: Some(BASE_CHAIN),
            target_network_id: BASE_CHAIN,
            wallet_available: true,
        };
        assert_eq!(ready.check(), Ok(NetworkAction::Ready));

        let switch = ExecutionContext {
            active_network_id: Some(ARB_CHAIN),
            ..ready
        };
        assert_eq!(
            switch.check(),
            Ok(NetworkAction::SwitchRequired {
                from: ARB_CHAIN,
                to: BASE_CHAIN
            })
        );

        let no_wallet = ExecutionContext {
            active_network_id: None,
            wallet_available: false,
            ..ready
        };
        assert_eq!(no_wallet.check(), Err(BridgeError::WalletUnavailable));
    }

    #[test]
    fn test_network_book_from_deployments_json() {
        let raw = r#"{
            "network": "testnet",
            "updated_at": "2026-01-01T00:00:00Z",
            "deployments": {
                "base-sepolia": { "address": "0x1111111111111111111111111111111111111111", "rpc_url": "https://sepolia.base.org" },
                "arbitrum-sepolia": { "address": "0x2222222222222222222222222222222222222222", "deployed_at": "x" },
                "devnet": { "contract_address": "0x3333333333333333333333333333333333333333", "chain_id": 31337, "endpoint_id": 1 }
            }
        }"#;
        let book = NetworkBook::from_json_str(raw).unwrap();

        let base = book.get("base-sepolia").unwrap();
        assert_eq!(base.chain_id, 84532);
        assert_eq!(base.endpoint_id, 40245);
        assert_eq!(base.rpc_url.as_deref(), Some("https://sepolia.base.org"));

        let (key, arb) = book.by_endpoint_id(ARB_EID).unwrap();
        assert_eq!(key, "arbitrum-sepolia");
        assert_eq!(arb.chain_id, ARB_CHAIN);
        assert_eq!(book.by_chain_id(31337).unwrap().0, "devnet");

        assert_eq!(
            book.get("mainnet"),
            Err(BridgeError::UnknownNetwork("mainnet".into()))
        );
    }

    #[test]
    fn test_network_book_rejects_incomplete_entries() {
        let missing_chain = r#"{ "networks": { "devnet": { "address": "0x3333333333333333333333333333333333333333" } } }"#;
        assert!(matches!(
            NetworkBook::from_json_str(missing_chain),
            Err(BridgeError::Config(_))
        ));

        let zero = r#"{ "networks": { "base-sepolia": { "address": "0x0000000000000000000000000000000000000000" } } }"#;
        assert!(matches!(NetworkBook::from_json_str(zero), Err(BridgeError::Config(_))));
    }
}
