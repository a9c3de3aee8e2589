//! # Blink Voting Flows
//!
//! Votes from both subquorums are fed through the engine until the
//! transaction finalises, then the approval set is relayed to a second node
//! over the wire encoding.

#[cfg(test)]
mod tests {
    use crate::fixtures::BlinkQuorums;
    use sn_02_blink::{
        BlinkError, BlinkStatus, BlinkTx, BlinkVotingApi, BlinkVotingEngine, BlinkWirePayload,
        SignatureStatus, Subquorum, BLINK_MIN_VOTES, BLINK_SUBQUORUM_SIZE,
    };
    use std::sync::Arc;

    const HEIGHT: u64 = 1_002;
    const TX: [u8; 32] = [0x7e; 32];

    fn engine(quorums: &BlinkQuorums) -> BlinkVotingEngine<shared_types::InMemoryQuorumProvider> {
        BlinkVotingEngine::new(Arc::clone(&quorums.provider))
    }

    fn vote(
        engine: &BlinkVotingEngine<shared_types::InMemoryQuorumProvider>,
        quorums: &BlinkQuorums,
        tx: &mut BlinkTx,
        subquorum: Subquorum,
        position: usize,
        approved: bool,
    ) -> sn_02_blink::VoteOutcome {
        let signature = quorums.sign(tx, subquorum, position, approved);
        engine
            .receive_vote(tx, subquorum, position, approved, signature)
            .unwrap()
    }

    // =============================================================================
    // INTEGRATION TESTS: VOTING TO A VERDICT
    // =============================================================================

    #[test]
    fn test_tx_approved_once_both_subquorums_agree() {
        let quorums = BlinkQuorums::new(HEIGHT, 10, 10);
        let engine = engine(&quorums);
        let mut tx = BlinkTx::new(TX, HEIGHT);
        engine.prepare(&mut tx).unwrap();

        for position in 0..BLINK_MIN_VOTES {
            let outcome = vote(&engine, &quorums, &mut tx, Subquorum::Base, position, true);
            assert_eq!(outcome.status, BlinkStatus::Pending);
        }
        for position in 0..BLINK_MIN_VOTES - 1 {
            vote(&engine, &quorums, &mut tx, Subquorum::Future, position, true);
        }
        // A couple of dissenters do not block approval.
        vote(&engine, &quorums, &mut tx, Subquorum::Future, 8, false);
        vote(&engine, &quorums, &mut tx, Subquorum::Future, 9, false);
        assert_eq!(tx.status(), BlinkStatus::Pending);

        let last = vote(&engine, &quorums, &mut tx, Subquorum::Future, 6, true);
        assert!(last.added && last.status_changed);
        assert_eq!(last.status, BlinkStatus::Approved);

        let late = vote(&engine, &quorums, &mut tx, Subquorum::Base, 9, true);
        assert!(late.added && !late.status_changed);
        assert_eq!(late.status, BlinkStatus::Approved);
    }

    #[test]
    fn test_tx_rejected_by_one_subquorum() {
        let quorums = BlinkQuorums::new(HEIGHT, 10, 10);
        let engine = engine(&quorums);
        let mut tx = BlinkTx::new(TX, HEIGHT);
        engine.prepare(&mut tx).unwrap();

        for position in 0..BLINK_SUBQUORUM_SIZE {
            vote(&engine, &quorums, &mut tx, Subquorum::Base, position, true);
        }
        for position in 0..3 {
            vote(&engine, &quorums, &mut tx, Subquorum::Future, position, false);
        }
        assert_eq!(tx.status(), BlinkStatus::Pending);

        let fourth = vote(&engine, &quorums, &mut tx, Subquorum::Future, 3, false);
        assert!(fourth.status_changed);
        assert_eq!(fourth.status, BlinkStatus::Rejected);

        for position in 4..BLINK_SUBQUORUM_SIZE {
            let outcome = vote(&engine, &quorums, &mut tx, Subquorum::Future, position, true);
            assert_eq!(outcome.status, BlinkStatus::Rejected);
        }
        assert!(!tx.approved());
    }

    #[test]
    fn test_changed_vote_is_ignored() {
        let quorums = BlinkQuorums::new(HEIGHT, 10, 10);
        let engine = engine(&quorums);
        let mut tx = BlinkTx::new(TX, HEIGHT);

        assert!(vote(&engine, &quorums, &mut tx, Subquorum::Base, 2, true).added);
        let flip = vote(&engine, &quorums, &mut tx, Subquorum::Base, 2, false);
        assert!(!flip.added);
        assert_eq!(
            tx.signature_status(Subquorum::Base, 2).unwrap(),
            SignatureStatus::Approved
        );
    }

    #[test]
    fn test_short_quorum_rejects_up_front() {
        // Six live validators leave four slots that can never approve.
        let quorums = BlinkQuorums::new(HEIGHT, 10, 6);
        let engine = engine(&quorums);
        let mut tx = BlinkTx::new(TX, HEIGHT);
        engine.prepare(&mut tx).unwrap();
        assert_eq!(tx.rejections(Subquorum::Future), 4);
        assert_eq!(tx.status(), BlinkStatus::Rejected);
    }

    #[test]
    fn test_seven_live_validators_can_still_approve() {
        let quorums = BlinkQuorums::new(HEIGHT, 7, 10);
        let engine = engine(&quorums);
        let mut tx = BlinkTx::new(TX, HEIGHT);
        engine.prepare(&mut tx).unwrap();
        assert_eq!(tx.status(), BlinkStatus::Pending);

        for position in 0..7 {
            vote(&engine, &quorums, &mut tx, Subquorum::Base, position, true);
            vote(&engine, &quorums, &mut tx, Subquorum::Future, position, true);
        }
        assert_eq!(tx.status(), BlinkStatus::Approved);

        let missing = engine.receive_vote(&mut tx, Subquorum::Base, 8, true, [1u8; 64]);
        assert!(matches!(
            missing,
            Err(BlinkError::UnknownVoter { position: 8, .. })
        ));
    }

    #[test]
    fn test_forged_vote_is_an_error() {
        let quorums = BlinkQuorums::new(HEIGHT, 10, 10);
        let engine = engine(&quorums);
        let mut tx = BlinkTx::new(TX, HEIGHT);

        // Signed by the wrong validator.
        let signature = quorums.sign(&tx, Subquorum::Base, 1, true);
        assert!(matches!(
            engine.receive_vote(&mut tx, Subquorum::Base, 0, true, signature),
            Err(BlinkError::SignatureVerification { position: 0, .. })
        ));

        // Approval signature presented as a rejection.
        let signature = quorums.sign(&tx, Subquorum::Base, 0, true);
        assert!(engine
            .receive_vote(&mut tx, Subquorum::Base, 0, false, signature)
            .is_err());
        assert_eq!(
            tx.signature_status(Subquorum::Base, 0).unwrap(),
            SignatureStatus::None
        );
    }

    #[test]
    fn test_chain_too_short_has_no_quorum() {
        let quorums = BlinkQuorums::new(20, 10, 10);
        let engine = engine(&quorums);
        let mut tx = BlinkTx::new(TX, 20);

        assert!(engine.validator_pubkey(&tx, Subquorum::Base, 0).is_none());
        engine.prepare(&mut tx).unwrap();
        assert_eq!(tx.status(), BlinkStatus::Rejected);
    }

    // =============================================================================
    // INTEGRATION TESTS: RELAY BETWEEN NODES
    // =============================================================================

    #[test]
    fn test_approval_relayed_to_second_node() {
        let quorums = BlinkQuorums::new(HEIGHT, 10, 10);
        let engine = engine(&quorums);
        let mut origin = BlinkTx::new(TX, HEIGHT);
        engine.prepare(&mut origin).unwrap();

        for position in 0..8 {
            vote(&engine, &quorums, &mut origin, Subquorum::Base, position, true);
            vote(&engine, &quorums, &mut origin, Subquorum::Future, position, true);
        }
        vote(&engine, &quorums, &mut origin, Subquorum::Future, 9, false);
        assert!(origin.approved());

        let bytes = origin.serialize_approved().to_bytes().unwrap();
        let payload = BlinkWirePayload::from_bytes(&bytes).unwrap();
        assert_eq!(payload.len(), 16);

        let mut relayed = BlinkTx::new(TX, HEIGHT);
        let added = engine.apply_wire_payload(&mut relayed, &payload).unwrap();
        assert_eq!(added, 16);
        assert_eq!(relayed.status(), BlinkStatus::Approved);
        assert_eq!(relayed.rejections(Subquorum::Future), 0);

        // Replaying the same payload adds nothing.
        assert_eq!(engine.apply_wire_payload(&mut relayed, &payload).unwrap(), 0);
    }

    #[test]
    fn test_relay_with_one_forged_approval_is_dropped_whole() {
        let quorums = BlinkQuorums::new(HEIGHT, 10, 10);
        let engine = engine(&quorums);
        let mut origin = BlinkTx::new(TX, HEIGHT);
        for position in 0..BLINK_MIN_VOTES {
            vote(&engine, &quorums, &mut origin, Subquorum::Base, position, true);
            vote(&engine, &quorums, &mut origin, Subquorum::Future, position, true);
        }

        let mut payload = origin.serialize_approved();
        payload.push(Subquorum::Future, 9, [0u8; 64]);
        let bytes = payload.to_bytes().unwrap();
        let payload = BlinkWirePayload::from_bytes(&bytes).unwrap();

        let mut relayed = BlinkTx::new(TX, HEIGHT);
        assert!(matches!(
            engine.apply_wire_payload(&mut relayed, &payload),
            Err(BlinkError::SignatureVerification { position: 9, .. })
        ));
        assert_eq!(relayed.status(), BlinkStatus::Pending);
        assert_eq!(relayed.approvals(Subquorum::Base), 0);
        assert_eq!(relayed.approvals(Subquorum::Future), 0);
    }

    #[test]
    fn test_payload_for_another_tx_is_refused() {
        let quorums = BlinkQuorums::new(HEIGHT, 10, 10);
        let engine = engine(&quorums);
        let mut origin = BlinkTx::new(TX, HEIGHT);
        vote(&engine, &quorums, &mut origin, Subquorum::Base, 0, true);

        let payload = origin.serialize_approved();
        let mut other = BlinkTx::new([0x01; 32], HEIGHT);
        assert!(matches!(
            engine.apply_wire_payload(&mut other, &payload),
            Err(BlinkError::MalformedPayload { .. })
        ));
    }

    #[test]
    fn test_truncated_payload_fails_to_decode() {
        let quorums = BlinkQuorums::new(HEIGHT, 10, 10);
        let engine = engine(&quorums);
        let mut origin = BlinkTx::new(TX, HEIGHT);
        vote(&engine, &quorums, &mut origin, Subquorum::Base, 0, true);

        let bytes = origin.serialize_approved().to_bytes().unwrap();
        assert!(BlinkWirePayload::from_bytes(&bytes[..bytes.len() - 10]).is_err());
    }
}
