//! Blink vote-state invariants over generated vote sequences.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use sn_02_blink::{
        canonical_digest, quorum_height, BlinkStatus, BlinkTx, SignatureStatus, Subquorum,
        BLINK_QUORUM_INTERVAL, BLINK_QUORUM_LAG, BLINK_SUBQUORUM_SIZE,
    };

    fn any_vote() -> impl Strategy<Value = (Subquorum, usize, bool)> {
        (
            prop_oneof![Just(Subquorum::Base), Just(Subquorum::Future)],
            0..BLINK_SUBQUORUM_SIZE,
            any::<bool>(),
        )
    }

    proptest! {
        #[test]
        fn verdicts_are_terminal_and_exclusive(
            votes in prop::collection::vec(any_vote(), 0..60),
        ) {
            let mut tx = BlinkTx::new([0x33; 32], 5_000);
            let mut verdict: Option<BlinkStatus> = None;

            for (subquorum, position, approved) in votes {
                let was_approved = tx.approved();
                let was_rejected = tx.rejected();
                tx.add_prechecked_signature(subquorum, position, approved, [7u8; 64]).unwrap();

                prop_assert!(!was_approved || tx.approved());
                prop_assert!(!was_rejected || tx.rejected());
                prop_assert!(!(tx.approved() && tx.rejected()));

                let status = tx.status();
                if let Some(previous) = verdict {
                    prop_assert_eq!(status, previous);
                } else if status != BlinkStatus::Pending {
                    verdict = Some(status);
                }
            }
        }

        #[test]
        fn relay_payload_carries_exactly_the_approvals(
            votes in prop::collection::vec(any_vote(), 0..40),
        ) {
            let mut tx = BlinkTx::new([0x44; 32], 5_000);
            for (subquorum, position, approved) in votes {
                tx.add_prechecked_signature(subquorum, position, approved, [position as u8; 64]).unwrap();
            }

            let payload = tx.serialize_approved();
            let entries = payload.entries().unwrap();
            let expected: usize = Subquorum::ALL.iter().map(|&q| tx.approvals(q)).sum();
            prop_assert_eq!(entries.len(), expected);
            for (subquorum, position, _) in entries {
                prop_assert_eq!(
                    tx.signature_status(subquorum, position).unwrap(),
                    SignatureStatus::Approved
                );
            }
        }

        #[test]
        fn quorum_height_is_aligned_and_lagged(height in any::<u64>()) {
            for subquorum in Subquorum::ALL {
                let offset = subquorum.index() as u64 * BLINK_QUORUM_INTERVAL;
                let base = height - height % BLINK_QUORUM_INTERVAL;
                match quorum_height(height, subquorum) {
                    Some(h) => {
                        prop_assert_eq!(h % BLINK_QUORUM_INTERVAL, 0);
                        prop_assert!(h < height);
                        prop_assert_eq!(h + BLINK_QUORUM_LAG, base + offset);
                    }
                    None => prop_assert!(
                        base.checked_add(offset).map_or(true, |v| v < BLINK_QUORUM_LAG)
                    ),
                }
            }
        }

        #[test]
        fn approve_and_reject_digests_differ(height in any::<u64>(), tx_hash in any::<[u8; 32]>()) {
            prop_assert_ne!(
                canonical_digest(height, &tx_hash, true),
                canonical_digest(height, &tx_hash, false)
            );
        }
    }
}
