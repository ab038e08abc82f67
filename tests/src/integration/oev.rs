//! # OEV Flows
//!
//! Auction winners overriding feeds for one proxy, the proxy-aware read
//! merge, and settlement of accrued bids.

#[cfg(test)]
mod tests {
    use crate::fixtures::{
        beacon_set_id, Airnode, OevBid, World, BENEFICIARY, NOW, PROXY, SEARCHER,
    };
    use dfa_02_data_feed_server::prelude::*;

    fn three_airnodes() -> [Airnode; 3] {
        [Airnode::new(1), Airnode::new(2), Airnode::new(3)]
    }

    // =========================================================================
    // QUORUM
    // =========================================================================

    #[test]
    fn test_two_of_three_meets_quorum() {
        let mut world = World::new();
        let airnodes = three_airnodes();
        let feed = beacon_set_id(&[&airnodes[0], &airnodes[1], &airnodes[2]]);
        let bid = OevBid::new(feed, 2_000, NOW, 50);
        let hash = bid.update_hash();

        let request = bid.request(vec![
            airnodes[0].abstain(),
            airnodes[1].endorse(&hash),
            airnodes[2].endorse(&hash),
        ]);
        world
            .server
            .update_oev_proxy_data_feed_with_signed_data(SEARCHER, request)
            .unwrap();

        assert_eq!(
            world.server.oev_proxy_data_feed(&PROXY, &feed),
            DataFeedRecord::new(FeedValue::from(2_000), NOW)
        );
        assert_eq!(
            world.server.drain_events().last().map(FeedEvent::name),
            Some("UpdatedOevProxyBeaconSetWithSignedData")
        );
    }

    #[test]
    fn test_one_of_three_fails_quorum() {
        let mut world = World::new();
        let airnodes = three_airnodes();
        let feed = beacon_set_id(&[&airnodes[0], &airnodes[1], &airnodes[2]]);
        let bid = OevBid::new(feed, 2_000, NOW, 50);
        let hash = bid.update_hash();

        let request = bid.request(vec![
            airnodes[0].abstain(),
            airnodes[1].endorse(&hash),
            airnodes[2].abstain(),
        ]);
        let err = world
            .server
            .update_oev_proxy_data_feed_with_signed_data(SEARCHER, request)
            .unwrap_err();

        assert_eq!(err, DataFeedError::QuorumNotMet { valid: 1, required: 2 });
        assert_eq!(err.category(), ErrorCategory::Authorization);
        assert_eq!(world.server.oev_proxy_balance(&PROXY), U256::zero());
        assert!(world.server.events().is_empty());
    }

    #[test]
    fn test_endorsement_for_other_proxy_is_rejected() {
        let mut world = World::new();
        let airnode = Airnode::new(1);
        let bid = OevBid::new(airnode.beacon_id(), 7, NOW, 1);
        let mut request = bid.request(vec![airnode.endorse(&bid.update_hash())]);
        request.proxy = Address::new([0x01; 20]);

        assert!(matches!(
            world
                .server
                .update_oev_proxy_data_feed_with_signed_data(SEARCHER, request),
            Err(DataFeedError::SignatureMismatch { .. })
        ));
    }

    #[test]
    fn test_update_id_is_bound_but_not_stored() {
        let mut world = World::new();
        let airnode = Airnode::new(1);
        let mut bid = OevBid::new(airnode.beacon_id(), 7, NOW, 1);
        bid.update_id = Hash::new([0x77; 32]);
        let request = bid.request(vec![airnode.endorse(&bid.update_hash())]);

        world
            .server
            .update_oev_proxy_data_feed_with_signed_data(SEARCHER, request)
            .unwrap();
        assert_eq!(
            world.server.drain_events(),
            vec![FeedEvent::UpdatedOevProxyBeaconWithSignedData {
                beacon_id: airnode.beacon_id(),
                proxy: PROXY,
                update_id: Hash::new([0x77; 32]),
                value: FeedValue::from(7),
                timestamp: NOW,
            }]
        );
    }

    // =========================================================================
    // PROXY READS
    // =========================================================================

    #[test]
    fn test_fresher_record_wins_for_proxy() {
        let mut world = World::new();
        let airnode = Airnode::new(1);
        let feed = airnode.beacon_id();
        world.push(&airnode, 100, NOW - 60);

        let bid = OevBid::new(feed, 105, NOW - 30, 10);
        world
            .server
            .update_oev_proxy_data_feed_with_signed_data(
                SEARCHER,
                bid.request(vec![airnode.endorse(&bid.update_hash())]),
            )
            .unwrap();

        assert_eq!(
            world.server.read_data_feed_with_id_as_oev_proxy(&PROXY, &feed),
            Ok(DataFeedRecord::new(FeedValue::from(105), NOW - 30))
        );
        // Other proxies and plain reads keep seeing the base feed
        assert_eq!(
            world
                .server
                .read_data_feed_with_id_as_oev_proxy(&Address::new([0x02; 20]), &feed),
            Ok(DataFeedRecord::new(FeedValue::from(100), NOW - 60))
        );

        world.push(&airnode, 101, NOW);
        assert_eq!(
            world.server.read_data_feed_with_id_as_oev_proxy(&PROXY, &feed),
            Ok(DataFeedRecord::new(FeedValue::from(101), NOW))
        );
    }

    #[test]
    fn test_equal_timestamps_prefer_base() {
        let mut world = World::new();
        let airnode = Airnode::new(1);
        let feed = airnode.beacon_id();
        world.push(&airnode, 100, NOW);

        let bid = OevBid::new(feed, 999, NOW, 0);
        world
            .server
            .update_oev_proxy_data_feed_with_signed_data(
                SEARCHER,
                bid.request(vec![airnode.endorse(&bid.update_hash())]),
            )
            .unwrap();

        assert_eq!(
            world.server.read_data_feed_with_id_as_oev_proxy(&PROXY, &feed),
            Ok(DataFeedRecord::new(FeedValue::from(100), NOW))
        );
    }

    #[test]
    fn test_override_without_base_is_readable() {
        let mut world = World::new();
        let airnode = Airnode::new(1);
        let feed = airnode.beacon_id();

        assert_eq!(
            world.server.read_data_feed_with_id_as_oev_proxy(&PROXY, &feed),
            Err(DataFeedError::FeedUninitialized)
        );

        let bid = OevBid::new(feed, 5, NOW, 0);
        world
            .server
            .update_oev_proxy_data_feed_with_signed_data(
                SEARCHER,
                bid.request(vec![airnode.endorse(&bid.update_hash())]),
            )
            .unwrap();
        assert_eq!(
            world.server.read_data_feed_with_id_as_oev_proxy(&PROXY, &feed),
            Ok(DataFeedRecord::new(FeedValue::from(5), NOW))
        );
        assert_eq!(
            world.server.read_data_feed_with_id(&feed),
            Err(DataFeedError::FeedUninitialized)
        );
    }

    // =========================================================================
    // SETTLEMENT
    // =========================================================================

    #[test]
    fn test_withdrawal_pays_exact_sum_once() {
        let mut world = World::new();
        let airnode = Airnode::new(1);
        let feed = airnode.beacon_id();

        for (i, amount) in [30u64, 12, 0, 58].into_iter().enumerate() {
            let bid = OevBid::new(feed, 1, NOW - 100 + i as u32, amount);
            world
                .server
                .update_oev_proxy_data_feed_with_signed_data(
                    SEARCHER,
                    bid.request(vec![airnode.endorse(&bid.update_hash())]),
                )
                .unwrap();
        }
        assert_eq!(world.server.oev_proxy_balance(&PROXY), U256::from(100u64));

        assert_eq!(world.server.withdraw(PROXY), Ok(U256::from(100u64)));
        assert_eq!(world.env.ledger.balance_of(&BENEFICIARY), U256::from(100u64));
        assert_eq!(world.server.withdraw(PROXY), Err(DataFeedError::BalanceZero));
        assert_eq!(world.env.ledger.balance_of(&BENEFICIARY), U256::from(100u64));

        let events = world.server.drain_events();
        assert_eq!(
            events.last(),
            Some(&FeedEvent::Withdrew {
                oev_proxy: PROXY,
                oev_beneficiary: BENEFICIARY,
                amount: U256::from(100u64),
            })
        );
    }

    #[test]
    fn test_refused_withdrawal_can_be_retried() {
        let mut world = World::new();
        let airnode = Airnode::new(1);
        let bid = OevBid::new(airnode.beacon_id(), 1, NOW, 25);
        world
            .server
            .update_oev_proxy_data_feed_with_signed_data(
                SEARCHER,
                bid.request(vec![airnode.endorse(&bid.update_hash())]),
            )
            .unwrap();

        world.env.ledger.set_refusing(BENEFICIARY, true);
        assert!(matches!(
            world.server.withdraw(PROXY),
            Err(DataFeedError::TransferReverted { .. })
        ));
        assert_eq!(world.server.oev_proxy_balance(&PROXY), U256::from(25u64));

        world.env.ledger.set_refusing(BENEFICIARY, false);
        assert_eq!(world.server.withdraw(PROXY), Ok(U256::from(25u64)));
    }

    #[test]
    fn test_withdraw_without_beneficiary() {
        let mut world = World::new();
        world
            .env
            .proxies
            .set_beneficiary(PROXY, Address::ZERO);
        assert_eq!(world.server.withdraw(PROXY), Err(DataFeedError::BeneficiaryZero));
    }
}
