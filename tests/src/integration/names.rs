//! # dAPI Name Flows
//!
//! Name indirection on reads, role-gated name assignment, and batched calls.

#[cfg(test)]
mod tests {
    use crate::fixtures::{beacon_set_id, Airnode, OevBid, World, MANAGER, NOW, PROXY, SEARCHER};
    use dfa_02_data_feed_server::prelude::*;

    fn name(label: &str) -> Hash {
        let mut bytes = [0u8; 32];
        bytes[..label.len()].copy_from_slice(label.as_bytes());
        Hash::new(bytes)
    }

    #[test]
    fn test_name_reads_match_id_reads() {
        let mut world = World::new();
        let airnode = Airnode::new(1);
        let feed = world.push(&airnode, 42, NOW - 5);
        let dapi_name = name("ETH/USD");
        world.server.set_dapi_name(MANAGER, dapi_name, feed).unwrap();

        let bid = OevBid::new(feed, 43, NOW, 0);
        world
            .server
            .update_oev_proxy_data_feed_with_signed_data(
                SEARCHER,
                bid.request(vec![airnode.endorse(&bid.update_hash())]),
            )
            .unwrap();

        let name_hash = dapi_name_hash(&dapi_name);
        assert_eq!(
            world.server.read_data_feed_with_dapi_name_hash(&name_hash),
            world.server.read_data_feed_with_id(&feed)
        );
        assert_eq!(
            world
                .server
                .read_data_feed_with_dapi_name_hash_as_oev_proxy(&PROXY, &name_hash),
            world.server.read_data_feed_with_id_as_oev_proxy(&PROXY, &feed)
        );
    }

    #[test]
    fn test_repointing_and_clearing() {
        let mut world = World::new();
        let a = Airnode::new(1);
        let b = Airnode::new(2);
        let feed_a = world.push(&a, 1, NOW);
        let feed_b = world.push(&b, 2, NOW);
        let dapi_name = name("BTC/USD");
        let name_hash = dapi_name_hash(&dapi_name);

        world.server.set_dapi_name(MANAGER, dapi_name, feed_a).unwrap();
        world.server.set_dapi_name(MANAGER, dapi_name, feed_b).unwrap();
        assert_eq!(
            world.server.read_data_feed_with_dapi_name_hash(&name_hash).map(|r| r.value),
            Ok(FeedValue::from(2))
        );

        world.server.set_dapi_name(MANAGER, dapi_name, Hash::ZERO).unwrap();
        assert_eq!(
            world.server.read_data_feed_with_dapi_name_hash(&name_hash),
            Err(DataFeedError::NameNotSet)
        );
        // Clearing the name keeps the feed itself
        assert!(world.server.read_data_feed_with_id(&feed_b).is_ok());
    }

    #[test]
    fn test_name_pointing_at_unwritten_feed() {
        let mut world = World::new();
        let a = Airnode::new(1);
        let b = Airnode::new(2);
        let dapi_name = name("SOL/USD");
        world
            .server
            .set_dapi_name(MANAGER, dapi_name, beacon_set_id(&[&a, &b]))
            .unwrap();

        assert_eq!(
            world
                .server
                .read_data_feed_with_dapi_name_hash(&dapi_name_hash(&dapi_name)),
            Err(DataFeedError::FeedUninitialized)
        );
    }

    #[test]
    fn test_setter_role_is_derived_from_manager() {
        let mut world = World::new();
        let setter = Address::new([0x22; 20]);
        let role = dapi_name_setter_role(
            &MANAGER,
            &world.server.config().admin_role_description,
            "dAPI name setter",
        );
        assert_eq!(role, world.server.dapi_name_setter_role());

        world.env.access_control.grant_role(role, setter);
        assert!(world
            .server
            .set_dapi_name(setter, name("ETH/USD"), Hash::new([1; 32]))
            .is_ok());

        world.env.access_control.revoke_role(&role, &setter);
        assert_eq!(
            world
                .server
                .set_dapi_name(setter, name("ETH/USD"), Hash::new([2; 32])),
            Err(DataFeedError::PermissionDenied { account: setter })
        );
    }

    #[test]
    fn test_multicall_sets_up_named_beacon_set() {
        let mut world = World::new();
        let a = Airnode::new(1);
        let b = Airnode::new(2);
        let dapi_name = name("ETH/USD");
        let set_id = beacon_set_id(&[&a, &b]);

        let outputs = world
            .server
            .multicall(vec![
                FeedCall::UpdateBeaconWithSignedData(a.sign(100, NOW)),
                FeedCall::UpdateBeaconWithSignedData(b.sign(102, NOW)),
                FeedCall::UpdateBeaconSetWithBeacons(vec![a.beacon_id(), b.beacon_id()]),
                FeedCall::SetDapiName {
                    sender: MANAGER,
                    dapi_name,
                    data_feed_id: set_id,
                },
            ])
            .unwrap();

        assert_eq!(outputs[2], CallOutput::DataFeedId(set_id));
        assert_eq!(
            world
                .server
                .read_data_feed_with_dapi_name_hash(&dapi_name_hash(&dapi_name)),
            Ok(DataFeedRecord::new(FeedValue::from(101), NOW))
        );
    }

    #[test]
    fn test_failed_multicall_leaves_nothing_behind() {
        let mut world = World::new();
        let a = Airnode::new(1);
        let stranger = Address::new([0x33; 20]);

        let err = world
            .server
            .multicall(vec![
                FeedCall::UpdateBeaconWithSignedData(a.sign(100, NOW)),
                FeedCall::SetDapiName {
                    sender: stranger,
                    dapi_name: name("ETH/USD"),
                    data_feed_id: a.beacon_id(),
                },
            ])
            .unwrap_err();

        assert_eq!(err.index, 1);
        assert_eq!(err.error, DataFeedError::PermissionDenied { account: stranger });
        assert_eq!(world.server.data_feed(&a.beacon_id()), DataFeedRecord::EMPTY);
        assert!(world.server.events().is_empty());
    }
}
