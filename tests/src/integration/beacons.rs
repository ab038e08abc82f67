//! # Beacon and Beacon Set Flows
//!
//! Signed updates from several Airnodes, aggregated into Beacon sets and read
//! back through the server API.

#[cfg(test)]
mod tests {
    use crate::fixtures::{Airnode, World, NOW};
    use dfa_02_data_feed_server::prelude::*;

    // =========================================================================
    // BEACONS
    // =========================================================================

    #[test]
    fn test_signed_update_is_readable() {
        let mut world = World::new();
        let airnode = Airnode::new(1);

        let beacon_id = world.push(&airnode, 3_000_000_000, NOW);
        assert_eq!(beacon_id, airnode.beacon_id());
        assert_eq!(
            world.server.read_data_feed_with_id(&beacon_id),
            Ok(DataFeedRecord::new(FeedValue::from(3_000_000_000), NOW))
        );
    }

    #[test]
    fn test_replayed_update_is_rejected() {
        let mut world = World::new();
        let airnode = Airnode::new(1);
        let update = airnode.sign(1, NOW);

        world
            .server
            .update_beacon_with_signed_data(update.clone())
            .unwrap();
        let err = world.server.update_beacon_with_signed_data(update).unwrap_err();

        assert_eq!(err, DataFeedError::StaleUpdate { stored: NOW, submitted: NOW });
        assert_eq!(err.to_string(), format!("Does not update timestamp: stored {NOW}, submitted {NOW}"));
        assert_eq!(world.server.drain_events().len(), 1);
    }

    #[test]
    fn test_update_signed_for_other_template_is_rejected() {
        let mut world = World::new();
        let airnode = Airnode::new(1);
        let other = Airnode::new(2);

        let mut update = airnode.sign(1, NOW);
        update.template_id = other.template_id;
        assert!(matches!(
            world.server.update_beacon_with_signed_data(update),
            Err(DataFeedError::SignatureMismatch { .. })
        ));
    }

    #[test]
    fn test_range_boundaries_through_signed_updates() {
        let mut world = World::new();
        let airnode = Airnode::new(1);
        let cases = [
            // 2^223
            ("0000000080000000000000000000000000000000000000000000000000000000", false),
            // 2^223 - 1
            ("000000007fffffffffffffffffffffffffffffffffffffffffffffffffffffff", true),
            // -2^223 - 1
            ("ffffffff7fffffffffffffffffffffffffffffffffffffffffffffffffffffff", false),
            // -2^223
            ("ffffffff80000000000000000000000000000000000000000000000000000000", true),
        ];

        for (offset, (word, accepted)) in cases.into_iter().enumerate() {
            let update = airnode.sign_raw(hex::decode(word).unwrap(), NOW - 10 + offset as u32);
            let result = world.server.update_beacon_with_signed_data(update);
            if accepted {
                assert!(result.is_ok(), "{word} should be accepted");
            } else {
                assert_eq!(result, Err(DataFeedError::ValueOutOfRange), "{word}");
            }
        }

        let record = world.server.read_data_feed_with_id(&airnode.beacon_id()).unwrap();
        assert_eq!(record.value, FeedValue::MIN);
    }

    #[test]
    fn test_payload_length_is_checked() {
        let mut world = World::new();
        let airnode = Airnode::new(1);
        assert_eq!(
            world
                .server
                .update_beacon_with_signed_data(airnode.sign_raw(vec![0u8; 33], NOW)),
            Err(DataFeedError::DataLengthInvalid(33))
        );
    }

    // =========================================================================
    // BEACON SETS
    // =========================================================================

    #[test]
    fn test_beacon_set_median_of_three() {
        let mut world = World::new();
        let airnodes = [Airnode::new(1), Airnode::new(2), Airnode::new(3)];
        let ids = [
            world.push(&airnodes[0], 100, NOW - 30),
            world.push(&airnodes[1], 80, NOW - 20),
            world.push(&airnodes[2], 120, NOW - 10),
        ];

        let set_id = world.server.update_beacon_set_with_beacons(&ids).unwrap();
        assert_eq!(set_id, derive_beacon_set_id(&ids));
        assert_eq!(
            world.server.read_data_feed_with_id(&set_id),
            Ok(DataFeedRecord::new(FeedValue::from(100), NOW - 20))
        );
    }

    #[test]
    fn test_beacon_set_noop_then_value_change() {
        let mut world = World::new();
        let airnodes = [Airnode::new(1), Airnode::new(2), Airnode::new(3)];
        let ids = [
            world.push(&airnodes[0], 100, NOW - 30),
            world.push(&airnodes[1], 80, NOW - 20),
            world.push(&airnodes[2], 120, NOW - 10),
        ];
        world.server.update_beacon_set_with_beacons(&ids).unwrap();

        assert_eq!(
            world.server.update_beacon_set_with_beacons(&ids),
            Err(DataFeedError::NoChange)
        );

        // Oldest source moves to 110; the timestamp median stays NOW - 20
        world.push(&airnodes[0], 110, NOW - 25);
        let set_id = world.server.update_beacon_set_with_beacons(&ids).unwrap();
        let record = world.server.read_data_feed_with_id(&set_id).unwrap();
        assert_eq!(record.value, FeedValue::from(110));
        assert_eq!(record.timestamp, NOW - 20);
    }

    #[test]
    fn test_beacon_set_with_negative_values() {
        let mut world = World::new();
        let airnodes = [Airnode::new(1), Airnode::new(2)];
        let ids = [
            world.push(&airnodes[0], -3, NOW - 1),
            world.push(&airnodes[1], -4, NOW),
        ];

        let set_id = world.server.update_beacon_set_with_beacons(&ids).unwrap();
        let record = world.server.read_data_feed_with_id(&set_id).unwrap();
        // -3.5 truncates toward zero; timestamps (2n - 1) / 2 truncate down
        assert_eq!(record.value, FeedValue::from(-3));
        assert_eq!(record.timestamp, NOW - 1);
    }

    #[test]
    fn test_beacon_set_requires_two_members() {
        let mut world = World::new();
        let airnode = Airnode::new(1);
        let id = world.push(&airnode, 1, NOW);

        assert_eq!(
            world.server.update_beacon_set_with_beacons(&[id]),
            Err(DataFeedError::InsufficientMembers(1))
        );
        assert_eq!(
            world.server.stats().calls(Operation::UpdateBeaconSet).rejected,
            1
        );
    }

    #[test]
    fn test_beacon_set_events_serialize() {
        let mut world = World::new();
        let airnodes = [Airnode::new(1), Airnode::new(2)];
        let ids = [world.push(&airnodes[0], 1, NOW), world.push(&airnodes[1], 3, NOW)];
        world.server.update_beacon_set_with_beacons(&ids).unwrap();

        let events = world.server.drain_events();
        let names: Vec<&str> = events.iter().map(FeedEvent::name).collect();
        assert_eq!(
            names,
            [
                "UpdatedBeaconWithSignedData",
                "UpdatedBeaconWithSignedData",
                "UpdatedBeaconSetWithBeacons"
            ]
        );

        let json = serde_json::to_string(&events[2]).unwrap();
        assert!(json.contains("UpdatedBeaconSetWithBeacons"));
    }
}
