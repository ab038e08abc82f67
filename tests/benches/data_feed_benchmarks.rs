//! # Data Feed Benchmarks
//!
//! | Path | Work per call |
//! |------|---------------|
//! | Signed Beacon update | 1 signature recovery + decode |
//! | Beacon set aggregation | 2 medians over n records |
//! | OEV Beacon set update | up to n signature recoveries |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dfa_02_data_feed_server::domain::median::median;
use dfa_02_data_feed_server::prelude::*;
use dfa_tests::fixtures::{beacon_set_id, Airnode, OevBid, World, NOW, SEARCHER};
use rand::Rng;
use std::time::Duration;

fn bench_beacon_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("dfa-beacon-update");
    group.measurement_time(Duration::from_secs(10));

    let airnode = Airnode::new(1);
    let updates: Vec<_> = (0..1_000u32)
        .map(|i| airnode.sign(i64::from(i), NOW - 1_000 + i))
        .collect();

    group.throughput(Throughput::Elements(updates.len() as u64));
    group.bench_function("signed_update_sequence", |b| {
        b.iter_batched(
            World::new,
            |mut world| {
                for update in &updates {
                    black_box(world.server.update_beacon_with_signed_data(update.clone()).is_ok());
                }
            },
            criterion::BatchSize::LargeInput,
        )
    });
    group.finish();
}

fn bench_median(c: &mut Criterion) {
    let mut group = c.benchmark_group("dfa-median");
    let mut rng = rand::thread_rng();

    for size in [3usize, 7, 21, 101] {
        let values: Vec<FeedValue> = (0..size)
            .map(|_| FeedValue::from(rng.gen_range(-1_000_000_000i64..1_000_000_000)))
            .collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("feed_values", size), &values, |b, values| {
            b.iter(|| black_box(median(&mut values.clone())))
        });
    }
    group.finish();
}

fn bench_oev_quorum(c: &mut Criterion) {
    let mut group = c.benchmark_group("dfa-oev-quorum");
    group.measurement_time(Duration::from_secs(10));

    for size in [3usize, 7, 15] {
        let airnodes: Vec<Airnode> = (0..size).map(|i| Airnode::new(i as u8)).collect();
        let refs: Vec<&Airnode> = airnodes.iter().collect();
        let feed = beacon_set_id(&refs);
        let bid = OevBid::new(feed, 1, NOW, 1);
        let hash = bid.update_hash();
        let request = bid.request(airnodes.iter().map(|a| a.endorse(&hash)).collect());

        group.bench_with_input(BenchmarkId::new("all_signed", size), &request, |b, request| {
            b.iter_batched(
                World::new,
                |mut world| {
                    black_box(
                        world
                            .server
                            .update_oev_proxy_data_feed_with_signed_data(SEARCHER, request.clone())
                            .is_ok(),
                    )
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_beacon_update, bench_median, bench_oev_quorum);
criterion_main!(benches);
