//! # Reactive-Oracle Relay Benchmarks
//!
//! Per-hop cost of mirroring one price update:
//!
//! | Hop | Operation |
//! |-----|-----------|
//! | ro-02 Reactive Relay | `validate_log` on accepted and rejected logs |
//! | ro-02 Reactive Relay | `build_callback` |
//! | shared-types | `updatePrice` calldata encode / decode |
//! | all | origin submit → relay → proxy, end to end |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use std::time::Duration;

use ro_01_origin_feed::AnswerUpdated;
use ro_02_reactive_relay::{build_callback, validate_log, RelayConfig, ValidationOutcome};
use ro_tests::fixtures::{Pipeline, FEED, PROXY, RVM_ID, T0};
use shared_types::callback::UpdatePriceCall;
use shared_types::constants::{domain_separator, ORIGIN_CHAIN_ID};
use shared_types::entities::{BlockContext, LogRecord, RoundData};

fn origin_log(round_id: u64, answer: i128) -> LogRecord {
    let round = RoundData {
        round_id,
        answer,
        started_at: T0,
        updated_at: T0 + round_id,
        answered_in_round: round_id,
    };
    AnswerUpdated::for_round(&round).to_log(
        ORIGIN_CHAIN_ID,
        FEED,
        &BlockContext::new(ORIGIN_CHAIN_ID, round_id, T0 + round_id),
    )
}

// ============================================================================
// RO-02: Log Validation
// ============================================================================

fn bench_validate_log(c: &mut Criterion) {
    let mut group = c.benchmark_group("ro-02-validate-log");
    let config = RelayConfig::new(FEED, PROXY);

    let accepted = origin_log(2, 3_110_000_000_000);
    group.bench_function("accepted", |b| {
        b.iter(|| black_box(validate_log(&config, black_box(&accepted))))
    });

    let mut wrong_chain = accepted.clone();
    wrong_chain.chain_id = 1;
    group.bench_function("rejected_wrong_chain", |b| {
        b.iter(|| black_box(validate_log(&config, black_box(&wrong_chain))))
    });

    let mut malformed = accepted.clone();
    malformed.data.0[32] = 0xff;
    group.bench_function("rejected_malformed", |b| {
        b.iter(|| black_box(validate_log(&config, black_box(&malformed))))
    });

    group.finish();
}

// ============================================================================
// RO-02: Callback Construction
// ============================================================================

fn bench_build_callback(c: &mut Criterion) {
    let mut group = c.benchmark_group("ro-02-build-callback");
    let config = RelayConfig::new(FEED, PROXY);

    let event = match validate_log(&config, &origin_log(2, 3_110_000_000_000)) {
        ValidationOutcome::Accepted(event) => event,
        ValidationOutcome::Rejected(reason) => panic!("fixture log rejected: {reason}"),
    };

    group.bench_function("single", |b| {
        b.iter(|| black_box(build_callback(&config, black_box(&event))))
    });

    group.finish();
}

// ============================================================================
// SHARED: updatePrice Calldata
// ============================================================================

fn bench_update_price_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared-update-price-codec");
    let mut rng = rand::thread_rng();

    let call = UpdatePriceCall {
        rvm_id: RVM_ID,
        domain_separator: domain_separator(),
        round_id: 2,
        answer: rng.gen_range(-1_000_000_000_000i128..1_000_000_000_000_000),
        started_at: T0 + 2,
        updated_at: T0 + 2,
        answered_in_round: 2,
    };
    let calldata = call.encode();

    group.bench_function("encode", |b| b.iter(|| black_box(black_box(&call).encode())));
    group.bench_function("decode", |b| {
        b.iter(|| black_box(UpdatePriceCall::decode(black_box(&calldata))))
    });

    group.finish();
}

// ============================================================================
// END TO END
// ============================================================================

fn bench_relay_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("ro-pipeline");
    group.measurement_time(Duration::from_secs(5));

    for updates in [1u64, 10, 100] {
        group.throughput(Throughput::Elements(updates));
        group.bench_with_input(
            BenchmarkId::new("relay_price", updates),
            &updates,
            |b, &updates| {
                b.iter_with_setup(Pipeline::deploy, |mut pipeline| {
                    for i in 0..updates {
                        let synced = pipeline.relay_price(3_000_000_000_000 + i128::from(i));
                        black_box(synced.is_ok());
                    }
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_validate_log,
    bench_build_callback,
    bench_update_price_codec,
    bench_relay_pipeline,
);

criterion_main!(benches);
