//! # Authenticator Benchmarks
//!
//! | Path | Work |
//! |------|------|
//! | typed-data digest | 3 Keccak-256 over fixed-size buffers |
//! | signer recovery | secp256k1 public key recovery + address derivation |
//! | authenticate (accept) | digest + recovery + ledger commit |
//! | authenticate (reject) | digest + recovery, no commit |
//! | JSON request | decode + authenticate + encode |

use authenticator::{
    recover_address, AuthenticatorApi, AuthenticatorService, EcdsaSignature, EventBusAdapter,
    RequestHandler,
};
use authenticator_tests::fixtures::*;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use shared_bus::InMemoryEventBus;
use shared_types::U256;
use std::sync::Arc;
use std::time::Duration;

fn bench_digest(c: &mut Criterion) {
    let mut group = c.benchmark_group("authenticator/digest");
    let deployment = local_deployment();
    let domain = deployment.service.domain().clone();
    let user = address(USER);

    group.bench_function("authenticate_digest", |b| {
        b.iter(|| black_box(domain.authenticate_digest(black_box(&user), U256::from(7))))
    });

    group.finish();
}

fn bench_recovery(c: &mut Criterion) {
    let mut group = c.benchmark_group("authenticator/recovery");
    let deployment = local_deployment();
    let digest = deployment
        .service
        .domain()
        .authenticate_digest(&address(USER), U256::zero());
    let sig = EcdsaSignature::from_bytes(&signature(USER_SIG_NONCE_0)).expect("fixture");

    group.bench_function("recover_address", |b| {
        b.iter(|| black_box(recover_address(black_box(&digest), black_box(&sig))))
    });

    group.finish();
}

fn bench_authenticate(c: &mut Criterion) {
    let mut group = c.benchmark_group("authenticator/authenticate");
    group.measurement_time(Duration::from_secs(10));
    let user = address(USER);
    let good = signature(USER_SIG_NONCE_0);
    let forged = signature(RELAYER_SIG_FOR_USER_NONCE_0);

    // Each accepted call consumes the nonce, so every iteration gets a fresh registry
    group.bench_function("accept", |b| {
        b.iter_batched(
            || local_deployment().service,
            |registry| black_box(registry.authenticate(&user, &good)),
            BatchSize::SmallInput,
        )
    });

    let registry = local_deployment().service;
    group.bench_function("reject_wrong_signer", |b| {
        b.iter(|| black_box(registry.authenticate(&user, &forged)))
    });

    group.bench_function("reject_malformed", |b| {
        b.iter(|| black_box(registry.authenticate(&user, &[0u8; 65])))
    });

    group.finish();
}

fn bench_many_users(c: &mut Criterion) {
    let mut group = c.benchmark_group("authenticator/many_users");
    group.sample_size(10);

    for count in [10usize, 100] {
        let users: Vec<_> = (0..count).map(|_| random_user()).collect();
        let probe = local_deployment().service;
        let signed: Vec<_> = users
            .iter()
            .map(|(key, user)| (*user, sign(key, probe.domain(), user, 0)))
            .collect();

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("first_login", count), &signed, |b, signed| {
            b.iter_batched(
                || local_deployment().service,
                |registry: Arc<AuthenticatorService>| {
                    for (user, sig) in signed {
                        black_box(registry.authenticate(user, sig).is_ok());
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_json_request(c: &mut Criterion) {
    let mut group = c.benchmark_group("authenticator/json");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");

    let handler = RequestHandler::new(EventBusAdapter::new(
        local_deployment().service,
        Arc::new(InMemoryEventBus::new()),
    ));
    let query = format!(r#"{{"method":"get_nonce","user":"{}"}}"#, USER);

    group.bench_function("get_nonce", |b| {
        b.iter(|| black_box(runtime.block_on(handler.handle_json(&query))))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_digest,
    bench_recovery,
    bench_authenticate,
    bench_many_users,
    bench_json_request
);
criterion_main!(benches);
