use std::time::Duration;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tls_session_cache::{ManualClock, SessionCache, SessionCacheConfig, SessionHandle};

const ENTRIES: usize = 1024;

fn keys(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("server-{i}.example.com:443")).collect()
}

fn filled_cache(
    keys: &[String],
    check_count: u32,
) -> (SessionCache<u64>, SessionHandle<u64>, ManualClock) {
    let clock = ManualClock::new();
    let config = SessionCacheConfig::default()
        .with_max_entries(ENTRIES)
        .with_timeout(Duration::from_secs(3600))
        .with_expiration_check_count(check_count);
    let mut cache = SessionCache::with_clock(config, clock.clone());
    let session = SessionHandle::new(0);
    for key in keys.iter().take(ENTRIES) {
        cache.insert(key, &session);
    }
    (cache, session, clock)
}

fn bench_insert_lookup(c: &mut Criterion) {
    let keys = keys(ENTRIES * 2);
    c.bench_function("session_cache_insert_lookup", |b| {
        b.iter_batched(
            || filled_cache(&keys, 256),
            |(mut cache, session, _clock)| {
                for i in 0..ENTRIES {
                    cache.insert(std::hint::black_box(&keys[ENTRIES + i]), &session);
                    let _ = std::hint::black_box(cache.lookup(std::hint::black_box(&keys[i])));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lookup_hit_random(c: &mut Criterion) {
    let keys = keys(ENTRIES);
    let mut rng = StdRng::seed_from_u64(42);
    let order: Vec<usize> = (0..4096).map(|_| rng.gen_range(0..ENTRIES)).collect();
    c.bench_function("session_cache_lookup_hit_random", |b| {
        b.iter_batched(
            || filled_cache(&keys, 256),
            |(mut cache, _session, _clock)| {
                for &i in &order {
                    let _ = std::hint::black_box(cache.lookup(&keys[i]));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_eviction_churn(c: &mut Criterion) {
    let keys = keys(ENTRIES * 5);
    c.bench_function("session_cache_eviction_churn", |b| {
        b.iter_batched(
            || filled_cache(&keys, 256),
            |(mut cache, session, _clock)| {
                for key in &keys[ENTRIES..] {
                    cache.insert(std::hint::black_box(key), &session);
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_sweep_period(c: &mut Criterion) {
    let keys = keys(ENTRIES);
    let mut group = c.benchmark_group("session_cache_sweep_period");
    for check_count in [1u32, 16, 256] {
        group.bench_function(format!("check_count_{check_count}"), |b| {
            b.iter_batched(
                || filled_cache(&keys, check_count),
                |(mut cache, _session, _clock)| {
                    for key in keys.iter().take(512) {
                        let _ = std::hint::black_box(cache.lookup(key));
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_expired_sweep(c: &mut Criterion) {
    let keys = keys(ENTRIES);
    c.bench_function("session_cache_flush_expired", |b| {
        b.iter_batched(
            || {
                let (cache, session, clock) = filled_cache(&keys, 256);
                clock.advance(Duration::from_secs(7200));
                (cache, session, clock)
            },
            |(mut cache, _session, _clock)| std::hint::black_box(cache.flush_expired()),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_insert_lookup,
    bench_lookup_hit_random,
    bench_eviction_churn,
    bench_sweep_period,
    bench_expired_sweep
);
criterion_main!(benches);
