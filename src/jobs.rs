//! Background job definitions — the periodic workers behind the service.
//!
//! Every job only reads the shared store; each keeps its own counters, so
//! one job failing (or lying about the chain) cannot disturb another.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use rand::Rng;
use trailpass_core::TrailPassConfig;
use trailpass_scheduler::ScheduledJob;
use trailpass_store::CheckInStore;

/// Build the standard job set: chain monitoring, trail statistics, health
/// sampling, and the chain-network update stub.
pub fn background_jobs(
    config: &TrailPassConfig,
    store: Arc<dyn CheckInStore>,
    started: Instant,
) -> Vec<ScheduledJob> {
    vec![
        chain_monitor(Duration::from_secs(config.jobs.chain_monitor_secs)),
        trail_stats(Duration::from_secs(config.jobs.trail_stats_secs), store.clone()),
        health(Duration::from_secs(config.jobs.health_secs), store, started),
        network_updates(
            Duration::from_secs(config.jobs.network_secs),
            config.chain.network.clone(),
        ),
    ]
}

/// Simulated blockchain poll. A real deployment would query a chain
/// indexer here; the stub randomly "finds" an on-chain check-in.
fn chain_monitor(period: Duration) -> ScheduledJob {
    let found_total = Arc::new(AtomicU64::new(0));
    ScheduledJob::new("chain-monitor", period, move || {
        let found_total = found_total.clone();
        async move {
            tracing::info!("🔍 Monitoring chain for new check-ins...");
            let discovered = {
                let mut rng = rand::thread_rng();
                if rng.gen_bool(0.3) {
                    Some(format!("addr_test_{}", random_suffix(&mut rng, 8)))
                } else {
                    None
                }
            };
            if let Some(wallet) = discovered {
                let total = found_total.fetch_add(1, Ordering::Relaxed) + 1;
                tracing::info!("✅ Found new on-chain check-in from {wallet} ({total} so far)");
            }
            Ok(())
        }
    })
}

/// Aggregate statistics over the store.
fn trail_stats(period: Duration, store: Arc<dyn CheckInStore>) -> ScheduledJob {
    ScheduledJob::new("trail-stats", period, move || {
        let store = store.clone();
        async move {
            let stats = store.stats();
            tracing::info!(
                "📊 Trail statistics: {} total check-ins, {} unique wallets",
                stats.total_check_ins,
                stats.distinct_wallets
            );
            if !stats.per_trail.is_empty() {
                let mut popular: Vec<_> = stats.per_trail.iter().collect();
                popular.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
                let line = popular
                    .iter()
                    .map(|(name, count)| format!("{name}: {count}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                tracing::info!("🏆 Popular trails: {line}");
            }
            Ok(())
        }
    })
}

/// Process health sample.
fn health(period: Duration, store: Arc<dyn CheckInStore>, started: Instant) -> ScheduledJob {
    ScheduledJob::new("health", period, move || {
        let store = store.clone();
        async move {
            let stats = store.stats();
            tracing::info!(
                "❤️ System health: {}s uptime, {} check-ins in store",
                started.elapsed().as_secs(),
                stats.total_check_ins
            );
            Ok(())
        }
    })
}

/// Chain-network poll stub; logs only until a real node connection exists.
fn network_updates(period: Duration, network: String) -> ScheduledJob {
    ScheduledJob::new("network-updates", period, move || {
        let network = network.clone();
        async move {
            tracing::info!("⛓️ {network} network: checking for new blocks and transactions...");
            Ok(())
        }
    })
}

fn random_suffix(rng: &mut impl Rng, len: usize) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}
