//! The in-memory store implementation.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex, RwLock};

use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use trailpass_core::{Result, TrailPassError};

use crate::record::{CheckInRecord, NewCheckIn};

/// Storage contract for check-in events. Handlers and background jobs only
/// see this trait, so the in-memory implementation can be swapped in tests
/// (or for a persistent backend later) without touching either.
pub trait CheckInStore: Send + Sync {
    /// Append a validated check-in at the head of the wallet's sequence.
    /// The store stamps the timestamp and issues a unique transaction id;
    /// the completed record is returned to the caller.
    fn append(&self, wallet_address: &str, check_in: NewCheckIn) -> Result<CheckInRecord>;

    /// Snapshot of a wallet's check-ins, newest first. Empty for unknown
    /// wallets — that is the "not found" representation, not an error.
    fn history(&self, wallet_address: &str) -> Vec<CheckInRecord>;

    /// Aggregate counts over the whole store, from a point-in-time view
    /// that may trail appends still in flight.
    fn stats(&self) -> StoreStats;
}

/// Aggregate counters over the store.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub total_check_ins: usize,
    pub distinct_wallets: usize,
    /// trail name → number of check-ins referencing it.
    pub per_trail: HashMap<String, usize>,
}

const TX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const TX_LEN: usize = 9;
const TX_MAX_ATTEMPTS: usize = 8;

/// Volatile in-memory store: wallet → newest-first deque of records.
///
/// Locking is two-level: the outer map lock is held only to find or create
/// a wallet's shard, and each shard has its own lock for the actual
/// mutation, so appends to different wallets run concurrently. A single
/// coarse lock would be correct but would serialize unrelated wallets.
/// The issued-id set has its own mutex, held only while drawing a token.
pub struct MemoryStore {
    wallets: RwLock<HashMap<String, Arc<RwLock<VecDeque<CheckInRecord>>>>>,
    issued: Mutex<HashSet<String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            wallets: RwLock::new(HashMap::new()),
            issued: Mutex::new(HashSet::new()),
        }
    }

    /// Draw a fresh `tx_`-prefixed token, retrying on collision. The token
    /// space is 36^9, so retries only matter in pathological RNG states;
    /// running out of attempts is surfaced as a store error.
    fn next_transaction_id(&self) -> Result<String> {
        let mut rng = rand::thread_rng();
        let mut issued = self.issued.lock().unwrap();
        for _ in 0..TX_MAX_ATTEMPTS {
            let token: String = (0..TX_LEN)
                .map(|_| TX_ALPHABET[rng.gen_range(0..TX_ALPHABET.len())] as char)
                .collect();
            let id = format!("tx_{token}");
            if issued.insert(id.clone()) {
                return Ok(id);
            }
        }
        Err(TrailPassError::Store(
            "failed to generate a unique transaction id".into(),
        ))
    }

    /// Find or create the shard for a wallet. The outer write lock is held
    /// only for the map entry, never for the shard mutation.
    fn shard(&self, wallet_address: &str) -> Arc<RwLock<VecDeque<CheckInRecord>>> {
        {
            let map = self.wallets.read().unwrap();
            if let Some(shard) = map.get(wallet_address) {
                return shard.clone();
            }
        }
        let mut map = self.wallets.write().unwrap();
        map.entry(wallet_address.to_string())
            .or_insert_with(|| Arc::new(RwLock::new(VecDeque::new())))
            .clone()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckInStore for MemoryStore {
    fn append(&self, wallet_address: &str, check_in: NewCheckIn) -> Result<CheckInRecord> {
        let record = CheckInRecord {
            trail_id: check_in.trail_id,
            trail_name: check_in.trail_name,
            difficulty: check_in.difficulty,
            wallet_address: wallet_address.to_string(),
            timestamp: Utc::now(),
            transaction_id: self.next_transaction_id()?,
        };

        let shard = self.shard(wallet_address);
        shard.write().unwrap().push_front(record.clone());

        tracing::debug!(
            "🗂 Stored check-in {} for {} ({})",
            record.transaction_id,
            record.wallet_address,
            record.trail_name
        );
        Ok(record)
    }

    fn history(&self, wallet_address: &str) -> Vec<CheckInRecord> {
        let shard = {
            let map = self.wallets.read().unwrap();
            map.get(wallet_address).cloned()
        };
        match shard {
            Some(shard) => shard.read().unwrap().iter().cloned().collect(),
            None => Vec::new(),
        }
    }

    fn stats(&self) -> StoreStats {
        let map = self.wallets.read().unwrap();
        let mut stats = StoreStats::default();
        for shard in map.values() {
            let records = shard.read().unwrap();
            // A shard created by an append that has not pushed yet is
            // invisible to the aggregates.
            if records.is_empty() {
                continue;
            }
            stats.distinct_wallets += 1;
            stats.total_check_ins += records.len();
            for record in records.iter() {
                *stats.per_trail.entry(record.trail_name.clone()).or_insert(0) += 1;
            }
        }
        stats
    }
}
