//! TTL-keyed store of computed trade plans, keyed by canonical coin id.
//!
//! Staleness is a read-time classification: a stale entry is reported as
//! a miss but stays in storage until the next `put` overwrites it. There
//! is no size bound and no eviction; the key space grows with the number
//! of distinct coins ever analyzed.
//!
//! The cache deliberately provides no single-flight de-duplication. Two
//! concurrent misses for the same key may both fetch upstream and both
//! write; the later `put` wins.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use coinplan_models::AnalysisResult;

/// Default freshness window: 5 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

struct CacheEntry {
    result: AnalysisResult,
    stored_at: Instant,
}

/// In-memory plan cache with read-time TTL classification.
pub struct PlanCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl PlanCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached plan for `coin_id` if it is still fresh.
    /// Stale entries are reported as a miss and left in place.
    pub fn get(&self, coin_id: &str) -> Option<AnalysisResult> {
        let entries = self.lock();
        let entry = entries.get(coin_id)?;
        if entry.stored_at.elapsed() < self.ttl {
            tracing::debug!(coin_id, "Plan cache hit");
            Some(entry.result.clone())
        } else {
            tracing::debug!(coin_id, "Plan cache entry stale");
            None
        }
    }

    /// Store a plan, unconditionally overwriting any previous entry and
    /// resetting its freshness window.
    pub fn put(&self, coin_id: &str, result: AnalysisResult) {
        let mut entries = self.lock();
        entries.insert(
            coin_id.to_string(),
            CacheEntry {
                result,
                stored_at: Instant::now(),
            },
        );
    }

    /// Number of stored entries, stale ones included.
    pub fn entry_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CacheEntry>> {
        // Entries are plain data, so a poisoned lock is still usable.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for PlanCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result(price: &str) -> AnalysisResult {
        AnalysisResult {
            current_price: price.to_string(),
            entry: "40000.00".to_string(),
            exit: "45000.00".to_string(),
            stop_loss: "39200.00".to_string(),
            take_profit_1: "45000.00".to_string(),
            take_profit_2: "45800.00".to_string(),
            atr: "800.00".to_string(),
            narrative: "test".to_string(),
        }
    }

    #[test]
    fn put_then_get_returns_stored_plan() {
        let cache = PlanCache::new(Duration::from_secs(300));
        cache.put("bitcoin", sample_result("42000.00"));

        let hit = cache.get("bitcoin");
        assert_eq!(hit, Some(sample_result("42000.00")));
    }

    #[test]
    fn get_missing_key() {
        let cache = PlanCache::default();
        assert!(cache.get("dogecoin").is_none());
    }

    #[tokio::test]
    async fn stale_entry_is_a_miss_but_stays_in_storage() {
        let cache = PlanCache::new(Duration::from_millis(20));
        cache.put("bitcoin", sample_result("42000.00"));

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(cache.get("bitcoin").is_none());
        assert_eq!(cache.entry_count(), 1);
    }

    #[tokio::test]
    async fn put_resets_freshness() {
        let cache = PlanCache::new(Duration::from_millis(40));
        cache.put("bitcoin", sample_result("42000.00"));

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(cache.get("bitcoin").is_none());

        cache.put("bitcoin", sample_result("43000.00"));
        assert_eq!(cache.get("bitcoin"), Some(sample_result("43000.00")));
        assert_eq!(cache.entry_count(), 1);
    }

    #[test]
    fn later_put_wins() {
        let cache = PlanCache::default();
        cache.put("bitcoin", sample_result("42000.00"));
        cache.put("bitcoin", sample_result("42500.00"));

        let hit = cache.get("bitcoin").unwrap();
        assert_eq!(hit.current_price, "42500.00");
        assert_eq!(cache.entry_count(), 1);
    }
}
