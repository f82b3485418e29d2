//! Counters of a relation context.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Point-in-time copy of [`RelationStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelationStatsSnapshot {
    pub engine_calls: u64,
    pub mbr_short_circuits: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub cache_evictions: u64,
    pub toxic_rejections: u64,
}

/// Live counters, cloneable so callers can keep watching after handing the
/// context away. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct RelationStats {
    inner: Arc<RelationStatsInner>,
}

#[derive(Debug, Default)]
struct RelationStatsInner {
    engine_calls: AtomicU64,
    mbr_short_circuits: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    cache_evictions: AtomicU64,
    toxic_rejections: AtomicU64,
}

impl RelationStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_engine_call(&self) {
        self.inner.engine_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_short_circuit(&self) {
        self.inner.mbr_short_circuits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_cache_hit(&self) {
        self.inner.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_cache_miss(&self) {
        self.inner.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_cache_evictions(&self, count: u64) {
        self.inner
            .cache_evictions
            .fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn record_toxic_rejection(&self) {
        self.inner.toxic_rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn engine_calls(&self) -> u64 {
        self.inner.engine_calls.load(Ordering::Relaxed)
    }

    pub fn mbr_short_circuits(&self) -> u64 {
        self.inner.mbr_short_circuits.load(Ordering::Relaxed)
    }

    pub fn cache_hits(&self) -> u64 {
        self.inner.cache_hits.load(Ordering::Relaxed)
    }

    pub fn cache_misses(&self) -> u64 {
        self.inner.cache_misses.load(Ordering::Relaxed)
    }

    pub fn cache_evictions(&self) -> u64 {
        self.inner.cache_evictions.load(Ordering::Relaxed)
    }

    pub fn toxic_rejections(&self) -> u64 {
        self.inner.toxic_rejections.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.inner.engine_calls.store(0, Ordering::Relaxed);
        self.inner.mbr_short_circuits.store(0, Ordering::Relaxed);
        self.inner.cache_hits.store(0, Ordering::Relaxed);
        self.inner.cache_misses.store(0, Ordering::Relaxed);
        self.inner.cache_evictions.store(0, Ordering::Relaxed);
        self.inner.toxic_rejections.store(0, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> RelationStatsSnapshot {
        RelationStatsSnapshot {
            engine_calls: self.engine_calls(),
            mbr_short_circuits: self.mbr_short_circuits(),
            cache_hits: self.cache_hits(),
            cache_misses: self.cache_misses(),
            cache_evictions: self.cache_evictions(),
            toxic_rejections: self.toxic_rejections(),
        }
    }
}
