//! Prepared-geometry cache.
//!
//! Predicates evaluated in a scan usually hold one operand fixed while the other
//! changes row by row. The cache remembers the blobs it has seen and, when one of
//! them shows up again, hands out a prepared engine geometry for it so the fixed
//! operand is prepared only once.
//!
//! Slots are matched by [`BlobSignature`] (size, CRC32 and the signature prefix)
//! and prepared lazily on the first hit.

use std::collections::VecDeque;

use geolith::codec::BlobSignature;
use geolith::geometry::GeometryCollection;
use log::debug;

use crate::bridge::{to_engine, ExportMode};
use crate::config::CachePolicy;
use crate::prepared::OwnedPreparedGeometry;
use crate::stats::RelationStats;

/// Which operand the prepared geometry of a hit stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreparedSide {
    First,
    Second,
}

/// Outcome of [`PreparedCache::eval`].
#[derive(Debug)]
pub enum CacheLookup<'a> {
    /// `prepared` is the operand on `side`; test it against the other operand.
    Hit {
        prepared: &'a OwnedPreparedGeometry,
        side: PreparedSide,
    },
    Miss,
}

impl CacheLookup<'_> {
    pub fn is_hit(&self) -> bool {
        matches!(self, CacheLookup::Hit { .. })
    }
}

#[derive(Debug, Default)]
pub struct CacheSlot {
    signature: Option<BlobSignature>,
    prepared: Option<OwnedPreparedGeometry>,
}

impl CacheSlot {
    pub fn signature(&self) -> Option<&BlobSignature> {
        self.signature.as_ref()
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared.is_some()
    }

    fn matches(&self, blob: &[u8]) -> bool {
        self.signature.as_ref().is_some_and(|s| s.matches(blob))
    }

    fn is_occupied(&self) -> bool {
        self.signature.is_some()
    }

    fn assign(&mut self, blob: &[u8]) {
        self.prepared = None;
        self.signature = Some(BlobSignature::of(blob));
    }

    fn clear(&mut self) {
        self.prepared = None;
        self.signature = None;
    }
}

/// Per-connection cache of prepared engine geometries.
///
/// Not synchronized: a cache belongs to one context and one thread.
#[derive(Debug)]
pub struct PreparedCache {
    policy: CachePolicy,
    // usage order for LRU: front is the least recently used
    slots: VecDeque<CacheSlot>,
    stats: RelationStats,
}

impl PreparedCache {
    pub fn new(policy: CachePolicy) -> Self {
        Self::with_stats(policy, RelationStats::new())
    }

    /// Cache reporting hits, misses and evictions into `stats`.
    pub fn with_stats(policy: CachePolicy, stats: RelationStats) -> Self {
        let slots = match policy {
            CachePolicy::TwoSlot => VecDeque::from([CacheSlot::default(), CacheSlot::default()]),
            CachePolicy::Lru(n) => VecDeque::with_capacity(n.max(1)),
        };
        PreparedCache {
            policy,
            slots,
            stats,
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_occupied()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn slot(&self, index: usize) -> Option<&CacheSlot> {
        self.slots.get(index)
    }

    /// Signature held by slot `index`. In LRU mode slots are in usage order.
    pub fn slot_signature(&self, index: usize) -> Option<&BlobSignature> {
        self.slots.get(index).and_then(|s| s.signature())
    }

    /// Drops every slot and its engine handles.
    pub fn reset(&mut self) {
        match self.policy {
            CachePolicy::TwoSlot => self.slots.iter_mut().for_each(CacheSlot::clear),
            CachePolicy::Lru(_) => self.slots.clear(),
        }
    }

    /// Looks both operands up and returns a prepared geometry for the first match.
    ///
    /// In two-slot mode the match order is A against slot 1, B against slot 1,
    /// A against slot 2, then B against slot 2; a full miss overwrites slot 1 with
    /// A and slot 2 with B. A matching slot whose geometry cannot be prepared is
    /// reported as a miss without looking further.
    pub fn eval<'a>(
        &'a mut self,
        a: &GeometryCollection,
        blob_a: &[u8],
        b: &GeometryCollection,
        blob_b: &[u8],
    ) -> CacheLookup<'a> {
        let found = match self.policy {
            CachePolicy::TwoSlot => self.find_two_slot(blob_a, blob_b),
            CachePolicy::Lru(_) => self.find_lru(blob_a, blob_b),
        };

        let Some((index, side)) = found else {
            self.register_miss(blob_a, blob_b);
            self.stats.record_cache_miss();
            debug!("Prepared cache miss, slots refreshed");
            return CacheLookup::Miss;
        };

        let geom = match side {
            PreparedSide::First => a,
            PreparedSide::Second => b,
        };
        let slot = &mut self.slots[index];
        if slot.prepared.is_none() {
            slot.prepared = prepare(geom);
        }
        match slot.prepared.as_ref() {
            Some(prepared) => {
                self.stats.record_cache_hit();
                debug!("Prepared cache hit on slot {} ({:?} operand)", index, side);
                CacheLookup::Hit { prepared, side }
            }
            None => {
                self.stats.record_cache_miss();
                CacheLookup::Miss
            }
        }
    }

    fn find_two_slot(&self, blob_a: &[u8], blob_b: &[u8]) -> Option<(usize, PreparedSide)> {
        for index in 0..self.slots.len() {
            if self.slots[index].matches(blob_a) {
                return Some((index, PreparedSide::First));
            }
            if self.slots[index].matches(blob_b) {
                return Some((index, PreparedSide::Second));
            }
        }
        None
    }

    fn find_lru(&mut self, blob_a: &[u8], blob_b: &[u8]) -> Option<(usize, PreparedSide)> {
        let (index, side) = self
            .slots
            .iter()
            .position(|s| s.matches(blob_a))
            .map(|i| (i, PreparedSide::First))
            .or_else(|| {
                self.slots
                    .iter()
                    .position(|s| s.matches(blob_b))
                    .map(|i| (i, PreparedSide::Second))
            })?;
        // most recently used goes to the back
        let slot = self.slots.remove(index)?;
        self.slots.push_back(slot);
        Some((self.slots.len() - 1, side))
    }

    fn register_miss(&mut self, blob_a: &[u8], blob_b: &[u8]) {
        match self.policy {
            CachePolicy::TwoSlot => {
                let evicted = self.slots.iter().filter(|s| s.is_occupied()).count();
                if evicted > 0 {
                    self.stats.record_cache_evictions(evicted as u64);
                    debug!("Prepared cache evicted {} slot(s)", evicted);
                }
                self.slots[0].assign(blob_a);
                self.slots[1].assign(blob_b);
            }
            CachePolicy::Lru(capacity) => {
                let capacity = capacity.max(1);
                let same = blob_a == blob_b;
                let blobs: &[&[u8]] = if same { &[blob_a] } else { &[blob_a, blob_b] };
                for blob in blobs {
                    let mut slot = CacheSlot::default();
                    slot.assign(blob);
                    self.slots.push_back(slot);
                    if self.slots.len() > capacity {
                        self.slots.pop_front();
                        self.stats.record_cache_evictions(1);
                        debug!("Prepared cache evicted least recently used slot");
                    }
                }
            }
        }
    }
}

fn prepare(geom: &GeometryCollection) -> Option<OwnedPreparedGeometry> {
    let engine = match to_engine(geom, ExportMode::All) {
        Ok(Some(engine)) => engine,
        Ok(None) => {
            debug!("Nothing to prepare for cached operand");
            return None;
        }
        Err(err) => {
            debug!("Cannot convert cached operand: {}", err);
            return None;
        }
    };
    OwnedPreparedGeometry::try_new(engine)
        .inspect_err(|err| debug!("Cannot prepare cached operand: {}", err))
        .ok()
}
