//! Relation layer configuration.

use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU64, AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;

/// End cap style of buffered lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndCap {
    Round,
    Flat,
    Square,
}

impl EndCap {
    fn to_u8(self) -> u8 {
        match self {
            EndCap::Round => 0,
            EndCap::Flat => 1,
            EndCap::Square => 2,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => EndCap::Flat,
            2 => EndCap::Square,
            _ => EndCap::Round,
        }
    }
}

impl From<EndCap> for geos::CapStyle {
    fn from(cap: EndCap) -> Self {
        match cap {
            EndCap::Round => geos::CapStyle::Round,
            EndCap::Flat => geos::CapStyle::Flat,
            EndCap::Square => geos::CapStyle::Square,
        }
    }
}

/// Join style of buffered corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Join {
    Round,
    Mitre,
    Bevel,
}

impl Join {
    fn to_u8(self) -> u8 {
        match self {
            Join::Round => 0,
            Join::Mitre => 1,
            Join::Bevel => 2,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => Join::Mitre,
            2 => Join::Bevel,
            _ => Join::Round,
        }
    }
}

impl From<Join> for geos::JoinStyle {
    fn from(join: Join) -> Self {
        match join {
            Join::Round => geos::JoinStyle::Round,
            Join::Mitre => geos::JoinStyle::Mitre,
            Join::Bevel => geos::JoinStyle::Bevel,
        }
    }
}

/// Replacement policy of the prepared-geometry cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Two slots, both overwritten on every full miss.
    TwoSlot,
    /// Up to `n` slots evicted in least-recently-used order.
    Lru(usize),
}

impl CachePolicy {
    // 0 encodes TwoSlot, anything else is an LRU capacity
    fn encode(self) -> usize {
        match self {
            CachePolicy::TwoSlot => 0,
            CachePolicy::Lru(n) => n.max(1),
        }
    }

    fn decode(value: usize) -> Self {
        match value {
            0 => CachePolicy::TwoSlot,
            n => CachePolicy::Lru(n),
        }
    }
}

/// Default quadrant segments used by buffer: 30
pub const DEFAULT_BUFFER_QUADRANT_SEGMENTS: i32 = 30;

/// Default buffer end cap: round
pub const DEFAULT_BUFFER_END_CAP: EndCap = EndCap::Round;

/// Default buffer join: round
pub const DEFAULT_BUFFER_JOIN: Join = Join::Round;

/// Default mitre limit: 5.0
pub const DEFAULT_BUFFER_MITRE_LIMIT: f64 = 5.0;

/// Default cache policy: two slots
pub const DEFAULT_CACHE_POLICY: CachePolicy = CachePolicy::TwoSlot;

/// Default MBR pre-check: enabled
pub const DEFAULT_MBR_PRECHECK: bool = true;

/// Default Voronoi frame extension: 5 percent of the input extent
pub const DEFAULT_VORONOI_EXTRA_FRAME: f64 = 5.0;

/// Relation layer configuration wrapper.
///
/// A cloneable, thread-safe holder for the options a [`crate::RelationContext`]
/// reads on every call. Clones share state.
///
/// # Example
///
/// ```rust
/// use geolith_geos::config::{CachePolicy, EndCap, RelationConfig};
///
/// let config = RelationConfig::new()
///     .with_buffer_quadrant_segments(8)
///     .with_buffer_end_cap(EndCap::Flat)
///     .with_cache_policy(CachePolicy::Lru(4));
/// assert_eq!(config.buffer_quadrant_segments(), 8);
/// assert_eq!(config.cache_policy(), CachePolicy::Lru(4));
/// ```
#[derive(Clone)]
pub struct RelationConfig {
    inner: Arc<RelationConfigInner>,
}

struct RelationConfigInner {
    buffer_quadrant_segments: AtomicI32,
    buffer_end_cap: AtomicU8,
    buffer_join: AtomicU8,
    /// f64 bits
    buffer_mitre_limit: AtomicU64,
    cache_policy: AtomicUsize,
    mbr_precheck: AtomicBool,
    /// f64 bits
    voronoi_extra_frame: AtomicU64,
}

impl RelationConfig {
    #[inline]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RelationConfigInner::new()),
        }
    }

    /// Quadrant segments used by buffer when the caller gives none.
    #[inline]
    pub fn buffer_quadrant_segments(&self) -> i32 {
        self.inner.buffer_quadrant_segments.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn set_buffer_quadrant_segments(&self, segments: i32) {
        self.inner
            .buffer_quadrant_segments
            .store(segments, Ordering::Relaxed);
    }

    #[inline]
    pub fn with_buffer_quadrant_segments(self, segments: i32) -> Self {
        self.set_buffer_quadrant_segments(segments);
        self
    }

    #[inline]
    pub fn buffer_end_cap(&self) -> EndCap {
        EndCap::from_u8(self.inner.buffer_end_cap.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn set_buffer_end_cap(&self, cap: EndCap) {
        self.inner.buffer_end_cap.store(cap.to_u8(), Ordering::Relaxed);
    }

    #[inline]
    pub fn with_buffer_end_cap(self, cap: EndCap) -> Self {
        self.set_buffer_end_cap(cap);
        self
    }

    #[inline]
    pub fn buffer_join(&self) -> Join {
        Join::from_u8(self.inner.buffer_join.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn set_buffer_join(&self, join: Join) {
        self.inner.buffer_join.store(join.to_u8(), Ordering::Relaxed);
    }

    #[inline]
    pub fn with_buffer_join(self, join: Join) -> Self {
        self.set_buffer_join(join);
        self
    }

    #[inline]
    pub fn buffer_mitre_limit(&self) -> f64 {
        f64::from_bits(self.inner.buffer_mitre_limit.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn set_buffer_mitre_limit(&self, limit: f64) {
        self.inner
            .buffer_mitre_limit
            .store(limit.to_bits(), Ordering::Relaxed);
    }

    #[inline]
    pub fn with_buffer_mitre_limit(self, limit: f64) -> Self {
        self.set_buffer_mitre_limit(limit);
        self
    }

    /// Policy a new [`crate::cache::PreparedCache`] is created with.
    #[inline]
    pub fn cache_policy(&self) -> CachePolicy {
        CachePolicy::decode(self.inner.cache_policy.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn set_cache_policy(&self, policy: CachePolicy) {
        self.inner
            .cache_policy
            .store(policy.encode(), Ordering::Relaxed);
    }

    #[inline]
    pub fn with_cache_policy(self, policy: CachePolicy) -> Self {
        self.set_cache_policy(policy);
        self
    }

    /// When off, every predicate is sent to the engine.
    #[inline]
    pub fn mbr_precheck(&self) -> bool {
        self.inner.mbr_precheck.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn set_mbr_precheck(&self, enabled: bool) {
        self.inner.mbr_precheck.store(enabled, Ordering::Relaxed);
    }

    #[inline]
    pub fn with_mbr_precheck(self, enabled: bool) -> Self {
        self.set_mbr_precheck(enabled);
        self
    }

    /// Percentage of the input extent added around a Voronoi diagram's frame.
    #[inline]
    pub fn voronoi_extra_frame(&self) -> f64 {
        f64::from_bits(self.inner.voronoi_extra_frame.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn set_voronoi_extra_frame(&self, percent: f64) {
        self.inner
            .voronoi_extra_frame
            .store(percent.to_bits(), Ordering::Relaxed);
    }

    #[inline]
    pub fn with_voronoi_extra_frame(self, percent: f64) -> Self {
        self.set_voronoi_extra_frame(percent);
        self
    }
}

impl Default for RelationConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RelationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelationConfig")
            .field("buffer_quadrant_segments", &self.buffer_quadrant_segments())
            .field("buffer_end_cap", &self.buffer_end_cap())
            .field("buffer_join", &self.buffer_join())
            .field("buffer_mitre_limit", &self.buffer_mitre_limit())
            .field("cache_policy", &self.cache_policy())
            .field("mbr_precheck", &self.mbr_precheck())
            .field("voronoi_extra_frame", &self.voronoi_extra_frame())
            .finish()
    }
}

impl RelationConfigInner {
    fn new() -> Self {
        Self {
            buffer_quadrant_segments: AtomicI32::new(DEFAULT_BUFFER_QUADRANT_SEGMENTS),
            buffer_end_cap: AtomicU8::new(DEFAULT_BUFFER_END_CAP.to_u8()),
            buffer_join: AtomicU8::new(DEFAULT_BUFFER_JOIN.to_u8()),
            buffer_mitre_limit: AtomicU64::new(DEFAULT_BUFFER_MITRE_LIMIT.to_bits()),
            cache_policy: AtomicUsize::new(DEFAULT_CACHE_POLICY.encode()),
            mbr_precheck: AtomicBool::new(DEFAULT_MBR_PRECHECK),
            voronoi_extra_frame: AtomicU64::new(DEFAULT_VORONOI_EXTRA_FRAME.to_bits()),
        }
    }
}
