//! Codec configuration.
//!
//! This module provides the options used when geometries are written as blobs.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

/// Byte order of a written blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    LittleEndian,
    BigEndian,
}

impl ByteOrder {
    /// Endian marker stored at offset 1 of a blob.
    pub fn marker(self) -> u8 {
        match self {
            ByteOrder::LittleEndian => 0x01,
            ByteOrder::BigEndian => 0x00,
        }
    }

    pub fn from_marker(marker: u8) -> Option<Self> {
        match marker {
            0x01 => Some(ByteOrder::LittleEndian),
            0x00 => Some(ByteOrder::BigEndian),
            _ => None,
        }
    }
}

/// Default byte order: little endian
pub const DEFAULT_BYTE_ORDER: ByteOrder = ByteOrder::LittleEndian;

/// Default compression: off
pub const DEFAULT_COMPRESSED: bool = false;

/// Codec configuration wrapper.
///
/// A cloneable, thread-safe holder for blob writer options. Clones share state.
///
/// # Example
///
/// ```rust
/// use geolith::config::{ByteOrder, CodecConfig};
///
/// let config = CodecConfig::new()
///     .with_byte_order(ByteOrder::BigEndian)
///     .with_compressed(true);
/// assert!(config.compressed());
/// ```
#[derive(Clone)]
pub struct CodecConfig {
    inner: Arc<CodecConfigInner>,
}

struct CodecConfigInner {
    /// Endian marker of the byte order to write.
    byte_order: AtomicU8,

    /// Whether linestrings and rings are delta-compressed.
    compressed: AtomicBool,
}

impl CodecConfig {
    /// Creates a configuration with default values (little endian, uncompressed).
    #[inline]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(CodecConfigInner::new()),
        }
    }

    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        ByteOrder::from_marker(self.inner.byte_order.load(Ordering::Relaxed))
            .unwrap_or(DEFAULT_BYTE_ORDER)
    }

    #[inline]
    pub fn set_byte_order(&self, order: ByteOrder) {
        self.inner
            .byte_order
            .store(order.marker(), Ordering::Relaxed);
    }

    /// Builder-style method for chaining.
    #[inline]
    pub fn with_byte_order(self, order: ByteOrder) -> Self {
        self.set_byte_order(order);
        self
    }

    #[inline]
    pub fn compressed(&self) -> bool {
        self.inner.compressed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn set_compressed(&self, compressed: bool) {
        self.inner.compressed.store(compressed, Ordering::Relaxed);
    }

    /// Builder-style method for chaining.
    #[inline]
    pub fn with_compressed(self, compressed: bool) -> Self {
        self.set_compressed(compressed);
        self
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CodecConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecConfig")
            .field("byte_order", &self.byte_order())
            .field("compressed", &self.compressed())
            .finish()
    }
}

impl CodecConfigInner {
    fn new() -> Self {
        Self {
            byte_order: AtomicU8::new(DEFAULT_BYTE_ORDER.marker()),
            compressed: AtomicBool::new(DEFAULT_COMPRESSED),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_config_new() {
        let config = CodecConfig::new();
        assert_eq!(config.byte_order(), ByteOrder::LittleEndian);
        assert!(!config.compressed());
    }

    #[test]
    fn test_codec_config_builder() {
        let config = CodecConfig::default()
            .with_byte_order(ByteOrder::BigEndian)
            .with_compressed(true);
        assert_eq!(config.byte_order(), ByteOrder::BigEndian);
        assert!(config.compressed());
    }

    #[test]
    fn test_codec_config_clone_shares_state() {
        let config1 = CodecConfig::new();
        let config2 = config1.clone();
        config1.set_compressed(true);
        assert!(config2.compressed());
    }

    #[test]
    fn test_byte_order_markers() {
        assert_eq!(ByteOrder::from_marker(0x01), Some(ByteOrder::LittleEndian));
        assert_eq!(ByteOrder::from_marker(0x00), Some(ByteOrder::BigEndian));
        assert_eq!(ByteOrder::from_marker(0x02), None);
    }
}
