use super::class::SIGNATURE_LEN;

/// Identity of a blob as seen by the prepared-geometry cache.
///
/// Two blobs are considered the same geometry when their size, CRC32 and first
/// [`SIGNATURE_LEN`] bytes all agree. Blobs shorter than the prefix are padded
/// with zeros.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobSignature {
    prefix: [u8; SIGNATURE_LEN],
    size: usize,
    crc32: u32,
}

impl BlobSignature {
    pub fn of(blob: &[u8]) -> BlobSignature {
        let mut prefix = [0u8; SIGNATURE_LEN];
        let n = blob.len().min(SIGNATURE_LEN);
        prefix[..n].copy_from_slice(&blob[..n]);
        BlobSignature {
            prefix,
            size: blob.len(),
            crc32: crc32fast::hash(blob),
        }
    }

    pub fn prefix(&self) -> &[u8; SIGNATURE_LEN] {
        &self.prefix
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn crc32(&self) -> u32 {
        self.crc32
    }

    /// Cheap check of `blob` against this signature without building a new one.
    pub fn matches(&self, blob: &[u8]) -> bool {
        if blob.len() != self.size {
            return false;
        }
        let n = blob.len().min(SIGNATURE_LEN);
        blob[..n] == self.prefix[..n] && crc32fast::hash(blob) == self.crc32
    }
}
