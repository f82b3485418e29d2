//! Binary blob format.
//!
//! ```text
//! 0x00 | endian | srid:i32 | min_x min_y max_x max_y:f64 | 0x7C | class:i32 | payload | 0xFE
//! ```
//!
//! The endian marker is 0x01 for little endian and 0x00 for big endian, and every
//! multi-byte field that follows uses that order. Class codes are the base kind
//! (1 to 7) plus 1000 for Z, 2000 for M and 3000 for ZM; compressed linestrings and
//! polygons add 1000000. Collection payloads are an entity count followed by
//! `0x69 | class:i32 | payload` per element, written as points, then linestrings,
//! then polygons.

mod class;
mod header;
mod reader;
mod signature;
mod writer;

pub use class::{
    BlobClass, BLOB_END, BLOB_ENTITY, BLOB_MBR_END, BLOB_START, CLASS_OFFSET, HEADER_LEN, MIN_BLOB_LEN,
    SIGNATURE_LEN,
};
pub use header::BlobHeader;
pub use reader::{deserialize, is_valid_blob};
pub use signature::BlobSignature;
pub use writer::{serialize, serialize_compressed, serialize_with};
