//! Codec integration tests: blobs produced by one configuration and read back
//! through the public API only.

mod blob_test;
mod signature_test;
