//! Seeded property tests over randomly generated geometries.

mod bridge_property_test;
mod cache_property_test;
mod codec_property_test;
mod mbr_property_test;
