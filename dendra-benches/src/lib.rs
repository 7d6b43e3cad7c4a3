//! Benchmark support crate for dendra.
//!
//! Provides seeded synthetic point sets and parameter types used by the
//! Criterion benchmarks for linkage construction and traversal.

pub mod error;
pub mod params;
pub mod source;
