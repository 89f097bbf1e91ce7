//! Segmented prime-gap analysis library.
//!
//! This crate provides a memory-bounded prime-gap analysis system including:
//! - A one-shot small-prime oracle producing the sieving divisors
//! - A segmented, lazily evaluated prime stream for very large ranges
//! - An adjacent prime-pair adapter with an explicit end-of-stream signal
//! - A streaming gap-classification accumulator with high-precision products
//! - A delimited text report writer for the final statistics
//!
//! Only the high-level API is exposed publicly. Memory stays bounded by the
//! segment width plus the sieving divisors, no matter how large the range is.

/// Sieving engines and stream adapters.
///
/// This module exposes the small-prime oracle, the segmented prime stream
/// and the adjacent prime-pair adapter.
pub mod sieve;

/// Gap classification and aggregation.
///
/// Consumes adjacent prime pairs and maintains per-gap aggregate statistics
/// with bounded memory per gap family.
pub mod analysis;

/// Delimited text report rendering.
///
/// Serializes the final gap-family statistics to the persisted artifact.
pub mod report;
