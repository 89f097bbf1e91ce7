//! Gap classification for the prime stream.
//!
//! Consumes adjacent prime pairs in stream order and maintains one
//! aggregate record per distinct gap value, with O(1) additional memory
//! per gap family regardless of how many primes share the gap.

/// Streaming accumulator mapping gap sizes to aggregate statistics.
///
/// Exposes the single mutating pair operation plus ordered read-only
/// queries over the accumulated families.
pub mod accumulator;

/// Aggregate record for one gap family.
///
/// Tracks the occurrence count, the high-precision running product of
/// contribution terms, the independent log-domain sum, and a capped
/// witness sample.
pub mod family;
