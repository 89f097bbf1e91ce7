//! Sieving subsystem for the prime-gap analysis pipeline.
//!
//! This module provides the three cooperating stream components:
//! - A one-shot full sieve for the small sieving divisors (`small_primes`)
//! - A segmented, memory-bounded prime stream (`stream`)
//! - A look-behind adapter turning the stream into adjacent pairs (`pairs`)

/// Small-prime oracle: full sieve over `[0, sqrt(limit)]`.
///
/// Produces the ordered, immutable list of sieving divisors shared
/// read-only by every segment.
pub mod small_primes;

/// Segmented prime stream over `[2, limit]`.
///
/// Walks fixed-width segments forward, marking composites with the
/// small-prime divisors and lazily draining each segment's survivors.
pub mod stream;

/// Adjacent prime-pair adapter.
///
/// Buffers one look-behind element to pair each prime with its successor,
/// ending with an explicit no-successor signal for the final prime.
pub mod pairs;
