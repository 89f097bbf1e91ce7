use bitvec::prelude::*;

use super::small_primes::{integer_sqrt, simple_sieve};

/// Lazy, memory-bounded stream of all primes in `[2, limit]`.
///
/// The candidate range `[0, limit]` is partitioned into fixed-width
/// segments walked forward contiguously; each segment is sieved with the
/// shared small-prime divisors, its survivors are drained in order, and its
/// buffer is discarded before the next segment begins. The final segment is
/// clipped to the limit.
///
/// # Responsibilities
/// - Produce every prime in `[2, limit]` exactly once, strictly increasing
/// - Bound working memory to one segment plus the small-prime list
/// - Fail fast on an invalid segment size instead of looping forever
///
/// # Invariants
/// - `small_primes` holds all primes `<= sqrt(limit)`, immutable after
///   construction
/// - Within each segment, the first marked multiple of a divisor `p` is
///   the greater of `p * p` and the smallest segment-resident multiple of
///   `p`; starting below that would mark the divisor itself
///
/// # Notes
/// - Dropping the iterator early releases the in-progress segment buffer;
///   nothing is retained across pulls besides the segment cursor.
#[derive(Debug)]
pub struct SegmentedPrimeStream {
	limit: u64,
	segment_size: u64,
	small_primes: Vec<u64>,
	low: u64,
	segment: Vec<u64>,
	cursor: usize,
}

impl SegmentedPrimeStream {
	/// Creates a stream of all primes in `[2, limit]`.
	///
	/// # Parameters
	/// - `limit`: Inclusive upper bound of the analyzed range. A limit
	///   below 2 yields an empty stream.
	/// - `segment_size`: Width of each sieved segment.
	///
	/// # Errors
	/// Returns an error if `segment_size` is zero.
	pub fn new(limit: u64, segment_size: u64) -> Result<Self, String> {
		if segment_size == 0 {
			return Err("Segment size must be strictly positive".to_owned());
		}

		let small_primes = simple_sieve(integer_sqrt(limit));
		log::debug!(
			"Sieving divisors up to sqrt({}): {} primes",
			limit,
			small_primes.len()
		);

		Ok(Self {
			limit,
			segment_size,
			small_primes,
			low: 0,
			segment: Vec::new(),
			cursor: 0,
		})
	}

	/// Inclusive upper bound of the analyzed range.
	pub fn limit(&self) -> u64 {
		self.limit
	}

	/// Sieves the segment starting at `self.low` and advances past it.
	fn sieve_next_segment(&mut self) {
		let low = self.low;
		let high = low.saturating_add(self.segment_size - 1).min(self.limit);
		let width = (high - low + 1) as usize;

		// true = not yet proven composite
		let mut candidates = bitvec![1; width];

		for &p in &self.small_primes {
			// Divisors are sorted; once p * p leaves the segment no later
			// divisor can mark anything either.
			if p * p > high {
				break;
			}

			// First multiple of p inside the segment, never below p * p:
			// smaller multiples were eliminated by smaller divisors, and
			// p itself must survive.
			let first_in_segment = low.div_ceil(p) * p;
			let mut multiple = first_in_segment.max(p * p);
			while multiple <= high {
				candidates.set((multiple - low) as usize, false);
				multiple += p;
			}
		}

		self.segment.clear();
		for (offset, keep) in candidates.iter().by_vals().enumerate() {
			let value = low + offset as u64;
			if keep && value >= 2 {
				self.segment.push(value);
			}
		}
		self.cursor = 0;

		log::trace!("Segment [{}, {}]: {} primes", low, high, self.segment.len());
		self.low = high + 1;
	}
}

impl Iterator for SegmentedPrimeStream {
	type Item = u64;

	fn next(&mut self) -> Option<u64> {
		loop {
			if self.cursor < self.segment.len() {
				let prime = self.segment[self.cursor];
				self.cursor += 1;
				return Some(prime);
			}
			if self.low > self.limit {
				return None;
			}
			self.sieve_next_segment();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rejects_zero_segment_size() {
		assert!(SegmentedPrimeStream::new(100, 0).is_err());
	}

	#[test]
	fn empty_below_two() {
		for limit in [0, 1] {
			let stream = SegmentedPrimeStream::new(limit, 10).unwrap();
			assert_eq!(stream.count(), 0);
		}
	}

	#[test]
	fn single_prime_range() {
		let primes: Vec<u64> = SegmentedPrimeStream::new(2, 10).unwrap().collect();
		assert_eq!(primes, vec![2]);
	}

	#[test]
	fn matches_full_sieve() {
		for limit in [3, 30, 100, 1_000] {
			let segmented: Vec<u64> = SegmentedPrimeStream::new(limit, 7).unwrap().collect();
			assert_eq!(segmented, simple_sieve(limit), "limit {}", limit);
		}
	}

	#[test]
	fn strictly_increasing_without_duplicates() {
		for segment_size in [1, 17, 64, 1_000] {
			let primes: Vec<u64> = SegmentedPrimeStream::new(500, segment_size)
				.unwrap()
				.collect();
			for pair in primes.windows(2) {
				assert!(pair[0] < pair[1], "segment size {}", segment_size);
			}
		}
	}

	#[test]
	fn segment_boundary_does_not_lose_primes() {
		// 97 sits right at a segment edge when the width divides 97
		let primes: Vec<u64> = SegmentedPrimeStream::new(100, 97).unwrap().collect();
		assert!(primes.contains(&97));
		assert_eq!(primes, simple_sieve(100));
	}

	#[test]
	fn early_termination_is_clean() {
		let mut stream = SegmentedPrimeStream::new(1_000_000, 1_000).unwrap();
		assert_eq!(stream.next(), Some(2));
		assert_eq!(stream.next(), Some(3));
		// Dropping mid-segment must not panic or leak
		drop(stream);
	}
}
