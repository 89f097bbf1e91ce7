use std::collections::BTreeMap;

use super::family::GapFamily;

/// Default number of significant decimal digits for the running products.
///
/// Enough that accumulated rounding error stays negligible after hundreds
/// of millions of near-1 terms.
pub const DEFAULT_PRECISION: u64 = 50;

/// Streaming classifier of prime gaps.
///
/// Consumes the prime stream one adjacent pair at a time, in stream order,
/// and maintains a mapping from gap size to aggregate statistics. Each pair
/// is processed incrementally; no history is retained beyond the capped
/// witness sample inside each [`GapFamily`].
///
/// # Responsibilities
/// - Count every processed prime, including the final one without a gap
/// - Create a family on the first occurrence of a gap value, mutate it on
///   every later occurrence, never delete it during a run
/// - Reject non-increasing pairs loudly instead of corrupting a family
///   with a non-positive gap key
///
/// # Invariants
/// - The sum of all family counts equals `total_primes - 1` once at least
///   one prime was processed
/// - Families are keyed by positive gap values only
#[derive(Debug, Clone)]
pub struct GapAccumulator {
	precision: u64,
	families: BTreeMap<u64, GapFamily>,
	total_primes: u64,
}

impl GapAccumulator {
	/// Creates an accumulator with the default product precision.
	pub fn new() -> Self {
		Self {
			precision: DEFAULT_PRECISION,
			families: BTreeMap::new(),
			total_primes: 0,
		}
	}

	/// Creates an accumulator with an explicit product precision.
	///
	/// # Parameters
	/// - `digits`: Significant decimal digits kept by every product
	///   operation.
	///
	/// # Errors
	/// Returns an error if `digits` is zero.
	pub fn with_precision(digits: u64) -> Result<Self, String> {
		if digits == 0 {
			return Err("Precision must be at least one significant digit".to_owned());
		}
		Ok(Self {
			precision: digits,
			families: BTreeMap::new(),
			total_primes: 0,
		})
	}

	/// Processes one adjacent prime pair in stream order.
	///
	/// # Parameters
	/// - `prime`: The current prime; always counted.
	/// - `next_prime`: Its immediate successor, or `None` for the final
	///   prime of the stream, which contributes to the count but has no
	///   gap.
	///
	/// # Errors
	/// Returns an error if `next_prime` is not strictly greater than
	/// `prime`; a non-increasing pair is an internal ordering violation
	/// and must not be recorded.
	pub fn process_pair(&mut self, prime: u64, next_prime: Option<u64>) -> Result<(), String> {
		self.total_primes += 1;

		let next = match next_prime {
			Some(next) => next,
			None => return Ok(()),
		};
		if next <= prime {
			return Err(format!(
				"Non-increasing prime pair: {} followed by {}",
				prime, next
			));
		}

		let gap = next - prime;
		let family = self.families.entry(gap).or_insert_with(GapFamily::new);
		family.record(prime, self.precision);
		Ok(())
	}

	/// Total number of primes processed so far.
	pub fn total_primes(&self) -> u64 {
		self.total_primes
	}

	/// Number of distinct gap values observed so far.
	pub fn family_count(&self) -> usize {
		self.families.len()
	}

	/// Significant decimal digits used for the running products.
	pub fn precision(&self) -> u64 {
		self.precision
	}

	/// All families ordered by ascending gap value.
	pub fn families_by_gap(&self) -> impl Iterator<Item = (u64, &GapFamily)> {
		self.families.iter().map(|(gap, family)| (*gap, family))
	}

	/// All families ordered by descending occurrence count.
	///
	/// Ties keep the ascending-gap order, so the result is deterministic.
	pub fn families_by_count(&self) -> Vec<(u64, &GapFamily)> {
		let mut families: Vec<_> = self.families_by_gap().collect();
		families.sort_by(|a, b| b.1.count().cmp(&a.1.count()));
		families
	}
}

impl Default for GapAccumulator {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Feeds the primes up to 10 as the stream would deliver them.
	fn accumulate_up_to_ten() -> GapAccumulator {
		let mut accumulator = GapAccumulator::new();
		accumulator.process_pair(2, Some(3)).unwrap();
		accumulator.process_pair(3, Some(5)).unwrap();
		accumulator.process_pair(5, Some(7)).unwrap();
		accumulator.process_pair(7, None).unwrap();
		accumulator
	}

	#[test]
	fn worked_example_limit_ten() {
		let accumulator = accumulate_up_to_ten();

		assert_eq!(accumulator.total_primes(), 4);
		assert_eq!(accumulator.family_count(), 2);

		let families: Vec<_> = accumulator.families_by_gap().collect();
		assert_eq!(families[0].0, 1);
		assert_eq!(families[0].1.count(), 1);
		assert_eq!(families[0].1.samples(), &[2]);
		assert_eq!(families[1].0, 2);
		assert_eq!(families[1].1.count(), 2);
		assert_eq!(families[1].1.samples(), &[3, 5]);
	}

	#[test]
	fn family_counts_sum_to_total_minus_one() {
		let accumulator = accumulate_up_to_ten();
		let gap_total: u64 = accumulator
			.families_by_gap()
			.map(|(_, family)| family.count())
			.sum();
		assert_eq!(gap_total, accumulator.total_primes() - 1);
	}

	#[test]
	fn gap_one_arises_between_two_and_three() {
		// The (2, 3) pair lands in family 1 through the ordinary path
		let accumulator = accumulate_up_to_ten();
		let (gap, family) = accumulator.families_by_gap().next().unwrap();
		assert_eq!(gap, 1);
		assert!((family.product_f64() - 4.0 / 3.0).abs() < 1e-12);
	}

	#[test]
	fn families_by_count_sorts_descending() {
		let accumulator = accumulate_up_to_ten();
		let ranked = accumulator.families_by_count();
		assert_eq!(ranked[0].0, 2);
		assert_eq!(ranked[0].1.count(), 2);
		assert_eq!(ranked[1].0, 1);
	}

	#[test]
	fn rejects_non_increasing_pairs() {
		let mut accumulator = GapAccumulator::new();
		assert!(accumulator.process_pair(5, Some(5)).is_err());
		assert!(accumulator.process_pair(7, Some(3)).is_err());
		// The rejected pairs must not have created families
		assert_eq!(accumulator.family_count(), 0);
	}

	#[test]
	fn rejects_zero_precision() {
		assert!(GapAccumulator::with_precision(0).is_err());
		assert!(GapAccumulator::with_precision(50).is_ok());
	}

	#[test]
	fn log_sum_consistent_with_product() {
		let accumulator = accumulate_up_to_ten();
		for (gap, family) in accumulator.families_by_gap() {
			let delta = (family.log_sum() - family.product_f64().ln()).abs();
			assert!(delta < 1e-12, "gap {} drifted by {}", gap, delta);
		}
	}

	#[test]
	fn final_prime_counts_without_gap() {
		let mut accumulator = GapAccumulator::new();
		accumulator.process_pair(2, None).unwrap();
		assert_eq!(accumulator.total_primes(), 1);
		assert_eq!(accumulator.family_count(), 0);
	}
}
