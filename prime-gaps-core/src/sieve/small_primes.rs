use bitvec::prelude::*;

/// Computes the floor of the integer square root of `n`.
///
/// The floating-point estimate is corrected afterwards so the result is
/// exact even where `f64::sqrt` rounds across an integer boundary.
pub fn integer_sqrt(n: u64) -> u64 {
	if n == 0 {
		return 0;
	}
	let mut root = (n as f64).sqrt() as u64;
	while (root as u128) * (root as u128) > n as u128 {
		root -= 1;
	}
	while ((root + 1) as u128) * ((root + 1) as u128) <= n as u128 {
		root += 1;
	}
	root
}

/// Generates all primes up to `limit` (inclusive) with a full sieve.
///
/// # Parameters
/// - `limit`: Upper bound of the sieved range.
///
/// # Returns
/// The ordered sequence of all primes `<= limit`. A `limit` below 2 yields
/// an empty sequence; this is not an error.
///
/// # Notes
/// - Runs once per analysis to produce the sieving divisors; its cost is
///   negligible next to the segmented pass over the full range.
/// - Marking starts at `i * i` for each prime `i`, since smaller multiples
///   were already marked by smaller divisors.
pub fn simple_sieve(limit: u64) -> Vec<u64> {
	if limit < 2 {
		return Vec::new();
	}

	let mut is_prime = bitvec![1; (limit + 1) as usize];
	is_prime.set(0, false);
	is_prime.set(1, false);

	let mut i = 2u64;
	while i * i <= limit {
		if is_prime[i as usize] {
			let mut multiple = i * i;
			while multiple <= limit {
				is_prime.set(multiple as usize, false);
				multiple += i;
			}
		}
		i += 1;
	}

	let mut primes = Vec::new();
	for (value, keep) in is_prime.iter().by_vals().enumerate() {
		if keep {
			primes.push(value as u64);
		}
	}
	primes
}
