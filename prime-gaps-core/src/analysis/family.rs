use bigdecimal::{BigDecimal, One, ToPrimitive};

/// Number of witness primes retained per gap family.
///
/// Bounds the memory of a family record regardless of how many primes
/// share its gap; only the first occurrences are kept.
pub const SAMPLE_CAP: usize = 20;

/// Aggregate statistics for all primes sharing one gap value.
///
/// # Responsibilities
/// - Count every occurrence of the gap
/// - Accumulate the exact running product of contribution terms
///   `p^2 / (p^2 - 1)` in high-precision decimal arithmetic
/// - Accumulate the natural log of each term independently, as a
///   cross-check that stays accurate even if the product representation
///   ever degrades
/// - Retain the first [`SAMPLE_CAP`] witness primes
///
/// # Invariants
/// - `log_sum` stays within numerical tolerance of `ln(product)`
/// - `samples.len() <= SAMPLE_CAP`, and `samples.len() == count` while the
///   family is below the cap
#[derive(Debug, Clone)]
pub struct GapFamily {
	count: u64,
	product: BigDecimal,
	log_sum: f64,
	log_carry: f64,
	samples: Vec<u64>,
}

impl GapFamily {
	/// Creates an empty family: identity product, zero log-sum, zero count.
	pub(crate) fn new() -> Self {
		Self {
			count: 0,
			product: BigDecimal::one(),
			log_sum: 0.0,
			log_carry: 0.0,
			samples: Vec::new(),
		}
	}

	/// Folds one prime's contribution into the family.
	///
	/// # Parameters
	/// - `prime`: The earlier prime of the pair exhibiting this gap.
	/// - `precision`: Significant decimal digits kept for the running
	///   product; every intermediate result is rounded back to it.
	pub(crate) fn record(&mut self, prime: u64, precision: u64) {
		self.count += 1;

		let p = BigDecimal::from(prime);
		let p_squared = (&p * &p).with_prec(precision);
		let contribution = (&p_squared / (&p_squared - BigDecimal::one())).with_prec(precision);
		self.product = (&self.product * &contribution).with_prec(precision);

		// ln(p^2 / (p^2 - 1)) = ln(1 + 1 / (p^2 - 1)); ln_1p keeps full
		// relative precision for terms this close to 1.
		let p_f64 = prime as f64;
		self.add_log_term((1.0 / (p_f64 * p_f64 - 1.0)).ln_1p());

		if self.samples.len() < SAMPLE_CAP {
			self.samples.push(prime);
		}
	}

	/// Compensated (Kahan) addition of one log-domain term.
	///
	/// Millions of near-zero terms are summed per family; the carry keeps
	/// the low-order bits that a plain sum would shed.
	fn add_log_term(&mut self, term: f64) {
		let adjusted = term - self.log_carry;
		let sum = self.log_sum + adjusted;
		self.log_carry = (sum - self.log_sum) - adjusted;
		self.log_sum = sum;
	}

	/// Number of prime pairs observed with this gap.
	pub fn count(&self) -> u64 {
		self.count
	}

	/// Exact high-precision running product of contribution terms.
	pub fn product(&self) -> &BigDecimal {
		&self.product
	}

	/// The running product rendered as `f64`, for reporting.
	pub fn product_f64(&self) -> f64 {
		self.product.to_f64().unwrap_or(f64::NAN)
	}

	/// Independently accumulated sum of `ln(p^2 / (p^2 - 1))` terms.
	pub fn log_sum(&self) -> f64 {
		self.log_sum
	}

	/// Witness primes: the first occurrences of this gap, capped.
	pub fn samples(&self) -> &[u64] {
		&self.samples
	}
}
