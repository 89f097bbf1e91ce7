/// Look-behind adapter pairing each prime with its immediate successor.
///
/// Wraps any strictly increasing prime iterator and yields one tuple per
/// prime: `(p, Some(next_p))` while a successor exists, then exactly one
/// `(last_p, None)` once the underlying stream is exhausted, so the final
/// prime's lack of successor is observable exactly once.
///
/// # Invariants
/// - Exactly one tuple is produced per prime of the underlying stream
/// - Only the single pending element is buffered between pulls
pub struct PrimePairs<I> {
	inner: I,
	pending: Option<u64>,
}

impl<I: Iterator<Item = u64>> PrimePairs<I> {
	/// Wraps a prime iterator into an adjacent-pair iterator.
	pub fn new(inner: I) -> Self {
		Self {
			inner,
			pending: None,
		}
	}
}

impl<I: Iterator<Item = u64>> Iterator for PrimePairs<I> {
	type Item = (u64, Option<u64>);

	fn next(&mut self) -> Option<Self::Item> {
		let current = match self.pending.take() {
			Some(prime) => prime,
			None => self.inner.next()?,
		};

		match self.inner.next() {
			Some(next) => {
				self.pending = Some(next);
				Some((current, Some(next)))
			}
			None => Some((current, None)),
		}
	}
}
