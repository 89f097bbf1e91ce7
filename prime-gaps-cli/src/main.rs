use std::error::Error;
use std::io::{self, Write};
use std::time::Instant;

use prime_gaps_core::analysis::accumulator::GapAccumulator;
use prime_gaps_core::report::write_report;
use prime_gaps_core::sieve::pairs::PrimePairs;
use prime_gaps_core::sieve::stream::SegmentedPrimeStream;

const DEFAULT_LIMIT: u64 = 100_000_000;
const DEFAULT_SEGMENT_SIZE: u64 = 1_000_000;

fn main() -> Result<(), Box<dyn Error>> {
	env_logger::init();

	println!("Segmented Sieve Prime Gap Analyzer");
	println!("{}", "=".repeat(60));
	println!();
	println!("Example limits:");
	println!("  100,000,000 (100 million) - ~5.7M primes");
	println!("  1,000,000,000 (1 billion) - ~50.8M primes");
	println!("  10,000,000,000 (10 billion) - ~455M primes");

	let limit = prompt_limit()?;
	let segment_size = segment_size_from_args()?;

	println!();
	println!("Analyzing primes up to {}", group_digits(limit));
	println!(
		"Using segmented sieve with {} segments",
		group_digits(segment_size)
	);
	println!("{}", "-".repeat(60));

	let stream = SegmentedPrimeStream::new(limit, segment_size)?;
	let mut accumulator = GapAccumulator::new();

	let start = Instant::now();
	let checkpoint = (limit / 10).max(1);
	let mut next_checkpoint = checkpoint;

	for (prime, next_prime) in PrimePairs::new(stream) {
		accumulator.process_pair(prime, next_prime)?;

		if prime >= next_checkpoint {
			let elapsed = start.elapsed().as_secs_f64();
			let percent = prime as f64 / limit as f64 * 100.0;
			let rate = if elapsed > 0.0 {
				prime as f64 / elapsed
			} else {
				0.0
			};
			println!(
				"Progress: {:5.1}% ({}) - {} primes - {} numbers/sec",
				percent,
				group_digits(prime),
				group_digits(accumulator.total_primes()),
				group_digits(rate as u64)
			);
			next_checkpoint += checkpoint;
		}
	}

	let elapsed = start.elapsed().as_secs_f64();

	println!();
	println!("{}", "=".repeat(60));
	println!("Analysis complete!");
	println!("Time taken: {:.2} seconds", elapsed);
	println!(
		"Total primes found: {}",
		group_digits(accumulator.total_primes())
	);
	println!("Gap families: {}", accumulator.family_count());
	if elapsed > 0.0 {
		println!(
			"Processing rate: {} numbers/second",
			group_digits((limit as f64 / elapsed) as u64)
		);
	}

	let output_file = format!("gap_contributions_{}.csv", limit);
	write_report(&output_file, &accumulator, limit)?;
	println!();
	println!("Results saved to: {}", output_file);

	println!();
	println!("Top 10 gap families by count:");
	println!("{}", "-".repeat(60));
	for (gap, family) in accumulator.families_by_count().into_iter().take(10) {
		let percent = family.count() as f64 / accumulator.total_primes() as f64 * 100.0;
		println!(
			"Gap {:3}: {:>12} primes ({:5.2}%)",
			gap,
			group_digits(family.count()),
			percent
		);
	}

	Ok(())
}

/// Prompts for the maximum prime to analyze.
///
/// Empty input falls back to the default limit.
fn prompt_limit() -> Result<u64, Box<dyn Error>> {
	print!("\nEnter maximum prime to analyze (or press Enter for 100M): ");
	io::stdout().flush()?;

	let mut line = String::new();
	io::stdin().read_line(&mut line)?;
	parse_limit(&line)
}

/// Parses a limit entered by the user.
///
/// Commas and underscores are accepted as digit separators and stripped
/// before parsing; an empty input yields the default limit.
fn parse_limit(input: &str) -> Result<u64, Box<dyn Error>> {
	let cleaned: String = input
		.trim()
		.chars()
		.filter(|c| *c != ',' && *c != '_')
		.collect();
	if cleaned.is_empty() {
		return Ok(DEFAULT_LIMIT);
	}
	Ok(cleaned.parse::<u64>()?)
}

/// Reads the segment size from the first command-line argument, if any.
///
/// # Errors
/// Returns an error if the argument is not a strictly positive integer.
fn segment_size_from_args() -> Result<u64, Box<dyn Error>> {
	match std::env::args().nth(1) {
		Some(raw) => {
			let size = raw.parse::<u64>()?;
			if size == 0 {
				return Err("Segment size must be strictly positive".into());
			}
			Ok(size)
		}
		None => Ok(DEFAULT_SEGMENT_SIZE),
	}
}

/// Formats an integer with thousands separators (1234567 -> "1,234,567").
fn group_digits(value: u64) -> String {
	let digits = value.to_string();
	let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
	for (i, c) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			grouped.push(',');
		}
		grouped.push(c);
	}
	grouped
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_limit_strips_separators() {
		assert_eq!(parse_limit("1,000,000\n").unwrap(), 1_000_000);
		assert_eq!(parse_limit("10_000").unwrap(), 10_000);
		assert_eq!(parse_limit("  42  ").unwrap(), 42);
	}

	#[test]
	fn parse_limit_defaults_on_empty() {
		assert_eq!(parse_limit("").unwrap(), DEFAULT_LIMIT);
		assert_eq!(parse_limit("\n").unwrap(), DEFAULT_LIMIT);
	}

	#[test]
	fn parse_limit_rejects_garbage() {
		assert!(parse_limit("ten million").is_err());
		assert!(parse_limit("-5").is_err());
	}

	#[test]
	fn group_digits_inserts_separators() {
		assert_eq!(group_digits(0), "0");
		assert_eq!(group_digits(999), "999");
		assert_eq!(group_digits(1_000), "1,000");
		assert_eq!(group_digits(1_234_567), "1,234,567");
		assert_eq!(group_digits(10_000_000_000), "10,000,000,000");
	}
}
