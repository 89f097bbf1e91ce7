use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::analysis::accumulator::GapAccumulator;

/// Writes the final gap-family statistics to a delimited text report.
///
/// # Format
/// A header block with title, abstract and formula, followed by the
/// analysis metadata (timestamp, limit, totals) and one row per gap family
/// sorted by ascending gap:
///
/// `gap,product (10 dp),log_product (10 dp),count,percentage (4 dp)%,"witness primes"`
///
/// The product and its log are rendered through `f64` at fixed decimal
/// places. This layout is the persisted artifact; apart from the
/// `Analysis Date` row, identical inputs produce identical bytes.
///
/// # Errors
/// Returns any I/O error from creating or writing the file.
pub fn write_report<P: AsRef<Path>>(
	path: P,
	accumulator: &GapAccumulator,
	max_prime: u64,
) -> io::Result<()> {
	let file = File::create(path)?;
	let mut out = BufWriter::new(file);

	writeln!(out, "=================================================")?;
	writeln!(out, "GAP-CLASS DECOMPOSITION OF ZETA(2) = PI^2/6")?;
	writeln!(out, "Individual Gap Family Products")?;
	writeln!(out, "=================================================")?;
	writeln!(out)?;

	writeln!(out, "ABSTRACT:")?;
	writeln!(
		out,
		"This dataset contains the individual product values P_g for each gap family."
	)?;
	writeln!(
		out,
		"Each P_g represents the contribution of all primes with forward gap g to the"
	)?;
	writeln!(
		out,
		"overall Euler product. The data includes prime counts, product values, logarithmic"
	)?;
	writeln!(
		out,
		"contributions, and the first primes in each family for verification and further analysis."
	)?;
	writeln!(out)?;

	writeln!(out, "FORMULA:")?;
	writeln!(
		out,
		"P_g = product over all primes p where gap(p)=g of [p^2 / (p^2 - 1)]"
	)?;
	writeln!(out, "where gap(p) = next_prime(p) - p")?;
	writeln!(out)?;

	let timestamp = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.6f");
	writeln!(out, "Analysis Date:,{}", timestamp)?;
	writeln!(out, "Maximum Prime:,{}", max_prime)?;
	writeln!(out, "Total Primes:,{}", accumulator.total_primes())?;
	writeln!(out, "Total Gap Families:,{}", accumulator.family_count())?;
	writeln!(out)?;

	writeln!(out, "DATA TABLE:")?;
	writeln!(
		out,
		"Gap,Product P_g,Log(P_g),Prime Count,Percentage of Total,First 20 Primes in Family"
	)?;

	for (gap, family) in accumulator.families_by_gap() {
		let percentage = if accumulator.total_primes() > 0 {
			family.count() as f64 / accumulator.total_primes() as f64 * 100.0
		} else {
			0.0
		};
		let witnesses = family
			.samples()
			.iter()
			.map(u64::to_string)
			.collect::<Vec<_>>()
			.join(" ");
		writeln!(
			out,
			"{},{:.10},{:.10},{},{:.4}%,\"{}\"",
			gap,
			family.product_f64(),
			family.log_sum(),
			family.count(),
			percentage,
			witnesses
		)?;
	}

	writeln!(out)?;
	writeln!(out, "=================================================")?;
	writeln!(out, "END OF DATASET")?;
	writeln!(out, "=================================================")?;
	out.flush()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn accumulate_up_to_ten() -> GapAccumulator {
		let mut accumulator = GapAccumulator::new();
		accumulator.process_pair(2, Some(3)).unwrap();
		accumulator.process_pair(3, Some(5)).unwrap();
		accumulator.process_pair(5, Some(7)).unwrap();
		accumulator.process_pair(7, None).unwrap();
		accumulator
	}

	#[test]
	fn report_layout_for_limit_ten() {
		let path = std::env::temp_dir().join("gap_report_limit_ten.csv");
		let accumulator = accumulate_up_to_ten();
		write_report(&path, &accumulator, 10).unwrap();

		let contents = std::fs::read_to_string(&path).unwrap();
		std::fs::remove_file(&path).ok();

		let lines: Vec<&str> = contents.lines().collect();
		assert_eq!(lines[0], "=================================================");
		assert_eq!(lines[1], "GAP-CLASS DECOMPOSITION OF ZETA(2) = PI^2/6");
		assert!(contents.contains("Maximum Prime:,10"));
		assert!(contents.contains("Total Primes:,4"));
		assert!(contents.contains("Total Gap Families:,2"));
		assert!(contents.contains(
			"Gap,Product P_g,Log(P_g),Prime Count,Percentage of Total,First 20 Primes in Family"
		));

		// Gap 1: single pair (2, 3); product 4/3
		let gap_one = lines.iter().find(|l| l.starts_with("1,")).unwrap();
		assert!(gap_one.starts_with("1,1.3333333333,"));
		assert!(gap_one.ends_with(",1,25.0000%,\"2\""));

		// Gap 2: pairs (3, 5) and (5, 7); product 9/8 * 25/24
		let gap_two = lines.iter().find(|l| l.starts_with("2,")).unwrap();
		assert!(gap_two.starts_with("2,1.1718750000,"));
		assert!(gap_two.ends_with(",2,50.0000%,\"3 5\""));

		assert_eq!(lines[lines.len() - 2], "END OF DATASET");
	}

	#[test]
	fn empty_run_still_produces_a_report() {
		let path = std::env::temp_dir().join("gap_report_empty.csv");
		let accumulator = GapAccumulator::new();
		write_report(&path, &accumulator, 0).unwrap();

		let contents = std::fs::read_to_string(&path).unwrap();
		std::fs::remove_file(&path).ok();

		assert!(contents.contains("Total Primes:,0"));
		assert!(contents.contains("Total Gap Families:,0"));
		assert!(contents.contains("END OF DATASET"));
	}
}
