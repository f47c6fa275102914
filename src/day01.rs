// Copyright (c) 2022 Bastiaan Marinus van de Weerd


fn input_changes_from_str(s: &str) -> Result<Vec<i64>, parsing::ChangesError> {
	parsing::changes_from_str(s).collect()
}


fn part1_impl(input_changes: &[i64]) -> i64 {
	input_changes.iter().sum()
}

pub(crate) fn part1(input: &str) -> anyhow::Result<i64> {
	Ok(part1_impl(&input_changes_from_str(input)?))
}


/// Whether cycling through `changes` ever reaches some frequency twice.
/// With a non-zero drift per cycle, that requires two running frequencies
/// within one cycle to be congruent modulo the drift.
fn repeats(changes: &[i64]) -> bool {
	use itertools::Itertools as _;
	let drift = changes.iter().sum::<i64>();
	if drift == 0 { return true }
	!std::iter::once(0)
		.chain(changes.iter().scan(0, |freq, change| {
			*freq += change;
			Some(*freq)
		}))
		.take(changes.len())
		.map(|freq| freq.rem_euclid(drift))
		.all_unique()
}

fn part2_impl(input_changes: &[i64]) -> Option<i64> {
	use std::collections::HashSet;
	if input_changes.is_empty() || !repeats(input_changes) { return None }

	let mut seen = HashSet::from([0]);
	input_changes.iter()
		.cycle()
		.scan(0, |freq, change| {
			*freq += change;
			Some(*freq)
		})
		.find(|freq| !seen.insert(*freq))
}

pub(crate) fn part2(input: &str) -> anyhow::Result<i64> {
	part2_impl(&input_changes_from_str(input)?)
		.ok_or_else(|| anyhow::anyhow!("No frequency is ever reached twice"))
}


mod parsing {
	use std::num::ParseIntError;

	#[derive(Debug, thiserror::Error)]
	pub(super) enum ChangesError {
		#[error("Empty input")]
		Empty,
		#[error("Invalid change on line {line}")]
		Invalid { line: usize, source: ParseIntError },
	}

	pub(super) fn changes_from_str(s: &str) -> impl Iterator<Item = Result<i64, ChangesError>> + '_ {
		use {std::iter::once, itertools::Either};
		if s.trim().is_empty() { return Either::Left(once(Err(ChangesError::Empty))) }

		Either::Right(s.lines()
			.enumerate()
			.filter(|(_, line)| !line.trim().is_empty())
			.map(|(l, line)| line.trim().parse()
				.map_err(|e| ChangesError::Invalid { line: l + 1, source: e })))
	}
}


#[cfg(test)]
mod tests {
	use super::*;
	use test_case::test_case;

	#[test_case("+1\n-2\n+3\n+1\n", 3)]
	#[test_case("+1\n+1\n+1\n", 3)]
	#[test_case("+1\n+1\n-2\n", 0)]
	#[test_case("-1\n-2\n-3\n", -6)]
	fn part1_examples(input: &str, answer: i64) {
		assert_eq!(part1_impl(&input_changes_from_str(input).unwrap()), answer);
	}

	#[test_case("+1\n-2\n+3\n+1\n", 2)]
	#[test_case("+1\n-1\n", 0)]
	#[test_case("+3\n+3\n+4\n-2\n-4\n", 10)]
	#[test_case("-6\n+3\n+8\n+5\n-6\n", 5)]
	#[test_case("+7\n+7\n-2\n-7\n-4\n", 14)]
	fn part2_examples(input: &str, answer: i64) {
		assert_eq!(part2_impl(&input_changes_from_str(input).unwrap()), Some(answer));
	}

	#[test]
	fn never_repeats() {
		assert_eq!(part2_impl(&[1]), None);
		assert_eq!(part2_impl(&[2, 1]), None);
		assert!(super::part2("+1\n+1\n").is_err());
	}

	#[test]
	fn invalid() {
		assert!(matches!(input_changes_from_str(""), Err(parsing::ChangesError::Empty)));
		assert!(matches!(input_changes_from_str("+1\nfoo\n"),
			Err(parsing::ChangesError::Invalid { line: 2, .. })));
	}
}
