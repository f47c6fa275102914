// Copyright (c) 2022 Bastiaan Marinus van de Weerd


fn reacts(a: u8, b: u8) -> bool {
	a != b && a.eq_ignore_ascii_case(&b)
}

/// Fully reacts the polymer made up of `units`.
fn react(units: impl Iterator<Item = u8>) -> Vec<u8> {
	let mut stack = Vec::new();
	for unit in units {
		if stack.last().map_or(false, |&last| reacts(last, unit)) {
			stack.pop();
		} else {
			stack.push(unit);
		}
	}
	stack
}


fn input_polymer_from_str(s: &str) -> Result<&[u8], parsing::PolymerError> {
	parsing::polymer_from_str(s)
}


fn part1_impl(input_polymer: &[u8]) -> usize {
	react(input_polymer.iter().copied()).len()
}

pub(crate) fn part1(input: &str) -> anyhow::Result<usize> {
	Ok(part1_impl(input_polymer_from_str(input)?))
}


fn part2_impl(input_polymer: &[u8]) -> usize {
	use rayon::prelude::{IntoParallelIterator as _, ParallelIterator as _};

	// Removing a unit type from the reacted polymer reacts to the same result
	let reacted = react(input_polymer.iter().copied());
	(b'a'..=b'z')
		.into_par_iter()
		.map(|removed| react(reacted.iter()
			.copied()
			.filter(|unit| unit.to_ascii_lowercase() != removed)).len())
		.min()
		.unwrap_or(0)
}

pub(crate) fn part2(input: &str) -> anyhow::Result<usize> {
	Ok(part2_impl(input_polymer_from_str(input)?))
}


mod parsing {
	#[derive(Debug, thiserror::Error)]
	pub(super) enum PolymerError {
		#[error("Empty input")]
		Empty,
		#[error("Invalid unit {found:?} at column {column}")]
		InvalidUnit { column: usize, found: char },
	}

	pub(super) fn polymer_from_str(s: &str) -> Result<&[u8], PolymerError> {
		let s = s.trim_end().as_bytes();
		if s.is_empty() { return Err(PolymerError::Empty) }
		match s.iter().position(|b| !b.is_ascii_alphabetic()) {
			Some(c) => Err(PolymerError::InvalidUnit { column: c + 1, found: s[c] as char }),
			None => Ok(s),
		}
	}
}


#[cfg(test)]
mod tests {
	use super::*;
	use test_case::test_case;

	#[test_case("aA", 0)]
	#[test_case("abBA", 0)]
	#[test_case("abAB", 4)]
	#[test_case("aabAAB", 6)]
	#[test_case("dabAcCaCBAcCcaDA", 10)]
	fn part1_examples(input: &str, answer: usize) {
		assert_eq!(part1_impl(input_polymer_from_str(input).unwrap()), answer);
	}

	#[test]
	fn part2_example() {
		assert_eq!(part2_impl(input_polymer_from_str("dabAcCaCBAcCcaDA\n").unwrap()), 4);
	}

	#[test]
	fn invalid() {
		assert!(matches!(input_polymer_from_str("\n"), Err(parsing::PolymerError::Empty)));
		assert!(matches!(input_polymer_from_str("ab1"),
			Err(parsing::PolymerError::InvalidUnit { column: 3, found: '1' })));
	}
}
