// Copyright (c) 2022 Bastiaan Marinus van de Weerd


/// The outcome for every pattern of five pots, indexed with the leftmost pot
/// as the most significant bit.
type Rules = [bool; 32];

#[cfg_attr(test, derive(Debug))]
#[derive(Clone)]
struct Pots {
	/// Number of the first pot in `plants`
	first: i64,
	/// Trimmed so that both the first and the last pot contain a plant
	plants: Vec<bool>,
}

impl Pots {
	fn trimmed(mut first: i64, mut plants: Vec<bool>) -> Self {
		let Some(last) = plants.iter().rposition(|p| *p) else {
			return Pots { first: 0, plants: vec![] } };
		plants.truncate(last + 1);
		let leading = plants.iter().position(|p| *p).unwrap_or(0);
		plants.drain(..leading);
		first += leading as i64;
		Pots { first, plants }
	}

	fn generation(&self, rules: &Rules) -> Self {
		let mut pattern = 0;
		let next = (0..self.plants.len() + 4)
			.map(|i| {
				let plant = self.plants.get(i).copied().unwrap_or(false);
				pattern = ((pattern << 1) | plant as usize) & 0b11111;
				rules[pattern]
			})
			.collect();
		Pots::trimmed(self.first - 2, next)
	}

	fn count(&self) -> i64 {
		self.plants.iter().filter(|p| **p).count() as i64
	}

	fn sum(&self) -> i64 {
		self.plants.iter()
			.zip(self.first..)
			.filter_map(|(plant, number)| plant.then_some(number))
			.sum()
	}

	/// Returns the sum of the numbers of all pots with a plant after `generations`.
	/// Once a generation is the previous one shifted, the rest is extrapolated.
	fn sum_after(mut self, rules: &Rules, generations: u64) -> i64 {
		for generation in 1..=generations {
			let next = self.generation(rules);
			if next.plants == self.plants {
				let shift = next.first - self.first;
				tracing::debug!(generation, shift, "plant pattern stabilized");
				return next.sum() + (generations - generation) as i64 * shift * next.count();
			}
			self = next;
		}
		self.sum()
	}
}


fn input_pots_and_rules_from_str(s: &str) -> Result<(Pots, Rules), parsing::NotesError> {
	parsing::pots_and_rules_from_str(s)
}


fn part1_impl((input_pots, input_rules): (Pots, Rules)) -> i64 {
	input_pots.sum_after(&input_rules, 20)
}

pub(crate) fn part1(input: &str) -> anyhow::Result<i64> {
	Ok(part1_impl(input_pots_and_rules_from_str(input)?))
}


fn part2_impl((input_pots, input_rules): (Pots, Rules)) -> i64 {
	input_pots.sum_after(&input_rules, 50_000_000_000)
}

pub(crate) fn part2(input: &str) -> anyhow::Result<i64> {
	Ok(part2_impl(input_pots_and_rules_from_str(input)?))
}


mod parsing {
	use super::{Pots, Rules};

	#[derive(Debug, thiserror::Error)]
	pub(super) enum NotesError {
		#[error("Expected `initial state: ` on line 1")]
		InitialState,
		#[error("Invalid pot {found:?} on line {line}, column {column}")]
		InvalidPot { line: usize, column: usize, found: char },
		#[error("Expected `LLCRR => N` on line {line}")]
		Rule { line: usize },
		#[error("Empty pots can not grow a plant (line {line})")]
		SpontaneousGrowth { line: usize },
	}

	fn pots(s: &str, line: usize, column: usize) -> Result<Vec<bool>, NotesError> {
		s.chars()
			.enumerate()
			.map(|(c, pot)| match pot {
				'#' => Ok(true),
				'.' => Ok(false),
				found => Err(NotesError::InvalidPot { line, column: column + c + 1, found }),
			})
			.collect()
	}

	pub(super) fn pots_and_rules_from_str(s: &str) -> Result<(Pots, Rules), NotesError> {
		const PREFIX: &str = "initial state: ";
		let mut lines = s.lines();
		let initial = lines.next()
			.and_then(|line| line.strip_prefix(PREFIX))
			.ok_or(NotesError::InitialState)?;
		let initial_pots = Pots::trimmed(0, pots(initial, 1, PREFIX.len())?);

		let mut rules = [false; 32];
		for (l, line) in lines.enumerate().filter(|(_, line)| !line.is_empty()) {
			let line_number = l + 2;
			let (pattern, outcome) = line.split_once(" => ")
				.filter(|(pattern, outcome)| pattern.len() == 5 && outcome.len() == 1)
				.ok_or(NotesError::Rule { line: line_number })?;
			let pattern = pots(pattern, line_number, 0)?.into_iter()
				.fold(0, |acc, plant| (acc << 1) | plant as usize);
			let outcome = pots(outcome, line_number, 9)?[0];
			if pattern == 0 && outcome {
				return Err(NotesError::SpontaneousGrowth { line: line_number }) }
			rules[pattern] = outcome;
		}

		Ok((initial_pots, rules))
	}
}


#[test]
fn tests() {
	const INPUT: &str = indoc::indoc! { "
		initial state: #..#.#..##......###...###

		...## => #
		..#.. => #
		.#... => #
		.#.#. => #
		.#.## => #
		.##.. => #
		.#### => #
		#.#.# => #
		#.### => #
		##.#. => #
		##.## => #
		###.. => #
		###.# => #
		####. => #
	" };
	let (pots, rules) = input_pots_and_rules_from_str(INPUT).unwrap();
	assert_eq!(pots.sum(), 0 + 3 + 5 + 8 + 9 + 16 + 17 + 18 + 22 + 23 + 24);
	let next = pots.generation(&rules);
	assert_eq!((next.first, next.count()), (0, 7));
	assert_eq!(part1_impl((pots.clone(), rules)), 325);
	assert_eq!(part2_impl((pots, rules)), 999_999_999_374);
	assert!(matches!(input_pots_and_rules_from_str("initial state: #.\n\n..... => #\n"),
		Err(parsing::NotesError::SpontaneousGrowth { line: 3 })));
	assert!(matches!(input_pots_and_rules_from_str("initial state: #.\n\n..x.. => #\n"),
		Err(parsing::NotesError::InvalidPot { line: 3, column: 3, found: 'x' })));
}
