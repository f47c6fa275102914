// Copyright (c) 2022 Bastiaan Marinus van de Weerd


/// The recipe scoreboard and the two elves' current recipes.
struct Scoreboard {
	scores: Vec<u8>,
	elves: [usize; 2],
}

impl Scoreboard {
	fn new() -> Self {
		Scoreboard { scores: vec![3, 7], elves: [0, 1] }
	}

	/// Combines the elves' current recipes, calling `on_score` with every
	/// new recipe's score right after it is added.
	fn round(&mut self, mut on_score: impl FnMut(&[u8]) -> bool) -> bool {
		let sum = self.elves.iter().map(|e| self.scores[*e]).sum::<u8>();
		let digits = if sum >= 10 { [Some(1), Some(sum - 10)] } else { [Some(sum), None] };
		for digit in digits.into_iter().flatten() {
			self.scores.push(digit);
			if on_score(&self.scores) { return true }
		}
		for elf in &mut self.elves {
			*elf = (*elf + 1 + self.scores[*elf] as usize) % self.scores.len();
		}
		false
	}
}


fn input_count_from_str(s: &str) -> Result<usize, parsing::RecipesError> {
	parsing::count_from_str(s)
}

fn input_digits_from_str(s: &str) -> Result<Vec<u8>, parsing::RecipesError> {
	parsing::digits_from_str(s)
}


fn part1_impl(input_count: usize) -> String {
	let mut scoreboard = Scoreboard::new();
	while scoreboard.scores.len() < input_count + 10 {
		scoreboard.round(|_| false);
	}
	scoreboard.scores[input_count..input_count + 10].iter()
		.map(|d| char::from(b'0' + d))
		.collect()
}

pub(crate) fn part1(input: &str) -> anyhow::Result<String> {
	Ok(part1_impl(input_count_from_str(input)?))
}


fn part2_impl(input_digits: &[u8]) -> usize {
	let mut scoreboard = Scoreboard::new();
	if let Some(i) = scoreboard.scores.windows(input_digits.len()).position(|w| w == input_digits) {
		return i
	}
	while !scoreboard.round(|scores| scores.ends_with(input_digits)) {}
	tracing::debug!(recipes = scoreboard.scores.len(), "found score sequence");
	scoreboard.scores.len() - input_digits.len()
}

pub(crate) fn part2(input: &str) -> anyhow::Result<usize> {
	Ok(part2_impl(&input_digits_from_str(input)?))
}


mod parsing {
	#[derive(Debug, thiserror::Error)]
	pub(super) enum RecipesError {
		#[error("Empty input")]
		Empty,
		#[error("Invalid digit {0:?}")]
		Digit(char),
		#[error("Recipe count out of range")]
		Count(#[from] std::num::ParseIntError),
	}

	pub(super) fn count_from_str(s: &str) -> Result<usize, RecipesError> {
		let s = s.trim();
		if s.is_empty() { return Err(RecipesError::Empty) }
		if let Some(c) = s.chars().find(|c| !c.is_ascii_digit()) { return Err(RecipesError::Digit(c)) }
		Ok(s.parse()?)
	}

	pub(super) fn digits_from_str(s: &str) -> Result<Vec<u8>, RecipesError> {
		let s = s.trim();
		if s.is_empty() { return Err(RecipesError::Empty) }
		s.chars()
			.map(|c| c.to_digit(10).map(|d| d as u8).ok_or(RecipesError::Digit(c)))
			.collect()
	}
}


#[cfg(test)]
mod tests {
	use super::*;
	use test_case::test_case;

	#[test_case(5, "0124515891")]
	#[test_case(9, "5158916779")]
	#[test_case(18, "9251071085")]
	#[test_case(2018, "5941429882")]
	fn part1_examples(count: usize, scores: &str) {
		assert_eq!(part1_impl(count), scores);
	}

	#[test_case("51589", 9)]
	#[test_case("01245", 5)]
	#[test_case("92510", 18)]
	#[test_case("59414", 2018)]
	#[test_case("37", 0)]
	fn part2_examples(digits: &str, recipes: usize) {
		assert_eq!(part2_impl(&input_digits_from_str(digits).unwrap()), recipes);
	}

	#[test]
	fn answers() {
		assert_eq!(super::part1("9\n").unwrap(), "5158916779");
		assert_eq!(super::part2("51589\n").unwrap(), 9);
		assert!(matches!(input_digits_from_str("12a"), Err(parsing::RecipesError::Digit('a'))));
		assert!(matches!(input_count_from_str(" \n"), Err(parsing::RecipesError::Empty)));
	}
}
