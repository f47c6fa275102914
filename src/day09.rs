// Copyright (c) 2022 Bastiaan Marinus van de Weerd


#[cfg_attr(test, derive(Debug, PartialEq))]
#[derive(Clone, Copy)]
struct Game {
	players: usize,
	last_marble: usize,
}

impl Game {
	/// Plays the game and returns the winning score.
	///
	/// The circle is kept in a `VecDeque` whose back is the current marble,
	/// so placing and removing marbles amounts to rotating a few positions.
	fn high_score(self) -> usize {
		use std::collections::VecDeque;

		let mut scores = vec![0; self.players];
		let mut circle = VecDeque::with_capacity(self.last_marble + 1);
		circle.push_back(0);

		for marble in 1..=self.last_marble {
			if marble % 23 == 0 {
				circle.rotate_right(7);
				let removed = circle.pop_back().unwrap_or(0);
				scores[marble % self.players] += marble + removed;
				circle.rotate_left(1);
			} else {
				circle.rotate_left(1);
				circle.push_back(marble);
			}
		}

		scores.into_iter().max().unwrap_or(0)
	}
}


fn input_game_from_str(s: &str) -> Result<Game, parsing::GameError> {
	s.trim_end().parse()
}


fn part1_impl(input_game: Game) -> usize {
	input_game.high_score()
}

pub(crate) fn part1(input: &str) -> anyhow::Result<usize> {
	Ok(part1_impl(input_game_from_str(input)?))
}


fn part2_impl(input_game: Game) -> usize {
	Game { last_marble: input_game.last_marble * 100, ..input_game }.high_score()
}

pub(crate) fn part2(input: &str) -> anyhow::Result<usize> {
	Ok(part2_impl(input_game_from_str(input)?))
}


mod parsing {
	use std::{num::ParseIntError, str::FromStr};
	use super::Game;

	#[derive(Debug, thiserror::Error)]
	pub(super) enum GameError {
		#[error("Expected `N players; last marble is worth M points`")]
		Format,
		#[error("Invalid number")]
		Number(#[from] ParseIntError),
		#[error("There must be at least one player")]
		NoPlayers,
	}

	impl FromStr for Game {
		type Err = GameError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			let (players, last_marble) = s.strip_suffix(" points")
				.and_then(|s| s.split_once(" players; last marble is worth "))
				.ok_or(GameError::Format)?;
			let players = players.parse()?;
			if players == 0 { return Err(GameError::NoPlayers) }
			Ok(Game { players, last_marble: last_marble.parse()? })
		}
	}
}


#[cfg(test)]
mod tests {
	use super::*;
	use test_case::test_case;

	#[test_case(9, 25, 32)]
	#[test_case(10, 1618, 8317)]
	#[test_case(13, 7999, 146373)]
	#[test_case(17, 1104, 2764)]
	#[test_case(21, 6111, 54718)]
	#[test_case(30, 5807, 37305)]
	fn high_score(players: usize, last_marble: usize, answer: usize) {
		assert_eq!(part1_impl(Game { players, last_marble }), answer);
	}

	#[test]
	fn game_from_str() {
		assert_eq!(input_game_from_str("10 players; last marble is worth 1618 points\n").unwrap(),
			Game { players: 10, last_marble: 1618 });
		assert_eq!(super::part1("9 players; last marble is worth 25 points").unwrap(), 32);
		assert!(matches!(input_game_from_str("0 players; last marble is worth 25 points"),
			Err(super::parsing::GameError::NoPlayers)));
		assert!(matches!(input_game_from_str("10 players, 1618 points"),
			Err(super::parsing::GameError::Format)));
	}
}
