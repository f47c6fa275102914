// Copyright (c) 2022 Bastiaan Marinus van de Weerd


const GRID_SIZE: usize = 300;

fn power_level(serial: i64, [x, y]: [usize; 2]) -> i64 {
	let rack = x as i64 + 10;
	((rack * y as i64 + serial) * rack).div_euclid(100).rem_euclid(10) - 5
}

#[cfg_attr(test, derive(Debug, PartialEq))]
#[derive(Clone, Copy)]
struct Square {
	pos: [usize; 2],
	size: usize,
	power: i64,
}

impl Square {
	/// Orders by power, preferring smaller squares and then reading order on ties.
	fn rank(&self) -> impl Ord {
		use std::cmp::Reverse;
		(self.power, Reverse(self.size), Reverse(self.pos[1]), Reverse(self.pos[0]))
	}

	fn beats(&self, other: Option<&Square>) -> bool {
		other.map_or(true, |other| self.rank() > other.rank())
	}
}

/// Summed-area table over an `N`×`N` grid of fuel cells with 1-based coordinates.
struct Grid<const N: usize> {
	sums: Vec<i64>,
}

impl<const N: usize> Grid<N> {
	const STRIDE: usize = N + 1;

	fn new(serial: i64) -> Self {
		let s = Self::STRIDE;
		let mut sums = vec![0; s * s];
		for y in 1..=N {
			for x in 1..=N {
				sums[y * s + x] = power_level(serial, [x, y])
					+ sums[(y - 1) * s + x]
					+ sums[y * s + x - 1]
					- sums[(y - 1) * s + x - 1];
			}
		}
		Grid { sums }
	}

	fn square_power(&self, [x, y]: [usize; 2], size: usize) -> i64 {
		let s = Self::STRIDE;
		let ([x0, y0], [x1, y1]) = ([x - 1, y - 1], [x + size - 1, y + size - 1]);
		self.sums[y1 * s + x1] - self.sums[y0 * s + x1] - self.sums[y1 * s + x0] + self.sums[y0 * s + x0]
	}

	fn best_square(&self, size: usize) -> Option<Square> {
		use itertools::Itertools as _;
		let last = (N + 1).checked_sub(size)?;
		(1..=last).cartesian_product(1..=last)
			.map(|(y, x)| Square { pos: [x, y], size, power: self.square_power([x, y], size) })
			.max_by_key(Square::rank)
	}
}


fn input_serial_from_str(s: &str) -> Result<i64, parsing::SerialError> {
	parsing::serial_from_str(s)
}


fn part1_impl<const N: usize>(input_serial: i64) -> Option<Square> {
	Grid::<N>::new(input_serial).best_square(3)
}

pub(crate) fn part1(input: &str) -> anyhow::Result<String> {
	let square = part1_impl::<GRID_SIZE>(input_serial_from_str(input)?)
		.ok_or_else(|| anyhow::anyhow!("Grid is smaller than 3×3"))?;
	Ok(format!("{},{}", square.pos[0], square.pos[1]))
}


/// Searches every square size on a fixed pool of workers. Each worker claims
/// the next unsearched size from a shared counter, and publishes its result
/// into a shared best slot when it improves on it.
fn part2_impl<const N: usize>(input_serial: i64) -> Option<Square> {
	use std::sync::{atomic::{AtomicUsize, Ordering}, PoisonError, RwLock};

	let grid = Grid::<N>::new(input_serial);
	let next_size = AtomicUsize::new(1);
	let best = RwLock::new(None::<Square>);

	rayon::scope(|scope| {
		for worker in 0..rayon::current_num_threads() {
			let (grid, next_size, best) = (&grid, &next_size, &best);
			scope.spawn(move |_| loop {
				let size = next_size.fetch_add(1, Ordering::Relaxed);
				if size > N { break }
				let Some(candidate) = grid.best_square(size) else { continue };
				tracing::trace!(worker, size, power = candidate.power, "searched square size");

				let improves = candidate.beats(best.read()
					.unwrap_or_else(PoisonError::into_inner)
					.as_ref());
				if !improves { continue }

				let mut best = best.write().unwrap_or_else(PoisonError::into_inner);
				if candidate.beats(best.as_ref()) {
					tracing::debug!(worker, size, power = candidate.power, "new best square");
					*best = Some(candidate);
				}
			});
		}
	});

	best.into_inner().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn part2(input: &str) -> anyhow::Result<String> {
	let square = part2_impl::<GRID_SIZE>(input_serial_from_str(input)?)
		.ok_or_else(|| anyhow::anyhow!("Grid is empty"))?;
	Ok(format!("{},{},{}", square.pos[0], square.pos[1], square.size))
}


mod parsing {
	#[derive(Debug, thiserror::Error)]
	pub(super) enum SerialError {
		#[error("Invalid grid serial number {0:?}")]
		Invalid(String, #[source] std::num::ParseIntError),
	}

	pub(super) fn serial_from_str(s: &str) -> Result<i64, SerialError> {
		let s = s.trim();
		s.parse().map_err(|e| SerialError::Invalid(s.to_owned(), e))
	}
}


#[cfg(test)]
mod tests {
	use super::*;
	use test_case::test_case;

	#[test_case(8, [3, 5], 4)]
	#[test_case(57, [122, 79], -5)]
	#[test_case(39, [217, 196], 0)]
	#[test_case(71, [101, 153], 4)]
	fn power_levels(serial: i64, pos: [usize; 2], level: i64) {
		assert_eq!(power_level(serial, pos), level);
	}

	#[test]
	fn square_power() {
		let grid = Grid::<GRID_SIZE>::new(18);
		let naive = (45..48)
			.flat_map(|y| (33..36).map(move |x| power_level(18, [x, y])))
			.sum::<i64>();
		assert_eq!(grid.square_power([33, 45], 3), naive);
		assert_eq!(grid.square_power([33, 45], 1), power_level(18, [33, 45]));
	}

	#[test_case(18, Square { pos: [33, 45], size: 3, power: 29 }; "serial 18")]
	#[test_case(42, Square { pos: [21, 61], size: 3, power: 30 }; "serial 42")]
	fn part1_examples(serial: i64, square: Square) {
		assert_eq!(part1_impl::<GRID_SIZE>(serial), Some(square));
	}

	#[test_case(18, Square { pos: [90, 269], size: 16, power: 113 }; "serial 18")]
	#[test_case(42, Square { pos: [232, 251], size: 12, power: 119 }; "serial 42")]
	fn part2_examples(serial: i64, square: Square) {
		assert_eq!(part2_impl::<GRID_SIZE>(serial), Some(square));
	}

	#[test]
	fn answers() {
		assert_eq!(super::part1("18\n").unwrap(), "33,45");
		assert!(super::part1("eighteen").is_err());
	}
}
