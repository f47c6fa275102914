// Copyright (c) 2022 Bastiaan Marinus van de Weerd


#[cfg_attr(test, derive(Debug, PartialEq))]
#[derive(Clone, Copy)]
struct Star {
	pos: [i64; 2],
	vel: [i64; 2],
}

impl Star {
	fn at(&self, time: i64) -> [i64; 2] {
		[self.pos[0] + self.vel[0] * time, self.pos[1] + self.vel[1] * time]
	}
}

fn bounds(positions: impl Iterator<Item = [i64; 2]>) -> ([i64; 2], [i64; 2]) {
	positions.fold(([i64::MAX; 2], [i64::MIN; 2]), |(min, max), [x, y]|
		([min[0].min(x), min[1].min(y)], [max[0].max(x), max[1].max(y)]))
}

fn area(stars: &[Star], time: i64) -> i64 {
	let (min, max) = bounds(stars.iter().map(|s| s.at(time)));
	(max[0] - min[0] + 1) * (max[1] - min[1] + 1)
}

/// Returns the second at which the stars are closest together, which is
/// when their bounding box stops shrinking.
fn convergence(stars: &[Star]) -> i64 {
	let mut time = 0;
	let mut current = area(stars, 0);
	loop {
		let next = area(stars, time + 1);
		if next >= current { break }
		(time, current) = (time + 1, next);
	}
	tracing::debug!(time, area = current, "stars converged");
	time
}

struct Message {
	min: [i64; 2],
	max: [i64; 2],
	lit: std::collections::HashSet<[i64; 2]>,
}

impl Message {
	fn at(stars: &[Star], time: i64) -> Self {
		let lit = stars.iter().map(|s| s.at(time)).collect::<std::collections::HashSet<_>>();
		let (min, max) = bounds(lit.iter().copied());
		Message { min, max, lit }
	}
}

impl std::fmt::Display for Message {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use std::fmt::Write;
		for y in self.min[1]..=self.max[1] {
			for x in self.min[0]..=self.max[0] {
				f.write_char(if self.lit.contains(&[x, y]) { '#' } else { '.' })?
			}
			if y < self.max[1] { f.write_char('\n')? }
		}
		Ok(())
	}
}


fn input_stars_from_str(s: &str) -> Result<Vec<Star>, parsing::StarsError> {
	parsing::stars_from_str(s).collect()
}


fn part1_impl(input_stars: &[Star]) -> impl std::fmt::Display {
	Message::at(input_stars, convergence(input_stars))
}

pub(crate) fn part1(input: &str) -> anyhow::Result<impl std::fmt::Display> {
	Ok(part1_impl(&input_stars_from_str(input)?))
}


fn part2_impl(input_stars: &[Star]) -> i64 {
	convergence(input_stars)
}

pub(crate) fn part2(input: &str) -> anyhow::Result<i64> {
	Ok(part2_impl(&input_stars_from_str(input)?))
}


mod parsing {
	use std::{num::ParseIntError, str::FromStr};
	use super::Star;

	#[derive(Debug, thiserror::Error)]
	pub(super) enum StarError {
		#[error("Expected `position=<X, Y> velocity=<DX, DY>`")]
		Format,
		#[error("Invalid number")]
		Number(#[from] ParseIntError),
	}

	fn pair(s: &str) -> Result<[i64; 2], StarError> {
		let (x, y) = s.strip_prefix('<')
			.and_then(|s| s.strip_suffix('>'))
			.and_then(|s| s.split_once(','))
			.ok_or(StarError::Format)?;
		Ok([x.trim().parse()?, y.trim().parse()?])
	}

	impl FromStr for Star {
		type Err = StarError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			let (pos, vel) = s.trim_end()
				.strip_prefix("position=")
				.and_then(|s| s.split_once(" velocity="))
				.ok_or(StarError::Format)?;
			Ok(Star { pos: pair(pos)?, vel: pair(vel)? })
		}
	}

	#[derive(Debug, thiserror::Error)]
	pub(super) enum StarsError {
		#[error("Empty input")]
		Empty,
		#[error("Invalid star on line {line}")]
		Star { line: usize, source: StarError },
	}

	pub(super) fn stars_from_str(s: &str) -> impl Iterator<Item = Result<Star, StarsError>> + '_ {
		use {std::iter::once, itertools::Either::*};
		if s.trim().is_empty() { return Left(once(Err(StarsError::Empty))) }
		Right(s.lines()
			.enumerate()
			.filter(|(_, line)| !line.is_empty())
			.map(|(l, line)| line.parse()
				.map_err(|e| StarsError::Star { line: l + 1, source: e })))
	}
}


#[test]
fn tests() {
	const INPUT: &str = indoc::indoc! { "
		position=< 9,  1> velocity=< 0,  2>
		position=< 7,  0> velocity=<-1,  0>
		position=< 3, -2> velocity=<-1,  1>
		position=< 6, 10> velocity=<-2, -1>
		position=< 2, -4> velocity=< 2,  2>
		position=<-6, 10> velocity=< 2, -2>
		position=< 1,  8> velocity=< 1, -1>
		position=< 1,  7> velocity=< 1,  0>
		position=<-3, 11> velocity=< 1, -2>
		position=< 7,  6> velocity=<-1, -1>
		position=<-2,  3> velocity=< 1,  0>
		position=<-4,  3> velocity=< 2,  0>
		position=<10, -3> velocity=<-1,  1>
		position=< 5, 11> velocity=< 1, -2>
		position=< 4,  7> velocity=< 0, -1>
		position=< 8, -2> velocity=< 0,  1>
		position=<15,  0> velocity=<-2,  0>
		position=< 1,  6> velocity=< 1,  0>
		position=< 8,  9> velocity=< 0, -1>
		position=< 3,  3> velocity=<-1,  1>
		position=< 0,  5> velocity=< 0, -1>
		position=<-2,  2> velocity=< 2,  0>
		position=< 5, -2> velocity=< 1,  2>
		position=< 1,  4> velocity=< 2,  1>
		position=<-2,  7> velocity=< 2, -2>
		position=< 3,  6> velocity=<-1, -1>
		position=< 5,  0> velocity=< 1,  0>
		position=<-6,  0> velocity=< 2,  0>
		position=< 5,  9> velocity=< 1, -2>
		position=<14,  7> velocity=<-2,  0>
		position=<-3,  6> velocity=< 2, -1>
	" };
	let stars = input_stars_from_str(INPUT).unwrap();
	assert_eq!(stars[2], Star { pos: [3, -2], vel: [-1, 1] });
	assert_eq!(part1_impl(&stars).to_string(), indoc::indoc! { "
		#...#..###
		#...#...#.
		#...#...#.
		#####...#.
		#...#...#.
		#...#...#.
		#...#...#.
		#...#..###" });
	assert_eq!(part2_impl(&stars), 3);
}
