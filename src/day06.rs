// Copyright (c) 2022 Bastiaan Marinus van de Weerd


type Coordinate = [i32; 2];

fn distance(a: Coordinate, b: Coordinate) -> u32 {
	a[0].abs_diff(b[0]) + a[1].abs_diff(b[1])
}

/// The bounding box of all coordinates, grown by one in every direction.
struct Bounds {
	min: Coordinate,
	max: Coordinate,
}

impl Bounds {
	fn of(coordinates: &[Coordinate]) -> Self {
		let (mut min, mut max) = ([i32::MAX; 2], [i32::MIN; 2]);
		for c in coordinates {
			for i in 0..2 {
				min[i] = min[i].min(c[i] - 1);
				max[i] = max[i].max(c[i] + 1);
			}
		}
		Bounds { min, max }
	}

	fn cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
		use itertools::Itertools as _;
		(self.min[1]..=self.max[1])
			.cartesian_product(self.min[0]..=self.max[0])
			.map(|(y, x)| [x, y])
	}

	fn on_border(&self, [x, y]: Coordinate) -> bool {
		x == self.min[0] || x == self.max[0] || y == self.min[1] || y == self.max[1]
	}
}

/// Returns the index of the coordinate uniquely closest to `cell`, if any.
fn closest(coordinates: &[Coordinate], cell: Coordinate) -> Option<usize> {
	let mut best = None;
	let mut best_distance = u32::MAX;
	for (i, c) in coordinates.iter().enumerate() {
		let d = distance(*c, cell);
		if d < best_distance {
			best = Some(i);
			best_distance = d;
		} else if d == best_distance {
			best = None;
		}
	}
	best
}


fn input_coordinates_from_str(s: &str) -> Result<Vec<Coordinate>, parsing::CoordinatesError> {
	parsing::coordinates_from_str(s).collect()
}


fn part1_impl(input_coordinates: &[Coordinate]) -> u32 {
	let bounds = Bounds::of(input_coordinates);
	let mut areas = vec![Some(0_u32); input_coordinates.len()];
	for cell in bounds.cells() {
		let Some(owner) = closest(input_coordinates, cell) else { continue };
		if bounds.on_border(cell) {
			areas[owner] = None;
		} else if let Some(area) = areas[owner].as_mut() {
			*area += 1;
		}
	}
	areas.into_iter().flatten().max().unwrap_or(0)
}

pub(crate) fn part1(input: &str) -> anyhow::Result<u32> {
	Ok(part1_impl(&input_coordinates_from_str(input)?))
}


fn part2_impl<const LIMIT: u32>(input_coordinates: &[Coordinate]) -> usize {
	let mut bounds = Bounds::of(input_coordinates);

	// A cell farther than `LIMIT / n` beyond the box can not be in the region
	let margin = (LIMIT / input_coordinates.len().max(1) as u32) as i32;
	for i in 0..2 {
		bounds.min[i] -= margin;
		bounds.max[i] += margin;
	}

	bounds.cells()
		.filter(|&cell| input_coordinates.iter()
			.try_fold(0, |total, &c| {
				let total = total + distance(c, cell);
				(total < LIMIT).then_some(total)
			})
			.is_some())
		.count()
}

pub(crate) fn part2(input: &str) -> anyhow::Result<usize> {
	Ok(part2_impl::<10_000>(&input_coordinates_from_str(input)?))
}


mod parsing {
	use std::num::ParseIntError;
	use super::Coordinate;

	#[derive(Debug, thiserror::Error)]
	pub(super) enum CoordinateError {
		#[error("Expected `X, Y`")]
		Format,
		#[error("Invalid number")]
		Number(#[from] ParseIntError),
	}

	fn coordinate_from_str(s: &str) -> Result<Coordinate, CoordinateError> {
		let (x, y) = s.split_once(", ").ok_or(CoordinateError::Format)?;
		Ok([x.trim().parse()?, y.trim().parse()?])
	}

	#[derive(Debug, thiserror::Error)]
	pub(super) enum CoordinatesError {
		#[error("Empty input")]
		Empty,
		#[error("Invalid coordinate on line {line}")]
		Coordinate { line: usize, source: CoordinateError },
	}

	pub(super) fn coordinates_from_str(s: &str) -> impl Iterator<Item = Result<Coordinate, CoordinatesError>> + '_ {
		use {std::iter::once, itertools::Either::*};
		if s.trim().is_empty() { return Left(once(Err(CoordinatesError::Empty))) }
		Right(s.lines()
			.enumerate()
			.filter(|(_, line)| !line.is_empty())
			.map(|(l, line)| coordinate_from_str(line)
				.map_err(|e| CoordinatesError::Coordinate { line: l + 1, source: e })))
	}
}


#[test]
fn tests() {
	const INPUT: &str = indoc::indoc! { "
		1, 1
		1, 6
		8, 3
		3, 4
		5, 5
		8, 9
	" };
	let coordinates = input_coordinates_from_str(INPUT).unwrap();
	assert_eq!(closest(&coordinates, [0, 0]), Some(0));
	assert_eq!(closest(&coordinates, [0, 4]), None);
	assert_eq!(part1_impl(&coordinates), 17);
	assert_eq!(part2_impl::<32>(&coordinates), 16);
}
