// Copyright (c) 2022 Bastiaan Marinus van de Weerd


#[cfg_attr(test, derive(Debug, PartialEq))]
struct Claim {
	id: usize,
	pos: [usize; 2],
	size: [usize; 2],
}

impl Claim {
	fn squares(&self) -> impl Iterator<Item = [usize; 2]> + '_ {
		use itertools::Itertools as _;
		(self.pos[1]..self.pos[1] + self.size[1])
			.cartesian_product(self.pos[0]..self.pos[0] + self.size[0])
			.map(|(y, x)| [x, y])
	}
}

/// Number of claims covering each square inch of the fabric.
struct Fabric {
	claims: Vec<u16>,
	stride: usize,
}

impl Fabric {
	fn from_claims(claims: &[Claim]) -> Self {
		let stride = claims.iter().map(|c| c.pos[0] + c.size[0]).max().unwrap_or(0);
		let height = claims.iter().map(|c| c.pos[1] + c.size[1]).max().unwrap_or(0);
		let mut fabric = Fabric { claims: vec![0; stride * height], stride };
		for [x, y] in claims.iter().flat_map(|claim| claim.squares()) {
			fabric.claims[y * stride + x] += 1;
		}
		fabric
	}

	fn count(&self, [x, y]: [usize; 2]) -> u16 {
		self.claims[y * self.stride + x]
	}
}


fn input_claims_from_str(s: &str) -> Result<Vec<Claim>, parsing::ClaimsError> {
	parsing::claims_from_str(s).collect()
}


fn part1_impl(input_claims: &[Claim]) -> usize {
	Fabric::from_claims(input_claims).claims.iter()
		.filter(|count| **count > 1)
		.count()
}

pub(crate) fn part1(input: &str) -> anyhow::Result<usize> {
	Ok(part1_impl(&input_claims_from_str(input)?))
}


fn part2_impl(input_claims: &[Claim]) -> Option<usize> {
	let fabric = Fabric::from_claims(input_claims);
	input_claims.iter()
		.find(|claim| claim.squares().all(|pos| fabric.count(pos) == 1))
		.map(|claim| claim.id)
}

pub(crate) fn part2(input: &str) -> anyhow::Result<usize> {
	part2_impl(&input_claims_from_str(input)?)
		.ok_or_else(|| anyhow::anyhow!("Every claim overlaps another"))
}


mod parsing {
	use std::{num::ParseIntError, str::FromStr};
	use super::Claim;

	#[derive(Debug, thiserror::Error)]
	pub(super) enum ClaimError {
		#[error("Expected `#ID @ X,Y: WxH`")]
		Format,
		#[error("Invalid number")]
		Number(#[from] ParseIntError),
	}

	impl FromStr for Claim {
		type Err = ClaimError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			let s = s.strip_prefix('#').ok_or(ClaimError::Format)?;
			let (id, s) = s.split_once(" @ ").ok_or(ClaimError::Format)?;
			let (pos, size) = s.split_once(": ").ok_or(ClaimError::Format)?;
			let (x, y) = pos.split_once(',').ok_or(ClaimError::Format)?;
			let (w, h) = size.split_once('x').ok_or(ClaimError::Format)?;
			Ok(Claim {
				id: id.parse()?,
				pos: [x.parse()?, y.parse()?],
				size: [w.parse()?, h.parse()?],
			})
		}
	}

	#[derive(Debug, thiserror::Error)]
	pub(super) enum ClaimsError {
		#[error("Empty input")]
		Empty,
		#[error("Invalid claim on line {line}")]
		Claim { line: usize, source: ClaimError },
	}

	pub(super) fn claims_from_str(s: &str) -> impl Iterator<Item = Result<Claim, ClaimsError>> + '_ {
		use {std::iter::once, itertools::Either::*};
		if s.trim().is_empty() { return Left(once(Err(ClaimsError::Empty))) }
		Right(s.lines()
			.enumerate()
			.filter(|(_, line)| !line.is_empty())
			.map(|(l, line)| line.parse()
				.map_err(|e| ClaimsError::Claim { line: l + 1, source: e })))
	}
}


#[test]
fn tests() {
	const INPUT: &str = indoc::indoc! { "
		#1 @ 1,3: 4x4
		#2 @ 3,1: 4x4
		#3 @ 5,5: 2x2
	" };
	let claims = input_claims_from_str(INPUT).unwrap();
	assert_eq!(claims[0], Claim { id: 1, pos: [1, 3], size: [4, 4] });
	assert_eq!(part1_impl(&claims), 4);
	assert_eq!(part2_impl(&claims), Some(3));
	assert!(matches!(input_claims_from_str("#1 @ 1,3: 4x4\n#2 @ 3,1 4x4\n"),
		Err(parsing::ClaimsError::Claim { line: 2, source: parsing::ClaimError::Format })));
}
