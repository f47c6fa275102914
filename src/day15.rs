// Copyright (c) 2022 Bastiaan Marinus van de Weerd


const HIT_POINTS: i32 = 200;
const GOBLIN_POWER: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind { Elf, Goblin }

#[cfg_attr(test, derive(Debug))]
#[derive(Clone)]
struct Unit {
	kind: Kind,
	pos: usize,
	hp: i32,
}

impl Unit {
	fn alive(&self) -> bool {
		self.hp > 0
	}
}

#[cfg_attr(test, derive(Debug))]
#[derive(Clone)]
struct Cave {
	open: Vec<bool>,
	stride: usize,
	units: Vec<Unit>,
}

#[cfg_attr(test, derive(Debug, PartialEq))]
struct Battle {
	rounds: usize,
	hp: i32,
	winner: Kind,
}

impl Battle {
	fn outcome(&self) -> usize {
		self.rounds * self.hp as usize
	}
}

impl Cave {
	/// Returns the positions adjacent to `pos`, in reading order.
	fn adjacent(&self, pos: usize) -> impl Iterator<Item = usize> {
		let s = self.stride;
		let above = (pos >= s).then(|| pos - s);
		let left = (pos % s > 0).then(|| pos - 1);
		let right = (pos % s < s - 1).then(|| pos + 1);
		let below = (pos + s < self.open.len()).then(|| pos + s);
		[above, left, right, below].into_iter().flatten()
	}

	fn unit_at(&self, pos: usize) -> Option<usize> {
		self.units.iter().position(|u| u.alive() && u.pos == pos)
	}

	fn is_free(&self, pos: usize) -> bool {
		self.open[pos] && self.unit_at(pos).is_none()
	}

	/// Breadth-first search over free squares; unreachable squares are `usize::MAX`.
	fn distances(&self, from: usize) -> Vec<usize> {
		use std::collections::VecDeque;

		let mut distances = vec![usize::MAX; self.open.len()];
		let mut queue = VecDeque::from([from]);
		distances[from] = 0;
		while let Some(pos) = queue.pop_front() {
			for next in self.adjacent(pos) {
				if distances[next] != usize::MAX || !self.is_free(next) { continue }
				distances[next] = distances[pos] + 1;
				queue.push_back(next);
			}
		}
		distances
	}

	fn enemy_at(&self, kind: Kind, pos: usize) -> Option<usize> {
		self.unit_at(pos).filter(|&j| self.units[j].kind != kind)
	}

	/// Returns where unit `i` moves to, if it moves at all.
	fn step(&self, i: usize) -> Option<usize> {
		let Unit { kind, pos, .. } = self.units[i];
		if self.adjacent(pos).any(|adj| self.enemy_at(kind, adj).is_some()) { return None }

		let distances = self.distances(pos);
		let (_, target) = self.units.iter()
			.filter(|u| u.alive() && u.kind != kind)
			.flat_map(|u| self.adjacent(u.pos))
			.filter(|adj| distances[*adj] != usize::MAX)
			.map(|adj| (distances[adj], adj))
			.min()?;

		let back = self.distances(target);
		self.adjacent(pos)
			.filter(|adj| back[*adj] != usize::MAX)
			.min_by_key(|adj| (back[*adj], *adj))
	}

	/// Returns the adjacent enemy with the fewest hit points, if any.
	fn target(&self, i: usize) -> Option<usize> {
		let Unit { kind, pos, .. } = self.units[i];
		self.adjacent(pos)
			.filter_map(|adj| self.enemy_at(kind, adj))
			.min_by_key(|&j| (self.units[j].hp, self.units[j].pos))
	}

	/// Simulates combat until one side has no targets left. With `spare_elves`
	/// set, returns `None` as soon as any elf dies.
	fn fight(mut self, elf_power: i32, spare_elves: bool) -> Option<Battle> {
		let mut rounds = 0;
		loop {
			self.units.sort_by_key(|u| u.pos);
			for i in 0..self.units.len() {
				if !self.units[i].alive() { continue }
				let kind = self.units[i].kind;
				if !self.units.iter().any(|u| u.alive() && u.kind != kind) {
					let hp = self.units.iter().filter(|u| u.alive()).map(|u| u.hp).sum();
					tracing::debug!(elf_power, rounds, hp, winner = ?kind, "combat ended");
					return Some(Battle { rounds, hp, winner: kind })
				}

				if let Some(next) = self.step(i) { self.units[i].pos = next }

				let Some(j) = self.target(i) else { continue };
				let power = match kind { Kind::Elf => elf_power, Kind::Goblin => GOBLIN_POWER };
				let target = &mut self.units[j];
				target.hp -= power;
				if !target.alive() && target.kind == Kind::Elf {
					tracing::trace!(elf_power, rounds, pos = target.pos, "elf died");
					if spare_elves { return None }
				}
			}
			self.units.retain(Unit::alive);
			rounds += 1;
		}
	}
}


fn input_cave_from_str(s: &str) -> Result<Cave, parsing::CaveError> {
	s.parse()
}


fn part1_impl(input_cave: Cave) -> Option<Battle> {
	input_cave.fight(GOBLIN_POWER, false)
}

pub(crate) fn part1(input: &str) -> anyhow::Result<usize> {
	let battle = part1_impl(input_cave_from_str(input)?)
		.ok_or_else(|| anyhow::anyhow!("Combat was aborted"))?;
	tracing::info!(winner = ?battle.winner, rounds = battle.rounds, "combat outcome");
	Ok(battle.outcome())
}


/// Finds the lowest elf attack power with which no elf dies. Powers beyond
/// the units' hit points kill in one blow just the same, so the search stops there.
fn part2_impl(input_cave: Cave) -> Option<(i32, Battle)> {
	use rayon::prelude::{IntoParallelIterator as _, ParallelIterator as _};
	(GOBLIN_POWER + 1..=HIT_POINTS)
		.into_par_iter()
		.find_map_first(|elf_power| input_cave.clone()
			.fight(elf_power, true)
			.map(|battle| (elf_power, battle)))
}

pub(crate) fn part2(input: &str) -> anyhow::Result<usize> {
	let (elf_power, battle) = part2_impl(input_cave_from_str(input)?)
		.ok_or_else(|| anyhow::anyhow!("Elves die at any attack power"))?;
	tracing::info!(elf_power, winner = ?battle.winner, rounds = battle.rounds, "no elf died");
	Ok(battle.outcome())
}


mod parsing {
	use std::str::FromStr;
	use super::{Cave, Kind, Unit, HIT_POINTS};

	#[derive(Debug, thiserror::Error)]
	pub(super) enum CaveError {
		#[error("Empty input")]
		Empty,
		#[error("Line {line} is {found} long instead of {len}")]
		LineLen { line: usize, len: usize, found: usize },
		#[error("Invalid byte {found:?} on line {line}, column {column}")]
		InvalidByte { line: usize, column: usize, found: char },
		#[error("No units in the cave")]
		NoUnits,
	}

	impl FromStr for Cave {
		type Err = CaveError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			let stride = s.lines().next().map(str::len).filter(|len| *len > 0)
				.ok_or(CaveError::Empty)?;
			let mut open = Vec::with_capacity(stride * s.lines().count());
			let mut units = Vec::new();
			for (l, line) in s.lines().enumerate() {
				if line.len() != stride {
					return Err(CaveError::LineLen { line: l + 1, len: stride, found: line.len() }) }
				for (c, b) in line.bytes().enumerate() {
					let kind = match b {
						b'#' => { open.push(false); continue }
						b'.' => { open.push(true); continue }
						b'E' => Kind::Elf,
						b'G' => Kind::Goblin,
						found => return Err(CaveError::InvalidByte {
							line: l + 1, column: c + 1, found: found as char }),
					};
					units.push(Unit { kind, pos: open.len(), hp: HIT_POINTS });
					open.push(true);
				}
			}
			if units.is_empty() { return Err(CaveError::NoUnits) }
			Ok(Cave { open, stride, units })
		}
	}
}


#[cfg(test)]
mod tests {
	use super::*;
	use test_case::test_case;

	const EXAMPLE: &str = indoc::indoc! { "
		#######
		#.G...#
		#...EG#
		#.#.#G#
		#..G#E#
		#.....#
		#######
	" };

	#[test]
	fn movement() {
		let cave = input_cave_from_str(indoc::indoc! { "
			#######
			#E..G.#
			#...#.#
			#.G.#G#
			#######
		" }).unwrap();
		assert_eq!(cave.step(0), Some(7 + 2));

		let cave = input_cave_from_str(indoc::indoc! { "
			#######
			#.E...#
			#.....#
			#...G.#
			#######
		" }).unwrap();
		assert_eq!(cave.step(0), Some(7 + 3));
	}

	#[test]
	fn example() {
		let battle = part1_impl(input_cave_from_str(EXAMPLE).unwrap()).unwrap();
		assert_eq!(battle, Battle { rounds: 47, hp: 590, winner: Kind::Goblin });
		let (elf_power, battle) = part2_impl(input_cave_from_str(EXAMPLE).unwrap()).unwrap();
		assert_eq!(elf_power, 15);
		assert_eq!(battle, Battle { rounds: 29, hp: 172, winner: Kind::Elf });
	}

	#[test_case(indoc::indoc! { "
		#######
		#G..#E#
		#E#E.E#
		#G.##.#
		#...#E#
		#...E.#
		#######
	" }, 36334, None)]
	#[test_case(indoc::indoc! { "
		#######
		#E..EG#
		#.#G.E#
		#E.##E#
		#G..#.#
		#..E#.#
		#######
	" }, 39514, Some(31284))]
	#[test_case(indoc::indoc! { "
		#######
		#E.G#.#
		#.#G..#
		#G.#.G#
		#G..#.#
		#...E.#
		#######
	" }, 27755, Some(3478))]
	#[test_case(indoc::indoc! { "
		#######
		#.E...#
		#.#..G#
		#.###.#
		#E#G#G#
		#...#G#
		#######
	" }, 28944, Some(6474))]
	#[test_case(indoc::indoc! { "
		#########
		#G......#
		#.E.#...#
		#..##..G#
		#...##..#
		#...#...#
		#.G...G.#
		#.....G.#
		#########
	" }, 18740, Some(1140))]
	fn outcomes(input: &str, outcome: usize, spared_outcome: Option<usize>) {
		assert_eq!(super::part1(input).unwrap(), outcome);
		if let Some(spared_outcome) = spared_outcome {
			assert_eq!(super::part2(input).unwrap(), spared_outcome);
		}
	}

	#[test]
	fn answers() {
		assert_eq!(super::part1(EXAMPLE).unwrap(), 27730);
		assert_eq!(super::part2(EXAMPLE).unwrap(), 4988);
		assert!(matches!(input_cave_from_str("#.#\n#.\n"),
			Err(parsing::CaveError::LineLen { line: 2, len: 3, found: 2 })));
		assert!(matches!(input_cave_from_str("###\n#.#\n###\n"), Err(parsing::CaveError::NoUnits)));
		assert!(matches!(input_cave_from_str("###\n#E#\n#x#\n"),
			Err(parsing::CaveError::InvalidByte { line: 3, column: 2, found: 'x' })));
	}
}
