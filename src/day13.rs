// Copyright (c) 2022 Bastiaan Marinus van de Weerd


#[cfg_attr(test, derive(Debug))]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum Dir { Up, Right, Down, Left }

impl Dir {
	fn turn_left(self) -> Self {
		match self { Dir::Up => Dir::Left, Dir::Left => Dir::Down, Dir::Down => Dir::Right, Dir::Right => Dir::Up }
	}

	fn turn_right(self) -> Self {
		match self { Dir::Up => Dir::Right, Dir::Right => Dir::Down, Dir::Down => Dir::Left, Dir::Left => Dir::Up }
	}
}

#[cfg_attr(test, derive(Debug))]
#[derive(Clone)]
struct Cart {
	pos: [usize; 2],
	dir: Dir,
	/// Number of intersections crossed; turns cycle left, straight, right
	intersections: usize,
	crashed: bool,
}

#[cfg_attr(test, derive(Debug))]
#[derive(Clone)]
struct Mine {
	tracks: Vec<u8>,
	stride: usize,
	carts: Vec<Cart>,
}

#[derive(Debug, thiserror::Error)]
#[error("Cart derailed at {},{}", .pos[0], .pos[1])]
struct DerailedError { pos: [usize; 2] }

impl Mine {
	fn track(&self, [x, y]: [usize; 2]) -> u8 {
		if x >= self.stride { return b' ' }
		self.tracks.get(y * self.stride + x).copied().unwrap_or(b' ')
	}

	fn advance(&self, cart: &mut Cart) -> Result<(), DerailedError> {
		let [x, y] = cart.pos;
		let next = match cart.dir {
			Dir::Up => y.checked_sub(1).map(|y| [x, y]),
			Dir::Down => Some([x, y + 1]),
			Dir::Left => x.checked_sub(1).map(|x| [x, y]),
			Dir::Right => Some([x + 1, y]),
		}.ok_or(DerailedError { pos: cart.pos })?;

		cart.dir = match (self.track(next), cart.dir) {
			(b'|', Dir::Up | Dir::Down) | (b'-', Dir::Left | Dir::Right) => cart.dir,
			(b'/', Dir::Up | Dir::Down) | (b'\\', Dir::Left | Dir::Right) => cart.dir.turn_right(),
			(b'/', Dir::Left | Dir::Right) | (b'\\', Dir::Up | Dir::Down) => cart.dir.turn_left(),
			(b'+', dir) => {
				cart.intersections += 1;
				match (cart.intersections - 1) % 3 {
					0 => dir.turn_left(),
					1 => dir,
					_ => dir.turn_right(),
				}
			}
			_ => return Err(DerailedError { pos: next }),
		};
		cart.pos = next;
		Ok(())
	}

	/// Positions, directions and next turns of all carts, in reading order.
	fn state(&self) -> Vec<([usize; 2], Dir, usize)> {
		let mut state = self.carts.iter()
			.map(|cart| ([cart.pos[1], cart.pos[0]], cart.dir, cart.intersections % 3))
			.collect::<Vec<_>>();
		state.sort_unstable_by_key(|(pos, _, _)| *pos);
		state
	}

	/// Moves every cart once, in reading order. Carts that collide are marked
	/// as crashed immediately, and their positions returned in order.
	fn tick(&mut self) -> Result<Vec<[usize; 2]>, DerailedError> {
		self.carts.sort_by_key(|cart| [cart.pos[1], cart.pos[0]]);
		let mut collisions = Vec::new();
		for i in 0..self.carts.len() {
			if self.carts[i].crashed { continue }
			let mut cart = self.carts[i].clone();
			self.advance(&mut cart)?;
			let pos = cart.pos;
			self.carts[i] = cart;

			let mut collided = false;
			for other in self.carts.iter_mut().enumerate()
				.filter(|(j, other)| *j != i && !other.crashed && other.pos == pos)
				.map(|(_, other)| other) {
				other.crashed = true;
				collided = true;
			}
			if collided {
				self.carts[i].crashed = true;
				tracing::debug!(x = pos[0], y = pos[1], "carts collided");
				collisions.push(pos);
			}
		}
		self.carts.retain(|cart| !cart.crashed);
		Ok(collisions)
	}
}


fn input_mine_from_str(s: &str) -> Result<Mine, parsing::MineError> {
	s.parse()
}


fn part1_impl(mut input_mine: Mine) -> anyhow::Result<[usize; 2]> {
	anyhow::ensure!(input_mine.carts.len() > 1, "Fewer than two carts can not collide");
	let mut seen = std::collections::HashSet::new();
	loop {
		if let Some(pos) = input_mine.tick()?.first() { return Ok(*pos) }
		anyhow::ensure!(seen.insert(input_mine.state()), "Carts never collide");
	}
}

pub(crate) fn part1(input: &str) -> anyhow::Result<String> {
	let [x, y] = part1_impl(input_mine_from_str(input)?)?;
	Ok(format!("{x},{y}"))
}


fn part2_impl(mut input_mine: Mine) -> anyhow::Result<[usize; 2]> {
	let mut seen = std::collections::HashSet::new();
	loop {
		match input_mine.carts.as_slice() {
			[] => anyhow::bail!("No carts remain"),
			[last] => return Ok(last.pos),
			_ => {
				input_mine.tick()?;
				anyhow::ensure!(seen.insert(input_mine.state()), "Remaining carts never collide");
			}
		}
	}
}

pub(crate) fn part2(input: &str) -> anyhow::Result<String> {
	let [x, y] = part2_impl(input_mine_from_str(input)?)?;
	Ok(format!("{x},{y}"))
}


mod parsing {
	use std::str::FromStr;
	use super::{Cart, Dir, Mine};

	#[derive(Debug, thiserror::Error)]
	pub(super) enum MineError {
		#[error("Empty input")]
		Empty,
		#[error("Invalid byte {found:?} on line {line}, column {column}")]
		InvalidByte { line: usize, column: usize, found: char },
	}

	impl FromStr for Mine {
		type Err = MineError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			let stride = s.lines().map(str::len).max().filter(|len| *len > 0)
				.ok_or(MineError::Empty)?;
			let mut tracks = Vec::with_capacity(stride * s.lines().count());
			let mut carts = Vec::new();
			for (y, line) in s.lines().enumerate() {
				for (x, b) in line.bytes().enumerate() {
					let (track, dir) = match b {
						b' ' | b'|' | b'-' | b'/' | b'\\' | b'+' => (b, None),
						b'^' => (b'|', Some(Dir::Up)),
						b'v' => (b'|', Some(Dir::Down)),
						b'<' => (b'-', Some(Dir::Left)),
						b'>' => (b'-', Some(Dir::Right)),
						found => return Err(MineError::InvalidByte {
							line: y + 1, column: x + 1, found: found as char }),
					};
					tracks.push(track);
					if let Some(dir) = dir {
						carts.push(Cart { pos: [x, y], dir, intersections: 0, crashed: false });
					}
				}
				tracks.resize(tracks.len() + stride - line.len(), b' ');
			}
			Ok(Mine { tracks, stride, carts })
		}
	}
}


#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn part1() {
		const INPUT: &str = indoc::indoc! { r"
			/->-\
			|   |  /----\
			| /-+--+-\  |
			| | |  | v  |
			\-+-/  \-+--/
			  \------/
		" };
		assert_eq!(part1_impl(input_mine_from_str(INPUT).unwrap()).unwrap(), [7, 3]);
		assert_eq!(super::part1(INPUT).unwrap(), "7,3");
	}

	#[test]
	fn part2() {
		const INPUT: &str = indoc::indoc! { r"
			/>-<\
			|   |
			| /<+-\
			| | | v
			\>+</ |
			  |   ^
			  \<->/
		" };
		assert_eq!(part2_impl(input_mine_from_str(INPUT).unwrap()).unwrap(), [6, 4]);
	}

	#[test]
	fn collisions() {
		// Head-on on a straight track: both carts are removed in the same tick
		let mut mine = input_mine_from_str("->--<-\n").unwrap();
		assert!(mine.tick().unwrap().is_empty());
		assert_eq!(mine.tick().unwrap(), vec![[3, 0]]);
		assert!(mine.carts.is_empty());
		assert!(part2_impl(input_mine_from_str("->--<-\n").unwrap()).is_err());
	}

	#[test]
	fn never_colliding() {
		const INPUT: &str = indoc::indoc! { r"
			/>\  /<\
			\-/  \-/
		" };
		assert!(part1_impl(input_mine_from_str(INPUT).unwrap()).is_err());
		assert!(part2_impl(input_mine_from_str(INPUT).unwrap()).is_err());
		assert!(super::part1("/->-\\\n|   |\n\\---/\n").is_err());
	}

	#[test]
	fn derailed() {
		let mut mine = input_mine_from_str("-->\n").unwrap();
		assert!(matches!(mine.tick(), Err(DerailedError { pos: [3, 0] })));
		assert!(matches!(input_mine_from_str("-x-\n"),
			Err(parsing::MineError::InvalidByte { line: 1, column: 2, found: 'x' })));
	}
}
