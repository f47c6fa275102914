// Copyright (c) 2022 Bastiaan Marinus van de Weerd


use std::collections::{BTreeMap, BTreeSet};

/// Per step, the steps that must be finished before it can begin.
/// Keyed by a `BTreeMap` so available steps come out alphabetically.
#[cfg_attr(test, derive(Debug))]
#[derive(Clone)]
struct Instructions(BTreeMap<char, BTreeSet<char>>);

impl Instructions {
	fn available(&self) -> impl Iterator<Item = char> + '_ {
		self.0.iter().filter(|(_, before)| before.is_empty()).map(|(step, _)| *step)
	}

	fn begin(&mut self, step: char) {
		self.0.remove(&step);
	}

	fn finish(&mut self, step: char) {
		for before in self.0.values_mut() { before.remove(&step); }
	}
}


fn input_instructions_from_str(s: &str) -> Result<Instructions, parsing::InstructionsError> {
	s.parse()
}


fn part1_impl(mut input_instructions: Instructions) -> anyhow::Result<String> {
	let mut order = String::with_capacity(input_instructions.0.len());
	while !input_instructions.0.is_empty() {
		let step = input_instructions.available().next()
			.ok_or_else(|| anyhow::anyhow!("Circular dependency after {order:?}"))?;
		input_instructions.begin(step);
		input_instructions.finish(step);
		order.push(step);
	}
	Ok(order)
}

pub(crate) fn part1(input: &str) -> anyhow::Result<String> {
	part1_impl(input_instructions_from_str(input)?)
}


fn part2_impl<const WORKERS: usize, const BASE: usize>(mut input_instructions: Instructions) -> anyhow::Result<usize> {
	// Per busy worker, the step it works on and when it will be done
	let mut busy = Vec::<(char, usize)>::with_capacity(WORKERS);
	let mut time = 0;
	loop {
		while busy.len() < WORKERS {
			let Some(step) = input_instructions.available().next() else { break };
			input_instructions.begin(step);
			busy.push((step, time + BASE + (step as u8 - b'A') as usize + 1));
		}

		let Some(done) = busy.iter().map(|(_, done)| *done).min() else {
			if input_instructions.0.is_empty() { return Ok(time) }
			anyhow::bail!("Circular dependency at {time}s")
		};

		time = done;
		busy.retain(|&(step, done)| {
			if done > time { return true }
			input_instructions.finish(step);
			false
		});
	}
}

pub(crate) fn part2(input: &str) -> anyhow::Result<usize> {
	part2_impl::<5, 60>(input_instructions_from_str(input)?)
}


mod parsing {
	use std::str::FromStr;
	use super::Instructions;

	#[derive(Debug, thiserror::Error)]
	pub(super) enum InstructionsError {
		#[error("Empty input")]
		Empty,
		#[error("Expected `Step X must be finished before step Y can begin.` on line {line}")]
		Format { line: usize },
	}

	fn step(s: &str) -> Option<char> {
		let mut chars = s.chars();
		match (chars.next(), chars.next()) {
			(Some(c), None) if c.is_ascii_uppercase() => Some(c),
			_ => None,
		}
	}

	impl FromStr for Instructions {
		type Err = InstructionsError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			if s.trim().is_empty() { return Err(InstructionsError::Empty) }
			let mut steps = std::collections::BTreeMap::<_, std::collections::BTreeSet<_>>::new();
			for (l, line) in s.lines().enumerate().filter(|(_, line)| !line.is_empty()) {
				let (before, after) = line.strip_prefix("Step ")
					.and_then(|s| s.strip_suffix(" can begin."))
					.and_then(|s| s.split_once(" must be finished before step "))
					.and_then(|(before, after)| Some((step(before)?, step(after)?)))
					.ok_or(InstructionsError::Format { line: l + 1 })?;
				steps.entry(before).or_default();
				steps.entry(after).or_default().insert(before);
			}
			Ok(Instructions(steps))
		}
	}
}


#[test]
fn tests() {
	const INPUT: &str = indoc::indoc! { "
		Step C must be finished before step A can begin.
		Step C must be finished before step F can begin.
		Step A must be finished before step B can begin.
		Step A must be finished before step D can begin.
		Step B must be finished before step E can begin.
		Step D must be finished before step E can begin.
		Step F must be finished before step E can begin.
	" };
	assert_eq!(part1_impl(input_instructions_from_str(INPUT).unwrap()).unwrap(), "CABDFE");
	assert_eq!(part2_impl::<2, 0>(input_instructions_from_str(INPUT).unwrap()).unwrap(), 15);
	assert!(part1_impl(input_instructions_from_str(indoc::indoc! { "
		Step A must be finished before step B can begin.
		Step B must be finished before step A can begin.
	" }).unwrap()).is_err());
	assert!(part2_impl::<2, 0>(input_instructions_from_str(indoc::indoc! { "
		Step A must be finished before step B can begin.
		Step B must be finished before step C can begin.
		Step C must be finished before step B can begin.
	" }).unwrap()).is_err());
	assert!(matches!(input_instructions_from_str("Step A must precede step B.\n"),
		Err(parsing::InstructionsError::Format { line: 1 })));
}
