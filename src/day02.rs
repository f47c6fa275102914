// Copyright (c) 2022 Bastiaan Marinus van de Weerd


fn input_box_ids_from_str(s: &str) -> Result<Vec<&str>, parsing::BoxIdsError> {
	parsing::box_ids_from_str(s).collect()
}


/// Returns whether some letter occurs exactly twice, and whether some letter
/// occurs exactly three times in the given box ID.
fn letter_repeats(box_id: &str) -> (bool, bool) {
	let mut counts = [0_u8; 26];
	for b in box_id.bytes() { counts[(b - b'a') as usize] += 1 }
	(counts.contains(&2), counts.contains(&3))
}

fn part1_impl(input_box_ids: &[&str]) -> usize {
	let (twice, thrice) = input_box_ids.iter()
		.map(|box_id| letter_repeats(box_id))
		.fold((0, 0), |(twice, thrice), (two, three)|
			(twice + two as usize, thrice + three as usize));
	twice * thrice
}

pub(crate) fn part1(input: &str) -> anyhow::Result<usize> {
	Ok(part1_impl(&input_box_ids_from_str(input)?))
}


fn part2_impl(input_box_ids: &[&str]) -> Option<String> {
	use itertools::Itertools as _;
	input_box_ids.iter()
		.tuple_combinations()
		.filter(|(left, right)| left.len() == right.len())
		.find_map(|(left, right)| {
			let mut differing = left.bytes().zip(right.bytes())
				.positions(|(l, r)| l != r);
			let pos = differing.next()?;
			differing.next().is_none().then(|| format!("{}{}", &left[..pos], &left[pos + 1..]))
		})
}

pub(crate) fn part2(input: &str) -> anyhow::Result<String> {
	part2_impl(&input_box_ids_from_str(input)?)
		.ok_or_else(|| anyhow::anyhow!("No two box IDs differ by exactly one letter"))
}


mod parsing {
	#[derive(Debug, thiserror::Error)]
	pub(super) enum BoxIdsError {
		#[error("Empty input")]
		Empty,
		#[error("Invalid byte {found:?} on line {line}, column {column}")]
		InvalidByte { line: usize, column: usize, found: char },
	}

	pub(super) fn box_ids_from_str(s: &str) -> impl Iterator<Item = Result<&str, BoxIdsError>> + '_ {
		use {std::iter::once, itertools::Either::*};
		if s.trim().is_empty() { return Left(once(Err(BoxIdsError::Empty))) }

		Right(s.lines()
			.enumerate()
			.filter(|(_, line)| !line.is_empty())
			.map(|(l, line)| match line.bytes().position(|b| !b.is_ascii_lowercase()) {
				Some(c) => Err(BoxIdsError::InvalidByte {
					line: l + 1, column: c + 1, found: line.as_bytes()[c] as char }),
				None => Ok(line),
			}))
	}
}


#[test]
fn tests() {
	const INPUTS: [&str; 2] = [
		indoc::indoc! { "
			abcdef
			bababc
			abbcde
			abcccd
			aabcdd
			abcdee
			ababab
		" },
		indoc::indoc! { "
			abcde
			fghij
			klmno
			pqrst
			fguij
			axcye
			wvxyz
		" },
	];
	assert_eq!(letter_repeats("abcdef"), (false, false));
	assert_eq!(letter_repeats("bababc"), (true, true));
	assert_eq!(letter_repeats("abcccd"), (false, true));
	assert_eq!(part1_impl(&input_box_ids_from_str(INPUTS[0]).unwrap()), 12);
	assert_eq!(part2_impl(&input_box_ids_from_str(INPUTS[1]).unwrap()).as_deref(), Some("fgij"));
	assert!(part2_impl(&input_box_ids_from_str("abc\nxyz\n").unwrap()).is_none());
	assert!(matches!(input_box_ids_from_str("abc\naBc\n"),
		Err(parsing::BoxIdsError::InvalidByte { line: 2, column: 2, found: 'B' })));
}
