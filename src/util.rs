// Copyright (c) 2022 Bastiaan Marinus van de Weerd


/// Declares the `dayNN` modules and a `solve` function that dispatches
/// a `(day, part)` pair to the matching `dayNN::partN` with the given input.
macro_rules! mod_days { ( $( $day:literal ),+ ) => { paste::paste! {
	$( mod [<day $day>]; )+

	fn solve(day: u8, part: u8, input: &str) -> anyhow::Result<String> {
		match (day, part) {
			$(
				($day, 1) => [<day $day>]::part1(input).map(|answer| answer.to_string()),
				($day, 2) => [<day $day>]::part2(input).map(|answer| answer.to_string()),
			)+
			_ => anyhow::bail!("No solution for day {day}, part {part}"),
		}
	}
} } }

pub(crate) use mod_days;
