// Copyright (c) 2022 Bastiaan Marinus van de Weerd


#[cfg_attr(test, derive(Debug))]
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
struct Timestamp {
	year: u16,
	month: u8,
	day: u8,
	hour: u8,
	minute: u8,
}

#[cfg_attr(test, derive(Debug))]
#[derive(PartialEq, Eq, Clone, Copy)]
enum Event {
	BeginShift { guard: u32 },
	FallAsleep,
	WakeUp,
}

#[cfg_attr(test, derive(Debug))]
struct Record {
	time: Timestamp,
	event: Event,
}

/// Per guard, how many times they were asleep during each minute of the midnight hour.
type SleepLog = std::collections::HashMap<u32, [u32; 60]>;

#[derive(Debug, thiserror::Error)]
enum ShiftsError {
	#[error("Record at {hour:02}:{minute:02} precedes the first shift")]
	NoGuard { hour: u8, minute: u8 },
	#[error("Guard #{guard} woke up without having fallen asleep")]
	NotAsleep { guard: u32 },
	#[error("Guard #{guard} fell asleep twice")]
	AlreadyAsleep { guard: u32 },
	#[error("Guard #{guard} did not wake up before the end of their shift")]
	StillAsleep { guard: u32 },
	#[error("Guard #{guard} slept outside of the midnight hour")]
	OutsideMidnight { guard: u32 },
	#[error("Guard #{guard} woke up at 00:{minute:02} before falling asleep")]
	WokeBeforeFallingAsleep { guard: u32, minute: u8 },
}

fn sleep_log(mut records: Vec<Record>) -> Result<SleepLog, ShiftsError> {
	records.sort_by_key(|r| r.time);

	let mut log = SleepLog::new();
	let mut guard = None;
	let mut asleep_since = None;
	for Record { time, event } in records {
		match (event, guard) {
			(Event::BeginShift { guard: next }, _) => {
				if let (Some(guard), Some(_)) = (guard, asleep_since) {
					return Err(ShiftsError::StillAsleep { guard }) }
				log.entry(next).or_insert([0; 60]);
				guard = Some(next);
			}
			(_, None) => return Err(ShiftsError::NoGuard { hour: time.hour, minute: time.minute }),
			(_, Some(guard)) if time.hour != 0 =>
				return Err(ShiftsError::OutsideMidnight { guard }),
			(Event::FallAsleep, Some(guard)) => {
				if asleep_since.replace(time).is_some() {
					return Err(ShiftsError::AlreadyAsleep { guard }) }
			}
			(Event::WakeUp, Some(guard)) => {
				let since = asleep_since.take().ok_or(ShiftsError::NotAsleep { guard })?;
				let same_day = (since.year, since.month, since.day) == (time.year, time.month, time.day);
				if !same_day || time.minute < since.minute {
					return Err(ShiftsError::WokeBeforeFallingAsleep { guard, minute: time.minute }) }
				let minutes = log.entry(guard).or_insert([0; 60]);
				for minute in &mut minutes[since.minute as usize..time.minute as usize] { *minute += 1 }
			}
		}
	}
	match (guard, asleep_since) {
		(Some(guard), Some(_)) => Err(ShiftsError::StillAsleep { guard }),
		_ => Ok(log),
	}
}

/// Returns the minute most often slept and how often it was.
fn sleepiest_minute(minutes: &[u32; 60]) -> (usize, u32) {
	minutes.iter()
		.copied()
		.enumerate()
		.rev()
		.max_by_key(|(_, count)| *count)
		.unwrap_or((0, 0))
}


fn input_records_from_str(s: &str) -> Result<Vec<Record>, parsing::RecordsError> {
	parsing::records_from_str(s).collect()
}


fn part1_impl(input_records: Vec<Record>) -> anyhow::Result<usize> {
	let log = sleep_log(input_records)?;
	let (guard, minutes) = log.iter()
		.max_by_key(|(guard, minutes)| (minutes.iter().sum::<u32>(), std::cmp::Reverse(**guard)))
		.ok_or_else(|| anyhow::anyhow!("No guards on duty"))?;
	Ok(*guard as usize * sleepiest_minute(minutes).0)
}

pub(crate) fn part1(input: &str) -> anyhow::Result<usize> {
	part1_impl(input_records_from_str(input)?)
}


fn part2_impl(input_records: Vec<Record>) -> anyhow::Result<usize> {
	let log = sleep_log(input_records)?;
	let (guard, (minute, _)) = log.iter()
		.map(|(guard, minutes)| (*guard, sleepiest_minute(minutes)))
		.max_by_key(|(guard, (_, count))| (*count, std::cmp::Reverse(*guard)))
		.ok_or_else(|| anyhow::anyhow!("No guards on duty"))?;
	Ok(guard as usize * minute)
}

pub(crate) fn part2(input: &str) -> anyhow::Result<usize> {
	part2_impl(input_records_from_str(input)?)
}


mod parsing {
	use std::{num::ParseIntError, str::FromStr};
	use super::{Event, Record, Timestamp};

	#[derive(Debug, thiserror::Error)]
	pub(super) enum RecordError {
		#[error("Expected `[YYYY-MM-DD hh:mm] ` prefix")]
		Timestamp,
		#[error("Unknown event {0:?}")]
		Event(String),
		#[error("Invalid number")]
		Number(#[from] ParseIntError),
		#[error("Time {hour:02}:{minute:02} is out of range")]
		OutOfRange { hour: u8, minute: u8 },
	}

	impl FromStr for Timestamp {
		type Err = RecordError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			let (date, time) = s.split_once(' ').ok_or(RecordError::Timestamp)?;
			let mut date = date.splitn(3, '-');
			let mut next = || date.next().ok_or(RecordError::Timestamp);
			let (year, month, day) = (next()?, next()?, next()?);
			let (hour, minute) = time.split_once(':').ok_or(RecordError::Timestamp)?;
			let (hour, minute) = (hour.parse()?, minute.parse()?);
			if hour >= 24 || minute >= 60 { return Err(RecordError::OutOfRange { hour, minute }) }
			Ok(Timestamp {
				year: year.parse()?,
				month: month.parse()?,
				day: day.parse()?,
				hour,
				minute,
			})
		}
	}

	impl FromStr for Event {
		type Err = RecordError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			match s {
				"falls asleep" => Ok(Event::FallAsleep),
				"wakes up" => Ok(Event::WakeUp),
				_ => {
					let guard = s.strip_prefix("Guard #")
						.and_then(|s| s.strip_suffix(" begins shift"))
						.ok_or_else(|| RecordError::Event(s.to_owned()))?;
					Ok(Event::BeginShift { guard: guard.parse()? })
				}
			}
		}
	}

	impl FromStr for Record {
		type Err = RecordError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			let (time, event) = s.strip_prefix('[')
				.and_then(|s| s.split_once("] "))
				.ok_or(RecordError::Timestamp)?;
			Ok(Record { time: time.parse()?, event: event.parse()? })
		}
	}

	#[derive(Debug, thiserror::Error)]
	pub(super) enum RecordsError {
		#[error("Empty input")]
		Empty,
		#[error("Invalid record on line {line}")]
		Record { line: usize, source: RecordError },
	}

	pub(super) fn records_from_str(s: &str) -> impl Iterator<Item = Result<Record, RecordsError>> + '_ {
		use {std::iter::once, itertools::Either::*};
		if s.trim().is_empty() { return Left(once(Err(RecordsError::Empty))) }
		Right(s.lines()
			.enumerate()
			.filter(|(_, line)| !line.is_empty())
			.map(|(l, line)| line.parse()
				.map_err(|e| RecordsError::Record { line: l + 1, source: e })))
	}
}


#[cfg(test)]
mod tests {
	use super::*;

	// Out of order; records are sorted before use.
	const INPUT: &str = indoc::indoc! { "
		[1518-11-01 00:05] falls asleep
		[1518-11-01 00:00] Guard #10 begins shift
		[1518-11-01 00:25] wakes up
		[1518-11-01 00:30] falls asleep
		[1518-11-01 00:55] wakes up
		[1518-11-01 23:58] Guard #99 begins shift
		[1518-11-02 00:40] falls asleep
		[1518-11-02 00:50] wakes up
		[1518-11-03 00:05] Guard #10 begins shift
		[1518-11-03 00:24] falls asleep
		[1518-11-03 00:29] wakes up
		[1518-11-04 00:02] Guard #99 begins shift
		[1518-11-04 00:36] falls asleep
		[1518-11-04 00:46] wakes up
		[1518-11-05 00:03] Guard #99 begins shift
		[1518-11-05 00:45] falls asleep
		[1518-11-05 00:55] wakes up
	" };

	#[test]
	fn parts() {
		assert_eq!(part1_impl(input_records_from_str(INPUT).unwrap()).unwrap(), 240);
		assert_eq!(part2_impl(input_records_from_str(INPUT).unwrap()).unwrap(), 4455);
	}

	#[test]
	fn sleep_log() {
		let log = super::sleep_log(input_records_from_str(INPUT).unwrap()).unwrap();
		assert_eq!(log[&10_u32].iter().sum::<u32>(), 50);
		assert_eq!(sleepiest_minute(&log[&10_u32]), (24, 2));
		assert_eq!(sleepiest_minute(&log[&99_u32]), (45, 3));
	}

	#[test]
	fn invalid() {
		assert!(matches!(input_records_from_str("[1518-11-01 00:05] dozes off\n"),
			Err(parsing::RecordsError::Record { line: 1, source: parsing::RecordError::Event(_) })));
		let records = input_records_from_str("[1518-11-01 00:05] falls asleep\n").unwrap();
		assert!(matches!(super::sleep_log(records), Err(ShiftsError::NoGuard { hour: 0, minute: 5 })));
		let records = input_records_from_str(indoc::indoc! { "
			[1518-11-01 00:00] Guard #10 begins shift
			[1518-11-01 00:05] wakes up
		" }).unwrap();
		assert!(matches!(super::sleep_log(records), Err(ShiftsError::NotAsleep { guard: 10 })));

		assert!(matches!(super::part1("[1518-11-01 00:00] Guard #10 begins shift\n[1518-11-01 00:75] wakes up\n")
			.unwrap_err().downcast_ref::<parsing::RecordsError>(),
			Some(parsing::RecordsError::Record { line: 2,
				source: parsing::RecordError::OutOfRange { hour: 0, minute: 75 } })));
		let records = input_records_from_str(indoc::indoc! { "
			[1518-11-01 00:00] Guard #10 begins shift
			[1518-11-01 00:50] falls asleep
			[1518-11-02 00:10] wakes up
		" }).unwrap();
		assert!(matches!(super::sleep_log(records),
			Err(ShiftsError::WokeBeforeFallingAsleep { guard: 10, minute: 10 })));
	}
}
