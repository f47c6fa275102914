// Copyright (c) 2022 Bastiaan Marinus van de Weerd

mod util;
util::mod_days![01, 02, 03, 04, 05, 06, 07, 08, 09, 10, 11, 12, 13, 14, 15, 16];

use std::path::PathBuf;


/// Solves an Advent of Code 2018 puzzle
#[derive(clap::Parser, Debug)]
#[command(name = "advent18", version)]
struct Args {
	/// Day to solve
	#[arg(value_parser = clap::value_parser!(u8).range(1..=16))]
	day: u8,

	/// Puzzle input (defaults to `input/dayNN.txt`)
	input: Option<PathBuf>,

	/// Part to solve (solves both if omitted)
	#[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
	part: Option<u8>,

	/// Number of threads for the parallel searches
	#[arg(long)]
	threads: Option<usize>,
}

fn init_logger() {
	use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

	tracing_subscriber::registry()
		.with(EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| EnvFilter::new("advent18=warn")))
		.with(tracing_subscriber::fmt::layer()
			.with_writer(std::io::stderr)
			.with_target(false)
			.compact())
		.init();
}

fn main() -> anyhow::Result<()> {
	use {anyhow::Context as _, clap::Parser as _, either::Either};

	init_logger();
	let args = Args::parse();

	if let Some(threads) = args.threads {
		rayon::ThreadPoolBuilder::new()
			.num_threads(threads)
			.build_global()
			.context("Could not configure the thread pool")?;
	}

	let path = args.input
		.unwrap_or_else(|| PathBuf::from(format!("input/day{:02}.txt", args.day)));
	let input = std::fs::read_to_string(&path)
		.with_context(|| format!("Could not read input from {}", path.display()))?;
	tracing::info!(day = args.day, path = %path.display(), bytes = input.len(), "read input");

	let parts = match args.part {
		Some(part) => Either::Left(std::iter::once(part)),
		None => Either::Right(1..=2),
	};
	for part in parts {
		let answer = solve(args.day, part, &input)
			.with_context(|| format!("Day {:02}, part {part} failed", args.day))?;
		if answer.contains('\n') {
			println!("Day {:02}; part {part}:\n{answer}", args.day);
		} else {
			println!("Day {:02}; part {part}: {answer}", args.day);
		}
	}

	Ok(())
}


#[test]
fn args() {
	use clap::Parser as _;
	assert!(Args::try_parse_from(["advent18", "17"]).is_err());
	let args = Args::try_parse_from(["advent18", "16", "-p", "2"]).unwrap();
	assert_eq!((args.day, args.part), (16, Some(2)));
	assert!(solve(16, 1, "").is_ok());
	assert!(solve(3, 2, "").is_err());
}
