// Copyright (c) 2022 Bastiaan Marinus van de Weerd


type Registers = [usize; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
	Addr, Addi,
	Mulr, Muli,
	Banr, Bani,
	Borr, Bori,
	Setr, Seti,
	Gtir, Gtri, Gtrr,
	Eqir, Eqri, Eqrr,
}

impl Op {
	const ALL: [Op; 16] = {
		use Op::*;
		[Addr, Addi, Mulr, Muli, Banr, Bani, Borr, Bori, Setr, Seti, Gtir, Gtri, Gtrr, Eqir, Eqri, Eqrr]
	};

	/// Returns the registers after executing, or `None` if an argument
	/// names a register that does not exist or the result overflows.
	fn apply(self, mut regs: Registers, [a, b, c]: [usize; 3]) -> Option<Registers> {
		use Op::*;
		let reg = |r: usize| regs.get(r).copied();
		let value = match self {
			Addr => reg(a)?.checked_add(reg(b)?)?,
			Addi => reg(a)?.checked_add(b)?,
			Mulr => reg(a)?.checked_mul(reg(b)?)?,
			Muli => reg(a)?.checked_mul(b)?,
			Banr => reg(a)? & reg(b)?,
			Bani => reg(a)? & b,
			Borr => reg(a)? | reg(b)?,
			Bori => reg(a)? | b,
			Setr => reg(a)?,
			Seti => a,
			Gtir => (a > reg(b)?) as usize,
			Gtri => (reg(a)? > b) as usize,
			Gtrr => (reg(a)? > reg(b)?) as usize,
			Eqir => (a == reg(b)?) as usize,
			Eqri => (reg(a)? == b) as usize,
			Eqrr => (reg(a)? == reg(b)?) as usize,
		};
		*regs.get_mut(c)? = value;
		Some(regs)
	}
}

#[cfg_attr(test, derive(Debug))]
#[derive(Clone, Copy)]
struct Instruction {
	opcode: usize,
	args: [usize; 3],
}

#[cfg_attr(test, derive(Debug))]
struct Sample {
	before: Registers,
	instruction: Instruction,
	after: Registers,
}

impl Sample {
	/// Returns a mask with a bit set for every `Op::ALL` entry that behaves like this sample.
	fn consistent_ops(&self) -> u16 {
		Op::ALL.iter()
			.enumerate()
			.filter(|(_, op)| op.apply(self.before, self.instruction.args) == Some(self.after))
			.fold(0, |mask, (i, _)| mask | 1 << i)
	}
}

#[derive(Debug, thiserror::Error)]
enum DeductionError {
	#[error("No operation matches all samples of opcode {opcode}")]
	NoCandidate { opcode: usize },
	#[error("Opcodes {opcodes:?} can not be told apart")]
	Ambiguous { opcodes: Vec<usize> },
}

/// Resolves opcodes that have a single candidate operation, and removes that
/// operation from all other opcodes' candidates, until none are left.
fn eliminate(mut candidates: [u16; 16]) -> Result<Vec<Op>, DeductionError> {
	let mut ops = [None; 16];
	while let Some(opcode) = (0..16).find(|&o| ops[o].is_none() && candidates[o].count_ones() == 1) {
		let bit = candidates[opcode];
		let op = Op::ALL[bit.trailing_zeros() as usize];
		tracing::trace!(opcode, ?op, "deduced opcode");
		ops[opcode] = Some(op);
		for other in &mut candidates { *other &= !bit }
	}

	let unresolved = (0..16).filter(|&o| ops[o].is_none()).collect::<Vec<_>>();
	if let Some(&opcode) = unresolved.iter().find(|&&o| candidates[o] == 0) {
		return Err(DeductionError::NoCandidate { opcode }) }
	ops.into_iter()
		.collect::<Option<Vec<_>>>()
		.ok_or(DeductionError::Ambiguous { opcodes: unresolved })
}

fn deduce(samples: &[Sample]) -> Result<Vec<Op>, DeductionError> {
	let mut candidates = [u16::MAX; 16];
	for sample in samples {
		candidates[sample.instruction.opcode] &= sample.consistent_ops();
	}
	eliminate(candidates)
}


fn input_manual_from_str(s: &str) -> Result<(Vec<Sample>, Vec<Instruction>), parsing::ManualError> {
	parsing::manual_from_str(s)
}


fn part1_impl(input_samples: &[Sample]) -> usize {
	input_samples.iter()
		.filter(|sample| sample.consistent_ops().count_ones() >= 3)
		.count()
}

pub(crate) fn part1(input: &str) -> anyhow::Result<usize> {
	let (samples, _) = input_manual_from_str(input)?;
	Ok(part1_impl(&samples))
}


fn part2_impl((input_samples, input_program): (Vec<Sample>, Vec<Instruction>)) -> anyhow::Result<usize> {
	let ops = deduce(&input_samples)?;
	let mut regs = [0; 4];
	for (i, instruction) in input_program.iter().enumerate() {
		let op = ops[instruction.opcode];
		regs = op.apply(regs, instruction.args).ok_or_else(|| anyhow::anyhow!(
			"Instruction {} (`{op:?} {:?}`) names an invalid register", i + 1, instruction.args))?;
	}
	tracing::debug!(?regs, instructions = input_program.len(), "program halted");
	Ok(regs[0])
}

pub(crate) fn part2(input: &str) -> anyhow::Result<usize> {
	part2_impl(input_manual_from_str(input)?)
}


mod parsing {
	use super::{Instruction, Registers, Sample};

	#[derive(Debug, thiserror::Error)]
	pub(super) enum ManualError {
		#[error("Expected `[A, B, C, D]` registers on line {line}")]
		Registers { line: usize },
		#[error("Expected `OPCODE A B C` with an opcode below 16 on line {line}")]
		Instruction { line: usize },
		#[error("Sample starting on line {line} is incomplete")]
		Truncated { line: usize },
	}

	fn registers(s: &str, line: usize) -> Result<Registers, ManualError> {
		let err = || ManualError::Registers { line };
		let values = s.trim()
			.strip_prefix('[')
			.and_then(|s| s.strip_suffix(']'))
			.ok_or_else(err)?
			.split(',')
			.map(|v| v.trim().parse().map_err(|_| err()))
			.collect::<Result<Vec<_>, _>>()?;
		values.try_into().map_err(|_| err())
	}

	fn instruction(s: &str, line: usize) -> Result<Instruction, ManualError> {
		let err = || ManualError::Instruction { line };
		let values = s.split_whitespace()
			.map(|v| v.parse().map_err(|_| err()))
			.collect::<Result<Vec<usize>, _>>()?;
		match values[..] {
			[opcode, a, b, c] if opcode < 16 => Ok(Instruction { opcode, args: [a, b, c] }),
			_ => Err(err()),
		}
	}

	pub(super) fn manual_from_str(s: &str) -> Result<(Vec<Sample>, Vec<Instruction>), ManualError> {
		let mut lines = s.lines()
			.enumerate()
			.map(|(l, line)| (l + 1, line))
			.filter(|(_, line)| !line.trim().is_empty())
			.peekable();

		let mut samples = Vec::new();
		while let Some((l, line)) = lines.next_if(|(_, line)| line.starts_with("Before:")) {
			let before = registers(&line["Before:".len()..], l)?;
			let (instruction_l, instruction_line) = lines.next()
				.ok_or(ManualError::Truncated { line: l })?;
			let sample_instruction = instruction(instruction_line, instruction_l)?;
			let (after_l, after_line) = lines.next()
				.ok_or(ManualError::Truncated { line: l })?;
			let after = after_line.strip_prefix("After:")
				.ok_or(ManualError::Registers { line: after_l })
				.and_then(|s| registers(s, after_l))?;
			samples.push(Sample { before, instruction: sample_instruction, after });
		}

		let program = lines
			.map(|(l, line)| instruction(line, l))
			.collect::<Result<_, _>>()?;
		Ok((samples, program))
	}
}


#[cfg(test)]
mod tests {
	use super::*;
	use test_case::test_case;

	#[test_case(Op::Addr, [0, 1, 3], 5)]
	#[test_case(Op::Addi, [0, 7, 3], 10)]
	#[test_case(Op::Mulr, [0, 1, 3], 6)]
	#[test_case(Op::Muli, [1, 5, 3], 10)]
	#[test_case(Op::Banr, [0, 1, 3], 2)]
	#[test_case(Op::Bani, [0, 1, 3], 1)]
	#[test_case(Op::Borr, [1, 2, 3], 3)]
	#[test_case(Op::Bori, [1, 4, 3], 6)]
	#[test_case(Op::Setr, [1, 9, 3], 2)]
	#[test_case(Op::Seti, [7, 9, 3], 7)]
	#[test_case(Op::Gtir, [4, 0, 3], 1)]
	#[test_case(Op::Gtri, [0, 3, 3], 0)]
	#[test_case(Op::Gtrr, [0, 1, 3], 1)]
	#[test_case(Op::Eqir, [2, 1, 3], 1)]
	#[test_case(Op::Eqri, [2, 1, 3], 1)]
	#[test_case(Op::Eqrr, [2, 3, 3], 1)]
	fn ops(op: Op, args: [usize; 3], result: usize) {
		assert_eq!(op.apply([3, 2, 1, 1], args), Some([3, 2, 1, result]));
	}

	#[test]
	fn invalid_registers() {
		assert_eq!(Op::Addr.apply([0; 4], [4, 0, 0]), None);
		assert_eq!(Op::Seti.apply([0; 4], [9, 0, 0]), Some([9, 0, 0, 0]));
		assert_eq!(Op::Seti.apply([0; 4], [9, 0, 4]), None);
	}

	#[test_case(Op::Addr, [0, 1, 0])]
	#[test_case(Op::Addi, [0, 1, 0])]
	#[test_case(Op::Mulr, [0, 1, 0])]
	#[test_case(Op::Muli, [0, 2, 0])]
	fn overflow(op: Op, args: [usize; 3]) {
		assert_eq!(op.apply([usize::MAX, 2, 0, 0], args), None);
		let [a, b, c] = args;
		let input = format!("Before: [{}, 2, 0, 0]\n0 {a} {b} {c}\nAfter:  [7, 2, 0, 0]\n", usize::MAX);
		assert_eq!(super::part1(&input).unwrap(), 0);
	}

	#[test]
	fn part1() {
		const INPUT: &str = indoc::indoc! { "
			Before: [3, 2, 1, 1]
			9 2 1 2
			After:  [3, 2, 2, 1]



			9 0 0 1
		" };
		let (samples, program) = input_manual_from_str(INPUT).unwrap();
		assert_eq!((samples.len(), program.len()), (1, 1));
		let consistent = samples[0].consistent_ops();
		assert_eq!(Op::ALL.iter().enumerate()
			.filter(|(i, _)| consistent & 1 << i != 0)
			.map(|(_, op)| *op)
			.collect::<Vec<_>>(), vec![Op::Addi, Op::Mulr, Op::Seti]);
		assert_eq!(part1_impl(&samples), 1);
		assert_eq!(super::part1(INPUT).unwrap(), 1);
	}

	#[test]
	fn elimination() {
		let mut chain = [0; 16];
		for (o, candidates) in chain.iter_mut().enumerate() {
			*candidates = if o < 15 { 0b11 << o } else { 1 << o };
		}
		assert_eq!(eliminate(chain).unwrap(), Op::ALL);

		let mut ambiguous: [u16; 16] = std::array::from_fn(|o| 1 << o);
		(ambiguous[0], ambiguous[1]) = (0b11, 0b11);
		assert!(matches!(eliminate(ambiguous),
			Err(DeductionError::Ambiguous { opcodes }) if opcodes == [0, 1]));

		let mut contradicted: [u16; 16] = std::array::from_fn(|o| 1 << o);
		contradicted[5] = 0;
		assert!(matches!(eliminate(contradicted), Err(DeductionError::NoCandidate { opcode: 5 })));
	}

	/// Samples for a scrambled opcode numbering, where opcode `n` is `Op::ALL[(5n + 3) % 16]`.
	fn scrambled_samples(args: &[[usize; 3]]) -> Vec<Sample> {
		const BEFORE: [Registers; 4] = [[3, 2, 1, 1], [5, 9, 12, 0], [0, 7, 7, 3], [14, 6, 2, 9]];
		let mut samples = Vec::new();
		for opcode in 0..16 {
			let op = Op::ALL[(opcode * 5 + 3) % 16];
			for before in BEFORE {
				for &args in args {
					let after = op.apply(before, args).unwrap();
					samples.push(Sample { before, instruction: Instruction { opcode, args }, after });
				}
			}
		}
		samples
	}

	#[test]
	fn deduction() {
		let args = [[0, 1, 2], [3, 2, 0], [1, 1, 3], [2, 0, 1]];
		assert!(matches!(deduce(&scrambled_samples(&args)),
			Err(DeductionError::Ambiguous { opcodes }) if opcodes == [2, 15]));

		let samples = scrambled_samples(&[args[0], args[1], args[2], args[3], [3, 1, 0]]);
		let ops = deduce(&samples).unwrap();
		assert!(ops.iter().enumerate().all(|(opcode, op)| *op == Op::ALL[(opcode * 5 + 3) % 16]));

		// seti 7 _ 0; addi 0 5 0; mulr 0 0 1; setr 1 _ 0
		let program = [[14, 7, 0, 0], [6, 0, 5, 0], [3, 0, 0, 1], [1, 1, 0, 0]]
			.map(|[opcode, a, b, c]| Instruction { opcode, args: [a, b, c] })
			.to_vec();
		assert_eq!(part2_impl((samples, program)).unwrap(), 144);
	}

	#[test]
	fn parsing_errors() {
		assert!(matches!(input_manual_from_str("Before: [1, 2, 3]\n0 0 0 0\nAfter: [0, 0, 0, 0]\n"),
			Err(parsing::ManualError::Registers { line: 1 })));
		assert!(matches!(input_manual_from_str("Before: [1, 2, 3, 4]\n0 0 0 0\n"),
			Err(parsing::ManualError::Truncated { line: 1 })));
		assert!(matches!(input_manual_from_str("16 0 0 0\n"),
			Err(parsing::ManualError::Instruction { line: 1 })));
	}
}
