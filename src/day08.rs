// Copyright (c) 2022 Bastiaan Marinus van de Weerd


#[cfg_attr(test, derive(Debug, PartialEq))]
struct Node {
	children: Vec<Node>,
	metadata: Vec<usize>,
}

impl Node {
	fn metadata_sum(&self) -> usize {
		self.metadata.iter().sum::<usize>()
			+ self.children.iter().map(Node::metadata_sum).sum::<usize>()
	}

	fn value(&self) -> usize {
		if self.children.is_empty() { return self.metadata.iter().sum() }
		self.metadata.iter()
			.filter_map(|&entry| entry.checked_sub(1).and_then(|i| self.children.get(i)))
			.map(Node::value)
			.sum()
	}
}


fn input_tree_from_str(s: &str) -> Result<Node, parsing::TreeError> {
	s.parse()
}


fn part1_impl(input_tree: &Node) -> usize {
	input_tree.metadata_sum()
}

pub(crate) fn part1(input: &str) -> anyhow::Result<usize> {
	Ok(part1_impl(&input_tree_from_str(input)?))
}


fn part2_impl(input_tree: &Node) -> usize {
	input_tree.value()
}

pub(crate) fn part2(input: &str) -> anyhow::Result<usize> {
	Ok(part2_impl(&input_tree_from_str(input)?))
}


mod parsing {
	use std::{num::ParseIntError, str::FromStr};
	use super::Node;

	#[derive(Debug, thiserror::Error)]
	pub(super) enum TreeError {
		#[error("Input ended before the tree did")]
		Truncated,
		#[error("Invalid number at position {position}")]
		Number { position: usize, source: ParseIntError },
		#[error("{count} numbers remain after the root node")]
		Trailing { count: usize },
	}

	fn node(numbers: &mut impl Iterator<Item = Result<usize, TreeError>>) -> Result<Node, TreeError> {
		let mut next = || numbers.next().unwrap_or(Err(TreeError::Truncated));
		let (children, metadata) = (next()?, next()?);
		let children = (0..children)
			.map(|_| node(numbers))
			.collect::<Result<_, _>>()?;
		let metadata = (0..metadata)
			.map(|_| numbers.next().unwrap_or(Err(TreeError::Truncated)))
			.collect::<Result<_, _>>()?;
		Ok(Node { children, metadata })
	}

	impl FromStr for Node {
		type Err = TreeError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			let mut numbers = s.split_ascii_whitespace()
				.enumerate()
				.map(|(p, n)| n.parse()
					.map_err(|e| TreeError::Number { position: p + 1, source: e }));
			let root = node(&mut numbers)?;
			match numbers.count() {
				0 => Ok(root),
				count => Err(TreeError::Trailing { count }),
			}
		}
	}
}


#[test]
fn tests() {
	const INPUT: &str = "2 3 0 3 10 11 12 1 1 0 1 99 2 1 1 2\n";
	let tree = input_tree_from_str(INPUT).unwrap();
	assert_eq!(tree.children[1].children[0], Node { children: vec![], metadata: vec![99] });
	assert_eq!(part1_impl(&tree), 138);
	assert_eq!(part2_impl(&tree), 66);
	assert!(matches!(input_tree_from_str("1 1 0 1"), Err(parsing::TreeError::Truncated)));
	assert!(matches!(input_tree_from_str("0 1 5 7"), Err(parsing::TreeError::Trailing { count: 1 })));
}
