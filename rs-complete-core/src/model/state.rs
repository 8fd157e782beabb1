use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Occurrence data for one continuation of a gram.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
struct Transition {
	/// How many times the continuation followed the gram.
	occurrence: usize,
	/// Position of the continuation in first-seen order within this gram.
	first_seen: usize,
}

/// Represents a gram (context) in the word-level n-gram model.
///
/// A `State` corresponds to a space-joined sequence of 1..N lowercase words
/// (`key`) and stores every word observed right after it.
///
/// ## Responsibilities:
/// - Accumulate continuation occurrences during a build
/// - Rank continuations by count, ties broken by first-seen order
///
/// ## Invariants
/// - Each transition occurrence count is strictly positive
/// - `first_seen` values are unique and dense in `0..transitions.len()`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct State {
	/// The gram this state belongs to.
	key: String,
	/// Outgoing transitions indexed by the next word.
	/// Example: { "fox" => (2, 0), "dog" => (1, 1) }
	transitions: HashMap<String, Transition>,
}

impl State {
	/// Creates a new empty state for the given gram.
	pub fn new(key: &str) -> Self {
		Self {
			key: key.to_owned(),
			transitions: HashMap::new(),
		}
	}

	/// Records an occurrence of `next_word` after this gram.
	///
	/// - If the transition already exists, its occurrence count is increased.
	/// - Otherwise, a new transition is created with a count of 1 and the
	///   next free first-seen position.
	pub fn add_transition(&mut self, next_word: &str) {
		if let Some(transition) = self.transitions.get_mut(next_word) {
			transition.occurrence += 1;
			return;
		}
		let first_seen = self.transitions.len();
		self.transitions.insert(next_word.to_owned(), Transition { occurrence: 1, first_seen });
	}

	/// Returns how many times `next_word` followed this gram.
	pub fn occurrence(&self, next_word: &str) -> usize {
		self.transitions.get(next_word).map_or(0, |t| t.occurrence)
	}

	/// Returns all continuations ranked by descending count.
	///
	/// Equal counts keep the order in which the words were first seen,
	/// which makes ranking independent of hash iteration order.
	pub fn ranked(&self) -> Vec<(&str, usize)> {
		let mut ranked: Vec<(&str, &Transition)> = self
			.transitions
			.iter()
			.map(|(word, transition)| (word.as_str(), transition))
			.collect();

		ranked.sort_by(|(_, a), (_, b)| {
			b.occurrence.cmp(&a.occurrence).then(a.first_seen.cmp(&b.first_seen))
		});

		ranked.into_iter().map(|(word, t)| (word, t.occurrence)).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::State;

	#[test]
	fn counts_accumulate_per_word() {
		let mut state = State::new("the");
		state.add_transition("fox");
		state.add_transition("dog");
		state.add_transition("fox");

		assert_eq!(state.occurrence("fox"), 2);
		assert_eq!(state.occurrence("dog"), 1);
		assert_eq!(state.occurrence("cat"), 0);
	}

	#[test]
	fn ranking_breaks_ties_by_first_seen() {
		let mut state = State::new("quick");
		for word in ["red", "brown", "blue", "brown"] {
			state.add_transition(word);
		}

		assert_eq!(state.ranked(), vec![("brown", 2), ("red", 1), ("blue", 1)]);
	}
}
