use super::state::State;
use super::tokenize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Represents a word-level n-gram model.
///
/// The `NgramModel` maps every gram of 1..=`n` consecutive words to the
/// words observed right after it, with their occurrence counts.
///
/// # Responsibilities
/// - Ingest sentences, counting every sub-window up to order `n`
/// - Expose counts and ranked continuations per gram
///
/// # Invariants
/// - `n` is always >= 1
/// - Each key in `states` is a space-joined sequence of 1..=`n` lowercase words
/// - For each sentence, position `i` and order `j` with `i + j` a valid
///   index, `words[i..i + j]` gains exactly one count for `words[i + j]`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NgramModel {
	/// The maximum order of the model (number of words in the longest gram)
	n: usize, // must be >= 1

	/// Mapping from a gram to its corresponding state
	states: HashMap<String, State>,
}

impl NgramModel {
	/// Creates a new, empty model of maximum order `n`.
	///
	/// # Errors
	/// Returns an error if `n < 1`.
	pub fn new(n: usize) -> Result<Self, String> {
		if n < 1 {
			return Err("n must be >= 1".to_owned());
		}
		Ok(Self { n, states: HashMap::new() })
	}

	/// Creates an empty model, clamping `n` to at least 1.
	pub(crate) fn with_order(n: usize) -> Self {
		Self { n: n.max(1), states: HashMap::new() }
	}

	/// Returns the maximum order of the model.
	pub fn order(&self) -> usize {
		self.n
	}

	/// Returns `true` if no gram has been recorded.
	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Number of distinct grams.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	/// Adds a sentence to the model.
	///
	/// Every gram of order 1..=`n` that is followed by a word gets one
	/// count for that word. A sequence of three words before a target
	/// therefore feeds the unigram, bigram and trigram tables at once.
	///
	/// # Notes
	/// - Uses `tokenize`: lowercased, empty tokens dropped.
	/// - Sentences with fewer than two words add nothing.
	pub fn add_sentence(&mut self, sentence: &str) {
		let words = tokenize(sentence);

		for i in 0..words.len() {
			for j in 1..=self.n {
				if i + j >= words.len() {
					break;
				}
				let gram = words[i..i + j].join(" ");
				let state = self.states.entry(gram).or_insert_with_key(|key| State::new(key));
				state.add_transition(&words[i + j]);
			}
		}
	}

	/// Returns how many times `next_word` followed `gram`.
	///
	/// `gram` must already be in normalized form (lowercase, single spaces).
	pub fn count(&self, gram: &str, next_word: &str) -> usize {
		self.states.get(gram).map_or(0, |state| state.occurrence(next_word))
	}

	/// Returns the continuations of `gram` ranked by descending count.
	///
	/// Returns `None` if the gram was never observed.
	pub fn continuations(&self, gram: &str) -> Option<Vec<(&str, usize)>> {
		self.states.get(gram).map(State::ranked)
	}
}
