use log::debug;

use super::ngram_model::NgramModel;
use super::tokenize;

/// Ranks next-word suggestions for a partial input.
///
/// Standard backoff: the longest context (last `n` words of the input, with
/// `n` bounded by the model order) is tried first, and shorter contexts are
/// used only when the longer one was never observed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PredictionEngine {
	/// Maximum number of suggestions returned.
	max_results: usize,
	/// Words never offered as suggestions.
	placeholders: Vec<String>,
}

impl PredictionEngine {
	/// Creates an engine returning at most `max_results` suggestions and
	/// skipping any word listed in `placeholders`.
	pub fn new(max_results: usize, placeholders: Vec<String>) -> Self {
		Self { max_results, placeholders }
	}

	/// Returns the maximum number of suggestions returned.
	pub fn max_results(&self) -> usize {
		self.max_results
	}

	/// Returns ranked suggestions with their counts.
	///
	/// For each order from `min(model order, word count)` down to 1, the
	/// continuations of the trailing gram are ranked by count, cut to
	/// `max_results`, and cleaned of empty or placeholder words. The first
	/// order yielding a non-empty list wins.
	pub fn ranked<'m>(&self, model: &'m NgramModel, input: &str) -> Vec<(&'m str, usize)> {
		let words = tokenize(input);
		let longest = model.order().min(words.len());

		for n in (1..=longest).rev() {
			let gram = words[words.len() - n..].join(" ");
			let Some(continuations) = model.continuations(&gram) else {
				continue;
			};

			let suggestions: Vec<(&str, usize)> = continuations
				.into_iter()
				.take(self.max_results)
				.filter(|(word, _)| !word.is_empty() && !self.is_placeholder(word))
				.collect();

			if !suggestions.is_empty() {
				debug!("Predictions for '{}' (order {}): {:?}", gram, n, suggestions);
				return suggestions;
			}
		}

		Vec::new()
	}

	/// Returns ranked next-word suggestions for `input`.
	///
	/// Returns an empty list when no context length matches.
	pub fn predict(&self, model: &NgramModel, input: &str) -> Vec<String> {
		self.ranked(model, input)
			.into_iter()
			.map(|(word, _)| word.to_owned())
			.collect()
	}

	fn is_placeholder(&self, word: &str) -> bool {
		self.placeholders.iter().any(|p| p == word)
	}
}

impl Default for PredictionEngine {
	fn default() -> Self {
		Self::new(3, vec!["null".to_owned()])
	}
}
