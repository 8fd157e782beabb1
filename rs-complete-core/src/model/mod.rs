//! Word-level n-gram modelling.
//!
//! This module provides the pieces used to turn past submissions into
//! next-word suggestions:
//! - Tokenization shared by the builder and the predictor (`tokenize`)
//! - The frequency table itself (`NgramModel`)
//! - Full rebuilds from a list of entries (`ModelBuilder`)
//! - Backoff ranking of next words (`PredictionEngine`)

/// Gram → next-word frequency table.
///
/// Handles sentence ingestion, count lookup and serialization.
pub mod ngram_model;

/// Builds an `NgramModel` from scratch out of a list of entries.
pub mod builder;

/// Backoff next-word ranking over an `NgramModel`.
pub mod predictor;

/// Internal representation of a single gram (context) and its continuations.
///
/// Tracks next-word counts and first-seen order.
/// This module is not exposed publicly.
mod state;

/// Splits a text into lowercase word tokens.
///
/// - Lowercases with full Unicode case mapping
/// - Splits on runs of Unicode whitespace
/// - Never yields empty tokens, so leading, trailing or repeated
///   whitespace does not create empty grams
pub fn tokenize(text: &str) -> Vec<String> {
	text.to_lowercase()
		.split_whitespace()
		.map(str::to_owned)
		.collect()
}
