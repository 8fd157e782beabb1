use std::collections::HashSet;

use log::{info, warn};

use crate::store::Store;

/// Ordered history of submitted texts, most recent first.
///
/// # Invariants
/// - No two entries are equal (exact, case-sensitive, untrimmed comparison)
/// - `entries.len() <= capacity`
/// - Every append rebuilds the sequence: prepend, dedupe, truncate
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Corpus {
	entries: Vec<String>,
	capacity: usize,
}

impl Corpus {
	/// Creates an empty corpus holding at most `capacity` entries.
	pub fn new(capacity: usize) -> Self {
		Self { entries: Vec::new(), capacity }
	}

	/// Creates a corpus from an already ordered list (most recent first).
	///
	/// Later duplicates are dropped and the list is truncated, so stored
	/// data that breaks the invariants is repaired on load.
	pub fn from_entries(entries: Vec<String>, capacity: usize) -> Self {
		let mut seen = HashSet::new();
		let mut deduped: Vec<String> = entries.into_iter().filter(|e| seen.insert(e.clone())).collect();
		deduped.truncate(capacity);
		Self { entries: deduped, capacity }
	}

	/// Loads the corpus stored under `key`.
	///
	/// Never fails: a missing key gives an empty corpus, and a store error
	/// is logged and also gives an empty corpus.
	pub fn load<S: Store + ?Sized>(store: &S, key: &str, capacity: usize) -> Self {
		match store.get(key) {
			Ok(Some(entries)) => {
				let corpus = Self::from_entries(entries, capacity);
				info!("Loaded {} previous entries", corpus.len());
				corpus
			}
			Ok(None) => {
				info!("No previous entries stored under '{}'", key);
				Self::new(capacity)
			}
			Err(e) => {
				warn!("Failed to load previous entries, starting empty: {}", e);
				Self::new(capacity)
			}
		}
	}

	/// Records a submission.
	///
	/// Blank (whitespace-only) text is ignored. Otherwise any equal entry is
	/// removed, the text is inserted first and the corpus is truncated.
	///
	/// Returns `true` if the corpus was mutated.
	pub fn record(&mut self, text: &str) -> bool {
		if text.trim().is_empty() {
			return false;
		}
		self.entries.retain(|entry| entry != text);
		self.entries.insert(0, text.to_owned());
		self.entries.truncate(self.capacity);
		true
	}

	/// Removes every entry.
	pub fn clear(&mut self) {
		self.entries.clear();
	}

	/// Returns the entry at `index` (0 = most recent).
	pub fn get(&self, index: usize) -> Option<&str> {
		self.entries.get(index).map(String::as_str)
	}

	/// Returns all entries, most recent first.
	pub fn entries(&self) -> &[String] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}
}

#[cfg(test)]
mod tests {
	use rand::rngs::StdRng;
	use rand::{Rng, SeedableRng};

	use super::Corpus;
	use crate::store::MemoryStore;

	fn entries(values: &[&str]) -> Vec<String> {
		values.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn record_prepends() {
		let mut corpus = Corpus::new(10);
		corpus.record("first");
		corpus.record("second");

		assert_eq!(corpus.entries(), entries(&["second", "first"]).as_slice());
	}

	#[test]
	fn recording_twice_keeps_one_occurrence_first() {
		let mut corpus = Corpus::new(10);
		corpus.record("hello");
		corpus.record("other");
		corpus.record("hello");
		corpus.record("hello");

		assert_eq!(corpus.entries(), entries(&["hello", "other"]).as_slice());
	}

	#[test]
	fn dedupe_is_exact() {
		let mut corpus = Corpus::new(10);
		corpus.record("Hello");
		corpus.record("hello");
		corpus.record("hello ");

		assert_eq!(corpus.len(), 3);
	}

	#[test]
	fn blank_text_is_ignored() {
		let mut corpus = Corpus::new(10);

		assert!(!corpus.record(""));
		assert!(!corpus.record(" \t\n"));
		assert!(corpus.is_empty());
	}

	#[test]
	fn capacity_drops_oldest() {
		let mut corpus = Corpus::new(3);
		for text in ["a", "b", "c", "d"] {
			corpus.record(text);
		}

		assert_eq!(corpus.entries(), entries(&["d", "c", "b"]).as_slice());
	}

	#[test]
	fn capacity_holds_for_random_sequences() {
		let mut rng = StdRng::seed_from_u64(42);
		let mut corpus = Corpus::new(1000);

		for _ in 0..5000 {
			let text = format!("prompt {}", rng.random_range(0..1500));
			corpus.record(&text);
			assert!(corpus.len() <= 1000);
			assert_eq!(corpus.get(0), Some(text.as_str()));
		}

		let mut sorted = corpus.entries().to_vec();
		sorted.sort();
		sorted.dedup();
		assert_eq!(sorted.len(), corpus.len());
	}

	#[test]
	fn from_entries_repairs_invariants() {
		let corpus = Corpus::from_entries(entries(&["a", "b", "a", "c", "d"]), 3);

		assert_eq!(corpus.entries(), entries(&["a", "b", "c"]).as_slice());
	}

	#[test]
	fn load_reads_store() {
		let store = MemoryStore::with_value("k", entries(&["b", "a"]));

		let corpus = Corpus::load(&store, "k", 1000);

		assert_eq!(corpus.entries(), entries(&["b", "a"]).as_slice());
	}

	#[test]
	fn load_degrades_to_empty() {
		let mut store = MemoryStore::with_value("k", entries(&["b", "a"]));
		assert!(Corpus::load(&store, "missing", 1000).is_empty());

		store.set_fail_reads(true);
		assert!(Corpus::load(&store, "k", 1000).is_empty());
	}

	#[test]
	fn clear_empties() {
		let mut corpus = Corpus::from_entries(entries(&["a", "b"]), 10);
		corpus.clear();

		assert!(corpus.is_empty());
		assert_eq!(corpus.capacity(), 10);
	}
}
