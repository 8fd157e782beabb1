use crate::corpus::Corpus;

/// Walks backward and forward through the corpus while keeping the
/// draft that was being typed when browsing started.
///
/// # States
/// - `index == None`: not browsing, the draft is displayed
/// - `index == Some(i)`: `corpus[i]` is displayed (0 = most recent)
///
/// Edits made while browsing are not tracked: the next navigation
/// replaces them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryCursor {
	index: Option<usize>,
	saved_draft: String,
}

impl HistoryCursor {
	pub fn new() -> Self {
		Self::default()
	}

	/// Position of the displayed entry, `None` when not browsing.
	pub fn index(&self) -> Option<usize> {
		self.index
	}

	pub fn is_browsing(&self) -> bool {
		self.index.is_some()
	}

	/// Draft captured when browsing started.
	pub fn saved_draft(&self) -> &str {
		&self.saved_draft
	}

	/// Moves to the next older entry.
	///
	/// When browsing starts, `current_input` is saved as the draft.
	/// Returns the text to display, or `None` if already on the oldest
	/// entry (no-op).
	pub fn navigate_older(&mut self, corpus: &Corpus, current_input: &str) -> Option<String> {
		let next = self.index.map_or(0, |i| i + 1);
		let entry = corpus.get(next)?;

		if self.index.is_none() {
			self.saved_draft = current_input.to_owned();
		}
		self.index = Some(next);
		Some(entry.to_owned())
	}

	/// Moves to the next newer entry, or back to the saved draft.
	///
	/// Returns the text to display, or `None` if not browsing (no-op).
	/// If the corpus shrank under the cursor, browsing ends on the draft.
	pub fn navigate_newer(&mut self, corpus: &Corpus) -> Option<String> {
		let current = self.index?;

		let entry = match current.checked_sub(1) {
			Some(newer) => corpus.get(newer).map(|entry| (newer, entry.to_owned())),
			None => None,
		};

		match entry {
			Some((newer, text)) => {
				self.index = Some(newer);
				Some(text)
			}
			None => {
				self.index = None;
				Some(self.saved_draft.clone())
			}
		}
	}

	/// Ends browsing and records `text` into the corpus.
	///
	/// Returns `true` if the corpus was mutated.
	pub fn commit(&mut self, corpus: &mut Corpus, text: &str) -> bool {
		self.reset();
		corpus.record(text)
	}

	/// Ends browsing and forgets the saved draft.
	pub fn reset(&mut self) {
		self.index = None;
		self.saved_draft.clear();
	}
}

/// Transient input state of one bound text surface.
///
/// Never persisted; dropped with its binding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DraftState {
	/// Current content of the surface, as last observed.
	pub input: String,
	/// History browsing state.
	pub cursor: HistoryCursor,
}

impl DraftState {
	pub fn new(input: &str) -> Self {
		Self { input: input.to_owned(), cursor: HistoryCursor::new() }
	}
}

#[cfg(test)]
mod tests {
	use super::HistoryCursor;
	use crate::corpus::Corpus;

	fn corpus(values: &[&str]) -> Corpus {
		Corpus::from_entries(values.iter().map(|s| s.to_string()).collect(), 1000)
	}

	#[test]
	fn older_then_newer_restores_draft() {
		let corpus = corpus(&["recent", "old"]);
		let mut cursor = HistoryCursor::new();

		assert_eq!(cursor.navigate_older(&corpus, "hello").as_deref(), Some("recent"));
		assert_eq!(cursor.saved_draft(), "hello");
		assert_eq!(cursor.navigate_newer(&corpus).as_deref(), Some("hello"));
		assert!(!cursor.is_browsing());
	}

	#[test]
	fn walks_both_directions() {
		let corpus = corpus(&["c", "b", "a"]);
		let mut cursor = HistoryCursor::new();

		assert_eq!(cursor.navigate_older(&corpus, "draft").as_deref(), Some("c"));
		assert_eq!(cursor.navigate_older(&corpus, "c").as_deref(), Some("b"));
		assert_eq!(cursor.navigate_older(&corpus, "b").as_deref(), Some("a"));
		assert_eq!(cursor.index(), Some(2));
		assert_eq!(cursor.navigate_newer(&corpus).as_deref(), Some("b"));
		assert_eq!(cursor.navigate_newer(&corpus).as_deref(), Some("c"));
		assert_eq!(cursor.navigate_newer(&corpus).as_deref(), Some("draft"));
	}

	#[test]
	fn draft_is_captured_only_when_browsing_starts() {
		let corpus = corpus(&["b", "a"]);
		let mut cursor = HistoryCursor::new();

		cursor.navigate_older(&corpus, "draft");
		// Edit while browsing, then keep going
		cursor.navigate_older(&corpus, "b edited");

		assert_eq!(cursor.saved_draft(), "draft");
	}

	#[test]
	fn older_past_oldest_is_noop() {
		let corpus = corpus(&["only"]);
		let mut cursor = HistoryCursor::new();

		assert!(cursor.navigate_older(&corpus, "").is_some());
		assert!(cursor.navigate_older(&corpus, "only").is_none());
		assert_eq!(cursor.index(), Some(0));
	}

	#[test]
	fn older_on_empty_corpus_is_noop() {
		let corpus = corpus(&[]);
		let mut cursor = HistoryCursor::new();

		assert!(cursor.navigate_older(&corpus, "draft").is_none());
		assert!(!cursor.is_browsing());
		assert_eq!(cursor.saved_draft(), "");
	}

	#[test]
	fn newer_when_not_browsing_is_noop() {
		let corpus = corpus(&["a"]);
		let mut cursor = HistoryCursor::new();

		assert!(cursor.navigate_newer(&corpus).is_none());
	}

	#[test]
	fn shrunk_corpus_returns_to_draft() {
		let mut corpus = corpus(&["b", "a"]);
		let mut cursor = HistoryCursor::new();
		cursor.navigate_older(&corpus, "draft");
		cursor.navigate_older(&corpus, "b");

		corpus.clear();

		assert_eq!(cursor.navigate_newer(&corpus).as_deref(), Some("draft"));
		assert!(!cursor.is_browsing());
	}

	#[test]
	fn commit_resets_and_records() {
		let mut corpus = corpus(&["old"]);
		let mut cursor = HistoryCursor::new();
		cursor.navigate_older(&corpus, "draft");

		assert!(cursor.commit(&mut corpus, "new text"));

		assert!(!cursor.is_browsing());
		assert_eq!(cursor.saved_draft(), "");
		assert_eq!(corpus.get(0), Some("new text"));
	}
}
