use log::debug;

use super::ngram_model::NgramModel;

/// Builds `NgramModel`s from the full submission history.
///
/// The model is never updated in place: every call to `build` starts from
/// an empty table, so the result only depends on the entries given.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModelBuilder {
	order: usize,
}

impl ModelBuilder {
	/// Creates a builder producing models of maximum order `order`.
	///
	/// # Errors
	/// Returns an error if `order < 1`.
	pub fn new(order: usize) -> Result<Self, String> {
		if order < 1 {
			return Err("order must be >= 1".to_owned());
		}
		Ok(Self { order })
	}

	/// Returns the maximum order of the models built.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Returns an empty model of the configured order.
	pub fn empty(&self) -> NgramModel {
		self.build::<&str>(&[])
	}

	/// Builds a fresh model from `entries`.
	///
	/// Entries are processed in order, so first-seen tie-breaking follows
	/// the corpus order (most recent entry first).
	pub fn build<S: AsRef<str>>(&self, entries: &[S]) -> NgramModel {
		let mut model = NgramModel::with_order(self.order);

		for entry in entries {
			model.add_sentence(entry.as_ref());
		}

		debug!("Built n-gram model: {} entries, {} grams", entries.len(), model.len());
		model
	}
}
