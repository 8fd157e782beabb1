//! Event-driven orchestration of the completion engine.
//!
//! A `Session` owns the corpus, the derived model, the store and the
//! currently bound input surface. Hosts feed it discrete events:
//! - `load` once the session starts
//! - `attach` / `detach` when a text surface appears or disappears
//! - `on_input` when the surface content changes
//! - `on_key` for Tab (accept), Enter (submit), ArrowUp / ArrowDown (history)
//! - `flush_pending` when queued store writes may complete
//! - `tick` to apply the indicator's delayed hide
//!
//! Every event runs to completion. A corpus mutation rebuilds the model at
//! once and queues a store write. Writes are only performed by
//! `flush_pending`; each completed write rebuilds the model again from the
//! corpus as it is at completion time, not as it was when the write was
//! queued.

use std::collections::VecDeque;
use std::time::Instant;

use log::{debug, info, warn};

use crate::completion::merge;
use crate::config::EngineConfig;
use crate::corpus::Corpus;
use crate::history::DraftState;
use crate::indicator::Indicator;
use crate::model::builder::ModelBuilder;
use crate::model::ngram_model::NgramModel;
use crate::model::predictor::PredictionEngine;
use crate::store::Store;

/// A live text-input surface supplied by the host.
pub trait InputSurface {
	/// Stable identity of the surface, used to make `attach` idempotent.
	fn id(&self) -> &str;

	/// Current text content.
	fn text(&self) -> String;

	/// Replaces the text content.
	fn set_text(&mut self, text: &str);

	/// Places the caret after the last character.
	fn move_caret_to_end(&mut self);
}

/// Keys the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
	Tab,
	Enter,
	ArrowUp,
	ArrowDown,
	Other,
}

/// A key press with its modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
	pub key: Key,
	pub shift: bool,
}

impl KeyPress {
	pub fn new(key: Key) -> Self {
		Self { key, shift: false }
	}

	pub fn with_shift(key: Key) -> Self {
		Self { key, shift: true }
	}
}

/// What the host should do with a key after the engine saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
	/// The engine handled the key; the host must suppress its default action.
	Consumed,
	/// The host keeps its default behavior for the key.
	PassThrough,
}

/// A surface bound to the session, with its transient state.
#[derive(Debug)]
struct Binding<I> {
	surface: I,
	draft: DraftState,
	indicator: Indicator,
}

/// Root of the engine: corpus, model, store and the active binding.
///
/// # Invariants
/// - `model` is always derived from `corpus` (rebuilt on load, on every
///   mutation and on every completed write)
/// - Before `load`, predictions are empty and mutations are ignored
/// - After `invalidate_context`, every operation is a no-op
pub struct Session<S: Store, I: InputSurface> {
	config: EngineConfig,
	store: S,
	corpus: Corpus,
	model: NgramModel,
	builder: ModelBuilder,
	engine: PredictionEngine,
	/// Snapshots waiting to be written, oldest first.
	pending: VecDeque<Vec<String>>,
	loaded: bool,
	context_lost: bool,
	binding: Option<Binding<I>>,
}

impl<S: Store, I: InputSurface> Session<S, I> {
	/// Creates an unloaded session.
	///
	/// # Errors
	/// Returns an error if `config` is invalid.
	pub fn new(config: EngineConfig, store: S) -> Result<Self, String> {
		config.validate()?;
		let builder = ModelBuilder::new(config.order)?;
		let engine = PredictionEngine::new(config.max_results, config.placeholders.clone());

		Ok(Self {
			corpus: Corpus::new(config.capacity),
			model: builder.empty(),
			builder,
			engine,
			pending: VecDeque::new(),
			loaded: false,
			context_lost: false,
			binding: None,
			config,
			store,
		})
	}

	/// Loads the corpus from the store and builds the model.
	///
	/// Store failures degrade to an empty corpus. Calling `load` again
	/// reloads from the store, discarding queued writes.
	pub fn load(&mut self) {
		if self.context_lost {
			return;
		}
		if !self.pending.is_empty() {
			warn!("Reloading with {} unsaved changes", self.pending.len());
			self.pending.clear();
		}
		self.corpus = Corpus::load(&self.store, &self.config.store_key, self.config.capacity);
		self.loaded = true;
		self.rebuild_model();
	}

	/// Returns `true` once loaded and while the host context is valid.
	pub fn is_ready(&self) -> bool {
		self.loaded && !self.context_lost
	}

	pub fn is_context_valid(&self) -> bool {
		!self.context_lost
	}

	pub fn config(&self) -> &EngineConfig {
		&self.config
	}

	pub fn corpus(&self) -> &Corpus {
		&self.corpus
	}

	pub fn model(&self) -> &NgramModel {
		&self.model
	}

	pub fn store(&self) -> &S {
		&self.store
	}

	pub fn store_mut(&mut self) -> &mut S {
		&mut self.store
	}

	/// Number of queued store writes.
	pub fn pending_writes(&self) -> usize {
		self.pending.len()
	}

	/// Returns ranked next-word suggestions for `input`.
	///
	/// Empty before `load` and after the host context is lost.
	pub fn predict(&self, input: &str) -> Vec<String> {
		suggest(&self.engine, &self.model, self.is_ready(), input)
	}

	/// Records a submission and queues a store write.
	///
	/// Returns `true` if the corpus changed.
	pub fn record(&mut self, text: &str) -> bool {
		if !self.is_ready() {
			debug!("Ignoring submission before load");
			return false;
		}
		let changed = self.corpus.record(text);
		if changed {
			self.rebuild_model();
			self.schedule_write();
		}
		changed
	}

	/// Forgets every submission and queues a store write.
	pub fn reset(&mut self) {
		if !self.is_ready() {
			return;
		}
		self.corpus.clear();
		info!("Reset learning, cleared all previous entries");
		self.rebuild_model();
		self.schedule_write();
	}

	/// Completes every queued store write, oldest first.
	///
	/// Each completion rebuilds the model from the current corpus, whether
	/// the write succeeded or not: the in-memory corpus is authoritative.
	/// Failed writes are logged and not retried.
	///
	/// Returns the number of writes that succeeded.
	pub fn flush_pending(&mut self) -> usize {
		if self.context_lost {
			return 0;
		}
		let mut written = 0;
		while let Some(snapshot) = self.pending.pop_front() {
			match self.store.set(&self.config.store_key, &snapshot) {
				Ok(()) => {
					written += 1;
					debug!("Saved {} entries", snapshot.len());
				}
				Err(e) => warn!("Failed to save entries: {}", e),
			}
			self.rebuild_model();
		}
		written
	}

	/// Binds `surface` to the session.
	///
	/// Attaching the surface that is already bound (same `id`) is a no-op.
	/// Another surface replaces the current binding and its draft.
	///
	/// Returns `true` if a new binding was created.
	pub fn attach(&mut self, surface: I) -> bool {
		if self.context_lost {
			return false;
		}
		if let Some(binding) = &self.binding {
			if binding.surface.id() == surface.id() {
				return false;
			}
			debug!("Replacing surface '{}' by '{}'", binding.surface.id(), surface.id());
		}
		debug!("Setting up completion for surface '{}'", surface.id());
		let draft = DraftState::new(&surface.text());
		self.binding = Some(Binding {
			surface,
			draft,
			indicator: Indicator::new(self.config.hide_delay()),
		});
		true
	}

	/// Unbinds the current surface, dropping its draft, and returns it.
	pub fn detach(&mut self) -> Option<I> {
		self.binding.take().map(|binding| binding.surface)
	}

	/// Marks the host context as lost.
	///
	/// The binding and queued writes are dropped; every later operation
	/// is a no-op.
	pub fn invalidate_context(&mut self) {
		if self.context_lost {
			return;
		}
		warn!("Host context lost, disabling completion");
		self.context_lost = true;
		self.binding = None;
		self.pending.clear();
	}

	pub fn surface(&self) -> Option<&I> {
		self.binding.as_ref().map(|b| &b.surface)
	}

	pub fn surface_mut(&mut self) -> Option<&mut I> {
		self.binding.as_mut().map(|b| &mut b.surface)
	}

	pub fn draft(&self) -> Option<&DraftState> {
		self.binding.as_ref().map(|b| &b.draft)
	}

	pub fn indicator(&self) -> Option<&Indicator> {
		self.binding.as_ref().map(|b| &b.indicator)
	}

	/// Handles a content change of the bound surface.
	pub fn on_input(&mut self, now: Instant) {
		let ready = self.is_ready();
		let Some(binding) = self.binding.as_mut() else {
			return;
		};
		binding.draft.input = binding.surface.text();
		let suggestions = suggest(&self.engine, &self.model, ready, &binding.draft.input);
		binding.indicator.update(suggestions, now);
	}

	/// Handles a key press on the bound surface.
	pub fn on_key(&mut self, press: KeyPress, now: Instant) -> KeyOutcome {
		if self.binding.is_none() {
			return KeyOutcome::PassThrough;
		}
		match press.key {
			Key::Tab => {
				self.accept_suggestion(now);
				KeyOutcome::Consumed
			}
			Key::Enter if !press.shift => {
				self.submit(now);
				KeyOutcome::PassThrough
			}
			Key::ArrowUp => self.navigate(true, now),
			Key::ArrowDown => self.navigate(false, now),
			_ => KeyOutcome::PassThrough,
		}
	}

	/// Applies the indicator's pending hide if its deadline passed.
	///
	/// Returns `true` if the indicator just became hidden.
	pub fn tick(&mut self, now: Instant) -> bool {
		self.binding.as_mut().is_some_and(|b| b.indicator.tick(now))
	}

	/// Merges the top suggestion into the bound surface.
	fn accept_suggestion(&mut self, now: Instant) {
		let ready = self.is_ready();
		let Some(binding) = self.binding.as_mut() else {
			return;
		};

		let suggestions = suggest(&self.engine, &self.model, ready, &binding.draft.input);
		if let Some(top) = suggestions.first() {
			let merged = merge(&binding.draft.input, top);
			binding.surface.set_text(&merged.text);
			binding.draft.input = binding.surface.text();
			binding.surface.move_caret_to_end();
		}

		let suggestions = suggest(&self.engine, &self.model, ready, &binding.draft.input);
		binding.indicator.update(suggestions, now);
	}

	/// Commits the bound draft into the corpus.
	fn submit(&mut self, now: Instant) {
		let ready = self.is_ready();
		let Some(binding) = self.binding.as_mut() else {
			return;
		};

		let text = std::mem::take(&mut binding.draft.input);
		let changed = if ready {
			binding.draft.cursor.commit(&mut self.corpus, &text)
		} else {
			binding.draft.cursor.reset();
			false
		};
		binding.indicator.update(Vec::new(), now);

		if changed {
			debug!("Saved prompt: {}", text);
			self.rebuild_model();
			self.schedule_write();
		}
	}

	/// Moves through history and displays the result on the bound surface.
	fn navigate(&mut self, older: bool, now: Instant) -> KeyOutcome {
		let ready = self.is_ready();
		let Some(binding) = self.binding.as_mut() else {
			return KeyOutcome::PassThrough;
		};

		let shown = if older {
			binding.draft.cursor.navigate_older(&self.corpus, &binding.draft.input)
		} else {
			binding.draft.cursor.navigate_newer(&self.corpus)
		};
		let Some(text) = shown else {
			return KeyOutcome::PassThrough;
		};

		binding.surface.set_text(&text);
		binding.surface.move_caret_to_end();
		binding.draft.input = text;

		let suggestions = suggest(&self.engine, &self.model, ready, &binding.draft.input);
		binding.indicator.update(suggestions, now);
		KeyOutcome::Consumed
	}

	fn schedule_write(&mut self) {
		self.pending.push_back(self.corpus.entries().to_vec());
	}

	fn rebuild_model(&mut self) {
		self.model = self.builder.build(self.corpus.entries());
	}
}

/// Predicts for `input`, or nothing while the session is not ready.
fn suggest(engine: &PredictionEngine, model: &NgramModel, ready: bool, input: &str) -> Vec<String> {
	if !ready {
		return Vec::new();
	}
	engine.predict(model, input)
}
