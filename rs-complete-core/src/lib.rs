//! Adaptive next-word completion library.
//!
//! This crate learns from a user's own past submissions and provides:
//! - A word-level n-gram model rebuilt from the submission history
//! - Backoff prediction of the next word for a partial input
//! - Tab-completion merging of a suggestion into the typed text
//! - Bidirectional history recall that preserves the in-flight draft
//!
//! Persistence and the host text surface are abstracted behind the
//! `Store` and `InputSurface` traits; `Session` wires everything together.

/// Word-level n-gram model, its builder and the prediction engine.
pub mod model;

/// Most-recent-first submission history with dedupe and capacity bounds.
pub mod corpus;

/// Splicing a suggestion into the text being typed.
pub mod completion;

/// History cursor and per-binding draft state.
pub mod history;

/// Suggestion indicator visibility and hide delay.
pub mod indicator;

/// Key-value persistence backends.
pub mod store;

/// Engine tunables, loadable from TOML.
pub mod config;

/// Event-driven orchestration of the whole engine.
pub mod session;

/// I/O utilities (paths, atomic writes).
///
/// Not exposed
pub(crate) mod io;
