//! Key-value persistence of the submission history.
//!
//! The engine only needs "a sequence of strings under one key". Two
//! backends are provided:
//! - `MemoryStore`: in-process map, with switchable failures for tests
//! - `FileStore`: one postcard-encoded file per key inside a folder

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use crate::io::{build_key_path, read_bytes_if_exists, write_atomic};

/// Failure of a store read or write.
///
/// Never fatal for the engine: callers log it and fall back to the
/// in-memory state.
#[derive(Debug, Error)]
pub enum StoreError {
	#[error("store I/O failed: {0}")]
	Io(#[from] io::Error),

	#[error("stored value could not be encoded or decoded: {0}")]
	Codec(#[from] postcard::Error),

	#[error("store is unavailable: {0}")]
	Unavailable(String),
}

/// Minimal key-value contract used by the engine.
pub trait Store {
	/// Returns the sequence stored under `key`, or `None` if absent.
	fn get(&self, key: &str) -> Result<Option<Vec<String>>, StoreError>;

	/// Replaces the sequence stored under `key`.
	fn set(&mut self, key: &str, value: &[String]) -> Result<(), StoreError>;
}

/// In-memory store.
///
/// Reads and writes can be made to fail, to exercise the engine's
/// degraded paths.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
	values: HashMap<String, Vec<String>>,
	fail_reads: bool,
	fail_writes: bool,
	writes: usize,
}

impl MemoryStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a store already holding `value` under `key`.
	pub fn with_value(key: &str, value: Vec<String>) -> Self {
		let mut store = Self::default();
		store.values.insert(key.to_owned(), value);
		store
	}

	/// Makes every following read fail (or succeed again).
	pub fn set_fail_reads(&mut self, fail: bool) {
		self.fail_reads = fail;
	}

	/// Makes every following write fail (or succeed again).
	pub fn set_fail_writes(&mut self, fail: bool) {
		self.fail_writes = fail;
	}

	/// Returns the value currently stored under `key`.
	pub fn value(&self, key: &str) -> Option<&[String]> {
		self.values.get(key).map(Vec::as_slice)
	}

	/// Number of successful writes so far.
	pub fn writes(&self) -> usize {
		self.writes
	}
}

impl Store for MemoryStore {
	fn get(&self, key: &str) -> Result<Option<Vec<String>>, StoreError> {
		if self.fail_reads {
			return Err(StoreError::Unavailable("reads disabled".to_owned()));
		}
		Ok(self.values.get(key).cloned())
	}

	fn set(&mut self, key: &str, value: &[String]) -> Result<(), StoreError> {
		if self.fail_writes {
			return Err(StoreError::Unavailable("writes disabled".to_owned()));
		}
		self.values.insert(key.to_owned(), value.to_vec());
		self.writes += 1;
		Ok(())
	}
}

/// Folder-backed store.
///
/// Each key is saved as `<folder>/<key>.bin`, the value being the
/// postcard encoding of the string sequence.
#[derive(Debug, Clone)]
pub struct FileStore {
	folder: PathBuf,
}

impl FileStore {
	/// Opens (and creates if needed) a store in `folder`.
	///
	/// A relative `folder` is anchored to the working directory at open
	/// time; later directory changes do not move the store.
	pub fn new<P: AsRef<Path>>(folder: P) -> io::Result<Self> {
		let folder = std::path::absolute(folder)?;
		std::fs::create_dir_all(&folder)?;
		Ok(Self { folder })
	}

	/// Returns the folder holding the store files.
	pub fn folder(&self) -> &Path {
		&self.folder
	}
}

impl Store for FileStore {
	fn get(&self, key: &str) -> Result<Option<Vec<String>>, StoreError> {
		let path = build_key_path(&self.folder, key, "bin")?;
		match read_bytes_if_exists(&path)? {
			Some(bytes) => Ok(Some(postcard::from_bytes(&bytes)?)),
			None => Ok(None),
		}
	}

	fn set(&mut self, key: &str, value: &[String]) -> Result<(), StoreError> {
		let path = build_key_path(&self.folder, key, "bin")?;
		let bytes = postcard::to_stdvec(&value)?;
		write_atomic(&path, &bytes)?;
		debug!("Wrote {} entries to {}", value.len(), path.display());
		Ok(())
	}
}
