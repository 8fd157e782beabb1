//! Engine configuration.
//!
//! Every field has a default, so a TOML file only needs the values it
//! overrides:
//!
//! ```toml
//! order = 3
//! max_results = 3
//! capacity = 1000
//! store_key = "previousPrompts"
//! hide_delay_ms = 500
//! placeholders = ["null"]
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::io::read_file;

pub const DEFAULT_ORDER: usize = 3;
pub const DEFAULT_MAX_RESULTS: usize = 3;
pub const DEFAULT_CAPACITY: usize = 1000;
pub const DEFAULT_STORE_KEY: &str = "previousPrompts";
pub const DEFAULT_HIDE_DELAY_MS: u64 = 500;

/// Tunables of the completion engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
	/// Maximum gram length (N).
	pub order: usize,
	/// Maximum number of suggestions per prediction.
	pub max_results: usize,
	/// Maximum number of stored submissions.
	pub capacity: usize,
	/// Store key holding the submission history.
	pub store_key: String,
	/// Delay before an empty suggestion list hides the indicator.
	pub hide_delay_ms: u64,
	/// Words never offered as suggestions.
	pub placeholders: Vec<String>,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			order: DEFAULT_ORDER,
			max_results: DEFAULT_MAX_RESULTS,
			capacity: DEFAULT_CAPACITY,
			store_key: DEFAULT_STORE_KEY.to_owned(),
			hide_delay_ms: DEFAULT_HIDE_DELAY_MS,
			placeholders: vec!["null".to_owned()],
		}
	}
}

impl EngineConfig {
	/// Parses and validates a TOML configuration.
	pub fn from_toml_str(contents: &str) -> Result<Self, Box<dyn std::error::Error>> {
		let config: Self = toml::from_str(contents)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads, parses and validates a TOML configuration file.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
		Self::from_toml_str(&read_file(path)?)
	}

	/// Checks that every value is usable.
	///
	/// # Errors
	/// Returns a message naming the first invalid field.
	pub fn validate(&self) -> Result<(), String> {
		if self.order < 1 {
			return Err("order must be >= 1".to_owned());
		}
		if self.max_results < 1 {
			return Err("max_results must be >= 1".to_owned());
		}
		if self.capacity < 1 {
			return Err("capacity must be >= 1".to_owned());
		}
		if self.store_key.trim().is_empty() {
			return Err("store_key cannot be empty".to_owned());
		}
		Ok(())
	}

	pub fn hide_delay(&self) -> Duration {
		Duration::from_millis(self.hide_delay_ms)
	}
}
