use std::time::{Duration, Instant};

/// Visibility contract of the suggestion indicator.
///
/// - A non-empty suggestion list is shown immediately.
/// - An empty list hides the indicator only after `hide_delay`.
/// - Any update cancels a pending hide.
///
/// Time is passed in explicitly so hosts drive it from their own clock.
#[derive(Clone, Debug)]
pub struct Indicator {
	hide_delay: Duration,
	suggestions: Vec<String>,
	visible: bool,
	/// Deadline of the pending hide, if any.
	hide_at: Option<Instant>,
}

impl Indicator {
	pub fn new(hide_delay: Duration) -> Self {
		Self { hide_delay, suggestions: Vec::new(), visible: false, hide_at: None }
	}

	/// Shows `suggestions`, or schedules a hide if the list is empty.
	///
	/// The last non-empty list stays displayed until the hide happens.
	pub fn update(&mut self, suggestions: Vec<String>, now: Instant) {
		self.hide_at = None;
		if suggestions.is_empty() {
			self.hide_at = Some(now + self.hide_delay);
		} else {
			self.suggestions = suggestions;
			self.visible = true;
		}
	}

	/// Applies a pending hide whose deadline has passed.
	///
	/// Returns `true` if the indicator just became hidden.
	pub fn tick(&mut self, now: Instant) -> bool {
		match self.hide_at {
			Some(deadline) if now >= deadline => {
				self.hide_at = None;
				let was_visible = self.visible;
				self.visible = false;
				was_visible
			}
			_ => false,
		}
	}

	pub fn is_visible(&self) -> bool {
		self.visible
	}

	/// Deadline of the pending hide, if one is scheduled.
	pub fn hide_deadline(&self) -> Option<Instant> {
		self.hide_at
	}

	/// Suggestions currently displayed.
	pub fn suggestions(&self) -> &[String] {
		&self.suggestions
	}

	/// Display text, e.g. `Next: fox | dog`. `None` while hidden.
	pub fn text(&self) -> Option<String> {
		if !self.visible {
			return None;
		}
		Some(format!("Next: {}", self.suggestions.join(" | ")))
	}
}
