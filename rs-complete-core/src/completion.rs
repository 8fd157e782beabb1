/// Result of splicing a suggestion into the current input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Merge {
	/// The new full input text.
	pub text: String,
	/// Caret position, in characters. Always the end of `text`.
	pub caret: usize,
}

/// Returns the word currently being typed.
///
/// This is everything after the last whitespace character, so it is empty
/// when the input is empty or ends with whitespace.
pub fn last_word(input: &str) -> &str {
	input.rsplit(char::is_whitespace).next().unwrap_or("")
}

/// Merges `suggestion` into `current_input`.
///
/// The same suggestion plays two roles depending on the word being typed:
/// - If `suggestion` starts with the last word (case-insensitively), it is
///   a completion of that word and only the remaining suffix is appended.
/// - Otherwise it is the next word: a single space and the suggestion are
///   appended verbatim.
///
/// The caret is always placed at the end of the new text.
///
/// Examples:
/// - `"I want to e"` + `"eat"` → `"I want to eat"`
/// - `"I want to"` + `"eat"` → `"I want to eat"`
/// - `"the quick "` + `"brown"` → `"the quick brown"`
pub fn merge(current_input: &str, suggestion: &str) -> Merge {
	let mut text = current_input.to_owned();

	match strip_prefix_ignore_case(suggestion, last_word(current_input)) {
		Some(rest) => text.push_str(rest),
		None => {
			text.push(' ');
			text.push_str(suggestion);
		}
	}

	let caret = text.chars().count();
	Merge { text, caret }
}

/// Strips `prefix` from the start of `s`, comparing characters by their
/// lowercase mapping.
///
/// The remainder keeps the original casing of `s`.
fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
	let mut chars = s.char_indices();
	for expected in prefix.chars() {
		let (_, actual) = chars.next()?;
		if !actual.to_lowercase().eq(expected.to_lowercase()) {
			return None;
		}
	}
	let rest = chars.next().map_or(s.len(), |(index, _)| index);
	Some(&s[rest..])
}

#[cfg(test)]
mod tests {
	use super::{last_word, merge, Merge};

	#[test]
	fn last_word_is_text_after_last_whitespace() {
		assert_eq!(last_word("I want to e"), "e");
		assert_eq!(last_word("I want to "), "");
		assert_eq!(last_word(""), "");
		assert_eq!(last_word("single"), "single");
		assert_eq!(last_word("tab\tseparated"), "separated");
	}

	#[test]
	fn completes_word_being_typed() {
		assert_eq!(
			merge("I want to e", "eat"),
			Merge { text: "I want to eat".to_owned(), caret: 13 }
		);
	}

	#[test]
	fn inserts_next_word_with_space() {
		assert_eq!(merge("I want to", "eat").text, "I want to eat");
	}

	#[test]
	fn prefix_match_ignores_case() {
		assert_eq!(merge("Hello W", "world").text, "Hello World");
		assert_eq!(merge("shout LOU", "loud").text, "shout LOUd");
	}

	#[test]
	fn trailing_whitespace_appends_directly() {
		assert_eq!(merge("the quick ", "brown").text, "the quick brown");
	}

	#[test]
	fn empty_input_takes_suggestion() {
		assert_eq!(merge("", "hello"), Merge { text: "hello".to_owned(), caret: 5 });
	}

	#[test]
	fn full_word_match_is_a_completion_with_nothing_left() {
		// The word is already complete, so nothing is appended
		assert_eq!(merge("I want to eat", "eat").text, "I want to eat");
	}

	#[test]
	fn caret_counts_characters_not_bytes() {
		let merged = merge("un café", "crème");
		assert_eq!(merged.text, "un café crème");
		assert_eq!(merged.caret, 13);
	}

	#[test]
	fn longer_last_word_is_not_a_prefix() {
		assert_eq!(merge("I want eaten", "eat").text, "I want eaten eat");
	}
}
