//! Sentence boundary search and text reconstruction.
//!
//! A generation attempt produces a raw token buffer such as
//! `the cat sat . the dog ran in`. This module cuts it after a sentence
//! terminator and turns the kept tokens into readable text:
//! `The cat sat. The dog ran.`

use crate::error::AttemptFailure;

/// Terminator every separator is normalized to before clauses are split.
const CANONICAL: &str = ".";

/// Negation clitic split off by the tokenizer (`do n't`).
const NEGATION: &str = "n't";

/// Finds where the generated `tokens` should end and renders the sentence.
///
/// Separators are tried in order. For each one, the kept prefix runs from
/// the first token up to and including the LAST occurrence of that
/// separator. The first separator whose prefix holds at least `min_words`
/// words wins.
///
/// # Errors
/// - [`AttemptFailure::MissingSeparator`] if a separator reached by the search
///   does not occur in `tokens`, even when a later one does
/// - [`AttemptFailure::ShortSentence`] if no separator yields a long enough prefix
/// - [`AttemptFailure::MalformedReconstruction`] if the prefix cannot be rebuilt
pub(crate) fn finish_sentence(
	tokens: &[String],
	min_words: usize,
	separators: &[String],
) -> Result<String, AttemptFailure> {
	for separator in separators {
		let end = cut_position(tokens, separator)
			.ok_or_else(|| AttemptFailure::MissingSeparator(separator.clone()))?;
		let kept = &tokens[..end];
		if word_count(kept) >= min_words {
			return reconstruct(kept, tokens, separators);
		}
	}

	Err(AttemptFailure::ShortSentence)
}

/// Length of the prefix ending with the last occurrence of `separator`.
///
/// Searching the reversed buffer, index 0 keeps everything and index `i`
/// keeps `len - i` tokens; both reduce to "up to the last occurrence".
fn cut_position(tokens: &[String], separator: &str) -> Option<usize> {
	let reversed_index = tokens.iter().rev().position(|token| token == separator)?;
	Some(tokens.len() - reversed_index)
}

/// Number of tokens holding at least one alphanumeric character.
///
/// `n't` is glued back onto its stem in the output, so it is not a word.
fn word_count(tokens: &[String]) -> usize {
	tokens
		.iter()
		.filter(|token| *token != NEGATION && token.chars().any(char::is_alphanumeric))
		.count()
}

/// Rebuilds readable text from the kept tokens.
///
/// Every separator of `kept` is replaced by `.`, the text is split into
/// clauses on `" ."`, and each clause is capitalized. The clauses are then
/// joined back with the separators of the whole buffer `all`, in
/// left-to-right order, so `?` and `!` come back where they were. Empty
/// clauses are dropped along with the separator that closed them.
fn reconstruct(kept: &[String], all: &[String], separators: &[String]) -> Result<String, AttemptFailure> {
	let order: Vec<&str> = all
		.iter()
		.filter(|token| separators.contains(token))
		.map(String::as_str)
		.collect();

	let normalized = kept
		.iter()
		.map(|token| if separators.contains(token) { CANONICAL } else { token.as_str() })
		.collect::<Vec<_>>()
		.join(" ");

	let clauses: Vec<&str> = normalized.split(" .").collect();
	let breaks = clauses.len() - 1;
	if order.len() < breaks {
		return Err(AttemptFailure::MalformedReconstruction(format!(
			"{breaks} clause breaks but {} separators in {normalized:?}",
			order.len()
		)));
	}

	let mut text = String::with_capacity(normalized.len() + breaks);
	for (index, clause) in clauses.iter().enumerate() {
		let clause = clause.trim_start();
		// Back-to-back separators ("door ! .") leave empty clauses behind.
		if clause.is_empty() && index < breaks {
			continue;
		}
		text.push_str(&capitalize(clause));
		if index < breaks {
			text.push_str(order[index]);
			text.push(' ');
		}
	}

	Ok(text.replace(" n't", NEGATION).trim_end().to_owned())
}

/// Upper-cases the first character, leaving the rest untouched.
fn capitalize(clause: &str) -> String {
	let mut chars = clause.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tokens(text: &str) -> Vec<String> {
		text.split_whitespace().map(str::to_owned).collect()
	}

	fn separators() -> Vec<String> {
		vec![".".to_owned(), "?".to_owned(), "!".to_owned()]
	}

	fn finish(text: &str, min_words: usize) -> Result<String, AttemptFailure> {
		finish_sentence(&tokens(text), min_words, &separators())
	}

	#[test]
	fn separator_as_last_token_keeps_everything() {
		assert_eq!(finish("the cat sat on the mat .", 3).unwrap(), "The cat sat on the mat.");
	}

	#[test]
	fn separator_second_to_last_drops_only_the_tail() {
		// Reversed index 1.
		assert_eq!(finish("the cat sat on the mat . the", 3).unwrap(), "The cat sat on the mat.");
	}

	#[test]
	fn tokens_after_the_last_separator_are_dropped() {
		assert_eq!(
			finish("the cat sat . the dog ran . the dog", 2).unwrap(),
			"The cat sat. The dog ran."
		);
	}

	#[test]
	fn first_separator_in_list_order_wins() {
		// "." is tried first and gives a long enough prefix, even though "!" is later.
		assert_eq!(finish("we won . it is over ! yes", 2).unwrap(), "We won.");
	}

	#[test]
	fn absent_separator_fails_the_attempt() {
		// "." is tried first and never occurs; the later "?" is not consulted.
		assert_eq!(
			finish("is it ok ? yes it is", 3).unwrap_err(),
			AttemptFailure::MissingSeparator(".".to_owned())
		);
		assert_eq!(
			finish("run far away now ! go", 4).unwrap_err(),
			AttemptFailure::MissingSeparator(".".to_owned())
		);
	}

	#[test]
	fn short_prefix_falls_through_to_next_separator() {
		// "." keeps 2 words only, "!" keeps 5.
		let separators = vec![".".to_owned(), "!".to_owned()];
		assert_eq!(
			finish_sentence(&tokens("go on . run away now !"), 3, &separators).unwrap(),
			"Go on. Run away now!"
		);
		// With the default list, "?" comes next and is missing.
		assert_eq!(
			finish("go on . run away now !", 3).unwrap_err(),
			AttemptFailure::MissingSeparator("?".to_owned())
		);
	}

	#[test]
	fn every_prefix_too_short() {
		assert_eq!(finish("go ? no ! ok .", 5).unwrap_err(), AttemptFailure::ShortSentence);
	}

	#[test]
	fn separators_are_restored_in_order() {
		assert_eq!(
			finish("is it ok ? yes it is ! fine .", 3).unwrap(),
			"Is it ok? Yes it is! Fine."
		);
	}

	#[test]
	fn back_to_back_separators_are_collapsed() {
		// Passages ending with "!" are joined with ". " before tokenizing.
		assert_eq!(
			finish("ran to the door ! . is the dog here ?", 6).unwrap(),
			"Ran to the door! Is the dog here?"
		);
		assert_eq!(finish("sat on the mat . . the", 3).unwrap(), "Sat on the mat.");
	}

	#[test]
	fn punctuation_does_not_count_as_words() {
		let dot = vec![".".to_owned()];
		assert_eq!(
			finish_sentence(&tokens("well , ok ."), 3, &dot).unwrap_err(),
			AttemptFailure::ShortSentence
		);
		assert_eq!(finish("well , ok then .", 3).unwrap(), "Well , ok then.");
	}

	#[test]
	fn contractions_are_rejoined() {
		assert_eq!(finish("i do n't know .", 3).unwrap(), "I don't know.");
		// "do n't" is one word once rejoined.
		let dot = vec![".".to_owned()];
		assert_eq!(
			finish_sentence(&tokens("i do n't ."), 3, &dot).unwrap_err(),
			AttemptFailure::ShortSentence
		);
	}

	#[test]
	fn buffer_without_separator_fails() {
		assert_eq!(
			finish("the cat sat on the", 1).unwrap_err(),
			AttemptFailure::MissingSeparator(".".to_owned())
		);
	}

	#[test]
	fn ellipsis_token_makes_reconstruction_malformed() {
		// "..." is split on " ." into an extra clause with no separator left for it.
		assert!(matches!(
			finish("wait ... what .", 2),
			Err(AttemptFailure::MalformedReconstruction(_))
		));
	}

	#[test]
	fn custom_separator_list() {
		let separators = vec!["!".to_owned()];
		assert_eq!(finish_sentence(&tokens("stop it now !"), 2, &separators).unwrap(), "Stop it now!");
	}

	#[test]
	fn plain_dot_outside_separator_list_is_malformed() {
		// The stray "." still splits a clause but has no separator to restore.
		let separators = vec!["!".to_owned()];
		assert!(matches!(
			finish_sentence(&tokens("stop it . now !"), 2, &separators),
			Err(AttemptFailure::MalformedReconstruction(_))
		));
	}
}
