use std::time::Duration;

use crate::error::FortuneError;

/// Sentence-ending tokens tried by default, in order.
pub const DEFAULT_SEPARATORS: [&str; 3] = [".", "?", "!"];

/// Constraints of one `generate` call.
///
/// # Responsibilities
/// - Track the word range, retry budget and separators of a generation
/// - Reject inconsistent values at the time they are set
///
/// # Invariants
/// - `0 < min_words < max_words`
/// - `tries > 0`
/// - `separators` is non-empty and holds single tokens (no whitespace)
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationInput {
	/// Minimum number of words in the returned sentence.
	min_words: usize,

	/// Exclusive upper bound of the number of sampled tokens per attempt.
	max_words: usize,

	/// Number of attempts before giving up.
	tries: usize,

	/// Sentence terminators, tried in order during the boundary search.
	separators: Vec<String>,

	/// Optional wall-clock cap on the whole retry loop.
	time_limit: Option<Duration>,
}

impl Default for GenerationInput {
	fn default() -> Self {
		Self {
			min_words: 5,
			max_words: 25,
			tries: 30,
			separators: DEFAULT_SEPARATORS.iter().map(|s| (*s).to_owned()).collect(),
			time_limit: None,
		}
	}
}

impl GenerationInput {
	/// Creates an input with the given word range and retry budget, and the
	/// default separators.
	///
	/// # Errors
	/// Returns an error if the range or the retry budget is invalid.
	pub fn new(min_words: usize, max_words: usize, tries: usize) -> Result<Self, FortuneError> {
		let mut input = Self::default();
		input.set_word_range(min_words, max_words)?;
		input.set_tries(tries)?;
		Ok(input)
	}

	pub fn min_words(&self) -> usize {
		self.min_words
	}

	pub fn max_words(&self) -> usize {
		self.max_words
	}

	pub fn tries(&self) -> usize {
		self.tries
	}

	pub fn separators(&self) -> &[String] {
		&self.separators
	}

	pub fn time_limit(&self) -> Option<Duration> {
		self.time_limit
	}

	/// Sets the word range `[min_words, max_words)`.
	///
	/// # Errors
	/// Returns an error unless `0 < min_words < max_words`.
	pub fn set_word_range(&mut self, min_words: usize, max_words: usize) -> Result<(), FortuneError> {
		if min_words == 0 {
			return Err(FortuneError::InvalidInput("min_words must be positive".to_owned()));
		}
		if min_words >= max_words {
			return Err(FortuneError::InvalidInput(format!(
				"min_words ({min_words}) must be lower than max_words ({max_words})"
			)));
		}
		self.min_words = min_words;
		self.max_words = max_words;
		Ok(())
	}

	/// Sets the number of attempts.
	///
	/// # Errors
	/// Returns an error if `tries` is 0.
	pub fn set_tries(&mut self, tries: usize) -> Result<(), FortuneError> {
		if tries == 0 {
			return Err(FortuneError::InvalidInput("tries must be positive".to_owned()));
		}
		self.tries = tries;
		Ok(())
	}

	/// Replaces the separators, keeping their order.
	///
	/// # Errors
	/// Returns an error if the list is empty or a separator is blank or
	/// contains whitespace.
	pub fn set_separators<I, S>(&mut self, separators: I) -> Result<(), FortuneError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let separators: Vec<String> = separators.into_iter().map(Into::into).collect();
		if separators.is_empty() {
			return Err(FortuneError::InvalidInput("at least one separator is required".to_owned()));
		}
		if let Some(bad) = separators.iter().find(|s| s.is_empty() || s.chars().any(char::is_whitespace)) {
			return Err(FortuneError::InvalidInput(format!("invalid separator {bad:?}")));
		}
		self.separators = separators;
		Ok(())
	}

	/// Caps the wall-clock time of one `generate` call. `None` removes the cap.
	pub fn set_time_limit(&mut self, time_limit: Option<Duration>) {
		self.time_limit = time_limit;
	}
}
