use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use super::boundary;
use super::generation_input::GenerationInput;
use super::generator::{FortuneGenerator, NO_FORTUNE};
use super::ngram_model::{TransitionTable, WINDOW};
use super::starts::StartRing;
use crate::error::{AttemptFailure, FortuneError};
use crate::tokenizer::{Tokenizer, WordTokenizer};

/// Separator inserted between corpus passages before they are tokenized.
const PASSAGE_SEPARATOR: &str = ". ";

/// Word-level Markov chain producing one-sentence fortunes.
///
/// # Responsibilities
/// - Build the start ring and transition table from a corpus
/// - Walk the table from a rotating opening with weighted sampling
/// - Cut the walk at a sentence terminator and render it as text
///
/// # Invariants
/// - Contexts are always the two previous tokens, whatever `order` says
/// - The table is read-only after construction; only the start ring rotates
#[derive(Debug)]
pub struct NGramFortuneModel {
	/// Declared order of the model (informational).
	order: usize,
	starts: StartRing,
	table: TransitionTable,
	rng: Mutex<StdRng>,
}

/// Sizes of a built model.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ModelSummary {
	pub order: usize,
	pub starts: usize,
	pub contexts: usize,
	pub transitions: usize,
}

impl NGramFortuneModel {
	/// Builds a model with the default tokenizer and an OS-seeded random source.
	///
	/// # Errors
	/// Returns an error if `order < 2`.
	pub fn new<S: AsRef<str>>(corpus: &[S], order: usize) -> Result<Self, FortuneError> {
		Self::with_tokenizer(corpus, order, &WordTokenizer::new(), StdRng::from_os_rng())
	}

	/// Builds a model whose shuffling and sampling are reproducible.
	///
	/// # Errors
	/// Returns an error if `order < 2`.
	pub fn with_seed<S: AsRef<str>>(corpus: &[S], order: usize, seed: u64) -> Result<Self, FortuneError> {
		Self::with_tokenizer(corpus, order, &WordTokenizer::new(), StdRng::seed_from_u64(seed))
	}

	/// Builds a model from `corpus`.
	///
	/// # Behavior
	/// - Lower-cases the passages and joins them with `". "`
	/// - Collects and shuffles the distinct two-word sentence openings
	/// - Tokenizes the joined text and counts every three-token window
	///
	/// An empty corpus gives an empty model, whose generations all return
	/// [`NO_FORTUNE`].
	///
	/// # Errors
	/// Returns an error if `order < 2`.
	pub fn with_tokenizer<S, T>(corpus: &[S], order: usize, tokenizer: &T, mut rng: StdRng) -> Result<Self, FortuneError>
	where
		S: AsRef<str>,
		T: Tokenizer + ?Sized,
	{
		if order < 2 {
			return Err(FortuneError::InvalidOrder(order));
		}
		if order != WINDOW {
			debug!("Order {order} requested, contexts stay at two tokens");
		}

		let text = corpus
			.iter()
			.map(AsRef::as_ref)
			.collect::<Vec<&str>>()
			.join(PASSAGE_SEPARATOR)
			.to_lowercase();

		let starts = StartRing::from_text(&text, &mut rng);
		trace!("starts = {:?}", starts.snapshot());

		let tokens = tokenizer.tokenize(&text);
		let table = TransitionTable::from_tokens(&tokens)?;
		debug!(
			"Built model: {} passages, {} tokens, {} starts, {} contexts",
			corpus.len(),
			tokens.len(),
			starts.len(),
			table.len()
		);

		Ok(Self {
			order,
			starts,
			table,
			rng: Mutex::new(rng),
		})
	}

	pub fn order(&self) -> usize {
		self.order
	}

	/// Sentence openings in their current rotation order, next one first.
	pub fn starts(&self) -> Vec<String> {
		self.starts.snapshot()
	}

	pub fn table(&self) -> &TransitionTable {
		&self.table
	}

	pub fn summary(&self) -> ModelSummary {
		ModelSummary {
			order: self.order,
			starts: self.starts.len(),
			contexts: self.table.len(),
			transitions: self.table.transitions(),
		}
	}

	/// Generates a fortune using `rng` instead of the model's own random source.
	///
	/// # Behavior
	/// - Returns [`NO_FORTUNE`] at once if the model has no openings
	/// - Runs up to `input.tries()` independent attempts, stopping at the first success
	/// - Stops early once `input.time_limit()` has elapsed
	/// - The start ring keeps rotating on failed attempts
	pub fn generate_with<R: Rng + ?Sized>(&self, input: &GenerationInput, rng: &mut R) -> String {
		if self.starts.is_empty() {
			debug!("No sentence openings, nothing to generate");
			return NO_FORTUNE.to_owned();
		}

		let started = Instant::now();
		for attempt in 0..input.tries() {
			if let Some(limit) = input.time_limit() {
				if started.elapsed() >= limit {
					warn!("Time limit of {limit:?} reached after {attempt} attempts");
					break;
				}
			}

			match self.attempt(input, rng) {
				Ok(sentence) => return sentence,
				Err(reason) => debug!("Attempt {attempt} failed: {reason}"),
			}
		}

		NO_FORTUNE.to_owned()
	}

	/// One pass of sampling and boundary search.
	fn attempt<R: Rng + ?Sized>(&self, input: &GenerationInput, rng: &mut R) -> Result<String, AttemptFailure> {
		let opening = self.starts.rotate().ok_or(AttemptFailure::EmptyModel)?;
		let mut sentence: Vec<String> = opening.split_whitespace().map(str::to_owned).collect();

		let words = rng.random_range(input.min_words()..input.max_words());
		trace!("Generating {words} words starting with {sentence:?}");

		for _ in 0..words {
			let [.., first, second] = sentence.as_slice() else {
				return Err(AttemptFailure::EmptyModel);
			};
			let next = self.table.predict(first, second, rng)?;
			sentence.push(next);
		}

		trace!("sentence = {sentence:?}");
		boundary::finish_sentence(&sentence, input.min_words(), input.separators())
	}
}

impl FortuneGenerator for NGramFortuneModel {
	/// Draws a per-call random source from the model's one, so concurrent
	/// calls only contend on the start ring.
	fn generate(&self, input: &GenerationInput) -> String {
		let mut rng = {
			let mut shared = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
			StdRng::from_rng(&mut *shared)
		};
		self.generate_with(input, &mut rng)
	}
}
