use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::mpsc;
use std::thread;

use rand::Rng;

use super::state::{Context, State};
use crate::error::{AttemptFailure, FortuneError};

/// Number of tokens in one n-gram window: a two-token context and its successor.
pub const WINDOW: usize = 3;

/// Below this many windows the table is counted on the calling thread.
const PARALLEL_THRESHOLD: usize = 50_000;

/// Chunks per CPU when counting in parallel.
const CHUNK_FACTOR: usize = 8;

/// Transition table of a word-level Markov chain.
///
/// Maps every two-token context observed in the corpus to the tokens that
/// followed it, with their occurrence counts. This is a maximum-likelihood
/// estimate of P(next | previous two), without smoothing.
///
/// # Invariants
/// - Every context key was observed at least once
/// - All transition counts are >= 1
/// - The table is not modified once handed to a model
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitionTable {
	states: HashMap<Context, State>,
}

impl TransitionTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a table from a token sequence.
	///
	/// Long sequences are split into chunks counted on separate threads
	/// (`num_cpus * 8` chunks), then merged. Chunks overlap by two tokens so
	/// no window is lost or counted twice.
	pub fn from_tokens(tokens: &[String]) -> Result<Self, FortuneError> {
		let windows = tokens.len().saturating_sub(WINDOW - 1);
		if windows < PARALLEL_THRESHOLD {
			let mut table = Self::new();
			table.add_tokens(tokens);
			return Ok(table);
		}

		let chunks = num_cpus::get() * CHUNK_FACTOR;
		let chunk_size = windows.div_ceil(chunks);

		let (tx, rx) = mpsc::channel();
		thread::scope(|scope| {
			for start in (0..windows).step_by(chunk_size) {
				let end = (start + chunk_size).min(windows) + WINDOW - 1;
				let chunk = &tokens[start..end];
				let tx = tx.clone();

				scope.spawn(move || {
					let mut partial = TransitionTable::new();
					partial.add_tokens(chunk);
					// The receiver lives past the scope, send cannot fail.
					let _ = tx.send(partial);
				});
			}
		});
		drop(tx);

		let mut table = Self::new();
		for partial in rx.iter() {
			table.absorb(partial)?;
		}
		Ok(table)
	}

	/// Counts every window of three consecutive tokens.
	///
	/// Sequences shorter than a window are ignored.
	pub fn add_tokens(&mut self, tokens: &[String]) {
		for window in tokens.windows(WINDOW) {
			let context = (window[0].clone(), window[1].clone());
			self.states
				.entry(context)
				.or_insert_with_key(|context| State::new(context.clone()))
				.add_transition(&window[2]);
		}
	}

	/// Returns the successors of a context, if it was observed.
	pub fn get(&self, first: &str, second: &str) -> Option<&State> {
		self.states.get(&(first.to_owned(), second.to_owned()))
	}

	/// Samples the token following `first second`.
	///
	/// # Errors
	/// Returns [`AttemptFailure::UnknownContext`] if the context was never
	/// observed in the corpus.
	pub fn predict<R: Rng + ?Sized>(
		&self,
		first: &str,
		second: &str,
		rng: &mut R,
	) -> Result<String, AttemptFailure> {
		self.get(first, second)
			.and_then(|state| state.predict(rng))
			.map(str::to_owned)
			.ok_or_else(|| AttemptFailure::UnknownContext(first.to_owned(), second.to_owned()))
	}

	/// Number of distinct contexts.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Number of distinct (context, successor) pairs.
	pub fn transitions(&self) -> usize {
		self.states.values().map(State::len).sum()
	}

	/// Merges another table into this one.
	///
	/// Occurrence counts for matching contexts and successors are summed.
	pub fn merge(&mut self, other: &Self) -> Result<(), FortuneError> {
		for (context, state) in &other.states {
			if let Some(existing) = self.states.get_mut(context) {
				existing.merge(state)?;
			} else {
				self.states.insert(context.clone(), state.clone());
			}
		}

		Ok(())
	}

	/// Same as [`merge`](Self::merge), taking ownership to avoid clones.
	fn absorb(&mut self, other: Self) -> Result<(), FortuneError> {
		for (context, state) in other.states {
			match self.states.entry(context) {
				Entry::Occupied(mut existing) => existing.get_mut().merge(&state)?,
				Entry::Vacant(slot) => {
					slot.insert(state);
				}
			}
		}

		Ok(())
	}
}
