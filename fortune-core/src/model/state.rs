use std::collections::BTreeMap;

use rand::Rng;

use crate::error::FortuneError;

/// Two-token context preceding a sampled token.
pub type Context = (String, String);

/// Observed successors of one context in the transition table.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges
/// are weighted by their number of observations.
///
/// ## Responsibilities:
/// - Accumulate successor occurrences during learning
/// - Predict the next token using weighted random sampling
/// - Merge with another state having the same context (parallel learning support)
///
/// ## Invariants
/// - All transitions belong to the same `context`
/// - Each transition occurrence count is strictly positive
/// - Transitions are ordered by token, so sampling with a seeded random
///   source does not depend on how the table was assembled
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
	context: Context,
	/// Example: { "mat" => 2, "park" => 1 }
	transitions: BTreeMap<String, usize>,
}

impl State {
	/// Creates a new empty state for the given context.
	pub fn new(context: Context) -> Self {
		Self {
			context,
			transitions: BTreeMap::new(),
		}
	}

	/// Records an occurrence of a transition toward `next_token`.
	pub fn add_transition(&mut self, next_token: &str) {
		*self.transitions.entry(next_token.to_owned()).or_insert(0) += 1;
	}

	/// Number of distinct successors.
	pub fn len(&self) -> usize {
		self.transitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.transitions.is_empty()
	}

	/// Occurrence count of `token` after this context (0 if never seen).
	pub fn count(&self, token: &str) -> usize {
		self.transitions.get(token).copied().unwrap_or(0)
	}

	/// Predicts the next token using weighted random sampling.
	///
	/// The probability of selecting a token is proportional to its
	/// occurrence count.
	///
	/// Returns `None` if the state has no transitions.
	pub fn predict<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		let total: usize = self.transitions.values().sum();
		if total == 0 {
			return None;
		}

		let mut r = rng.random_range(0..total);
		for (next_token, occurrence) in &self.transitions {
			if r < *occurrence {
				return Some(next_token.as_str());
			}
			r -= occurrence;
		}

		// Unreachable while every count is positive.
		self.transitions.keys().next_back().map(String::as_str)
	}

	/// Merges another state into this one.
	///
	/// Both states must represent the same context. Occurrence counts are summed.
	///
	/// # Errors
	/// Returns an error if the contexts do not match.
	pub fn merge(&mut self, other: &Self) -> Result<(), FortuneError> {
		if self.context != other.context {
			return Err(FortuneError::ContextMismatch(format!(
				"{:?} vs {:?}",
				self.context, other.context
			)));
		}

		for (next_token, occurrence) in &other.transitions {
			*self.transitions.entry(next_token.clone()).or_insert(0) += *occurrence;
		}

		Ok(())
	}
}
