use std::collections::{BTreeSet, VecDeque};
use std::sync::{Mutex, PoisonError};

use rand::Rng;
use rand::seq::SliceRandom;

/// Rotating collection of observed sentence openings.
///
/// Each entry is a two-token prefix (`"the cat"`) of a `.`-delimited
/// sentence of the corpus. The order is shuffled once at construction; each
/// call to [`rotate`](Self::rotate) hands out the head and moves it to the
/// tail, so repeated generations walk every opening round-robin.
///
/// # Invariants
/// - Entries are distinct and each holds exactly two space-separated tokens
/// - Membership never changes after construction; rotation is a permutation
/// - Pop-head/push-tail happens under a single lock
#[derive(Debug)]
pub struct StartRing {
	ring: Mutex<VecDeque<String>>,
}

impl StartRing {
	/// Collects the distinct openings of a lower-cased, `". "`-joined corpus
	/// and shuffles them.
	///
	/// Sentences are split on `.` and then on whitespace, so punctuation
	/// stays glued to its word (`"well, fine"`). Such an opening is not a
	/// table context and every attempt starting from it fails. Sentences
	/// with fewer than two words are ignored.
	pub fn from_text<R: Rng + ?Sized>(text: &str, rng: &mut R) -> Self {
		let distinct: BTreeSet<String> = text
			.split('.')
			.filter_map(|sentence| {
				let mut words = sentence.split_whitespace();
				Some(format!("{} {}", words.next()?, words.next()?))
			})
			.collect();

		let mut starts: Vec<String> = distinct.into_iter().collect();
		starts.shuffle(rng);
		Self::from_ordered(starts)
	}

	/// Builds a ring that hands out `starts` in the given order.
	pub fn from_ordered(starts: Vec<String>) -> Self {
		Self {
			ring: Mutex::new(starts.into()),
		}
	}

	/// Takes the head of the ring, re-appends it at the tail and returns it.
	///
	/// Returns `None` if the ring is empty.
	pub fn rotate(&self) -> Option<String> {
		let mut ring = self.ring.lock().unwrap_or_else(PoisonError::into_inner);
		let head = ring.pop_front()?;
		ring.push_back(head.clone());
		Some(head)
	}

	pub fn len(&self) -> usize {
		self.ring.lock().unwrap_or_else(PoisonError::into_inner).len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Current rotation order, head first.
	pub fn snapshot(&self) -> Vec<String> {
		self.ring
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.iter()
			.cloned()
			.collect()
	}
}
