//! Top-level module for fortune generation.
//!
//! This module provides:
//! - The generation contract (`FortuneGenerator`) and its n-gram implementation
//! - The transition table (`TransitionTable`) and its states (`State`)
//! - The rotating set of sentence openings (`StartRing`)
//! - Generation constraints (`GenerationInput`)

/// Generation contract shared by every fortune strategy.
pub mod generator;

/// Word-level Markov chain fortune model.
///
/// Builds the start ring and the transition table from a corpus and runs
/// the bounded retry loop of a generation.
pub mod fortune_model;

/// Transition table keyed by two-token contexts.
///
/// Handles window counting (sequential or parallel), sampling and merging.
pub mod ngram_model;

/// Successors of a single context with their occurrence counts.
pub mod state;

/// Round-robin collection of sentence openings.
pub mod starts;

/// Constraints of a generation: word range, retries, separators.
pub mod generation_input;

/// Sentence boundary search and text reconstruction.
mod boundary;
