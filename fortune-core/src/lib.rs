//! Word-level Markov "fortune" generation library.
//!
//! This crate provides a small n-gram sentence generator including:
//! - A transition table keyed by two-token contexts
//! - A rotating set of observed sentence openings
//! - Bounded-retry generation with sentence boundary detection
//! - Text reconstruction (capitalization, punctuation reattachment)
//!
//! Models are built once and injected where they are needed through the
//! [`model::generator::FortuneGenerator`] trait.

/// Error types shared by the whole crate.
pub mod error;

/// Core n-gram model and generation logic.
pub mod model;

/// Splitting raw text into word and punctuation tokens.
pub mod tokenizer;

/// I/O utilities (corpus loading, path helpers).
pub mod io;
