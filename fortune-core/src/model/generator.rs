use crate::model::generation_input::GenerationInput;

/// Returned by a generator when no attempt produced a sentence.
///
/// Running out of attempts is expected on small or sparse corpora; callers
/// should treat this value as "no fortune produced".
pub const NO_FORTUNE: &str = "None :c";

/// Anything able to produce a fortune under the given constraints.
///
/// # Responsibilities
/// - Return a single capitalized, terminated sentence, or [`NO_FORTUNE`]
/// - Never fail: attempt failures are recovered internally
///
/// Generators are built once at startup and handed to their consumers, e.g.
/// as a `Box<dyn FortuneGenerator>` shared by request handlers.
pub trait FortuneGenerator: Send + Sync {
	fn generate(&self, input: &GenerationInput) -> String;
}
