use std::sync::LazyLock;

use regex::Regex;

/// Negated contractions are split before the `n't`: `don't` → `do n't`.
static NEGATION: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?i)(\w)(n't)\b").expect("negation pattern is valid"));

/// Clitics are split before the apostrophe: `it's` → `it 's`.
static CLITIC: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?i)(\w)('(?:s|re|ve|ll|d|m))\b").expect("clitic pattern is valid"));

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?i)n't|'(?:s|re|ve|ll|d|m)\b|\d+(?:[.,]\d+)+|\w+(?:[-']\w+)*|\.\.\.|[^\w\s]")
		.expect("token pattern is valid")
});

/// Splits raw text into an ordered sequence of tokens.
///
/// Implementations must emit sentence punctuation (`.`, `?`, `!`) as tokens
/// of their own, since the generator looks for them to end sentences.
pub trait Tokenizer: Send + Sync {
	fn tokenize(&self, text: &str) -> Vec<String>;
}

/// English word tokenizer.
///
/// - Contractions are split from their stem (`can't` → `ca n't`, `we're` → `we 're`)
/// - Punctuation marks are separate tokens
/// - Decimal numbers, ellipses and hyphenated words stay whole
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
	pub fn new() -> Self {
		Self
	}
}

impl Tokenizer for WordTokenizer {
	fn tokenize(&self, text: &str) -> Vec<String> {
		let text = NEGATION.replace_all(text, "${1} ${2}");
		let text = CLITIC.replace_all(&text, "${1} ${2}");
		TOKEN.find_iter(&text).map(|m| m.as_str().to_owned()).collect()
	}
}
