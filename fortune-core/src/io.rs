use std::path::{Path, PathBuf};
use std::{fs, io};

use crate::error::FortuneError;

/// Extension of corpus files looked up by [`list_corpora`] and [`load_corpora`].
pub const CORPUS_EXTENSION: &str = "txt";

/// Reads a corpus file and returns its non-blank lines as passages.
pub fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let contents = fs::read_to_string(filename)?;
	Ok(contents
		.lines()
		.filter(|line| !line.trim().is_empty())
		.map(str::to_owned)
		.collect())
}

/// Path of the corpus called `name` inside `folder`.
pub fn corpus_path<P: AsRef<Path>>(folder: P, name: &str) -> PathBuf {
	folder.as_ref().join(name).with_extension(CORPUS_EXTENSION)
}

/// Names of the corpora available in `folder`, sorted.
///
/// A corpus is a regular `.txt` file; its name is the file stem
/// (`quotes.txt` → `quotes`). Directories are ignored.
pub fn list_corpora<P: AsRef<Path>>(folder: P) -> io::Result<Vec<String>> {
	let mut names = Vec::new();
	for entry in fs::read_dir(folder)? {
		let path = entry?.path();
		let is_corpus = path.is_file() && path.extension().is_some_and(|ext| ext == CORPUS_EXTENSION);
		if let (true, Some(stem)) = (is_corpus, path.file_stem()) {
			names.push(stem.to_string_lossy().into_owned());
		}
	}

	names.sort();
	Ok(names)
}

/// Loads the passages of several named corpora from `folder`.
///
/// Each name is resolved to `<folder>/<name>.txt`. Passages are returned in
/// the order of `names`, then in file order.
///
/// # Errors
/// Returns an error if a name is blank or a file cannot be read.
pub fn load_corpora<P: AsRef<Path>>(folder: P, names: &[String]) -> Result<Vec<String>, FortuneError> {
	let folder = folder.as_ref();
	let mut corpus = Vec::new();

	for name in names {
		let name = name.trim();
		if name.is_empty() {
			return Err(FortuneError::InvalidInput("Corpus name cannot be empty".to_owned()));
		}
		corpus.extend(read_file(corpus_path(folder, name))?);
	}

	Ok(corpus)
}
