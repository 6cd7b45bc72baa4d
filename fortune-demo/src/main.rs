use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use fortune_core::io::read_file;
use fortune_core::model::fortune_model::NGramFortuneModel;
use fortune_core::model::generation_input::GenerationInput;
use fortune_core::model::generator::FortuneGenerator;

/// Print fortunes generated from a text file (one passage per line).
#[derive(Parser, Debug)]
#[command(name = "fortune-demo", version)]
struct Args {
	/// Corpus file
	corpus: PathBuf,

	/// Number of fortunes to print
	#[arg(short = 'n', long, default_value_t = 10)]
	count: usize,

	/// Declared model order
	#[arg(long, default_value_t = 3)]
	order: usize,

	#[arg(long, default_value_t = 5)]
	min_words: usize,

	#[arg(long, default_value_t = 25)]
	max_words: usize,

	/// Attempts per fortune before giving up
	#[arg(long, default_value_t = 30)]
	tries: usize,

	/// Sentence terminators, tried in order
	#[arg(long, value_delimiter = ',', default_value = ".,?,!")]
	separators: Vec<String>,

	/// Wall-clock cap per fortune, in milliseconds
	#[arg(long)]
	time_limit_ms: Option<u64>,

	/// Seed for reproducible output
	#[arg(long)]
	seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
	let args = Args::parse();

	// Each non-blank line of the file is one passage
	let corpus = read_file(&args.corpus)?;

	// The seed makes both the opening order and the sampling reproducible
	let model = match args.seed {
		Some(seed) => NGramFortuneModel::with_seed(&corpus, args.order, seed)?,
		None => NGramFortuneModel::new(&corpus, args.order)?,
	};
	let summary = model.summary();
	println!(
		"{} passages, {} openings, {} contexts, {} transitions",
		corpus.len(),
		summary.starts,
		summary.contexts,
		summary.transitions
	);

	// Invalid ranges or separators are reported before anything is generated
	let mut input = GenerationInput::new(args.min_words, args.max_words, args.tries)?;
	input.set_separators(args.separators)?;
	input.set_time_limit(args.time_limit_ms.map(Duration::from_millis));

	// The model is used through the generation contract only
	let generator: &dyn FortuneGenerator = &model;
	for i in 0..args.count {
		println!("Fortune {}: {}", i + 1, generator.generate(&input));
	}

	Ok(())
}
