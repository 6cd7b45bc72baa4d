use clap::Parser;

/// Command line / environment configuration of the fortune server.
#[derive(Parser, Debug, Clone)]
#[command(name = "fortune-server", version, about = "HTTP service serving Markov fortunes")]
pub struct ServerConfig {
	/// Address to bind.
	#[arg(long, env = "FORTUNE_HOST", default_value = "127.0.0.1")]
	pub host: String,

	/// Port to listen on.
	#[arg(long, env = "FORTUNE_PORT", default_value_t = 5000)]
	pub port: u16,

	/// Folder holding the `.txt` corpora, one passage per line.
	#[arg(long, env = "FORTUNE_DATA_DIR", default_value = "./data")]
	pub data_dir: String,

	/// Declared model order.
	#[arg(long, env = "FORTUNE_ORDER", default_value_t = 3)]
	pub order: usize,

	/// Corpora loaded at startup (comma separated names, without extension).
	#[arg(long, env = "FORTUNE_CORPORA", value_delimiter = ',')]
	pub corpora: Vec<String>,
}
