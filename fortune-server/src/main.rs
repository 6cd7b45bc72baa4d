mod config;

use std::sync::RwLock;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use log::{error, info};
use serde::{Deserialize, Serialize};

use config::ServerConfig;
use fortune_core::error::FortuneError;
use fortune_core::io::{list_corpora, load_corpora};
use fortune_core::model::fortune_model::{ModelSummary, NGramFortuneModel};
use fortune_core::model::generation_input::GenerationInput;
use fortune_core::model::generator::FortuneGenerator;

/// Struct representing query parameters for the `/v1/fortune` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	min_words: Option<usize>,
	max_words: Option<usize>,
	tries: Option<usize>,
	separators: Option<String>, // comma separated, tried in order
	time_limit_ms: Option<u64>,
}

#[derive(Deserialize)]
struct CorporaQuery {
	names: Option<String>,
}

struct SharedData {
	generator: Box<dyn FortuneGenerator>,
	corpora: Vec<String>,
	summary: ModelSummary,
}

#[derive(Serialize)]
struct LoadedCorpora<'a> {
	corpora: &'a [String],
	model: &'a ModelSummary,
}

impl GenerateParams {
	/// Builds the generation constraints, falling back to the defaults.
	fn generation_input(&self) -> Result<GenerationInput, FortuneError> {
		let mut input = GenerationInput::default();
		input.set_word_range(
			self.min_words.unwrap_or(input.min_words()),
			self.max_words.unwrap_or(input.max_words()),
		)?;
		if let Some(tries) = self.tries {
			input.set_tries(tries)?;
		}
		if let Some(separators) = &self.separators {
			input.set_separators(separators.split(',').map(str::trim))?;
		}
		if let Some(ms) = self.time_limit_ms {
			input.set_time_limit(Some(Duration::from_millis(ms)));
		}
		Ok(input)
	}
}

/// Loads the named corpora and builds the model serving them.
///
/// No names gives an empty model, which answers every request with the
/// "no fortune" marker.
fn build_shared(config: &ServerConfig, names: Vec<String>) -> Result<SharedData, FortuneError> {
	let corpus = load_corpora(&config.data_dir, &names)?;
	let model = NGramFortuneModel::new(&corpus, config.order)?;
	let summary = model.summary();
	info!(
		"Loaded corpora {:?}: {} passages, {} starts, {} contexts",
		names,
		corpus.len(),
		summary.starts,
		summary.contexts
	);

	Ok(SharedData {
		generator: Box::new(model),
		corpora: names,
		summary,
	})
}

/// HTTP GET endpoint `/v1/fortune`
///
/// Generates one fortune with the currently loaded model.
#[get("/v1/fortune")]
async fn get_fortune(data: web::Data<RwLock<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let input = match query.generation_input() {
		Ok(input) => input,
		Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
	};

	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	HttpResponse::Ok().body(shared_data.generator.generate(&input))
}

#[get("/v1/corpora")]
async fn get_corpora(config: web::Data<ServerConfig>) -> impl Responder {
	match list_corpora(&config.data_dir) {
		Ok(names) => HttpResponse::Ok().body(names.join("\n")),
		Err(e) => {
			error!("Failed to list corpora in {}: {e}", config.data_dir);
			HttpResponse::InternalServerError().body("Failed to list corpora")
		}
	}
}

#[get("/v1/loaded_corpora")]
async fn get_loaded_corpora(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	HttpResponse::Ok().json(LoadedCorpora {
		corpora: &shared_data.corpora,
		model: &shared_data.summary,
	})
}

#[put("/v1/load_corpora")]
async fn put_corpora(
	data: web::Data<RwLock<SharedData>>,
	config: web::Data<ServerConfig>,
	query: web::Query<CorporaQuery>,
) -> impl Responder {
	let query_names = match &query.names {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty corpus name"),
	};

	let names: Vec<String> = query_names
		.split(',')
		.map(str::trim)
		.filter(|s| !s.is_empty())
		.map(str::to_owned)
		.collect();

	// Build before locking so generation keeps running meanwhile.
	let rebuilt = match build_shared(&config, names) {
		Ok(shared) => shared,
		Err(e) => return HttpResponse::InternalServerError().body(format!("Failed to load corpora: {e}")),
	};

	let mut shared_data = match data.write() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	*shared_data = rebuilt;

	HttpResponse::Ok().body("Corpora loaded successfully")
}

/// Main entry point for the server.
///
/// Builds the model from the configured corpora, shares it behind a
/// `RwLock` (generation only needs read access) and starts an Actix-web
/// HTTP server.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let config = ServerConfig::parse();
	let shared_data = build_shared(&config, config.corpora.clone()).map_err(std::io::Error::other)?;
	let shared_data = web::Data::new(RwLock::new(shared_data));
	let server_config = web::Data::new(config.clone());

	info!("Listening on {}:{}", config.host, config.port);
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::default().allow_any_origin().allowed_methods(vec!["GET", "PUT"]))
			.app_data(shared_data.clone())
			.app_data(server_config.clone())
			.service(get_fortune)
			.service(get_corpora)
			.service(get_loaded_corpora)
			.service(put_corpora)
	})
		.bind((config.host.as_str(), config.port))?
		.run()
		.await
}
