mod config;
mod errors;
mod matching;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, LexiconBackend};
use crate::matching::lexicon::{datamuse, DatamuseLexicon, Lexicon, NoLexicon, ThesaurusLexicon};
use crate::matching::synonym_cache::SynonymCache;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting skillmatch v{}", env!("CARGO_PKG_VERSION"));

    let lexicon = build_lexicon(&config)?;
    info!(
        "Lexicon initialized (backend: {}, lookup timeout: {}ms, max concurrent lookups: {})",
        lexicon.name(),
        config.lookup_timeout.as_millis(),
        config.lookup_concurrency
    );

    let cache = Arc::new(SynonymCache::with_limits(
        lexicon,
        config.lookup_timeout,
        config.lookup_concurrency,
    ));
    let state = AppState::new(config.clone(), cache);
    info!("Skill matcher ready (concurrency: {})", config.match_concurrency);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs the lexical resource selected by `LEXICON_BACKEND`.
fn build_lexicon(config: &Config) -> Result<Arc<dyn Lexicon>> {
    let lexicon: Arc<dyn Lexicon> = match config.lexicon_backend {
        LexiconBackend::Thesaurus => {
            let thesaurus = match &config.thesaurus_path {
                Some(path) => ThesaurusLexicon::builtin_with_file(path)?,
                None => ThesaurusLexicon::builtin(),
            };
            info!("Thesaurus holds {} indexed words", thesaurus.len());
            Arc::new(thesaurus)
        }
        LexiconBackend::Datamuse => {
            let per_attempt = datamuse::attempt_timeout(config.lookup_timeout);
            info!("Datamuse requests time out after {}ms", per_attempt.as_millis());
            Arc::new(DatamuseLexicon::new(
                config.datamuse_url.clone(),
                config.synonyms_per_word,
                per_attempt,
            )?)
        }
        LexiconBackend::None => Arc::new(NoLexicon),
    };
    Ok(lexicon)
}
