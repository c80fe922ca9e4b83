//! Mentor Match server binary.
//!
//! Loads configuration, wires catalogs, feedback store and advice generator
//! into the matching API, and serves it.

use std::sync::Arc;

use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mentor_match::adapters::advice::{
    OpenAIAdviceConfig, OpenAIAdviceGenerator, TemplateAdviceGenerator,
};
use mentor_match::adapters::catalog::{
    remediation_from_file, StaticMentorSource, YamlFileMentorSource, YamlTraitCatalog,
};
use mentor_match::adapters::clock::SystemClock;
use mentor_match::adapters::feedback::{
    connect_or_noop, InMemoryFeedbackSink, JsonlFeedbackSink, NoopFeedbackSink,
};
use mentor_match::adapters::http::{matching_router, MatchingAppState};
use mentor_match::application::MentorPoolCache;
use mentor_match::config::{AppConfig, ConfigError, FeedbackBackend, LogFormat};
use mentor_match::domain::matching::{
    CatalogError, Ranker, RemediationCatalog, RemediationSelector, SimilarityScorer,
};
use mentor_match::ports::{AdviceError, AdviceGenerator, FeedbackSink, MentorSource};

/// Failures that stop the server from starting.
#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Catalog failed to load: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Advice generator failed to start: {0}")]
    Advice(#[from] AdviceError),

    #[error("Invalid bind address: {0}")]
    Address(#[from] std::net::AddrParseError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    config.validate().map_err(ConfigError::from)?;

    init_tracing(&config);

    let state = build_state(&config).await?;
    let app = matching_router(state, config.server.request_timeout());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, "Mentor Match listening");
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    match config.server.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

async fn build_state(config: &AppConfig) -> Result<MatchingAppState, StartupError> {
    let traits = match &config.catalog.traits_path {
        Some(path) => YamlTraitCatalog::from_file(path)?,
        None => YamlTraitCatalog::builtin()?,
    };
    info!(count = traits.len(), "Trait catalog loaded");

    let remediation = match &config.catalog.remediation_path {
        Some(path) => remediation_from_file(path)?,
        None => RemediationCatalog::builtin()?,
    };

    let builtin_mentors = StaticMentorSource::builtin()?;
    let fallback = builtin_mentors.mentors().to_vec();
    let source: Arc<dyn MentorSource> = match &config.catalog.mentors_path {
        Some(path) => Arc::new(YamlFileMentorSource::new(path)),
        None => Arc::new(builtin_mentors),
    };

    let clock = Arc::new(SystemClock);
    let mentor_pool = Arc::new(MentorPoolCache::new(
        source,
        fallback,
        clock.clone(),
        config.matching.mentor_cache_ttl(),
    ));

    Ok(MatchingAppState {
        traits: Arc::new(traits),
        mentor_pool,
        remediation: Arc::new(RemediationSelector::new(remediation)),
        ranker: Ranker::new(SimilarityScorer::new(config.matching.attribute_weights())),
        default_top_n: config.matching.top_n,
        advice_generator: build_advice_generator(config)?,
        feedback_sink: build_feedback_sink(config).await,
        clock,
    })
}

async fn build_feedback_sink(config: &AppConfig) -> Arc<dyn FeedbackSink> {
    let feedback = &config.feedback;
    let sink: Arc<dyn FeedbackSink> = match feedback.backend {
        FeedbackBackend::None => Arc::new(NoopFeedbackSink::new()),
        FeedbackBackend::Memory => Arc::new(InMemoryFeedbackSink::new()),
        FeedbackBackend::Jsonl => Arc::new(JsonlFeedbackSink::new(&feedback.jsonl_path)),
        FeedbackBackend::Postgres => {
            connect_or_noop(
                feedback.database_url.as_deref().unwrap_or_default(),
                feedback.max_connections,
                feedback.acquire_timeout(),
                feedback.run_migrations,
            )
            .await
        }
    };

    info!(backend = sink.backend(), "Feedback sink ready");
    sink
}

fn build_advice_generator(config: &AppConfig) -> Result<Arc<dyn AdviceGenerator>, StartupError> {
    let advice = &config.advice;
    match advice.openai_api_key.as_ref().filter(|_| advice.has_openai()) {
        Some(key) => {
            let generator = OpenAIAdviceGenerator::new(
                OpenAIAdviceConfig::new(key.expose_secret().clone())
                    .with_model(advice.model.clone())
                    .with_base_url(advice.base_url.clone())
                    .with_temperature(advice.temperature)
                    .with_max_tokens(advice.max_tokens)
                    .with_timeout(advice.timeout()),
            )?;
            info!(model = %advice.model, "OpenAI advice generator ready");
            Ok(Arc::new(generator))
        }
        None => {
            warn!("No OpenAI API key configured, serving templated advice");
            Ok(Arc::new(TemplateAdviceGenerator::new()))
        }
    }
}
