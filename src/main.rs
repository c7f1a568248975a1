//! Sleep diary API server.

use std::sync::Arc;

use sleep_diary::adapters::{
    api_router, DiaryAppState, DiarySeeder, HttpLayers, InMemoryQuestionRepository,
    InMemoryQuestionnaireRepository, InMemoryResponseRepository,
};
use sleep_diary::config::{AppConfig, ConfigError, LogFormat, ServerConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate().map_err(ConfigError::from)?;

    let timezone = config.diary.tz()?;
    let default_language = config.diary.language()?;

    // Stores
    let questionnaires = Arc::new(InMemoryQuestionnaireRepository::new());
    let questions = Arc::new(InMemoryQuestionRepository::new());
    let responses = Arc::new(InMemoryResponseRepository::new());

    if config.diary.seed_default_questionnaires {
        let report = DiarySeeder::new(questionnaires.clone(), questions.clone())
            .seed()
            .await?;
        tracing::info!(
            questionnaires_created = report.questionnaires_created,
            questions_created = report.questions_created,
            "Default questionnaires ready"
        );
    }

    let state = DiaryAppState::new(questionnaires, questions, responses, timezone)
        .with_default_language(default_language)
        .with_verbose_errors(config.verbose_errors());
    let layers = HttpLayers::from_config(&config.server, &config.features);
    let app = layers.apply(api_router(state));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        timezone = %timezone,
        "Sleep diary listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    match server.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_target(false).compact())
            .init(),
    }
}
