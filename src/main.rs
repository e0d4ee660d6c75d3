use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use what_to_eat::adapters::auth::JwtSessionValidator;
use what_to_eat::adapters::http::{api_router, AuthState, DecisionHandlers};
use what_to_eat::adapters::postgres::{PostgresDecisionRepository, PostgresMenuCatalog};
use what_to_eat::adapters::SystemClock;
use what_to_eat::application::{DecideHandler, GetHistoryHandler, GetTodayDecisionHandler};
use what_to_eat::config::{AppConfig, LogFormat, ServerConfig};
use what_to_eat::ports::{Clock, DecisionRepository, MenuCatalog};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let calendar = config.calendar.civil_calendar()?;
    tracing::info!(
        environment = ?config.server.environment,
        utc_offset = %calendar.offset(),
        "Starting what-to-eat"
    );

    tracing::info!(url = %config.database.redacted_url(), "Connecting to database");
    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let catalog: Arc<dyn MenuCatalog> = Arc::new(PostgresMenuCatalog::new(pool.clone()));
    let repository: Arc<dyn DecisionRepository> =
        Arc::new(PostgresDecisionRepository::new(pool.clone(), calendar));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let handlers = DecisionHandlers::new(
        Arc::new(DecideHandler::new(catalog.clone(), repository.clone(), clock.clone())),
        Arc::new(GetHistoryHandler::new(repository.clone(), catalog.clone(), clock.clone())),
        Arc::new(GetTodayDecisionHandler::new(repository, catalog, clock, calendar)),
    );
    let auth: AuthState = Arc::new(JwtSessionValidator::new(
        &config.auth.jwt_secret,
        config.auth.issuer.as_deref(),
    ));

    let app = api_router(handlers, auth)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http());

    let address = config.server.socket_addr()?;
    let listener = TcpListener::bind(address).await?;
    tracing::info!(%address, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match server.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() && !server.is_production() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
