use std::net::SocketAddr;

use adapter::database::{connect_database_with, migrate};
use anyhow::{Context, Result};
use api::{
    openapi::ApiDoc,
    route::{
        book::build_book_routers, health::build_health_check_routers,
        openapi::build_openapi_routers,
    },
};
use axum::{http::Method, Router};
use registry::AppRegistry;
use shared::config::AppConfig;
use shared::env::{which, Environment};
use tokio::net::TcpListener;
use tower_http::{
    cors::{self, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

#[tokio::main]
async fn main() -> Result<()> {
    init_logger()?;
    let result = bootstrap().await;
    opentelemetry::global::shutdown_tracer_provider();
    result
}

fn init_logger() -> Result<()> {
    // Production logs info and above; development logs debug and above.
    let log_level = match which() {
        Environment::Development => "debug",
        Environment::Production => "info",
    };
    // RUST_LOG wins over the environment default.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log_level.into());

    let subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_target(false);

    // Spans are exported to a Jaeger agent only when one is configured.
    let opentelemetry = match (std::env::var("JAEGER_HOST"), std::env::var("JAEGER_PORT")) {
        (Ok(host), Ok(port)) => {
            let tracer = opentelemetry_jaeger::new_agent_pipeline()
                .with_endpoint(format!("{host}:{port}"))
                .with_service_name("book-api")
                .with_auto_split_batch(true)
                .with_max_packet_size(8192)
                .install_simple()?;
            Some(tracing_opentelemetry::layer().with_tracer(tracer))
        }
        _ => None,
    };

    tracing_subscriber::registry()
        .with(subscriber)
        .with(env_filter)
        .with(opentelemetry)
        .try_init()?;
    Ok(())
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_headers(cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_origin(cors::Any)
}

async fn bootstrap() -> Result<()> {
    let app_config = AppConfig::new()?;
    let pool = connect_database_with(&app_config.database);

    migrate(&pool)
        .await
        .context("failed to migrate the books schema")?;
    tracing::info!("Database schema is up to date");

    let registry = AppRegistry::new(pool);
    let app = Router::new()
        .merge(build_health_check_routers())
        .merge(build_book_routers())
        .merge(build_openapi_routers())
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        .layer(cors())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .with_state(registry);

    let ip = app_config
        .server
        .host
        .parse()
        .with_context(|| format!("invalid SERVER_HOST {:?}", app_config.server.host))?;
    let addr = SocketAddr::new(ip, app_config.server.port);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Unexpected error happened in server")
        .inspect_err(|e| {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "Unexpected error happened in server"
            );
        })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error.message = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
