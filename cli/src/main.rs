//! CLI entrypoint for Kitchen Remedy
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use remedy_application::{
    CompositeUsageRecorder, GatewayRegistry, GenerateRemedyUseCase, ManageAccountsUseCase,
    ManageHouseholdUseCase, UsageRecorder,
};
use remedy_infrastructure::{
    ConfigLoader, HmacCredentialHasher, InMemorySessionStore, JsonlUsageRecorder, MemoryStore,
    ProviderRegistry, TracingUsageRecorder,
};
use remedy_presentation::{AppState, Cli, create_router};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let _log_guard = init_tracing(cli.verbose, config.logging.directory.as_deref());

    info!("Starting Kitchen Remedy");

    for issue in config.ensure_valid()? {
        warn!("{}", issue);
    }

    // === Dependency Injection ===
    // Provider adapters
    let registry = ProviderRegistry::from_settings(config.providers.resolve_all())
        .context("Failed to build provider clients")?;
    let configured = registry.configured();
    if configured.is_empty() {
        warn!("No provider configured; remedy requests will be rejected");
    }

    // Storage
    let store = match &config.storage.snapshot_path {
        Some(path) => Arc::new(
            MemoryStore::open(path)
                .await
                .with_context(|| format!("Failed to open snapshot {}", path.display()))?,
        ),
        None => Arc::new(MemoryStore::in_memory()),
    };

    // Usage telemetry
    let mut recorders: Vec<Box<dyn UsageRecorder>> = vec![Box::new(TracingUsageRecorder)];
    if let Some(path) = &config.logging.usage_log
        && let Some(recorder) = JsonlUsageRecorder::new(path)
    {
        info!(path = %recorder.path().display(), "Recording provider usage");
        recorders.push(Box::new(recorder));
    }
    let usage: Arc<dyn UsageRecorder> = Arc::new(CompositeUsageRecorder::new(recorders));

    // Use cases
    let state = AppState {
        accounts: Arc::new(ManageAccountsUseCase::new(
            store.clone(),
            Arc::new(HmacCredentialHasher),
            Arc::new(InMemorySessionStore::new()),
        )),
        household: Arc::new(ManageHouseholdUseCase::new(store.clone(), store.clone())),
        remedies: Arc::new(
            GenerateRemedyUseCase::new(
                store.clone(),
                store,
                config.generation.to_generation_config(),
            )
            .with_usage_recorder(usage),
        ),
        providers: Arc::new(registry),
    };

    let bind = cli.bind.unwrap_or(config.server.bind);
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    info!(addr = %bind, providers = ?configured, "Listening");

    let app = create_router(config.server.request_body_limit).with_state(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Console logging by verbosity (`RUST_LOG` wins), plus a daily file when a
/// log directory is configured. The guard must outlive the server.
fn init_tracing(verbose: u8, directory: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let (file_layer, guard) = match directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "kitchen-remedy.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .init();

    guard
}

/// Default filter for a verbosity count. Without `-v`, usage and request
/// lines from the workspace crates stay visible at `info`.
fn default_directives(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn,kitchen_remedy=info,remedy_infrastructure=info,tower_http=info",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_keeps_usage_telemetry() {
        let directives = default_directives(0);
        assert!(directives.contains("remedy_infrastructure=info"));
        assert!(EnvFilter::try_new(directives).is_ok());
        assert_eq!(default_directives(2), "debug");
        assert_eq!(default_directives(7), "trace");
    }
}
