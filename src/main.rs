/// HubSpot OAuth2 Middleware
///
/// - GET /hubspot/authorize: URL de consentimento do HubSpot
/// - GET /hubspot/oauth2callback: troca do code e persistência dos tokens
/// - GET /hubspot/items: contatos do CRM com refresh transparente do token
use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use hubspot_oauth_middleware::{config::Settings, handlers, store, utils::logging::*, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Carregar .env antes de tudo (em produção as variáveis vêm do ambiente)
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    if dotenv_loaded {
        log_info("✅ Arquivo .env carregado com sucesso");
    } else {
        tracing::debug!("Arquivo .env não encontrado - usando variáveis de ambiente do sistema");
    }

    let settings = Settings::new().context("Failed to load settings")?;
    log_config_loaded(&std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string()));

    let missing = settings.hubspot.missing_credentials();
    if !missing.is_empty() {
        log_warning(&format!(
            "⚠️  Credenciais HubSpot ausentes: {}. O fluxo OAuth2 vai falhar no HubSpot.",
            missing.join(", ")
        ));
    }

    let token_store = store::build_store(&settings.store).context("Failed to build token store")?;
    log_info(&format!("💾 Token store: {}", token_store.backend_name()));

    if let Err(e) = token_store.health_check().await {
        log_warning(&format!("⚠️  Token store não respondeu no startup: {}", e));
    }

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let port = settings.server.port;

    let app_state = Arc::new(AppState::new(settings, token_store));
    let app = handlers::create_router(app_state);

    log_server_startup(port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    log_server_ready(&addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    log_info("🛑 Server shut down gracefully");
    Ok(())
}

/// Signal handler para graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log_error(&format!("Failed to install Ctrl+C handler: {}", e));
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log_error(&format!("Failed to install SIGTERM handler: {}", e));
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log_info("🛑 Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            log_info("🛑 Received SIGTERM, shutting down gracefully...");
        }
    }
}
